#![forbid(unsafe_code)]

pub mod passthrough;

pub use passthrough::{passthrough_filter, passthrough_indices, slab_filter, Axis};
