#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod error;

pub use bbox::Aabb;
pub use cloud::{complement_indices, PointCloud};
pub use error::CloudError;
