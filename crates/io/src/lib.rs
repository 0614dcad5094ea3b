#![forbid(unsafe_code)]

pub mod csv;
pub mod las;
pub mod ply;

pub use self::csv::write_profile_csv;
pub use self::las::{read_las, read_las_header, validate_las_path, LasHeaderInfo};
pub use self::ply::{write_ply, write_ply_binary};
