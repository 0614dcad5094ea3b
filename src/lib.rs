//! Ground and wall segmentation of tunnel LiDAR scans.
//!
//! The segmentation itself lives in [`tunnelseg_segmentation`]; this crate
//! wraps it in an [`AnalysisSession`] that owns the loaded scan and the
//! latest result, plus the configuration layer and CLI.
#![forbid(unsafe_code)]

pub mod config;
pub mod cross_section;
pub mod error;
pub mod session;

pub use config::{AnalysisConfig, LimitsConfig};
pub use cross_section::CrossSection;
pub use error::{Result, SessionError};
pub use session::{AnalysisSession, CloudSource};

pub use tunnelseg_core::{Aabb, PointCloud};
pub use tunnelseg_segmentation::{
    AnalysisResult, CancelFlag, FnObserver, PlaneSegment, PlaneSegmenter, SegmentError,
    SegmentationObserver, SegmentationParams,
};
