#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod observer;
pub mod params;
pub mod ransac_plane;
pub mod segmenter;

pub use classify::{
    classify_angle, classify_plane, AngleClass, ClassifiedPlane, DiscardReason, PlaneSegment,
};
pub use error::{InputError, Result, SegmentError};
pub use observer::{CancelFlag, FnObserver, SegmentationObserver};
pub use params::{
    SegmentationLimits, SegmentationParams, MAX_ITERATIONS, MIN_PLANE_INLIERS, RANSAC_TRIALS,
    STOP_THRESHOLD,
};
pub use ransac_plane::{ransac_plane, ransac_plane_seeded, PlaneModel, VERTICAL};
pub use segmenter::{
    segment_planes, AnalysisResult, PlaneCandidate, PlaneSegmenter, SegmentationStats, StopReason,
};
