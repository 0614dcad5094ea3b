use crate::segmenter::StopReason;
use thiserror::Error;
use tunnelseg_core::CloudError;

/// Problems with the point set itself, caught before any fitting starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("point set is empty")]
    Empty,

    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error(transparent)]
    Malformed(#[from] CloudError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "not enough walls found, need at least 2 (found {found} after {iterations} iterations, stopped: {stop_reason})"
    )]
    NotEnoughWalls {
        found: usize,
        iterations: usize,
        stop_reason: StopReason,
    },

    #[error(
        "plane extraction stalled after {iterations} iterations with {found} walls, need at least 2"
    )]
    DegenerateFit { found: usize, iterations: usize },

    #[error("segmentation cancelled after {iterations} iterations")]
    Cancelled { iterations: usize },
}

impl SegmentError {
    /// True for failures where the run completed but did not find a left and
    /// right wall. The caller may retry with different parameters.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            SegmentError::NotEnoughWalls { .. } | SegmentError::DegenerateFit { .. }
        )
    }

    /// Number of qualifying walls found before the run failed, if it got
    /// that far.
    pub fn walls_found(&self) -> Option<usize> {
        match self {
            SegmentError::NotEnoughWalls { found, .. } | SegmentError::DegenerateFit { found, .. } => {
                Some(*found)
            }
            _ => None,
        }
    }
}

impl From<CloudError> for SegmentError {
    fn from(e: CloudError) -> Self {
        SegmentError::Input(InputError::Malformed(e))
    }
}

pub type Result<T> = std::result::Result<T, SegmentError>;
