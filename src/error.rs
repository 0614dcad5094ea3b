//! Error type for the analysis session and CLI.

use std::path::PathBuf;
use thiserror::Error;
use tunnelseg_segmentation::SegmentError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read LAS file {path}: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("analysis failed: {0}")]
    Segmentation(#[from] SegmentError),

    #[error("no point cloud loaded, load a LAS file first")]
    NoPointCloud,

    #[error("no analysis results available, run the analysis first")]
    NoAnalysis,

    #[error("no cross-section available, extract one first")]
    NoCrossSection,

    #[error("cross-section tolerance must be a finite value >= 0, got {0}")]
    InvalidTolerance(f64),
}

pub type Result<T> = std::result::Result<T, SessionError>;
