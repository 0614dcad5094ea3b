//! Analysis configuration
//!
//! Holds the defaults the segmentation core refuses to carry itself, and
//! loads overrides from a TOML file:
//!
//! ```toml
//! min_wall_height = 2.0
//! ransac_distance = 0.1
//! ground_angle_deg = 15.0
//! wall_angle_deg = 60.0
//! seed = 7
//!
//! [limits]
//! stop_threshold = 20000
//! max_iterations = 15
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tunnelseg_segmentation::{
    PlaneSegmenter, SegmentError, SegmentationLimits, SegmentationParams, MAX_ITERATIONS,
    MIN_PLANE_INLIERS, RANSAC_TRIALS, STOP_THRESHOLD,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum vertical extent of a wall, in metres.
    pub min_wall_height: f64,
    /// RANSAC inlier distance, in metres.
    pub ransac_distance: f64,
    pub ground_angle_deg: f64,
    pub wall_angle_deg: f64,
    /// Half-width of the slab taken for a cross-section, in metres.
    pub cross_section_tolerance: f64,
    /// Fixed RANSAC seed. Unset means a fresh random seed per run.
    pub seed: Option<u64>,
    pub limits: LimitsConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_wall_height: 2.0,
            ransac_distance: 0.1,
            ground_angle_deg: 15.0,
            wall_angle_deg: 60.0,
            cross_section_tolerance: 0.5,
            seed: None,
            limits: LimitsConfig::default(),
        }
    }
}

/// Peel-off loop limits; see [`SegmentationLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub stop_threshold: usize,
    pub max_iterations: usize,
    pub min_plane_inliers: usize,
    pub ransac_trials: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            stop_threshold: STOP_THRESHOLD,
            max_iterations: MAX_ITERATIONS,
            min_plane_inliers: MIN_PLANE_INLIERS,
            ransac_trials: RANSAC_TRIALS,
        }
    }
}

impl From<LimitsConfig> for SegmentationLimits {
    fn from(c: LimitsConfig) -> Self {
        SegmentationLimits {
            stop_threshold: c.stop_threshold,
            max_iterations: c.max_iterations,
            min_plane_inliers: c.min_plane_inliers,
            ransac_trials: c.ransac_trials,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn to_params(&self) -> SegmentationParams {
        SegmentationParams {
            ransac_distance: self.ransac_distance,
            ground_angle_deg: self.ground_angle_deg,
            wall_angle_deg: self.wall_angle_deg,
            min_wall_height: self.min_wall_height,
        }
    }

    /// Builds a segmenter from this configuration, validating parameters.
    pub fn segmenter(&self) -> std::result::Result<PlaneSegmenter, SegmentError> {
        let segmenter = PlaneSegmenter::new(self.to_params())?.with_limits(self.limits.into());
        Ok(match self.seed {
            Some(seed) => segmenter.with_seed(seed),
            None => segmenter,
        })
    }
}
