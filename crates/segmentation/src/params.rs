use crate::error::{Result, SegmentError};

/// Remaining-point count at or below which the peel-off loop stops.
/// Small residues are mostly clutter and fragment into tiny planes.
pub const STOP_THRESHOLD: usize = 20_000;

/// Upper bound on extracted planes per run. Bounds runtime on scans that
/// never fall below [`STOP_THRESHOLD`].
pub const MAX_ITERATIONS: usize = 15;

/// A fitted plane with fewer inliers than this ends the run: no more
/// significant structure is left.
pub const MIN_PLANE_INLIERS: usize = 1_000;

/// Minimal-sample trials spent on each RANSAC fit.
pub const RANSAC_TRIALS: usize = 1_000;

/// Classification parameters for one segmentation run.
///
/// There is deliberately no `Default`: the calling application owns the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationParams {
    /// Inlier distance threshold, in point units.
    pub ransac_distance: f64,
    /// Planes tilted less than this from horizontal are ground.
    pub ground_angle_deg: f64,
    /// Planes tilted more than this from horizontal are wall candidates.
    pub wall_angle_deg: f64,
    /// Minimum `max_z - min_z` for a wall candidate to count.
    pub min_wall_height: f64,
}

impl SegmentationParams {
    pub fn validate(&self) -> Result<()> {
        positive("ransac_distance", self.ransac_distance)?;
        angle("ground_angle_deg", self.ground_angle_deg)?;
        angle("wall_angle_deg", self.wall_angle_deg)?;
        positive("min_wall_height", self.min_wall_height)?;

        if self.wall_angle_deg < self.ground_angle_deg {
            log::warn!(
                "wall_angle_deg ({}) is below ground_angle_deg ({}); ground takes precedence in the overlap",
                self.wall_angle_deg,
                self.ground_angle_deg
            );
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SegmentError::InvalidParameter {
            name,
            value,
            reason: "must be a finite value greater than 0",
        });
    }
    Ok(())
}

fn angle(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=90.0).contains(&value) {
        return Err(SegmentError::InvalidParameter {
            name,
            value,
            reason: "must be between 0 and 90 degrees",
        });
    }
    Ok(())
}

/// Stopping criteria of the peel-off loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationLimits {
    pub stop_threshold: usize,
    pub max_iterations: usize,
    pub min_plane_inliers: usize,
    pub ransac_trials: usize,
}

impl Default for SegmentationLimits {
    fn default() -> Self {
        Self {
            stop_threshold: STOP_THRESHOLD,
            max_iterations: MAX_ITERATIONS,
            min_plane_inliers: MIN_PLANE_INLIERS,
            ransac_trials: RANSAC_TRIALS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SegmentationParams {
        SegmentationParams {
            ransac_distance: 0.1,
            ground_angle_deg: 15.0,
            wall_angle_deg: 60.0,
            min_wall_height: 2.0,
        }
    }

    #[test]
    fn accepts_reference_values() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_distance() {
        let p = SegmentationParams {
            ransac_distance: 0.0,
            ..params()
        };
        assert!(matches!(
            p.validate(),
            Err(SegmentError::InvalidParameter {
                name: "ransac_distance",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_height() {
        let p = SegmentationParams {
            min_wall_height: f64::NAN,
            ..params()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_angles() {
        let p = SegmentationParams {
            wall_angle_deg: 91.0,
            ..params()
        };
        assert!(p.validate().is_err());

        let p = SegmentationParams {
            ground_angle_deg: -1.0,
            ..params()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn inverted_thresholds_are_allowed() {
        let p = SegmentationParams {
            ground_angle_deg: 70.0,
            wall_angle_deg: 20.0,
            ..params()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn default_limits_use_named_constants() {
        let limits = SegmentationLimits::default();
        assert_eq!(limits.stop_threshold, 20_000);
        assert_eq!(limits.max_iterations, 15);
        assert_eq!(limits.min_plane_inliers, 1_000);
        assert_eq!(limits.ransac_trials, 1_000);
    }
}
