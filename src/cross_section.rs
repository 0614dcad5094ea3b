use crate::error::{Result, SessionError};
use std::path::Path;
use tunnelseg_core::PointCloud;
use tunnelseg_filters::{slab_filter, Axis};
use tunnelseg_io::write_profile_csv;
use tunnelseg_segmentation::AnalysisResult;

/// Points of each partition lying in a thin slab across the tunnel axis
/// (`|y - y_position| <= tolerance`).
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    pub y_position: f64,
    pub tolerance: f64,
    pub ground: PointCloud,
    pub wall1: PointCloud,
    pub wall2: PointCloud,
}

impl CrossSection {
    pub fn extract(result: &AnalysisResult, y_position: f64, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SessionError::InvalidTolerance(tolerance));
        }
        let slice = |cloud: &PointCloud| slab_filter(cloud, Axis::Y, y_position, tolerance);
        Ok(Self {
            y_position,
            tolerance,
            ground: slice(&result.ground.points),
            wall1: slice(&result.wall1.points),
            wall2: slice(&result.wall2.points),
        })
    }

    pub fn len(&self) -> usize {
        self.ground.len() + self.wall1.len() + self.wall2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Horizontal gap between the two walls at this station, measured
    /// between their mean X positions. `None` if either wall is absent
    /// from the slab.
    pub fn wall_spacing(&self) -> Option<f64> {
        let mean_x = |c: &PointCloud| {
            (!c.is_empty()).then(|| c.x.iter().sum::<f64>() / c.len() as f64)
        };
        Some((mean_x(&self.wall1)? - mean_x(&self.wall2)?).abs())
    }

    /// Writes the slice as `X,Z,Type` CSV rows.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        write_profile_csv(
            path,
            &[
                ("Ground", &self.ground),
                ("Wall1", &self.wall1),
                ("Wall2", &self.wall2),
            ],
        )?;
        Ok(())
    }
}
