use crate::params::SegmentationParams;
use crate::ransac_plane::PlaneModel;
use tunnelseg_core::{Aabb, PointCloud};

/// Points extracted from the input, with the input index of each point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaneSegment {
    pub points: PointCloud,
    /// `source_indices[i]` is the index in the original input of `points.point(i)`.
    pub source_indices: Vec<usize>,
}

impl PlaneSegment {
    pub fn new(points: PointCloud, source_indices: Vec<usize>) -> Self {
        debug_assert_eq!(points.len(), source_indices.len());
        Self {
            points,
            source_indices,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.points.iter_points()
    }

    pub fn aabb(&self) -> Aabb {
        self.points.aabb()
    }

    /// Appends `other`, used to merge ground planes.
    pub fn append(&mut self, other: PlaneSegment) {
        self.points.extend_from(&other.points);
        self.source_indices.extend(other.source_indices);
    }
}

/// Angle bucket of a plane, before any extent check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleClass {
    Ground,
    Wall,
    /// Between the two thresholds, or exactly on one of them.
    Transitional,
}

/// Buckets an angle from horizontal. Both comparisons are strict, so a
/// plane sitting exactly on a threshold is transitional.
pub fn classify_angle(angle_deg: f64, params: &SegmentationParams) -> AngleClass {
    if angle_deg < params.ground_angle_deg {
        AngleClass::Ground
    } else if angle_deg > params.wall_angle_deg {
        AngleClass::Wall
    } else {
        AngleClass::Transitional
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscardReason {
    /// Tilted between the ground and wall thresholds (ramps, sloped spoil).
    Transitional { angle_deg: f64 },
    /// Steep enough for a wall but not tall enough (curbs, debris).
    TooShort { angle_deg: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedPlane {
    Ground { segment: PlaneSegment, extent: Aabb },
    Wall { segment: PlaneSegment, extent: Aabb },
    Discarded {
        segment: PlaneSegment,
        extent: Aabb,
        reason: DiscardReason,
    },
}

impl ClassifiedPlane {
    pub fn segment(&self) -> &PlaneSegment {
        match self {
            ClassifiedPlane::Ground { segment, .. }
            | ClassifiedPlane::Wall { segment, .. }
            | ClassifiedPlane::Discarded { segment, .. } => segment,
        }
    }

    pub fn extent(&self) -> &Aabb {
        match self {
            ClassifiedPlane::Ground { extent, .. }
            | ClassifiedPlane::Wall { extent, .. }
            | ClassifiedPlane::Discarded { extent, .. } => extent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassifiedPlane::Ground { .. } => "ground",
            ClassifiedPlane::Wall { .. } => "wall",
            ClassifiedPlane::Discarded { .. } => "discarded",
        }
    }
}

/// Classifies an extracted plane by the tilt of its model and, for wall
/// candidates, by the vertical extent of its points.
pub fn classify_plane(
    model: &PlaneModel,
    segment: PlaneSegment,
    params: &SegmentationParams,
) -> ClassifiedPlane {
    let angle_deg = model.angle_from_vertical_deg();
    let extent = segment.aabb();

    match classify_angle(angle_deg, params) {
        AngleClass::Ground => ClassifiedPlane::Ground { segment, extent },
        AngleClass::Wall => {
            let height = extent.height();
            if height > params.min_wall_height {
                ClassifiedPlane::Wall { segment, extent }
            } else {
                ClassifiedPlane::Discarded {
                    segment,
                    extent,
                    reason: DiscardReason::TooShort { angle_deg, height },
                }
            }
        }
        AngleClass::Transitional => ClassifiedPlane::Discarded {
            segment,
            extent,
            reason: DiscardReason::Transitional { angle_deg },
        },
    }
}
