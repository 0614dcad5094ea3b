use crate::classify::{classify_plane, ClassifiedPlane, PlaneSegment};
use crate::error::{InputError, Result, SegmentError};
use crate::observer::SegmentationObserver;
use crate::params::{SegmentationLimits, SegmentationParams};
use crate::ransac_plane::{ransac_plane_seeded, PlaneModel};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use tunnelseg_core::{complement_indices, PointCloud};

/// Why the peel-off loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Remaining points dropped to the stop threshold.
    Exhausted,
    /// Iteration cap reached.
    IterationLimit,
    /// Best plane had fewer inliers than the floor.
    NoSignificantPlane,
    /// A fit failed to remove any point from the working set.
    Stalled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::Exhausted => "remaining points below threshold",
            StopReason::IterationLimit => "iteration limit reached",
            StopReason::NoSignificantPlane => "no significant plane left",
            StopReason::Stalled => "plane extraction stalled",
        };
        f.write_str(s)
    }
}

/// A fitted plane split against the current working set.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneCandidate {
    pub model: PlaneModel,
    /// Indices into the working set, ascending.
    pub inliers: Vec<usize>,
    /// Complement of `inliers`, ascending.
    pub outliers: Vec<usize>,
}

impl PlaneCandidate {
    pub fn new(model: PlaneModel, inliers: Vec<usize>, working_len: usize) -> Self {
        let outliers = complement_indices(working_len, &inliers);
        Self {
            model,
            inliers,
            outliers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationStats {
    pub iterations: usize,
    /// Walls that passed the angle and height checks, including any beyond
    /// the two reported.
    pub walls_found: usize,
    pub ground_planes: usize,
    pub discarded_planes: usize,
    pub stop_reason: StopReason,
    /// Seed the run drew its RANSAC samples from.
    pub seed: u64,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Every ground-classified plane, merged.
    pub ground: PlaneSegment,
    /// Largest wall by point count.
    pub wall1: PlaneSegment,
    /// Second largest wall. Never larger than `wall1`.
    pub wall2: PlaneSegment,
    pub stats: SegmentationStats,
}

impl AnalysisResult {
    pub fn wall_point_count(&self) -> usize {
        self.wall1.len() + self.wall2.len()
    }

    /// Ground, wall 1 and wall 2 with their conventional labels.
    pub fn partitions(&self) -> [(&'static str, &PlaneSegment); 3] {
        [
            ("ground", &self.ground),
            ("wall1", &self.wall1),
            ("wall2", &self.wall2),
        ]
    }
}

/// Iterative RANSAC ground/wall segmenter.
///
/// Repeatedly extracts the dominant plane from the remaining points,
/// classifies it by tilt and height, and removes its inliers before the
/// next fit. See [`PlaneSegmenter::segment_with`] for the loop.
#[derive(Debug, Clone)]
pub struct PlaneSegmenter {
    params: SegmentationParams,
    limits: SegmentationLimits,
    seed: Option<u64>,
}

impl PlaneSegmenter {
    pub fn new(params: SegmentationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            limits: SegmentationLimits::default(),
            seed: None,
        })
    }

    pub fn with_limits(mut self, limits: SegmentationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Pins the random source. Without a seed each run draws one from the
    /// thread RNG and records it in [`SegmentationStats::seed`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    pub fn limits(&self) -> &SegmentationLimits {
        &self.limits
    }

    pub fn segment(&self, cloud: &PointCloud) -> Result<AnalysisResult> {
        self.segment_with(cloud, &mut ())
    }

    /// Segments an interleaved `[x0, y0, z0, x1, ...]` buffer of
    /// `num_points` points, as handed over by a point reader.
    pub fn segment_interleaved(&self, data: &[f64], num_points: usize) -> Result<AnalysisResult> {
        let cloud = PointCloud::from_array(data, num_points)?;
        self.segment(&cloud)
    }

    /// Runs the peel-off loop, reporting to `observer`.
    ///
    /// The loop continues while more than `stop_threshold` points remain and
    /// fewer than `max_iterations` planes have been extracted. It stops early
    /// when the best plane has fewer than `min_plane_inliers` inliers or when
    /// a fit removes nothing. At least two walls must survive classification.
    pub fn segment_with<O>(&self, cloud: &PointCloud, observer: &mut O) -> Result<AnalysisResult>
    where
        O: SegmentationObserver + ?Sized,
    {
        validate_input(cloud)?;

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let limits = &self.limits;

        let mut remaining = cloud.clone();
        let mut origin: Vec<usize> = (0..cloud.len()).collect();
        let mut ground = PlaneSegment::default();
        let mut ground_planes = 0usize;
        let mut walls: Vec<PlaneSegment> = Vec::new();
        let mut discarded_planes = 0usize;
        let mut iteration = 0usize;

        info!(
            "segmenting {} points (seed {}, distance {}, ground < {}°, wall > {}°, height > {})",
            cloud.len(),
            seed,
            self.params.ransac_distance,
            self.params.ground_angle_deg,
            self.params.wall_angle_deg,
            self.params.min_wall_height
        );

        let stop_reason = loop {
            if remaining.len() <= limits.stop_threshold {
                break StopReason::Exhausted;
            }
            if iteration >= limits.max_iterations {
                break StopReason::IterationLimit;
            }
            if observer.is_cancelled() {
                info!("segmentation cancelled after {} iterations", iteration);
                return Err(SegmentError::Cancelled {
                    iterations: iteration,
                });
            }

            iteration += 1;
            observer.on_progress(progress_percent(iteration, limits.max_iterations));
            observer.on_status(&format!("Finding plane {}...", iteration));

            let (model, inliers) = ransac_plane_seeded(
                &remaining,
                self.params.ransac_distance,
                limits.ransac_trials,
                rng.next_u64(),
            );

            if inliers.len() < limits.min_plane_inliers {
                debug!(
                    "iteration {}: best plane has {} inliers, below floor {}",
                    iteration,
                    inliers.len(),
                    limits.min_plane_inliers
                );
                observer.on_status("No more significant planes found.");
                break StopReason::NoSignificantPlane;
            }

            let candidate = PlaneCandidate::new(model, inliers, remaining.len());
            if candidate.outliers.len() >= remaining.len() {
                observer.on_status("Analysis stalled.");
                break StopReason::Stalled;
            }

            let plane = PlaneSegment::new(
                remaining.select(&candidate.inliers),
                candidate.inliers.iter().map(|&i| origin[i]).collect(),
            );
            origin = candidate.outliers.iter().map(|&i| origin[i]).collect();
            remaining = remaining.select(&candidate.outliers);

            let classified = classify_plane(&candidate.model, plane, &self.params);
            debug!(
                "iteration {}: {} plane, {} points, angle {:.2}°, height {:.2}, {} remaining",
                iteration,
                classified.label(),
                classified.segment().len(),
                candidate.model.angle_from_vertical_deg(),
                classified.extent().height(),
                remaining.len()
            );

            match classified {
                ClassifiedPlane::Ground { segment, .. } => {
                    ground_planes += 1;
                    ground.append(segment);
                }
                ClassifiedPlane::Wall { segment, .. } => walls.push(segment),
                ClassifiedPlane::Discarded { .. } => discarded_planes += 1,
            }
        };

        debug!(
            "peel-off stopped after {} iterations: {}",
            iteration, stop_reason
        );

        let walls_found = walls.len();
        // Stable sort: equal-sized walls keep extraction order
        walls.sort_by_key(|w| std::cmp::Reverse(w.len()));
        let mut walls = walls.into_iter();
        let (Some(wall1), Some(wall2)) = (walls.next(), walls.next()) else {
            return Err(if stop_reason == StopReason::Stalled {
                SegmentError::DegenerateFit {
                    found: walls_found,
                    iterations: iteration,
                }
            } else {
                SegmentError::NotEnoughWalls {
                    found: walls_found,
                    iterations: iteration,
                    stop_reason,
                }
            });
        };

        let stats = SegmentationStats {
            iterations: iteration,
            walls_found,
            ground_planes,
            discarded_planes,
            stop_reason,
            seed,
        };

        info!(
            "segmentation complete: {} ground points, walls of {} and {} points ({} walls found)",
            ground.len(),
            wall1.len(),
            wall2.len(),
            walls_found
        );
        observer.on_status("Analysis complete.");
        observer.on_progress(100.0);

        Ok(AnalysisResult {
            ground,
            wall1,
            wall2,
            stats,
        })
    }
}

/// Runs a [`PlaneSegmenter`] with default limits.
pub fn segment_planes(
    cloud: &PointCloud,
    params: SegmentationParams,
    seed: Option<u64>,
) -> Result<AnalysisResult> {
    let mut segmenter = PlaneSegmenter::new(params)?;
    if let Some(seed) = seed {
        segmenter = segmenter.with_seed(seed);
    }
    segmenter.segment(cloud)
}

fn validate_input(cloud: &PointCloud) -> Result<()> {
    if cloud.is_empty() {
        return Err(InputError::Empty.into());
    }
    if let Some(index) = cloud.first_non_finite() {
        return Err(InputError::NonFinite { index }.into());
    }
    Ok(())
}

fn progress_percent(iteration: usize, max_iterations: usize) -> f64 {
    if max_iterations == 0 {
        return 100.0;
    }
    (iteration as f64 / max_iterations as f64 * 100.0).min(100.0)
}
