use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use rayon::prelude::*;
use tunnelseg_core::PointCloud;

/// Vertical axis of the scan frame. Z is up.
pub const VERTICAL: [f64; 3] = [0.0, 0.0, 1.0];

/// A 3D plane `a*x + b*y + c*z + d = 0`, where `(a, b, c)` is a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneModel {
    pub normal: [f64; 3],
    pub d: f64,
}

impl PlaneModel {
    /// Computes the absolute distance from a point to this plane.
    /// Assumes `normal` is a unit vector.
    #[inline]
    pub fn distance_to_point(&self, point: &[f64; 3]) -> f64 {
        (self.normal[0] * point[0] + self.normal[1] * point[1] + self.normal[2] * point[2] + self.d)
            .abs()
    }

    /// The coefficients `[a, b, c, d]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.normal[0], self.normal[1], self.normal[2], self.d]
    }

    /// Same plane with the normal pointing the other way.
    pub fn flipped(&self) -> Self {
        Self {
            normal: [-self.normal[0], -self.normal[1], -self.normal[2]],
            d: -self.d,
        }
    }

    /// Angle in degrees between the plane normal and the vertical axis.
    ///
    /// 0° is a horizontal plane, 90° a vertical one. The absolute value of
    /// the dot product is taken so both normal orientations agree, and it is
    /// clamped before `acos` because rounding can push it past 1.
    pub fn angle_from_vertical_deg(&self) -> f64 {
        let dot = self.normal[0] * VERTICAL[0]
            + self.normal[1] * VERTICAL[1]
            + self.normal[2] * VERTICAL[2];
        dot.abs().clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl Default for PlaneModel {
    fn default() -> Self {
        Self {
            normal: VERTICAL,
            d: 0.0,
        }
    }
}

/// Fits a plane to the point cloud using the RANSAC algorithm.
///
/// Uses a random (non-deterministic) seed. For reproducible results, use
/// [`ransac_plane_seeded`] instead.
pub fn ransac_plane(
    cloud: &PointCloud,
    distance_threshold: f64,
    trials: usize,
) -> (PlaneModel, Vec<usize>) {
    let seed = rand::thread_rng().next_u64();
    ransac_plane_seeded(cloud, distance_threshold, trials, seed)
}

/// Fits a plane to the point cloud using the RANSAC algorithm with a
/// deterministic seed for the random number generator.
///
/// # Algorithm
///
/// 1. Pre-generate all minimal samples upfront from the seed.
/// 2. Score every sample by its inlier count, across threads when the cloud
///    is large enough to pay for it.
/// 3. Reduce in generation order: the first sample reaching the highest
///    count wins, so the parallel and sequential paths agree.
/// 4. Return the best plane model and its inlier indices (ascending).
///
/// The whole trial budget is always spent.
pub fn ransac_plane_seeded(
    cloud: &PointCloud,
    distance_threshold: f64,
    trials: usize,
    seed: u64,
) -> (PlaneModel, Vec<usize>) {
    let n = cloud.len();

    if n < 3 {
        return (PlaneModel::default(), Vec::new());
    }

    // Contiguous copy for cache-friendly scoring
    let points: Vec<[f64; 3]> = cloud.iter_points().collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let samples: Vec<[usize; 3]> = (0..trials)
        .map(|_| {
            let idx = index::sample(&mut rng, n, 3);
            [idx.index(0), idx.index(1), idx.index(2)]
        })
        .collect();

    let use_parallel = n >= 10_000 && samples.len() >= 16;

    let best = if use_parallel {
        samples
            .par_iter()
            .filter_map(|sample| score_sample(&points, sample, distance_threshold))
            // rayon keeps `a` ahead of `b` in sequence order, so `>=` keeps the earliest
            .reduce_with(|a, b| if a.1 >= b.1 { a } else { b })
    } else {
        samples
            .iter()
            .filter_map(|sample| score_sample(&points, sample, distance_threshold))
            .fold(None, |best: Option<(PlaneModel, usize)>, cur| match best {
                Some(b) if b.1 >= cur.1 => Some(b),
                _ => Some(cur),
            })
    };

    let Some((best_model, _)) = best else {
        return (PlaneModel::default(), Vec::new());
    };

    let inliers: Vec<usize> = (0..n)
        .filter(|&j| best_model.distance_to_point(&points[j]) <= distance_threshold)
        .collect();

    (best_model, inliers)
}

/// Fits the plane through one minimal sample and counts its inliers.
/// `None` for collinear samples.
fn score_sample(
    points: &[[f64; 3]],
    &[i0, i1, i2]: &[usize; 3],
    threshold: f64,
) -> Option<(PlaneModel, usize)> {
    let model = fit_plane_from_three_points(&points[i0], &points[i1], &points[i2])?;
    let count = points
        .iter()
        .filter(|p| model.distance_to_point(p) <= threshold)
        .count();
    Some((model, count))
}

/// Fits a plane through 3 points, returning `None` if they are collinear.
fn fit_plane_from_three_points(p0: &[f64; 3], p1: &[f64; 3], p2: &[f64; 3]) -> Option<PlaneModel> {
    let v1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
    let v2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];

    // v1 x v2
    let nx = v1[1] * v2[2] - v1[2] * v2[1];
    let ny = v1[2] * v2[0] - v1[0] * v2[2];
    let nz = v1[0] * v2[1] - v1[1] * v2[0];

    let len = (nx * nx + ny * ny + nz * nz).sqrt();

    if !len.is_finite() || len < 1e-12 {
        return None;
    }

    let normal = [nx / len, ny / len, nz / len];
    let d = -(normal[0] * p0[0] + normal[1] * p0[1] + normal[2] * p0[2]);

    Some(PlaneModel { normal, d })
}
