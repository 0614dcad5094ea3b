use crate::{Aabb, CloudError};

/// A point set stored as three parallel coordinate vectors.
///
/// Coordinates are `f64`: LAS scans are georeferenced and routinely carry
/// six or seven significant digits before the decimal point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    /// Builds a cloud from parallel coordinate vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length. Use [`try_from_xyz`] for
    /// untrusted input.
    ///
    /// [`try_from_xyz`]: PointCloud::try_from_xyz
    pub fn from_xyz(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");
        Self { x, y, z }
    }

    pub fn try_from_xyz(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, CloudError> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(CloudError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }
        Ok(Self { x, y, z })
    }

    /// Deinterleaves an `[x0, y0, z0, x1, ...]` buffer holding `num_points`
    /// points.
    pub fn from_array(data: &[f64], num_points: usize) -> Result<Self, CloudError> {
        let expected = num_points.checked_mul(3).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(CloudError::InterleavedLength {
                len: data.len(),
                expected,
                num_points,
            });
        }

        let mut cloud = Self::with_capacity(num_points);
        for chunk in data.chunks_exact(3) {
            cloud.push([chunk[0], chunk[1], chunk[2]]);
        }
        Ok(cloud)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn push(&mut self, point: [f64; 3]) {
        self.x.push(point[0]);
        self.y.push(point[1]);
        self.z.push(point[2]);
    }

    /// Appends every point of `other`, keeping its order.
    pub fn extend_from(&mut self, other: &PointCloud) {
        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
        self.z.extend_from_slice(&other.z);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> [f64; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Index of the first point with a NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter_points()
            .position(|p| !p.iter().all(|v| v.is_finite()))
    }

    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(indices.len());
        for &idx in indices {
            assert!(idx < self.len(), "index out of bounds in select");
            out.push(self.point(idx));
        }
        out
    }

    /// Select all points NOT in the given index set.
    ///
    /// This is the complement of [`select`]: together the two calls
    /// partition the cloud. The returned cloud preserves the relative order
    /// of the retained points.
    ///
    /// # Panics
    ///
    /// Panics if any index in `indices` is out of bounds.
    ///
    /// [`select`]: PointCloud::select
    pub fn select_inverse(&self, indices: &[usize]) -> Self {
        let kept = complement_indices(self.len(), indices);
        self.select(&kept)
    }

    pub fn to_array(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for p in self.iter_points() {
            out.extend_from_slice(&p);
        }
        out
    }
}

/// Indices in `0..n` that do not appear in `indices`, ascending.
///
/// # Panics
///
/// Panics if any index is `>= n`.
pub fn complement_indices(n: usize, indices: &[usize]) -> Vec<usize> {
    let mut exclude = vec![false; n];
    for &idx in indices {
        assert!(idx < n, "index out of bounds in select_inverse");
        exclude[idx] = true;
    }
    (0..n).filter(|&i| !exclude[i]).collect()
}

impl FromIterator<[f64; 3]> for PointCloud {
    fn from_iter<I: IntoIterator<Item = [f64; 3]>>(iter: I) -> Self {
        let mut cloud = Self::new();
        for p in iter {
            cloud.push(p);
        }
        cloud
    }
}
