use tunnelseg_core::PointCloud;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Indices of the points whose coordinate on `axis` lies in `[min, max]`.
/// Non-finite coordinates never pass.
pub fn passthrough_indices(cloud: &PointCloud, axis: Axis, min: f64, max: f64) -> Vec<usize> {
    let values = match axis {
        Axis::X => &cloud.x,
        Axis::Y => &cloud.y,
        Axis::Z => &cloud.z,
    };

    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && **v >= min && **v <= max)
        .map(|(i, _)| i)
        .collect()
}

pub fn passthrough_filter(cloud: &PointCloud, axis: Axis, min: f64, max: f64) -> PointCloud {
    if cloud.is_empty() {
        return PointCloud::new();
    }
    cloud.select(&passthrough_indices(cloud, axis, min, max))
}

/// Points within `tolerance` of `position` along `axis`, i.e. a slab of
/// width `2 * tolerance` centred on `position`.
pub fn slab_filter(cloud: &PointCloud, axis: Axis, position: f64, tolerance: f64) -> PointCloud {
    passthrough_filter(cloud, axis, position - tolerance, position + tolerance)
}
