use thiserror::Error;

/// Errors raised while assembling a [`PointCloud`](crate::PointCloud) from
/// raw coordinate buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudError {
    #[error("coordinate arrays differ in length (x={x}, y={y}, z={z})")]
    LengthMismatch { x: usize, y: usize, z: usize },

    #[error("interleaved xyz input has {len} values, expected {expected} for {num_points} points")]
    InterleavedLength {
        len: usize,
        expected: usize,
        num_points: usize,
    },
}
