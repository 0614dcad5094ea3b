use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tunnelseg_core::{Aabb, PointCloud};
use las::Read;

/// Anything shorter cannot hold a LAS public header block.
const MIN_LAS_FILE_SIZE: u64 = 100;

/// Summary of a LAS file taken from its header, without reading points.
#[derive(Debug, Clone, PartialEq)]
pub struct LasHeaderInfo {
    pub path: PathBuf,
    pub point_count: u64,
    pub bounds: Aabb,
    pub file_size: u64,
}

impl LasHeaderInfo {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / (1024.0 * 1024.0)
    }
}

/// Checks that `path` names a non-trivial `.las`/`.laz` file before handing
/// it to the LAS reader.
pub fn validate_las_path(path: impl AsRef<Path>) -> io::Result<u64> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("LAS file not found: {}: {}", path.display(), e),
        )
    })?;

    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path is not a file: {}", path.display()),
        ));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if ext != "las" && ext != "laz" {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid file extension '{}', expected .las or .laz", ext),
        ));
    }

    if meta.len() == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "file is empty"));
    }
    if meta.len() < MIN_LAS_FILE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "file is too small to be a valid LAS file",
        ));
    }

    Ok(meta.len())
}

fn open_error(e: las::Error) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("failed to open LAS file: {}", e),
    )
}

/// Reads the header of a LAS file: point count and coordinate bounds.
pub fn read_las_header(path: impl AsRef<Path>) -> io::Result<LasHeaderInfo> {
    let path = path.as_ref();
    let file_size = validate_las_path(path)?;
    let reader = las::Reader::from_path(path).map_err(open_error)?;
    let header = reader.header();
    let b = header.bounds();

    let mut bounds = Aabb::empty();
    if header.number_of_points() > 0 {
        bounds.expand_with_point([b.min.x, b.min.y, b.min.z]);
        bounds.expand_with_point([b.max.x, b.max.y, b.max.z]);
    }

    Ok(LasHeaderInfo {
        path: path.to_path_buf(),
        point_count: header.number_of_points(),
        bounds,
        file_size,
    })
}

/// Reads all point coordinates of a LAS file at full `f64` precision.
pub fn read_las(path: impl AsRef<Path>) -> io::Result<PointCloud> {
    let path = path.as_ref();
    let mut reader = las::Reader::from_path(path).map_err(open_error)?;

    let expected = reader.header().number_of_points() as usize;
    let mut cloud = PointCloud::with_capacity(expected);

    for point_result in reader.points() {
        let point = point_result.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to read LAS point: {}", e),
            )
        })?;
        cloud.push([point.x, point.y, point.z]);
    }

    log::info!("read {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}
