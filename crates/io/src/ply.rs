use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tunnelseg_core::PointCloud;

fn write_header(out: &mut impl Write, format: &str, count: usize) -> io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format {} 1.0", format)?;
    writeln!(out, "element vertex {}", count)?;
    writeln!(out, "property double x")?;
    writeln!(out, "property double y")?;
    writeln!(out, "property double z")?;
    writeln!(out, "end_header")
}

/// Writes `cloud` as an ASCII PLY file with `double` vertex coordinates.
pub fn write_ply(path: impl AsRef<Path>, cloud: &PointCloud) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_header(&mut out, "ascii", cloud.len())?;
    for [x, y, z] in cloud.iter_points() {
        writeln!(out, "{} {} {}", x, y, z)?;
    }
    out.flush()
}

/// Writes `cloud` as a little-endian binary PLY file.
pub fn write_ply_binary(path: impl AsRef<Path>, cloud: &PointCloud) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_header(&mut out, "binary_little_endian", cloud.len())?;
    for p in cloud.iter_points() {
        for v in p {
            out.write_all(&v.to_le_bytes())?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn ascii_ply_lists_every_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.ply");
        let cloud = PointCloud::from_xyz(vec![1.5, -2.0], vec![0.0, 3.25], vec![10.0, 0.5]);
        write_ply(&path, &cloud).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ply");
        assert!(lines.contains(&"element vertex 2"));
        let body: Vec<&str> = lines
            .iter()
            .skip_while(|l| **l != "end_header")
            .skip(1)
            .copied()
            .collect();
        assert_eq!(body, vec!["1.5 0 10", "-2 3.25 0.5"]);
    }

    #[test]
    fn binary_ply_has_24_bytes_per_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground.ply");
        let cloud = PointCloud::from_xyz(vec![1.0, 2.0, 3.0], vec![0.0; 3], vec![0.0; 3]);
        write_ply_binary(&path, &cloud).unwrap();

        let raw = fs::read(&path).unwrap();
        let marker = b"end_header\n";
        let pos = raw
            .windows(marker.len())
            .position(|w| w == marker)
            .unwrap();
        let body = &raw[pos + marker.len()..];
        assert_eq!(body.len(), 3 * 24);
        assert_eq!(f64::from_le_bytes(body[24..32].try_into().unwrap()), 2.0);
    }

    #[test]
    fn empty_cloud_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ply");
        write_ply(&path, &PointCloud::new()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("element vertex 0"));
        assert!(text.ends_with("end_header\n"));
    }
}
