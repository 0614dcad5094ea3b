use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tunnelseg_core::PointCloud;

/// Writes a 2D tunnel profile as CSV: one `X,Z,Type` row per point, with
/// each cloud's rows tagged by its label.
pub fn write_profile_csv(path: impl AsRef<Path>, layers: &[(&str, &PointCloud)]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "X,Z,Type")?;
    for (label, cloud) in layers {
        for [x, _, z] in cloud.iter_points() {
            writeln!(out, "{},{},{}", x, z, label)?;
        }
    }
    out.flush()
}
