#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod cloud;
mod io;
mod segmentation;

#[pymodule]
fn tunnelseg_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core
    m.add_class::<cloud::PyPointCloud>()?;

    // Segmentation
    m.add_class::<segmentation::PyPlaneResult>()?;
    m.add_class::<segmentation::PyAnalysisResult>()?;
    m.add_function(wrap_pyfunction!(segmentation::ransac_plane_py, m)?)?;
    m.add_function(wrap_pyfunction!(segmentation::segment_planes_py, m)?)?;

    // IO
    m.add_function(wrap_pyfunction!(io::read_las_py, m)?)?;
    m.add_function(wrap_pyfunction!(io::write_ply_py, m)?)?;

    Ok(())
}
