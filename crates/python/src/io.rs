use crate::cloud::PyPointCloud;
use pyo3::prelude::*;

#[pyfunction(name = "read_las")]
pub fn read_las_py(path: &str) -> PyResult<PyPointCloud> {
    let cloud = tunnelseg_io::read_las(path)
        .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))?;
    Ok(PyPointCloud { inner: cloud })
}

#[pyfunction(name = "write_ply")]
pub fn write_ply_py(path: &str, cloud: &PyPointCloud) -> PyResult<()> {
    tunnelseg_io::write_ply(path, &cloud.inner)
        .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))
}
