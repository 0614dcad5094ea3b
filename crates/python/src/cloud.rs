use numpy::{PyArray2, PyArrayMethods, PyUntypedArrayMethods};
use pyo3::prelude::*;
use tunnelseg_core::PointCloud;

#[pyclass(name = "PointCloud")]
#[derive(Debug, Clone)]
pub struct PyPointCloud {
    pub(crate) inner: PointCloud,
}

#[pymethods]
impl PyPointCloud {
    #[new]
    pub fn new() -> Self {
        Self {
            inner: PointCloud::new(),
        }
    }

    /// Create a PointCloud from an Nx3 float64 NumPy array.
    ///
    /// The array must be C-contiguous (row-major). Fortran-order arrays are
    /// rejected to prevent silent data corruption.
    #[staticmethod]
    pub fn from_numpy(array: &Bound<'_, PyArray2<f64>>) -> PyResult<Self> {
        if !array.is_c_contiguous() {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "array must be C-contiguous (row-major). \
                 Use numpy.ascontiguousarray(arr) to convert.",
            ));
        }
        let readonly = array.readonly();
        let shape = readonly.shape();
        if shape.len() != 2 || shape[1] != 3 {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "expected shape (N, 3)",
            ));
        }
        let slice = readonly.as_slice().map_err(|_| {
            pyo3::exceptions::PyValueError::new_err("failed to read array as contiguous slice")
        })?;
        let cloud = PointCloud::from_array(slice, shape[0])
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner: cloud })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn to_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        to_numpy(py, &self.inner)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("PointCloud(n={})", self.inner.len())
    }
}

impl Default for PyPointCloud {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn to_numpy<'py>(py: Python<'py>, cloud: &PointCloud) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let rows: Vec<Vec<f64>> = cloud.iter_points().map(|p| p.to_vec()).collect();
    if rows.is_empty() {
        return Ok(PyArray2::zeros_bound(py, [0, 3], false));
    }
    Ok(PyArray2::from_vec2_bound(py, &rows)?)
}
