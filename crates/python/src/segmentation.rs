use crate::cloud::{to_numpy, PyPointCloud};
use numpy::PyArray2;
use pyo3::prelude::*;
use tunnelseg_segmentation::{AnalysisResult, SegmentationParams};

#[pyclass(name = "PlaneResult")]
#[derive(Debug, Clone)]
pub struct PyPlaneResult {
    #[pyo3(get)]
    pub coefficients: [f64; 4],
    #[pyo3(get)]
    pub angle_deg: f64,
    #[pyo3(get)]
    pub inliers: Vec<usize>,
}

#[pymethods]
impl PyPlaneResult {
    pub fn __repr__(&self) -> String {
        format!(
            "PlaneResult(coefficients={:?}, angle={:.2}, inliers={})",
            self.coefficients,
            self.angle_deg,
            self.inliers.len()
        )
    }
}

#[pyfunction(name = "ransac_plane")]
#[pyo3(signature = (cloud, distance_threshold, trials=1000, seed=None))]
pub fn ransac_plane_py(
    cloud: &PyPointCloud,
    distance_threshold: f64,
    trials: usize,
    seed: Option<u64>,
) -> PyPlaneResult {
    let (model, inliers) = match seed {
        Some(seed) => tunnelseg_segmentation::ransac_plane_seeded(
            &cloud.inner,
            distance_threshold,
            trials,
            seed,
        ),
        None => tunnelseg_segmentation::ransac_plane(&cloud.inner, distance_threshold, trials),
    };
    PyPlaneResult {
        coefficients: model.coefficients(),
        angle_deg: model.angle_from_vertical_deg(),
        inliers,
    }
}

#[pyclass(name = "AnalysisResult")]
#[derive(Debug, Clone)]
pub struct PyAnalysisResult {
    inner: AnalysisResult,
}

#[pymethods]
impl PyAnalysisResult {
    pub fn ground<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        to_numpy(py, &self.inner.ground.points)
    }

    pub fn wall1<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        to_numpy(py, &self.inner.wall1.points)
    }

    pub fn wall2<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        to_numpy(py, &self.inner.wall2.points)
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.stats.iterations
    }

    #[getter]
    pub fn walls_found(&self) -> usize {
        self.inner.stats.walls_found
    }

    #[getter]
    pub fn seed(&self) -> u64 {
        self.inner.stats.seed
    }

    pub fn __repr__(&self) -> String {
        format!(
            "AnalysisResult(ground={}, wall1={}, wall2={})",
            self.inner.ground.len(),
            self.inner.wall1.len(),
            self.inner.wall2.len()
        )
    }
}

#[pyfunction(name = "segment_planes")]
#[pyo3(signature = (cloud, min_wall_height, ransac_distance, ground_angle_deg, wall_angle_deg, seed=None))]
pub fn segment_planes_py(
    py: Python<'_>,
    cloud: &PyPointCloud,
    min_wall_height: f64,
    ransac_distance: f64,
    ground_angle_deg: f64,
    wall_angle_deg: f64,
    seed: Option<u64>,
) -> PyResult<PyAnalysisResult> {
    let params = SegmentationParams {
        ransac_distance,
        ground_angle_deg,
        wall_angle_deg,
        min_wall_height,
    };
    let points = cloud.inner.clone();
    let result = py
        .allow_threads(move || tunnelseg_segmentation::segment_planes(&points, params, seed))
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
    Ok(PyAnalysisResult { inner: result })
}
