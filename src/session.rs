use crate::config::AnalysisConfig;
use crate::cross_section::CrossSection;
use crate::error::{Result, SessionError};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tunnelseg_core::PointCloud;
use tunnelseg_io::{read_las, read_las_header, write_ply, LasHeaderInfo};
use tunnelseg_segmentation::{AnalysisResult, SegmentationObserver};

/// Where the session's points came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CloudSource {
    Las(LasHeaderInfo),
    Memory { label: String },
}

impl CloudSource {
    pub fn name(&self) -> String {
        match self {
            CloudSource::Las(info) => info.file_name(),
            CloudSource::Memory { label } => label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedCloud {
    source: CloudSource,
    points: PointCloud,
}

/// One user's load → analyze → inspect workflow.
///
/// The session owns the loaded point set, the latest [`AnalysisResult`] and
/// the latest cross-section. Loading new points drops everything derived
/// from the old ones. A failed analysis leaves the previous result in place.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    cloud: Option<LoadedCloud>,
    result: Option<AnalysisResult>,
    last_slice: Option<CrossSection>,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replaces the configuration used by the next [`analyze`](Self::analyze).
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    /// Loads a `.las`/`.laz` file. Returns its header summary.
    pub fn load_las(&mut self, path: impl AsRef<Path>) -> Result<&LasHeaderInfo> {
        let path = path.as_ref();
        let invalid = |source: std::io::Error| SessionError::InvalidFile {
            path: path.to_path_buf(),
            source,
        };

        let header = read_las_header(path).map_err(invalid)?;
        let points = read_las(path).map_err(invalid)?;
        if points.len() as u64 != header.point_count {
            warn!(
                "{}: header announces {} points, read {}",
                header.file_name(),
                header.point_count,
                points.len()
            );
        }
        info!(
            "loaded {} ({} points, {:.2} MB)",
            header.file_name(),
            points.len(),
            header.size_mb()
        );

        self.attach(CloudSource::Las(header), points);
        match self.cloud.as_ref().map(|c| &c.source) {
            Some(CloudSource::Las(header)) => Ok(header),
            _ => Err(SessionError::NoPointCloud),
        }
    }

    /// Attaches an in-memory point set, e.g. one produced by another reader.
    pub fn load_cloud(&mut self, points: PointCloud, label: impl Into<String>) {
        self.attach(
            CloudSource::Memory {
                label: label.into(),
            },
            points,
        );
    }

    fn attach(&mut self, source: CloudSource, points: PointCloud) {
        self.cloud = Some(LoadedCloud { source, points });
        self.result = None;
        self.last_slice = None;
    }

    pub fn source(&self) -> Option<&CloudSource> {
        self.cloud.as_ref().map(|c| &c.source)
    }

    pub fn points(&self) -> Option<&PointCloud> {
        self.cloud.as_ref().map(|c| &c.points)
    }

    pub fn analyze(&mut self) -> Result<&AnalysisResult> {
        self.analyze_with(&mut ())
    }

    /// Segments the loaded points with the session configuration.
    pub fn analyze_with<O>(&mut self, observer: &mut O) -> Result<&AnalysisResult>
    where
        O: SegmentationObserver + ?Sized,
    {
        let cloud = self.cloud.as_ref().ok_or(SessionError::NoPointCloud)?;
        let segmenter = self.config.segmenter()?;
        let result = segmenter.segment_with(&cloud.points, observer)?;

        self.last_slice = None;
        let result: &AnalysisResult = self.result.insert(result);
        Ok(result)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Status line describing the latest result.
    pub fn summary(&self) -> Result<String> {
        let result = self.result.as_ref().ok_or(SessionError::NoAnalysis)?;
        Ok(format!(
            "Analysis successful. Found {} ground points and {} wall points.",
            result.ground.len(),
            result.wall_point_count()
        ))
    }

    /// Extracts the partitions' points within `tolerance` of `y_position`
    /// and keeps the slice for export.
    pub fn cross_section(&mut self, y_position: f64, tolerance: f64) -> Result<&CrossSection> {
        let result = self.result.as_ref().ok_or(SessionError::NoAnalysis)?;
        let slice = CrossSection::extract(result, y_position, tolerance)?;
        info!(
            "cross-section at y = {}: {} ground, {} wall1, {} wall2 points",
            y_position,
            slice.ground.len(),
            slice.wall1.len(),
            slice.wall2.len()
        );
        let slice: &CrossSection = self.last_slice.insert(slice);
        Ok(slice)
    }

    pub fn last_cross_section(&self) -> Option<&CrossSection> {
        self.last_slice.as_ref()
    }

    pub fn export_cross_section_csv(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let slice = self
            .last_slice
            .as_ref()
            .ok_or(SessionError::NoCrossSection)?;
        let path = path.as_ref();
        slice.write_csv(path)?;
        info!("cross-section exported to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Writes `ground.ply`, `wall1.ply` and `wall2.ply` into `dir`, creating
    /// it if needed.
    pub fn export_partitions_ply(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let result = self.result.as_ref().ok_or(SessionError::NoAnalysis)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(3);
        for (name, segment) in result.partitions() {
            let path = dir.join(format!("{}.ply", name));
            write_ply(&path, &segment.points)?;
            written.push(path);
        }
        info!("partitions exported to {}", dir.display());
        Ok(written)
    }
}
