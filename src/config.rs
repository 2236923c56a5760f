/// Pipeline configuration document loaded from a JSON file.
///
/// The configuration is constructed once in `main` and passed by reference
/// into every component that needs it; nothing reads config state globally.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

fn default_image_size() -> [usize; 2] {
    [100, 100]
}

fn default_create_output_dirs() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input point cloud file (.las or .laz).
    pub cloud_path: PathBuf,
    /// Outlier removal algorithm and its parameters.
    pub noise_removal: NoiseRemoval,
    /// Direction the 3D points are projected along.
    pub projection_vector: [f64; 3],
    /// Output raster size as [height, width].
    #[serde(default = "default_image_size")]
    pub image_size: [usize; 2],
    /// Depth map output location.
    pub depth_map_path: PathBuf,
    /// Heat map output location.
    pub heat_map_path: PathBuf,
    /// Create missing output directories instead of failing the save.
    #[serde(default = "default_create_output_dirs")]
    pub create_output_dirs: bool,
}

/// Noise removal section of the configuration.
///
/// The algorithm stays a free string in the document so unsupported names
/// surface as `UnknownAlgorithm` at the denoise boundary, not as a parse
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseRemoval {
    pub algorithm: String,
    #[serde(default)]
    pub params: NoiseParams,
}

/// Union of the parameters the supported algorithms accept.
/// `statistical` reads `nb_neighbors`/`std_ratio`, `radius` reads
/// `nb_points`/`radius`; the missing-key check happens at validation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoiseParams {
    pub nb_neighbors: Option<usize>,
    pub std_ratio: Option<f64>,
    pub nb_points: Option<usize>,
    pub radius: Option<f64>,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|err| PipelineError::Config {
            key: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Parse a configuration document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        let config: Config = serde_json::from_str(text).map_err(|err| PipelineError::Config {
            key: "document".to_string(),
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        let [height, width] = self.image_size;
        if height == 0 || width == 0 {
            return Err(PipelineError::Config {
                key: "image_size".to_string(),
                reason: format!("dimensions must be non-zero, got {height}x{width}"),
            });
        }
        Ok(())
    }
}
