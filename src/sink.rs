/// Image sink: encodes finished rasters as PNG files.
use image::{GrayImage, RgbImage};
use std::fs;
use std::path::Path;

use crate::error::PipelineError;
use crate::raster::{DepthMap, HeatMap};

fn sink_error(map: &'static str, reason: impl Into<String>) -> PipelineError {
    PipelineError::Sink {
        map,
        reason: reason.into(),
    }
}

/// Reject empty paths and make sure the parent directory exists,
/// creating it only when the configuration allows.
fn prepare_path(map: &'static str, path: &Path, create_dirs: bool) -> Result<(), PipelineError> {
    if path.as_os_str().is_empty() {
        return Err(sink_error(map, "output path is empty"));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if !create_dirs {
                return Err(sink_error(
                    map,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
            fs::create_dir_all(parent)
                .map_err(|err| sink_error(map, format!("creating {}: {err}", parent.display())))?;
        }
    }

    Ok(())
}

/// Save a depth map as an 8-bit grayscale PNG.
///
/// Cell values are min-max normalized over the raster before quantizing,
/// so the full gray range is always used. An all-equal raster encodes as
/// black.
pub fn save_depth_map(
    map: &DepthMap,
    path: &Path,
    create_dirs: bool,
) -> Result<(), PipelineError> {
    prepare_path("depth", path, create_dirs)?;

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &cell in &map.cells {
        lo = lo.min(cell);
        hi = hi.max(cell);
    }

    let bytes: Vec<u8> = map
        .cells
        .iter()
        .map(|&cell| {
            if hi > lo {
                ((cell - lo) / (hi - lo) * 255.0).round() as u8
            } else {
                0
            }
        })
        .collect();

    let image = GrayImage::from_raw(map.width as u32, map.height as u32, bytes)
        .ok_or_else(|| sink_error("depth", "raster size mismatch"))?;
    image
        .save(path)
        .map_err(|err| sink_error("depth", err.to_string()))?;

    log::info!("depth map saved at {}", path.display());
    Ok(())
}

/// Save a heat map as an 8-bit RGB PNG, bytes written verbatim.
pub fn save_heat_map(map: &HeatMap, path: &Path, create_dirs: bool) -> Result<(), PipelineError> {
    prepare_path("heat", path, create_dirs)?;

    let image = RgbImage::from_raw(map.width as u32, map.height as u32, map.cells.clone())
        .ok_or_else(|| sink_error("heat", "raster size mismatch"))?;
    image
        .save(path)
        .map_err(|err| sink_error("heat", err.to_string()))?;

    log::info!("heat map saved at {}", path.display());
    Ok(())
}
