/// Point cloud container and LAS/LAZ ingestion.
use indicatif::{ProgressBar, ProgressStyle};
use las::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PipelineError;

/// An ordered 3D point set. Immutable once handed to the pipeline core.
#[derive(Debug, Clone)]
pub struct PointCloud {
    points: Vec<[f64; 3]>,
}

impl PointCloud {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read a point cloud from a .las or .laz file.
/// Streams points with progress tracking; coordinates come out in file order.
pub fn read_cloud(path: &Path) -> Result<PointCloud, PipelineError> {
    let file = File::open(path)?;
    let mut reader = Reader::new(BufReader::new(file))?;
    let total_points = reader.header().number_of_points();

    let pb = ProgressBar::new(total_points);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) {msg}")
            .unwrap()
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Loading points");

    let mut points = Vec::with_capacity(total_points as usize);
    for (idx, point_result) in reader.points().enumerate() {
        let point = point_result?;
        points.push([point.x, point.y, point.z]);

        if idx % 50_000 == 0 {
            pb.set_position(idx as u64);
        }
    }
    pb.finish_with_message("Points loaded");

    log::info!("read {} points from {}", points.len(), path.display());
    Ok(PointCloud::new(points))
}
