/// Outlier removal over raw point sets.
///
/// Two algorithms are supported, with open3d-compatible semantics:
/// `statistical` drops points whose mean distance to their k nearest
/// neighbors exceeds the global mean by more than `std_ratio` standard
/// deviations, and `radius` drops points with fewer than `nb_points`
/// neighbors inside a sphere of the given radius.
use kd_tree::KdTree;

use crate::cloud::PointCloud;
use crate::config::{NoiseParams, NoiseRemoval};
use crate::error::PipelineError;

/// A validated noise removal step.
///
/// Validation happens before any point cloud is read, so an unsupported
/// algorithm name or a missing parameter fails the run up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denoiser {
    Statistical { nb_neighbors: usize, std_ratio: f64 },
    Radius { nb_points: usize, radius: f64 },
}

fn require<T: Copy>(value: Option<T>, key: &str) -> Result<T, PipelineError> {
    value.ok_or_else(|| PipelineError::Config {
        key: key.to_string(),
        reason: "missing noise removal parameter".to_string(),
    })
}

impl Denoiser {
    /// Resolve the configured algorithm name and parameters.
    pub fn from_config(config: &NoiseRemoval) -> Result<Self, PipelineError> {
        let NoiseParams {
            nb_neighbors,
            std_ratio,
            nb_points,
            radius,
        } = config.params;

        match config.algorithm.as_str() {
            "statistical" => Ok(Self::Statistical {
                nb_neighbors: require(nb_neighbors, "nb_neighbors")?,
                std_ratio: require(std_ratio, "std_ratio")?,
            }),
            "radius" => Ok(Self::Radius {
                nb_points: require(nb_points, "nb_points")?,
                radius: require(radius, "radius")?,
            }),
            other => {
                log::error!("noise removal: unsupported algorithm {other:?}");
                Err(PipelineError::UnknownAlgorithm {
                    name: other.to_string(),
                })
            }
        }
    }

    /// Filter the cloud, returning the surviving points in input order.
    pub fn apply(&self, cloud: &PointCloud) -> PointCloud {
        let filtered = match *self {
            Self::Statistical {
                nb_neighbors,
                std_ratio,
            } => statistical_outlier_removal(cloud.points(), nb_neighbors, std_ratio),
            Self::Radius { nb_points, radius } => {
                radius_outlier_removal(cloud.points(), nb_points, radius)
            }
        };
        log::info!(
            "noise removal: {} of {} points kept",
            filtered.len(),
            cloud.len()
        );
        PointCloud::new(filtered)
    }
}

fn statistical_outlier_removal(
    points: &[[f64; 3]],
    nb_neighbors: usize,
    std_ratio: f64,
) -> Vec<[f64; 3]> {
    if points.len() <= 1 || nb_neighbors == 0 {
        return points.to_vec();
    }

    let tree = KdTree::build_by_ordered_float(points.to_vec());

    // Mean distance from each point to its k nearest true neighbors. The
    // query point is in the tree, so ask for one extra hit and drop the
    // closest (the self match).
    let mean_distances: Vec<f64> = points
        .iter()
        .map(|point| {
            let mut distances: Vec<f64> = tree
                .nearests(point, nb_neighbors + 1)
                .iter()
                .map(|hit| hit.squared_distance.sqrt())
                .collect();
            distances.sort_by(|a, b| a.total_cmp(b));
            let neighbors = &distances[1..];
            neighbors.iter().sum::<f64>() / neighbors.len() as f64
        })
        .collect();

    let n = mean_distances.len() as f64;
    let mean = mean_distances.iter().sum::<f64>() / n;
    let variance = mean_distances
        .iter()
        .map(|d| (d - mean) * (d - mean))
        .sum::<f64>()
        / (n - 1.0);
    let threshold = mean + std_ratio * variance.sqrt();

    points
        .iter()
        .zip(&mean_distances)
        .filter(|&(_, &distance)| distance <= threshold)
        .map(|(&point, _)| point)
        .collect()
}

fn radius_outlier_removal(points: &[[f64; 3]], nb_points: usize, radius: f64) -> Vec<[f64; 3]> {
    if points.is_empty() {
        return Vec::new();
    }

    let tree = KdTree::build_by_ordered_float(points.to_vec());

    // The query point counts toward its own neighborhood, as in open3d.
    points
        .iter()
        .filter(|point| tree.within_radius(*point, radius).len() >= nb_points)
        .copied()
        .collect()
}
