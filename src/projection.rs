/// Projection of 3D points into 2D coordinate pairs.
use crate::error::PipelineError;

/// A 2D coordinate built from two consecutive projected scalars.
pub type ProjectedPair = (f64, f64);

fn dot(point: &[f64; 3], vector: &[f64; 3]) -> f64 {
    point[0] * vector[0] + point[1] * vector[1] + point[2] * vector[2]
}

/// Project each point onto the vector and group the scalar stream into
/// consecutive pairs: pair k = (scalar 2k, scalar 2k+1).
///
/// An odd trailing scalar is dropped, so the result always holds
/// floor(N/2) pairs. An empty result is not an error here; the caller
/// decides whether "nothing to draw" is acceptable.
pub fn project(points: &[[f64; 3]], vector: &[f64; 3]) -> Vec<ProjectedPair> {
    let scalars: Vec<f64> = points.iter().map(|point| dot(point, vector)).collect();

    let pairs: Vec<ProjectedPair> = scalars
        .chunks_exact(2)
        .map(|chunk| (chunk[0], chunk[1]))
        .collect();

    if pairs.is_empty() {
        log::warn!(
            "projection: no pairs produced from {} input points",
            points.len()
        );
    } else {
        log::info!("projection: {} pairs produced", pairs.len());
    }
    pairs
}

/// Compute (max_depth, min_depth) over the x-components of the pairs.
///
/// This range is the sole normalization basis for both map builders; the
/// y-components deliberately do not contribute.
pub fn depth_range(pairs: &[ProjectedPair]) -> Result<(f64, f64), PipelineError> {
    if pairs.is_empty() {
        return Err(PipelineError::EmptyInput {
            stage: "depth range",
        });
    }

    let mut max_depth = f64::NEG_INFINITY;
    let mut min_depth = f64::INFINITY;
    for &(x, _) in pairs {
        max_depth = max_depth.max(x);
        min_depth = min_depth.min(x);
    }

    log::info!("depth range: max {max_depth}, min {min_depth}");
    Ok((max_depth, min_depth))
}
