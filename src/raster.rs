/// Raster accumulation: mapping projected pairs onto grid cells and
/// building the depth and heat map products.
use crate::error::PipelineError;
use crate::projection::ProjectedPair;

/// Fixed color used to mark visited heat map cells.
pub const HEAT_MARKER: [u8; 3] = [255, 0, 0];

/// Single-channel float raster holding per-cell mean depth.
/// Cells nothing mapped to stay at 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<f32>,
}

/// 3-channel byte raster marking visited cells, stored row-major RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatMap {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<u8>,
}

/// Map a projected pair to a raster cell, or None when it falls outside.
///
/// Both axes are normalized with the same depth range, which is derived
/// from x-components only; the y-axis asymmetry is intentional. Callers
/// must reject a degenerate range before calling.
pub fn to_cell(
    pair: ProjectedPair,
    max_depth: f64,
    min_depth: f64,
    image_size: [usize; 2],
) -> Option<(usize, usize)> {
    let [height, width] = image_size;
    let span = max_depth - min_depth;

    let col = ((pair.0 - min_depth) / span * (width - 1) as f64).floor() as i64;
    let row = ((pair.1 - min_depth) / span * (height - 1) as f64).floor() as i64;

    if (0..width as i64).contains(&col) && (0..height as i64).contains(&row) {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

fn guard_range(max_depth: f64, min_depth: f64) -> Result<(), PipelineError> {
    if max_depth == min_depth {
        return Err(PipelineError::ZeroDepthRange { depth: max_depth });
    }
    Ok(())
}

/// Build the depth map: per-cell arithmetic mean of the x-values of all
/// in-bounds pairs. Out-of-range pairs are skipped silently.
pub fn build_depth_map(
    pairs: &[ProjectedPair],
    max_depth: f64,
    min_depth: f64,
    image_size: [usize; 2],
) -> Result<DepthMap, PipelineError> {
    guard_range(max_depth, min_depth)?;
    let [height, width] = image_size;

    let mut cells = vec![0.0f32; height * width];
    let mut counts = vec![0u32; height * width];
    let mut binned = 0usize;

    for &pair in pairs {
        if let Some((row, col)) = to_cell(pair, max_depth, min_depth, image_size) {
            let idx = row * width + col;
            cells[idx] += pair.0 as f32;
            counts[idx] += 1;
            binned += 1;
        }
    }

    for (cell, &count) in cells.iter_mut().zip(&counts) {
        if count > 0 {
            *cell /= count as f32;
        }
    }

    log::info!("depth map: {} of {} pairs binned", binned, pairs.len());
    Ok(DepthMap {
        height,
        width,
        cells,
    })
}

/// Build the heat map: every visited cell gets the fixed marker color.
/// Repeated hits are idempotent; there is no accumulation or blending.
pub fn build_heat_map(
    pairs: &[ProjectedPair],
    max_depth: f64,
    min_depth: f64,
    image_size: [usize; 2],
) -> Result<HeatMap, PipelineError> {
    guard_range(max_depth, min_depth)?;
    let [height, width] = image_size;

    let mut cells = vec![0u8; height * width * 3];
    let mut binned = 0usize;

    for &pair in pairs {
        if let Some((row, col)) = to_cell(pair, max_depth, min_depth, image_size) {
            let idx = (row * width + col) * 3;
            cells[idx..idx + 3].copy_from_slice(&HEAT_MARKER);
            binned += 1;
        }
    }

    log::info!("heat map: {} of {} pairs binned", binned, pairs.len());
    Ok(HeatMap {
        height,
        width,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    const SIZE: [usize; 2] = [4, 4];

    #[test]
    fn cell_formula_matches_the_contract() {
        // range [0, 3] over a 4x4 raster maps integer coordinates directly
        assert_eq!(to_cell((0.0, 0.0), 3.0, 0.0, SIZE), Some((0, 0)));
        assert_eq!(to_cell((3.0, 0.0), 3.0, 0.0, SIZE), Some((0, 3)));
        assert_eq!(to_cell((1.2, 2.9), 3.0, 0.0, SIZE), Some((2, 1)));
    }

    #[test]
    fn out_of_range_pairs_are_skipped() {
        // y below min floors to a negative row; y above max overshoots
        assert_eq!(to_cell((1.0, -0.3), 3.0, 0.0, SIZE), None);
        assert_eq!(to_cell((1.0, 3.7), 3.0, 0.0, SIZE), None);
    }

    #[test]
    fn accepted_cells_are_always_in_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let pair = (rng.gen_range(-2.0..5.0), rng.gen_range(-2.0..5.0));
            if let Some((row, col)) = to_cell(pair, 3.0, 0.0, [7, 5]) {
                assert!(row < 7);
                assert!(col < 5);
            }
        }
    }

    #[test]
    fn zero_depth_range_is_fatal() {
        let pairs = vec![(2.0, 2.0)];
        let err = build_depth_map(&pairs, 2.0, 2.0, SIZE).unwrap_err();
        assert!(matches!(err, PipelineError::ZeroDepthRange { depth } if depth == 2.0));
        let err = build_heat_map(&pairs, 2.0, 2.0, SIZE).unwrap_err();
        assert!(matches!(err, PipelineError::ZeroDepthRange { .. }));
    }

    #[test]
    fn depth_cells_hold_the_arithmetic_mean() {
        // (1.0, 0.0) and (1.5, 0.0) land in the same cell (0, 1)
        let pairs = vec![(1.0, 0.0), (1.5, 0.0), (3.0, 3.0)];
        let map = build_depth_map(&pairs, 3.0, 0.0, SIZE).unwrap();

        assert_abs_diff_eq!(map.cells[1], 1.25f32);
        assert_abs_diff_eq!(map.cells[3 * 4 + 3], 3.0f32);
        // untouched cells stay at zero
        assert_abs_diff_eq!(map.cells[0], 0.0f32);
        assert_eq!(map.cells.iter().filter(|&&c| c != 0.0).count(), 2);
    }

    #[test]
    fn heat_cells_are_exactly_the_marker() {
        let pairs = vec![(1.0, 0.0), (1.0, 0.0), (1.4, 0.2)];
        let map = build_heat_map(&pairs, 3.0, 0.0, SIZE).unwrap();

        assert_eq!(&map.cells[3..6], &HEAT_MARKER);
        // one visited cell, everything else black
        let marked = map.cells.chunks(3).filter(|c| *c == HEAT_MARKER).count();
        assert_eq!(marked, 1);
        assert_eq!(map.cells.chunks(3).filter(|c| *c == [0, 0, 0]).count(), 15);
    }

    #[test]
    fn heat_map_construction_is_idempotent() {
        let mut rng = rand::thread_rng();
        let pairs: Vec<(f64, f64)> = (0..200)
            .map(|_| (rng.gen_range(0.0..3.0), rng.gen_range(0.0..3.0)))
            .collect();

        let first = build_heat_map(&pairs, 3.0, 0.0, [16, 16]).unwrap();
        let second = build_heat_map(&pairs, 3.0, 0.0, [16, 16]).unwrap();
        assert_eq!(first, second);
    }
}
