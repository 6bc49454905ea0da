use crate::model::growth_rate;
use serde::{Deserialize, Serialize};

/// Step between consecutive values of the housing axis.
pub const HOUS_STEP: usize = 500;

/// Model parameters of a grid evaluation.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Params {
    /// Capacity contributed by one district.
    pub pop_mult: i64,
    /// Current number of pops.
    pub n_pops: i64,
    /// Inclusive maximum of the district axis.
    pub max_dist: i64,
    /// Inclusive maximum of the housing axis.
    pub max_hous: i64,
}

impl Params {
    /// Shape of the grid these parameters evaluate to, as `(n_rows, n_cols)`.
    pub fn dim(&self) -> (usize, usize) {
        let n_rows = if self.max_hous < 0 {
            0
        } else {
            self.max_hous as usize / HOUS_STEP + 1
        };
        let n_cols = if self.max_dist < 0 {
            0
        } else {
            self.max_dist as usize + 1
        };
        (n_rows, n_cols)
    }
}

/// Growth and capacity over the district and housing axes.
///
/// Matrices are indexed `[i_hous][i_dist]`.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub params: Params,

    pub dist_axis: Vec<i64>,
    pub hous_axis: Vec<i64>,

    pub growth: Vec<Vec<f64>>,
    pub capacity: Vec<Vec<i64>>,
    pub capacity_text: Vec<Vec<String>>,
}

impl Grid {
    /// Evaluate the growth model at every combination of axis values.
    pub fn evaluate(params: Params) -> Self {
        let dist_axis = dist_axis(params.max_dist);
        let hous_axis = hous_axis(params.max_hous);

        let n_pops = params.n_pops as f64;

        let mut growth = Vec::with_capacity(hous_axis.len());
        let mut capacity = Vec::with_capacity(hous_axis.len());
        let mut capacity_text = Vec::with_capacity(hous_axis.len());

        for &hous in &hous_axis {
            let cap_row: Vec<i64> = dist_axis
                .iter()
                .map(|&dist| hous + params.pop_mult * dist + params.n_pops)
                .collect();

            growth.push(
                cap_row
                    .iter()
                    .map(|&cap| growth_rate(n_pops, cap as f64))
                    .collect(),
            );
            capacity_text.push(cap_row.iter().map(|cap| cap.to_string()).collect());
            capacity.push(cap_row);
        }

        Self {
            params,
            dist_axis,
            hous_axis,
            growth,
            capacity,
            capacity_text,
        }
    }

    /// Shape of the matrices as `(n_rows, n_cols)`.
    pub fn dim(&self) -> (usize, usize) {
        (self.hous_axis.len(), self.dist_axis.len())
    }
}

fn dist_axis(max_dist: i64) -> Vec<i64> {
    (0..=max_dist).collect()
}

fn hous_axis(max_hous: i64) -> Vec<i64> {
    (0..=max_hous).step_by(HOUS_STEP).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GROWTH_CEILING, GROWTH_FLOOR};

    fn params(pop_mult: i64, n_pops: i64, max_dist: i64, max_hous: i64) -> Params {
        Params {
            pop_mult,
            n_pops,
            max_dist,
            max_hous,
        }
    }

    #[test]
    fn axes_follow_inclusive_bounds() {
        assert_eq!(dist_axis(0), vec![0]);
        assert_eq!(dist_axis(3), vec![0, 1, 2, 3]);
        assert_eq!(hous_axis(0), vec![0]);
        assert_eq!(hous_axis(499), vec![0]);
        assert_eq!(hous_axis(500), vec![0, 500]);
        assert_eq!(hous_axis(1999), vec![0, 500, 1000, 1500]);
    }

    #[test]
    fn negative_bounds_give_empty_axes() {
        assert!(dist_axis(-1).is_empty());
        assert!(hous_axis(-1).is_empty());
        assert!(hous_axis(-500).is_empty());
    }

    #[test]
    fn axis_lengths() {
        for max in -3..40 {
            assert_eq!(dist_axis(max).len() as i64, (max + 1).max(0));
        }
        for max in [-1000, -1, 0, 1, 499, 500, 501, 2500, 9999, 10_000] {
            let exp_len = if max >= 0 { max / 500 + 1 } else { 0 };
            assert_eq!(hous_axis(max).len() as i64, exp_len);
        }
    }

    #[test]
    fn params_predict_grid_shape() {
        for (max_dist, max_hous) in [(-1, -1), (0, 0), (2, 1000), (7, 3200), (5, -1), (-4, 499)] {
            let par = params(100, 1000, max_dist, max_hous);
            assert_eq!(par.dim(), Grid::evaluate(par).dim());
        }
    }

    #[test]
    fn matrices_share_grid_shape() {
        let grid = Grid::evaluate(params(40, 250, 7, 3200));
        let (n_rows, n_cols) = grid.dim();
        assert_eq!((n_rows, n_cols), (7, 8));
        for mat_dim in [
            (grid.growth.len(), grid.growth.iter().map(Vec::len).max()),
            (grid.capacity.len(), grid.capacity.iter().map(Vec::len).max()),
            (
                grid.capacity_text.len(),
                grid.capacity_text.iter().map(Vec::len).max(),
            ),
        ] {
            assert_eq!(mat_dim, (n_rows, Some(n_cols)));
        }
        assert!(grid.growth.iter().all(|row| row.len() == n_cols));
    }

    #[test]
    fn capacity_text_matches_capacity() {
        let grid = Grid::evaluate(params(100, 1000, 4, 2000));
        for (cap_row, text_row) in grid.capacity.iter().zip(&grid.capacity_text) {
            for (cap, text) in cap_row.iter().zip(text_row) {
                assert_eq!(&cap.to_string(), text);
            }
        }
    }

    #[test]
    fn growth_is_within_bounds() {
        let grid = Grid::evaluate(params(500, 800, 30, 50_000));
        assert!(
            grid.growth
                .iter()
                .flatten()
                .all(|rate| (GROWTH_FLOOR..=GROWTH_CEILING).contains(rate))
        );
    }

    #[test]
    fn small_grid_cells() {
        let grid = Grid::evaluate(params(100, 1000, 2, 1000));
        assert_eq!(grid.dist_axis, vec![0, 1, 2]);
        assert_eq!(grid.hous_axis, vec![0, 500, 1000]);

        assert_eq!(grid.capacity[0][0], 1000);
        assert_eq!(grid.growth[0][0], GROWTH_FLOOR);
        assert_eq!(grid.capacity_text[0][0], "1000");

        assert_eq!(grid.capacity[2][2], 2200);
        assert!((grid.growth[2][2] - 1.3636).abs() < 1e-4);
        assert_eq!(grid.capacity_text[2][2], "2200");

        assert_eq!(grid.capacity[1][2], 1700);
        assert_eq!(grid.capacity[2][1], 2100);
    }

    #[test]
    fn single_cell_grid() {
        let grid = Grid::evaluate(params(0, 1, 0, 0));
        assert_eq!(grid.dim(), (1, 1));
        assert_eq!(grid.capacity, vec![vec![1]]);
        assert_eq!(grid.capacity_text, vec![vec!["1".to_string()]]);
        assert_eq!(grid.growth, vec![vec![GROWTH_FLOOR]]);
    }

    #[test]
    fn empty_axes_give_empty_matrices() {
        let grid = Grid::evaluate(params(100, 1000, 5, -1));
        assert_eq!(grid.dim(), (0, 6));
        assert!(grid.growth.is_empty());

        let grid = Grid::evaluate(params(100, 1000, -1, 1000));
        assert_eq!(grid.dim(), (3, 0));
        assert!(grid.growth.iter().all(Vec::is_empty));
        assert!(grid.capacity_text.iter().all(Vec::is_empty));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let par = params(60, 3000, 12, 6000);
        assert_eq!(Grid::evaluate(par), Grid::evaluate(par));
    }
}
