use crate::engine::Grid;
use crate::model::{GROWTH_CEILING, GROWTH_FLOOR};
use serde::Serialize;

pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct AccumulatorReport {
    pub n_vals: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;

        self.min = self.min.min(val);
        self.max = self.max.max(val);
    }

    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            n_vals: self.n_vals,
            mean: if self.n_vals > 0 { self.mean } else { f64::NAN },
            std_dev: if self.n_vals > 1 {
                (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
            } else {
                f64::NAN
            },
            min: if self.n_vals > 0 { self.min } else { f64::NAN },
            max: if self.n_vals > 0 { self.max } else { f64::NAN },
        }
    }
}

/// Summary of the growth rates of a grid.
#[derive(Debug, Serialize)]
pub struct GrowthReport {
    pub n_rows: usize,
    pub n_cols: usize,
    pub growth: AccumulatorReport,
    /// Number of cells clamped at the growth floor.
    pub n_floor: usize,
    /// Number of cells clamped at the growth ceiling.
    pub n_ceiling: usize,
}

impl GrowthReport {
    pub fn new(grid: &Grid) -> Self {
        let (n_rows, n_cols) = grid.dim();

        let mut acc = Accumulator::new();
        let mut n_floor = 0;
        let mut n_ceiling = 0;
        for &rate in grid.growth.iter().flatten() {
            acc.add(rate);
            if rate <= GROWTH_FLOOR {
                n_floor += 1;
            }
            if rate >= GROWTH_CEILING {
                n_ceiling += 1;
            }
        }

        Self {
            n_rows,
            n_cols,
            growth: acc.report(),
            n_floor,
            n_ceiling,
        }
    }
}
