use serde::{Deserialize, Serialize};

pub use crate::models::bs::{OutputField, ParameterField};

/// One axis of variation: the parameter being overridden and its values in
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub field: ParameterField,
    pub values: Vec<f64>,
}

impl Axis {
    pub fn new(field: ParameterField, values: Vec<f64>) -> Self {
        Self { field, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Row-major matrix of one output field over a 2-D parameter grid.
///
/// `values[i][j]` belongs to `y_axis.values[i]` and `x_axis.values[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMatrix {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub output: OutputField,
    pub values: Vec<Vec<f64>>,
}

impl SweepMatrix {
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Smallest finite value (NaN cells are skipped).
    pub fn min(&self) -> Option<f64> {
        self.finite_values().reduce(f64::min)
    }

    /// Largest finite value (NaN cells are skipped).
    pub fn max(&self) -> Option<f64> {
        self.finite_values().reduce(f64::max)
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.values.iter().enumerate().flat_map(move |(i, row)| {
            let y = self.y_axis.values[i];
            row.iter()
                .enumerate()
                .map(move |(j, &v)| (self.x_axis.values[j], y, v))
        })
    }

    fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied().filter(|v| v.is_finite())
    }
}
