//! Pairwise Pearson correlation over numeric columns.
//!
//! By default each pair is computed over the first `min(|x|, |y|)` valid
//! values of each column, filtered independently and *not* aligned by row.
//! [`Pairing::RowAligned`] switches to the textbook definition that only
//! pairs values from the same row.

use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;
use crate::error::Result;

/// How value sequences of two columns are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Filter each column independently, truncate to the shorter length.
    #[default]
    Truncated,
    /// Use only rows where both columns hold a numeric value.
    RowAligned,
}

/// Square correlation matrix indexed by `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at `(i, j)`, `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i)?.get(j).copied()
    }
}

/// Qualitative reading of a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    StrongPositive,
    ModeratePositive,
    Weak,
    ModerateNegative,
    StrongNegative,
}

impl Strength {
    pub fn of(r: f64) -> Self {
        if r > 0.7 {
            Strength::StrongPositive
        } else if r > 0.3 {
            Strength::ModeratePositive
        } else if r > -0.3 {
            Strength::Weak
        } else if r > -0.7 {
            Strength::ModerateNegative
        } else {
            Strength::StrongNegative
        }
    }
}

/// Pearson coefficient over the common prefix of `x` and `y`.
///
/// Fewer than two pairs, or a zero denominator, yield `0.0`. The result is
/// clamped to `[-1, 1]` and never NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|v| v * v).sum();
    let sum_y2: f64 = y.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let nf = n as f64;
    let numerator = nf * sum_xy - sum_x * sum_y;
    let denom_sq = (nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y);
    if denom_sq.is_nan() || denom_sq <= 0.0 {
        return 0.0;
    }

    let r = numerator / denom_sq.sqrt();
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Correlation matrix over `columns` (expected to be the numeric ones).
///
/// The diagonal is fixed at `1.0`; every off-diagonal cell is computed
/// independently.
pub fn correlate(dataset: &Dataset, columns: &[String], pairing: Pairing) -> Result<CorrelationMatrix> {
    let series = columns
        .iter()
        .map(|c| dataset.numeric_values(c))
        .collect::<Result<Vec<_>>>()?;

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            values[i][j] = if i == j {
                1.0
            } else {
                match pairing {
                    Pairing::Truncated => pearson(&series[i], &series[j]),
                    Pairing::RowAligned => {
                        let (x, y) = aligned(dataset, &columns[i], &columns[j]);
                        pearson(&x, &y)
                    }
                }
            };
        }
    }

    log::debug!("correlation matrix over {n} columns ({pairing:?})");
    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

fn aligned(dataset: &Dataset, a: &str, b: &str) -> (Vec<f64>, Vec<f64>) {
    dataset
        .rows
        .iter()
        .filter_map(|row| Some((row.get(a).as_f64()?, row.get(b).as_f64()?)))
        .unzip()
}
