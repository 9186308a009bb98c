//! Per-column and dataset-wide descriptive statistics.
//!
//! Missing values are expected input, not errors: they are counted, and
//! every reduction runs over the present values only.

use serde::Serialize;

use super::inference::{ColumnKind, classify};
use super::tally::{Tally, float_key};
use crate::data::model::{CellValue, Dataset};
use crate::error::Result;

// ── Summaries ─────────────────────────────────────────────────────────

/// Kind and completeness of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Rows where the value is absent or an empty string.
    pub missing_count: usize,
    /// Total number of rows.
    pub total_count: usize,
}

impl ColumnProfile {
    pub fn present_count(&self) -> usize {
        self.total_count - self.missing_count
    }
}

/// Descriptive statistics over a column's finite numeric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Number of values that entered the reductions.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; the first one seen wins a tie.
    pub mode: f64,
    /// Occurrences of `mode`.
    pub mode_frequency: usize,
    /// Number of distinct values tied at the highest frequency.
    pub mode_count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub missing_count: usize,
}

impl NumericSummary {
    /// Reduce `values` (in row order). Returns `None` when there is nothing
    /// to reduce.
    pub fn from_values(values: &[f64], missing_count: usize) -> Option<Self> {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = if count % 2 == 0 {
            midpoint(sorted[count / 2 - 1], sorted[count / 2])
        } else {
            sorted[count / 2]
        };

        let tally: Tally<u64> = values.iter().map(|&v| float_key(v)).collect();
        let (mode_key, mode_frequency) = tally.most_common().copied().unwrap_or((0, 0));

        Some(NumericSummary {
            count,
            mean: mean(&values).unwrap_or(sum).clamp(min, max),
            median,
            mode: f64::from_bits(mode_key),
            mode_frequency,
            mode_count: tally.tied_at_max(),
            min,
            max,
            sum,
            missing_count,
        })
    }
}

/// Frequency statistics over a column's present values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    /// `None` when the column has no present values.
    pub most_common_value: Option<String>,
    pub most_common_count: usize,
    /// Lexicographically smallest present value.
    pub min: Option<String>,
    /// Lexicographically largest present value.
    pub max: Option<String>,
    pub missing_count: usize,
}

/// Result of [`summarize`]. `NoData` is the sentinel for a numeric column
/// whose value set is empty after filtering; treat it as "not applicable".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
    NoData { missing_count: usize },
}

impl ColumnSummary {
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnSummary::Numeric(s) => s.missing_count,
            ColumnSummary::Categorical(s) => s.missing_count,
            ColumnSummary::NoData { missing_count } => *missing_count,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnSummary::Numeric(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            ColumnSummary::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

// ── Reductions ──────────────────────────────────────────────────────

/// Arithmetic mean, finite for any finite input.
///
/// Falls back to a running mean when the plain sum overflows.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let plain = values.iter().sum::<f64>() / values.len() as f64;
    if plain.is_finite() {
        return Some(plain);
    }
    let running = values.iter().enumerate().fold(0.0, |m, (k, &v)| {
        let n = (k + 1) as f64;
        m * (k as f64 / n) + v / n
    });
    Some(running)
}

/// Midpoint of `a` and `b` without overflowing near `f64::MAX`.
pub fn midpoint(a: f64, b: f64) -> f64 {
    let mid = (a + b) / 2.0;
    if mid.is_finite() { mid } else { a / 2.0 + b / 2.0 }
}

// ── Column functions ──────────────────────────────────────────────────

fn count_missing(values: &[&CellValue]) -> usize {
    values.iter().filter(|v| v.is_missing()).count()
}

/// Profile one column's values (kind plus missing/total counts).
pub fn profile(name: &str, values: &[&CellValue]) -> ColumnProfile {
    ColumnProfile {
        name: name.to_string(),
        kind: classify(values.iter().copied()),
        missing_count: count_missing(values),
        total_count: values.len(),
    }
}

/// Summarize one column's values, dispatching on the inferred kind.
pub fn summarize(values: &[&CellValue]) -> ColumnSummary {
    let missing_count = count_missing(values);

    match classify(values.iter().copied()) {
        ColumnKind::Numeric => {
            let numeric: Vec<f64> = values
                .iter()
                .filter(|v| !v.is_missing())
                .filter_map(|v| v.as_f64())
                .collect();
            NumericSummary::from_values(&numeric, missing_count)
                .map_or(ColumnSummary::NoData { missing_count }, ColumnSummary::Numeric)
        }
        ColumnKind::Categorical => {
            ColumnSummary::Categorical(summarize_categorical(values, missing_count))
        }
    }
}

fn summarize_categorical(values: &[&CellValue], missing_count: usize) -> CategoricalSummary {
    let present: Vec<String> = values
        .iter()
        .filter(|v| !v.is_missing())
        .map(|v| v.to_string())
        .collect();

    let tally: Tally<String> = present.iter().cloned().collect();
    let (most_common_value, most_common_count) = match tally.most_common() {
        Some((value, count)) => (Some(value.clone()), *count),
        None => (None, 0),
    };

    CategoricalSummary {
        unique_count: tally.len(),
        most_common_value,
        most_common_count,
        min: present.iter().min().cloned(),
        max: present.iter().max().cloned(),
        missing_count,
    }
}

// ── Dataset statistics ────────────────────────────────────────────────

/// Profile and summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub profile: ColumnProfile,
    pub summary: ColumnSummary,
}

/// Profile and summarize a named dataset column.
pub fn column_statistics(dataset: &Dataset, name: &str) -> Result<ColumnStatistics> {
    let values = dataset.column(name)?;
    Ok(ColumnStatistics {
        profile: profile(name, &values),
        summary: summarize(&values),
    })
}

/// Dataset-wide statistics over a column selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatistics {
    pub total_rows: usize,
    pub total_columns: usize,
    /// `total_rows × total_columns`.
    pub data_points: usize,
    pub total_missing: usize,
    /// Missing share of all data points, 0.0 to 100.0 (0.0 when empty).
    pub missing_pct: f64,
    pub columns: Vec<ColumnStatistics>,
}

impl DatasetStatistics {
    /// Compute statistics for `selected` columns (empty means all).
    pub fn compute(dataset: &Dataset, selected: &[String]) -> Result<Self> {
        let names = dataset.resolve_selection(selected)?;
        let columns = names
            .iter()
            .map(|name| column_statistics(dataset, name))
            .collect::<Result<Vec<_>>>()?;

        let total_rows = dataset.len();
        let total_columns = names.len();
        let data_points = total_rows * total_columns;
        let total_missing: usize = columns.iter().map(|c| c.profile.missing_count).sum();
        let missing_pct = if data_points > 0 {
            total_missing as f64 / data_points as f64 * 100.0
        } else {
            0.0
        };

        log::debug!(
            "computed statistics for {total_columns} columns over {total_rows} rows"
        );

        Ok(Self {
            total_rows,
            total_columns,
            data_points,
            total_missing,
            missing_pct,
            columns,
        })
    }

    /// Names of numeric columns, in selection order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.profile.kind == ColumnKind::Numeric)
            .map(|c| c.profile.name.clone())
            .collect()
    }

    pub fn categorical_count(&self) -> usize {
        self.total_columns - self.numeric_columns().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn cells(values: &[CellValue]) -> Vec<&CellValue> {
        values.iter().collect()
    }

    // ── Numeric ──────────────────────────────────────────────────

    #[test]
    fn numeric_basic_stats() {
        let vals = [1.0, 2.0, 3.0, 4.0, 5.0].map(CellValue::Number);
        let s = summarize(&cells(&vals));
        let n = s.as_numeric().expect("numeric summary");
        assert_eq!(n.count, 5);
        assert!((n.mean - 3.0).abs() < 1e-10);
        assert!((n.median - 3.0).abs() < 1e-10);
        assert_eq!(n.min, 1.0);
        assert_eq!(n.max, 5.0);
        assert!((n.sum - 15.0).abs() < 1e-10);
        assert_eq!(n.missing_count, 0);
    }

    #[test]
    fn numeric_even_median() {
        let vals = [4.0, 1.0, 3.0, 2.0].map(CellValue::Number);
        let n = summarize(&cells(&vals)).as_numeric().cloned().unwrap();
        assert!((n.median - 2.5).abs() < 1e-10);
    }

    #[test]
    fn mode_tie_goes_to_first_seen() {
        let vals = [5.0, 3.0, 3.0, 5.0, 1.0].map(CellValue::Number);
        let n = summarize(&cells(&vals)).as_numeric().cloned().unwrap();
        assert_eq!(n.mode, 5.0);
        assert_eq!(n.mode_frequency, 2);
        assert_eq!(n.mode_count, 2);
    }

    #[test]
    fn single_mode() {
        let vals = [2.0, 7.0, 7.0].map(CellValue::Number);
        let n = summarize(&cells(&vals)).as_numeric().cloned().unwrap();
        assert_eq!(n.mode, 7.0);
        assert_eq!(n.mode_count, 1);
    }

    #[test]
    fn unparsable_values_dropped_not_missing() {
        let vals = [
            CellValue::Number(10.0),
            CellValue::from("n/a"),
            CellValue::Missing,
            CellValue::Number(20.0),
        ];
        let n = summarize(&cells(&vals)).as_numeric().cloned().unwrap();
        assert_eq!(n.count, 2);
        assert_eq!(n.missing_count, 1);
        assert!((n.mean - 15.0).abs() < 1e-10);
    }

    #[test]
    fn empty_numeric_set_is_no_data() {
        assert!(NumericSummary::from_values(&[], 3).is_none());
        assert!(NumericSummary::from_values(&[f64::NAN], 0).is_none());
    }

    #[test]
    fn huge_values_stay_within_range() {
        let n = NumericSummary::from_values(&[1e308, 1e308], 0).unwrap();
        assert_eq!(n.mean, 1e308);
        assert_eq!(n.median, 1e308);
        assert!(n.sum.is_infinite());

        let n = NumericSummary::from_values(&[-1e308, 1e308, 1e308], 0).unwrap();
        assert!(n.min <= n.mean && n.mean <= n.max);
        assert!(n.min <= n.median && n.median <= n.max);
        assert!(n.mean.is_finite());
    }

    #[test]
    fn mean_and_midpoint_helpers() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
        assert_eq!(mean(&[f64::MAX, f64::MAX]), Some(f64::MAX));
        assert_eq!(midpoint(2.0, 3.0), 2.5);
        assert_eq!(midpoint(f64::MAX, f64::MAX), f64::MAX);
    }

    // ── Categorical ──────────────────────────────────────────────

    #[test]
    fn categorical_basic() {
        let vals = [
            CellValue::from("x"),
            CellValue::from("y"),
            CellValue::from("x"),
            CellValue::Text(String::new()),
        ];
        let c = summarize(&cells(&vals)).as_categorical().cloned().unwrap();
        assert_eq!(c.unique_count, 2);
        assert_eq!(c.most_common_value.as_deref(), Some("x"));
        assert_eq!(c.most_common_count, 2);
        assert_eq!(c.min.as_deref(), Some("x"));
        assert_eq!(c.max.as_deref(), Some("y"));
        assert_eq!(c.missing_count, 1);
    }

    #[test]
    fn categorical_tie_goes_to_first_seen() {
        let vals = [CellValue::from("b"), CellValue::from("a")];
        let c = summarize(&cells(&vals)).as_categorical().cloned().unwrap();
        assert_eq!(c.most_common_value.as_deref(), Some("b"));
    }

    #[test]
    fn all_missing_column() {
        let vals = [CellValue::Missing, CellValue::Missing];
        let c = summarize(&cells(&vals)).as_categorical().cloned().unwrap();
        assert_eq!(c.unique_count, 0);
        assert!(c.most_common_value.is_none());
        assert_eq!(c.missing_count, 2);
    }

    // ── Dataset ──────────────────────────────────────────────────

    fn sample() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                Row::new().with("a", 1.0).with("b", "x"),
                Row::new().with("a", 2.0).with("b", "x"),
                Row::new().with("a", 3.0).with("b", "y"),
                Row::new().with("b", ""),
            ],
        )
        .unwrap()
    }

    #[test]
    fn dataset_statistics() {
        let stats = DatasetStatistics::compute(&sample(), &[]).unwrap();
        assert_eq!(stats.total_rows, 4);
        assert_eq!(stats.total_columns, 2);
        assert_eq!(stats.data_points, 8);
        assert_eq!(stats.total_missing, 2);
        assert!((stats.missing_pct - 25.0).abs() < 1e-10);
        assert_eq!(stats.numeric_columns(), vec!["a"]);
        assert_eq!(stats.categorical_count(), 1);

        for col in &stats.columns {
            assert_eq!(
                col.profile.missing_count + col.profile.present_count(),
                stats.total_rows
            );
            assert_eq!(col.profile.missing_count, col.summary.missing_count());
        }
    }

    #[test]
    fn empty_dataset_statistics() {
        let ds = Dataset::default();
        let stats = DatasetStatistics::compute(&ds, &[]).unwrap();
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.missing_pct, 0.0);
        assert!(stats.columns.is_empty());
    }

    #[test]
    fn unknown_selected_column() {
        let err = DatasetStatistics::compute(&sample(), &["nope".to_string()]);
        assert!(err.is_err());
    }
}
