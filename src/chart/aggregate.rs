//! Reshape dataset rows into chart-ready structures.
//!
//! All operations share [`group_by`] and never fail on data shape: an empty
//! or non-numeric input yields an empty result. Only unknown column names
//! are errors.

use std::collections::HashMap;

use serde::Serialize;

use super::ChartSeries;
use crate::color;
use crate::config::AggregationConfig;
use crate::data::model::{CellValue, Dataset, Row};
use crate::error::Result;
use crate::format::{round2, truncate_label};
use crate::stats::correlation::{CorrelationMatrix, Pairing, correlate};
use crate::stats::summary::mean;
use crate::stats::tally::Tally;

// ── Grouping ──────────────────────────────────────────────────────────

/// Rows sharing one stringified key, in first-seen key order.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: String,
    pub rows: Vec<&'a Row>,
}

fn key_label(cell: &CellValue, missing_label: &str) -> String {
    if cell.is_missing() {
        missing_label.to_string()
    } else {
        cell.to_string()
    }
}

/// Group rows by the display string of `key_column`; missing keys collect
/// under `missing_label`.
pub fn group_by<'a>(dataset: &'a Dataset, key_column: &str, missing_label: &str) -> Result<Vec<Group<'a>>> {
    dataset.require_column(key_column)?;

    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in &dataset.rows {
        let key = key_label(row.get(key_column), missing_label);
        match index.get(&key) {
            Some(&pos) => groups[pos].rows.push(row),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group { key, rows: vec![row] });
            }
        }
    }
    Ok(groups)
}

fn apply_label_cap(series: &mut ChartSeries, config: &AggregationConfig) {
    if let Some(max) = config.label_max_chars {
        series.truncate_labels(max);
    }
}

// ── Pie: category counts ──────────────────────────────────────────────

/// Row counts per key (grouped as in [`group_by`]), largest first, top `pie_top_n` kept and the rest
/// folded into a trailing `other_label` slice (only when non-empty).
pub fn category_counts(dataset: &Dataset, key_column: &str, config: &AggregationConfig) -> Result<ChartSeries> {
    dataset.require_column(key_column)?;
    let counts = dataset
        .rows
        .iter()
        .map(|row| key_label(row.get(key_column), &config.missing_label))
        .collect::<Tally<String>>()
        .sorted_desc();

    let top_n = config.pie_top_n.min(counts.len());
    let other: usize = counts[top_n..].iter().map(|(_, c)| c).sum();

    let mut series = ChartSeries::new(key_column);
    for (label, count) in &counts[..top_n] {
        series.push(label.clone(), *count as f64);
    }
    series.colors = color::series_colors(top_n);
    apply_label_cap(&mut series, config);

    if other > 0 {
        series.push(config.other_label.clone(), other as f64);
        series.colors.push(color::OTHER.to_string());
    }

    log::debug!(
        "pie over '{key_column}': {} slices ({} folded)",
        series.len(),
        counts.len() - top_n
    );
    Ok(series)
}

// ── Bar / line: mean per group ────────────────────────────────────────

/// Mean of `value_column` per `key_column` group, largest first, top
/// `bar_top_n` kept, rounded to two decimals.
///
/// Non-numeric and missing values are excluded from both sum and count; a
/// group with no numeric values averages to `0`. A value column without any
/// numeric value yields an empty series.
pub fn mean_by_group(
    dataset: &Dataset,
    key_column: &str,
    value_column: &str,
    config: &AggregationConfig,
) -> Result<ChartSeries> {
    let groups = group_by(dataset, key_column, &config.missing_label)?;
    let mut series = ChartSeries::new(value_column).with_primary_color();

    if dataset.numeric_values(value_column)?.is_empty() {
        log::debug!("'{value_column}' has no numeric values; mean series left empty");
        return Ok(series);
    }

    let mut means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|g| {
            let vals: Vec<f64> = g
                .rows
                .iter()
                .filter_map(|row| row.get(value_column).as_f64())
                .collect();
            (g.key, mean(&vals).unwrap_or(0.0))
        })
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means.truncate(config.bar_top_n);

    for (label, mean) in means {
        series.push(label, round2(mean));
    }
    apply_label_cap(&mut series, config);
    Ok(series)
}

// ── Histogram ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    /// Empty when the column has no numeric values.
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Bins as `"min-max"` labels with counts.
    pub fn to_series(&self) -> ChartSeries {
        let mut series = ChartSeries::new(format!("Frequency of {}", self.column));
        for bin in &self.bins {
            series.push(format!("{:.1}-{:.1}", bin.min, bin.max), bin.count as f64);
        }
        series.with_primary_color()
    }
}

/// Split `[min, max]` into `bin_count` equal-width bins and count values.
///
/// The top edge of the last bin is inclusive. When all values are equal
/// every value lands in the first bin. Ranges wider than `f64::MAX` are
/// binned at half scale so edges stay finite.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<Bin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
    // Bin width in scaled units; always finite.
    let width = (max * scale - min * scale) / bin_count as f64;
    let edge = |i: usize| {
        let step = i as f64 * width;
        if scale < 1.0 { min + step + step } else { min + step }
    };

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            min: edge(i),
            max: edge(i + 1),
            count: 0,
        })
        .collect();
    if let Some(last) = bins.last_mut() {
        last.max = max;
    }

    for v in values {
        let idx = if width > 0.0 {
            (((v * scale - min * scale) / width).floor() as usize).min(bin_count - 1)
        } else {
            0
        };
        bins[idx].count += 1;
    }
    bins
}

/// Histogram of a column's numeric values with `histogram_bins` bins.
pub fn histogram(dataset: &Dataset, column: &str, config: &AggregationConfig) -> Result<Histogram> {
    let values = dataset.numeric_values(column)?;
    Ok(Histogram {
        column: column.to_string(),
        bins: bin_values(&values, config.histogram_bins),
    })
}

// ── Boxplot ───────────────────────────────────────────────────────────

/// Quartiles and whiskers of one numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    /// `max(min, q1 - 1.5·iqr)`.
    pub lower_whisker: f64,
    /// `min(max, q3 + 1.5·iqr)`.
    pub upper_whisker: f64,
    /// Values outside the whiskers.
    pub outliers: usize,
}

impl BoxPlot {
    /// Compute from raw values. Quartiles use `floor(n·p)` indexing into
    /// the sorted sample, without interpolation.
    pub fn from_values(column: &str, values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let at = |p: f64| sorted[((n as f64 * p).floor() as usize).min(n - 1)];
        let (q1, median, q3) = (at(0.25), at(0.5), at(0.75));
        let (min, max) = (sorted[0], sorted[n - 1]);
        let iqr = q3 - q1;
        let lower_whisker = min.max(q1 - 1.5 * iqr);
        let upper_whisker = max.min(q3 + 1.5 * iqr);
        let outliers = sorted
            .iter()
            .filter(|&&v| v < lower_whisker || v > upper_whisker)
            .count();

        Some(BoxPlot {
            column: column.to_string(),
            count: n,
            min,
            q1,
            median,
            q3,
            max,
            iqr,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Five-number series: whiskers, quartiles and median.
    pub fn to_series(&self) -> ChartSeries {
        let mut series = ChartSeries::new(self.column.clone());
        series.push("Lower Whisker", self.lower_whisker);
        series.push("Q1", self.q1);
        series.push("Median", self.median);
        series.push("Q3", self.q3);
        series.push("Upper Whisker", self.upper_whisker);
        series.with_primary_color()
    }
}

/// Boxplot of a column; `None` when it has no numeric values.
pub fn boxplot(dataset: &Dataset, column: &str) -> Result<Option<BoxPlot>> {
    let values = dataset.numeric_values(column)?;
    Ok(BoxPlot::from_values(column, &values))
}

// ── Heatmap ───────────────────────────────────────────────────────────

/// Correlation heatmap, or the sentinel when fewer than two numeric
/// columns are available.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Heatmap {
    InsufficientColumns { available: usize },
    Correlation {
        matrix: CorrelationMatrix,
        /// `"a vs b"` → r, row-major, coloured by strength band.
        series: ChartSeries,
    },
}

impl Heatmap {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            Heatmap::Correlation { series, .. } => Some(series),
            Heatmap::InsufficientColumns { .. } => None,
        }
    }
}

/// Correlation heatmap over `numeric_columns`.
pub fn correlation_heatmap(dataset: &Dataset, numeric_columns: &[String], pairing: Pairing) -> Result<Heatmap> {
    if numeric_columns.len() < 2 {
        for col in numeric_columns {
            dataset.require_column(col)?;
        }
        return Ok(Heatmap::InsufficientColumns {
            available: numeric_columns.len(),
        });
    }

    let matrix = correlate(dataset, numeric_columns, pairing)?;
    let series = heatmap_series(&matrix, None);
    Ok(Heatmap::Correlation { matrix, series })
}

/// Flatten a matrix into `"a vs b"` cells, row-major, coloured by strength.
///
/// `column_max_chars` shortens each column name on its own, so the pair
/// stays readable and distinct where a whole-label cap would cut off `b`.
pub fn heatmap_series(matrix: &CorrelationMatrix, column_max_chars: Option<usize>) -> ChartSeries {
    let names: Vec<String> = matrix
        .columns
        .iter()
        .map(|c| match column_max_chars {
            Some(max) => truncate_label(c, max),
            None => c.clone(),
        })
        .collect();

    let mut series = ChartSeries::new("Correlation");
    for (i, a) in names.iter().enumerate() {
        for (j, b) in names.iter().enumerate() {
            let r = matrix.values[i][j];
            series.colors.push(color::correlation_color(r).to_string());
            series.push(format!("{a} vs {b}"), r);
        }
    }
    series
}

/// One row of the raw-value intensity grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityRow {
    pub column: String,
    /// Leading numeric values of the column.
    pub values: Vec<f64>,
    /// `(v - min) / range` per value, range taken over the whole column.
    pub intensities: Vec<f64>,
    pub colors: Vec<String>,
}

/// Per-column min-max normalised view of the first `heatmap_sample`
/// numeric values. Columns are normalised independently; columns without
/// numeric values are skipped.
pub fn intensity_grid(dataset: &Dataset, columns: &[String], config: &AggregationConfig) -> Result<Vec<IntensityRow>> {
    let mut grid = Vec::new();
    for column in columns {
        let all = dataset.numeric_values(column)?;
        if all.is_empty() {
            continue;
        }
        let min = all.iter().copied().fold(f64::INFINITY, f64::min);
        let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min > 0.0 { max - min } else { 1.0 };

        let values: Vec<f64> = all.into_iter().take(config.heatmap_sample).collect();
        let intensities: Vec<f64> = values.iter().map(|v| (v - min) / range).collect();
        let colors = intensities.iter().map(|&t| color::intensity_color(t)).collect();

        grid.push(IntensityRow {
            column: column.clone(),
            values,
            intensities,
            colors,
        });
    }
    Ok(grid)
}

// ── Scatter ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    /// `"x vs y"`.
    pub label: String,
    pub points: Vec<ScatterPoint>,
}

/// Points for rows where `x`, `y` and `z` (defaulting to `y`) are all numeric.
pub fn scatter(dataset: &Dataset, x: &str, y: &str, z: Option<&str>) -> Result<Scatter> {
    let z = z.unwrap_or(y);
    for col in [x, y, z] {
        dataset.require_column(col)?;
    }

    let points = dataset
        .rows
        .iter()
        .filter_map(|row| {
            Some(ScatterPoint {
                x: row.get(x).as_f64()?,
                y: row.get(y).as_f64()?,
                z: row.get(z).as_f64()?,
            })
        })
        .collect();

    Ok(Scatter {
        label: format!("{x} vs {y}"),
        points,
    })
}
