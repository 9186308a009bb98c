//! Engine configuration: aggregation limits, correlation pairing, report
//! layout and table paging. Every section has defaults, so a partial JSON
//! file (or none at all) is enough.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::stats::correlation::Pairing;

/// Limits and labels used by the chart aggregations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Pie slices kept before folding the rest into `other_label`.
    pub pie_top_n: usize,
    /// Bar/line groups kept after sorting by value.
    pub bar_top_n: usize,
    /// Equal-width histogram bins.
    pub histogram_bins: usize,
    /// Leading values per column in the intensity grid.
    pub heatmap_sample: usize,
    /// Group label for rows whose key is missing.
    pub missing_label: String,
    /// Label of the synthetic remainder slice.
    pub other_label: String,
    /// Optional cap on chart label length.
    pub label_max_chars: Option<usize>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            pie_top_n: 8,
            bar_top_n: 20,
            histogram_bins: 10,
            heatmap_sample: 20,
            missing_label: "Undefined".to_string(),
            other_label: "Other".to_string(),
            label_max_chars: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub pairing: Pairing,
}

/// Report layout switches. The richer and the minimal renderer differ only
/// in these flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Raw rows reproduced in the sample table.
    pub sample_rows: usize,
    /// Character cap per sample cell.
    pub cell_max_chars: usize,
    /// Character cap for chart labels inside the report.
    pub label_max_chars: usize,
    pub include_histogram: bool,
    pub include_scatter: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "DataViz Pro - Analysis Report".to_string(),
            sample_rows: 10,
            cell_max_chars: 30,
            label_max_chars: 15,
            include_histogram: false,
            include_scatter: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows_per_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { rows_per_page: 10 }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggregation: AggregationConfig,
    pub correlation: CorrelationConfig,
    pub report: ReportConfig,
    pub table: TableConfig,
}

impl EngineConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make an aggregation meaningless.
    pub fn validate(&self) -> std::result::Result<(), EngineError> {
        let checks = [
            (self.aggregation.pie_top_n, "aggregation.pie_top_n"),
            (self.aggregation.bar_top_n, "aggregation.bar_top_n"),
            (self.aggregation.histogram_bins, "aggregation.histogram_bins"),
            (self.table.rows_per_page, "table.rows_per_page"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("{name} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}
