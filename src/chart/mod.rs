//! Chart layer: the shared series shape plus per-kind aggregations.
//!
//! Every renderer (bar, line, pie, histogram, boxplot, heatmap, scatter)
//! consumes a [`ChartSeries`]; kinds that need richer structure
//! (histogram bins, boxplot quartiles, scatter points) expose it alongside.

use serde::{Deserialize, Serialize};

use crate::color;

pub mod aggregate;

/// The chart kinds the engine prepares data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Histogram,
    Boxplot,
    Heatmap,
    Scatter,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Histogram => "Histogram",
            ChartKind::Boxplot => "Box Plot",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Scatter => "Scatter Plot",
        }
    }
}

/// Parallel label/value sequences plus a legend label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub dataset_label: String,
    /// One colour per point (pie, heatmap) or a single series colour.
    pub colors: Vec<String>,
}

impl ChartSeries {
    pub fn new(dataset_label: impl Into<String>) -> Self {
        Self {
            dataset_label: dataset_label.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Single primary colour for the whole series.
    pub fn with_primary_color(mut self) -> Self {
        self.colors = vec![color::PRIMARY.to_string()];
        self
    }

    /// Truncate each label to `max` characters (with `"..."`).
    pub fn truncate_labels(&mut self, max: usize) {
        for label in &mut self.labels {
            *label = crate::format::truncate_label(label, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_labels_and_values_parallel() {
        let mut s = ChartSeries::new("sales");
        s.push("north", 1.0);
        s.push("south", 2.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.labels, vec!["north", "south"]);
        assert_eq!(s.values, vec![1.0, 2.0]);
        assert_eq!(s.dataset_label, "sales");
    }

    #[test]
    fn label_truncation() {
        let mut s = ChartSeries::new("x");
        s.push("a very long category name", 1.0);
        s.truncate_labels(6);
        assert_eq!(s.labels[0], "a very...");
    }
}
