//! Report assembly: statistics and chart aggregations combined into one
//! ordered, renderer-agnostic document.
//!
//! Section order is fixed: summary metrics, column table, sample rows, one
//! block per available chart kind, narrative. Chart blocks whose
//! precondition is unmet are left out.

use serde::Serialize;

use crate::chart::aggregate::{self, Heatmap};
use crate::chart::{ChartKind, ChartSeries};
use crate::config::EngineConfig;
use crate::data::model::{CellValue, Dataset};
use crate::error::Result;
use crate::format::{fixed, group_thousands, humanize_column, truncate_chars};
use crate::stats::summary::{ColumnStatistics, ColumnSummary, DatasetStatistics};

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    /// Two-column metric/value table.
    KeyValue {
        title: String,
        rows: Vec<(String, String)>,
    },
    Table {
        title: String,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Chart {
        title: String,
        kind: ChartKind,
        series: Vec<ChartSeries>,
    },
    Narrative {
        title: String,
        paragraphs: Vec<String>,
    },
}

impl Section {
    pub fn title(&self) -> &str {
        match self {
            Section::KeyValue { title, .. }
            | Section::Table { title, .. }
            | Section::Chart { title, .. }
            | Section::Narrative { title, .. } => title,
        }
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        match self {
            Section::Chart { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub dataset_name: Option<String>,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    /// Chart kinds present, in document order.
    pub fn chart_kinds(&self) -> Vec<ChartKind> {
        self.sections.iter().filter_map(Section::chart_kind).collect()
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title() == title)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assemble the report for `selected` columns (empty means all).
pub fn build_report(dataset: &Dataset, selected: &[String], config: &EngineConfig) -> Result<ReportDocument> {
    let columns = dataset.resolve_selection(selected)?;
    let stats = DatasetStatistics::compute(dataset, &columns)?;

    let mut sections = vec![
        summary_section(&stats),
        column_section(&stats),
        sample_section(dataset, &columns, config),
    ];
    sections.extend(chart_sections(dataset, &columns, &stats, config)?);
    sections.push(narrative_section(&stats));

    log::info!(
        "built report: {} sections for {} rows x {} columns",
        sections.len(),
        stats.total_rows,
        stats.total_columns
    );

    Ok(ReportDocument {
        title: config.report.title.clone(),
        dataset_name: None,
        sections,
    })
}

fn summary_section(stats: &DatasetStatistics) -> Section {
    Section::KeyValue {
        title: "Summary Statistics".to_string(),
        rows: vec![
            ("Total Rows".to_string(), group_thousands(stats.total_rows)),
            ("Total Columns".to_string(), stats.total_columns.to_string()),
            ("Data Points".to_string(), group_thousands(stats.data_points)),
            ("Missing Values".to_string(), group_thousands(stats.total_missing)),
        ],
    }
}

/// One-line statistics text for the column table.
pub fn column_details(column: &ColumnStatistics) -> String {
    match &column.summary {
        ColumnSummary::Numeric(n) => format!(
            "Min: {}, Max: {}, Mean: {}, Median: {}, Mode: {}, Sum: {}",
            fixed(n.min, 2),
            fixed(n.max, 2),
            fixed(n.mean, 2),
            fixed(n.median, 2),
            CellValue::Number(n.mode),
            fixed(n.sum, 2)
        ),
        ColumnSummary::Categorical(c) => format!(
            "Unique: {}, Mode: {}",
            c.unique_count,
            c.most_common_value.as_deref().unwrap_or("-")
        ),
        ColumnSummary::NoData { .. } => "No data".to_string(),
    }
}

fn column_section(stats: &DatasetStatistics) -> Section {
    let rows = stats
        .columns
        .iter()
        .map(|c| {
            vec![
                humanize_column(&c.profile.name),
                c.profile.kind.label().to_string(),
                column_details(c),
                c.profile.missing_count.to_string(),
            ]
        })
        .collect();

    Section::Table {
        title: "Column Analysis".to_string(),
        header: ["Column", "Type", "Statistics", "Missing"]
            .map(String::from)
            .to_vec(),
        rows,
    }
}

fn sample_section(dataset: &Dataset, columns: &[String], config: &EngineConfig) -> Section {
    let report = &config.report;
    let rows = dataset
        .rows
        .iter()
        .take(report.sample_rows)
        .map(|row| {
            columns
                .iter()
                .map(|col| {
                    let cell = row.get(col);
                    if cell.is_missing() {
                        "-".to_string()
                    } else {
                        truncate_chars(&cell.to_string(), report.cell_max_chars)
                    }
                })
                .collect()
        })
        .collect();

    Section::Table {
        title: format!("Data Sample (First {} Rows)", report.sample_rows),
        header: columns.iter().map(|c| humanize_column(c)).collect(),
        rows,
    }
}

/// `label_max` of `None` keeps labels that were already shortened upstream.
fn chart_section(kind: ChartKind, series: Vec<ChartSeries>, label_max: Option<usize>) -> Option<Section> {
    let series: Vec<ChartSeries> = series
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(|mut s| {
            if let Some(max) = label_max {
                s.truncate_labels(max);
            }
            s
        })
        .collect();
    if series.is_empty() {
        log::debug!("{} skipped: nothing to plot", kind.title());
        return None;
    }
    Some(Section::Chart {
        title: kind.title().to_string(),
        kind,
        series,
    })
}

fn chart_sections(
    dataset: &Dataset,
    columns: &[String],
    stats: &DatasetStatistics,
    config: &EngineConfig,
) -> Result<Vec<Section>> {
    let agg = &config.aggregation;
    let label_max = Some(config.report.label_max_chars);
    let numeric = stats.numeric_columns();
    let mut sections = Vec::new();

    // Bar and line share one aggregation: first column by first numeric column.
    if let (Some(x), Some(y)) = (columns.first(), numeric.first()) {
        let series = aggregate::mean_by_group(dataset, x, y, agg)?;
        sections.extend(chart_section(ChartKind::Bar, vec![series.clone()], label_max));
        sections.extend(chart_section(ChartKind::Line, vec![series], label_max));
    }

    if let Some(x) = columns.first().filter(|_| !dataset.is_empty()) {
        let series = aggregate::category_counts(dataset, x, agg)?;
        sections.extend(chart_section(ChartKind::Pie, vec![series], label_max));
    }

    if let Heatmap::Correlation { matrix, .. } =
        aggregate::correlation_heatmap(dataset, &numeric, config.correlation.pairing)?
    {
        let series = aggregate::heatmap_series(&matrix, label_max);
        sections.extend(chart_section(ChartKind::Heatmap, vec![series], None));
    }

    let mut boxes = Vec::new();
    for col in &numeric {
        if let Some(b) = aggregate::boxplot(dataset, col)? {
            boxes.push(b.to_series());
        }
    }
    sections.extend(chart_section(ChartKind::Boxplot, boxes, label_max));

    if config.report.include_histogram {
        if let Some(col) = numeric.first() {
            let histogram = aggregate::histogram(dataset, col, agg)?;
            sections.extend(chart_section(ChartKind::Histogram, vec![histogram.to_series()], label_max));
        }
    }

    if config.report.include_scatter {
        if let [x, y, ..] = numeric.as_slice() {
            let scatter = aggregate::scatter(dataset, x, y, None)?;
            let mut xs = ChartSeries::new(scatter.label.clone());
            for (i, p) in scatter.points.iter().enumerate() {
                xs.push(format!("{}: {}", i + 1, CellValue::Number(p.x)), p.y);
            }
            sections.extend(chart_section(ChartKind::Scatter, vec![xs.with_primary_color()], label_max));
        }
    }

    Ok(sections)
}

fn narrative_section(stats: &DatasetStatistics) -> Section {
    let numeric = stats.numeric_columns().len();
    let paragraphs = vec![
        format!(
            "This dataset contains {} rows and {} columns, resulting in {} data points.",
            group_thousands(stats.total_rows),
            stats.total_columns,
            group_thousands(stats.data_points)
        ),
        format!(
            "There are {} numeric columns and {} categorical columns.",
            numeric,
            stats.total_columns - numeric
        ),
        format!(
            "Total missing values: {} ({}%).",
            stats.total_missing,
            fixed(stats.missing_pct, 1)
        ),
        "The analysis includes comprehensive statistics for each column, including min, max, \
         mean, median, mode, and sum for numeric data."
            .to_string(),
        "Visualizations have been generated to help understand the data distribution and \
         relationships."
            .to_string(),
    ];

    Section::Narrative {
        title: "Summary".to_string(),
        paragraphs,
    }
}
