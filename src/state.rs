use crate::chart::aggregate;
use crate::chart::{ChartKind, ChartSeries};
use crate::config::EngineConfig;
use crate::data::filter::{Page, paginate, search_rows, toggle_column};
use crate::data::model::Dataset;
use crate::error::Result;
use crate::report::{ReportDocument, build_report};
use crate::stats::inference::numeric_columns;
use crate::stats::summary::DatasetStatistics;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Dashboard state for one loaded file, independent of rendering.
///
/// Nothing derived is cached: statistics, charts and reports are recomputed
/// from the current dataset and selection on every call.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Human-readable name of the loaded source, e.g. the file name.
    pub dataset_name: Option<String>,

    /// Columns shown and analysed, in dataset order.
    pub selected_columns: Vec<String>,

    /// Preview table search term.
    pub search_term: String,

    /// 1-based preview table page.
    pub page: usize,

    pub config: EngineConfig,

    /// Status / error message for the caller to display.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            page: 1,
            ..Self::default()
        }
    }

    /// Replace the dataset; selection, search and paging start over.
    pub fn set_dataset(&mut self, dataset: Dataset, name: Option<String>) {
        log::info!(
            "session dataset replaced: {} rows, {} columns",
            dataset.len(),
            dataset.columns.len()
        );
        self.selected_columns = dataset.columns.clone();
        self.dataset = Some(dataset);
        self.dataset_name = name;
        self.search_term.clear();
        self.page = 1;
        self.status_message = None;
    }

    /// Drop the dataset and everything derived from it.
    pub fn clear(&mut self) {
        let config = std::mem::take(&mut self.config);
        *self = Self::new(config);
    }

    /// Toggle a column in the selection. The last selected column stays.
    pub fn toggle_column(&mut self, column: &str) -> bool {
        if self.dataset.as_ref().is_some_and(|ds| !ds.has_column(column)) {
            log::warn!("ignoring toggle of unknown column '{column}'");
            return false;
        }
        let changed = toggle_column(&mut self.selected_columns, column);
        if let Some(ds) = &self.dataset {
            // Keep dataset order regardless of toggle order.
            let selected = std::mem::take(&mut self.selected_columns);
            self.selected_columns = ds
                .columns
                .iter()
                .filter(|c| selected.contains(c))
                .cloned()
                .collect();
        }
        changed
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Indices of rows matching the search term.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.dataset
            .as_ref()
            .map(|ds| search_rows(ds, &self.search_term))
            .unwrap_or_default()
    }

    /// Current page of the filtered preview table.
    pub fn current_page(&self) -> Page {
        paginate(&self.visible_rows(), self.page, self.config.table.rows_per_page)
    }

    pub fn statistics(&self) -> Result<Option<DatasetStatistics>> {
        self.dataset
            .as_ref()
            .map(|ds| DatasetStatistics::compute(ds, &self.selected_columns))
            .transpose()
    }

    pub fn report(&self) -> Result<Option<ReportDocument>> {
        let Some(ds) = &self.dataset else {
            return Ok(None);
        };
        let mut doc = build_report(ds, &self.selected_columns, &self.config)?;
        doc.dataset_name = self.dataset_name.clone();
        Ok(Some(doc))
    }

    /// Series for one interactive chart over the current selection:
    /// first selected column as key, first numeric selected column as value.
    ///
    /// Returns an empty list when the chart's precondition is not met.
    pub fn chart(&self, kind: ChartKind) -> Result<Vec<ChartSeries>> {
        let Some(ds) = &self.dataset else {
            return Ok(Vec::new());
        };
        let agg = &self.config.aggregation;
        let numeric = numeric_columns(ds, &self.selected_columns)?;
        let key = self.selected_columns.first();

        let series = match kind {
            ChartKind::Bar | ChartKind::Line => match (key, numeric.first()) {
                (Some(x), Some(y)) => vec![aggregate::mean_by_group(ds, x, y, agg)?],
                _ => Vec::new(),
            },
            ChartKind::Pie => match key {
                Some(x) if !ds.is_empty() => vec![aggregate::category_counts(ds, x, agg)?],
                _ => Vec::new(),
            },
            ChartKind::Histogram => match numeric.first() {
                Some(col) => vec![aggregate::histogram(ds, col, agg)?.to_series()],
                None => Vec::new(),
            },
            ChartKind::Boxplot => {
                let mut out = Vec::new();
                for col in &numeric {
                    if let Some(b) = aggregate::boxplot(ds, col)? {
                        out.push(b.to_series());
                    }
                }
                out
            }
            ChartKind::Heatmap => aggregate::correlation_heatmap(ds, &numeric, self.config.correlation.pairing)?
                .series()
                .cloned()
                .into_iter()
                .collect(),
            ChartKind::Scatter => match numeric.as_slice() {
                [x, y, ..] => {
                    let scatter = aggregate::scatter(ds, x, y, None)?;
                    let mut s = ChartSeries::new(scatter.label);
                    for p in scatter.points {
                        s.push(p.x.to_string(), p.y);
                    }
                    vec![s]
                }
                _ => Vec::new(),
            },
        };
        Ok(series.into_iter().filter(|s| !s.is_empty()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn loaded() -> Session {
        let rows = (0..25)
            .map(|i| {
                Row::new()
                    .with("city", if i % 2 == 0 { "Oslo" } else { "Lima" })
                    .with("temp", i as f64)
                    .with("rain", (i * 3 % 7) as f64)
            })
            .collect();
        let ds = Dataset::new(vec!["city".into(), "temp".into(), "rain".into()], rows).unwrap();
        let mut s = Session::new(EngineConfig::default());
        s.set_dataset(ds, Some("weather.csv".into()));
        s
    }

    #[test]
    fn empty_session() {
        let s = Session::new(EngineConfig::default());
        assert!(s.visible_rows().is_empty());
        assert_eq!(s.current_page().total, 0);
        assert!(s.statistics().unwrap().is_none());
        assert!(s.report().unwrap().is_none());
        assert!(s.chart(ChartKind::Bar).unwrap().is_empty());
    }

    #[test]
    fn set_dataset_resets_derived_state() {
        let mut s = loaded();
        s.set_search("oslo");
        s.set_page(2);
        s.toggle_column("rain");
        let ds = s.dataset.clone().unwrap();
        s.set_dataset(ds, None);
        assert_eq!(s.page, 1);
        assert!(s.search_term.is_empty());
        assert_eq!(s.selected_columns, vec!["city", "temp", "rain"]);
    }

    #[test]
    fn search_and_paging() {
        let mut s = loaded();
        assert_eq!(s.current_page().total_pages, 3);
        s.set_page(3);
        assert_eq!(s.current_page().rows.len(), 5);
        s.set_search("LIMA");
        assert_eq!(s.page, 1);
        assert_eq!(s.visible_rows().len(), 12);
        assert_eq!(s.current_page().caption(), "Showing 1 to 10 of 12 rows");
    }

    #[test]
    fn toggling_keeps_dataset_order() {
        let mut s = loaded();
        assert!(s.toggle_column("city"));
        assert!(s.toggle_column("city"));
        assert_eq!(s.selected_columns, vec!["city", "temp", "rain"]);
    }

    #[test]
    fn charts_follow_selection() {
        let mut s = loaded();
        let bar = s.chart(ChartKind::Bar).unwrap();
        // Equal means; first-seen key stays first.
        assert_eq!(bar[0].labels, vec!["Oslo", "Lima"]);
        assert_eq!(s.chart(ChartKind::Heatmap).unwrap().len(), 1);

        s.toggle_column("rain");
        assert!(s.chart(ChartKind::Heatmap).unwrap().is_empty());
        assert_eq!(s.chart(ChartKind::Boxplot).unwrap().len(), 1);
        assert!(s.chart(ChartKind::Scatter).unwrap().is_empty());
    }

    #[test]
    fn report_carries_name() {
        let s = loaded();
        let doc = s.report().unwrap().unwrap();
        assert_eq!(doc.dataset_name.as_deref(), Some("weather.csv"));
        assert_eq!(s.statistics().unwrap().unwrap().total_rows, 25);
    }

    #[test]
    fn clear_keeps_config() {
        let mut s = loaded();
        s.config.table.rows_per_page = 5;
        s.clear();
        assert!(s.dataset.is_none());
        assert_eq!(s.config.table.rows_per_page, 5);
        assert_eq!(s.page, 1);
    }
}
