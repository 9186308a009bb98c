//! Statistical summarisation and chart-data aggregation for tabular data.
//!
//! A [`Dataset`](data::model::Dataset) is loaded once (CSV or JSON records),
//! then every derived view is computed on demand:
//!
//! * [`stats`]: column kinds, per-column summaries, correlation matrix
//! * [`chart::aggregate`]: bar/line means, pie counts, histogram bins,
//!   boxplot quartiles, heatmap grids, scatter points
//! * [`report`]: the ordered document model handed to a renderer
//!
//! [`state::Session`] ties a dataset to the current column selection,
//! search term and page.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod report;
pub mod state;
pub mod stats;
