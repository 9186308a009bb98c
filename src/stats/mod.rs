//! Statistics layer: column kinds, summaries, and correlation.
//!
//! ```text
//!   column values ──▶ inference ──▶ summary ──▶ DatasetStatistics
//!                                      │
//!                  numeric columns ────┴──▶ correlation ──▶ CorrelationMatrix
//! ```

pub mod correlation;
pub mod inference;
pub mod summary;
pub mod tally;
