//! Data layer: core types, loading, and table filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (cells tagged Number/Text/Missing)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Row>, ordered column list
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  search / paginate / column selection → row indices
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;
