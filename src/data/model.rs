use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of a row
// ---------------------------------------------------------------------------

/// A tagged cell value, decided once at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

static MISSING: CellValue = CellValue::Missing;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", normalize_zero(*v)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl CellValue {
    /// Coerce a raw text cell: blank → `Missing`, parsable → `Number`, else `Text`.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Absent cells and empty strings both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Interpret the value as a finite number, if it is one.
    ///
    /// Text cells are parsed as well, so a value the ingestion step left as
    /// text (e.g. `" 12 "`) still feeds numeric reductions.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Missing, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the dataset
// ---------------------------------------------------------------------------

/// A single record: column name → value. Keys may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style insert, handy for literals and tests.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// The value for `column`; absent keys read as [`CellValue::Missing`].
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    /// Present (non-missing) cell values, in key order.
    pub fn present_values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.values().filter(|v| !v.is_missing())
    }
}

// ---------------------------------------------------------------------------
// Dataset – rows plus ordered column list
// ---------------------------------------------------------------------------

/// The loaded table. The engine only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    /// All rows, in input order.
    pub rows: Vec<Row>,
    /// Column names in first-seen order, unique.
    pub columns: Vec<String>,
}

impl Dataset {
    /// Build a dataset with an explicit column order (e.g. a CSV header).
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(EngineError::DuplicateColumn { name: col.clone() });
            }
        }
        Ok(Self { rows, columns })
    }

    /// Build a dataset from ordered records; columns are collected in
    /// first-seen order across all records.
    pub fn from_records<K, V>(records: Vec<Vec<(K, V)>>) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let mut row = Row::new();
            for (key, value) in record {
                let key = key.into();
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
                row.insert(key, value);
            }
            rows.push(row);
        }

        Self { rows, columns }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fail fast when `name` is not a column of this dataset.
    pub fn require_column(&self, name: &str) -> Result<()> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(EngineError::ColumnNotFound {
                name: name.to_string(),
            })
        }
    }

    /// All values of one column, one per row (missing entries included).
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>> {
        self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row.get(name)).collect())
    }

    /// Finite numeric values of one column, in row order.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(name).as_f64())
            .collect())
    }

    /// Resolve a column selection; an empty selection means every column.
    pub fn resolve_selection(&self, selected: &[String]) -> Result<Vec<String>> {
        if selected.is_empty() {
            return Ok(self.columns.clone());
        }
        for col in selected {
            self.require_column(col)?;
        }
        Ok(selected.to_vec())
    }
}
