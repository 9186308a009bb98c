use thiserror::Error;

/// Errors for invalid calls into the engine.
///
/// Data-shape problems (empty columns, unparsable cells, zero variance) are
/// never errors; they resolve to sentinel results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A column name was referenced that the dataset does not contain.
    #[error("column '{name}' not found in dataset")]
    ColumnNotFound { name: String },

    /// The same column name was declared twice.
    #[error("column '{name}' is declared more than once")]
    DuplicateColumn { name: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
