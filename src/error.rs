use std::fmt;

use thiserror::Error;

/// Which side of a comparison a table or statistic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetRole {
    Reference,
    Current,
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetRole::Reference => f.write_str("reference"),
            DatasetRole::Current => f.write_str("current"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DriftError {
    #[error("The {dataset} dataset has no header row")]
    MissingHeader { dataset: DatasetRole },

    #[error("The {dataset} dataset contains no data rows")]
    EmptyDataset { dataset: DatasetRole },

    #[error("Row {row} of the {dataset} dataset has {found} field(s); header declares {expected}")]
    RaggedRow {
        dataset: DatasetRole,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' appears more than once in the {dataset} dataset header")]
    DuplicateColumn {
        dataset: DatasetRole,
        column: String,
    },

    #[error(
        "Current dataset columns {current:?} do not match reference columns {reference:?}"
    )]
    SchemaMismatch {
        reference: Vec<String>,
        current: Vec<String>,
    },

    #[error("Column '{column}' is missing from the current statistics")]
    MissingColumn { column: String },

    #[error("Stability index for column '{column}' is not a finite number")]
    NonFiniteIndex { column: String },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = DriftError> = std::result::Result<T, E>;
