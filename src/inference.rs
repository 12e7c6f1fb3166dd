use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive kind of a column, decided from a single sampled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datatype {
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "string")]
    String,
}

impl Datatype {
    pub fn is_numeric(self) -> bool {
        !matches!(self, Datatype::String)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datatype::Int64 => f.write_str("int64"),
            Datatype::Float64 => f.write_str("float64"),
            Datatype::String => f.write_str("string"),
        }
    }
}

/// Classifies one raw cell. The cell is not trimmed: `" 25"` is a string.
pub fn infer_datatype(sample: &str) -> Datatype {
    if sample.parse::<f64>().is_err() {
        Datatype::String
    } else if sample.parse::<i64>().is_ok() {
        Datatype::Int64
    } else {
        Datatype::Float64
    }
}

/// Infers every column's kind from the first data row alone.
///
/// No other row is consulted, so a blank or atypical sample row decides the
/// kind of its whole column. Cells of a numeric column that later fail to
/// parse are counted as invalid by the statistics builder.
pub fn infer_datatypes(sample_row: &[String]) -> Vec<Datatype> {
    sample_row
        .iter()
        .map(|cell| infer_datatype(cell))
        .collect()
}
