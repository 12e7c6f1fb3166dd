//! In-memory tables handed to the engine.
//!
//! A [`Dataset`] is the validated form of the raw `Vec<Vec<String>>` records a
//! CSV reader produces: row 0 is the header, every following row is data and
//! must be exactly as wide as the header. Validation happens once, up front,
//! so nothing downstream has to re-check shapes or guard row-count
//! denominators.

use std::collections::HashSet;

use crate::error::{DatasetRole, DriftError, Result};

#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Splits `records` into header and data rows and validates the shape.
    ///
    /// Fails when the header is missing, when there are no data rows, or when
    /// any data row is wider or narrower than the header.
    pub fn from_records(role: DatasetRole, mut records: Vec<Vec<String>>) -> Result<Self> {
        if records.is_empty() {
            return Err(DriftError::MissingHeader { dataset: role });
        }
        let rows = records.split_off(1);
        let headers = records.pop().unwrap_or_default();
        if headers.is_empty() {
            return Err(DriftError::MissingHeader { dataset: role });
        }
        let mut seen = HashSet::with_capacity(headers.len());
        if let Some(duplicate) = headers.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(DriftError::DuplicateColumn {
                dataset: role,
                column: duplicate.clone(),
            });
        }
        if rows.is_empty() {
            return Err(DriftError::EmptyDataset { dataset: role });
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(DriftError::RaggedRow {
                dataset: role,
                row: idx + 1,
                expected: headers.len(),
                found: row.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows, header excluded. Never zero.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first data row: the sole sample used for type inference.
    pub fn sample_row(&self) -> &[String] {
        &self.rows[0]
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// Rejects a dataset whose header differs from `self` in width, names or order.
    pub fn ensure_same_schema(&self, other: &Dataset) -> Result<()> {
        if self.headers != other.headers {
            return Err(DriftError::SchemaMismatch {
                reference: self.headers.clone(),
                current: other.headers.clone(),
            });
        }
        Ok(())
    }
}
