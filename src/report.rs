use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::ColumnStatistics;

/// Column name → statistics for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetStatistics {
    columns: BTreeMap<String, ColumnStatistics>,
}

impl DatasetStatistics {
    pub fn insert(&mut self, column: ColumnStatistics) {
        self.columns.insert(column.name.clone(), column);
    }

    pub fn get(&self, name: &str) -> Option<&ColumnStatistics> {
        self.columns.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStatistics)> {
        self.columns
            .iter()
            .map(|(name, column)| (name.as_str(), column))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnStatistics> for DatasetStatistics {
    fn from_iter<I: IntoIterator<Item = ColumnStatistics>>(iter: I) -> Self {
        let mut stats = DatasetStatistics::default();
        for column in iter {
            stats.insert(column);
        }
        stats
    }
}

/// Column name → PSI, for scored columns only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StabilityReport {
    values: BTreeMap<String, f64>,
}

impl StabilityReport {
    pub fn insert(&mut self, column: String, psi: f64) {
        self.values.insert(column, psi);
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, psi)| (name.as_str(), *psi))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    pub original_data: DatasetStatistics,
    pub current_data: DatasetStatistics,
    pub stability_index_values: StabilityReport,
}

pub fn assemble(
    original_data: DatasetStatistics,
    current_data: DatasetStatistics,
    stability_index_values: StabilityReport,
) -> Report {
    Report {
        original_data,
        current_data,
        stability_index_values,
    }
}
