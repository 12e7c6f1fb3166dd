//! Per-column statistics.
//!
//! A column goes through two steps. [`PreparedColumn::prepare`] parses the
//! raw cells according to the column's [`Datatype`], sorts numeric values and
//! counts distinct values; it needs nothing from the other dataset and can run
//! in parallel with the reference pass. [`ColumnStatsBuilder::build`] then
//! classifies the column and derives the statistics. On the reference pass it
//! decides the classification and computes the quartile thresholds; on the
//! current pass it receives the reference column and reuses both verbatim.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    frequency::{self, FrequencyTable, ItemValue},
    inference::Datatype,
    quantile::{self, BUCKET_COUNT, Quartiles},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    Continuous,
    Discrete,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistType {
    /// Identifier-like; never scored.
    Unique,
    NonUnique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnStatistics {
    pub name: String,
    pub datatype: Datatype,
    pub variable_type: VariableType,
    pub dist_type: DistType,
    pub row_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
    #[serde(rename = "IQR", default, skip_serializing_if = "Option::is_none")]
    pub iqr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub unique_items_count: usize,
    pub unique_items: Vec<ItemValue>,
    pub unique_items_count_values: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantile_data_distribution: Option<[usize; BUCKET_COUNT]>,
    pub excluded_zero_count: usize,
    pub missing_data_count: usize,
    pub invalid_data_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_item_count_and_values: Option<BTreeMap<String, usize>>,
}

impl ColumnStatistics {
    fn new(
        name: String,
        datatype: Datatype,
        variable_type: VariableType,
        dist_type: DistType,
        row_count: usize,
    ) -> Self {
        Self {
            name,
            datatype,
            variable_type,
            dist_type,
            row_count,
            mean: None,
            median: None,
            q1: None,
            q3: None,
            iqr: None,
            std_dev: None,
            min: None,
            max: None,
            unique_items_count: 0,
            unique_items: Vec::new(),
            unique_items_count_values: Vec::new(),
            quantile_data_distribution: None,
            excluded_zero_count: 0,
            missing_data_count: 0,
            invalid_data_count: 0,
            unique_item_count_and_values: None,
        }
    }

    /// Bucketing thresholds, present on continuous non-unique columns.
    pub fn quartiles(&self) -> Option<Quartiles> {
        Some(Quartiles {
            q1: self.q1?,
            median: self.median?,
            q3: self.q3?,
        })
    }

    pub fn is_scored(&self) -> bool {
        self.dist_type == DistType::NonUnique
    }

    /// Rows that carried a usable value.
    pub fn observed_count(&self) -> usize {
        if self.datatype.is_numeric() {
            self.row_count - self.missing_data_count
        } else {
            self.row_count
        }
    }

    fn with_frequencies(mut self, table: FrequencyTable, keep_map: bool) -> Self {
        self.unique_items_count = table.unique_count();
        if keep_map {
            self.unique_item_count_and_values = Some(table.to_map());
        }
        let (items, counts) = table.into_parts();
        self.unique_items = items;
        self.unique_items_count_values = counts;
        self
    }
}

/// Which dataset a column belongs to. The current pass carries the matching
/// reference column so classification and thresholds are inherited.
#[derive(Debug, Clone, Copy)]
pub enum Pass<'a> {
    Reference,
    Current(&'a ColumnStatistics),
}

#[derive(Debug, Clone)]
pub struct NumericColumn {
    name: String,
    datatype: Datatype,
    row_count: usize,
    sorted: Vec<f64>,
    missing: usize,
    invalid: usize,
    frequencies: FrequencyTable,
}

#[derive(Debug, Clone)]
pub struct TextColumn {
    name: String,
    row_count: usize,
    missing: usize,
    frequencies: FrequencyTable,
}

/// A parsed, sorted and counted column, ready for classification.
#[derive(Debug, Clone)]
pub enum PreparedColumn {
    Numeric(NumericColumn),
    Text(TextColumn),
}

enum NumericCell {
    Value(f64),
    Blank,
    Invalid,
}

fn parse_numeric_cell(raw: &str) -> NumericCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumericCell::Blank;
    }
    match trimmed.parse::<f64>() {
        // `-0` folds into `0` so both spellings share one frequency key.
        Ok(value) if value == 0.0 => NumericCell::Value(0.0),
        Ok(value) if value.is_finite() => NumericCell::Value(value),
        _ => NumericCell::Invalid,
    }
}

impl PreparedColumn {
    pub fn prepare<'a, I>(name: &str, datatype: Datatype, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        if datatype.is_numeric() {
            let mut sorted = Vec::new();
            let mut missing = 0;
            let mut invalid = 0;
            let mut row_count = 0;
            for cell in cells {
                row_count += 1;
                match parse_numeric_cell(cell) {
                    NumericCell::Value(value) => sorted.push(value),
                    NumericCell::Blank => missing += 1,
                    NumericCell::Invalid => {
                        missing += 1;
                        invalid += 1;
                    }
                }
            }
            if invalid > 0 {
                warn!(
                    "Column '{name}' ({datatype}) has {invalid} unparsable value(s); treated as missing"
                );
            }
            sorted.sort_by(f64::total_cmp);
            let frequencies = frequency::count_numeric(&sorted);
            PreparedColumn::Numeric(NumericColumn {
                name: name.to_string(),
                datatype,
                row_count,
                sorted,
                missing,
                invalid,
                frequencies,
            })
        } else {
            let values = cells
                .into_iter()
                .map(|cell| if cell.trim().is_empty() { "" } else { cell })
                .collect::<Vec<_>>();
            let row_count = values.len();
            let (frequencies, missing) = frequency::count_strings(values);
            PreparedColumn::Text(TextColumn {
                name: name.to_string(),
                row_count,
                missing,
                frequencies,
            })
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PreparedColumn::Numeric(column) => &column.name,
            PreparedColumn::Text(column) => &column.name,
        }
    }
}

pub struct ColumnStatsBuilder<'c> {
    config: &'c EngineConfig,
}

impl<'c> ColumnStatsBuilder<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, column: PreparedColumn, pass: Pass<'_>) -> ColumnStatistics {
        match column {
            PreparedColumn::Numeric(column) => self.build_numeric(column, pass),
            PreparedColumn::Text(column) => self.build_text(column, pass),
        }
    }

    fn classify_numeric(&self, column: &NumericColumn) -> (VariableType, DistType) {
        let observed = column.sorted.len();
        let unique = column.frequencies.unique_count();
        if unique == observed {
            (VariableType::Continuous, DistType::Unique)
        } else if unique as f64 > self.config.continuous_unique_ratio * observed as f64 {
            (VariableType::Continuous, DistType::NonUnique)
        } else {
            (VariableType::Discrete, DistType::NonUnique)
        }
    }

    fn build_numeric(&self, column: NumericColumn, pass: Pass<'_>) -> ColumnStatistics {
        let (variable_type, dist_type) = match pass {
            Pass::Reference => self.classify_numeric(&column),
            Pass::Current(reference) => (reference.variable_type, reference.dist_type),
        };
        let mut stats = ColumnStatistics::new(
            column.name,
            column.datatype,
            variable_type,
            dist_type,
            column.row_count,
        );
        stats.missing_data_count = column.missing;
        stats.invalid_data_count = column.invalid;

        match (variable_type, dist_type) {
            (_, DistType::Unique) => {
                stats.unique_items_count = column.frequencies.unique_count();
            }
            (VariableType::Continuous, DistType::NonUnique) => {
                let thresholds = match pass {
                    Pass::Reference => Quartiles::from_sorted(&column.sorted),
                    Pass::Current(reference) => reference.quartiles(),
                };
                if let Some(quartiles) = thresholds {
                    let buckets = quantile::bucket_counts(
                        &column.sorted,
                        &quartiles,
                        self.config.exclude_zero_from_buckets,
                    );
                    stats.q1 = Some(quartiles.q1);
                    stats.median = Some(quartiles.median);
                    stats.q3 = Some(quartiles.q3);
                    stats.iqr = Some(quartiles.iqr());
                    stats.quantile_data_distribution = Some(buckets.counts);
                    stats.excluded_zero_count = buckets.excluded_zeros;
                }
                stats.mean = quantile::mean(&column.sorted);
                stats.std_dev = quantile::population_std_dev(&column.sorted);
                stats.min = quantile::type4_quantile(&column.sorted, 0.0);
                stats.max = quantile::type4_quantile(&column.sorted, 1.0);
                stats = stats.with_frequencies(column.frequencies, false);
            }
            (_, DistType::NonUnique) => {
                stats = stats.with_frequencies(column.frequencies, true);
            }
        }
        stats
    }

    fn build_text(&self, column: TextColumn, pass: Pass<'_>) -> ColumnStatistics {
        let dist_type = match pass {
            Pass::Reference => {
                let ratio = column.frequencies.unique_count() as f64 / column.row_count as f64;
                if ratio > self.config.categorical_unique_ratio {
                    DistType::Unique
                } else {
                    DistType::NonUnique
                }
            }
            Pass::Current(reference) => reference.dist_type,
        };
        let mut stats = ColumnStatistics::new(
            column.name,
            Datatype::String,
            VariableType::Categorical,
            dist_type,
            column.row_count,
        );
        stats.missing_data_count = column.missing;
        match dist_type {
            DistType::Unique => {
                stats.unique_items_count = column.frequencies.unique_count();
            }
            DistType::NonUnique => {
                stats = stats.with_frequencies(column.frequencies, true);
            }
        }
        stats
    }
}
