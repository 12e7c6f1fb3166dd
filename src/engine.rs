//! Entry points tying the passes together.
//!
//! ```text
//! reference rows ──► infer datatypes (row 1) ──► reference pass ──┐
//!                                                                 ├─► current pass ──► PSI ──► Report
//! current rows   ──► prepare columns (parse, sort, count) ────────┘
//! ```
//!
//! The only value crossing from the reference side to the current side is the
//! finished reference [`DatasetStatistics`], passed by shared reference. Under
//! [`ExecutionMode::ForkJoin`] the two left-hand branches run as a
//! `rayon::join` pair; the current pass starts after the join, once every
//! reference threshold exists.

use log::{debug, info};

use crate::{
    column::{ColumnStatsBuilder, Pass, PreparedColumn},
    config::{EngineConfig, ExecutionMode},
    dataset::Dataset,
    error::{DatasetRole, DriftError, Result},
    inference::{Datatype, infer_datatypes},
    report::{self, DatasetStatistics, Report},
    stability::StabilityIndexCalculator,
};

/// Compares a reference table with a current table. Row 0 of each is the header.
pub fn compare(
    reference: Vec<Vec<String>>,
    current: Vec<Vec<String>>,
    config: &EngineConfig,
) -> Result<Report> {
    config.validate()?;
    let reference = Dataset::from_records(DatasetRole::Reference, reference)?;
    let current = Dataset::from_records(DatasetRole::Current, current)?;
    compare_datasets(&reference, &current, config)
}

pub fn compare_datasets(
    reference: &Dataset,
    current: &Dataset,
    config: &EngineConfig,
) -> Result<Report> {
    config.validate()?;
    reference.ensure_same_schema(current)?;

    let datatypes = infer_datatypes(reference.sample_row());
    let builder = ColumnStatsBuilder::new(config);

    let (original_data, prepared_current) = match config.execution {
        ExecutionMode::Sequential => (
            reference_pass(&builder, reference, &datatypes),
            prepare_columns(current, &datatypes),
        ),
        ExecutionMode::ForkJoin => rayon::join(
            || reference_pass(&builder, reference, &datatypes),
            || prepare_columns(current, &datatypes),
        ),
    };
    let current_data = current_pass(&builder, prepared_current, &original_data)?;

    let stability_index_values =
        StabilityIndexCalculator::new(config.zero_share).compute(&original_data, &current_data)?;
    info!(
        "Scored {} of {} column(s) across {} reference and {} current row(s)",
        stability_index_values.len(),
        original_data.len(),
        reference.row_count(),
        current.row_count()
    );
    Ok(report::assemble(
        original_data,
        current_data,
        stability_index_values,
    ))
}

/// Reference-pass statistics for a single table.
pub fn profile(records: Vec<Vec<String>>, config: &EngineConfig) -> Result<DatasetStatistics> {
    config.validate()?;
    let dataset = Dataset::from_records(DatasetRole::Reference, records)?;
    let datatypes = infer_datatypes(dataset.sample_row());
    let builder = ColumnStatsBuilder::new(config);
    let stats = reference_pass(&builder, &dataset, &datatypes);
    info!(
        "Profiled {} column(s) across {} row(s)",
        stats.len(),
        dataset.row_count()
    );
    Ok(stats)
}

fn prepare_columns(dataset: &Dataset, datatypes: &[Datatype]) -> Vec<PreparedColumn> {
    dataset
        .headers()
        .iter()
        .zip(datatypes)
        .enumerate()
        .map(|(idx, (name, datatype))| {
            PreparedColumn::prepare(name, *datatype, dataset.column_values(idx))
        })
        .collect()
}

fn reference_pass(
    builder: &ColumnStatsBuilder<'_>,
    dataset: &Dataset,
    datatypes: &[Datatype],
) -> DatasetStatistics {
    prepare_columns(dataset, datatypes)
        .into_iter()
        .map(|column| {
            let stats = builder.build(column, Pass::Reference);
            debug!(
                "Reference column '{}': {} {:?}/{:?}, {} unique, {} missing",
                stats.name,
                stats.datatype,
                stats.variable_type,
                stats.dist_type,
                stats.unique_items_count,
                stats.missing_data_count
            );
            stats
        })
        .collect()
}

fn current_pass(
    builder: &ColumnStatsBuilder<'_>,
    prepared: Vec<PreparedColumn>,
    reference: &DatasetStatistics,
) -> Result<DatasetStatistics> {
    prepared
        .into_iter()
        .map(|column| {
            let reference_column =
                reference
                    .get(column.name())
                    .ok_or_else(|| DriftError::MissingColumn {
                        column: column.name().to_string(),
                    })?;
            Ok(builder.build(column, Pass::Current(reference_column)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{DistType, VariableType};

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn current_classification_follows_reference() {
        let reference = table(&[&["code"], &["a"], &["a"], &["b"], &["b"]]);
        // Every current value is distinct; on its own this would be identifier-like.
        let current = table(&[&["code"], &["w"], &["x"], &["y"], &["z"]]);
        let report = compare(reference, current, &EngineConfig::default()).expect("compare");
        let code = report.current_data.get("code").expect("current column");
        assert_eq!(code.variable_type, VariableType::Categorical);
        assert_eq!(code.dist_type, DistType::NonUnique);
        assert!(report.stability_index_values.contains("code"));
    }

    #[test]
    fn current_columns_keep_reference_datatypes() {
        let reference = table(&[&["v"], &["1"], &["2"], &["2"]]);
        let current = table(&[&["v"], &["x"], &["2"], &["2"]]);
        let report = compare(reference, current, &EngineConfig::default()).expect("compare");
        let column = report.current_data.get("v").expect("current column");
        assert_eq!(column.datatype, Datatype::Int64);
        assert_eq!(column.invalid_data_count, 1);
        assert_eq!(column.missing_data_count, 1);
    }

    #[test]
    fn invalid_config_is_rejected_before_any_work() {
        let config = EngineConfig {
            continuous_unique_ratio: 0.0,
            ..EngineConfig::default()
        };
        let rows = table(&[&["a"], &["1"]]);
        assert!(matches!(
            compare(rows.clone(), rows, &config),
            Err(DriftError::InvalidConfig(_))
        ));
    }

    #[test]
    fn profile_classifies_a_single_table() {
        let rows = table(&[&["id", "kind"], &["1", "x"], &["2", "x"], &["3", "y"]]);
        let stats = profile(rows, &EngineConfig::default()).expect("profile");
        assert_eq!(stats.get("id").unwrap().dist_type, DistType::Unique);
        assert_eq!(stats.get("kind").unwrap().dist_type, DistType::NonUnique);
    }
}
