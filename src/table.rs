use std::fmt::Write as _;

use crate::{
    column::{ColumnStatistics, DistType},
    report::{DatasetStatistics, Report},
    stability::DriftBand,
};

/// Renders left-aligned columns separated by two spaces, with a dashed rule
/// under the header. Line breaks and tabs inside cells are flattened.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count().max(3))
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_line(headers, &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_line(&rule, &widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_line(row, &widths));
    }
    output
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let flat = cell.replace(['\n', '\r', '\t'], " ");
            format!("{flat:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.4}"),
        None => String::new(),
    }
}

fn classification(column: &ColumnStatistics) -> String {
    let dist = match column.dist_type {
        DistType::Unique => "unique",
        DistType::NonUnique => "non-unique",
    };
    format!("{:?}/{dist}", column.variable_type).to_ascii_lowercase()
}

/// One row per reference column; unscored columns show an empty PSI.
pub fn stability_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .original_data
        .iter()
        .map(|(name, column)| {
            let (psi, band) = match report.stability_index_values.get(name) {
                Some(psi) => (format!("{psi:.6}"), DriftBand::from_index(psi).label()),
                None => (String::new(), "not scored"),
            };
            vec![
                name.to_string(),
                column.datatype.to_string(),
                classification(column),
                psi,
                band.to_string(),
            ]
        })
        .collect()
}

pub fn stability_headers() -> Vec<String> {
    ["column", "datatype", "class", "psi", "drift"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

pub fn profile_rows(stats: &DatasetStatistics) -> Vec<Vec<String>> {
    stats
        .iter()
        .map(|(name, column)| {
            vec![
                name.to_string(),
                column.datatype.to_string(),
                classification(column),
                column.unique_items_count.to_string(),
                column.missing_data_count.to_string(),
                format_metric(column.mean),
                format_metric(column.median),
                format_metric(column.std_dev),
            ]
        })
        .collect()
}

pub fn profile_headers() -> Vec<String> {
    [
        "column", "datatype", "class", "unique", "missing", "mean", "median", "std_dev",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect()
}
