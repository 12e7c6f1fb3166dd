use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::{
    cli::{CompareArgs, ZeroShareArg},
    config::{EngineConfig, ExecutionMode},
    engine, io_utils,
    stability::{DEFAULT_SMOOTHING_EPSILON, DriftBand, ZeroSharePolicy},
    table,
};

pub fn execute(args: &CompareArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    config.validate().context("Validating engine options")?;
    ensure_single_stdin(args)?;

    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let reference_delimiter = io_utils::resolve_input_delimiter(&args.reference, args.delimiter);
    let current_delimiter = io_utils::resolve_input_delimiter(&args.current, args.delimiter);

    info!(
        "Comparing '{}' (reference) with '{}' (current)",
        args.reference.display(),
        args.current.display()
    );
    let reference = io_utils::read_table(&args.reference, reference_delimiter, encoding)?;
    let current = io_utils::read_table(&args.current, current_delimiter, encoding)?;

    let report = engine::compare(reference, current, &config).with_context(|| {
        format!(
            "Computing drift between {:?} and {:?}",
            args.reference, args.current
        )
    })?;

    for (column, psi) in report.stability_index_values.iter() {
        if DriftBand::from_index(psi) == DriftBand::Significant {
            warn!("Column '{column}' shows significant drift (PSI {psi:.4})");
        }
    }

    io_utils::write_document(&report, args.format, args.output.as_deref())
        .with_context(|| match &args.output {
            Some(path) => format!("Writing report to {path:?}"),
            None => "Writing report to stdout".to_string(),
        })?;

    if args.table {
        eprint!(
            "{}",
            table::render_table(&table::stability_headers(), &table::stability_rows(&report))
        );
    }
    info!(
        "Computed stability index for {} column(s)",
        report.stability_index_values.len()
    );
    Ok(())
}

/// Stdin can feed one table only; the second read would see an empty stream.
fn ensure_single_stdin(args: &CompareArgs) -> Result<()> {
    if io_utils::is_dash(&args.reference) && io_utils::is_dash(&args.current) {
        bail!("--reference and --current cannot both read from stdin ('-')");
    }
    Ok(())
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn apply_overrides(config: &mut EngineConfig, args: &CompareArgs) {
    let current_epsilon = match config.zero_share {
        ZeroSharePolicy::Smooth { epsilon } => epsilon,
        ZeroSharePolicy::Skip => DEFAULT_SMOOTHING_EPSILON,
    };
    match (args.zero_share, args.epsilon) {
        (Some(ZeroShareArg::Skip), _) => config.zero_share = ZeroSharePolicy::Skip,
        (Some(ZeroShareArg::Smooth), epsilon) | (None, epsilon @ Some(_)) => {
            config.zero_share = ZeroSharePolicy::Smooth {
                epsilon: epsilon.unwrap_or(current_epsilon),
            }
        }
        (None, None) => {}
    }
    if args.include_zeros {
        config.exclude_zero_from_buckets = false;
    }
    if args.parallel {
        config.execution = ExecutionMode::ForkJoin;
    }
}
