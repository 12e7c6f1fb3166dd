use anyhow::{Context, Result};
use log::info;

use crate::{cli::ProfileArgs, compare_cmd::load_config, engine, io_utils, table};

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.include_zeros {
        config.exclude_zero_from_buckets = false;
    }

    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    info!("Profiling '{}'", args.input.display());
    let records = io_utils::read_table(&args.input, delimiter, encoding)?;

    let stats = engine::profile(records, &config)
        .with_context(|| format!("Profiling {:?}", args.input))?;

    io_utils::write_document(&stats, args.format, args.output.as_deref())
        .with_context(|| match &args.output {
            Some(path) => format!("Writing statistics to {path:?}"),
            None => "Writing statistics to stdout".to_string(),
        })?;

    if args.table {
        eprint!(
            "{}",
            table::render_table(&table::profile_headers(), &table::profile_rows(&stats))
        );
    }
    Ok(())
}
