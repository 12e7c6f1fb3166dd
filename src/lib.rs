//! Drift monitoring for tabular machine-learning data.
//!
//! The engine compares a reference (training-time) table with a current
//! (scoring-time) table column by column. Each column is classified from the
//! reference data, described with elementary statistics, and scored with a
//! Population Stability Index. [`engine::compare`] is the library entry
//! point; [`run`] drives the `drift-monitor` binary.

pub mod cli;
pub mod column;
pub mod compare_cmd;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod inference;
pub mod io_utils;
pub mod profile_cmd;
pub mod quantile;
pub mod report;
pub mod stability;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::{
    config::EngineConfig,
    engine::{compare, profile},
    error::DriftError,
    report::Report,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("drift_monitor", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compare(args) => compare_cmd::execute(&args),
        Commands::Profile(args) => profile_cmd::execute(&args),
    }
}
