//! Feature variant: FTS5, R-Tree, JSON and generated columns on small tables.
//!
//! Records `feature_main` at entry, `compute` around the trigonometric
//! checksum, and `feature_duration` at exit.

use std::process;
use wabench_core::{HarnessConfig, Recorder};
use wabench_sqlite::fixtures::FixtureParams;
use wabench_sqlite::harness::{run_variant, FEATURE_TOUR};
use wabench_sqlite::report::print_report;
use wabench_sqlite::schema::features::FeatureWorkload;

fn main() {
    let config = HarnessConfig::from_env();
    wabench_core::initialize_logger(config.log_level, config.log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {}. Exiting.", e);
            process::exit(1);
        },
    );

    let recorder = Recorder::new(config.sink.clone());

    match run_variant(
        &recorder,
        &config,
        &FeatureWorkload::new(),
        &FEATURE_TOUR,
        &FixtureParams::standard(),
    ) {
        Ok(summary) => print_report(&summary),
        Err(e) => {
            log::error!("{e:#}");
            process::exit(1);
        }
    }
}
