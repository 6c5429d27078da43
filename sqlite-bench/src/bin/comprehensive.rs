//! Corpus variant: fixture analysis, then the dictionary / constants / primes
//! / texts workload with full-text indexes.
//!
//! Records `main` at entry and `duration` at exit.

use std::process;
use wabench_core::{HarnessConfig, Recorder};
use wabench_sqlite::fixtures::FixtureParams;
use wabench_sqlite::harness::{run_variant, COMPREHENSIVE};
use wabench_sqlite::report::print_report;
use wabench_sqlite::schema::corpus::CorpusWorkload;

fn main() {
    let config = HarnessConfig::from_env();
    wabench_core::initialize_logger(config.log_level, config.log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {}. Exiting.", e);
            process::exit(1);
        },
    );

    let recorder = Recorder::new(config.sink.clone());
    let workload = CorpusWorkload::new();

    match run_variant(
        &recorder,
        &config,
        &workload,
        &COMPREHENSIVE,
        &FixtureParams::standard(),
    ) {
        Ok(summary) => print_report(&summary),
        Err(e) => {
            log::error!("{e:#}");
            process::exit(1);
        }
    }
}
