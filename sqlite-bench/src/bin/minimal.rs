//! Startup-latency probe: no work between its measurements.
//!
//! Emits `minimal_wasm_init` as its very first measurement, then
//! `minimal_main` and `minimal_duration`.

use std::process;
use wabench_core::{HarnessConfig, Recorder};
use wabench_sqlite::harness::{early_init, run_minimal};

fn main() {
    let config = HarnessConfig::from_env();
    let recorder = Recorder::new(config.sink.clone());

    // Nothing measurable may run before this record. The logger is not up
    // yet, so a sink fallback warning here goes straight to stderr.
    if let Err(e) = early_init(&recorder) {
        eprintln!("Failed to write measurement: {e}");
        process::exit(1);
    }
    println!("MINIMAL: runtime initialized");

    wabench_core::initialize_logger(config.log_level, config.log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {}. Exiting.", e);
            process::exit(1);
        },
    );

    let result = run_minimal(&recorder, || {
        println!("MINIMAL: main() function entered");
        println!("Minimal test completed successfully");
    });

    if let Err(e) = result {
        log::error!("Failed to write measurement: {e}");
        process::exit(1);
    }
}
