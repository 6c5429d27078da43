//! Combine measurement files from several architectures into one CSV.
//!
//! Usage:
//!   combine_results                       # amd64, arm64, riscv64 defaults
//!   combine_results amd64=a.log arm64=b.log

use std::env;
use std::path::Path;
use std::process;
use wabench_core::HarnessConfig;
use wabench_sqlite::results::{combine_into, default_inputs, ArchitectureInput};

fn main() {
    let config = HarnessConfig::from_env();
    wabench_core::initialize_logger(config.log_level, config.log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {}. Exiting.", e);
            process::exit(1);
        },
    );

    let args: Vec<String> = env::args().skip(1).collect();
    let inputs = if args.is_empty() {
        default_inputs()
    } else {
        match args
            .iter()
            .map(|a| a.parse::<ArchitectureInput>())
            .collect::<anyhow::Result<Vec<_>>>()
        {
            Ok(inputs) => inputs,
            Err(e) => {
                log::error!("{e}");
                process::exit(2);
            }
        }
    };

    println!("Multi-Architecture Timing Results Combiner");
    println!("{}", "=".repeat(50));

    let (output, combined) = match combine_into(Path::new("."), &inputs) {
        Ok(result) => result,
        Err(e) => {
            log::error!("{e:#}");
            let expected: Vec<String> = inputs.iter().map(|i| i.path.display().to_string()).collect();
            eprintln!("Expected files: {}", expected.join(", "));
            process::exit(1);
        }
    };

    println!("Combined results saved to: {}", output.display());
    println!("Total measurements: {}", combined.records.len());
    println!("\nMeasurements per architecture:");
    for (arch, count) in combined.counts() {
        println!("  {arch}: {count}");
    }
    for missing in &combined.missing {
        println!("Not found: {}", missing.display());
    }
}
