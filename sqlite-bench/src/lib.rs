//! Timestamped SQLite benchmark harness
//!
//! Each variant binary stamps the wall clock at entry, generates a fixed set
//! of synthetic fixtures, runs one workload against an embedded SQLite
//! database, and records the elapsed time on exit. Measurement lines go to
//! the sink named by `WABENCH_FILE` (stdout when unset).
//!
//! Workloads:
//! - **corpus**: flat tables for words, constants, primes and texts, with
//!   external-content FTS5 indexes
//! - **features**: FTS5, R-Tree, JSON and generated columns
//!
//! Run a variant: `cargo run --release --bin comprehensive`
//! Run benchmarks: `cargo bench`

pub mod analysis;
pub mod fixtures;
pub mod harness;
pub mod query;
pub mod report;
pub mod results;
pub mod schema;
