//! Workload definitions and the common `Workload` trait.
//!
//! Two implementations are provided:
//! - [`corpus::CorpusWorkload`]: dictionary, constants, primes and a text
//!   corpus with external-content FTS5 indexes
//! - [`features::FeatureWorkload`]: a tour of FTS5, R-Tree, JSON and
//!   generated columns

pub mod corpus;
pub mod features;

use crate::fixtures::{FixtureRecipe, Fixtures};
use crate::query::QuerySpec;
use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use wabench_core::config::IN_MEMORY_DATABASE;

/// Row count loaded into one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLoad {
    pub table: &'static str,
    pub rows: usize,
}

/// A schema, how to fill it, and the queries to run against it.
///
/// Implementations use prepared statements and one transaction per table.
pub trait Workload {
    /// Human-readable name for reports.
    fn name(&self) -> &'static str;

    /// Which fixture generators this workload expects.
    fn recipe(&self) -> FixtureRecipe;

    /// Create all tables, indexes and virtual tables.
    fn create_tables(&self, conn: &Connection) -> Result<()>;

    /// Bulk-insert fixture data. Returns per-table row counts.
    fn populate(&self, conn: &Connection, fixtures: &Fixtures) -> Result<Vec<TableLoad>>;

    /// The fixed query battery.
    fn queries(&self) -> &'static [QuerySpec];
}

/// Opens `:memory:` or a database file.
pub fn open_database(location: &str) -> rusqlite::Result<Connection> {
    if location == IN_MEMORY_DATABASE {
        Connection::open_in_memory()
    } else {
        Connection::open_with_flags(
            location,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }
}

/// Configure a connection for bulk loading.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA synchronous = OFF;
         PRAGMA cache_size = -65536;
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n as usize)
}
