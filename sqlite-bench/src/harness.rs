//! The measured entry sequences of the variant binaries.
//!
//! Every variant stamps a start tag, does its work, and records the elapsed
//! time under an end tag. Database variants run one [`Workload`] against a
//! single connection in between.

use crate::analysis::{self, FixtureAnalysis};
use crate::fixtures::{self, FixtureParams};
use crate::query::{run_battery, QueryOutcome};
use crate::schema::{configure_connection, open_database, TableLoad, Workload};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fmt;
use std::io;
use wabench_core::{ClockSource, Elapsed, HarnessConfig, Recorder, Timestamp};

/// Tags and optional steps of one database variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub name: &'static str,
    pub start_tag: &'static str,
    pub end_tag: &'static str,
    /// Compute and report fixture statistics before the database phase.
    pub analyze: bool,
    /// Tag under which the trigonometric checksum's duration is recorded.
    pub compute_tag: Option<&'static str>,
}

pub const COMPREHENSIVE: VariantSpec = VariantSpec {
    name: "comprehensive",
    start_tag: "main",
    end_tag: "duration",
    analyze: true,
    compute_tag: None,
};

pub const FEATURE_TOUR: VariantSpec = VariantSpec {
    name: "feature_tour",
    start_tag: "feature_main",
    end_tag: "feature_duration",
    analyze: false,
    compute_tag: Some("compute"),
};

pub const MINIMAL_INIT_TAG: &str = "minimal_wasm_init";
pub const MINIMAL_MAIN_TAG: &str = "minimal_main";
pub const MINIMAL_END_TAG: &str = "minimal_duration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    CreateTables,
    Populate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Configure => "configure",
            Phase::CreateTables => "create tables",
            Phase::Populate => "populate",
        })
    }
}

/// What happened on the connection.
#[derive(Debug, Default)]
pub struct WorkloadRun {
    pub loads: Vec<TableLoad>,
    pub outcomes: Vec<QueryOutcome>,
    /// Phases that failed, with the engine's message.
    pub failures: Vec<(Phase, String)>,
    /// Whether the query battery was skipped because its tables are missing.
    pub queries_skipped: bool,
}

impl WorkloadRun {
    pub fn failed_queries(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    pub fn total_rows(&self) -> usize {
        self.loads.iter().map(|l| l.rows).sum()
    }
}

/// Configure, create, populate and query.
///
/// A failed pragma is logged and the run continues. Without tables there is
/// nothing to populate or query, so a schema failure ends the run. A failed
/// load aborts the remaining loads but the battery still runs against
/// whatever was committed.
pub fn run_workload(
    conn: &Connection,
    workload: &dyn Workload,
    fixtures: &fixtures::Fixtures,
) -> WorkloadRun {
    let mut run = WorkloadRun::default();

    if let Err(err) = configure_connection(conn) {
        log::warn!("Connection configuration failed: {err:#}");
        run.failures.push((Phase::Configure, format!("{err:#}")));
    }

    if let Err(err) = workload.create_tables(conn) {
        log::error!("{err:#}");
        run.failures.push((Phase::CreateTables, format!("{err:#}")));
        run.queries_skipped = true;
        return run;
    }

    match workload.populate(conn, fixtures) {
        Ok(loads) => run.loads = loads,
        Err(err) => {
            log::error!("Data insertion error: {err:#}");
            run.failures.push((Phase::Populate, format!("{err:#}")));
        }
    }

    log::info!("Running {} queries...", workload.name());
    run.outcomes = run_battery(conn, workload.queries());
    run
}

/// Everything a database variant produced, for reporting.
#[derive(Debug)]
pub struct RunSummary {
    pub variant: VariantSpec,
    pub workload: &'static str,
    pub database: String,
    pub analysis: Option<FixtureAnalysis>,
    pub checksum: Option<f64>,
    pub run: WorkloadRun,
    pub started: Timestamp,
    pub elapsed: Elapsed,
}

/// Runs one database variant from start stamp to end record.
///
/// Fails only when the database cannot be opened or a measurement cannot be
/// written. On an open failure no end record is written.
pub fn run_variant<C: ClockSource>(
    recorder: &Recorder<C>,
    config: &HarnessConfig,
    workload: &dyn Workload,
    variant: &VariantSpec,
    params: &FixtureParams,
) -> Result<RunSummary> {
    let started = recorder.stamp(variant.start_tag)?;
    log::info!("Starting {} benchmark", variant.name);
    log::debug!("Measurement sink: {:?}", recorder.target());

    let fixtures = fixtures::generate(params, &workload.recipe());
    let analysis = variant.analyze.then(|| analysis::analyze(&fixtures));

    let checksum = match variant.compute_tag {
        Some(tag) => {
            let compute_start = recorder.now();
            let checksum = analysis::trig_checksum(&fixtures.constants);
            recorder.record_elapsed_since(tag, compute_start)?;
            Some(checksum)
        }
        None => None,
    };

    let conn = open_database(&config.database)
        .with_context(|| format!("Cannot open database '{}'", config.database))?;
    if config.is_in_memory() {
        log::info!("In-memory database opened");
    } else {
        log::info!("Database opened: {}", config.database);
    }

    let run = run_workload(&conn, workload, &fixtures);

    if let Err((_, err)) = conn.close() {
        log::warn!("Closing database failed: {err}");
    }

    let elapsed = recorder.record_elapsed_since(variant.end_tag, started)?;
    log::info!("{} finished in {elapsed} ms", variant.name);

    Ok(RunSummary {
        variant: *variant,
        workload: workload.name(),
        database: config.database.clone(),
        analysis,
        checksum,
        run,
        started,
        elapsed,
    })
}

/// The early-initialization record. Must be the first measurement a binary
/// emits.
pub fn early_init<C: ClockSource>(recorder: &Recorder<C>) -> io::Result<Timestamp> {
    recorder.stamp(MINIMAL_INIT_TAG)
}

/// The minimal entry sequence after early init: a main stamp and the time
/// spent between it and the end of `body`.
pub fn run_minimal<C: ClockSource>(
    recorder: &Recorder<C>,
    body: impl FnOnce(),
) -> io::Result<Elapsed> {
    let start = recorder.stamp(MINIMAL_MAIN_TAG)?;
    body();
    recorder.record_elapsed_since(MINIMAL_END_TAG, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixtures;
    use crate::query::QuerySpec;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;
    use wabench_core::ManualClock;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    struct BrokenSchema;

    impl Workload for BrokenSchema {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn recipe(&self) -> fixtures::FixtureRecipe {
            crate::schema::corpus::CorpusWorkload.recipe()
        }

        fn create_tables(&self, conn: &Connection) -> Result<()> {
            conn.execute_batch("CREATE TABLE t(x); CREATE TABLE t(x);")?;
            Ok(())
        }

        fn populate(&self, _conn: &Connection, _fixtures: &Fixtures) -> Result<Vec<TableLoad>> {
            unreachable!("populate runs after a failed schema")
        }

        fn queries(&self) -> &'static [QuerySpec] {
            &[]
        }
    }

    struct FailingLoad;

    impl Workload for FailingLoad {
        fn name(&self) -> &'static str {
            "failing-load"
        }

        fn recipe(&self) -> fixtures::FixtureRecipe {
            crate::schema::corpus::CorpusWorkload.recipe()
        }

        fn create_tables(&self, conn: &Connection) -> Result<()> {
            conn.execute_batch("CREATE TABLE t(x INTEGER NOT NULL);")?;
            Ok(())
        }

        fn populate(&self, conn: &Connection, _fixtures: &Fixtures) -> Result<Vec<TableLoad>> {
            conn.execute("INSERT INTO t VALUES (NULL)", [])?;
            Ok(vec![])
        }

        fn queries(&self) -> &'static [QuerySpec] {
            const Q: &[QuerySpec] = &[QuerySpec::all("count", "SELECT COUNT(*) FROM t")];
            Q
        }
    }

    fn empty_fixtures() -> Fixtures {
        Fixtures {
            dictionary: vec![],
            constants: vec![],
            primes: vec![],
            texts: vec![],
        }
    }

    #[test]
    fn schema_failure_skips_dependent_phases() {
        let conn = Connection::open_in_memory().unwrap();
        let run = run_workload(&conn, &BrokenSchema, &empty_fixtures());
        assert!(run.queries_skipped);
        assert!(run.outcomes.is_empty());
        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].0, Phase::CreateTables);
        assert!(run.failures[0].1.contains("already exists"));
    }

    #[test]
    fn load_failure_still_runs_queries() {
        let conn = Connection::open_in_memory().unwrap();
        let run = run_workload(&conn, &FailingLoad, &empty_fixtures());
        assert_eq!(run.failures[0].0, Phase::Populate);
        assert!(!run.queries_skipped);
        assert_eq!(run.outcomes.len(), 1);
        assert_eq!(run.failed_queries(), 0);
    }

    #[test]
    fn minimal_sequence_lines() {
        let buf = SharedBuf::default();
        let recorder = Recorder::with_writer(ManualClock::new(1_000), Box::new(buf.clone()));

        early_init(&recorder).unwrap();
        recorder.clock().advance(3);
        let elapsed = run_minimal(&recorder, || recorder.clock().advance(7)).unwrap();

        assert_eq!(elapsed.as_millis(), 7);
        assert_eq!(
            buf.text(),
            "minimal_wasm_init, timestamp, 1000\n\
             minimal_main, timestamp, 1003\n\
             minimal_duration, elapsed time, 7\n"
        );
    }

    #[test]
    fn open_failure_writes_no_end_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig {
            database: dir
                .path()
                .join("missing")
                .join("db.sqlite")
                .to_string_lossy()
                .into_owned(),
            ..HarnessConfig::default()
        };
        let buf = SharedBuf::default();
        let recorder = Recorder::with_writer(ManualClock::new(50), Box::new(buf.clone()));
        let params = FixtureParams {
            dictionary_words: 10,
            constants: 20,
            primes: 10,
            texts: 5,
        };

        let result = run_variant(
            &recorder,
            &config,
            &crate::schema::corpus::CorpusWorkload,
            &COMPREHENSIVE,
            &params,
        );

        assert!(result.is_err());
        assert_eq!(buf.text(), "main, timestamp, 50\n");
    }
}
