//! The benchmark clock context.
//!
//! A [`Recorder`] is built once at harness startup and handed by reference to
//! every code path that emits measurements. It opens its sink lazily, on the
//! first emitted record, and keeps that handle for the rest of its life.
//!
//! `Recorder` is not thread-safe and is not `Sync`: it is meant to be driven
//! from the single harness thread.

use std::cell::{OnceCell, RefCell};
use std::io::{self, Write};

use crate::clock::{ClockError, ClockSource, Elapsed, SystemClock, Timestamp};
use crate::record::MeasurementRecord;
use crate::sink::SinkTarget;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error("failed to write measurement: {0}")]
    Io(#[from] io::Error),
}

pub struct Recorder<C: ClockSource = SystemClock> {
    clock: C,
    target: SinkTarget,
    sink: OnceCell<RefCell<Box<dyn Write>>>,
}

impl Recorder<SystemClock> {
    pub fn new(target: SinkTarget) -> Self {
        Self::with_clock(SystemClock, target)
    }
}

impl<C: ClockSource> Recorder<C> {
    pub fn with_clock(clock: C, target: SinkTarget) -> Self {
        Self {
            clock,
            target,
            sink: OnceCell::new(),
        }
    }

    /// A recorder whose sink is already resolved to `writer`.
    pub fn with_writer(clock: C, writer: Box<dyn Write>) -> Self {
        Self {
            clock,
            target: SinkTarget::Stdout,
            sink: OnceCell::from(RefCell::new(writer)),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn target(&self) -> &SinkTarget {
        &self.target
    }

    pub fn is_sink_open(&self) -> bool {
        self.sink.get().is_some()
    }

    pub fn try_now(&self) -> Result<Timestamp, ClockError> {
        self.clock.now_ms().map(Timestamp::from_millis)
    }

    /// Current wall-clock time. An unreadable clock terminates the process.
    pub fn now(&self) -> Timestamp {
        self.try_now().unwrap_or_else(|err| exit_on_clock_fault(&err))
    }

    pub fn elapsed_since(&self, start: Timestamp) -> Elapsed {
        self.now().since(start)
    }

    pub fn record_timestamp(&self, tag: &str, ts: Timestamp) -> io::Result<()> {
        self.emit(&MeasurementRecord::timestamp(tag, ts))
    }

    pub fn record_duration(&self, tag: &str, elapsed: Elapsed) -> io::Result<()> {
        self.emit(&MeasurementRecord::elapsed(tag, elapsed))
    }

    /// Reads the clock and records the reading under `tag`.
    pub fn stamp(&self, tag: &str) -> io::Result<Timestamp> {
        let ts = self.now();
        self.record_timestamp(tag, ts)?;
        Ok(ts)
    }

    /// Like [`Recorder::stamp`], but a clock failure is returned instead of
    /// terminating. Nothing is written in that case.
    pub fn try_stamp(&self, tag: &str) -> Result<Timestamp, RecordError> {
        let ts = self.try_now()?;
        self.record_timestamp(tag, ts)?;
        Ok(ts)
    }

    /// Records the time since `start` under `tag` and returns it.
    pub fn record_elapsed_since(&self, tag: &str, start: Timestamp) -> io::Result<Elapsed> {
        let elapsed = self.elapsed_since(start);
        self.record_duration(tag, elapsed)?;
        Ok(elapsed)
    }

    fn emit(&self, record: &MeasurementRecord) -> io::Result<()> {
        let mut sink = self.sink().borrow_mut();
        record.write_line(&mut **sink)?;
        sink.flush()
    }

    fn sink(&self) -> &RefCell<Box<dyn Write>> {
        self.sink.get_or_init(|| RefCell::new(self.open_sink()))
    }

    fn open_sink(&self) -> Box<dyn Write> {
        match self.target.open() {
            Ok(writer) => {
                log::debug!("Measurement sink opened: {:?}", self.target);
                writer
            }
            Err(err) => {
                let message = format!(
                    "Cannot open measurement file {:?} ({err}); writing measurements to stdout",
                    self.target.path()
                );
                // Binaries may emit their first record before a logger exists.
                if log::max_level() == log::LevelFilter::Off {
                    eprintln!("{message}");
                } else {
                    log::warn!("{message}");
                }
                Box::new(io::stdout())
            }
        }
    }
}

/// Prints a diagnostic to stderr and exits with a non-zero status.
pub fn exit_on_clock_fault(err: &ClockError) -> ! {
    eprintln!("Could not retrieve correct timestamp: {err}");
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::fs;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(clock: ManualClock) -> (Recorder<ManualClock>, SharedBuf) {
        let buf = SharedBuf::default();
        (Recorder::with_writer(clock, Box::new(buf.clone())), buf)
    }

    #[test]
    fn record_timestamp_appends_exactly_one_line() {
        let (recorder, buf) = captured(ManualClock::new(0));
        recorder
            .record_timestamp("main", Timestamp::from_millis(1_700_000_000_000))
            .unwrap();
        assert_eq!(buf.contents(), "main, timestamp, 1700000000000\n");
    }

    #[test]
    fn record_duration_appends_exactly_one_line() {
        let (recorder, buf) = captured(ManualClock::new(0));
        recorder
            .record_duration("duration", Elapsed::from_millis(87))
            .unwrap();
        assert_eq!(buf.contents(), "duration, elapsed time, 87\n");
    }

    #[test]
    fn records_keep_emission_order() {
        let (recorder, buf) = captured(ManualClock::new(1_000));
        let start = recorder.stamp("minimal_main").unwrap();
        recorder.clock().advance(12);
        recorder.record_elapsed_since("minimal_duration", start).unwrap();
        assert_eq!(
            buf.contents(),
            "minimal_main, timestamp, 1000\nminimal_duration, elapsed time, 12\n"
        );
    }

    #[test]
    fn elapsed_since_now_is_zero_on_a_still_clock() {
        let recorder = Recorder::with_clock(ManualClock::new(5_000), SinkTarget::Stdout);
        let start = recorder.now();
        assert_eq!(recorder.elapsed_since(start), Elapsed::ZERO);
    }

    #[test]
    fn elapsed_since_now_is_small_on_the_system_clock() {
        let recorder = Recorder::new(SinkTarget::Stdout);
        let start = recorder.now();
        assert!(recorder.elapsed_since(start).as_millis() < 1_000);
    }

    #[test]
    fn sink_is_opened_lazily_and_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.log");
        let recorder =
            Recorder::with_clock(ManualClock::new(1), SinkTarget::Append(path.clone()));

        assert!(!recorder.is_sink_open());
        assert!(!path.exists());

        recorder.stamp("first").unwrap();
        assert!(recorder.is_sink_open());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first, timestamp, 1\n");

        // The handle is kept: removing the file does not make the recorder
        // create a fresh one.
        fs::remove_file(&path).unwrap();
        recorder.stamp("second").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn two_recorders_on_one_file_append_in_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.log");

        for run in 0..2u64 {
            let clock = ManualClock::new(100 * run);
            let recorder = Recorder::with_clock(clock, SinkTarget::Append(path.clone()));
            let start = recorder.stamp("main").unwrap();
            recorder.clock().advance(3);
            recorder.record_elapsed_since("duration", start).unwrap();
        }

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "main, timestamp, 0\nduration, elapsed time, 3\n\
             main, timestamp, 100\nduration, elapsed time, 3\n"
        );
    }

    #[test]
    fn failing_clock_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.log");
        let recorder =
            Recorder::with_clock(ManualClock::new(1), SinkTarget::Append(path.clone()));
        recorder.clock().fail();

        let err = recorder.try_stamp("main").unwrap_err();
        assert!(matches!(err, RecordError::Clock(ClockError::Unavailable(_))));
        assert!(!recorder.is_sink_open());
        assert!(!path.exists());
    }

    #[test]
    fn target_is_kept_until_first_record() {
        let target = SinkTarget::Append("bench.log".into());
        let recorder = Recorder::with_clock(ManualClock::new(0), target.clone());
        assert_eq!(recorder.target(), &target);
        assert!(!recorder.is_sink_open());
    }

    #[test]
    fn unopenable_file_falls_back_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bench.log");
        let recorder =
            Recorder::with_clock(ManualClock::new(1), SinkTarget::Append(path.clone()));

        recorder.stamp("main").unwrap();
        assert!(recorder.is_sink_open());
        assert!(!path.exists());
    }
}
