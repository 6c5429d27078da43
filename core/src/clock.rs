//! Wall-clock time sources and the millisecond values the harness records.
//!
//! All measurements are plain wall-clock milliseconds since the Unix epoch so
//! that runs of different program variants (and different machines) can be
//! lined up against each other. Nothing here guards against the system clock
//! being adjusted mid-run; an elapsed value computed across such a jump wraps.

use std::cell::Cell;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, wrapping if the clock went backwards.
    pub const fn since(self, earlier: Timestamp) -> Elapsed {
        Elapsed(self.0.wrapping_sub(earlier.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Elapsed(u64);

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("system clock reads before the Unix epoch")]
    BeforeEpoch,
    #[error("system clock value does not fit in 64-bit milliseconds")]
    Overflow,
    #[error("clock unavailable: {0}")]
    Unavailable(String),
}

/// Something that can tell the current wall-clock time.
pub trait ClockSource {
    fn now_ms(&self) -> Result<u64, ClockError>;
}

/// The real system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> Result<u64, ClockError> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ClockError::BeforeEpoch)?;
        u64::try_from(since_epoch.as_millis()).map_err(|_| ClockError::Overflow)
    }
}

/// A clock that only moves when told to.
///
/// Used to drive the harness deterministically. `fail()` makes every later
/// read return [`ClockError::Unavailable`].
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<u64>,
    failing: Cell<bool>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            millis: Cell::new(start_ms),
            failing: Cell::new(false),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get().wrapping_add(millis));
    }

    pub fn fail(&self) {
        self.failing.set(true);
    }
}

impl ClockSource for ManualClock {
    fn now_ms(&self) -> Result<u64, ClockError> {
        if self.failing.get() {
            return Err(ClockError::Unavailable("manual clock set to fail".to_string()));
        }
        Ok(self.millis.get())
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now_ms(&self) -> Result<u64, ClockError> {
        (**self).now_ms()
    }
}
