//! The measurement line format.
//!
//! One record per line, fields separated by `", "`:
//!
//! ```text
//! <tag>, timestamp, <u64>
//! <tag>, elapsed time, <u64>
//! ```
//!
//! Tags are written verbatim. A tag containing a newline will not survive a
//! round trip through [`MeasurementRecord::from_str`]; callers pick plain
//! identifiers.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::clock::{Elapsed, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Timestamp,
    Elapsed,
}

impl MeasurementKind {
    pub const fn label(self) -> &'static str {
        match self {
            MeasurementKind::Timestamp => "timestamp",
            MeasurementKind::Elapsed => "elapsed time",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "timestamp" => Some(MeasurementKind::Timestamp),
            "elapsed time" => Some(MeasurementKind::Elapsed),
            _ => None,
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    pub tag: String,
    pub kind: MeasurementKind,
    pub value: u64,
}

impl MeasurementRecord {
    pub fn timestamp(tag: &str, ts: Timestamp) -> Self {
        Self {
            tag: tag.to_string(),
            kind: MeasurementKind::Timestamp,
            value: ts.as_millis(),
        }
    }

    pub fn elapsed(tag: &str, elapsed: Elapsed) -> Self {
        Self {
            tag: tag.to_string(),
            kind: MeasurementKind::Elapsed,
            value: elapsed.as_millis(),
        }
    }

    /// Writes the record as exactly one line, including the trailing newline.
    pub fn write_line<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{self}")
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.tag, self.kind, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRecordError {
    #[error("expected `<tag>, <kind>, <value>`, got {0:?}")]
    Malformed(String),
    #[error("unknown measurement kind {0:?}")]
    UnknownKind(String),
    #[error("invalid measurement value {0:?}")]
    InvalidValue(String),
}

impl FromStr for MeasurementRecord {
    type Err = ParseRecordError;

    /// Parses one line. Fields are split from the right, so only the tag can
    /// absorb stray separators.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.rsplitn(3, ", ");
        let (Some(value), Some(kind), Some(tag)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseRecordError::Malformed(line.to_string()));
        };

        let kind = MeasurementKind::from_label(kind)
            .ok_or_else(|| ParseRecordError::UnknownKind(kind.to_string()))?;
        let value = value
            .parse::<u64>()
            .map_err(|_| ParseRecordError::InvalidValue(value.to_string()))?;

        Ok(Self {
            tag: tag.to_string(),
            kind,
            value,
        })
    }
}
