//! Where measurement lines go.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variable naming the append-mode measurement file.
pub const SINK_ENV_VAR: &str = "WABENCH_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SinkTarget {
    #[default]
    Stdout,
    /// Append to this file, creating it if needed.
    Append(PathBuf),
}

impl SinkTarget {
    /// Resolves the target from the raw `WABENCH_FILE` value. Unset or blank
    /// means standard output; any other value is used as the path verbatim.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => SinkTarget::Append(PathBuf::from(path)),
            _ => SinkTarget::Stdout,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SinkTarget::Stdout => None,
            SinkTarget::Append(path) => Some(path),
        }
    }

    /// Opens the sink. Files are opened in append mode so repeated runs
    /// accumulate rather than truncate.
    pub fn open(&self) -> io::Result<Box<dyn Write>> {
        match self {
            SinkTarget::Stdout => Ok(Box::new(io::stdout())),
            SinkTarget::Append(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Box::new(file))
            }
        }
    }
}
