//! Harness configuration, read from the environment.
//!
//! A `.env` file in the working directory is loaded first (if present), then
//! the following variables are read:
//!
//! | Variable           | Default    |
//! |--------------------|------------|
//! | `WABENCH_FILE`     | stdout     |
//! | `WABENCH_DB`       | `:memory:` |
//! | `WABENCH_LOG`      | `info`     |
//! | `WABENCH_LOG_FILE` | unset      |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::sink::{SINK_ENV_VAR, SinkTarget};

pub const DATABASE_ENV_VAR: &str = "WABENCH_DB";
pub const LOG_LEVEL_ENV_VAR: &str = "WABENCH_LOG";
pub const LOG_FILE_ENV_VAR: &str = "WABENCH_LOG_FILE";

pub const IN_MEMORY_DATABASE: &str = ":memory:";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub sink: SinkTarget,
    /// `:memory:` or a database file path.
    pub database: String,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sink: SinkTarget::Stdout,
            database: IN_MEMORY_DATABASE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            log_file: None,
        }
    }
}

impl HarnessConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Self {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let log_level = match non_blank(LOG_LEVEL_ENV_VAR) {
            Some(raw) => LevelFilter::from_str(&raw).unwrap_or_else(|_| {
                // The logger is not up yet, so this goes straight to stderr.
                eprintln!(
                    "Ignoring invalid {LOG_LEVEL_ENV_VAR}={raw:?}; using {DEFAULT_LOG_LEVEL}"
                );
                DEFAULT_LOG_LEVEL
            }),
            None => DEFAULT_LOG_LEVEL,
        };

        Self {
            sink: SinkTarget::from_env_value(lookup(SINK_ENV_VAR).as_deref()),
            database: non_blank(DATABASE_ENV_VAR)
                .unwrap_or_else(|| IN_MEMORY_DATABASE.to_string()),
            log_level,
            log_file: non_blank(LOG_FILE_ENV_VAR).map(PathBuf::from),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }
}
