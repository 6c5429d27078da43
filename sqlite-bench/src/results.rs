//! Merging measurement files from several architectures into one CSV table.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wabench_core::MeasurementRecord;

pub const DEFAULT_ARCHITECTURES: [&str; 3] = ["amd64", "arm64", "riscv64"];
pub const CSV_HEADER: &str = "Architecture,Tag,Kind,Value";

/// One `ARCH=PATH` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureInput {
    pub architecture: String,
    pub path: PathBuf,
}

impl ArchitectureInput {
    /// `<arch>-timing_results.log` in the current directory.
    pub fn default_for(architecture: &str) -> Self {
        Self {
            architecture: architecture.to_string(),
            path: PathBuf::from(format!("{architecture}-timing_results.log")),
        }
    }
}

impl FromStr for ArchitectureInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((arch, path)) = s.split_once('=') else {
            bail!("expected ARCH=PATH, got {s:?}");
        };
        let arch = arch.trim();
        if arch.is_empty() || path.trim().is_empty() {
            bail!("expected ARCH=PATH, got {s:?}");
        }
        Ok(Self {
            architecture: arch.to_string(),
            path: PathBuf::from(path.trim()),
        })
    }
}

pub fn default_inputs() -> Vec<ArchitectureInput> {
    DEFAULT_ARCHITECTURES
        .iter()
        .map(|arch| ArchitectureInput::default_for(arch))
        .collect()
}

/// Parses every measurement line in `text`. Other lines are counted and
/// skipped.
pub fn parse_records(text: &str) -> (Vec<MeasurementRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match line.parse::<MeasurementRecord>() {
            Ok(record) => records.push(record),
            Err(err) => {
                log::debug!("Skipping line: {err}");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

/// A measurement tagged with the (upper-case) architecture it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRecord {
    pub architecture: String,
    pub record: MeasurementRecord,
}

#[derive(Debug, Default)]
pub struct Combined {
    pub records: Vec<CombinedRecord>,
    pub found: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl Combined {
    /// Measurements per architecture, alphabetically.
    pub fn counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.architecture.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Reads all inputs. Missing files are noted and skipped; a file that exists
/// but cannot be read is an error.
pub fn combine(inputs: &[ArchitectureInput]) -> Result<Combined> {
    let mut combined = Combined::default();

    for input in inputs {
        if !input.path.exists() {
            log::warn!("Not found: {}", input.path.display());
            combined.missing.push(input.path.clone());
            continue;
        }

        let text = fs::read_to_string(&input.path)
            .with_context(|| format!("Error reading {}", input.path.display()))?;
        let (records, skipped) = parse_records(&text);
        if skipped > 0 {
            log::warn!(
                "Skipped {skipped} unparseable lines in {}",
                input.path.display()
            );
        }

        let architecture = input.architecture.to_uppercase();
        log::info!(
            "Loaded {} measurements from {architecture}",
            records.len()
        );
        combined
            .records
            .extend(records.into_iter().map(|record| CombinedRecord {
                architecture: architecture.clone(),
                record,
            }));
        combined.found.push(input.path.clone());
    }

    if combined.found.is_empty() {
        bail!("No valid timing files found");
    }
    Ok(combined)
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_csv<W: Write>(out: &mut W, records: &[CombinedRecord]) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&r.architecture),
            csv_field(&r.record.tag),
            csv_field(r.record.kind.label()),
            r.record.value
        )?;
    }
    Ok(())
}

/// `combined_timing_results_<YYYYmmdd_HHMMSS>.csv`
pub fn output_file_name(at: DateTime<Local>) -> String {
    format!("combined_timing_results_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Combines `inputs` into a new CSV file inside `dir` and returns its path.
pub fn combine_into(dir: &Path, inputs: &[ArchitectureInput]) -> Result<(PathBuf, Combined)> {
    let combined = combine(inputs)?;
    let path = dir.join(output_file_name(Local::now()));
    let file =
        File::create(&path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, &combined.records)?;
    out.flush()?;
    Ok((path, combined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wabench_core::MeasurementKind;

    #[test]
    fn parses_arch_argument() {
        let input: ArchitectureInput = "arm64=/tmp/results.log".parse().unwrap();
        assert_eq!(input.architecture, "arm64");
        assert_eq!(input.path, PathBuf::from("/tmp/results.log"));
        assert!("arm64".parse::<ArchitectureInput>().is_err());
        assert!("=path".parse::<ArchitectureInput>().is_err());
    }

    #[test]
    fn default_inputs_use_log_names() {
        let inputs = default_inputs();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[2].path, PathBuf::from("riscv64-timing_results.log"));
    }

    #[test]
    fn parse_skips_report_lines() {
        let text = "main, timestamp, 100\n\
                    MINIMAL: main() function entered\n\
                    \n\
                    duration, elapsed time, 42\n";
        let (records, skipped) = parse_records(text);
        assert_eq!(skipped, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, MeasurementKind::Elapsed);
        assert_eq!(records[1].value, 42);
    }

    #[test]
    fn csv_output_quotes_awkward_tags() {
        let records = vec![
            CombinedRecord {
                architecture: "AMD64".into(),
                record: "main, timestamp, 7".parse().unwrap(),
            },
            CombinedRecord {
                architecture: "ARM64".into(),
                record: "a, b, elapsed time, 9".parse().unwrap(),
            },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Architecture,Tag,Kind,Value\n\
             AMD64,main,timestamp,7\n\
             ARM64,\"a, b\",elapsed time,9\n"
        );
    }

    #[test]
    fn output_name_has_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            output_file_name(at),
            "combined_timing_results_20240309_140507.csv"
        );
    }

    #[test]
    fn combine_skips_missing_and_upper_cases() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("amd64.log");
        fs::write(&present, "main, timestamp, 1\nduration, elapsed time, 2\n").unwrap();
        let inputs = vec![
            ArchitectureInput {
                architecture: "amd64".into(),
                path: present,
            },
            ArchitectureInput {
                architecture: "arm64".into(),
                path: dir.path().join("missing.log"),
            },
        ];

        let (path, combined) = combine_into(dir.path(), &inputs).unwrap();
        assert_eq!(combined.missing.len(), 1);
        assert_eq!(combined.counts().get("AMD64"), Some(&2));
        let csv = fs::read_to_string(path).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("AMD64,duration,elapsed time,2"));
    }

    #[test]
    fn combine_without_inputs_fails() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![ArchitectureInput {
            architecture: "riscv64".into(),
            path: dir.path().join("nope.log"),
        }];
        assert!(combine(&inputs).is_err());
    }
}
