//! Per-case result records and the CSV report writer.
//!
//! The header is a fixed superset of both record shapes. Deriving it from the
//! first record would drop the numeric columns whenever the first case fails,
//! corrupting rows for later successes, so every report carries all five
//! columns and failure rows leave the inapplicable cells empty.

use anyhow::Context;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["Task", "Status", "Tokens/Sec", "Latency (s)", "Output Length"];

#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Success {
        tokens_per_sec: f64,
        latency_s: f64,
        output_len: u64,
    },
    Failure {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub task: String,
    pub outcome: CaseOutcome,
}

/// Round to 2 decimal places, the precision recorded in the report.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl CaseRecord {
    pub fn success(
        task: impl Into<String>,
        tokens_per_sec: f64,
        latency_s: f64,
        output_len: u64,
    ) -> Self {
        Self {
            task: task.into(),
            outcome: CaseOutcome::Success {
                tokens_per_sec: round2(tokens_per_sec),
                latency_s: round2(latency_s),
                output_len,
            },
        }
    }

    pub fn failure(task: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            task: task.into(),
            outcome: CaseOutcome::Failure {
                message: message.to_string(),
            },
        }
    }

    pub fn status(&self) -> String {
        match &self.outcome {
            CaseOutcome::Success { .. } => "Success".to_string(),
            CaseOutcome::Failure { message } => format!("Error: {message}"),
        }
    }
}

/// Write the full report in execution order: one open, one flush, one row per
/// record regardless of outcome.
pub fn write_csv(path: &Path, records: &[CaseRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write report to {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        match &record.outcome {
            CaseOutcome::Success {
                tokens_per_sec,
                latency_s,
                output_len,
            } => {
                let tps = format!("{tokens_per_sec:.2}");
                let latency = format!("{latency_s:.2}");
                let len = output_len.to_string();
                wtr.write_record([
                    record.task.as_str(),
                    "Success",
                    tps.as_str(),
                    latency.as_str(),
                    len.as_str(),
                ])?;
            }
            CaseOutcome::Failure { message } => {
                let status = format!("Error: {message}");
                wtr.write_record([record.task.as_str(), status.as_str(), "", "", ""])?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
