//! Core pieces of the ollabench benchmark runner: test-suite loading, the
//! HTTP client for an Ollama-compatible generate endpoint, and the CSV
//! report writer. The sequential driver loop lives in the CLI crate.

pub mod client;
pub mod report;
pub mod suite;

pub use client::{GenerateClient, GenerateStats};
pub use report::{CaseOutcome, CaseRecord};
pub use suite::TestCase;

pub type OllabenchError = anyhow::Error;
pub type OllabenchResult<T> = anyhow::Result<T>;
