//! HTTP client for an Ollama-compatible `/api/generate` endpoint.

use anyhow::anyhow;
use serde_json::{Map, Value};
use std::time::Duration;

/// Timeout for the pre-warm request; loading weights can take tens of seconds.
const WARM_TIMEOUT: Duration = Duration::from_secs(120);

const NANOS_PER_SEC: f64 = 1e9;

/// Timing fields reported by the backend alongside the generated text.
/// Everything else in the response is ignored.
#[derive(Debug, serde::Deserialize)]
pub struct GenerateStats {
    /// Generation-phase duration in nanoseconds.
    #[serde(default = "one_nanosecond")]
    pub eval_duration: i64,
    /// Number of tokens generated.
    #[serde(default)]
    pub eval_count: u64,
    /// End-to-end request duration in nanoseconds.
    #[serde(default)]
    pub total_duration: i64,
}

// Default for a missing eval_duration; keeps the throughput division defined.
fn one_nanosecond() -> i64 {
    1
}

impl GenerateStats {
    /// Tokens generated per second of generation time, or 0 when the backend
    /// reports a non-positive duration.
    pub fn tokens_per_sec(&self) -> f64 {
        let secs = self.eval_duration as f64 / NANOS_PER_SEC;
        if secs > 0.0 {
            self.eval_count as f64 / secs
        } else {
            0.0
        }
    }

    /// End-to-end latency in seconds.
    pub fn latency_s(&self) -> f64 {
        self.total_duration as f64 / NANOS_PER_SEC
    }
}

// struct to hold the pre-warm request params
#[derive(serde::Serialize)]
struct WarmRequest<'a> {
    model: &'a str,
    keep_alive: i64,
}

pub struct GenerateClient {
    http: reqwest::Client,
    url: String,
}

impl GenerateClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST a test-case payload verbatim and read back the timing fields.
    pub async fn generate(
        &self,
        payload: &Map<String, Value>,
        timeout: Duration,
    ) -> anyhow::Result<GenerateStats> {
        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .timeout(timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("request failed with status: {}", response.status()));
        }
        Ok(response.json().await?)
    }

    /// Load the model without generating any tokens. Sending the model name
    /// with no prompt triggers a load; `keep_alive: -1` keeps it resident for
    /// the rest of the run.
    pub async fn warm(&self, model: &str) -> anyhow::Result<()> {
        let response = self
            .http
            .post(&self.url)
            .json(&WarmRequest {
                model,
                keep_alive: -1,
            })
            .timeout(WARM_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("request failed with status: {}", response.status()));
        }
        Ok(())
    }
}
