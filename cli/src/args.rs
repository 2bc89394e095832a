use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ollabench",
    version,
    about = "Benchmark token throughput and latency of a local Ollama-compatible generate endpoint"
)]
pub struct Args {
    /// Scheme and host of the inference server
    #[arg(long, default_value = "http://localhost", env = "OLLABENCH_HOST")]
    pub host: String,

    /// Port of the inference server
    #[arg(long, default_value_t = 11434, env = "OLLABENCH_PORT")]
    pub port: u16,

    /// API path of the generate endpoint
    #[arg(long, default_value = "/api/generate", env = "OLLABENCH_PATH")]
    pub path: String,

    /// Test suite: a JSON array of {name, payload} objects
    #[arg(
        short,
        long,
        default_value = "./prompts/general.json",
        env = "OLLABENCH_FILE"
    )]
    pub file: PathBuf,

    /// CSV report destination
    #[arg(
        short,
        long,
        default_value = "./scratch/benchmark_results.csv",
        env = "OLLABENCH_OUTPUT"
    )]
    pub output: PathBuf,

    /// Skip the pre-warm request
    #[arg(long)]
    pub no_warm: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 120, env = "OLLABENCH_TIMEOUT")]
    pub timeout: u64,

    /// Limit the number of test cases executed
    #[arg(long, env = "OLLABENCH_LIMIT")]
    pub limit: Option<usize>,
}

impl Args {
    /// Full endpoint URL: host (trailing slash stripped) + port + path.
    /// Not validated here; a malformed URL surfaces as a request error.
    pub fn endpoint_url(&self) -> String {
        format!("{}:{}{}", self.host.trim_end_matches('/'), self.port, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["ollabench"]).unwrap();
        assert_eq!(args.host, "http://localhost");
        assert_eq!(args.port, 11434);
        assert_eq!(args.path, "/api/generate");
        assert_eq!(args.file, PathBuf::from("./prompts/general.json"));
        assert_eq!(args.output, PathBuf::from("./scratch/benchmark_results.csv"));
        assert!(!args.no_warm);
        assert_eq!(args.timeout, 120);
        assert_eq!(args.limit, None);
    }

    #[test]
    fn default_endpoint_url() {
        let args = Args::try_parse_from(["ollabench"]).unwrap();
        assert_eq!(args.endpoint_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn trailing_slash_on_host_is_stripped() {
        let args = Args::try_parse_from(["ollabench", "--host", "http://10.0.0.2/"]).unwrap();
        assert_eq!(args.endpoint_url(), "http://10.0.0.2:11434/api/generate");
    }

    #[test]
    fn parse_overrides() {
        let args = Args::try_parse_from([
            "ollabench",
            "--port",
            "8080",
            "--path",
            "/v1/generate",
            "--no-warm",
            "--timeout",
            "30",
            "--limit",
            "3",
        ])
        .unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.path, "/v1/generate");
        assert!(args.no_warm);
        assert_eq!(args.timeout, 30);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn short_flags_for_file_and_output() {
        let args =
            Args::try_parse_from(["ollabench", "-f", "suite.json", "-o", "out.csv"]).unwrap();
        assert_eq!(args.file, PathBuf::from("suite.json"));
        assert_eq!(args.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        assert!(Args::try_parse_from(["ollabench", "--port", "eleven"]).is_err());
    }
}
