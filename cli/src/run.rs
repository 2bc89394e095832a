//! The benchmark driver: pre-warm, sequential request loop, CSV save.
//!
//! Cases run strictly one at a time, in file order. Concurrent dispatch would
//! put the cases in contention for the same model weights and VRAM and skew
//! every measurement, so there is deliberately no parallel mode.

use crate::args::Args;
use indicatif::{ProgressBar, ProgressStyle};
use ollabench::OllabenchError;
use ollabench::client::GenerateClient;
use ollabench::report::{self, CaseRecord};
use ollabench::suite::{self, TestCase};
use std::time::{Duration, Instant};

pub async fn run(args: Args) -> Result<(), OllabenchError> {
    let mut cases = suite::load(&args.file)?;
    if let Some(limit) = args.limit
        && cases.len() > limit
    {
        cases.truncate(limit);
    }

    let client = GenerateClient::new(args.endpoint_url());
    eprintln!(
        "Loaded {} test cases from {}",
        cases.len(),
        args.file.display()
    );
    eprintln!("Target: {} | Timeout: {}s", client.url(), args.timeout);

    if !args.no_warm
        && let Some(model) = cases.first().and_then(TestCase::model)
    {
        warm(&client, model).await;
    }

    let records = run_cases(&client, &cases, Duration::from_secs(args.timeout)).await;
    report::write_csv(&args.output, &records)?;
    eprintln!("\nResults saved to {}", args.output.display());
    Ok(())
}

/// Force the target model into memory so the first timed case does not pay
/// the cold-start cost. Failure only earns a warning: the suite still runs,
/// with the load time folded into the first measurement.
async fn warm(client: &GenerateClient, model: &str) {
    eprintln!("Pre-warming {model}... (this may take 10-30s)");
    match client.warm(model).await {
        Ok(()) => eprintln!("Model loaded and ready.\n"),
        Err(e) => eprintln!("Warning: pre-warm failed: {e}. Load time may skew the first case.\n"),
    }
}

/// One blocking request per case. A failing case is recorded and the loop
/// moves on; nothing here aborts the suite.
pub async fn run_cases(
    client: &GenerateClient,
    cases: &[TestCase],
    timeout: Duration,
) -> Vec<CaseRecord> {
    let total = cases.len();
    let pb = create_case_progress(total as u64);
    let mut records: Vec<CaseRecord> = Vec::with_capacity(total);
    let mut err_count = 0usize;

    for case in cases {
        pb.set_message(format!("running {}", case.name));
        let start = Instant::now();

        let record = match client.generate(&case.payload, timeout).await {
            Ok(stats) => CaseRecord::success(
                &case.name,
                stats.tokens_per_sec(),
                stats.latency_s(),
                stats.eval_count,
            ),
            Err(e) => {
                err_count += 1;
                eprintln!("{}: FAILED: {e}", case.name);
                CaseRecord::failure(&case.name, e)
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        pb.inc(1);
        pb.set_message(format!(
            "{}/{total} | err={err_count} | {} {} ({elapsed:.1}s)",
            records.len() + 1,
            case.name,
            record.status()
        ));
        records.push(record);
    }

    pb.finish_with_message(format!(
        "Done {total}/{total} | ok={} err={err_count}",
        total - err_count
    ));
    records
}

fn create_case_progress(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner:.cyan} [{pos}/{len}] {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb
}
