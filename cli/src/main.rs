mod args;
mod run;

use clap::Parser;
use ollabench::OllabenchError;

#[tokio::main]
async fn main() -> Result<(), OllabenchError> {
    run::run(args::Args::parse()).await
}
