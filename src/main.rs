use anyhow::Result;
use clap::Parser;

use scout_rs::assistant::workflow::{launch, run_once};
use scout_rs::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.clone().into_config();

    match args.oneshot_request(&config) {
        Some(request) => run_once(&config, request).await,
        None => launch(&config).await,
    }
}
