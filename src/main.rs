use clap::Parser;

use storeops::cli;
use storeops::error::Result;
use storeops::storage::StorageOps;

use storeops::cli::Args;
use storeops::config::load_storage_config;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = load_storage_config()?;
    let ops = StorageOps::new(config);
    cli::run(args, ops).await?;
    Ok(())
}
