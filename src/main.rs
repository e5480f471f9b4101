use anyhow::Result;
use clap::Parser;
use prodsight_rs::pipeline::launch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = prodsight_rs::cli::Args::parse();
    let config = args.into_config()?;

    launch(&config).await
}
