//! goldkey CLI: discover, score, and rank golden keywords.
//!
//! Collects trending seed keywords, expands them one hop, enriches them with
//! search volume and document counts, and writes a ranked `data.json`.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
