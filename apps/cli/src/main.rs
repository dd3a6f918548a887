//! PaperWright CLI — academic document production tool.
//!
//! Quotes, charges, and produces templated academic works (courseworks and
//! reports) from a pluggable source provider.

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
