//! docfetch CLI: look up library documentation from the terminal.
//!
//! Resolves a library name, fetches its documentation bundle, and prints the
//! extracted code snippets and Q&A pairs as JSON or as a readable bundle.

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
