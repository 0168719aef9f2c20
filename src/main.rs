//! Fetchfox CLI entry point
//!
//! Parses arguments, runs the install and turns any error into a
//! user-friendly message with a non-zero exit status.

use anyhow::Result;
use clap::Parser;
use fetchfox::cli;
use fetchfox::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
