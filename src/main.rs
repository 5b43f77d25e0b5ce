//! Maintenance tools for a JSON database of game codes.

use anyhow::Result;
use gamecodes::cli::{Cli, Command, Parser};
use log::LevelFilter;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Verify => gamecodes::cli::verify(&cli.opts)?,
        Command::Dedup => gamecodes::cli::dedup(&cli.opts)?,
        Command::Stats { json } => gamecodes::cli::stats(&cli.opts, json)?,
    }

    Ok(())
}
