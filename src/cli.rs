//! Command line utilities.
//!
//! Every command reports its outcome on the standard output. Errors on the
//! database file are reported as messages, not as a failing exit status.

use std::path::PathBuf;

use anyhow::Result;
pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::{
    dedup::{dedup_database, write_back, Outcome},
    error::Error,
    stats::stats_file,
    util::json::write_str,
    verify::verify_file,
    Config, Database,
};

/// Command line usage description.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Command line options.
    #[command(flatten)]
    pub opts: Opts,
}

/// List of commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the database file is valid JSON
    Verify,

    /// Remove duplicate codes within each game
    Dedup,

    /// Print statistics about the database
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Command line options.
#[derive(Debug, Args, Clone, Default)]
pub struct Opts {
    /// Database file [default: "GameCodeBase.json"]
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
}

/// Run the `verify` command.
pub fn verify(opts: &Opts) -> Result<()> {
    let config = Config::from_opts(opts);

    match verify_file(&config.file) {
        Ok(count) => println!("JSON is valid. Found {} games.", count),
        Err(error) => println!("JSON Error: {}", error),
    }

    Ok(())
}

/// Run the `dedup` command.
pub fn dedup(opts: &Opts) -> Result<()> {
    let config = Config::from_opts(opts);

    let path = &config.file;

    let mut database = match Database::from_path(path) {
        Ok(database) => database,
        Err(error @ Error::NotFound { .. }) => {
            println!("{}", error);
            return Ok(());
        },
        Err(error) => {
            println!("Reading {}...", path.display());
            println!("Error reading file: {}", error);
            return Ok(());
        },
    };

    println!("Reading {}...", path.display());

    let report = dedup_database(&mut database);

    for game in &report.games {
        println!("  - [{}]: Removed {} duplicates.", game.game_name, game.removed);
    }

    for line in outcome_lines(&write_back(database, report, path)) {
        println!("{}", line);
    }

    Ok(())
}

/// Run the `stats` command.
pub fn stats(opts: &Opts, json: bool) -> Result<()> {
    let config = Config::from_opts(opts);

    match stats_file(&config.file) {
        Ok(stats) if json => println!("{}", write_str(&stats)?),
        Ok(stats) => println!("{}", stats),
        Err(error) => println!("JSON Error: {}", error),
    }

    Ok(())
}

/// Describe the outcome of a dedup pass, one line per item.
fn outcome_lines(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Clean => vec!["No duplicates found. Data is clean.".into()],
        Outcome::Written(report) => vec![
            "Writing cleaned data back to file...".into(),
            format!(
                "Successfully removed {} duplicate entries!",
                report.removed()
            ),
        ],
        Outcome::WriteFailed(_, error) => vec![
            "Writing cleaned data back to file...".into(),
            format!("Error writing file: {}", error),
        ],
    }
}
