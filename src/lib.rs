//! Maintenance tools for a JSON database of game codes.
//!
//! The database is a single JSON file listing games and, for each game, its
//! codes. This crate can:
//!
//! - check that the file is valid ([`verify_file`]);
//! - remove duplicate codes within each game ([`dedup_file`]);
//! - compute statistics about the codes ([`stats_file`]).
//!
//! Gamecodes can be used as both a CLI and a library.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod database;
pub mod dedup;
pub mod error;
pub mod stats;
pub mod util;
pub mod verify;

pub use config::Config;
pub use database::{CodeEntry, Database, Game};
pub use dedup::dedup_file;
pub use error::Error;
pub use stats::stats_file;
pub use verify::verify_file;
