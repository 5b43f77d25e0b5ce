//! Configure the database tools.

use std::path::PathBuf;

use crate::{cli::Opts, database::DEFAULT_FILE};

/// Configuration for the database tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the database file.
    ///
    /// The path is not checked here: a missing or unreadable file is
    /// reported by the command that reads it.
    pub file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE),
        }
    }
}

impl Config {
    /// Create a configuration from a [`Opts`] object.
    pub fn from_opts(opts: &Opts) -> Self {
        Self {
            file: opts.file.clone().unwrap_or_else(|| DEFAULT_FILE.into()),
        }
    }
}
