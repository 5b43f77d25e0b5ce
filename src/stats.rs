//! Compute statistics about the database.

use std::{fmt, path::Path};

use serde::Serialize;
use serde_json::Value;

use crate::{
    database::{CodeEntry, Database},
    error::Result,
};

/// Statistics about a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of games.
    pub total_games: usize,

    /// Number of codes, counted over all games.
    pub total_codes: usize,

    /// Number of codes with status `active`.
    pub active_codes: usize,

    /// Number of codes with status `expired`.
    pub expired_codes: usize,

    /// Number of codes collected by a crawler or an API.
    pub auto_crawled_codes: usize,

    /// Number of codes entered by hand.
    pub manual_codes: usize,

    /// Average accuracy rate of the codes that have one, with two decimals.
    pub avg_accuracy_rate: Option<String>,

    /// Time of the last save.
    pub last_updated: Option<String>,
}

impl Stats {
    /// Compute statistics of a database.
    pub fn from_database(database: &Database) -> Self {
        let mut stats = Self {
            total_games: database.game_count(),
            last_updated: database.last_updated().map(Into::into),
            ..Default::default()
        };

        let mut accuracy_sum = 0.0;
        let mut accuracy_count = 0usize;

        for entry in database.games().flat_map(|game| game.codes()) {
            stats.total_codes += 1;

            match str_field(entry, "status") {
                Some("active") => stats.active_codes += 1,
                Some("expired") => stats.expired_codes += 1,
                _ => {},
            }

            match str_field(entry, "crawlSource") {
                Some("auto" | "api") => stats.auto_crawled_codes += 1,
                _ => stats.manual_codes += 1,
            }

            if let Some(rate) = entry.field("accuracyRate").and_then(Value::as_f64) {
                accuracy_sum += rate;
                accuracy_count += 1;
            }
        }

        if accuracy_count > 0 {
            let average = accuracy_sum / accuracy_count as f64;
            stats.avg_accuracy_rate = Some(format!("{:.2}", average));
        }

        stats
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games: {}", self.total_games)?;
        writeln!(f, "Codes: {}", self.total_codes)?;
        writeln!(f, "Active codes: {}", self.active_codes)?;
        writeln!(f, "Expired codes: {}", self.expired_codes)?;
        writeln!(f, "Auto-crawled codes: {}", self.auto_crawled_codes)?;
        writeln!(f, "Manual codes: {}", self.manual_codes)?;
        writeln!(
            f,
            "Average accuracy rate: {}",
            self.avg_accuracy_rate.as_deref().unwrap_or("n/a")
        )?;
        write!(
            f,
            "Last updated: {}",
            self.last_updated.as_deref().unwrap_or("n/a")
        )
    }
}

/// Load the database stored at `path` and compute its statistics.
pub fn stats_file<P>(path: P) -> Result<Stats>
where
    P: AsRef<Path>,
{
    let database = Database::from_path(path)?;
    Ok(Stats::from_database(&database))
}

fn str_field<'a>(entry: &'a CodeEntry, name: &str) -> Option<&'a str> {
    entry.field(name).and_then(Value::as_str)
}
