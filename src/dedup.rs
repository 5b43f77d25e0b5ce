//! Remove duplicate codes.
//!
//! Duplicates are detected per game: two entries of the same game with the
//! same non-empty `code` are duplicates, and only the first one is kept.
//! Entries without a code are always kept.

use std::{collections::HashSet, path::Path};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    database::{Database, Game},
    error::{Error, Result},
};

/// Number of entries removed from a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// Name of the game.
    pub game_name: String,

    /// Number of removed entries.
    pub removed: usize,
}

/// Summary of a dedup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Games that had at least one duplicate, in file order.
    pub games: Vec<GameReport>,
}

impl Report {
    /// Total number of removed entries.
    pub fn removed(&self) -> usize {
        self.games.iter().map(|game| game.removed).sum()
    }

    /// Whether the pass changed nothing.
    pub fn is_clean(&self) -> bool {
        self.removed() == 0
    }
}

/// Outcome of [`write_back`].
#[derive(Debug)]
pub enum Outcome {
    /// Duplicates were removed and the file was rewritten.
    Written(Report),

    /// No duplicates were found, the file was not touched.
    Clean,

    /// Duplicates were removed but the file could not be rewritten.
    WriteFailed(Report, Error),
}

/// Remove duplicate entries of a game, keeping the first occurrence.
///
/// Sets `codeCount` to the new number of entries. Returns the number of
/// removed entries.
pub fn dedup_game(game: &mut Game) -> usize {
    let mut seen = HashSet::new();

    let codes = game.codes_mut();
    let before = codes.len();

    codes.retain(|entry| match entry.key() {
        Some(key) => seen.insert(key),
        None => true,
    });

    let after = codes.len();

    game.set_code_count(after as u64);

    before - after
}

/// Remove duplicate entries of every game of a database.
///
/// When the database has a `games` field, `totalCodes` is recomputed as the
/// sum of the code counts.
pub fn dedup_database(database: &mut Database) -> Report {
    let mut report = Report::default();

    let Some(games) = database.games_mut() else {
        log::debug!("No games");
        return report;
    };

    for game in games.iter_mut() {
        let removed = dedup_game(game);

        log::debug!("[{}]: {} codes kept", game.name(), game.codes().len());

        if removed > 0 {
            report.games.push(GameReport {
                game_name: game.name(),
                removed,
            });
        }
    }

    let total = database.count_codes();
    database.set_total_codes(total);

    report
}

/// Save a deduplicated database to `path` if the pass removed anything.
///
/// `lastUpdated` is set to the current time before writing.
pub fn write_back<P>(mut database: Database, report: Report, path: P) -> Outcome
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if report.is_clean() {
        log::info!("No duplicates in {:?}", path);
        return Outcome::Clean;
    }

    if let Some(time) = now() {
        database.set_last_updated(time);
    }

    match database.save(path) {
        Ok(()) => {
            log::info!("Removed {} duplicates from {:?}", report.removed(), path);
            Outcome::Written(report)
        },
        Err(error) => Outcome::WriteFailed(report, error),
    }
}

/// Remove duplicate entries of the database stored at `path`.
///
/// The file is rewritten only when at least one entry was removed. A missing
/// file is reported as [`Error::NotFound`].
pub fn dedup_file<P>(path: P) -> Result<Outcome>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let mut database = Database::from_path(path)?;

    let report = dedup_database(&mut database);

    Ok(write_back(database, report, path))
}

/// Format the current time.
fn now() -> Option<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .inspect_err(|error| log::warn!("Cannot format time: {}", error))
        .ok()
}
