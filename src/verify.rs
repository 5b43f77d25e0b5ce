//! Check that the database file can be loaded.

use std::path::Path;

use crate::{database::Database, error::Result};

/// Load the database stored at `path` and return its number of games.
pub fn verify_file<P>(path: P) -> Result<usize>
where
    P: AsRef<Path>,
{
    let database = Database::from_path(path)?;
    Ok(database.game_count())
}
