//! Read and write JSON data files.

use std::{io::ErrorKind, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Read data from a JSON file.
///
/// A missing file, a read failure and a parse failure are reported as
/// distinct [`Error`] variants.
pub fn read_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    log::debug!("Reading {:?}", path);

    let content = std::fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => Error::NotFound {
            path: path.to_owned(),
        },
        _ => Error::ReadInput {
            path: path.to_owned(),
            source: error.into(),
        },
    })?;

    read_str(content).map_err(|error| Error::ParseInput {
        path: path.to_owned(),
        source: error,
    })
}

/// Read data from a JSON string.
pub fn read_str<T, S>(content: S) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    S: AsRef<str>,
{
    Ok(serde_json::from_str(content.as_ref())?)
}

/// Serialize data to a JSON string, indented with two spaces.
///
/// Non-ASCII characters are written as is.
pub fn write_str<T>(value: &T) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write data to a JSON file, replacing its content.
pub fn write_file<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    log::debug!("Writing {:?}", path);

    let content = write_str(value).map_err(|error| Error::WriteOutput {
        path: path.to_owned(),
        source: error,
    })?;

    std::fs::write(path, content).map_err(|error| Error::WriteOutput {
        path: path.to_owned(),
        source: error.into(),
    })
}
