//! JSON document IO shared by every store.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StoreError;

/// Reads a JSON document, returning `T::default()` when the file is absent.
pub(crate) fn load_or_default<T>(path: &Utf8Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a pretty-printed JSON document through a temporary sibling file.
///
/// The rename keeps readers from ever observing a half-written document.
pub(crate) fn save<T>(path: &Utf8Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let mut text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    let temporary = temporary_path(path);
    fs::write(&temporary, text).map_err(|source| StoreError::Write {
        path: temporary.clone(),
        source,
    })?;
    fs::rename(&temporary, path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn temporary_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut name = path.file_name().unwrap_or("store").to_owned();
    name.push_str(".tmp");
    path.with_file_name(name)
}
