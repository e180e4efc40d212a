//! Derives the on-disk locations of the bot's JSON stores.
//!
//! All three stores live side by side in the configured data directory so an
//! operator can back them up or move them together.

use std::fs::DirBuilder;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::Config;

const STATS_FILE: &str = "rr_stats.json";
const CUSTOM_TRANSLATIONS_FILE: &str = "custom_translations.json";
const EMOTES_FILE: &str = "user_emotes.json";

/// Canonical paths for the persisted stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    data_dir: Utf8PathBuf,
    stats: Utf8PathBuf,
    custom_translations: Utf8PathBuf,
    emotes: Utf8PathBuf,
}

impl StorePaths {
    /// Derives store paths from the shared configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::in_directory(config.data_dir.clone())
    }

    /// Derives store paths rooted at `data_dir`.
    #[must_use]
    pub fn in_directory(data_dir: impl Into<Utf8PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            stats: data_dir.join(STATS_FILE),
            custom_translations: data_dir.join(CUSTOM_TRANSLATIONS_FILE),
            emotes: data_dir.join(EMOTES_FILE),
            data_dir,
        }
    }

    /// Directory holding every store.
    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Roulette survive/dead counters.
    #[must_use]
    pub fn stats(&self) -> &Utf8Path {
        &self.stats
    }

    /// User-registered translation overrides.
    #[must_use]
    pub fn custom_translations(&self) -> &Utf8Path {
        &self.custom_translations
    }

    /// Registered emote names.
    #[must_use]
    pub fn emotes(&self) -> &Utf8Path {
        &self.emotes
    }

    /// Ensures the data directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorePathsError::CreateDirectory`] when the directory cannot
    /// be created.
    pub fn prepare(&self) -> Result<(), StorePathsError> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o750);
        }

        if let Err(source) = builder.create(self.data_dir.as_std_path())
            && source.kind() != std::io::ErrorKind::AlreadyExists
        {
            return Err(StorePathsError::CreateDirectory {
                path: self.data_dir.clone(),
                source,
            });
        }
        Ok(())
    }
}

/// Errors raised while preparing the data directory.
#[derive(Debug, Error)]
pub enum StorePathsError {
    /// Creating the data directory failed.
    #[error("failed to prepare data directory '{path}': {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
