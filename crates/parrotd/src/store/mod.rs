//! Persisted bot state: translation overrides, emotes, and roulette stats.
//!
//! Three independent JSON documents back the stores (see
//! [`parrot_config::StorePaths`]). They are loaded once at bootstrap, mutated
//! in memory by command handlers, and written back by [`Stores::flush`] when
//! the [`FlushSchedule`] says so. Only documents that changed since the last
//! flush are rewritten.

mod files;
mod overrides;
mod schedule;
mod stats;

use std::collections::BTreeMap;
use std::io;

use camino::Utf8PathBuf;
use parrot_config::StorePaths;
use thiserror::Error;

pub use overrides::OverrideStore;
pub use schedule::FlushSchedule;
pub use stats::{PlayResult, PlayerStats, StatsStore};

/// Errors raised while reading or writing a store document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but could not be read.
    #[error("failed to read store '{path}': {source}")]
    Read {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The document is not valid JSON of the expected shape.
    #[error("failed to decode store '{path}': {source}")]
    Decode {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the in-memory state failed.
    #[error("failed to encode store '{path}': {source}")]
    Encode {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing or renaming the document failed.
    #[error("failed to write store '{path}': {source}")]
    Write {
        /// Path being written.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// All persisted state, owned by the event loop.
#[derive(Debug)]
pub struct Stores {
    paths: StorePaths,
    overrides: OverrideStore,
    stats: StatsStore,
}

impl Stores {
    /// Loads every document, treating missing files as empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when a present document cannot be read or
    /// decoded. Starting with silently emptied stores would overwrite the
    /// operator's data at the next flush.
    pub fn load(paths: StorePaths) -> Result<Self, StoreError> {
        let translations: BTreeMap<String, String> =
            files::load_or_default(paths.custom_translations())?;
        let emotes: Vec<String> = files::load_or_default(paths.emotes())?;
        let stats: BTreeMap<String, PlayerStats> = files::load_or_default(paths.stats())?;
        Ok(Self {
            overrides: OverrideStore::from_parts(translations, emotes),
            stats: StatsStore::from_document(stats),
            paths,
        })
    }

    /// Where the documents live.
    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Translation overrides and emotes.
    #[must_use]
    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Mutable access to the overrides.
    pub fn overrides_mut(&mut self) -> &mut OverrideStore {
        &mut self.overrides
    }

    /// Roulette statistics.
    #[must_use]
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Mutable access to the statistics.
    pub fn stats_mut(&mut self) -> &mut StatsStore {
        &mut self.stats
    }

    /// Returns true when any document has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.overrides.translations_dirty() || self.overrides.emotes_dirty() || self.stats.is_dirty()
    }

    /// Writes every changed document and returns how many were written.
    ///
    /// A document is marked clean only after its own write succeeds, so a
    /// failure leaves it queued for the next flush.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered.
    pub fn flush(&mut self) -> Result<usize, StoreError> {
        let mut written = 0;
        if self.overrides.translations_dirty() {
            files::save(self.paths.custom_translations(), self.overrides.translations())?;
            self.overrides.mark_translations_clean();
            written += 1;
        }
        if self.overrides.emotes_dirty() {
            files::save(self.paths.emotes(), self.overrides.emotes())?;
            self.overrides.mark_emotes_clean();
            written += 1;
        }
        if self.stats.is_dirty() {
            files::save(self.paths.stats(), self.stats.document())?;
            self.stats.mark_clean();
            written += 1;
        }
        Ok(written)
    }
}
