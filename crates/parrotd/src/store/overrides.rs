//! User-registered translation corrections and emote names.

use std::collections::BTreeMap;

/// Custom translations and known emotes.
///
/// The store only tracks which halves changed; writing them out is the job of
/// [`Stores::flush`](super::Stores::flush).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideStore {
    translations: BTreeMap<String, String>,
    emotes: Vec<String>,
    translations_dirty: bool,
    emotes_dirty: bool,
}

impl OverrideStore {
    /// Builds a store from previously persisted documents.
    #[must_use]
    pub fn from_parts(translations: BTreeMap<String, String>, emotes: Vec<String>) -> Self {
        let mut deduplicated: Vec<String> = Vec::with_capacity(emotes.len());
        for emote in emotes {
            if !deduplicated.contains(&emote) {
                deduplicated.push(emote);
            }
        }
        Self {
            translations,
            emotes: deduplicated,
            translations_dirty: false,
            emotes_dirty: false,
        }
    }

    /// Stored translation for an exact message text.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.translations.get(text).map(String::as_str)
    }

    /// Records `translation` for `text`, replacing any previous entry.
    pub fn register_translation(&mut self, text: impl Into<String>, translation: impl Into<String>) {
        self.translations.insert(text.into(), translation.into());
        self.translations_dirty = true;
    }

    /// Appends every token not yet known, returning those added in order.
    pub fn add_emotes<'a, I>(&mut self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut added = Vec::new();
        for token in tokens {
            if self.is_known_emote(token) {
                continue;
            }
            self.emotes.push(token.to_owned());
            added.push(token.to_owned());
        }
        if !added.is_empty() {
            self.emotes_dirty = true;
        }
        added
    }

    /// Returns true when `token` has been registered.
    #[must_use]
    pub fn is_known_emote(&self, token: &str) -> bool {
        self.emotes.iter().any(|emote| emote == token)
    }

    /// Registered emotes in insertion order.
    #[must_use]
    pub fn emotes(&self) -> &[String] {
        &self.emotes
    }

    /// Number of custom translations.
    #[must_use]
    pub fn translation_count(&self) -> usize {
        self.translations.len()
    }

    pub(crate) fn translations(&self) -> &BTreeMap<String, String> {
        &self.translations
    }

    pub(crate) fn translations_dirty(&self) -> bool {
        self.translations_dirty
    }

    pub(crate) fn emotes_dirty(&self) -> bool {
        self.emotes_dirty
    }

    pub(crate) fn mark_translations_clean(&mut self) {
        self.translations_dirty = false;
    }

    pub(crate) fn mark_emotes_clean(&mut self) {
        self.emotes_dirty = false;
    }
}
