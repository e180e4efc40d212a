//! Roulette survive/dead counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters for one player, serialised as `{"survive": n, "dead": m}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerStats {
    /// Plays the player walked away from.
    #[serde(default)]
    pub survive: u64,
    /// Plays that discharged at the player.
    #[serde(default)]
    pub dead: u64,
}

impl PlayerStats {
    /// Total plays that targeted the player.
    #[must_use]
    pub fn plays(&self) -> u64 {
        self.survive.saturating_add(self.dead)
    }
}

/// How a single play ended for its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayResult {
    /// The chamber was empty.
    Survived,
    /// The chamber held the bullet.
    Died,
}

/// Per-player roulette statistics keyed by lowercase name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsStore {
    players: BTreeMap<String, PlayerStats>,
    dirty: bool,
}

impl StatsStore {
    /// Builds a store from a persisted document.
    ///
    /// Keys differing only in case are merged.
    #[must_use]
    pub fn from_document(document: BTreeMap<String, PlayerStats>) -> Self {
        let mut players: BTreeMap<String, PlayerStats> = BTreeMap::new();
        for (name, stats) in document {
            let entry = players.entry(name.to_lowercase()).or_default();
            entry.survive = entry.survive.saturating_add(stats.survive);
            entry.dead = entry.dead.saturating_add(stats.dead);
        }
        Self {
            players,
            dirty: false,
        }
    }

    /// Increments the counter matching `result` for `player`.
    pub fn record(&mut self, player: &str, result: PlayResult) {
        let entry = self.players.entry(player.to_lowercase()).or_default();
        match result {
            PlayResult::Survived => entry.survive = entry.survive.saturating_add(1),
            PlayResult::Died => entry.dead = entry.dead.saturating_add(1),
        }
        self.dirty = true;
    }

    /// Counters for `player`, zeroed when they never played.
    #[must_use]
    pub fn get(&self, player: &str) -> PlayerStats {
        self.players
            .get(&player.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn document(&self) -> &BTreeMap<String, PlayerStats> {
        &self.players
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_case_insensitive() {
        let mut stats = StatsStore::default();
        stats.record("Nok", PlayResult::Survived);
        stats.record("nok", PlayResult::Died);
        assert_eq!(stats.get("NOK"), PlayerStats { survive: 1, dead: 1 });
        assert_eq!(stats.get("nok").plays(), 2);
    }

    #[test]
    fn document_merges_case_variants() {
        let mut document = BTreeMap::new();
        document.insert("Foo".to_owned(), PlayerStats { survive: 2, dead: 0 });
        document.insert("foo".to_owned(), PlayerStats { survive: 1, dead: 1 });
        let stats = StatsStore::from_document(document);
        assert_eq!(stats.get("foo"), PlayerStats { survive: 3, dead: 1 });
        assert!(!stats.is_dirty());
    }

    #[test]
    fn parses_persisted_shape() {
        let document: BTreeMap<String, PlayerStats> =
            serde_json::from_str(r#"{"nok": {"survive": 4, "dead": 2}}"#).expect("parse");
        assert_eq!(
            StatsStore::from_document(document).get("nok"),
            PlayerStats { survive: 4, dead: 2 }
        );
    }
}
