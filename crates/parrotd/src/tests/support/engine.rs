//! Builds engines over temporary stores with deterministic collaborators.

use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use parrot_config::StorePaths;
use tempfile::TempDir;

use crate::dispatch::ChatEngine;
use crate::roulette::{Revolver, RouletteEngine};
use crate::store::{FlushSchedule, Stores};
use crate::translation::TranslationGate;

use super::services::TestServices;

pub const BOT_NAME: &str = "parrotbot";
pub const CHANNEL: &str = "streamer";
pub const TRANSLATE_COOLDOWN: Duration = Duration::from_secs(3);
pub const ROULETTE_COOLDOWN: Duration = Duration::from_secs(20);
pub const SAVE_INTERVAL: Duration = Duration::from_secs(30);
pub const TIMEOUT_SECS: u64 = 10;
pub const CHAMBERS: u8 = 6;

/// A temporary data directory and the store paths inside it.
pub struct TempStores {
    _dir: TempDir,
    paths: StorePaths,
}

impl TempStores {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary data directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temporary directory path was not valid UTF-8");
        Self {
            paths: StorePaths::in_directory(root),
            _dir: dir,
        }
    }

    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }
}

/// Loads the stores under `paths` and wires an engine around `services`.
#[must_use]
pub fn build_engine(
    paths: &StorePaths,
    services: &TestServices,
    bullet: u8,
    now: Instant,
) -> ChatEngine {
    let stores = Stores::load(paths.clone()).expect("stores should load");
    ChatEngine::new(
        BOT_NAME,
        stores,
        FlushSchedule::new(SAVE_INTERVAL, now),
        TranslationGate::new(
            Box::new(services.translator.clone()),
            "th",
            TRANSLATE_COOLDOWN,
        ),
        RouletteEngine::new(
            Revolver::loaded(CHAMBERS, bullet),
            Box::new(services.roller.clone()),
            ROULETTE_COOLDOWN,
            TIMEOUT_SECS,
        ),
    )
}

/// Formats a tagged chat line as the server would send it.
#[must_use]
pub fn privmsg(login: &str, body: &str) -> String {
    format!("@display-name={login};emote-only=0 :{login}!{login}@{login}.tmi.twitch.tv PRIVMSG #{CHANNEL} :{body}")
}
