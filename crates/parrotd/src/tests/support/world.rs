//! BDD test worlds for the bootstrap and chat suites.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::bootstrap::{BootstrapError, Bot, ConfigLoader, bootstrap_with};
use crate::dispatch::{ChatEngine, Outbox};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::engine::{CHAMBERS, CHANNEL, TempStores, build_engine, privmsg};
use super::reporter::RecordingHealthReporter;
use super::services::TestServices;

/// Scenario world for bootstrap steps.
pub struct BootstrapWorld {
    pub data: TempStores,
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    services: TestServices,
    bot: Option<Bot>,
    bootstrap_error: Option<BootstrapError>,
}

impl BootstrapWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        let data = TempStores::new();
        let loader = Box::new(TestConfigLoader::new(data.paths().data_dir().to_path_buf()));
        Self {
            data,
            loader,
            reporter: Arc::new(RecordingHealthReporter::default()),
            services: TestServices::default(),
            bot: None,
            bootstrap_error: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
    }

    /// Installs a loader whose configuration fails validation.
    pub fn use_zero_chamber_loader(&mut self) {
        self.loader = Box::new(
            TestConfigLoader::new(self.data.paths().data_dir().to_path_buf()).with_chambers(0),
        );
    }

    /// Writes `contents` into the emote store before bootstrap.
    pub fn seed_emote_store(&self, contents: &str) {
        fs::write(self.data.paths().emotes(), contents).expect("failed to seed emote store");
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.bot.is_some() || self.bootstrap_error.is_some() {
            return;
        }
        match bootstrap_with(&*self.loader, self.reporter.clone(), &self.services) {
            Ok(bot) => self.bot = Some(bot),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    #[must_use]
    pub fn bot(&self) -> Option<&Bot> {
        self.bot.as_ref()
    }

    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }
}

/// Scenario world for chat flows: one engine, a virtual clock, and every line
/// the bot has written so far.
pub struct ChatWorld {
    stores: TempStores,
    pub services: TestServices,
    engine: ChatEngine,
    start: Instant,
    elapsed: Duration,
    outbox: Outbox,
    written: Vec<String>,
}

impl ChatWorld {
    #[must_use]
    pub fn new() -> Self {
        let stores = TempStores::new();
        let services = TestServices::default();
        let start = Instant::now();
        let engine = build_engine(stores.paths(), &services, CHAMBERS, start);
        Self {
            stores,
            services,
            engine,
            start,
            elapsed: Duration::ZERO,
            outbox: Outbox::new(CHANNEL),
            written: Vec::new(),
        }
    }

    /// Reloads the revolver with the bullet in `chamber`.
    pub fn load_bullet(&mut self, chamber: u8) {
        self.engine = build_engine(self.stores.paths(), &self.services, chamber, self.start);
    }

    /// Feeds a chat message from `login`.
    pub fn say(&mut self, login: &str, body: &str) {
        self.receive(&privmsg(login, body));
    }

    /// Feeds a raw server line.
    pub fn receive(&mut self, line: &str) {
        let now = self.now();
        self.engine.handle_line(line, now, &mut self.outbox);
        self.written
            .extend(self.outbox.drain().map(|line| line.to_string()));
    }

    /// Advances the virtual clock.
    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    /// Writes every dirty store.
    pub fn flush(&mut self) {
        let now = self.now();
        self.engine.flush_now(now).expect("flush should succeed");
    }

    #[must_use]
    pub fn engine(&self) -> &ChatEngine {
        &self.engine
    }

    #[must_use]
    pub fn stores(&self) -> &TempStores {
        &self.stores
    }

    /// Every line written, wire form without terminators.
    #[must_use]
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Chat posts only, with the `PRIVMSG #channel :` prefix removed.
    #[must_use]
    pub fn posts(&self) -> Vec<String> {
        let prefix = format!("PRIVMSG #{CHANNEL} :");
        self.written
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix))
            .map(str::to_owned)
            .collect()
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }
}
