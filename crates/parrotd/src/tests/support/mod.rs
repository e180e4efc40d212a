//! Test harness utilities for the bot's behavioural suites.

mod config_loader;
mod engine;
mod reporter;
mod services;
mod transport;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use engine::{CHANNEL, TempStores, build_engine, privmsg};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use services::{DictionaryTranslator, ScriptedRoller, TestServices};
pub use transport::{Poll, ScriptedConnector};
pub use world::{BootstrapWorld, ChatWorld};
