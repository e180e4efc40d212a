//! Runtime for the parrot Twitch chat bot.
//!
//! The bot joins a single channel and reacts to what people write there. It
//! translates ordinary chat into the configured target language, runs the
//! `!rr` roulette game, and lets viewers teach it custom translations
//! (`!fix`) and emote names (`!addemote`).
//!
//! Everything runs on one thread. A bounded-timeout socket read feeds the
//! line framer from [`parrot_irc`]; each framed line is parsed and routed by
//! the [`ChatEngine`], which owns all mutable state. Handlers queue replies in
//! an [`Outbox`] that the supervision loop writes back to the server, so no
//! handler ever sees an IO error. Persisted stores are flushed on a timer,
//! after each lost session, and once more on shutdown.
//!
//! Transport failures end the session and trigger a reconnect with
//! exponential backoff; configuration, telemetry, and store-load failures at
//! bootstrap are fatal. Health reporting hooks emit structured telemetry at
//! each lifecycle step.

mod bootstrap;
mod dispatch;
mod health;
mod process;
mod roulette;
mod store;
mod telemetry;
mod translation;
mod transport;

pub use bootstrap::{
    BootstrapError, Bot, ConfigLoader, ServiceFactory, StaticConfigLoader, SystemConfigLoader,
    SystemServices, bootstrap_with,
};
pub use dispatch::{ChatEngine, CommandOutcome, Dispatch, Outbox, Route};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{Backoff, LaunchError, ShutdownError, ShutdownFlag, ShutdownSignal, run_bot};
pub use roulette::{
    BulletRoller, OsBulletRoller, PlayOutcome, Revolver, RollError, RouletteEngine, Shot,
    parse_target,
};
pub use store::{
    FlushSchedule, OverrideStore, PlayResult, PlayerStats, StatsStore, StoreError, Stores,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use translation::{
    HttpTranslator, SkipReason, TargetScript, TranslateError, TranslationGate,
    TranslationOutcome, Translator, contains_url, is_numeric_expression, screen,
};
pub use transport::{
    ChatTransport, Connector, Credentials, IrcConnection, TcpConnector, TransportError,
};

#[cfg(test)]
mod tests;
