//! Shared configuration for the parrot chat bot.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file
//! (`parrot.toml` or `--config-path`), then `PARROT_*` environment variables,
//! then command-line flags. The resolved [`Config`] is plain data; derived
//! values such as durations and store paths are exposed through accessors so
//! the daemon never re-interprets raw numbers.

mod defaults;
mod endpoint;
mod logging;
mod paths;

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_BOT_USERNAME, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LOG_FILTER,
    DEFAULT_POLL_TIMEOUT_MS, DEFAULT_RECONNECT_DELAY_SECS, DEFAULT_RECONNECT_MAX_DELAY_SECS,
    DEFAULT_ROULETTE_CHAMBERS, DEFAULT_ROULETTE_COOLDOWN_SECS, DEFAULT_ROULETTE_TIMEOUT_SECS,
    DEFAULT_SAVE_INTERVAL_SECS, DEFAULT_SERVER_HOST, DEFAULT_TARGET_LANGUAGE,
    DEFAULT_TRANSLATE_COOLDOWN_SECS, DEFAULT_TRANSLATOR_ENDPOINT,
    DEFAULT_TRANSLATOR_TIMEOUT_SECS, default_bot_username, default_channel, default_data_dir,
    default_log_filter, default_log_filter_string, default_log_format, default_server_endpoint,
    default_target_language, default_translator_endpoint,
};
pub use endpoint::{DEFAULT_IRC_PORT, EndpointParseError, ServerEndpoint};
pub use logging::{LogFormat, LogFormatParseError};
pub use paths::{StorePaths, StorePathsError};

/// Resolved bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "PARROT")]
pub struct Config {
    /// IRC server to connect to.
    #[ortho_config(default = defaults::default_server_endpoint())]
    #[serde(default = "defaults::default_server_endpoint")]
    pub server: ServerEndpoint,
    /// Nickname the bot authenticates as; its own messages are ignored.
    #[ortho_config(default = defaults::default_bot_username())]
    #[serde(default = "defaults::default_bot_username")]
    pub bot_username: String,
    /// OAuth token without or with the `oauth:` prefix.
    #[serde(default)]
    pub oauth_token: Option<String>,
    /// Channel to join, with or without the leading `#`.
    #[ortho_config(default = defaults::default_channel())]
    #[serde(default = "defaults::default_channel")]
    pub channel: String,
    /// Language code passed to the translator.
    #[ortho_config(default = defaults::default_target_language())]
    #[serde(default = "defaults::default_target_language")]
    pub target_language: String,
    /// HTTP endpoint of the translation service.
    #[ortho_config(default = defaults::default_translator_endpoint())]
    #[serde(default = "defaults::default_translator_endpoint")]
    pub translator_endpoint: String,
    /// Seconds before a translation request is abandoned.
    #[ortho_config(default = defaults::DEFAULT_TRANSLATOR_TIMEOUT_SECS)]
    #[serde(default = "defaults::default_translator_timeout_secs")]
    pub translator_timeout_secs: u64,
    /// Seconds a user waits between translated messages.
    #[ortho_config(default = defaults::DEFAULT_TRANSLATE_COOLDOWN_SECS)]
    #[serde(default = "defaults::default_translate_cooldown_secs")]
    pub translate_cooldown_secs: u64,
    /// Seconds a user waits between roulette pulls.
    #[ortho_config(default = defaults::DEFAULT_ROULETTE_COOLDOWN_SECS)]
    #[serde(default = "defaults::default_roulette_cooldown_secs")]
    pub roulette_cooldown_secs: u64,
    /// Seconds a roulette victim is muted for.
    #[ortho_config(default = defaults::DEFAULT_ROULETTE_TIMEOUT_SECS)]
    #[serde(default = "defaults::default_roulette_timeout_secs")]
    pub roulette_timeout_secs: u64,
    /// Chambers in the shared revolver.
    #[ortho_config(default = defaults::DEFAULT_ROULETTE_CHAMBERS)]
    #[serde(default = "defaults::default_roulette_chambers")]
    pub roulette_chambers: u8,
    /// Seconds between store flushes.
    #[ortho_config(default = defaults::DEFAULT_SAVE_INTERVAL_SECS)]
    #[serde(default = "defaults::default_save_interval_secs")]
    pub save_interval_secs: u64,
    /// Directory holding the JSON stores.
    #[ortho_config(default = defaults::default_data_dir())]
    #[serde(default = "defaults::default_data_dir")]
    pub data_dir: Utf8PathBuf,
    /// Milliseconds a single socket read may wait for data.
    #[ortho_config(default = defaults::DEFAULT_POLL_TIMEOUT_MS)]
    #[serde(default = "defaults::default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// Seconds allowed for opening the connection and for each write.
    #[ortho_config(default = defaults::DEFAULT_CONNECT_TIMEOUT_SECS)]
    #[serde(default = "defaults::default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// First reconnect delay after a dropped session.
    #[ortho_config(default = defaults::DEFAULT_RECONNECT_DELAY_SECS)]
    #[serde(default = "defaults::default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
    /// Cap on the reconnect delay.
    #[ortho_config(default = defaults::DEFAULT_RECONNECT_MAX_DELAY_SECS)]
    #[serde(default = "defaults::default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server_endpoint(),
            bot_username: default_bot_username(),
            oauth_token: None,
            channel: default_channel(),
            target_language: default_target_language(),
            translator_endpoint: default_translator_endpoint(),
            translator_timeout_secs: DEFAULT_TRANSLATOR_TIMEOUT_SECS,
            translate_cooldown_secs: DEFAULT_TRANSLATE_COOLDOWN_SECS,
            roulette_cooldown_secs: DEFAULT_ROULETTE_COOLDOWN_SECS,
            roulette_timeout_secs: DEFAULT_ROULETTE_TIMEOUT_SECS,
            roulette_chambers: DEFAULT_ROULETTE_CHAMBERS,
            save_interval_secs: DEFAULT_SAVE_INTERVAL_SECS,
            data_dir: default_data_dir(),
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            reconnect_delay_secs: DEFAULT_RECONNECT_DELAY_SECS,
            reconnect_max_delay_secs: DEFAULT_RECONNECT_MAX_DELAY_SECS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Server the transport connects to.
    #[must_use]
    pub fn server(&self) -> &ServerEndpoint {
        &self.server
    }

    /// Configured `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Configured log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Where the JSON stores live.
    #[must_use]
    pub fn store_paths(&self) -> StorePaths {
        StorePaths::from_config(self)
    }

    /// Upper bound on a single translator call.
    #[must_use]
    pub fn translator_timeout(&self) -> Duration {
        Duration::from_secs(self.translator_timeout_secs)
    }

    /// Minimum gap between two translations for the same user.
    #[must_use]
    pub fn translate_cooldown(&self) -> Duration {
        Duration::from_secs(self.translate_cooldown_secs)
    }

    /// Minimum gap between two roulette pulls by the same user.
    #[must_use]
    pub fn roulette_cooldown(&self) -> Duration {
        Duration::from_secs(self.roulette_cooldown_secs)
    }

    /// Interval between periodic store flushes.
    #[must_use]
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_secs)
    }

    /// Bounded wait applied to each socket read.
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Limit on connecting and on each blocking write.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// First delay before reconnecting.
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    /// Largest delay between reconnect attempts.
    #[must_use]
    pub fn reconnect_max_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_max_delay_secs.max(self.reconnect_delay_secs))
    }

    /// Checks values the type system cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigValidationError`] found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.bot_username.trim().is_empty() {
            return Err(ConfigValidationError::Blank { field: "bot_username" });
        }
        if self.channel.trim().trim_start_matches('#').is_empty() {
            return Err(ConfigValidationError::Blank { field: "channel" });
        }
        if self.target_language.trim().is_empty() {
            return Err(ConfigValidationError::Blank {
                field: "target_language",
            });
        }
        if self.roulette_chambers == 0 {
            return Err(ConfigValidationError::Zero {
                field: "roulette_chambers",
            });
        }
        if self.poll_timeout_ms == 0 {
            return Err(ConfigValidationError::Zero {
                field: "poll_timeout_ms",
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigValidationError::Zero {
                field: "connect_timeout_secs",
            });
        }
        Ok(())
    }
}

/// Semantic errors in an otherwise well-formed configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required text value was empty.
    #[error("configuration value '{field}' must not be blank")]
    Blank {
        /// Offending field.
        field: &'static str,
    },
    /// A count or duration that must be positive was zero.
    #[error("configuration value '{field}' must be greater than zero")]
    Zero {
        /// Offending field.
        field: &'static str,
    },
}
