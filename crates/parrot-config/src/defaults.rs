use camino::Utf8PathBuf;

use crate::endpoint::ServerEndpoint;
use crate::logging::LogFormat;

/// Twitch's plaintext IRC gateway.
pub const DEFAULT_SERVER_HOST: &str = "irc.chat.twitch.tv";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default nickname and channel.
pub const DEFAULT_BOT_USERNAME: &str = "parrotbot";

/// Language code requested from the translator.
pub const DEFAULT_TARGET_LANGUAGE: &str = "th";

/// Google-compatible translation endpoint.
pub const DEFAULT_TRANSLATOR_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Seconds before the translator call is abandoned.
pub const DEFAULT_TRANSLATOR_TIMEOUT_SECS: u64 = 5;

/// Seconds a user waits between translated messages.
pub const DEFAULT_TRANSLATE_COOLDOWN_SECS: u64 = 3;

/// Seconds a user waits between roulette pulls.
pub const DEFAULT_ROULETTE_COOLDOWN_SECS: u64 = 20;

/// Seconds a roulette victim is muted for.
pub const DEFAULT_ROULETTE_TIMEOUT_SECS: u64 = 10;

/// Chambers in the shared revolver.
pub const DEFAULT_ROULETTE_CHAMBERS: u8 = 6;

/// Seconds between store flushes.
pub const DEFAULT_SAVE_INTERVAL_SECS: u64 = 30;

/// Milliseconds a single socket read may wait for data.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 500;

/// Seconds allowed for opening the connection and for each write.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// First reconnect delay after a dropped session.
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 5;

/// Cap on the reconnect delay.
pub const DEFAULT_RECONNECT_MAX_DELAY_SECS: u64 = 60;

/// Default server endpoint.
pub fn default_server_endpoint() -> ServerEndpoint {
    ServerEndpoint::new(DEFAULT_SERVER_HOST, crate::endpoint::DEFAULT_IRC_PORT)
}

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned bot username.
pub fn default_bot_username() -> String {
    DEFAULT_BOT_USERNAME.to_owned()
}

/// Owned channel name; the bot joins its own channel unless told otherwise.
pub fn default_channel() -> String {
    DEFAULT_BOT_USERNAME.to_owned()
}

/// Owned target language code.
pub fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_owned()
}

/// Owned translator endpoint.
pub fn default_translator_endpoint() -> String {
    DEFAULT_TRANSLATOR_ENDPOINT.to_owned()
}

/// Directory holding the JSON stores: the working directory.
pub fn default_data_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

pub(crate) const fn default_translator_timeout_secs() -> u64 {
    DEFAULT_TRANSLATOR_TIMEOUT_SECS
}

pub(crate) const fn default_translate_cooldown_secs() -> u64 {
    DEFAULT_TRANSLATE_COOLDOWN_SECS
}

pub(crate) const fn default_roulette_cooldown_secs() -> u64 {
    DEFAULT_ROULETTE_COOLDOWN_SECS
}

pub(crate) const fn default_roulette_timeout_secs() -> u64 {
    DEFAULT_ROULETTE_TIMEOUT_SECS
}

pub(crate) const fn default_roulette_chambers() -> u8 {
    DEFAULT_ROULETTE_CHAMBERS
}

pub(crate) const fn default_save_interval_secs() -> u64 {
    DEFAULT_SAVE_INTERVAL_SECS
}

pub(crate) const fn default_poll_timeout_ms() -> u64 {
    DEFAULT_POLL_TIMEOUT_MS
}

pub(crate) const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

pub(crate) const fn default_reconnect_delay_secs() -> u64 {
    DEFAULT_RECONNECT_DELAY_SECS
}

pub(crate) const fn default_reconnect_max_delay_secs() -> u64 {
    DEFAULT_RECONNECT_MAX_DELAY_SECS
}
