//! Lines written by the bot.

use std::fmt;

use crate::framer::LINE_TERMINATOR;

const DEFAULT_PONG_TOKEN: &str = ":tmi.twitch.tv";
const CAPABILITIES: &str = "twitch.tv/tags twitch.tv/commands";

/// A single outbound protocol line, without its terminator.
///
/// Constructors strip carriage returns and line feeds from interpolated text
/// so user-supplied content can never smuggle in a second command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLine(String);

impl OutboundLine {
    /// Chat post addressed to `channel`.
    #[must_use]
    pub fn privmsg(channel: &str, text: &str) -> Self {
        Self(format!(
            "PRIVMSG {} :{}",
            channel_name(channel),
            single_line(text)
        ))
    }

    /// Moderation directive muting `user` for `seconds`.
    #[must_use]
    pub fn timeout(channel: &str, user: &str, seconds: u64) -> Self {
        Self::privmsg(channel, &format!("/timeout {} {seconds}", single_line(user)))
    }

    /// Reply to a keepalive carrying `token`.
    #[must_use]
    pub fn pong(token: &str) -> Self {
        let token = single_line(token);
        if token.is_empty() {
            Self(format!("PONG {DEFAULT_PONG_TOKEN}"))
        } else {
            Self(format!("PONG {token}"))
        }
    }

    /// Authentication line; the `oauth:` prefix is added when missing.
    #[must_use]
    pub fn pass(token: &str) -> Self {
        let token = single_line(token);
        if token.starts_with("oauth:") {
            Self(format!("PASS {token}"))
        } else {
            Self(format!("PASS oauth:{token}"))
        }
    }

    /// Nickname registration.
    #[must_use]
    pub fn nick(nick: &str) -> Self {
        Self(format!("NICK {}", single_line(nick).to_ascii_lowercase()))
    }

    /// Requests tag and command capabilities.
    #[must_use]
    pub fn capabilities() -> Self {
        Self(format!("CAP REQ :{CAPABILITIES}"))
    }

    /// Joins `channel`.
    #[must_use]
    pub fn join(channel: &str) -> Self {
        Self(format!("JOIN {}", channel_name(channel)))
    }

    /// Line text without the terminator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes to put on the wire, terminator included.
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() + LINE_TERMINATOR.len());
        bytes.extend_from_slice(self.0.as_bytes());
        bytes.extend_from_slice(LINE_TERMINATOR);
        bytes
    }
}

impl fmt::Display for OutboundLine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Normalises a channel name to its lowercase `#name` form.
#[must_use]
pub fn channel_name(raw: &str) -> String {
    format!("#{}", raw.trim().trim_start_matches('#').to_ascii_lowercase())
}

fn single_line(text: &str) -> String {
    text.chars().filter(|ch| !matches!(ch, '\r' | '\n')).collect()
}
