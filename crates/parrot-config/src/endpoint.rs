use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// Scheme accepted in endpoint URLs.
const IRC_SCHEME: &str = "irc";

/// Default plaintext IRC port.
pub const DEFAULT_IRC_PORT: u16 = 6667;

/// Chat server the bot connects to.
///
/// Accepts `irc://host:port`, `host:port`, or a bare host (port 6667). In
/// configuration files the endpoint may also be written as a table with
/// `host` and `port` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    port: u16,
}

impl ServerEndpoint {
    /// Builds an endpoint from its parts.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{IRC_SCHEME}://{}:{}", self.host, self.port)
    }
}

impl FromStr for ServerEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EndpointParseError::Empty);
        }
        let candidate = if trimmed.contains("://") {
            trimmed.to_owned()
        } else {
            format!("{IRC_SCHEME}://{trimmed}")
        };
        let url = Url::parse(&candidate)?;
        if url.scheme() != IRC_SCHEME {
            return Err(EndpointParseError::UnsupportedScheme(url.scheme().to_owned()));
        }
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| EndpointParseError::MissingHost(input.to_owned()))?;
        Ok(Self::new(host, url.port().unwrap_or(DEFAULT_IRC_PORT)))
    }
}

impl Serialize for ServerEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Text(String),
    Table {
        host: String,
        #[serde(default = "default_port")]
        port: u16,
    },
}

const fn default_port() -> u16 {
    DEFAULT_IRC_PORT
}

impl<'de> Deserialize<'de> for ServerEndpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match EndpointRepr::deserialize(deserializer)? {
            EndpointRepr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            EndpointRepr::Table { host, port } => Ok(Self::new(host, port)),
        }
    }
}

/// Errors encountered while parsing a [`ServerEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Input was blank.
    #[error("server endpoint is empty")]
    Empty,
    /// Scheme was not `irc`.
    #[error("unsupported server scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing host in '{0}'")]
    MissingHost(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("irc://irc.chat.twitch.tv:6667", "irc.chat.twitch.tv", 6667)]
    #[case("irc.example.net:7000", "irc.example.net", 7000)]
    #[case("localhost", "localhost", DEFAULT_IRC_PORT)]
    fn parses_accepted_forms(#[case] input: &str, #[case] host: &str, #[case] port: u16) {
        let endpoint: ServerEndpoint = input.parse().expect("endpoint should parse");
        assert_eq!(endpoint.host(), host);
        assert_eq!(endpoint.port(), port);
    }

    #[rstest]
    #[case("")]
    #[case("https://irc.chat.twitch.tv")]
    fn rejects_invalid_forms(#[case] input: &str) {
        assert!(input.parse::<ServerEndpoint>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let endpoint = ServerEndpoint::new("127.0.0.1", 6697);
        assert_eq!(endpoint.to_string(), "irc://127.0.0.1:6697");
        assert_eq!(endpoint.to_string().parse::<ServerEndpoint>().ok(), Some(endpoint));
    }
}
