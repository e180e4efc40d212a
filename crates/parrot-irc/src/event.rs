//! Classification of framed inbound lines.
//!
//! [`parse_line`] is a small tokenizer rather than a pattern match over the
//! whole line: it peels off the tag segment, checks for a keepalive, and then
//! splits around the `PRIVMSG` verb. Anything that is neither a keepalive nor
//! a chat post is reported as [`InboundLine::Unrecognized`]; chat posts that
//! lack a sender or a body are not worth dispatching and yield `None`.

use crate::tags::TagMap;

const TAG_MARKER: char = '@';
const KEEPALIVE_VERB: &str = "PING";
const CHAT_INFIX: &str = " PRIVMSG ";
const DISPLAY_NAME_TAG: &str = "display-name";

/// A line the engine knows how to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// Server liveness probe; must be answered with a `PONG`.
    Keepalive {
        /// Parameter text following the verb, echoed back in the reply.
        token: String,
    },
    /// A message posted to the channel.
    Chat(ChatEvent),
    /// Any other server traffic (numerics, JOIN, USERSTATE, ...).
    Unrecognized,
}

/// A chat post with its sender resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    display_name: String,
    login: String,
    body: String,
    tags: TagMap,
}

impl ChatEvent {
    /// Builds an event from already-parsed parts.
    ///
    /// An empty `display_name` falls back to `login`.
    #[must_use]
    pub fn new(
        login: impl Into<String>,
        display_name: impl Into<String>,
        body: impl Into<String>,
        tags: TagMap,
    ) -> Self {
        let login = login.into();
        let display_name = display_name.into();
        Self {
            display_name: if display_name.is_empty() {
                login.clone()
            } else {
                display_name
            },
            login,
            body: body.into(),
            tags,
        }
    }

    /// Name shown in chat, taken from the `display-name` tag when present.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Account name from the source prefix.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Trimmed message text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Tags attached to the line.
    #[must_use]
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }
}

/// Parses one framed line (terminator already removed).
///
/// Returns `None` for lines that cannot be dispatched: a tag segment with
/// nothing after it, or a chat post without a sender or body.
#[must_use]
pub fn parse_line(line: &str) -> Option<InboundLine> {
    let (tags, rest) = split_tags(line)?;

    if let Some(params) = rest.strip_prefix(KEEPALIVE_VERB) {
        return Some(InboundLine::Keepalive {
            token: params.trim().to_owned(),
        });
    }

    let Some((prefix, trailing)) = rest.split_once(CHAT_INFIX) else {
        return Some(InboundLine::Unrecognized);
    };

    let login = sender_login(prefix)?;
    let body = trailing
        .split_once(':')
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty())?;
    let display_name = tags
        .get(DISPLAY_NAME_TAG)
        .filter(|name| !name.is_empty())
        .unwrap_or(login)
        .to_owned();

    Some(InboundLine::Chat(ChatEvent {
        display_name,
        login: login.to_owned(),
        body: body.to_owned(),
        tags,
    }))
}

fn split_tags(line: &str) -> Option<(TagMap, &str)> {
    match line.strip_prefix(TAG_MARKER) {
        Some(tagged) => {
            let (segment, rest) = tagged.split_once(' ')?;
            Some((TagMap::parse(segment), rest))
        }
        None => Some((TagMap::default(), line)),
    }
}

fn sender_login(prefix: &str) -> Option<&str> {
    let (head, _) = prefix.split_once('!')?;
    let login = head.trim_start_matches(':');
    (!login.is_empty()).then_some(login)
}
