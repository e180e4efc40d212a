//! Outbound lines queued while one inbound line is processed.

use parrot_irc::OutboundLine;

/// Lines produced by handlers, written to the transport by the loop.
///
/// Handlers never touch the connection directly, so a failed write can only
/// ever surface in the supervision loop.
#[derive(Debug, Clone)]
pub struct Outbox {
    channel: String,
    lines: Vec<OutboundLine>,
}

impl Outbox {
    /// Creates an empty outbox posting to `channel`.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            lines: Vec::new(),
        }
    }

    /// Queues a chat message in the joined channel.
    pub fn say(&mut self, text: &str) {
        self.lines.push(OutboundLine::privmsg(&self.channel, text));
    }

    /// Queues a moderation timeout for `user`.
    pub fn timeout(&mut self, user: &str, seconds: u64) {
        self.lines
            .push(OutboundLine::timeout(&self.channel, user, seconds));
    }

    /// Queues a keepalive reply.
    pub fn pong(&mut self, token: &str) {
        self.lines.push(OutboundLine::pong(token));
    }

    /// Queued lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[OutboundLine] {
        &self.lines
    }

    /// Returns true when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes and yields every queued line.
    pub fn drain(&mut self) -> std::vec::Drain<'_, OutboundLine> {
        self.lines.drain(..)
    }
}
