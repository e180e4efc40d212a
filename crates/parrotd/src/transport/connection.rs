//! Line-oriented IRC connection over any byte stream.

use std::io::{self, Read, Write};

use parrot_irc::{LineFramer, OutboundLine};
use tracing::debug;

use super::errors::TransportError;
use super::{ChatTransport, TRANSPORT_TARGET};

const READ_CHUNK_BYTES: usize = 4096;

/// Identity used for the connection handshake.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    nick: String,
    token: Option<String>,
    channel: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("nick", &self.nick)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("channel", &self.channel)
            .finish()
    }
}

impl Credentials {
    /// Builds credentials; `token` is omitted from the handshake when `None`.
    #[must_use]
    pub fn new(nick: impl Into<String>, token: Option<String>, channel: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            token: token.filter(|token| !token.trim().is_empty()),
            channel: channel.into(),
        }
    }

    /// Channel joined after login.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Lines sent once, in order, before the event loop starts.
    #[must_use]
    pub fn handshake(&self) -> Vec<OutboundLine> {
        let mut lines = Vec::with_capacity(4);
        if let Some(token) = &self.token {
            lines.push(OutboundLine::pass(token));
        }
        lines.push(OutboundLine::nick(&self.nick));
        lines.push(OutboundLine::capabilities());
        lines.push(OutboundLine::join(&self.channel));
        lines
    }
}

/// A chat session over `S`.
///
/// Reads rely on the stream's own timeout: a read that times out yields no
/// lines rather than an error.
#[derive(Debug)]
pub struct IrcConnection<S> {
    stream: S,
    framer: LineFramer,
    chunk: Box<[u8]>,
}

impl<S> IrcConnection<S>
where
    S: Read + Write,
{
    /// Wraps an already connected stream.
    pub fn new(stream: S) -> Self {
        Self::with_framer(stream, LineFramer::new())
    }

    /// Wraps a stream with a custom framer.
    pub fn with_framer(stream: S, framer: LineFramer) -> Self {
        Self {
            stream,
            framer,
            chunk: vec![0_u8; READ_CHUNK_BYTES].into_boxed_slice(),
        }
    }

    /// Sends the login and join sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Write`] when any handshake line fails.
    pub fn handshake(&mut self, credentials: &Credentials) -> Result<(), TransportError> {
        for line in credentials.handshake() {
            self.send_line(&line)?;
        }
        debug!(
            target: TRANSPORT_TARGET,
            channel = %credentials.channel(),
            "handshake sent"
        );
        Ok(())
    }

    /// Borrow of the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    fn read_chunk(&mut self) -> Result<usize, TransportError> {
        loop {
            match self.stream.read(&mut self.chunk) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(read) => return Ok(read),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error)
                    if matches!(
                        error.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    return Ok(0);
                }
                Err(source) => return Err(TransportError::Read { source }),
            }
        }
    }
}

impl<S> ChatTransport for IrcConnection<S>
where
    S: Read + Write,
{
    fn poll_lines(&mut self) -> Result<Vec<String>, TransportError> {
        let read = self.read_chunk()?;
        if read > 0 {
            let chunk = self.chunk.get(..read).unwrap_or_default();
            self.framer.push(chunk)?;
        }
        Ok(self.framer.drain().collect())
    }

    fn send_line(&mut self, line: &OutboundLine) -> Result<(), TransportError> {
        self.stream
            .write_all(&line.to_wire())
            .and_then(|()| self.stream.flush())
            .map_err(|source| TransportError::Write {
                command: command_name(line),
                source,
            })
    }
}

fn command_name(line: &OutboundLine) -> String {
    line.as_str()
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_owned()
}
