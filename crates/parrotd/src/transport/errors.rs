//! Error types for the chat connection.

use std::io;
use std::net::SocketAddr;

use parrot_irc::FramerError;
use thiserror::Error;

/// Errors that end a chat session.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to resolve chat server {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("no addresses resolved for chat server {host}:{port}")]
    ResolveEmpty { host: String, port: u16 },
    #[error("failed to connect to chat server at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to configure chat socket: {source}")]
    Configure {
        #[source]
        source: io::Error,
    },
    #[error("failed to read from chat server: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{command}' to chat server: {source}")]
    Write {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("chat server sent an oversized line: {source}")]
    Framing {
        #[source]
        source: FramerError,
    },
    #[error("chat server closed the connection")]
    Closed,
}

impl From<FramerError> for TransportError {
    fn from(source: FramerError) -> Self {
        Self::Framing { source }
    }
}
