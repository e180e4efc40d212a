//! Chat server connection.
//!
//! The transport owns the socket and the line framer. It exposes complete
//! lines to the event loop and writes outbound lines back; everything above it
//! works with strings and never sees IO.

mod connection;
mod connector;
mod errors;

use parrot_irc::OutboundLine;

pub use self::connection::{Credentials, IrcConnection};
pub use self::connector::{Connector, TcpConnector};
pub use self::errors::TransportError;

pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// A live chat session.
pub trait ChatTransport {
    /// Waits up to the configured poll timeout and returns the complete lines
    /// received. An empty vector means no data arrived.
    fn poll_lines(&mut self) -> Result<Vec<String>, TransportError>;

    /// Writes one line to the server.
    fn send_line(&mut self, line: &OutboundLine) -> Result<(), TransportError>;
}
