//! Establishes chat sessions over TCP.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use parrot_config::{Config, DEFAULT_CONNECT_TIMEOUT_SECS, ServerEndpoint};
use tracing::info;

use super::connection::{Credentials, IrcConnection};
use super::errors::TransportError;
use super::{ChatTransport, TRANSPORT_TARGET};

/// Opens a fresh, logged-in session each time it is called.
pub trait Connector {
    /// Session type produced.
    type Transport: ChatTransport;

    /// Connects, authenticates, and joins the channel.
    fn connect(&mut self) -> Result<Self::Transport, TransportError>;
}

/// Plain TCP connector for the configured chat server.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    endpoint: ServerEndpoint,
    credentials: Credentials,
    poll_timeout: Duration,
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Builds a connector from its parts with the default connect timeout.
    #[must_use]
    pub fn new(endpoint: ServerEndpoint, credentials: Credentials, poll_timeout: Duration) -> Self {
        Self {
            endpoint,
            credentials,
            poll_timeout,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Bounds the TCP connect and every blocking write by `timeout`.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds a connector from the shared configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.server().clone(),
            Credentials::new(
                config.bot_username.clone(),
                config.oauth_token.clone(),
                config.channel.clone(),
            ),
            config.poll_timeout(),
        )
        .with_connect_timeout(config.connect_timeout())
    }

    fn resolve(&self) -> Result<SocketAddr, TransportError> {
        let host = self.endpoint.host();
        let port = self.endpoint.port();
        let mut addrs = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                host: host.to_owned(),
                port,
                source,
            })?;
        addrs.next().ok_or_else(|| TransportError::ResolveEmpty {
            host: host.to_owned(),
            port,
        })
    }
}

impl Connector for TcpConnector {
    type Transport = IrcConnection<TcpStream>;

    fn connect(&mut self) -> Result<Self::Transport, TransportError> {
        let addr = self.resolve()?;
        let stream = TcpStream::connect_timeout(&addr, self.connect_timeout)
            .map_err(|source| TransportError::Connect { addr, source })?;
        stream
            .set_read_timeout(Some(self.poll_timeout))
            .and_then(|()| stream.set_write_timeout(Some(self.connect_timeout)))
            .and_then(|()| stream.set_nodelay(true))
            .map_err(|source| TransportError::Configure { source })?;

        let mut connection = IrcConnection::new(stream);
        connection.handshake(&self.credentials)?;
        info!(
            target: TRANSPORT_TARGET,
            server = %self.endpoint,
            channel = %self.credentials.channel(),
            "connected to chat server"
        );
        Ok(connection)
    }
}
