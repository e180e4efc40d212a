//! Defines the unified error surface for bot launch and supervision.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::store::StoreError;

use super::shutdown::ShutdownError;

/// Errors surfaced while launching or supervising the bot process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrapping the bot failed.
    #[error("bot bootstrap failed: {source}")]
    Bootstrap {
        /// Underlying bootstrap error.
        #[source]
        source: BootstrapError,
    },
    /// Signal handlers could not be installed.
    #[error("failed to watch for shutdown signals: {source}")]
    Shutdown {
        /// Underlying shutdown error.
        #[source]
        source: ShutdownError,
    },
    /// The stores could not be written on the way out.
    #[error("failed to write stores during shutdown: {source}")]
    FinalFlush {
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

impl From<BootstrapError> for LaunchError {
    fn from(source: BootstrapError) -> Self {
        Self::Bootstrap { source }
    }
}

impl From<ShutdownError> for LaunchError {
    fn from(source: ShutdownError) -> Self {
        Self::Shutdown { source }
    }
}
