mod backoff;
mod errors;
pub(crate) mod launch;
pub(crate) mod shutdown;

pub use backoff::Backoff;
pub use errors::LaunchError;
pub use launch::run_bot;
pub use shutdown::{ShutdownError, ShutdownFlag, ShutdownSignal};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
