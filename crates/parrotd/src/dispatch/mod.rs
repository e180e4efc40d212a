//! Routing of inbound lines to the bot's handlers.
//!
//! [`ChatEngine`] owns every piece of mutable state. It parses each framed
//! line, answers keepalives, drops malformed and self-authored messages, and
//! routes chat by its leading command to the chance game, the store mutation
//! commands, or the translation gate. Handlers queue their replies in an
//! [`Outbox`] which the supervision loop writes to the transport.

mod commands;
mod engine;
mod outbox;
mod router;

pub use commands::CommandOutcome;
pub use engine::{ChatEngine, Dispatch};
pub use outbox::Outbox;
pub use router::Route;
