//! Test suites for the bot runtime.

mod chat_behaviour;
mod support;
