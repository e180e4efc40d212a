//! Wire-level building blocks for the parrot chat bot.
//!
//! The crate knows how IRC lines look on the wire and nothing else: it frames
//! raw byte chunks into lines, parses lines into structured events, and builds
//! the handful of outbound lines the bot writes. It performs no IO, so every
//! type here can be exercised with plain byte slices and strings.
//!
//! The parser follows the conventions of Twitch's IRC dialect: an optional
//! IRCv3 tag segment (`@key=value;key=value`), a source prefix
//! (`:nick!user@host`), a command, and a trailing parameter introduced by
//! ` :`.

pub mod event;
pub mod framer;
pub mod outbound;
pub mod tags;

pub use event::{ChatEvent, InboundLine, parse_line};
pub use framer::{DEFAULT_MAX_LINE_BYTES, FramerError, LINE_TERMINATOR, LineFramer, Lines};
pub use outbound::{OutboundLine, channel_name};
pub use tags::TagMap;
