//! The per-line processing pipeline.

use std::time::Instant;

use parrot_irc::{ChatEvent, InboundLine, parse_line};
use tracing::{debug, trace};

use super::commands::{self, CommandOutcome};
use super::outbox::Outbox;
use super::router::{DISPATCH_TARGET, Route};
use crate::roulette::{PlayOutcome, RouletteEngine};
use crate::store::{FlushSchedule, StoreError, Stores};
use crate::translation::{TranslationGate, TranslationOutcome};

/// What happened to one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A keepalive was answered.
    Keepalive,
    /// The line was malformed or carried no sender or body.
    Dropped,
    /// A well-formed line that is not a chat message.
    Unrecognized,
    /// The bot's own message echoed back.
    OwnMessage,
    /// Routed to the chance game.
    Roulette(PlayOutcome),
    /// Routed to a store mutation command.
    Command(CommandOutcome),
    /// Routed to the translation gate.
    Translation(TranslationOutcome),
}

/// Every piece of state the event loop owns.
///
/// All handlers take `&mut self`; nothing is shared across threads.
#[derive(Debug)]
pub struct ChatEngine {
    identity: String,
    stores: Stores,
    schedule: FlushSchedule,
    translation: TranslationGate,
    roulette: RouletteEngine,
}

impl ChatEngine {
    /// Assembles an engine for the bot logged in as `identity`.
    #[must_use]
    pub fn new(
        identity: &str,
        stores: Stores,
        schedule: FlushSchedule,
        translation: TranslationGate,
        roulette: RouletteEngine,
    ) -> Self {
        Self {
            identity: identity.trim().to_lowercase(),
            stores,
            schedule,
            translation,
            roulette,
        }
    }

    /// Parses and handles one framed line, queueing replies in `outbox`.
    pub fn handle_line(&mut self, line: &str, now: Instant, outbox: &mut Outbox) -> Dispatch {
        match parse_line(line) {
            Some(InboundLine::Keepalive { token }) => {
                trace!(target: DISPATCH_TARGET, token = %token, "answering keepalive");
                outbox.pong(&token);
                Dispatch::Keepalive
            }
            Some(InboundLine::Chat(event)) => self.handle_event(&event, now, outbox),
            Some(InboundLine::Unrecognized) => {
                trace!(target: DISPATCH_TARGET, line = %line, "ignoring non-chat line");
                Dispatch::Unrecognized
            }
            None => {
                debug!(target: DISPATCH_TARGET, line = %line, "dropping malformed line");
                Dispatch::Dropped
            }
        }
    }

    /// Routes one parsed chat message.
    pub fn handle_event(&mut self, event: &ChatEvent, now: Instant, outbox: &mut Outbox) -> Dispatch {
        if event.login().is_empty() || event.body().trim().is_empty() {
            return Dispatch::Dropped;
        }
        if event.login().to_lowercase() == self.identity {
            return Dispatch::OwnMessage;
        }

        let route = Route::classify(event.body());
        trace!(
            target: DISPATCH_TARGET,
            sender = %event.login(),
            route = route.as_str(),
            "routing chat message"
        );
        match route {
            Route::Roulette => Dispatch::Roulette(self.roulette.play(
                event,
                self.stores.stats_mut(),
                now,
                outbox,
            )),
            Route::FixTranslation => {
                let outcome =
                    commands::register_translation(event, self.stores.overrides_mut(), outbox);
                self.note_command(&outcome);
                Dispatch::Command(outcome)
            }
            Route::AddEmote => {
                let outcome = commands::add_emotes(event, self.stores.overrides_mut(), outbox);
                self.note_command(&outcome);
                Dispatch::Command(outcome)
            }
            Route::Chat => Dispatch::Translation(self.translation.consider(
                event,
                self.stores.overrides(),
                now,
                outbox,
            )),
        }
    }

    /// Flushes the stores when the schedule says so.
    ///
    /// Returns `Ok(None)` when no flush was due, otherwise the number of
    /// documents written. Cooldown entries that can no longer block anybody
    /// are pruned at the same time. A failed flush leaves the documents dirty
    /// for the next interval.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of a failed write.
    pub fn flush_if_due(&mut self, now: Instant) -> Result<Option<usize>, StoreError> {
        if !self.schedule.is_due(now) {
            return Ok(None);
        }
        self.flush_now(now).map(Some)
    }

    /// Flushes every dirty store immediately.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of a failed write.
    pub fn flush_now(&mut self, now: Instant) -> Result<usize, StoreError> {
        self.schedule.mark_flushed(now);
        let pruned = self.translation.prune(now) + self.roulette.prune(now);
        if pruned > 0 {
            trace!(target: DISPATCH_TARGET, pruned, "pruned lapsed cooldowns");
        }
        self.stores.flush()
    }

    /// Persisted state.
    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Chance game state.
    #[must_use]
    pub fn roulette(&self) -> &RouletteEngine {
        &self.roulette
    }

    fn note_command(&mut self, outcome: &CommandOutcome) {
        if outcome.changed_store() {
            self.schedule.request();
        }
    }
}
