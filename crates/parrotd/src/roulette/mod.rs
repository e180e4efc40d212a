//! The `!rr` chance game.
//!
//! One revolver is shared by everybody in the channel. Each guarded play
//! advances it by one chamber; the play that lands on the bullet discharges,
//! the target is timed out, and the revolver is reloaded with a freshly rolled
//! bullet. Players are rate-limited individually.

mod rng;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parrot_irc::ChatEvent;
use tracing::{debug, info, warn};

use crate::dispatch::Outbox;
use crate::store::{PlayResult, StatsStore};

pub use rng::{BulletRoller, OsBulletRoller, RollError};

pub(crate) const ROULETTE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::roulette");

const COMMAND: &str = "!rr";

/// Result of pulling the trigger once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    /// Empty chamber.
    Click,
    /// The chamber held the bullet.
    Bang,
}

/// Shared chamber state.
///
/// `chamber` is the last chamber fired, `0` right after a reload. `bullet`
/// always lies in `1..=chambers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revolver {
    chambers: u8,
    chamber: u8,
    bullet: u8,
}

impl Revolver {
    /// Loads a revolver, rolling the first bullet position.
    ///
    /// # Errors
    ///
    /// Returns a [`RollError`] when `chambers` is zero or no randomness is
    /// available.
    pub fn new(chambers: u8, roller: &mut dyn BulletRoller) -> Result<Self, RollError> {
        let bullet = roller.roll(chambers)?;
        Ok(Self::loaded(chambers, bullet))
    }

    /// Builds a revolver with a known bullet position, clamped into range.
    #[must_use]
    pub fn loaded(chambers: u8, bullet: u8) -> Self {
        let chambers = chambers.max(1);
        Self {
            chambers,
            chamber: 0,
            bullet: bullet.clamp(1, chambers),
        }
    }

    /// Advances one chamber and fires it.
    ///
    /// After a discharge the revolver resets to chamber `0` and re-rolls the
    /// bullet. Should the roll fail, the previous position is kept.
    pub fn pull(&mut self, roller: &mut dyn BulletRoller) -> Shot {
        self.chamber = self.chamber % self.chambers + 1;
        if self.chamber != self.bullet {
            return Shot::Click;
        }
        self.chamber = 0;
        match roller.roll(self.chambers) {
            Ok(bullet) => self.bullet = bullet.clamp(1, self.chambers),
            Err(error) => warn!(
                target: ROULETTE_TARGET,
                error = %error,
                "bullet re-roll failed; keeping previous position"
            ),
        }
        Shot::Bang
    }

    /// Number of chambers.
    #[must_use]
    pub fn chambers(&self) -> u8 {
        self.chambers
    }

    /// Last chamber fired; `0` when freshly loaded.
    #[must_use]
    pub fn chamber(&self) -> u8 {
        self.chamber
    }

    /// Chamber holding the bullet.
    #[must_use]
    pub fn bullet(&self) -> u8 {
        self.bullet
    }
}

/// What a `!rr` command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The actor played too recently; nothing changed.
    CoolingDown,
    /// The trigger was pulled at `target`.
    Played {
        /// Name the shot was aimed at.
        target: String,
        /// What happened.
        shot: Shot,
    },
}

/// Game state: the revolver, its roller, and per-player cooldowns.
pub struct RouletteEngine {
    revolver: Revolver,
    roller: Box<dyn BulletRoller>,
    cooldown: Duration,
    timeout_secs: u64,
    last_played: HashMap<String, Instant>,
}

impl std::fmt::Debug for RouletteEngine {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("RouletteEngine")
            .field("revolver", &self.revolver)
            .field("cooldown", &self.cooldown)
            .field("timeout_secs", &self.timeout_secs)
            .field("tracked_players", &self.last_played.len())
            .finish_non_exhaustive()
    }
}

impl RouletteEngine {
    /// Creates an engine around `revolver`.
    #[must_use]
    pub fn new(
        revolver: Revolver,
        roller: Box<dyn BulletRoller>,
        cooldown: Duration,
        timeout_secs: u64,
    ) -> Self {
        Self {
            revolver,
            roller,
            cooldown,
            timeout_secs,
            last_played: HashMap::new(),
        }
    }

    /// Handles one `!rr` command from `event`.
    pub fn play(
        &mut self,
        event: &ChatEvent,
        stats: &mut StatsStore,
        now: Instant,
        outbox: &mut Outbox,
    ) -> PlayOutcome {
        let actor_key = event.login().to_lowercase();
        let cooling = self
            .last_played
            .get(&actor_key)
            .is_some_and(|last| now.saturating_duration_since(*last) < self.cooldown);
        if cooling {
            debug!(
                target: ROULETTE_TARGET,
                actor = %event.login(),
                "roulette play ignored during cooldown"
            );
            return PlayOutcome::CoolingDown;
        }
        self.last_played.insert(actor_key, now);

        let actor = event.display_name();
        let target = parse_target(event.body()).unwrap_or(actor).to_owned();
        let shot = self.revolver.pull(self.roller.as_mut());
        match shot {
            Shot::Bang => {
                stats.record(&target, PlayResult::Died);
                outbox.say(&format!("💥 {actor} ยิงใส่ {target} — *BANG!*"));
                outbox.timeout(&target, self.timeout_secs);
            }
            Shot::Click => {
                stats.record(&target, PlayResult::Survived);
                outbox.say(&format!("😌 {actor} ยิงใส่ {target} — คลิก! รอด"));
            }
        }
        info!(
            target: ROULETTE_TARGET,
            actor = %event.login(),
            player = %target,
            shot = ?shot,
            chamber = self.revolver.chamber(),
            "roulette trigger pulled"
        );
        PlayOutcome::Played { target, shot }
    }

    /// Forgets players whose cooldown has lapsed, returning how many.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.last_played.len();
        let cooldown = self.cooldown;
        self.last_played
            .retain(|_, last| now.saturating_duration_since(*last) < cooldown);
        before - self.last_played.len()
    }

    /// Current revolver state.
    #[must_use]
    pub fn revolver(&self) -> &Revolver {
        &self.revolver
    }
}

/// Extracts `name` from `!rr @name`.
///
/// The command must be followed by whitespace, then `@`, then at least one
/// word character; the name ends at the first non-word character.
#[must_use]
pub fn parse_target(body: &str) -> Option<&str> {
    let rest = body.strip_prefix(COMMAND)?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }
    let mention = trimmed.strip_prefix('@')?;
    let end = mention
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(mention.len(), |(index, _)| index);
    let name = mention.get(..end)?;
    (!name.is_empty()).then_some(name)
}

fn is_word_char(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}
