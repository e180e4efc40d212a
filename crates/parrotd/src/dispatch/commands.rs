//! Handlers for the override store mutation commands.

use parrot_irc::ChatEvent;
use tracing::info;

use super::outbox::Outbox;
use super::router::DISPATCH_TARGET;
use crate::store::OverrideStore;

// Length of `!fix` plus the separator that follows it.
const FIX_PREFIX_CHARS: usize = 5;

/// What a mutation command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A custom translation was stored.
    TranslationRegistered,
    /// The command text was malformed; the requester was told.
    UsageError,
    /// These emotes were newly registered.
    EmotesAdded(Vec<String>),
    /// Every token was already known; nothing was posted.
    NothingAdded,
}

impl CommandOutcome {
    /// Returns true when the command changed persisted state.
    #[must_use]
    pub fn changed_store(&self) -> bool {
        matches!(self, Self::TranslationRegistered | Self::EmotesAdded(_))
    }
}

/// Handles `!fix <text>|<translation>`.
pub fn register_translation(
    event: &ChatEvent,
    overrides: &mut OverrideStore,
    outbox: &mut Outbox,
) -> CommandOutcome {
    let requester = event.display_name();
    let Some((text, translation)) = fix_arguments(event.body()) else {
        outbox.say(&format!("⚠️ {requester} รูปแบบไม่ถูกต้อง"));
        return CommandOutcome::UsageError;
    };
    info!(
        target: DISPATCH_TARGET,
        requester = %event.login(),
        text = %text,
        "custom translation registered"
    );
    overrides.register_translation(text, translation);
    outbox.say(&format!("✅ {requester} บันทึกคำแปลแล้ว"));
    CommandOutcome::TranslationRegistered
}

/// Handles `!addemote <token> ...`.
pub fn add_emotes(
    event: &ChatEvent,
    overrides: &mut OverrideStore,
    outbox: &mut Outbox,
) -> CommandOutcome {
    let added = overrides.add_emotes(event.body().split_whitespace().skip(1));
    if added.is_empty() {
        return CommandOutcome::NothingAdded;
    }
    let joined = added.join(" ");
    info!(
        target: DISPATCH_TARGET,
        requester = %event.login(),
        emotes = %joined,
        "emotes registered"
    );
    outbox.say(&format!("✅ เพิ่มอีโมต: {joined}"));
    CommandOutcome::EmotesAdded(added)
}

/// Splits the `!fix` payload into trimmed source and translation.
///
/// Returns `None` when there is no `|` or the source text is blank.
fn fix_arguments(body: &str) -> Option<(&str, &str)> {
    let payload = body
        .char_indices()
        .nth(FIX_PREFIX_CHARS)
        .and_then(|(index, _)| body.get(index..))
        .unwrap_or_default();
    let (text, translation) = payload.split_once('|')?;
    let text = text.trim();
    (!text.is_empty()).then(|| (text, translation.trim()))
}
