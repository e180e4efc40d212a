//! Chat command classification.

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Handler a chat message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `!rr`: the chance game.
    Roulette,
    /// `!fix`: register a custom translation.
    FixTranslation,
    /// `!addemote`: register emote names.
    AddEmote,
    /// Anything else goes to the translation gate.
    Chat,
}

impl Route {
    /// Classifies a message body; the first matching prefix wins.
    ///
    /// Matching is by plain prefix, so `!rrr` still routes to the game and
    /// `!fixed` to the registration command.
    #[must_use]
    pub fn classify(body: &str) -> Self {
        let body = body.trim();
        if body.starts_with("!rr") {
            Self::Roulette
        } else if body.starts_with("!fix") {
            Self::FixTranslation
        } else if body.starts_with("!addemote") {
            Self::AddEmote
        } else {
            Self::Chat
        }
    }

    /// Stable label used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roulette => "roulette",
            Self::FixTranslation => "fix_translation",
            Self::AddEmote => "add_emote",
            Self::Chat => "chat",
        }
    }
}
