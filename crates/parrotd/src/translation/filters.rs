//! Content filters deciding which chat messages are worth translating.

use std::fmt;

use parrot_irc::ChatEvent;

const URL_MARKERS: [&str; 3] = ["http://", "https://", "www."];
const NUMERIC_PUNCTUATION: &[char] = &['.', ',', ':', '+', '-', '*', '/', '=', '(', ')', '%'];
const EMOTE_ONLY_TAG: &str = "emote-only";

// Share of alphabetic characters above which a message counts as already
// written in the target script, expressed as a 3/5 ratio.
const MAJORITY_NUMERATOR: usize = 3;
const MAJORITY_DENOMINATOR: usize = 5;

/// Why the gate declined to translate a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The body looks like a bot command.
    CommandPrefix,
    /// The body contains a link.
    ContainsUrl,
    /// The body is arithmetic or a bare number.
    NumericOnly,
    /// The server flagged the message as emotes only.
    EmoteOnly,
    /// Most letters are already in the target script.
    AlreadyTargetScript,
    /// The sender was translated too recently.
    CoolingDown,
}

impl SkipReason {
    /// Stable label used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommandPrefix => "command_prefix",
            Self::ContainsUrl => "contains_url",
            Self::NumericOnly => "numeric_only",
            Self::EmoteOnly => "emote_only",
            Self::AlreadyTargetScript => "already_target_script",
            Self::CoolingDown => "cooling_down",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Inclusive code point range of the translation target's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetScript {
    first: char,
    last: char,
}

impl TargetScript {
    /// Thai consonants, vowels, marks and digits.
    pub const THAI: Self = Self {
        first: '\u{0E01}',
        last: '\u{0E59}',
    };

    /// Script for a target language code, when one is known.
    #[must_use]
    pub fn from_language(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "th" => Some(Self::THAI),
            _ => None,
        }
    }

    /// Returns true when `character` belongs to the script.
    #[must_use]
    pub fn contains(self, character: char) -> bool {
        (self.first..=self.last).contains(&character)
    }

    /// Returns true when more than three fifths of the letters in `text`
    /// belong to the script. Text without letters never qualifies.
    #[must_use]
    pub fn dominates(self, text: &str) -> bool {
        let mut letters = 0_usize;
        let mut native = 0_usize;
        for character in text.chars().filter(|c| c.is_alphabetic()) {
            letters += 1;
            if self.contains(character) {
                native += 1;
            }
        }
        letters > 0 && native * MAJORITY_DENOMINATOR > letters * MAJORITY_NUMERATOR
    }
}

/// Returns true when `text` contains a web link marker, ignoring case.
#[must_use]
pub fn contains_url(text: &str) -> bool {
    let lowered = text.to_lowercase();
    URL_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Returns true when `text` holds only digits, whitespace and arithmetic
/// punctuation.
#[must_use]
pub fn is_numeric_expression(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || NUMERIC_PUNCTUATION.contains(&c)
        })
}

/// Applies the content filters in order, returning the first that matches.
///
/// The cooldown is not checked here; it depends on gate state.
#[must_use]
pub fn screen(event: &ChatEvent, script: Option<TargetScript>) -> Option<SkipReason> {
    let body = event.body();
    if body.starts_with('!') {
        return Some(SkipReason::CommandPrefix);
    }
    if contains_url(body) {
        return Some(SkipReason::ContainsUrl);
    }
    if is_numeric_expression(body) {
        return Some(SkipReason::NumericOnly);
    }
    if event.tags().is_set(EMOTE_ONLY_TAG) {
        return Some(SkipReason::EmoteOnly);
    }
    if script.is_some_and(|script| script.dominates(body)) {
        return Some(SkipReason::AlreadyTargetScript);
    }
    None
}
