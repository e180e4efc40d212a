//! Rate-limited translation of ordinary chat messages.
//!
//! The gate screens each message through the content filters, enforces a
//! per-sender cooldown, prefers user-registered overrides, and only then calls
//! the external [`Translator`]. Failures are logged and otherwise swallowed:
//! a broken translation service must never stall the chat loop.

mod filters;
mod translator;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parrot_irc::ChatEvent;
use tracing::{debug, warn};

use crate::dispatch::Outbox;
use crate::store::OverrideStore;

pub use filters::{SkipReason, TargetScript, contains_url, is_numeric_expression, screen};
#[cfg(test)]
pub use translator::MockTranslator;
pub use translator::{HttpTranslator, TranslateError, Translator};

pub(crate) const TRANSLATION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::translation");

/// What the gate did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// A filter or the cooldown declined the message.
    Skipped(SkipReason),
    /// A registered override was posted.
    Override,
    /// The translator's output was posted.
    Translated,
    /// The translator returned nothing new; nothing was posted.
    Unchanged,
    /// The translator failed; nothing was posted.
    Failed,
}

/// Translation gate state: the translator and the per-sender cooldowns.
pub struct TranslationGate {
    translator: Box<dyn Translator>,
    target_language: String,
    script: Option<TargetScript>,
    cooldown: Duration,
    last_translated: HashMap<String, Instant>,
}

impl std::fmt::Debug for TranslationGate {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TranslationGate")
            .field("target_language", &self.target_language)
            .field("cooldown", &self.cooldown)
            .field("tracked_senders", &self.last_translated.len())
            .finish_non_exhaustive()
    }
}

impl TranslationGate {
    /// Creates a gate translating into `target_language`.
    #[must_use]
    pub fn new(
        translator: Box<dyn Translator>,
        target_language: impl Into<String>,
        cooldown: Duration,
    ) -> Self {
        let target_language = target_language.into();
        Self {
            script: TargetScript::from_language(&target_language),
            translator,
            target_language,
            cooldown,
            last_translated: HashMap::new(),
        }
    }

    /// Screens `event` and posts a translation when it passes.
    pub fn consider(
        &mut self,
        event: &ChatEvent,
        overrides: &OverrideStore,
        now: Instant,
        outbox: &mut Outbox,
    ) -> TranslationOutcome {
        if let Some(reason) = screen(event, self.script) {
            return self.skip(event, reason);
        }
        let sender = event.login().to_lowercase();
        if self.is_cooling_down(&sender, now) {
            return self.skip(event, SkipReason::CoolingDown);
        }

        if let Some(stored) = overrides.lookup(event.body()) {
            outbox.say(&announcement(event, stored));
            self.last_translated.insert(sender, now);
            return TranslationOutcome::Override;
        }

        match self.translator.translate(event.body(), &self.target_language) {
            Ok(translated) if translated.is_empty() || translated == event.body() => {
                debug!(
                    target: TRANSLATION_TARGET,
                    sender = %event.login(),
                    "translation returned nothing new"
                );
                TranslationOutcome::Unchanged
            }
            Ok(translated) => {
                outbox.say(&announcement(event, &translated));
                self.last_translated.insert(sender, now);
                TranslationOutcome::Translated
            }
            Err(error) => {
                warn!(
                    target: TRANSLATION_TARGET,
                    sender = %event.login(),
                    error = %error,
                    "translation failed"
                );
                TranslationOutcome::Failed
            }
        }
    }

    /// Forgets senders whose cooldown has lapsed, returning how many.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.last_translated.len();
        let cooldown = self.cooldown;
        self.last_translated
            .retain(|_, last| now.saturating_duration_since(*last) < cooldown);
        before - self.last_translated.len()
    }

    /// Number of senders currently tracked for cooldown.
    #[must_use]
    pub fn tracked_senders(&self) -> usize {
        self.last_translated.len()
    }

    fn is_cooling_down(&self, sender: &str, now: Instant) -> bool {
        self.last_translated
            .get(sender)
            .is_some_and(|last| now.saturating_duration_since(*last) < self.cooldown)
    }

    fn skip(&self, event: &ChatEvent, reason: SkipReason) -> TranslationOutcome {
        debug!(
            target: TRANSLATION_TARGET,
            sender = %event.login(),
            reason = %reason,
            "message not translated"
        );
        TranslationOutcome::Skipped(reason)
    }
}

fn announcement(event: &ChatEvent, text: &str) -> String {
    format!("🌐 TL | {}: {text}", event.display_name())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use parrot_irc::TagMap;
    use rstest::{fixture, rstest};

    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(3);

    fn event(login: &str, body: &str) -> ChatEvent {
        ChatEvent::new(login, "", body, TagMap::default())
    }

    fn gate(translator: MockTranslator) -> TranslationGate {
        TranslationGate::new(Box::new(translator), "th", COOLDOWN)
    }

    #[fixture]
    fn outbox() -> Outbox {
        Outbox::new("streamer")
    }

    fn posted(outbox: &Outbox) -> Vec<String> {
        outbox.lines().iter().map(ToString::to_string).collect()
    }

    #[rstest]
    fn posts_translation(mut outbox: Outbox) {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .with(eq("hello"), eq("th"))
            .times(1)
            .returning(|_, _| Ok("สวัสดี".to_owned()));
        let mut gate = gate(translator);

        let outcome = gate.consider(
            &event("viewer", "hello"),
            &OverrideStore::default(),
            Instant::now(),
            &mut outbox,
        );

        assert_eq!(outcome, TranslationOutcome::Translated);
        assert_eq!(posted(&outbox), vec!["PRIVMSG #streamer :🌐 TL | viewer: สวัสดี"]);
    }

    #[rstest]
    fn numeric_expression_never_reaches_translator(mut outbox: Outbox) {
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        let mut gate = gate(translator);

        let outcome = gate.consider(
            &event("viewer", "123 + 456 = 579"),
            &OverrideStore::default(),
            Instant::now(),
            &mut outbox,
        );

        assert_eq!(outcome, TranslationOutcome::Skipped(SkipReason::NumericOnly));
        assert!(outbox.is_empty());
    }

    #[rstest]
    fn cooldown_allows_one_post_per_window(mut outbox: Outbox) {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(2)
            .returning(|_, _| Ok("แปลแล้ว".to_owned()));
        let mut gate = gate(translator);
        let overrides = OverrideStore::default();
        let start = Instant::now();

        gate.consider(&event("viewer", "first"), &overrides, start, &mut outbox);
        let blocked = gate.consider(
            &event("Viewer", "second"),
            &overrides,
            start + Duration::from_secs(2),
            &mut outbox,
        );
        gate.consider(
            &event("viewer", "third"),
            &overrides,
            start + COOLDOWN,
            &mut outbox,
        );

        assert_eq!(blocked, TranslationOutcome::Skipped(SkipReason::CoolingDown));
        assert_eq!(outbox.lines().len(), 2);
    }

    #[rstest]
    fn override_bypasses_translator(mut outbox: Outbox) {
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        let mut gate = gate(translator);
        let mut overrides = OverrideStore::default();
        overrides.register_translation("hello", "หวัดดีจ้า");

        let outcome = gate.consider(
            &ChatEvent::new("viewer", "Viewer", "hello", TagMap::default()),
            &overrides,
            Instant::now(),
            &mut outbox,
        );

        assert_eq!(outcome, TranslationOutcome::Override);
        assert_eq!(posted(&outbox), vec!["PRIVMSG #streamer :🌐 TL | Viewer: หวัดดีจ้า"]);
        assert_eq!(gate.tracked_senders(), 1);
    }

    #[rstest]
    #[case(Ok(String::new()), TranslationOutcome::Unchanged)]
    #[case(Ok("hello".to_owned()), TranslationOutcome::Unchanged)]
    #[case(Err(TranslateError::UnexpectedShape), TranslationOutcome::Failed)]
    fn unusable_results_post_nothing(
        mut outbox: Outbox,
        #[case] result: Result<String, TranslateError>,
        #[case] expected: TranslationOutcome,
    ) {
        let mut translator = MockTranslator::new();
        translator.expect_translate().return_once(move |_, _| result);
        let mut gate = gate(translator);

        let outcome = gate.consider(
            &event("viewer", "hello"),
            &OverrideStore::default(),
            Instant::now(),
            &mut outbox,
        );

        assert_eq!(outcome, expected);
        assert!(outbox.is_empty());
        assert_eq!(gate.tracked_senders(), 0, "failures must not charge the cooldown");
    }

    #[rstest]
    fn prune_drops_only_lapsed_senders(mut outbox: Outbox) {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _| Ok("แปล".to_owned()));
        let mut gate = gate(translator);
        let overrides = OverrideStore::default();
        let start = Instant::now();
        gate.consider(&event("early", "one"), &overrides, start, &mut outbox);
        gate.consider(
            &event("late", "two"),
            &overrides,
            start + Duration::from_secs(2),
            &mut outbox,
        );

        assert_eq!(gate.prune(start + Duration::from_secs(4)), 1);
        assert_eq!(gate.tracked_senders(), 1);
    }
}
