//! Deterministic translator and roller doubles.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parrot_config::Config;

use crate::bootstrap::ServiceFactory;
use crate::roulette::{BulletRoller, RollError};
use crate::translation::{TranslateError, Translator};

/// Translator answering from a fixed dictionary and counting calls.
///
/// Unknown text comes back unchanged, which the gate treats as "nothing new".
#[derive(Debug, Clone, Default)]
pub struct DictionaryTranslator {
    entries: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<AtomicUsize>,
}

impl DictionaryTranslator {
    pub fn insert(&self, text: &str, translation: &str) {
        self.entries
            .lock()
            .expect("dictionary mutex poisoned")
            .insert(text.to_owned(), translation.to_owned());
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Translator for DictionaryTranslator {
    fn translate(&self, text: &str, _target_language: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().expect("dictionary mutex poisoned");
        Ok(entries.get(text).cloned().unwrap_or_else(|| text.to_owned()))
    }
}

/// Hands out a fixed sequence of bullet positions, then the last chamber.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    positions: Arc<Mutex<VecDeque<u8>>>,
}

impl ScriptedRoller {
    #[must_use]
    pub fn new(positions: impl IntoIterator<Item = u8>) -> Self {
        Self {
            positions: Arc::new(Mutex::new(positions.into_iter().collect())),
        }
    }

    pub fn push(&self, position: u8) {
        self.positions
            .lock()
            .expect("roller mutex poisoned")
            .push_back(position);
    }
}

impl BulletRoller for ScriptedRoller {
    fn roll(&mut self, chambers: u8) -> Result<u8, RollError> {
        if chambers == 0 {
            return Err(RollError::NoChambers);
        }
        let next = self
            .positions
            .lock()
            .expect("roller mutex poisoned")
            .pop_front();
        Ok(next.unwrap_or(chambers))
    }
}

/// Service factory handing out shared test doubles.
#[derive(Debug, Clone, Default)]
pub struct TestServices {
    pub translator: DictionaryTranslator,
    pub roller: ScriptedRoller,
}

impl ServiceFactory for TestServices {
    fn translator(&self, _config: &Config) -> Result<Box<dyn Translator>, TranslateError> {
        Ok(Box::new(self.translator.clone()))
    }

    fn roller(&self) -> Box<dyn BulletRoller> {
        Box::new(self.roller.clone())
    }
}
