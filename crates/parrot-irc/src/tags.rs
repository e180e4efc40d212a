//! IRCv3 message tags.

use std::collections::HashMap;

/// Tags attached to a single inbound line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: HashMap<String, String>,
}

impl TagMap {
    /// Parses a tag segment such as `display-name=Foo;emote-only=1`.
    ///
    /// The leading `@` must already be removed. Pairs without `=` are
    /// ignored; a repeated key keeps its last value. Values are unescaped.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        let entries = segment
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| (key.to_owned(), unescape_value(value)))
            .collect();
        Self { entries }
    }

    /// Looks up a tag value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true when `key` is present with the value `1`.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    /// Number of parsed tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the line carried no usable tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some(':') => out.push(';'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
