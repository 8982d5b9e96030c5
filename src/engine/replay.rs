//! Replay buffers and selector state.
//!
//! Every group event is kept under its selector key, whether or not that key is
//! the one being displayed, so the whole view can be rebuilt when the user
//! picks another key.

use std::collections::HashMap;

use crate::data::group::GroupEvent;

#[derive(Debug, Clone)]
pub struct ReplayBuffer {
    events: HashMap<String, Vec<GroupEvent>>,
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuffer {
    /// A buffer holding the (empty) history of key `""`.
    pub fn new() -> Self {
        let mut events = HashMap::new();
        events.insert(String::new(), Vec::new());
        Self { events }
    }

    /// Create the history of `key` if it does not exist yet.
    pub fn ensure_key(&mut self, key: &str) {
        self.events.entry(key.to_string()).or_default();
    }

    /// Append `event` to the history of its selector key.
    pub fn record(&mut self, event: GroupEvent) {
        let key = event.selector_key().to_string();
        self.events.entry(key).or_default().push(event);
    }

    pub fn events(&self, key: &str) -> &[GroupEvent] {
        self.events.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.events.contains_key(key)
    }

    pub fn len(&self, key: &str) -> usize {
        self.events(key).len()
    }

    /// Drop all history and recreate the `""` key.
    pub fn clear(&mut self) {
        self.events.clear();
        self.events.insert(String::new(), Vec::new());
    }
}

/// Selector choices offered to the user and the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorState {
    choices: Vec<String>,
    active: Option<String>,
}

impl SelectorState {
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Key used for drawn-order bookkeeping: the active key or `""`.
    pub fn active_key(&self) -> &str {
        self.active.as_deref().unwrap_or("")
    }

    /// Register `value` as a choice. Returns `true` if it was new. The very
    /// first choice becomes active when nothing is active yet.
    pub fn register(&mut self, value: &str) -> bool {
        if self.choices.iter().any(|c| c == value) {
            return false;
        }
        self.choices.push(value.to_string());
        if self.choices.len() == 1 && self.active.is_none() {
            self.active = Some(value.to_string());
        }
        true
    }

    pub fn set_active(&mut self, value: &str) {
        self.active = Some(value.to_string());
    }

    /// Whether events with selector key `key` are displayed right now.
    pub fn matches(&self, key: &str) -> bool {
        match &self.active {
            None => key.is_empty(),
            Some(active) => active == key,
        }
    }

    pub fn clear(&mut self) {
        self.choices.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_history_always_exists() {
        let mut buf = ReplayBuffer::new();
        assert!(buf.contains_key(""));
        buf.clear();
        assert!(buf.contains_key(""));
        assert!(buf.events("missing").is_empty());
    }

    #[test]
    fn first_choice_becomes_active() {
        let mut sel = SelectorState::default();
        assert!(sel.matches(""));
        assert!(!sel.matches("x"));
        assert!(sel.register("x"));
        assert!(!sel.register("x"));
        sel.register("y");
        assert_eq!(sel.active(), Some("x"));
        assert!(sel.matches("x"));
        assert!(!sel.matches(""));
    }
}
