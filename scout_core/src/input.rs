//! Query input and the two submit paths.
//!
//! A search can be started by the submit control or by pressing Enter
//! while the input has focus. Both produce a [`Trigger`] that is handed to
//! [`SearchOrchestrator::trigger`](crate::orchestrator::SearchOrchestrator::trigger),
//! which treats them identically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What initiated a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The submit control was activated
    Button,
    /// The submit key was pressed in the query input
    SubmitKey,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Button => f.write_str("button"),
            Trigger::SubmitKey => f.write_str("submit_key"),
        }
    }
}

/// Key events delivered to the query input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Backspace,
    Other,
}

/// Editable query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply a key press. Returns a trigger when the key submits.
    pub fn on_key(&mut self, key: Key) -> Option<Trigger> {
        match key {
            Key::Enter => Some(Trigger::SubmitKey),
            Key::Char(c) => {
                self.text.push(c);
                None
            }
            Key::Backspace => {
                self.text.pop();
                None
            }
            Key::Other => None,
        }
    }

    pub fn click(&self) -> Trigger {
        Trigger::Button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_edits_text() {
        let mut input = QueryInput::new();
        for c in "rusty".chars() {
            assert_eq!(input.on_key(Key::Char(c)), None);
        }
        assert_eq!(input.on_key(Key::Backspace), None);
        assert_eq!(input.on_key(Key::Other), None);
        assert_eq!(input.text(), "rust");
    }

    #[test]
    fn test_enter_submits_without_editing() {
        let mut input = QueryInput::new();
        input.set_text("async rust");
        assert_eq!(input.on_key(Key::Enter), Some(Trigger::SubmitKey));
        assert_eq!(input.text(), "async rust");
    }

    #[test]
    fn test_click_submits() {
        let input = QueryInput::new();
        assert_eq!(input.click(), Trigger::Button);
    }

    #[test]
    fn test_backspace_on_empty_is_harmless() {
        let mut input = QueryInput::new();
        input.on_key(Key::Backspace);
        assert_eq!(input.text(), "");
        input.set_text("x");
        input.clear();
        assert_eq!(input.text(), "");
    }
}
