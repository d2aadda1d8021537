//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides the default vi-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Event kind and state flags are ignored. Character keys match with or
    /// without SHIFT since terminals disagree on whether to report it for
    /// uppercase letters.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&normalized) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => self
                .bindings
                .get(&KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT))
                .copied(),
            _ => None,
        }
    }

    /// Bind `key` to `action`, replacing any previous binding.
    #[cfg(test)]
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Single-step movement
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);

        // Top / bottom of the viewport
        bind(KeyCode::Char('H'), KeyModifiers::NONE, KeyAction::MoveTop);
        bind(KeyCode::Char('L'), KeyModifiers::NONE, KeyAction::MoveBottom);

        // Page navigation
        bind(KeyCode::Char('f'), KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::Char('F'), KeyModifiers::NONE, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Editor
        bind(KeyCode::Char('e'), KeyModifiers::NONE, KeyAction::OpenEditor);
        bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::OpenEditor);
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::OpenEditor);

        // Application controls
        bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::Restart);
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_cover_vi_and_arrow_movement() {
        let bindings = KeyBindings::default();
        let none = KeyModifiers::NONE;

        assert_eq!(bindings.get(key(KeyCode::Char('j'), none)), Some(KeyAction::MoveDown));
        assert_eq!(bindings.get(key(KeyCode::Down, none)), Some(KeyAction::MoveDown));
        assert_eq!(bindings.get(key(KeyCode::Char('k'), none)), Some(KeyAction::MoveUp));
        assert_eq!(bindings.get(key(KeyCode::Up, none)), Some(KeyAction::MoveUp));
        assert_eq!(bindings.get(key(KeyCode::PageDown, none)), Some(KeyAction::PageDown));
        assert_eq!(bindings.get(key(KeyCode::Char('F'), none)), Some(KeyAction::PageUp));
    }

    #[test]
    fn uppercase_letters_match_with_or_without_shift() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(KeyAction::MoveTop)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('L'), KeyModifiers::NONE)),
            Some(KeyAction::MoveBottom)
        );
    }

    #[test]
    fn lowercase_and_uppercase_f_page_in_opposite_directions() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('f'), KeyModifiers::NONE)),
            Some(KeyAction::PageDown)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('F'), KeyModifiers::SHIFT)),
            Some(KeyAction::PageUp)
        );
    }

    #[test]
    fn control_is_not_stripped() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn event_kind_and_state_are_ignored() {
        let bindings = KeyBindings::default();
        let event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NUM_LOCK,
        };

        assert_eq!(bindings.get(event), Some(KeyAction::Quit));
    }

    #[test]
    fn editor_has_three_keys() {
        let bindings = KeyBindings::default();
        for code in [KeyCode::Char('e'), KeyCode::Right, KeyCode::Enter] {
            assert_eq!(
                bindings.get(key(code, KeyModifiers::NONE)),
                Some(KeyAction::OpenEditor),
                "{code:?}"
            );
        }
    }

    #[test]
    fn bind_overrides_default() {
        let mut bindings = KeyBindings::default();
        bindings.bind(key(KeyCode::Char('m'), KeyModifiers::NONE), KeyAction::Quit);

        assert_eq!(
            bindings.get(key(KeyCode::Char('m'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
    }
}
