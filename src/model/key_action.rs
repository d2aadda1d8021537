//! Domain-level keyboard actions independent of key bindings.

use crate::view_state::navigation::NavRequest;

/// Actions a key can be bound to.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the cursor one record up. Default: k/↑
    MoveUp,
    /// Move the cursor one record down. Default: j/↓
    MoveDown,
    /// Jump to the first visible row. Default: H
    MoveTop,
    /// Jump to the last visible row. Default: L
    MoveBottom,
    /// Advance the viewport by one page. Default: f/Page Down
    PageDown,
    /// Move the viewport back by one page. Default: F/Page Up
    PageUp,
    /// Open the highlighted record in the editor. Default: e/→/Enter
    OpenEditor,
    /// Discard loaded results and rerun the search. Default: m
    Restart,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Navigation request for movement actions, `None` for everything else.
    pub fn nav_request(self) -> Option<NavRequest> {
        match self {
            KeyAction::MoveUp => Some(NavRequest::MoveUp),
            KeyAction::MoveDown => Some(NavRequest::MoveDown),
            KeyAction::MoveTop => Some(NavRequest::MoveTop),
            KeyAction::MoveBottom => Some(NavRequest::MoveBottom),
            KeyAction::PageDown => Some(NavRequest::PageDown),
            KeyAction::PageUp => Some(NavRequest::PageUp),
            KeyAction::OpenEditor | KeyAction::Restart | KeyAction::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_actions_map_to_nav_requests() {
        assert_eq!(KeyAction::MoveUp.nav_request(), Some(NavRequest::MoveUp));
        assert_eq!(KeyAction::MoveDown.nav_request(), Some(NavRequest::MoveDown));
        assert_eq!(KeyAction::MoveTop.nav_request(), Some(NavRequest::MoveTop));
        assert_eq!(
            KeyAction::MoveBottom.nav_request(),
            Some(NavRequest::MoveBottom)
        );
        assert_eq!(KeyAction::PageDown.nav_request(), Some(NavRequest::PageDown));
        assert_eq!(KeyAction::PageUp.nav_request(), Some(NavRequest::PageUp));
    }

    #[test]
    fn shell_actions_have_no_nav_request() {
        assert_eq!(KeyAction::OpenEditor.nav_request(), None);
        assert_eq!(KeyAction::Restart.nav_request(), None);
        assert_eq!(KeyAction::Quit.nav_request(), None);
    }
}
