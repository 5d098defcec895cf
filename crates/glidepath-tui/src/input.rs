use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextStep,
    PrevStep,
    Trigger,
    ToggleMotion,
    ShowHelp,
    ExitMode,
    /// Pointer moved over a terminal cell
    PointerMove { column: u16, row: u16 },
    WheelDown,
    WheelUp,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if app.pending_g {
        if keymap.is_g_prefix(&binding) {
            if let Some(action) = keymap.get_pending_g_action() {
                return action.clone();
            }
        }
        // Any other key cancels the sequence and is handled normally
    } else if keymap.is_g_prefix(&binding) {
        return Action::PendingG;
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    // Terminals disagree on whether uppercase letters carry SHIFT
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_uppercase() && key.modifiers == KeyModifiers::NONE {
            if let Some(action) = keymap.get(&KeyBinding::shift(key.code)) {
                return action.clone();
            }
        }
    }

    Action::None
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Action::PointerMove {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::ScrollDown => Action::WheelDown,
        MouseEventKind::ScrollUp => Action::WheelUp,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, MouseButton};
    use glidepath_core::AppConfig;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        App::new(std::sync::Arc::new(AppConfig::default()), Default::default()).unwrap()
    }

    #[test]
    fn test_default_bindings() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::ScrollDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE), &app, &keymap),
            Action::Trigger
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &app, &keymap),
            Action::Quit
        );
    }

    #[test]
    fn test_uppercase_without_shift_modifier() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::NONE), &app, &keymap),
            Action::JumpToBottom
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('N'), KeyModifiers::SHIFT), &app, &keymap),
            Action::PrevStep
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);

        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_g = true;
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app, &Keymap::default()),
            Action::ExitMode
        );
    }

    #[test]
    fn test_mouse_events() {
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(moved), Action::PointerMove { column: 3, row: 7 });

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..moved
        };
        assert_eq!(handle_mouse_event(wheel), Action::WheelDown);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..moved
        };
        assert_eq!(handle_mouse_event(click), Action::None);
    }
}
