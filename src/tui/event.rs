//! Event types for the TUI
//!
//! This module implements a dual-channel event architecture:
//! - InputEvent: Priority channel for user input (never dropped)
//! - DataEvent: Timer channel for housekeeping (may be dropped under load)

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Terminal resize (width, height)
    Resize(u16, u16),
}

/// Timer events (data channel - may be dropped under load)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    /// Periodic tick; expires notification toasts
    Tick,
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // View switching
    SwitchToClusters,
    SwitchToSchedules,
    NextPanel,
    PrevPanel,

    // Actions
    Select,
    Toggle,
    EditBounds,
    OpenFilter,
    QuickSearch,
    ClearFilters,
    Delete,
    ExportData,    // 'e' - Export to JSON (default)
    ExportDataCsv, // 'E' - Export to CSV

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Text entry
    TextClear,
    TextBackspace,
    TextChar(char),

    // Mouse actions
    MouseScrollUp,
    MouseScrollDown,

    // Unknown/unhandled
    Unknown,
}

impl KeyAction {
    /// Map a mouse event to an action
    pub fn from_mouse_event(event: MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;

        match event.kind {
            MouseEventKind::ScrollUp => KeyAction::MouseScrollUp,
            MouseEventKind::ScrollDown => KeyAction::MouseScrollDown,
            _ => KeyAction::Unknown,
        }
    }

    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, in_text_mode: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        // Text entry keeps arrows and Tab for moving between fields
        if in_text_mode {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::Select,
                KeyCode::Backspace => KeyAction::TextBackspace,
                KeyCode::Up => KeyAction::MoveUp,
                KeyCode::Down => KeyAction::MoveDown,
                KeyCode::Left => KeyAction::MoveLeft,
                KeyCode::Right => KeyAction::MoveRight,
                KeyCode::Tab => KeyAction::NextPanel,
                KeyCode::BackTab => KeyAction::PrevPanel,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::TextClear
                }
                // Other Ctrl/Alt chords are not text
                KeyCode::Char(_)
                    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    KeyAction::Unknown
                }
                KeyCode::Char(c) => KeyAction::TextChar(c),
                _ => KeyAction::Unknown,
            };
        }

        // Normal mode mappings
        match code {
            // Quit
            KeyCode::Char('q') => KeyAction::Quit,

            // Ctrl+ combinations must come before bare character matches
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageDown,
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageUp,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('h') | KeyCode::Left => KeyAction::MoveLeft,
            KeyCode::Char('l') | KeyCode::Right => KeyAction::MoveRight,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::PageUp => KeyAction::PageUp,

            // View switching
            KeyCode::Char('1') => KeyAction::SwitchToClusters,
            KeyCode::Char('2') => KeyAction::SwitchToSchedules,
            KeyCode::Tab => KeyAction::NextPanel,
            KeyCode::BackTab => KeyAction::PrevPanel,

            // Actions
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char(' ') => KeyAction::Toggle,
            KeyCode::Char('b') => KeyAction::EditBounds,
            KeyCode::Char('f') => KeyAction::OpenFilter,
            KeyCode::Char('/') => KeyAction::QuickSearch,
            KeyCode::Char('x') => KeyAction::ClearFilters,
            KeyCode::Char('d') | KeyCode::Delete => KeyAction::Delete,
            KeyCode::Char('e') => KeyAction::ExportData,
            KeyCode::Char('E') => KeyAction::ExportDataCsv,

            // Help
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_action_quit() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('q')), false), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(ctrl_c, false), KeyAction::Quit);
        assert_eq!(KeyAction::from_key_event(ctrl_c, true), KeyAction::Quit);
    }

    #[test]
    fn test_key_action_navigation() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('j')), false), KeyAction::MoveDown);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('k')), false), KeyAction::MoveUp);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('l')), false), KeyAction::MoveRight);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Tab), false), KeyAction::NextPanel);
    }

    #[test]
    fn test_text_mode_takes_characters() {
        // 'q' and space are text while typing
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('q')), true),
            KeyAction::TextChar('q')
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char(' ')), true),
            KeyAction::TextChar(' ')
        );
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Down), true), KeyAction::MoveDown);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Tab), true), KeyAction::NextPanel);
    }

    #[test]
    fn test_text_mode_ignores_chords() {
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(ctrl_w, true), KeyAction::Unknown);
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(KeyAction::from_key_event(alt_x, true), KeyAction::Unknown);
        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(KeyAction::from_key_event(shifted, true), KeyAction::TextChar('W'));
    }

    #[test]
    fn test_text_mode_ctrl_u() {
        // In text mode, Ctrl+U clears input
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(event, true), KeyAction::TextClear);

        // In normal mode, Ctrl+U is page up
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::PageUp);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char(' ')), false), KeyAction::Toggle);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('b')), false), KeyAction::EditBounds);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('x')), false), KeyAction::ClearFilters);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('d')), false), KeyAction::Delete);
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('2')), false),
            KeyAction::SwitchToSchedules
        );
    }
}
