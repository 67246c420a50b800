//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,

    // Address input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    SubmitAddress,

    // Address list
    HighlightNext,
    HighlightPrev,
    ViewHighlighted,
    SyncHighlighted,
    RemoveHighlighted,
    Reload,

    // Transaction table
    ScrollUp,
    ScrollDown,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused panel (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Input,
    Addresses,
    Transactions,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Input => Panel::Addresses,
            Panel::Addresses => Panel::Transactions,
            Panel::Transactions => Panel::Input,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Input => Panel::Transactions,
            Panel::Addresses => Panel::Input,
            Panel::Transactions => Panel::Addresses,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::SubmitAddress),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('a') => Some(UiEvent::StartEditing),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            KeyCode::Char('e') | KeyCode::Enter if active_panel == Panel::Input => {
                Some(UiEvent::StartEditing)
            }
            KeyCode::Up | KeyCode::Char('k') => match active_panel {
                Panel::Addresses => Some(UiEvent::HighlightPrev),
                Panel::Transactions => Some(UiEvent::ScrollUp),
                Panel::Input => None,
            },
            KeyCode::Down | KeyCode::Char('j') => match active_panel {
                Panel::Addresses => Some(UiEvent::HighlightNext),
                Panel::Transactions => Some(UiEvent::ScrollDown),
                Panel::Input => None,
            },
            KeyCode::Enter | KeyCode::Char('v') if active_panel == Panel::Addresses => {
                Some(UiEvent::ViewHighlighted)
            }
            KeyCode::Char('s') if active_panel == Panel::Addresses => {
                Some(UiEvent::SyncHighlighted)
            }
            KeyCode::Char('d') | KeyCode::Delete if active_panel == Panel::Addresses => {
                Some(UiEvent::RemoveHighlighted)
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_address_panel_actions() {
        let map = |c| key_to_ui_event(press(c), Panel::Addresses, InputMode::Normal, false);
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::SyncHighlighted));
        assert_eq!(map(KeyCode::Char('d')), Some(UiEvent::RemoveHighlighted));
        assert_eq!(map(KeyCode::Enter), Some(UiEvent::ViewHighlighted));
        assert_eq!(map(KeyCode::Down), Some(UiEvent::HighlightNext));
    }

    #[test]
    fn test_editing_captures_letters() {
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            Panel::Input,
            InputMode::Editing,
            false,
        );
        assert_eq!(event, Some(UiEvent::CharInput('q')));
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Input, InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::SubmitAddress));
    }

    #[test]
    fn test_help_swallows_keys() {
        let event = key_to_ui_event(
            press(KeyCode::Char('s')),
            Panel::Addresses,
            InputMode::Normal,
            true,
        );
        assert_eq!(event, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Panel::Input, InputMode::Editing, false),
            Some(UiEvent::Quit)
        );
    }
}
