//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Search input
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    ClearInput,
    Search,
    /// Look up a term directly, bypassing the search field
    Lookup(String),

    // Result pane
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Suggestions menu
    NextSuggestion,
    PrevSuggestion,
    SelectSuggestion,
    CloseSuggestions,

    // Popups
    DismissError,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Which overlay currently owns the keyboard
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    Error,
    Suggestions,
}

/// Convert a key event to a UI event based on current state
pub fn key_to_ui_event(key: KeyEvent, overlay: Overlay, query_empty: bool) -> Option<UiEvent> {
    // Global shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('u') => Some(UiEvent::ClearInput),
            _ => None,
        };
    }

    match overlay {
        Overlay::Help => Some(UiEvent::CloseHelp),
        Overlay::Error => match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(UiEvent::DismissError),
            _ => None,
        },
        Overlay::Suggestions => match key.code {
            KeyCode::Up => Some(UiEvent::PrevSuggestion),
            KeyCode::Down | KeyCode::Tab => Some(UiEvent::NextSuggestion),
            KeyCode::Enter => Some(UiEvent::SelectSuggestion),
            KeyCode::Esc => Some(UiEvent::CloseSuggestions),
            _ => None,
        },
        Overlay::None => match key.code {
            KeyCode::Esc if query_empty => Some(UiEvent::Quit),
            KeyCode::Esc => Some(UiEvent::ClearInput),
            KeyCode::F(1) => Some(UiEvent::ToggleHelp),
            KeyCode::Enter => Some(UiEvent::Search),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Up => Some(UiEvent::ScrollUp),
            KeyCode::Down => Some(UiEvent::ScrollDown),
            KeyCode::PageUp => Some(UiEvent::PageUp),
            KeyCode::PageDown => Some(UiEvent::PageDown),
            KeyCode::Char('?') if query_empty => Some(UiEvent::ToggleHelp),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
