//! App state - pure data structure with no I/O logic

use crate::app::coordinator::LookupCoordinator;
use crate::messages::RenderState;
use crate::models::{Definitions, Suggestions};

/// What the main pane shows
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultView {
    /// Nothing looked up yet
    #[default]
    Welcome,
    /// Definitions for the word that was looked up
    Definitions { word: String, definitions: Definitions },
    /// The API knew the word but returned no entries
    NoEntries { word: String },
}

/// Alternate spellings offered after a lookup with no direct match
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionMenu {
    pub word: String,
    pub suggestions: Suggestions,
    pub selected: usize,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Search input
    pub query: String,
    pub cursor_position: usize,

    // Lookups
    pub coordinator: LookupCoordinator,

    // Result pane
    pub view: ResultView,
    pub scroll: u16,
    /// Last line the result pane may scroll to
    pub max_scroll: u16,

    // Status bar
    pub status: String,

    // Popups
    pub suggestions: Option<SuggestionMenu>,
    pub error_notice: Option<String>,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            query: String::new(),
            cursor_position: 0,
            coordinator: LookupCoordinator::new(),
            view: ResultView::Welcome,
            scroll: 0,
            max_scroll: 0,
            status: String::from("Application Started!"),
            suggestions: None,
            error_notice: None,
            show_help: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.coordinator.is_in_flight()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let status = match self.coordinator.pending() {
            Some(pending) => format!("Searching {} ...", pending.word),
            None => self.status.clone(),
        };

        RenderState {
            query: self.query.clone(),
            cursor_position: self.cursor_position,
            is_loading: self.is_loading(),
            view: self.view.clone(),
            scroll: self.scroll,
            status,
            suggestions: self.suggestions.clone(),
            error_notice: self.error_notice.clone(),
            show_help: self.show_help,
        }
    }
}
