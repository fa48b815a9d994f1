//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{ResultView, SuggestionMenu};
use crate::messages::ui_events::Overlay;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Search input
    pub query: String,
    pub cursor_position: usize,
    pub is_loading: bool,

    // Result pane
    pub view: ResultView,
    pub scroll: u16,

    // Status bar
    pub status: String,

    // Popups
    pub suggestions: Option<SuggestionMenu>,
    pub error_notice: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    /// The popup that currently receives key presses
    pub fn overlay(&self) -> Overlay {
        if self.show_help {
            Overlay::Help
        } else if self.error_notice.is_some() {
            Overlay::Error
        } else if self.suggestions.is_some() {
            Overlay::Suggestions
        } else {
            Overlay::None
        }
    }
}
