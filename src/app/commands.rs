//! Command handlers - business logic for processing UI events

use crate::app::coordinator::{Delivered, Rejected};
use crate::app::state::{ResultView, SuggestionMenu};
use crate::app::AppState;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Outcome;
use crate::ui::definition_lines;

impl AppState {
    // ========================
    // Input editing
    // ========================

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let new_pos = self.query[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.query.len() {
            let new_pos = self.query[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.query.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.query.len() {
            self.query.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.query[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.query.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.cursor_position = 0;
    }

    fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.cursor_position = self.query.len();
    }

    // ========================
    // Result scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll);
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(10).min(self.max_scroll);
    }

    // ========================
    // Lookups
    // ========================

    /// Look up whatever is in the search field
    pub fn submit_query(&mut self) -> Option<NetworkCommand> {
        let word = self.query.clone();
        self.submit_lookup(&word)
    }

    /// Look up `word`; a newer lookup supersedes one still in flight
    pub fn submit_lookup(&mut self, word: &str) -> Option<NetworkCommand> {
        match self.coordinator.submit(word) {
            Ok(cmd) => {
                self.suggestions = None;
                Some(cmd)
            }
            Err(Rejected::Blank) => None,
            Err(Rejected::Duplicate) => None,
        }
    }

    // ========================
    // Suggestions menu
    // ========================

    pub fn next_suggestion(&mut self) {
        if let Some(menu) = &mut self.suggestions {
            if !menu.suggestions.is_empty() {
                menu.selected = (menu.selected + 1) % menu.suggestions.len();
            }
        }
    }

    pub fn prev_suggestion(&mut self) {
        if let Some(menu) = &mut self.suggestions {
            if !menu.suggestions.is_empty() {
                menu.selected = if menu.selected == 0 {
                    menu.suggestions.len() - 1
                } else {
                    menu.selected - 1
                };
            }
        }
    }

    /// Look up the highlighted suggestion
    pub fn select_suggestion(&mut self) -> Option<NetworkCommand> {
        let menu = self.suggestions.take()?;
        let word = menu.suggestions.get(menu.selected)?.to_string();
        self.set_query(&word);
        self.submit_lookup(&word)
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions = None;
    }

    // ========================
    // Popups
    // ========================

    pub fn dismiss_error(&mut self) {
        if self.error_notice.take().is_some() {
            self.clear_query();
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Outcome handling
    // ========================

    /// Apply a lookup completion; returns false if it was stale
    pub fn handle_response(&mut self, response: NetworkResponse) -> bool {
        let Some(delivered) = self.coordinator.complete(response) else {
            return false;
        };
        self.apply_outcome(delivered);
        true
    }

    fn apply_outcome(&mut self, delivered: Delivered) {
        let Delivered {
            word,
            outcome,
            time_ms,
        } = delivered;

        match outcome {
            Outcome::Definitions(definitions) if definitions.is_empty() => {
                self.status = format!("No entries for {}", word);
                self.view = ResultView::NoEntries { word };
                self.scroll = 0;
                self.max_scroll = 0;
            }
            Outcome::Definitions(definitions) => {
                self.status = format!(
                    "{}: {} entries, {} senses ({}ms)",
                    word,
                    definitions.entries.len(),
                    definitions.sense_count(),
                    time_ms
                );
                let lines = definition_lines(&definitions).len();
                self.max_scroll = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
                self.view = ResultView::Definitions { word, definitions };
                self.scroll = 0;
                self.clear_query();
            }
            Outcome::Suggestions(suggestions) => {
                self.status = format!("{} not found, {} suggestions", word, suggestions.len());
                self.suggestions = Some(SuggestionMenu {
                    word,
                    suggestions,
                    selected: 0,
                });
            }
            Outcome::Failed(error) => {
                self.status = format!("Lookup for {} failed", word);
                self.error_notice = Some(error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LookupError, TransportError};
    use crate::models::{Definitions, Entry, Sense, SenseCategory, Suggestions};

    fn lookup_id(cmd: Option<NetworkCommand>) -> u64 {
        match cmd {
            Some(NetworkCommand::Lookup { id, .. }) => id,
            other => panic!("expected a lookup, got {:?}", other),
        }
    }

    fn one_sense(text: &str) -> Outcome {
        Outcome::Definitions(Definitions {
            entries: vec![Entry {
                senses: vec![Sense {
                    label: Some("1".into()),
                    text: text.into(),
                    category: SenseCategory::Plain,
                }],
            }],
        })
    }

    fn completed(id: u64, word: &str, outcome: Outcome) -> NetworkResponse {
        NetworkResponse::Completed {
            id,
            word: word.into(),
            outcome,
            time_ms: 12,
        }
    }

    fn type_query(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    #[test]
    fn test_editing_handles_multibyte_chars() {
        let mut state = AppState::new();
        type_query(&mut state, "naïve");
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.query, "nave");
        state.move_cursor_right();
        state.enter_char('s');
        assert_eq!(state.query, "navse");
    }

    #[test]
    fn test_definitions_replace_view_and_clear_query() {
        let mut state = AppState::new();
        type_query(&mut state, "cat");
        let id = lookup_id(state.submit_query());
        assert!(state.is_loading());
        assert_eq!(state.to_render_state().status, "Searching cat ...");

        assert!(state.handle_response(completed(id, "cat", one_sense("a carnivore"))));
        assert!(!state.is_loading());
        assert!(state.query.is_empty());
        assert!(matches!(&state.view, ResultView::Definitions { word, .. } if word == "cat"));
    }

    #[test]
    fn test_only_latest_lookup_reaches_view() {
        let mut state = AppState::new();
        let cat = lookup_id(state.submit_lookup("cat"));
        let dog = lookup_id(state.submit_lookup("dog"));

        assert!(state.handle_response(completed(dog, "dog", one_sense("a canine"))));
        assert!(!state.handle_response(completed(cat, "cat", one_sense("a feline"))));

        match &state.view {
            ResultView::Definitions { word, definitions } => {
                assert_eq!(word, "dog");
                assert_eq!(definitions.entries[0].senses[0].text, "a canine");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_suggestions_open_menu_not_error() {
        let mut state = AppState::new();
        type_query(&mut state, "cta");
        let id = lookup_id(state.submit_query());
        let suggestions = Suggestions(vec!["cat".into(), "act".into(), "cot".into()]);

        state.handle_response(completed(id, "cta", Outcome::Suggestions(suggestions)));
        assert!(state.error_notice.is_none());
        assert_eq!(state.view, ResultView::Welcome);
        assert_eq!(state.query, "cta");

        state.next_suggestion();
        state.next_suggestion();
        state.next_suggestion();
        state.prev_suggestion();
        let cmd = state.select_suggestion();
        assert!(matches!(cmd, Some(NetworkCommand::Lookup { ref word, .. }) if word == "cot"));
        assert_eq!(state.query, "cot");
        assert!(state.suggestions.is_none());
    }

    #[test]
    fn test_failure_shows_dismissible_notice() {
        let mut state = AppState::new();
        type_query(&mut state, "cat");
        let id = lookup_id(state.submit_query());

        let error = LookupError::Transport(TransportError::Status(503));
        state.handle_response(completed(id, "cat", Outcome::Failed(error)));
        assert_eq!(
            state.error_notice.as_deref(),
            Some("Dictionary API returned HTTP 503")
        );

        state.dismiss_error();
        assert!(state.error_notice.is_none());
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_empty_definitions_view() {
        let mut state = AppState::new();
        let id = lookup_id(state.submit_lookup("zzzz"));
        state.handle_response(completed(id, "zzzz", Outcome::Definitions(Definitions::default())));
        assert_eq!(state.view, ResultView::NoEntries { word: "zzzz".into() });
    }

    #[test]
    fn test_scrolling_stops_at_last_definition_line() {
        let mut state = AppState::new();
        state.scroll_down();
        assert_eq!(state.scroll, 0);

        let sense = |text: &str| Sense {
            label: None,
            text: text.into(),
            category: SenseCategory::Verb,
        };
        let definitions = Definitions {
            entries: vec![
                Entry {
                    senses: vec![sense("one"), sense("two")],
                },
                Entry {
                    senses: vec![sense("three"), sense("four")],
                },
            ],
        };
        let id = lookup_id(state.submit_lookup("run"));
        state.handle_response(completed(id, "run", Outcome::Definitions(definitions)));

        // four sense lines plus the blank line between entries
        assert_eq!(state.max_scroll, 4);
        state.scroll_down();
        assert_eq!(state.scroll, 1);
        state.page_down();
        assert_eq!(state.scroll, 4);
        state.scroll_down();
        assert_eq!(state.scroll, 4);
        state.page_up();
        assert_eq!(state.scroll, 0);

        let id = lookup_id(state.submit_lookup("zzzz"));
        state.handle_response(completed(id, "zzzz", Outcome::Definitions(Definitions::default())));
        state.page_down();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_duplicate_and_blank_submissions_send_nothing() {
        let mut state = AppState::new();
        assert!(state.submit_query().is_none());
        lookup_id(state.submit_lookup("cat"));
        assert!(state.submit_lookup("cat").is_none());
    }
}
