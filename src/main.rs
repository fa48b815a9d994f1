//! Webster TUI - Actor-based terminal dictionary
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine and lookup coordinator
//! - Network Layer (Tokio) - one async task per lookup

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use webster_tui::app::state::ResultView;
use webster_tui::app::AppActor;
use webster_tui::config::Config;
use webster_tui::constants::APP_NAME;
use webster_tui::messages::ui_events::{key_to_ui_event, Overlay};
use webster_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use webster_tui::network::{NetworkActor, TransportClient};
use webster_tui::ui::{centered_rect, definition_lines, render_suggestions};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Fail before the terminal is taken over
    let config = Config::from_env()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(?config, "Application started");

    let client = TransportClient::new(&config).context("Failed to create HTTP client")?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    if let Some(term) = config.initial_term.clone() {
        let _ = ui_tx.send(UiEvent::Lookup(term));
    }

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Application shutdown");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(event) =
                    key_to_ui_event(key, current_state.overlay(), current_state.query.is_empty())
                {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Definitions
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(f, state, chunks[0]);
    draw_results(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);

    match state.overlay() {
        Overlay::Help => draw_help_popup(f, area),
        Overlay::Error => draw_error_popup(f, state, area),
        Overlay::Suggestions => draw_suggestions_popup(f, state, area),
        Overlay::None => {}
    }
}

fn draw_search_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.is_loading { " [...]" } else { "" };
    let focused = state.overlay() == Overlay::None;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
        .title(format!(" {} - Search{} ", APP_NAME, loading));

    let input = Paragraph::new(state.query.as_str()).block(block);
    f.render_widget(input, area);

    if focused {
        let column = state.query[..state.cursor_position].chars().count() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + column + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_results(f: &mut Frame, state: &RenderState, area: Rect) {
    let (title, lines) = match &state.view {
        ResultView::Welcome => (
            String::from(" Definitions "),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Type a word and press Enter to look it up.",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    "  F1 for help, Esc on an empty search to quit.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        ResultView::NoEntries { word } => (
            format!(" {} ", word),
            vec![Line::from(Span::styled(
                format!("  No dictionary entries for \"{}\".", word),
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        ResultView::Definitions { word, definitions } => (
            format!(" {} ({} entries) ", word, definitions.entries.len()),
            definition_lines(definitions),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(" ↑/↓ PgUp/PgDn scroll ").right_aligned());

    let results = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(results, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = Paragraph::new(format!(" {} ", state.status))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_suggestions_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(menu) = &state.suggestions else {
        return;
    };
    let popup_area = centered_rect(40, 50, area);

    let list = render_suggestions(menu.suggestions.iter(), &menu.word);
    let mut list_state = ListState::default();
    list_state.select(Some(menu.selected));

    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_error_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(message) = &state.error_notice else {
        return;
    };
    let popup_area = centered_rect(60, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Lookup failed (Enter/Esc to dismiss) ")
        .style(Style::default().bg(Color::Black));

    let notice = Paragraph::new(message.as_str())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(notice, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 WEBSTER - Keyboard Shortcuts

 SEARCH
   type               Edit search term
   Enter              Look up term
   ← / →              Move cursor
   Esc / Ctrl+U       Clear search

 DEFINITIONS
   ↑ / ↓              Scroll
   PgUp / PgDn        Scroll a page

 SUGGESTIONS
   ↑ / ↓              Choose spelling
   Enter              Look it up
   Esc                Close

 GENERAL
   F1 / ?             Toggle this help
   Esc (empty search) Quit
   Ctrl+C             Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
