use ratatui::{prelude::*, widgets::*};

use crate::constants::LABEL_WIDTH;
use crate::format::{format_text, FragmentStyle};
use crate::models::{Definitions, Sense, SenseCategory};

/// Category tag color
pub fn category_color(category: SenseCategory) -> Color {
    match category {
        SenseCategory::Plain => Color::DarkGray,
        SenseCategory::Verb => Color::Green,
        SenseCategory::Sls => Color::Magenta,
    }
}

fn fragment_style(style: FragmentStyle) -> Style {
    match style {
        FragmentStyle::Normal => Style::default(),
        FragmentStyle::Bold => Style::default().bold(),
        FragmentStyle::Italic => Style::default().italic(),
        FragmentStyle::Reference => Style::default().fg(Color::Cyan).underlined(),
    }
}

/// One line per sense: label column, formatted text, category tag
pub fn sense_line(sense: &Sense) -> Line<'static> {
    let label = sense.label.as_deref().unwrap_or("");
    let mut spans = vec![Span::styled(
        format!("{:>width$} ", label, width = LABEL_WIDTH),
        Style::default().fg(Color::Yellow).bold(),
    )];

    spans.extend(
        format_text(&sense.text)
            .into_iter()
            .map(|f| Span::styled(f.text, fragment_style(f.style))),
    );

    spans.push(Span::styled(
        format!(" ({})", sense.category),
        Style::default().fg(category_color(sense.category)),
    ));

    Line::from(spans)
}

/// All senses of all entries, with a blank line between entries
pub fn definition_lines(definitions: &Definitions) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, entry) in definitions.entries.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(entry.senses.iter().map(sense_line));
    }

    lines
}

/// Popup area centered in `r`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Renders the suggestion menu
pub fn render_suggestions<'a>(items: impl Iterator<Item = &'a str>, word: &str) -> List<'a> {
    let items: Vec<ListItem> = items.map(ListItem::new).collect();

    List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" Did you mean? ({} not found) ", word))
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ")
}
