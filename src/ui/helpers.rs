use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use crate::models::{Hymn, Language};

/// Two-line list entry for a hymn: number and title, then the first line.
pub(crate) fn hymn_item(hymn: &Hymn, language: Language, favorite: bool) -> ListItem<'static> {
    let mut title = vec![
        Span::styled(
            format!("{:>4}  ", hymn.id),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            hymn.title(language).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if favorite {
        title.push(Span::styled(" ♥", Style::default().fg(Color::Red)));
    }
    let subtitle = Line::from(Span::styled(
        format!("      {}", hymn.first_line(language)),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(vec![Line::from(title), subtitle])
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
