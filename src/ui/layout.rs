//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{RELOAD_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Request activity
    let activity = if app.state.submit_state.is_submitting() {
        Span::styled(" ↑ ", Style::default().fg(Color::Yellow))
    } else if app.state.in_flight > 0 {
        Span::styled(" ◌ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(activity);

    spans.push(Span::styled(
        status_hints(),
        Style::default().fg(Color::DarkGray),
    ));

    let backend = app.current_backend();
    spans.push(Span::raw(" | "));
    if backend.is_empty() {
        spans.push(Span::styled("no backend", Style::default().fg(Color::Red)));
    } else {
        spans.push(Span::styled(backend, Style::default().fg(Color::Blue)));
    }

    if let Some(at) = app.state.last_success_at {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("last sent {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints shown in the status bar
fn status_hints() -> String {
    format!("{SUBMIT_SHORTCUT}:submit  {RELOAD_SHORTCUT}:reload options")
}
