//! Scan form rendering with action panel

use super::field_renderer::{draw_field, draw_help_text, draw_select};
use crate::app::App;
use crate::state::{FieldId, FormButton, OptionKind, ScanForm, StatusMessage};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the scan form with its action panel
pub fn draw_scan_form(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let form_focused = !form.is_buttons_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Task Update ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(2), // Load / submit messages
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_text_column(frame, columns[0], form);
    draw_option_column(frame, columns[1], form);
    draw_messages(frame, rows[1], app);
    draw_help_text(
        frame,
        rows[2],
        "Tab/↑↓:field  ←→/Space:choose  Enter:next  Esc:clear",
    );
}

/// Backend, task, action, reason and photo fields
fn draw_text_column(frame: &mut Frame, area: Rect, form: &ScanForm) {
    let active = form.active_field_id();
    let ids: Vec<FieldId> = form
        .field_order()
        .into_iter()
        .filter(|id| !matches!(id, FieldId::Option(_)))
        .collect();

    let constraints: Vec<Constraint> = ids
        .iter()
        .map(|id| match id {
            FieldId::Reason => Constraint::Min(4),
            _ => Constraint::Length(3),
        })
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chunk, id) in chunks.iter().zip(ids) {
        if let Some(field) = form.field(id) {
            draw_field(frame, *chunk, field, active == Some(id));
        }
    }
}

/// The six backend-sourced dropdowns
fn draw_option_column(frame: &mut Frame, area: Rect, form: &ScanForm) {
    let active = form.active_field_id();
    let mut constraints = vec![Constraint::Length(3); OptionKind::ALL.len()];
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chunk, kind) in chunks.iter().zip(OptionKind::ALL) {
        draw_select(
            frame,
            *chunk,
            kind.label(),
            form.options.get(kind),
            active == Some(FieldId::Option(kind)),
        );
    }
}

fn message_line<'a>(prefix: &'a str, message: Option<StatusMessage>) -> Line<'a> {
    let mut spans = vec![Span::styled(prefix, Style::default().fg(Color::DarkGray))];
    if let Some(message) = message {
        let color = if message.ok { Color::Green } else { Color::Red };
        spans.push(Span::styled(message.text, Style::default().fg(color)));
    }
    Line::from(spans)
}

/// Inline hints for option loading and submission
fn draw_messages(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        message_line(
            "Options: ",
            app.state.load_state.message().or_else(|| {
                app.state
                    .form
                    .options
                    .is_empty()
                    .then(|| StatusMessage::bad("Not loaded. Press Ctrl+L to load."))
            }),
        ),
        message_line("Submit:  ", app.state.submit_state.message()),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let is_focused = form.is_buttons_row_active();
    let selected = form.selected_form_button();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(Span::styled(
            " Actions ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(BUTTON_HEIGHT); FormButton::ALL.len()];
    constraints.push(Constraint::Min(0));
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    for (chunk, button) in button_chunks.iter().zip(FormButton::ALL) {
        let accent = match button {
            FormButton::Submit => Color::Green,
            FormButton::LoadOptions => Color::Blue,
            FormButton::Clear => Color::Gray,
        };
        render_action_button(
            frame,
            *chunk,
            button.label(),
            is_focused && selected == button,
            button != FormButton::Submit || app.can_submit(),
            Some(accent),
        );
    }
}
