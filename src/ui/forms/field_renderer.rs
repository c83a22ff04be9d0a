//! Field rendering utilities for forms

use crate::state::{FormField, SelectList};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_styles(is_active: bool) -> (Style, Style) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    // Border follows the text color
    (style, style)
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let (style, border_style) = field_styles(is_active);

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Choice fields are cycled, not typed into
    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if display_str.ends_with('\n') {
            lines.push(Line::default());
        }
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a dropdown backed by a backend option list
pub fn draw_select(frame: &mut Frame, area: Rect, label: &str, list: &SelectList, is_active: bool) {
    let (style, border_style) = field_styles(is_active);

    let line = if !list.is_loaded() {
        Line::from(Span::styled(
            "(options not loaded)",
            Style::default().fg(Color::DarkGray),
        ))
    } else if list.items().is_empty() {
        Line::from(Span::styled(
            list.placeholder().to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let position = format!(
            "  {}/{}",
            list.selected_index(),
            list.items().len()
        );
        Line::from(vec![
            Span::styled(format!("◀ {} ▶", list.display_label()), style),
            Span::styled(position, Style::default().fg(Color::DarkGray)),
        ])
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
