//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render an action-panel button; `accent` colors the label when not selected
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if let Some(color) = accent {
        Style::default().fg(color)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_button_renders_label_inside_border() {
        let mut terminal = Terminal::new(TestBackend::new(14, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render_action_button(frame, frame.area(), "Submit", true, true, None))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let middle: String = (0..14u16).map(|x| buffer[(x, 1u16)].symbol()).collect();
        assert!(middle.contains("Submit"));
        assert_eq!(buffer[(0u16, 0u16)].symbol(), "┌");
    }
}
