// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::{App, AppState};

/// Renders the target URL box. The crawl depth rides along in the title.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Target URL (crawl depth: {}, ↑/↓ to change)", app.crawl_depth);
    let input_block = Block::default().borders(Borders::ALL).title(title);
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    // Show the cursor only while the user can type.
    if matches!(app.state, AppState::Idle) && !app.show_disclaimer {
        frame.set_cursor_position((area.x + app.input.chars().count() as u16 + 1, area.y + 1));
    }
}
