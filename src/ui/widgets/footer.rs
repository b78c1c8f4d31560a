// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let spans = if app.show_disclaimer {
        Line::from(vec![key("Enter"), Span::raw(" to continue, "), key("Esc"), Span::raw(" to quit.")])
    } else {
        match app.state {
            AppState::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to scan, "),
                key("Tab"),
                Span::raw(" for logs, "),
                key("Esc"),
                Span::raw(" to quit."),
            ]),
            AppState::Finished => Line::from(vec![
                key("[N]"),
                Span::raw("ew Scan, "),
                key("[L]"),
                Span::raw("ogs, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
            AppState::Scanning => Line::from(vec![
                Span::raw(format!("{}... Press ", app.stage)),
                key("Q"),
                Span::raw(" to quit."),
            ]),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
