// src/ui/widgets/disclaimer_popup.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

/// Renders the disclaimer popup on top of the existing UI.
///
/// Shown once at start-up, before the first scan can be started. `Clear`
/// blanks the popup area so the UI underneath does not bleed through.
pub fn render_disclaimer_popup(frame: &mut Frame, area: Rect) {
    let disclaimer_text = Text::from(vec![
        Line::from("BEFORE YOU SCAN".bold().yellow()),
        Line::from(""),
        Line::from("recon-rs queries public services about the target you enter: a DNS-over-HTTPS resolver, an IP ownership provider, and the target's own /robots.txt."),
        Line::from(""),
        Line::from("The lookups are passive, but the target host will see a request for /robots.txt coming from your address, and the third-party providers will see which site you asked about."),
        Line::from(""),
        Line::from("Only scan sites you own or are authorized to assess, and respect the providers' rate limits and terms of use."),
        Line::from(""),
        Line::from("Press ".bold() + "Enter".bold().yellow() + " to continue or ".bold() + "Esc".bold().yellow() + " to quit".bold()),
    ]);

    let block = Block::default()
        .title("Notice")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let popup_area = centered_rect(60, 50, area);

    let popup = Paragraph::new(disclaimer_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// A `Rect` of the given percentages, centered in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
