// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// This struct holds `Rect` objects, each representing a specific
/// widget area on the terminal screen. This approach makes it easy to
/// manage and reference the layout without re-calculating dimensions
/// every time a widget needs to be rendered.
pub struct AppLayout {
    pub input: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
    pub log_panel: Rect,
}

/// Creates the complete application layout.
///
/// The frame is split vertically into the target input, the content area and
/// a one-line footer. The content area holds the report and the scan status
/// side by side, plus the log panel when it is toggled on.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
///
/// # Returns
/// An `AppLayout` struct containing the calculated `Rect` for each widget area.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_constraints = if show_logs {
        vec![Constraint::Percentage(45), Constraint::Percentage(20), Constraint::Percentage(35)]
    } else {
        vec![Constraint::Percentage(70), Constraint::Percentage(30)]
    };

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints)
        .split(main_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        report: content_chunks[0],
        summary: content_chunks[1],
        log_panel: if show_logs { content_chunks[2] } else { Rect::default() },
        footer: main_chunks[2],
    }
}
