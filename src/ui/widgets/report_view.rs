// src/ui/widgets/report_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::models::{DnsRecords, IpInfo, RobotsPolicy, ScanOutcome, ScanResult, ScanStage};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

/// The stages that do work, in execution order.
const PIPELINE: [ScanStage; 4] = [
    ScanStage::Validating,
    ScanStage::ResolvingDns,
    ScanStage::ResolvingIpInfo,
    ScanStage::FetchingRobots,
];

pub fn render_report_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Reconnaissance Report (scroll with ↑ ↓)");

    let lines = match app.state {
        AppState::Idle => {
            let hint = Paragraph::new("Enter a website and press Enter to start a scan.")
                .alignment(Alignment::Center)
                .block(main_block);
            frame.render_widget(hint, area);
            return;
        }
        AppState::Scanning => progress_lines(app.stage, SPINNER_CHARS[app.spinner_frame]),
        AppState::Finished => match &app.outcome {
            Some(outcome) => report_lines(outcome),
            None => Vec::new(),
        },
    };

    app.scroll_offset = app.scroll_offset.min(lines.len().saturating_sub(1));
    app.report_scroll_state = app
        .report_scroll_state
        .content_length(lines.len())
        .position(app.scroll_offset);

    let paragraph = Paragraph::new(lines)
        .block(main_block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin { vertical: 1, horizontal: 0 }),
        &mut app.report_scroll_state,
    );
}

/// One line per pipeline step: done, running or pending.
fn progress_lines(current: ScanStage, spinner: &str) -> Vec<Line<'static>> {
    let current_index = PIPELINE.iter().position(|s| *s == current);
    let mut lines = vec![Line::from("Scanning... Please wait.".bold()), Line::from("")];

    for (index, stage) in PIPELINE.iter().enumerate() {
        let (marker, style) = match current_index {
            Some(i) if index < i => ("✓".to_string(), Style::default().fg(Color::Green)),
            Some(i) if index == i => (spinner.to_string(), Style::default().fg(Color::Cyan)),
            _ => ("·".to_string(), Style::default().fg(Color::DarkGray)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {marker} "), style),
            Span::styled(stage.to_string(), style),
        ]));
    }
    lines
}

fn section(title: &str) -> Line<'static> {
    Line::from(title.to_string().yellow().bold())
}

fn placeholder(text: String) -> Line<'static> {
    Line::from(Span::styled(format!("  {text}"), Style::default().fg(Color::DarkGray).italic()))
}

/// Turns a finished scan into report text. Fields the scan never reached
/// still get a line, so the report always shows all five sections.
pub fn report_lines(outcome: &ScanOutcome) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = &outcome.error {
        lines.push(Line::from(Span::styled(
            format!("✗ {error}"),
            Style::default().fg(Color::Red).bold(),
        )));
        lines.push(Line::from(""));
    }

    let Some(result) = &outcome.result else {
        lines.push(placeholder("No data was collected.".to_string()));
        return lines;
    };

    if let Some(target) = &result.target {
        lines.push(Line::from(vec![
            Span::raw("Target: "),
            Span::styled(format!("{}://{}", target.scheme, target.hostname), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(""));
    }

    push_dns_section(&mut lines, result);
    push_ip_info_section(&mut lines, result);
    push_robots_section(&mut lines, result);

    lines.push(section("WHOIS"));
    lines.push(placeholder(result.whois.to_string()));
    lines.push(Line::from(""));
    lines.push(section("Subdomains"));
    lines.push(placeholder(result.subdomains.to_string()));

    lines
}

fn push_dns_section(lines: &mut Vec<Line<'static>>, result: &ScanResult) {
    lines.push(section("DNS A Records"));
    match &result.dns_records {
        DnsRecords::Addresses(addresses) => {
            for address in addresses {
                lines.push(Line::from(format!("  • {address}")));
            }
        }
        other => lines.push(placeholder(other.to_string())),
    }
    lines.push(Line::from(""));
}

fn push_ip_info_section(lines: &mut Vec<Line<'static>>, result: &ScanResult) {
    lines.push(section("IP Info"));
    match &result.ip_info {
        IpInfo::Record(serde_json::Value::Object(fields)) => {
            for (key, value) in fields {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key}: "), Style::default().fg(Color::DarkGray)),
                    Span::raw(value),
                ]));
            }
        }
        IpInfo::Record(value) => lines.push(Line::from(format!("  {value}"))),
        IpInfo::RawBody(body) => {
            lines.extend(body.lines().map(|line| Line::from(format!("  {line}"))));
        }
        other => lines.push(placeholder(other.to_string())),
    }
    lines.push(Line::from(""));
}

fn push_robots_section(lines: &mut Vec<Line<'static>>, result: &ScanResult) {
    lines.push(section("robots.txt"));
    match &result.robots_policy {
        RobotsPolicy::Found(body) if body.trim().is_empty() => {
            lines.push(placeholder("(empty file)".to_string()));
        }
        RobotsPolicy::Found(body) => {
            lines.extend(body.lines().map(|line| Line::from(format!("  {line}"))));
        }
        RobotsPolicy::FetchError(_) => lines.push(Line::from(Span::styled(
            format!("  {}", result.robots_policy),
            Style::default().fg(Color::Red),
        ))),
        other => lines.push(placeholder(other.to_string())),
    }
    lines.push(Line::from(""));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ScanError;
    use crate::core::models::{NormalizedTarget, Scheme};
    use serde_json::json;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_complete_report_lists_every_section() {
        let outcome = ScanOutcome {
            result: Some(ScanResult {
                target: Some(NormalizedTarget { hostname: "example.com".into(), scheme: Scheme::Https }),
                dns_records: DnsRecords::Addresses(vec!["93.184.216.34".into()]),
                ip_info: IpInfo::Record(json!({"country": "US", "org": "AS15133 Edgecast"})),
                robots_policy: RobotsPolicy::Found("User-agent: *\nDisallow: /private".into()),
                ..Default::default()
            }),
            error: None,
        };
        let lines = text(&report_lines(&outcome));

        assert!(lines.contains(&"Target: https://example.com".to_string()));
        assert!(lines.contains(&"  • 93.184.216.34".to_string()));
        assert!(lines.contains(&"  country: US".to_string()));
        assert!(lines.contains(&"  Disallow: /private".to_string()));
        assert_eq!(lines.iter().filter(|l| l.trim() == "not implemented").count(), 2);
    }

    #[test]
    fn test_partial_report_shows_error_and_placeholders() {
        let outcome = ScanOutcome {
            result: Some(ScanResult::default()),
            error: Some(ScanError::DnsLookup("503 Service Unavailable".into())),
        };
        let lines = text(&report_lines(&outcome));

        assert_eq!(lines[0], "✗ DNS lookup failed: 503 Service Unavailable");
        assert_eq!(lines.iter().filter(|l| l.trim() == "skipped (scan aborted)").count(), 3);
    }

    #[test]
    fn test_failed_validation_has_no_sections() {
        let outcome = ScanOutcome {
            result: None,
            error: Some(ScanError::InvalidUrl { input: "".into(), reason: "empty host".into() }),
        };
        let lines = text(&report_lines(&outcome));
        assert!(lines.iter().all(|l| !l.contains("DNS A Records")));
        assert_eq!(lines.last().map(|l| l.trim()), Some("No data was collected."));
    }

    #[test]
    fn test_progress_marks_finished_steps() {
        let lines = text(&progress_lines(ScanStage::ResolvingIpInfo, "*"));
        assert_eq!(lines[2], "  ✓ Validating URL");
        assert_eq!(lines[3], "  ✓ Resolving DNS");
        assert_eq!(lines[4], "  * Looking up IP info");
        assert_eq!(lines[5], "  · Fetching robots.txt");
    }
}
