// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::core::models::{DnsRecords, IpInfo, RobotsPolicy, ScanOutcome, ScanStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    text::Line,
};

/// How one lookup ended, as shown in the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckState {
    Data,
    Placeholder,
    Failed,
    NotRun,
}

impl CheckState {
    fn icon(self) -> (&'static str, Style) {
        match self {
            CheckState::Data => ("✓", Style::default().fg(Color::Green)),
            CheckState::Placeholder => ("○", Style::default().fg(Color::Yellow)),
            CheckState::Failed => ("✗", Style::default().fg(Color::Red)),
            CheckState::NotRun => ("–", Style::default().fg(Color::DarkGray)),
        }
    }
}

/// Per-lookup check states for a finished scan. A fatal error is charged to
/// the first lookup that was left `Skipped`.
fn checks(outcome: &ScanOutcome) -> [(&'static str, CheckState); 3] {
    let Some(result) = &outcome.result else {
        return [
            ("DNS records", CheckState::NotRun),
            ("IP info", CheckState::NotRun),
            ("robots.txt", CheckState::NotRun),
        ];
    };
    let failed_or_skipped = |already_failed: bool| {
        if outcome.error.is_some() && !already_failed { CheckState::Failed } else { CheckState::NotRun }
    };

    let dns = match result.dns_records {
        DnsRecords::Addresses(_) => CheckState::Data,
        DnsRecords::NotFound => CheckState::Placeholder,
        DnsRecords::Skipped => failed_or_skipped(false),
    };
    let ip = match result.ip_info {
        IpInfo::Record(_) | IpInfo::RawBody(_) => CheckState::Data,
        IpInfo::NoAddress => CheckState::Placeholder,
        IpInfo::Skipped => failed_or_skipped(dns == CheckState::Failed),
    };
    let robots = match result.robots_policy {
        RobotsPolicy::Found(_) => CheckState::Data,
        RobotsPolicy::NotFound => CheckState::Placeholder,
        RobotsPolicy::FetchError(_) => CheckState::Failed,
        RobotsPolicy::Skipped => CheckState::NotRun,
    };
    [("DNS records", dns), ("IP info", ip), ("robots.txt", robots)]
}

/// Renders the status panel: overall outcome, current stage and a checklist
/// of the three lookups.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Status");
    let inner = summary_container.inner(area);
    frame.render_widget(summary_container, area);

    let mut lines = vec![Line::from(vec![
        Span::raw("Stage: "),
        Span::styled(app.stage.to_string(), Style::default().fg(Color::Cyan)),
    ])];

    if let (AppState::Finished, Some(outcome)) = (app.state, &app.outcome) {
        let status = outcome.status();
        let style = match status {
            ScanStatus::Complete => Style::default().fg(Color::Green),
            ScanStatus::Partial => Style::default().fg(Color::Yellow),
            ScanStatus::TotalFailure => Style::default().fg(Color::Red),
        };
        lines.push(Line::from(vec![Span::raw("Result: "), Span::styled(status.to_string(), style.bold())]));
        lines.push(Line::from(""));
        lines.push(Line::from("LOOKUPS".bold()));
        for (name, state) in checks(outcome) {
            let (icon, style) = state.icon();
            lines.push(Line::from(vec![Span::styled(format!("{icon} "), style), Span::raw(name)]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ScanError;
    use crate::core::models::ScanResult;

    #[test]
    fn test_fatal_error_is_charged_to_first_skipped_lookup() {
        let outcome = ScanOutcome {
            result: Some(ScanResult {
                dns_records: DnsRecords::Addresses(vec!["1.1.1.1".into()]),
                ..Default::default()
            }),
            error: Some(ScanError::IpInfo("500 Internal Server Error".into())),
        };
        let states: Vec<CheckState> = checks(&outcome).iter().map(|(_, s)| *s).collect();
        assert_eq!(states, vec![CheckState::Data, CheckState::Failed, CheckState::NotRun]);
    }

    #[test]
    fn test_placeholders_and_robots_errors() {
        let outcome = ScanOutcome {
            result: Some(ScanResult {
                dns_records: DnsRecords::NotFound,
                ip_info: IpInfo::NoAddress,
                robots_policy: RobotsPolicy::FetchError("connection refused".into()),
                ..Default::default()
            }),
            error: None,
        };
        let states: Vec<CheckState> = checks(&outcome).iter().map(|(_, s)| *s).collect();
        assert_eq!(states, vec![CheckState::Placeholder, CheckState::Placeholder, CheckState::Failed]);
    }
}
