// src/app.rs

use crate::core::models::{ScanOutcome, ScanRequest, ScanStage};
use crate::logging;
use ratatui::widgets::ScrollbarState;

pub const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LOG_TAIL_LINES: usize = 200;
const MIN_CRAWL_DEPTH: u32 = 1;
const MAX_CRAWL_DEPTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

/// Messages sent from a running scan task back to the UI loop.
///
/// Every event carries the generation of the scan that produced it, so events
/// from a scan the user already walked away from can be dropped.
#[derive(Debug)]
pub enum ScanEvent {
    Stage { generation: u64, stage: ScanStage },
    Finished { generation: u64, outcome: ScanOutcome },
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub state: AppState,
    pub input: String,
    pub crawl_depth: u32,
    pub stage: ScanStage,
    pub outcome: Option<ScanOutcome>,
    pub scan_generation: u64,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    pub spinner_frame: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            state: AppState::Idle,
            input: String::new(),
            crawl_depth: MIN_CRAWL_DEPTH,
            stage: ScanStage::Idle,
            outcome: None,
            scan_generation: 0,
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            spinner_frame: 0,
        }
    }

    /// Switches to `Scanning` and returns the request to run together with
    /// the generation its events must carry. `None` when there is no input.
    pub fn begin_scan(&mut self) -> Option<(u64, ScanRequest)> {
        if self.input.trim().is_empty() {
            return None;
        }
        self.scan_generation += 1;
        self.state = AppState::Scanning;
        self.stage = ScanStage::Idle;
        self.outcome = None;
        self.reset_scroll();
        let request = ScanRequest::new(self.input.clone()).with_crawl_depth(self.crawl_depth);
        Some((self.scan_generation, request))
    }

    pub fn handle_scan_event(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Stage { generation, stage } if generation == self.scan_generation => {
                self.stage = stage;
            }
            ScanEvent::Finished { generation, outcome } if generation == self.scan_generation => {
                self.stage = if outcome.error.is_some() { ScanStage::Failed } else { ScanStage::Completed };
                self.outcome = Some(outcome);
                self.state = AppState::Finished;
            }
            _ => {}
        }
    }

    pub fn increase_depth(&mut self) {
        self.crawl_depth = (self.crawl_depth + 1).min(MAX_CRAWL_DEPTH);
    }

    pub fn decrease_depth(&mut self) {
        self.crawl_depth = self.crawl_depth.saturating_sub(1).max(MIN_CRAWL_DEPTH);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_log_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_log_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn refresh_logs(&mut self) {
        self.log_content = logging::read_log_tail(LOG_TAIL_LINES);
    }

    pub fn on_tick(&mut self) {
        if matches!(self.state, AppState::Scanning) {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn acknowledge_disclaimer(&mut self) {
        self.show_disclaimer = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Back to an empty input. A scan still in flight keeps running, but its
    /// events no longer match the current generation and are ignored.
    pub fn reset(&mut self) {
        self.scan_generation += 1;
        self.state = AppState::Idle;
        self.input = String::new();
        self.stage = ScanStage::Idle;
        self.outcome = None;
        self.spinner_frame = 0;
        self.reset_scroll();
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScanResult;

    fn finished(generation: u64) -> ScanEvent {
        ScanEvent::Finished {
            generation,
            outcome: ScanOutcome { result: Some(ScanResult::default()), error: None },
        }
    }

    #[test]
    fn test_begin_scan_requires_input() {
        let mut app = App::new();
        assert!(app.begin_scan().is_none());
        assert_eq!(app.state, AppState::Idle);

        app.input = "example.com".into();
        app.increase_depth();
        let (generation, request) = app.begin_scan().unwrap();
        assert_eq!(generation, 1);
        assert_eq!(request.raw_url, "example.com");
        assert_eq!(request.crawl_depth, Some(2));
        assert_eq!(app.state, AppState::Scanning);
    }

    #[test]
    fn test_events_update_current_scan() {
        let mut app = App::new();
        app.input = "example.com".into();
        let (generation, _) = app.begin_scan().unwrap();

        app.handle_scan_event(ScanEvent::Stage { generation, stage: ScanStage::ResolvingDns });
        assert_eq!(app.stage, ScanStage::ResolvingDns);

        app.handle_scan_event(finished(generation));
        assert_eq!(app.state, AppState::Finished);
        assert_eq!(app.stage, ScanStage::Completed);
        assert!(app.outcome.is_some());
    }

    #[test]
    fn test_stale_results_are_ignored_after_reset() {
        let mut app = App::new();
        app.input = "example.com".into();
        let (stale, _) = app.begin_scan().unwrap();
        app.reset();

        app.handle_scan_event(ScanEvent::Stage { generation: stale, stage: ScanStage::FetchingRobots });
        app.handle_scan_event(finished(stale));
        assert_eq!(app.state, AppState::Idle);
        assert_eq!(app.stage, ScanStage::Idle);
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_crawl_depth_is_bounded() {
        let mut app = App::new();
        app.decrease_depth();
        assert_eq!(app.crawl_depth, MIN_CRAWL_DEPTH);
        for _ in 0..10 {
            app.increase_depth();
        }
        assert_eq!(app.crawl_depth, MAX_CRAWL_DEPTH);
    }
}
