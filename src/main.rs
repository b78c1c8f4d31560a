// src/main.rs

use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

mod app;
mod config;
mod core;
mod logging;
mod ui;

use crate::app::{App, AppState, ScanEvent};
use crate::core::models::ScanStage;
use crate::core::scanner::Orchestrator;
use crate::core::transport::ReqwestTransport;

type Scanner = Arc<Orchestrator<ReqwestTransport>>;
type EventSender = mpsc::UnboundedSender<ScanEvent>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let config = config::load_config()?;
    info!(doh = %config.doh_endpoint, ipinfo = %config.ipinfo_endpoint, "Configuration loaded.");
    let transport = ReqwestTransport::new(&config.user_agent).wrap_err("failed to build HTTP client")?;
    let scanner: Scanner = Arc::new(Orchestrator::new(transport, config));

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run_app(&mut terminal, scanner).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, scanner: Scanner) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &tx, &scanner)?;
        }

        while let Ok(scan_event) = rx.try_recv() {
            app.handle_scan_event(scan_event);
        }
        app.on_tick();
    }
    Ok(())
}

fn handle_events(app: &mut App, tx: &EventSender, scanner: &Scanner) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if app.show_disclaimer {
            match key.code {
                KeyCode::Enter => app.acknowledge_disclaimer(),
                KeyCode::Esc => app.quit(),
                _ => {}
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Char('l') if !matches!(app.state, AppState::Idle) => app.toggle_logs(),
            KeyCode::Left if app.show_logs => app.scroll_log_left(),
            KeyCode::Right if app.show_logs => app.scroll_log_right(),
            code => match app.state {
                AppState::Idle => handle_idle_input(app, code, tx, scanner),
                AppState::Finished => handle_finished_input(app, code),
                AppState::Scanning => {
                    if code == KeyCode::Char('q') {
                        app.quit();
                    }
                }
            },
        }
    }
    Ok(())
}

fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &EventSender, scanner: &Scanner) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.toggle_logs(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up => app.increase_depth(),
        KeyCode::Down => app.decrease_depth(),
        KeyCode::Enter => {
            let Some((generation, request)) = app.begin_scan() else { return };
            let tx = tx.clone();
            let scanner = Arc::clone(scanner);

            tokio::spawn(async move {
                let progress_tx = tx.clone();
                let mut observer = move |stage: ScanStage| {
                    if progress_tx.send(ScanEvent::Stage { generation, stage }).is_err() {
                        debug!(generation, %stage, "UI receiver gone, dropping stage update.");
                    }
                };
                let outcome = scanner.run(&request, &mut observer).await;
                if tx.send(ScanEvent::Finished { generation, outcome }).is_err() {
                    debug!(generation, "UI receiver gone, dropping scan outcome.");
                }
            });
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
