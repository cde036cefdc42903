// TUI event loop and terminal management
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reporeel_core::{FetchOutcome, FetchTicket, NotificationSink, RepoFetcher, Severity, Toast};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

use crate::{Action, App};

const TICK: Duration = Duration::from_millis(100);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Fetches run on their own task so the UI keeps drawing
fn spawn_fetch(ticket: FetchTicket, fetcher: &Arc<RepoFetcher>, tx: &UnboundedSender<FetchOutcome>) {
    let fetcher = Arc::clone(fetcher);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = ticket.run(&fetcher).await;
        // Receiver only goes away on shutdown
        let _ = tx.send(outcome);
    });
}

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let fetcher = app.feed.fetcher();
    let (tx, mut rx) = mpsc::unbounded_channel();

    if let Some(ticket) = app.feed.start() {
        spawn_fetch(ticket, &fetcher, &tx);
    }

    let mut last_sweep = Instant::now();

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        while let Ok(outcome) = rx.try_recv() {
            if let Some(next) = app.complete(outcome) {
                spawn_fetch(next, &fetcher, &tx);
            }
        }

        if let Some(ticket) = app.poll_infinite_scroll() {
            spawn_fetch(ticket, &fetcher, &tx);
        }

        if last_sweep.elapsed() >= SWEEP_INTERVAL {
            last_sweep = Instant::now();
            let fetcher = Arc::clone(&fetcher);
            tokio::spawn(async move {
                fetcher.sweep_cache().await;
            });
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Some(Action::Fetch(ticket)) => spawn_fetch(ticket, &fetcher, &tx),
                    Some(Action::OpenUrl(url)) => {
                        debug!("Opening {}", url);
                        if let Err(e) = open::that(&url) {
                            warn!("Failed to open browser: {}", e);
                            app.toasts.notify(Toast::new(
                                "Failed to open browser",
                                e.to_string(),
                                Severity::Error,
                            ));
                        }
                    }
                    Some(Action::Quit) => break,
                    None => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
