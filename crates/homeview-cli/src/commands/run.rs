use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use homeview_core::{
    feed::{NewsService, RssHeadlineSource},
    storage::NoteStore,
    AppConfig,
};
use homeview_tui::{
    event::{AppEvent, EventHandler, NewsUpdate},
    input::{handle_key_event, handle_mouse_event},
    scroll::ScrollConfigExt,
    App,
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let notes = NoteStore::load(config.notes_path())?;

    let source = Arc::new(RssHeadlineSource::new(&config.news)?);
    let service = Arc::new(NewsService::new(
        source,
        Duration::from_secs(config.news.cache_secs),
    ));

    // Setup terminal; the guard restores it on every exit path below
    let _guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    // Create channels for background news results and refresh requests
    let (news_tx, news_rx) = mpsc::unbounded_channel::<NewsUpdate>();
    let (refresh_tx, refresh_rx) = mpsc::unbounded_channel::<()>();
    let news_task = spawn_news_task(
        service,
        news_tx,
        refresh_rx,
        Duration::from_secs(config.news.cache_secs.max(60)),
    );

    let mut app = App::new(config.clone(), notes.list().to_vec());
    app.start();

    let result = run_loop(&mut terminal, &mut app, &config, news_rx, refresh_tx);

    news_task.abort();
    result
}

/// Raw mode, alternate screen and mouse capture, undone on drop
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen, EnableMouseCapture, SetTitle("HomeView"))?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show) {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn run_loop(
    terminal: &mut Term,
    app: &mut App,
    config: &AppConfig,
    mut news_rx: mpsc::UnboundedReceiver<NewsUpdate>,
    refresh_tx: mpsc::UnboundedSender<()>,
) -> Result<()> {
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let frame_interval = config.ui.scroll.frame_interval();

    loop {
        // Process any completed news fetches (non-blocking)
        while let Ok(update) = news_rx.try_recv() {
            match update {
                NewsUpdate::Loaded(headlines) => app.set_headlines(headlines),
            }
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            let _ = refresh_tx.send(());
            reload_notes(app, config);
        }

        app.tick(Instant::now());
        terminal.draw(|frame| app.draw(frame))?;

        // Poll faster while a scroll animation is running
        let timeout = if app.is_animating() {
            frame_interval
        } else {
            event_handler.tick_rate()
        };

        if let Some(event) = event_handler.next_within(timeout)? {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Mouse(mouse) => app.handle_mouse(handle_mouse_event(mouse)),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn reload_notes(app: &mut App, config: &AppConfig) {
    match NoteStore::load(config.notes_path()) {
        Ok(store) => app.set_notes(store.list().to_vec()),
        Err(e) => tracing::warn!("Failed to reload notes: {}", e),
    }
}

/// Fetch headlines on startup, then every `period` and on request
fn spawn_news_task(
    service: Arc<NewsService>,
    tx: mpsc::UnboundedSender<NewsUpdate>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            let force = tokio::select! {
                _ = interval.tick() => false,
                request = refresh_rx.recv() => match request {
                    Some(()) => true,
                    None => break,
                },
            };

            let headlines = if force {
                service.force_refresh().await
            } else {
                service.headlines().await
            };
            tracing::debug!("Fetched {} headlines", headlines.len());

            if tx.send(NewsUpdate::Loaded(headlines)).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail_after_setup(out: &mut Vec<u8>) -> io::Result<()> {
        let _guard = TerminalGuard { out };
        Err(io::Error::other("no terminal"))
    }

    #[test]
    fn test_guard_restores_terminal_on_error() {
        let mut out = Vec::new();
        assert!(fail_after_setup(&mut out).is_err());

        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\x1b[?1049l"), "alternate screen left: {:?}", written);
        assert!(written.contains("\x1b[?1000l"), "mouse capture off: {:?}", written);
        assert!(written.contains("\x1b[?25h"), "cursor shown: {:?}", written);
    }
}
