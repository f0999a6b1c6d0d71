mod config;
mod controller;
mod logging;
mod media;
mod model;
mod view;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use config::Cli;
use controller::AppController;
use media::{TerminalBackend, TerminalSurface};
use model::AppModel;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Nexus Viewer Starting ===");

    let cli = Cli::parse();
    let materials = cli.materials()?;
    tracing::info!(count = materials.len(), "Course materials loaded");

    // Set by the end-of-playback callback when the course should close
    let finished = Arc::new(AtomicBool::new(false));
    let finished_flag = finished.clone();
    let exit_on_end = cli.exit_on_end;
    let on_ended = Arc::new(move || {
        tracing::info!("Material completed");
        if exit_on_end {
            finished_flag.store(true, Ordering::SeqCst);
        }
    });

    let model = Arc::new(Mutex::new(AppModel::new(materials)));
    let (controller, events) = AppController::new(
        model.clone(),
        Arc::new(TerminalBackend::new(cli.autoplay_policy())),
        Box::new(TerminalSurface::default()),
        cli.viewer_config(),
        on_ended,
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let listener = controller.start_media_event_listener(events);
    controller.mount(0).await;

    let res = run_app(&mut terminal, model.clone(), controller.clone(), finished).await;

    controller.unmount().await;
    listener.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Nexus Viewer shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    finished: Arc<AtomicBool>,
) -> io::Result<()> {
    loop {
        // Snapshot so rendering never holds the lock
        let snapshot = model.lock().await.clone();

        terminal.draw(|f| {
            AppView::render(f, &snapshot);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                        controller.pointer_activity().await;
                    }
                    _ => {}
                },
                Event::FocusGained => controller.pointer_activity().await,
                Event::FocusLost => controller.pointer_left().await,
                _ => {}
            }
        }

        if snapshot.should_quit() || finished.load(Ordering::SeqCst) {
            break;
        }
    }

    Ok(())
}
