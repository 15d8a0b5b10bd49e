use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_core::{AppConfig, ModalStore};
use taskdeck_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{ModalWidget, StatusBarWidget, TaskPanelWidget, TooltipWidget, UserDeckWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    init_file_logging(&config)?;
    info!("starting taskdeck");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Taskdeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config.clone());
    let size = terminal.size()?;
    app.resize(size.width, size.height, Instant::now());

    // Presenter side of the modal store runs as its own task
    let presenter = tokio::spawn(log_modal_changes(app.modals.clone()));

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.scroll.frame_interval());

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    presenter.abort();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("taskdeck stopped");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            let (_, task_area, status_area) = App::layout(frame.area());
            UserDeckWidget::render(frame, app);
            TaskPanelWidget::render(frame, task_area, app);
            StatusBarWidget::render(frame, status_area, app, Instant::now());
            TooltipWidget::render(frame, app);
            ModalWidget::render(frame, app);
        })?;

        // Frame-rate ticks only while momentum is running
        if let Some(event) = event_handler.next(app.deck.needs_update())? {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(app, action, now);
                }
                AppEvent::Mouse(mouse) => app.on_mouse(mouse, now),
                AppEvent::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    app.resize(width, height, now);
                }
                AppEvent::Tick => app.tick(now),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::OpenAddUser => app.open_add_user(),
        Action::OpenAddTask => app.open_add_task(),
        Action::OpenImagePreview => app.open_image_preview(),
        Action::CloseModal | Action::Cancel => app.close_top_modal(),
        Action::Scroll(delta) => app.scroll_by(delta, now),
        Action::Confirm => app.submit_form(),
        Action::NextField => {
            if let Some(form) = app.active_form_mut() {
                form.next_field();
            }
        }
        Action::InputChar(c) => {
            if let Some(form) = app.active_form_mut() {
                form.push_char(c);
            }
        }
        Action::Backspace => {
            if let Some(form) = app.active_form_mut() {
                form.backspace();
            }
        }
        Action::None => {}
    }

    // Forms reset as soon as their modal opens
    app.sync_modals();
}

/// Log every change of the open modal set until the store goes away
async fn log_modal_changes(store: ModalStore) {
    let mut rx = store.subscribe();
    drop(store);
    while rx.changed().await.is_ok() {
        let open = rx.borrow_and_update().open_modals().to_vec();
        debug!(?open, "modal set changed");
    }
}

/// Route tracing output to `<data_dir>/taskdeck.log`; the terminal belongs to the UI
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()));
        app.resize(60, 30, Instant::now());
        app
    }

    #[test]
    fn test_typing_into_add_user_form() {
        let mut app = app();
        let now = Instant::now();
        handle_action(&mut app, Action::OpenAddUser, now);
        for c in "Ada".chars() {
            handle_action(&mut app, Action::InputChar(c), now);
        }
        handle_action(&mut app, Action::Backspace, now);
        handle_action(&mut app, Action::InputChar('a'), now);
        handle_action(&mut app, Action::Confirm, now);

        assert_eq!(app.users.last().map(|u| u.name.as_str()), Some("Ada"));
        assert!(app.modals.open_modals().is_empty());
    }

    #[test]
    fn test_quit_and_layout() {
        let mut app = app();
        handle_action(&mut app, Action::Quit, Instant::now());
        assert!(app.should_quit);

        let (deck, tasks, status) = App::layout(Rect::new(0, 0, 80, 24));
        assert_eq!(status.height, 1);
        assert_eq!(tasks.height, 7);
        assert_eq!(deck.height, 16);
    }
}
