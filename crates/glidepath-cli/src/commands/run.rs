use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use glidepath_core::AppConfig;
use glidepath_tui::{
    app::App,
    event::{AppEvent, EventHandler, FrameClock},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme,
    scroll::ScrollConfigExt,
    ui,
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create app state before touching the terminal so config errors print normally
    let mut app = App::new(config.clone(), theme)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("glidepath"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(actions = app.actions.len(), "Session ended");
    for action in &app.actions {
        match &action.params {
            Some(params) => println!("{} -> {} {}", action.source_id, action.destination_id, params),
            None => println!("{} -> {}", action.source_id, action.destination_id),
        }
    }

    result
}

/// Main loop: input updates state, the frame clock decides when to step and draw
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
) -> Result<()> {
    let events = EventHandler::new();
    let mut clock = FrameClock::new(
        Duration::from_millis(app.config.ui.tick_rate_ms),
        app.config.ui.scroll.animation_tick_duration(),
    );
    let mut redraw = true;

    loop {
        if redraw || clock.is_due(app.needs_animation()) {
            let dt = clock.start_frame();
            app.tick(dt);
            terminal.draw(|frame| ui::draw(frame, app))?;
            redraw = false;
        }

        if app.should_quit {
            break;
        }

        for event in events.next_batch(clock.timeout(app.needs_animation()))? {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, app, keymap);
                    app.apply(action);
                    redraw = true;
                }
                // Pointer and wheel input wait for the next frame
                AppEvent::Mouse(mouse) => app.apply(handle_mouse_event(mouse)),
                AppEvent::Resize(_, _) => redraw = true,
                AppEvent::Tick => {}
            }
        }
    }

    Ok(())
}
