//! tbrew - Terminal Membership Companion
//!
//! A terminal companion app for a coffee loyalty membership. Browse the
//! menu, customize drinks, keep a cart, pay from the stored-value card,
//! collect stars, and redeem rewards, all inside one session.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::SeedRepository;
use presentation::{render_ui, InputHandler};

/// Entry point for the tbrew membership companion.
///
/// Loads the seed data (an optional path argument overrides the
/// embedded fixture), sets up the terminal interface, and runs the
/// main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the seed data cannot be loaded or if terminal
/// setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = match std::env::args().nth(1) {
        Some(path) => {
            let (seed, filename) = SeedRepository::load_from_file(&path)?;
            let mut app = App::new(seed);
            app.status_message = Some(format!("Loaded membership data from {}", filename));
            app
        }
        None => App::new(SeedRepository::load_embedded()?),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Drains one pending store message per iteration into the status
/// line, redraws, and processes keyboard input. Continues running
/// until the user presses 'q' with no overlay open.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        if let Some(message) = app.poll_message() {
            app.status_message = Some(message);
        }
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q')
                        if matches!(app.overlay, application::Overlay::None) =>
                    {
                        return Ok(())
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
