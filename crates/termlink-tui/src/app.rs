use crate::cli::Cli;
use crate::config::{FileConfig, Settings};
use crate::error::Result;
use crate::logging;
use crate::render::Screen;
use crate::rng::EntropyRng;
use crate::stats::{GameResult, Stats};
use crate::theme::Theme;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use termlink_core::{Dictionary, InputEvent, InputSource, Session};
use tracing::{info, warn};

/// Reads crossterm events and translates them into session input
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Some(input) = translate(&event::read()?) {
                return Ok(input);
            }
        }
    }
}

/// Map a terminal event to session input; `None` for events the game ignores
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => translate_key(*key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerAt {
                x: mouse.column as usize,
                y: mouse.row as usize,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(InputEvent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(InputEvent::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(InputEvent::MoveRight),

        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Block until any key is pressed
fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

/// Load everything, play one session, record the result.
///
/// Returns `true` when the terminal was unlocked.
pub fn run(cli: Cli) -> Result<bool> {
    match logging::init(cli.log_file.clone()) {
        Ok(path) => info!(path = %path.display(), "logging started"),
        Err(err) => eprintln!("warning: logging disabled: {}", err),
    }

    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &file);
    info!(?settings, "settings resolved");

    let dictionary = Dictionary::from_path(&cli.dictionary, settings.session.word_count)?;
    let mut rng = EntropyRng::new(settings.seed);
    let mut session = Session::new(settings.session, &dictionary, &mut rng)?;

    let unlocked = play(&mut session, Theme::from_name(settings.theme))?;

    if settings.record_stats {
        record_stats(&session);
    }
    Ok(unlocked)
}

fn play(session: &mut Session, theme: Theme) -> Result<bool> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = play_in_terminal(session, &mut stdout, theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    result
}

fn play_in_terminal(session: &mut Session, stdout: &mut io::Stdout, theme: Theme) -> Result<bool> {
    let mut screen = Screen::new(stdout, theme);
    let unlocked = session.run(&mut TerminalInput, &mut screen)?;

    // Leave the final frame up until the player has seen it
    if session.outcome().is_some() {
        wait_for_key()?;
    }
    Ok(unlocked)
}

fn record_stats(session: &Session) {
    let path = Stats::default_path();
    let mut stats = Stats::load(&path);
    stats.record(
        GameResult::from_outcome(session.outcome()),
        session.solution().text.len(),
        session.history().len(),
    );
    info!(
        games = stats.total_games,
        unlock_rate = stats.unlock_rate(),
        streak = stats.current_streak,
        "stats updated"
    );
    if let Err(err) = stats.save(&path) {
        warn!(path = %path.display(), %err, "failed to save stats");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_translate_keys() {
        assert_eq!(translate(&key(KeyCode::Up)), Some(InputEvent::MoveUp));
        assert_eq!(translate(&key(KeyCode::Char('j'))), Some(InputEvent::MoveDown));
        assert_eq!(translate(&key(KeyCode::Char('h'))), Some(InputEvent::MoveLeft));
        assert_eq!(translate(&key(KeyCode::Right)), Some(InputEvent::MoveRight));
        assert_eq!(translate(&key(KeyCode::Enter)), Some(InputEvent::Confirm));
        assert_eq!(translate(&key(KeyCode::Char(' '))), Some(InputEvent::Confirm));
        assert_eq!(translate(&key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(translate(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&event), Some(InputEvent::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let event = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(&event), None);
    }

    #[test]
    fn test_left_click_becomes_pointer() {
        let click = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 12,
                row: 7,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            translate(&click(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::PointerAt { x: 12, y: 7 })
        );
        assert_eq!(translate(&click(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(translate(&click(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_resize_is_ignored() {
        assert_eq!(translate(&Event::Resize(80, 24)), None);
    }
}
