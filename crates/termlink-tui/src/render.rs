use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::collections::HashMap;
use std::io::{self, Write};
use termlink_core::{Display, DisplayPosition, GridPosition, PlacedWord, SessionState, Snapshot};

pub const TITLE: &str = "ROBCO INDUSTRIES (TM) TERMLINK PROTOCOL";
pub const PROMPT: &str = "ENTER PASSWORD NOW";
pub const LOCKOUT_WARNING: &str = "!!! WARNING: LOCKOUT IMMINENT !!!";

/// Draws session snapshots onto a terminal (or any writer).
pub struct Screen<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for Screen<W> {
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        execute!(
            self.out,
            Hide,
            SetBackgroundColor(self.theme.bg),
            Clear(ClearType::All)
        )?;

        self.render_header(snapshot)?;
        self.render_board(snapshot)?;
        self.render_log(snapshot)?;
        self.render_footer(snapshot)?;

        execute!(self.out, move_to(snapshot.cursor), Show)?;
        self.out.flush()
    }
}

impl<W: Write> Screen<W> {
    fn render_header(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let theme = &self.theme;

        execute!(
            self.out,
            MoveTo(0, 0),
            SetForegroundColor(theme.fg),
            Print(TITLE)
        )?;

        // Second line turns into a warning on the last attempt
        let (prompt, prompt_color) = if snapshot.attempts == 1 && !snapshot.state.is_terminal() {
            (LOCKOUT_WARNING, theme.error)
        } else {
            (PROMPT, theme.fg)
        };
        execute!(
            self.out,
            MoveTo(0, 1),
            SetForegroundColor(prompt_color),
            Print(prompt)
        )?;

        let blocks = " #".repeat(snapshot.attempts);
        execute!(
            self.out,
            MoveTo(0, 3),
            SetForegroundColor(theme.fg),
            Print(format!("{} ATTEMPT(S) LEFT :", snapshot.attempts)),
            SetForegroundColor(theme.cursor_bg),
            Print(blocks)
        )?;

        Ok(())
    }

    fn render_board(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let theme = self.theme.clone();
        let layout = snapshot.layout;

        // Which word, if any, is drawn at each cell
        let mut overlay: HashMap<DisplayPosition, (char, &PlacedWord)> = HashMap::new();
        for word in snapshot.words {
            for (pos, ch) in word.cells() {
                overlay.insert(pos, (ch, word));
            }
        }
        let focus = snapshot.selected.or(snapshot.hovered);

        for panel in 0..layout.panels() {
            let content = snapshot.panels[panel].as_bytes();
            for row in 0..layout.rows() {
                execute!(
                    self.out,
                    move_to(layout.label_origin(row, panel)),
                    SetBackgroundColor(theme.bg),
                    SetForegroundColor(theme.address),
                    Print(format!("0x{:04X} ", layout.address(row, panel)))
                )?;

                for column in 0..layout.columns() {
                    let grid = GridPosition::new(panel, row, column);
                    let pos = layout.to_display(grid);
                    let filler = content
                        .get(layout.offset_of(grid))
                        .map_or(' ', |&b| b as char);

                    let (ch, word) = match overlay.get(&pos) {
                        Some(&(ch, word)) => (ch, Some(word)),
                        None => (filler, None),
                    };

                    let mut fg = if word.is_some() { theme.fg } else { theme.filler };
                    let mut bg = theme.bg;

                    if word.is_some() && word == snapshot.revealed {
                        fg = theme.success;
                    }
                    if word.is_some() && word == focus {
                        bg = theme.highlight_bg;
                    }
                    if pos == snapshot.cursor {
                        fg = theme.bg;
                        bg = theme.cursor_bg;
                    }

                    execute!(
                        self.out,
                        SetBackgroundColor(bg),
                        SetForegroundColor(fg),
                        Print(ch)
                    )?;
                }
            }
        }

        execute!(self.out, SetBackgroundColor(theme.bg))?;
        Ok(())
    }

    /// Terminal-style feedback column to the right of the last panel.
    fn render_log(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let theme = self.theme.clone();
        let layout = snapshot.layout;
        let x = layout.width() as u16 + 1;
        let top = termlink_core::HEADER_HEIGHT;

        let lines = log_lines(snapshot, &theme);
        let available = layout.rows().saturating_sub(1);
        let skip = lines.len().saturating_sub(available);
        let first_y = top + available - (lines.len() - skip);

        for (i, (text, color)) in lines.iter().skip(skip).enumerate() {
            execute!(
                self.out,
                MoveTo(x, (first_y + i) as u16),
                SetForegroundColor(*color),
                Print(text)
            )?;
        }

        // Prompt line shows what the cursor is on
        let under_cursor = match snapshot.hovered {
            Some(word) => word.text.clone(),
            None => layout
                .to_grid(snapshot.cursor)
                .and_then(|grid| {
                    snapshot.panels[grid.panel]
                        .as_bytes()
                        .get(layout.offset_of(grid))
                        .map(|&b| (b as char).to_string())
                })
                .unwrap_or_default(),
        };
        execute!(
            self.out,
            MoveTo(x, (top + layout.rows() - 1) as u16),
            SetForegroundColor(theme.fg),
            Print(format!(">{}", under_cursor))
        )?;

        Ok(())
    }

    fn render_footer(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let theme = &self.theme;
        let y = snapshot.layout.height() as u16 + 1;

        match snapshot.state {
            SessionState::Won => {
                execute!(
                    self.out,
                    MoveTo(0, y),
                    SetForegroundColor(theme.success),
                    Print("TERMINAL UNLOCKED. Press any key.")
                )?;
            }
            SessionState::Lost => {
                execute!(
                    self.out,
                    MoveTo(0, y),
                    SetForegroundColor(theme.error),
                    Print("TERMINAL LOCKED. Press any key.")
                )?;
            }
            SessionState::Running { .. } | SessionState::AwaitingConfirmation { .. } => {
                let controls = [
                    ("Arrows/hjkl", "Move"),
                    ("Enter/Space", "Select"),
                    ("Click", "Select"),
                    ("q", "Quit"),
                ];
                execute!(self.out, MoveTo(0, y))?;
                for (key, desc) in controls {
                    execute!(
                        self.out,
                        SetForegroundColor(theme.key),
                        Print(key),
                        SetForegroundColor(theme.filler),
                        Print(format!(" {}   ", desc))
                    )?;
                }
                execute!(
                    self.out,
                    MoveTo(0, y + 1),
                    SetForegroundColor(theme.filler),
                    Print("Press 'q' to exit")
                )?;
            }
        }

        Ok(())
    }
}

fn move_to(pos: DisplayPosition) -> MoveTo {
    MoveTo(pos.x as u16, pos.y as u16)
}

/// Feedback log: denied guesses, then the pending or final entry.
fn log_lines(snapshot: &Snapshot<'_>, theme: &Theme) -> Vec<(String, Color)> {
    let mut lines = Vec::new();
    for guess in snapshot.history {
        lines.push((format!(">{}", guess.text), theme.fg));
        lines.push((">Entry denied.".to_string(), theme.error));
        lines.push((format!(">Likeness={}.", guess.score), theme.fg));
    }
    if let Some(word) = snapshot.selected {
        lines.push((format!(">{}", word.text), theme.fg));
    }
    match snapshot.state {
        SessionState::Won => {
            if let Some(word) = snapshot.revealed {
                lines.push((format!(">{}", word.text), theme.fg));
            }
            lines.push((">Exact match!".to_string(), theme.success));
            lines.push((">Password accepted.".to_string(), theme.success));
        }
        SessionState::Lost => {
            lines.push((">Lockout in progress.".to_string(), theme.error));
        }
        _ => {}
    }
    lines
}
