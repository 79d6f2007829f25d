//! The puzzle session state machine.
//!
//! A [`Session`] owns the filler, the placed words, the solution and the
//! cursor. Input is applied with [`Session::apply`]; a pending selection is
//! resolved by [`Session::evaluate`]. [`Session::run`] wires both to an
//! [`InputSource`] and a [`Display`].

use std::io;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::layout::{self, DisplayPosition, GridPosition, Layout};
use crate::placement::{PlacedWord, Placer};
use crate::rng::RandomSource;
use crate::scoring::common_letters;

/// Words drawn from the dictionary before initialization gives up.
pub const DRAW_RETRIES: usize = 100;

/// Characters used to fill cells that hold no word.
pub const FILLER: &[u8] = b",|\\!@#$%^&*-_+=.:;?,/";

/// Construction-time session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub panels: usize,
    pub rows: usize,
    pub columns: usize,
    pub word_count: usize,
    pub max_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            panels: 3,
            rows: 20,
            columns: 12,
            word_count: 12,
            max_attempts: 4,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("panels", self.panels),
            ("rows", self.rows),
            ("columns", self.columns),
            ("word count", self.word_count),
            ("attempts", self.max_attempts),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(Error::invalid_config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

/// Abstract input, already decoupled from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PointerAt { x: usize, y: usize },
    Confirm,
    Quit,
}

/// Whether the driving loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// An incorrect guess and its likeness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub text: String,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for input. `feedback` is the guess evaluated just before,
    /// kept for a single display cycle.
    Running { feedback: Option<Guess> },
    /// A word was picked and will be checked on the next evaluation step.
    AwaitingConfirmation { selected: usize },
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// Supplies input events. `next_event` may block.
pub trait InputSource {
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

/// Consumes read-only snapshots of the session.
pub trait Display {
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub layout: &'a Layout,
    pub panels: &'a [String],
    pub words: &'a [PlacedWord],
    pub attempts: usize,
    pub max_attempts: usize,
    /// Word under the cursor, if any.
    pub hovered: Option<&'a PlacedWord>,
    /// Word awaiting confirmation.
    pub selected: Option<&'a PlacedWord>,
    pub feedback: Option<&'a Guess>,
    pub history: &'a [Guess],
    pub cursor: DisplayPosition,
    pub state: &'a SessionState,
    /// The solution, once the game is over.
    pub revealed: Option<&'a PlacedWord>,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    layout: Layout,
    panels: Vec<String>,
    words: Vec<PlacedWord>,
    solution: usize,
    attempts: usize,
    cursor: GridPosition,
    state: SessionState,
    history: Vec<Guess>,
}

impl Session {
    /// Sets up a fresh board: picks a length group, fills the panels and
    /// hides `word_count` words.
    pub fn new<R: RandomSource + ?Sized>(
        config: SessionConfig,
        dictionary: &Dictionary,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let (word_len, candidates) = dictionary.choose_group(rng, config.columns)?;
        let start_address =
            layout::random_start_address(rng, config.panels, config.rows, config.columns);
        let layout = Layout::new(config.panels, config.rows, config.columns, start_address);

        let panels = (0..config.panels)
            .map(|_| generate_filler(rng, layout.panel_size()))
            .collect();
        let words = place_words(&Placer::new(layout), rng, candidates, config.word_count)?;
        let solution = rng.below(words.len());

        info!(
            word_len,
            words = words.len(),
            start_address = %format!("{:#06X}", start_address),
            "session initialized"
        );

        Self::from_parts(config, layout, panels, words, solution)
    }

    /// Assembles a session from an already generated board.
    ///
    /// Checks the board against `config` and the placement invariants.
    pub fn from_parts(
        config: SessionConfig,
        layout: Layout,
        panels: Vec<String>,
        words: Vec<PlacedWord>,
        solution: usize,
    ) -> Result<Self> {
        config.validate()?;

        if (layout.panels(), layout.rows(), layout.columns())
            != (config.panels, config.rows, config.columns)
        {
            return Err(Error::invalid_config("layout does not match configuration"));
        }
        if panels.len() != config.panels
            || panels.iter().any(|p| p.len() != layout.panel_size())
        {
            return Err(Error::invalid_config("panel content does not match layout"));
        }
        if solution >= words.len() {
            return Err(Error::invalid_config("solution is not a placed word"));
        }
        for (i, word) in words.iter().enumerate() {
            if word.panel >= config.panels || word.end > layout.panel_size() || word.is_empty() {
                return Err(Error::invalid_config(format!("word `{}` is out of bounds", word.text)));
            }
            if words[i + 1..]
                .iter()
                .any(|other| other.overlaps(word.panel, word.start, word.end))
            {
                return Err(Error::invalid_config(format!("word `{}` overlaps another word", word.text)));
            }
        }

        Ok(Self {
            config,
            layout,
            panels,
            words,
            solution,
            attempts: config.max_attempts,
            cursor: GridPosition::new(0, 0, 0),
            state: SessionState::Running { feedback: None },
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn panels(&self) -> &[String] {
        &self.panels
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn solution(&self) -> &PlacedWord {
        &self.words[self.solution]
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn cursor(&self) -> GridPosition {
        self.cursor
    }

    pub fn cursor_display(&self) -> DisplayPosition {
        self.layout.to_display(self.cursor)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Incorrect guesses so far, oldest first.
    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// `Some(true)` once won, `Some(false)` once lost.
    pub fn outcome(&self) -> Option<bool> {
        match self.state {
            SessionState::Won => Some(true),
            SessionState::Lost => Some(false),
            _ => None,
        }
    }

    /// The placed word covering `cursor`, if any.
    pub fn find_selected_word(&self, cursor: GridPosition) -> Option<&PlacedWord> {
        self.word_index_at(cursor).map(|i| &self.words[i])
    }

    fn word_index_at(&self, cursor: GridPosition) -> Option<usize> {
        let offset = self.layout.offset_of(cursor);
        self.words
            .iter()
            .position(|word| word.contains(cursor.panel, offset))
    }

    /// Applies one input event.
    ///
    /// Events are ignored once the game is over or while a selection is
    /// pending; `Quit` is always honoured.
    pub fn apply(&mut self, event: InputEvent) -> Control {
        if event == InputEvent::Quit {
            debug!("quit requested");
            return Control::Quit;
        }
        match self.state {
            SessionState::Running { .. } => {}
            SessionState::AwaitingConfirmation { .. } => {
                warn!(?event, "event ignored while a selection is pending");
                return Control::Continue;
            }
            SessionState::Won | SessionState::Lost => return Control::Continue,
        }

        self.state = SessionState::Running { feedback: None };
        let GridPosition { panel, row, column } = self.cursor;

        match event {
            InputEvent::MoveUp => {
                if row > 0 {
                    self.cursor.row -= 1;
                }
            }
            InputEvent::MoveDown => {
                if row + 1 < self.layout.rows() {
                    self.cursor.row += 1;
                }
            }
            InputEvent::MoveLeft => {
                if column > 0 {
                    self.cursor.column -= 1;
                } else if panel > 0 {
                    self.cursor.panel -= 1;
                    self.cursor.column = self.layout.columns() - 1;
                }
            }
            InputEvent::MoveRight => {
                if column + 1 < self.layout.columns() {
                    self.cursor.column += 1;
                } else if panel + 1 < self.layout.panels() {
                    self.cursor.panel += 1;
                    self.cursor.column = 0;
                }
            }
            InputEvent::PointerAt { x, y } => {
                if let Some(pos) = self.layout.to_grid(DisplayPosition::new(x, y)) {
                    self.cursor = pos;
                    self.select_under_cursor();
                }
            }
            InputEvent::Confirm => self.select_under_cursor(),
            InputEvent::Quit => return Control::Quit,
        }

        Control::Continue
    }

    fn select_under_cursor(&mut self) {
        if let Some(selected) = self.word_index_at(self.cursor) {
            debug!(word = %self.words[selected].text, "word selected");
            self.state = SessionState::AwaitingConfirmation { selected };
        }
    }

    /// Resolves a pending selection. Does nothing in any other state.
    pub fn evaluate(&mut self) -> Result<&SessionState> {
        let selected = match self.state {
            SessionState::AwaitingConfirmation { selected } => selected,
            _ => return Ok(&self.state),
        };
        let word = self.words.get(selected).ok_or_else(|| {
            Error::Internal(format!(
                "selection {selected} does not name one of {} placed words",
                self.words.len()
            ))
        })?;
        let solution = &self.words[self.solution];

        if word.text == solution.text {
            info!(word = %word.text, attempts = self.attempts, "terminal unlocked");
            self.state = SessionState::Won;
            return Ok(&self.state);
        }

        let guess = Guess {
            text: word.text.clone(),
            score: common_letters(&word.text, &solution.text),
        };
        self.attempts = self.attempts.saturating_sub(1);
        debug!(word = %guess.text, score = guess.score, attempts = self.attempts, "guess denied");
        self.history.push(guess.clone());

        self.state = if self.attempts == 0 {
            info!("terminal locked");
            SessionState::Lost
        } else {
            SessionState::Running {
                feedback: Some(guess),
            }
        };
        Ok(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let selected = match self.state {
            SessionState::AwaitingConfirmation { selected } => self.words.get(selected),
            _ => None,
        };
        let feedback = match &self.state {
            SessionState::Running { feedback } => feedback.as_ref(),
            _ => None,
        };
        Snapshot {
            layout: &self.layout,
            panels: &self.panels,
            words: &self.words,
            attempts: self.attempts,
            max_attempts: self.config.max_attempts,
            hovered: self.find_selected_word(self.cursor),
            selected,
            feedback,
            history: &self.history,
            cursor: self.cursor_display(),
            state: &self.state,
            revealed: self.state.is_terminal().then(|| self.solution()),
        }
    }

    /// Runs the game until it is won, lost or abandoned.
    ///
    /// Returns `true` only when the solution was found.
    pub fn run<I, D>(&mut self, input: &mut I, display: &mut D) -> Result<bool>
    where
        I: InputSource + ?Sized,
        D: Display + ?Sized,
    {
        loop {
            display.draw(&self.snapshot())?;

            if let SessionState::AwaitingConfirmation { .. } = self.state {
                self.evaluate()?;
                continue;
            }
            if let Some(unlocked) = self.outcome() {
                return Ok(unlocked);
            }

            let event = input.next_event()?;
            if self.apply(event) == Control::Quit {
                return Ok(false);
            }
        }
    }
}

fn generate_filler<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| FILLER[rng.below(FILLER.len())] as char)
        .collect()
}

/// Draws words until `required` are placed or the draw budget runs out.
/// A word that can't be placed is dropped from the pool.
fn place_words<R: RandomSource + ?Sized>(
    placer: &Placer,
    rng: &mut R,
    candidates: &[String],
    required: usize,
) -> Result<Vec<PlacedWord>> {
    let mut pool: Vec<&str> = candidates.iter().map(String::as_str).collect();
    let mut placed = Vec::with_capacity(required);
    let mut draws = 0;

    while placed.len() < required && draws < DRAW_RETRIES && !pool.is_empty() {
        draws += 1;
        let text = pool.swap_remove(rng.below(pool.len()));
        match placer.place(rng, text, &placed) {
            Ok(word) => placed.push(word),
            Err(err) => warn!(%err, "drawing another word"),
        }
    }

    if placed.len() < required {
        return Err(Error::InitializationFailed {
            placed: placed.len(),
            required,
        });
    }
    Ok(placed)
}
