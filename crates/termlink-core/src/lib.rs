//! Puzzle session engine for TERMLINK, a terminal password-hacking game.
//!
//! Panels of random filler hide a handful of same-length dictionary words.
//! The player picks words and learns how many letters each shares with the
//! hidden password, until it is found or the attempts run out.
//!
//! The crate does no terminal I/O: input arrives as [`InputEvent`]s through an
//! [`InputSource`], and each frame is handed to a [`Display`] as a
//! [`Snapshot`].

pub mod dictionary;
pub mod error;
pub mod layout;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;

pub use dictionary::Dictionary;
pub use error::{Error, PlacementError, Result};
pub use layout::{DisplayPosition, GridPosition, Layout, ADDR_LEN, HEADER_HEIGHT};
pub use placement::{PlacedWord, Placer, PLACEMENT_RETRIES};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::common_letters;
pub use session::{
    Control, Display, Guess, InputEvent, InputSource, Session, SessionConfig, SessionState,
    Snapshot, DRAW_RETRIES,
};
