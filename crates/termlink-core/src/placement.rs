//! Random word placement with a bounded retry budget.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PlacementError;
use crate::layout::{DisplayPosition, Layout};
use crate::rng::RandomSource;

/// Proposals tried for one word before giving up on it.
pub const PLACEMENT_RETRIES: usize = 20;

/// A word hidden in one panel, occupying offsets `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub panel: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// One terminal cell per character, in reading order.
    pub coordinates: Vec<DisplayPosition>,
}

impl PlacedWord {
    /// Builds a word at `start` in `panel` and computes its coordinates.
    pub fn new(layout: &Layout, panel: usize, start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let end = start + text.len();
        let coordinates = (start..end)
            .map(|offset| layout.linear_to_display(panel, offset))
            .collect();
        Self {
            panel,
            start,
            end,
            text,
            coordinates,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Conservative overlap test: touching spans count as overlapping.
    pub fn overlaps(&self, panel: usize, start: usize, end: usize) -> bool {
        self.panel == panel && self.start <= end && start <= self.end
    }

    /// Whether the panel-local `offset` falls inside this word.
    pub fn contains(&self, panel: usize, offset: usize) -> bool {
        self.panel == panel && self.start <= offset && offset < self.end
    }

    /// Characters paired with the cell each one is drawn at.
    pub fn cells(&self) -> impl Iterator<Item = (DisplayPosition, char)> + '_ {
        self.coordinates.iter().copied().zip(self.text.chars())
    }
}

/// Proposes random spots for words on a fixed layout.
#[derive(Debug, Clone)]
pub struct Placer {
    layout: Layout,
    retries: usize,
}

impl Placer {
    pub fn new(layout: Layout) -> Self {
        Self::with_retries(layout, PLACEMENT_RETRIES)
    }

    pub fn with_retries(layout: Layout, retries: usize) -> Self {
        Self { layout, retries }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Tries to find a free span for `word` that doesn't touch any word in
    /// `existing` on the same panel.
    pub fn place<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        word: &str,
        existing: &[PlacedWord],
    ) -> Result<PlacedWord, PlacementError> {
        let len = word.len();
        let panel_size = self.layout.panel_size();
        if len == 0 || len > panel_size || self.layout.panels() == 0 {
            return Err(PlacementError::NoSpaceFound {
                word: word.to_string(),
                attempts: 0,
            });
        }

        for attempt in 1..=self.retries {
            let panel = rng.below(self.layout.panels());
            let start = rng.between(0, panel_size - len);
            let end = start + len;

            if existing.iter().any(|w| w.overlaps(panel, start, end)) {
                trace!(word, panel, start, end, attempt, "placement rejected");
                continue;
            }

            debug!(word, panel, start, end, attempt, "word placed");
            return Ok(PlacedWord::new(&self.layout, panel, start, word));
        }

        Err(PlacementError::NoSpaceFound {
            word: word.to_string(),
            attempts: self.retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SimpleRng};

    #[test]
    fn test_overlap_is_conservative() {
        let layout = Layout::new(2, 4, 4, 0xA000);
        let word = PlacedWord::new(&layout, 0, 4, "CAT");
        assert_eq!((word.start, word.end), (4, 7));
        // Touching on either side is rejected.
        assert!(word.overlaps(0, 7, 10));
        assert!(word.overlaps(0, 1, 4));
        assert!(word.overlaps(0, 5, 8));
        assert!(!word.overlaps(0, 8, 11));
        assert!(!word.overlaps(0, 0, 3));
        // Other panels never conflict.
        assert!(!word.overlaps(1, 4, 7));
    }

    #[test]
    fn test_contains_is_half_open() {
        let layout = Layout::new(2, 4, 4, 0xA000);
        let word = PlacedWord::new(&layout, 1, 2, "DOG");
        assert!(!word.contains(1, 1));
        assert!(word.contains(1, 2));
        assert!(word.contains(1, 4));
        assert!(!word.contains(1, 5));
        assert!(!word.contains(0, 3));
    }

    #[test]
    fn test_place_retries_until_free_panel() {
        let layout = Layout::new(2, 2, 4, 0xA000);
        let placer = Placer::new(layout);
        let existing = vec![PlacedWord::new(&layout, 0, 0, "CAT")];
        // panel 0 / start 0 collides, then panel 1 / start 2 is free.
        let mut rng = ScriptedRng::new([0, 0, 1, 2]);
        let word = placer.place(&mut rng, "DOG", &existing).unwrap();
        assert_eq!((word.panel, word.start, word.end), (1, 2, 5));
        assert_eq!(
            word.coordinates,
            vec![
                DisplayPosition::new(22, 5),
                DisplayPosition::new(23, 5),
                DisplayPosition::new(20, 6),
            ]
        );
    }

    #[test]
    fn test_place_gives_up_when_panel_is_full() {
        let layout = Layout::new(1, 1, 4, 0xA000);
        let placer = Placer::new(layout);
        let existing = vec![PlacedWord::new(&layout, 0, 0, "CAT")];
        let mut rng = SimpleRng::with_seed(3);
        let err = placer.place(&mut rng, "DOG", &existing).unwrap_err();
        assert_eq!(
            err,
            PlacementError::NoSpaceFound {
                word: "DOG".to_string(),
                attempts: PLACEMENT_RETRIES,
            }
        );
    }

    #[test]
    fn test_place_rejects_words_longer_than_a_panel() {
        let layout = Layout::new(2, 1, 3, 0xA000);
        let placer = Placer::new(layout);
        let mut rng = SimpleRng::with_seed(3);
        let err = placer.place(&mut rng, "HORSE", &[]).unwrap_err();
        assert!(matches!(err, PlacementError::NoSpaceFound { attempts: 0, .. }));
    }

    #[test]
    fn test_placed_words_never_overlap() {
        let layout = Layout::new(3, 10, 12, 0xA000);
        let placer = Placer::new(layout);
        for seed in 0..50 {
            let mut rng = SimpleRng::with_seed(seed);
            let mut placed: Vec<PlacedWord> = Vec::new();
            for _ in 0..12 {
                if let Ok(word) = placer.place(&mut rng, "SECRET", &placed) {
                    placed.push(word);
                }
            }
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(!a.overlaps(b.panel, b.start, b.end), "seed {seed}: {a:?} / {b:?}");
                }
                assert!(a.end <= layout.panel_size());
                assert_eq!(a.coordinates.len(), a.text.len());
            }
        }
    }
}
