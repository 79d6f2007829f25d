//! Random sources.
//!
//! Every random draw the engine makes (length group, word, panel, offset,
//! filler, start address) goes through a [`RandomSource`] owned by the caller,
//! so a seeded or scripted source makes a whole session reproducible.

/// A source of uniformly distributed integers.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "below() called with an empty range");
        (self.next_u64() % bound as u64) as usize
    }

    /// Uniform value in `low..=high`.
    fn between(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low <= high);
        low + self.below(high - low + 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Small PCG-style generator, seeded from the OS unless a seed is given.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleRng {
    pub fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }
}

impl RandomSource for SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: Vec<u64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: impl Into<Vec<u64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self { values, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SimpleRng::with_seed(7);
        let mut b = SimpleRng::with_seed(7);
        let left: Vec<u64> = (0..16).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..16).map(|_| b.next_u64()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_between_stays_in_range() {
        let mut rng = SimpleRng::with_seed(99);
        for _ in 0..1000 {
            let value = rng.between(3, 9);
            assert!((3..=9).contains(&value));
        }
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new([1, 2]);
        assert_eq!(rng.next_u64(), 1);
        assert_eq!(rng.next_u64(), 2);
        assert_eq!(rng.next_u64(), 1);
        assert_eq!(rng.below(2), 0);
    }
}
