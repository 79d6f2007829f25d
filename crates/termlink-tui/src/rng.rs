use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use termlink_core::RandomSource;

/// `rand`-backed random source: OS entropy, or a fixed seed for `--seed`.
pub struct EntropyRng(StdRng);

impl EntropyRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for EntropyRng {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = EntropyRng::new(Some(42));
        let mut b = EntropyRng::new(Some(42));
        for _ in 0..8 {
            assert_eq!(a.below(1000), b.below(1000));
        }
    }
}
