//! The random source dice and oracle draws are taken from.

use rand::Rng;

/// A source of uniform integers.
///
/// This is the only capability the roller and the oracle resolver need, so
/// any seeded generator or scripted test double can stand behind it. Every
/// draw may mutate internal state; sharing one source between threads needs
/// external synchronisation.
pub trait RandomSource {
    /// Draw a uniform integer in `1..=upper`. `upper` is at least 1.
    fn next_in(&mut self, upper: u32) -> u32;
}

impl<R: Rng> RandomSource for R {
    fn next_in(&mut self, upper: u32) -> u32 {
        self.random_range(1..=upper)
    }
}
