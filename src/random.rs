// Randomness capability for the guess-set generator.
// All entropy the generator consumes flows through the `Randomness`
// trait so that callers can swap the backing source: a real RNG in
// production, a scripted draw sequence in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Abstract source of the random draws the generator needs.
///
/// The generator only ever asks for two things: a uniform integer in an
/// inclusive range and a weighted coin flip. Keeping the surface this
/// small is what makes exact playback in tests practical.
pub trait Randomness {
    /// Uniform integer in `[lo, hi]`, both ends inclusive.
    fn int_between(&mut self, lo: i64, hi: i64) -> i64;

    /// Weighted coin: `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// Production adapter wrapping any `rand::Rng`.
#[derive(Debug)]
pub struct RngRandomness<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRandomness<R> {
    pub fn new(rng: R) -> Self {
        RngRandomness { rng }
    }
}

impl RngRandomness<ChaCha8Rng> {
    /// Deterministic source for reproducible generation and tests.
    pub fn seeded(seed: u64) -> Self {
        RngRandomness {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh OS-entropy source, the default for live games.
    pub fn from_entropy() -> Self {
        RngRandomness {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> Randomness for RngRandomness<R> {
    fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        debug_assert!(lo <= hi);
        self.rng.gen_range(lo..=hi)
    }

    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen_bool(p)
    }
}

/// Plays back a prescribed sequence of draws.
///
/// Integer draws and coin flips come from independent scripts, so a test
/// can pin down one phase's behavior without counting every draw the
/// other phases make. When a script runs dry the source degrades to a
/// fixed answer (range midpoint, `false`) instead of panicking; tests
/// that need exactness assert `exhausted()` is false afterwards.
#[derive(Debug, Default)]
pub struct ScriptedRandomness {
    ints: VecDeque<i64>,
    coins: VecDeque<bool>,
    ran_dry: bool,
}

impl ScriptedRandomness {
    pub fn new<I, C>(ints: I, coins: C) -> Self
    where
        I: IntoIterator<Item = i64>,
        C: IntoIterator<Item = bool>,
    {
        ScriptedRandomness {
            ints: ints.into_iter().collect(),
            coins: coins.into_iter().collect(),
            ran_dry: false,
        }
    }

    /// True if any draw was requested after its script was empty.
    pub fn exhausted(&self) -> bool {
        self.ran_dry
    }
}

impl Randomness for ScriptedRandomness {
    fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        match self.ints.pop_front() {
            Some(v) => v.max(lo).min(hi),
            None => {
                self.ran_dry = true;
                lo + (hi - lo) / 2
            }
        }
    }

    fn chance(&mut self, _p: f64) -> bool {
        match self.coins.pop_front() {
            Some(v) => v,
            None => {
                self.ran_dry = true;
                false
            }
        }
    }
}
