// Phased decoy-set generation.
// Given the true review count, build a small shuffled set of plausible
// answers that hides the real one: a shrink phase below it, a growth
// phase above it, a fill fallback, and an occasional extreme-low tweak.

use crate::count::{RawCount, CAP};
use crate::random::{Randomness, RngRandomness};

use std::collections::BTreeSet;

/// Minimum number of choices a finished set aims for. Only unreachable
/// when the integer space right below the cap is exhausted, which the
/// cap's size rules out in practice.
pub const MIN_ANSWERS: usize = 6;

const LOW_TWEAK_THRESHOLD: u64 = 20;
const SHRINK_FLOOR: u64 = 50;
const COLLISION_PROBES: u32 = 10;

/// A finished game round's answers: the shuffled choices to render and
/// the normalized true count hidden among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSet {
    choices: Vec<u64>,
    answer: u64,
}

impl GuessSet {
    /// Build a guess set around `count` using the supplied randomness.
    ///
    /// Never fails: malformed counts normalize to 0 and every phase is
    /// bounded, so this always returns a valid set.
    pub fn build(count: impl Into<RawCount>, random: &mut dyn Randomness) -> GuessSet {
        let tc = count.into().normalize();

        let mut answers = BTreeSet::new();
        answers.insert(tc);

        // Minimum gap between consecutive upward answers.
        let min_step_increase = random.int_between(40, 60) as u64;
        // How many new downward answers the shrink phase may add.
        let max_down_guesses = random.int_between(4, 5) as usize;

        shrink_below(&mut answers, tc, min_step_increase, max_down_guesses, random);
        grow_above(&mut answers, tc, min_step_increase, random);
        fill_upward(&mut answers);
        low_end_tweak(&mut answers, tc, random);

        let mut choices: Vec<u64> = answers.into_iter().collect();
        shuffle(&mut choices, random);

        GuessSet { choices, answer: tc }
    }

    /// Build with a fresh OS-entropy source, the live-game default.
    pub fn generate(count: impl Into<RawCount>) -> GuessSet {
        let mut random = RngRandomness::from_entropy();
        GuessSet::build(count, &mut random)
    }

    /// The shuffled choices, in render order.
    pub fn choices(&self) -> &[u64] {
        &self.choices
    }

    /// The normalized true count. Always present in `choices`.
    pub fn answer(&self) -> u64 {
        self.answer
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.choices.iter()
    }

    pub fn into_choices(self) -> Vec<u64> {
        self.choices
    }
}

impl<'a> IntoIterator for &'a GuessSet {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.choices.iter()
    }
}

// Walk downward from the true count by repeated divide-by-5 with noise.
// Runs only when the count clears the minimum step, and contributes at
// most `max_down_guesses` new members.
fn shrink_below(
    answers: &mut BTreeSet<u64>,
    tc: u64,
    min_step_increase: u64,
    max_down_guesses: usize,
    random: &mut dyn Randomness,
) {
    if tc < min_step_increase {
        return;
    }

    let mut current = tc;
    let mut down_count = 0;

    while answers.len() < MIN_ANSWERS && down_count < max_down_guesses {
        if current == 0 {
            break;
        }

        let divided = current / 5;
        // No progress means we would loop forever.
        if divided == current {
            break;
        }

        let noise = random.int_between(-3, 3);
        let mut next = if noise < 0 {
            divided.saturating_sub(noise.unsigned_abs())
        } else {
            divided + noise as u64
        };
        // Keep it strictly below the previous value.
        if next >= current {
            next = current - 1;
        }

        if answers.insert(next) {
            down_count += 1;
        }

        // Advance even on a duplicate, so a stuck value still moves.
        current = next;

        if current < SHRINK_FLOOR {
            break;
        }
    }
}

// Walk upward from the true count by multiply-by-5 with noise, never
// stepping less than `min_step_increase` past the previous value.
fn grow_above(
    answers: &mut BTreeSet<u64>,
    tc: u64,
    min_step_increase: u64,
    random: &mut dyn Randomness,
) {
    let mut current = tc;

    while answers.len() < MIN_ANSWERS {
        // current never exceeds CAP, so base fits u64 with lots of room.
        let base = current * 5;
        let noise = random.int_between(-2, 3);
        let mut candidate = if noise < 0 {
            base.saturating_sub(noise.unsigned_abs())
        } else {
            base + noise as u64
        };

        // The noisy multiply is only a suggestion; the gap rule wins.
        if candidate < current + min_step_increase {
            candidate = current + min_step_increase;
        }
        if candidate > CAP {
            candidate = CAP;
        }

        // Nudge past collisions, but give up rather than spin.
        let mut probes = 0;
        while answers.contains(&candidate) && candidate < CAP && probes < COLLISION_PROBES {
            candidate += 1;
            probes += 1;
        }
        if answers.contains(&candidate) {
            break;
        }

        answers.insert(candidate);
        current = candidate;
    }
}

// Last resort when growth gave up early: count upward from the maximum
// one at a time until the size target is met.
fn fill_upward(answers: &mut BTreeSet<u64>) {
    if answers.len() >= MIN_ANSWERS {
        return;
    }

    let mut max_val = match answers.iter().next_back() {
        Some(&v) => v,
        None => return,
    };

    while answers.len() < MIN_ANSWERS && max_val < CAP {
        max_val += 1;
        answers.insert(max_val);
    }
}

// With 50% probability, swap a small non-answer minimum for 0 or 1 so
// the options sometimes include an obviously-wrong extreme low.
fn low_end_tweak(answers: &mut BTreeSet<u64>, tc: u64, random: &mut dyn Randomness) {
    let min_val = match answers.iter().next() {
        Some(&v) => v,
        None => return,
    };

    if min_val == tc {
        return;
    }
    // Coin first, threshold second: keeps draw order stable for
    // scripted sources.
    if !random.chance(0.5) {
        return;
    }
    if min_val >= LOW_TWEAK_THRESHOLD {
        return;
    }

    let candidates = if random.chance(0.5) { [0u64, 1] } else { [1u64, 0] };

    for val in candidates.iter().copied() {
        // Already that value; it is 0 or 1 either way, leave it.
        if val == min_val {
            break;
        }
        if !answers.contains(&val) {
            answers.remove(&min_val);
            answers.insert(val);
            break;
        }
    }
}

// Unbiased Fisher-Yates so the answer's position is unpredictable.
fn shuffle(choices: &mut [u64], random: &mut dyn Randomness) {
    for i in (1..choices.len()).rev() {
        let j = random.int_between(0, i as i64) as usize;
        choices.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandomness;

    fn assert_invariants(set: &GuessSet) {
        let mut seen = BTreeSet::new();
        for &v in set.choices() {
            assert!(v <= CAP, "choice {} above cap", v);
            assert!(seen.insert(v), "duplicate choice {}", v);
        }
        assert_eq!(
            set.choices().iter().filter(|&&v| v == set.answer()).count(),
            1,
            "answer must appear exactly once"
        );
    }

    #[test]
    fn zero_count_skips_shrink_and_grows_with_gaps() {
        // min_step = 40, max_down = 4, five growth noises, five shuffle
        // draws. No shrink draws may be consumed since 0 < min_step.
        let mut random = ScriptedRandomness::new(
            vec![40, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![],
        );
        let set = GuessSet::build(0u64, &mut random);
        assert_invariants(&set);
        assert!(!random.exhausted());
        assert_eq!(set.answer(), 0);
        assert!(set.choices().contains(&0));
        assert_eq!(set.len(), MIN_ANSWERS);

        let mut sorted: Vec<u64> = set.choices().to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            assert!(pair[1] - pair[0] >= 40, "gap below min step: {:?}", pair);
        }
    }

    #[test]
    fn growth_respects_minimum_step_over_multiply() {
        // From 0, 0 * 5 + noise always undershoots 0 + min_step, so
        // the first accepted value is exactly min_step.
        let mut random = ScriptedRandomness::new(
            vec![50, 4, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0],
            vec![],
        );
        let set = GuessSet::build(0u64, &mut random);
        let mut sorted: Vec<u64> = set.choices().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted[0], 0);
        assert_eq!(sorted[1], 50);
        // 50 * 5 + 3 = 253 clears the gap rule from then on.
        assert_eq!(sorted[2], 253);
    }

    #[test]
    fn shrink_phase_produces_values_below_the_count() {
        // max_down = 4 leaves one slot for the growth phase, so the
        // result straddles the true count: four below, one above.
        let mut random = ScriptedRandomness::new(
            vec![40, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![false],
        );
        let set = GuessSet::build(1_000_000u64, &mut random);
        assert_invariants(&set);
        assert!(set.choices().iter().any(|&v| v < 1_000_000));
        assert!(set.choices().iter().any(|&v| v > 1_000_000));
        assert!(!random.exhausted());
    }

    #[test]
    fn shrink_stops_once_below_fifty() {
        // tc = 100: divided = 20, noise 0 -> 20 inserted, and 20 < 50
        // ends the phase after one step. Growth fills the rest.
        let mut random = ScriptedRandomness::new(
            vec![40, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![false],
        );
        let set = GuessSet::build(100u64, &mut random);
        assert_invariants(&set);
        assert!(set.choices().contains(&20));
        assert!(set.choices().contains(&100));
        assert_eq!(set.choices().iter().filter(|&&v| v < 100).count(), 1);
        assert!(!random.exhausted());
    }

    #[test]
    fn cap_input_terminates_and_never_exceeds_cap() {
        let mut random = RngRandomness::seeded(3);
        let set = GuessSet::build(CAP, &mut random);
        assert_invariants(&set);
        assert!(set.choices().contains(&CAP));
        assert!(set.choices().iter().all(|&v| v <= CAP));
    }

    #[test]
    fn low_end_tweak_replaces_small_minimum() {
        // tc = 100, shrink draws noise 0 -> inserts 20, stops below 50.
        // Growth: 100*5+0=500, then 2500, 12500, all >= current+40.
        // Shrink noise -3 makes the minimum 17, under the threshold.
        let mut random = ScriptedRandomness::new(
            vec![40, 4, -3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![true, true],
        );
        let set = GuessSet::build(100u64, &mut random);
        assert_invariants(&set);
        // Minimum 17 was swapped for 0 (first candidate, coin true).
        assert!(set.choices().contains(&0));
        assert!(!set.choices().contains(&17));
        assert_eq!(set.len(), MIN_ANSWERS);
        assert!(!random.exhausted());
    }

    #[test]
    fn low_end_tweak_declines_on_tails() {
        let mut random = ScriptedRandomness::new(
            vec![40, 4, -3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![false],
        );
        let set = GuessSet::build(100u64, &mut random);
        assert!(set.choices().contains(&17));
        assert!(!set.choices().contains(&0));
    }

    #[test]
    fn low_end_tweak_never_touches_the_answer() {
        // tc = 0 is always the minimum, so the tweak must not run and
        // no coins may be consumed.
        let mut random = ScriptedRandomness::new(
            vec![40, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![],
        );
        let set = GuessSet::build(0u64, &mut random);
        assert!(set.choices().contains(&0));
        assert!(!random.exhausted());
    }

    #[test]
    fn malformed_inputs_degrade_to_zero() {
        for raw in [
            RawCount::from(f64::NAN),
            RawCount::from(-42i64),
            RawCount::from("garbage"),
        ] {
            let mut random = RngRandomness::seeded(11);
            let set = GuessSet::build(raw, &mut random);
            assert_eq!(set.answer(), 0);
            assert!(set.choices().contains(&0));
            assert_invariants(&set);
        }
    }

    #[test]
    fn truncation_not_rounding() {
        let mut random = RngRandomness::seeded(5);
        let set = GuessSet::build(5.9f64, &mut random);
        assert_eq!(set.answer(), 5);
        assert!(set.choices().contains(&5));
    }

    #[test]
    fn repeated_builds_always_satisfy_invariants() {
        let mut random = RngRandomness::seeded(42);
        for n in [0u64, 1, 7, 49, 50, 60, 1000, 1_000_000, CAP - 100] {
            for _ in 0..200 {
                let set = GuessSet::build(n, &mut random);
                assert_invariants(&set);
                assert_eq!(set.answer(), n);
                assert!(set.len() >= MIN_ANSWERS, "undersized set for {}", n);
            }
        }
    }

    #[test]
    fn shuffle_moves_the_answer_around() {
        let mut positions = BTreeSet::new();
        for seed in 0..40 {
            let mut random = RngRandomness::seeded(seed);
            let set = GuessSet::build(1_000u64, &mut random);
            let pos = set
                .choices()
                .iter()
                .position(|&v| v == set.answer())
                .unwrap();
            positions.insert(pos);
        }
        assert!(positions.len() > 1, "answer stuck in one slot");
    }
}
