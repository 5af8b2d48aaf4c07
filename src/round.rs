// One-shot pick tracking for a rendered round.
// The widget shows the choices as buttons; the first click locks the
// round, reveals the answer, and flags a wrong pick. This module is the
// pure half of that interaction.

use crate::guess::GuessSet;

/// How a single choice should be presented after (or before) a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    /// The true count, revealed once the round is locked.
    Correct,
    /// The player's pick, when it was not the true count.
    Wrong,
    /// Everything else, and every choice while the round is open.
    Neutral,
}

/// What a pick resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOutcome {
    pub picked: u64,
    pub answer: u64,
    pub correct: bool,
}

/// A guess set plus the lock state of the player's single pick.
#[derive(Debug, Clone)]
pub struct GuessRound {
    set: GuessSet,
    picked: Option<u64>,
}

impl GuessRound {
    pub fn new(set: GuessSet) -> GuessRound {
        GuessRound { set, picked: None }
    }

    /// Register the player's pick. Returns `None` if the round is
    /// already locked or `value` is not one of the choices; otherwise
    /// locks the round and reports the outcome.
    pub fn pick(&mut self, value: u64) -> Option<PickOutcome> {
        if self.picked.is_some() {
            return None;
        }
        if !self.set.choices().contains(&value) {
            return None;
        }
        self.picked = Some(value);
        Some(PickOutcome {
            picked: value,
            answer: self.set.answer(),
            correct: value == self.set.answer(),
        })
    }

    /// Presentation state for one choice. Neutral across the board
    /// until a pick locks the round.
    pub fn mark_for(&self, value: u64) -> ChoiceMark {
        let picked = match self.picked {
            Some(p) => p,
            None => return ChoiceMark::Neutral,
        };
        if value == self.set.answer() {
            ChoiceMark::Correct
        } else if value == picked {
            ChoiceMark::Wrong
        } else {
            ChoiceMark::Neutral
        }
    }

    pub fn is_locked(&self) -> bool {
        self.picked.is_some()
    }

    pub fn set(&self) -> &GuessSet {
        &self.set
    }

    pub fn into_set(self) -> GuessSet {
        self.set
    }
}
