//! # Guesswork
//!
//! Decoy answer generation for the "guess the review count" minigame.
//!
//! Given the true count scraped off a store page, [`GuessSet::build`]
//! hides it inside a small shuffled set of plausible neighbors: a few
//! values shrunk below it, a few grown above it, occasionally an
//! obviously-wrong extreme low. All randomness flows through the
//! [`Randomness`] capability so generation is reproducible on demand.
//!
//! Page integration (DOM mounting, count scraping, navigation) lives in
//! the host extension; this crate is the pure core it calls into.

pub mod count;
pub mod format;
pub mod guess;
pub mod random;
pub mod round;

// Re-export core types for easy access
pub use count::{RawCount, CAP};
pub use format::format_count;
pub use guess::{GuessSet, MIN_ANSWERS};
pub use random::{Randomness, RngRandomness, ScriptedRandomness};
pub use round::{ChoiceMark, GuessRound, PickOutcome};
