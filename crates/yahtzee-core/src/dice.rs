//! Dice, holds and the random source that rolls them.
//!
//! This module contains:
//! - `Hand`: the five dice of the current turn
//! - `HoldMask`: which dice are kept out of the next roll
//! - `DiceRoller`: the source of face values, with a `rand`-backed implementation

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of dice in a hand
pub const DICE_COUNT: usize = 5;

/// Lowest face on a die
pub const MIN_FACE: u8 = 1;

/// Highest face on a die
pub const MAX_FACE: u8 = 6;

/// Something that can produce a single die face in `1..=6`.
///
/// The turn engine asks for exactly one face per unheld die on every roll.
/// Returning a face outside that range is a bug in the roller: debug builds
/// panic on it, release builds clamp it into range so a `Hand` stays valid.
pub trait DiceRoller {
    /// Roll one die
    fn roll_die(&mut self) -> u8;
}

/// A `DiceRoller` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomRoller<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomRoller<R> {
    /// Wrap a random number generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomRoller<ThreadRng> {
    /// Roller using the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> DiceRoller for RandomRoller<R> {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(MIN_FACE..=MAX_FACE)
    }
}

/// A `DiceRoller` that replays a fixed sequence of faces, cycling when exhausted.
///
/// Useful for replays and for driving the engine deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRoller {
    faces: Vec<u8>,
    draws: usize,
}

impl SequenceRoller {
    /// Create a roller from a list of faces.
    ///
    /// Faces outside `1..=6` are dropped; an empty list rolls ones.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: Vec<u8> = faces.into_iter().filter(|&f| is_valid_face(f)).collect();
        Self { faces, draws: 0 }
    }

    /// How many faces have been drawn so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl DiceRoller for SequenceRoller {
    fn roll_die(&mut self) -> u8 {
        let face = if self.faces.is_empty() {
            MIN_FACE
        } else {
            self.faces[self.draws % self.faces.len()]
        };
        self.draws += 1;
        face
    }
}

/// Check whether a value is a legal die face
pub fn is_valid_face(value: u8) -> bool {
    (MIN_FACE..=MAX_FACE).contains(&value)
}

/// A value that is not a die face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("die face {0} is outside 1..=6")]
pub struct InvalidFace(pub u8);

/// The five dice of a turn, in table order.
///
/// A fresh hand shows all ones, which is what the table displays before the
/// first roll of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct Hand([u8; DICE_COUNT]);

impl Hand {
    /// Create a hand from explicit values.
    ///
    /// Returns `None` if any value is not a die face.
    pub fn new(values: [u8; DICE_COUNT]) -> Option<Self> {
        Self::try_from(values).ok()
    }

    /// The dice values
    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    /// Value of a single die
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Sum of all five dice
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&v| u32::from(v)).sum()
    }

    /// Count of each face. Index 0 is unused so that `counts[face]` reads naturally.
    pub fn face_counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for &v in &self.0 {
            counts[v as usize] += 1;
        }
        counts
    }

    /// Check if the hand shows a given face at least once
    pub fn contains(&self, face: u8) -> bool {
        self.0.contains(&face)
    }

    /// Re-roll every die whose hold flag is clear.
    ///
    /// Held dice keep their value and never consume a roll from `roller`.
    pub fn roll<D: DiceRoller + ?Sized>(&mut self, held: &HoldMask, roller: &mut D) {
        for (i, die) in self.0.iter_mut().enumerate() {
            if !held.is_held(i) {
                let face = roller.roll_die();
                debug_assert!(is_valid_face(face), "roller produced face {face}");
                *die = face.clamp(MIN_FACE, MAX_FACE);
            }
        }
    }
}

impl TryFrom<[u8; DICE_COUNT]> for Hand {
    type Error = InvalidFace;

    fn try_from(values: [u8; DICE_COUNT]) -> Result<Self, Self::Error> {
        match values.iter().find(|&&v| !is_valid_face(v)) {
            Some(&bad) => Err(InvalidFace(bad)),
            None => Ok(Self(values)),
        }
    }
}

impl From<Hand> for [u8; DICE_COUNT] {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self([MIN_FACE; DICE_COUNT])
    }
}

/// Hold flags, one per die position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldMask([bool; DICE_COUNT]);

impl HoldMask {
    /// Create a mask from explicit flags
    pub fn new(flags: [bool; DICE_COUNT]) -> Self {
        Self(flags)
    }

    /// All flags
    pub fn flags(&self) -> [bool; DICE_COUNT] {
        self.0
    }

    /// Whether a die is held. Out-of-range indices are never held.
    pub fn is_held(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Flip a die's flag, returning the new value (`None` if out of range)
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flag = self.0.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Release every die
    pub fn clear(&mut self) {
        self.0 = [false; DICE_COUNT];
    }

    /// Number of held dice
    pub fn held_count(&self) -> usize {
        self.0.iter().filter(|&&h| h).count()
    }
}
