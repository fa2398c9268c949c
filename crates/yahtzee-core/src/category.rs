//! Scoring categories and the rules that score a hand against them.
//!
//! The thirteen categories are split into the upper section (one per face) and
//! the lower section (combinations). Their order is the order of the score
//! table and has no effect on scoring.

use crate::dice::{Hand, DICE_COUNT, MAX_FACE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Points for a full house
pub const FULL_HOUSE_SCORE: u32 = 25;

/// Points for a small straight
pub const SMALL_STRAIGHT_SCORE: u32 = 30;

/// Points for a large straight
pub const LARGE_STRAIGHT_SCORE: u32 = 40;

/// Points for a Yahtzee
pub const YAHTZEE_SCORE: u32 = 50;

/// Runs of four that make a small straight
const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

/// Runs of five that make a large straight
const LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

/// Section of the score table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Upper,
    Lower,
}

/// A scoring category.
///
/// Serialized using the labels printed on the score table, e.g. `"Three of a Kind"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    // ==================== Upper Section ====================
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,

    // ==================== Lower Section ====================
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind,
    #[serde(rename = "Full House")]
    FullHouse,
    #[serde(rename = "Small Straight")]
    SmallStraight,
    #[serde(rename = "Large Straight")]
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// Every category in table order
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Upper section categories
    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Lower section categories
    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Number of categories on a sheet
    pub const COUNT: usize = 13;

    /// Label shown on the score table
    pub fn name(&self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }

    /// Short alias accepted by `FromStr`, handy for typed commands
    pub fn short_name(&self) -> &'static str {
        match self {
            Category::Ones => "1s",
            Category::Twos => "2s",
            Category::Threes => "3s",
            Category::Fours => "4s",
            Category::Fives => "5s",
            Category::Sixes => "6s",
            Category::ThreeOfAKind => "3k",
            Category::FourOfAKind => "4k",
            Category::FullHouse => "fh",
            Category::SmallStraight => "ss",
            Category::LargeStraight => "ls",
            Category::Yahtzee => "y",
            Category::Chance => "c",
        }
    }

    /// Which section of the table this category belongs to
    pub fn section(&self) -> Section {
        if self.upper_face().is_some() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    /// Check if this is an upper section category
    pub fn is_upper(&self) -> bool {
        self.section() == Section::Upper
    }

    /// The face counted by an upper section category
    pub fn upper_face(&self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// Score a hand in this category
    pub fn score(&self, hand: &Hand) -> u32 {
        score_for_category(*self, hand)
    }

    /// Highest score any hand can make here
    pub fn max_score(&self) -> u32 {
        match self {
            Category::FullHouse => FULL_HOUSE_SCORE,
            Category::SmallStraight => SMALL_STRAIGHT_SCORE,
            Category::LargeStraight => LARGE_STRAIGHT_SCORE,
            Category::Yahtzee => YAHTZEE_SCORE,
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => {
                DICE_COUNT as u32 * MAX_FACE as u32
            }
            _ => self.upper_face().map_or(0, |face| DICE_COUNT as u32 * face as u32),
        }
    }

    /// Whether some hand scores exactly `points` here.
    ///
    /// Zero always counts, since a scratched category is locked at zero.
    pub fn is_reachable(&self, points: u32) -> bool {
        if points == 0 {
            return true;
        }
        if points > self.max_score() {
            return false;
        }
        match self {
            Category::FullHouse
            | Category::SmallStraight
            | Category::LargeStraight
            | Category::Yahtzee => points == self.max_score(),
            // Sum of all five dice
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => {
                points >= DICE_COUNT as u32
            }
            _ => self
                .upper_face()
                .map_or(false, |face| points % face as u32 == 0),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a category label is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the table label (case and spacing insensitive) or the short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Category::ALL
            .into_iter()
            .find(|cat| {
                let label: String = cat
                    .name()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .flat_map(char::to_lowercase)
                    .collect();
                label == wanted || cat.short_name() == wanted
            })
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Compute the points a hand is worth in a category.
///
/// Pure and total: every hand scores something in `0..=50` in every category.
pub fn score_for_category(category: Category, hand: &Hand) -> u32 {
    let counts = hand.face_counts();

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.upper_face().unwrap_or(0);
            u32::from(counts[face as usize]) * u32::from(face)
        }
        Category::ThreeOfAKind => {
            if has_n_of_a_kind(&counts, 3) {
                hand.sum()
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if has_n_of_a_kind(&counts, 4) {
                hand.sum()
            } else {
                0
            }
        }
        Category::FullHouse => {
            if is_full_house(&counts) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if is_small_straight(hand) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if is_large_straight(hand) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if has_n_of_a_kind(&counts, 5) {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => hand.sum(),
    }
}

/// At least `n` dice share a face
fn has_n_of_a_kind(counts: &[u8; 7], n: u8) -> bool {
    counts[1..].iter().any(|&c| c >= n)
}

/// Exactly a triple plus a pair. Five of a kind does not count.
fn is_full_house(counts: &[u8; 7]) -> bool {
    let has_three = counts[1..].iter().any(|&c| c == 3);
    let has_two = counts[1..].iter().any(|&c| c == 2);
    has_three && has_two
}

fn is_small_straight(hand: &Hand) -> bool {
    SMALL_STRAIGHTS
        .iter()
        .any(|run| run.iter().all(|&face| hand.contains(face)))
}

fn is_large_straight(hand: &Hand) -> bool {
    LARGE_STRAIGHTS
        .iter()
        .any(|run| run.iter().all(|&face| hand.contains(face)))
}
