//! Per-player score sheets.
//!
//! A sheet records the points locked into each category and derives the
//! section totals, the upper bonus and the grand total from those points.
//! Totals are always recomputed from scratch after a change.

use crate::category::{Category, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper total needed to earn the bonus
pub const UPPER_BONUS_THRESHOLD: u32 = 63;

/// Points awarded for reaching the threshold
pub const UPPER_BONUS: u32 = 35;

/// Totals derived from a sheet's locked scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTotals {
    pub upper_total: u32,
    pub lower_total: u32,
    pub bonus: u32,
    pub grand_total: u32,
}

impl SheetTotals {
    /// Compute totals from a set of locked scores
    pub fn from_scores(scores: &BTreeMap<Category, u32>) -> Self {
        let mut upper_total: u32 = 0;
        let mut lower_total: u32 = 0;
        for (category, points) in scores {
            match category.section() {
                Section::Upper => upper_total = upper_total.saturating_add(*points),
                Section::Lower => lower_total = lower_total.saturating_add(*points),
            }
        }

        let bonus = if upper_total >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        };

        Self {
            upper_total,
            lower_total,
            bonus,
            grand_total: upper_total.saturating_add(bonus).saturating_add(lower_total),
        }
    }
}

/// One player's score sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    /// Locked categories and their points. A key is present iff it is locked.
    scores: BTreeMap<Category, u32>,
    totals: SheetTotals,
}

impl ScoreSheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from already-locked scores, deriving the totals
    pub fn from_locked(scores: BTreeMap<Category, u32>) -> Self {
        let mut sheet = Self {
            scores,
            totals: SheetTotals::default(),
        };
        sheet.recompute_totals();
        sheet
    }

    /// Lock a category with the given points.
    ///
    /// Returns `false` and leaves the sheet untouched if the category was
    /// already locked.
    pub fn lock(&mut self, category: Category, points: u32) -> bool {
        if self.is_locked(category) {
            return false;
        }
        self.scores.insert(category, points);
        self.recompute_totals();
        true
    }

    /// Re-derive every total from the locked scores
    pub fn recompute_totals(&mut self) {
        self.totals = SheetTotals::from_scores(&self.scores);
    }

    /// Check if a category has been locked
    pub fn is_locked(&self, category: Category) -> bool {
        self.scores.contains_key(&category)
    }

    /// Points locked in a category, if any
    pub fn score(&self, category: Category) -> Option<u32> {
        self.scores.get(&category).copied()
    }

    /// Locked categories and points in table order
    pub fn scores(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.scores.iter().map(|(c, p)| (*c, *p))
    }

    /// Locked categories in table order
    pub fn locked(&self) -> impl Iterator<Item = Category> + '_ {
        self.scores.keys().copied()
    }

    /// Categories still open, in table order
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |c| !self.is_locked(*c))
    }

    /// Number of locked categories
    pub fn locked_count(&self) -> usize {
        self.scores.len()
    }

    /// Every category has been locked
    pub fn is_complete(&self) -> bool {
        self.scores.len() == Category::COUNT
    }

    /// Derived totals
    pub fn totals(&self) -> SheetTotals {
        self.totals
    }

    pub fn upper_total(&self) -> u32 {
        self.totals.upper_total
    }

    pub fn lower_total(&self) -> u32 {
        self.totals.lower_total
    }

    pub fn bonus(&self) -> u32 {
        self.totals.bonus
    }

    pub fn grand_total(&self) -> u32 {
        self.totals.grand_total
    }
}
