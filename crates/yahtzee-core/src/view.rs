//! Read-only views of a session for rendering.
//!
//! Front-ends draw the score table from a `Scoreboard` rather than poking at
//! the sheets directly. Uses plain vectors so it serializes cleanly to JSON.

use crate::category::Category;
use crate::game::{GameState, PlayerId};
use crate::sheet::SheetTotals;
use serde::{Deserialize, Serialize};

/// What one cell of the score table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points")]
pub enum ScoreCell {
    /// Points permanently recorded
    Locked(u32),
    /// What the current hand would score here (current player, open category)
    Preview(u32),
    /// Nothing to show
    Empty,
}

impl ScoreCell {
    /// Points shown in the cell, if any
    pub fn points(&self) -> Option<u32> {
        match self {
            ScoreCell::Locked(p) | ScoreCell::Preview(p) => Some(*p),
            ScoreCell::Empty => None,
        }
    }

    /// Whether clicking this cell would score it
    pub fn is_pickable(&self) -> bool {
        matches!(self, ScoreCell::Preview(_))
    }
}

/// One category row: a cell per player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub category: Category,
    pub cells: Vec<ScoreCell>,
}

/// The whole score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub players: Vec<String>,
    pub current_player: Option<PlayerId>,
    pub rows: Vec<ScoreRow>,
    /// Totals per player, in seating order
    pub totals: Vec<SheetTotals>,
    pub game_over: bool,
    pub winners: Vec<String>,
}

impl GameState {
    /// What the table shows for one player and category
    pub fn score_cell(&self, player: PlayerId, category: Category) -> ScoreCell {
        let Some(sheet) = self.sheet(player) else {
            return ScoreCell::Empty;
        };

        if let Some(points) = sheet.score(category) {
            ScoreCell::Locked(points)
        } else if player == self.current_player() && self.can_score(category) {
            ScoreCell::Preview(self.preview_score(category))
        } else {
            ScoreCell::Empty
        }
    }

    /// Build the full score table
    pub fn scoreboard(&self) -> Scoreboard {
        let player_ids: Vec<PlayerId> = (0..self.player_count()).map(|i| i as PlayerId).collect();

        let rows = Category::ALL
            .into_iter()
            .map(|category| ScoreRow {
                category,
                cells: player_ids
                    .iter()
                    .map(|&p| self.score_cell(p, category))
                    .collect(),
            })
            .collect();

        let game_over = self.is_game_over();

        Scoreboard {
            players: self.players().to_vec(),
            current_player: self.is_started().then(|| self.current_player()),
            rows,
            totals: self.sheets().iter().map(|s| s.totals()).collect(),
            game_over,
            winners: if game_over { self.winners() } else { Vec::new() },
        }
    }
}
