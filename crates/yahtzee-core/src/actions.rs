//! Game actions that players can take.
//!
//! This module defines the in-turn actions a player can take and the events
//! that result from applying them.

use crate::category::Category;
use crate::game::PlayerId;
use serde::{Deserialize, Serialize};

/// All possible actions the current player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Roll every die that is not held
    Roll,
    /// Hold or release a die (0-based position)
    ToggleHold(usize),
    /// Lock the current hand into a category
    Score(Category),
    /// Pass to the next player without scoring
    EndTurn,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began
    GameStarted { players: Vec<String> },

    /// All state was discarded
    GameReset,

    /// Unheld dice were rolled
    DiceRolled {
        player: PlayerId,
        dice: [u8; 5],
        rolls_left: u8,
    },

    /// A die was held or released
    HoldToggled { index: usize, held: bool },

    /// A category was locked
    CategoryScored {
        player: PlayerId,
        category: Category,
        points: u32,
    },

    /// Turn passed to the next player
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// Every sheet is full
    GameOver { winners: Vec<String>, score: u32 },

    /// A saved game replaced the session
    SnapshotImported { players: Vec<String> },
}
