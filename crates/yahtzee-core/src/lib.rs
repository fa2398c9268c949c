//! Yahtzee - a pass-and-play dice game engine
//!
//! This crate provides the core game logic for a local Yahtzee table of up to
//! four players, including:
//! - Dice rolling with hold/unhold selection
//! - Scoring rules for the thirteen categories
//! - Score sheets with section totals and the upper bonus
//! - Turn state machine, winner determination and save/restore
//!
//! # Architecture
//!
//! The engine is platform-agnostic and performs no I/O. A front-end forwards
//! player intents into a [`GameState`], then reads the state back to render it.
//! It can be compiled to:
//! - Native Rust for the terminal front-end
//! - WebAssembly for a browser front-end
//!
//! # Modules
//!
//! - [`dice`]: Hands, hold masks and dice rollers
//! - [`category`]: Categories and their scoring rules
//! - [`sheet`]: Per-player score sheets and totals
//! - [`game`]: Session and turn state machine
//! - [`snapshot`]: Save/restore documents
//! - [`view`]: Score table views for rendering

pub mod actions;
pub mod category;
pub mod dice;
pub mod game;
pub mod sheet;
pub mod snapshot;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use category::{score_for_category, Category, ParseCategoryError, Section};
pub use dice::{DiceRoller, Hand, HoldMask, RandomRoller, SequenceRoller, DICE_COUNT};
pub use game::{
    GameError, GamePhase, GameState, PlayerId, TurnContext, MAX_PLAYERS, ROLLS_PER_TURN,
};
pub use sheet::{ScoreSheet, SheetTotals, UPPER_BONUS, UPPER_BONUS_THRESHOLD};
pub use snapshot::{GameSnapshot, SheetSnapshot, SnapshotError};
pub use view::{ScoreCell, ScoreRow, Scoreboard};
