//! Save and restore of a whole session.
//!
//! A `GameSnapshot` is a flat document holding the players, the turn in
//! progress and every score sheet. It is what gets written to a save file and
//! read back in. Missing or `null` fields fall back to the values of a fresh
//! session; anything that cannot describe a legal session is rejected and the
//! import leaves the running session alone.
//!
//! Stored totals are informational only. Importing always recomputes them
//! from the locked scores.

use crate::actions::GameEvent;
use crate::category::Category;
use crate::dice::{Hand, HoldMask, InvalidFace, DICE_COUNT};
use crate::game::{GameState, PlayerId, TurnContext, MAX_PLAYERS, ROLLS_PER_TURN};
use crate::sheet::ScoreSheet;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Reasons a saved game cannot be loaded
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Not a valid save document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Too many players: {0} (at most 4)")]
    TooManyPlayers(usize),

    #[error("A started game needs at least one player")]
    NoPlayers,

    #[error("{sheets} score sheets for {players} players")]
    SheetCountMismatch { players: usize, sheets: usize },

    #[error("Current player {index} does not exist ({players} players)")]
    CurrentPlayerOutOfRange { index: usize, players: usize },

    #[error("Expected 5 dice, found {0}")]
    InvalidDiceCount(usize),

    #[error("Invalid die: {0}")]
    InvalidDie(#[from] InvalidFace),

    #[error("Expected 5 hold flags, found {0}")]
    InvalidHoldCount(usize),

    #[error("Rolls left must be at most 3, found {0}")]
    TooManyRolls(u8),

    #[error("No hand scores {points} in {category}")]
    ImpossibleScore { category: Category, points: u32 },
}

/// A saved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSnapshot {
    #[serde(deserialize_with = "nullable")]
    pub players: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub current_player: usize,
    /// Empty means "not recorded" and restores unrolled dice
    #[serde(deserialize_with = "nullable")]
    pub dice: Vec<u8>,
    /// Empty means "not recorded" and restores no holds
    #[serde(deserialize_with = "nullable")]
    pub held: Vec<bool>,
    #[serde(deserialize_with = "nullable_rolls")]
    pub rolls_left: u8,
    #[serde(deserialize_with = "nullable")]
    pub started: bool,
    #[serde(deserialize_with = "nullable")]
    pub sheets: Vec<SheetSnapshot>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            current_player: 0,
            dice: Hand::default().values().to_vec(),
            held: vec![false; DICE_COUNT],
            rolls_left: ROLLS_PER_TURN,
            started: false,
            sheets: Vec::new(),
        }
    }
}

/// A saved score sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetSnapshot {
    /// `[category, points]` pairs for locked categories
    #[serde(deserialize_with = "nullable")]
    pub scores: Vec<(Category, u32)>,
    #[serde(deserialize_with = "nullable")]
    pub locked: Vec<Category>,
    #[serde(deserialize_with = "nullable")]
    pub upper_total: u32,
    #[serde(deserialize_with = "nullable")]
    pub lower_total: u32,
    #[serde(deserialize_with = "nullable")]
    pub bonus: u32,
    #[serde(deserialize_with = "nullable")]
    pub grand_total: u32,
}

impl SheetSnapshot {
    fn from_sheet(sheet: &ScoreSheet) -> Self {
        let totals = sheet.totals();
        Self {
            scores: sheet.scores().collect(),
            locked: sheet.locked().collect(),
            upper_total: totals.upper_total,
            lower_total: totals.lower_total,
            bonus: totals.bonus,
            grand_total: totals.grand_total,
        }
    }

    /// Rebuild the sheet. `locked` decides what is locked; a locked category
    /// without a recorded score counts as zero. Points no hand can make are
    /// rejected.
    fn into_sheet(self) -> Result<ScoreSheet, SnapshotError> {
        let recorded: BTreeMap<Category, u32> = self.scores.into_iter().collect();
        let locked: BTreeSet<Category> = self.locked.into_iter().collect();

        let scores = locked
            .into_iter()
            .map(|category| {
                let points = recorded.get(&category).copied().unwrap_or(0);
                if category.is_reachable(points) {
                    Ok((category, points))
                } else {
                    Err(SnapshotError::ImpossibleScore { category, points })
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(ScoreSheet::from_locked(scores))
    }
}

/// `null` reads as the type's default
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_rolls<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u8>::deserialize(deserializer)?.unwrap_or(ROLLS_PER_TURN))
}

impl GameSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as indented JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GameState {
    /// Capture the whole session
    pub fn export_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            current_player: self.turn.current_player as usize,
            dice: self.turn.dice.values().to_vec(),
            held: self.turn.held.flags().to_vec(),
            rolls_left: self.turn.rolls_left,
            started: self.started,
            sheets: self.sheets.iter().map(SheetSnapshot::from_sheet).collect(),
        }
    }

    /// Capture the whole session as indented JSON
    pub fn export_json(&self) -> Result<String, SnapshotError> {
        self.export_snapshot().to_json()
    }

    /// Build a session from a snapshot, validating every field
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        let GameSnapshot {
            players,
            current_player,
            dice,
            held,
            rolls_left,
            started,
            sheets,
        } = snapshot;

        if players.len() > MAX_PLAYERS {
            return Err(SnapshotError::TooManyPlayers(players.len()));
        }
        if started && players.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }

        let sheets: Vec<ScoreSheet> = if sheets.is_empty() {
            vec![ScoreSheet::new(); players.len()]
        } else if sheets.len() != players.len() {
            return Err(SnapshotError::SheetCountMismatch {
                players: players.len(),
                sheets: sheets.len(),
            });
        } else {
            sheets
                .into_iter()
                .map(SheetSnapshot::into_sheet)
                .collect::<Result<_, _>>()?
        };

        let current_player = if players.is_empty() {
            0
        } else if current_player >= players.len() {
            return Err(SnapshotError::CurrentPlayerOutOfRange {
                index: current_player,
                players: players.len(),
            });
        } else {
            current_player as PlayerId
        };

        let dice = if dice.is_empty() {
            Hand::default()
        } else {
            let values: [u8; DICE_COUNT] = dice
                .as_slice()
                .try_into()
                .map_err(|_| SnapshotError::InvalidDiceCount(dice.len()))?;
            Hand::try_from(values)?
        };

        let held = if held.is_empty() {
            HoldMask::default()
        } else {
            let flags: [bool; DICE_COUNT] = held
                .as_slice()
                .try_into()
                .map_err(|_| SnapshotError::InvalidHoldCount(held.len()))?;
            HoldMask::new(flags)
        };

        if rolls_left > ROLLS_PER_TURN {
            return Err(SnapshotError::TooManyRolls(rolls_left));
        }

        Ok(Self {
            players,
            sheets,
            turn: TurnContext {
                current_player,
                dice,
                held,
                rolls_left,
            },
            started,
        })
    }

    /// Replace the session with a saved one.
    ///
    /// On error the session is left exactly as it was.
    pub fn import_snapshot(
        &mut self,
        snapshot: GameSnapshot,
    ) -> Result<Vec<GameEvent>, SnapshotError> {
        let restored = Self::from_snapshot(snapshot)?;
        *self = restored;

        Ok(vec![GameEvent::SnapshotImported {
            players: self.players.clone(),
        }])
    }

    /// Replace the session with a saved one read from JSON text
    pub fn import_json(&mut self, json: &str) -> Result<Vec<GameEvent>, SnapshotError> {
        let snapshot = GameSnapshot::from_json(json)?;
        self.import_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::SequenceRoller;
    use pretty_assertions::assert_eq;

    fn two_player_game() -> GameState {
        let mut game = GameState::with_players(vec!["Ana".into(), "Ben".into()]).unwrap();
        let mut roller = SequenceRoller::new([6, 6, 6, 2, 2]);
        game.roll(&mut roller).unwrap();
        game.apply_category(Category::FullHouse).unwrap();
        game.roll(&mut roller).unwrap();
        game.toggle_hold(1).unwrap();
        game
    }

    #[test]
    fn test_export_shape() {
        let game = two_player_game();
        let value = serde_json::to_value(game.export_snapshot()).unwrap();

        assert_eq!(value["players"], serde_json::json!(["Ana", "Ben"]));
        assert_eq!(value["currentPlayer"], 1);
        assert_eq!(value["dice"], serde_json::json!([6, 6, 6, 2, 2]));
        assert_eq!(value["held"], serde_json::json!([false, true, false, false, false]));
        assert_eq!(value["rollsLeft"], 2);
        assert_eq!(value["started"], true);
        assert_eq!(
            value["sheets"][0],
            serde_json::json!({
                "scores": [["Full House", 25]],
                "locked": ["Full House"],
                "upperTotal": 0,
                "lowerTotal": 25,
                "bonus": 0,
                "grandTotal": 25
            })
        );
    }

    #[test]
    fn test_round_trip_through_json() {
        let game = two_player_game();
        let json = game.export_json().unwrap();

        let mut restored = GameState::new();
        restored.import_json(&json).unwrap();
        assert_eq!(restored, game);
    }

    #[test]
    fn test_missing_fields_use_initial_values() {
        let mut game = GameState::new();
        game.import_json("{}").unwrap();
        assert_eq!(game, GameState::new());

        game.import_json(r#"{"players": ["Solo"], "started": true, "dice": null}"#)
            .unwrap();
        assert_eq!(game.players(), &["Solo"]);
        assert_eq!(game.sheets().len(), 1);
        assert_eq!(game.rolls_left(), 3);
        assert_eq!(game.dice(), Hand::default());
    }

    #[test]
    fn test_stored_totals_are_recomputed() {
        let json = r#"{
            "players": ["Cheater"],
            "started": true,
            "sheets": [{
                "scores": [["Sixes", 30], ["Fives", 25], ["Fours", 8]],
                "locked": ["Sixes", "Fives", "Fours"],
                "upperTotal": 999, "lowerTotal": 999, "bonus": 0, "grandTotal": 5000
            }]
        }"#;
        let mut game = GameState::new();
        game.import_json(json).unwrap();

        let sheet = game.sheet(0).unwrap();
        assert_eq!(sheet.upper_total(), 63);
        assert_eq!(sheet.bonus(), 35);
        assert_eq!(sheet.grand_total(), 98);
    }

    #[test]
    fn test_locked_list_decides_what_is_locked() {
        let json = r#"{
            "players": ["A"],
            "started": true,
            "sheets": [{ "scores": [["Chance", 20]], "locked": ["Yahtzee"] }]
        }"#;
        let game = GameState::from_snapshot(GameSnapshot::from_json(json).unwrap()).unwrap();
        let sheet = game.sheet(0).unwrap();
        assert_eq!(sheet.score(Category::Yahtzee), Some(0));
        assert_eq!(sheet.score(Category::Chance), None);
    }

    #[test]
    fn test_bad_documents_leave_state_untouched() {
        let mut game = two_player_game();
        let before = game.clone();

        let bad = [
            "not json",
            "[1, 2, 3]",
            r#"{"players": ["a", "b", "c", "d", "e"]}"#,
            r#"{"players": [], "started": true}"#,
            r#"{"players": ["a"], "currentPlayer": 3}"#,
            r#"{"players": ["a"], "dice": [1, 2, 3]}"#,
            r#"{"players": ["a"], "dice": [1, 2, 3, 4, 7]}"#,
            r#"{"players": ["a"], "held": [true]}"#,
            r#"{"players": ["a"], "rollsLeft": 4}"#,
            r#"{"players": ["a"], "sheets": [{}, {}]}"#,
            r#"{"players": ["a"], "sheets": [{"locked": ["Two Pairs"]}]}"#,
            r#"{"players": ["a"], "sheets": [{"scores": [["Chance", -4]]}]}"#,
            r#"{"players": ["A"], "started": true, "sheets": [{"scores": [["Sixes", 4294967295], ["Fives", 1]], "locked": ["Sixes", "Fives"]}]}"#,
        ];

        for doc in bad {
            assert!(game.import_json(doc).is_err(), "accepted: {doc}");
            assert_eq!(game, before);
        }
    }

    #[test]
    fn test_unreachable_points_are_rejected() {
        let mut game = two_player_game();
        let before = game.clone();

        let json = r#"{
            "players": ["A"],
            "started": true,
            "sheets": [{
                "scores": [["Ones", 40], ["Yahtzee", 37]],
                "locked": ["Ones", "Yahtzee"]
            }]
        }"#;
        let err = game.import_json(json).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::ImpossibleScore {
                category: Category::Ones,
                points: 40
            }
        ));
        assert_eq!(game, before);

        let yahtzee_only = json.replace(r#"["Ones", 40], "#, "").replace(r#""Ones", "#, "");
        assert!(matches!(
            game.import_json(&yahtzee_only),
            Err(SnapshotError::ImpossibleScore {
                category: Category::Yahtzee,
                points: 37
            })
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn test_import_reports_event() {
        let json = two_player_game().export_json().unwrap();
        let mut game = GameState::new();
        let events = game.import_json(&json).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::SnapshotImported {
                players: vec!["Ana".into(), "Ben".into()]
            }]
        );
    }
}
