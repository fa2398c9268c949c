//! Core game state machine.
//!
//! This module contains the `GameState` session: the players, their score
//! sheets and the turn in progress, along with every transition a player can
//! trigger. Transitions either succeed and report what happened as
//! `GameEvent`s, or fail with a `GameError` and leave the state untouched.

use crate::actions::{GameAction, GameEvent};
use crate::category::{score_for_category, Category};
use crate::dice::{DiceRoller, Hand, HoldMask, DICE_COUNT};
use crate::sheet::ScoreSheet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player index into the session's player list
pub type PlayerId = u8;

/// Most players a session can seat
pub const MAX_PLAYERS: usize = 4;

/// Rolls available at the start of each turn
pub const ROLLS_PER_TURN: u8 = 3;

/// Where the session is, derived from the turn context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game has been started
    NotStarted,

    /// Start of a turn, dice not yet rolled
    AwaitingRoll,

    /// Dice rolled at least once, more rolls available
    Rolling { rolls_left: u8 },

    /// No rolls left, a category must be picked (or the turn ended)
    Exhausted,

    /// Every sheet is full
    Finished,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("No game in progress")]
    NotStarted,

    #[error("Game is over")]
    GameOver,

    #[error("No rolls left this turn")]
    NoRollsLeft,

    #[error("Roll before holding dice")]
    HoldBeforeRoll,

    #[error("No die at position {0}")]
    InvalidDie(usize),

    #[error("{0} is already scored")]
    CategoryLocked(Category),

    #[error("A game needs 1 to 4 players, got {0}")]
    InvalidPlayerCount(usize),
}

/// State of the turn in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    /// Whose turn it is
    pub current_player: PlayerId,
    /// Current dice
    pub dice: Hand,
    /// Dice kept out of the next roll
    pub held: HoldMask,
    /// Rolls remaining this turn (0..=3)
    pub rolls_left: u8,
}

impl TurnContext {
    /// Fresh turn for a player: unrolled dice, nothing held, all rolls available
    pub fn new(player: PlayerId) -> Self {
        Self {
            current_player: player,
            dice: Hand::default(),
            held: HoldMask::default(),
            rolls_left: ROLLS_PER_TURN,
        }
    }

    /// Dice have been rolled at least once this turn
    pub fn has_rolled(&self) -> bool {
        self.rolls_left < ROLLS_PER_TURN
    }
}

impl Default for TurnContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// The complete game session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    /// Player names in seating order
    pub(crate) players: Vec<String>,
    /// One sheet per player, parallel to `players`
    pub(crate) sheets: Vec<ScoreSheet>,
    /// Turn in progress
    pub(crate) turn: TurnContext,
    /// Whether a game has been started
    pub(crate) started: bool,
}

impl GameState {
    /// Create an empty, unstarted session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and immediately start a game
    pub fn with_players(player_names: Vec<String>) -> Result<Self, GameError> {
        let mut game = Self::new();
        game.start(player_names)?;
        Ok(game)
    }

    // ==================== Session Lifecycle ====================

    /// Start a new game, discarding any game in progress.
    ///
    /// Blank names are replaced with "Player N".
    pub fn start(&mut self, player_names: Vec<String>) -> Result<Vec<GameEvent>, GameError> {
        let count = player_names.len();
        if count == 0 || count > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(count));
        }

        let players: Vec<String> = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim();
                if name.is_empty() {
                    default_player_name(i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        self.sheets = vec![ScoreSheet::new(); players.len()];
        self.players = players;
        self.turn = TurnContext::default();
        self.started = true;

        Ok(vec![GameEvent::GameStarted {
            players: self.players.clone(),
        }])
    }

    /// Throw away everything and return to an unstarted session
    pub fn reset(&mut self) -> Vec<GameEvent> {
        *self = Self::default();
        vec![GameEvent::GameReset]
    }

    // ==================== Queries ====================

    /// Whether a game has been started
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Player names in seating order
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Name of a player
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players.get(id as usize).map(String::as_str)
    }

    /// Whose turn it is
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    /// Name of the player whose turn it is (`None` before a game starts)
    pub fn current_player_name(&self) -> Option<&str> {
        if !self.started {
            return None;
        }
        self.player_name(self.turn.current_player)
    }

    /// The turn in progress
    pub fn turn(&self) -> &TurnContext {
        &self.turn
    }

    /// Current dice
    pub fn dice(&self) -> Hand {
        self.turn.dice
    }

    /// Current hold flags
    pub fn held(&self) -> HoldMask {
        self.turn.held
    }

    /// Rolls remaining this turn
    pub fn rolls_left(&self) -> u8 {
        self.turn.rolls_left
    }

    /// A player's score sheet
    pub fn sheet(&self, id: PlayerId) -> Option<&ScoreSheet> {
        self.sheets.get(id as usize)
    }

    /// All score sheets in seating order
    pub fn sheets(&self) -> &[ScoreSheet] {
        &self.sheets
    }

    /// Where the session currently is
    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::NotStarted
        } else if self.is_game_over() {
            GamePhase::Finished
        } else {
            match self.turn.rolls_left {
                ROLLS_PER_TURN => GamePhase::AwaitingRoll,
                0 => GamePhase::Exhausted,
                rolls_left => GamePhase::Rolling { rolls_left },
            }
        }
    }

    /// Every player has filled their whole sheet
    pub fn is_game_over(&self) -> bool {
        !self.sheets.is_empty() && self.sheets.iter().all(ScoreSheet::is_complete)
    }

    /// Highest grand total on the table
    pub fn winning_score(&self) -> Option<u32> {
        self.sheets.iter().map(ScoreSheet::grand_total).max()
    }

    /// Every player holding the highest grand total. Ties produce several winners.
    pub fn winners(&self) -> Vec<String> {
        let Some(best) = self.winning_score() else {
            return Vec::new();
        };

        self.players
            .iter()
            .zip(&self.sheets)
            .filter(|(_, sheet)| sheet.grand_total() == best)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// What the current hand would score in a category
    pub fn preview_score(&self, category: Category) -> u32 {
        score_for_category(category, &self.turn.dice)
    }

    // ==================== Eligibility ====================

    /// The roll button should be enabled
    pub fn can_roll(&self) -> bool {
        self.check_turn_active().is_ok() && self.turn.rolls_left > 0
    }

    /// Dice can be held or released
    pub fn can_hold(&self) -> bool {
        self.check_turn_active().is_ok() && self.turn.has_rolled()
    }

    /// The current player may lock this category
    pub fn can_score(&self, category: Category) -> bool {
        self.check_turn_active().is_ok()
            && self
                .current_sheet()
                .is_some_and(|sheet| !sheet.is_locked(category))
    }

    /// The turn can be passed on
    pub fn can_end_turn(&self) -> bool {
        self.check_turn_active().is_ok()
    }

    /// Get all currently valid actions
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if self.check_turn_active().is_err() {
            return actions;
        }

        if self.can_roll() {
            actions.push(GameAction::Roll);
        }

        if self.can_hold() {
            for i in 0..DICE_COUNT {
                actions.push(GameAction::ToggleHold(i));
            }
        }

        if let Some(sheet) = self.current_sheet() {
            for category in sheet.open_categories() {
                actions.push(GameAction::Score(category));
            }
        }

        actions.push(GameAction::EndTurn);

        actions
    }

    // ==================== Transitions ====================

    /// Apply an action to the game state
    pub fn apply_action<D: DiceRoller + ?Sized>(
        &mut self,
        action: GameAction,
        roller: &mut D,
    ) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::Roll => self.roll(roller),
            GameAction::ToggleHold(index) => self.toggle_hold(index),
            GameAction::Score(category) => self.apply_category(category),
            GameAction::EndTurn => self.end_turn(),
        }
    }

    /// Roll every unheld die, using one draw from `roller` per die
    pub fn roll<D: DiceRoller + ?Sized>(
        &mut self,
        roller: &mut D,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.check_turn_active()?;
        if self.turn.rolls_left == 0 {
            return Err(GameError::NoRollsLeft);
        }

        let held = self.turn.held;
        self.turn.dice.roll(&held, roller);
        self.turn.rolls_left -= 1;

        Ok(vec![GameEvent::DiceRolled {
            player: self.turn.current_player,
            dice: self.turn.dice.values(),
            rolls_left: self.turn.rolls_left,
        }])
    }

    /// Hold or release a die. Only allowed once the dice have been rolled.
    pub fn toggle_hold(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        self.check_turn_active()?;
        if !self.turn.has_rolled() {
            return Err(GameError::HoldBeforeRoll);
        }

        let held = self
            .turn
            .held
            .toggle(index)
            .ok_or(GameError::InvalidDie(index))?;

        Ok(vec![GameEvent::HoldToggled { index, held }])
    }

    /// Lock the current hand into a category for the current player.
    ///
    /// Afterwards the game either ends or passes to the next player.
    pub fn apply_category(&mut self, category: Category) -> Result<Vec<GameEvent>, GameError> {
        self.check_turn_active()?;

        let player = self.turn.current_player;
        let points = score_for_category(category, &self.turn.dice);
        let sheet = self
            .sheets
            .get_mut(player as usize)
            .ok_or(GameError::NotStarted)?;
        if !sheet.lock(category, points) {
            return Err(GameError::CategoryLocked(category));
        }

        let mut events = vec![GameEvent::CategoryScored {
            player,
            category,
            points,
        }];

        if self.is_game_over() {
            events.push(GameEvent::GameOver {
                winners: self.winners(),
                score: self.winning_score().unwrap_or(0),
            });
        } else {
            events.push(self.advance_turn());
        }

        Ok(events)
    }

    /// Pass to the next player without scoring this turn
    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.check_turn_active()?;
        Ok(vec![self.advance_turn()])
    }

    // ==================== Helper Methods ====================

    fn current_sheet(&self) -> Option<&ScoreSheet> {
        self.sheets.get(self.turn.current_player as usize)
    }

    /// A turn can only be played in a started, unfinished game
    fn check_turn_active(&self) -> Result<(), GameError> {
        if !self.started || self.players.is_empty() {
            return Err(GameError::NotStarted);
        }
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// Round-robin to the next seat with a fresh turn
    fn advance_turn(&mut self) -> GameEvent {
        let player = self.turn.current_player;
        let next_player = ((player as usize + 1) % self.player_count()) as PlayerId;
        self.turn = TurnContext::new(next_player);

        GameEvent::TurnEnded {
            player,
            next_player,
        }
    }
}

/// Name given to a seat left blank
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}
