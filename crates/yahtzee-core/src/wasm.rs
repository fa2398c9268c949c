//! WebAssembly bindings for the Yahtzee engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.
//! In-game intents that are not allowed right now return `false` and change
//! nothing; only a failed import throws.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::category::Category;
#[cfg(feature = "wasm")]
use crate::dice::RandomRoller;
#[cfg(feature = "wasm")]
use crate::game::{GameError, GameState};
#[cfg(feature = "wasm")]
use rand::rngs::ThreadRng;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    roller: RandomRoller<ThreadRng>,
}

#[cfg(feature = "wasm")]
impl WasmGame {
    fn accepted<T>(result: Result<T, GameError>) -> bool {
        result.is_ok()
    }
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create an empty, unstarted session
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            state: GameState::new(),
            roller: RandomRoller::thread(),
        }
    }

    /// Start a game from a JSON array of 1-4 names
    pub fn start(&mut self, player_names_json: &str) -> Result<(), JsValue> {
        let player_names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;

        self.state
            .start(player_names)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Discard the session
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Roll the unheld dice
    pub fn roll(&mut self) -> bool {
        Self::accepted(self.state.roll(&mut self.roller))
    }

    /// Hold or release a die
    #[wasm_bindgen(js_name = toggleHold)]
    pub fn toggle_hold(&mut self, index: usize) -> bool {
        Self::accepted(self.state.toggle_hold(index))
    }

    /// Score the current hand in a category, by table label
    #[wasm_bindgen(js_name = scoreCategory)]
    pub fn score_category(&mut self, category: &str) -> bool {
        match category.parse::<Category>() {
            Ok(cat) => Self::accepted(self.state.apply_category(cat)),
            Err(_) => false,
        }
    }

    /// Pass the turn without scoring
    #[wasm_bindgen(js_name = endTurn)]
    pub fn end_turn(&mut self) -> bool {
        Self::accepted(self.state.end_turn())
    }

    /// Save document as JSON
    #[wasm_bindgen(js_name = exportState)]
    pub fn export_state(&self) -> String {
        self.state
            .export_json()
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Replace the session with a save document. Throws and changes nothing on bad input.
    #[wasm_bindgen(js_name = importState)]
    pub fn import_state(&mut self, json: &str) -> Result<(), JsValue> {
        self.state
            .import_json(json)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Score table as JSON
    #[wasm_bindgen(js_name = getScoreboard)]
    pub fn get_scoreboard(&self) -> String {
        serde_json::to_string(&self.state.scoreboard()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Current dice values
    #[wasm_bindgen(js_name = getDice)]
    pub fn get_dice(&self) -> Vec<u8> {
        self.state.dice().values().to_vec()
    }

    /// Hold flags, one per die
    #[wasm_bindgen(js_name = getHeld)]
    pub fn get_held(&self) -> Vec<u8> {
        self.state
            .held()
            .flags()
            .iter()
            .map(|&h| u8::from(h))
            .collect()
    }

    /// Rolls remaining this turn
    #[wasm_bindgen(js_name = getRollsLeft)]
    pub fn get_rolls_left(&self) -> u8 {
        self.state.rolls_left()
    }

    /// Name of the player to move, if a game is running
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> Option<String> {
        self.state.current_player_name().map(str::to_string)
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Winner names as a JSON array
    #[wasm_bindgen(js_name = getWinners)]
    pub fn get_winners(&self) -> String {
        serde_json::to_string(&self.state.winners()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Currently allowed actions as a JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.state.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
