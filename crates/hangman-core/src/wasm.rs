//! WebAssembly bindings for the Hangman engine.
//!
//! This module exposes a game session to JavaScript through wasm-bindgen.
//! Views and events cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::session::Game;
use crate::word::WordEntry;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game over a JSON word list, or the built-in list when none is given
    #[wasm_bindgen(constructor)]
    pub fn new(words_json: Option<String>) -> Result<WasmGame, JsValue> {
        let words = match words_json {
            Some(json) => WordEntry::list_from_json(&json).map_err(to_js_error)?,
            None => WordEntry::seed_list(),
        };

        let game = Game::from_entropy(words).map_err(to_js_error)?;
        Ok(WasmGame { game })
    }

    /// Start another round
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::NewGame)
    }

    /// Guess a letter, returns events JSON or error
    #[wasm_bindgen(js_name = guessLetter)]
    pub fn guess_letter(&mut self, letter: char) -> Result<String, JsValue> {
        self.apply(GameAction::GuessLetter(letter))
    }

    /// Press the hint button, returns events JSON or error
    #[wasm_bindgen(js_name = requestHint)]
    pub fn request_hint(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::RequestHint)
    }

    /// Get the render view of the current round as JSON
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> String {
        serde_json::to_string(&self.game.view()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check if the current round is over
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.round().is_game_over()
    }

    /// Check if the current round was won
    #[wasm_bindgen(js_name = hasWon)]
    pub fn has_won(&self) -> bool {
        self.game.round().has_won()
    }

    /// Get the revealed word, e.g. "C _ T"
    #[wasm_bindgen(js_name = getRevealedWord)]
    pub fn get_revealed_word(&self) -> String {
        self.game.round().revealed_word()
    }

    /// Get the number of wrong guesses left
    #[wasm_bindgen(js_name = getRemainingTurns)]
    pub fn get_remaining_turns(&self) -> u8 {
        self.game.round().remaining_turns()
    }

    fn apply(&mut self, action: GameAction) -> Result<String, JsValue> {
        match self.game.apply_action(action) {
            Ok(events) => {
                Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
            }
            Err(e) => Err(to_js_error(e)),
        }
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("Action failed: {}", e))
}
