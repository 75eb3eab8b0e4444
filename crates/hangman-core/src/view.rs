//! Render snapshot of a round.
//!
//! Everything a UI needs to draw one frame, without exposing the answer while
//! the round is still being played.

use crate::game::{RoundState, RoundStatus, MAX_TURNS};
use serde::{Deserialize, Serialize};

/// JSON-friendly view of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// Letters and placeholders, e.g. "C _ T"
    pub revealed_word: String,
    pub word_length: usize,
    pub remaining_turns: u8,
    pub max_turns: u8,
    pub hint_clicks_used: u32,
    /// Hint text, present once a hint has been requested
    pub hint: Option<String>,
    /// Hangman drawing to show (1-7)
    pub gallows_stage: u8,
    /// Letters whose buttons stay enabled
    pub available_letters: Vec<char>,
    pub guessed_letters: Vec<char>,
    pub status: RoundStatus,
    pub end_message: Option<String>,
    /// The word, only once the round is over
    pub answer: Option<String>,
}

impl From<&RoundState> for RoundView {
    fn from(round: &RoundState) -> Self {
        let status = round.status();
        Self {
            revealed_word: round.revealed_word(),
            word_length: round.chosen_word().word().len(),
            remaining_turns: round.remaining_turns(),
            max_turns: MAX_TURNS,
            hint_clicks_used: round.hint_clicks_used(),
            hint: round.hint_text().map(str::to_string),
            gallows_stage: round.gallows_stage(),
            available_letters: round.available_letters(),
            guessed_letters: round.guessed_letters().iter().copied().collect(),
            status,
            end_message: round.end_message(),
            answer: (status != RoundStatus::Active).then(|| round.chosen_word().word().to_string()),
        }
    }
}
