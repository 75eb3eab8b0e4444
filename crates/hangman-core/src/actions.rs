//! Player actions and the events they produce.
//!
//! A UI shell turns button presses into `GameAction`s and renders the
//! `GameEvent`s that come back.

use crate::game::{HintNotice, RoundStatus};
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Throw away the current round and start another
    NewGame,
    /// Pick a letter from the keyboard
    GuessLetter(char),
    /// Press the hint button
    RequestHint,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new round started
    RoundStarted { word_length: usize },

    /// A letter was guessed for the first time
    LetterGuessed {
        letter: char,
        correct: bool,
        remaining_turns: u8,
    },

    /// First hint: the hint text is now visible
    HintShown { hint: String },

    /// Second hint: wrong letters were disabled
    LettersEliminated {
        letters: Vec<char>,
        remaining_turns: u8,
    },

    /// Third hint: all vowels were revealed
    VowelsRevealed { remaining_turns: u8 },

    /// Hint request refused
    HintUnavailable { notice: HintNotice, message: String },

    /// The round ended
    RoundFinished { status: RoundStatus, word: String },
}
