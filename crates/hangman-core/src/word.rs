//! Words and their hints.
//!
//! This module contains:
//! - `WordEntry`, an immutable word/hint pair
//! - The built-in seed list
//! - Parsing of host-supplied word lists from JSON

use crate::game::{GameError, InputError};
use serde::{Deserialize, Serialize};

/// A word to guess together with its hint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct WordEntry {
    word: String,
    hint: String,
}

impl WordEntry {
    /// Create a new entry, checking that the word is non-empty and made of ASCII letters
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Result<Self, GameError> {
        let word = word.into();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InputError::InvalidWord(word).into());
        }

        Ok(Self {
            word,
            hint: hint.into(),
        })
    }

    /// The word as written in the list
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The hint shown after the first hint click
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// The word in uppercase, the form used for matching guesses
    pub fn uppercase(&self) -> String {
        self.word.to_ascii_uppercase()
    }

    /// Whether the (uppercase) letter occurs in the word
    pub fn contains(&self, letter: char) -> bool {
        self.word.chars().any(|c| c.eq_ignore_ascii_case(&letter))
    }

    /// The reference seed set
    pub fn seed_list() -> Vec<WordEntry> {
        SEED_WORDS
            .iter()
            .map(|(word, hint)| Self {
                word: (*word).to_string(),
                hint: (*hint).to_string(),
            })
            .collect()
    }

    /// Parse a word list from a JSON array of `{ "word": ..., "hint": ... }` objects.
    ///
    /// Every entry goes through the same validation as [`WordEntry::new`], and an
    /// empty array is rejected since no round could be started from it.
    pub fn list_from_json(json: &str) -> Result<Vec<WordEntry>, GameError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)
            .map_err(|e| InputError::MalformedWordList(e.to_string()))?;

        if raw.is_empty() {
            return Err(InputError::EmptyWordList.into());
        }

        raw.into_iter().map(WordEntry::try_from).collect()
    }
}

/// Unvalidated entry as it appears in JSON
#[derive(Deserialize)]
struct RawEntry {
    word: String,
    hint: String,
}

impl TryFrom<RawEntry> for WordEntry {
    type Error = GameError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        WordEntry::new(raw.word, raw.hint)
    }
}

const SEED_WORDS: [(&str, &str); 2] = [("Strawberry", "Fruit"), ("Cat", "Animal")];
