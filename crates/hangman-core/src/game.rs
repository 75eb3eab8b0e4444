//! Round state machine.
//!
//! This module contains the `RoundState` snapshot and every transition on it.
//! Transitions never mutate a snapshot in place: each one returns the next
//! snapshot, so a host can swap its current state wholesale.

use crate::word::WordEntry;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Wrong guesses allowed per round
pub const MAX_TURNS: u8 = 6;

/// Letters revealed by the third hint
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Shown in place of letters not yet guessed
pub const PLACEHOLDER: char = '_';

/// Input the engine refuses to act on
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InputError {
    #[error("word list is empty")]
    EmptyWordList,

    #[error("'{0}' is not a letter")]
    NotALetter(char),

    #[error("word must be non-empty and contain only letters: {0:?}")]
    InvalidWord(String),

    #[error("malformed word list: {0}")]
    MalformedWordList(String),

    #[error("invalid round state: {0}")]
    InvalidRound(String),
}

/// Errors that can occur when applying a transition
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Round is over")]
    RoundOver,
}

/// Non-fatal notice for the UI to surface briefly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintNotice {
    /// Not enough turns left to pay for a hint
    HintUnavailable,
}

impl fmt::Display for HintNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintNotice::HintUnavailable => write!(f, "No remaining turns! Hint not available"),
        }
    }
}

/// What an accepted hint click did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintEffect {
    /// First click: the hint text becomes visible
    HintShown,
    /// Second click: these wrong letters were marked as guessed
    LettersEliminated(Vec<char>),
    /// Third click: all vowels were marked as guessed
    VowelsRevealed,
    /// Any later click
    NoEffect,
}

/// Result of a hint request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintOutcome {
    /// The next snapshot (identical to the previous one when rejected)
    pub state: RoundState,
    /// What the hint did, `None` when rejected
    pub effect: Option<HintEffect>,
    /// Set when the hint was rejected
    pub notice: Option<HintNotice>,
}

/// Where a round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

/// A snapshot of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRound")]
pub struct RoundState {
    chosen_word: WordEntry,
    guessed_letters: BTreeSet<char>,
    hint_clicks_used: u32,
    remaining_turns: u8,
}

/// Unvalidated round as it appears in JSON
#[derive(Deserialize)]
struct RawRound {
    chosen_word: WordEntry,
    guessed_letters: BTreeSet<char>,
    hint_clicks_used: u32,
    remaining_turns: u8,
}

impl TryFrom<RawRound> for RoundState {
    type Error = GameError;

    fn try_from(raw: RawRound) -> Result<Self, Self::Error> {
        if raw.remaining_turns > MAX_TURNS {
            return Err(InputError::InvalidRound(format!(
                "remaining_turns {} exceeds {}",
                raw.remaining_turns, MAX_TURNS
            ))
            .into());
        }
        if let Some(bad) = raw
            .guessed_letters
            .iter()
            .find(|c| !c.is_ascii_uppercase())
        {
            return Err(InputError::InvalidRound(format!("guessed letter {bad:?}")).into());
        }

        Ok(Self {
            chosen_word: raw.chosen_word,
            guessed_letters: raw.guessed_letters,
            hint_clicks_used: raw.hint_clicks_used,
            remaining_turns: raw.remaining_turns,
        })
    }
}

impl RoundState {
    /// Fresh round for the given word
    pub fn new(chosen_word: WordEntry) -> Self {
        Self {
            chosen_word,
            guessed_letters: BTreeSet::new(),
            hint_clicks_used: 0,
            remaining_turns: MAX_TURNS,
        }
    }

    /// Fresh round for a word picked uniformly from `words`
    pub fn start_new_round<R: Rng + ?Sized>(
        words: &[WordEntry],
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let entry = words.choose(rng).ok_or(InputError::EmptyWordList)?;
        debug!(length = entry.word().len(), "Starting new round");
        Ok(Self::new(entry.clone()))
    }

    pub fn chosen_word(&self) -> &WordEntry {
        &self.chosen_word
    }

    /// Uppercase letters guessed so far, including ones eliminated or revealed by hints
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn hint_clicks_used(&self) -> u32 {
        self.hint_clicks_used
    }

    pub fn remaining_turns(&self) -> u8 {
        self.remaining_turns
    }

    /// Guess a letter (case-insensitive).
    ///
    /// A letter already guessed leaves the state as it is. A letter not in the
    /// word costs one turn.
    pub fn guess_letter(&self, letter: char) -> Result<RoundState, GameError> {
        if !letter.is_ascii_alphabetic() {
            return Err(InputError::NotALetter(letter).into());
        }
        if self.is_game_over() {
            return Err(GameError::RoundOver);
        }

        let letter = letter.to_ascii_uppercase();
        if self.guessed_letters.contains(&letter) {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.guessed_letters.insert(letter);

        let correct = self.chosen_word.contains(letter);
        if !correct {
            next.remaining_turns = next.remaining_turns.saturating_sub(1);
        }

        debug!(
            %letter,
            correct,
            remaining_turns = next.remaining_turns,
            "Letter guessed"
        );
        Ok(next)
    }

    /// Request the next hint.
    ///
    /// 1st click shows the hint text, 2nd eliminates half of the unguessed wrong
    /// letters, 3rd reveals the vowels. The 2nd and 3rd cost a turn. Any click
    /// after the first is refused while one turn or fewer remains.
    pub fn apply_hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<HintOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::RoundOver);
        }

        let click = self.hint_clicks_used.saturating_add(1);
        if self.remaining_turns <= 1 && click > 1 {
            warn!(
                click,
                remaining_turns = self.remaining_turns,
                "Hint refused, not enough turns"
            );
            return Ok(HintOutcome {
                state: self.clone(),
                effect: None,
                notice: Some(HintNotice::HintUnavailable),
            });
        }

        let mut next = self.clone();
        next.hint_clicks_used = click;

        let effect = match click {
            1 => HintEffect::HintShown,
            2 => {
                let wrong_letters = self.unguessed_wrong_letters();
                let mut eliminated: Vec<char> = wrong_letters
                    .choose_multiple(rng, wrong_letters.len() / 2)
                    .copied()
                    .collect();
                eliminated.sort_unstable();

                next.guessed_letters.extend(eliminated.iter().copied());
                next.remaining_turns = next.remaining_turns.saturating_sub(1);
                HintEffect::LettersEliminated(eliminated)
            }
            3 => {
                next.guessed_letters.extend(VOWELS);
                next.remaining_turns = next.remaining_turns.saturating_sub(1);
                HintEffect::VowelsRevealed
            }
            _ => HintEffect::NoEffect,
        };

        debug!(
            click,
            ?effect,
            remaining_turns = next.remaining_turns,
            "Hint applied"
        );
        Ok(HintOutcome {
            state: next,
            effect: Some(effect),
            notice: None,
        })
    }

    /// Letters A-Z that are neither in the word nor guessed yet
    fn unguessed_wrong_letters(&self) -> Vec<char> {
        ('A'..='Z')
            .filter(|c| !self.chosen_word.contains(*c) && !self.guessed_letters.contains(c))
            .collect()
    }

    /// The word with unguessed letters replaced by `_`, separated by spaces ("C _ T")
    pub fn revealed_word(&self) -> String {
        let cells: Vec<String> = self
            .chosen_word
            .uppercase()
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c.to_string()
                } else {
                    PLACEHOLDER.to_string()
                }
            })
            .collect();
        cells.join(" ")
    }

    /// Every distinct letter of the word has been guessed
    pub fn has_won(&self) -> bool {
        self.chosen_word
            .uppercase()
            .chars()
            .all(|c| self.guessed_letters.contains(&c))
    }

    pub fn is_game_over(&self) -> bool {
        self.remaining_turns == 0 || self.has_won()
    }

    pub fn status(&self) -> RoundStatus {
        if self.has_won() {
            RoundStatus::Won
        } else if self.remaining_turns == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::Active
        }
    }

    /// The hint text, once the hint has been requested at least once
    pub fn hint_text(&self) -> Option<&str> {
        (self.hint_clicks_used >= 1).then(|| self.chosen_word.hint())
    }

    /// Whether the letter's button should still be enabled
    pub fn is_letter_available(&self, letter: char) -> bool {
        letter.is_ascii_alphabetic()
            && !self
                .guessed_letters
                .contains(&letter.to_ascii_uppercase())
    }

    /// Letters A-Z not yet guessed, in alphabetical order
    pub fn available_letters(&self) -> Vec<char> {
        ('A'..='Z')
            .filter(|c| !self.guessed_letters.contains(c))
            .collect()
    }

    /// Hangman drawing stage: 1 with all turns left, 7 with none
    pub fn gallows_stage(&self) -> u8 {
        MAX_TURNS - self.remaining_turns.min(MAX_TURNS) + 1
    }

    /// Message shown once the round is over
    pub fn end_message(&self) -> Option<String> {
        match self.status() {
            RoundStatus::Active => None,
            RoundStatus::Won => Some("You Won".to_string()),
            RoundStatus::Lost => Some(format!(
                "Game Over! The word was: {}",
                self.chosen_word.word()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cat_round() -> RoundState {
        RoundState::new(WordEntry::new("Cat", "Animal").unwrap())
    }

    fn guess_all(state: RoundState, letters: &str) -> RoundState {
        letters
            .chars()
            .fold(state, |s, c| s.guess_letter(c).unwrap())
    }

    #[test]
    fn test_new_round() {
        let round = cat_round();
        assert_eq!(round.remaining_turns(), MAX_TURNS);
        assert_eq!(round.hint_clicks_used(), 0);
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.status(), RoundStatus::Active);
        assert_eq!(round.revealed_word(), "_ _ _");
    }

    #[test]
    fn test_start_new_round_picks_from_list() {
        let words = WordEntry::seed_list();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let round = RoundState::start_new_round(&words, &mut rng).unwrap();
            assert!(words.contains(round.chosen_word()));
            assert_eq!(round.remaining_turns(), MAX_TURNS);
        }
    }

    #[test]
    fn test_start_new_round_is_deterministic_for_seed() {
        let words = WordEntry::seed_list();
        let a = RoundState::start_new_round(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = RoundState::start_new_round(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_new_round_empty_list() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            RoundState::start_new_round(&[], &mut rng),
            Err(GameError::InvalidInput(InputError::EmptyWordList))
        );
    }

    #[test]
    fn test_winning_cat() {
        let round = cat_round();

        let round = round.guess_letter('C').unwrap();
        assert_eq!(round.remaining_turns(), 6);

        let round = round.guess_letter('X').unwrap();
        assert_eq!(round.remaining_turns(), 5);

        let round = round.guess_letter('A').unwrap();
        assert_eq!(round.remaining_turns(), 5);
        assert!(!round.has_won());

        let round = round.guess_letter('T').unwrap();
        assert_eq!(round.remaining_turns(), 5);
        assert!(round.has_won());
        assert!(round.is_game_over());
        assert_eq!(round.revealed_word(), "C A T");
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.end_message().as_deref(), Some("You Won"));
    }

    #[test]
    fn test_losing_cat() {
        let round = guess_all(cat_round(), "BDEFGH");
        assert_eq!(round.remaining_turns(), 0);
        assert!(round.is_game_over());
        assert!(!round.has_won());
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(
            round.end_message().as_deref(),
            Some("Game Over! The word was: Cat")
        );
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let round = cat_round().guess_letter('c').unwrap();
        assert!(round.guessed_letters().contains(&'C'));
        assert_eq!(round.remaining_turns(), MAX_TURNS);
        assert_eq!(round.revealed_word(), "C _ _");
    }

    #[test]
    fn test_repeated_guess_is_noop() {
        let once = cat_round().guess_letter('Z').unwrap();
        let twice = once.guess_letter('z').unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.remaining_turns(), 5);
    }

    #[test]
    fn test_guess_rejects_non_letters() {
        let round = cat_round();
        for bad in ['1', ' ', '_', 'é'] {
            assert_eq!(
                round.guess_letter(bad),
                Err(GameError::InvalidInput(InputError::NotALetter(bad)))
            );
        }
    }

    #[test]
    fn test_guess_after_round_over() {
        let won = guess_all(cat_round(), "CAT");
        assert_eq!(won.guess_letter('Q'), Err(GameError::RoundOver));

        let lost = guess_all(cat_round(), "BDEFGH");
        assert_eq!(lost.guess_letter('C'), Err(GameError::RoundOver));
    }

    #[test]
    fn test_repeated_letters_in_word() {
        let round = RoundState::new(WordEntry::new("Strawberry", "Fruit").unwrap());
        let round = guess_all(round, "R");
        assert_eq!(round.revealed_word(), "_ _ R _ _ _ _ R R _");

        let round = guess_all(round, "STAWBEY");
        assert!(round.has_won());
        assert_eq!(round.revealed_word(), "S T R A W B E R R Y");
        assert_eq!(round.remaining_turns(), MAX_TURNS);
    }

    #[test]
    fn test_hint_progression() {
        let mut rng = StdRng::seed_from_u64(3);

        let first = cat_round().apply_hint(&mut rng).unwrap();
        assert_eq!(first.effect, Some(HintEffect::HintShown));
        assert_eq!(first.notice, None);
        assert_eq!(first.state.hint_clicks_used(), 1);
        assert_eq!(first.state.remaining_turns(), 6);
        assert!(first.state.guessed_letters().is_empty());
        assert_eq!(first.state.hint_text(), Some("Animal"));

        let round = first.state.guess_letter('X').unwrap();
        assert_eq!(round.remaining_turns(), 5);

        let second = round.apply_hint(&mut rng).unwrap();
        assert_eq!(second.state.hint_clicks_used(), 2);
        assert_eq!(second.state.remaining_turns(), 4);
        let eliminated = match &second.effect {
            Some(HintEffect::LettersEliminated(letters)) => letters.clone(),
            other => panic!("unexpected effect {other:?}"),
        };
        // 26 - {C, A, T} - {X} = 22 eligible letters
        assert_eq!(eliminated.len(), 11);
        for letter in &eliminated {
            assert!(!"CATX".contains(*letter));
            assert!(second.state.guessed_letters().contains(letter));
        }
        assert_eq!(second.state.guessed_letters().len(), 12);

        let third = second.state.apply_hint(&mut rng).unwrap();
        assert_eq!(third.effect, Some(HintEffect::VowelsRevealed));
        assert_eq!(third.state.hint_clicks_used(), 3);
        assert_eq!(third.state.remaining_turns(), 3);
        for vowel in VOWELS {
            assert!(third.state.guessed_letters().contains(&vowel));
        }
        assert_eq!(third.state.revealed_word(), "_ A _");
    }

    #[test]
    fn test_elimination_rounds_down_odd_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        // 26 - {C, A, T} = 23 eligible letters
        let round = cat_round().apply_hint(&mut rng).unwrap().state;
        let outcome = round.apply_hint(&mut rng).unwrap();
        match outcome.effect {
            Some(HintEffect::LettersEliminated(letters)) => assert_eq!(letters.len(), 11),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(outcome.state.available_letters().len(), 26 - 11);
    }

    #[test]
    fn test_hints_beyond_third_are_free() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut round = cat_round();
        for _ in 0..3 {
            round = round.apply_hint(&mut rng).unwrap().state;
        }
        assert_eq!(round.remaining_turns(), 4);

        let fourth = round.apply_hint(&mut rng).unwrap();
        assert_eq!(fourth.effect, Some(HintEffect::NoEffect));
        assert_eq!(fourth.state.hint_clicks_used(), 4);
        assert_eq!(fourth.state.remaining_turns(), 4);
        assert_eq!(fourth.state.guessed_letters(), round.guessed_letters());
    }

    #[test]
    fn test_hint_unavailable_with_one_turn_left() {
        let mut rng = StdRng::seed_from_u64(9);
        let round = cat_round().apply_hint(&mut rng).unwrap().state;
        let round = guess_all(round, "BDEFG");
        assert_eq!(round.remaining_turns(), 1);

        let outcome = round.apply_hint(&mut rng).unwrap();
        assert_eq!(outcome.notice, Some(HintNotice::HintUnavailable));
        assert_eq!(outcome.effect, None);
        assert_eq!(outcome.state, round);
        assert_eq!(outcome.state.hint_clicks_used(), 1);
        assert_eq!(
            HintNotice::HintUnavailable.to_string(),
            "No remaining turns! Hint not available"
        );
    }

    #[test]
    fn test_first_hint_allowed_with_one_turn_left() {
        let mut rng = StdRng::seed_from_u64(9);
        let round = guess_all(cat_round(), "BDEFG");
        let outcome = round.apply_hint(&mut rng).unwrap();
        assert_eq!(outcome.notice, None);
        assert_eq!(outcome.state.hint_clicks_used(), 1);
        assert_eq!(outcome.state.remaining_turns(), 1);
    }

    #[test]
    fn test_vowel_hint_can_win() {
        let mut rng = StdRng::seed_from_u64(2);
        let round = RoundState::new(WordEntry::new("Aeiou", "Vowels").unwrap());
        let round = round.apply_hint(&mut rng).unwrap().state;
        let round = round.apply_hint(&mut rng).unwrap().state;
        let round = round.apply_hint(&mut rng).unwrap().state;
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.apply_hint(&mut rng), Err(GameError::RoundOver));
    }

    #[test]
    fn test_letter_availability() {
        let round = cat_round().guess_letter('q').unwrap();
        assert!(!round.is_letter_available('Q'));
        assert!(!round.is_letter_available('q'));
        assert!(round.is_letter_available('C'));
        assert!(!round.is_letter_available('3'));
        assert_eq!(round.available_letters().len(), 25);
    }

    #[test]
    fn test_gallows_stage() {
        let round = cat_round();
        assert_eq!(round.gallows_stage(), 1);
        let round = guess_all(round, "BDE");
        assert_eq!(round.gallows_stage(), 4);
        let round = guess_all(round, "FGH");
        assert_eq!(round.gallows_stage(), 7);
    }

    #[test]
    fn test_hint_text_hidden_before_first_click() {
        assert_eq!(cat_round().hint_text(), None);
    }

    #[test]
    fn test_round_state_deserialize_validates() {
        let too_many_turns = r#"{"chosen_word":{"word":"Cat","hint":"Animal"},"guessed_letters":[],"hint_clicks_used":0,"remaining_turns":200}"#;
        assert!(serde_json::from_str::<RoundState>(too_many_turns).is_err());

        let bad_letters = r#"{"chosen_word":{"word":"Cat","hint":"Animal"},"guessed_letters":["c","a","t","1"],"hint_clicks_used":0,"remaining_turns":6}"#;
        assert!(serde_json::from_str::<RoundState>(bad_letters).is_err());

        let raw = RawRound {
            chosen_word: WordEntry::new("Cat", "Animal").unwrap(),
            guessed_letters: BTreeSet::from(['C', 'x']),
            hint_clicks_used: 0,
            remaining_turns: 6,
        };
        assert!(matches!(
            RoundState::try_from(raw),
            Err(GameError::InvalidInput(InputError::InvalidRound(_)))
        ));

        let good = r#"{"chosen_word":{"word":"Cat","hint":"Animal"},"guessed_letters":["C","Z"],"hint_clicks_used":1,"remaining_turns":5}"#;
        let round: RoundState = serde_json::from_str(good).unwrap();
        assert_eq!(round.remaining_turns(), 5);
        assert_eq!(round.revealed_word(), "C _ _");
    }

    #[test]
    fn test_round_state_serializes() {
        let round = guess_all(cat_round(), "CZ");
        let json = serde_json::to_string(&round).unwrap();
        let back: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, round);
    }
}
