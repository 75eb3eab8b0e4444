//! Host-side game session.
//!
//! `Game` owns the word list, the random source and the current round. Each
//! action computes the next `RoundState` through the engine and replaces the
//! current one only when the transition succeeds.

use crate::actions::{GameAction, GameEvent};
use crate::game::{GameError, HintEffect, RoundState};
use crate::view::RoundView;
use crate::word::WordEntry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// A running game: the current round plus everything needed to start the next
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    words: Vec<WordEntry>,
    rng: R,
    round: RoundState,
}

impl<R: Rng> Game<R> {
    /// Create a game over `words`, drawing randomness from `rng`
    pub fn new(words: Vec<WordEntry>, mut rng: R) -> Result<Self, GameError> {
        let round = RoundState::start_new_round(&words, &mut rng)?;
        Ok(Self { words, rng, round })
    }

    /// The current round snapshot
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Render snapshot of the current round
    pub fn view(&self) -> RoundView {
        RoundView::from(&self.round)
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// Apply an action to the current round
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::NewGame => self.new_round(),
            GameAction::GuessLetter(letter) => self.guess_letter(letter),
            GameAction::RequestHint => self.request_hint(),
        }
    }

    fn new_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.round = RoundState::start_new_round(&self.words, &mut self.rng)?;
        Ok(vec![GameEvent::RoundStarted {
            word_length: self.round.chosen_word().word().len(),
        }])
    }

    fn guess_letter(&mut self, letter: char) -> Result<Vec<GameEvent>, GameError> {
        let next = self.round.guess_letter(letter)?;
        let mut events = Vec::new();

        if next != self.round {
            let letter = letter.to_ascii_uppercase();
            events.push(GameEvent::LetterGuessed {
                letter,
                correct: next.chosen_word().contains(letter),
                remaining_turns: next.remaining_turns(),
            });
        }

        self.round = next;
        events.extend(self.check_round_finished());
        Ok(events)
    }

    fn request_hint(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let outcome = self.round.apply_hint(&mut self.rng)?;
        let mut events = Vec::new();

        if let Some(notice) = outcome.notice {
            events.push(GameEvent::HintUnavailable {
                notice,
                message: notice.to_string(),
            });
        }

        let remaining_turns = outcome.state.remaining_turns();
        match outcome.effect {
            Some(HintEffect::HintShown) => events.push(GameEvent::HintShown {
                hint: outcome.state.chosen_word().hint().to_string(),
            }),
            Some(HintEffect::LettersEliminated(letters)) => {
                events.push(GameEvent::LettersEliminated {
                    letters,
                    remaining_turns,
                })
            }
            Some(HintEffect::VowelsRevealed) => {
                events.push(GameEvent::VowelsRevealed { remaining_turns })
            }
            Some(HintEffect::NoEffect) | None => {}
        }

        self.round = outcome.state;
        events.extend(self.check_round_finished());
        Ok(events)
    }

    fn check_round_finished(&self) -> Option<GameEvent> {
        if !self.round.is_game_over() {
            return None;
        }

        let status = self.round.status();
        info!(?status, turns_left = self.round.remaining_turns(), "Round finished");
        Some(GameEvent::RoundFinished {
            status,
            word: self.round.chosen_word().word().to_string(),
        })
    }
}

impl Game<StdRng> {
    /// Deterministic game, for replays and tests
    pub fn with_seed(words: Vec<WordEntry>, seed: u64) -> Result<Self, GameError> {
        Self::new(words, StdRng::seed_from_u64(seed))
    }

    /// Game seeded from the OS
    pub fn from_entropy(words: Vec<WordEntry>) -> Result<Self, GameError> {
        Self::new(words, StdRng::from_entropy())
    }

    /// Game over the built-in seed list
    pub fn with_seed_words(seed: u64) -> Result<Self, GameError> {
        Self::with_seed(WordEntry::seed_list(), seed)
    }
}
