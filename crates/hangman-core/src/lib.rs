//! Hangman - a word-guessing game engine
//!
//! This crate provides the game logic behind a Hangman screen:
//! - Words with hints and the built-in seed list
//! - Round state with letter guesses, turn counting and a three-stage hint
//! - A session type that owns the current round for a UI shell
//! - A serializable render view of a round
//!
//! # Architecture
//!
//! The engine is pure: every transition takes a `RoundState` snapshot and
//! returns the next one. Randomness (word choice, letter elimination) comes
//! from a caller-supplied `rand::Rng`, so seeded generators give repeatable
//! rounds. The crate can be compiled to:
//! - Native Rust for hosts and tests
//! - WebAssembly for a browser UI (feature `wasm`)
//!
//! # Modules
//!
//! - [`word`]: Word/hint entries and word lists
//! - [`game`]: Round state machine
//! - [`actions`]: UI actions and resulting events
//! - [`session`]: Host-side owner of the current round
//! - [`view`]: Render snapshot

pub mod actions;
pub mod game;
pub mod session;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod word;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use game::{
    GameError, HintEffect, HintNotice, HintOutcome, InputError, RoundState, RoundStatus,
    MAX_TURNS, PLACEHOLDER, VOWELS,
};
pub use session::Game;
pub use view::RoundView;
pub use word::WordEntry;
