//! Game logic for the iterated Prisoner's Dilemma demo
//!
//! Simulates 2–4 players under four fixed strategies, scoring every
//! pairing each round. This crate is compiled to:
//! - Native (for the `dilemma` CLI)
//! - WASM (for a browser front end, feature `wasm`)

mod config;
mod error;
mod game;
mod pairing;
mod stats;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{GameConfig, Lineup, PlayerEntry, PlayerId, DEFAULT_ROUNDS};
pub use error::{DilemmaError, Result};
pub use game::{run_game, simulate, simulate_seeded, RoundRecord, ScoreTable, SimulationResult};
pub use pairing::{all_pairs, pair_count};
pub use rand_chacha::ChaCha8Rng;
pub use stats::{analyze, cooperation_rate, Analysis, GameReport};
pub use strategy::{Choice, Strategy, TitForTatRule};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Choice, b: Choice) -> (u8, u8) {
    match (a, b) {
        (Choice::Cooperate, Choice::Cooperate) => (3, 3),
        (Choice::Cooperate, Choice::Defect) => (0, 5),
        (Choice::Defect, Choice::Cooperate) => (5, 0),
        (Choice::Defect, Choice::Defect) => (1, 1),
    }
}
