//! Post-game analysis: winners and cooperation rates

use serde::{Deserialize, Serialize};

use crate::config::{seed_text, GameConfig, PlayerId};
use crate::error::Result;
use crate::game::{simulate_seeded, RoundRecord, SimulationResult};
use crate::strategy::Choice;

/// Summary shown after a game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub top_score: u64,
    /// Every player tied on the top score, in lineup order
    pub winners: Vec<PlayerId>,
    /// Cooperation percentage per player, in lineup order
    pub cooperation_rates: Vec<(PlayerId, f64)>,
}

/// A finished game, its analysis, and the seed that replays it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    #[serde(with = "seed_text")]
    pub seed: u64,
    pub result: SimulationResult,
    pub analysis: Analysis,
}

impl GameReport {
    /// Run `config` with its own seed, or with `draw_seed()` when it has none
    pub fn run(config: &GameConfig, draw_seed: impl FnOnce() -> u64) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(draw_seed);
        let result = simulate_seeded(config, seed)?;
        let analysis = analyze(&result);
        log::info!(
            "game over: top score {} by {}",
            analysis.top_score,
            analysis
                .winners
                .iter()
                .map(PlayerId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self { seed, result, analysis })
    }
}

/// Percentage of rounds in which `player` cooperated (0.0 for an empty history)
pub fn cooperation_rate(history: &[RoundRecord], player: &PlayerId) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let cooperated = history
        .iter()
        .filter(|r| r.choices.get(player) == Some(&Choice::Cooperate))
        .count();
    cooperated as f64 / history.len() as f64 * 100.0
}

pub fn analyze(result: &SimulationResult) -> Analysis {
    let score = |p: &PlayerId| result.score(p).unwrap_or(0);
    let top_score = result.players.iter().map(score).max().unwrap_or(0);

    let winners = result
        .players
        .iter()
        .filter(|p| score(*p) == top_score)
        .cloned()
        .collect();

    let cooperation_rates = result
        .players
        .iter()
        .map(|p| (p.clone(), cooperation_rate(&result.history, p)))
        .collect();

    Analysis {
        top_score,
        winners,
        cooperation_rates,
    }
}
