//! Command-line arguments and config assembly

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use dilemma_logic::{GameConfig, Strategy, TitForTatRule, DEFAULT_ROUNDS};

/// Strategy given to players the command line leaves unassigned
pub const DEFAULT_STRATEGY: Strategy = Strategy::AlwaysCooperate;

#[derive(Debug, Parser)]
#[command(
    name = "dilemma",
    version,
    about = "Simulate the iterated Prisoner's Dilemma between 2-4 players"
)]
pub struct Args {
    /// Number of players, named Player1..PlayerN
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=4))]
    pub players: u8,

    /// Strategy per player, in order; repeat for each player
    /// (cooperate, defect, tit-for-tat, random)
    #[arg(short, long = "strategy", value_name = "STRATEGY")]
    pub strategies: Vec<Strategy>,

    /// Number of rounds [default: 5]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub rounds: Option<u32>,

    /// Seed for the Random strategy; drawn at random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// How TitForTat picks the choice it answers
    #[arg(long, value_enum)]
    pub tit_for_tat: Option<TitForTatArg>,

    /// JSON game config; --rounds, --seed and --tit-for-tat override it
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["players", "strategies"])]
    pub config: Option<PathBuf>,

    /// Print the game as JSON
    #[arg(long)]
    pub json: bool,

    /// Describe the strategies and payoffs, then exit
    #[arg(long)]
    pub list_strategies: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TitForTatArg {
    /// Copy the other player (two-player games only)
    HeadToHead,
    /// Follow the majority of the other players
    Majority,
}

impl From<TitForTatArg> for TitForTatRule {
    fn from(arg: TitForTatArg) -> Self {
        match arg {
            TitForTatArg::HeadToHead => TitForTatRule::HeadToHead,
            TitForTatArg::Majority => TitForTatRule::Majority,
        }
    }
}

impl Args {
    /// Build the game config from a config file or the player flags
    pub fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GameConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => self.lineup_from_flags()?,
        };

        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rule) = self.tit_for_tat {
            config.tit_for_tat = rule.into();
        }
        Ok(config)
    }

    fn lineup_from_flags(&self) -> anyhow::Result<GameConfig> {
        let players = self.players as usize;
        if self.strategies.len() > players {
            bail!(
                "{} strategies given for {} players",
                self.strategies.len(),
                players
            );
        }

        let mut strategies = self.strategies.clone();
        strategies.resize(players, DEFAULT_STRATEGY);
        Ok(GameConfig::numbered(&strategies, DEFAULT_ROUNDS))
    }
}
