//! Iterated Prisoner's Dilemma demo
//!
//! Runs one game and prints the round table, scores and cooperation
//! rates. Options: --players, --strategy, --rounds, --seed, --config, --json

mod cli;
mod report;

use clap::Parser;
use dilemma_logic::GameReport;

use crate::cli::Args;
use crate::report::{catalogue, TextReport};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.list_strategies {
        print!("{}", catalogue());
        return Ok(());
    }

    let config = args.game_config()?;
    let game = GameReport::run(&config, rand::random)?;
    log::info!("{:<24}{}", "seed", game.seed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        print!("{}", TextReport(&game));
    }
    Ok(())
}
