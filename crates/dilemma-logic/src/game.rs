//! Game execution engine

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Lineup, PlayerId};
use crate::error::Result;
use crate::pairing::all_pairs;
use crate::payoff;
use rand_chacha::ChaCha8Rng;
use crate::strategy::{execute_strategy, Choice};

/// Final score per player
pub type ScoreTable = BTreeMap<PlayerId, u64>;

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub choices: BTreeMap<PlayerId, Choice>,
    /// Points earned this round, summed over every pairing
    pub gains: BTreeMap<PlayerId, u64>,
    pub cumulative: BTreeMap<PlayerId, u64>,
}

/// Result of a complete game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Players in lineup order
    pub players: Vec<PlayerId>,
    pub scores: ScoreTable,
    pub history: Vec<RoundRecord>,
}

impl SimulationResult {
    pub fn round_count(&self) -> usize {
        self.history.len()
    }

    pub fn score(&self, player: &PlayerId) -> Option<u64> {
        self.scores.get(player).copied()
    }

    /// A player's choices, round by round
    pub fn choices_of<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = Choice> + 'a {
        self.history
            .iter()
            .filter_map(move |r| r.choices.get(player).copied())
    }
}

/// Validate `config` and run it with the given random source
///
/// `config.seed` is not read here: `rng` alone drives the Random strategy.
///
/// # Arguments
/// * `config` - Players, strategies, round count and tit-for-tat rule
/// * `rng` - Random source for the Random strategy
///
/// # Returns
/// Final scores with round-by-round details
pub fn simulate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<SimulationResult> {
    let lineup = config.validate()?;
    Ok(run_game(&lineup, rng))
}

/// Validate `config` and run it with a `ChaCha8Rng` built from `seed`
///
/// `seed` wins over `config.seed`; `GameReport::run` is the entry point
/// that honours the config's seed.
pub fn simulate_seeded(config: &GameConfig, seed: u64) -> Result<SimulationResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate(config, &mut rng)
}

/// Run a validated lineup for its configured number of rounds
pub fn run_game<R: Rng + ?Sized>(lineup: &Lineup, rng: &mut R) -> SimulationResult {
    let players: Vec<PlayerId> = lineup.players().iter().map(|p| p.id.clone()).collect();
    let n = players.len();
    let rule = lineup.tit_for_tat();

    log::info!(
        "simulating {} rounds for {} players ({:?} tit-for-tat)",
        lineup.rounds(),
        n,
        rule
    );

    let mut totals = vec![0u64; n];
    let mut previous: Option<Vec<Choice>> = None;
    let mut history = Vec::with_capacity(lineup.rounds() as usize);

    for round in 0..lineup.rounds() {
        // Resolve every choice before any scoring
        let choices: Vec<Choice> = lineup
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| execute_strategy(p.strategy, i, previous.as_deref(), rule, &mut *rng))
            .collect();

        let mut gains = vec![0u64; n];
        for (a, b) in all_pairs(n) {
            let (gain_a, gain_b) = payoff(choices[a], choices[b]);
            gains[a] += gain_a as u64;
            gains[b] += gain_b as u64;
        }
        for (total, gain) in totals.iter_mut().zip(&gains) {
            *total += gain;
        }

        log::debug!("round {}: choices {:?} gains {:?}", round, choices, gains);

        history.push(RoundRecord {
            round,
            choices: keyed(&players, &choices),
            gains: keyed(&players, &gains),
            cumulative: keyed(&players, &totals),
        });

        previous = Some(choices);
    }

    SimulationResult {
        scores: keyed(&players, &totals),
        players,
        history,
    }
}

fn keyed<T: Copy>(players: &[PlayerId], values: &[T]) -> BTreeMap<PlayerId, T> {
    players.iter().cloned().zip(values.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerEntry;
    use crate::error::DilemmaError;
    use crate::strategy::{Strategy, TitForTatRule};
    use proptest::prelude::*;

    fn p(i: usize) -> PlayerId {
        PlayerId::numbered(i)
    }

    fn two(a: Strategy, b: Strategy, rounds: u32) -> SimulationResult {
        simulate_seeded(&GameConfig::numbered(&[a, b], rounds), 42).unwrap()
    }

    #[test]
    fn test_cooperate_vs_cooperate() {
        let result = two(Strategy::AlwaysCooperate, Strategy::AlwaysCooperate, 7);

        for round in &result.history {
            assert_eq!(round.choices[&p(0)], Choice::Cooperate);
            assert_eq!(round.choices[&p(1)], Choice::Cooperate);
            assert_eq!(round.gains[&p(0)], 3);
            assert_eq!(round.gains[&p(1)], 3);
        }

        assert_eq!(result.scores[&p(0)], 21);
        assert_eq!(result.scores[&p(1)], 21);
    }

    #[test]
    fn test_defect_vs_defect() {
        let result = two(Strategy::AlwaysDefect, Strategy::AlwaysDefect, 6);
        assert_eq!(result.scores[&p(0)], 6);
        assert_eq!(result.scores[&p(1)], 6);
    }

    #[test]
    fn test_defect_vs_cooperate() {
        let result = two(Strategy::AlwaysDefect, Strategy::AlwaysCooperate, 4);

        for round in &result.history {
            assert_eq!(round.choices[&p(0)], Choice::Defect);
            assert_eq!(round.choices[&p(1)], Choice::Cooperate);
            assert_eq!(round.gains[&p(0)], 5);
            assert_eq!(round.gains[&p(1)], 0);
        }

        assert_eq!(result.scores[&p(0)], 20);
        assert_eq!(result.scores[&p(1)], 0);
    }

    #[test]
    fn test_tft_vs_always_defect() {
        let result = two(Strategy::TitForTat, Strategy::AlwaysDefect, 5);

        // Round 0: TFT cooperates, AD defects
        assert_eq!(result.history[0].choices[&p(0)], Choice::Cooperate);
        assert_eq!(result.history[0].choices[&p(1)], Choice::Defect);

        // Round 1+: TFT retaliates, both defect
        for round in result.history.iter().skip(1) {
            assert_eq!(round.choices[&p(0)], Choice::Defect);
            assert_eq!(round.choices[&p(1)], Choice::Defect);
        }

        assert_eq!(result.scores[&p(0)], 4);
        assert_eq!(result.scores[&p(1)], 9);
    }

    #[test]
    fn test_tft_vs_tft() {
        let result = two(Strategy::TitForTat, Strategy::TitForTat, 10);

        for round in &result.history {
            assert_eq!(round.choices[&p(0)], Choice::Cooperate);
            assert_eq!(round.choices[&p(1)], Choice::Cooperate);
        }
        assert_eq!(result.scores[&p(0)], 30);
        assert_eq!(result.scores[&p(1)], 30);
    }

    #[test]
    fn test_tft_mirrors_random_opponent() {
        let result = two(Strategy::Random, Strategy::TitForTat, 50);
        for pair in result.history.windows(2) {
            assert_eq!(pair[1].choices[&p(1)], pair[0].choices[&p(0)]);
        }
    }

    #[test]
    fn test_single_round() {
        let result = two(Strategy::TitForTat, Strategy::AlwaysDefect, 1);
        assert_eq!(result.round_count(), 1);
        assert_eq!(result.scores[&p(0)], 0);
        assert_eq!(result.scores[&p(1)], 5);
    }

    #[test]
    fn test_four_cooperators_score_per_pairing() {
        let config = GameConfig::numbered(&[Strategy::AlwaysCooperate; 4], 5);
        let result = simulate_seeded(&config, 1).unwrap();
        // 3 pairings per player, 3 points each, 5 rounds
        for i in 0..4 {
            assert_eq!(result.scores[&p(i)], 45);
        }
    }

    #[test]
    fn test_three_player_mixed() {
        let config = GameConfig::numbered(
            &[Strategy::AlwaysDefect, Strategy::AlwaysCooperate, Strategy::AlwaysCooperate],
            2,
        );
        let result = simulate_seeded(&config, 1).unwrap();
        // Defector takes 5 from each cooperator; cooperators get 0 + 3
        assert_eq!(result.scores[&p(0)], 20);
        assert_eq!(result.scores[&p(1)], 6);
        assert_eq!(result.scores[&p(2)], 6);
    }

    #[test]
    fn test_majority_tft_in_group() {
        let config = GameConfig::numbered(
            &[Strategy::TitForTat, Strategy::AlwaysDefect, Strategy::AlwaysDefect],
            3,
        )
        .with_tit_for_tat(TitForTatRule::Majority);
        let result = simulate_seeded(&config, 1).unwrap();

        let tft: Vec<_> = result.choices_of(&p(0)).collect();
        assert_eq!(tft, vec![Choice::Cooperate, Choice::Defect, Choice::Defect]);
    }

    #[test]
    fn test_single_player_scores_nothing() {
        let config = GameConfig::numbered(&[Strategy::AlwaysDefect], 3);
        let result = simulate_seeded(&config, 1).unwrap();
        assert_eq!(result.round_count(), 3);
        assert_eq!(result.scores[&p(0)], 0);
    }

    #[test]
    fn test_custom_player_ids() {
        let config = GameConfig::new(
            vec![
                PlayerEntry::new("zed", Strategy::AlwaysDefect),
                PlayerEntry::new("amy", Strategy::AlwaysCooperate),
            ],
            2,
        );
        let result = simulate_seeded(&config, 1).unwrap();
        assert_eq!(result.players, vec![PlayerId::from("zed"), PlayerId::from("amy")]);
        assert_eq!(result.score(&PlayerId::from("zed")), Some(10));
        assert_eq!(result.score(&PlayerId::from("amy")), Some(0));
        assert_eq!(result.score(&PlayerId::from("bob")), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig::numbered(&[Strategy::AlwaysCooperate; 2], 0);
        assert!(matches!(simulate_seeded(&config, 1), Err(DilemmaError::InvalidRounds)));
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::numbered(&[Strategy::Random; 3], 10);
        let r1 = simulate_seeded(&config, 42).unwrap();
        let r2 = simulate_seeded(&config, 42).unwrap();
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = GameConfig::numbered(&[Strategy::Random, Strategy::Random], 10);
        let r1 = simulate_seeded(&config, 1).unwrap();
        let r2 = simulate_seeded(&config, 2).unwrap();

        // Not guaranteed but extremely likely over 20 coin flips
        assert_ne!(r1.history, r2.history);
    }

    #[test]
    fn test_random_converges_to_half() {
        let config = GameConfig::numbered(&[Strategy::Random, Strategy::AlwaysDefect], 10);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut cooperations = 0usize;
        let mut total = 0usize;
        for _ in 0..500 {
            let result = simulate(&config, &mut rng).unwrap();
            cooperations += result.choices_of(&p(0)).filter(|c| *c == Choice::Cooperate).count();
            total += result.round_count();
        }
        let rate = cooperations as f64 / total as f64;
        assert!((rate - 0.5).abs() < 0.05, "cooperation rate {} not near 0.5", rate);
    }

    fn strategy() -> impl proptest::strategy::Strategy<Value = Strategy> {
        prop::sample::select(Strategy::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_round_count_and_monotonic_scores(
            strategies in prop::collection::vec(strategy(), 1..=4),
            rounds in 1u32..=40,
            seed in any::<u64>(),
        ) {
            let config = GameConfig::numbered(&strategies, rounds)
                .with_tit_for_tat(TitForTatRule::Majority);
            let result = simulate_seeded(&config, seed).unwrap();

            prop_assert_eq!(result.history.len(), rounds as usize);

            let mut running = vec![0u64; strategies.len()];
            for (k, record) in result.history.iter().enumerate() {
                prop_assert_eq!(record.round as usize, k);
                prop_assert_eq!(record.choices.len(), strategies.len());
                for (i, total) in running.iter_mut().enumerate() {
                    let before = *total;
                    *total += record.gains[&p(i)];
                    prop_assert!(*total >= before);
                    prop_assert_eq!(record.cumulative[&p(i)], *total);
                }
            }
            for (i, total) in running.iter().enumerate() {
                prop_assert_eq!(result.scores[&p(i)], *total);
            }
        }

        #[test]
        fn prop_majority_matches_head_to_head_for_two(
            a in strategy(),
            b in strategy(),
            rounds in 1u32..=30,
            seed in any::<u64>(),
        ) {
            let config = GameConfig::numbered(&[a, b], rounds);
            let strict = simulate_seeded(&config, seed).unwrap();
            let config = config.with_tit_for_tat(TitForTatRule::Majority);
            let majority = simulate_seeded(&config, seed).unwrap();
            prop_assert_eq!(strict, majority);
        }

        #[test]
        fn prop_round_gain_bounded_by_pairings(
            strategies in prop::collection::vec(strategy(), 2..=4),
            rounds in 1u32..=20,
            seed in any::<u64>(),
        ) {
            let n = strategies.len() as u64;
            let config = GameConfig::numbered(&strategies, rounds)
                .with_tit_for_tat(TitForTatRule::Majority);
            let result = simulate_seeded(&config, seed).unwrap();
            for record in &result.history {
                for gain in record.gains.values() {
                    prop_assert!(*gain <= 5 * (n - 1));
                }
            }
        }
    }
}
