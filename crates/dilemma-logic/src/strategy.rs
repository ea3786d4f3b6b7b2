//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DilemmaError;

/// A choice in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Cooperate,
    Defect,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Choice::Cooperate => "Cooperate",
            Choice::Defect => "Defect",
        })
    }
}

/// Strategy assigned to a player for a whole game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Copy opponent's last choice. Start with cooperate.
    TitForTat,
    /// Fair coin flip each round.
    Random,
}

impl Strategy {
    /// Every strategy, in menu order
    pub const ALL: [Strategy; 4] = [
        Strategy::AlwaysCooperate,
        Strategy::AlwaysDefect,
        Strategy::TitForTat,
        Strategy::Random,
    ];

    /// Identifier used in config documents
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::AlwaysCooperate => "AlwaysCooperate",
            Strategy::AlwaysDefect => "AlwaysDefect",
            Strategy::TitForTat => "TitForTat",
            Strategy::Random => "Random",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::AlwaysCooperate => "Always Cooperate",
            Strategy::AlwaysDefect => "Always Defect",
            Strategy::TitForTat => "Tit for Tat",
            Strategy::Random => "Random",
        }
    }

    /// Human-readable description of a strategy
    pub fn describe(&self) -> &'static str {
        match self {
            Strategy::AlwaysCooperate => "Never defects. Always cooperates.",
            Strategy::AlwaysDefect => "Never cooperates. Always defects.",
            Strategy::TitForTat => "Cooperates first, then copies the opponent's previous choice.",
            Strategy::Random => "Randomly cooperates or defects each round.",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DilemmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "alwayscooperate" | "cooperate" | "c" => Ok(Strategy::AlwaysCooperate),
            "alwaysdefect" | "defect" | "d" => Ok(Strategy::AlwaysDefect),
            "titfortat" | "tft" => Ok(Strategy::TitForTat),
            "random" | "rand" => Ok(Strategy::Random),
            _ => Err(DilemmaError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Who a TitForTat player answers to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitForTatRule {
    /// Copy the single other player. Only valid for two-player games.
    #[default]
    HeadToHead,
    /// Defect when more than half of the other players defected last round.
    Majority,
}

/// Execute a strategy for one round
///
/// # Arguments
/// * `strategy` - The strategy to execute
/// * `me` - Lineup position of the player choosing
/// * `previous` - Every player's choice last round, in lineup order (`None` on round 0)
/// * `rule` - How TitForTat reads `previous`
/// * `rng` - Random source for the Random strategy
pub fn execute_strategy<R: Rng + ?Sized>(
    strategy: Strategy,
    me: usize,
    previous: Option<&[Choice]>,
    rule: TitForTatRule,
    rng: &mut R,
) -> Choice {
    match strategy {
        Strategy::AlwaysCooperate => Choice::Cooperate,
        Strategy::AlwaysDefect => Choice::Defect,
        Strategy::TitForTat => match previous {
            None => Choice::Cooperate,
            Some(previous) => execute_tit_for_tat(me, previous, rule),
        },
        Strategy::Random => execute_random(rng),
    }
}

/// Tit-for-Tat: answer last round's choice of the opponent(s)
fn execute_tit_for_tat(me: usize, previous: &[Choice], rule: TitForTatRule) -> Choice {
    let mut others = previous
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != me)
        .map(|(_, c)| *c);

    match rule {
        TitForTatRule::HeadToHead => others.next().unwrap_or(Choice::Cooperate),
        TitForTatRule::Majority => {
            let (total, defections) = others.fold((0usize, 0usize), |(t, d), c| {
                (t + 1, d + usize::from(c == Choice::Defect))
            });
            if defections * 2 > total {
                Choice::Defect
            } else {
                Choice::Cooperate
            }
        }
    }
}

/// Random: fair coin, no memory
fn execute_random<R: Rng + ?Sized>(rng: &mut R) -> Choice {
    if rng.random_bool(0.5) {
        Choice::Cooperate
    } else {
        Choice::Defect
    }
}
