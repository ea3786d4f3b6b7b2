//! Game configuration and validation

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::strategy::{Strategy, TitForTatRule};

/// Round count used when a config document leaves it out
pub const DEFAULT_ROUNDS: u32 = 5;

/// Opaque player identifier
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Default name for the player at lineup position `index`
    pub fn numbered(index: usize) -> Self {
        Self(format!("Player{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One seat at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: PlayerId,
    pub strategy: Strategy,
}

impl PlayerEntry {
    pub fn new(id: impl Into<PlayerId>, strategy: Strategy) -> Self {
        Self { id: id.into(), strategy }
    }
}

/// Everything a game needs, passed explicitly into the simulator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: Vec<PlayerEntry>,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Fixed seed for the Random strategy. `None` lets the caller pick one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "seed_text::deserialize_option"
    )]
    pub seed: Option<u64>,
    #[serde(default)]
    pub tit_for_tat: TitForTatRule,
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

/// Seeds are written as decimal strings: JavaScript numbers lose precision
/// above 2^53. Either form is accepted on input.
pub(crate) mod seed_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    impl Repr {
        fn into_seed<E: Error>(self) -> Result<u64, E> {
            match self {
                Repr::Number(n) => Ok(n),
                Repr::Text(t) => t
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid seed {:?}", t))),
            }
        }
    }

    pub fn serialize<S: Serializer>(seed: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(seed)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Repr::deserialize(deserializer)?.into_seed()
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Option::<Repr>::deserialize(deserializer)?
            .map(Repr::into_seed)
            .transpose()
    }
}

impl GameConfig {
    pub fn new(players: Vec<PlayerEntry>, rounds: u32) -> Self {
        Self {
            players,
            rounds,
            seed: None,
            tit_for_tat: TitForTatRule::default(),
        }
    }

    /// Name players `Player1..PlayerN` in the order the strategies are given
    pub fn numbered(strategies: &[Strategy], rounds: u32) -> Self {
        let players = strategies
            .iter()
            .enumerate()
            .map(|(i, s)| PlayerEntry::new(PlayerId::numbered(i), *s))
            .collect();
        Self::new(players, rounds)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tit_for_tat(mut self, rule: TitForTatRule) -> Self {
        self.tit_for_tat = rule;
        self
    }

    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the config and freeze it into a lineup
    pub fn validate(&self) -> Result<Lineup> {
        if self.rounds == 0 {
            return Err(DilemmaError::InvalidRounds);
        }
        if self.players.is_empty() {
            return Err(DilemmaError::EmptyLineup);
        }

        let mut seen = HashSet::with_capacity(self.players.len());
        for entry in &self.players {
            if entry.id.as_str().trim().is_empty() {
                return Err(DilemmaError::BlankPlayerId);
            }
            if !seen.insert(&entry.id) {
                return Err(DilemmaError::DuplicatePlayer(entry.id.to_string()));
            }
        }

        let has_tft = self.players.iter().any(|p| p.strategy == Strategy::TitForTat);
        if has_tft && self.tit_for_tat == TitForTatRule::HeadToHead && self.players.len() != 2 {
            return Err(DilemmaError::TitForTatNeedsTwoPlayers {
                players: self.players.len(),
            });
        }

        Ok(Lineup {
            players: self.players.clone(),
            rounds: self.rounds,
            tit_for_tat: self.tit_for_tat,
        })
    }
}

/// A validated, ordered set of players ready to simulate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lineup {
    players: Vec<PlayerEntry>,
    rounds: u32,
    tit_for_tat: TitForTatRule,
}

impl Lineup {
    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn tit_for_tat(&self) -> TitForTatRule {
        self.tit_for_tat
    }
}
