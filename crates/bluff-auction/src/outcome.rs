use super::*;
use bluff_core::Chips;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

/// Result of a round or a match, from the table's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won(Slot),
    Tie,
}

impl Outcome {
    /// Strictly higher bid takes the round; equal bids tie.
    pub fn resolve(a: Chips, b: Chips) -> Self {
        Self::from(a.cmp(&b))
    }
    /// Majority of round wins, then remaining balance, then tie.
    pub fn verdict(wins: [u8; 2], balances: [Chips; 2]) -> Self {
        match wins[0].cmp(&wins[1]) {
            Ordering::Equal => Self::from(balances[0].cmp(&balances[1])),
            decided => Self::from(decided),
        }
    }
    pub fn winner(&self) -> Option<Slot> {
        match self {
            Self::Won(slot) => Some(*slot),
            Self::Tie => None,
        }
    }
    /// The same outcome seen by one player.
    pub fn duel(&self, slot: Slot) -> Duel {
        match self {
            Self::Won(s) if *s == slot => Duel::Won,
            Self::Won(_) => Duel::Lost,
            Self::Tie => Duel::Tie,
        }
    }
}

impl From<Ordering> for Outcome {
    /// Ordering of A's quantity relative to B's.
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Won(Slot::A),
            Ordering::Less => Self::Won(Slot::B),
            Ordering::Equal => Self::Tie,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won(slot) => write!(f, "{} wins", slot),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Result of a round from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duel {
    Won,
    Lost,
    Tie,
}

impl std::fmt::Display for Duel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
            Self::Tie => write!(f, "tie"),
        }
    }
}
