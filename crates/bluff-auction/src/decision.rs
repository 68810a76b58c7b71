use bluff_core::Chips;
use serde::Deserialize;
use serde::Serialize;

/// A strategy's answer for one round.
/// The reason is for observers only; the engine never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    bid: Chips,
    reason: String,
}

impl Decision {
    pub fn new(bid: Chips, reason: impl Into<String>) -> Self {
        Self {
            bid,
            reason: reason.into(),
        }
    }
    /// Zero bid, used when nobody answered in time or the match went away.
    pub fn forfeit(reason: impl Into<String>) -> Self {
        Self::new(0, reason)
    }
    pub fn bid(&self) -> Chips {
        self.bid
    }
    pub fn reason(&self) -> &str {
        &self.reason
    }
    /// Same reason, different bid. Used when the engine clamps.
    pub fn with_bid(self, bid: Chips) -> Self {
        Self { bid, ..self }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.bid, self.reason)
    }
}
