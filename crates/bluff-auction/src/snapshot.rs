use super::*;
use bluff_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Lifecycle of a match as the ledger reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Created with A's deposit, awaiting B.
    Waiting,
    /// Both deposits in; rounds are being played.
    Active,
    /// Final round settled.
    Completed,
    /// Withdrawn before an opponent joined.
    Cancelled,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One player's settled standing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub balance: Chips,
    pub wins: u8,
}

/// Settled match state as read back from the ledger.
/// `round` is the round currently open for commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: Status,
    pub round: Round,
    pub seats: [Seat; 2],
}

impl Snapshot {
    pub fn seat(&self, slot: Slot) -> Seat {
        self.seats[slot.index()]
    }
    pub fn balances(&self) -> [Chips; 2] {
        self.seats.map(|s| s.balance)
    }
    pub fn wins(&self) -> [u8; 2] {
        self.seats.map(|s| s.wins)
    }
    pub fn is_exhausted(&self) -> bool {
        self.seats.iter().all(|s| s.balance == 0)
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} round {} | A {} ({}w) | B {} ({}w)",
            self.status,
            self.round,
            self.seats[0].balance,
            self.seats[0].wins,
            self.seats[1].balance,
            self.seats[1].wins,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn seats_are_indexed_by_slot() {
        let snapshot = Snapshot {
            status: Status::Active,
            round: 2,
            seats: [
                Seat {
                    balance: 17,
                    wins: 0,
                },
                Seat {
                    balance: 16,
                    wins: 1,
                },
            ],
        };
        assert_eq!(snapshot.seat(Slot::A).balance, 17);
        assert_eq!(snapshot.seat(Slot::B).wins, 1);
        assert_eq!(snapshot.balances(), [17, 16]);
        assert!(!snapshot.is_exhausted());
    }
    #[test]
    fn terminal_statuses() {
        assert!(Status::Completed.is_terminal());
        assert!(Status::Cancelled.is_terminal());
        assert!(!Status::Waiting.is_terminal());
        assert!(!Status::Active.is_terminal());
    }
}
