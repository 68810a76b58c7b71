use super::*;
use bluff_auction::*;
use bluff_core::*;

/// The authoritative store of escrowed balances, commitments, and reveals.
///
/// Every method returns once the operation is final, so a caller that reads
/// [`Ledger::state`] afterwards observes its effect. The engine treats the
/// ledger as the only source of truth for balances and round wins.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Open a match with the creator's deposit escrowed in slot A.
    async fn create(&self, deposit: Chips) -> Result<MatchId, LedgerError>;
    /// Escrow the second deposit in slot B and start round 1.
    async fn join(&self, id: MatchId, deposit: Chips) -> Result<(), LedgerError>;
    /// Record a sealed bid for the current round.
    async fn commit(&self, id: MatchId, slot: Slot, commitment: Commitment) -> Result<(), LedgerError>;
    /// Open a sealed bid. The round settles once both sides have revealed.
    async fn reveal(&self, id: MatchId, slot: Slot, bid: Chips, nonce: Nonce) -> Result<(), LedgerError>;
    /// Abort a match that nobody has joined yet.
    async fn cancel(&self, id: MatchId) -> Result<(), LedgerError>;
    /// Settled state as of the last finalized operation.
    async fn state(&self, id: MatchId) -> Result<Snapshot, LedgerError>;
    /// Release local bookkeeping for a completed or cancelled match.
    /// Ledgers that keep permanent records leave this as a no-op.
    async fn forget(&self, _id: MatchId) -> Result<(), LedgerError> {
        Ok(())
    }
}

/// Reasons a ledger refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No match with this id.
    Unknown(MatchId),
    /// Operation not allowed in the match's current status.
    Status { id: MatchId, status: Status },
    /// Deposit differs from what the ledger escrows per seat.
    Deposit { expected: Chips, actual: Chips },
    /// Slot already committed or revealed this round.
    Duplicate { id: MatchId, slot: Slot },
    /// Reveal before both sides committed.
    Premature { id: MatchId, slot: Slot },
    /// Revealed bid and nonce do not open the commitment.
    Mismatch { id: MatchId, slot: Slot },
    /// Bid exceeds the balance or the per-round ceiling.
    Overdraft { id: MatchId, slot: Slot, bid: Chips },
    /// Transport or backend failure.
    Unavailable(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "match {} does not exist", id),
            Self::Status { id, status } => write!(f, "match {} is {}", id, status),
            Self::Deposit { expected, actual } => {
                write!(f, "deposit {} does not match required {}", actual, expected)
            }
            Self::Duplicate { id, slot } => {
                write!(f, "match {} slot {} already acted this round", id, slot)
            }
            Self::Premature { id, slot } => {
                write!(f, "match {} slot {} revealed before both commits", id, slot)
            }
            Self::Mismatch { id, slot } => {
                write!(f, "match {} slot {} reveal does not open commitment", id, slot)
            }
            Self::Overdraft { id, slot, bid } => {
                write!(f, "match {} slot {} cannot afford bid {}", id, slot, bid)
            }
            Self::Unavailable(reason) => write!(f, "ledger unavailable: {}", reason),
        }
    }
}

impl std::error::Error for LedgerError {}
