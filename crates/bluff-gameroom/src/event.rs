use bluff_auction::*;
use bluff_core::*;

/// Events emitted by the engine over the course of one match.
/// Every event carries the match id so observers can multiplex matches.
#[derive(Clone, Debug)]
pub enum Event {
    /// Match created; slot A's deposit is escrowed.
    Opened { id: MatchId, rules: Rules },
    /// Seat assignment (sent only to the player in `slot`).
    Seated { id: MatchId, slot: Slot },
    /// Slot B joined; round 1 is next.
    Started { id: MatchId },
    /// A round is about to be decided.
    RoundStart { id: MatchId, round: Round, snapshot: Snapshot },
    /// A validated decision (observers only, never the opponent).
    Decided {
        id: MatchId,
        round: Round,
        slot: Slot,
        decision: Decision,
    },
    /// Both bids revealed and settled.
    RoundEnd { id: MatchId, record: RoundRecord },
    /// Ledger reports the match complete.
    Finished { id: MatchId, result: MatchResult },
    /// Match stopped on an unrecoverable error.
    Aborted { id: MatchId, reason: String },
}

impl Event {
    pub fn id(&self) -> MatchId {
        match self {
            Event::Opened { id, .. }
            | Event::Seated { id, .. }
            | Event::Started { id }
            | Event::RoundStart { id, .. }
            | Event::Decided { id, .. }
            | Event::RoundEnd { id, .. }
            | Event::Finished { id, .. }
            | Event::Aborted { id, .. } => *id,
        }
    }
    /// Does this event end the match?
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finished { .. } | Event::Aborted { .. })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Opened { id, rules } => write!(
                f,
                "#{} opened ({} rounds, deposit {}, max bid {})",
                id, rules.rounds, rules.deposit, rules.max_bid
            ),
            Event::Seated { id, slot } => write!(f, "#{} seated as {}", id, slot),
            Event::Started { id } => write!(f, "#{} started", id),
            Event::RoundStart { id, round, snapshot } => {
                write!(f, "#{} round {} ({})", id, round, snapshot)
            }
            Event::Decided {
                id, slot, decision, ..
            } => write!(f, "#{} {} decided {}", id, slot, decision),
            Event::RoundEnd { id, record } => write!(f, "#{} {}", id, record),
            Event::Finished { id, result } => write!(f, "#{} finished: {}", id, result),
            Event::Aborted { id, reason } => write!(f, "#{} aborted: {}", id, reason),
        }
    }
}
