//! Sealed-bid duel domain.
//!
//! Pure, synchronous types shared by the engine and every strategy. Nothing
//! here performs I/O; the ledger and the engine live in `bluff-gameroom`.
//!
//! ## Types
//!
//! - [`Slot`] — which side of the duel (`A` creates the match, `B` joins it)
//! - [`Rules`] — deposit, round count, bid ceiling, and bid granularity
//! - [`Outcome`] / [`Duel`] — round and match results, global and per-player
//! - [`Snapshot`] — settled state as read back from the ledger
//! - [`AgentView`] — the read-only, player-scoped input to a decision
//! - [`Decision`] — a bid plus a free-text reason
//! - [`RoundRecord`] / [`MatchResult`] — append-only history and final verdict
mod decision;
mod outcome;
mod record;
mod rules;
mod slot;
mod snapshot;
mod view;

pub use decision::*;
pub use outcome::*;
pub use record::*;
pub use rules::*;
pub use slot::*;
pub use snapshot::*;
pub use view::*;
