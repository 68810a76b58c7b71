//! Hosting for concurrent matches.
//!
//! [`Arena`] creates matches on a shared ledger, runs each one in its own
//! task, folds engine events into a per-match [`Tally`], and exposes the
//! pending-decision registry to whatever front end drives external players.
mod arena;
mod tally;

pub use arena::*;
pub use tally::*;
