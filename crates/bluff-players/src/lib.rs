//! Strategy implementations for the game room.
//!
//! Concrete types implementing the `Strategy` trait from [`bluff_gameroom`],
//! providing different bidding behaviors.
//!
//! ## Implementations
//!
//! - [`Aggressive`] — Spends early and chases whenever behind
//! - [`Conservative`] — Probes cheaply, escalates late
//! - [`MonteCarlo`] — Expected-utility search against an opponent frequency model
//! - [`External`] — Waits on the pending-decision registry for a human or remote process
//! - [`ModelBacked`] — Consults a reasoning [`Oracle`], with a deterministic fallback
//!
//! [`Roster`] builds any of these by name.
mod aggressive;
mod conservative;
mod external;
mod model;
mod montecarlo;
mod oracle;
mod roster;

pub use aggressive::*;
pub use conservative::*;
pub use external::*;
pub use model::*;
pub use montecarlo::*;
pub use oracle::*;
pub use roster::*;
