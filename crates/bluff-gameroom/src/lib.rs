//! Async runtime for sealed-bid duels.
//!
//! The [`Engine`] is the functional core of one match: it asks both
//! [`Strategy`] implementations for a bid concurrently, commits and reveals
//! through a [`Ledger`], and records what settled. The [`Room`] is the
//! imperative shell that drives an engine from creation to conclusion and
//! cleans up when the ledger fails part way.
//!
//! Decisions that must come from outside the process wait in the
//! [`Registry`] until someone submits them.
mod ballot;
mod engine;
mod event;
mod ledger;
mod memory;
mod registry;
mod room;
mod strategy;

pub use ballot::*;
pub use engine::*;
pub use event::*;
pub use ledger::*;
pub use memory::*;
pub use registry::*;
pub use room::*;
pub use strategy::*;
