//! Monte Carlo bid selection.
//!
//! A player estimates the expected utility of every legal bid by simulating
//! the coming round against opponent bids drawn from a smoothed frequency
//! model of what that opponent has revealed so far.
//!
//! - [`Density`] — discrete distribution over an ordered support
//! - [`OpponentModel`] — Laplace-smoothed frequencies of revealed bids
//! - [`Evaluator`] / [`Heuristic`] — scores one simulated round
//! - [`Search`] — exhaustive candidate × trial evaluation
//! - [`Estimate`] — chosen bid plus the full expected-utility table
mod density;
mod estimate;
mod model;
mod search;
mod utility;

pub use density::*;
pub use estimate::*;
pub use model::*;
pub use search::*;
pub use utility::*;
