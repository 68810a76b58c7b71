use super::*;
use bluff_auction::*;

/// Anything that can choose a bid for one side of a duel.
///
/// Strategies are transport-agnostic: the engine does not care whether a
/// bid comes from local arithmetic, a simulation, a language model, or a
/// human typing into a terminal. The engine clamps whatever comes back, so
/// an implementation may return any bid and still keep the match legal.
#[async_trait::async_trait]
pub trait Strategy: Send {
    /// Short label for logs and rosters.
    fn name(&self) -> &str;
    /// Choose a bid for the round described by `view`.
    async fn decide(&mut self, view: &AgentView) -> Decision;
    /// Receive notification of match events addressed to this player.
    /// Most strategies are stateless between rounds and ignore these.
    async fn notify(&mut self, _event: &Event) {}
}
