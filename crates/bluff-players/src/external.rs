use bluff_auction::*;
use bluff_core::*;
use bluff_gameroom::*;

/// Stands in for a decision made outside the process.
///
/// Each `decide` parks a ticket in the shared [`Registry`] under this
/// player's match and slot, then waits for a submission. The seat is learned
/// from the engine's [`Event::Seated`] notification. If the ticket cannot be
/// parked, or the match abandons it, the player bids zero.
pub struct External {
    registry: Registry,
    seat: Option<(MatchId, Slot)>,
}

impl External {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            seat: None,
        }
    }
    /// Pre-seated player, for callers that already know the match.
    pub fn seated(registry: Registry, id: MatchId, slot: Slot) -> Self {
        Self {
            registry,
            seat: Some((id, slot)),
        }
    }
    pub fn seat(&self) -> Option<(MatchId, Slot)> {
        self.seat
    }
}

#[async_trait::async_trait]
impl Strategy for External {
    fn name(&self) -> &str {
        "external"
    }
    async fn decide(&mut self, view: &AgentView) -> Decision {
        let Some((id, slot)) = self.seat else {
            log::warn!("[external] asked to decide before being seated");
            return Decision::forfeit("not seated");
        };
        let claim = match self.registry.park(id, slot, view.clone()) {
            Ok(claim) => claim,
            Err(e) => {
                log::error!("[external] {}", e);
                return Decision::forfeit(e.to_string());
            }
        };
        log::info!("[external] #{} {} waiting for round {} decision", id, slot, view.round());
        match claim.wait().await {
            Ok(decision) => decision,
            Err(e) => {
                log::warn!("[external] {}", e);
                Decision::forfeit("abandoned")
            }
        }
    }
    async fn notify(&mut self, event: &Event) {
        if let Event::Seated { id, slot } = event {
            self.seat = Some((*id, *slot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    async fn parked(registry: &Registry, id: MatchId) {
        while registry.pending(id).is_empty() {
            tokio::task::yield_now().await;
        }
    }
    #[tokio::test]
    async fn submission_resolves_waiting_decision() {
        let registry = Registry::default();
        let rules = Rules {
            max_bid: 25,
            ..Rules::default()
        };
        let view = AgentView::opening(rules).with_balance(12);
        let mut player = External::seated(registry.clone(), 7, Slot::A);
        let waiting = tokio::spawn(async move { player.decide(&view).await });
        parked(&registry, 7).await;
        let pending = registry.pending(7);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0, Slot::A);
        assert_eq!(pending[0].1.balance(), 12);
        assert!(matches!(
            registry.submit(7, Slot::A, Decision::new(15, "too much")),
            Err(RegistryError::OutOfRange { .. })
        ));
        assert_eq!(registry.pending(7).len(), 1);
        registry.submit(7, Slot::A, Decision::new(9, "typed")).unwrap();
        let decision = waiting.await.unwrap();
        assert_eq!(decision.bid(), 9);
        assert_eq!(decision.reason(), "typed");
        assert!(registry.pending(7).iter().all(|(slot, _)| *slot != Slot::A));
    }
    #[tokio::test]
    async fn abandoned_decision_bids_zero() {
        let registry = Registry::default();
        let view = AgentView::opening(Rules::default());
        let mut player = External::seated(registry.clone(), 3, Slot::B);
        let waiting = tokio::spawn(async move { player.decide(&view).await });
        parked(&registry, 3).await;
        registry.abandon(3);
        assert_eq!(waiting.await.unwrap().bid(), 0);
    }
    #[tokio::test]
    async fn seat_arrives_by_notification() {
        let mut player = External::new(Registry::default());
        assert_eq!(player.seat(), None);
        player.notify(&Event::Seated { id: 4, slot: Slot::B }).await;
        assert_eq!(player.seat(), Some((4, Slot::B)));
    }
    #[tokio::test]
    async fn unseated_player_forfeits() {
        let mut player = External::new(Registry::default());
        let view = AgentView::opening(Rules::default());
        assert_eq!(player.decide(&view).await.bid(), 0);
    }
}
