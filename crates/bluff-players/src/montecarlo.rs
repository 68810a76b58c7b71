//! Simulation player that searches every affordable bid each round.
use bluff_auction::*;
use bluff_core::*;
use bluff_gameroom::*;
use bluff_montecarlo::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

/// Expected-utility player.
///
/// Builds an opponent model from revealed bids, simulates every candidate
/// bid against it, and plays the argmax. Unseeded players draw fresh
/// entropy per decision; seeded players derive each round's stream from
/// the seed and the view, so identical views yield identical bids.
pub struct MonteCarlo {
    search: Search,
    seed: Option<u64>,
    last: Option<Estimate>,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self {
            search: Search::new(SIMULATIONS),
            seed: None,
            last: None,
        }
    }
}

impl MonteCarlo {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
    pub fn with_search(self, search: Search) -> Self {
        Self { search, ..self }
    }
    /// Table behind the most recent decision.
    pub fn estimate(&self) -> Option<&Estimate> {
        self.last.as_ref()
    }
    fn rng(&self, view: &AgentView) -> SmallRng {
        match self.seed {
            Some(seed) => {
                let ref mut hasher = DefaultHasher::new();
                seed.hash(hasher);
                view.hash(hasher);
                SmallRng::seed_from_u64(hasher.finish())
            }
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

#[async_trait::async_trait]
impl Strategy for MonteCarlo {
    fn name(&self) -> &str {
        "montecarlo"
    }
    async fn decide(&mut self, view: &AgentView) -> Decision {
        let ref mut rng = self.rng(view);
        let estimate = self.search.run(view, rng);
        log::debug!("[montecarlo] round {} {}", view.round(), estimate);
        let decision = Decision::new(
            view.clamp(estimate.best()),
            format!("best of {} bids at {}", estimate.table().len(), estimate),
        );
        self.last = Some(estimate);
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[tokio::test]
    async fn bid_stays_within_ceiling() {
        let view = AgentView::opening(Rules::default())
            .with_round(4)
            .with_balance(10)
            .with_history(&[(2, 5), (1, 5), (0, 5)]);
        let mut player = MonteCarlo::default();
        let decision = player.decide(&view).await;
        assert!(decision.bid() <= 5);
        let table = player.estimate().unwrap().table();
        assert_eq!(table.iter().map(|(b, _)| *b).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }
    #[tokio::test]
    async fn seeded_players_agree() {
        let view = AgentView::opening(Rules::default())
            .with_round(3)
            .with_history(&[(1, 3), (2, 2)]);
        let a = MonteCarlo::seeded(11).decide(&view).await;
        let b = MonteCarlo::seeded(11).decide(&view).await;
        assert_eq!(a, b);
    }
    #[tokio::test]
    async fn broke_view_bids_zero() {
        let view = AgentView::opening(Rules::default()).with_balance(0);
        assert_eq!(MonteCarlo::seeded(1).decide(&view).await.bid(), 0);
    }
}
