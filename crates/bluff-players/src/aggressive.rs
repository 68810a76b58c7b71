use bluff_auction::*;
use bluff_gameroom::*;

/// Bids near the ceiling in the opening rounds, everything it can whenever
/// behind on wins, and a moderate amount otherwise.
#[derive(Debug, Default)]
pub struct Aggressive;

impl Aggressive {
    pub fn choose(view: &AgentView) -> Decision {
        let rules = view.rules();
        let (bid, reason) = match view.round() {
            1 | 2 => (rules.fraction(4, 5), "opening pressure to take an early lead"),
            _ if view.is_behind() => (rules.max_bid, "behind on wins, all in"),
            _ => (rules.fraction(3, 5), "keeping pressure on while level or ahead"),
        };
        Decision::new(view.clamp(bid), reason)
    }
}

#[async_trait::async_trait]
impl Strategy for Aggressive {
    fn name(&self) -> &str {
        "aggressive"
    }
    async fn decide(&mut self, view: &AgentView) -> Decision {
        Self::choose(view)
    }
}
