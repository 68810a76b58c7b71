use bluff_auction::*;
use bluff_gameroom::*;

/// Probes with small bids, plays safe through the middle of the match
/// unless behind, and spends freely in the final round.
#[derive(Debug, Default)]
pub struct Conservative;

impl Conservative {
    pub fn choose(view: &AgentView) -> Decision {
        let rules = view.rules();
        let (bid, reason) = match view.round() {
            1 | 2 => (rules.fraction(1, 5), "probing cheaply"),
            _ if view.is_final() => (rules.max_bid, "final round, spending what was saved"),
            _ if view.is_behind() => (rules.fraction(3, 5), "behind on wins, escalating"),
            _ => (rules.fraction(2, 5), "holding a safe line"),
        };
        Decision::new(view.clamp(bid), reason)
    }
}

#[async_trait::async_trait]
impl Strategy for Conservative {
    fn name(&self) -> &str {
        "conservative"
    }
    async fn decide(&mut self, view: &AgentView) -> Decision {
        Self::choose(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn wide() -> Rules {
        Rules {
            rounds: 5,
            deposit: 40,
            max_bid: 25,
            step: 1,
        }
    }
    #[test]
    fn schedule_by_round() {
        let view = AgentView::opening(wide());
        assert_eq!(Conservative::choose(&view).bid(), 5);
        assert_eq!(Conservative::choose(&view.clone().with_round(3)).bid(), 10);
        assert_eq!(Conservative::choose(&view.clone().with_round(4).with_wins(0, 2)).bid(), 15);
        assert_eq!(Conservative::choose(&view.with_round(5)).bid(), 25);
    }
    #[test]
    fn final_round_respects_balance() {
        let view = AgentView::opening(Rules::default()).with_round(5).with_balance(3);
        assert_eq!(Conservative::choose(&view).bid(), 3);
    }
    #[test]
    fn probe_on_default_grid() {
        let view = AgentView::opening(Rules::default());
        assert_eq!(Conservative::choose(&view).bid(), 1);
    }
}
