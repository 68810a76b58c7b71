use super::*;
use bluff_gameroom::*;
use std::sync::Arc;

/// Builds strategies by name.
///
/// `model` consults the configured oracle with the adaptive persona;
/// `model-aggressive` and `model-conservative` pick the other personas.
/// `external` players share this roster's registry.
#[derive(Clone)]
pub struct Roster {
    registry: Registry,
    oracle: Arc<dyn Oracle>,
    seed: Option<u64>,
}

impl Roster {
    pub const NAMES: [&'static str; 7] = [
        "aggressive",
        "conservative",
        "montecarlo",
        "model",
        "model-aggressive",
        "model-conservative",
        "external",
    ];
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            oracle: Arc::new(Offline),
            seed: None,
        }
    }
    pub fn with_oracle(self, oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle, ..self }
    }
    /// Make simulation players reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn is_external(name: &str) -> bool {
        name.eq_ignore_ascii_case("external")
    }
    pub fn build(&self, name: &str) -> Option<Box<dyn Strategy>> {
        let name = name.to_ascii_lowercase();
        let strategy: Box<dyn Strategy> = match name.as_str() {
            "aggressive" => Box::new(Aggressive),
            "conservative" => Box::new(Conservative),
            "montecarlo" => Box::new(match self.seed {
                Some(seed) => MonteCarlo::seeded(seed),
                None => MonteCarlo::default(),
            }),
            "model" => Box::new(ModelBacked::new(self.oracle.clone(), Persona::Adaptive)),
            "external" => Box::new(External::new(self.registry.clone())),
            other => {
                let persona = other.strip_prefix("model-")?;
                let persona = Persona::try_from(persona).ok()?;
                Box::new(ModelBacked::new(self.oracle.clone(), persona))
            }
        };
        Some(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluff_auction::*;

    fn views() -> Vec<AgentView> {
        let mut views = Vec::new();
        for rules in [
            Rules::default(),
            Rules {
                rounds: 5,
                deposit: 40,
                max_bid: 25,
                step: 1,
            },
        ] {
            for round in 1..=rules.rounds {
                for balance in [0, 1, 3, 7, rules.deposit] {
                    for (wins, theirs) in [(0, 0), (0, 2), (2, 0), (3, 1)] {
                        views.push(
                            AgentView::opening(rules)
                                .with_round(round)
                                .with_balance(balance)
                                .with_wins(wins, theirs)
                                .with_history(&[(1, rules.max_bid), (0, 2)]),
                        );
                    }
                }
            }
        }
        views
    }

    #[test]
    fn every_listed_name_builds() {
        let roster = Roster::new(Registry::default());
        for name in Roster::NAMES {
            let strategy = roster.build(name).unwrap();
            assert!(name.starts_with(strategy.name()));
        }
        assert!(roster.build("Aggressive").is_some());
        assert!(roster.build("gambler").is_none());
        assert!(roster.build("model-reckless").is_none());
    }

    #[tokio::test]
    async fn local_strategies_bid_within_range() {
        let roster = Roster::new(Registry::default()).with_seed(7);
        for name in Roster::NAMES.iter().filter(|n| !Roster::is_external(n)) {
            let mut strategy = roster.build(name).unwrap();
            for view in views() {
                let bid = strategy.decide(&view).await.bid();
                assert!(bid <= view.balance(), "{} bid {} over balance {}", name, bid, view.balance());
                assert!(bid <= view.rules().max_bid, "{} bid {} over ceiling", name, bid);
            }
        }
    }
}
