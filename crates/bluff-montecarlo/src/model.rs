use super::*;
use bluff_auction::Rules;
use bluff_core::*;
use rand::Rng;

/// Smoothed empirical distribution over an opponent's revealed bids.
///
/// Every bid on the legal grid starts with weight [`LAPLACE_PRIOR`], each
/// revealed bid adds one, and the weights are normalized. No legal bid ever
/// has zero probability, and an empty history yields the uniform
/// distribution. Revealed values off the grid are ignored.
///
/// Each player builds its own model from its own view every round; models
/// are never shared or updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentModel {
    weights: Vec<(Chips, Probability)>,
}

impl OpponentModel {
    pub fn build(rules: &Rules, history: &[Chips]) -> Self {
        let mut weights = rules
            .bids()
            .map(|bid| (bid, LAPLACE_PRIOR))
            .collect::<Vec<_>>();
        for bid in history {
            if let Some((_, w)) = weights.iter_mut().find(|(b, _)| b == bid) {
                *w += 1.;
            }
        }
        let total = weights.iter().map(|(_, w)| w).sum::<Probability>();
        weights.iter_mut().for_each(|(_, w)| *w /= total);
        Self { weights }
    }
    /// Draws a plausible opponent bid, capped at what they can afford.
    pub fn sample<R>(&self, rng: &mut R, opponent_balance: Chips) -> Chips
    where
        R: Rng,
    {
        let draw = rng.random::<Probability>();
        self.quantile(draw)
            .or_else(|| self.weights.last().map(|(b, _)| *b))
            .unwrap_or(0)
            .min(opponent_balance)
    }
    pub fn probabilities(&self) -> &[(Chips, Probability)] {
        &self.weights
    }
}

impl Density for OpponentModel {
    type Support = Chips;
    fn density(&self, x: &Self::Support) -> Probability {
        self.weights.density(x)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.weights.support()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    const TOLERANCE: Probability = 1e-9;
    #[test]
    fn empty_history_is_uniform() {
        let model = OpponentModel::build(&Rules::default(), &[]);
        assert!((model.mass() - 1.0).abs() < TOLERANCE);
        for bid in 0..=5 {
            assert!((model.density(&bid) - 1. / 6.).abs() < TOLERANCE);
        }
    }
    #[test]
    fn history_adds_weight() {
        let model = OpponentModel::build(&Rules::default(), &[5, 5, 5]);
        assert!((model.mass() - 1.0).abs() < TOLERANCE);
        assert!((model.density(&5) - 4. / 9.).abs() < TOLERANCE);
        assert!((model.density(&0) - 1. / 9.).abs() < TOLERANCE);
    }
    #[test]
    fn mass_is_one_for_any_history() {
        let rules = Rules::default();
        for len in 0..20 {
            let history = (0..len).map(|i| (i * 7 % 9) as Chips).collect::<Vec<_>>();
            let model = OpponentModel::build(&rules, &history);
            assert!((model.mass() - 1.0).abs() < TOLERANCE, "len {}", len);
            assert!(model.support().all(|b| model.density(&b) > 0.));
        }
    }
    #[test]
    fn off_grid_bids_are_ignored() {
        let model = OpponentModel::build(&Rules::default(), &[9, 42]);
        assert_eq!(model, OpponentModel::build(&Rules::default(), &[]));
    }
    #[test]
    fn samples_respect_opponent_balance() {
        let model = OpponentModel::build(&Rules::default(), &[5, 5, 5, 5]);
        let ref mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(model.sample(rng, 2) <= 2);
            assert!(model.sample(rng, 20) <= 5);
        }
    }
    #[test]
    fn samples_follow_frequencies() {
        let model = OpponentModel::build(&Rules::default(), &[5; 30]);
        let ref mut rng = SmallRng::seed_from_u64(11);
        let fives = (0..2000).filter(|_| model.sample(rng, 20) == 5).count();
        assert!(fives > 1400, "expected mostly fives, got {}", fives);
    }
}
