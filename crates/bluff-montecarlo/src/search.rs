use super::*;
use bluff_auction::AgentView;
use bluff_core::*;
use rand::Rng;

/// Exhaustive expected-utility search over the legal bids of one view.
///
/// Every candidate in `[0, ceiling]` gets exactly `simulations` trials; there
/// is no pruning and no early exit, so a decision costs
/// `candidates × simulations` evaluations and is reproducible for a fixed
/// random stream.
#[derive(Debug, Clone)]
pub struct Search<E = Heuristic> {
    simulations: usize,
    evaluator: E,
}

impl Default for Search<Heuristic> {
    fn default() -> Self {
        Self::new(SIMULATIONS)
    }
}

impl Search<Heuristic> {
    pub fn new(simulations: usize) -> Self {
        Self::with_evaluator(simulations, Heuristic)
    }
}

impl<E> Search<E>
where
    E: Evaluator,
{
    pub fn with_evaluator(simulations: usize, evaluator: E) -> Self {
        Self {
            simulations: simulations.max(1),
            evaluator,
        }
    }
    pub fn simulations(&self) -> usize {
        self.simulations
    }
    pub fn run<R>(&self, view: &AgentView, rng: &mut R) -> Estimate
    where
        R: Rng,
    {
        let model = OpponentModel::build(view.rules(), &view.opponent_bids());
        let ceiling = view.ceiling();
        let table = view
            .rules()
            .bids()
            .take_while(|bid| *bid <= ceiling)
            .map(|candidate| (candidate, self.expect(view, &model, candidate, rng)))
            .collect::<Vec<_>>();
        Estimate::from_table(table)
    }
    fn expect<R>(&self, view: &AgentView, model: &OpponentModel, candidate: Chips, rng: &mut R) -> Utility
    where
        R: Rng,
    {
        let total = (0..self.simulations)
            .map(|_| Trial {
                candidate,
                opponent: model.sample(rng, view.opponent_balance()),
                balance: view.balance(),
                wins: view.wins(),
                opponent_wins: view.opponent_wins(),
            })
            .map(|trial| self.evaluator.evaluate(&trial))
            .sum::<Utility>();
        total / self.simulations as Utility
    }
}
