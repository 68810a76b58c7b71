use bluff_core::*;

/// One simulated round from the deciding player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub candidate: Chips,
    pub opponent: Chips,
    pub balance: Chips,
    pub wins: u8,
    pub opponent_wins: u8,
}

impl Trial {
    pub fn won(&self) -> bool {
        self.candidate > self.opponent
    }
    pub fn lost(&self) -> bool {
        self.candidate < self.opponent
    }
    /// Round wins after the simulated round, (mine, theirs).
    pub fn standings(&self) -> (u8, u8) {
        match (self.won(), self.lost()) {
            (true, _) => (self.wins + 1, self.opponent_wins),
            (_, true) => (self.wins, self.opponent_wins + 1),
            _ => (self.wins, self.opponent_wins),
        }
    }
    /// Balance after paying the candidate bid.
    pub fn remaining(&self) -> Chips {
        self.balance.saturating_sub(self.candidate)
    }
}

/// Scores a simulated round.
pub trait Evaluator {
    fn evaluate(&self, trial: &Trial) -> Utility;
}

/// Fixed heuristic favoring match position, then the round, then capital:
///
/// - +[`UTILITY_AHEAD`] when ahead on wins after the round, +[`UTILITY_LEVEL`] when level
/// - +[`UTILITY_ROUND`] when the candidate takes the round
/// - +[`UTILITY_CONSERVATION`] per unit of balance left
/// - −candidate when the round is lost or tied
///
/// The weights are empirical and kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heuristic;

impl Evaluator for Heuristic {
    fn evaluate(&self, trial: &Trial) -> Utility {
        let (mine, theirs) = trial.standings();
        let position = match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => UTILITY_AHEAD,
            std::cmp::Ordering::Equal => UTILITY_LEVEL,
            std::cmp::Ordering::Less => 0.,
        };
        let round = if trial.won() { UTILITY_ROUND } else { 0. };
        let capital = trial.remaining() as Utility * UTILITY_CONSERVATION;
        let waste = if trial.won() {
            0.
        } else {
            trial.candidate as Utility
        };
        position + round + capital - waste
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn trial(candidate: Chips, opponent: Chips) -> Trial {
        Trial {
            candidate,
            opponent,
            balance: 10,
            wins: 1,
            opponent_wins: 1,
        }
    }
    #[test]
    fn winning_round_takes_lead() {
        // ahead 100 + round 20 + 2 * (10 - 3) = 134
        assert_eq!(Heuristic.evaluate(&trial(3, 2)), 134.);
    }
    #[test]
    fn tied_round_pays_without_reward() {
        // level 50 + 2 * (10 - 3) - 3 = 61
        assert_eq!(Heuristic.evaluate(&trial(3, 3)), 61.);
    }
    #[test]
    fn lost_round_falls_behind() {
        // behind 0 + 2 * (10 - 2) - 2 = 14
        assert_eq!(Heuristic.evaluate(&trial(2, 4)), 14.);
    }
    #[test]
    fn zero_bid_against_zero_is_level() {
        // level 50 + 2 * 10 = 70
        assert_eq!(Heuristic.evaluate(&trial(0, 0)), 70.);
    }
    #[test]
    fn standings_track_round_result() {
        assert_eq!(trial(3, 2).standings(), (2, 1));
        assert_eq!(trial(2, 3).standings(), (1, 2));
        assert_eq!(trial(2, 2).standings(), (1, 1));
    }
}
