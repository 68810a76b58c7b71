use super::*;
use bluff_core::*;
use serde::Deserialize;
use serde::Serialize;

/// A settled round. Appended once, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundRecord {
    round: Round,
    bids: [Chips; 2],
    balances: [Chips; 2],
    winner: Outcome,
}

impl RoundRecord {
    /// Winner follows from the bids alone; balances are post-round.
    pub fn new(round: Round, bids: [Chips; 2], balances: [Chips; 2]) -> Self {
        Self {
            round,
            bids,
            balances,
            winner: Outcome::resolve(bids[0], bids[1]),
        }
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn bid(&self, slot: Slot) -> Chips {
        self.bids[slot.index()]
    }
    pub fn balance(&self, slot: Slot) -> Chips {
        self.balances[slot.index()]
    }
    pub fn bids(&self) -> [Chips; 2] {
        self.bids
    }
    pub fn balances(&self) -> [Chips; 2] {
        self.balances
    }
    pub fn winner(&self) -> Outcome {
        self.winner
    }
    /// This round as `slot` remembers it.
    pub fn summary(&self, slot: Slot) -> Summary {
        Summary {
            round: self.round,
            mine: self.bid(slot),
            theirs: self.bid(slot.other()),
            result: self.winner.duel(slot),
        }
    }
}

impl std::fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "round {}: A bid {} B bid {} -> {} (balances {} / {})",
            self.round, self.bids[0], self.bids[1], self.winner, self.balances[0], self.balances[1]
        )
    }
}

/// One past round from a single player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Summary {
    pub round: Round,
    pub mine: Chips,
    pub theirs: Chips,
    pub result: Duel,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "round {}: you bid {}, opponent bid {} -> {}",
            self.round, self.mine, self.theirs, self.result
        )
    }
}

/// Final verdict plus the full round history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    winner: Outcome,
    wins: [u8; 2],
    balances: [Chips; 2],
    rounds: Vec<RoundRecord>,
}

impl MatchResult {
    /// Verdict from the settled seats; history is carried for observers.
    pub fn new(seats: [Seat; 2], rounds: Vec<RoundRecord>) -> Self {
        let wins = seats.map(|s| s.wins);
        let balances = seats.map(|s| s.balance);
        Self {
            winner: Outcome::verdict(wins, balances),
            wins,
            balances,
            rounds,
        }
    }
    /// Rebuilds a verdict from history alone, for consumers that only kept
    /// the round log. Balances fall back to the deposit before any round.
    pub fn replay(deposit: Chips, rounds: Vec<RoundRecord>) -> Self {
        let wins = rounds
            .iter()
            .filter_map(|r| r.winner().winner())
            .fold([0u8; 2], |mut wins, slot| {
                wins[slot.index()] += 1;
                wins
            });
        let balances = rounds
            .last()
            .map(RoundRecord::balances)
            .unwrap_or([deposit; 2]);
        let seats = [
            Seat {
                balance: balances[0],
                wins: wins[0],
            },
            Seat {
                balance: balances[1],
                wins: wins[1],
            },
        ];
        Self::new(seats, rounds)
    }
    pub fn winner(&self) -> Outcome {
        self.winner
    }
    pub fn wins(&self, slot: Slot) -> u8 {
        self.wins[slot.index()]
    }
    pub fn balance(&self, slot: Slot) -> Chips {
        self.balances[slot.index()]
    }
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}-{}, balances {} / {})",
            self.winner, self.wins[0], self.wins[1], self.balances[0], self.balances[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn scenario(deposit: Chips, bids: &[(Chips, Chips)]) -> Vec<RoundRecord> {
        let mut balances = [deposit; 2];
        bids.iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                balances = [balances[0] - a, balances[1] - b];
                RoundRecord::new(i as Round + 1, [a, b], balances)
            })
            .collect()
    }
    #[test]
    fn majority_wins_regardless_of_balance() {
        let rounds = scenario(20, &[(3, 4), (2, 2), (4, 3), (3, 4), (4, 5)]);
        let result = MatchResult::replay(20, rounds);
        assert_eq!(result.wins(Slot::A), 1);
        assert_eq!(result.wins(Slot::B), 3);
        assert_eq!(result.winner(), Outcome::Won(Slot::B));
        assert_eq!(result.balance(Slot::A), 4);
        assert_eq!(result.balance(Slot::B), 2);
        assert_eq!(result.rounds()[1].winner(), Outcome::Tie);
    }
    #[test]
    fn level_wins_fall_back_to_balance() {
        let rounds = scenario(20, &[(5, 0), (0, 1), (0, 0)]);
        let result = MatchResult::replay(20, rounds);
        assert_eq!(result.wins(Slot::A), 1);
        assert_eq!(result.wins(Slot::B), 1);
        assert_eq!(result.winner(), Outcome::Won(Slot::B));
    }
    #[test]
    fn empty_history_is_a_tie() {
        let result = MatchResult::replay(20, Vec::new());
        assert_eq!(result.winner(), Outcome::Tie);
        assert_eq!(result.balance(Slot::A), 20);
    }
    #[test]
    fn summaries_are_perspective_swapped() {
        let record = RoundRecord::new(1, [3, 4], [17, 16]);
        let a = record.summary(Slot::A);
        let b = record.summary(Slot::B);
        assert_eq!((a.mine, a.theirs, a.result), (3, 4, Duel::Lost));
        assert_eq!((b.mine, b.theirs, b.result), (4, 3, Duel::Won));
    }
    #[test]
    fn records_serialize_for_observers() {
        let record = RoundRecord::new(2, [2, 2], [15, 14]);
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"round\":2"));
        assert!(json.contains("Tie"));
    }
}
