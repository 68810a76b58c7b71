use super::*;
use bluff_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Everything one player is allowed to know when choosing a bid.
///
/// Built fresh for each player each round and never mutated afterwards.
/// Carries the opponent's public balance, wins, and revealed bids, but
/// nothing about how the opponent reasons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentView {
    rules: Rules,
    round: Round,
    balance: Chips,
    wins: u8,
    opponent_balance: Chips,
    opponent_wins: u8,
    history: Vec<Summary>,
}

impl AgentView {
    /// View for `slot` of the settled state and the rounds recorded so far.
    pub fn observe(slot: Slot, snapshot: &Snapshot, history: &[RoundRecord], rules: Rules) -> Self {
        let mine = snapshot.seat(slot);
        let theirs = snapshot.seat(slot.other());
        Self {
            rules,
            round: snapshot.round,
            balance: mine.balance,
            wins: mine.wins,
            opponent_balance: theirs.balance,
            opponent_wins: theirs.wins,
            history: history.iter().map(|r| r.summary(slot)).collect(),
        }
    }
    /// First-round view with both players holding their deposit.
    pub fn opening(rules: Rules) -> Self {
        Self {
            rules,
            round: 1,
            balance: rules.deposit,
            wins: 0,
            opponent_balance: rules.deposit,
            opponent_wins: 0,
            history: Vec::new(),
        }
    }
    pub fn with_round(self, round: Round) -> Self {
        Self { round, ..self }
    }
    pub fn with_balance(self, balance: Chips) -> Self {
        Self { balance, ..self }
    }
    pub fn with_opponent_balance(self, opponent_balance: Chips) -> Self {
        Self {
            opponent_balance,
            ..self
        }
    }
    pub fn with_wins(self, wins: u8, opponent_wins: u8) -> Self {
        Self {
            wins,
            opponent_wins,
            ..self
        }
    }
    /// Replaces history with `(mine, theirs)` bid pairs, numbered from round 1.
    pub fn with_history(self, pairs: &[(Chips, Chips)]) -> Self {
        let history = pairs
            .iter()
            .enumerate()
            .map(|(i, &(mine, theirs))| Summary {
                round: i as Round + 1,
                mine,
                theirs,
                result: Outcome::resolve(mine, theirs).duel(Slot::A),
            })
            .collect();
        Self { history, ..self }
    }
}

impl AgentView {
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn balance(&self) -> Chips {
        self.balance
    }
    pub fn wins(&self) -> u8 {
        self.wins
    }
    pub fn opponent_balance(&self) -> Chips {
        self.opponent_balance
    }
    pub fn opponent_wins(&self) -> u8 {
        self.opponent_wins
    }
    pub fn history(&self) -> &[Summary] {
        &self.history
    }
    /// Opponent's revealed bids, oldest first.
    pub fn opponent_bids(&self) -> Vec<Chips> {
        self.history.iter().map(|s| s.theirs).collect()
    }
    /// Largest bid this player may place right now.
    pub fn ceiling(&self) -> Chips {
        self.rules.ceiling(self.balance)
    }
    pub fn clamp(&self, bid: Chips) -> Chips {
        self.rules.clamp(bid, self.balance)
    }
    pub fn is_legal(&self, bid: Chips) -> bool {
        self.rules.is_legal(bid, self.balance)
    }
    pub fn is_behind(&self) -> bool {
        self.opponent_wins > self.wins
    }
    pub fn is_final(&self) -> bool {
        self.rules.is_final(self.round)
    }
    /// Either side already holds a majority, so the remaining rounds
    /// cannot change the winner on wins.
    pub fn is_decided(&self) -> bool {
        let majority = self.rules.majority();
        self.wins >= majority || self.opponent_wins >= majority
    }
}

impl std::fmt::Display for AgentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "round {} of {}", self.round, self.rules.rounds)?;
        writeln!(f, "your balance {} | opponent balance {}", self.balance, self.opponent_balance)?;
        writeln!(f, "your wins {} | opponent wins {}", self.wins, self.opponent_wins)?;
        for summary in &self.history {
            writeln!(f, "{}", summary)?;
        }
        write!(f, "legal bids 0..={} in steps of {}", self.ceiling(), self.rules.step)
    }
}
