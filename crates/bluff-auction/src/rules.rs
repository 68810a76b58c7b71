use bluff_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Match parameters shared by the ledger, the engine, and every strategy.
///
/// Bids live on the grid `0, step, 2·step, ... ≤ max_bid`; a player can never
/// bid more than they hold. Units are abstract; any display scaling belongs
/// to whoever renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    pub rounds: Round,
    pub deposit: Chips,
    pub max_bid: Chips,
    pub step: Chips,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rounds: ROUNDS,
            deposit: DEPOSIT,
            max_bid: MAX_BID,
            step: BID_STEP,
        }
    }
}

impl Rules {
    /// Defaults overridden by `BLUFF_ROUNDS`, `BLUFF_DEPOSIT`,
    /// `BLUFF_MAX_BID`, and `BLUFF_STEP`. Values that would leave the
    /// rules unplayable are ignored.
    pub fn from_env() -> Self {
        let base = Self::default();
        let rules = Self {
            rounds: env("BLUFF_ROUNDS").unwrap_or(base.rounds),
            deposit: env("BLUFF_DEPOSIT").unwrap_or(base.deposit),
            max_bid: env("BLUFF_MAX_BID").unwrap_or(base.max_bid),
            step: env("BLUFF_STEP").unwrap_or(base.step),
        };
        match rules.validate() {
            Ok(()) => rules,
            Err(e) => {
                log::warn!("[config] ignoring environment overrides: {}", e);
                base
            }
        }
    }
    pub fn validate(&self) -> Result<(), String> {
        if self.rounds == 0 {
            return Err(String::from("a match needs at least one round"));
        }
        if self.step == 0 {
            return Err(String::from("bid step must be positive"));
        }
        if self.max_bid < self.step {
            return Err(format!(
                "max bid {} is below bid step {}",
                self.max_bid, self.step
            ));
        }
        if self.max_bid > self.deposit {
            return Err(format!(
                "max bid {} exceeds deposit {}",
                self.max_bid, self.deposit
            ));
        }
        Ok(())
    }
    /// Every bid the grid allows, ascending, ignoring balance.
    pub fn bids(&self) -> impl Iterator<Item = Chips> + use<> {
        (0..=self.max_bid).step_by(self.step.max(1) as usize)
    }
    /// Largest legal bid for a player holding `balance`.
    pub fn ceiling(&self, balance: Chips) -> Chips {
        self.snap(self.max_bid.min(balance))
    }
    /// Nearest legal bid at or below `bid` for a player holding `balance`.
    pub fn clamp(&self, bid: Chips, balance: Chips) -> Chips {
        self.snap(bid.min(self.ceiling(balance)))
    }
    pub fn is_legal(&self, bid: Chips, balance: Chips) -> bool {
        bid <= self.ceiling(balance) && bid % self.step.max(1) == 0
    }
    /// Round wins that guarantee the match regardless of what follows.
    pub fn majority(&self) -> u8 {
        self.rounds / 2 + 1
    }
    pub fn is_final(&self, round: Round) -> bool {
        round >= self.rounds
    }
    /// A fraction of the ceiling, for strategies that think in proportions.
    pub fn fraction(&self, numerator: Chips, denominator: Chips) -> Chips {
        let scaled = self.max_bid as u64 * numerator as u64 / denominator.max(1) as u64;
        self.snap(Chips::try_from(scaled).unwrap_or(Chips::MAX))
    }
    fn snap(&self, bid: Chips) -> Chips {
        bid - bid % self.step.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_rules_are_valid() {
        let rules = Rules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.majority(), 3);
        assert_eq!(rules.bids().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }
    #[test]
    fn clamp_respects_balance_and_ceiling() {
        let rules = Rules::default();
        assert_eq!(rules.clamp(9, 20), 5);
        assert_eq!(rules.clamp(4, 2), 2);
        assert_eq!(rules.clamp(3, 0), 0);
        assert_eq!(rules.clamp(0, 20), 0);
    }
    #[test]
    fn clamp_snaps_to_step() {
        let rules = Rules {
            rounds: 5,
            deposit: 40,
            max_bid: 25,
            step: 5,
        };
        assert_eq!(rules.bids().collect::<Vec<_>>(), vec![0, 5, 10, 15, 20, 25]);
        assert_eq!(rules.clamp(13, 40), 10);
        assert_eq!(rules.clamp(25, 12), 10);
        assert!(rules.is_legal(15, 15));
        assert!(!rules.is_legal(14, 15));
        assert!(!rules.is_legal(20, 15));
    }
    #[test]
    fn invalid_rules_are_reported() {
        let mut rules = Rules::default();
        rules.step = 0;
        assert!(rules.validate().is_err());
        rules.step = 10;
        assert!(rules.validate().is_err());
        rules = Rules::default();
        rules.rounds = 0;
        assert!(rules.validate().is_err());
        rules = Rules::default();
        rules.max_bid = rules.deposit + 1;
        assert!(rules.validate().is_err());
        rules.max_bid = rules.deposit;
        assert!(rules.validate().is_ok());
    }
    #[test]
    fn fractions_of_ceiling() {
        let rules = Rules::default();
        assert_eq!(rules.fraction(4, 5), 4);
        assert_eq!(rules.fraction(2, 5), 2);
        assert_eq!(rules.fraction(1, 1), 5);
    }
    #[test]
    fn fractions_of_huge_ceiling_do_not_overflow() {
        let rules = Rules {
            rounds: 5,
            deposit: Chips::MAX,
            max_bid: 2_000_000_000,
            step: 1,
        };
        assert!(rules.validate().is_ok());
        assert_eq!(rules.fraction(4, 5), 1_600_000_000);
        assert_eq!(rules.fraction(1, 1), 2_000_000_000);
        assert_eq!(rules.fraction(5, 1), Chips::MAX);
    }
}
