use bluff_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Outcome of a search: the chosen bid, its expected utility, and the
/// expected utility of every candidate in ascending bid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    best: Chips,
    utility: Utility,
    table: Vec<(Chips, Utility)>,
}

impl Estimate {
    /// Highest expected utility wins; the earliest candidate keeps ties.
    pub fn from_table(table: Vec<(Chips, Utility)>) -> Self {
        let (best, utility) = table
            .iter()
            .fold(None::<(Chips, Utility)>, |best, &(bid, eu)| match best {
                Some((_, top)) if eu <= top => best,
                _ => Some((bid, eu)),
            })
            .unwrap_or((0, 0.));
        Self {
            best,
            utility,
            table,
        }
    }
    pub fn best(&self) -> Chips {
        self.best
    }
    pub fn utility(&self) -> Utility {
        self.utility
    }
    pub fn table(&self) -> &[(Chips, Utility)] {
        &self.table
    }
    pub fn expected(&self, bid: Chips) -> Option<Utility> {
        self.table.iter().find(|(b, _)| *b == bid).map(|(_, eu)| *eu)
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EU {:.2} [", self.utility)?;
        for (i, (bid, eu)) in self.table.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{:.1}", bid, eu)?;
        }
        write!(f, "]")
    }
}
