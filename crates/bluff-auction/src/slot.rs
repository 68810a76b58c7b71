use serde::Deserialize;
use serde::Serialize;

/// One side of the duel.
/// `A` opens the match on the ledger, `B` joins it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const fn both() -> [Self; 2] {
        [Self::A, Self::B]
    }
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

impl TryFrom<&str> for Slot {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            other => Err(format!("unknown slot: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn other_is_involution() {
        for slot in Slot::both() {
            assert_ne!(slot.other(), slot);
            assert_eq!(slot.other().other(), slot);
        }
    }
    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Slot::try_from("a"), Ok(Slot::A));
        assert_eq!(Slot::try_from(" B "), Ok(Slot::B));
        assert!(Slot::try_from("C").is_err());
    }
}
