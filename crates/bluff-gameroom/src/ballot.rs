use bluff_core::*;
use sha2::Digest;
use sha2::Sha256;

/// Random blinding bytes kept private until reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; 32]);

impl Nonce {
    pub fn random() -> Self {
        Self(rand::random())
    }
    pub fn bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Nonce {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Binding, hiding digest of a bid: SHA-256 over the big-endian bid
/// followed by the nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub fn of(bid: Chips, nonce: &Nonce) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bid.to_be_bytes());
        hasher.update(nonce.bytes());
        Self(hasher.finalize().into())
    }
    /// Does `(bid, nonce)` open this commitment?
    pub fn opens(&self, bid: Chips, nonce: &Nonce) -> bool {
        *self == Self::of(bid, nonce)
    }
    pub fn bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0[..6] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "…")
    }
}

/// A bid sealed with a fresh nonce. Lives only inside the engine for the
/// duration of one round.
#[derive(Debug, Clone, Copy)]
pub struct Ballot {
    bid: Chips,
    nonce: Nonce,
}

impl Ballot {
    pub fn seal(bid: Chips) -> Self {
        Self {
            bid,
            nonce: Nonce::random(),
        }
    }
    pub fn bid(&self) -> Chips {
        self.bid
    }
    pub fn nonce(&self) -> Nonce {
        self.nonce
    }
    pub fn commitment(&self) -> Commitment {
        Commitment::of(self.bid, &self.nonce)
    }
}
