use bluff_core::Chips;
use bluff_core::Probability;

/// Marker trait for types that form the support of a probability distribution.
///
/// The `Clone` bound enables copying support elements when iterating over
/// distributions.
pub trait Support: Clone {}

impl Support for Chips {}

/// A discrete probability distribution over an ordered support set.
///
/// # Required Methods
///
/// - [`density`](Density::density) — Query probability at a point
/// - [`support`](Density::support) — Iterate over points, in ascending order
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the probability mass at point `x`, or 0 if not in support.
    fn density(&self, x: &Self::Support) -> Probability;
    /// Iterates over all points of the support, in ascending order.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
    /// Total mass. 1.0 for a normalized distribution.
    fn mass(&self) -> Probability {
        self.support().map(|x| self.density(&x)).sum()
    }
    /// First point whose cumulative mass meets or exceeds `draw`.
    /// None only when rounding leaves the total mass short of `draw`.
    fn quantile(&self, draw: Probability) -> Option<Self::Support> {
        let mut accumulated = 0.;
        self.support().find(|x| {
            accumulated += self.density(x);
            accumulated >= draw
        })
    }
}

impl Density for Vec<(Chips, Probability)> {
    type Support = Chips;
    fn density(&self, x: &Self::Support) -> Probability {
        self.iter()
            .find(|(a, _)| a == x)
            .map(|(_, p)| p)
            .copied()
            .unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.iter().map(|(a, _)| a).cloned()
    }
}
