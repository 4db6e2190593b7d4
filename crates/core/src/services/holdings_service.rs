use std::cmp::Ordering;

use crate::models::holding::{Holding, HoldingSortKey};

/// Ranks and derives figures from the holdings list.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct HoldingsService;

impl HoldingsService {
    pub fn new() -> Self {
        Self
    }

    /// Produce a new list sorted descending by the chosen field.
    ///
    /// The input is not mutated. The sort is stable, so ties keep their
    /// original relative order, and ranking an already-ranked list is a
    /// no-op. An empty list yields an empty list.
    #[must_use]
    pub fn rank(&self, holdings: &[Holding], key: HoldingSortKey) -> Vec<Holding> {
        let mut ranked = holdings.to_vec();
        ranked.sort_by(|a, b| {
            let (a, b) = match key {
                HoldingSortKey::Value => (a.value, b.value),
                HoldingSortKey::Change => (a.change, b.change),
                HoldingSortKey::Allocation => (a.allocation, b.allocation),
            };
            // Descending; NaN sorts as equal rather than poisoning the order
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
        ranked
    }

    /// Sum of all position values.
    #[must_use]
    pub fn total_value(&self, holdings: &[Holding]) -> f64 {
        holdings.iter().map(|h| h.value).sum()
    }

    /// Recompute each holding's allocation as its share of the total
    /// portfolio value, in percent. Allocations sum to ~100 afterwards
    /// (floating-point drift aside). A zero-value portfolio gets all
    /// zero allocations.
    pub fn recompute_allocations(&self, holdings: &mut [Holding]) {
        let total = self.total_value(holdings);
        for holding in holdings.iter_mut() {
            holding.allocation = if total > 0.0 {
                (holding.value / total) * 100.0
            } else {
                0.0
            };
        }
    }
}

impl Default for HoldingsService {
    fn default() -> Self {
        Self::new()
    }
}
