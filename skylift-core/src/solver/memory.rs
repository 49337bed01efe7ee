#[cfg(test)]
#[path = "../../tests/unit/solver/memory_test.rs"]
mod memory_test;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// A route proven feasible at least once, stored in its replayable form: the ordered
/// flight template keys. Dated instances are re-derived against current capacity
/// state when the route is replayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorizedRoute {
    /// Ordered natural keys of the flight templates taken.
    pub template_keys: Vec<String>,
}

/// Caches previously validated itineraries per origin-destination pair. Consulted
/// when a live search fails and persisted across planning runs, so that once a route
/// is proven feasible it can be replayed without re-searching.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteMemory {
    entries: FxHashMap<String, Vec<MemorizedRoute>>,
    seen: FxHashSet<String>,
}

impl RouteMemory {
    /// Builds the canonical key of a concrete routed itinerary:
    /// origin, destination and the ordered dated instance tags.
    pub fn canonical_key(origin: &str, destination: &str, instance_tags: &[String]) -> String {
        format!("{origin}>{destination}:{}", instance_tags.join("|"))
    }

    /// Records a newly discovered feasible route. Returns false when the very same
    /// itinerary (canonical key) or the same template sequence is already known.
    pub fn record(
        &mut self,
        origin: &str,
        destination: &str,
        template_keys: Vec<String>,
        canonical_key: String,
    ) -> bool {
        if !self.seen.insert(canonical_key) {
            return false;
        }

        let routes = self.entries.entry(Self::pair_key(origin, destination)).or_default();
        let route = MemorizedRoute { template_keys };
        if routes.contains(&route) {
            return false;
        }

        routes.push(route);
        true
    }

    /// Returns all known routes for an origin-destination pair.
    pub fn routes_for(&self, origin: &str, destination: &str) -> &[MemorizedRoute] {
        self.entries.get(&Self::pair_key(origin, destination)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns total amount of memorized routes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Checks whether the memory holds no route.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn pair_key(origin: &str, destination: &str) -> String {
        format!("{origin}>{destination}")
    }
}
