#[cfg(test)]
#[path = "../../tests/unit/construction/pheromone_test.rs"]
mod pheromone_test;

use crate::construction::FlightInstanceId;
use crate::models::Cost;
use rustc_hash::FxHashMap;

/// A mapping from flight instance identity to a positive weight which biases future
/// route searches towards previously successful choices. Entries evaporate every
/// planning iteration and get reinforced by routes which reached their destination.
pub struct PheromoneTable {
    values: FxHashMap<FlightInstanceId, f64>,
    initial: f64,
    floor: f64,
    evaporation: f64,
    learning_rate: f64,
}

impl PheromoneTable {
    /// Creates a new table.
    pub fn new(initial: f64, floor: f64, evaporation: f64, learning_rate: f64) -> Self {
        debug_assert!(floor > 0. && initial >= floor);
        debug_assert!((0. ..1.).contains(&evaporation));

        Self { values: FxHashMap::default(), initial, floor, evaporation, learning_rate }
    }

    /// Returns the pheromone weight of a flight instance.
    pub fn get(&self, id: &FlightInstanceId) -> f64 {
        self.values.get(id).copied().unwrap_or(self.initial)
    }

    /// Multiplies every entry by `1 - evaporation`, clamped to the floor so that no
    /// instance is ever permanently locked out.
    pub fn evaporate(&mut self) {
        let (keep, floor) = (1. - self.evaporation, self.floor);
        self.values.values_mut().for_each(|value| *value = (*value * keep).max(floor));
    }

    /// Reinforces every instance of a successful route proportionally to the inverse
    /// route cost, so cheap routes are favored more strongly.
    pub fn reinforce(&mut self, route: &[FlightInstanceId], total_cost: Cost) {
        let deposit = self.learning_rate / total_cost.max(f64::EPSILON);

        for id in route {
            let value = self.values.entry(*id).or_insert(self.initial);
            *value += deposit;
        }
    }

    /// Returns amount of touched entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether no entry was touched yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
