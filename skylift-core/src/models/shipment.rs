#[cfg(test)]
#[path = "../../tests/unit/models/shipment_test.rs"]
mod shipment_test;

use crate::models::common::{Duration, Timestamp, MINUTES_PER_DAY};
use crate::models::network::Airport;
use serde::{Deserialize, Serialize};

/// Represents a shipment order: a quantity of identical packages which have to be
/// moved from an origin airport to a destination airport within the delivery promise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: String,
    /// Origin airport code.
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    /// Creation timestamp, minutes since epoch (UTC).
    pub created: Timestamp,
    /// Amount of packages.
    pub quantity: u32,
}

/// Specifies the delivery promise derived from the continent rule plus a fixed
/// destination processing time.
#[derive(Clone, Debug)]
pub struct SlaPolicy {
    /// Promise for shipments within one continent, in days.
    pub same_continent_days: i64,
    /// Promise for shipments crossing continents, in days.
    pub cross_continent_days: i64,
    /// Fixed processing time at the destination warehouse, in minutes.
    pub processing_time: Duration,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self { same_continent_days: 2, cross_continent_days: 3, processing_time: 120 }
    }
}

impl SlaPolicy {
    /// Returns the policy used by the first generation of the planner: one day within
    /// a continent, two days across.
    pub fn legacy() -> Self {
        Self { same_continent_days: 1, cross_continent_days: 2, ..Self::default() }
    }

    /// Returns the total time budget for a shipment between two airports.
    pub fn budget(&self, origin: &Airport, destination: &Airport) -> Duration {
        let days = if origin.continent == destination.continent {
            self.same_continent_days
        } else {
            self.cross_continent_days
        };

        days * MINUTES_PER_DAY
    }

    /// Returns the latest acceptable arrival timestamp at the destination warehouse:
    /// the package still needs the processing time before the promise expires.
    pub fn latest_arrival(&self, order: &Order, origin: &Airport, destination: &Airport) -> Timestamp {
        order.created + self.budget(origin, destination) - self.processing_time
    }
}
