//! Core crate contains the building blocks of a capacity-aware planner which assigns
//! packages of shipment orders to itineraries across a scheduled ***air-cargo network***.
//!
//! The engine is an ant colony search over a time-expanded flight graph: dated flight
//! instances are expanded lazily, shared capacity state (flight seats and warehouse
//! occupancy) is validated and debited as routes are built, and a pheromone table
//! biases future searches towards historically cheap routes.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
