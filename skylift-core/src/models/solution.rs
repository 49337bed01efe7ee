use crate::models::common::{Cost, InstanceIdx, Timestamp};
use serde::Serialize;

/// Represents one taken flight leg of a package route.
#[derive(Clone, Debug)]
pub struct Leg {
    /// Dated flight instance the leg rides on.
    pub instance: InstanceIdx,
    /// Absolute departure timestamp.
    pub departure: Timestamp,
    /// Absolute arrival timestamp.
    pub arrival: Timestamp,
    /// Heuristic cost accumulated by taking this leg.
    pub cost: Cost,
}

/// Represents an itinerary from an origin to a destination airport.
#[derive(Clone, Debug, Default)]
pub struct Route {
    /// Ordered legs of the itinerary.
    pub legs: Vec<Leg>,
}

impl Route {
    /// Returns total heuristic cost of the route.
    pub fn total_cost(&self) -> Cost {
        self.legs.iter().map(|leg| leg.cost).sum()
    }

    /// Returns the final arrival timestamp, if any leg was taken.
    pub fn arrival(&self) -> Option<Timestamp> {
        self.legs.last().map(|leg| leg.arrival)
    }
}

/// Specifies a per order planning outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    /// All packages of the order got a feasible itinerary.
    #[serde(rename = "PLANIFICADO")]
    Planned,
    /// No feasible assignment exists under current capacity and time constraints.
    #[serde(rename = "NO_FACTIBLE")]
    NotFeasible,
}

/// Represents one routed chunk of an order.
#[derive(Clone, Debug, Serialize)]
pub struct Split {
    /// Amount of packages routed together.
    pub quantity: u32,
    /// Total heuristic cost of the chunk itinerary.
    pub cost: Cost,
    /// Reconstructible tags of the dated flight instances taken, in order.
    pub legs: Vec<String>,
}

/// Represents a planning outcome of a single order.
#[derive(Clone, Debug, Serialize)]
pub struct OrderPlan {
    /// Order identifier.
    pub order_id: String,
    /// Outcome status.
    pub status: PlanStatus,
    /// Routed chunks; empty for infeasible orders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<Split>,
    /// Failure reason for infeasible orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Represents the structured report of one planning run.
#[derive(Clone, Debug, Serialize)]
pub struct PlanResult {
    /// Per order outcomes, in input order.
    pub orders: Vec<OrderPlan>,
    /// Amount of planned orders.
    pub planned: usize,
    /// Amount of infeasible orders.
    pub infeasible: usize,
    /// Total heuristic cost over all planned splits.
    pub total_cost: Cost,
    /// Total quantity of delivered packages.
    pub delivered_quantity: u64,
}
