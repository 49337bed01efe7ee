#[cfg(test)]
#[path = "../../tests/unit/construction/heuristics_test.rs"]
mod heuristics_test;

use crate::construction::WorldState;
use crate::models::{AirportIdx, Cost, Duration, InstanceIdx, Timestamp};
use crate::utils::great_circle_distance;

/// Lower bound for any leg cost: keeps the inverse cost desirability finite.
const MIN_LEG_COST: Cost = 1E-3;

/// Specifies the evaluation context of a candidate leg: where the package currently
/// is in time, where it finally has to go and when it has to be there.
#[derive(Clone, Copy, Debug)]
pub struct LegContext {
    /// Current package timestamp.
    pub current_time: Timestamp,
    /// Final destination airport.
    pub destination: AirportIdx,
    /// Latest acceptable arrival at the final destination.
    pub latest_arrival: Timestamp,
}

/// Computes a strictly positive scalar cost of taking a candidate flight instance
/// towards the package destination; `1/cost` is the heuristic desirability.
pub trait LegCost: Send + Sync {
    /// Estimates the cost of the candidate leg.
    fn estimate(&self, world: &WorldState, candidate: InstanceIdx, ctx: &LegContext) -> Cost;
}

/// The first generation two factor cost: normalized flight time to the next hop plus
/// normalized great circle distance left to the final destination, inflated by the
/// flight load factor so that crowded flights look less attractive.
pub struct DistanceLoadCost {
    /// Reference flight duration for normalization, in minutes.
    pub reference_duration: Duration,
    /// Reference remaining distance for normalization, in km.
    pub reference_distance: f64,
}

impl Default for DistanceLoadCost {
    fn default() -> Self {
        Self { reference_duration: 12 * 60, reference_distance: 10_000. }
    }
}

impl LegCost for DistanceLoadCost {
    fn estimate(&self, world: &WorldState, candidate: InstanceIdx, ctx: &LegContext) -> Cost {
        let instance = world.instance(candidate);
        let (next, goal) = (world.airport(instance.destination), world.airport(ctx.destination));

        let flight_time = normalize((instance.arrival - instance.departure) as f64, self.reference_duration as f64);
        let remaining = normalize(
            great_circle_distance(next.latitude, next.longitude, goal.latitude, goal.longitude),
            self.reference_distance,
        );
        let load_factor = 1. + instance.utilization();

        ((flight_time + remaining) * load_factor).max(MIN_LEG_COST)
    }
}

/// Weight set of the multi factor cost.
#[derive(Clone, Debug)]
pub struct CostWeights {
    /// Weight of the normalized ETA term.
    pub time: f64,
    /// Weight of the normalized connection wait term.
    pub wait: f64,
    /// Weight of the SLA risk term.
    pub sla: f64,
    /// Weight of the congestion penalty term.
    pub congestion: f64,
    /// Flat per hop weight.
    pub hops: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { time: 1., wait: 0.5, sla: 2., congestion: 1.5, hops: 0.3 }
    }
}

/// The refined multi factor cost: ETA, connection wait, SLA risk and congestion,
/// plus a flat hop charge.
pub struct CompositeCost {
    /// Term weights.
    pub weights: CostWeights,
    /// Reference duration for normalization, in minutes.
    pub reference_duration: Duration,
    /// Utilization threshold below which congestion is free.
    pub congestion_threshold: f64,
    /// Quadratic growth factor of the congestion penalty.
    pub congestion_gamma: f64,
    /// Assumed cruise speed for the forward flight time estimate, in km/h.
    pub cruise_speed: f64,
}

impl Default for CompositeCost {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            reference_duration: 12 * 60,
            congestion_threshold: 0.7,
            congestion_gamma: 4.,
            cruise_speed: 900.,
        }
    }
}

impl CompositeCost {
    /// Returns the congestion penalty for given utilization: zero below the
    /// threshold, quadratic above it.
    pub fn congestion_penalty(&self, utilization: f64) -> f64 {
        let over = utilization - self.congestion_threshold;
        if over <= 0. {
            0.
        } else {
            self.congestion_gamma * over * over
        }
    }

    /// Returns the fractional SLA overrun of the best known forward estimate from the
    /// candidate arrival towards the final destination, zero when within budget.
    pub fn sla_risk(&self, world: &WorldState, candidate: InstanceIdx, ctx: &LegContext) -> f64 {
        let instance = world.instance(candidate);
        let (next, goal) = (world.airport(instance.destination), world.airport(ctx.destination));

        let forward_km = great_circle_distance(next.latitude, next.longitude, goal.latitude, goal.longitude);
        let forward_estimate = (forward_km / self.cruise_speed * 60.).round() as Duration;

        let projected = instance.arrival + forward_estimate;
        let budget = (ctx.latest_arrival - ctx.current_time).max(1);
        let overrun = projected - ctx.latest_arrival;

        if overrun <= 0 {
            0.
        } else {
            overrun as f64 / budget as f64
        }
    }
}

impl LegCost for CompositeCost {
    fn estimate(&self, world: &WorldState, candidate: InstanceIdx, ctx: &LegContext) -> Cost {
        let instance = world.instance(candidate);

        let eta = normalize((instance.arrival - ctx.current_time) as f64, self.reference_duration as f64);
        let wait = normalize((instance.departure - ctx.current_time) as f64, self.reference_duration as f64);
        let sla = self.sla_risk(world, candidate, ctx);
        let congestion = self.congestion_penalty(instance.utilization());

        let w = &self.weights;
        (w.time * eta + w.wait * wait + w.sla * sla + w.congestion * congestion + w.hops).max(MIN_LEG_COST)
    }
}

/// Maps a non-negative measure into `[0, ~2]` against a reference value.
fn normalize(value: f64, reference: f64) -> f64 {
    (value / reference.max(1.)).clamp(0., 2.)
}
