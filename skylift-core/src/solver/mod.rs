//! Contains the planning run orchestration: the iteration loop around the ant
//! colony search, order splitting, route memory fallback and the structured report.

use crate::construction::{
    AcoConfig, CapacityModel, CompositeCost, DistanceLoadCost, FlatCapacity, ForecastCapacity, LegCost,
    PheromoneTable, WorldState,
};
use crate::models::{
    day_of, Airport, FlightTemplate, Order, OrderPlan, PlanResult, PlanStatus, SlaPolicy, TimeWindow,
};
use crate::utils::{DefaultRandom, GenericError, GenericResult, Random};

mod memory;
pub use self::memory::*;

mod orchestration;
use self::orchestration::{assign_orders, IterationSolution, OrderContext};

mod telemetry;
pub use self::telemetry::*;

mod validation;
pub use self::validation::*;

#[cfg(test)]
#[path = "../../tests/unit/solver/planner_test.rs"]
mod planner_test;

use crate::construction::CapacityDebit;
use crate::models::MINUTES_PER_HOUR;
use lazy_static::lazy_static;

lazy_static! {
    /// Designated hub airports treated as infinite capacity sources and sinks.
    pub static ref DEFAULT_HUBS: Vec<String> =
        vec!["SPIM".to_string(), "EBCI".to_string(), "UBBB".to_string()];
}

/// Selects the capacity bookkeeping variant and, with it, the heuristic generation:
/// the flat model pairs with the two factor distance cost, the forecast model with
/// the multi factor composite cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityKind {
    /// Flat per instant warehouse occupancy, two factor heuristic.
    Flat,
    /// Hour bucketed occupancy forecast with drain check, multi factor heuristic.
    Forecast,
}

/// Planner configuration.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Ant colony search parameters.
    pub aco: AcoConfig,
    /// Delivery promise policy.
    pub sla: SlaPolicy,
    /// Capacity model variant.
    pub capacity: CapacityKind,
    /// Hub airport codes.
    pub hubs: Vec<String>,
    /// Fixed random seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            aco: AcoConfig::default(),
            sla: SlaPolicy::default(),
            capacity: CapacityKind::Forecast,
            hubs: DEFAULT_HUBS.clone(),
            seed: None,
        }
    }
}

/// Assigns packages of shipment orders to itineraries across the scheduled network.
pub struct Planner {
    config: PlannerConfig,
    logger: InfoLogger,
}

impl Planner {
    /// Creates a planner with given configuration and a stdout logger.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, logger: create_stdout_logger() }
    }

    /// Sets a custom logger.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Runs one planning run over the given snapshot: routes all orders of the
    /// planning window, consulting and feeding the route memory, and returns the
    /// structured per order report.
    ///
    /// Only a total absence of input data is a hard failure; any per order problem
    /// is captured in that order's result entry.
    pub fn plan(
        &self,
        airports: Vec<Airport>,
        templates: Vec<FlightTemplate>,
        orders: &[Order],
        window: TimeWindow,
        memory: &mut RouteMemory,
    ) -> GenericResult<PlanResult> {
        if airports.is_empty() || templates.is_empty() {
            return Err(GenericError::from("nothing to plan against: no airports or no flights"));
        }

        let telemetry = PlanTelemetry::new(self.logger.clone());
        let mut world = WorldState::new(airports, templates, window, &self.config.hubs)?;

        // the forecast model covers the whole horizon with fixed buckets, so the
        // window is expanded up front; the flat model keeps the rolling lookahead
        if self.config.capacity == CapacityKind::Forecast {
            world.ensure_expanded_through(day_of(window.end - 1) + self.config.aco.lookahead_days);
        }

        let random: Box<dyn Random> = match self.config.seed {
            Some(seed) => Box::new(DefaultRandom::new_repeatable(seed)),
            None => Box::new(DefaultRandom::new()),
        };

        let (mut capacity, cost) = self.create_models(&world);
        let aco = &self.config.aco;
        let mut pheromone =
            PheromoneTable::new(aco.initial_pheromone, aco.pheromone_floor, aco.evaporation, aco.learning_rate);

        let (contexts, mut rejected) = self.resolve_orders(&world, orders);

        let mut best: Option<IterationSolution> = None;
        for iteration in 0..aco.iterations {
            pheromone.evaporate();
            world.reset_capacity();
            capacity.reset(&world);

            let solution =
                assign_orders(&mut world, capacity.as_mut(), &pheromone, cost.as_ref(), random.as_ref(), aco, &contexts, memory);

            solution.reinforcements.iter().for_each(|(ids, total)| pheromone.reinforce(ids, *total));

            let is_improved = best.as_ref().map_or(true, |incumbent| is_better(&solution, incumbent));
            telemetry.on_iteration(
                iteration,
                solution.delivered_orders,
                contexts.len() - solution.delivered_orders,
                solution.total_cost,
                is_improved,
            );

            if is_improved {
                best = Some(solution);
            }
        }

        let best = best.unwrap_or(IterationSolution {
            plans: Vec::default(),
            reinforcements: Vec::default(),
            debits: Vec::default(),
            delivered_orders: 0,
            delivered_quantity: 0,
            total_cost: 0.,
        });

        self.commit(&mut world, &best)?;

        let mut plans = best.plans;
        plans.append(&mut rejected);
        plans.sort_by_key(|(position, _)| *position);

        let orders = plans.into_iter().map(|(_, plan)| plan).collect::<Vec<_>>();
        let planned = orders.iter().filter(|plan| plan.status == PlanStatus::Planned).count();
        let infeasible = orders.len() - planned;

        telemetry.on_result(planned, infeasible, best.total_cost, world.instance_count());

        Ok(PlanResult {
            orders,
            planned,
            infeasible,
            total_cost: best.total_cost,
            delivered_quantity: best.delivered_quantity,
        })
    }

    fn create_models(&self, world: &WorldState) -> (Box<dyn CapacityModel>, Box<dyn LegCost>) {
        match self.config.capacity {
            CapacityKind::Flat => (Box::new(FlatCapacity::new(world)), Box::new(DistanceLoadCost::default())),
            CapacityKind::Forecast => {
                let overhang =
                    (self.config.aco.lookahead_days * 24 + self.config.sla.processing_time / MINUTES_PER_HOUR) as usize;
                (Box::new(ForecastCapacity::new(world, overhang)), Box::new(CompositeCost::default()))
            }
        }
    }

    /// Splits input orders into routable contexts and immediately rejected entries
    /// (unknown airports, origin equal to destination, empty quantity).
    fn resolve_orders(&self, world: &WorldState, orders: &[Order]) -> (Vec<OrderContext>, Vec<(usize, OrderPlan)>) {
        let mut contexts = Vec::with_capacity(orders.len());
        let mut rejected = Vec::default();

        for (position, order) in orders.iter().enumerate() {
            match self.resolve_order(world, position, order) {
                Ok(context) => contexts.push(context),
                Err(reason) => rejected.push((
                    position,
                    OrderPlan {
                        order_id: order.id.clone(),
                        status: PlanStatus::NotFeasible,
                        splits: Vec::default(),
                        reason: Some(reason.to_string()),
                    },
                )),
            }
        }

        (contexts, rejected)
    }

    fn resolve_order(&self, world: &WorldState, position: usize, order: &Order) -> GenericResult<OrderContext> {
        let origin = world
            .airport_idx(&order.origin)
            .ok_or_else(|| GenericError::from(format!("unknown origin airport: '{}'", order.origin)))?;
        let destination = world
            .airport_idx(&order.destination)
            .ok_or_else(|| GenericError::from(format!("unknown destination airport: '{}'", order.destination)))?;

        if origin == destination {
            return Err(GenericError::from("origin equals destination"));
        }

        if order.quantity == 0 {
            return Err(GenericError::from("order has no packages"));
        }

        let (origin_airport, destination_airport) = (world.airport(origin), world.airport(destination));

        Ok(OrderContext {
            input_position: position,
            id: order.id.clone(),
            origin,
            destination,
            created: order.created,
            latest_arrival: self.config.sla.latest_arrival(order, origin_airport, destination_airport),
            processing: self.config.sla.processing_time,
            quantity: order.quantity,
        })
    }

    /// Replays the winning iteration's reservations into the run level state: flight
    /// seat counters and the "real" warehouse occupancy view.
    fn commit(&self, world: &mut WorldState, best: &IterationSolution) -> GenericResult<()> {
        world.reset_capacity();
        world.reset_committed();

        for debit in &best.debits {
            match debit {
                CapacityDebit::Flight { instance, quantity } => world.reserve_flight(*instance, *quantity)?,
                CapacityDebit::Dwell { airport, from, to, quantity } => {
                    world.commit_dwell(*airport, *from, *to, *quantity)?
                }
            }
        }

        Ok(())
    }
}

fn is_better(candidate: &IterationSolution, incumbent: &IterationSolution) -> bool {
    candidate
        .delivered_orders
        .cmp(&incumbent.delivered_orders)
        .then_with(|| {
            crate::utils::compare_floats(incumbent.total_cost, candidate.total_cost)
        })
        .is_gt()
}
