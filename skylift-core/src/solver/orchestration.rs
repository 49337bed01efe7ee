#[cfg(test)]
#[path = "../../tests/unit/solver/orchestration_test.rs"]
mod orchestration_test;

use crate::construction::{
    construct_route, AcoConfig, AntState, CapacityDebit, CapacityModel, FlightInstanceId, LegCost, PackageState,
    PheromoneTable, WorldState,
};
use crate::models::{day_of, AirportIdx, Cost, Duration, OrderPlan, PlanStatus, Split, Timestamp};
use crate::solver::{validate_and_apply, RouteMemory, RouteQuery};
use crate::utils::Random;

/// A resolved, structurally valid order ready for routing.
#[derive(Clone, Debug)]
pub(crate) struct OrderContext {
    /// Position of the order in the input slice.
    pub input_position: usize,
    pub id: String,
    pub origin: AirportIdx,
    pub destination: AirportIdx,
    pub created: Timestamp,
    pub latest_arrival: Timestamp,
    pub processing: Duration,
    pub quantity: u32,
}

/// An assignment of all orders produced by one planning iteration.
pub(crate) struct IterationSolution {
    /// Per order outcomes paired with the order input position.
    pub plans: Vec<(usize, OrderPlan)>,
    /// Routes of arrived chunks with their total costs, for pheromone reinforcement.
    pub reinforcements: Vec<(Vec<FlightInstanceId>, Cost)>,
    /// All capacity reservations applied by the iteration.
    pub debits: Vec<CapacityDebit>,
    pub delivered_orders: usize,
    pub delivered_quantity: u64,
    pub total_cost: Cost,
}

/// Routes all orders of one iteration, largest outstanding quantity first. Orders
/// which do not fit a single itinerary are split into chunks with binary backoff;
/// chunks a live search cannot route fall back to the route memory; an order whose
/// single unit cannot be routed even after relaxed retries is reported infeasible
/// without blocking subsequent orders.
#[allow(clippy::too_many_arguments)]
pub(crate) fn assign_orders(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    pheromone: &PheromoneTable,
    cost: &dyn LegCost,
    random: &dyn Random,
    config: &AcoConfig,
    orders: &[OrderContext],
    memory: &mut RouteMemory,
) -> IterationSolution {
    let mut sequence = (0..orders.len()).collect::<Vec<_>>();
    sequence.sort_by(|&a, &b| {
        orders[b].quantity.cmp(&orders[a].quantity).then(orders[a].created.cmp(&orders[b].created))
    });

    let mut solution = IterationSolution {
        plans: Vec::with_capacity(orders.len()),
        reinforcements: Vec::default(),
        debits: Vec::default(),
        delivered_orders: 0,
        delivered_quantity: 0,
        total_cost: 0.,
    };

    for order_idx in sequence {
        let order = &orders[order_idx];
        let outcome = assign_order(world, capacity, pheromone, cost, random, config, order, memory);

        match outcome {
            Ok(chunks) => {
                let mut splits = Vec::with_capacity(chunks.len());
                for package in chunks {
                    let route_cost = package.route.total_cost();
                    let ids = package.instance_ids(world);
                    let tags = package.route.legs.iter().map(|leg| world.instance_tag(leg.instance)).collect::<Vec<_>>();

                    remember_route(world, memory, order, &package, &tags);

                    solution.delivered_quantity += u64::from(package.quantity);
                    solution.total_cost += route_cost;
                    solution.reinforcements.push((ids, route_cost));
                    splits.push(Split { quantity: package.quantity, cost: route_cost, legs: tags });
                    solution.debits.extend(package.into_debits());
                }

                solution.delivered_orders += 1;
                solution.plans.push((
                    order.input_position,
                    OrderPlan { order_id: order.id.clone(), status: PlanStatus::Planned, splits, reason: None },
                ));
            }
            Err(reason) => {
                solution.plans.push((
                    order.input_position,
                    OrderPlan {
                        order_id: order.id.clone(),
                        status: PlanStatus::NotFeasible,
                        splits: Vec::default(),
                        reason: Some(reason),
                    },
                ));
            }
        }
    }

    solution
}

/// Routes one order completely, either returning all its routed chunks or, after
/// rolling the partially routed chunks back, a failure reason.
#[allow(clippy::too_many_arguments)]
fn assign_order(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    pheromone: &PheromoneTable,
    cost: &dyn LegCost,
    random: &dyn Random,
    config: &AcoConfig,
    order: &OrderContext,
    memory: &RouteMemory,
) -> Result<Vec<PackageState>, String> {
    world.ensure_expanded_through(day_of(order.created) + config.lookahead_days - 1);

    let mut chunks: Vec<PackageState> = Vec::default();
    let mut remaining = order.quantity;

    while remaining > 0 {
        let mut chunk = remaining.min(max_chunk_size(world, order, config));

        let routed = loop {
            let mut package = new_chunk(order, chunk);
            if construct_route(world, capacity, pheromone, cost, random, config, &mut package) == AntState::Arrived {
                break Some(package);
            }

            // live search failed: consult the route memory first, it is cheap and a
            // hit keeps the chunk whole
            if let Some(package) = replay_from_memory(world, capacity, cost, random, config, order, chunk, memory) {
                break Some(package);
            }

            if chunk > 1 {
                chunk /= 2;
                continue;
            }

            break retry_single_unit(world, capacity, pheromone, cost, random, config, order);
        };

        match routed {
            Some(package) => {
                remaining -= package.quantity;
                chunks.push(package);
            }
            None => {
                chunks.iter_mut().for_each(|chunk| chunk.rollback(world, capacity));
                return Err(diagnose_failure(world, order));
            }
        }
    }

    Ok(chunks)
}

/// Returns the largest chunk worth attempting: the best remaining outbound seat
/// count at the origin within the promise window, minus the reserved transit buffer.
fn max_chunk_size(world: &WorldState, order: &OrderContext, config: &AcoConfig) -> u32 {
    let headroom = world.max_outbound_headroom(order.origin, order.created, order.latest_arrival);
    let usable = (f64::from(headroom) * (1. - config.reserved_transit_ratio)).floor() as u32;

    usable.max(1)
}

fn new_chunk(order: &OrderContext, quantity: u32) -> PackageState {
    PackageState::new(order.origin, order.destination, order.created, order.latest_arrival, order.processing, quantity)
}

/// Replays known routes of the order origin-destination pair, shuffled, accepting
/// the first one which validates against current capacity state.
#[allow(clippy::too_many_arguments)]
fn replay_from_memory(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    cost: &dyn LegCost,
    random: &dyn Random,
    config: &AcoConfig,
    order: &OrderContext,
    quantity: u32,
    memory: &RouteMemory,
) -> Option<PackageState> {
    let origin_code = world.airport(order.origin).code.clone();
    let destination_code = world.airport(order.destination).code.clone();

    let known = memory.routes_for(&origin_code, &destination_code);
    if known.is_empty() {
        return None;
    }

    let mut indices = (0..known.len()).collect::<Vec<_>>();
    random.shuffle(&mut indices);

    let query = RouteQuery {
        origin: order.origin,
        destination: order.destination,
        created: order.created,
        latest_arrival: order.latest_arrival,
        processing: order.processing,
        quantity,
    };

    for route_idx in indices {
        let templates = known[route_idx]
            .template_keys
            .iter()
            .map(|key| world.template_idx(key))
            .collect::<Option<Vec<_>>>();

        let Some(templates) = templates else { continue };

        if let Ok(package) = validate_and_apply(world, capacity, cost, &templates, &query, config) {
            return Some(package);
        }
    }

    None
}

/// A bounded number of relaxed attempts for a single unit: each retry re-runs the
/// stochastic search, which may find a path a previous draw missed.
fn retry_single_unit(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    pheromone: &PheromoneTable,
    cost: &dyn LegCost,
    random: &dyn Random,
    config: &AcoConfig,
    order: &OrderContext,
) -> Option<PackageState> {
    for _ in 0..config.max_relaxed_retries {
        let mut package = new_chunk(order, 1);
        if construct_route(world, capacity, pheromone, cost, random, config, &mut package) == AntState::Arrived {
            return Some(package);
        }
    }

    None
}

fn remember_route(world: &WorldState, memory: &mut RouteMemory, order: &OrderContext, package: &PackageState, tags: &[String]) {
    let origin = &world.airport(order.origin).code;
    let destination = &world.airport(order.destination).code;

    let template_keys = package
        .route
        .legs
        .iter()
        .map(|leg| world.templates()[world.instance(leg.instance).template].natural_key())
        .collect::<Vec<_>>();

    let canonical = RouteMemory::canonical_key(origin, destination, tags);
    memory.record(origin, destination, template_keys, canonical);
}

/// Explains why an order could not be routed at all.
fn diagnose_failure(world: &WorldState, order: &OrderContext) -> String {
    let any_in_time = world
        .outbound_after(order.origin, order.created - 1)
        .map(|idx| world.instance(idx))
        .take_while(|instance| instance.departure <= order.latest_arrival)
        .any(|instance| instance.arrival <= order.latest_arrival);

    if any_in_time {
        "no remaining capacity towards the destination".to_string()
    } else {
        "delivery promise expires before any feasible outbound flight".to_string()
    }
}
