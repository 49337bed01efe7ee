#[cfg(test)]
#[path = "../../tests/unit/construction/ant_test.rs"]
mod ant_test;

use crate::construction::{CapacityDebit, CapacityModel, FlightInstanceId, LegContext, LegCost, PheromoneTable, WorldState};
use crate::models::{day_of, AirportIdx, Cost, Duration, InstanceIdx, Leg, Route, Timestamp};
use crate::utils::{parallel_collect, GenericError, GenericResult, Random};

/// Tunable parameters of the ant colony search.
#[derive(Clone, Debug)]
pub struct AcoConfig {
    /// Pheromone importance.
    pub alpha: f64,
    /// Heuristic importance.
    pub beta: f64,
    /// Initial pheromone level of an untouched instance.
    pub initial_pheromone: f64,
    /// Lower pheromone bound.
    pub pheromone_floor: f64,
    /// Evaporation rate applied before every iteration.
    pub evaporation: f64,
    /// Reinforcement numerator: deposit is `learning_rate / route cost`.
    pub learning_rate: f64,
    /// Amount of planning iterations per run.
    pub iterations: usize,
    /// Hop count ceiling which forces a stuck state, guarding against oscillation.
    pub max_hops: usize,
    /// Minimum connection time between two legs, in minutes.
    pub min_connection: Duration,
    /// Rolling flight instance expansion lookahead, in days.
    pub lookahead_days: i64,
    /// Amount of relaxed retries for a single unit chunk before giving up.
    pub max_relaxed_retries: usize,
    /// Share of origin capacity kept back as a transit buffer when sizing chunks.
    pub reserved_transit_ratio: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.,
            beta: 2.,
            initial_pheromone: 1.,
            pheromone_floor: 0.01,
            evaporation: 0.25,
            learning_rate: 100.,
            iterations: 8,
            max_hops: 5,
            min_connection: 60,
            lookahead_days: 3,
            max_relaxed_retries: 3,
            reserved_transit_ratio: 0.15,
        }
    }
}

/// States of the route construction machine for one package chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    /// No leg taken yet.
    AtOrigin,
    /// Construction in progress.
    Searching,
    /// Reached the final destination within the delivery promise. Terminal.
    Arrived,
    /// No feasible candidate left or a ceiling was hit. Terminal.
    Stuck,
}

/// Mutable route state of one package chunk while it travels through the network.
pub struct PackageState {
    /// Origin airport.
    pub origin: AirportIdx,
    /// Final destination airport.
    pub destination: AirportIdx,
    /// Creation timestamp.
    pub created: Timestamp,
    /// Latest acceptable arrival at the destination warehouse.
    pub latest_arrival: Timestamp,
    /// Destination processing dwell, in minutes.
    pub processing: Duration,
    /// Amount of packages travelling together.
    pub quantity: u32,
    /// Itinerary taken so far.
    pub route: Route,
    /// Remaining time budget, decreasing as legs are taken.
    pub remaining_budget: Duration,
    /// Terminal or intermediate machine state.
    pub state: AntState,
    debits: Vec<CapacityDebit>,
}

impl PackageState {
    /// Creates a fresh chunk at its origin.
    pub fn new(
        origin: AirportIdx,
        destination: AirportIdx,
        created: Timestamp,
        latest_arrival: Timestamp,
        processing: Duration,
        quantity: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            created,
            latest_arrival,
            processing,
            quantity,
            route: Route::default(),
            remaining_budget: latest_arrival - created,
            state: AntState::AtOrigin,
            debits: Vec::default(),
        }
    }

    /// Returns the current airport and the earliest time the next leg may depart:
    /// the origin and creation time if no legs were taken yet, otherwise the last
    /// arrival airport and arrival time plus the minimum connection time.
    pub fn position(&self, world: &WorldState, min_connection: Duration) -> (AirportIdx, Timestamp) {
        match self.route.legs.last() {
            Some(leg) => (world.instance(leg.instance).destination, leg.arrival + min_connection),
            None => (self.origin, self.created),
        }
    }

    /// Checks whether the chunk reached its destination.
    pub fn is_delivered(&self) -> bool {
        self.state == AntState::Arrived
    }

    /// Returns identities of all instances on the route.
    pub fn instance_ids(&self, world: &WorldState) -> Vec<FlightInstanceId> {
        self.route.legs.iter().map(|leg| world.instance(leg.instance).id()).collect()
    }

    /// Takes given flight instance as the next leg, applying all capacity
    /// reservations immediately: seats on the flight, the warehouse stay at the
    /// airport being left and, for the final leg, the processing dwell at the
    /// destination. Fails without a trace when any reservation is rejected.
    pub fn take_leg(
        &mut self,
        world: &mut WorldState,
        capacity: &mut dyn CapacityModel,
        instance_idx: InstanceIdx,
        leg_cost: Cost,
        min_connection: Duration,
    ) -> GenericResult<()> {
        let (airport, not_before) = self.position(world, min_connection);
        let instance = world.instance(instance_idx);
        let (departure, arrival, destination) = (instance.departure, instance.arrival, instance.destination);

        if departure < not_before {
            return Err(GenericError::from(format!(
                "instance {} departs at {departure}, before {not_before}",
                instance.id()
            )));
        }

        let dwell_from = self.route.legs.last().map(|leg| leg.arrival).unwrap_or(self.created);
        let mut staged = Vec::with_capacity(3);

        world.reserve_flight(instance_idx, self.quantity)?;
        staged.push(CapacityDebit::Flight { instance: instance_idx, quantity: self.quantity });

        if dwell_from < departure {
            if let Err(err) = capacity.occupy(world, airport, dwell_from, departure, self.quantity) {
                Self::revert(world, capacity, &staged);
                return Err(err);
            }
            staged.push(CapacityDebit::Dwell { airport, from: dwell_from, to: departure, quantity: self.quantity });
        }

        if destination == self.destination {
            let until = arrival + self.processing;
            if let Err(err) = capacity.occupy(world, destination, arrival, until, self.quantity) {
                Self::revert(world, capacity, &staged);
                return Err(err);
            }
            staged.push(CapacityDebit::Dwell { airport: destination, from: arrival, to: until, quantity: self.quantity });
        }

        self.debits.append(&mut staged);
        self.route.legs.push(Leg { instance: instance_idx, departure, arrival, cost: leg_cost });
        self.remaining_budget = self.latest_arrival - arrival;

        if destination == self.destination {
            self.state = AntState::Arrived;
        } else {
            self.state = AntState::Searching;
        }

        Ok(())
    }

    /// Rolls back every reservation this chunk has applied, in reverse order, and
    /// clears its route. Used when the chunk ends up stuck.
    pub fn rollback(&mut self, world: &mut WorldState, capacity: &mut dyn CapacityModel) {
        Self::revert(world, capacity, &self.debits);
        self.debits.clear();
        self.route.legs.clear();
        self.remaining_budget = self.latest_arrival - self.created;
        self.state = AntState::Stuck;
    }

    /// Hands over the applied reservations, e.g. to accumulate them into a solution.
    pub fn into_debits(self) -> Vec<CapacityDebit> {
        self.debits
    }

    fn revert(world: &mut WorldState, capacity: &mut dyn CapacityModel, debits: &[CapacityDebit]) {
        for debit in debits.iter().rev() {
            match debit {
                CapacityDebit::Flight { instance, quantity } => world.release_flight(*instance, *quantity),
                CapacityDebit::Dwell { airport, from, to, quantity } => {
                    capacity.release(world, *airport, *from, *to, *quantity)
                }
            }
        }
    }
}

/// Builds an itinerary for one package chunk by repeatedly selecting the next leg
/// with a probability proportional to `pheromone^alpha * (1/cost)^beta` among
/// feasible candidates, until the destination is reached, no feasible candidate is
/// left or the hop ceiling is hit. Reservations are applied in place as legs are
/// taken and rolled back entirely when the chunk ends up stuck.
pub fn construct_route(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    pheromone: &PheromoneTable,
    cost: &dyn LegCost,
    random: &dyn Random,
    config: &AcoConfig,
    package: &mut PackageState,
) -> AntState {
    package.state = AntState::Searching;

    loop {
        if package.route.legs.len() >= config.max_hops {
            package.rollback(world, capacity);
            return AntState::Stuck;
        }

        let (airport, not_before) = package.position(world, config.min_connection);
        world.ensure_expanded_through(day_of(not_before) + config.lookahead_days - 1);

        let ctx = LegContext {
            current_time: not_before,
            destination: package.destination,
            latest_arrival: package.latest_arrival,
        };

        let mut candidates = enumerate_candidates(world, capacity, airport, not_before, package.quantity, &ctx);
        if candidates.is_empty() {
            package.rollback(world, capacity);
            return AntState::Stuck;
        }

        let costs = parallel_collect(&candidates, |&idx| cost.estimate(world, idx, &ctx));
        let mut weights = candidates
            .iter()
            .zip(costs.iter())
            .map(|(&idx, &leg_cost)| {
                pheromone.get(&world.instance(idx).id()).powf(config.alpha) * (1. / leg_cost).powf(config.beta)
            })
            .collect::<Vec<_>>();
        let mut costs = costs;

        // a reservation can still be rejected (e.g. the dwell at the airport being
        // left no longer fits); drop such candidates and draw again
        let mut taken = false;
        while !candidates.is_empty() {
            let picked = roulette(&weights, random);

            match package.take_leg(world, capacity, candidates[picked], costs[picked], config.min_connection) {
                Ok(()) => {
                    taken = true;
                    break;
                }
                Err(_) => {
                    candidates.swap_remove(picked);
                    costs.swap_remove(picked);
                    weights.swap_remove(picked);
                }
            }
        }

        if !taken {
            package.rollback(world, capacity);
            return AntState::Stuck;
        }

        if package.state == AntState::Arrived {
            return AntState::Arrived;
        }
    }
}

/// Enumerates feasible next legs: outbound instances departing after the current
/// time with enough seats left, arriving early enough to keep the delivery promise
/// and passing the warehouse headroom validation at their arrival airport.
pub fn enumerate_candidates(
    world: &WorldState,
    capacity: &dyn CapacityModel,
    airport: AirportIdx,
    not_before: Timestamp,
    quantity: u32,
    ctx: &LegContext,
) -> Vec<InstanceIdx> {
    world
        .outbound_after(airport, not_before - 1)
        .filter(|&idx| {
            let instance = world.instance(idx);

            instance.headroom() >= quantity
                && instance.arrival <= ctx.latest_arrival
                && capacity.headroom_ok(world, instance.destination, instance.arrival, quantity)
        })
        .collect()
}

/// Draws an index with probability proportional to its weight using a single
/// uniform draw against the cumulative distribution.
fn roulette(weights: &[f64], random: &dyn Random) -> usize {
    let total = weights.iter().sum::<f64>();
    if total <= 0. {
        return 0;
    }

    let draw = random.uniform_real(0., total);
    let mut cumulative = 0.;

    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return idx;
        }
    }

    weights.len() - 1
}
