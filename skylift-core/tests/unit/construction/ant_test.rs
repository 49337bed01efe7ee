use super::*;
use crate::construction::{DistanceLoadCost, FlatCapacity};
use crate::helpers::*;
use crate::models::MINUTES_PER_DAY;

fn create_search_tools(config: &AcoConfig) -> (PheromoneTable, DistanceLoadCost) {
    let pheromone = PheromoneTable::new(
        config.initial_pheromone,
        config.pheromone_floor,
        config.evaporation,
        config.learning_rate,
    );

    (pheromone, DistanceLoadCost::default())
}

fn create_package(world: &WorldState, origin: &str, destination: &str, quantity: u32) -> PackageState {
    PackageState::new(
        world.airport_idx(origin).unwrap(),
        world.airport_idx(destination).unwrap(),
        0,
        3 * MINUTES_PER_DAY,
        120,
        quantity,
    )
}

#[test]
fn can_reach_destination_over_two_legs() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let config = create_test_config();
    let (pheromone, cost) = create_search_tools(&config);
    let random = create_test_random();
    // the promise keeps only the first occurrence of each flight feasible
    let mut package = PackageState::new(
        world.airport_idx("AAAA").unwrap(),
        world.airport_idx("CCCC").unwrap(),
        0,
        22 * 60,
        120,
        5,
    );

    let state = construct_route(&mut world, &mut capacity, &pheromone, &cost, &random, &config, &mut package);

    assert_eq!(state, AntState::Arrived);
    assert!(package.is_delivered());
    assert_eq!(package.route.legs.len(), 2);
    assert_eq!(package.route.arrival(), Some(22 * 60));

    // seats are reserved on both flights, the stay at the connection airport and
    // the processing dwell at the destination are recorded
    assert_eq!(world.instance(package.route.legs[0].instance).reserved, 5);
    assert_eq!(world.instance(package.route.legs[1].instance).reserved, 5);
    let connection = world.airport_idx("BBBB").unwrap();
    let destination = world.airport_idx("CCCC").unwrap();
    assert_eq!(capacity.occupancy_at(&world, connection, 11 * 60), 5);
    assert_eq!(capacity.occupancy_at(&world, destination, 22 * 60 + 30), 5);
}

#[test]
fn can_get_stuck_without_outbound_flights() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let config = create_test_config();
    let (pheromone, cost) = create_search_tools(&config);
    let random = create_test_random();
    let mut package = create_package(&world, "CCCC", "AAAA", 1);

    let state = construct_route(&mut world, &mut capacity, &pheromone, &cost, &random, &config, &mut package);

    assert_eq!(state, AntState::Stuck);
    assert!(package.route.legs.is_empty());
}

#[test]
fn can_get_stuck_when_quantity_exceeds_any_flight() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let config = create_test_config();
    let (pheromone, cost) = create_search_tools(&config);
    let random = create_test_random();
    let mut package = create_package(&world, "AAAA", "CCCC", 25);

    let state = construct_route(&mut world, &mut capacity, &pheromone, &cost, &random, &config, &mut package);

    assert_eq!(state, AntState::Stuck);
}

#[test]
fn can_roll_back_all_reservations_on_hop_ceiling() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let config = AcoConfig { max_hops: 1, ..create_test_config() };
    let (pheromone, cost) = create_search_tools(&config);
    let random = create_test_random();
    let mut package = create_package(&world, "AAAA", "CCCC", 5);

    let state = construct_route(&mut world, &mut capacity, &pheromone, &cost, &random, &config, &mut package);

    assert_eq!(state, AntState::Stuck);
    assert!(package.route.legs.is_empty());
    let origin = world.airport_idx("AAAA").unwrap();
    assert_eq!(capacity.occupancy_at(&world, origin, 60), 0);
    (0..world.instance_count()).for_each(|idx| assert_eq!(world.instance(idx).reserved, 0));
}

#[test]
fn can_wait_for_next_day_on_short_connection() {
    let airports = create_abc_airports();
    let templates = vec![
        create_test_template("AAAA", "BBBB", 8 * 60, 10 * 60, 20),
        // departs 40 minutes after the arrival, below the minimum connection time
        create_test_template("BBBB", "CCCC", 10 * 60 + 40, 15 * 60, 20),
    ];
    let mut world = create_test_world(airports, templates);
    let mut capacity = FlatCapacity::new(&world);
    let config = create_test_config();
    world.ensure_expanded_through(1);
    let mut package = create_package(&world, "AAAA", "CCCC", 1);

    let first = world.next_instance_of(0, -1).unwrap();
    package.take_leg(&mut world, &mut capacity, first, 1., config.min_connection).unwrap();

    // the same day connection is 40 minutes, too short to take
    let same_day = world.next_instance_of(1, -1).unwrap();
    assert!(package.take_leg(&mut world, &mut capacity, same_day, 1., config.min_connection).is_err());

    let (airport, not_before) = package.position(&world, config.min_connection);
    let ctx = LegContext { current_time: not_before, destination: package.destination, latest_arrival: package.latest_arrival };
    let candidates = enumerate_candidates(&world, &capacity, airport, not_before, 1, &ctx);

    assert_eq!(
        candidates.iter().map(|&idx| world.instance(idx).departure).min(),
        Some(10 * 60 + 40 + MINUTES_PER_DAY)
    );
}

#[test]
fn can_enumerate_only_feasible_candidates() {
    let mut world = create_abc_world();
    let capacity = FlatCapacity::new(&world);
    world.ensure_expanded_through(1);
    let origin = world.airport_idx("AAAA").unwrap();
    let ctx = LegContext {
        current_time: 0,
        destination: world.airport_idx("CCCC").unwrap(),
        latest_arrival: 3 * MINUTES_PER_DAY,
    };

    assert_eq!(enumerate_candidates(&world, &capacity, origin, 0, 5, &ctx).len(), 2);

    // not enough seats left on the first occurrence
    world.reserve_flight(0, 16).unwrap();
    assert_eq!(enumerate_candidates(&world, &capacity, origin, 0, 5, &ctx).len(), 1);

    // the promise cuts the next day occurrence off
    let tight = LegContext { latest_arrival: 20 * 60, ..ctx };
    world.release_flight(0, 16);
    assert_eq!(enumerate_candidates(&world, &capacity, origin, 0, 5, &tight).len(), 1);
}

#[test]
fn can_draw_proportionally_to_weights() {
    let random = create_test_random();

    (0..32).for_each(|_| assert_eq!(roulette(&[0., 0., 1.], &random), 2));
    assert_eq!(roulette(&[0., 0., 0.], &random), 0);
}
