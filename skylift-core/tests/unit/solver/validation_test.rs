use super::*;
use crate::construction::{DistanceLoadCost, FlatCapacity};
use crate::helpers::*;
use crate::models::MINUTES_PER_DAY;

fn create_query(world: &WorldState, created: Timestamp, quantity: u32) -> RouteQuery {
    RouteQuery {
        origin: world.airport_idx("AAAA").unwrap(),
        destination: world.airport_idx("CCCC").unwrap(),
        created,
        latest_arrival: created + 3 * MINUTES_PER_DAY,
        processing: 120,
        quantity,
    }
}

#[test]
fn can_apply_debits_while_validating() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());
    let query = create_query(&world, 0, 5);

    let package = validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &query, &config).unwrap();

    assert!(package.is_delivered());
    assert_eq!(package.route.legs.len(), 2);
    assert_eq!(world.instance(package.route.legs[0].instance).reserved, 5);
    assert_eq!(world.instance(package.route.legs[1].instance).reserved, 5);
    let connection = world.airport_idx("BBBB").unwrap();
    assert_eq!(capacity.occupancy_at(&world, connection, 11 * 60), 5);
}

#[test]
fn can_take_flight_next_day_when_clock_time_passed() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());
    // created at 10:00, after the 08:00 departure of the first flight
    let query = create_query(&world, 10 * 60, 5);

    let package = validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &query, &config).unwrap();

    assert_eq!(package.route.legs[0].departure, 8 * 60 + MINUTES_PER_DAY);
    assert_eq!(package.route.legs[1].departure, 12 * 60 + MINUTES_PER_DAY);
}

#[test]
fn can_reject_disconnected_sequence() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());
    let query = create_query(&world, 0, 5);

    assert!(validate_and_apply(&mut world, &mut capacity, &cost, &[1], &query, &config).is_err());

    (0..world.instance_count()).for_each(|idx| assert_eq!(world.instance(idx).reserved, 0));
}

#[test]
fn can_reject_route_ending_short_of_destination() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());
    let query = create_query(&world, 0, 5);

    assert!(validate_and_apply(&mut world, &mut capacity, &cost, &[0], &query, &config).is_err());

    (0..world.instance_count()).for_each(|idx| assert_eq!(world.instance(idx).reserved, 0));
}

#[test]
fn can_reject_replay_over_saturated_flights() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());

    let (bulk, overflow, remainder) =
        (create_query(&world, 0, 15), create_query(&world, 0, 10), create_query(&world, 0, 5));

    validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &bulk, &config).unwrap();

    // 5 seats left on each flight of the day
    assert!(validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &overflow, &config).is_err());

    assert!(validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &remainder, &config).is_ok());
}

#[test]
fn can_reject_replay_breaking_the_promise() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());

    let query = RouteQuery { latest_arrival: 20 * 60, ..create_query(&world, 0, 5) };

    assert!(validate_and_apply(&mut world, &mut capacity, &cost, &[0, 1], &query, &config).is_err());
}

#[test]
fn can_audit_feasibility_without_debiting() {
    let mut world = create_abc_world();
    let mut capacity = FlatCapacity::new(&world);
    let (cost, config) = (DistanceLoadCost::default(), create_test_config());
    let query = create_query(&world, 0, 5);

    assert!(is_feasible(&mut world, &mut capacity, &cost, &[0, 1], &query, &config));

    (0..world.instance_count()).for_each(|idx| assert_eq!(world.instance(idx).reserved, 0));
    let connection = world.airport_idx("BBBB").unwrap();
    assert_eq!(capacity.occupancy_at(&world, connection, 11 * 60), 0);
}
