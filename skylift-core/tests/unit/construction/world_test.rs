use super::*;
use crate::helpers::*;
use crate::models::Continent;

#[test]
fn can_expand_instances_lazily_and_monotonically() {
    let mut world = create_abc_world();
    assert_eq!(world.instance_count(), 0);

    world.ensure_expanded_through(0);
    assert_eq!(world.instance_count(), 2);

    world.ensure_expanded_through(2);
    assert_eq!(world.instance_count(), 6);
    assert_eq!(world.expanded_until(), 2);

    // already expanded days are not duplicated
    world.ensure_expanded_through(1);
    assert_eq!(world.instance_count(), 6);
}

#[test]
fn can_roll_arrival_over_to_next_day() {
    let airports = vec![
        create_test_airport("AAAA", Continent::Europe, 10, 0., 0.),
        create_test_airport("BBBB", Continent::Europe, 10, 0., 10.),
    ];
    let templates = vec![create_test_template("AAAA", "BBBB", 23 * 60, 5 * 60, 10)];
    let mut world = create_test_world(airports, templates);

    world.ensure_expanded_through(0);

    let instance = world.instance(0);
    assert_eq!(instance.departure, 23 * 60);
    assert_eq!(instance.arrival, 29 * 60);
}

#[test]
fn can_convert_local_times_using_utc_offsets() {
    let airports = vec![
        Airport::new("AAAA", -5, 10, -12., -77.1, Continent::SouthAmerica).unwrap(),
        Airport::new("BBBB", 1, 10, 50.5, 4.5, Continent::Europe).unwrap(),
    ];
    let templates = vec![create_test_template("AAAA", "BBBB", 8 * 60, 22 * 60, 10)];
    let mut world = create_test_world(airports, templates);

    world.ensure_expanded_through(0);

    let instance = world.instance(0);
    // 08:00 at UTC-5 is 13:00 UTC, 22:00 at UTC+1 is 21:00 UTC
    assert_eq!(instance.departure, 13 * 60);
    assert_eq!(instance.arrival, 21 * 60);
}

#[test]
fn can_reject_flight_with_unknown_endpoint() {
    let airports = vec![create_test_airport("AAAA", Continent::Europe, 10, 0., 0.)];
    let templates = vec![create_test_template("AAAA", "ZZZZ", 8 * 60, 10 * 60, 10)];

    assert!(WorldState::new(airports, templates, create_test_window(), &[]).is_err());
}

#[test]
fn can_list_outbound_strictly_after_given_time() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(1);
    let origin = world.airport_idx("AAAA").unwrap();

    let departures = |after| {
        world.outbound_after(origin, after).map(|idx| world.instance(idx).departure).collect::<Vec<_>>()
    };

    assert_eq!(departures(0), vec![8 * 60, 8 * 60 + MINUTES_PER_DAY]);
    assert_eq!(departures(8 * 60 - 1), vec![8 * 60, 8 * 60 + MINUTES_PER_DAY]);
    assert_eq!(departures(8 * 60), vec![8 * 60 + MINUTES_PER_DAY]);
}

#[test]
fn can_find_next_instance_of_template() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(1);

    let next = world.next_instance_of(1, 12 * 60).unwrap();
    assert_eq!(world.instance(next).departure, 12 * 60 + MINUTES_PER_DAY);

    assert!(world.next_instance_of(1, 12 * 60 + MINUTES_PER_DAY).is_none());
}

#[test]
fn can_enforce_flight_capacity_on_reserve() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(0);

    assert!(world.reserve_flight(0, 20).is_ok());
    assert_eq!(world.instance(0).headroom(), 0);
    assert!(world.reserve_flight(0, 1).is_err());

    world.release_flight(0, 5);
    assert_eq!(world.instance(0).headroom(), 5);
    assert!(world.reserve_flight(0, 5).is_ok());
}

#[test]
fn can_compute_outbound_headroom_aggregates() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(1);
    let origin = world.airport_idx("AAAA").unwrap();

    world.reserve_flight(0, 15).unwrap();

    assert_eq!(world.max_outbound_headroom(origin, 0, MINUTES_PER_DAY), 5);
    assert_eq!(world.max_outbound_headroom(origin, 0, 2 * MINUTES_PER_DAY), 20);
    assert_eq!(world.outbound_capacity(origin, 0, 2 * MINUTES_PER_DAY), 25);
}

#[test]
fn can_reset_reservations() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(0);
    world.reserve_flight(0, 10).unwrap();

    world.reset_capacity();

    assert_eq!(world.instance(0).headroom(), 20);
}

#[test]
fn can_commit_dwell_respecting_warehouse_capacity() {
    let mut world = create_abc_world();
    let airport = world.airport_idx("BBBB").unwrap();

    assert!(world.commit_dwell(airport, 600, 720, 50).is_ok());
    assert!(world.commit_dwell(airport, 600, 720, 1).is_err());
    assert_eq!(world.committed_occupancy(airport).value_at(650), 50);

    world.reset_committed();
    assert_eq!(world.committed_occupancy(airport).value_at(650), 0);
}

#[test]
fn can_skip_dwell_accounting_at_hubs() {
    let mut world =
        create_test_world_with_hubs(create_abc_airports(), create_abc_templates(), &["BBBB".to_string()]);
    let airport = world.airport_idx("BBBB").unwrap();

    assert!(world.commit_dwell(airport, 600, 720, 1000).is_ok());
    assert_eq!(world.committed_occupancy(airport).value_at(650), 0);
}

#[test]
fn can_round_trip_instance_tags() {
    let mut world = create_abc_world();
    world.ensure_expanded_through(1);

    let tag = world.instance_tag(2);
    assert_eq!(tag, format!("AAAA-BBBB@0800@{}", 8 * 60 + MINUTES_PER_DAY));
    assert_eq!(world.instance_by_tag(&tag), Some(2));

    assert!(world.instance_by_tag("AAAA-BBBB@0800@99999").is_none());
    assert!(world.instance_by_tag("garbage").is_none());
}
