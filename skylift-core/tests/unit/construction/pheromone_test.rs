use super::*;

fn create_test_table() -> PheromoneTable {
    PheromoneTable::new(1., 0.01, 0.25, 100.)
}

fn instance_id(template: usize, departure: i64) -> FlightInstanceId {
    FlightInstanceId { template, departure }
}

#[test]
fn can_return_initial_weight_for_untouched_instances() {
    let table = create_test_table();

    assert_eq!(table.get(&instance_id(0, 480)), 1.);
    assert!(table.is_empty());
}

#[test]
fn can_reinforce_proportionally_to_inverse_cost() {
    let mut table = create_test_table();
    let route = vec![instance_id(0, 480), instance_id(1, 720)];

    table.reinforce(&route, 50.);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&route[0]), 1. + 100. / 50.);
    assert_eq!(table.get(&route[1]), 3.);
}

#[test]
fn can_evaporate_touched_entries_only() {
    let mut table = create_test_table();
    table.reinforce(&[instance_id(0, 480)], 100.);

    table.evaporate();

    assert_eq!(table.get(&instance_id(0, 480)), 2. * 0.75);
    // untouched entries stay at the initial weight
    assert_eq!(table.get(&instance_id(1, 720)), 1.);
}

#[test]
fn can_clamp_evaporation_to_the_floor() {
    let mut table = create_test_table();
    table.reinforce(&[instance_id(0, 480)], f64::MAX);

    (0..64).for_each(|_| table.evaporate());

    assert_eq!(table.get(&instance_id(0, 480)), 0.01);
}
