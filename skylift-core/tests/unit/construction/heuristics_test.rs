use super::*;
use crate::helpers::*;
use crate::models::MINUTES_PER_DAY;

fn create_expanded_world() -> WorldState {
    let mut world = create_abc_world();
    world.ensure_expanded_through(1);
    world
}

fn create_context(world: &WorldState, current_time: Timestamp, latest_arrival: Timestamp) -> LegContext {
    LegContext { current_time, destination: world.airport_idx("CCCC").unwrap(), latest_arrival }
}

#[test]
fn can_keep_costs_strictly_positive() {
    let world = create_expanded_world();
    let ctx = create_context(&world, 0, 3 * MINUTES_PER_DAY);

    for cost in [&DistanceLoadCost::default() as &dyn LegCost, &CompositeCost::default() as &dyn LegCost] {
        for candidate in 0..world.instance_count() {
            assert!(cost.estimate(&world, candidate, &ctx) >= MIN_LEG_COST);
        }
    }
}

#[test]
fn can_charge_for_remaining_distance() {
    let world = create_expanded_world();
    let cost = DistanceLoadCost::default();

    let towards_goal = LegContext { destination: world.airport_idx("BBBB").unwrap(), ..create_context(&world, 0, 3 * MINUTES_PER_DAY) };
    let far_from_goal = create_context(&world, 0, 3 * MINUTES_PER_DAY);

    // the same flight is cheaper when it lands at the final destination
    assert!(cost.estimate(&world, 0, &towards_goal) < cost.estimate(&world, 0, &far_from_goal));
}

#[test]
fn can_inflate_cost_with_load_factor() {
    let mut world = create_expanded_world();
    let cost = DistanceLoadCost::default();
    let ctx = create_context(&world, 0, 3 * MINUTES_PER_DAY);

    let empty = cost.estimate(&world, 0, &ctx);
    world.reserve_flight(0, 10).unwrap();
    let half_full = cost.estimate(&world, 0, &ctx);

    assert!((half_full / empty - 1.5).abs() < 1E-9);
}

#[test]
fn can_keep_congestion_free_below_threshold() {
    let cost = CompositeCost::default();

    assert_eq!(cost.congestion_penalty(0.), 0.);
    assert_eq!(cost.congestion_penalty(0.7), 0.);
    assert!((cost.congestion_penalty(0.9) - 0.16).abs() < 1E-9);
    assert!(cost.congestion_penalty(1.) > cost.congestion_penalty(0.9));
}

#[test]
fn can_estimate_sla_risk_from_forward_distance() {
    let world = create_expanded_world();
    let cost = CompositeCost::default();

    let relaxed = create_context(&world, 0, 3 * MINUTES_PER_DAY);
    assert_eq!(cost.sla_risk(&world, 1, &relaxed), 0.);

    // the promise expires right at the arrival, yet the package is not at CCCC yet
    let tight = create_context(&world, 0, 600);
    assert!(cost.sla_risk(&world, 0, &tight) > 0.);
}

#[test]
fn can_penalize_late_and_crowded_flights() {
    let mut world = create_expanded_world();
    let cost = CompositeCost::default();
    let ctx = create_context(&world, 0, 3 * MINUTES_PER_DAY);

    // instance 2 is the next day occurrence of the same template as instance 0
    let today = cost.estimate(&world, 0, &ctx);
    let tomorrow = cost.estimate(&world, 2, &ctx);
    assert!(today < tomorrow);

    world.reserve_flight(0, 19).unwrap();
    let crowded = cost.estimate(&world, 0, &ctx);
    assert!(crowded > today);
}
