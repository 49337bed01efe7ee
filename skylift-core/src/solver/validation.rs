#[cfg(test)]
#[path = "../../tests/unit/solver/validation_test.rs"]
mod validation_test;

use crate::construction::{AcoConfig, AntState, CapacityModel, LegContext, LegCost, PackageState, WorldState};
use crate::models::{day_of, AirportIdx, Duration, TemplateIdx, Timestamp};
use crate::utils::{GenericError, GenericResult};

/// Describes a package a route should be replayed for.
#[derive(Clone, Copy, Debug)]
pub struct RouteQuery {
    /// Origin airport.
    pub origin: AirportIdx,
    /// Final destination airport.
    pub destination: AirportIdx,
    /// Package creation timestamp.
    pub created: Timestamp,
    /// Latest acceptable arrival at the destination warehouse.
    pub latest_arrival: Timestamp,
    /// Destination processing dwell, in minutes.
    pub processing: Duration,
    /// Amount of packages travelling together.
    pub quantity: u32,
}

/// Replays a template sequence leg by leg against current capacity state and, on
/// success, leaves all capacity debits applied: validation doubles as application.
///
/// Each leg is bound to the earliest dated instance of its template departing after
/// the package current time, so a flight whose clock time already passed is taken
/// the following day. The replay fails when the sequence is disconnected, a leg has
/// no capacity headroom, or the final airport or arrival time breaks the promise.
pub fn validate_and_apply(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    cost: &dyn LegCost,
    templates: &[TemplateIdx],
    query: &RouteQuery,
    config: &AcoConfig,
) -> GenericResult<PackageState> {
    let mut package = PackageState::new(
        query.origin,
        query.destination,
        query.created,
        query.latest_arrival,
        query.processing,
        query.quantity,
    );

    let outcome = replay(world, capacity, cost, templates, config, &mut package);
    if let Err(err) = outcome {
        package.rollback(world, capacity);
        return Err(err);
    }

    if package.state != AntState::Arrived {
        package.rollback(world, capacity);
        return Err(GenericError::from("route does not end at the order destination"));
    }

    Ok(package)
}

/// Answers whether the template sequence is currently feasible for the package
/// without debiting any capacity. Usable independently for auditing or replay.
pub fn is_feasible(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    cost: &dyn LegCost,
    templates: &[TemplateIdx],
    query: &RouteQuery,
    config: &AcoConfig,
) -> bool {
    match validate_and_apply(world, capacity, cost, templates, query, config) {
        Ok(mut package) => {
            package.rollback(world, capacity);
            true
        }
        Err(_) => false,
    }
}

fn replay(
    world: &mut WorldState,
    capacity: &mut dyn CapacityModel,
    cost: &dyn LegCost,
    templates: &[TemplateIdx],
    config: &AcoConfig,
    package: &mut PackageState,
) -> GenericResult<()> {
    for &template in templates {
        let (airport, not_before) = package.position(world, config.min_connection);
        world.ensure_expanded_through(day_of(not_before) + config.lookahead_days - 1);

        let instance_idx = world
            .next_instance_of(template, not_before - 1)
            .ok_or_else(|| GenericError::from(format!("no instance of template {template} after {not_before}")))?;

        let instance = world.instance(instance_idx);
        if instance.origin != airport {
            return Err(GenericError::from(format!(
                "route is disconnected: template {template} does not depart from {}",
                world.airport(airport).code
            )));
        }

        if instance.arrival > package.latest_arrival {
            return Err(GenericError::from(format!(
                "instance {} arrives after the delivery promise",
                instance.id()
            )));
        }

        if !capacity.headroom_ok(world, instance.destination, instance.arrival, package.quantity) {
            return Err(GenericError::from(format!(
                "no warehouse headroom at {} for instance {}",
                world.airport(instance.destination).code,
                instance.id()
            )));
        }

        let ctx = LegContext {
            current_time: not_before,
            destination: package.destination,
            latest_arrival: package.latest_arrival,
        };
        let leg_cost = cost.estimate(world, instance_idx, &ctx);

        package.take_leg(world, capacity, instance_idx, leg_cost, config.min_connection)?;
    }

    Ok(())
}
