//! Provides building blocks for unit tests: small networks, orders and a seeded
//! random source so that stochastic behavior stays reproducible.

use crate::construction::{AcoConfig, WorldState};
use crate::models::{Airport, Continent, FlightTemplate, Order, TimeWindow, Timestamp, MINUTES_PER_DAY};
use crate::utils::DefaultRandom;

/// Creates an airport with zero UTC offset so that local times equal UTC in tests.
pub fn create_test_airport(code: &str, continent: Continent, capacity: u32, latitude: f64, longitude: f64) -> Airport {
    Airport::new(code, 0, capacity, latitude, longitude, continent).expect("cannot create test airport")
}

/// Creates a daily flight template.
pub fn create_test_template(
    origin: &str,
    destination: &str,
    departure_minute: i64,
    arrival_minute: i64,
    capacity: u32,
) -> FlightTemplate {
    FlightTemplate::new(origin, destination, departure_minute, arrival_minute, capacity)
        .expect("cannot create test template")
}

/// Creates an order.
pub fn create_test_order(id: &str, origin: &str, destination: &str, created: Timestamp, quantity: u32) -> Order {
    Order { id: id.to_string(), origin: origin.to_string(), destination: destination.to_string(), created, quantity }
}

/// Returns a three day planning window starting at epoch.
pub fn create_test_window() -> TimeWindow {
    TimeWindow::new(0, 3 * MINUTES_PER_DAY)
}

/// Creates a world without hubs.
pub fn create_test_world(airports: Vec<Airport>, templates: Vec<FlightTemplate>) -> WorldState {
    WorldState::new(airports, templates, create_test_window(), &[]).expect("cannot create test world")
}

/// Creates a world with given hub codes.
pub fn create_test_world_with_hubs(
    airports: Vec<Airport>,
    templates: Vec<FlightTemplate>,
    hubs: &[String],
) -> WorldState {
    WorldState::new(airports, templates, create_test_window(), hubs).expect("cannot create test world")
}

/// Returns the airports of the standard A-B-C line: two South American airports and
/// an European one, so A to C crosses a continent boundary.
pub fn create_abc_airports() -> Vec<Airport> {
    vec![
        create_test_airport("AAAA", Continent::SouthAmerica, 100, -12.0, -77.1),
        create_test_airport("BBBB", Continent::SouthAmerica, 50, -0.1, -78.4),
        create_test_airport("CCCC", Continent::Europe, 80, 50.5, 4.5),
    ]
}

/// Returns the daily flights of the standard A-B-C line: A-B in the morning,
/// B-C at noon.
pub fn create_abc_templates() -> Vec<FlightTemplate> {
    vec![
        create_test_template("AAAA", "BBBB", 8 * 60, 10 * 60, 20),
        create_test_template("BBBB", "CCCC", 12 * 60, 22 * 60, 20),
    ]
}

/// Creates the standard A-B-C world.
pub fn create_abc_world() -> WorldState {
    create_test_world(create_abc_airports(), create_abc_templates())
}

/// Returns a seeded random source.
pub fn create_test_random() -> DefaultRandom {
    DefaultRandom::new_repeatable(42)
}

/// Returns the default search configuration used by tests.
pub fn create_test_config() -> AcoConfig {
    AcoConfig::default()
}
