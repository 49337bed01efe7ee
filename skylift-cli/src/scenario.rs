//! Defines the json scenario format: a snapshot of the scheduled network together
//! with the orders to plan and the planning window. Flight times are local clock
//! times in `HH:MM` notation; the window is given in minutes since epoch (UTC).

#[cfg(test)]
#[path = "../tests/unit/scenario_test.rs"]
mod scenario_test;

use serde::Deserialize;
use skylift_core::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub airports: Vec<AirportDef>,
    pub flights: Vec<FlightDef>,
    pub orders: Vec<OrderDef>,
    pub window: WindowDef,
}

#[derive(Debug, Deserialize)]
pub struct AirportDef {
    pub code: String,
    pub utc_offset: i32,
    pub capacity: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub continent: String,
}

#[derive(Debug, Deserialize)]
pub struct FlightDef {
    pub origin: String,
    pub destination: String,
    /// Local departure clock time, e.g. `"08:30"`.
    pub departure: String,
    /// Local arrival clock time.
    pub arrival: String,
    pub capacity: u32,
}

#[derive(Debug, Deserialize)]
pub struct OrderDef {
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Creation timestamp, minutes since epoch (UTC).
    pub created: i64,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct WindowDef {
    pub start: i64,
    pub end: i64,
}

/// Reads a scenario and converts it into the planner input types.
pub fn read_scenario<R: Read>(
    reader: R,
) -> GenericResult<(Vec<Airport>, Vec<FlightTemplate>, Vec<Order>, TimeWindow)> {
    let scenario: Scenario = serde_json::from_reader(reader)
        .map_err(|err| GenericError::from(format!("cannot parse scenario: '{err}'")))?;

    let airports = scenario
        .airports
        .iter()
        .map(|def| {
            Airport::new(
                &def.code,
                def.utc_offset,
                def.capacity,
                def.latitude,
                def.longitude,
                parse_continent(&def.continent)?,
            )
        })
        .collect::<GenericResult<Vec<_>>>()?;

    let templates = scenario
        .flights
        .iter()
        .map(|def| {
            FlightTemplate::new(
                &def.origin,
                &def.destination,
                parse_clock_time(&def.departure)?,
                parse_clock_time(&def.arrival)?,
                def.capacity,
            )
        })
        .collect::<GenericResult<Vec<_>>>()?;

    let orders = scenario
        .orders
        .into_iter()
        .map(|def| Order {
            id: def.id,
            origin: def.origin.to_uppercase(),
            destination: def.destination.to_uppercase(),
            created: def.created,
            quantity: def.quantity,
        })
        .collect();

    if scenario.window.start >= scenario.window.end {
        return Err(GenericError::from("scenario window is empty"));
    }

    Ok((airports, templates, orders, TimeWindow::new(scenario.window.start, scenario.window.end)))
}

/// Reads the route memory from a file, starting empty when the file does not exist yet.
pub fn load_memory(path: &str) -> GenericResult<RouteMemory> {
    if !Path::new(path).exists() {
        return Ok(RouteMemory::default());
    }

    let file = File::open(path).map_err(|err| GenericError::from(format!("cannot open memory file: '{err}'")))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| GenericError::from(format!("cannot parse memory file: '{err}'")))
}

/// Writes the route memory to a file.
pub fn save_memory(path: &str, memory: &RouteMemory) -> GenericResult<()> {
    let file = File::create(path).map_err(|err| GenericError::from(format!("cannot create memory file: '{err}'")))?;
    serde_json::to_writer(BufWriter::new(file), memory)
        .map_err(|err| GenericError::from(format!("cannot write memory file: '{err}'")))
}

fn parse_clock_time(value: &str) -> GenericResult<i64> {
    let (hours, minutes) = value
        .split_once(':')
        .ok_or_else(|| GenericError::from(format!("invalid clock time: '{value}', expected HH:MM")))?;

    let (hours, minutes) = (
        hours.parse::<i64>().map_err(|_| GenericError::from(format!("invalid hours in '{value}'")))?,
        minutes.parse::<i64>().map_err(|_| GenericError::from(format!("invalid minutes in '{value}'")))?,
    );

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(GenericError::from(format!("clock time out of range: '{value}'")));
    }

    Ok(hours * 60 + minutes)
}

fn parse_continent(value: &str) -> GenericResult<Continent> {
    match value.to_lowercase().replace(['_', '-', ' '], "").as_str() {
        "southamerica" => Ok(Continent::SouthAmerica),
        "europe" => Ok(Continent::Europe),
        "asia" => Ok(Continent::Asia),
        "other" => Ok(Continent::Other),
        _ => Err(GenericError::from(format!("unknown continent: '{value}'"))),
    }
}
