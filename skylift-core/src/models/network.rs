#[cfg(test)]
#[path = "../../tests/unit/models/network_test.rs"]
mod network_test;

use crate::models::common::Timestamp;
use crate::utils::{GenericError, GenericResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Specifies a continent an airport belongs to. Used by the delivery promise rule:
/// shipments crossing a continent boundary get a longer commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    SouthAmerica,
    Europe,
    Asia,
    Other,
}

/// Represents an airport of the scheduled network together with its warehouse.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Airport {
    /// A 4-letter airport code.
    pub code: String,
    /// UTC offset of the airport local time, in hours.
    pub utc_offset: i32,
    /// Maximum amount of packages the warehouse can hold at any point in time.
    pub capacity: u32,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Continent the airport belongs to.
    pub continent: Continent,
}

impl Airport {
    /// Creates a new airport validating its code shape.
    pub fn new(
        code: &str,
        utc_offset: i32,
        capacity: u32,
        latitude: f64,
        longitude: f64,
        continent: Continent,
    ) -> GenericResult<Self> {
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GenericError::from(format!("invalid airport code: '{code}'")));
        }

        Ok(Self { code: code.to_uppercase(), utc_offset, capacity, latitude, longitude, continent })
    }
}

/// Represents a recurring flight: it departs every day at the same local time.
/// When the arrival local clock time is not after the departure clock time (in UTC
/// terms), the flight lands the next calendar day or later.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlightTemplate {
    /// Origin airport code.
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    /// Local departure time as minute of day at the origin airport.
    pub departure_minute: i64,
    /// Local arrival time as minute of day at the destination airport.
    pub arrival_minute: i64,
    /// Amount of packages one dated occurrence of this flight can carry.
    pub capacity: u32,
}

impl FlightTemplate {
    /// Creates a new flight template.
    pub fn new(
        origin: &str,
        destination: &str,
        departure_minute: i64,
        arrival_minute: i64,
        capacity: u32,
    ) -> GenericResult<Self> {
        if origin.eq_ignore_ascii_case(destination) {
            return Err(GenericError::from(format!("flight with same origin and destination: '{origin}'")));
        }

        if !(0..crate::models::common::MINUTES_PER_DAY).contains(&departure_minute)
            || !(0..crate::models::common::MINUTES_PER_DAY).contains(&arrival_minute)
        {
            return Err(GenericError::from("flight times must be within a single day as minute of day"));
        }

        Ok(Self {
            origin: origin.to_uppercase(),
            destination: destination.to_uppercase(),
            departure_minute,
            arrival_minute,
            capacity,
        })
    }

    /// Returns a stable natural key of the template which survives across planning runs.
    pub fn natural_key(&self) -> String {
        format!("{}-{}@{:02}{:02}", self.origin, self.destination, self.departure_minute / 60, self.departure_minute % 60)
    }
}

/// A time indexed counter: it records absolute values at change points and answers
/// queries by floor lookup, i.e. the value effective at time `t` is the most recent
/// recorded value at or before `t`.
#[derive(Clone, Debug, Default)]
pub struct TimeSeriesCounter {
    points: BTreeMap<Timestamp, u32>,
}

impl TimeSeriesCounter {
    /// Returns the value effective at given timestamp.
    pub fn value_at(&self, timestamp: Timestamp) -> u32 {
        self.points.range(..=timestamp).next_back().map(|(_, value)| *value).unwrap_or(0)
    }

    /// Returns the peak value within `[from, to)`.
    pub fn peak(&self, from: Timestamp, to: Timestamp) -> u32 {
        let inside = self.points.range(from..to).map(|(_, value)| *value).max().unwrap_or(0);
        inside.max(self.value_at(from))
    }

    /// Adds given quantity on the `[from, to)` interval. When a capacity limit is
    /// given, the operation is validated: it fails without modifying the counter if
    /// any point within the interval would exceed the limit.
    pub fn add(&mut self, from: Timestamp, to: Timestamp, quantity: u32, capacity: Option<u32>) -> GenericResult<()> {
        if from >= to {
            return Err(GenericError::from(format!("invalid counter interval: [{from}, {to})")));
        }

        self.ensure_point(from);
        self.ensure_point(to);

        if let Some(capacity) = capacity {
            let violation = self
                .points
                .range(from..to)
                .find(|(_, value)| **value + quantity > capacity)
                .map(|(timestamp, value)| (*timestamp, *value));

            if let Some((timestamp, value)) = violation {
                return Err(GenericError::from(format!(
                    "capacity exceeded at {timestamp}: {value} + {quantity} > {capacity}"
                )));
            }
        }

        self.points.range_mut(from..to).for_each(|(_, value)| *value += quantity);

        Ok(())
    }

    /// Subtracts given quantity on the `[from, to)` interval, saturating at zero.
    pub fn subtract(&mut self, from: Timestamp, to: Timestamp, quantity: u32) {
        if from >= to {
            return;
        }

        self.ensure_point(from);
        self.ensure_point(to);

        self.points.range_mut(from..to).for_each(|(_, value)| *value = value.saturating_sub(quantity));
    }

    /// Removes all recorded points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    fn ensure_point(&mut self, timestamp: Timestamp) {
        let value = self.value_at(timestamp);
        self.points.entry(timestamp).or_insert(value);
    }
}
