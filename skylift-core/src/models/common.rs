#[cfg(test)]
#[path = "../../tests/unit/models/common_test.rs"]
mod common_test;

/// Specifies an absolute point in time as minutes since epoch (UTC).
pub type Timestamp = i64;

/// Specifies an arena handle of an airport.
pub type AirportIdx = usize;

/// Specifies an arena handle of a flight template.
pub type TemplateIdx = usize;

/// Specifies an arena handle of a dated flight instance.
pub type InstanceIdx = usize;

/// Specifies a duration in minutes.
pub type Duration = i64;

/// Specifies cost value.
pub type Cost = f64;

/// Amount of minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Amount of minutes in one hour, which is also the capacity forecast bucket width.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Returns the calendar day (days since epoch) a timestamp falls into.
pub fn day_of(timestamp: Timestamp) -> i64 {
    timestamp.div_euclid(MINUTES_PER_DAY)
}

/// Returns the minute of day of a timestamp.
pub fn minute_of_day(timestamp: Timestamp) -> i64 {
    timestamp.rem_euclid(MINUTES_PER_DAY)
}

/// Represents a right-open planning window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    /// Window start.
    pub start: Timestamp,
    /// Window end, exclusive.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Checks whether given timestamp lies within the window.
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}
