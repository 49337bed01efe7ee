#[cfg(test)]
#[path = "../../tests/unit/construction/capacity_test.rs"]
mod capacity_test;

use crate::construction::WorldState;
use crate::models::{AirportIdx, InstanceIdx, TimeSeriesCounter, Timestamp, MINUTES_PER_HOUR};
use crate::utils::{GenericError, GenericResult};

/// A single capacity reservation applied while routing a package chunk. Recorded so
/// that a chunk which ends up stuck can roll its reservations back in reverse order.
#[derive(Clone, Debug)]
pub enum CapacityDebit {
    /// Seats taken on a dated flight instance.
    Flight {
        /// Instance handle.
        instance: InstanceIdx,
        /// Amount of packages.
        quantity: u32,
    },
    /// A warehouse stay at an airport on the `[from, to)` interval.
    Dwell {
        /// Airport handle.
        airport: AirportIdx,
        /// Stay start.
        from: Timestamp,
        /// Stay end, exclusive.
        to: Timestamp,
        /// Amount of packages.
        quantity: u32,
    },
}

/// Validates and tracks warehouse occupancy during route construction. The flight
/// seat counters live on the world itself; this trait owns the per iteration
/// planning view of airport warehouses, which exists in two flavors: the flat
/// instant check of the first generation engine and the bucketed forecast of the
/// refined one.
pub trait CapacityModel: Send {
    /// Drops all planning occupancy, called at the start of every iteration.
    fn reset(&mut self, world: &WorldState);

    /// Checks whether an arrival of given quantity can be absorbed by the airport
    /// warehouse. Designated hubs always pass.
    fn headroom_ok(&self, world: &WorldState, airport: AirportIdx, arrival: Timestamp, quantity: u32) -> bool;

    /// Records a warehouse stay on the `[from, to)` interval, validating capacity.
    fn occupy(
        &mut self,
        world: &WorldState,
        airport: AirportIdx,
        from: Timestamp,
        to: Timestamp,
        quantity: u32,
    ) -> GenericResult<()>;

    /// Releases a previously recorded warehouse stay.
    fn release(&mut self, world: &WorldState, airport: AirportIdx, from: Timestamp, to: Timestamp, quantity: u32);

    /// Returns planning occupancy effective at given airport and time.
    fn occupancy_at(&self, world: &WorldState, airport: AirportIdx, at: Timestamp) -> u32;
}

/// The flat capacity model: a time indexed occupancy counter per airport, validated
/// against the warehouse capacity at the arrival instant only.
#[derive(Default)]
pub struct FlatCapacity {
    occupancy: Vec<TimeSeriesCounter>,
}

impl FlatCapacity {
    /// Creates a model sized for the given world.
    pub fn new(world: &WorldState) -> Self {
        Self { occupancy: vec![TimeSeriesCounter::default(); world.airports().len()] }
    }
}

impl CapacityModel for FlatCapacity {
    fn reset(&mut self, world: &WorldState) {
        self.occupancy = vec![TimeSeriesCounter::default(); world.airports().len()];
    }

    fn headroom_ok(&self, world: &WorldState, airport: AirportIdx, arrival: Timestamp, quantity: u32) -> bool {
        if world.is_hub(airport) {
            return true;
        }

        self.occupancy[airport].value_at(arrival) + quantity <= world.airport(airport).capacity
    }

    fn occupy(
        &mut self,
        world: &WorldState,
        airport: AirportIdx,
        from: Timestamp,
        to: Timestamp,
        quantity: u32,
    ) -> GenericResult<()> {
        if world.is_hub(airport) {
            return Ok(());
        }

        self.occupancy[airport].add(from, to, quantity, Some(world.airport(airport).capacity))
    }

    fn release(&mut self, world: &WorldState, airport: AirportIdx, from: Timestamp, to: Timestamp, quantity: u32) {
        if world.is_hub(airport) {
            return;
        }

        self.occupancy[airport].subtract(from, to, quantity);
    }

    fn occupancy_at(&self, _: &WorldState, airport: AirportIdx, at: Timestamp) -> u32 {
        self.occupancy[airport].value_at(at)
    }
}

/// The forecast capacity model: fixed one hour buckets over the whole planning
/// horizon. An arrival check smears over neighboring buckets to avoid sharp edge
/// false negatives, and a forward drain check rejects arrivals which are locally
/// fine but create an unresolvable downstream backlog.
pub struct ForecastCapacity {
    start: Timestamp,
    buckets: usize,
    occupancy: Vec<Vec<u32>>,
    /// Amount of neighboring buckets on each side considered by the arrival check.
    pub smear: usize,
    /// Forward drain horizon in buckets.
    pub drain_horizon: usize,
}

impl ForecastCapacity {
    /// Creates a model covering the whole planning window of the world plus the
    /// longest possible delivery overhang.
    pub fn new(world: &WorldState, overhang_buckets: usize) -> Self {
        let window = world.window();
        let span = (window.end - window.start).max(0) / MINUTES_PER_HOUR;
        let buckets = span as usize + overhang_buckets;

        Self {
            start: window.start,
            buckets,
            occupancy: vec![vec![0; buckets]; world.airports().len()],
            smear: 2,
            drain_horizon: 6,
        }
    }

    fn bucket_of(&self, at: Timestamp) -> usize {
        let offset = (at - self.start).max(0) / MINUTES_PER_HOUR;
        (offset as usize).min(self.buckets.saturating_sub(1))
    }

    fn peak(&self, airport: AirportIdx, from_bucket: usize, to_bucket: usize) -> u32 {
        self.occupancy[airport][from_bucket..=to_bucket.min(self.buckets - 1)].iter().copied().max().unwrap_or(0)
    }
}

impl CapacityModel for ForecastCapacity {
    fn reset(&mut self, world: &WorldState) {
        self.occupancy = vec![vec![0; self.buckets]; world.airports().len()];
    }

    fn headroom_ok(&self, world: &WorldState, airport: AirportIdx, arrival: Timestamp, quantity: u32) -> bool {
        if world.is_hub(airport) {
            return true;
        }

        let capacity = world.airport(airport).capacity;
        let bucket = self.bucket_of(arrival);

        // immediate check, smeared over the bucket neighborhood
        let from = bucket.saturating_sub(self.smear);
        let to = bucket + self.smear;
        if self.peak(airport, from, to) + quantity > capacity {
            return false;
        }

        // predictive check: over the forward horizon, scheduled outbound capacity
        // must be able to drain the cumulative peak occupancy
        (1..=self.drain_horizon).all(|horizon| {
            let peak = self.peak(airport, bucket, bucket + horizon);
            let drain = world.outbound_capacity(airport, arrival, arrival + (horizon as i64) * MINUTES_PER_HOUR);

            u64::from(peak) + u64::from(quantity) <= u64::from(capacity) + drain
        })
    }

    fn occupy(
        &mut self,
        world: &WorldState,
        airport: AirportIdx,
        from: Timestamp,
        to: Timestamp,
        quantity: u32,
    ) -> GenericResult<()> {
        if world.is_hub(airport) {
            return Ok(());
        }

        let capacity = world.airport(airport).capacity;
        let (first, last) = (self.bucket_of(from), self.bucket_of((to - 1).max(from)));

        if self.occupancy[airport][first..=last].iter().any(|&value| value + quantity > capacity) {
            return Err(GenericError::from(format!(
                "warehouse {} is over capacity within buckets {first}..={last}",
                world.airport(airport).code
            )));
        }

        self.occupancy[airport][first..=last].iter_mut().for_each(|value| *value += quantity);
        Ok(())
    }

    fn release(&mut self, world: &WorldState, airport: AirportIdx, from: Timestamp, to: Timestamp, quantity: u32) {
        if world.is_hub(airport) {
            return;
        }

        let (first, last) = (self.bucket_of(from), self.bucket_of((to - 1).max(from)));
        self.occupancy[airport][first..=last].iter_mut().for_each(|value| *value = value.saturating_sub(quantity));
    }

    fn occupancy_at(&self, _: &WorldState, airport: AirportIdx, at: Timestamp) -> u32 {
        self.occupancy[airport][self.bucket_of(at)]
    }
}
