#[cfg(test)]
#[path = "../../tests/unit/construction/world_test.rs"]
mod world_test;

use crate::models::{
    day_of, Airport, AirportIdx, FlightTemplate, InstanceIdx, TemplateIdx, TimeSeriesCounter, TimeWindow, Timestamp,
    MINUTES_PER_DAY, MINUTES_PER_HOUR,
};
use crate::utils::{GenericError, GenericResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{Display, Formatter};

/// A stable identity of a dated flight instance used as the pheromone and capacity key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlightInstanceId {
    /// Flight template handle.
    pub template: TemplateIdx,
    /// Absolute departure timestamp.
    pub departure: Timestamp,
}

impl Display for FlightInstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}@{}", self.template, self.departure)
    }
}

/// One dated occurrence of a flight template. Remaining capacity decreases
/// monotonically as packages are reserved onto the instance.
#[derive(Clone, Debug)]
pub struct FlightInstance {
    /// Flight template handle.
    pub template: TemplateIdx,
    /// Origin airport handle.
    pub origin: AirportIdx,
    /// Destination airport handle.
    pub destination: AirportIdx,
    /// Absolute departure timestamp (UTC).
    pub departure: Timestamp,
    /// Absolute arrival timestamp (UTC).
    pub arrival: Timestamp,
    /// Total seat capacity in packages.
    pub capacity: u32,
    /// Amount of packages already reserved.
    pub reserved: u32,
}

impl FlightInstance {
    /// Returns the stable identity of the instance.
    pub fn id(&self) -> FlightInstanceId {
        FlightInstanceId { template: self.template, departure: self.departure }
    }

    /// Returns remaining seat capacity.
    pub fn headroom(&self) -> u32 {
        self.capacity - self.reserved
    }

    /// Returns consumed capacity ratio in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            1.
        } else {
            f64::from(self.reserved) / f64::from(self.capacity)
        }
    }
}

/// Holds the shared mutable state of one planning run: airports, flight templates,
/// lazily expanded dated flight instances with their remaining capacities, and the
/// run level ("real") warehouse occupancy view written when a solution is committed.
///
/// Instances are expanded monotonically: a template is never re-expanded for an
/// already expanded date, and instances are never deleted within a run.
pub struct WorldState {
    airports: Vec<Airport>,
    airport_index: FxHashMap<String, AirportIdx>,
    templates: Vec<FlightTemplate>,
    template_ends: Vec<(AirportIdx, AirportIdx)>,
    template_keys: FxHashMap<String, TemplateIdx>,
    instances: Vec<FlightInstance>,
    instance_index: FxHashMap<FlightInstanceId, InstanceIdx>,
    outbound: Vec<Vec<InstanceIdx>>,
    by_template: Vec<Vec<InstanceIdx>>,
    committed: Vec<TimeSeriesCounter>,
    hubs: FxHashSet<AirportIdx>,
    window: TimeWindow,
    expanded_until: i64,
}

impl WorldState {
    /// Creates a new world from an airport and flight template snapshot.
    pub fn new(
        airports: Vec<Airport>,
        templates: Vec<FlightTemplate>,
        window: TimeWindow,
        hubs: &[String],
    ) -> GenericResult<Self> {
        let mut airport_index = FxHashMap::default();
        for (idx, airport) in airports.iter().enumerate() {
            if airport_index.insert(airport.code.clone(), idx).is_some() {
                return Err(GenericError::from(format!("duplicate airport code: '{}'", airport.code)));
            }
        }

        let mut template_ends = Vec::with_capacity(templates.len());
        let mut template_keys = FxHashMap::default();
        for (idx, template) in templates.iter().enumerate() {
            let origin = *airport_index
                .get(&template.origin)
                .ok_or_else(|| GenericError::from(format!("unknown flight origin: '{}'", template.origin)))?;
            let destination = *airport_index
                .get(&template.destination)
                .ok_or_else(|| GenericError::from(format!("unknown flight destination: '{}'", template.destination)))?;

            template_ends.push((origin, destination));
            template_keys.insert(template.natural_key(), idx);
        }

        let hubs = hubs.iter().filter_map(|code| airport_index.get(code).copied()).collect();

        let airports_len = airports.len();
        let templates_len = templates.len();

        Ok(Self {
            airports,
            airport_index,
            templates,
            template_ends,
            template_keys,
            instances: Vec::default(),
            instance_index: FxHashMap::default(),
            outbound: vec![Vec::default(); airports_len],
            by_template: vec![Vec::default(); templates_len],
            committed: vec![TimeSeriesCounter::default(); airports_len],
            hubs,
            window,
            expanded_until: day_of(window.start) - 1,
        })
    }

    /// Returns all airports.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Returns an airport by its handle.
    pub fn airport(&self, idx: AirportIdx) -> &Airport {
        &self.airports[idx]
    }

    /// Resolves an airport code to its handle.
    pub fn airport_idx(&self, code: &str) -> Option<AirportIdx> {
        self.airport_index.get(code).copied()
    }

    /// Checks whether given airport is a designated hub with unlimited warehouse.
    pub fn is_hub(&self, idx: AirportIdx) -> bool {
        self.hubs.contains(&idx)
    }

    /// Returns all flight templates.
    pub fn templates(&self) -> &[FlightTemplate] {
        &self.templates
    }

    /// Resolves a template natural key to its handle.
    pub fn template_idx(&self, natural_key: &str) -> Option<TemplateIdx> {
        self.template_keys.get(natural_key).copied()
    }

    /// Returns the planning window of the run.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Returns a flight instance by its handle.
    pub fn instance(&self, idx: InstanceIdx) -> &FlightInstance {
        &self.instances[idx]
    }

    /// Returns amount of expanded instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Returns a reconstructible external tag of a dated instance:
    /// template natural key plus absolute departure timestamp.
    pub fn instance_tag(&self, idx: InstanceIdx) -> String {
        let instance = &self.instances[idx];
        format!("{}@{}", self.templates[instance.template].natural_key(), instance.departure)
    }

    /// Resolves an external instance tag back to a handle, if the instance exists.
    pub fn instance_by_tag(&self, tag: &str) -> Option<InstanceIdx> {
        let (key, departure) = tag.rsplit_once('@')?;
        let template = self.template_idx(key)?;
        let departure = departure.parse::<Timestamp>().ok()?;

        self.instance_index.get(&FlightInstanceId { template, departure }).copied()
    }

    /// Makes sure dated instances of every template exist for all days up to and
    /// including the given day. Growth is monotonic: already expanded days are skipped.
    pub fn ensure_expanded_through(&mut self, day: i64) {
        while self.expanded_until < day {
            let next = self.expanded_until + 1;
            for template_idx in 0..self.templates.len() {
                self.materialize(template_idx, next);
            }
            self.expanded_until = next;
        }
    }

    /// Returns the last expanded day, if any day was expanded.
    pub fn expanded_until(&self) -> i64 {
        self.expanded_until
    }

    /// Returns outbound instances of an airport departing strictly after given time,
    /// ordered by departure.
    pub fn outbound_after(&self, airport: AirportIdx, after: Timestamp) -> impl Iterator<Item = InstanceIdx> + '_ {
        let sorted = &self.outbound[airport];
        let start = sorted.partition_point(|&idx| self.instances[idx].departure <= after);

        sorted[start..].iter().copied()
    }

    /// Returns the earliest instance of a template departing strictly after given time.
    pub fn next_instance_of(&self, template: TemplateIdx, after: Timestamp) -> Option<InstanceIdx> {
        let sorted = &self.by_template[template];
        let start = sorted.partition_point(|&idx| self.instances[idx].departure <= after);

        sorted.get(start).copied()
    }

    /// Reserves seats on a flight instance, validating remaining capacity.
    pub fn reserve_flight(&mut self, idx: InstanceIdx, quantity: u32) -> GenericResult<()> {
        let instance = &mut self.instances[idx];
        if instance.headroom() < quantity {
            return Err(GenericError::from(format!(
                "flight {} has no capacity: {} requested, {} left",
                instance.id(),
                quantity,
                instance.headroom()
            )));
        }

        instance.reserved += quantity;
        Ok(())
    }

    /// Releases previously reserved seats on a flight instance.
    pub fn release_flight(&mut self, idx: InstanceIdx, quantity: u32) {
        let instance = &mut self.instances[idx];
        instance.reserved = instance.reserved.saturating_sub(quantity);
    }

    /// Returns the largest remaining seat count over outbound instances of an airport
    /// departing within `[from, to)`.
    pub fn max_outbound_headroom(&self, airport: AirportIdx, from: Timestamp, to: Timestamp) -> u32 {
        self.outbound_after(airport, from - 1)
            .map(|idx| &self.instances[idx])
            .take_while(|instance| instance.departure < to)
            .map(|instance| instance.headroom())
            .max()
            .unwrap_or(0)
    }

    /// Returns total remaining outbound seat capacity of an airport within `[from, to]`.
    pub fn outbound_capacity(&self, airport: AirportIdx, from: Timestamp, to: Timestamp) -> u64 {
        self.outbound_after(airport, from - 1)
            .map(|idx| &self.instances[idx])
            .take_while(|instance| instance.departure <= to)
            .map(|instance| u64::from(instance.headroom()))
            .sum()
    }

    /// Resets all per iteration flight reservations to zero.
    pub fn reset_capacity(&mut self) {
        self.instances.iter_mut().for_each(|instance| instance.reserved = 0);
    }

    /// Clears the run level occupancy view.
    pub fn reset_committed(&mut self) {
        self.committed.iter_mut().for_each(TimeSeriesCounter::clear);
    }

    /// Returns the run level ("real") occupancy counter of an airport.
    pub fn committed_occupancy(&self, airport: AirportIdx) -> &TimeSeriesCounter {
        &self.committed[airport]
    }

    /// Records a warehouse stay into the run level occupancy view.
    pub fn commit_dwell(
        &mut self,
        airport: AirportIdx,
        from: Timestamp,
        to: Timestamp,
        quantity: u32,
    ) -> GenericResult<()> {
        if self.is_hub(airport) {
            return Ok(());
        }

        let capacity = self.airports[airport].capacity;
        self.committed[airport].add(from, to, quantity, Some(capacity))
    }

    fn materialize(&mut self, template_idx: TemplateIdx, day: i64) {
        let template = &self.templates[template_idx];
        let (origin, destination) = self.template_ends[template_idx];

        let departure =
            day * MINUTES_PER_DAY + template.departure_minute - i64::from(self.airports[origin].utc_offset) * MINUTES_PER_HOUR;
        let mut arrival =
            day * MINUTES_PER_DAY + template.arrival_minute - i64::from(self.airports[destination].utc_offset) * MINUTES_PER_HOUR;

        // day rollover: the flight lands the next calendar day or later
        while arrival <= departure {
            arrival += MINUTES_PER_DAY;
        }

        let instance = FlightInstance {
            template: template_idx,
            origin,
            destination,
            departure,
            arrival,
            capacity: template.capacity,
            reserved: 0,
        };

        let idx = self.instances.len();
        self.instance_index.insert(instance.id(), idx);

        let sorted = &mut self.outbound[origin];
        let position = sorted.partition_point(|&other| self.instances[other].departure <= departure);
        sorted.insert(position, idx);

        self.by_template[template_idx].push(idx);
        self.instances.push(instance);
    }
}
