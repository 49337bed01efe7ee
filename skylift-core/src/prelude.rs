//! This module reimports commonly used types.

pub use crate::solver::{CapacityKind, Planner, PlannerConfig, RouteMemory};

pub use crate::models::{Airport, Continent, FlightTemplate, Order, PlanResult, PlanStatus, SlaPolicy, TimeWindow};

pub use crate::construction::{AcoConfig, CapacityModel, LegCost, WorldState};

pub use crate::solver::{create_noop_logger, create_stdout_logger, InfoLogger};

pub use crate::utils::{DefaultRandom, GenericError, GenericResult, Random};
