//! A collection of models to represent the air-cargo planning problem and its solution.

mod common;
pub use self::common::*;

mod network;
pub use self::network::*;

mod shipment;
pub use self::shipment::*;

mod solution;
pub use self::solution::*;
