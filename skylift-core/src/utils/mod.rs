//! A collection of various utility helpers.

mod comparison;
pub use self::comparison::*;

mod error;
pub use self::error::*;

mod geo;
pub use self::geo::*;

mod parallel;
pub use self::parallel::*;

mod random;
pub use self::random::*;

mod timing;
pub use self::timing::*;
