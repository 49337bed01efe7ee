//! Building blocks of the route construction engine: the time-expanded flight graph
//! with shared capacity state, the capacity models, the heuristic leg costs, the
//! pheromone table and the ant which assembles itineraries from all of them.

mod world;
pub use self::world::*;

mod capacity;
pub use self::capacity::*;

mod heuristics;
pub use self::heuristics::*;

mod pheromone;
pub use self::pheromone::*;

mod ant;
pub use self::ant::*;
