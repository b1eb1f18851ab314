pub mod pheromone;
pub mod search;
pub mod selection;

pub use pheromone::PheromoneField;
pub use search::{AntColony, AntColonyParams};
