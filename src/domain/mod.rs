pub mod catalog;
pub mod solution;
pub mod types;

pub use catalog::{CatalogLayout, RouteCatalog};
pub use solution::{BestRoute, RoutingOutput};
pub use types::*;
