pub mod config;
pub mod database;
pub mod directions;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod geometry;
pub mod output;
pub mod setup;
pub mod solver;
pub mod utils;

pub use error::{Result, RoutingError};
