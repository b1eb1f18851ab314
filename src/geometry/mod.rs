pub mod simplify;

pub use simplify::simplify_waypoints;
