pub mod fetch;
pub mod providers;

pub use fetch::GeometryClient;
