use thiserror::Error;

/// Errors raised while building a catalog, configuring a search or talking
/// to the outside world (files, routing APIs, the geometry cache).
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("evacuation area '{area_id}' has no candidate routes")]
    EmptyArea { area_id: String },

    #[error("route '{route_id}' appears more than once in scope '{scope}'")]
    DuplicateRoute { scope: String, route_id: String },

    #[error("route '{route_id}' has invalid {field}: {value} (must be finite and non-negative)")]
    InvalidAttribute {
        route_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("wolf pack needs at least 3 wolves to pick alpha, beta and delta, got {0}")]
    TooFewWolves(usize),

    #[error("evaporation rate must lie in [0, 1), got {0}")]
    InvalidEvaporationRate(f64),

    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("geometry provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
