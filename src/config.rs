use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::error::RoutingError;

pub mod constant {
    // Ant colony
    pub const NUM_ANTS: usize = 30;
    pub const NUM_ITERATIONS: usize = 100;
    pub const EVAPORATION_RATE: f64 = 0.5;
    pub const PHEROMONE_IMPORTANCE: f64 = 1.0;
    pub const HEURISTIC_IMPORTANCE: f64 = 2.0;
    pub const INITIAL_PHEROMONE: f64 = 1.0;

    // Wolf pack
    pub const NUM_WOLVES: usize = 30;
    pub const A_MAX: f64 = 2.0;

    // Objective
    pub const CRITERION_WEIGHT: f64 = 1.0 / 3.0;
    pub const SCORE_FLOOR: f64 = 1e-6;

    // Geometry
    pub const SIMPLIFY_TOLERANCE: f64 = 0.000001;
    pub const GEOMETRY_PROVIDER: &str = "osrm";
    pub const OSRM_BASE_URL: &str = "https://router.project-osrm.org/route/v1";
    pub const MAPBOX_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";
    pub const GEOMETRY_CACHE_TTL_SECS: i64 = 24 * 60 * 60;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;

    // Runner
    pub const SEED: u64 = 12345;
    pub const STRATEGY: &str = "both";
    pub const OUTPUT_DIR: &str = "routing-output";
    pub const DATABASE_URL: &str = "sqlite:evac_router.sqlite";
    pub const SYNTHETIC_AREAS: usize = 4;
    pub const SYNTHETIC_ROUTES_PER_AREA: usize = 6;
}

/// Which search(es) the runner executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AntColony,
    WolfPack,
    Both,
}

impl FromStr for Strategy {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aco" | "ant" | "ant_colony" => Ok(Strategy::AntColony),
            "gwo" | "wolf" | "wolf_pack" => Ok(Strategy::WolfPack),
            "both" | "all" => Ok(Strategy::Both),
            _ => Err(RoutingError::UnknownOption {
                kind: "strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// Where the polyline of the winning route comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryProvider {
    Osrm,
    Mapbox,
    Disabled,
}

impl FromStr for GeometryProvider {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "osrm" => Ok(GeometryProvider::Osrm),
            "mapbox" => Ok(GeometryProvider::Mapbox),
            "none" | "off" | "disabled" => Ok(GeometryProvider::Disabled),
            _ => Err(RoutingError::UnknownOption {
                kind: "geometry provider",
                value: s.to_string(),
            }),
        }
    }
}

/// Runtime settings resolved from the environment (and `.env`), falling back
/// to the defaults in [`constant`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub strategy: Strategy,
    pub seed: u64,
    pub provider: GeometryProvider,
    pub osrm_base_url: String,
    /// Sent in the User-Agent when talking to the public OSRM server.
    pub contact_email: Option<String>,
    pub mapbox_token: Option<String>,
    pub database_url: String,
    pub cache_ttl_secs: i64,
    pub simplify_tolerance: f64,
}

impl Settings {
    pub fn from_env() -> Result<Self, RoutingError> {
        let input = env::var("ROUTING_INPUT").ok().map(PathBuf::from);
        if input.is_none() {
            warn!("ROUTING_INPUT not set, a synthetic catalog will be generated");
        }

        let strategy = env::var("ROUTING_STRATEGY")
            .unwrap_or_else(|_| constant::STRATEGY.to_string())
            .parse()?;
        let provider: GeometryProvider = env::var("GEOMETRY_PROVIDER")
            .unwrap_or_else(|_| constant::GEOMETRY_PROVIDER.to_string())
            .parse()?;

        let mapbox_token = load_mapbox_token(provider)?;

        let settings = Settings {
            input,
            output_dir: env::var("ROUTING_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(constant::OUTPUT_DIR)),
            strategy,
            seed: parse_or("ROUTING_SEED", constant::SEED),
            provider,
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| constant::OSRM_BASE_URL.to_string()),
            contact_email: env::var("ROUTING_CONTACT_EMAIL")
                .ok()
                .map(|email| email.trim().to_string())
                .filter(|email| !email.is_empty()),
            mapbox_token,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                warn!("DATABASE_URL not set, using default SQLite file");
                constant::DATABASE_URL.to_string()
            }),
            cache_ttl_secs: parse_or("GEOMETRY_CACHE_TTL_SECS", constant::GEOMETRY_CACHE_TTL_SECS),
            simplify_tolerance: parse_or("SIMPLIFY_TOLERANCE", constant::SIMPLIFY_TOLERANCE),
        };

        info!(
            "Settings: strategy={:?}, seed={}, provider={:?}",
            settings.strategy, settings.seed, settings.provider
        );
        Ok(settings)
    }
}

/// Mapbox needs an access token; the other providers don't.
fn load_mapbox_token(provider: GeometryProvider) -> Result<Option<String>, RoutingError> {
    if provider != GeometryProvider::Mapbox {
        return Ok(None);
    }
    match env::var("MAPBOX_ACCESS_TOKEN") {
        Ok(token) => {
            info!("Loaded Mapbox access token from environment");
            Ok(Some(token))
        }
        Err(_) => Err(RoutingError::MissingEnv("MAPBOX_ACCESS_TOKEN")),
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Could not parse {}='{}', using {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_accepts_short_and_long_names() {
        assert_eq!("aco".parse::<Strategy>().unwrap(), Strategy::AntColony);
        assert_eq!("Wolf_Pack".parse::<Strategy>().unwrap(), Strategy::WolfPack);
        assert_eq!(" both ".parse::<Strategy>().unwrap(), Strategy::Both);
        assert!("tabu".parse::<Strategy>().is_err());
    }

    #[test]
    fn provider_can_be_disabled() {
        assert_eq!(
            "none".parse::<GeometryProvider>().unwrap(),
            GeometryProvider::Disabled
        );
        assert_eq!(
            "MAPBOX".parse::<GeometryProvider>().unwrap(),
            GeometryProvider::Mapbox
        );
    }

    #[test]
    fn mapbox_token_not_required_for_osrm() {
        assert!(load_mapbox_token(GeometryProvider::Osrm).unwrap().is_none());
    }
}
