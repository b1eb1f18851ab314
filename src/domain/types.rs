use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(latitude, longitude)` pair, written as `[lat, lon]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinates { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Coordinates { lat, lon }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lon]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Cycling,
    Driving,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Driving => "driving",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard readings sampled at one waypoint of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardNode {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub flood_level: f64,
    #[serde(default)]
    pub debris_hazard: f64,
}

/// A candidate route serving one evacuation area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRoute {
    pub route_id: String,
    pub area_id: String,
    pub distance: f64,
    pub hazard_zones: f64,
    pub flood_depth: f64,
    pub destination: Coordinates,
}

/// A candidate route toward the shared destination for one transport mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeRoute {
    pub route_id: String,
    pub mode: TransportMode,
    pub distance: f64,
    pub debris_hazard: f64,
    pub flood_level: f64,
    pub destination: Coordinates,
    pub nodes: Vec<HazardNode>,
}

/// Identity used for pheromone bookkeeping. Route ids are only unique within
/// their area or mode, so the scope is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKey {
    Area { area_id: String, route_id: String },
    Mode { mode: TransportMode, route_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Area(AreaRoute),
    Mode(ModeRoute),
}

impl Route {
    pub fn route_id(&self) -> &str {
        match self {
            Route::Area(r) => &r.route_id,
            Route::Mode(r) => &r.route_id,
        }
    }

    pub fn key(&self) -> RouteKey {
        match self {
            Route::Area(r) => RouteKey::Area {
                area_id: r.area_id.clone(),
                route_id: r.route_id.clone(),
            },
            Route::Mode(r) => RouteKey::Mode {
                mode: r.mode,
                route_id: r.route_id.clone(),
            },
        }
    }

    pub fn distance(&self) -> f64 {
        match self {
            Route::Area(r) => r.distance,
            Route::Mode(r) => r.distance,
        }
    }

    /// Pre-aggregated hazard term (`hazard_zones` or `debris_hazard`).
    pub fn hazard(&self) -> f64 {
        match self {
            Route::Area(r) => r.hazard_zones,
            Route::Mode(r) => r.debris_hazard,
        }
    }

    /// Pre-aggregated flood term (`flood_depth` or `flood_level`).
    pub fn flood(&self) -> f64 {
        match self {
            Route::Area(r) => r.flood_depth,
            Route::Mode(r) => r.flood_level,
        }
    }

    pub fn nodes(&self) -> &[HazardNode] {
        match self {
            Route::Area(_) => &[],
            Route::Mode(r) => &r.nodes,
        }
    }

    pub fn destination(&self) -> Coordinates {
        match self {
            Route::Area(r) => r.destination,
            Route::Mode(r) => r.destination,
        }
    }

    pub fn area_id(&self) -> Option<&str> {
        match self {
            Route::Area(r) => Some(&r.area_id),
            Route::Mode(_) => None,
        }
    }

    pub fn mode(&self) -> Option<TransportMode> {
        match self {
            Route::Area(_) => None,
            Route::Mode(r) => Some(r.mode),
        }
    }

    /// Area id or mode label, used in logs and error messages.
    pub fn scope_label(&self) -> String {
        match self {
            Route::Area(r) => r.area_id.clone(),
            Route::Mode(r) => r.mode.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvacuationArea {
    pub area_id: String,
    pub destination: Coordinates,
    pub routes: Vec<Route>,
}

/// Position of a route inside a catalog: `group` is the evacuation area (or
/// the single pooled group), `index` the route within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteRef {
    pub group: usize,
    pub index: usize,
}
