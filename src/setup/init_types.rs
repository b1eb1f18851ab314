use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::types::{Coordinates, HazardNode, TransportMode};

/// Either input layout; the shape is detected from the fields present.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RoutingInput {
    AreaScoped(AreaScopedInput),
    Pooled(PooledInput),
}

#[derive(Debug, Deserialize)]
pub struct AreaScopedInput {
    pub starting_location_coordinates: Coordinates,
    pub evacuation_areas: Vec<AreaInput>,
}

#[derive(Debug, Deserialize)]
pub struct AreaInput {
    pub area_id: String,
    pub destination_coordinates: Coordinates,
    #[serde(default)]
    pub routes: Vec<AreaRouteInput>,
}

#[derive(Debug, Deserialize)]
pub struct AreaRouteInput {
    pub route_id: String,
    pub distance: f64,
    #[serde(default)]
    pub hazard_zones: f64,
    #[serde(default)]
    pub flood_depth: f64,
}

#[derive(Debug, Deserialize)]
pub struct PooledInput {
    pub starting_location_coordinates: Coordinates,
    pub destination_coordinates: Coordinates,
    pub routes: Vec<ModeRouteInput>,
    /// Per-route hazard samples keyed by `route_id`.
    #[serde(default)]
    pub nodes: HashMap<String, Vec<HazardNode>>,
}

#[derive(Debug, Deserialize)]
pub struct ModeRouteInput {
    pub route_id: String,
    pub mode: TransportMode,
    pub distance: f64,
    #[serde(default)]
    pub debris_hazard: f64,
    #[serde(default)]
    pub flood_level: f64,
    #[serde(default)]
    pub waypoints: Vec<HazardNode>,
}
