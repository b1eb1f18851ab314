use std::fs;
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::domain::types::{AreaRoute, EvacuationArea, ModeRoute, Route};
use crate::domain::RouteCatalog;
use crate::error::RoutingError;
use crate::setup::init_types::*;

/// Reads a routing input file and builds the catalog it describes.
pub fn load_catalog(path: &Path) -> Result<RouteCatalog, RoutingError> {
    info!("Loading route catalog from {}", path.display());
    let file_content = fs::read_to_string(path)?;
    parse_catalog(&file_content)
}

pub fn parse_catalog(json: &str) -> Result<RouteCatalog, RoutingError> {
    let input: RoutingInput = serde_json::from_str(json)?;
    match input {
        RoutingInput::AreaScoped(input) => build_area_catalog(input),
        RoutingInput::Pooled(input) => build_pooled_catalog(input),
    }
}

fn build_area_catalog(input: AreaScopedInput) -> Result<RouteCatalog, RoutingError> {
    let areas: Vec<EvacuationArea> = input
        .evacuation_areas
        .into_iter()
        .map(|area| {
            let destination = area.destination_coordinates;
            let routes = area
                .routes
                .into_iter()
                .map(|r| {
                    Route::Area(AreaRoute {
                        route_id: r.route_id,
                        area_id: area.area_id.clone(),
                        distance: r.distance,
                        hazard_zones: r.hazard_zones,
                        flood_depth: r.flood_depth,
                        destination,
                    })
                })
                .collect();
            EvacuationArea {
                area_id: area.area_id,
                destination,
                routes,
            }
        })
        .collect();

    debug!(
        "Parsed {} evacuation areas with {} routes",
        areas.len(),
        areas.iter().map(|a| a.routes.len()).sum::<usize>()
    );
    RouteCatalog::area_scoped(input.starting_location_coordinates, areas)
}

fn build_pooled_catalog(input: PooledInput) -> Result<RouteCatalog, RoutingError> {
    let destination = input.destination_coordinates;

    let id_counts = input.routes.iter().counts_by(|r| r.route_id.as_str());
    for (route_id, count) in &id_counts {
        if *count > 1 && input.nodes.contains_key(*route_id) {
            warn!(
                "Route id '{}' is used by {} modes, each of them gets the same hazard nodes",
                route_id, count
            );
        }
    }
    for orphan in input.nodes.keys().filter(|id| !id_counts.contains_key(id.as_str())) {
        warn!("Hazard nodes given for unknown route '{}', ignoring", orphan);
    }

    let routes: Vec<Route> = input
        .routes
        .into_iter()
        .map(|r| {
            // inline waypoints win over the shared node map
            let nodes = if r.waypoints.is_empty() {
                input.nodes.get(&r.route_id).cloned().unwrap_or_default()
            } else {
                r.waypoints
            };
            Route::Mode(ModeRoute {
                route_id: r.route_id,
                mode: r.mode,
                distance: r.distance,
                debris_hazard: r.debris_hazard,
                flood_level: r.flood_level,
                destination,
                nodes,
            })
        })
        .collect();

    debug!("Parsed {} pooled routes", routes.len());
    RouteCatalog::pooled(input.starting_location_coordinates, destination, routes)
}
