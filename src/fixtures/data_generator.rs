use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::types::{
    AreaRoute, Coordinates, EvacuationArea, HazardNode, ModeRoute, Route, TransportMode,
};
use crate::domain::RouteCatalog;
use crate::error::RoutingError;

/// Starting point used by every synthetic catalog.
pub const SYNTHETIC_START: Coordinates = Coordinates {
    lat: 14.5612,
    lon: 121.2195,
};

/// Random destination within roughly 3 km of the start.
fn random_destination(rng: &mut ChaCha8Rng) -> Coordinates {
    Coordinates::new(
        SYNTHETIC_START.lat + rng.gen_range(-0.03..0.03),
        SYNTHETIC_START.lon + rng.gen_range(-0.03..0.03),
    )
}

/// Generates `num_areas` evacuation areas with `routes_per_area` routes each.
/// Distances are strictly positive so every score is too.
pub fn generate_area_catalog(
    num_areas: usize,
    routes_per_area: usize,
    seed: u64,
) -> Result<RouteCatalog, RoutingError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let areas = (0..num_areas)
        .map(|a| {
            let area_id = format!("A{}", a + 1);
            let destination = random_destination(&mut rng);
            let routes = (0..routes_per_area)
                .map(|r| {
                    Route::Area(AreaRoute {
                        route_id: format!("R{}", r + 1),
                        area_id: area_id.clone(),
                        distance: rng.gen_range(0.5..15.0),
                        hazard_zones: rng.gen_range(0..5) as f64,
                        flood_depth: rng.gen_range(0.0..2.0),
                        destination,
                    })
                })
                .collect();
            EvacuationArea {
                area_id,
                destination,
                routes,
            }
        })
        .collect();

    info!(
        "Generated {} synthetic areas with {} routes each (seed {})",
        num_areas, routes_per_area, seed
    );
    RouteCatalog::area_scoped(SYNTHETIC_START, areas)
}

/// Generates one route per transport mode toward a shared destination, each
/// carrying `nodes_per_route` hazard samples along the straight line.
pub fn generate_pooled_catalog(
    nodes_per_route: usize,
    seed: u64,
) -> Result<RouteCatalog, RoutingError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let destination = random_destination(&mut rng);

    let routes = [
        TransportMode::Walking,
        TransportMode::Cycling,
        TransportMode::Driving,
    ]
    .into_iter()
    .map(|mode| {
        let nodes = (0..nodes_per_route)
            .map(|i| {
                let t = (i + 1) as f64 / (nodes_per_route + 1) as f64;
                HazardNode {
                    coordinates: Coordinates::new(
                        SYNTHETIC_START.lat + t * (destination.lat - SYNTHETIC_START.lat),
                        SYNTHETIC_START.lon + t * (destination.lon - SYNTHETIC_START.lon),
                    ),
                    flood_level: rng.gen_range(0.0..0.5),
                    debris_hazard: rng.gen_range(0..3) as f64,
                }
            })
            .collect::<Vec<_>>();

        Route::Mode(ModeRoute {
            route_id: format!("{mode}_route"),
            mode,
            distance: rng.gen_range(1.0..6.0),
            debris_hazard: nodes.iter().map(|n| n.debris_hazard).sum(),
            flood_level: nodes.iter().map(|n| n.flood_level).sum(),
            destination,
            nodes,
        })
    })
    .collect();

    info!(
        "Generated synthetic mode catalog with {} nodes per route (seed {})",
        nodes_per_route, seed
    );
    RouteCatalog::pooled(SYNTHETIC_START, destination, routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_catalog() {
        assert_eq!(
            generate_area_catalog(3, 4, 99).unwrap(),
            generate_area_catalog(3, 4, 99).unwrap()
        );
        assert_ne!(
            generate_area_catalog(3, 4, 99).unwrap(),
            generate_area_catalog(3, 4, 100).unwrap()
        );
    }

    #[test]
    fn pooled_catalog_has_every_mode() {
        let catalog = generate_pooled_catalog(5, 1).unwrap();
        let modes: Vec<_> = catalog.iter().filter_map(|(_, r)| r.mode()).collect();
        assert_eq!(
            modes,
            vec![
                TransportMode::Walking,
                TransportMode::Cycling,
                TransportMode::Driving
            ]
        );
        assert!(catalog.iter().all(|(_, r)| r.nodes().len() == 5));
    }
}
