use serde::{Deserialize, Serialize};

use crate::domain::types::{Coordinates, Route, TransportMode};
use crate::evaluation::fitness::hazard_and_flood;

/// The winning route as handed to exporters and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRoute {
    pub route_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mode: Option<TransportMode>,
    pub distance: f64,
    pub hazard: f64,
    pub flood: f64,
    pub score: f64,
    pub destination_coordinates: Coordinates,
    #[serde(default)]
    pub waypoints: Vec<Coordinates>,
}

impl BestRoute {
    /// Describe `route` without geometry; `waypoints` are filled in later by
    /// the directions step.
    pub fn describe(route: &Route, score: f64) -> Self {
        let (hazard, flood) = hazard_and_flood(route);
        BestRoute {
            route_id: route.route_id().to_string(),
            area_id: route.area_id().map(str::to_string),
            mode: route.mode(),
            distance: route.distance(),
            hazard,
            flood,
            score,
            destination_coordinates: route.destination(),
            waypoints: vec![],
        }
    }
}

/// One strategy's result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingOutput {
    pub starting_location_coordinates: Coordinates,
    pub strategy: String,
    pub best_route: Option<BestRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AreaRoute, HazardNode, ModeRoute};
    use crate::evaluation::find_score;

    #[test]
    fn area_route_description_omits_mode() {
        let route = Route::Area(AreaRoute {
            route_id: "R2".into(),
            area_id: "A1".into(),
            distance: 3.0,
            hazard_zones: 1.0,
            flood_depth: 0.5,
            destination: Coordinates::new(14.55, 121.2),
        });
        let best = BestRoute::describe(&route, 1.5);
        let json = serde_json::to_value(&best).unwrap();
        assert_eq!(json["area_id"], "A1");
        assert!(json.get("mode").is_none());
        assert_eq!(json["destination_coordinates"][0], 14.55);
        assert!(best.waypoints.is_empty());
    }

    #[test]
    fn node_route_exports_the_scored_components() {
        let route = Route::Mode(ModeRoute {
            route_id: "walking_route".into(),
            mode: TransportMode::Walking,
            distance: 3.0,
            debris_hazard: 9.0,
            flood_level: 9.0,
            destination: Coordinates::new(1.0, 1.0),
            nodes: vec![
                HazardNode {
                    coordinates: Coordinates::new(0.5, 0.5),
                    flood_level: 0.25,
                    debris_hazard: 1.0,
                },
                HazardNode {
                    coordinates: Coordinates::new(0.7, 0.7),
                    flood_level: 0.5,
                    debris_hazard: 0.0,
                },
            ],
        });
        let score = find_score(&route);
        let best = BestRoute::describe(&route, score);

        assert_eq!(best.hazard, 1.0);
        assert_eq!(best.flood, 0.75);
        let recomputed = (best.distance + best.hazard + best.flood) / 3.0;
        assert!((recomputed - best.score).abs() < 1e-12);
    }
}
