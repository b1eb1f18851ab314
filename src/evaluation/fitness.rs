use crate::config::constant::{CRITERION_WEIGHT, SCORE_FLOOR};
use crate::domain::types::Route;
use crate::domain::RouteCatalog;

/// Scalar cost of a route; lower is better.
///
/// Distance, hazard and flood are weighted equally. When the route carries
/// per-node hazard samples the hazard and flood terms are the sums over its
/// nodes, otherwise the route's pre-aggregated attributes are used.
pub fn find_score(route: &Route) -> f64 {
    let (hazard, flood) = hazard_and_flood(route);
    route.distance() * CRITERION_WEIGHT + hazard * CRITERION_WEIGHT + flood * CRITERION_WEIGHT
}

/// Hazard and flood terms as scored: node sums when the route has nodes,
/// its aggregates otherwise.
pub(crate) fn hazard_and_flood(route: &Route) -> (f64, f64) {
    let nodes = route.nodes();
    if nodes.is_empty() {
        return (route.hazard(), route.flood());
    }
    nodes.iter().fold((0.0, 0.0), |(hazard, flood), node| {
        (hazard + node.debris_hazard, flood + node.flood_level)
    })
}

/// Attractiveness used by the ant colony; the score is floored so a zero-cost
/// route never yields an infinite weight.
pub fn heuristic(score: f64) -> f64 {
    1.0 / score.max(SCORE_FLOOR)
}

/// Scores of every route, laid out like [`RouteCatalog::groups`].
pub fn score_table(catalog: &RouteCatalog) -> Vec<Vec<f64>> {
    catalog
        .groups()
        .iter()
        .map(|routes| routes.iter().map(find_score).collect())
        .collect()
}
