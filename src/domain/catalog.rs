use std::collections::HashSet;

use crate::domain::types::{Coordinates, EvacuationArea, Route, RouteRef};
use crate::error::RoutingError;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLayout {
    /// Routes are attached to evacuation areas; searches pick one per area.
    AreaScoped(Vec<EvacuationArea>),
    /// Routes from several transport modes toward one shared destination.
    Pooled {
        destination: Coordinates,
        routes: Vec<Route>,
    },
}

/// The immutable set of candidate routes handed to the searches.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCatalog {
    pub start: Coordinates,
    layout: CatalogLayout,
}

impl RouteCatalog {
    pub fn area_scoped(
        start: Coordinates,
        areas: Vec<EvacuationArea>,
    ) -> Result<Self, RoutingError> {
        for area in &areas {
            if area.routes.is_empty() {
                return Err(RoutingError::EmptyArea {
                    area_id: area.area_id.clone(),
                });
            }
            validate_routes(&area.routes)?;
        }
        Ok(RouteCatalog {
            start,
            layout: CatalogLayout::AreaScoped(areas),
        })
    }

    pub fn pooled(
        start: Coordinates,
        destination: Coordinates,
        routes: Vec<Route>,
    ) -> Result<Self, RoutingError> {
        validate_routes(&routes)?;
        Ok(RouteCatalog {
            start,
            layout: CatalogLayout::Pooled {
                destination,
                routes,
            },
        })
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Selection groups: one per evacuation area, or a single group holding
    /// the whole pooled catalog. Empty pooled catalogs have no groups.
    pub fn groups(&self) -> Vec<&[Route]> {
        match &self.layout {
            CatalogLayout::AreaScoped(areas) => {
                areas.iter().map(|a| a.routes.as_slice()).collect()
            }
            CatalogLayout::Pooled { routes, .. } if routes.is_empty() => vec![],
            CatalogLayout::Pooled { routes, .. } => vec![routes.as_slice()],
        }
    }

    pub fn route(&self, at: RouteRef) -> Option<&Route> {
        match &self.layout {
            CatalogLayout::AreaScoped(areas) => areas.get(at.group)?.routes.get(at.index),
            CatalogLayout::Pooled { routes, .. } if at.group == 0 => routes.get(at.index),
            CatalogLayout::Pooled { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.groups().iter().map(|g| g.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouteRef, &Route)> {
        self.groups().into_iter().enumerate().flat_map(|(group, routes)| {
            routes
                .iter()
                .enumerate()
                .map(move |(index, route)| (RouteRef { group, index }, route))
        })
    }
}

fn validate_routes(routes: &[Route]) -> Result<(), RoutingError> {
    let mut seen = HashSet::new();
    for route in routes {
        if !seen.insert(route.key()) {
            return Err(RoutingError::DuplicateRoute {
                scope: route.scope_label(),
                route_id: route.route_id().to_string(),
            });
        }

        let mut checks = vec![
            ("distance", route.distance()),
            ("hazard", route.hazard()),
            ("flood", route.flood()),
        ];
        for node in route.nodes() {
            checks.push(("node flood_level", node.flood_level));
            checks.push(("node debris_hazard", node.debris_hazard));
        }

        if let Some((field, value)) = checks
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(RoutingError::InvalidAttribute {
                route_id: route.route_id().to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}
