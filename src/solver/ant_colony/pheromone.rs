use std::collections::HashMap;

use crate::domain::types::RouteKey;
use crate::domain::RouteCatalog;

/// Pheromone strength per route. Owned by one search run; evaporation
/// multiplies by a factor in `[0, 1]` and deposits are clamped to be
/// non-negative, so levels never go below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    levels: HashMap<RouteKey, f64>,
}

impl PheromoneField {
    pub fn new(catalog: &RouteCatalog, initial: f64) -> Self {
        let initial = initial.max(0.0);
        PheromoneField {
            levels: catalog.iter().map(|(_, route)| (route.key(), initial)).collect(),
        }
    }

    /// Level for `key`, zero for routes outside the catalog.
    pub fn get(&self, key: &RouteKey) -> f64 {
        self.levels.get(key).copied().unwrap_or(0.0)
    }

    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for level in self.levels.values_mut() {
            *level *= keep;
        }
    }

    pub fn deposit(&mut self, key: &RouteKey, amount: f64) {
        if let Some(level) = self.levels.get_mut(key) {
            *level += amount.max(0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, f64)> {
        self.levels.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::generate_area_catalog;

    #[test]
    fn starts_at_initial_level_for_every_route() {
        let catalog = generate_area_catalog(3, 4, 7).unwrap();
        let field = PheromoneField::new(&catalog, 1.0);
        assert_eq!(field.len(), 12);
        assert!(field.iter().all(|(_, v)| v == 1.0));
    }

    #[test]
    fn evaporation_then_deposit() {
        let catalog = generate_area_catalog(1, 2, 7).unwrap();
        let mut field = PheromoneField::new(&catalog, 1.0);
        let (_, first) = catalog.iter().next().unwrap();
        let key = first.key();

        field.evaporate(0.5);
        field.deposit(&key, 0.25);
        assert!((field.get(&key) - 0.75).abs() < 1e-12);

        field.deposit(&key, -10.0);
        assert!((field.get(&key) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let catalog = generate_area_catalog(1, 1, 7).unwrap();
        let mut field = PheromoneField::new(&catalog, 1.0);
        let stranger = RouteKey::Area {
            area_id: "nowhere".into(),
            route_id: "R0".into(),
        };
        field.deposit(&stranger, 5.0);
        assert_eq!(field.get(&stranger), 0.0);
        assert_eq!(field.len(), 1);
    }
}
