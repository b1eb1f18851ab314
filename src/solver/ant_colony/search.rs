use rand::Rng;
use tracing::{debug, info, span, trace, Level};

use crate::config::constant::{
    EVAPORATION_RATE, HEURISTIC_IMPORTANCE, INITIAL_PHEROMONE, NUM_ANTS, NUM_ITERATIONS,
    PHEROMONE_IMPORTANCE,
};
use crate::domain::types::{RouteKey, RouteRef};
use crate::domain::RouteCatalog;
use crate::error::RoutingError;
use crate::evaluation::{heuristic, score_table};
use crate::solver::tracker::BestSolution;
use crate::solver::SearchOutcome;

use super::pheromone::PheromoneField;
use super::selection::{selection_probabilities, weighted_draw};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntColonyParams {
    pub num_ants: usize,
    pub num_iterations: usize,
    /// Fraction of pheromone lost each iteration, in `[0, 1)`.
    pub evaporation_rate: f64,
    /// Exponent on pheromone strength (alpha).
    pub pheromone_importance: f64,
    /// Exponent on `1 / score` (beta).
    pub heuristic_importance: f64,
}

impl Default for AntColonyParams {
    fn default() -> Self {
        AntColonyParams {
            num_ants: NUM_ANTS,
            num_iterations: NUM_ITERATIONS,
            evaporation_rate: EVAPORATION_RATE,
            pheromone_importance: PHEROMONE_IMPORTANCE,
            heuristic_importance: HEURISTIC_IMPORTANCE,
        }
    }
}

/// Ant-colony search over a route catalog.
///
/// Every iteration each ant draws one route per group, weighted by
/// `pheromone^alpha * (1/score)^beta`, and keeps the cheapest of its draws.
/// After all ants have walked, pheromone evaporates and each ant deposits
/// `1/score` on the route it kept.
pub struct AntColony<'a> {
    catalog: &'a RouteCatalog,
    params: AntColonyParams,
    scores: Vec<Vec<f64>>,
    keys: Vec<Vec<RouteKey>>,
    pheromones: PheromoneField,
}

impl<'a> AntColony<'a> {
    pub fn new(catalog: &'a RouteCatalog, params: AntColonyParams) -> Result<Self, RoutingError> {
        if !(0.0..1.0).contains(&params.evaporation_rate) {
            return Err(RoutingError::InvalidEvaporationRate(params.evaporation_rate));
        }

        let keys = catalog
            .groups()
            .iter()
            .map(|routes| routes.iter().map(|r| r.key()).collect())
            .collect();

        Ok(AntColony {
            catalog,
            params,
            scores: score_table(catalog),
            keys,
            pheromones: PheromoneField::new(catalog, INITIAL_PHEROMONE),
        })
    }

    pub fn pheromones(&self) -> &PheromoneField {
        &self.pheromones
    }

    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SearchOutcome {
        let search_span = span!(
            Level::INFO,
            "ant_colony",
            ants = self.params.num_ants,
            iterations = self.params.num_iterations
        );
        let _guard = search_span.enter();

        // every run starts from a fresh trail
        self.pheromones = PheromoneField::new(self.catalog, INITIAL_PHEROMONE);
        let mut best = BestSolution::new();
        let mut evaluations = 0;

        if self.catalog.is_empty() {
            info!("Route catalog is empty, no route to search");
            return SearchOutcome::from_tracker(best, evaluations);
        }

        info!(
            "Starting ant colony over {} routes in {} group(s)",
            self.catalog.len(),
            self.scores.len()
        );

        for iteration in 0..self.params.num_iterations {
            self.perform_iteration(iteration, &mut best, &mut evaluations, rng);
        }

        info!(
            "Ant colony finished after {} evaluations, best score {:.4}",
            evaluations,
            best.score()
        );
        SearchOutcome::from_tracker(best, evaluations)
    }

    fn perform_iteration<R: Rng + ?Sized>(
        &mut self,
        iteration: usize,
        best: &mut BestSolution<RouteRef>,
        evaluations: &mut usize,
        rng: &mut R,
    ) {
        let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
        let _iter_guard = iter_span.enter();

        let mut selections = Vec::with_capacity(self.params.num_ants);
        for ant in 0..self.params.num_ants {
            let Some((chosen, score)) = self.construct_ant(rng) else {
                continue;
            };
            trace!("ant {} chose {:?} with score {:.4}", ant, chosen, score);

            if best.offer(chosen, score, iteration, *evaluations) {
                info!(
                    "New best at iteration {}: {:?} score = {:.4}",
                    iteration, chosen, score
                );
            }
            *evaluations += 1;
            selections.push((chosen, score));
        }

        self.update_pheromones(&selections);
        debug!(
            "iteration {} done, best so far {:.4}",
            iteration,
            best.score()
        );
    }

    /// One ant: a weighted draw in every group, keeping the cheapest draw.
    fn construct_ant<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(RouteRef, f64)> {
        let mut ant_route: Option<(RouteRef, f64)> = None;

        for (group, scores) in self.scores.iter().enumerate() {
            let levels: Vec<f64> = self.keys[group]
                .iter()
                .map(|k| self.pheromones.get(k))
                .collect();
            let heuristics: Vec<f64> = scores.iter().map(|s| heuristic(*s)).collect();
            let probabilities = selection_probabilities(
                &levels,
                &heuristics,
                self.params.pheromone_importance,
                self.params.heuristic_importance,
            );

            let index = weighted_draw(&probabilities, rng);
            let score = scores[index];
            if ant_route.map_or(true, |(_, s)| score < s) {
                ant_route = Some((RouteRef { group, index }, score));
            }
        }

        ant_route
    }

    /// Evaporate everything first, then let each ant deposit on its route.
    fn update_pheromones(&mut self, selections: &[(RouteRef, f64)]) {
        self.pheromones.evaporate(self.params.evaporation_rate);
        for (at, score) in selections {
            let key = &self.keys[at.group][at.index];
            self.pheromones.deposit(key, heuristic(*score));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AreaRoute, Coordinates, EvacuationArea, Route};
    use crate::fixtures::data_generator::{generate_area_catalog, generate_pooled_catalog};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_area(routes: &[(&str, f64)]) -> RouteCatalog {
        let dest = Coordinates::new(14.5586, 121.208243);
        let routes = routes
            .iter()
            .map(|(id, distance)| {
                Route::Area(AreaRoute {
                    route_id: id.to_string(),
                    area_id: "A1".into(),
                    distance: *distance,
                    hazard_zones: 0.0,
                    flood_depth: 0.0,
                    destination: dest,
                })
            })
            .collect();
        RouteCatalog::area_scoped(
            Coordinates::new(14.5612, 121.2195),
            vec![EvacuationArea {
                area_id: "A1".into(),
                destination: dest,
                routes,
            }],
        )
        .unwrap()
    }

    #[test]
    fn rejects_evaporation_rate_of_one() {
        let catalog = single_area(&[("X", 1.0)]);
        let params = AntColonyParams {
            evaporation_rate: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            AntColony::new(&catalog, params),
            Err(RoutingError::InvalidEvaporationRate(_))
        ));
    }

    #[test]
    fn zero_iterations_leave_best_empty() {
        let catalog = single_area(&[("X", 10.0), ("Y", 5.0)]);
        let params = AntColonyParams {
            num_iterations: 0,
            ..Default::default()
        };
        let mut aco = AntColony::new(&catalog, params).unwrap();
        let outcome = aco.run(&mut ChaCha8Rng::seed_from_u64(1));
        assert!(outcome.best.is_none());
        assert_eq!(outcome.evaluations, 0);
        // nothing evaporated either
        assert!(aco.pheromones().iter().all(|(_, v)| v == 1.0));
    }

    #[test]
    fn zero_ants_only_evaporate() {
        let catalog = single_area(&[("X", 10.0), ("Y", 5.0)]);
        let params = AntColonyParams {
            num_ants: 0,
            num_iterations: 2,
            ..Default::default()
        };
        let mut aco = AntColony::new(&catalog, params).unwrap();
        let outcome = aco.run(&mut ChaCha8Rng::seed_from_u64(1));
        assert!(outcome.best.is_none());
        assert!(aco.pheromones().iter().all(|(_, v)| (v - 0.25).abs() < 1e-12));
    }

    #[test]
    fn shorter_route_collects_more_pheromone() {
        let catalog = single_area(&[("X", 10.0), ("Y", 5.0)]);
        let mut aco = AntColony::new(&catalog, AntColonyParams::default()).unwrap();
        let outcome = aco.run(&mut ChaCha8Rng::seed_from_u64(42));

        let (best, _) = outcome.best.unwrap();
        assert_eq!(best, RouteRef { group: 0, index: 1 });

        let x = aco.pheromones().get(&catalog.groups()[0][0].key());
        let y = aco.pheromones().get(&catalog.groups()[0][1].key());
        assert!(y > x, "pheromone on Y ({y}) should exceed X ({x})");
    }

    #[test]
    fn repeated_runs_on_one_colony_agree() {
        let catalog = generate_area_catalog(2, 4, 17).unwrap();
        let params = AntColonyParams {
            num_ants: 4,
            num_iterations: 6,
            ..Default::default()
        };
        let mut aco = AntColony::new(&catalog, params).unwrap();
        for seed in 0..20 {
            let first = aco.run(&mut ChaCha8Rng::seed_from_u64(seed));
            let trail: Vec<f64> = catalog.iter().map(|(_, r)| aco.pheromones().get(&r.key())).collect();
            let second = aco.run(&mut ChaCha8Rng::seed_from_u64(seed));
            let again: Vec<f64> = catalog.iter().map(|(_, r)| aco.pheromones().get(&r.key())).collect();
            assert_eq!(first, second, "seed {seed}");
            assert_eq!(trail, again, "seed {seed}");
        }
    }

    #[test]
    fn ant_keeps_cheapest_draw_across_areas() {
        // one route per area, so every draw is forced
        let catalog = generate_area_catalog(4, 1, 5).unwrap();
        let aco = AntColony::new(&catalog, AntColonyParams::default()).unwrap();
        let (chosen, score) = aco
            .construct_ant(&mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();

        let cheapest = aco
            .scores
            .iter()
            .map(|g| g[0])
            .fold(f64::INFINITY, f64::min);
        assert_eq!(score, cheapest);
        assert_eq!(aco.scores[chosen.group][0], cheapest);
    }

    #[test]
    fn pooled_catalog_is_searched_as_one_group() {
        let catalog = generate_pooled_catalog(3, 8).unwrap();
        let mut aco = AntColony::new(&catalog, AntColonyParams::default()).unwrap();
        let outcome = aco.run(&mut ChaCha8Rng::seed_from_u64(8));
        let (at, _) = outcome.best.unwrap();
        assert_eq!(at.group, 0);
        assert_eq!(outcome.evaluations, NUM_ANTS * NUM_ITERATIONS);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn pheromone_never_negative(
            seed in any::<u64>(),
            rate in 0.0f64..0.99,
            areas in 1usize..4,
            routes in 1usize..5,
        ) {
            let catalog = generate_area_catalog(areas, routes, seed).unwrap();
            let params = AntColonyParams {
                num_ants: 5,
                num_iterations: 1,
                evaporation_rate: rate,
                ..Default::default()
            };
            let mut aco = AntColony::new(&catalog, params).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut best = BestSolution::new();
            let mut evaluations = 0;
            for iteration in 0..20 {
                aco.perform_iteration(iteration, &mut best, &mut evaluations, &mut rng);
                prop_assert!(aco.pheromones().iter().all(|(_, v)| v >= 0.0));
            }
        }
    }
}
