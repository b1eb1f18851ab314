use rand::Rng;
use tracing::{debug, info, span, Level};

use crate::config::constant::{A_MAX, NUM_ITERATIONS, NUM_WOLVES};
use crate::domain::types::RouteRef;
use crate::domain::RouteCatalog;
use crate::error::RoutingError;
use crate::evaluation::score_table;
use crate::solver::tracker::BestSolution;
use crate::solver::SearchOutcome;
use crate::utils::{decay_coefficient, nearest_index, ranked_indices};

use super::pack::{leader_pull, Coefficients, Leaders, Wolf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WolfPackParams {
    /// At least 3, so alpha, beta and delta exist.
    pub num_wolves: usize,
    pub num_iterations: usize,
    /// Starting value of the exploration coefficient `a`.
    pub a_max: f64,
}

impl Default for WolfPackParams {
    fn default() -> Self {
        WolfPackParams {
            num_wolves: NUM_WOLVES,
            num_iterations: NUM_ITERATIONS,
            a_max: A_MAX,
        }
    }
}

/// Grey-wolf style search. Wolves hold one discrete route index per group;
/// the continuous position update only picks the candidate whose score is
/// nearest to the leaders' pull.
pub struct WolfPack<'a> {
    catalog: &'a RouteCatalog,
    params: WolfPackParams,
    scores: Vec<Vec<f64>>,
}

impl<'a> WolfPack<'a> {
    pub fn new(catalog: &'a RouteCatalog, params: WolfPackParams) -> Result<Self, RoutingError> {
        if params.num_wolves < 3 {
            return Err(RoutingError::TooFewWolves(params.num_wolves));
        }
        Ok(WolfPack {
            catalog,
            params,
            scores: score_table(catalog),
        })
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchOutcome {
        let search_span = span!(
            Level::INFO,
            "wolf_pack",
            wolves = self.params.num_wolves,
            iterations = self.params.num_iterations
        );
        let _guard = search_span.enter();

        let mut best = BestSolution::new();
        let mut evaluations = 0;

        if self.catalog.is_empty() {
            info!("Route catalog is empty, no route to search");
            return SearchOutcome::from_tracker(best, evaluations);
        }

        let group_sizes: Vec<usize> = self.scores.iter().map(Vec::len).collect();
        let mut wolves: Vec<Wolf> = (0..self.params.num_wolves)
            .map(|_| Wolf::random(&group_sizes, rng))
            .collect();

        info!(
            "Starting wolf pack with {} wolves over {} group(s)",
            wolves.len(),
            group_sizes.len()
        );

        for iteration in 0..self.params.num_iterations {
            self.perform_iteration(iteration, &mut wolves, &mut best, &mut evaluations, rng);
        }

        info!(
            "Wolf pack finished after {} evaluations, best score {:.4}",
            evaluations,
            best.score()
        );
        SearchOutcome::from_tracker(best, evaluations)
    }

    fn perform_iteration<R: Rng + ?Sized>(
        &self,
        iteration: usize,
        wolves: &mut [Wolf],
        best: &mut BestSolution<RouteRef>,
        evaluations: &mut usize,
        rng: &mut R,
    ) {
        let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
        let _iter_guard = iter_span.enter();

        for wolf in wolves.iter() {
            self.evaluate(wolf, iteration, best, evaluations);
        }

        let leaders = self.rank(wolves);
        let a = decay_coefficient(self.params.a_max, iteration, self.params.num_iterations);
        debug!(
            "iteration {}: a = {:.3}, alpha total = {:.4}, best so far {:.4}",
            iteration,
            a,
            leaders.alpha.total_score(&self.scores),
            best.score()
        );

        for wolf in wolves.iter_mut() {
            self.hunt(wolf, &leaders, a, rng);
        }
    }

    /// Walks the wolf's groups with a running partial sum. The tracker is
    /// offered the current group's route whenever the partial sum beats the
    /// best score, not only the wolf's complete total.
    // NOTE: partial sums, not the wolf's total, reach the tracker.
    fn evaluate(
        &self,
        wolf: &Wolf,
        iteration: usize,
        best: &mut BestSolution<RouteRef>,
        evaluations: &mut usize,
    ) {
        let mut partial = 0.0;
        for (group, &index) in wolf.positions.iter().enumerate() {
            partial += self.scores[group][index];
            let at = RouteRef { group, index };
            if best.offer(at, partial, iteration, *evaluations) {
                info!(
                    "New best at iteration {}: {:?} partial score = {:.4}",
                    iteration, at, partial
                );
            }
            *evaluations += 1;
        }
    }

    fn rank(&self, wolves: &[Wolf]) -> Leaders {
        let totals: Vec<f64> = wolves.iter().map(|w| w.total_score(&self.scores)).collect();
        let order = ranked_indices(&totals);
        Leaders {
            alpha: wolves[order[0]].clone(),
            beta: wolves[order[1]].clone(),
            delta: wolves[order[2]].clone(),
        }
    }

    fn hunt<R: Rng + ?Sized>(&self, wolf: &mut Wolf, leaders: &Leaders, a: f64, rng: &mut R) {
        for (group, position) in wolf.positions.iter_mut().enumerate() {
            let scores = &self.scores[group];
            let coefficients = Coefficients::draw(a, rng);
            let leader_scores = leaders.members().map(|l| scores[l.positions[group]]);
            let target = leader_pull(leader_scores, scores[*position], &coefficients);

            if let Some(index) = nearest_index(scores, target) {
                *position = index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::{generate_area_catalog, generate_pooled_catalog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn requires_three_wolves() {
        let catalog = generate_area_catalog(2, 3, 1).unwrap();
        let params = WolfPackParams {
            num_wolves: 2,
            ..Default::default()
        };
        assert!(matches!(
            WolfPack::new(&catalog, params),
            Err(RoutingError::TooFewWolves(2))
        ));
        let params = WolfPackParams {
            num_wolves: 3,
            ..Default::default()
        };
        assert!(WolfPack::new(&catalog, params).is_ok());
    }

    #[test]
    fn partial_sum_reaches_the_tracker() {
        // Scores are positive, so a first-area route on its own is always a
        // smaller partial sum than anything accumulated over later areas.
        let catalog = generate_area_catalog(3, 4, 17).unwrap();
        let pack = WolfPack::new(&catalog, WolfPackParams::default()).unwrap();
        let outcome = pack.run(&mut ChaCha8Rng::seed_from_u64(17));
        let (at, score) = outcome.best.unwrap();

        assert_eq!(at.group, 0);
        assert_eq!(score, pack.scores[0][at.index]);
    }

    #[test]
    fn positions_stay_in_bounds_through_the_hunt() {
        let catalog = generate_area_catalog(3, 5, 2).unwrap();
        let pack = WolfPack::new(&catalog, WolfPackParams::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let sizes: Vec<usize> = pack.scores.iter().map(Vec::len).collect();
        let mut wolves: Vec<Wolf> = (0..5).map(|_| Wolf::random(&sizes, &mut rng)).collect();
        let mut best = BestSolution::new();
        let mut evaluations = 0;

        for iteration in 0..50 {
            pack.perform_iteration(iteration, &mut wolves, &mut best, &mut evaluations, &mut rng);
            for wolf in &wolves {
                assert!(wolf.positions.iter().zip(&sizes).all(|(&p, &n)| p < n));
            }
        }
        assert_eq!(evaluations, 50 * 5 * 3);
    }

    #[test]
    fn history_never_increases() {
        let catalog = generate_pooled_catalog(4, 30).unwrap();
        let pack = WolfPack::new(&catalog, WolfPackParams::default()).unwrap();
        let outcome = pack.run(&mut ChaCha8Rng::seed_from_u64(30));
        assert!(outcome
            .history
            .windows(2)
            .all(|w| w[1].score < w[0].score));
        assert_eq!(
            outcome.history.last().map(|u| u.score),
            outcome.best.map(|(_, s)| s)
        );
    }

    #[test]
    fn zero_iterations_never_evaluate() {
        let catalog = generate_area_catalog(2, 2, 3).unwrap();
        let params = WolfPackParams {
            num_iterations: 0,
            ..Default::default()
        };
        let pack = WolfPack::new(&catalog, params).unwrap();
        let outcome = pack.run(&mut ChaCha8Rng::seed_from_u64(3));
        assert!(outcome.best.is_none());
        assert_eq!(outcome.evaluations, 0);
    }
}
