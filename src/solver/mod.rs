pub mod ant_colony;
pub mod run;
pub mod tracker;
pub mod wolf_pack;

use crate::domain::types::{Route, RouteRef};
use crate::domain::RouteCatalog;

pub use ant_colony::{AntColony, AntColonyParams};
pub use tracker::{BestSolution, BestUpdate};
pub use wolf_pack::{WolfPack, WolfPackParams};

/// Result of one search run. `best` is `None` when nothing was evaluated
/// (empty catalog, zero iterations or zero ants); callers must report
/// "no valid route" in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Option<(RouteRef, f64)>,
    pub history: Vec<BestUpdate>,
    pub evaluations: usize,
}

impl SearchOutcome {
    pub fn from_tracker(tracker: BestSolution<RouteRef>, evaluations: usize) -> Self {
        let (best, history) = tracker.into_parts();
        SearchOutcome {
            best,
            history,
            evaluations,
        }
    }

    pub fn best_route<'c>(&self, catalog: &'c RouteCatalog) -> Option<(&'c Route, f64)> {
        let (at, score) = self.best?;
        catalog.route(at).map(|route| (route, score))
    }
}
