/// One improvement of the best-so-far score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestUpdate {
    pub iteration: usize,
    /// Running count of evaluations (ants or wolf-area steps) in the search.
    pub evaluation: usize,
    pub score: f64,
}

/// Global-minimum holder. Starts at `(None, +inf)` and is only replaced by a
/// strictly lower score, so ties keep the earlier candidate.
#[derive(Debug, Clone)]
pub struct BestSolution<T> {
    candidate: Option<T>,
    score: f64,
    updates: Vec<BestUpdate>,
}

impl<T> Default for BestSolution<T> {
    fn default() -> Self {
        BestSolution {
            candidate: None,
            score: f64::INFINITY,
            updates: vec![],
        }
    }
}

impl<T> BestSolution<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate; returns `true` if it became the new best.
    pub fn offer(&mut self, candidate: T, score: f64, iteration: usize, evaluation: usize) -> bool {
        if score < self.score {
            self.candidate = Some(candidate);
            self.score = score;
            self.updates.push(BestUpdate {
                iteration,
                evaluation,
                score,
            });
            true
        } else {
            false
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn candidate(&self) -> Option<&T> {
        self.candidate.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate.is_none()
    }

    pub fn updates(&self) -> &[BestUpdate] {
        &self.updates
    }

    pub fn into_parts(self) -> (Option<(T, f64)>, Vec<BestUpdate>) {
        let score = self.score;
        (self.candidate.map(|c| (c, score)), self.updates)
    }
}
