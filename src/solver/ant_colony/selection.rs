use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::warn;

/// Normalized selection probabilities from `pheromone^alpha * heuristic^beta`.
///
/// Falls back to a uniform distribution when every weight underflows to zero
/// or the total is not finite.
pub fn selection_probabilities(
    pheromones: &[f64],
    heuristics: &[f64],
    alpha: f64,
    beta: f64,
) -> Vec<f64> {
    let weights: Vec<f64> = pheromones
        .iter()
        .zip(heuristics)
        .map(|(p, h)| p.powf(alpha) * h.powf(beta))
        .collect();

    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        let n = weights.len().max(1) as f64;
        vec![1.0 / n; weights.len()]
    }
}

/// Weighted random draw of an index into `probabilities`.
pub fn weighted_draw<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(probabilities) {
        Ok(dist) => dist.sample(rng),
        Err(e) => {
            warn!("Degenerate selection weights ({}), drawing uniformly", e);
            rng.gen_range(0..probabilities.len())
        }
    }
}
