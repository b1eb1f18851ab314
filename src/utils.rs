use itertools::Itertools;

/// Linearly decaying coefficient: `a_max` at iteration 0, approaching zero at
/// the last iteration.
pub fn decay_coefficient(a_max: f64, iteration: usize, num_iterations: usize) -> f64 {
    if num_iterations == 0 {
        return a_max;
    }
    a_max - (iteration as f64) * (a_max / (num_iterations as f64))
}

/// Index of the value closest to `target`; the lowest index wins ties.
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    values
        .iter()
        .position_min_by(|a, b| (*a - target).abs().total_cmp(&(*b - target).abs()))
}

/// Indices of `values` in ascending order; equal values keep their order.
pub fn ranked_indices(values: &[f64]) -> Vec<usize> {
    (0..values.len())
        .sorted_by(|&a, &b| values[a].total_cmp(&values[b]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_decays_linearly() {
        assert_eq!(decay_coefficient(2.0, 0, 100), 2.0);
        assert!((decay_coefficient(2.0, 50, 100) - 1.0).abs() < 1e-12);
        assert!((decay_coefficient(2.0, 99, 100) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn nearest_prefers_first_on_ties() {
        assert_eq!(nearest_index(&[1.0, 3.0, 5.0], 2.0), Some(0));
        assert_eq!(nearest_index(&[1.0, 3.0, 5.0], 4.9), Some(2));
        assert_eq!(nearest_index(&[], 4.9), None);
    }

    #[test]
    fn ranking_is_stable() {
        assert_eq!(ranked_indices(&[3.0, 1.0, 3.0, 0.5]), vec![3, 1, 0, 2]);
    }
}
