use rand::Rng;

/// One wolf: the selected route index for each group of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wolf {
    pub positions: Vec<usize>,
}

impl Wolf {
    /// Uniform random index per group. Every group must be non-empty.
    pub fn random<R: Rng + ?Sized>(group_sizes: &[usize], rng: &mut R) -> Self {
        Wolf {
            positions: group_sizes.iter().map(|&n| rng.gen_range(0..n)).collect(),
        }
    }

    /// Sum of the scores of the selected routes.
    pub fn total_score(&self, scores: &[Vec<f64>]) -> f64 {
        self.positions
            .iter()
            .zip(scores)
            .map(|(&index, group)| group[index])
            .sum()
    }
}

/// The three best-ranked wolves, snapshotted before the pack moves.
#[derive(Debug, Clone)]
pub struct Leaders {
    pub alpha: Wolf,
    pub beta: Wolf,
    pub delta: Wolf,
}

impl Leaders {
    pub fn members(&self) -> [&Wolf; 3] {
        [&self.alpha, &self.beta, &self.delta]
    }
}

/// Random coefficients for one wolf/group step, drawn in the order
/// `A1, C1, A2, C2, A3, C3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: [f64; 3],
    pub c: [f64; 3],
}

impl Coefficients {
    pub fn draw<R: Rng + ?Sized>(a: f64, rng: &mut R) -> Self {
        let mut coefficients = Coefficients {
            a: [0.0; 3],
            c: [0.0; 3],
        };
        for k in 0..3 {
            coefficients.a[k] = 2.0 * a * rng.gen::<f64>() - a;
            coefficients.c[k] = 2.0 * rng.gen::<f64>();
        }
        coefficients
    }
}

/// Target score pulled toward the three leaders:
/// `X_k = s_k - A_k * |C_k * s_k - s_current|`, averaged over k.
pub fn leader_pull(leader_scores: [f64; 3], current: f64, coefficients: &Coefficients) -> f64 {
    let pulls: f64 = (0..3)
        .map(|k| {
            let s = leader_scores[k];
            let d = (coefficients.c[k] * s - current).abs();
            s - coefficients.a[k] * d
        })
        .sum();
    pulls / 3.0
}
