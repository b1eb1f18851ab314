pub mod fitness;

pub use fitness::{find_score, heuristic, score_table};
