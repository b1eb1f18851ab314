use std::fs;
use std::path::Path;

use csv::Writer;
use tracing::{info, warn};

use crate::domain::RoutingOutput;
use crate::error::RoutingError;
use crate::solver::BestUpdate;

/// Writes one strategy's result as pretty JSON, creating parent directories.
pub fn write_output_json(output: &RoutingOutput, path: &Path) -> Result<(), RoutingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if output.best_route.is_none() {
        warn!("No valid route found for {}, writing null best_route", output.strategy);
    }
    let json = serde_json::to_string_pretty(output)?;
    fs::write(path, json)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Best-so-far history, one row per improvement.
pub fn save_history_csv(updates: &[BestUpdate], path: &Path) -> Result<(), RoutingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["iteration", "evaluation", "best_score"])?;
    for update in updates {
        wtr.write_record([
            update.iteration.to_string(),
            update.evaluation.to_string(),
            update.score.to_string(),
        ])?;
    }

    wtr.flush()?;
    info!("Saved {} history rows to {}", updates.len(), path.display());
    Ok(())
}
