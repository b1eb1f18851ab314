use std::error::Error;
use std::path::Path;

use dotenv::dotenv;
use futures::future::join_all;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqlx::SqlitePool;
use tracing::{info, span, warn, Instrument, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{SYNTHETIC_AREAS, SYNTHETIC_ROUTES_PER_AREA};
use crate::config::{GeometryProvider, Settings, Strategy};
use crate::database::sqlx::db_connection;
use crate::directions::GeometryClient;
use crate::domain::{BestRoute, RouteCatalog, RoutingOutput};
use crate::error::RoutingError;
use crate::fixtures::data_generator::generate_area_catalog;
use crate::output::{save_history_csv, write_output_json};
use crate::setup::load_catalog;

use super::{AntColony, AntColonyParams, SearchOutcome, WolfPack, WolfPackParams};

/// One finished search, labelled the way output files are named.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub label: &'static str,
    pub outcome: SearchOutcome,
}

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .try_init()?;

    dotenv().ok();
    Ok(())
}

/// The configured input file, or a seeded synthetic catalog when none is set.
pub fn load_input(settings: &Settings) -> Result<RouteCatalog, RoutingError> {
    match &settings.input {
        Some(path) => load_catalog(path),
        None => {
            info!(
                "Generating synthetic catalog ({} areas x {} routes, seed {})",
                SYNTHETIC_AREAS, SYNTHETIC_ROUTES_PER_AREA, settings.seed
            );
            generate_area_catalog(SYNTHETIC_AREAS, SYNTHETIC_ROUTES_PER_AREA, settings.seed)
        }
    }
}

fn run_ant_colony(catalog: &RouteCatalog, seed: u64) -> Result<SearchOutcome, RoutingError> {
    let mut colony = AntColony::new(catalog, AntColonyParams::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(colony.run(&mut rng))
}

fn run_wolf_pack(catalog: &RouteCatalog, seed: u64) -> Result<SearchOutcome, RoutingError> {
    let pack = WolfPack::new(catalog, WolfPackParams::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(pack.run(&mut rng))
}

/// Runs the selected searches with default parameters. Each search owns an
/// rng seeded from `seed`, so running both in parallel stays reproducible.
pub fn run_strategies(
    catalog: &RouteCatalog,
    strategy: Strategy,
    seed: u64,
) -> Result<Vec<StrategyRun>, RoutingError> {
    let runs = match strategy {
        Strategy::AntColony => vec![StrategyRun {
            label: "aco",
            outcome: run_ant_colony(catalog, seed)?,
        }],
        Strategy::WolfPack => vec![StrategyRun {
            label: "gwo",
            outcome: run_wolf_pack(catalog, seed)?,
        }],
        Strategy::Both => {
            let (aco, gwo) = rayon::join(
                || run_ant_colony(catalog, seed),
                || run_wolf_pack(catalog, seed),
            );
            vec![
                StrategyRun {
                    label: "aco",
                    outcome: aco?,
                },
                StrategyRun {
                    label: "gwo",
                    outcome: gwo?,
                },
            ]
        }
    };
    Ok(runs)
}

/// Describes the winner of `run` and attaches its geometry. Geometry
/// failures leave the waypoint list empty.
pub async fn build_output(
    catalog: &RouteCatalog,
    run: &StrategyRun,
    geometry: &GeometryClient,
) -> RoutingOutput {
    let best_route = match run.outcome.best_route(catalog) {
        Some((route, score)) => {
            info!(
                "[{}] best route {} ({}) with score {:.4} after {} evaluations",
                run.label,
                route.route_id(),
                route.scope_label(),
                score,
                run.outcome.evaluations
            );
            let mut best = BestRoute::describe(route, score);
            match geometry
                .waypoints(catalog.start, route.destination(), route.mode())
                .await
            {
                Ok(waypoints) => best.waypoints = waypoints,
                Err(e) => warn!(
                    "[{}] could not fetch geometry for {}: {}",
                    run.label,
                    route.route_id(),
                    e
                ),
            }
            Some(best)
        }
        None => {
            warn!("[{}] No valid route found", run.label);
            None
        }
    };

    RoutingOutput {
        starting_location_coordinates: catalog.start,
        strategy: run.label.to_string(),
        best_route,
    }
}

/// Writes `output-<label>.json` and `best-<label>.csv` under `dir`.
pub fn export_run(
    dir: &Path,
    run: &StrategyRun,
    output: &RoutingOutput,
) -> Result<(), RoutingError> {
    write_output_json(output, &dir.join(format!("output-{}.json", run.label)))?;
    save_history_csv(
        &run.outcome.history,
        &dir.join(format!("best-{}.csv", run.label)),
    )
}

async fn open_geometry_cache(settings: &Settings) -> Option<SqlitePool> {
    if settings.provider == GeometryProvider::Disabled {
        return None;
    }
    match db_connection(&settings.database_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("Geometry cache unavailable, continuing without it: {}", e);
            None
        }
    }
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let settings = Settings::from_env()?;

    let catalog = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        load_input(&settings)?
    };
    info!(
        "Catalog ready: {} routes in {} groups",
        catalog.len(),
        catalog.groups().len()
    );

    let runs = {
        let span = span!(Level::INFO, "search", strategy = ?settings.strategy);
        let _guard = span.enter();
        run_strategies(&catalog, settings.strategy, settings.seed)?
    };

    let geometry = GeometryClient::new(&settings, open_geometry_cache(&settings).await);
    let outputs = join_all(runs.iter().map(|run| {
        build_output(&catalog, run, &geometry)
            .instrument(span!(Level::INFO, "geometry", strategy = run.label))
    }))
    .await;

    for (run, output) in runs.iter().zip(&outputs) {
        export_run(&settings.output_dir, run, output)?;
    }

    info!("Routing complete, results in {}", settings.output_dir.display());
    Ok(())
}
