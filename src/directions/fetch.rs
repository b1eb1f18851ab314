use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::{GeometryProvider, Settings};
use crate::database::sqlx::{cached_waypoints, geometry_cache_key, store_waypoints};
use crate::domain::types::{Coordinates, TransportMode};
use crate::error::RoutingError;
use crate::geometry::simplify_waypoints;

use super::providers::mapbox::mapbox_profile;
use super::providers::osrm::osrm_profile;
use super::providers::{fetch_waypoints_mapbox, fetch_waypoints_osrm};

/// Resolves the polyline of a chosen route through the configured provider,
/// consulting the SQLite cache first when one is available.
pub struct GeometryClient {
    provider: GeometryProvider,
    http: Client,
    osrm_base_url: String,
    contact_email: Option<String>,
    mapbox_token: Option<String>,
    cache: Option<SqlitePool>,
    cache_ttl_secs: i64,
    tolerance: f64,
}

impl GeometryClient {
    pub fn new(settings: &Settings, cache: Option<SqlitePool>) -> Self {
        GeometryClient {
            provider: settings.provider,
            http: Client::new(),
            osrm_base_url: settings.osrm_base_url.clone(),
            contact_email: settings.contact_email.clone(),
            mapbox_token: settings.mapbox_token.clone(),
            cache,
            cache_ttl_secs: settings.cache_ttl_secs,
            tolerance: settings.simplify_tolerance,
        }
    }

    pub fn provider(&self) -> GeometryProvider {
        self.provider
    }

    /// Simplified waypoints from `start` to `end`.
    pub async fn waypoints(
        &self,
        start: Coordinates,
        end: Coordinates,
        mode: Option<TransportMode>,
    ) -> Result<Vec<Coordinates>, RoutingError> {
        let (provider_name, profile) = match self.provider {
            GeometryProvider::Osrm => ("osrm", osrm_profile(mode)),
            GeometryProvider::Mapbox => ("mapbox", mapbox_profile(mode)),
            GeometryProvider::Disabled => return Ok(vec![]),
        };
        let cache_key = geometry_cache_key(provider_name, profile, start, end);

        let raw = match self.lookup_cache(&cache_key).await {
            Some(hit) => hit,
            None => {
                let fetched = self.fetch(start, end, mode).await?;
                self.store_cache(&cache_key, &fetched).await;
                fetched
            }
        };

        let simplified = simplify_waypoints(&raw, self.tolerance);
        info!(
            "Simplified {} waypoints down to {} ({} / {})",
            raw.len(),
            simplified.len(),
            provider_name,
            profile
        );
        Ok(simplified)
    }

    async fn fetch(
        &self,
        start: Coordinates,
        end: Coordinates,
        mode: Option<TransportMode>,
    ) -> Result<Vec<Coordinates>, RoutingError> {
        match self.provider {
            GeometryProvider::Osrm => {
                fetch_waypoints_osrm(
                    &self.http,
                    &self.osrm_base_url,
                    self.contact_email.as_deref(),
                    start,
                    end,
                    mode,
                )
                .await
            }
            GeometryProvider::Mapbox => {
                let token = self
                    .mapbox_token
                    .as_deref()
                    .ok_or(RoutingError::MissingEnv("MAPBOX_ACCESS_TOKEN"))?;
                fetch_waypoints_mapbox(&self.http, start, end, mode, token).await
            }
            GeometryProvider::Disabled => Ok(vec![]),
        }
    }

    /// Cache failures only cost a refetch, so they are logged and swallowed.
    async fn lookup_cache(&self, cache_key: &str) -> Option<Vec<Coordinates>> {
        let pool = self.cache.as_ref()?;
        match cached_waypoints(pool, cache_key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Geometry cache lookup failed: {}", e);
                None
            }
        }
    }

    async fn store_cache(&self, cache_key: &str, waypoints: &[Coordinates]) {
        let Some(pool) = self.cache.as_ref() else {
            return;
        };
        if waypoints.is_empty() {
            return;
        }
        if let Err(e) = store_waypoints(pool, cache_key, waypoints, self.cache_ttl_secs).await {
            warn!("Could not cache geometry: {}", e);
        }
    }
}
