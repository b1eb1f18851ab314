use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::{debug, info};

use crate::domain::types::Coordinates;
use crate::error::RoutingError;

pub async fn db_connection(database_url: &str) -> Result<SqlitePool, RoutingError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    info!("Connected to SQLite database at {database_url}");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_geometry (
            cache_key TEXT PRIMARY KEY,
            waypoints TEXT NOT NULL,
            expiry INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

/// Cache key for one provider/profile/endpoint combination.
pub fn geometry_cache_key(
    provider: &str,
    profile: &str,
    start: Coordinates,
    end: Coordinates,
) -> String {
    format!(
        "{provider}:{profile}:{:.6},{:.6};{:.6},{:.6}",
        start.lat, start.lon, end.lat, end.lon
    )
}

/// Unexpired cached polyline, if any.
pub async fn cached_waypoints(
    pool: &SqlitePool,
    cache_key: &str,
) -> Result<Option<Vec<Coordinates>>, RoutingError> {
    let row: Option<(String, i64)> =
        sqlx::query_as("SELECT waypoints, expiry FROM route_geometry WHERE cache_key = ?")
            .bind(cache_key)
            .fetch_optional(pool)
            .await?;

    let current_time = Utc::now().timestamp();
    match row {
        Some((waypoints, expiry)) if current_time < expiry => {
            debug!("Geometry cache hit for {}", cache_key);
            Ok(Some(serde_json::from_str(&waypoints)?))
        }
        Some((_, expiry)) => {
            info!("Cached geometry expired ({}), fetching again", expiry);
            Ok(None)
        }
        None => Ok(None),
    }
}

pub async fn store_waypoints(
    pool: &SqlitePool,
    cache_key: &str,
    waypoints: &[Coordinates],
    ttl_secs: i64,
) -> Result<(), RoutingError> {
    let expiry = Utc::now().timestamp() + ttl_secs;
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO route_geometry (cache_key, waypoints, expiry)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(cache_key)
    .bind(serde_json::to_string(waypoints)?)
    .bind(expiry)
    .execute(pool)
    .await?;
    debug!("Stored {} waypoints under {}", waypoints.len(), cache_key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("cache.sqlite").display());
        let pool = db_connection(&url).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn round_trips_through_cache() {
        let (_dir, pool) = temp_pool().await;
        let key = geometry_cache_key(
            "osrm",
            "driving",
            Coordinates::new(1.0, 2.0),
            Coordinates::new(3.0, 4.0),
        );
        assert!(cached_waypoints(&pool, &key).await.unwrap().is_none());

        let line = vec![Coordinates::new(1.0, 2.0), Coordinates::new(3.0, 4.0)];
        store_waypoints(&pool, &key, &line, 60).await.unwrap();
        assert_eq!(cached_waypoints(&pool, &key).await.unwrap(), Some(line));
    }

    #[tokio::test]
    async fn expired_entries_are_ignored() {
        let (_dir, pool) = temp_pool().await;
        let line = vec![Coordinates::new(1.0, 2.0)];
        store_waypoints(&pool, "k", &line, -10).await.unwrap();
        assert!(cached_waypoints(&pool, "k").await.unwrap().is_none());
    }

    #[test]
    fn key_rounds_coordinates() {
        let key = geometry_cache_key(
            "mapbox",
            "walking",
            Coordinates::new(14.56120001, 121.2195),
            Coordinates::new(14.5586, 121.208243),
        );
        assert_eq!(key, "mapbox:walking:14.561200,121.219500;14.558600,121.208243");
    }
}
