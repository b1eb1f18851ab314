use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::constant::{HTTP_TIMEOUT_SECS, MAPBOX_BASE_URL};
use crate::domain::types::{Coordinates, TransportMode};
use crate::error::RoutingError;

use super::parse_route_geometry;

/// Mapbox Directions profile; area routes are fetched as driving routes.
pub fn mapbox_profile(mode: Option<TransportMode>) -> &'static str {
    mode.unwrap_or(TransportMode::Driving).as_str()
}

fn build_mapbox_url(profile: &str, start: Coordinates, end: Coordinates, token: &str) -> String {
    format!(
        "{}/{}/{},{};{},{}?geometries=geojson&access_token={}",
        MAPBOX_BASE_URL, profile, start.lon, start.lat, end.lon, end.lat, token
    )
}

pub async fn fetch_waypoints_mapbox(
    client: &Client,
    start: Coordinates,
    end: Coordinates,
    mode: Option<TransportMode>,
    access_token: &str,
) -> Result<Vec<Coordinates>, RoutingError> {
    let profile = mapbox_profile(mode);
    let url = build_mapbox_url(profile, start, end, access_token);
    // never log the token
    debug!("Requesting Mapbox {} route", profile);

    let response = client
        .get(&url)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        error!("Mapbox returned HTTP {}", status);
        return Err(RoutingError::Provider(format!(
            "Mapbox returned HTTP {status}"
        )));
    }

    let json: Value = response.json().await?;
    let waypoints = parse_route_geometry(&json)?;
    info!("Mapbox returned {} waypoints for {}", waypoints.len(), profile);
    Ok(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_to_driving() {
        assert_eq!(mapbox_profile(None), "driving");
        assert_eq!(mapbox_profile(Some(TransportMode::Walking)), "walking");
    }

    #[test]
    fn url_carries_profile_and_token() {
        let url = build_mapbox_url(
            "cycling",
            Coordinates::new(1.5, 2.5),
            Coordinates::new(3.5, 4.5),
            "tok",
        );
        assert!(url.ends_with("/cycling/2.5,1.5;4.5,3.5?geometries=geojson&access_token=tok"));
    }
}
