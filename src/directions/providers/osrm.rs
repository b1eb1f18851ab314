use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use crate::config::constant::HTTP_TIMEOUT_SECS;
use crate::domain::types::{Coordinates, TransportMode};
use crate::error::RoutingError;

use super::parse_route_geometry;

/// OSRM profile for a transport mode. Area routes carry no mode and are
/// fetched as driving routes.
pub fn osrm_profile(mode: Option<TransportMode>) -> &'static str {
    match mode {
        Some(TransportMode::Walking) => "foot",
        Some(TransportMode::Cycling) => "bike",
        Some(TransportMode::Driving) | None => "driving",
    }
}

pub fn build_osrm_url(base_url: &str, profile: &str, start: Coordinates, end: Coordinates) -> String {
    // OSRM wants longitude,latitude
    format!(
        "{}/{}/{},{};{},{}?overview=full&geometries=geojson",
        base_url.trim_end_matches('/'),
        profile,
        start.lon,
        start.lat,
        end.lon,
        end.lat
    )
}

/// User-Agent for the public OSRM server, which rejects anonymous clients.
pub fn osrm_user_agent(contact_email: Option<&str>) -> String {
    format!(
        "evac-router/0.1 ({})",
        contact_email.unwrap_or("no-email-configured@example.com")
    )
}

/// Full-resolution polyline from `start` to `end`, as (lat, lon) pairs.
pub async fn fetch_waypoints_osrm(
    client: &Client,
    base_url: &str,
    contact_email: Option<&str>,
    start: Coordinates,
    end: Coordinates,
    mode: Option<TransportMode>,
) -> Result<Vec<Coordinates>, RoutingError> {
    let is_public_osrm = base_url.contains("router.project-osrm.org");
    let url = build_osrm_url(base_url, osrm_profile(mode), start, end);
    debug!("Built OSRM URL: {}", url);

    let mut request_builder = client.get(&url);
    if is_public_osrm {
        let user_agent = osrm_user_agent(contact_email);
        request_builder = request_builder.header("User-Agent", &user_agent);
        info!("Using public OSRM, added User-Agent: {}", &user_agent);
    } else {
        info!("Using local/self-hosted OSRM");
    }

    let response = match request_builder
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!("OSRM request failed: {}", e);
            if e.to_string().contains("handshake") || e.to_string().contains("TLS") {
                warn!("TLS/handshake failure, public OSRM may be blocking requests");
            }
            return Err(e.into());
        }
    };

    let status = response.status();
    if !status.is_success() {
        error!(
            "OSRM returned HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        );
        return Err(RoutingError::Provider(format!("OSRM returned HTTP {status}")));
    }

    let text = response.text().await?;
    trace!("Response size: {} bytes", text.len());
    let json: Value = serde_json::from_str(&text).map_err(|e| {
        error!(
            "Failed to parse OSRM JSON: {} (first 200 chars: {})",
            e,
            text.chars().take(200).collect::<String>()
        );
        RoutingError::from(e)
    })?;

    if let Some(code) = json["code"].as_str() {
        if code != "Ok" {
            let message = json["message"].as_str().unwrap_or("no message");
            warn!("OSRM responded with code {}: {}", code, message);
            return Err(RoutingError::Provider(format!("OSRM code {code}: {message}")));
        }
    }

    let waypoints = parse_route_geometry(&json)?;
    info!("OSRM returned {} waypoints", waypoints.len());
    Ok(waypoints)
}
