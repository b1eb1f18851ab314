pub mod mapbox;
pub mod osrm;

use serde_json::Value;

use crate::domain::types::Coordinates;
use crate::error::RoutingError;

pub use mapbox::fetch_waypoints_mapbox;
pub use osrm::fetch_waypoints_osrm;

/// Both OSRM and Mapbox answer with GeoJSON `[lon, lat]` pairs under
/// `routes[0].geometry.coordinates`; flip them to (lat, lon).
pub fn parse_route_geometry(json: &Value) -> Result<Vec<Coordinates>, RoutingError> {
    let coordinates = json["routes"]
        .get(0)
        .and_then(|route| route["geometry"]["coordinates"].as_array())
        .ok_or_else(|| RoutingError::Provider("response has no route geometry".to_string()))?;

    coordinates
        .iter()
        .map(|pair| match pair.as_array().map(|p| p.as_slice()) {
            Some([lon, lat, ..]) => match (lat.as_f64(), lon.as_f64()) {
                (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
                _ => Err(RoutingError::Provider(format!("non-numeric coordinate {pair}"))),
            },
            _ => Err(RoutingError::Provider(format!("malformed coordinate {pair}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flips_lon_lat() {
        let body = json!({
            "code": "Ok",
            "routes": [{ "geometry": { "type": "LineString",
                "coordinates": [[121.2195, 14.5612], [121.21, 14.56]] } }]
        });
        let waypoints = parse_route_geometry(&body).unwrap();
        assert_eq!(
            waypoints,
            vec![Coordinates::new(14.5612, 121.2195), Coordinates::new(14.56, 121.21)]
        );
    }

    #[test]
    fn missing_routes_is_an_error() {
        assert!(parse_route_geometry(&json!({ "routes": [] })).is_err());
        assert!(parse_route_geometry(&json!({ "code": "NoRoute" })).is_err());
    }

    #[test]
    fn malformed_pair_is_an_error() {
        let body = json!({ "routes": [{ "geometry": { "coordinates": [[1.0]] } }] });
        assert!(matches!(
            parse_route_geometry(&body),
            Err(RoutingError::Provider(_))
        ));
    }
}
