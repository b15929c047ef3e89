use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RoutingError;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 point in latitude/longitude order, the order the UI side expects.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in metres.
    pub fn haversine_distance(&self, other: &LatLng) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

/// Converts GeoJSON positions (`[lon, lat]` or `[lon, lat, alt]`) of one
/// feature into points, keeping order and count. An edge needs at least one
/// position.
///
/// `feature` is only used to point at the culprit when a position is bad.
pub fn coords_to_latlngs(feature: usize, positions: &[Value]) -> Result<Vec<LatLng>, RoutingError> {
    if positions.is_empty() {
        return Err(RoutingError::MalformedGeometry {
            feature,
            position: 0,
            reason: "edge has no positions".to_string(),
        });
    }

    positions
        .iter()
        .enumerate()
        .map(|(position, raw)| position_to_latlng(raw).map_err(|reason| {
            RoutingError::MalformedGeometry {
                feature,
                position,
                reason,
            }
        }))
        .collect()
}

fn position_to_latlng(raw: &Value) -> Result<LatLng, String> {
    let pair = raw
        .as_array()
        .ok_or_else(|| format!("expected a coordinate array, got {}", raw))?;

    // A third value is an altitude, which routes don't carry.
    if !(2..=3).contains(&pair.len()) {
        return Err(format!("expected 2 or 3 values, got {}", pair.len()));
    }

    let lng = pair[0]
        .as_f64()
        .ok_or_else(|| format!("longitude is not a number: {}", pair[0]))?;
    let lat = pair[1]
        .as_f64()
        .ok_or_else(|| format!("latitude is not a number: {}", pair[1]))?;

    Ok(LatLng::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn swaps_lon_lat_order() {
        let positions = vec![json!([135.702857, 34.944479]), json!([135.7029, 34.9445])];
        let points = coords_to_latlngs(0, &positions).unwrap();

        assert_eq!(
            points,
            vec![
                LatLng::new(34.944479, 135.702857),
                LatLng::new(34.9445, 135.7029)
            ]
        );
    }

    #[test]
    fn ignores_altitude() {
        let points = coords_to_latlngs(0, &[json!([1.0, 2.0, 250.0])]).unwrap();
        assert_eq!(points, vec![LatLng::new(2.0, 1.0)]);
    }

    #[test]
    fn does_not_validate_ranges() {
        let points = coords_to_latlngs(0, &[json!([400.0, -95.0])]).unwrap();
        assert_eq!(points, vec![LatLng::new(-95.0, 400.0)]);
    }

    #[test]
    fn rejects_non_numeric_element() {
        let positions = vec![json!([1.0, 2.0]), json!(["east", 2.0])];
        let err = coords_to_latlngs(3, &positions).unwrap_err();

        assert!(matches!(
            err,
            RoutingError::MalformedGeometry {
                feature: 3,
                position: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(coords_to_latlngs(0, &[json!([1.0])]).is_err());
        assert!(coords_to_latlngs(0, &[json!([1.0, 2.0, 3.0, 4.0])]).is_err());
        assert!(coords_to_latlngs(0, &[json!(1.0)]).is_err());
    }

    #[test]
    fn rejects_edge_without_positions() {
        let err = coords_to_latlngs(4, &[]).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::MalformedGeometry {
                feature: 4,
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let d = LatLng::new(0.0, 0.0).haversine_distance(&LatLng::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 1.0, "got {d}");
    }
}
