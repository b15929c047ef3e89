use serde::Deserialize;
use serde_json::Value;

/// The GeoJSON body a pgRouting WFS layer answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<RouteFeature>,
}

/// One road-network edge of the computed path.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: FeatureGeometry,
    pub properties: EdgeProperties,
}

/// Positions are kept raw so a bad pair surfaces as a geometry error
/// instead of failing the whole document parse.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureGeometry {
    pub coordinates: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProperties {
    pub distance: f64,
    /// Traversal cost in hours.
    pub cost: f64,
    #[serde(default)]
    pub point_type: u32,
    #[serde(default)]
    pub name: Option<String>,
}

impl EdgeProperties {
    pub fn time_seconds(&self) -> f64 {
        self.cost * 3600.0
    }

    pub fn roles(&self) -> PointRoles {
        PointRoles::from_bits(self.point_type)
    }
}

/// Waypoint roles of an edge's endpoints, decoded from the `pointType` bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointRoles {
    /// The edge starts at the origin or at a via waypoint (bit 0).
    pub is_origin: bool,
    /// The edge ends at the destination (bit 1).
    pub is_destination: bool,
    /// The edge starts at a via waypoint reached mid-edge (bit 2).
    pub is_via_mid_edge: bool,
}

impl PointRoles {
    const ORIGIN: u32 = 1;
    const DESTINATION: u32 = 2;
    const VIA_MID_EDGE: u32 = 4;

    pub fn from_bits(bits: u32) -> Self {
        Self {
            is_origin: bits & Self::ORIGIN != 0,
            is_destination: bits & Self::DESTINATION != 0,
            is_via_mid_edge: bits & Self::VIA_MID_EDGE != 0,
        }
    }

    /// Whether the edge's first point is a waypoint location.
    pub fn starts_at_waypoint(&self) -> bool {
        self.is_origin || self.is_via_mid_edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bits() {
        assert_eq!(PointRoles::from_bits(0), PointRoles::default());
        assert_eq!(
            PointRoles::from_bits(3),
            PointRoles {
                is_origin: true,
                is_destination: true,
                is_via_mid_edge: false
            }
        );
        assert!(PointRoles::from_bits(4).starts_at_waypoint());
        assert!(!PointRoles::from_bits(2).starts_at_waypoint());
        // Unknown bits are ignored.
        assert_eq!(PointRoles::from_bits(8), PointRoles::default());
    }

    #[test]
    fn parses_wfs_feature() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "muko.1",
                "geometry": {"type": "LineString", "coordinates": [[135.1, 34.1], [135.2, 34.2]]},
                "properties": {"seq": 1, "distance": 12.5, "cost": 0.002, "pointType": 5, "name": "Main St"}
            }]
        }"#;
        let collection: FeatureCollection = serde_json::from_str(text).unwrap();
        let props = &collection.features[0].properties;

        assert_eq!(collection.features[0].geometry.coordinates.len(), 2);
        assert_eq!(props.distance, 12.5);
        assert_eq!(props.name.as_deref(), Some("Main St"));
        assert!(props.roles().is_origin);
        assert!(props.roles().is_via_mid_edge);
    }

    #[test]
    fn name_and_point_type_are_optional() {
        let text = r#"{"geometry": {"coordinates": []}, "properties": {"distance": 1, "cost": 0}}"#;
        let feature: RouteFeature = serde_json::from_str(text).unwrap();

        assert_eq!(feature.properties.name, None);
        assert_eq!(feature.properties.roles(), PointRoles::default());
    }
}
