use serde::{Deserialize, Serialize};

use super::error::RoutingError;
use super::feature::RouteFeature;
use super::geometry::{coords_to_latlngs, LatLng};
use super::instruction::{instructions_for, Instruction};
use super::waypoint::{correlate_waypoints, Waypoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_distance: f64,
    /// Whole seconds.
    pub total_time: i64,
}

/// The single route built from one service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    pub coordinates: Vec<LatLng>,
    pub instructions: Vec<Instruction>,
    pub summary: RouteSummary,
    pub input_waypoints: Vec<Waypoint>,
    pub waypoints: Vec<Waypoint>,
    pub waypoint_indices: Vec<usize>,
}

/// Builds a route from the service's edges, taken in the order returned.
///
/// Any bad edge aborts the whole call; a partial route is never returned.
pub fn assemble(features: &[RouteFeature], input_waypoints: &[Waypoint]) -> Result<Route, RoutingError> {
    if features.is_empty() {
        return Err(RoutingError::EmptyResponse);
    }

    let mut coordinates: Vec<LatLng> = Vec::new();
    let mut instructions = Vec::new();
    let mut via_coords = Vec::new();
    let mut via_indices = Vec::new();
    let mut total_distance = 0.0;
    let mut total_hours = 0.0;

    for (i, feature) in features.iter().enumerate() {
        let edge_coords = coords_to_latlngs(i, &feature.geometry.coordinates)?;
        let roles = feature.properties.roles();

        // coords_to_latlngs never returns an empty edge.
        if roles.starts_at_waypoint() {
            via_coords.push(edge_coords[0]);
            via_indices.push(coordinates.len());
        }
        if roles.is_destination {
            via_coords.push(edge_coords[edge_coords.len() - 1]);
            via_indices.push(coordinates.len() + edge_coords.len() - 1);
        }

        instructions.extend(instructions_for(
            &feature.properties,
            roles,
            &coordinates,
            &edge_coords,
        )?);

        coordinates.extend_from_slice(&edge_coords);
        total_distance += feature.properties.distance;
        total_hours += feature.properties.cost;
    }

    log::debug!(
        "Assembled {} edges into {} points, {} instructions, {} waypoints",
        features.len(),
        coordinates.len(),
        instructions.len(),
        via_coords.len()
    );

    Ok(Route {
        name: String::new(),
        coordinates,
        instructions,
        summary: RouteSummary {
            total_distance,
            total_time: (total_hours * 3600.0).round() as i64,
        },
        input_waypoints: input_waypoints.to_vec(),
        waypoints: correlate_waypoints(input_waypoints, &via_coords),
        waypoint_indices: via_indices,
    })
}
