use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geometry::LatLng;

/// Derived points further than this from every input waypoint only fall back
/// to positional matching.
pub const WAYPOINT_MATCH_TOLERANCE_M: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub lat_lng: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Caller-owned routing options, passed through untouched.
    #[serde(default)]
    pub options: Value,
}

impl Waypoint {
    pub fn new(lat_lng: LatLng) -> Self {
        Self {
            lat_lng,
            name: None,
            options: Value::Null,
        }
    }

    pub fn named(lat_lng: LatLng, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(lat_lng)
        }
    }
}

/// Pairs the waypoint locations found in the route geometry with the
/// waypoints the caller asked for.
///
/// When the counts agree the pairing is positional. Otherwise the closest
/// (derived, input) pairs within [`WAYPOINT_MATCH_TOLERANCE_M`] are taken
/// first, regardless of route order; points left unmatched then take the
/// input waypoint at the same position if nobody claimed it. Anything else
/// stays anonymous.
pub fn correlate_waypoints(input: &[Waypoint], derived: &[LatLng]) -> Vec<Waypoint> {
    let matches: Vec<Option<usize>> = if input.len() == derived.len() {
        (0..derived.len()).map(Some).collect()
    } else {
        log::warn!(
            "Route reports {} waypoints but {} were requested; matching by proximity",
            derived.len(),
            input.len()
        );
        match_by_proximity(input, derived)
    };

    derived
        .iter()
        .zip(matches)
        .map(|(location, matched)| match matched {
            Some(j) => Waypoint {
                lat_lng: *location,
                name: input[j].name.clone(),
                options: input[j].options.clone(),
            },
            None => Waypoint::new(*location),
        })
        .collect()
}

fn match_by_proximity(input: &[Waypoint], derived: &[LatLng]) -> Vec<Option<usize>> {
    let mut pairs: Vec<(f64, usize, usize)> = derived
        .iter()
        .enumerate()
        .flat_map(|(i, location)| {
            input
                .iter()
                .enumerate()
                .map(move |(j, wp)| (wp.lat_lng.haversine_distance(location), i, j))
        })
        .filter(|(d, _, _)| *d <= WAYPOINT_MATCH_TOLERANCE_M)
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut used = vec![false; input.len()];
    let mut matches: Vec<Option<usize>> = vec![None; derived.len()];

    for (_, i, j) in pairs {
        if matches[i].is_none() && !used[j] {
            used[j] = true;
            matches[i] = Some(j);
        }
    }

    for (i, slot) in matches.iter_mut().enumerate() {
        if slot.is_none() && i < input.len() && !used[i] {
            used[i] = true;
            *slot = Some(i);
        }
    }

    matches
}
