use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("The service returned no edges to build a route from")]
    EmptyResponse,

    // Position `position` of feature `feature` could not be read as [lon, lat]
    #[error("Malformed geometry in feature {feature}, position {position}: {reason}")]
    MalformedGeometry {
        feature: usize,
        position: usize,
        reason: String,
    },

    // `index` is the route coordinate index the turn would have applied to
    #[error("Direction is undefined at route index {index} (zero-length or missing segment)")]
    DegenerateGeometry { index: usize },

    #[error("At least two waypoints are required, got {0}")]
    NotEnoughWaypoints(usize),

    #[error("Invalid WFS service URL: {0}")]
    InvalidServiceUrl(String),

    #[error("Underlying request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("WFS service returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("pgRouting WFS request timed out after {0:?}")]
    UpstreamTimeout(Duration),

    #[error("Failed to parse JSON response: {0}")]
    ResponseParse(#[from] serde_json::Error),
}
