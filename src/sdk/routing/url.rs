use reqwest::Url;

use super::error::RoutingError;
use super::waypoint::Waypoint;
use crate::sdk::config::WfsConfig;

/// Builds the WFS GetFeature URL for a route through `waypoints`.
///
/// The waypoints travel in the SQL view's `viewparams` as
/// `points:lng\,lat|lng\,lat|...`; GeoServer needs the comma escaped.
pub fn build_route_url(config: &WfsConfig, waypoints: &[Waypoint]) -> Result<Url, RoutingError> {
    if waypoints.len() < 2 {
        return Err(RoutingError::NotEnoughWaypoints(waypoints.len()));
    }

    let points = waypoints
        .iter()
        .map(|wp| format!("{}\\,{}", wp.lat_lng.lng, wp.lat_lng.lat))
        .collect::<Vec<_>>()
        .join("|");

    let mut url = Url::parse(&config.service_url)
        .map_err(|err| RoutingError::InvalidServiceUrl(format!("{}: {}", config.service_url, err)))?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("typeName", &config.type_name)
            .append_pair("viewparams", &format!("points:{}", points));
        for (key, value) in &config.url_parameters {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}
