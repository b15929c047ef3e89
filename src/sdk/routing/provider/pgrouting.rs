use super::fetch::{HttpFetch, ReqwestFetcher};
use crate::sdk::config::WfsConfig;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::feature::FeatureCollection;
use crate::sdk::routing::route::{assemble, Route};
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::routing::url::build_route_url;
use crate::sdk::routing::waypoint::Waypoint;
use crate::sdk::util::rate_limit::Limiter;

/// Routes through a pgRouting SQL view published as a GeoServer WFS layer.
pub struct PgRoutingProvider<F = ReqwestFetcher> {
    config: WfsConfig,
    fetcher: F,
    limiter: Limiter,
}

impl PgRoutingProvider {
    pub fn new(config: WfsConfig, limiter: Limiter) -> Self {
        Self::with_fetcher(config, limiter, ReqwestFetcher::default())
    }
}

impl<F: HttpFetch> PgRoutingProvider<F> {
    pub fn with_fetcher(config: WfsConfig, limiter: Limiter, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            limiter,
        }
    }

    pub fn config(&self) -> &WfsConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

/// Parses a WFS response body and assembles the route from it.
pub fn route_from_response(text: &str, waypoints: &[Waypoint]) -> Result<Route, RoutingError> {
    let collection: FeatureCollection = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse WFS response.\nError: {}. Body: {}", e, text);
        e
    })?;

    assemble(&collection.features, waypoints)
}

impl<F: HttpFetch> RoutingProvider for PgRoutingProvider<F> {
    async fn route(&self, waypoints: &[Waypoint]) -> Result<Route, RoutingError> {
        // Owned copy, so the caller's waypoints can't change under the request.
        let waypoints = waypoints.to_vec();
        let url = build_route_url(&self.config, &waypoints)?;

        log::debug!(
            "[PROVIDER] Requesting route through {} waypoints from layer \"{}\"",
            waypoints.len(),
            self.config.type_name
        );

        // The deadline covers the limiter wait too. Dropping the fetch on
        // timeout discards whatever it would have returned.
        let request = async move {
            self.limiter.until_ready().await;
            self.fetcher.fetch(url).await
        };
        let text = tokio::time::timeout(self.config.timeout, request)
            .await
            .map_err(|_| {
                log::warn!(
                    "pgRouting WFS request timed out after {:?}",
                    self.config.timeout
                );
                RoutingError::UpstreamTimeout(self.config.timeout)
            })??;

        route_from_response(&text, &waypoints)
    }
}
