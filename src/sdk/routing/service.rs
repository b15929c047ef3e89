use std::future::Future;

use super::error::RoutingError;
use super::route::Route;
use super::waypoint::Waypoint;

pub trait RoutingProvider: Send + Sync {
    /// Computes the route through `waypoints`, in order.
    ///
    /// Resolves exactly once: a complete route, or the first error hit.
    fn route(&self, waypoints: &[Waypoint]) -> impl Future<Output = Result<Route, RoutingError>> + Send;
}
