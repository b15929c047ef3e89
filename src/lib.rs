pub mod sdk;

pub use sdk::config::WfsConfig;
pub use sdk::routing::route::{assemble, Route, RouteSummary};
pub use sdk::routing::provider::PgRoutingProvider;
pub use sdk::routing::{RoutingError, RoutingProvider, Waypoint};
