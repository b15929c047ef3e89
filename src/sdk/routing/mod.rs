pub mod error;
pub mod feature;
pub mod geometry;
pub mod instruction;
pub mod provider;
pub mod route;
pub mod service;
pub mod turn;
pub mod url;
pub mod waypoint;

pub use error::RoutingError;
pub use feature::{EdgeProperties, FeatureCollection, PointRoles, RouteFeature};
pub use geometry::{coords_to_latlngs, LatLng};
pub use instruction::{instructions_for, Instruction, InstructionType};
pub use provider::{HttpFetch, PgRoutingProvider, ReqwestFetcher};
pub use route::{assemble, Route, RouteSummary};
pub use service::RoutingProvider;
pub use turn::{classify, TurnType};
pub use url::build_route_url;
pub use waypoint::{correlate_waypoints, Waypoint};
