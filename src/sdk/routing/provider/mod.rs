pub mod fetch;
pub mod pgrouting;

pub use fetch::{HttpFetch, ReqwestFetcher};
pub use pgrouting::{route_from_response, PgRoutingProvider};
