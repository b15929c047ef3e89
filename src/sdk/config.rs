use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080/geoserver/pgrouting/wfs";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No WFS layer given; pass one or set {0}")]
    MissingTypeName(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Everything needed to reach the pgRouting layer published by GeoServer.
#[derive(Debug, Clone)]
pub struct WfsConfig {
    pub service_url: String,
    /// WFS `typeName`, i.e. the SQL view wrapping the pgRouting query.
    pub type_name: String,
    /// Deadline for one request, including any wait on the rate limiter.
    pub timeout: Duration,
    /// Extra query parameters sent with every request, in order.
    pub url_parameters: Vec<(String, String)>,
    pub requests_per_minute: u32,
}

impl WfsConfig {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            type_name: type_name.into(),
            timeout: DEFAULT_TIMEOUT,
            url_parameters: vec![
                ("version".to_string(), "1.0.0".to_string()),
                ("request".to_string(), "GetFeature".to_string()),
                ("outputFormat".to_string(), "application/json".to_string()),
            ],
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        }
    }

    /// Reads `PGROUTING_*` variables on top of the defaults. An explicit
    /// `type_name` wins over `PGROUTING_TYPE_NAME`.
    pub fn from_env(type_name: Option<&str>) -> Result<Self, ConfigError> {
        let type_name = match type_name {
            Some(name) => name.to_string(),
            None => env::var("PGROUTING_TYPE_NAME")
                .map_err(|_| ConfigError::MissingTypeName("PGROUTING_TYPE_NAME"))?,
        };

        let mut config = Self::new(type_name);

        if let Ok(url) = env::var("PGROUTING_WFS_URL") {
            config.service_url = url;
        }
        if let Some(secs) = parse_var::<u64>("PGROUTING_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(rate) = parse_var::<u32>("PGROUTING_REQUESTS_PER_MINUTE")? {
            config.requests_per_minute = rate;
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}
