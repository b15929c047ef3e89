use std::{fs, io::Write, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use pgroute::{
    sdk::config::WfsConfig,
    sdk::routing::{geometry::LatLng, provider::route_from_response, PgRoutingProvider},
    sdk::util::{log::init_logging, rate_limit::wfs_limiter},
    Route, RoutingProvider, Waypoint,
};

/// Fetch a route from a pgRouting GeoServer layer and print it as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// WFS layer wrapping the pgRouting query (falls back to PGROUTING_TYPE_NAME)
    #[arg(short, long)]
    type_name: Option<String>,

    /// A waypoint as "LAT,LNG" or "LAT,LNG,NAME"; repeat in route order
    #[arg(short, long = "waypoint", value_parser = parse_waypoint)]
    waypoints: Vec<Waypoint>,

    /// [Optional] WFS endpoint, overrides PGROUTING_WFS_URL
    #[arg(long)]
    service_url: Option<String>,

    /// [Optional] Request timeout in seconds, overrides PGROUTING_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// [Optional] Assemble a saved WFS response instead of calling the service
    #[arg(long)]
    response_file: Option<PathBuf>,

    /// [Optional] Write the route here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn parse_waypoint(s: &str) -> Result<Waypoint, String> {
    let mut parts = s.splitn(3, ',');
    let mut number = |what: &str| -> Result<f64, String> {
        parts
            .next()
            .ok_or_else(|| format!("missing {} in \"{}\"", what, s))?
            .trim()
            .parse()
            .map_err(|_| format!("{} is not a number in \"{}\"", what, s))
    };

    let lat = number("latitude")?;
    let lng = number("longitude")?;
    let location = LatLng::new(lat, lng);

    Ok(match parts.next().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => Waypoint::named(location, name),
        None => Waypoint::new(location),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let route = match &cli.response_file {
        Some(path) => {
            log::info!("Assembling saved response from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            route_from_response(&text, &cli.waypoints)?
        }
        None => fetch_route(&cli).await?,
    };

    log::info!(
        "Route: {:.1} distance units, {} s, {} points, {} instructions",
        route.summary.total_distance,
        route.summary.total_time,
        route.coordinates.len(),
        route.instructions.len()
    );

    let json_output = serde_json::to_string_pretty(&route)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json_output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Route written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json_output)?;
        }
    }

    Ok(())
}

async fn fetch_route(cli: &Cli) -> Result<Route> {
    let mut config = WfsConfig::from_env(cli.type_name.as_deref())?;
    if let Some(url) = &cli.service_url {
        config.service_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    log::info!(
        "Routing {} waypoints via layer \"{}\" at {}",
        cli.waypoints.len(),
        config.type_name,
        config.service_url
    );

    let limiter = wfs_limiter(config.requests_per_minute);
    let provider = PgRoutingProvider::new(config, limiter);

    provider
        .route(&cli.waypoints)
        .await
        .context("Routing request failed")
}
