//! Argument parsing and validation for the `mapspider` binary.

use std::path::PathBuf;

use clap::Parser;

use mapspider_core::Coordinate;

/// Bounds accepted for the search radius, matching what the scan can
/// meaningfully subdivide.
const MIN_SEARCH_RADIUS: f64 = 50.0;
const MAX_SEARCH_RADIUS: f64 = 50_000.0;

#[derive(Debug, Parser)]
#[command(name = "mapspider")]
#[command(about = "Adaptive place enumeration via quadrant-subdivision search")]
pub struct Cli {
    /// Origin point as "lat,lng" (repeatable).
    #[arg(long = "point", value_parser = parse_point, required = true)]
    pub points: Vec<Coordinate>,

    /// Search radius in meters (50–50000).
    #[arg(long, value_parser = parse_radius)]
    pub radius: f64,

    /// Maximum number of API requests for the whole run
    /// (defaults to MAPSPIDER_MAX_REQUESTS).
    #[arg(long)]
    pub max_requests: Option<u32>,

    /// Restrict results to one place type (e.g. restaurant, cafe).
    #[arg(long)]
    pub place_type: Option<String>,

    /// Directory for CSV/HTML output (defaults to MAPSPIDER_OUTPUT_DIR).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also render the results as a Leaflet HTML map.
    #[arg(long)]
    pub map: bool,
}

fn parse_point(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got \"{raw}\""))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("latitude \"{lat}\" is not a number"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("longitude \"{lng}\" is not a number"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} outside [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} outside [-180, 180]"));
    }
    Ok(Coordinate::new(lat, lng))
}

fn parse_radius(raw: &str) -> Result<f64, String> {
    let radius: f64 = raw
        .parse()
        .map_err(|_| format!("radius \"{raw}\" is not a number"))?;
    if !(MIN_SEARCH_RADIUS..=MAX_SEARCH_RADIUS).contains(&radius) {
        return Err(format!(
            "radius must be between {MIN_SEARCH_RADIUS} and {MAX_SEARCH_RADIUS} meters"
        ));
    }
    Ok(radius)
}
