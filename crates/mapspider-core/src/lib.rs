use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
mod config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

/// Maximum number of places the `searchNearby` endpoint returns per call.
/// A region that comes back with this many results is assumed truncated.
pub const PAGE_CAP: usize = 20;

/// Smallest search radius (meters) at which further quadrant splitting is
/// permitted. Below this a region is always accepted, which bounds recursion
/// depth regardless of result density.
pub const MIN_RADIUS_METERS: f64 = 15.0;

/// A point on the globe in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`; the
/// scan core does not enforce the ranges, callers validate user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
