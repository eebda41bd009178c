use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("origin latitude {lat} is too close to a pole; longitude offsets degenerate above ±{limit}°")]
    PolarOrigin { lat: f64, limit: f64 },

    #[error("search radius must be positive, got {0}")]
    NonPositiveRadius(f64),
}
