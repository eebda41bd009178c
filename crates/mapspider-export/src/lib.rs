//! Output adapters for scan results: CSV table and Leaflet HTML map.

mod csv_export;
mod map;

pub use csv_export::write_csv;
pub use map::write_map;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Timestamped output filename, e.g. `places_20260830_141503.csv`.
fn timestamped_filename(extension: &str) -> String {
    format!(
        "places_{}.{extension}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}
