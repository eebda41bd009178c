//! CSV export of deduplicated scan results.

use std::path::{Path, PathBuf};

use mapspider_places::Place;

use crate::{timestamped_filename, ExportError};

const HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Address",
    "Rating",
    "Types",
    "Coordinates",
    "Business status",
    "User ratings total",
    "Primary type",
    "Google Maps URL",
    "Plus code",
];

/// Writes `places` as CSV under `<output_dir>/csv/` with a timestamped
/// filename and returns the path.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory cannot be created or
/// [`ExportError::Csv`] if a record fails to serialize.
pub fn write_csv(places: &[Place], output_dir: &Path) -> Result<PathBuf, ExportError> {
    let dir = output_dir.join("csv");
    std::fs::create_dir_all(&dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let path = dir.join(timestamped_filename("csv"));
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(HEADERS)?;
    for place in places {
        writer.write_record(build_row(place))?;
    }
    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows = places.len(), "wrote CSV export");
    Ok(path)
}

fn build_row(place: &Place) -> [String; 11] {
    [
        place.id.clone().unwrap_or_default(),
        place.name().unwrap_or_default().to_owned(),
        place.formatted_address.clone().unwrap_or_default(),
        place.rating.map(|r| r.to_string()).unwrap_or_default(),
        place.types.join(";"),
        place
            .coordinate()
            .map(|c| format!("{},{}", c.lat, c.lng))
            .unwrap_or_default(),
        place.business_status.clone().unwrap_or_default(),
        place
            .user_rating_count
            .map(|n| n.to_string())
            .unwrap_or_default(),
        place.primary_type.clone().unwrap_or_default(),
        place.google_maps_uri.clone().unwrap_or_default(),
        place
            .plus_code
            .as_ref()
            .and_then(|p| p.global_code.clone())
            .unwrap_or_default(),
    ]
}
