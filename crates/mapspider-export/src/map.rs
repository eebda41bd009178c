//! Self-contained Leaflet HTML map of scan results.

use std::path::{Path, PathBuf};

use mapspider_places::Place;

use crate::{timestamped_filename, ExportError};

/// Marker data is injected where this token appears.
const MARKERS_TOKEN: &str = "__MARKERS__";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>mapspider results</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <style>
        #map { height: 95vh; width: 100%; }
        body { margin: 0; padding: 0; }
        .map-controls {
            padding: 10px;
            background: white;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
        }
    </style>
</head>
<body>
    <div class="map-controls">
        <select id="mapStyle" onchange="changeMapStyle()">
            <option value="osm">OpenStreetMap</option>
            <option value="carto">Carto Light</option>
            <option value="terrain">Terrain</option>
        </select>
    </div>
    <div id="map"></div>
    <script>
        const map = L.map('map');
        let currentLayer;

        const layers = {
            osm: L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
                attribution: '© OpenStreetMap contributors'
            }),
            carto: L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png', {
                attribution: '© CARTO'
            }),
            terrain: L.tileLayer('https://{s}.tile.thunderforest.com/outdoors/{z}/{x}/{y}.png', {
                attribution: '© Thunderforest'
            })
        };

        function changeMapStyle() {
            const style = document.getElementById('mapStyle').value;
            if (currentLayer) {
                map.removeLayer(currentLayer);
            }
            currentLayer = layers[style];
            map.addLayer(currentLayer);
        }

        currentLayer = layers.osm;
        currentLayer.addTo(map);

        const markers = __MARKERS__;
        const bounds = L.latLngBounds();

        markers.forEach(marker => {
            bounds.extend([marker.lat, marker.lng]);
            L.marker([marker.lat, marker.lng])
             .bindPopup('<b>' + marker.name + '</b><br>' + marker.address)
             .addTo(map);
        });

        if (markers.length > 0) {
            map.fitBounds(bounds);
        } else {
            map.setView([0, 0], 2);
        }
    </script>
</body>
</html>
"#;

/// Writes an HTML map of `places` under `<output_dir>/html/` and returns the
/// path. Places without a location are skipped.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory or file cannot be written.
pub fn write_map(places: &[Place], output_dir: &Path) -> Result<PathBuf, ExportError> {
    let dir = output_dir.join("html");
    std::fs::create_dir_all(&dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let markers: Vec<serde_json::Value> = places
        .iter()
        .filter_map(|place| {
            let coord = place.coordinate()?;
            Some(serde_json::json!({
                "name": place.name().unwrap_or("Unknown place"),
                "address": place.formatted_address.as_deref().unwrap_or("No address"),
                "lat": coord.lat,
                "lng": coord.lng,
            }))
        })
        .collect();

    let html = HTML_TEMPLATE.replace(
        MARKERS_TOKEN,
        &serde_json::to_string(&markers).unwrap_or_else(|_| "[]".to_owned()),
    );

    let path = dir.join(timestamped_filename("html"));
    std::fs::write(&path, html).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), markers = markers.len(), "wrote HTML map");
    Ok(path)
}
