//! Google Places API v1 response types for the `places:searchNearby` endpoint.
//!
//! ## Observed shape
//!
//! ### `id`
//! Documented as always present, but modeled as `Option<String>` so a record
//! with a missing ID degrades gracefully instead of failing the whole page.
//! Downstream deduplication treats ID-less records as never-equal.
//!
//! ### `displayName`
//! A localized text object `{ "text": "...", "languageCode": "en" }`, not a
//! plain string.
//!
//! ### `rating` / `userRatingCount`
//! Absent for places with no reviews (omitted, not `null`-with-zero).
//!
//! ### `plusCode`
//! An object with `globalCode`/`compoundCode`; either member may be absent
//! for places in sparsely mapped areas.

use serde::{Deserialize, Serialize};

use mapspider_core::Coordinate;

/// Top-level response from `POST /v1/places:searchNearby`.
///
/// The `places` key is omitted entirely (not an empty array) when the search
/// matched nothing, hence `#[serde(default)]`.
#[derive(Debug, Deserialize)]
pub struct SearchNearbyResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// One place returned by the endpoint.
///
/// Only `id` matters to the scan core (it is the dedup key); the remaining
/// payload is carried through opaquely for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub google_maps_uri: Option<String>,
    #[serde(default)]
    pub plus_code: Option<PlusCode>,
}

impl Place {
    /// Display name text, if the endpoint supplied one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|n| n.text.as_str())
    }

    /// Location as a domain [`Coordinate`], if present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location
            .as_ref()
            .map(|l| Coordinate::new(l.latitude, l.longitude))
    }
}

/// `{ "text": ..., "languageCode": ... }` wrapper used by v1 display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlusCode {
    #[serde(default)]
    pub global_code: Option<String>,
    #[serde(default)]
    pub compound_code: Option<String>,
}
