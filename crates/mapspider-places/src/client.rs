//! HTTP client for the Google Places API v1 `places:searchNearby` endpoint.
//!
//! Wraps `reqwest` with Places-specific error handling, API key management,
//! typed response deserialization, and a global request counter. The counter
//! increments once per logical search, not once per HTTP attempt, so a call
//! that was retried three times still spends one unit of the caller's budget.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use mapspider_core::{Coordinate, MIN_RADIUS_METERS, PAGE_CAP};

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{Place, SearchNearbyResponse};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/";

/// Response fields requested from the endpoint. Anything not listed here is
/// omitted from the payload, which keeps responses small.
const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.types,\
places.location,places.rating,places.userRatingCount,places.businessStatus,\
places.primaryType,places.googleMapsUri,places.plusCode";

/// Client for the Places API v1 nearby search.
///
/// Manages the HTTP client, API key, base URL, and the run-wide request
/// counter. Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    backoff_base_ms: u64,
    requests_issued: AtomicU32,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mapspider/0.1 (place-enumeration)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so path
        // joins resolve against the root rather than a last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
            requests_issued: AtomicU32::new(0),
        })
    }

    /// Number of logical search calls issued so far, across all regions.
    ///
    /// Monotonically increasing; internal retries do not inflate the count.
    #[must_use]
    pub fn requests_issued(&self) -> u32 {
        self.requests_issued.load(Ordering::SeqCst)
    }

    /// Searches for places within `radius_meters` of `center`.
    ///
    /// When `included_type` is set, results are restricted to that place type
    /// (e.g. `"cafe"`). At or below the minimum split radius the request asks
    /// the endpoint to rank by distance instead of relevance, which surfaces
    /// the densest cluster around the probe point.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::QuotaExceeded`] — HTTP 429 after all retries exhausted.
    /// - [`PlacesError::InvalidRequest`] — HTTP 400 (not retried).
    /// - [`PlacesError::Auth`] — HTTP 401/403 (not retried).
    /// - [`PlacesError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`PlacesError::Http`] — network or TLS failure after all retries.
    /// - [`PlacesError::Deserialize`] — response body is not valid JSON.
    pub async fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        included_type: Option<&str>,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.search_url()?;
        let body = Self::search_body(center, radius_meters, included_type);

        // One logical call, one unit of budget — counted before the first
        // attempt so the ceiling check upstream stays conservative.
        self.requests_issued.fetch_add(1, Ordering::SeqCst);

        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = self
                    .client
                    .post(url.clone())
                    .header("X-Goog-Api-Key", &self.api_key)
                    .header("X-Goog-FieldMask", FIELD_MASK)
                    .json(&body)
                    .send()
                    .await?;

                let status = response.status();
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(PlacesError::QuotaExceeded { retry_after_secs });
                }

                if status == StatusCode::BAD_REQUEST {
                    let text = response.text().await?;
                    return Err(PlacesError::InvalidRequest {
                        message: error_message(&text),
                    });
                }

                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    let text = response.text().await?;
                    return Err(PlacesError::Auth {
                        status: status.as_u16(),
                        message: error_message(&text),
                    });
                }

                if !status.is_success() {
                    return Err(PlacesError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let text = response.text().await?;
                serde_json::from_str::<SearchNearbyResponse>(&text).map_err(|e| {
                    PlacesError::Deserialize {
                        context: format!("searchNearby({:.6}, {:.6})", center.lat, center.lng),
                        source: e,
                    }
                })
            }
        })
        .await?;

        Ok(response.places)
    }

    /// Builds the JSON body for a nearby search.
    fn search_body(
        center: Coordinate,
        radius_meters: f64,
        included_type: Option<&str>,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "maxResultCount": PAGE_CAP,
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": center.lat, "longitude": center.lng },
                    "radius": radius_meters,
                }
            }
        });
        if let Some(place_type) = included_type {
            body["includedTypes"] = serde_json::json!([place_type]);
        }
        if radius_meters <= MIN_RADIUS_METERS {
            body["rankPreference"] = serde_json::json!("DISTANCE");
        }
        body
    }

    fn search_url(&self) -> Result<Url, PlacesError> {
        self.base_url
            .join("v1/places:searchNearby")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Pulls the human-readable message out of a Places error envelope
/// (`{"error": {"message": ...}}`), falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
