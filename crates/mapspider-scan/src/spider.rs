//! The quadrant-subdivision search scheduler.

use mapspider_core::{Coordinate, MIN_RADIUS_METERS, PAGE_CAP};
use mapspider_places::{Place, PlacesClient};

use crate::dedup::dedup_places;
use crate::error::ScanError;
use crate::geo::MAX_ORIGIN_LATITUDE;
use crate::progress::ScanProgress;
use crate::region::SearchRegion;

/// Outcome of a full scan across all origins.
#[derive(Debug)]
pub struct ScanReport {
    /// Accepted results across every region, deduplicated by place ID in
    /// first-accepted order.
    pub places: Vec<Place>,
    /// Logical endpoint calls spent, as counted by the client.
    pub requests_used: u32,
    /// Whether the scan stopped because the request ceiling was hit rather
    /// than by exhausting the region tree.
    pub budget_exhausted: bool,
}

/// Recursive region scheduler with a global request budget.
///
/// Each region is queried once; a region that comes back "full" (page cap
/// hit) while still above the minimum radius is split into four quadrant
/// children and the children queried in its place. Regions are processed
/// depth-first via an explicit work stack — regions are never retained after
/// their visit, so no arena or index structure is needed.
///
/// The request ceiling is checked before every endpoint call. Once reached,
/// the stop flag halts every pending region across all origins and the
/// budget-exhausted callback fires exactly once.
pub struct Spider<'a> {
    client: &'a PlacesClient,
    max_requests: u32,
    included_type: Option<String>,
    on_progress: Option<Box<dyn FnMut(f64) + 'a>>,
    on_budget_exhausted: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> Spider<'a> {
    #[must_use]
    pub fn new(client: &'a PlacesClient, max_requests: u32) -> Self {
        Self {
            client,
            max_requests,
            included_type: None,
            on_progress: None,
            on_budget_exhausted: None,
        }
    }

    /// Restricts the scan to one place type (e.g. `"restaurant"`).
    #[must_use]
    pub fn place_type(mut self, place_type: Option<String>) -> Self {
        self.included_type = place_type;
        self
    }

    /// Called with the current percentage (0–100) after each accepted region.
    #[must_use]
    pub fn on_progress(mut self, callback: impl FnMut(f64) + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Called at most once, when the request ceiling halts the scan.
    #[must_use]
    pub fn on_budget_exhausted(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_budget_exhausted = Some(Box::new(callback));
        self
    }

    /// Scans every origin with the given initial radius and returns the
    /// deduplicated results.
    ///
    /// Endpoint failures are absorbed per region: a region whose query fails
    /// contributes nothing but does not disturb its siblings or abort the
    /// run. Only the request ceiling stops a scan early.
    ///
    /// # Errors
    ///
    /// - [`ScanError::NonPositiveRadius`] if `radius_meters <= 0`.
    /// - [`ScanError::PolarOrigin`] if any origin lies above ±89° latitude,
    ///   where the longitude offset degenerates.
    pub async fn run(
        &mut self,
        origins: &[Coordinate],
        radius_meters: f64,
    ) -> Result<ScanReport, ScanError> {
        if radius_meters <= 0.0 {
            return Err(ScanError::NonPositiveRadius(radius_meters));
        }
        for origin in origins {
            if origin.lat.abs() >= MAX_ORIGIN_LATITUDE {
                return Err(ScanError::PolarOrigin {
                    lat: origin.lat,
                    limit: MAX_ORIGIN_LATITUDE,
                });
            }
        }

        // Bounding square of the initial circle, fixed per origin.
        let total_area = 4.0 * radius_meters * radius_meters;

        let mut all_places: Vec<Place> = Vec::new();
        let mut budget_exhausted = false;

        for origin in origins {
            // Area accounting restarts per origin; the place list and the
            // request counter persist across origins.
            let mut progress = ScanProgress::new(total_area);
            let mut stack = vec![SearchRegion::root(*origin, radius_meters)];

            while let Some(region) = stack.pop() {
                // Ceiling check before every call, so fan-out from a split
                // cannot overrun the budget.
                if self.client.requests_issued() >= self.max_requests {
                    budget_exhausted = true;
                    break;
                }

                let places = self.query_region(&region).await;

                if places.len() >= PAGE_CAP && region.radius_meters > MIN_RADIUS_METERS {
                    // Full page and still room to subdivide: this page is
                    // likely truncated, replace the region with its quadrants.
                    // Reverse push keeps depth-first visit order.
                    for child in region.split().into_iter().rev() {
                        stack.push(child);
                    }
                } else {
                    all_places.extend(places);
                    progress.note_scanned(region.bounding_square_area());
                    if let Some(callback) = self.on_progress.as_mut() {
                        callback(progress.percentage());
                    }
                }
            }

            if budget_exhausted {
                tracing::warn!(
                    max_requests = self.max_requests,
                    "request ceiling reached — scan stopped"
                );
                if let Some(callback) = self.on_budget_exhausted.as_mut() {
                    callback();
                }
                break;
            }
        }

        Ok(ScanReport {
            places: dedup_places(all_places),
            requests_used: self.client.requests_issued(),
            budget_exhausted,
        })
    }

    /// Queries one region, degrading any endpoint failure to an empty result
    /// set so a bad region cannot take the run down with it.
    async fn query_region(&self, region: &SearchRegion) -> Vec<Place> {
        let result = self
            .client
            .search_nearby(
                region.center,
                region.radius_meters,
                self.included_type.as_deref(),
            )
            .await;

        match result {
            Ok(places) => {
                tracing::info!(
                    lat = region.center.lat,
                    lng = region.center.lng,
                    radius = region.radius_meters,
                    found = places.len(),
                    requests = self.client.requests_issued(),
                    "scanned region"
                );
                places
            }
            Err(err) => {
                tracing::warn!(
                    lat = region.center.lat,
                    lng = region.center.lng,
                    radius = region.radius_meters,
                    error = %err,
                    "region query failed — treating as empty"
                );
                Vec::new()
            }
        }
    }
}
