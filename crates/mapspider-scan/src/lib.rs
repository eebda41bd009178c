//! Adaptive quadrant-subdivision place scan.
//!
//! Drives recursive region queries against the Places client: a region whose
//! result count hits the endpoint's page cap is split into four quadrant
//! children and re-queried at half the extent, until regions fit under the
//! cap, the minimum radius floor is reached, or the global request budget
//! runs out. Accepted results are deduplicated by place ID.

pub mod dedup;
pub mod geo;
pub mod progress;
pub mod region;
pub mod spider;

mod error;

pub use dedup::dedup_places;
pub use error::ScanError;
pub use region::SearchRegion;
pub use spider::{ScanReport, Spider};
