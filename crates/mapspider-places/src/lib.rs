pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{LatLng, LocalizedText, Place};
