//! Configuration constants and environment-driven settings
//!
//! Values that may be overridden at runtime are read once from the process
//! environment (after loading an optional `.env` file).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of objects returned when the caller does not ask for a specific count
pub const DEFAULT_MAX_OBJECTS: usize = 20;

/// Largest `max_objects` accepted at the query boundary
pub const MAX_OBJECTS_LIMIT: usize = 50;

/// Default JPL Horizons API endpoint
pub const DEFAULT_HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Observing wavelength in micrometers passed to SOFA (visible light)
pub const OBSERVING_WAVELENGTH_UM: f64 = 0.55;

fn env_var(key: &str) -> Option<String> {
    let _ = dotenvy::dotenv();
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Horizons endpoint, overridable with `SKY_OBJECTS_HORIZONS_URL`
pub static HORIZONS_API_URL: Lazy<String> = Lazy::new(|| {
    env_var("SKY_OBJECTS_HORIZONS_URL").unwrap_or_else(|| DEFAULT_HORIZONS_API_URL.to_string())
});

/// Observer height above the ellipsoid in meters, overridable with
/// `SKY_OBJECTS_OBSERVER_HEIGHT_M`
pub static OBSERVER_HEIGHT_M: Lazy<f64> = Lazy::new(|| {
    env_var("SKY_OBJECTS_OBSERVER_HEIGHT_M")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
});

/// Per-query options for the ranking stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Maximum number of objects kept after ranking
    #[serde(default = "default_max_objects")]
    pub max_objects: usize,
}

fn default_max_objects() -> usize {
    DEFAULT_MAX_OBJECTS
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_objects: DEFAULT_MAX_OBJECTS,
        }
    }
}
