//! Brightest celestial objects above the horizon for a location and time.
//!
//! A query builds an [`ObserverContext`], resolves every [`Catalog`] entry
//! through a [`PositionResolver`], keeps the bodies above the horizon, ranks
//! them brightest first and formats their coordinates for display.

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod observer;
pub mod pipeline;
pub mod query;
pub mod resolver;
pub mod timezone;
pub mod utils;

#[cfg(feature = "python")]
mod python;

// Re-export public API
pub use catalog::{BodyCategory, Catalog, CatalogEntry, FixedStar, SolarSystemBody};
pub use config::QueryOptions;
pub use error::{ResolutionFailure, SkyError};
pub use observer::ObserverContext;
pub use pipeline::{rank_visible, RankedResult, ResolutionReport, SkyPipeline};
pub use query::{bright_objects, BrightObjectsRequest, BrightObjectsResponse, CelestialObject};
pub use resolver::{FixedStarResolver, PositionResolver, RawPositionRecord};

#[cfg(feature = "horizons")]
pub use resolver::HorizonsResolver;
