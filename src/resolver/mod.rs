//! Position resolution
//!
//! A [`PositionResolver`] turns one catalog entry and an observer context into
//! a [`RawPositionRecord`]. Ephemeris work (sidereal time, orbital mechanics,
//! equatorial-to-horizontal transforms) lives behind this trait.

pub mod fixed_star;
#[cfg(feature = "horizons")]
pub mod horizons;

use serde::{Deserialize, Serialize};

use crate::catalog::{BodyCategory, CatalogEntry};
use crate::error::ResolutionFailure;
use crate::observer::ObserverContext;

pub use fixed_star::FixedStarResolver;
#[cfg(feature = "horizons")]
pub use horizons::HorizonsResolver;

/// Unformatted position of one body for one observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPositionRecord {
    pub name: String,
    pub category: BodyCategory,
    pub magnitude: f64,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    /// Sexagesimal hours, `H:M:S`
    pub right_ascension: String,
    /// Signed sexagesimal degrees, `±D:M:S`
    pub declination: String,
    pub is_above_horizon: bool,
    /// Earth distance in AU (Sun, Moon and planets only)
    pub distance_au: Option<f64>,
}

impl RawPositionRecord {
    /// Build a record for `entry`, deriving the horizon flag from the altitude
    /// and dropping the distance for categories that do not report one.
    pub fn new(
        entry: &CatalogEntry,
        magnitude: f64,
        altitude_deg: f64,
        azimuth_deg: f64,
        right_ascension: impl Into<String>,
        declination: impl Into<String>,
        distance_au: Option<f64>,
    ) -> Self {
        let category = entry.category();
        Self {
            name: entry.name().to_string(),
            category,
            magnitude,
            altitude_deg,
            azimuth_deg,
            right_ascension: right_ascension.into(),
            declination: declination.into(),
            is_above_horizon: altitude_deg > 0.0,
            distance_au: distance_au.filter(|_| category.reports_distance()),
        }
    }
}

/// Ephemeris capability consumed by the pipeline
pub trait PositionResolver: Send + Sync {
    fn resolve(
        &self,
        entry: &CatalogEntry,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "resolver"
    }
}

impl<R: PositionResolver + ?Sized> PositionResolver for Box<R> {
    fn resolve(
        &self,
        entry: &CatalogEntry,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure> {
        (**self).resolve(entry, observer)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<R: PositionResolver + ?Sized> PositionResolver for &R {
    fn resolve(
        &self,
        entry: &CatalogEntry,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure> {
        (**self).resolve(entry, observer)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Check that a resolver produced usable numbers.
pub(crate) fn ensure_finite(
    name: &str,
    values: &[(&str, f64)],
) -> Result<(), ResolutionFailure> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((field, v)) => Err(ResolutionFailure::Computation(format!(
            "{name}: {field} is not finite ({v})"
        ))),
        None => Ok(()),
    }
}
