//! Horizontal coordinates of fixed stars
//!
//! Uses SOFA `atco13` (ICRS to observed) with zero pressure, so no atmospheric
//! refraction is applied. UT1-UTC and polar motion are taken as zero, which is
//! far below the precision of the star catalog.

use sofars::astro::atco13;
use tracing::trace;

use super::{ensure_finite, PositionResolver, RawPositionRecord};
use crate::catalog::{CatalogEntry, FixedStar};
use crate::config::{OBSERVER_HEIGHT_M, OBSERVING_WAVELENGTH_UM};
use crate::error::ResolutionFailure;
use crate::observer::ObserverContext;
use crate::utils::sexagesimal::{parse_declination_deg, parse_right_ascension_deg};
use crate::utils::time_utils::datetime_to_jd_utc;

/// Convert ICRS right ascension/declination (degrees) to altitude/azimuth
/// (degrees) for the observer. Azimuth is measured from north through east.
pub fn equatorial_to_horizontal(
    ra_deg: f64,
    dec_deg: f64,
    observer: &ObserverContext,
) -> Result<(f64, f64), ResolutionFailure> {
    let (utc1, utc2) = datetime_to_jd_utc(&observer.instant);
    let elong = observer.longitude.to_radians();
    let phi = observer.latitude.to_radians();

    let (aob, zob, _hob, _dob, _rob, _eo) = atco13(
        ra_deg.to_radians(),
        dec_deg.to_radians(),
        0.0,
        0.0,
        0.0,
        0.0,
        utc1,
        utc2,
        0.0,
        elong,
        phi,
        *OBSERVER_HEIGHT_M,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        OBSERVING_WAVELENGTH_UM,
    )
    .map_err(|e| ResolutionFailure::Computation(format!("SOFA atco13 failed: {e:?}")))?;

    let altitude_deg = (std::f64::consts::FRAC_PI_2 - zob).to_degrees();
    let azimuth_deg = aob.to_degrees().rem_euclid(360.0);
    Ok((altitude_deg, azimuth_deg))
}

/// Resolve a fixed star: only altitude/azimuth are computed, the catalog's
/// coordinates and magnitude are echoed unchanged.
pub fn resolve_fixed_star(
    entry: &CatalogEntry,
    star: &FixedStar,
    observer: &ObserverContext,
) -> Result<RawPositionRecord, ResolutionFailure> {
    let ra_deg = parse_right_ascension_deg(star.right_ascension)?;
    let dec_deg = parse_declination_deg(star.declination)?;
    let (altitude_deg, azimuth_deg) = equatorial_to_horizontal(ra_deg, dec_deg, observer)?;
    ensure_finite(
        star.name,
        &[("altitude", altitude_deg), ("azimuth", azimuth_deg)],
    )?;
    trace!(
        star = star.name,
        altitude_deg,
        azimuth_deg,
        "resolved fixed star"
    );

    Ok(RawPositionRecord::new(
        entry,
        star.magnitude,
        altitude_deg,
        azimuth_deg,
        star.right_ascension,
        star.declination,
        None,
    ))
}

/// Offline resolver handling fixed stars only.
///
/// Solar-system bodies are reported as [`ResolutionFailure::Unsupported`] and
/// therefore skipped by the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStarResolver;

impl PositionResolver for FixedStarResolver {
    fn resolve(
        &self,
        entry: &CatalogEntry,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure> {
        match entry {
            CatalogEntry::FixedStar(star) => resolve_fixed_star(entry, star, observer),
            CatalogEntry::DynamicBody(body) => Err(ResolutionFailure::Unsupported(format!(
                "{} needs an ephemeris for solar-system bodies",
                body.name()
            ))),
        }
    }

    fn name(&self) -> &str {
        "fixed-star"
    }
}
