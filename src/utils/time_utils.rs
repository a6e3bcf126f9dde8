//! Time utilities for astronomical calculations
//!
//! Conversions between chrono `DateTime<Utc>` and hifitime `Epoch`, and the
//! two-part Julian Dates SOFA routines expect.

use chrono::{DateTime, Utc};
use hifitime::{Duration, Epoch};

/// Modified Julian Date zero point expressed as a Julian Date
pub const MJD_ZERO_JD: f64 = 2400000.5;

/// Convert chrono `DateTime<Utc>` to hifitime `Epoch`
#[inline]
pub fn chrono_to_epoch(dt: &DateTime<Utc>) -> Epoch {
    let nanos = (dt.timestamp() as i128) * 1_000_000_000 + (dt.timestamp_subsec_nanos() as i128);
    Epoch::from_unix_duration(Duration::from_total_nanoseconds(nanos))
}

/// Convert DateTime to MJD (UTC)
#[inline]
pub fn datetime_to_mjd(dt: &DateTime<Utc>) -> f64 {
    chrono_to_epoch(dt).to_mjd_utc_days()
}

/// Convert DateTime to two-part quasi-JD UTC for SOFA (JD1=2400000.5, JD2=MJD)
#[inline]
pub fn datetime_to_jd_utc(dt: &DateTime<Utc>) -> (f64, f64) {
    (MJD_ZERO_JD, datetime_to_mjd(dt))
}
