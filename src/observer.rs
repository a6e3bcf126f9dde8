//! Observer context: where and when the sky is observed

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::SkyError;

/// Naive (offset-less) layouts accepted in addition to RFC 3339
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing layouts that RFC 3339 parsing does not cover
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Immutable location and instant of one sky query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverContext {
    /// Geodetic latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
    pub instant: DateTime<Utc>,
}

impl ObserverContext {
    /// Build a context from coordinates and an optional ISO-8601 time.
    ///
    /// Without a time the current UTC instant is used. Range checks on the
    /// coordinates belong to the query boundary, not here.
    pub fn new(latitude: f64, longitude: f64, time: Option<&str>) -> Result<Self, SkyError> {
        let instant = match time {
            Some(text) => parse_instant(text)?,
            None => Utc::now(),
        };
        Ok(Self::at(latitude, longitude, instant))
    }

    pub fn at(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            instant,
        }
    }
}

/// Parse an ISO-8601 date-time and normalize it to UTC.
///
/// A trailing `Z` means UTC, an explicit offset is honored, and a value
/// without any offset is taken as UTC. A bare date means midnight UTC.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, SkyError> {
    let trimmed = text.trim();
    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(SkyError::InvalidTimeFormat(text.to_string()))
}
