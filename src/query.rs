//! Query boundary: request validation, response assembly and presentation
//! rounding.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DEFAULT_MAX_OBJECTS, MAX_OBJECTS_LIMIT};
use crate::error::SkyError;
use crate::format::{format_declination, format_right_ascension, round_to};
use crate::observer::ObserverContext;
use crate::pipeline::SkyPipeline;
use crate::resolver::{PositionResolver, RawPositionRecord};
use crate::timezone::{approximate_timezone, local_time_string};

/// Parameters of a bright-objects query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrightObjectsRequest {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
    /// ISO-8601 time; the current time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Result-size cap; 20 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_objects: Option<usize>,
}

impl BrightObjectsRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            time: None,
            max_objects: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = Some(max_objects);
        self
    }

    /// Range checks on the coordinates and the result-size cap.
    pub fn validate(&self) -> Result<(), SkyError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SkyError::InvalidInput(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SkyError::InvalidInput(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        if let Some(max) = self.max_objects {
            if max == 0 || max > MAX_OBJECTS_LIMIT {
                return Err(SkyError::InvalidInput(format!(
                    "max_objects must be between 1 and {MAX_OBJECTS_LIMIT}, got {max}"
                )));
            }
        }
        Ok(())
    }

    pub fn effective_max_objects(&self) -> usize {
        self.max_objects.unwrap_or(DEFAULT_MAX_OBJECTS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// `"{lat:.6}, {lon:.6}"`
    pub coordinates: String,
}

/// One formatted object in a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub magnitude: f64,
    pub altitude: f64,
    pub azimuth: f64,
    pub right_ascension: String,
    pub declination: String,
    pub is_above_horizon: bool,
    /// Earth distance in AU
    pub distance: Option<f64>,
}

impl From<&RawPositionRecord> for CelestialObject {
    fn from(record: &RawPositionRecord) -> Self {
        Self {
            name: record.name.clone(),
            object_type: record.category.label().to_string(),
            magnitude: round_to(record.magnitude, 2),
            altitude: round_to(record.altitude_deg, 2),
            azimuth: round_to(record.azimuth_deg, 2),
            right_ascension: format_right_ascension(&record.right_ascension),
            declination: format_declination(&record.declination),
            is_above_horizon: record.is_above_horizon,
            distance: record.distance_au.map(|d| round_to(d, 3)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrightObjectsResponse {
    pub location: Location,
    /// Query instant in the approximate local zone, RFC 3339
    pub time_used: String,
    /// Approximate timezone name (see [`crate::timezone`])
    pub timezone_info: String,
    pub objects: Vec<CelestialObject>,
    pub total_objects_found: usize,
    /// Catalog entries the resolver could not place
    #[serde(default)]
    pub unresolved_objects: usize,
}

/// Run a bright-objects query end to end.
pub fn bright_objects<R: PositionResolver>(
    pipeline: &SkyPipeline<'_, R>,
    request: &BrightObjectsRequest,
) -> Result<BrightObjectsResponse, SkyError> {
    request.validate()?;
    let observer =
        ObserverContext::new(request.latitude, request.longitude, request.time.as_deref())?;
    let ranked = pipeline.query(&observer, request.effective_max_objects())?;

    let objects: Vec<CelestialObject> = ranked.objects.iter().map(CelestialObject::from).collect();
    info!(
        latitude = request.latitude,
        longitude = request.longitude,
        found = objects.len(),
        unresolved = ranked.unresolved,
        "bright objects query"
    );

    Ok(BrightObjectsResponse {
        location: Location {
            latitude: request.latitude,
            longitude: request.longitude,
            coordinates: format!("{:.6}, {:.6}", request.latitude, request.longitude),
        },
        time_used: local_time_string(&observer.instant, request.longitude),
        timezone_info: approximate_timezone(request.longitude).to_string(),
        total_objects_found: objects.len(),
        objects,
        unresolved_objects: ranked.unresolved,
    })
}
