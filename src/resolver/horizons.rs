/// JPL Horizons resolver for solar-system bodies
///
/// Queries the Horizons API for an OBSERVER table at the observer's site and
/// instant: apparent RA/Dec, azimuth/elevation, visual magnitude and Earth
/// distance. Fixed stars never hit the network; they are resolved locally.
use tracing::{debug, warn};
use url::Url;

use super::fixed_star::resolve_fixed_star;
use super::{ensure_finite, PositionResolver, RawPositionRecord};
use crate::catalog::{CatalogEntry, SolarSystemBody};
use crate::config::{HORIZONS_API_URL, OBSERVER_HEIGHT_M};
use crate::error::ResolutionFailure;
use crate::observer::ObserverContext;
use crate::utils::sexagesimal::{render_declination, render_right_ascension};
use crate::utils::time_utils::datetime_to_jd_utc;

/// One row of a Horizons OBSERVER table
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverRow {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub magnitude: Option<f64>,
    pub delta_au: Option<f64>,
}

/// Resolver backed by the JPL Horizons API
#[derive(Debug, Clone)]
pub struct HorizonsResolver {
    base_url: String,
}

impl Default for HorizonsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HorizonsResolver {
    /// Resolver using the configured Horizons endpoint
    pub fn new() -> Self {
        Self::with_base_url(HORIZONS_API_URL.as_str())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Build the OBSERVER-table request URL for a body
    pub fn request_url(
        &self,
        body: SolarSystemBody,
        observer: &ObserverContext,
    ) -> Result<Url, ResolutionFailure> {
        let (jd1, jd2) = datetime_to_jd_utc(&observer.instant);
        let site = format!(
            "{:.6},{:.6},{:.4}",
            observer.longitude,
            observer.latitude,
            *OBSERVER_HEIGHT_M / 1000.0
        );
        let params = [
            ("format", "text".to_string()),
            ("COMMAND", format!("'{}'", body.naif_id())),
            ("OBJ_DATA", "'NO'".to_string()),
            ("MAKE_EPHEM", "'YES'".to_string()),
            ("EPHEM_TYPE", "'OBSERVER'".to_string()),
            ("CENTER", "'coord@399'".to_string()),
            ("COORD_TYPE", "'GEODETIC'".to_string()),
            ("SITE_COORD", format!("'{site}'")),
            ("TIME_TYPE", "'UT'".to_string()),
            ("TLIST_TYPE", "'JD'".to_string()),
            ("TLIST", format!("'{:.9}'", jd1 + jd2)),
            ("QUANTITIES", "'2,4,9,20'".to_string()),
            ("ANG_FORMAT", "'DEG'".to_string()),
            ("APPARENT", "'AIRLESS'".to_string()),
            ("CSV_FORMAT", "'YES'".to_string()),
        ];
        Url::parse_with_params(&self.base_url, params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| ResolutionFailure::Unavailable(format!("Invalid Horizons URL: {e}")))
    }

    fn fetch(&self, body: SolarSystemBody, url: &Url) -> Result<String, ResolutionFailure> {
        let response = ureq::get(url.as_str())
            .call()
            .map_err(|e| classify_request_error(body, e))?;

        response
            .into_body()
            .read_to_string()
            .map_err(|e| ResolutionFailure::Unavailable(format!("Failed to read Horizons response: {e}")))
    }

    fn resolve_body(
        &self,
        entry: &CatalogEntry,
        body: SolarSystemBody,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure> {
        let url = self.request_url(body, observer)?;
        debug!(body = body.name(), "querying Horizons");
        let text = self.fetch(body, &url)?;
        let row = parse_observer_table(&text).map_err(|e| {
            warn!(body = body.name(), error = %e, "unusable Horizons response");
            e
        })?;
        record_from_row(entry, body, &row)
    }
}

/// Map a failed request to a resolution failure.
///
/// A 4xx answer other than 429 concerns this body only. Anything else means
/// Horizons itself is unusable.
pub fn classify_request_error(body: SolarSystemBody, err: ureq::Error) -> ResolutionFailure {
    match err {
        ureq::Error::StatusCode(code) if (400..500).contains(&code) && code != 429 => {
            ResolutionFailure::Undefined(format!(
                "Horizons rejected the request for {} (HTTP {code})",
                body.name()
            ))
        }
        other => ResolutionFailure::Unavailable(format!("Horizons API request failed: {other}")),
    }
}

/// Turn a parsed OBSERVER row into a position record for `body`.
///
/// A missing magnitude falls back to the body's typical value where one
/// exists; otherwise the body is undefined for this instant.
pub fn record_from_row(
    entry: &CatalogEntry,
    body: SolarSystemBody,
    row: &ObserverRow,
) -> Result<RawPositionRecord, ResolutionFailure> {
    let magnitude = row
        .magnitude
        .or_else(|| body.fallback_magnitude())
        .ok_or_else(|| ResolutionFailure::Undefined(format!("{}: no visual magnitude", body.name())))?;
    ensure_finite(
        body.name(),
        &[
            ("altitude", row.elevation_deg),
            ("azimuth", row.azimuth_deg),
            ("magnitude", magnitude),
        ],
    )?;

    Ok(RawPositionRecord::new(
        entry,
        magnitude,
        row.elevation_deg,
        row.azimuth_deg.rem_euclid(360.0),
        render_right_ascension(row.ra_deg),
        render_declination(row.dec_deg),
        row.delta_au,
    ))
}

impl PositionResolver for HorizonsResolver {
    fn resolve(
        &self,
        entry: &CatalogEntry,
        observer: &ObserverContext,
    ) -> Result<RawPositionRecord, ResolutionFailure> {
        match entry {
            CatalogEntry::FixedStar(star) => resolve_fixed_star(entry, star, observer),
            CatalogEntry::DynamicBody(body) => self.resolve_body(entry, *body, observer),
        }
    }

    fn name(&self) -> &str {
        "horizons"
    }
}

fn parse_optional(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the first data row of a Horizons OBSERVER table in CSV form.
///
/// Columns are located by header name, so the column order and the presence
/// of solar/lunar marker columns do not matter.
pub fn parse_observer_table(response: &str) -> Result<ObserverRow, ResolutionFailure> {
    let mut header: Option<Vec<String>> = None;
    let mut data_line: Option<&str> = None;
    let mut in_data_section = false;
    let mut last_columns_line: Option<&str> = None;

    for line in response.lines() {
        if line.contains("$$SOE") {
            in_data_section = true;
            header = last_columns_line.map(|l| {
                l.split(',')
                    .map(|c| c.trim().to_ascii_lowercase())
                    .collect()
            });
            continue;
        }
        if line.contains("$$EOE") {
            break;
        }
        if in_data_section {
            if !line.trim().is_empty() {
                data_line = Some(line);
                break;
            }
        } else if line.contains(',') && !line.trim_start().starts_with('*') {
            last_columns_line = Some(line);
        }
    }

    if !in_data_section {
        let reason = response
            .lines()
            .find(|l| l.contains("ERROR") || l.contains("No ephemeris"))
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| "No ephemeris data found in Horizons response".to_string());
        return Err(ResolutionFailure::Undefined(reason));
    }

    let header = header.ok_or_else(|| {
        ResolutionFailure::Computation("Horizons table has no column header".to_string())
    })?;
    let data_line = data_line.ok_or_else(|| {
        ResolutionFailure::Undefined("Horizons table has no data rows".to_string())
    })?;
    let fields: Vec<&str> = data_line.split(',').collect();

    let column = |prefix: &str| header.iter().position(|name| name.starts_with(prefix));
    let field = |prefix: &str| column(prefix).and_then(|i| fields.get(i).copied());
    let required = |prefix: &str| -> Result<f64, ResolutionFailure> {
        let raw = field(prefix).ok_or_else(|| {
            ResolutionFailure::Computation(format!("Horizons column '{prefix}' missing"))
        })?;
        parse_optional(raw).ok_or_else(|| {
            ResolutionFailure::Computation(format!(
                "Failed to parse Horizons column '{prefix}': '{}'",
                raw.trim()
            ))
        })
    };

    Ok(ObserverRow {
        ra_deg: required("r.a.")?,
        dec_deg: required("dec")?,
        azimuth_deg: required("azi")?,
        elevation_deg: required("elev")?,
        magnitude: field("apmag").and_then(parse_optional),
        delta_au: header
            .iter()
            .position(|name| name == "delta")
            .and_then(|i| fields.get(i).copied())
            .and_then(parse_optional),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{format_declination, format_right_ascension};
    use chrono::{TimeZone, Utc};

    const MARS_RESPONSE: &str = r#"
*******************************************************************************
Ephemeris / API_USER Mon Jan 15 03:00:00 2024 Pasadena, USA      / Horizons
*******************************************************************************
Target body name: Mars (499)                      {source: mar097}
Center body name: Earth (399)                     {source: DE441}
*******************************************************************************
 Date_________JDUT, , , R.A._(a-appar), DEC_(a-appar), Azi_(a-appr), Elev_(a-appr),  APmag,  S-brt,             delta,      deldot,
*******************************************************************************
$$SOE
 2460324.625000000, , ,  268.12345,  -23.45678,  120.5000,  -12.2500,   1.28,   4.01,  2.37001234567890,  -3.1234567,
$$EOE
*******************************************************************************
"#;

    #[test]
    fn test_parse_observer_table() {
        let row = parse_observer_table(MARS_RESPONSE).unwrap();
        assert!((row.ra_deg - 268.12345).abs() < 1e-9);
        assert!((row.dec_deg + 23.45678).abs() < 1e-9);
        assert!((row.azimuth_deg - 120.5).abs() < 1e-9);
        assert!((row.elevation_deg + 12.25).abs() < 1e-9);
        assert_eq!(row.magnitude, Some(1.28));
        assert!((row.delta_au.unwrap() - 2.3700123456789).abs() < 1e-12);
    }

    #[test]
    fn test_parse_missing_magnitude() {
        let text = MARS_RESPONSE.replace("   1.28,", "   n.a.,");
        let row = parse_observer_table(&text).unwrap();
        assert_eq!(row.magnitude, None);
    }

    #[test]
    fn test_parse_error_response() {
        let text = "API VERSION: 1.2\nAPI SOURCE: NASA/JPL Horizons API\n\n\
                    No ephemeris for target \"Io\" prior to A.D. 1600-JAN-01.\n";
        let err = parse_observer_table(text).unwrap_err();
        match err {
            ResolutionFailure::Undefined(reason) => assert!(reason.contains("No ephemeris")),
            other => panic!("unexpected failure {other:?}"),
        }
    }

    #[test]
    fn test_record_from_row() {
        let row = parse_observer_table(MARS_RESPONSE).unwrap();
        let entry = CatalogEntry::DynamicBody(SolarSystemBody::Mars);
        let record = record_from_row(&entry, SolarSystemBody::Mars, &row).unwrap();
        assert_eq!(record.name, "Mars");
        assert_eq!(record.magnitude, 1.28);
        assert!(!record.is_above_horizon);
        assert_eq!(record.right_ascension, "17:52:29.63");
        assert_eq!(record.declination, "-23:27:24.4");
        assert_eq!(format_right_ascension(&record.right_ascension), "17h 52m 29.63s");
        assert_eq!(format_declination(&record.declination), "-23° 27′ 24.4″");
        assert!((record.distance_au.unwrap() - 2.3700123456789).abs() < 1e-12);
    }

    #[test]
    fn test_record_from_row_missing_magnitude() {
        let text = MARS_RESPONSE.replace("   1.28,", "   n.a.,");
        let row = parse_observer_table(&text).unwrap();

        let mars = CatalogEntry::DynamicBody(SolarSystemBody::Mars);
        let err = record_from_row(&mars, SolarSystemBody::Mars, &row).unwrap_err();
        assert!(matches!(err, ResolutionFailure::Undefined(_)));
        assert!(err.is_isolated());

        let io = CatalogEntry::DynamicBody(SolarSystemBody::Io);
        let record = record_from_row(&io, SolarSystemBody::Io, &row).unwrap();
        assert_eq!(record.magnitude, 5.5);
        assert_eq!(record.distance_au, None);

        let sun = CatalogEntry::DynamicBody(SolarSystemBody::Sun);
        let record = record_from_row(&sun, SolarSystemBody::Sun, &row).unwrap();
        assert_eq!(record.magnitude, -26.74);
        assert!(record.distance_au.is_some());
    }

    #[test]
    fn test_client_errors_only_skip_the_body() {
        let err = classify_request_error(SolarSystemBody::Io, ureq::Error::StatusCode(400));
        assert!(matches!(err, ResolutionFailure::Undefined(_)));
        assert!(err.is_isolated());

        for code in [429, 500, 503] {
            let err = classify_request_error(SolarSystemBody::Io, ureq::Error::StatusCode(code));
            assert!(matches!(err, ResolutionFailure::Unavailable(_)));
            assert!(!err.is_isolated());
        }
    }

    #[test]
    fn test_request_url_encodes_site_and_time() {
        let resolver = HorizonsResolver::with_base_url("https://example.test/api/horizons.api");
        let ctx = ObserverContext::at(
            40.7128,
            -74.006,
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
        );
        let url = resolver.request_url(SolarSystemBody::Mars, &ctx).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("COMMAND"), "'499'");
        assert!(get("SITE_COORD").starts_with("'-74.006000,40.712800,"));
        let jd: f64 = get("TLIST").trim_matches('\'').parse().unwrap();
        assert!((jd - 2451545.0).abs() < 1e-6);
    }

    #[test]
    #[ignore] // Ignore by default since it requires network access
    fn test_query_horizons_jupiter() {
        let ctx = ObserverContext::at(
            35.6762,
            139.6503,
            Utc.with_ymd_and_hms(2026, 1, 15, 13, 0, 0).unwrap(),
        );
        let entry = CatalogEntry::DynamicBody(SolarSystemBody::Jupiter);
        let record = HorizonsResolver::new().resolve(&entry, &ctx).unwrap();
        assert_eq!(record.name, "Jupiter");
        assert!(record.magnitude < -1.0);
        assert!(record.distance_au.unwrap() > 3.5);
    }
}
