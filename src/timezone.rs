//! Coarse longitude-based timezone approximation
//!
//! Longitude is split into six 60° buckets, each named after one IANA zone.
//! This is not a geographic timezone lookup: near political boundaries the
//! zone can be wrong by several hours. Use it for display only.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Label used for longitudes outside every bucket
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// `(lower, upper, zone)`. The first bucket is closed on both ends; the
/// others are open below and closed above.
const BUCKETS: [(f64, f64, Tz); 6] = [
    (-180.0, -120.0, Tz::America__Los_Angeles),
    (-120.0, -60.0, Tz::America__New_York),
    (-60.0, 0.0, Tz::Europe__London),
    (0.0, 60.0, Tz::Europe__Paris),
    (60.0, 120.0, Tz::Asia__Shanghai),
    (120.0, 180.0, Tz::Asia__Tokyo),
];

/// IANA zone of the bucket the longitude falls in, if any
pub fn approximate_zone(longitude: f64) -> Option<Tz> {
    BUCKETS.iter().enumerate().find_map(|(i, &(lower, upper, zone))| {
        let lower_ok = if i == 0 {
            longitude >= lower
        } else {
            longitude > lower
        };
        (lower_ok && longitude <= upper).then_some(zone)
    })
}

/// Approximate timezone name for a longitude. Latitude plays no part.
pub fn approximate_timezone(longitude: f64) -> &'static str {
    approximate_zone(longitude).map_or(DEFAULT_TIMEZONE, |zone| zone.name())
}

/// RFC 3339 local time in the approximate zone for `longitude`, daylight
/// saving included. UTC when the longitude is outside every bucket.
pub fn local_time_string(instant: &DateTime<Utc>, longitude: f64) -> String {
    match approximate_zone(longitude) {
        Some(zone) => instant
            .with_timezone(&zone)
            .to_rfc3339_opts(SecondsFormat::AutoSi, false),
        None => instant.to_rfc3339_opts(SecondsFormat::AutoSi, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_known_cities() {
        assert_eq!(approximate_timezone(-74.0060), "America/New_York");
        assert_eq!(approximate_timezone(139.6503), "Asia/Tokyo");
        assert_eq!(approximate_timezone(-0.1278), "Europe/London");
        assert_eq!(approximate_timezone(2.3522), "Europe/Paris");
        assert_eq!(approximate_timezone(121.4737), "Asia/Tokyo");
        assert_eq!(approximate_timezone(116.4074), "Asia/Shanghai");
        assert_eq!(approximate_timezone(-122.4194), "America/Los_Angeles");
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(approximate_timezone(-180.0), "America/Los_Angeles");
        assert_eq!(approximate_timezone(-120.0), "America/Los_Angeles");
        assert_eq!(approximate_timezone(-60.0), "America/New_York");
        assert_eq!(approximate_timezone(0.0), "Europe/London");
        assert_eq!(approximate_timezone(60.0), "Europe/Paris");
        assert_eq!(approximate_timezone(120.0), "Asia/Shanghai");
        assert_eq!(approximate_timezone(180.0), "Asia/Tokyo");
    }

    #[test]
    fn test_out_of_domain_defaults_to_utc() {
        assert_eq!(approximate_timezone(-200.0), DEFAULT_TIMEZONE);
        assert_eq!(approximate_timezone(180.5), DEFAULT_TIMEZONE);
        assert_eq!(approximate_timezone(f64::NAN), DEFAULT_TIMEZONE);
        assert_eq!(approximate_zone(-200.0), None);
        let instant = Utc.with_ymd_and_hms(2026, 7, 15, 3, 0, 0).unwrap();
        assert_eq!(local_time_string(&instant, 200.0), "2026-07-15T03:00:00+00:00");
    }

    #[test]
    fn test_local_time_string() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 13, 0, 0).unwrap();
        assert_eq!(local_time_string(&instant, 139.6503), "2026-01-15T22:00:00+09:00");
        assert_eq!(local_time_string(&instant, -74.0060), "2026-01-15T08:00:00-05:00");
        assert_eq!(local_time_string(&instant, -10.0), "2026-01-15T13:00:00+00:00");
    }

    #[test]
    fn test_local_time_follows_daylight_saving() {
        let july = Utc.with_ymd_and_hms(2026, 7, 15, 3, 0, 0).unwrap();
        assert_eq!(local_time_string(&july, -74.0060), "2026-07-14T23:00:00-04:00");
        assert_eq!(local_time_string(&july, -10.0), "2026-07-15T04:00:00+01:00");
        assert_eq!(local_time_string(&july, -122.4194), "2026-07-14T20:00:00-07:00");

        let january = Utc.with_ymd_and_hms(2026, 1, 15, 3, 0, 0).unwrap();
        assert_eq!(local_time_string(&january, 2.3522), "2026-01-15T04:00:00+01:00");
        assert_eq!(local_time_string(&january, -74.0060), "2026-01-14T22:00:00-05:00");
        // no daylight saving in the Asian buckets
        assert_eq!(local_time_string(&july, 116.4074), "2026-07-15T11:00:00+08:00");
    }
}
