//! Sexagesimal angle strings
//!
//! Right ascension is written as `H:M:S` (hours), declination as `±D:M:S`
//! (degrees). Components may be omitted from the right (`"6:45"` is valid).

use crate::error::ResolutionFailure;

fn malformed(value: &str, reason: impl Into<String>) -> ResolutionFailure {
    ResolutionFailure::MalformedCoordinate {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse a sexagesimal string into a decimal value in the string's own unit
/// (hours for right ascension, degrees for declination).
pub fn parse_sexagesimal(value: &str) -> Result<f64, ResolutionFailure> {
    let trimmed = value.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if body.is_empty() {
        return Err(malformed(value, "empty angle"));
    }

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return Err(malformed(value, "more than three components"));
    }

    let mut total = 0.0;
    let mut scale = 1.0;
    for (i, part) in parts.iter().enumerate() {
        let component: f64 = part
            .trim()
            .parse()
            .map_err(|_| malformed(value, format!("component '{part}' is not a number")))?;
        if !component.is_finite() || component < 0.0 {
            return Err(malformed(value, format!("component '{part}' out of range")));
        }
        if i > 0 && component >= 60.0 {
            return Err(malformed(value, format!("component '{part}' must be below 60")));
        }
        total += component / scale;
        scale *= 60.0;
    }
    Ok(sign * total)
}

/// Parse a right ascension string and return it in degrees.
pub fn parse_right_ascension_deg(value: &str) -> Result<f64, ResolutionFailure> {
    let hours = parse_sexagesimal(value)?;
    if !(0.0..24.0).contains(&hours) {
        return Err(malformed(value, "right ascension must be within [0h, 24h)"));
    }
    Ok(hours * 15.0)
}

/// Parse a declination string and return it in degrees.
pub fn parse_declination_deg(value: &str) -> Result<f64, ResolutionFailure> {
    let degrees = parse_sexagesimal(value)?;
    if !(-90.0..=90.0).contains(&degrees) {
        return Err(malformed(value, "declination must be within [-90°, 90°]"));
    }
    Ok(degrees)
}

/// Split a non-negative value into whole units, minutes and scaled seconds,
/// carrying rounding overflow upward.
fn split_units(value: f64, seconds_scale: f64) -> (u64, u64, u64) {
    let ticks_per_unit = (3600.0 * seconds_scale) as u64;
    let ticks_per_minute = (60.0 * seconds_scale) as u64;
    let ticks = (value * 3600.0 * seconds_scale).round() as u64;
    let whole = ticks / ticks_per_unit;
    let rem = ticks % ticks_per_unit;
    (whole, rem / ticks_per_minute, rem % ticks_per_minute)
}

/// Render a right ascension in degrees as `H:MM:SS.ss`.
pub fn render_right_ascension(ra_deg: f64) -> String {
    let hours = ra_deg.rem_euclid(360.0) / 15.0;
    let (mut h, m, centi) = split_units(hours, 100.0);
    if h >= 24 {
        h -= 24;
    }
    format!("{}:{:02}:{:02}.{:02}", h, m, centi / 100, centi % 100)
}

/// Render a declination in degrees as `D:MM:SS.s`, prefixed with `-` when
/// negative. Non-negative values carry no sign.
pub fn render_declination(dec_deg: f64) -> String {
    let sign = if dec_deg < 0.0 { "-" } else { "" };
    let (d, m, deci) = split_units(dec_deg.abs(), 10.0);
    format!("{}{}:{:02}:{:02}.{}", sign, d, m, deci / 10, deci % 10)
}
