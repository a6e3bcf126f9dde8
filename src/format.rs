//! Human-readable coordinate strings
//!
//! Formatting is applied once, after all numeric work. Inputs that do not
//! have three colon-separated components are returned unchanged.

/// `"H:M:S"` → `"{H}h {M}m {S}s"`
pub fn format_right_ascension(ra: &str) -> String {
    let parts: Vec<&str> = ra.split(':').collect();
    if parts.len() >= 3 {
        format!("{}h {}m {}s", parts[0], parts[1], parts[2])
    } else {
        ra.to_string()
    }
}

/// `"±D:M:S"` → `"±{D}° {M}′ {S}″"`. A value without a sign is rendered
/// with `+`.
pub fn format_declination(dec: &str) -> String {
    let is_negative = dec.starts_with('-');
    let unsigned = dec.trim_start_matches(['+', '-']);
    let parts: Vec<&str> = unsigned.split(':').collect();
    if parts.len() >= 3 {
        let sign = if is_negative { "-" } else { "+" };
        format!("{}{}° {}′ {}″", sign, parts[0], parts[1], parts[2])
    } else {
        dec.to_string()
    }
}

/// Round to a fixed number of decimal places (presentation only).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_right_ascension() {
        assert_eq!(format_right_ascension("5:14:32.3"), "5h 14m 32.3s");
        assert_eq!(format_right_ascension("14:3:49.4"), "14h 3m 49.4s");
    }

    #[test]
    fn test_format_declination_keeps_sign() {
        assert_eq!(format_declination("-8:12:06"), "-8° 12′ 06″");
        assert_eq!(format_declination("+45:59:53"), "+45° 59′ 53″");
        assert_eq!(format_declination("45:30:00.0"), "+45° 30′ 00.0″");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        assert_eq!(format_right_ascension("5:14"), "5:14");
        assert_eq!(format_right_ascension(""), "");
        assert_eq!(format_declination("-8"), "-8");
        assert_eq!(format_declination("north"), "north");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(-26.7432, 2), -26.74);
        assert_eq!(round_to(1.52367, 3), 1.524);
        assert_eq!(round_to(12.0, 2), 12.0);
    }
}
