//! Static registry of trackable bodies
//!
//! The catalog holds the Sun, the Moon, the seven planets other than Earth,
//! Jupiter's four Galilean moons, and a list of bright fixed stars. Solar-system
//! bodies carry no precomputed position or magnitude; a resolver supplies both
//! at query time. Fixed stars carry their own J2000 coordinates and magnitude.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Category of a catalog entry, serialized as the wire `type` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    Sun,
    Moon,
    Planet,
    /// Natural satellite of a planet other than Earth
    PlanetaryMoon,
    Star,
}

impl BodyCategory {
    /// Label reported in query output. Moons of other planets share the
    /// `"moon"` label with Earth's Moon.
    pub fn label(&self) -> &'static str {
        match self {
            BodyCategory::Sun => "sun",
            BodyCategory::Moon | BodyCategory::PlanetaryMoon => "moon",
            BodyCategory::Planet => "planet",
            BodyCategory::Star => "star",
        }
    }

    /// Whether the Earth distance is reported for bodies of this category
    pub fn reports_distance(&self) -> bool {
        matches!(
            self,
            BodyCategory::Sun | BodyCategory::Moon | BodyCategory::Planet
        )
    }
}

/// Solar-system bodies whose position is computed at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarSystemBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Io,
    Europa,
    Ganymede,
    Callisto,
}

impl SolarSystemBody {
    pub const ALL: [SolarSystemBody; 13] = [
        SolarSystemBody::Sun,
        SolarSystemBody::Moon,
        SolarSystemBody::Mercury,
        SolarSystemBody::Venus,
        SolarSystemBody::Mars,
        SolarSystemBody::Jupiter,
        SolarSystemBody::Saturn,
        SolarSystemBody::Uranus,
        SolarSystemBody::Neptune,
        SolarSystemBody::Io,
        SolarSystemBody::Europa,
        SolarSystemBody::Ganymede,
        SolarSystemBody::Callisto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolarSystemBody::Sun => "Sun",
            SolarSystemBody::Moon => "Moon",
            SolarSystemBody::Mercury => "Mercury",
            SolarSystemBody::Venus => "Venus",
            SolarSystemBody::Mars => "Mars",
            SolarSystemBody::Jupiter => "Jupiter",
            SolarSystemBody::Saturn => "Saturn",
            SolarSystemBody::Uranus => "Uranus",
            SolarSystemBody::Neptune => "Neptune",
            SolarSystemBody::Io => "Io",
            SolarSystemBody::Europa => "Europa",
            SolarSystemBody::Ganymede => "Ganymede",
            SolarSystemBody::Callisto => "Callisto",
        }
    }

    pub fn category(&self) -> BodyCategory {
        match self {
            SolarSystemBody::Sun => BodyCategory::Sun,
            SolarSystemBody::Moon => BodyCategory::Moon,
            SolarSystemBody::Io
            | SolarSystemBody::Europa
            | SolarSystemBody::Ganymede
            | SolarSystemBody::Callisto => BodyCategory::PlanetaryMoon,
            _ => BodyCategory::Planet,
        }
    }

    /// NAIF ID of the body
    pub fn naif_id(&self) -> i32 {
        match self {
            SolarSystemBody::Sun => 10,
            SolarSystemBody::Moon => 301,
            SolarSystemBody::Mercury => 199,
            SolarSystemBody::Venus => 299,
            SolarSystemBody::Mars => 499,
            SolarSystemBody::Jupiter => 599,
            SolarSystemBody::Saturn => 699,
            SolarSystemBody::Uranus => 799,
            SolarSystemBody::Neptune => 899,
            SolarSystemBody::Io => 501,
            SolarSystemBody::Europa => 502,
            SolarSystemBody::Ganymede => 503,
            SolarSystemBody::Callisto => 504,
        }
    }

    /// Magnitude assumed when the ephemeris has none for this body
    pub fn fallback_magnitude(&self) -> Option<f64> {
        match self.category() {
            BodyCategory::Sun => Some(-26.74),
            BodyCategory::PlanetaryMoon => Some(5.5),
            _ => None,
        }
    }
}

/// A star with fixed equatorial coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStar {
    pub name: &'static str,
    /// Right ascension, sexagesimal hours `H:M:S`
    pub right_ascension: &'static str,
    /// Declination, signed sexagesimal degrees `±D:M:S`
    pub declination: &'static str,
    /// Apparent visual magnitude
    pub magnitude: f64,
}

/// One body the pipeline attempts to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    DynamicBody(SolarSystemBody),
    FixedStar(FixedStar),
}

impl CatalogEntry {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogEntry::DynamicBody(body) => body.name(),
            CatalogEntry::FixedStar(star) => star.name,
        }
    }

    pub fn category(&self) -> BodyCategory {
        match self {
            CatalogEntry::DynamicBody(body) => body.category(),
            CatalogEntry::FixedStar(_) => BodyCategory::Star,
        }
    }
}

macro_rules! star {
    ($name:expr, $ra:expr, $dec:expr, $mag:expr) => {
        FixedStar {
            name: $name,
            right_ascension: $ra,
            declination: $dec,
            magnitude: $mag,
        }
    };
}

/// Bright stars, J2000 coordinates
pub const BRIGHT_STARS: [FixedStar; 36] = [
    star!("Sirius", "6:45:08.9", "-16:42:58", -1.46),
    star!("Canopus", "6:23:57.1", "-52:41:44", -0.72),
    star!("Arcturus", "14:15:39.7", "+19:10:57", -0.04),
    star!("Vega", "18:36:56.3", "+38:47:01", 0.03),
    star!("Capella", "5:16:41.4", "+45:59:53", 0.08),
    star!("Rigel", "5:14:32.3", "-8:12:06", 0.13),
    star!("Procyon", "7:39:18.1", "+5:13:30", 0.38),
    star!("Betelgeuse", "5:55:10.3", "+7:24:26", 0.42),
    star!("Achernar", "1:37:42.8", "-57:14:12", 0.46),
    star!("Hadar", "14:3:49.4", "-60:22:23", 0.61),
    star!("Altair", "19:50:47.0", "+8:52:06", 0.77),
    star!("Aldebaran", "4:35:55.2", "+16:30:33", 0.87),
    star!("Antares", "16:29:24.4", "-26:25:55", 0.96),
    star!("Spica", "13:25:11.6", "-11:9:41", 0.98),
    star!("Pollux", "7:45:18.9", "+28:1:34", 1.14),
    star!("Fomalhaut", "22:57:39.0", "-29:37:20", 1.16),
    star!("Deneb", "20:41:25.9", "+45:16:49", 1.25),
    star!("Mimosa", "12:47:43.3", "-59:41:19", 1.25),
    star!("Regulus", "10:8:22.3", "+11:58:02", 1.36),
    star!("Adhara", "6:58:37.5", "-28:58:19", 1.50),
    star!("Castor", "7:34:36.0", "+31:53:19", 1.58),
    star!("Shaula", "17:33:36.5", "-37:6:14", 1.62),
    star!("Bellatrix", "5:25:7.9", "+6:20:59", 1.64),
    star!("Elnath", "5:26:17.5", "+28:36:27", 1.65),
    star!("Miaplacidus", "9:13:12.2", "-69:43:02", 1.67),
    star!("Alnilam", "5:36:12.8", "-1:12:07", 1.69),
    star!("Alnitak", "5:40:45.6", "-2:27:30", 1.74),
    star!("Alnair", "22:8:13.9", "-46:57:40", 1.74),
    star!("Alioth", "12:54:1.6", "+55:57:35", 1.76),
    star!("Alkaid", "13:47:32.4", "+49:18:48", 1.86),
    star!("Polaris", "2:31:49.0", "+89:15:51", 1.97),
    star!("Kochab", "14:50:42.3", "+74:9:20", 2.07),
    star!("Alrescha", "2:2:2.6", "+2:45:50", 3.62),
    star!("Almach", "2:3:53.9", "+42:19:47", 2.09),
    star!("Gamma Ceti", "2:43:18.0", "+3:14:09", 3.47),
    star!("Epsilon Eridani", "3:32:55.8", "-9:27:30", 3.73),
];

static STANDARD_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let entries = SolarSystemBody::ALL
        .iter()
        .map(|body| CatalogEntry::DynamicBody(*body))
        .chain(BRIGHT_STARS.iter().cloned().map(CatalogEntry::FixedStar))
        .collect();
    Catalog::from_entries(entries)
});

/// Insertion-ordered, immutable sequence of catalog entries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The built-in catalog: solar-system bodies first, then the bright stars
    pub fn standard() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sexagesimal::{parse_declination_deg, parse_right_ascension_deg};
    use std::collections::HashSet;

    #[test]
    fn test_standard_catalog_composition() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 13 + BRIGHT_STARS.len());

        let count = |cat: BodyCategory| catalog.iter().filter(|e| e.category() == cat).count();
        assert_eq!(count(BodyCategory::Sun), 1);
        assert_eq!(count(BodyCategory::Moon), 1);
        assert_eq!(count(BodyCategory::Planet), 7);
        assert_eq!(count(BodyCategory::PlanetaryMoon), 4);
        assert_eq!(count(BodyCategory::Star), 36);
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let names: Vec<&str> = Catalog::standard().iter().map(|e| e.name()).collect();
        assert_eq!(names[0], "Sun");
        assert_eq!(names[1], "Moon");
        assert_eq!(names[13], "Sirius");
        let again: Vec<&str> = Catalog::standard().iter().map(|e| e.name()).collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = Catalog::standard().iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Catalog::standard().len());
    }

    #[test]
    fn test_star_coordinates_parse() {
        for star in BRIGHT_STARS.iter() {
            assert!(
                parse_right_ascension_deg(star.right_ascension).is_ok(),
                "bad RA for {}",
                star.name
            );
            assert!(
                parse_declination_deg(star.declination).is_ok(),
                "bad Dec for {}",
                star.name
            );
        }
    }

    #[test]
    fn test_fallback_magnitude() {
        assert_eq!(SolarSystemBody::Sun.fallback_magnitude(), Some(-26.74));
        assert_eq!(SolarSystemBody::Europa.fallback_magnitude(), Some(5.5));
        assert_eq!(SolarSystemBody::Mars.fallback_magnitude(), None);
        assert_eq!(SolarSystemBody::Moon.fallback_magnitude(), None);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(SolarSystemBody::Io.category().label(), "moon");
        assert_eq!(SolarSystemBody::Moon.category().label(), "moon");
        assert_eq!(SolarSystemBody::Mars.category().label(), "planet");
        assert!(SolarSystemBody::Sun.category().reports_distance());
        assert!(!SolarSystemBody::Europa.category().reports_distance());
        assert!(!BodyCategory::Star.reports_distance());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.find("polaris").map(|e| e.name()), Some("Polaris"));
        assert!(catalog.find("Pluto").is_none());
    }
}
