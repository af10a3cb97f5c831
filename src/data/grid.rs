//! MGRS grid reference validation and parsing
//!
//! Accepted grammar (after trimming and uppercasing):
//!
//! ```text
//! <zone 1-2 digits><band letter><2 square letters>[ ]<easting>[ ]<northing>
//! ```
//!
//! Band letters are `C-X` and square letters `A-Z`, both without `I` and `O`.
//! Easting and northing are 1 to 5 digits each and must have the same length.
//! Only checks the shape of the string: whether the zone, band and square
//! exist on the globe is decided by [`crate::data::convert`].

use crate::data::{Result, WaypointError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of a grid reference. `[0-9]` instead of `\d`, which is Unicode-aware.
static GRID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<zone>[0-9]{1,2})(?P<band>[C-HJ-NP-X])(?P<square>[A-HJ-NP-Z]{2}) ?(?P<easting>[0-9]{1,5})(?P<sep> ?)(?P<northing>[0-9]{1,5})$",
    )
    .expect("grid reference pattern is valid")
});

/// Longest easting or northing digit run (1 m precision)
pub const MAX_PRECISION: u8 = 5;

/// A syntactically valid MGRS grid reference, split into its parts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridReference {
    /// The normalized input, kept verbatim for redisplay
    text: String,
    zone: u8,
    band: char,
    column: char,
    row: char,
    easting: u32,
    northing: u32,
    /// Digits per coordinate (1 = 10 km ... 5 = 1 m)
    precision: u8,
}

/// Normalize raw user input the way the form does before validation
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Check an already trimmed and uppercased string against the grid grammar
pub fn is_valid_grid_reference(input: &str) -> bool {
    split_digits(input).is_some()
}

/// Match the pattern and split the numeric part into equal-length halves
fn split_digits(input: &str) -> Option<(regex::Captures<'_>, String, String)> {
    let caps = GRID_PATTERN.captures(input)?;
    let easting = &caps["easting"];
    let northing = &caps["northing"];

    let (easting, northing) = if caps["sep"].is_empty() {
        // "1234567890" has no separator, so the regex split is arbitrary:
        // the real split is always down the middle.
        let digits = format!("{easting}{northing}");
        if digits.len() % 2 != 0 {
            return None;
        }
        let (e, n) = digits.split_at(digits.len() / 2);
        (e.to_string(), n.to_string())
    } else {
        if easting.len() != northing.len() {
            return None;
        }
        (easting.to_string(), northing.to_string())
    };

    Some((caps, easting, northing))
}

impl GridReference {
    /// Normalize and parse a raw grid reference typed by the user
    pub fn parse(raw: &str) -> Result<Self> {
        let text = normalize(raw);
        let parsed = split_digits(&text).and_then(|(caps, easting, northing)| {
            let mut square = caps["square"].chars();
            Some(GridReference {
                zone: caps["zone"].parse().ok()?,
                band: caps["band"].chars().next()?,
                column: square.next()?,
                row: square.next()?,
                precision: easting.len() as u8,
                easting: easting.parse().ok()?,
                northing: northing.parse().ok()?,
                text: String::new(),
            })
        });

        match parsed {
            Some(grid) => Ok(GridReference { text, ..grid }),
            None => Err(WaypointError::InvalidFormat(text)),
        }
    }

    /// The normalized string this reference was parsed from
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn band(&self) -> char {
        self.band
    }

    /// 100 km square column letter (easting)
    pub fn column(&self) -> char {
        self.column
    }

    /// 100 km square row letter (northing)
    pub fn row(&self) -> char {
        self.row
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Easting within the 100 km square, in meters
    pub fn easting_meters(&self) -> f64 {
        self.easting as f64 * self.scale()
    }

    /// Northing within the 100 km square, in meters
    pub fn northing_meters(&self) -> f64 {
        self.northing as f64 * self.scale()
    }

    fn scale(&self) -> f64 {
        10f64.powi((MAX_PRECISION - self.precision) as i32)
    }
}

impl std::fmt::Display for GridReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_references() {
        for input in [
            "33TWN0000000000",
            "33TWN 00000 00000",
            "33TWN 0000000000",
            "33TWN00000 00000",
            "4QFJ12345678",
            "4QFJ 1234 5678",
            "18SUJ2348306479",
            "33TVN15",
            "33TVN 1 5",
            "60XVA1234567890",
        ] {
            assert!(is_valid_grid_reference(input), "should accept {input}");
        }
    }

    #[test]
    fn test_rejects_bad_zone_digit_count() {
        assert!(!is_valid_grid_reference("133TWN0000000000"));
        assert!(!is_valid_grid_reference("TWN0000000000"));
    }

    #[test]
    fn test_rejects_reserved_band_letters() {
        for band in ['A', 'B', 'I', 'O', 'Y', 'Z'] {
            let input = format!("33{band}WN0000000000");
            assert!(!is_valid_grid_reference(&input), "should reject {input}");
        }
    }

    #[test]
    fn test_rejects_reserved_square_letters() {
        assert!(!is_valid_grid_reference("33TIN0000000000"));
        assert!(!is_valid_grid_reference("33TWO0000000000"));
        assert!(!is_valid_grid_reference("33TW0000000000"));
    }

    #[test]
    fn test_rejects_wrong_digit_counts() {
        // 9 digits cannot be split evenly
        assert!(!is_valid_grid_reference("33TVN123456789"));
        // 12 digits exceed 1 m precision
        assert!(!is_valid_grid_reference("33TVN123456789012"));
        // Spaced halves must match
        assert!(!is_valid_grid_reference("33TVN 1234 567"));
        assert!(!is_valid_grid_reference("33TVN 123456 7890"));
        // Only the square, no digits
        assert!(!is_valid_grid_reference("33TVN"));
    }

    #[test]
    fn test_rejects_extra_whitespace() {
        assert!(!is_valid_grid_reference("33TVN  12345 67890"));
        assert!(!is_valid_grid_reference("33TVN 12345  67890"));
        assert!(!is_valid_grid_reference("33TVN\t12345 67890"));
        assert!(!is_valid_grid_reference("33 TVN 12345 67890"));
        assert!(!is_valid_grid_reference(" 33TVN1234567890"));
    }

    #[test]
    fn test_validator_does_not_normalize() {
        assert!(!is_valid_grid_reference("33twn0000000000"));
        assert!(GridReference::parse("  33twn0000000000 ").is_ok());
    }

    #[test]
    fn test_rejects_unicode_digits() {
        assert!(!is_valid_grid_reference("33TWN١٢٣٤٥67890"));
    }

    #[test]
    fn test_parse_parts() {
        let grid = GridReference::parse("33tvn 12345 67890").unwrap();
        assert_eq!(grid.as_str(), "33TVN 12345 67890");
        assert_eq!(grid.zone(), 33);
        assert_eq!(grid.band(), 'T');
        assert_eq!(grid.column(), 'V');
        assert_eq!(grid.row(), 'N');
        assert_eq!(grid.precision(), 5);
        assert_eq!(grid.easting_meters(), 12345.0);
        assert_eq!(grid.northing_meters(), 67890.0);
    }

    #[test]
    fn test_parse_splits_unspaced_digits_in_half() {
        let grid = GridReference::parse("4QFJ12345678").unwrap();
        assert_eq!(grid.precision(), 4);
        assert_eq!(grid.easting_meters(), 12340.0);
        assert_eq!(grid.northing_meters(), 56780.0);
    }

    #[test]
    fn test_parse_low_precision_scales_to_meters() {
        let grid = GridReference::parse("33TVN15").unwrap();
        assert_eq!(grid.precision(), 1);
        assert_eq!(grid.easting_meters(), 10000.0);
        assert_eq!(grid.northing_meters(), 50000.0);
    }

    #[test]
    fn test_parse_invalid_reports_normalized_input() {
        match GridReference::parse(" 33tvn123456789 ") {
            Err(WaypointError::InvalidFormat(text)) => assert_eq!(text, "33TVN123456789"),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }
}
