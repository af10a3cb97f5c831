//! MGRS to WGS84 conversion
//!
//! A grid reference is first decoded to UTM (zone, hemisphere, easting,
//! northing) using the WGS84 "AA" lettering scheme, then projected back to
//! latitude/longitude with the inverse Transverse Mercator series.

use crate::data::grid::GridReference;
use geo::Point;

/// Band letters from south to north, 8 degrees each starting at 80°S
const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Row letters of the 100 km squares; `I` and `O` are never used
const ROW_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUV";

/// Even zone sets start their row lettering this many letters later
const EVEN_SET_ROW_OFFSET: usize = 5;

/// Column letters for zone sets 1/4, 2/5 and 3/6
const COLUMN_LETTERS: [&str; 3] = ["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];

/// Northing covered by one full cycle of row letters
const ROW_CYCLE_METERS: f64 = 2_000_000.0;

/// Slack allowed when checking the computed latitude against its band.
/// A reference is truncated to the south-west corner of its cell, which can
/// sit slightly outside the band for low precisions.
const BAND_TOLERANCE_DEG: f64 = 0.1;

// WGS84 ellipsoid and UTM projection constants
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Why a syntactically valid grid reference has no position on the globe
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("zone {0} is outside 1-60")]
    ZoneOutOfRange(u8),

    #[error("zone {zone} does not exist in band X")]
    UnusedZone { zone: u8 },

    #[error("square column '{letter}' is not used in zone {zone}")]
    ColumnLetter { letter: char, zone: u8 },

    #[error("square row '{letter}' is not a valid row letter")]
    RowLetter { letter: char },

    #[error("latitude {latitude:.4}° is outside band {band}")]
    BandMismatch { band: char, latitude: f64 },
}

/// Turns a validated grid reference into a geographic position
pub trait CoordinateConverter {
    /// Returns the position as a `Point` (x = longitude, y = latitude)
    fn to_lat_lon(&self, grid: &GridReference) -> Result<Point<f64>, ConversionError>;
}

/// Grid coordinates expressed in UTM
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Utm {
    pub zone: u8,
    pub northern: bool,
    pub easting: f64,
    pub northing: f64,
}

/// MGRS converter on the WGS84 ellipsoid
#[derive(Clone, Copy, Debug, Default)]
pub struct MgrsConverter;

impl CoordinateConverter for MgrsConverter {
    fn to_lat_lon(&self, grid: &GridReference) -> Result<Point<f64>, ConversionError> {
        profiling::scope!("MgrsConverter::to_lat_lon");

        let utm = mgrs_to_utm(grid)?;
        let point = utm_to_wgs84(&utm);

        let (band_min, band_max) = band_latitude_range(grid.band())
            .ok_or(ConversionError::BandMismatch {
                band: grid.band(),
                latitude: point.y(),
            })?;
        if point.y() < band_min - BAND_TOLERANCE_DEG || point.y() > band_max + BAND_TOLERANCE_DEG
        {
            return Err(ConversionError::BandMismatch {
                band: grid.band(),
                latitude: point.y(),
            });
        }

        tracing::trace!(
            "{} -> zone {} easting {:.0} northing {:.0} -> ({:.6}, {:.6})",
            grid,
            utm.zone,
            utm.easting,
            utm.northing,
            point.y(),
            point.x()
        );

        Ok(point)
    }
}

/// Decode the zone, band and 100 km square letters into UTM coordinates
pub fn mgrs_to_utm(grid: &GridReference) -> Result<Utm, ConversionError> {
    let zone = grid.zone();
    if !(1..=60).contains(&zone) {
        return Err(ConversionError::ZoneOutOfRange(zone));
    }
    if grid.band() == 'X' && matches!(zone, 32 | 34 | 36) {
        return Err(ConversionError::UnusedZone { zone });
    }

    // Zone sets repeat every 6 zones: 1..=6
    let set = match zone % 6 {
        0 => 6,
        n => n as usize,
    };

    let columns = COLUMN_LETTERS[(set - 1) % 3];
    let column_index = columns
        .find(grid.column())
        .ok_or(ConversionError::ColumnLetter {
            letter: grid.column(),
            zone,
        })?;
    let easting_100k = (column_index + 1) as f64 * 100_000.0;

    let row_index = ROW_LETTERS
        .find(grid.row())
        .ok_or(ConversionError::RowLetter { letter: grid.row() })?;
    let row_index = if set % 2 == 0 {
        (row_index + ROW_LETTERS.len() - EVEN_SET_ROW_OFFSET) % ROW_LETTERS.len()
    } else {
        row_index
    };
    let mut northing_100k = row_index as f64 * 100_000.0;

    let min_northing = band_min_northing(grid.band()).ok_or(ConversionError::BandMismatch {
        band: grid.band(),
        latitude: f64::NAN,
    })?;
    while northing_100k < min_northing {
        northing_100k += ROW_CYCLE_METERS;
    }

    Ok(Utm {
        zone,
        northern: grid.band() >= 'N',
        easting: easting_100k + grid.easting_meters(),
        northing: northing_100k + grid.northing_meters(),
    })
}

/// Latitude range covered by a band letter, in degrees
pub fn band_latitude_range(band: char) -> Option<(f64, f64)> {
    let index = BAND_LETTERS.find(band)?;
    let min = -80.0 + 8.0 * index as f64;
    // Band X is stretched to 84°N
    let max = if band == 'X' { 84.0 } else { min + 8.0 };
    Some((min, max))
}

/// Lowest UTM northing (with false northing) found in each band
fn band_min_northing(band: char) -> Option<f64> {
    let meters = match band {
        'C' => 1_100_000.0,
        'D' => 2_000_000.0,
        'E' => 2_800_000.0,
        'F' => 3_700_000.0,
        'G' => 4_600_000.0,
        'H' => 5_500_000.0,
        'J' => 6_400_000.0,
        'K' => 7_300_000.0,
        'L' => 8_200_000.0,
        'M' => 9_100_000.0,
        'N' => 0.0,
        'P' => 800_000.0,
        'Q' => 1_700_000.0,
        'R' => 2_600_000.0,
        'S' => 3_500_000.0,
        'T' => 4_400_000.0,
        'U' => 5_300_000.0,
        'V' => 6_200_000.0,
        'W' => 7_000_000.0,
        'X' => 7_900_000.0,
        _ => return None,
    };
    Some(meters)
}

/// Inverse Transverse Mercator projection of a UTM coordinate to WGS84
///
/// # Returns
/// A `Point<f64>` with x = longitude and y = latitude, in degrees
pub fn utm_to_wgs84(utm: &Utm) -> Point<f64> {
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);

    let x = utm.easting - FALSE_EASTING;
    let y = if utm.northern {
        utm.northing
    } else {
        utm.northing - FALSE_NORTHING_SOUTH
    };

    // Footpoint latitude from the meridional arc
    let m = y / SCALE_FACTOR;
    let mu = m / (SEMI_MAJOR_AXIS * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let tan_phi1 = phi1.tan();

    let n1 = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
    let t1 = tan_phi1.powi(2);
    let c1 = ep2 * cos_phi1.powi(2);
    let r1 = SEMI_MAJOR_AXIS * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
    let d = x / (n1 * SCALE_FACTOR);

    let latitude = phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let longitude = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
            * d.powi(5)
            / 120.0)
        / cos_phi1;

    let central_meridian = (utm.zone as f64 - 1.0) * 6.0 - 180.0 + 3.0;

    Point::new(
        central_meridian + longitude.to_degrees(),
        latitude.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> Result<Point<f64>, ConversionError> {
        let grid = GridReference::parse(input).unwrap();
        MgrsConverter.to_lat_lon(&grid)
    }

    fn assert_close(point: Point<f64>, lat: f64, lon: f64) {
        assert!(
            (point.y() - lat).abs() < 1e-4 && (point.x() - lon).abs() < 1e-4,
            "expected ({lat}, {lon}), got ({}, {})",
            point.y(),
            point.x()
        );
    }

    #[test]
    fn test_square_origin_on_central_meridian() {
        let point = convert("33TWN0000000000").unwrap();
        assert_close(point, 46.953529, 15.0);
    }

    #[test]
    fn test_washington_monument() {
        let point = convert("18SUJ2348306479").unwrap();
        assert_close(point, 38.889463, -77.035242);
    }

    #[test]
    fn test_southern_hemisphere() {
        // Sydney Opera House
        let point = convert("56HLH3478652080").unwrap();
        assert_close(point, -33.858664, 151.214023);
    }

    #[test]
    fn test_spaced_and_unspaced_agree() {
        let a = convert("33TVN1234567890").unwrap();
        let b = convert("33TVN 12345 67890").unwrap();
        assert_eq!(a, b);
        assert_close(a, 47.558509, 13.834828);
    }

    #[test]
    fn test_decode_even_zone_set_rows() {
        // Zone 18 belongs to set 6: rows start at 'F'
        let grid = GridReference::parse("18SUJ2348306479").unwrap();
        let utm = mgrs_to_utm(&grid).unwrap();
        assert_eq!(utm.zone, 18);
        assert!(utm.northern);
        assert_eq!(utm.easting, 323_483.0);
        assert_eq!(utm.northing, 4_306_479.0);
    }

    #[test]
    fn test_zone_out_of_range() {
        assert_eq!(
            convert("61TWN0000000000"),
            Err(ConversionError::ZoneOutOfRange(61))
        );
        assert_eq!(
            convert("0TWN0000000000"),
            Err(ConversionError::ZoneOutOfRange(0))
        );
    }

    #[test]
    fn test_unused_zone_in_band_x() {
        assert_eq!(
            convert("32XNA0000000000"),
            Err(ConversionError::UnusedZone { zone: 32 })
        );
    }

    #[test]
    fn test_column_letter_outside_zone_set() {
        // Zone 33 uses columns S-Z
        assert_eq!(
            convert("33TAN0000000000"),
            Err(ConversionError::ColumnLetter {
                letter: 'A',
                zone: 33
            })
        );
    }

    #[test]
    fn test_row_letter_outside_alphabet() {
        assert_eq!(
            convert("33TWW0000000000"),
            Err(ConversionError::RowLetter { letter: 'W' })
        );
    }

    #[test]
    fn test_band_mismatch() {
        // Row 'A' in zone 33 band T lands around 54°N, which is band U
        assert!(matches!(
            convert("33TWA0000000000"),
            Err(ConversionError::BandMismatch { band: 'T', .. })
        ));
    }

    #[test]
    fn test_band_latitude_range() {
        assert_eq!(band_latitude_range('C'), Some((-80.0, -72.0)));
        assert_eq!(band_latitude_range('N'), Some((0.0, 8.0)));
        assert_eq!(band_latitude_range('X'), Some((72.0, 84.0)));
        assert_eq!(band_latitude_range('I'), None);
    }
}
