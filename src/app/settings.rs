use crate::app::state::TilesProvider;
use crate::entrypoints::cli::parse_args;
use clap::Parser;
use std::path::PathBuf;

/// Rome, chosen so the whole of Italy is visible at launch
pub const DEFAULT_CENTER_LAT: f64 = 41.9028;
pub const DEFAULT_CENTER_LON: f64 = 12.4964;
pub const DEFAULT_ZOOM: f64 = 5.0;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// MGRS Waypoints - Enter waypoints as MGRS grid coordinates, check them on a map and export them as KMZ
pub struct Settings {
    /// Latitude of the initial map center
    #[clap(long, default_value_t = DEFAULT_CENTER_LAT, allow_negative_numbers = true)]
    pub center_lat: f64,

    /// Longitude of the initial map center
    #[clap(long, default_value_t = DEFAULT_CENTER_LON, allow_negative_numbers = true)]
    pub center_lon: f64,

    /// Initial map zoom level
    #[clap(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Map tiles provider
    #[clap(long, value_enum, default_value = "openstreetmap")]
    pub tiles: TilesProvider,

    /// Export destination; when set, exporting skips the save dialog.
    /// A .gpx extension writes GPX, anything else writes KMZ
    #[clap(short, long, value_name = "FILE")]
    pub export_path: Option<PathBuf>,

    /// Start the puffin profiling server at launch
    #[clap(long, default_value = "false")]
    pub profiling: bool,
}

impl Settings {
    /// Parse the command line, exiting with clap's message on error
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["mgrs-waypoints"]).unwrap();
        assert_eq!(settings.center_lat, DEFAULT_CENTER_LAT);
        assert_eq!(settings.center_lon, DEFAULT_CENTER_LON);
        assert_eq!(settings.zoom, DEFAULT_ZOOM);
        assert_eq!(settings.tiles, TilesProvider::OpenStreetMap);
        assert!(settings.export_path.is_none());
        assert!(!settings.profiling);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::try_parse_from([
            "mgrs-waypoints",
            "--center-lat",
            "-33.86",
            "--center-lon",
            "151.21",
            "--zoom",
            "10",
            "--tiles",
            "opentopomap",
            "-e",
            "out.gpx",
        ])
        .unwrap();
        assert_eq!(settings.center_lat, -33.86);
        assert_eq!(settings.center_lon, 151.21);
        assert_eq!(settings.zoom, 10.0);
        assert_eq!(settings.tiles, TilesProvider::OpenTopoMap);
        assert_eq!(settings.export_path, Some(PathBuf::from("out.gpx")));
    }

    #[test]
    fn test_rejects_unknown_tiles() {
        assert!(Settings::try_parse_from(["mgrs-waypoints", "--tiles", "nope"]).is_err());
    }
}
