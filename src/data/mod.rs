//! Waypoint Data Module
//!
//! Everything the application knows about waypoints, independent of the UI:
//! parsing MGRS grid references, converting them to WGS84, keeping the ordered
//! waypoint list with its derived list/map view, and exporting the list as an
//! overlay file.
//!
//! # Architecture
//!
//! - **[`GridReference`]**: validated, normalized MGRS string split into parts
//! - **[`CoordinateConverter`]**: grid reference to latitude/longitude ([`MgrsConverter`])
//! - **[`Waypoint`]**: a name, a position and the grid string it came from
//! - **[`WaypointCollection`]**: the ordered store plus its [`StoreView`]
//! - **[`OverlayExporter`]**: KMZ ([`KmzExporter`]) and GPX ([`GpxExporter`]) writers
//!
//! # Usage Example
//!
//! ```rust
//! use mgrs_waypoints::data::{
//!     CoordinateConverter, GridReference, MgrsConverter, Waypoint, WaypointCollection,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = GridReference::parse("33twn 00000 00000")?;
//! let position = MgrsConverter.to_lat_lon(&grid)?;
//!
//! let mut collection = WaypointCollection::new();
//! collection.push(Waypoint::new("Base", &grid, position));
//!
//! assert_eq!(collection.view().rows[0], "Base: 33TWN 00000 00000");
//! # Ok(())
//! # }
//! ```

mod collection;
pub mod convert;
pub mod export;
pub mod grid;
mod waypoint;

// Public API exports
pub use collection::{Marker, StoreView, WaypointCollection};
pub use convert::{ConversionError, CoordinateConverter, MgrsConverter};
pub use export::{ExportError, ExportFormat, GpxExporter, KmzExporter, OverlayExporter};
pub use grid::{GridReference, is_valid_grid_reference};
pub use waypoint::Waypoint;

use std::path::PathBuf;

/// Form field that was left empty
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    Name,
    Coordinates,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Coordinates => f.write_str("MGRS coordinates"),
        }
    }
}

/// Everything a waypoint operation can report back to the user
///
/// None of these leave partial changes behind.
#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error("Enter both the name and the MGRS coordinates (missing {0})")]
    MissingField(InputField),

    #[error("Invalid MGRS coordinates '{0}', check the format (e.g. 33TWN 12345 67890)")]
    InvalidFormat(String),

    #[error("MGRS conversion failed for '{input}': {source}")]
    Conversion {
        input: String,
        #[source]
        source: ConversionError,
    },

    #[error("Select a waypoint in the list first")]
    NoSelection,

    #[error("No waypoints to export")]
    EmptyStore,

    #[error("Could not write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

impl WaypointError {
    /// Whether this is an input mistake rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::NoSelection | Self::EmptyStore
        )
    }
}

pub type Result<T> = std::result::Result<T, WaypointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        assert!(WaypointError::NoSelection.is_warning());
        assert!(WaypointError::MissingField(InputField::Name).is_warning());
        assert!(!WaypointError::InvalidFormat("X".into()).is_warning());
        assert!(
            !WaypointError::Conversion {
                input: "61TWN0000000000".into(),
                source: ConversionError::ZoneOutOfRange(61),
            }
            .is_warning()
        );
    }

    #[test]
    fn test_conversion_error_message_includes_cause() {
        let error = WaypointError::Conversion {
            input: "61TWN0000000000".into(),
            source: ConversionError::ZoneOutOfRange(61),
        };
        assert_eq!(
            error.to_string(),
            "MGRS conversion failed for '61TWN0000000000': zone 61 is outside 1-60"
        );
    }
}
