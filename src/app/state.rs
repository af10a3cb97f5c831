//! Application state management
//!
//! This module owns the waypoint collection and implements the user actions
//! on it (add, edit, delete, export). Each action either completes fully or
//! changes nothing and reports a [`WaypointError`].

use crate::app::settings::Settings;
use crate::data::{
    CoordinateConverter, ExportFormat, GridReference, InputField, MgrsConverter,
    OverlayExporter, Result, Waypoint, WaypointCollection, WaypointError,
};
use geo::Point;
use std::path::{Path, PathBuf};

/// Zoom used when centering the map on a waypoint loaded for editing
pub const EDIT_ZOOM: f64 = 10.0;

/// Zoom used when fitting a single point
const SINGLE_POINT_ZOOM: f64 = 12.0;

/// Main application state
pub struct AppState {
    /// The waypoints entered during this session
    pub collection: WaypointCollection,

    /// Contents of the name and coordinates text fields
    pub input: WaypointInput,

    /// Index of the selected list row, if any
    pub selected: Option<usize>,

    /// Outcome of the last action
    pub status: Status,

    /// Error waiting to be acknowledged by the user
    pub error_dialog: Option<ErrorDialog>,

    /// Camera move requested by the last action
    pub pending_view: Option<ViewRequest>,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Export destination state
    pub export: ExportState,

    converter: Box<dyn CoordinateConverter>,
}

/// Text typed into the form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaypointInput {
    pub name: String,
    pub coordinates: String,
}

impl WaypointInput {
    pub fn clear(&mut self) {
        self.name.clear();
        self.coordinates.clear();
    }
}

/// Status bar message
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

/// Drives the status bar color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Added,
    Editing,
    Removed,
    Failed,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new(StatusKind::Info, "Welcome!")
    }
}

/// Modal message shown after a failed action
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorDialog {
    pub title: &'static str,
    pub message: String,
}

impl From<&WaypointError> for ErrorDialog {
    fn from(error: &WaypointError) -> Self {
        Self {
            title: if error.is_warning() { "Warning" } else { "Error" },
            message: error.to_string(),
        }
    }
}

/// Where the map should look next
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRequest {
    /// x = longitude, y = latitude
    pub center: Point<f64>,
    pub zoom: f64,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone)]
pub struct UiSettings {
    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// Whether sidebar is open
    pub sidebar_open: bool,

    /// Show help overlay
    pub show_help: bool,
}

/// Export destination state
#[derive(Clone, Debug, Default)]
pub struct ExportState {
    /// Destination given on the command line; skips the save dialog
    pub known_path: Option<PathBuf>,

    /// Save dialog to open on the next frame
    pub pending_dialog: Option<ExportFormat>,

    /// Directory of the last successful export
    pub last_directory: Option<PathBuf>,
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum TilesProvider {
    #[value(name = "openstreetmap")]
    OpenStreetMap,
    #[value(name = "opentopomap")]
    OpenTopoMap,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::OpenTopoMap => "© OpenTopoMap (CC-BY-SA)",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::OpenStreetMap, Self::OpenTopoMap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }
}

impl AppState {
    /// Create new application state from CLI settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            collection: WaypointCollection::new(),
            input: WaypointInput::default(),
            selected: None,
            status: Status::default(),
            error_dialog: None,
            pending_view: Some(ViewRequest {
                center: Point::new(settings.center_lon, settings.center_lat),
                zoom: settings.zoom,
            }),
            ui_settings: UiSettings {
                tiles_provider: settings.tiles,
                sidebar_open: true,
                show_help: false,
            },
            export: ExportState {
                known_path: settings.export_path.clone(),
                ..Default::default()
            },
            converter: Box::new(MgrsConverter),
        }
    }

    /// Replace the grid converter
    pub fn with_converter(mut self, converter: impl CoordinateConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Add a waypoint from the text currently in the form
    pub fn submit_input(&mut self) -> Result<usize> {
        let WaypointInput { name, coordinates } = self.input.clone();
        self.add(&name, &coordinates)
    }

    /// Validate, convert and append a waypoint
    ///
    /// On success the form is cleared; on failure nothing changes.
    pub fn add(&mut self, name: &str, coordinates: &str) -> Result<usize> {
        profiling::scope!("AppState::add");

        match self.build_waypoint(name, coordinates) {
            Ok(waypoint) => {
                tracing::info!(
                    "Added waypoint '{}' at {} ({:.6}, {:.6})",
                    waypoint.name(),
                    waypoint.grid_reference(),
                    waypoint.latitude(),
                    waypoint.longitude()
                );
                self.status = Status::new(
                    StatusKind::Added,
                    format!("Waypoint '{}' added", waypoint.name()),
                );
                let index = self.collection.push(waypoint);
                self.input.clear();
                Ok(index)
            }
            Err(e) => self.fail(e),
        }
    }

    fn build_waypoint(&self, name: &str, coordinates: &str) -> Result<Waypoint> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WaypointError::MissingField(InputField::Name));
        }
        if coordinates.trim().is_empty() {
            return Err(WaypointError::MissingField(InputField::Coordinates));
        }

        let grid = GridReference::parse(coordinates)?;
        let position =
            self.converter
                .to_lat_lon(&grid)
                .map_err(|source| WaypointError::Conversion {
                    input: grid.to_string(),
                    source,
                })?;

        Ok(Waypoint::new(name, &grid, position))
    }

    /// Remove a waypoint and put its name and grid reference back in the form
    ///
    /// The waypoint is only added again if the user submits the form.
    pub fn edit(&mut self, selected: Option<usize>) -> Result<Waypoint> {
        profiling::scope!("AppState::edit");

        let Some(waypoint) = selected.and_then(|index| self.collection.remove(index)) else {
            return self.fail(WaypointError::NoSelection);
        };

        self.input = WaypointInput {
            name: waypoint.name().to_string(),
            coordinates: waypoint.grid_reference().to_string(),
        };
        self.pending_view = Some(ViewRequest {
            center: waypoint.position(),
            zoom: EDIT_ZOOM,
        });
        self.selected = None;
        self.status = Status::new(
            StatusKind::Editing,
            format!("Waypoint '{}' loaded for editing", waypoint.name()),
        );
        tracing::info!("Loaded waypoint '{}' for editing", waypoint.name());

        Ok(waypoint)
    }

    /// Remove a waypoint for good
    pub fn delete(&mut self, selected: Option<usize>) -> Result<Waypoint> {
        profiling::scope!("AppState::delete");

        let Some(waypoint) = selected.and_then(|index| self.collection.remove(index)) else {
            return self.fail(WaypointError::NoSelection);
        };

        self.selected = None;
        self.status = Status::new(
            StatusKind::Removed,
            format!("Waypoint '{}' deleted", waypoint.name()),
        );
        tracing::info!("Deleted waypoint '{}'", waypoint.name());

        Ok(waypoint)
    }

    /// Start an export from the UI
    ///
    /// Writes straight to the known destination when there is one, otherwise
    /// queues the save dialog.
    pub fn request_export(&mut self, format: ExportFormat) {
        if self.collection.is_empty() {
            let _ = self.fail::<()>(WaypointError::EmptyStore);
            return;
        }

        match self.export.known_path.clone() {
            Some(path) => {
                let exporter = ExportFormat::from_path(&path).exporter();
                let _ = self.export_to(&path, exporter.as_ref());
            }
            None => self.export.pending_dialog = Some(format),
        }
    }

    /// Write every waypoint to `path`, returning how many were written
    pub fn export_to(&mut self, path: &Path, exporter: &dyn OverlayExporter) -> Result<usize> {
        profiling::scope!("AppState::export_to");

        if self.collection.is_empty() {
            return self.fail(WaypointError::EmptyStore);
        }

        if let Err(source) = exporter.export(self.collection.waypoints(), path) {
            return self.fail(WaypointError::Export {
                path: path.to_path_buf(),
                source,
            });
        }

        let count = self.collection.len();
        self.export.last_directory = path.parent().map(Path::to_path_buf);
        self.status = Status::new(
            StatusKind::Added,
            format!("{} file saved: {}", exporter.format().name(), path.display()),
        );
        tracing::info!("Exported {} waypoints to {}", count, path.display());

        Ok(count)
    }

    /// Select a list row, or clear the selection when it is already selected
    pub fn toggle_selection(&mut self, index: usize) {
        if index >= self.collection.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Frame all waypoints on the map
    pub fn fit_all(&mut self) {
        let Some((min_lat, min_lon, max_lat, max_lon)) = self.collection.bounding_box_wgs84()
        else {
            return;
        };

        let center = Point::new((min_lon + max_lon) / 2.0, (min_lat + max_lat) / 2.0);
        let max_span = (max_lat - min_lat).abs().max((max_lon - min_lon).abs());
        let zoom = if max_span > 0.0 {
            let zoom_estimate = (4.0 * 360.0 / max_span).log2();
            (zoom_estimate - 0.5).clamp(1.0, 18.0)
        } else {
            SINGLE_POINT_ZOOM
        };

        tracing::debug!(
            "Fitting ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom: {:.1}",
            min_lat,
            min_lon,
            max_lat,
            max_lon,
            zoom
        );
        self.pending_view = Some(ViewRequest { center, zoom });
    }

    /// Record a failed action without touching the collection
    fn fail<T>(&mut self, error: WaypointError) -> Result<T> {
        tracing::warn!("{}", error);
        self.status = Status::new(StatusKind::Failed, error.to_string());
        self.error_dialog = Some(ErrorDialog::from(&error));
        Err(error)
    }
}
