use super::metadata::log_version_info;
use super::profiling::setup_logging;
use crate::app::{WaypointApp, settings::Settings};

pub const APP_NAME: &str = "MGRS Waypoints";

/// Native entry point, expects to be called from inside a Tokio runtime so
/// the map tile downloads have an executor
pub fn run_native() -> eframe::Result {
    // Setup logging
    setup_logging();
    log_version_info();

    let settings = Settings::from_cli();

    #[cfg(feature = "profiling")]
    let _profiling_server = settings
        .profiling
        .then(super::profiling::ProfilingServer::start);
    #[cfg(not(feature = "profiling"))]
    if settings.profiling {
        tracing::warn!("--profiling ignored: built without the profiling feature");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(WaypointApp::new(cc, settings)))),
    )
}
