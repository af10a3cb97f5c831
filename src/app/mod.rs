//! Application module
//!
//! This module provides the main application structure:
//! - Sidebar with the waypoint form, actions and list
//! - Full map view with one marker per waypoint
//! - Status bar reporting the outcome of the last action
//! - Modal window for errors

mod plugin;
pub(crate) mod settings;
mod state;
mod ui_panels;

use crate::app::plugin::MarkerPlugin;
use crate::app::settings::Settings;
use crate::app::state::{AppState, TilesProvider};
use eframe::egui;
use std::sync::{Arc, RwLock};
use walkers::{
    HttpTiles, Map, MapMemory, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Custom OpenTopoMap tile source
pub struct OpenTopoMap;

impl TileSource for OpenTopoMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.opentopomap.org/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenTopoMap (CC-BY-SA)",
            url: "https://opentopomap.org/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        17 // OpenTopoMap has max zoom of 17
    }
}

/// Main application structure
pub struct WaypointApp {
    /// Application state (waypoints, form, status, etc.)
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles_osm: HttpTiles,

    /// Map tiles provider (OpenTopoMap)
    tiles_otm: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Marker clicked on the map during the last frame
    marker_clicked: Arc<RwLock<Option<usize>>>,
}

impl WaypointApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let state = AppState::new(&settings);

        let tiles_osm = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let tiles_otm = HttpTiles::new(OpenTopoMap, cc.egui_ctx.clone());

        tracing::info!(
            "Initialized map at ({:.4}, {:.4}), zoom {}",
            settings.center_lat,
            settings.center_lon,
            settings.zoom
        );

        Self {
            state,
            tiles_osm,
            tiles_otm,
            map_memory: MapMemory::default(),
            marker_clicked: Arc::new(RwLock::new(None)),
        }
    }

    /// Move the camera if the last action asked for it
    fn apply_pending_view(&mut self) {
        let Some(view) = self.state.pending_view.take() else {
            return;
        };

        self.map_memory
            .center_at(walkers::lat_lon(view.center.y(), view.center.x()));
        if self.map_memory.set_zoom(view.zoom).is_err() {
            tracing::warn!("Zoom level {} rejected by the map", view.zoom);
        }

        tracing::debug!(
            "Centered map at ({:.4}, {:.4}), zoom: {:.1}",
            view.center.y(),
            view.center.x(),
            view.zoom
        );
    }

    /// Select the marker clicked in the previous map pass
    fn process_marker_click(&mut self) {
        let clicked = match self.marker_clicked.write() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(index) = clicked {
            self.state.toggle_selection(index);
        }
    }
}

#[profiling::all_functions]
impl eframe::App for WaypointApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::F1) {
                self.state.ui_settings.show_help = !self.state.ui_settings.show_help;
            }
        });

        self.apply_pending_view();

        // Handle save dialog
        ui_panels::show_export_dialog(&mut self.state);

        if self.state.ui_settings.show_help {
            ui_panels::help_overlay(ctx, &mut self.state.ui_settings.show_help);
        }

        ui_panels::error_window(ctx, &mut self.state);
        ui_panels::status_bar(ctx, &mut self.state);
        ui_panels::render_sidebar(ctx, &mut self.state);

        let tiles_provider = self.state.ui_settings.tiles_provider;
        let attribution_text = tiles_provider.attribution();

        // Central panel: Map view
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let marker_plugin = MarkerPlugin::new(
                    self.state.collection.view().markers.clone(),
                    self.state.selected,
                    self.marker_clicked.clone(),
                );

                let tiles: &mut HttpTiles = match tiles_provider {
                    TilesProvider::OpenStreetMap => &mut self.tiles_osm,
                    TilesProvider::OpenTopoMap => &mut self.tiles_otm,
                };

                let map = Map::new(
                    Some(tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(
                        settings::DEFAULT_CENTER_LAT,
                        settings::DEFAULT_CENTER_LON,
                    ),
                )
                .with_plugin(marker_plugin);

                ui.add(map);

                ui_panels::sidebar_toggle_button(ui, &mut self.state);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    attribution_text,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        self.process_marker_click();

        profiling::finish_frame!();
    }
}
