//! Walkers plugin drawing the waypoint markers on the map view
//!
//! The marker layer is rebuilt from the collection's view every frame, so it
//! can never drift from the list.

use crate::data::Marker;
use egui::{Color32, Stroke};
use std::sync::{Arc, RwLock};
use walkers::{Plugin, Projector};

/// Marker circle radius in pixels
const MARKER_RADIUS: f32 = 6.0;

/// How close a click must land to a marker to select it
const CLICK_RADIUS: f32 = 12.0;

const MARKER_COLOR: Color32 = Color32::from_rgb(220, 60, 50);
const SELECTED_COLOR: Color32 = Color32::from_rgb(70, 130, 220);

/// Plugin for rendering waypoint markers on the map
pub struct MarkerPlugin {
    markers: Vec<Marker>,
    selected: Option<usize>,
    /// Index of the marker clicked during this frame, read back by the app
    clicked: Arc<RwLock<Option<usize>>>,
}

impl MarkerPlugin {
    /// Create a new marker plugin
    pub fn new(
        markers: Vec<Marker>,
        selected: Option<usize>,
        clicked: Arc<RwLock<Option<usize>>>,
    ) -> Self {
        Self {
            markers,
            selected,
            clicked,
        }
    }

    fn render_marker(
        &self,
        index: usize,
        screen_pos: egui::Pos2,
        marker: &Marker,
        painter: &egui::Painter,
    ) {
        let color = if self.selected == Some(index) {
            SELECTED_COLOR
        } else {
            MARKER_COLOR
        };

        painter.circle(
            screen_pos,
            MARKER_RADIUS,
            color,
            Stroke::new(2.0, Color32::WHITE),
        );

        let text_pos = screen_pos + egui::vec2(MARKER_RADIUS + 4.0, 0.0);
        let font = egui::FontId::proportional(13.0);
        // Shadowed text stays readable on any tile
        painter.text(
            text_pos + egui::vec2(1.0, 1.0),
            egui::Align2::LEFT_CENTER,
            &marker.label,
            font.clone(),
            Color32::from_black_alpha(160),
        );
        painter.text(
            text_pos,
            egui::Align2::LEFT_CENTER,
            &marker.label,
            font,
            Color32::WHITE,
        );
    }
}

impl Plugin for MarkerPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("MarkerPlugin::run");

        let painter = ui.painter();

        let screen_positions: Vec<egui::Pos2> = self
            .markers
            .iter()
            .map(|marker| {
                let position = walkers::lat_lon(marker.position.y(), marker.position.x());
                let screen_vec = projector.project(position);
                egui::Pos2::new(screen_vec.x, screen_vec.y)
            })
            .collect();

        for (index, (marker, screen_pos)) in self.markers.iter().zip(&screen_positions).enumerate()
        {
            self.render_marker(index, *screen_pos, marker, painter);
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let hit = screen_positions
                .iter()
                .enumerate()
                .map(|(index, pos)| (index, pos.distance(pointer)))
                .filter(|(_, distance)| *distance <= CLICK_RADIUS)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index);

            if let Some(index) = hit
                && let Ok(mut clicked) = self.clicked.write()
            {
                *clicked = Some(index);
            }
        }
    }
}
