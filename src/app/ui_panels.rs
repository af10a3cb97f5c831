//! UI panels for the application
//!
//! This module provides the sidebar (form, actions and waypoint list), the
//! status bar, the error and help windows and the save dialog.

use crate::app::state::{AppState, StatusKind, TilesProvider};
use crate::data::ExportFormat;
use egui::{Color32, RichText, Ui};

/// Render the sidebar toggle button (overlaid on top-right of map)
pub fn sidebar_toggle_button(ui: &mut Ui, state: &mut AppState) {
    let button_size = egui::vec2(40.0, 40.0);
    let margin = 10.0;

    let rect = ui.max_rect();
    let button_pos = rect.left_top() + egui::vec2(margin, margin);
    let button_rect = egui::Rect::from_min_size(button_pos, button_size);

    let response = ui.allocate_rect(button_rect, egui::Sense::click());

    if response.clicked() {
        state.ui_settings.sidebar_open = !state.ui_settings.sidebar_open;
    }

    let bg_color = if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };

    ui.painter().rect_filled(button_rect, 5.0, bg_color);

    let icon = if state.ui_settings.sidebar_open {
        "✕"
    } else {
        "☰"
    };

    ui.painter().text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(20.0),
        ui.visuals().text_color(),
    );
}

/// Render the waypoint management sidebar
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.ui_settings.sidebar_open {
        return;
    }

    egui::SidePanel::left("main_sidebar")
        .default_width(320.0)
        .min_width(280.0)
        .max_width(450.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Waypoint Management");
            ui.separator();

            render_form(ui, state);
            ui.add_space(8.0);
            render_actions(ui, state);

            ui.add_space(8.0);
            ui.separator();

            render_waypoint_list(ui, state);
        });
}

/// Name and coordinates fields plus the add button
fn render_form(ui: &mut Ui, state: &mut AppState) {
    ui.label("Waypoint name:");
    ui.add(
        egui::TextEdit::singleline(&mut state.input.name)
            .hint_text("e.g. Base")
            .desired_width(f32::INFINITY),
    );

    ui.add_space(4.0);
    ui.label("MGRS coordinates:");
    let coordinates = ui.add(
        egui::TextEdit::singleline(&mut state.input.coordinates)
            .hint_text("e.g. 33TWN 12345 67890")
            .desired_width(f32::INFINITY),
    );

    let submitted =
        coordinates.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(8.0);
    if ui
        .add_sized([ui.available_width(), 24.0], egui::Button::new("➕ Add waypoint"))
        .clicked()
        || submitted
    {
        let _ = state.submit_input();
    }
}

/// Edit, delete, fit and export buttons
fn render_actions(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("✏ Edit").clicked() {
            let _ = state.edit(state.selected);
        }
        if ui.button("🗑 Delete").clicked() {
            let _ = state.delete(state.selected);
        }
        if ui.button("🎯 Fit all").clicked() {
            state.fit_all();
        }
    });

    ui.horizontal(|ui| {
        if ui.button("💾 Export KMZ file").clicked() {
            state.request_export(ExportFormat::Kmz);
        }
        if ui.button("Export GPX file").clicked() {
            state.request_export(ExportFormat::Gpx);
        }
    });

    if let Some(path) = &state.export.known_path {
        ui.label(
            RichText::new(format!("Exports go to {}", path.display()))
                .small()
                .weak(),
        );
    }
}

/// Selectable list of waypoints, one row per collection entry
fn render_waypoint_list(ui: &mut Ui, state: &mut AppState) {
    ui.label(
        RichText::new(format!("📍 Waypoints ({})", state.collection.len()))
            .strong()
            .color(ui.visuals().strong_text_color()),
    );
    ui.add_space(4.0);

    if state.collection.is_empty() {
        ui.label(RichText::new("No waypoints yet").italics().weak());
        return;
    }

    let mut clicked_row = None;
    egui::ScrollArea::vertical()
        .id_salt("waypoint_list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (index, row) in state.collection.view().rows.iter().enumerate() {
                let selected = state.selected == Some(index);
                if ui.selectable_label(selected, row).clicked() {
                    clicked_row = Some(index);
                }
            }
        });

    if let Some(index) = clicked_row {
        state.toggle_selection(index);
    }
}

/// Render the status bar with the outcome of the last action
pub fn status_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let color = match state.status.kind {
                StatusKind::Info => ui.visuals().text_color(),
                StatusKind::Added => Color32::from_rgb(40, 160, 60),
                StatusKind::Editing => Color32::from_rgb(230, 140, 20),
                StatusKind::Removed => Color32::from_rgb(60, 110, 220),
                StatusKind::Failed => Color32::RED,
            };
            ui.label(RichText::new(&state.status.message).color(color));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::ComboBox::from_id_salt("tiles_provider")
                    .selected_text(state.ui_settings.tiles_provider.name())
                    .show_ui(ui, |ui| {
                        for provider in TilesProvider::all() {
                            ui.selectable_value(
                                &mut state.ui_settings.tiles_provider,
                                *provider,
                                provider.name(),
                            );
                        }
                    });
                if ui.small_button("❓").clicked() {
                    state.ui_settings.show_help = !state.ui_settings.show_help;
                }
            });
        });
    });
}

/// Render the pending error as a modal window
pub fn error_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(dialog) = &state.error_dialog else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(dialog.title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let color = if dialog.title == "Warning" {
                ui.visuals().warn_fg_color
            } else {
                ui.visuals().error_fg_color
            };
            ui.label(RichText::new(&dialog.message).color(color));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.error_dialog = None;
    }
}

/// Open the native save dialog when an export is waiting for a destination
pub fn show_export_dialog(state: &mut AppState) {
    let Some(format) = state.export.pending_dialog.take() else {
        return;
    };

    let mut dialog = rfd::FileDialog::new()
        .add_filter(format!("{} files", format.name()), &[format.extension()])
        .set_file_name(format!("waypoints.{}", format.extension()));
    if let Some(dir) = &state.export.last_directory {
        dialog = dialog.set_directory(dir);
    }

    match dialog.save_file() {
        Some(mut path) => {
            if path.extension().is_none() {
                path.set_extension(format.extension());
            }
            let _ = state.export_to(&path, format.exporter().as_ref());
        }
        None => tracing::debug!("Export cancelled"),
    }
}

/// Render the help overlay
pub fn help_overlay(ctx: &egui::Context, show: &mut bool) {
    egui::Window::new("Help")
        .open(show)
        .collapsible(false)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            ui.heading("MGRS Waypoints");
            ui.separator();

            ui.label("Enter waypoints as MGRS grid references and export them as KMZ.");
            ui.add_space(8.0);

            ui.label(RichText::new("📍 Coordinates").strong());
            ui.label("• Zone, band, 100 km square, then easting and northing");
            ui.label("• Example: 33TWN 12345 67890 (spaces optional)");
            ui.label("• Easting and northing need the same number of digits");
            ui.add_space(8.0);

            ui.label(RichText::new("✏ Editing").strong());
            ui.label("• Select a row (or click its marker), then Edit");
            ui.label("• Edit removes the waypoint and fills the form with it");
            ui.label("• Press Add again to keep it");
            ui.add_space(8.0);

            ui.label(RichText::new("🖱 Map Controls").strong());
            ui.label("• Left drag: Pan the map");
            ui.label("• Ctrl + mouse wheel: Zoom in/out");
            ui.label("• Double click: Zoom in");
            ui.add_space(8.0);

            ui.separator();
            ui.label(
                RichText::new("Press F1 to toggle this help")
                    .small()
                    .italics(),
            );
        });
}
