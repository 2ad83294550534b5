use crate::app::SessionState;
use crate::runtime::FrameStats;

/// Title of the only panel the demo shows.
pub const SETTINGS_TITLE: &str = "Settings";

/// Lays out the settings panel.
///
/// The color editors write straight into `session`, so edits show up in the
/// same frame's clear and draw.
pub fn settings_panel(ctx: &egui::Context, session: &mut SessionState, stats: &FrameStats) {
    egui::Window::new(SETTINGS_TITLE).show(ctx, |ui| {
        color_row(ui, "Clear Color", &mut session.clear_color);
        color_row(ui, "Triangle Color", &mut session.shape_color);
        ui.label(stats.summary());
    });
}

fn color_row(ui: &mut egui::Ui, label: &str, rgba: &mut [f32; 4]) {
    ui.horizontal(|ui| {
        ui.color_edit_button_rgba_unmultiplied(rgba);
        ui.label(label);
    });
}
