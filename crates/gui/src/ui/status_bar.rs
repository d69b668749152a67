use egui::Ui;

use crate::draw::ModeName;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let mode = match state.mode() {
            ModeName::Extrude => t("mode.extrude"),
            ModeName::DrawPolygon => t("mode.draw_polygon"),
            ModeName::SimpleSelect => t("mode.simple_select"),
        };
        ui.weak(format!("{}: {mode}", t("status.mode")));

        ui.separator();
        ui.weak(format!("{}: {}", t("status.layers"), state.extrude.layers().len()));

        let vertices = state.draw.drawing().len();
        if vertices > 0 {
            ui.separator();
            ui.colored_label(
                egui::Color32::YELLOW,
                format!("{}: {vertices}", t("status.vertices")),
            );
        }

        if let Some(id) = state.extrude.selected() {
            ui.separator();
            ui.label(format!("{}: {id}", t("status.selected")));
        }

        // Right-aligned camera readout
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let camera = &state.map.camera;
            ui.weak(format!(
                "z {:.2}  pitch {:.0}°  bearing {:.0}°",
                camera.zoom,
                camera.pitch(),
                camera.bearing
            ));
        });
    });
}
