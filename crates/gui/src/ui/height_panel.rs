//! Height input for the polygon captured in extrude mode

use egui::Ui;

use crate::extrude::ExtrudeError;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("height.title"));
    ui.add_space(4.0);

    match state.extrude.extruding() {
        Some(feature) => {
            ui.label(format!("{}: {}", t("height.captured"), feature.id));
        }
        None => {
            ui.weak(t("height.none"));
        }
    }

    ui.add_space(4.0);
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.form.value).hint_text(t("height.hint")),
    );
    let submitted =
        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    // Validation runs on every keystroke
    if state.form.errors().is_some() {
        ui.colored_label(ui.visuals().error_fg_color, t("height.invalid"));
    }

    ui.add_space(4.0);
    let can_apply = state.form.is_valid() && state.extrude.extruding().is_some();
    let clicked = ui
        .add_enabled(can_apply, egui::Button::new(t("height.apply")))
        .clicked();
    if clicked || (submitted && can_apply) {
        let _ = state.apply_height();
    }

    if let Some(err) = &state.last_error {
        let key = match err {
            ExtrudeError::InvalidHeightInput(_) => "height.invalid",
            ExtrudeError::NoActiveExtrusion => "height.no_polygon",
            ExtrudeError::NoSelectedLayer => "height.no_selection",
        };
        ui.add_space(4.0);
        ui.colored_label(ui.visuals().error_fg_color, t(key));
    }
}
