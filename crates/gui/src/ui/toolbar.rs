//! Mode buttons, building removal and language switch

use egui::Ui;

use crate::app::next_language;
use crate::draw::ModeName;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let mode = state.mode();

        if ui
            .selectable_label(mode == ModeName::Extrude, t("tb.extrude"))
            .on_hover_text(t("tip.extrude"))
            .clicked()
        {
            state.extrude_mode();
        }
        if ui
            .selectable_label(mode == ModeName::DrawPolygon, t("tb.polygon"))
            .on_hover_text(t("tip.polygon"))
            .clicked()
        {
            state.line_mode();
        }
        if ui
            .selectable_label(mode == ModeName::SimpleSelect, t("tb.select"))
            .on_hover_text(t("tip.select"))
            .clicked()
        {
            state.free_mode();
        }

        ui.separator();

        let can_trash = state.draw.selected().is_some() || !state.draw.drawing().is_empty();
        if ui
            .add_enabled(can_trash, egui::Button::new(t("tb.trash")))
            .on_hover_text(t("tip.trash"))
            .clicked()
        {
            state.trash_mode();
        }

        let can_delete = state.extrude.selected().is_some();
        if ui
            .add_enabled(can_delete, egui::Button::new(t("tb.delete_layer")))
            .on_hover_text(t("tip.delete_layer"))
            .clicked()
        {
            let _ = state.delete_layer();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let lang = state.settings.ui.language;
            let label = match lang {
                crate::state::Language::Ru => "RU",
                crate::state::Language::En => "EN",
            };
            if ui.button(label).on_hover_text(t("tb.language")).clicked() {
                state.settings.ui.language = next_language(lang);
            }
        });
    });
}
