//! Main application module

mod keyboard;
mod styles;

use eframe::egui;

use crate::i18n;
use crate::state::{AppSettings, AppState, Language};
use crate::ui::{height_panel, status_bar, toolbar};
use crate::viewport::MapViewport;

/// Main application
pub struct MapApp {
    state: AppState,
    viewport: MapViewport,
    /// Write settings back to the user config on exit
    persist_settings: bool,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl MapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, persist: bool) -> Self {
        i18n::set_lang(settings.ui.language);
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        let last_font_size = settings.ui.font_size;
        Self {
            state: AppState::new(settings),
            viewport: MapViewport::new(),
            persist_settings: persist,
            last_font_size,
        }
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }
        if i18n::lang() != self.state.settings.ui.language {
            i18n::set_lang(self.state.settings.ui.language);
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Right panel: height form ─────────────────────────
        egui::SidePanel::right("height_panel")
            .default_width(240.0)
            .width_range(180.0..=400.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                height_panel::show(ui, &mut self.state);
            });

        // ── Central panel: map ───────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.persist_settings {
            self.state.settings.save();
        }
    }
}

/// Language toggled by the toolbar switch
pub fn next_language(lang: Language) -> Language {
    match lang {
        Language::Ru => Language::En,
        Language::En => Language::Ru,
    }
}
