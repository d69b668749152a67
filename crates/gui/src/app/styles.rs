//! Application style: a dark frame around the map, tinted from the map palette

use eframe::egui;
use egui::{Color32, FontId, TextStyle};

use crate::viewport::overlays::{CAPTURED_COLOR, DRAWN_COLOR, GROUND_COLOR};

/// Text styles as multiples of the body font size
const TEXT_SCALE: [(TextStyle, f32); 4] = [
    (TextStyle::Body, 1.0),
    (TextStyle::Button, 1.0),
    (TextStyle::Small, 0.85),
    (TextStyle::Heading, 1.25),
];

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    ctx.set_style(map_style(font_size));
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn darken(color: Color32, factor: f32) -> Color32 {
    let f = |c: u8| (c as f32 * factor) as u8;
    Color32::from_rgb(f(color.r()), f(color.g()), f(color.b()))
}

pub fn map_style(font_size: f32) -> egui::Style {
    let mut style = egui::Style {
        visuals: egui::Visuals::dark(),
        ..Default::default()
    };
    let visuals = &mut style.visuals;

    // Panels sit a shade below the map ground so the map reads as the page
    visuals.panel_fill = darken(GROUND_COLOR, 0.75);
    visuals.window_fill = GROUND_COLOR;
    // Height field background
    visuals.extreme_bg_color = darken(GROUND_COLOR, 0.55);

    // Active mode button and text selection use the captured-outline color
    visuals.selection.bg_fill = darken(CAPTURED_COLOR, 0.45);
    visuals.selection.stroke.color = CAPTURED_COLOR;
    visuals.widgets.hovered.bg_stroke.color = DRAWN_COLOR.gamma_multiply(0.6);

    // Validation message under the height field
    visuals.error_fg_color = Color32::from_rgb(235, 90, 80);

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(3);
    }

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 3.0);
    // Room for a height in meters, not a paragraph
    style.spacing.text_edit_width = 96.0;

    apply_text_styles(&mut style, font_size);
    style
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    for (text_style, scale) in TEXT_SCALE {
        style
            .text_styles
            .insert(text_style, FontId::proportional(font_size * scale));
    }
    style
        .text_styles
        .insert(TextStyle::Monospace, FontId::monospace(font_size));
}
