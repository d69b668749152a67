//! Keyboard shortcut handling

use eframe::egui;

use crate::draw::{DrawKey, ModeName};
use crate::state::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts while the height field has focus
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let keys = ctx.input(|i| {
        let mut keys = Vec::new();
        if i.key_released(egui::Key::Escape) {
            keys.push(DrawKey::Escape);
        }
        if i.key_released(egui::Key::Enter) {
            keys.push(DrawKey::Enter);
        }
        if i.key_released(egui::Key::Delete) {
            keys.push(DrawKey::Delete);
        }
        if i.key_released(egui::Key::Backspace) {
            keys.push(DrawKey::Backspace);
        }
        keys
    });

    for key in keys {
        handle_key(state, key);
    }
}

fn handle_key(state: &mut AppState, key: DrawKey) {
    let building_selected = state.extrude.selected().is_some();
    match (state.mode(), key) {
        // Delete removes the highlighted building before any drawn shape
        (_, DrawKey::Delete | DrawKey::Backspace) if building_selected => {
            let _ = state.delete_layer();
        }
        // Escape in extrude mode drops back to plain selection
        (ModeName::Extrude, DrawKey::Escape) => state.free_mode(),
        _ => state.key_up(key),
    }
}
