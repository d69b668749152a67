//! Map viewport panel: pointer input and painting

pub use extrude_map_lib::viewport::camera;
pub(crate) mod overlays;

use egui::Ui;
use glam::Vec2;
use shared::CursorStyle;

use crate::draw::ModeName;
use crate::state::AppState;

/// Degrees of bearing or pitch per dragged pixel
const ROTATE_SPEED: f64 = 0.25;
const ZOOM_SPEED: f64 = 0.002;

/// Map viewport painted with egui shapes
pub struct MapViewport {
    /// Pointer position in viewport pixels while hovered
    hover: Option<Vec2>,
    pub show_grid: bool,
}

impl MapViewport {
    pub fn new() -> Self {
        Self {
            hover: None,
            show_grid: true,
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        state.map.camera.viewport = Vec2::new(rect.width(), rect.height());

        let to_local = |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);

        self.handle_pointer(ui, &response, state, to_local);
        self.handle_camera(ui, &response, state);

        if response.hovered() {
            let icon = match (state.map.cursor(), state.mode()) {
                (CursorStyle::Pointer, _) => egui::CursorIcon::PointingHand,
                (CursorStyle::Default, ModeName::DrawPolygon) => egui::CursorIcon::Crosshair,
                (CursorStyle::Default, _) => egui::CursorIcon::Default,
            };
            ui.ctx().set_cursor_icon(icon);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, overlays::GROUND_COLOR);
        let camera = &state.map.camera;
        if self.show_grid {
            overlays::draw_grid(&painter, rect, camera);
        }
        overlays::draw_drawn_features(&painter, rect, camera, state);
        overlays::draw_captured(&painter, rect, camera, state);
        overlays::draw_extrusions(&painter, rect, camera, &state.map);
        overlays::draw_drawing_preview(&painter, rect, camera, state, self.hover);
    }

    fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        state: &mut AppState,
        to_local: impl Fn(egui::Pos2) -> Vec2,
    ) {
        let hover = response.hover_pos().map(&to_local);
        if hover != self.hover {
            if let Some(p) = hover {
                state.mouse_move(p);
            }
            self.hover = hover;
        }

        let pointer = response.interact_pointer_pos().map(&to_local);
        let Some(p) = pointer else {
            return;
        };

        if response.drag_started_by(egui::PointerButton::Primary) {
            state.mouse_down(p);
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            state.mouse_up(p);
        }

        if response.double_clicked() {
            state.double_click(p);
        } else if response.clicked() {
            state.click(p);
        }

        // Shift-click finishes a polygon for trackpads without double-click
        if response.clicked() && ui.input(|i| i.modifiers.shift) {
            state.double_click(p);
        }
    }

    fn handle_camera(&mut self, ui: &Ui, response: &egui::Response, state: &mut AppState) {
        let delta = response.drag_delta();
        if response.dragged_by(egui::PointerButton::Primary) {
            state.map.camera.pan(Vec2::new(delta.x, delta.y));
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            state.map.camera.rotate(delta.x as f64 * ROTATE_SPEED);
            state.map.camera.tilt(-delta.y as f64 * ROTATE_SPEED);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                state.map.camera.zoom_by(scroll as f64 * ZOOM_SPEED);
            }
        }
    }
}
