pub mod height_form;
pub mod layers;
pub mod selection;
pub mod settings;

use glam::Vec2;

pub use height_form::HeightForm;
pub use settings::{AppSettings, ExtrusionSettings, Language, MapSettings, UiSettings};

use crate::draw::{
    DrawKey, DrawMode, DrawingSession, DrawnPolygon, FeatureTarget, ModeName, ModeState,
    PointerEvent, PolygonSession,
};
use crate::extrude::{ExtrudeController, ExtrudeError, Extrusion};
use crate::map::{MapScene, MapSurface, PixelBox};

/// Combined application state: map, drawing session and extrusion workflow
pub struct AppState {
    pub map: MapScene,
    pub draw: PolygonSession,
    pub extrude: ExtrudeController,
    /// State of the extrude mode since its last setup
    pub mode_state: ModeState,
    pub form: HeightForm,
    pub settings: AppSettings,
    /// Last command failure, shown in the height panel
    pub last_error: Option<ExtrudeError>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    /// Build the state and start in extrude mode.
    pub fn new(settings: AppSettings) -> Self {
        let mut draw = PolygonSession::new();
        draw.register_mode(ModeName::Extrude);

        let mut state = Self {
            map: MapScene::new(settings.map.camera()),
            draw,
            extrude: ExtrudeController::new(settings.extrusion.clone()),
            mode_state: ModeState::default(),
            form: HeightForm::default(),
            settings,
            last_error: None,
        };
        state.extrude_mode();
        state
    }

    pub fn mode(&self) -> ModeName {
        self.draw.mode()
    }

    fn pointer_event(&self, point: Vec2) -> PointerEvent {
        PointerEvent {
            point,
            lng_lat: self.map.unproject(point),
            feature_target: self
                .draw
                .feature_at(&self.map, point)
                .or_else(|| self.extrusion_target(point)),
        }
    }

    /// Drawn polygon behind the extrusion under the pointer (walls and roof
    /// stand off the ground footprint once the map is pitched).
    fn extrusion_target(&self, point: Vec2) -> Option<FeatureTarget> {
        let bbox = PixelBox::around(point, self.settings.extrusion.query_margin);
        self.map
            .query_rendered_features(bbox)
            .iter()
            .filter_map(|f| shared::drawn_id(&f.layer_id))
            .find_map(|id| self.draw.feature(id))
            .map(DrawnPolygon::to_target)
    }

    fn custom_mode_active(&self) -> bool {
        !self.draw.mode().is_builtin()
    }

    // ── Pointer / keyboard routing ────────────────────────────

    pub fn click(&mut self, point: Vec2) {
        let event = self.pointer_event(point);
        if self.custom_mode_active() {
            self.extrude
                .on_click(&mut self.map, &mut self.mode_state, &event);
        } else {
            self.draw.click(&self.map, &event);
        }
    }

    pub fn double_click(&mut self, point: Vec2) {
        let event = self.pointer_event(point);
        if !self.custom_mode_active() {
            self.draw.double_click(&self.map, &event);
        }
    }

    pub fn mouse_move(&mut self, point: Vec2) {
        if self.custom_mode_active() {
            let event = self.pointer_event(point);
            self.extrude
                .on_mouse_move(&mut self.map, &mut self.mode_state, &event);
        }
    }

    pub fn mouse_down(&mut self, point: Vec2) {
        if self.custom_mode_active() {
            let event = self.pointer_event(point);
            self.extrude
                .on_mouse_down(&mut self.map, &mut self.mode_state, &event);
        }
    }

    pub fn mouse_up(&mut self, point: Vec2) {
        if self.custom_mode_active() {
            let event = self.pointer_event(point);
            self.extrude
                .on_mouse_up(&mut self.map, &mut self.mode_state, &event);
        }
    }

    pub fn key_up(&mut self, key: DrawKey) {
        if self.custom_mode_active() {
            self.extrude
                .on_key_up(&mut self.map, &mut self.mode_state, key);
        } else {
            self.draw.key_up(key);
        }
    }

    /// Drawn features as the active mode wants them displayed
    pub fn display_features(&self) -> Vec<DrawnPolygon> {
        let mut out = Vec::with_capacity(self.draw.features().len());
        for feature in self.draw.features() {
            if self.custom_mode_active() {
                self.extrude
                    .to_display_features(&self.mode_state, feature.clone(), &mut |f| {
                        out.push(f)
                    });
            } else {
                out.push(feature.clone());
            }
        }
        out
    }

    // ── Commands ──────────────────────────────────────────────

    /// Apply the form height; failures are kept in `last_error`.
    pub fn apply_height(&mut self) -> Result<Extrusion, ExtrudeError> {
        let result = self.extrude.extrude_polygon(&mut self.map, &self.form);
        self.record(&result);
        result
    }

    pub fn delete_layer(&mut self) -> Result<String, ExtrudeError> {
        let result = self.extrude.delete_layer(&mut self.map);
        self.record(&result);
        result
    }

    fn record<T>(&mut self, result: &Result<T, ExtrudeError>) {
        match result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                tracing::debug!("Command skipped: {e}");
                self.last_error = Some(e.clone());
            }
        }
    }

    pub fn extrude_mode(&mut self) {
        self.mode_state = self.extrude.extrude_mode(&mut self.draw, &mut self.map);
        tracing::info!("Mode: {}", ModeName::Extrude);
    }

    pub fn line_mode(&mut self) {
        self.extrude.line_mode(&mut self.draw, &mut self.map);
        tracing::info!("Mode: {}", ModeName::DrawPolygon);
    }

    pub fn free_mode(&mut self) {
        self.extrude.free_mode(&mut self.draw, &mut self.map);
        tracing::info!("Mode: {}", ModeName::SimpleSelect);
    }

    pub fn trash_mode(&mut self) {
        self.extrude.trash_mode(&mut self.draw, &mut self.map);
    }

    pub fn change_mode(&mut self, mode: ModeName) {
        match mode {
            ModeName::Extrude => self.extrude_mode(),
            ModeName::DrawPolygon => self.line_mode(),
            ModeName::SimpleSelect => self.free_mode(),
        }
    }
}
