//! Draw modes and the drawing session.
//!
//! A drawing session owns the drawn polygons and the active mode. The
//! library modes (`draw_polygon`, `simple_select`) are handled by the session
//! itself; custom modes implement [`DrawMode`] and receive the events routed
//! to them by the host while they are active.

mod session;

pub use session::PolygonSession;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use shared::{LngLat, Ring};

use crate::map::MapSurface;

/// Name of a draw mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeName {
    #[serde(rename = "extrudeMode")]
    Extrude,
    #[serde(rename = "draw_polygon")]
    DrawPolygon,
    #[serde(rename = "simple_select")]
    SimpleSelect,
}

impl ModeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeName::Extrude => "extrudeMode",
            ModeName::DrawPolygon => "draw_polygon",
            ModeName::SimpleSelect => "simple_select",
        }
    }

    /// Modes implemented by the drawing session itself
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ModeName::Extrude)
    }
}

impl std::fmt::Display for ModeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to [`DrawMode::on_setup`]
#[derive(Debug, Clone, Default)]
pub struct ModeOptions {
    pub count: Option<u32>,
}

/// Mode-local state created on setup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeState {
    pub count: u32,
}

/// Drawn feature under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTarget {
    /// Id of the drawn feature
    pub id: String,
    pub coordinates: Vec<Ring>,
}

/// Pointer event delivered to modes
#[derive(Debug, Clone)]
pub struct PointerEvent {
    /// Viewport pixel
    pub point: Vec2,
    pub lng_lat: LngLat,
    pub feature_target: Option<FeatureTarget>,
}

/// Keys draw modes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKey {
    Enter,
    Escape,
    Delete,
    Backspace,
}

/// A polygon owned by the drawing session
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPolygon {
    pub id: String,
    pub coordinates: Vec<Ring>,
}

impl DrawnPolygon {
    pub fn outer(&self) -> Option<&Ring> {
        self.coordinates.first()
    }

    pub fn to_target(&self) -> FeatureTarget {
        FeatureTarget {
            id: self.id.clone(),
            coordinates: self.coordinates.clone(),
        }
    }
}

/// Custom draw mode hooks. Only `on_setup` is required.
pub trait DrawMode {
    fn on_setup(&mut self, options: &ModeOptions) -> ModeState;

    fn on_click(
        &mut self,
        _map: &mut dyn MapSurface,
        _state: &mut ModeState,
        _event: &PointerEvent,
    ) {
    }

    fn on_mouse_move(
        &mut self,
        _map: &mut dyn MapSurface,
        _state: &mut ModeState,
        _event: &PointerEvent,
    ) {
    }

    fn on_mouse_down(
        &mut self,
        _map: &mut dyn MapSurface,
        _state: &mut ModeState,
        _event: &PointerEvent,
    ) {
    }

    fn on_mouse_up(
        &mut self,
        _map: &mut dyn MapSurface,
        _state: &mut ModeState,
        _event: &PointerEvent,
    ) {
    }

    fn on_key_up(&mut self, _map: &mut dyn MapSurface, _state: &mut ModeState, _key: DrawKey) {}

    /// Decide how a feature is displayed while this mode is active.
    fn to_display_features(
        &self,
        _state: &ModeState,
        feature: DrawnPolygon,
        display: &mut dyn FnMut(DrawnPolygon),
    ) {
        display(feature);
    }
}

/// Capabilities of a drawing library consumed by the extrusion workflow.
pub trait DrawingSession {
    fn mode(&self) -> ModeName;
    /// Make a custom mode available to `change_mode`
    fn register_mode(&mut self, mode: ModeName);
    fn change_mode(&mut self, mode: ModeName);
    /// Delete the current selection
    fn trash(&mut self);

    fn features(&self) -> &[DrawnPolygon];
    /// Top-most drawn feature under a viewport pixel
    fn feature_at(&self, map: &dyn MapSurface, point: Vec2) -> Option<FeatureTarget>;

    /// Library handling of a click in a built-in mode
    fn click(&mut self, map: &dyn MapSurface, event: &PointerEvent);
    fn double_click(&mut self, map: &dyn MapSurface, event: &PointerEvent);
    fn key_up(&mut self, key: DrawKey);
}
