use glam::Vec2;
use shared::{close_ring, LngLat, Ring};

use super::{DrawKey, DrawingSession, DrawnPolygon, FeatureTarget, ModeName, PointerEvent};
use crate::map::MapSurface;
use crate::viewport::picking::polygon_contains;

/// Pixel distance to the first vertex that closes a polygon
const CLOSE_TOLERANCE: f32 = 10.0;

/// Minimal polygon drawing session
pub struct PolygonSession {
    mode: ModeName,
    modes: Vec<ModeName>,
    features: Vec<DrawnPolygon>,
    /// Vertices of the polygon being drawn
    drawing: Vec<LngLat>,
    selected: Option<String>,
}

impl Default for PolygonSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonSession {
    pub fn new() -> Self {
        Self {
            mode: ModeName::SimpleSelect,
            modes: vec![ModeName::SimpleSelect, ModeName::DrawPolygon],
            features: Vec::new(),
            drawing: Vec::new(),
            selected: None,
        }
    }

    /// Vertices placed so far in `draw_polygon`
    pub fn drawing(&self) -> &[LngLat] {
        &self.drawing
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn feature(&self, id: &str) -> Option<&DrawnPolygon> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Add a polygon with the ring stored as given; returns the new id.
    pub fn add_polygon(&mut self, ring: Ring) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.features.push(DrawnPolygon {
            id: id.clone(),
            coordinates: vec![ring],
        });
        id
    }

    /// Close the polygon being drawn. Needs three distinct vertices.
    pub fn finish_polygon(&mut self) -> Option<String> {
        let mut vertices = std::mem::take(&mut self.drawing);
        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            tracing::debug!("Polygon needs 3 vertices, got {}", vertices.len());
            self.drawing = vertices;
            return None;
        }

        let id = self.add_polygon(close_ring(vertices));
        tracing::info!("Finished polygon {id}");
        self.selected = Some(id.clone());
        self.mode = ModeName::SimpleSelect;
        Some(id)
    }

    fn cancel_drawing(&mut self) {
        self.drawing.clear();
    }

    fn near_first_vertex(&self, map: &dyn MapSurface, point: Vec2) -> bool {
        match self.drawing.first() {
            Some(first) if self.drawing.len() >= 3 => {
                map.project(*first).distance(point) <= CLOSE_TOLERANCE
            }
            _ => false,
        }
    }
}

impl DrawingSession for PolygonSession {
    fn mode(&self) -> ModeName {
        self.mode
    }

    fn register_mode(&mut self, mode: ModeName) {
        if !self.modes.contains(&mode) {
            self.modes.push(mode);
        }
    }

    fn change_mode(&mut self, mode: ModeName) {
        if !self.modes.contains(&mode) {
            tracing::warn!("Mode {mode} is not registered");
            return;
        }
        self.cancel_drawing();
        // Selection only lives in simple_select, so trash elsewhere is a no-op
        if mode != ModeName::SimpleSelect {
            self.selected = None;
        }
        self.mode = mode;
        tracing::debug!("Draw mode: {mode}");
    }

    fn trash(&mut self) {
        if self.mode == ModeName::DrawPolygon {
            self.cancel_drawing();
            return;
        }
        if let Some(id) = self.selected.take() {
            self.features.retain(|f| f.id != id);
            tracing::info!("Deleted drawn feature {id}");
        }
    }

    fn features(&self) -> &[DrawnPolygon] {
        &self.features
    }

    fn feature_at(&self, map: &dyn MapSurface, point: Vec2) -> Option<FeatureTarget> {
        self.features
            .iter()
            .rev()
            .find(|f| {
                let Some(ring) = f.outer() else {
                    return false;
                };
                let screen: Vec<Vec2> = ring.iter().map(|p| map.project(*p)).collect();
                polygon_contains(&screen, point)
            })
            .map(DrawnPolygon::to_target)
    }

    fn click(&mut self, map: &dyn MapSurface, event: &PointerEvent) {
        match self.mode {
            ModeName::DrawPolygon => {
                if self.near_first_vertex(map, event.point) {
                    self.finish_polygon();
                } else {
                    self.drawing.push(event.lng_lat);
                }
            }
            ModeName::SimpleSelect => {
                self.selected = event.feature_target.as_ref().map(|t| t.id.clone());
            }
            ModeName::Extrude => {}
        }
    }

    fn double_click(&mut self, _map: &dyn MapSurface, _event: &PointerEvent) {
        if self.mode == ModeName::DrawPolygon {
            self.finish_polygon();
        }
    }

    fn key_up(&mut self, key: DrawKey) {
        match (self.mode, key) {
            (ModeName::DrawPolygon, DrawKey::Enter) => {
                self.finish_polygon();
            }
            (ModeName::DrawPolygon, DrawKey::Escape) => {
                self.cancel_drawing();
                self.mode = ModeName::SimpleSelect;
            }
            (ModeName::SimpleSelect, DrawKey::Delete | DrawKey::Backspace) => self.trash(),
            _ => {}
        }
    }
}
