//! Headless test harness for programmatic map interaction.
//!
//! Wraps an [`AppState`] built from default settings (never the user's config
//! file) and adds helpers that click on drawn polygons by their coordinates.

use glam::Vec2;
use shared::{LngLat, PaintProperty, PaintValue, Ring};

use crate::draw::{DrawingSession, ModeName};
use crate::extrude::{ExtrudeError, Extrusion};
use crate::fixtures::centroid;
use crate::map::MapSurface;
use crate::state::{AppSettings, AppState};

/// Headless test harness over the map, drawing session and extrusion workflow
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new harness in extrude mode with default settings.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }

    // ── Drawing ───────────────────────────────────────────────

    /// Add a drawn polygon with the ring stored as given; returns its id.
    pub fn add_polygon(&mut self, ring: Ring) -> String {
        self.state.draw.add_polygon(ring)
    }

    /// Draw a polygon through the UI flow: polygon mode, one click per
    /// vertex, Enter. Leaves the session in `simple_select`.
    pub fn draw_polygon(&mut self, vertices: &[LngLat]) -> Option<String> {
        self.state.line_mode();
        for v in vertices {
            let p = self.state.map.project(*v);
            self.state.click(p);
        }
        let before = self.state.draw.features().len();
        self.state.key_up(crate::draw::DrawKey::Enter);
        if self.state.draw.features().len() > before {
            self.state.draw.features().last().map(|f| f.id.clone())
        } else {
            None
        }
    }

    // ── Pointer ───────────────────────────────────────────────

    pub fn click(&mut self, point: Vec2) {
        self.state.click(point);
    }

    pub fn click_lng_lat(&mut self, p: LngLat) {
        let point = self.state.map.project(p);
        self.state.click(point);
    }

    /// Click the center of a drawn polygon. Returns false if it does not exist.
    pub fn click_feature(&mut self, drawn_id: &str) -> bool {
        let Some(ring) = self
            .state
            .draw
            .feature(drawn_id)
            .and_then(|f| f.outer().cloned())
        else {
            return false;
        };
        self.click_lng_lat(centroid(&ring));
        true
    }

    /// Click a viewport corner, away from anything drawn near the center.
    pub fn click_empty(&mut self) {
        self.state.click(Vec2::new(1.0, 1.0));
    }

    // ── Commands ──────────────────────────────────────────────

    pub fn set_height(&mut self, value: &str) {
        self.state.form.set(value);
    }

    pub fn apply_height(&mut self) -> Result<Extrusion, ExtrudeError> {
        self.state.apply_height()
    }

    /// Select a drawn polygon in extrude mode and apply `height`.
    pub fn extrude(&mut self, drawn_id: &str, height: &str) -> Result<Extrusion, ExtrudeError> {
        if self.mode() != ModeName::Extrude {
            self.state.extrude_mode();
        }
        self.click_feature(drawn_id);
        self.set_height(height);
        self.apply_height()
    }

    pub fn delete_layer(&mut self) -> Result<String, ExtrudeError> {
        self.state.delete_layer()
    }

    pub fn change_mode(&mut self, mode: ModeName) {
        self.state.change_mode(mode);
    }

    pub fn trash(&mut self) {
        self.state.trash_mode();
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn mode(&self) -> ModeName {
        self.state.mode()
    }

    pub fn drawn_count(&self) -> usize {
        self.state.draw.features().len()
    }

    pub fn layer_count(&self) -> usize {
        self.state.map.layer_count()
    }

    pub fn source_count(&self) -> usize {
        self.state.map.source_count()
    }

    /// Registered extrusion layer ids, in insertion order
    pub fn layers(&self) -> Vec<String> {
        self.state.extrude.layers().as_slice().to_vec()
    }

    pub fn selected(&self) -> Option<&str> {
        self.state.extrude.selected()
    }

    pub fn extruding_id(&self) -> Option<&str> {
        self.state.extrude.extruding().map(|f| f.id.as_str())
    }

    pub fn color_of(&self, layer_id: &str) -> Option<String> {
        self.state
            .map
            .paint(layer_id, PaintProperty::FillExtrusionColor)
            .and_then(PaintValue::as_text)
            .map(str::to_string)
    }

    /// Height as rendered: paint override, else the feature property
    pub fn height_of(&self, layer_id: &str) -> Option<f64> {
        self.state
            .map
            .extrusions()
            .iter()
            .find(|e| e.layer_id == layer_id)
            .map(|e| e.height)
    }

    pub fn pitch(&self) -> f64 {
        self.state.map.pitch()
    }

    /// Export the map layers as style JSON
    pub fn export_layers_json(&self) -> String {
        let layers: Vec<_> = self
            .state
            .map
            .layer_ids()
            .into_iter()
            .filter_map(|id| self.state.map.layer(id))
            .collect();
        serde_json::to_string_pretty(&layers).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{square_at, CENTER};

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.drawn_count(), 0);
        assert_eq!(h.layer_count(), 0);
        assert_eq!(h.mode(), ModeName::Extrude);
    }

    #[test]
    fn test_draw_polygon_via_clicks() {
        let mut h = TestHarness::new();
        let ring = square_at(0);
        let id = h.draw_polygon(&ring[..4]).unwrap();
        assert_eq!(h.drawn_count(), 1);
        assert_eq!(h.mode(), ModeName::SimpleSelect);
        assert!(!id.is_empty());
    }

    #[test]
    fn test_extrude_and_inspect() {
        let mut h = TestHarness::new();
        let id = h.add_polygon(square_at(0));
        let res = h.extrude(&id, "120").unwrap();
        assert_eq!(res.id(), format!("{id}_source_id"));
        assert_eq!(h.height_of(res.id()), Some(120.0));
        assert_eq!(h.layers(), vec![res.id().to_string()]);
    }

    #[test]
    fn test_click_missing_feature() {
        let mut h = TestHarness::new();
        assert!(!h.click_feature("nope"));
        h.click_lng_lat(CENTER);
        assert!(h.extruding_id().is_none());
    }

    #[test]
    fn test_export_layers_json() {
        let mut h = TestHarness::new();
        let id = h.add_polygon(square_at(0));
        h.extrude(&id, "10").unwrap();
        let json = h.export_layers_json();
        assert!(json.contains("fill-extrusion"));
        assert!(json.contains("_source_id"));
    }
}
