//! Map surface capability and its in-memory implementation.
//!
//! Everything the extrusion workflow needs from a map engine goes through
//! [`MapSurface`]. [`MapScene`] is the implementation used by the desktop
//! viewport and by the headless harness.

mod scene;

pub use scene::{ExtrusionView, MapScene};

use shared::{CursorStyle, FeatureCollection, LayerSpec, PaintProperty, PaintValue};

pub use crate::viewport::picking::PixelBox;

/// A feature found by [`MapSurface::query_rendered_features`]
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFeature {
    pub layer_id: String,
    pub source_id: String,
    pub feature_id: String,
}

/// Capabilities of a map engine consumed by draw modes and commands.
pub trait MapSurface {
    /// Camera pitch in degrees
    fn pitch(&self) -> f64;
    fn set_pitch(&mut self, pitch: f64);

    fn has_source(&self, id: &str) -> bool;
    /// Register a GeoJSON source
    fn add_source(&mut self, id: &str, data: FeatureCollection);
    fn remove_source(&mut self, id: &str);

    fn add_layer(&mut self, layer: LayerSpec);
    fn remove_layer(&mut self, id: &str);
    fn set_paint_property(&mut self, layer_id: &str, property: PaintProperty, value: PaintValue);

    /// Features drawn inside a pixel box, top-most layer first
    fn query_rendered_features(&self, bbox: PixelBox) -> Vec<RenderedFeature>;

    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Ground coordinate under a viewport pixel
    fn unproject(&self, point: glam::Vec2) -> shared::LngLat;
    /// Viewport pixel of a ground coordinate
    fn project(&self, point: shared::LngLat) -> glam::Vec2;
}
