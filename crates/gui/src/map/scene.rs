use std::collections::HashMap;

use glam::Vec2;
use shared::{
    CursorStyle, Feature, FeatureCollection, LayerSpec, LayerType, LngLat, PaintProperty,
    PaintValue, Ring, SourceSpec,
};

use super::{MapSurface, PixelBox, RenderedFeature};
use crate::viewport::camera::MapCamera;
use crate::viewport::picking::polygon_hits_box;

/// One extruded feature with its paint resolved, ready to draw or hit-test.
#[derive(Clone, Debug)]
pub struct ExtrusionView<'a> {
    pub layer_id: &'a str,
    pub source_id: &'a str,
    pub feature_id: &'a str,
    pub ring: &'a Ring,
    pub base: f64,
    pub height: f64,
    pub color: String,
    pub opacity: f64,
}

impl ExtrusionView<'_> {
    /// Projected outer ring at the given altitude, without the closing point.
    pub fn outline(&self, camera: &MapCamera, altitude: f64) -> Vec<Vec2> {
        let pts = match self.ring.split_last() {
            Some((last, rest)) if rest.first() == Some(last) => rest,
            _ => self.ring.as_slice(),
        };
        pts.iter().map(|p| camera.project(*p, altitude)).collect()
    }

    pub fn footprint(&self, camera: &MapCamera) -> Vec<Vec2> {
        self.outline(camera, self.base)
    }

    /// `fill-extrusion-height` is the absolute roof altitude, not added to the base.
    pub fn roof(&self, camera: &MapCamera) -> Vec<Vec2> {
        self.outline(camera, self.height)
    }
}

/// In-memory map: camera, sources, ordered layers and cursor.
#[derive(Default)]
pub struct MapScene {
    pub camera: MapCamera,
    sources: HashMap<String, SourceSpec>,
    /// Bottom to top
    layers: Vec<LayerSpec>,
    cursor: CursorStyle,
}

impl MapScene {
    pub fn new(camera: MapCamera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn paint(&self, layer_id: &str, property: PaintProperty) -> Option<&PaintValue> {
        self.layer(layer_id).and_then(|l| l.paint.get(&property))
    }

    /// All fill-extrusion features, bottom layer first.
    pub fn extrusions(&self) -> Vec<ExtrusionView<'_>> {
        let mut out = Vec::new();
        for layer in &self.layers {
            let Some(source) = self.sources.get(&layer.source) else {
                continue;
            };
            for feature in &source.data().features {
                let Some(ring) = feature.geometry.outer() else {
                    continue;
                };
                let extruded = layer.kind == LayerType::FillExtrusion;
                out.push(ExtrusionView {
                    layer_id: &layer.id,
                    source_id: &layer.source,
                    feature_id: &feature.id,
                    ring,
                    base: if extruded {
                        resolve_number(layer, PaintProperty::FillExtrusionBase, feature)
                            .unwrap_or(0.0)
                    } else {
                        0.0
                    },
                    height: if extruded {
                        resolve_number(layer, PaintProperty::FillExtrusionHeight, feature)
                            .unwrap_or(0.0)
                    } else {
                        0.0
                    },
                    color: resolve_color(layer, feature),
                    opacity: resolve_number(layer, PaintProperty::FillExtrusionOpacity, feature)
                        .unwrap_or(1.0),
                });
            }
        }
        out
    }
}

fn feature_number(feature: &Feature, name: &str) -> Option<f64> {
    let props = &feature.properties;
    match name {
        "height" => Some(props.height),
        "base_height" => Some(props.base_height),
        "level" => Some(props.level as f64),
        _ => None,
    }
}

fn resolve_number(layer: &LayerSpec, property: PaintProperty, feature: &Feature) -> Option<f64> {
    match layer.paint.get(&property)? {
        PaintValue::Number(n) => Some(*n),
        PaintValue::Text(s) => s.parse().ok(),
        value => value.get_property().and_then(|p| feature_number(feature, p)),
    }
}

fn resolve_color(layer: &LayerSpec, feature: &Feature) -> String {
    match layer.paint.get(&PaintProperty::FillExtrusionColor) {
        Some(PaintValue::Text(s)) => s.clone(),
        // ["get", "color"] or unset
        _ => feature.properties.color.clone(),
    }
}

/// Footprint, roof or any wall of the extruded prism touches the box.
fn prism_hits_box(view: &ExtrusionView<'_>, camera: &MapCamera, bbox: &PixelBox) -> bool {
    let base = view.footprint(camera);
    let roof = view.roof(camera);
    if polygon_hits_box(&base, bbox) || polygon_hits_box(&roof, bbox) {
        return true;
    }
    let n = base.len();
    (0..n).any(|i| {
        let j = (i + 1) % n;
        polygon_hits_box(&[base[i], base[j], roof[j], roof[i]], bbox)
    })
}

impl MapSurface for MapScene {
    fn pitch(&self) -> f64 {
        self.camera.pitch()
    }

    fn set_pitch(&mut self, pitch: f64) {
        self.camera.set_pitch(pitch);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: FeatureCollection) {
        if self.sources.contains_key(id) {
            tracing::warn!("Source {id} already exists");
            return;
        }
        self.sources
            .insert(id.to_string(), SourceSpec::Geojson { data });
    }

    fn remove_source(&mut self, id: &str) {
        if self.layers.iter().any(|l| l.source == id) {
            tracing::warn!("Source {id} is still used by a layer");
            return;
        }
        if self.sources.remove(id).is_none() {
            tracing::warn!("Cannot remove unknown source {id}");
        }
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        if self.layer(&layer.id).is_some() {
            tracing::warn!("Layer {} already exists", layer.id);
            return;
        }
        if !self.sources.contains_key(&layer.source) {
            tracing::warn!("Layer {} references unknown source {}", layer.id, layer.source);
            return;
        }
        self.layers.push(layer);
    }

    fn remove_layer(&mut self, id: &str) {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() == before {
            tracing::warn!("Cannot remove unknown layer {id}");
        }
    }

    fn set_paint_property(&mut self, layer_id: &str, property: PaintProperty, value: PaintValue) {
        match self.layers.iter_mut().find(|l| l.id == layer_id) {
            Some(layer) => {
                layer.paint.insert(property, value);
            }
            None => tracing::warn!(
                "Cannot set {} on unknown layer {layer_id}",
                property.as_str()
            ),
        }
    }

    fn query_rendered_features(&self, bbox: PixelBox) -> Vec<RenderedFeature> {
        let mut hits: Vec<RenderedFeature> = self
            .extrusions()
            .iter()
            .filter(|e| prism_hits_box(e, &self.camera, &bbox))
            .map(|e| RenderedFeature {
                layer_id: e.layer_id.to_string(),
                source_id: e.source_id.to_string(),
                feature_id: e.feature_id.to_string(),
            })
            .collect();
        hits.reverse();
        hits
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn unproject(&self, point: Vec2) -> LngLat {
        self.camera.unproject(point)
    }

    fn project(&self, point: LngLat) -> Vec2 {
        self.camera.project(point, 0.0)
    }
}
