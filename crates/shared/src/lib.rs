use serde::{Deserialize, Serialize};

pub mod style;

pub use style::{CursorStyle, LayerSpec, LayerType, PaintProperty, PaintValue, SourceSpec};

/// Идентификатор нарисованного объекта, источника или слоя
pub type FeatureId = String;

/// Координата `[долгота, широта]` в градусах
pub type LngLat = [f64; 2];

/// Кольцо полигона (замкнутое: последняя точка совпадает с первой)
pub type Ring = Vec<LngLat>;

/// Суффикс, которым помечаются источники и слои выдавливания
pub const EXTRUSION_MARKER: &str = "_source_id";

/// Минимальное число точек внешнего кольца, включая замыкающую
pub const MIN_RING_POINTS: usize = 4;

/// Build the source/layer id of an extrusion from the drawn feature id.
pub fn extrusion_id(drawn_id: &str) -> FeatureId {
    format!("{drawn_id}{EXTRUSION_MARKER}")
}

/// True for ids produced by [`extrusion_id`].
pub fn is_extrusion_id(id: &str) -> bool {
    id.contains(EXTRUSION_MARKER)
}

/// Drawn feature id behind an extrusion id, if it carries the marker suffix.
pub fn drawn_id(extrusion_id: &str) -> Option<&str> {
    extrusion_id.strip_suffix(EXTRUSION_MARKER)
}

/// Геометрия полигона в формате GeoJSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Polygon")]
pub struct Polygon {
    pub coordinates: Vec<Ring>,
}

impl Polygon {
    pub fn new(coordinates: Vec<Ring>) -> Self {
        Self { coordinates }
    }

    /// Внешнее кольцо (первое)
    pub fn outer(&self) -> Option<&Ring> {
        self.coordinates.first()
    }

    /// Number of points in the outer ring, closing point included.
    pub fn outer_len(&self) -> usize {
        self.outer().map(Vec::len).unwrap_or(0)
    }

    /// Whether the outer ring is long enough to be extruded.
    pub fn is_extrudable(&self) -> bool {
        self.outer_len() >= MIN_RING_POINTS
    }
}

/// Close a ring by repeating its first point, unless it is already closed.
pub fn close_ring(mut ring: Ring) -> Ring {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}

/// Свойства выдавливаемого полигона
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionProperties {
    pub level: i32,
    pub name: String,
    /// Высота крыши, м
    pub height: f64,
    /// Высота основания, м
    pub base_height: f64,
    pub color: String,
}

impl Default for ExtrusionProperties {
    fn default() -> Self {
        Self {
            level: 1,
            name: "extrudingPolygon".to_string(),
            height: 150.0,
            base_height: 0.0,
            color: "aliceblue".to_string(),
        }
    }
}

/// GeoJSON Feature с полигональной геометрией
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub id: FeatureId,
    pub properties: ExtrusionProperties,
    pub geometry: Polygon,
}

/// GeoJSON FeatureCollection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn single(feature: Feature) -> Self {
        Self {
            features: vec![feature],
        }
    }

    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut Feature> {
        self.features.first_mut()
    }
}
