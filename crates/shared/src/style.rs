//! Описание источников, слоёв и paint-свойств карты.
//!
//! Shapes follow the map-style JSON a vector map engine consumes, so a
//! `LayerSpec` serializes to `{"id": .., "type": "fill-extrusion", ..}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FeatureCollection;

/// Источник данных карты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    Geojson { data: FeatureCollection },
}

impl SourceSpec {
    pub fn data(&self) -> &FeatureCollection {
        match self {
            SourceSpec::Geojson { data } => data,
        }
    }
}

/// Тип слоя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerType {
    Fill,
    FillExtrusion,
    Line,
}

/// Paint-свойство слоя
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintProperty {
    FillExtrusionColor,
    FillExtrusionHeight,
    FillExtrusionBase,
    FillExtrusionOpacity,
}

impl PaintProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaintProperty::FillExtrusionColor => "fill-extrusion-color",
            PaintProperty::FillExtrusionHeight => "fill-extrusion-height",
            PaintProperty::FillExtrusionBase => "fill-extrusion-base",
            PaintProperty::FillExtrusionOpacity => "fill-extrusion-opacity",
        }
    }
}

/// Значение paint-свойства: литерал или выражение `["get", "<prop>"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaintValue {
    Number(f64),
    Text(String),
    Expression(Vec<String>),
}

impl PaintValue {
    /// `["get", property]`: read the value from feature properties.
    pub fn get(property: &str) -> Self {
        PaintValue::Expression(vec!["get".to_string(), property.to_string()])
    }

    pub fn color(color: &str) -> Self {
        PaintValue::Text(color.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PaintValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PaintValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Property name for a `["get", name]` expression.
    pub fn get_property(&self) -> Option<&str> {
        match self {
            PaintValue::Expression(parts) if parts.len() == 2 && parts[0] == "get" => {
                Some(&parts[1])
            }
            _ => None,
        }
    }
}

/// Описание слоя карты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerType,
    pub source: String,
    #[serde(default)]
    pub paint: BTreeMap<PaintProperty, PaintValue>,
}

impl LayerSpec {
    /// Fill-extrusion layer reading color/height/base from feature properties.
    pub fn fill_extrusion(id: &str, opacity: f64) -> Self {
        let paint = BTreeMap::from([
            (PaintProperty::FillExtrusionColor, PaintValue::get("color")),
            (PaintProperty::FillExtrusionHeight, PaintValue::get("height")),
            (PaintProperty::FillExtrusionBase, PaintValue::get("base_height")),
            (PaintProperty::FillExtrusionOpacity, PaintValue::Number(opacity)),
        ]);
        Self {
            id: id.to_string(),
            kind: LayerType::FillExtrusion,
            source: id.to_string(),
            paint,
        }
    }
}

/// Стиль курсора над картой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}
