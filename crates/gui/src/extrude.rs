//! Extrusion workflow: the `extrudeMode` draw mode and the commands around it.
//!
//! Clicking a drawn polygon in extrude mode captures it as the extruding
//! feature. Applying a height then either creates a `fill-extrusion` layer for
//! it or updates the height of the existing one. Clicking an existing
//! extrusion highlights it so it can be deleted.

use shared::{
    extrusion_id, is_extrusion_id, CursorStyle, ExtrusionProperties, Feature, FeatureCollection,
    LayerSpec, PaintProperty, PaintValue, Polygon,
};

use crate::draw::{
    DrawMode, DrawingSession, FeatureTarget, ModeName, ModeOptions, ModeState, PointerEvent,
};
use crate::map::{MapSurface, PixelBox};
use crate::state::height_form::HeightForm;
use crate::state::layers::LayerRegistry;
use crate::state::selection::LayerSelection;
use crate::state::settings::ExtrusionSettings;
use crate::validation::HeightInputError;

/// Why an extrusion command did nothing
#[derive(Debug, Clone, PartialEq)]
pub enum ExtrudeError {
    /// Height field failed the digits-only rule
    InvalidHeightInput(HeightInputError),
    /// No polygon has been captured in extrude mode
    NoActiveExtrusion,
    /// Delete requested with no extrusion selected
    NoSelectedLayer,
}

impl std::fmt::Display for ExtrudeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtrudeError::InvalidHeightInput(e) => write!(f, "Invalid height: {e}"),
            ExtrudeError::NoActiveExtrusion => write!(f, "No polygon selected for extrusion"),
            ExtrudeError::NoSelectedLayer => write!(f, "No extrusion selected"),
        }
    }
}

impl std::error::Error for ExtrudeError {}

impl From<HeightInputError> for ExtrudeError {
    fn from(e: HeightInputError) -> Self {
        ExtrudeError::InvalidHeightInput(e)
    }
}

/// Result of applying a height
#[derive(Debug, Clone, PartialEq)]
pub enum Extrusion {
    /// New source and layer registered
    Created(String),
    /// Height paint property of an existing layer changed
    Updated(String),
}

impl Extrusion {
    pub fn id(&self) -> &str {
        match self {
            Extrusion::Created(id) | Extrusion::Updated(id) => id,
        }
    }
}

/// Owns the extruding feature, the extrusion layers and their selection
pub struct ExtrudeController {
    extruding: Option<FeatureCollection>,
    layers: LayerRegistry,
    selection: LayerSelection,
    style: ExtrusionSettings,
}

impl Default for ExtrudeController {
    fn default() -> Self {
        Self::new(ExtrusionSettings::default())
    }
}

impl ExtrudeController {
    pub fn new(style: ExtrusionSettings) -> Self {
        Self {
            extruding: None,
            layers: LayerRegistry::default(),
            selection: LayerSelection::default(),
            style,
        }
    }

    /// Polygon captured for extrusion, if any
    pub fn extruding(&self) -> Option<&Feature> {
        self.extruding.as_ref().and_then(FeatureCollection::first)
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.get()
    }

    pub fn selection_version(&self) -> u64 {
        self.selection.version
    }

    fn extruding_area(&self, geometry: Polygon, id: String) -> FeatureCollection {
        FeatureCollection::single(Feature {
            id,
            properties: ExtrusionProperties {
                height: self.style.default_height,
                base_height: self.style.base_height,
                color: self.style.default_color.clone(),
                ..ExtrusionProperties::default()
            },
            geometry,
        })
    }

    fn set_color(&self, map: &mut dyn MapSurface, layer_id: &str, color: &str) {
        map.set_paint_property(
            layer_id,
            PaintProperty::FillExtrusionColor,
            PaintValue::color(color),
        );
    }

    /// Clicking away from every extrusion resets all highlights.
    fn dim_selection(&mut self, map: &mut dyn MapSurface, event: &PointerEvent) {
        let bbox = PixelBox::around(event.point, self.style.query_margin);
        let hit_extrusion = map
            .query_rendered_features(bbox)
            .iter()
            .any(|f| is_extrusion_id(&f.layer_id));

        if !hit_extrusion {
            for id in self.layers.iter() {
                self.set_color(map, id, &self.style.default_color);
            }
            self.selection.clear();
        }
    }

    fn capture(&mut self, target: &FeatureTarget) -> String {
        let id = extrusion_id(&target.id);
        let geometry = Polygon::new(target.coordinates.clone());
        if geometry.is_extrudable() {
            self.extruding = Some(self.extruding_area(geometry, id.clone()));
            tracing::debug!("Captured polygon {id} for extrusion");
        } else {
            tracing::debug!("Ignoring ring with {} points", geometry.outer_len());
        }
        id
    }

    fn highlight(&mut self, map: &mut dyn MapSurface, id: &str) {
        if !map.has_source(id) || self.selection.is_selected(id) {
            return;
        }
        if let Some(prev) = self.selection.select(id.to_string()) {
            self.set_color(map, &prev, &self.style.default_color);
        }
        self.set_color(map, id, &self.style.highlight_color);
    }

    /// Apply the form height to the captured polygon.
    pub fn extrude_polygon(
        &mut self,
        map: &mut dyn MapSurface,
        form: &HeightForm,
    ) -> Result<Extrusion, ExtrudeError> {
        let height = form.height()?;

        let feature = self
            .extruding
            .as_mut()
            .and_then(FeatureCollection::first_mut)
            .ok_or(ExtrudeError::NoActiveExtrusion)?;
        feature.properties.height = height;
        let id = feature.id.clone();

        if map.pitch() < self.style.min_pitch {
            map.set_pitch(self.style.min_pitch);
        }

        if map.has_source(&id) {
            map.set_paint_property(
                &id,
                PaintProperty::FillExtrusionHeight,
                PaintValue::Number(height),
            );
            tracing::info!("Updated extrusion {id} to {height} m");
            return Ok(Extrusion::Updated(id));
        }

        let data = self
            .extruding
            .clone()
            .ok_or(ExtrudeError::NoActiveExtrusion)?;
        map.add_source(&id, data);
        map.add_layer(LayerSpec::fill_extrusion(&id, self.style.opacity));
        self.layers.push(id.clone());
        tracing::info!("Added extrusion {id} at {height} m");
        Ok(Extrusion::Created(id))
    }

    /// Remove the selected extrusion layer and its source.
    pub fn delete_layer(&mut self, map: &mut dyn MapSurface) -> Result<String, ExtrudeError> {
        let id = self.selection.clear().ok_or(ExtrudeError::NoSelectedLayer)?;
        map.remove_layer(&id);
        map.remove_source(&id);
        self.layers.remove(&id);
        tracing::info!("Deleted extrusion {id}");
        Ok(id)
    }

    pub fn extrude_mode(
        &mut self,
        session: &mut dyn DrawingSession,
        map: &mut dyn MapSurface,
    ) -> ModeState {
        session.change_mode(ModeName::Extrude);
        map.set_cursor(CursorStyle::Pointer);
        self.on_setup(&ModeOptions::default())
    }

    pub fn line_mode(&mut self, session: &mut dyn DrawingSession, map: &mut dyn MapSurface) {
        session.change_mode(ModeName::DrawPolygon);
        self.set_default_cursor(map);
    }

    pub fn free_mode(&mut self, session: &mut dyn DrawingSession, map: &mut dyn MapSurface) {
        session.change_mode(ModeName::SimpleSelect);
        self.set_default_cursor(map);
    }

    pub fn trash_mode(&mut self, session: &mut dyn DrawingSession, map: &mut dyn MapSurface) {
        session.trash();
        self.set_default_cursor(map);
    }

    fn set_default_cursor(&mut self, map: &mut dyn MapSurface) {
        map.set_cursor(CursorStyle::Default);
        self.extruding = None;
    }
}

impl DrawMode for ExtrudeController {
    fn on_setup(&mut self, options: &ModeOptions) -> ModeState {
        ModeState {
            count: options.count.unwrap_or(0),
        }
    }

    fn on_click(&mut self, map: &mut dyn MapSurface, _state: &mut ModeState, event: &PointerEvent) {
        self.dim_selection(map, event);

        if let Some(target) = &event.feature_target {
            let id = self.capture(target);
            self.highlight(map, &id);
        }
    }
}
