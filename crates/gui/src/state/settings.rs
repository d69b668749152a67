//! Application settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::LngLat;

use crate::viewport::camera::MapCamera;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// Initial map camera
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// `[lng, lat]`
    pub center: LngLat,
    pub zoom: f64,
    /// Degrees
    pub pitch: f64,
    /// Degrees
    pub bearing: f64,
    pub max_pitch: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: [-87.61694, 41.86625],
            zoom: 15.99,
            pitch: 40.0,
            bearing: 20.0,
            max_pitch: 60.0,
        }
    }
}

impl MapSettings {
    pub fn camera(&self) -> MapCamera {
        MapCamera::new(self.center, self.zoom, self.pitch, self.bearing, self.max_pitch)
    }
}

/// Extrusion look and interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionSettings {
    /// Color of unselected extrusions
    pub default_color: String,
    /// Color of the selected extrusion
    pub highlight_color: String,
    pub opacity: f64,
    /// Height of a freshly captured polygon, meters
    pub default_height: f64,
    pub base_height: f64,
    /// Camera pitch forced when applying a height, degrees
    pub min_pitch: f64,
    /// Half-size of the click query box, pixels
    pub query_margin: f32,
}

impl Default for ExtrusionSettings {
    fn default() -> Self {
        Self {
            default_color: "aliceblue".to_string(),
            highlight_color: "red".to_string(),
            opacity: 0.7,
            default_height: 150.0,
            base_height: 0.0,
            min_pitch: 30.0,
            query_margin: 5.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub map: MapSettings,
    pub extrusion: ExtrusionSettings,
    pub ui: UiSettings,
}

impl AppSettings {
    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "extrude-map", "extrude-map")
    }

    /// Load settings from the user config dir, or defaults if missing or broken
    pub fn load() -> Self {
        if let Some(dirs) = Self::project_dirs() {
            let config_path = dirs.config_dir().join("settings.json");
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("{e}; using default settings"),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))
    }

    /// Save settings to the user config dir
    pub fn save(&self) {
        if let Some(dirs) = Self::project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                match serde_json::to_string_pretty(self) {
                    Ok(json) => {
                        if let Err(e) = std::fs::write(&config_path, json) {
                            tracing::warn!("Failed to save settings: {e}");
                        }
                    }
                    Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
                }
            }
        }
    }
}
