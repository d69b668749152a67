//! JSON command protocol for scripting the map.
//!
//! Each command drives the same [`TestHarness`] API a test would use, so a
//! recorded session can be replayed headlessly.

use serde::{Deserialize, Serialize};
use shared::LngLat;

use crate::draw::{DrawingSession, ModeName};
use crate::harness::TestHarness;

/// A command executed against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    /// Add a drawn polygon (ring stored as given)
    DrawPolygon { coordinates: Vec<LngLat> },
    /// Click a viewport pixel
    Click { x: f32, y: f32 },
    /// Click the pixel over a ground coordinate
    ClickLngLat { lng: f64, lat: f64 },
    /// Type into the height field.
    SetHeight { value: String },
    /// Apply the height field to the captured polygon.
    Extrude,
    /// Delete the selected extrusion.
    DeleteLayer,
    ChangeMode { mode: ModeName },
    Trash,
    /// List drawn polygons, extrusion layers and selection.
    Inspect,
    /// Export map layers as style JSON.
    ExportLayers,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: MapCommand) -> CommandResponse {
    match cmd {
        MapCommand::DrawPolygon { coordinates } => {
            let id = harness.add_polygon(coordinates);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        MapCommand::Click { x, y } => {
            harness.click(glam::Vec2::new(x, y));
            CommandResponse::ok_with_data(serde_json::json!({
                "extruding": harness.extruding_id(),
                "selected": harness.selected(),
            }))
        }

        MapCommand::ClickLngLat { lng, lat } => {
            harness.click_lng_lat([lng, lat]);
            CommandResponse::ok_with_data(serde_json::json!({
                "extruding": harness.extruding_id(),
                "selected": harness.selected(),
            }))
        }

        MapCommand::SetHeight { value } => {
            harness.set_height(&value);
            CommandResponse::ok_with_data(serde_json::json!({
                "valid": harness.state.form.is_valid(),
            }))
        }

        MapCommand::Extrude => match harness.apply_height() {
            Ok(extrusion) => CommandResponse::ok_with_data(serde_json::json!({
                "id": extrusion.id(),
                "created": matches!(extrusion, crate::extrude::Extrusion::Created(_)),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        MapCommand::DeleteLayer => match harness.delete_layer() {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "removed": id })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        MapCommand::ChangeMode { mode } => {
            harness.change_mode(mode);
            CommandResponse::ok_with_data(serde_json::json!({ "mode": harness.mode() }))
        }

        MapCommand::Trash => {
            harness.trash();
            CommandResponse::ok()
        }

        MapCommand::Inspect => {
            let drawn: Vec<&str> = harness
                .state
                .draw
                .features()
                .iter()
                .map(|f| f.id.as_str())
                .collect();
            let layers: Vec<serde_json::Value> = harness
                .layers()
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "height": harness.height_of(id),
                        "color": harness.color_of(id),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": harness.mode(),
                "drawn": drawn,
                "layer_count": layers.len(),
                "layers": layers,
                "selected": harness.selected(),
                "extruding": harness.extruding_id(),
                "pitch": harness.pitch(),
            }))
        }

        MapCommand::ExportLayers => {
            let json = harness.export_layers_json();
            CommandResponse::ok_with_data(serde_json::json!({ "layers_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: MapCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<MapCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
