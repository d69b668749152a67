//! Integration tests for the MapCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use extrude_map_lib::command::{execute_json, execute_json_batch};
use extrude_map_lib::fixtures::{centroid, square_at};
use extrude_map_lib::harness::TestHarness;

fn square_json(index: usize) -> String {
    serde_json::to_string(&square_at(index)).unwrap()
}

fn click_json(index: usize) -> String {
    let [lng, lat] = centroid(&square_at(index));
    format!(r#"{{"command": "click_lng_lat", "lng": {lng}, "lat": {lat}}}"#)
}

#[test]
fn test_command_draw_polygon() {
    let mut h = TestHarness::new();
    let json = format!(
        r#"{{"command": "draw_polygon", "coordinates": {}}}"#,
        square_json(0)
    );
    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success);
    assert!(resp.data.unwrap()["id"].as_str().is_some());
    assert_eq!(h.drawn_count(), 1);
}

#[test]
fn test_command_extrude_pipeline() {
    let mut h = TestHarness::new();
    let batch = format!(
        r#"[
            {{"command": "draw_polygon", "coordinates": {}}},
            {},
            {{"command": "set_height", "value": "150"}},
            {{"command": "extrude"}},
            {{"command": "inspect"}}
        ]"#,
        square_json(0),
        click_json(0)
    );

    let results = execute_json_batch(&mut h, &batch).unwrap();
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.success));

    let drawn_id = results[0].data.as_ref().unwrap()["id"].as_str().unwrap();
    let layer_id = format!("{drawn_id}_source_id");
    assert_eq!(
        results[1].data.as_ref().unwrap()["extruding"],
        layer_id.as_str()
    );
    assert_eq!(results[3].data.as_ref().unwrap()["created"], true);

    let inspect = results[4].data.as_ref().unwrap();
    assert_eq!(inspect["layer_count"], 1);
    assert_eq!(inspect["layers"][0]["id"], layer_id.as_str());
    assert_eq!(inspect["layers"][0]["height"], 150.0);
}

#[test]
fn test_command_reextrude_updates() {
    let mut h = TestHarness::new();
    let batch = format!(
        r#"[
            {{"command": "draw_polygon", "coordinates": {ring}}},
            {click},
            {{"command": "set_height", "value": "10"}},
            {{"command": "extrude"}},
            {click},
            {{"command": "set_height", "value": "20"}},
            {{"command": "extrude"}}
        ]"#,
        ring = square_json(0),
        click = click_json(0)
    );

    let results = execute_json_batch(&mut h, &batch).unwrap();
    assert_eq!(results[3].data.as_ref().unwrap()["created"], true);
    assert_eq!(results[6].data.as_ref().unwrap()["created"], false);
    assert_eq!(h.layer_count(), 1);
    assert_eq!(h.height_of(&h.layers()[0]), Some(20.0));
}

#[test]
fn test_command_invalid_height_rejected() {
    let mut h = TestHarness::new();
    let batch = format!(
        r#"[
            {{"command": "draw_polygon", "coordinates": {}}},
            {},
            {{"command": "set_height", "value": "-1"}},
            {{"command": "extrude"}}
        ]"#,
        square_json(0),
        click_json(0)
    );

    let results = execute_json_batch(&mut h, &batch).unwrap();
    assert_eq!(results[2].data.as_ref().unwrap()["valid"], false);
    assert!(!results[3].success);
    assert!(results[3].error.as_ref().unwrap().contains("digits only"));
    assert_eq!(h.layer_count(), 0);
}

#[test]
fn test_command_delete_layer() {
    let mut h = TestHarness::new();
    let batch = format!(
        r#"[
            {{"command": "draw_polygon", "coordinates": {ring}}},
            {click},
            {{"command": "extrude"}},
            {click},
            {{"command": "delete_layer"}},
            {{"command": "delete_layer"}}
        ]"#,
        ring = square_json(0),
        click = click_json(0)
    );

    let results = execute_json_batch(&mut h, &batch).unwrap();
    assert!(results[2].success);
    assert!(results[4].success);
    assert!(results[4].data.as_ref().unwrap()["removed"]
        .as_str()
        .unwrap()
        .ends_with("_source_id"));
    assert!(!results[5].success);
    assert_eq!(h.layer_count(), 0);
    assert_eq!(h.source_count(), 0);
}

#[test]
fn test_command_change_mode_and_trash() {
    let mut h = TestHarness::new();
    let results = execute_json_batch(
        &mut h,
        r#"[
            {"command": "change_mode", "mode": "simple_select"},
            {"command": "trash"},
            {"command": "change_mode", "mode": "extrudeMode"}
        ]"#,
    )
    .unwrap();
    assert_eq!(results[0].data.as_ref().unwrap()["mode"], "simple_select");
    assert!(results[1].success);
    assert_eq!(results[2].data.as_ref().unwrap()["mode"], "extrudeMode");
}

#[test]
fn test_command_export_layers() {
    let mut h = TestHarness::new();
    let batch = format!(
        r#"[
            {{"command": "draw_polygon", "coordinates": {}}},
            {},
            {{"command": "extrude"}},
            {{"command": "export_layers"}}
        ]"#,
        square_json(0),
        click_json(0)
    );

    let results = execute_json_batch(&mut h, &batch).unwrap();
    let json = results[3].data.as_ref().unwrap()["layers_json"]
        .as_str()
        .unwrap()
        .to_string();
    let layers: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(layers[0]["type"], "fill-extrusion");
    assert_eq!(layers[0]["paint"]["fill-extrusion-opacity"], 0.7);
    assert_eq!(
        layers[0]["paint"]["fill-extrusion-height"],
        serde_json::json!(["get", "height"])
    );
}

#[test]
fn test_command_unknown_rejected() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "fly_to"}"#).is_err());
    assert!(execute_json_batch(&mut h, r#"{"command": "inspect"}"#).is_err());
}
