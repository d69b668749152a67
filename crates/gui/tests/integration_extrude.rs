//! Integration tests for the extrusion workflow through TestHarness.
//!
//! Every test starts from default settings in extrude mode and clicks on
//! polygons at their projected centroid.

use extrude_map_lib::draw::{DrawingSession, ModeName};
use extrude_map_lib::extrude::{ExtrudeError, Extrusion};
use extrude_map_lib::fixtures::{centroid, open_triangle, square_at, CENTER};
use extrude_map_lib::harness::TestHarness;
use extrude_map_lib::state::AppSettings;
use shared::CursorStyle;

#[test]
fn test_short_ring_never_captured() {
    let mut h = TestHarness::new();
    let id = h.add_polygon(open_triangle(CENTER, 0.0004));
    assert!(h.click_feature(&id));
    assert!(h.extruding_id().is_none());

    h.set_height("20");
    assert_eq!(h.apply_height(), Err(ExtrudeError::NoActiveExtrusion));
    assert_eq!(h.layer_count(), 0);
}

#[test]
fn test_capture_keeps_ring_and_marks_id() {
    let mut h = TestHarness::new();
    let ring = square_at(0);
    let id = h.add_polygon(ring.clone());
    h.click_feature(&id);

    let captured = h.state.extrude.extruding().unwrap();
    assert_eq!(captured.id, format!("{id}_source_id"));
    assert_eq!(captured.geometry.outer(), Some(&ring));
}

#[test]
fn test_create_then_update_same_layer() {
    let mut h = TestHarness::new();
    let id = h.add_polygon(square_at(0));

    let first = h.extrude(&id, "150").unwrap();
    assert!(matches!(first, Extrusion::Created(_)));
    assert_eq!(h.layer_count(), 1);
    assert_eq!(h.source_count(), 1);
    assert_eq!(h.height_of(first.id()), Some(150.0));

    let second = h.extrude(&id, "75").unwrap();
    assert_eq!(second, Extrusion::Updated(first.id().to_string()));
    assert_eq!(h.layer_count(), 1);
    assert_eq!(h.source_count(), 1);
    assert_eq!(h.layers(), vec![first.id().to_string()]);
    assert_eq!(h.height_of(first.id()), Some(75.0));
}

#[test]
fn test_height_validation_table() {
    for ok in ["", "0", "42"] {
        let mut h = TestHarness::new();
        let id = h.add_polygon(square_at(0));
        assert!(h.extrude(&id, ok).is_ok(), "{ok:?} should be accepted");
    }
    for bad in ["abc", "-1", "4.2"] {
        let mut h = TestHarness::new();
        let id = h.add_polygon(square_at(0));
        let err = h.extrude(&id, bad).unwrap_err();
        assert!(matches!(err, ExtrudeError::InvalidHeightInput(_)), "{bad:?}");
        assert_eq!(h.layer_count(), 0);
        assert_eq!(h.state.last_error, Some(err));
    }
}

#[test]
fn test_empty_height_extrudes_flat() {
    let mut h = TestHarness::new();
    let id = h.add_polygon(square_at(0));
    let res = h.extrude(&id, "").unwrap();
    assert_eq!(h.height_of(res.id()), Some(0.0));
}

#[test]
fn test_selection_moves_highlight() {
    let mut h = TestHarness::new();
    let a = h.add_polygon(square_at(0));
    let b = h.add_polygon(square_at(1));
    let layer_a = h.extrude(&a, "40").unwrap().id().to_string();
    let layer_b = h.extrude(&b, "60").unwrap().id().to_string();

    h.click_feature(&a);
    assert_eq!(h.selected(), Some(layer_a.as_str()));
    assert_eq!(h.color_of(&layer_a).as_deref(), Some("red"));

    h.click_feature(&b);
    assert_eq!(h.selected(), Some(layer_b.as_str()));
    assert_eq!(h.color_of(&layer_a).as_deref(), Some("aliceblue"));
    assert_eq!(h.color_of(&layer_b).as_deref(), Some("red"));

    let version = h.state.extrude.selection_version();
    h.click_feature(&b);
    assert_eq!(h.state.extrude.selection_version(), version);
    assert_eq!(h.color_of(&layer_b).as_deref(), Some("red"));
}

#[test]
fn test_empty_click_resets_every_layer() {
    let mut h = TestHarness::new();
    let a = h.add_polygon(square_at(0));
    let b = h.add_polygon(square_at(1));
    let layer_a = h.extrude(&a, "40").unwrap().id().to_string();
    let layer_b = h.extrude(&b, "60").unwrap().id().to_string();
    h.click_feature(&a);

    h.click_empty();
    assert!(h.selected().is_none());
    assert_eq!(h.color_of(&layer_a).as_deref(), Some("aliceblue"));
    assert_eq!(h.color_of(&layer_b).as_deref(), Some("aliceblue"));
}

#[test]
fn test_delete_selected_layer_only() {
    let mut h = TestHarness::new();
    let a = h.add_polygon(square_at(0));
    let b = h.add_polygon(square_at(1));
    let layer_a = h.extrude(&a, "40").unwrap().id().to_string();
    let layer_b = h.extrude(&b, "60").unwrap().id().to_string();

    h.click_feature(&a);
    assert_eq!(h.delete_layer(), Ok(layer_a.clone()));
    assert_eq!(h.layers(), vec![layer_b]);
    assert_eq!(h.layer_count(), 1);
    assert_eq!(h.source_count(), 1);
    assert!(h.selected().is_none());

    assert_eq!(h.delete_layer(), Err(ExtrudeError::NoSelectedLayer));
    assert_eq!(h.layer_count(), 1);
}

#[test]
fn test_pitch_raised_only_when_low() {
    let mut low = AppSettings::default();
    low.map.pitch = 10.0;
    let mut h = TestHarness::with_settings(low);
    let id = h.add_polygon(square_at(0));
    h.extrude(&id, "10").unwrap();
    assert_eq!(h.pitch(), 30.0);

    let mut high = AppSettings::default();
    high.map.pitch = 50.0;
    let mut h = TestHarness::with_settings(high);
    let id = h.add_polygon(square_at(0));
    h.extrude(&id, "10").unwrap();
    assert_eq!(h.pitch(), 50.0);
}

#[test]
fn test_mode_switches_cursor_and_capture() {
    let mut h = TestHarness::new();
    let id = h.add_polygon(square_at(0));
    h.click_feature(&id);
    assert!(h.extruding_id().is_some());
    assert_eq!(h.state.map.cursor(), CursorStyle::Pointer);

    h.change_mode(ModeName::DrawPolygon);
    assert_eq!(h.mode(), ModeName::DrawPolygon);
    assert_eq!(h.state.map.cursor(), CursorStyle::Default);
    assert!(h.extruding_id().is_none());

    h.change_mode(ModeName::Extrude);
    h.click_feature(&id);
    h.trash();
    assert_eq!(h.mode(), ModeName::Extrude);
    assert!(h.extruding_id().is_none());
    assert_eq!(h.state.map.cursor(), CursorStyle::Default);
}

#[test]
fn test_drawn_polygon_extrudes() {
    let mut h = TestHarness::new();
    let drawn = h.draw_polygon(&square_at(2)[..4]).unwrap();
    let res = h.extrude(&drawn, "90").unwrap();
    assert_eq!(res.id(), format!("{drawn}_source_id"));
    assert_eq!(h.height_of(res.id()), Some(90.0));
}

#[test]
fn test_wall_click_moves_selection() {
    let mut h = TestHarness::new();
    let a = h.add_polygon(square_at(0));
    let b = h.add_polygon(square_at(1));
    let layer_a = h.extrude(&a, "300").unwrap().id().to_string();
    let layer_b = h.extrude(&b, "300").unwrap().id().to_string();
    h.click_feature(&a);
    assert_eq!(h.selected(), Some(layer_a.as_str()));

    // Halfway up B: above its footprint, below its roof
    let wall = h.state.map.camera.project(centroid(&square_at(1)), 150.0);
    assert!(h.state.draw.feature_at(&h.state.map, wall).is_none());
    h.click(wall);

    assert_eq!(h.selected(), Some(layer_b.as_str()));
    assert_eq!(h.extruding_id(), Some(layer_b.as_str()));
    assert_eq!(h.color_of(&layer_a).as_deref(), Some("aliceblue"));
    assert_eq!(h.color_of(&layer_b).as_deref(), Some("red"));
}

#[test]
fn test_broken_pitch_limit_in_settings() {
    let settings: AppSettings =
        serde_json::from_str(r#"{"map": {"max_pitch": -1.0}}"#).unwrap();
    let mut h = TestHarness::with_settings(settings);
    assert_eq!(h.pitch(), 0.0);

    let id = h.add_polygon(square_at(0));
    assert!(h.extrude(&id, "25").is_ok());
    assert_eq!(h.pitch(), 0.0);
}

#[test]
fn test_trash_in_extrude_mode_keeps_drawn_polygons() {
    let mut h = TestHarness::new();
    h.draw_polygon(&square_at(0)[..4]).unwrap();
    assert_eq!(h.mode(), ModeName::SimpleSelect);

    h.change_mode(ModeName::Extrude);
    h.trash();
    assert_eq!(h.drawn_count(), 1);
}
