//! Map painting: ground grid, drawn polygons, extrusions and drawing preview

use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::Vec2;
use shared::LngLat;

use crate::map::{ExtrusionView, MapScene};
use crate::state::AppState;
use crate::viewport::camera::{world_size, MapCamera, TILE_SIZE};

pub const GROUND_COLOR: Color32 = Color32::from_rgb(36, 40, 46);
const GRID_COLOR: Color32 = Color32::from_rgb(50, 55, 62);
pub const DRAWN_COLOR: Color32 = Color32::from_rgb(255, 200, 50);
pub const CAPTURED_COLOR: Color32 = Color32::from_rgb(90, 200, 255);
/// Grid lines drawn on each side of the center
const GRID_HALF_LINES: i32 = 24;

fn to_screen(rect: Rect, p: Vec2) -> Pos2 {
    Pos2::new(rect.min.x + p.x, rect.min.y + p.y)
}

fn project(rect: Rect, camera: &MapCamera, p: LngLat, altitude: f64) -> Pos2 {
    to_screen(rect, camera.project(p, altitude))
}

/// Ring without its closing point
fn open_ring(ring: &[LngLat]) -> &[LngLat] {
    match ring.split_last() {
        Some((last, rest)) if rest.first() == Some(last) => rest,
        _ => ring,
    }
}

/// Lng/lat grid roughly one tile-quarter apart at the current zoom
pub fn draw_grid(painter: &Painter, rect: Rect, camera: &MapCamera) {
    let step = 360.0 * (TILE_SIZE / 4.0) / world_size(camera.zoom);
    let [lng0, lat0] = camera.center;
    let lng0 = (lng0 / step).round() * step;
    let lat0 = (lat0 / step).round() * step;
    let span = step * GRID_HALF_LINES as f64;
    let stroke = Stroke::new(1.0, GRID_COLOR);

    for i in -GRID_HALF_LINES..=GRID_HALF_LINES {
        let lng = lng0 + i as f64 * step;
        painter.line_segment(
            [
                project(rect, camera, [lng, lat0 - span], 0.0),
                project(rect, camera, [lng, lat0 + span], 0.0),
            ],
            stroke,
        );
        let lat = lat0 + i as f64 * step;
        painter.line_segment(
            [
                project(rect, camera, [lng0 - span, lat], 0.0),
                project(rect, camera, [lng0 + span, lat], 0.0),
            ],
            stroke,
        );
    }
}

/// Polygons held by the drawing session, as the active mode displays them
pub fn draw_drawn_features(painter: &Painter, rect: Rect, camera: &MapCamera, state: &AppState) {
    let selected = state.draw.selected();
    for feature in state.display_features() {
        let Some(ring) = feature.outer() else {
            continue;
        };
        let points: Vec<Pos2> = open_ring(ring)
            .iter()
            .map(|p| project(rect, camera, *p, 0.0))
            .collect();
        if points.len() < 3 {
            continue;
        }
        let is_selected = selected == Some(feature.id.as_str());
        let width = if is_selected { 2.5 } else { 1.5 };
        painter.add(egui::Shape::convex_polygon(
            points.clone(),
            DRAWN_COLOR.gamma_multiply(0.15),
            Stroke::new(width, DRAWN_COLOR),
        ));
        if is_selected {
            for p in &points {
                painter.circle_filled(*p, 3.5, DRAWN_COLOR);
            }
        }
    }
}

/// Dashed outline of the polygon captured for extrusion
pub fn draw_captured(painter: &Painter, rect: Rect, camera: &MapCamera, state: &AppState) {
    let Some(ring) = state
        .extrude
        .extruding()
        .and_then(|f| f.geometry.outer())
    else {
        return;
    };
    let mut points: Vec<Pos2> = open_ring(ring)
        .iter()
        .map(|p| project(rect, camera, *p, 0.0))
        .collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    painter.extend(egui::Shape::dashed_line(
        &points,
        Stroke::new(2.0, CAPTURED_COLOR),
        6.0,
        4.0,
    ));
}

/// Extruded buildings, far to near, walls before roofs
pub fn draw_extrusions(painter: &Painter, rect: Rect, camera: &MapCamera, map: &MapScene) {
    let mut views = map.extrusions();
    // Smaller screen y is farther from the viewer
    views.sort_by(|a, b| depth(a, camera).total_cmp(&depth(b, camera)));

    for view in &views {
        draw_extrusion(painter, rect, camera, view);
    }
}

fn depth(view: &ExtrusionView<'_>, camera: &MapCamera) -> f32 {
    let ground = view.outline(camera, 0.0);
    if ground.is_empty() {
        return 0.0;
    }
    ground.iter().map(|p| p.y).sum::<f32>() / ground.len() as f32
}

fn draw_extrusion(painter: &Painter, rect: Rect, camera: &MapCamera, view: &ExtrusionView<'_>) {
    let base = view.footprint(camera);
    let roof = view.roof(camera);
    let n = base.len();
    if n < 3 {
        return;
    }

    let color = parse_color(&view.color).unwrap_or(Color32::WHITE);
    let alpha = (view.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let edge = Stroke::new(1.0, shade(color, 0.45, alpha));

    if view.height > view.base {
        let mut walls: Vec<(f32, usize)> = (0..n)
            .map(|i| (base[i].y + base[(i + 1) % n].y, i))
            .collect();
        walls.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, i) in walls {
            let j = (i + 1) % n;
            let dir = base[j] - base[i];
            // Walls facing screen-right catch more light
            let light = 0.55 + 0.35 * (dir.y.atan2(dir.x).cos().abs());
            let quad = vec![
                to_screen(rect, base[i]),
                to_screen(rect, base[j]),
                to_screen(rect, roof[j]),
                to_screen(rect, roof[i]),
            ];
            painter.add(egui::Shape::convex_polygon(
                quad,
                shade(color, light, alpha),
                edge,
            ));
        }
    }

    let top: Vec<Pos2> = roof.iter().map(|p| to_screen(rect, *p)).collect();
    painter.add(egui::Shape::convex_polygon(top, shade(color, 1.0, alpha), edge));
}

fn shade(color: Color32, factor: f32, alpha: u8) -> Color32 {
    let f = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(f(color.r()), f(color.g()), f(color.b()), alpha)
}

/// In-progress polygon: placed vertices and a rubber band to the pointer
pub fn draw_drawing_preview(
    painter: &Painter,
    rect: Rect,
    camera: &MapCamera,
    state: &AppState,
    hover: Option<Vec2>,
) {
    let vertices = state.draw.drawing();
    if vertices.is_empty() {
        return;
    }
    let mut points: Vec<Pos2> = vertices
        .iter()
        .map(|p| project(rect, camera, *p, 0.0))
        .collect();
    for p in &points {
        painter.circle_filled(*p, 3.0, DRAWN_COLOR);
    }
    if let Some(h) = hover {
        points.push(to_screen(rect, h));
    }
    painter.add(egui::Shape::line(points, Stroke::new(1.5, DRAWN_COLOR)));
}

/// Parse a CSS color name or `#rgb` / `#rrggbb` hex string.
pub fn parse_color(s: &str) -> Option<Color32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        return match hex.len() {
            3 => Some(Color32::from_rgb(
                digit(0, 1)? * 17,
                digit(1, 1)? * 17,
                digit(2, 1)? * 17,
            )),
            6 => Some(Color32::from_rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            _ => None,
        };
    }
    let rgb = match s.to_ascii_lowercase().as_str() {
        "aliceblue" => (240, 248, 255),
        "red" => (255, 0, 0),
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "gray" | "grey" => (128, 128, 128),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "blue" => (0, 0, 255),
        "green" => (0, 128, 0),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "steelblue" => (70, 130, 180),
        _ => return None,
    };
    Some(Color32::from_rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("aliceblue"), Some(Color32::from_rgb(240, 248, 255)));
        assert_eq!(parse_color("Red"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color32::from_rgb(255, 128, 0)));
        assert_eq!(parse_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_open_ring_drops_closing_point() {
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        assert_eq!(open_ring(&ring).len(), 3);
        assert_eq!(open_ring(&ring[..3]).len(), 3);
    }
}
