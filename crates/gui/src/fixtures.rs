//! Factory functions for creating test data.
//!
//! Rings are placed around the default camera center so that, with the default
//! camera, they project into the middle of the viewport.

use shared::{LngLat, Ring};

use crate::draw::FeatureTarget;

/// Default camera center
pub const CENTER: LngLat = [-87.61694, 41.86625];

/// Spacing between [`square_at`] squares, degrees of longitude (~190 px at zoom 16)
pub const SQUARE_SPACING: f64 = 0.002;

/// Closed square ring with the given half-size in degrees.
pub fn square_ring(center: LngLat, half: f64) -> Ring {
    let [x, y] = center;
    vec![
        [x - half, y - half],
        [x + half, y - half],
        [x + half, y + half],
        [x - half, y + half],
        [x - half, y - half],
    ]
}

/// Small square number `index` in a row running east from [`CENTER`].
pub fn square_at(index: usize) -> Ring {
    square_ring(
        [CENTER[0] + index as f64 * SQUARE_SPACING, CENTER[1]],
        0.0003,
    )
}

/// Triangle stored without its closing point: encloses area, only 3 points.
pub fn open_triangle(center: LngLat, half: f64) -> Ring {
    let [x, y] = center;
    vec![[x - half, y - half], [x + half, y - half], [x, y + half]]
}

/// Mean of the ring vertices, closing point excluded.
pub fn centroid(ring: &[LngLat]) -> LngLat {
    let pts = match ring.split_last() {
        Some((last, rest)) if rest.first() == Some(last) => rest,
        _ => ring,
    };
    if pts.is_empty() {
        return CENTER;
    }
    let n = pts.len() as f64;
    let sum = pts
        .iter()
        .fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
    [sum[0] / n, sum[1] / n]
}

/// Feature target for a single-ring drawn polygon.
pub fn target(id: &str, ring: Ring) -> FeatureTarget {
    FeatureTarget {
        id: id.to_string(),
        coordinates: vec![ring],
    }
}
