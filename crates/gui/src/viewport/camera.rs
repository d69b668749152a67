//! Map camera: planar Web Mercator projection with bearing and pitch.
//!
//! This is a flat approximation of a perspective map camera. Ground points are
//! rotated by the bearing and foreshortened by `cos(pitch)`; extrusion heights
//! are lifted by `sin(pitch)`. Good enough for hit-testing and a readable
//! oblique view, not a replacement for a real map renderer.

use glam::{DVec2, Vec2};
use shared::LngLat;

/// Tile size used for the world pixel space at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
const MAX_LATITUDE: f64 = 85.051_128_78;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;
/// Steepest tilt a settings file may ask for, degrees
pub const PITCH_LIMIT: f64 = 85.0;
const DEFAULT_MAX_PITCH: f64 = 60.0;

/// World size in pixels at the given zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Longitude/latitude to world pixels (origin top-left, y down).
pub fn lnglat_to_world(p: LngLat, world: f64) -> DVec2 {
    let lat = p[1].clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p[0] + 180.0) / 360.0 * world;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
    DVec2::new(x, y)
}

/// Inverse of [`lnglat_to_world`].
pub fn world_to_lnglat(w: DVec2, world: f64) -> LngLat {
    let lng = w.x / world * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * w.y / world);
    let lat = n.sinh().atan().to_degrees();
    [lng, lat]
}

/// Camera over a map viewport
#[derive(Clone, Debug)]
pub struct MapCamera {
    pub center: LngLat,
    pub zoom: f64,
    /// Tilt from straight-down, degrees
    pitch: f64,
    /// Rotation of north away from screen-up, degrees
    pub bearing: f64,
    pub max_pitch: f64,
    /// Viewport size in logical pixels
    pub viewport: Vec2,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: [-87.61694, 41.86625],
            zoom: 15.99,
            pitch: 40.0,
            bearing: 20.0,
            max_pitch: DEFAULT_MAX_PITCH,
            viewport: Vec2::new(1024.0, 768.0),
        }
    }
}

impl MapCamera {
    /// Out-of-range or non-finite values from settings fall back to defaults.
    pub fn new(center: LngLat, zoom: f64, pitch: f64, bearing: f64, max_pitch: f64) -> Self {
        let defaults = Self::default();
        let mut camera = Self {
            center: if center.iter().all(|c| c.is_finite()) {
                center
            } else {
                defaults.center
            },
            zoom: if zoom.is_finite() {
                zoom.clamp(MIN_ZOOM, MAX_ZOOM)
            } else {
                defaults.zoom
            },
            pitch: 0.0,
            bearing: if bearing.is_finite() { bearing } else { defaults.bearing },
            max_pitch: if max_pitch.is_finite() {
                max_pitch.clamp(0.0, PITCH_LIMIT)
            } else {
                DEFAULT_MAX_PITCH
            },
            ..defaults
        };
        camera.set_pitch(pitch);
        camera
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Clamp into `[0, max_pitch]`; a NaN request leaves the pitch unchanged.
    pub fn set_pitch(&mut self, pitch: f64) {
        if pitch.is_nan() {
            return;
        }
        // max_pitch is public and may be negative, where clamp would panic
        self.pitch = pitch.min(self.max_pitch).max(0.0);
    }

    fn world(&self) -> f64 {
        world_size(self.zoom)
    }

    fn center_world(&self) -> DVec2 {
        lnglat_to_world(self.center, self.world())
    }

    /// Screen pixels per meter at the camera center latitude.
    pub fn pixels_per_meter(&self) -> f64 {
        let meters_per_pixel =
            EARTH_CIRCUMFERENCE_M * self.center[1].to_radians().cos() / self.world();
        1.0 / meters_per_pixel
    }

    /// Project a ground point lifted by `altitude` meters into viewport pixels.
    pub fn project(&self, p: LngLat, altitude: f64) -> Vec2 {
        let d = lnglat_to_world(p, self.world()) - self.center_world();
        let (sin_b, cos_b) = self.bearing.to_radians().sin_cos();
        let (sin_p, cos_p) = self.pitch.to_radians().sin_cos();

        let x = d.x * cos_b + d.y * sin_b;
        let y = (-d.x * sin_b + d.y * cos_b) * cos_p - altitude * self.pixels_per_meter() * sin_p;

        let half = self.viewport / 2.0;
        Vec2::new(half.x + x as f32, half.y + y as f32)
    }

    /// Ground point under a viewport pixel.
    pub fn unproject(&self, screen: Vec2) -> LngLat {
        let half = self.viewport / 2.0;
        let rx = (screen.x - half.x) as f64;
        let ry = (screen.y - half.y) as f64 / self.pitch.to_radians().cos();
        let (sin_b, cos_b) = self.bearing.to_radians().sin_cos();

        let d = DVec2::new(rx * cos_b - ry * sin_b, rx * sin_b + ry * cos_b);
        world_to_lnglat(self.center_world() + d, self.world())
    }

    /// Drag the map by a pixel delta so the content follows the pointer.
    pub fn pan(&mut self, delta: Vec2) {
        let dx = delta.x as f64;
        let dy = delta.y as f64 / self.pitch.to_radians().cos();
        let (sin_b, cos_b) = self.bearing.to_radians().sin_cos();
        let d = DVec2::new(dx * cos_b - dy * sin_b, dx * sin_b + dy * cos_b);
        self.center = world_to_lnglat(self.center_world() - d, self.world());
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn rotate(&mut self, degrees: f64) {
        let mut b = (self.bearing + degrees) % 360.0;
        if b > 180.0 {
            b -= 360.0;
        } else if b <= -180.0 {
            b += 360.0;
        }
        self.bearing = b;
    }

    pub fn tilt(&mut self, degrees: f64) {
        self.set_pitch(self.pitch + degrees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: LngLat, b: LngLat) -> bool {
        (a[0] - b[0]).abs() < 1e-7 && (a[1] - b[1]).abs() < 1e-7
    }

    #[test]
    fn test_center_projects_to_viewport_center() {
        let cam = MapCamera::default();
        let p = cam.project(cam.center, 0.0);
        assert!((p - cam.viewport / 2.0).length() < 1e-3);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let world = world_size(3.0);
        let p = [12.5, -33.25];
        assert!(approx(world_to_lnglat(lnglat_to_world(p, world), world), p));
    }

    #[test]
    fn test_unproject_inverts_project() {
        for (pitch, bearing) in [(0.0, 0.0), (40.0, 20.0), (60.0, -135.0)] {
            let cam = MapCamera::new([-87.61694, 41.86625], 16.0, pitch, bearing, 60.0);
            let p = [-87.6165, 41.8665];
            let back = cam.unproject(cam.project(p, 0.0));
            assert!(approx(back, p), "pitch={pitch} bearing={bearing}: {back:?}");
        }
    }

    #[test]
    fn test_altitude_lifts_only_when_pitched() {
        let mut cam = MapCamera::default();
        cam.set_pitch(0.0);
        let ground = cam.project(cam.center, 0.0);
        let roof = cam.project(cam.center, 100.0);
        assert!((ground - roof).length() < 1e-3);

        cam.set_pitch(45.0);
        let roof = cam.project(cam.center, 100.0);
        assert!(roof.y < ground.y);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = MapCamera::default();
        cam.set_pitch(85.0);
        assert_eq!(cam.pitch(), 60.0);
        cam.tilt(-100.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn test_bad_limits_fall_back() {
        let cam = MapCamera::new([-87.6, 41.8], f64::NAN, 40.0, 20.0, -1.0);
        assert_eq!(cam.max_pitch, 0.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.zoom, MapCamera::default().zoom);

        let cam = MapCamera::new([f64::NAN, 41.8], 16.0, 40.0, f64::INFINITY, f64::NAN);
        assert_eq!(cam.max_pitch, 60.0);
        assert_eq!(cam.pitch(), 40.0);
        assert_eq!(cam.center, MapCamera::default().center);
        assert_eq!(cam.bearing, 20.0);

        let cam = MapCamera::new([-87.6, 41.8], 16.0, 89.0, 0.0, 120.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn test_set_pitch_survives_negative_limit() {
        let mut cam = MapCamera::default();
        cam.max_pitch = -5.0;
        cam.set_pitch(30.0);
        assert_eq!(cam.pitch(), 0.0);
        cam.max_pitch = 60.0;
        cam.set_pitch(f64::NAN);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn test_rotate_wraps() {
        let mut cam = MapCamera::default();
        cam.bearing = 170.0;
        cam.rotate(20.0);
        assert!((cam.bearing - -170.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_content_with_pointer() {
        let mut cam = MapCamera::default();
        let p = [-87.6165, 41.8665];
        let before = cam.project(p, 0.0);
        cam.pan(Vec2::new(30.0, -12.0));
        let after = cam.project(p, 0.0);
        assert!((after - before - Vec2::new(30.0, -12.0)).length() < 1e-2);
    }
}
