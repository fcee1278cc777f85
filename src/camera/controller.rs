use glam::{Quat, Vec2, Vec3};

use crate::camera::core::{Camera, CameraUniform};
use crate::options::CameraOptions;
use crate::render::scene::Bounds;

/// Closest the eye may get to the focus point.
const MIN_DISTANCE: f32 = 1.0;
/// Farthest zoom-out, as a multiple of the framed distance.
const MAX_DISTANCE_FACTOR: f32 = 20.0;

/// Orbital camera: rotates around, pans and zooms toward a focus point.
///
/// Pure math; the engine uploads [`CameraController::uniform`] each frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    /// Last framed model, used for recentering and clip planes.
    bounds: Option<Bounds>,
    max_distance: f32,

    /// Derived camera, kept in sync with the orbit state.
    pub camera: Camera,
    /// GPU-ready copy of `camera`.
    pub uniform: CameraUniform,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    fit_padding: f32,
}

impl CameraController {
    /// Create a camera looking down -Z at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let distance = 50.0;
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: 0.1,
            zfar: 1000.0,
        };
        let mut controller = Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point: Vec3::ZERO,
            bounds: None,
            max_distance: 1000.0,
            camera,
            uniform: CameraUniform::new(),
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            fit_padding: options.fit_padding,
        };
        controller.update_camera_pos();
        controller
    }

    /// Current distance from eye to focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current focus point.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;

        // Clip planes hug the model so depth precision stays usable at any
        // zoom level.
        let radius = self.bounds.map_or(self.distance, |b| {
            b.radius + b.center.distance(self.focus_point)
        });
        self.camera.zfar = self.distance + radius * 2.0;
        self.camera.znear = (self.distance - radius * 2.0)
            .max(self.distance * 0.01)
            .max(0.01);

        self.uniform.update_view_proj(&self.camera);
    }

    /// Apply a new viewport aspect ratio.
    pub fn resize(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
        self.update_camera_pos();
    }

    /// Orbit by a drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Translate the focus point by a drag delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = self.pan_speed * self.distance;

        self.focus_point += right * (-delta.x * scale) + up * (delta.y * scale);
        self.update_camera_pos();
    }

    /// Zoom by `delta` scroll steps; positive moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * self.zoom_speed).max(0.1);
        self.distance =
            (self.distance * factor).clamp(MIN_DISTANCE, self.max_distance);
        self.update_camera_pos();
    }

    /// Frame `bounds` so the whole sphere is visible in both directions,
    /// looking down -Z.
    pub fn fit(&mut self, bounds: Bounds) {
        let half_v = self.camera.fovy.to_radians() / 2.0;
        let half_h = (half_v.tan() * self.camera.aspect).atan();
        let half = half_v.min(half_h);
        let radius = bounds.radius.max(MIN_DISTANCE);

        self.orientation = Quat::IDENTITY;
        self.focus_point = bounds.center;
        self.distance = radius * self.fit_padding / half.sin();
        self.max_distance = self.distance * MAX_DISTANCE_FACTOR;
        self.bounds = Some(bounds);
        self.update_camera_pos();
    }

    /// Frame the last fitted model again, if any.
    pub fn recenter(&mut self) {
        if let Some(bounds) = self.bounds {
            self.fit(bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), 800.0 / 600.0)
    }

    fn bounds() -> Bounds {
        Bounds {
            center: Vec3::new(10.0, -5.0, 3.0),
            radius: 20.0,
        }
    }

    /// Every corner of the bounding box projects inside the viewport.
    fn assert_visible(c: &CameraController, b: Bounds) {
        let m = c.camera.build_matrix();
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let p = b.center + Vec3::new(sx, sy, sz) * b.radius * 0.577;
                    let clip = m * p.extend(1.0);
                    let ndc = clip.truncate() / clip.w;
                    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{ndc}");
                    assert!((0.0..=1.0).contains(&ndc.z), "{ndc}");
                }
            }
        }
    }

    #[test]
    fn fit_centers_and_contains_the_model() {
        let mut c = controller();
        c.fit(bounds());
        assert_eq!(c.focus_point(), bounds().center);
        assert_eq!(c.camera.target, bounds().center);
        assert_visible(&c, bounds());
    }

    #[test]
    fn fit_respects_narrow_aspect() {
        let mut c = controller();
        c.resize(0.5);
        c.fit(bounds());
        assert_visible(&c, bounds());
    }

    #[test]
    fn zoom_in_moves_closer_and_is_clamped() {
        let mut c = controller();
        c.fit(bounds());
        let start = c.distance();
        c.zoom(1.0);
        assert!(c.distance() < start);
        for _ in 0..1000 {
            c.zoom(5.0);
        }
        assert_eq!(c.distance(), MIN_DISTANCE);
        for _ in 0..1000 {
            c.zoom(-5.0);
        }
        assert!((c.distance() - start * MAX_DISTANCE_FACTOR).abs() < 1e-2);
    }

    #[test]
    fn rotate_keeps_distance_and_focus() {
        let mut c = controller();
        c.fit(bounds());
        let d = c.distance();
        c.rotate(Vec2::new(40.0, -25.0));
        assert!((c.camera.eye.distance(c.focus_point()) - d).abs() < 1e-3);
        assert_ne!(c.camera.eye.z - c.focus_point().z, d);
    }

    #[test]
    fn pan_moves_focus_in_view_plane() {
        let mut c = controller();
        c.fit(bounds());
        c.pan(Vec2::new(10.0, 0.0));
        let moved = c.focus_point() - bounds().center;
        assert!(moved.x < 0.0);
        assert!(moved.y.abs() < 1e-5 && moved.z.abs() < 1e-5);
    }

    #[test]
    fn recenter_restores_the_framing() {
        let mut c = controller();
        c.recenter();
        assert_eq!(c.focus_point(), Vec3::ZERO);

        c.fit(bounds());
        let framed = c.camera;
        c.rotate(Vec2::new(30.0, 30.0));
        c.pan(Vec2::new(5.0, 5.0));
        c.zoom(2.0);
        c.recenter();
        assert_eq!(c.camera, framed);
    }
}
