use bevy::input::mouse::MouseScrollUnit;
use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Default camera position, looking at the tray center.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 20.0, 15.0);

/// Largest angle (radians) between the camera and straight up; keeps the
/// camera above the tray rim.
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI / 2.2;

/// Radians of orbit per pixel of mouse drag.
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Distance change per wheel line, and per pixel on touchpads.
const WHEEL_LINE_ZOOM: f32 = 1.5;
const WHEEL_PIXEL_ZOOM: f32 = 0.05;

/// Zoom delta for one wheel message; scrolling up moves the camera in.
pub fn wheel_zoom(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * WHEEL_LINE_ZOOM,
        MouseScrollUnit::Pixel => -y * WHEEL_PIXEL_ZOOM,
    }
}

/// Orbit camera around the tray center, in spherical coordinates
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Rotation around the vertical axis (radians); 0 looks from +Z.
    pub yaw: f32,
    /// Angle from straight up (radians).
    pub polar: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_position(DEFAULT_CAMERA_POSITION)
    }
}

impl CameraRig {
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length();
        let horizontal = Vec2::new(position.x, position.z).length();
        Self {
            yaw: position.x.atan2(position.z),
            polar: horizontal.atan2(position.y),
            distance,
            min_distance: 8.0,
            max_distance: 45.0,
        }
    }

    /// Orbit by the given yaw/polar deltas, respecting the polar limits.
    pub fn orbit(&mut self, yaw_delta: f32, polar_delta: f32) {
        self.yaw += yaw_delta;
        self.polar = (self.polar + polar_delta).clamp(0.0, MAX_POLAR_ANGLE);
    }

    /// Orbit by a mouse drag: dragging right swings the camera left around the tray.
    pub fn drag(&mut self, delta: Vec2) {
        self.orbit(-delta.x * DRAG_SENSITIVITY, -delta.y * DRAG_SENSITIVITY);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(self.min_distance, self.max_distance);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(sin_p * sin_y, cos_p, sin_p * cos_y) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}
