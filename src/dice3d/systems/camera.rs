//! Camera control systems
//!
//! This module contains systems for orbiting, zooming and resetting the
//! camera around the tray, from the keyboard and the mouse.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::dice3d::types::*;

/// System to orbit and zoom the camera with the keyboard
pub fn rotate_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
) {
    let rotation_speed = 1.0;
    let tilt_speed = 0.8;
    let zoom_speed = 12.0;
    let dt = time.delta_secs();

    let mut yaw = 0.0;
    let mut polar = 0.0;
    let mut zoom = 0.0;

    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        yaw -= rotation_speed * dt;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        yaw += rotation_speed * dt;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        polar -= tilt_speed * dt;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        polar += tilt_speed * dt;
    }
    if keyboard.pressed(KeyCode::KeyW) {
        zoom -= zoom_speed * dt;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        zoom += zoom_speed * dt;
    }

    if yaw != 0.0 || polar != 0.0 {
        rig.orbit(yaw, polar);
    }
    if zoom != 0.0 {
        rig.zoom(zoom);
    }
}

/// System to orbit the camera by dragging with the mouse
///
/// The left button on the throw control shakes the dice instead, so left drags
/// are ignored while shaking. The right button always orbits.
pub fn orbit_camera_with_mouse(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    throw_input: Res<ThrowInput>,
    mut rig: ResMut<CameraRig>,
) {
    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    let left_drag = mouse_button.pressed(MouseButton::Left) && !throw_input.shaking;
    if left_drag || mouse_button.pressed(MouseButton::Right) {
        rig.drag(delta);
    }
}

/// System to zoom the camera with the mouse wheel
pub fn zoom_camera_with_wheel(
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut rig: ResMut<CameraRig>,
) {
    let zoom: f32 = mouse_wheel
        .read()
        .map(|event| wheel_zoom(event.unit, event.y))
        .sum();

    if zoom != 0.0 {
        rig.zoom(zoom);
    }
}

/// System to snap the rig back to its default pose on request
pub fn reset_camera_view(
    throw_input: Res<ThrowInput>,
    mut last_reset: Local<u64>,
    mut rig: ResMut<CameraRig>,
) {
    if throw_input.view_reset > *last_reset {
        *last_reset = throw_input.view_reset;
        rig.reset();
        info!("Camera view reset");
    }
}

/// System to apply the rig to the camera transform
pub fn apply_camera_rig(
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !rig.is_changed() {
        return;
    }

    for mut transform in camera_query.iter_mut() {
        *transform = rig.transform();
    }
}
