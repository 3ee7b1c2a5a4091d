//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice tray,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, tray, dice, UI) and respawning
//! - `camera`: Camera orbit, zoom and view reset
//! - `dice`: Roll tracking, result recording and the results display
//! - `input`: Throw control, dice count keys and view keys

mod camera;
mod dice;
mod input;
mod setup;

// Re-export all public systems
pub use camera::{
    apply_camera_rig, orbit_camera_with_mouse, reset_camera_view, rotate_camera,
    zoom_camera_with_wheel,
};
pub use dice::{
    format_results, log_completed_throw, reset_results_on_throw, track_rolls,
    update_results_display,
};
pub use input::{
    apply_button_edge, handle_dice_count_keys, handle_throw_keys, handle_view_keys,
    on_throw_button_out, on_throw_button_press, on_throw_button_release, sync_throw_button,
};
pub use setup::{respawn_dice_on_count_change, setup, spawn_dice, DiceAssets};
