//! Type definitions for the dice tray
//!
//! This module is organized into submodules:
//! - `dice` - Die component, results, dice count and throw input
//! - `ui` - UI markers and throw button helpers
//! - `camera` - Camera marker and orbit rig
//! - `settings` - Application settings and persistence

pub mod camera;
pub mod dice;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use settings::*;
pub use ui::*;
