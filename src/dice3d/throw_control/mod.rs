//! Throw Control Module
//!
//! This module handles the shake-and-throw mechanics. Holding the throw
//! control swirls the dice above the tray; releasing it flings them in with
//! a random velocity and tumble.

mod state;
mod systems;

pub use state::*;
pub use systems::*;
