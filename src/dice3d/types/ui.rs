//! UI-related types and components
//!
//! Markers for the on-screen text and the throw button.

use bevy::prelude::*;

/// Marker for the results panel text
#[derive(Component)]
pub struct ResultsText;

/// Marker for the hint text under the title
#[derive(Component)]
pub struct HintText;

/// The press-and-hold throw button
#[derive(Component)]
pub struct ThrowButton;

/// Label inside the throw button
#[derive(Component)]
pub struct ThrowButtonLabel;

/// Pointer activity on the press-and-hold throw button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    /// Pointer went down over the button.
    Pressed,
    /// Pointer came back up over the button.
    Released,
    /// Pointer moved off the button, held or not.
    Left,
}

/// Button caption for the current shake state.
pub fn throw_button_caption(shaking: bool) -> &'static str {
    if shaking {
        "Shaking..."
    } else {
        "Throw Dice"
    }
}

/// Background color of the throw button.
pub fn throw_button_color(shaking: bool) -> Color {
    if shaking {
        Color::srgb(0.85, 0.47, 0.02) // Darker amber while held
    } else {
        Color::srgb(0.96, 0.62, 0.04)
    }
}
