//! Input handling systems
//!
//! This module contains systems for the press-and-hold throw control
//! (keyboard and on-screen button), dice count keys, and view reset.

use bevy::prelude::*;

use crate::dice3d::types::*;

/// Handle the SPACE key as a press-and-hold throw control
pub fn handle_throw_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut throw_input: ResMut<ThrowInput>,
) {
    if keyboard.just_pressed(KeyCode::Space) && !throw_input.shaking {
        throw_input.start_shake();
    }

    if keyboard.just_released(KeyCode::Space) && throw_input.shaking {
        throw_input.release();
    }
}

/// Apply one pointer edge from the on-screen throw button
///
/// Leaving the button while it is held stops the shake without throwing, so a
/// later release over empty space does nothing.
pub fn apply_button_edge(throw_input: &mut ThrowInput, edge: ButtonEdge) {
    match edge {
        ButtonEdge::Pressed => throw_input.start_shake(),
        ButtonEdge::Released => {
            if throw_input.shaking {
                throw_input.release();
            }
        }
        ButtonEdge::Left => {
            if throw_input.shaking {
                throw_input.cancel_shake();
            }
        }
    }
}

/// Observer for the pointer going down on the throw button
pub fn on_throw_button_press(press: On<Pointer<Press>>, mut throw_input: ResMut<ThrowInput>) {
    if press.button == PointerButton::Primary {
        apply_button_edge(&mut throw_input, ButtonEdge::Pressed);
    }
}

/// Observer for the pointer coming up on the throw button
pub fn on_throw_button_release(
    release: On<Pointer<Release>>,
    mut throw_input: ResMut<ThrowInput>,
) {
    if release.button == PointerButton::Primary {
        apply_button_edge(&mut throw_input, ButtonEdge::Released);
    }
}

/// Observer for the pointer leaving the throw button
pub fn on_throw_button_out(_out: On<Pointer<Out>>, mut throw_input: ResMut<ThrowInput>) {
    apply_button_edge(&mut throw_input, ButtonEdge::Left);
}

/// Keep the throw button caption and color in sync with the shake state
pub fn sync_throw_button(
    throw_input: Res<ThrowInput>,
    mut button_query: Query<&mut BackgroundColor, With<ThrowButton>>,
    mut label_query: Query<&mut Text, With<ThrowButtonLabel>>,
) {
    if !throw_input.is_changed() {
        return;
    }

    for mut background in button_query.iter_mut() {
        background.0 = throw_button_color(throw_input.shaking);
    }

    for mut text in label_query.iter_mut() {
        text.0 = throw_button_caption(throw_input.shaking).to_string();
    }
}

/// Handle dice count keys: 1-6 pick a count, +/- step it
pub fn handle_dice_count_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    throw_input: Res<ThrowInput>,
    mut dice_config: ResMut<DiceConfig>,
) {
    // Changing the dice mid-shake would respawn them under the swirl.
    if throw_input.shaking {
        return;
    }

    let digits = [
        (KeyCode::Digit1, 1),
        (KeyCode::Digit2, 2),
        (KeyCode::Digit3, 3),
        (KeyCode::Digit4, 4),
        (KeyCode::Digit5, 5),
        (KeyCode::Digit6, 6),
    ];

    let mut next = dice_config.clone();
    for (key, count) in digits {
        if keyboard.just_pressed(key) {
            next = DiceConfig::new(count);
        }
    }

    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        next.step(1);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        next.step(-1);
    }

    // Only write when the value moved so change detection stays meaningful.
    if next != *dice_config {
        *dice_config = next;
    }
}

/// Handle the R key to reset the camera view
pub fn handle_view_keys(keyboard: Res<ButtonInput<KeyCode>>, mut throw_input: ResMut<ThrowInput>) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        throw_input.request_view_reset();
    }
}
