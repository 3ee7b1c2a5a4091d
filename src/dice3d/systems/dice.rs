//! Dice state and result systems
//!
//! This module contains systems for tracking each die's roll session,
//! recording settled values, and updating the results display.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::roll::RollFrame;
use crate::dice3d::types::*;

/// System to clear the result slots whenever a shake starts or a throw is made
pub fn reset_results_on_throw(
    throw_input: Res<ThrowInput>,
    dice_config: Res<DiceConfig>,
    mut dice_results: ResMut<DiceResults>,
    mut was_shaking: Local<bool>,
    mut last_trigger: Local<u64>,
) {
    let shake_started = throw_input.shaking && !*was_shaking;
    let thrown = throw_input.throw_trigger > *last_trigger;
    *was_shaking = throw_input.shaking;
    *last_trigger = throw_input.throw_trigger;

    if shake_started || thrown {
        dice_results.reset(dice_config.dice_count);
    }
}

/// System to feed each die's physics state into its roll session
pub fn track_rolls(
    throw_input: Res<ThrowInput>,
    time: Res<Time>,
    mut dice_results: ResMut<DiceResults>,
    mut dice_query: Query<(&mut Die, &Velocity, &Transform)>,
) {
    let delta = time.delta_secs();

    for (mut die, velocity, transform) in dice_query.iter_mut() {
        let throw_triggered = die.trigger.observe(throw_input.throw_trigger);
        let frame = RollFrame {
            velocity: velocity.linvel,
            orientation: transform.rotation,
            delta,
            shaking: throw_input.shaking,
            throw_triggered,
        };

        if let Some(value) = die.session.advance(&frame) {
            debug!("Die {} settled on {}", die.index, value);
            dice_results.record(die.index, value);
        }
    }
}

/// System to log the final total once every die has settled
pub fn log_completed_throw(dice_results: Res<DiceResults>) {
    if dice_results.is_changed() && dice_results.all_settled() {
        info!(
            "Throw complete: {:?} = {}",
            dice_results.results.iter().flatten().collect::<Vec<_>>(),
            dice_results.total()
        );
    }
}

/// System to update the results display text
pub fn update_results_display(
    dice_results: Res<DiceResults>,
    throw_input: Res<ThrowInput>,
    mut text_query: Query<&mut Text, With<ResultsText>>,
) {
    if !dice_results.is_changed() && !throw_input.is_changed() {
        return;
    }

    let content = format_results(&dice_results, throw_input.thrown()).unwrap_or_default();
    for mut text in text_query.iter_mut() {
        if text.0 != content {
            text.0 = content.clone();
        }
    }
}

/// Text for the results panel, or `None` while nothing has settled.
///
/// The running total is shown as soon as one die settles; the individual
/// values are listed once every die is in.
pub fn format_results(dice_results: &DiceResults, thrown: bool) -> Option<String> {
    if dice_results.settled_count() == 0 {
        return None;
    }

    let mut text = format!("TOTAL SCORE\n{}", dice_results.total());

    if thrown && dice_results.all_settled() {
        let values: Vec<String> = dice_results
            .results
            .iter()
            .flatten()
            .map(|v| v.to_string())
            .collect();
        text.push_str(&format!("\n[ {} ]", values.join(" | ")));
    }

    Some(text)
}
