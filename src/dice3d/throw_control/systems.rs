//! Throw Control Systems
//!
//! Contains systems that force the dice around while the throw control is
//! held, and that fling them into the tray when it is released.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::state::*;
use crate::dice3d::types::{Die, ThrowInput};

/// System to keep the dice swirling above the tray while shaking
///
/// Position and velocities are overwritten every frame, so the dice follow
/// the shake path regardless of what the physics step did to them.
pub fn apply_shake(
    throw_input: Res<ThrowInput>,
    motion: Res<ShakeMotion>,
    time: Res<Time>,
    mut dice_query: Query<(&Die, &mut Transform, &mut Velocity)>,
) {
    if !throw_input.shaking {
        return;
    }

    let elapsed = time.elapsed_secs();
    for (die, mut transform, mut velocity) in dice_query.iter_mut() {
        let pose = motion.pose(die.anchor, elapsed);
        transform.translation = pose.position;
        velocity.linvel = pose.linvel;
        velocity.angvel = pose.angvel;
    }
}

/// System to fling every die when a new throw is triggered
pub fn apply_throw(
    throw_input: Res<ThrowInput>,
    mut last_applied: Local<u64>,
    mut dice_query: Query<&mut Velocity, With<Die>>,
) {
    if throw_input.throw_trigger <= *last_applied {
        return;
    }
    *last_applied = throw_input.throw_trigger;

    if throw_input.shaking {
        return;
    }

    let mut rng = rand::thread_rng();
    let mut count = 0;
    for mut velocity in dice_query.iter_mut() {
        velocity.linvel = throw_velocity(&mut rng);
        velocity.angvel = throw_spin(&mut rng);
        count += 1;
    }

    info!("Throw #{}: {} dice released", throw_input.throw_trigger, count);
}

/// Switch the physics world to the tray's gravity
pub fn configure_gravity(mut configs: Query<&mut RapierConfiguration>) {
    let mut found = false;
    for mut config in configs.iter_mut() {
        config.gravity = GRAVITY;
        found = true;
    }

    if !found {
        warn!("No rapier configuration found; keeping default gravity");
    }
}
