//! Dice-related types and components
//!
//! This module contains all types related to dice: the Die component,
//! DiceTray marker, DiceResults, DiceConfig, and ThrowInput.

use bevy::prelude::*;

use crate::dice3d::roll::{RollSession, ThrowTrigger};

/// Smallest number of dice that can be in the tray.
pub const MIN_DICE: usize = 1;

/// Largest number of dice that can be in the tray.
pub const MAX_DICE: usize = 6;

/// Component attached to each die entity
#[derive(Component, Debug, Clone)]
pub struct Die {
    /// Slot in [`DiceResults`] this die reports into.
    pub index: usize,
    /// Where the die hovers while being shaken, relative to the tray center.
    pub anchor: Vec3,
    pub session: RollSession,
    pub trigger: ThrowTrigger,
}

impl Die {
    /// Create a six-sided die that ignores any throws raised before it existed.
    pub fn new(index: usize, anchor: Vec3, current_trigger: u64) -> Self {
        Self {
            index,
            anchor,
            session: RollSession::default(),
            trigger: ThrowTrigger::starting_at(current_trigger),
        }
    }
}

/// Marker component for the tray floor and walls
#[derive(Component)]
pub struct DiceTray;

/// Resource storing the per-die outcome of the current throw
///
/// `None` means the die is still rolling (or has not been thrown yet).
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct DiceResults {
    pub results: Vec<Option<u32>>,
}

impl DiceResults {
    pub fn with_slots(count: usize) -> Self {
        Self {
            results: vec![None; count],
        }
    }

    /// Clear every slot and resize to `count` dice.
    pub fn reset(&mut self, count: usize) {
        self.results.clear();
        self.results.resize(count, None);
    }

    /// Record a settled value. Out-of-range indices are ignored.
    pub fn record(&mut self, index: usize, value: u32) {
        if let Some(slot) = self.results.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Sum of the dice that have settled so far.
    pub fn total(&self) -> u32 {
        self.results.iter().flatten().sum()
    }

    pub fn settled_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    pub fn all_settled(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(Option::is_some)
    }
}

/// Configuration for how many dice are in the tray
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct DiceConfig {
    pub dice_count: usize,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self { dice_count: 2 }
    }
}

impl DiceConfig {
    pub fn new(dice_count: usize) -> Self {
        Self {
            dice_count: dice_count.clamp(MIN_DICE, MAX_DICE),
        }
    }

    /// Step the dice count up or down, staying within the allowed range.
    pub fn step(&mut self, delta: i32) {
        let next = self.dice_count as i32 + delta;
        self.dice_count = (next.max(MIN_DICE as i32) as usize).min(MAX_DICE);
    }
}

/// Resource carrying the throw control state shared by every die
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct ThrowInput {
    /// True while the throw control is held down.
    pub shaking: bool,
    /// Incremented once per throw; any increase starts a new roll.
    pub throw_trigger: u64,
    /// Incremented to snap the camera back to its default pose.
    pub view_reset: u64,
}

impl ThrowInput {
    pub fn start_shake(&mut self) {
        self.shaking = true;
    }

    /// Stop shaking and throw.
    pub fn release(&mut self) {
        self.shaking = false;
        self.throw_trigger += 1;
    }

    /// Whether the dice have been thrown at least once.
    pub fn thrown(&self) -> bool {
        self.throw_trigger > 0
    }

    /// Stop shaking without throwing (pointer left the control).
    pub fn cancel_shake(&mut self) {
        self.shaking = false;
    }

    pub fn request_view_reset(&mut self) {
        self.view_reset += 1;
    }
}
