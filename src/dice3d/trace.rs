//! Recorded roll traces
//!
//! A trace is a JSON recording of per-frame physics samples for every die in
//! the tray. Replaying it through one [`RollSession`] per die reproduces the
//! completions the live app would have reported, without a window or a
//! physics world.

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dice3d::roll::{RollFrame, RollSession};
use crate::dice3d::types::{DiceResults, MAX_DICE, MIN_DICE};

/// One die's physics state on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    pub velocity: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    pub orientation: [f32; 4],
}

impl TraceSample {
    pub fn velocity(&self) -> Vec3 {
        Vec3::from_array(self.velocity)
    }

    /// Orientation, normalized to guard against rounding in hand-written traces.
    pub fn orientation(&self) -> Quat {
        Quat::from_array(self.orientation).normalize()
    }
}

/// Input state plus every die's sample for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub delta: f32,
    #[serde(default)]
    pub shaking: bool,
    /// True on the frame the throw control was released.
    #[serde(default)]
    pub throw: bool,
    pub samples: Vec<TraceSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollTrace {
    pub dice: usize,
    pub frames: Vec<TraceFrame>,
}

/// A die coming to rest during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub frame: usize,
    pub die: usize,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub completions: Vec<Completion>,
    /// Result slots as they stand after the last frame.
    pub results: DiceResults,
}

impl RollTrace {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read trace {}: {}", path.display(), e))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let trace: RollTrace =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse trace: {}", e))?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_DICE..=MAX_DICE).contains(&self.dice) {
            return Err(format!(
                "Trace declares {} dice; expected {} to {}",
                self.dice, MIN_DICE, MAX_DICE
            ));
        }

        for (i, frame) in self.frames.iter().enumerate() {
            if !frame.delta.is_finite() || frame.delta < 0.0 {
                return Err(format!("Frame {}: invalid delta {}", i, frame.delta));
            }
            if frame.samples.len() != self.dice {
                return Err(format!(
                    "Frame {}: expected {} samples, found {}",
                    i,
                    self.dice,
                    frame.samples.len()
                ));
            }
        }

        Ok(())
    }

    /// Run every frame through a fresh session per die.
    ///
    /// Result slots are cleared when a shake starts or a throw is made, the
    /// same way the live tray clears them.
    pub fn replay(&self) -> ReplayOutcome {
        let mut sessions = vec![RollSession::default(); self.dice];
        let mut results = DiceResults::with_slots(self.dice);
        let mut completions = Vec::new();
        let mut was_shaking = false;

        for (frame_index, frame) in self.frames.iter().enumerate() {
            if (frame.shaking && !was_shaking) || (frame.throw && !frame.shaking) {
                results.reset(self.dice);
            }
            was_shaking = frame.shaking;

            for (die, (session, sample)) in sessions.iter_mut().zip(&frame.samples).enumerate() {
                let roll_frame = RollFrame {
                    velocity: sample.velocity(),
                    orientation: sample.orientation(),
                    delta: frame.delta,
                    shaking: frame.shaking,
                    throw_triggered: frame.throw,
                };

                if let Some(value) = session.advance(&roll_frame) {
                    results.record(die, value);
                    completions.push(Completion {
                        frame: frame_index,
                        die,
                        value,
                    });
                }
            }
        }

        ReplayOutcome {
            completions,
            results,
        }
    }
}
