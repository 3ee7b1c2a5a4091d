//! Roll resolution
//!
//! Turns the per-frame physics state of a single die (linear velocity and
//! orientation) into a discrete face value, and decides when a thrown die
//! has come to rest. Each die owns one [`RollSession`]; the Bevy systems feed
//! it a [`RollFrame`] every tick and collect the completion it returns.

use bevy::prelude::*;

/// Speed (world units per second) below which a die counts as stationary.
pub const REST_SPEED_THRESHOLD: f32 = 0.1;

/// Continuous rest time (seconds) required before a roll is final.
pub const SETTLE_SECONDS: f32 = 0.5;

/// Local outward face normals of a six-sided die and the value printed on
/// each face, in the order they are examined.
///
/// Opposite faces always sum to 7.
pub const D6_FACE_MAP: [(Vec3, u32); 6] = [
    (Vec3::X, 1),
    (Vec3::NEG_X, 6),
    (Vec3::Y, 2),
    (Vec3::NEG_Y, 5),
    (Vec3::Z, 3),
    (Vec3::NEG_Z, 4),
];

/// Determine the upward-facing value of a die from its orientation.
///
/// World up is brought into the die's local frame and compared against each
/// face normal. On an exact tie the first face in [`D6_FACE_MAP`] order wins.
pub fn resolve_face(orientation: Quat) -> u32 {
    resolve_face_with(&D6_FACE_MAP, orientation)
}

/// Same as [`resolve_face`] for an arbitrary face table.
pub fn resolve_face_with(faces: &[(Vec3, u32)], orientation: Quat) -> u32 {
    let local_up = orientation.inverse() * Vec3::Y;

    let mut best_match = faces.first().map(|(_, value)| *value).unwrap_or(1);
    let mut best_dot = f32::NEG_INFINITY;

    for (normal, value) in faces {
        let dot = normal.dot(local_up);
        if dot > best_dot {
            best_dot = dot;
            best_match = *value;
        }
    }

    best_match
}

/// Where a die is in its throw cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RollPhase {
    /// Nothing to watch: no throw yet, or the last throw already completed.
    #[default]
    Idle,
    /// Being forced around by a shake; settle detection is suspended.
    Shaking,
    /// Thrown and waiting to come to rest.
    Rolling,
}

/// Physics and input state for one die on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollFrame {
    pub velocity: Vec3,
    pub orientation: Quat,
    /// Seconds elapsed since the previous frame.
    pub delta: f32,
    pub shaking: bool,
    /// True on the frame a new throw was triggered.
    pub throw_triggered: bool,
}

impl RollFrame {
    /// A frame with no input edges, only physics state.
    pub fn sample(velocity: Vec3, orientation: Quat, delta: f32) -> Self {
        Self {
            velocity,
            orientation,
            delta,
            shaking: false,
            throw_triggered: false,
        }
    }

    pub fn with_shaking(mut self, shaking: bool) -> Self {
        self.shaking = shaking;
        self
    }

    pub fn with_throw(mut self) -> Self {
        self.throw_triggered = true;
        self
    }
}

/// Per-die roll state. One session is live per die at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RollSession {
    pub phase: RollPhase,
    /// Seconds of uninterrupted rest since the die last moved.
    pub settled_duration: f32,
    /// Value emitted by the most recent completed roll.
    pub last_result: Option<u32>,
}

impl RollSession {
    pub fn is_rolling(&self) -> bool {
        self.phase == RollPhase::Rolling
    }

    /// Advance this session by one frame, returning the face value on the
    /// frame the roll completes.
    pub fn advance(&mut self, frame: &RollFrame) -> Option<u32> {
        let (next, completed) = update(*self, frame);
        *self = next;
        completed
    }
}

/// Advance a session by one frame.
///
/// Returns the next session state and, on the single frame a throw comes to
/// rest, the resolved face value.
pub fn update(mut session: RollSession, frame: &RollFrame) -> (RollSession, Option<u32>) {
    if frame.shaking {
        // A shake abandons any roll in flight without reporting it.
        session.phase = RollPhase::Shaking;
        session.settled_duration = 0.0;
        return (session, None);
    }

    if frame.throw_triggered {
        session.phase = RollPhase::Rolling;
        session.settled_duration = 0.0;
        return (session, None);
    }

    match session.phase {
        RollPhase::Idle => (session, None),
        RollPhase::Shaking => {
            session.phase = RollPhase::Idle;
            session.settled_duration = 0.0;
            (session, None)
        }
        RollPhase::Rolling => {
            if frame.velocity.length() < REST_SPEED_THRESHOLD {
                session.settled_duration += frame.delta;

                if session.settled_duration > SETTLE_SECONDS {
                    let value = resolve_face(frame.orientation);
                    session.phase = RollPhase::Idle;
                    session.settled_duration = 0.0;
                    session.last_result = Some(value);
                    return (session, Some(value));
                }
            } else {
                session.settled_duration = 0.0;
            }

            (session, None)
        }
    }
}

/// Turns the monotonically increasing throw counter into a per-die edge.
///
/// Every die keeps its own watcher so a trigger is seen by all dice on the
/// frame after it is raised, regardless of system ordering between dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrowTrigger {
    seen: u64,
}

impl ThrowTrigger {
    /// A watcher that treats `current` as already seen.
    pub fn starting_at(current: u64) -> Self {
        Self { seen: current }
    }

    /// Returns true if the counter moved past the last observed value.
    pub fn observe(&mut self, current: u64) -> bool {
        if current > self.seen {
            self.seen = current;
            true
        } else {
            false
        }
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const DT: f32 = 1.0 / 60.0;

    fn rest(orientation: Quat) -> RollFrame {
        RollFrame::sample(Vec3::ZERO, orientation, DT)
    }

    fn moving(orientation: Quat) -> RollFrame {
        RollFrame::sample(Vec3::new(0.0, -2.0, 0.5), orientation, DT)
    }

    #[test]
    fn test_axis_aligned_rests() {
        assert_eq!(resolve_face(Quat::IDENTITY), 2);
        assert_eq!(resolve_face(Quat::from_rotation_z(FRAC_PI_2)), 1);
        assert_eq!(resolve_face(Quat::from_rotation_z(-FRAC_PI_2)), 6);
        assert_eq!(resolve_face(Quat::from_rotation_x(PI)), 5);
        assert_eq!(resolve_face(Quat::from_rotation_x(-FRAC_PI_2)), 3);
        assert_eq!(resolve_face(Quat::from_rotation_x(FRAC_PI_2)), 4);
    }

    #[test]
    fn test_spin_about_up_keeps_face() {
        for step in 0..8 {
            let q = Quat::from_rotation_y(step as f32 * FRAC_PI_4);
            assert_eq!(resolve_face(q), 2);
        }
    }

    #[test]
    fn test_opposite_faces_sum_to_seven() {
        let tilts = [
            Quat::IDENTITY,
            Quat::from_rotation_z(FRAC_PI_2),
            Quat::from_rotation_x(-FRAC_PI_2),
            Quat::from_euler(EulerRot::XYZ, 0.2, 1.1, -0.3),
            Quat::from_euler(EulerRot::XYZ, 2.5, -0.4, 0.9),
        ];

        for q in tilts {
            // Flipping 180 degrees about a horizontal world axis puts the
            // opposite face on top.
            let flipped = Quat::from_rotation_x(PI) * q;
            assert_eq!(resolve_face(q) + resolve_face(flipped), 7, "q = {q:?}");
        }
    }

    #[test]
    fn test_face_map_is_a_bijection() {
        let mut values: Vec<u32> = D6_FACE_MAP.iter().map(|(_, v)| *v).collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);

        for (normal, value) in D6_FACE_MAP {
            let opposite = D6_FACE_MAP
                .iter()
                .find(|(n, _)| *n == -normal)
                .map(|(_, v)| *v);
            assert_eq!(opposite, Some(7 - value));
        }
    }

    #[test]
    fn test_exact_edge_tie_prefers_first_face() {
        // Edge between +X and +Y pointing straight up: both dots are equal.
        let faces = [(Vec3::X, 1), (Vec3::Y, 2)];
        let q = Quat::from_rotation_z(FRAC_PI_4);
        let local_up = q.inverse() * Vec3::Y;
        if Vec3::X.dot(local_up) == Vec3::Y.dot(local_up) {
            assert_eq!(resolve_face_with(&faces, q), 1);
        }

        // Degenerate input where every dot is zero.
        let flat = [(Vec3::X, 1), (Vec3::Z, 3)];
        assert_eq!(resolve_face_with(&flat, Quat::IDENTITY), 1);
    }

    #[test]
    fn test_idle_session_never_completes() {
        let mut session = RollSession::default();
        for _ in 0..120 {
            assert_eq!(session.advance(&rest(Quat::IDENTITY)), None);
        }
        assert_eq!(session.phase, RollPhase::Idle);
    }

    #[test]
    fn test_settles_once_after_half_second_of_rest() {
        let mut session = RollSession::default();
        session.advance(&rest(Quat::IDENTITY).with_throw());
        assert!(session.is_rolling());

        let mut elapsed = 0.0;
        let mut completions = Vec::new();
        while elapsed < 0.6 {
            elapsed += DT;
            if let Some(v) = session.advance(&rest(Quat::IDENTITY)) {
                completions.push((elapsed, v));
            }
        }

        assert_eq!(completions.len(), 1);
        let (at, value) = completions[0];
        assert_eq!(value, 2);
        assert!(at >= SETTLE_SECONDS, "completed too early at {at}");
        assert!(at < 0.6);
        assert_eq!(session.phase, RollPhase::Idle);
        assert_eq!(session.last_result, Some(2));
    }

    #[test]
    fn test_motion_resets_rest_timer() {
        let mut session = RollSession::default();
        session.advance(&moving(Quat::IDENTITY).with_throw());

        // 0.3 s of rest, then a bounce.
        for _ in 0..18 {
            assert_eq!(session.advance(&rest(Quat::IDENTITY)), None);
        }
        assert!(session.settled_duration > 0.25);
        assert_eq!(session.advance(&moving(Quat::IDENTITY)), None);
        assert_eq!(session.settled_duration, 0.0);

        // A fresh window is needed; nothing fires before 0.5 s of it.
        let mut fired_after = None;
        for frame in 1..=40 {
            if session.advance(&rest(Quat::IDENTITY)).is_some() {
                fired_after = Some(frame as f32 * DT);
                break;
            }
        }
        let fired_after = fired_after.expect("roll should settle");
        assert!(fired_after >= SETTLE_SECONDS);
    }

    #[test]
    fn test_speed_at_threshold_counts_as_motion() {
        let mut session = RollSession::default();
        session.advance(&rest(Quat::IDENTITY).with_throw());
        session.advance(&rest(Quat::IDENTITY));
        assert!(session.settled_duration > 0.0);

        let edge = RollFrame::sample(Vec3::new(REST_SPEED_THRESHOLD, 0.0, 0.0), Quat::IDENTITY, DT);
        session.advance(&edge);
        assert_eq!(session.settled_duration, 0.0);
    }

    #[test]
    fn test_shaking_suppresses_completion() {
        let mut session = RollSession::default();
        session.advance(&rest(Quat::IDENTITY).with_throw());

        for _ in 0..180 {
            let frame = rest(Quat::IDENTITY).with_shaking(true);
            assert_eq!(session.advance(&frame), None);
            assert_eq!(session.settled_duration, 0.0);
        }
        assert_eq!(session.phase, RollPhase::Shaking);
    }

    #[test]
    fn test_shake_with_throw_flag_does_not_arm() {
        let mut session = RollSession::default();
        session.advance(&rest(Quat::IDENTITY).with_shaking(true).with_throw());
        assert_eq!(session.phase, RollPhase::Shaking);
    }

    #[test]
    fn test_shake_end_without_throw_returns_to_idle() {
        let mut session = RollSession::default();
        session.advance(&moving(Quat::IDENTITY).with_throw());
        session.advance(&moving(Quat::IDENTITY).with_shaking(true));
        session.advance(&rest(Quat::IDENTITY));
        assert_eq!(session.phase, RollPhase::Idle);

        for _ in 0..60 {
            assert_eq!(session.advance(&rest(Quat::IDENTITY)), None);
        }
    }

    #[test]
    fn test_second_throw_replaces_first() {
        let mut session = RollSession::default();
        session.advance(&moving(Quat::IDENTITY).with_throw());
        for _ in 0..20 {
            assert_eq!(session.advance(&rest(Quat::IDENTITY)), None);
        }

        session.advance(&moving(Quat::IDENTITY).with_throw());
        assert_eq!(session.settled_duration, 0.0);

        let upside_down = Quat::from_rotation_x(PI);
        let mut completions = Vec::new();
        for frame in 1..=120 {
            if let Some(v) = session.advance(&rest(upside_down)) {
                completions.push((frame, v));
            }
        }

        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].1, 5);
        assert!(completions[0].0 as f32 * DT >= SETTLE_SECONDS);
    }

    #[test]
    fn test_rethrow_after_completion_starts_fresh() {
        let mut session = RollSession::default();
        session.advance(&rest(Quat::IDENTITY).with_throw());
        let first: Vec<u32> = (0..60)
            .filter_map(|_| session.advance(&rest(Quat::IDENTITY)))
            .collect();
        assert_eq!(first, vec![2]);

        session.advance(&rest(Quat::IDENTITY).with_throw());
        let tipped = Quat::from_rotation_z(FRAC_PI_2);
        let second: Vec<u32> = (0..60)
            .filter_map(|_| session.advance(&rest(tipped)))
            .collect();
        assert_eq!(second, vec![1]);
    }

    #[test]
    fn test_identity_scenario_completes_near_half_second() {
        let dt = 0.01;
        let mut session = RollSession::default();
        session.advance(&RollFrame::sample(Vec3::ZERO, Quat::IDENTITY, dt).with_throw());

        let mut events = Vec::new();
        for step in 1..=100 {
            let frame = RollFrame::sample(Vec3::ZERO, Quat::IDENTITY, dt);
            if let Some(v) = session.advance(&frame) {
                events.push((step as f32 * dt, v));
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, 2);
        assert!((events[0].0 - 0.5).abs() < 0.02, "fired at {}", events[0].0);
    }

    #[test]
    fn test_update_is_pure() {
        let session = RollSession::default();
        let frame = rest(Quat::IDENTITY).with_throw();
        let (a, _) = update(session, &frame);
        let (b, _) = update(session, &frame);
        assert_eq!(a, b);
        assert_eq!(session, RollSession::default());
    }

    #[test]
    fn test_throw_trigger_edges() {
        let mut trigger = ThrowTrigger::default();
        assert!(!trigger.observe(0));
        assert!(trigger.observe(1));
        assert!(!trigger.observe(1));
        assert!(trigger.observe(3));
        assert_eq!(trigger.seen(), 3);

        let mut late = ThrowTrigger::starting_at(3);
        assert!(!late.observe(3));
        assert!(late.observe(4));
    }
}
