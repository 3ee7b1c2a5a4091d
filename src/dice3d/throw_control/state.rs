//! Throw Control State
//!
//! Tray geometry, the shake motion pattern, and throw impulse randomization.

use bevy::prelude::*;
use rand::Rng;

/// The tray boundaries in world space
/// The tray is centered at origin; the floor's top surface is y=0.0.
// NOTE: These must match the geometry spawned in `dice3d::systems::setup`.
pub const TRAY_SIZE: f32 = 15.0;
pub const TRAY_FLOOR_THICKNESS: f32 = 1.0;
pub const TRAY_FLOOR_Y: f32 = 0.0;
pub const TRAY_WALL_THICKNESS: f32 = 1.0;
pub const TRAY_WALL_HEIGHT: f32 = 4.0;
/// Height of the invisible containment walls that catch high throws.
pub const TRAY_GUARD_HEIGHT: f32 = 20.0;

pub const DIE_SIZE: f32 = 1.0;
pub const DIE_MASS: f32 = 1.0;
pub const DIE_FRICTION: f32 = 0.1;
pub const DIE_RESTITUTION: f32 = 0.5;

pub const FLOOR_FRICTION: f32 = 0.5;
pub const FLOOR_RESTITUTION: f32 = 0.3;

pub const GRAVITY: Vec3 = Vec3::new(0.0, -20.0, 0.0);

/// Half-extents and center of one static tray collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrayPiece {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub visible: bool,
}

impl TrayPiece {
    fn new(center: Vec3, size: Vec3, visible: bool) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
            visible,
        }
    }

    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }
}

/// All static colliders making up the tray: floor, four visible walls and
/// four tall invisible guards.
pub fn tray_layout() -> Vec<TrayPiece> {
    let floor_center_y = TRAY_FLOOR_Y - TRAY_FLOOR_THICKNESS / 2.0;
    let offset = TRAY_SIZE / 2.0 + TRAY_WALL_THICKNESS / 2.0;
    let wall_y = TRAY_WALL_HEIGHT / 2.0 + floor_center_y;
    let guard_y = TRAY_GUARD_HEIGHT / 2.0;
    let long = TRAY_SIZE + TRAY_WALL_THICKNESS * 2.0;
    let guard_long = TRAY_SIZE + 4.0;

    let mut pieces = vec![TrayPiece::new(
        Vec3::new(0.0, floor_center_y, 0.0),
        Vec3::new(TRAY_SIZE, TRAY_FLOOR_THICKNESS, TRAY_SIZE),
        true,
    )];

    // North/South run along X, East/West along Z.
    for sign in [-1.0, 1.0] {
        pieces.push(TrayPiece::new(
            Vec3::new(0.0, wall_y, sign * offset),
            Vec3::new(long, TRAY_WALL_HEIGHT, TRAY_WALL_THICKNESS),
            true,
        ));
        pieces.push(TrayPiece::new(
            Vec3::new(sign * offset, wall_y, 0.0),
            Vec3::new(TRAY_WALL_THICKNESS, TRAY_WALL_HEIGHT, TRAY_SIZE),
            true,
        ));
    }

    for sign in [-1.0, 1.0] {
        pieces.push(TrayPiece::new(
            Vec3::new(0.0, guard_y, sign * offset),
            Vec3::new(guard_long, TRAY_GUARD_HEIGHT, 1.0),
            false,
        ));
        pieces.push(TrayPiece::new(
            Vec3::new(sign * offset, guard_y, 0.0),
            Vec3::new(1.0, TRAY_GUARD_HEIGHT, guard_long),
            false,
        ));
    }

    pieces
}

/// Where die `index` starts before the first throw.
///
/// Dice are scattered near the center and stacked so they never spawn
/// inside each other.
pub fn initial_die_position(index: usize, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 4.0,
        5.0 + index as f32 * 1.5,
        (rng.gen::<f32>() - 0.5) * 4.0,
    )
}

/// Parameters of the swirling motion applied while the throw control is held
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ShakeMotion {
    pub swirl_speed: f32,
    pub swirl_radius: f32,
    pub jitter_speed: f32,
    pub jitter_amount: f32,
    /// Fraction of the die's anchor offset kept while swirling.
    pub clump: f32,
    pub hover_height: f32,
    pub spin: f32,
}

impl Default for ShakeMotion {
    fn default() -> Self {
        Self {
            swirl_speed: 15.0,
            swirl_radius: 2.5,
            jitter_speed: 30.0,
            jitter_amount: 0.5,
            clump: 0.1,
            hover_height: 5.0,
            spin: 20.0,
        }
    }
}

/// Kinematic state to force onto a die for one shake frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakePose {
    pub position: Vec3,
    pub linvel: Vec3,
    pub angvel: Vec3,
}

impl ShakeMotion {
    /// Per-die phase offset so dice do not move in lockstep.
    pub fn seed(anchor: Vec3) -> f32 {
        anchor.x * 13.37 + anchor.z * 4.2
    }

    /// Pose of a die anchored at `anchor`, `elapsed` seconds into the app.
    pub fn pose(&self, anchor: Vec3, elapsed: f32) -> ShakePose {
        let seed = Self::seed(anchor);
        let t = elapsed;

        let center_x = (t * self.swirl_speed).sin() * self.swirl_radius;
        let center_z = (t * self.swirl_speed).cos() * self.swirl_radius;

        let jitter = Vec3::new(
            (t * self.jitter_speed + seed).sin(),
            (t * self.jitter_speed * 1.2 + seed).cos(),
            (t * self.jitter_speed * 0.8 + seed).sin(),
        ) * self.jitter_amount;

        let position = Vec3::new(
            center_x + anchor.x * self.clump + jitter.x,
            self.hover_height + jitter.y,
            center_z + anchor.z * self.clump + jitter.z,
        );

        let angvel = Vec3::new(
            (t * 20.0 + seed).sin(),
            (t * 25.0 + seed).cos(),
            (t * 30.0 + seed).sin(),
        ) * self.spin;

        ShakePose {
            position,
            linvel: Vec3::ZERO,
            angvel,
        }
    }
}

/// Random linear velocity for a die at the moment of release: mostly
/// downward with a horizontal scatter.
pub fn throw_velocity(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 10.0,
        -8.0 + rng.gen::<f32>() * 4.0,
        (rng.gen::<f32>() - 0.5) * 10.0,
    )
}

/// Random tumble for a die at the moment of release.
pub fn throw_spin(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 60.0,
        (rng.gen::<f32>() - 0.5) * 60.0,
        (rng.gen::<f32>() - 0.5) * 60.0,
    )
}
