//! Scene setup system
//!
//! This module contains the main setup function that initializes the 3D scene,
//! including camera, lights, tray, dice, and UI elements, plus the system
//! that respawns dice when the dice count changes.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::input::{on_throw_button_out, on_throw_button_press, on_throw_button_release};
use crate::dice3d::meshes::{create_d6, pip_transforms};
use crate::dice3d::throw_control::*;
use crate::dice3d::types::*;

/// Shared mesh and material handles for spawning dice
#[derive(Resource, Clone)]
pub struct DiceAssets {
    pub mesh: Handle<Mesh>,
    pub collider: Collider,
    pub material: Handle<StandardMaterial>,
    pub pip_mesh: Handle<Mesh>,
    pub pip_material: Handle<StandardMaterial>,
    pub face_normals: Vec<(Vec3, u32)>,
}

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    dice_config: Res<DiceConfig>,
    throw_input: Res<ThrowInput>,
    rig: Res<CameraRig>,
) {
    commands.spawn((Camera3d::default(), rig.transform(), MainCamera));

    commands.insert_resource(ClearColor(Color::srgb(0.153, 0.153, 0.165)));

    // Lights
    commands.spawn((
        PointLight {
            intensity: 4_000_000.0,
            range: 60.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-5.0, 15.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Dark wood tray
    let wood_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.365, 0.251, 0.216),
        perceptual_roughness: 0.8,
        metallic: 0.1,
        ..default()
    });

    for piece in tray_layout() {
        let (friction, restitution) = if piece.center.y < TRAY_FLOOR_Y {
            (FLOOR_FRICTION, FLOOR_RESTITUTION)
        } else {
            (0.3, 0.3)
        };

        let mut tray_piece = commands.spawn((
            Transform::from_translation(piece.center),
            Collider::cuboid(piece.half_extents.x, piece.half_extents.y, piece.half_extents.z),
            RigidBody::Fixed,
            Restitution::coefficient(restitution),
            Friction::coefficient(friction),
            DiceTray,
        ));

        if piece.visible {
            let size = piece.size();
            tray_piece.insert((
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(wood_mat.clone()),
            ));
        }
    }

    // Dice
    let (die_mesh, collider, face_normals) = create_d6();
    let assets = DiceAssets {
        mesh: meshes.add(die_mesh),
        collider,
        material: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.1,
            metallic: 0.0,
            ..default()
        }),
        pip_mesh: meshes.add(Sphere::new(0.09)),
        pip_material: materials.add(StandardMaterial {
            base_color: Color::BLACK,
            perceptual_roughness: 0.4,
            ..default()
        }),
        face_normals,
    };

    spawn_dice(
        &mut commands,
        &assets,
        dice_config.dice_count,
        throw_input.throw_trigger,
    );
    commands.insert_resource(assets);

    spawn_ui(&mut commands);
}

fn spawn_ui(commands: &mut Commands) {
    // Title and hint
    commands.spawn((
        Text::new("Dice Roller"),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(24.0),
            ..default()
        },
    ));
    commands.spawn((
        Text::new(
            "Long press to shake, release to throw (SPACE works too)\n\
             1-6 or +/- dice count | drag or arrows/A/D orbit | wheel or W/S zoom | R reset view",
        ),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.63, 0.63, 0.67)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(62.0),
            left: Val::Px(24.0),
            ..default()
        },
        HintText,
    ));

    // Results panel
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextColor(Color::srgb(0.98, 0.75, 0.14)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(110.0),
            left: Val::Percent(45.0),
            ..default()
        },
        ResultsText,
    ));

    // Throw button along the bottom edge
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(40.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(320.0),
                        height: Val::Px(80.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(throw_button_color(false)),
                    ThrowButton,
                ))
                .observe(on_throw_button_press)
                .observe(on_throw_button_release)
                .observe(on_throw_button_out)
                .with_children(|button| {
                    button.spawn((
                        Text::new(throw_button_caption(false)),
                        TextFont {
                            font_size: 26.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        // Hovering the label must not count as leaving the button.
                        Pickable::IGNORE,
                        ThrowButtonLabel,
                    ));
                });
        });
}

/// Spawn `count` dice at fresh starting positions
pub fn spawn_dice(
    commands: &mut Commands,
    assets: &DiceAssets,
    count: usize,
    current_trigger: u64,
) {
    let mut rng = rand::thread_rng();
    let pips = pip_transforms(&assets.face_normals);

    for index in 0..count {
        let position = initial_die_position(index, &mut rng);
        commands
            .spawn((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(position),
                RigidBody::Dynamic,
                assets.collider.clone(),
                ColliderMassProperties::Mass(DIE_MASS),
                Friction::coefficient(DIE_FRICTION),
                Restitution::coefficient(DIE_RESTITUTION),
                Velocity::zero(),
                Die::new(index, position, current_trigger),
            ))
            .with_children(|parent| {
                for transform in &pips {
                    parent.spawn((
                        Mesh3d(assets.pip_mesh.clone()),
                        MeshMaterial3d(assets.pip_material.clone()),
                        *transform,
                    ));
                }
            });
    }
}

/// System to respawn the dice and persist the new count when it changes
pub fn respawn_dice_on_count_change(
    mut commands: Commands,
    dice_config: Res<DiceConfig>,
    throw_input: Res<ThrowInput>,
    assets: Option<Res<DiceAssets>>,
    mut dice_results: ResMut<DiceResults>,
    dice_query: Query<Entity, With<Die>>,
) {
    if !dice_config.is_changed() || dice_config.is_added() {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    for entity in dice_query.iter() {
        commands.entity(entity).despawn();
    }

    spawn_dice(
        &mut commands,
        &assets,
        dice_config.dice_count,
        throw_input.throw_trigger,
    );
    dice_results.reset(dice_config.dice_count);

    info!("Dice count set to {}", dice_config.dice_count);

    let settings = AppSettings {
        dice_count: dice_config.dice_count,
    };
    if let Err(e) = settings.save() {
        warn!("Failed to save settings: {e}");
    }
}
