//! Scene Plugin
//!
//! Camera, lights, starfield, floor grid, and the spinning tree root every
//! morph group parents to. Also owns layout generation (`PreStartup`, so the
//! position tables exist before any group spawns) and the idle camera orbit
//! that kicks in once the tree is formed and no hand is visible.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

use tinsel_common::gesture::GestureState;
use tinsel_common::layout::{self, LayoutParams, TREE_MIN_Y};
use tinsel_common::mode::TreeMode;
use tinsel_common::settings::TreeSettings;
use tinsel_common::wind::WindField;

use crate::meshes;

// ============================================================================
// Constants
// ============================================================================

/// Camera rest position; the idle orbit swings it around the Y axis.
const CAMERA_HOME: Vec3 = Vec3::new(0.0, 0.0, 25.0);

/// Idle orbit rate, radians per second.
const AUTO_ORBIT_RATE: f32 = 0.05;

/// Starfield shell: count, inner radius, and radial depth.
const STAR_COUNT: usize = 5000;
const STAR_RADIUS: f32 = 100.0;
const STAR_DEPTH: f32 = 50.0;

/// Floor grid full extent in cells and the gold section interval.
const GRID_SIZE: i32 = 30;
const GRID_SECTION: i32 = 5;

// ============================================================================
// Components
// ============================================================================

/// Root entity all morph groups parent to; the idle spin and the uniform
/// scale from settings are applied here so children stay in tree space.
#[derive(Component)]
pub struct TreeRoot;

/// Accumulated yaw of the idle camera orbit.
#[derive(Component, Default)]
pub struct OrbitCamera {
    yaw: f32,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        // Layout and root land in PreStartup so the group spawners can rely
        // on both during Startup
        app.add_systems(PreStartup, (generate_layout, spawn_tree_root))
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    auto_orbit_camera,
                    drive_tree_root,
                    draw_floor_grid,
                ),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Build the immutable chaos/target tables and the wind field. Density and
/// field radius are layout-time inputs, so edits from the panel apply on the
/// next run.
fn generate_layout(mut commands: Commands, settings: Res<TreeSettings>) {
    let params = LayoutParams {
        density: settings.density,
        field_radius: settings.field_radius,
        ..default()
    };
    let tree = layout::generate(&params);
    let ornaments = tree.gold_balls.len()
        + tree.red_balls.len()
        + tree.gifts.len()
        + tree.lights.len()
        + tree.cascade.len()
        + tree.gems.len()
        + tree.bells.len();
    info!(
        "🎄 Layout ready: {} foliage + {} ornaments",
        tree.foliage.len(),
        ornaments
    );
    commands.insert_resource(WindField::new(params.seed as u32));
    commands.insert_resource(tree);
}

/// Spawn the root every morph group parents to.
fn spawn_tree_root(mut commands: Commands, settings: Res<TreeSettings>) {
    commands.spawn((
        TreeRoot,
        Transform::from_scale(Vec3::splat(settings.scale)),
        Visibility::default(),
    ));
}

/// Spawn the camera, lights, and starfield.
fn setup_scene(
    mut commands: Commands,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Reinhard tonemapping avoids the magenta bug from missing LUT textures.
    // Bloom pulls in the Hdr render target it needs.
    commands.spawn((
        Camera3d::default(),
        Tonemapping::Reinhard,
        Bloom::NATURAL,
        Projection::Perspective(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_HOME).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::default(),
    ));

    // Dim ambient so the emissive ornaments carry the frame
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 60.0,
        affects_lightmapped_meshes: true,
    });

    // Warm key light and cool fill at half strength
    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.95, 0.85),
            intensity: 2_000_000.0,
            range: 80.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb(0.75, 0.82, 1.0),
            intensity: 1_000_000.0,
            range: 80.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, -10.0),
    ));

    // Starfield shell far outside the playfield
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let stars: Vec<[f32; 3]> = (0..STAR_COUNT)
        .map(|_| {
            let r = STAR_RADIUS + rng.gen::<f32>() * STAR_DEPTH;
            let theta = rng.gen::<f32>() * TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            [
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            ]
        })
        .collect();
    commands.spawn((
        Mesh3d(mesh_assets.add(meshes::point_cloud(stars))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.9),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Glide the camera around the tree while it is formed and unattended.
/// The yaw persists, so steering away and back never snaps the view.
fn auto_orbit_camera(
    time: Res<Time>,
    mode: Res<TreeMode>,
    gesture: Res<GestureState>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    if *mode != TreeMode::Formed || gesture.hand_detected() {
        return;
    }
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };
    orbit.yaw = (orbit.yaw + AUTO_ORBIT_RATE * time.delta_secs()) % TAU;
    transform.translation = Quat::from_rotation_y(orbit.yaw) * CAMERA_HOME;
    transform.look_at(Vec3::ZERO, Vec3::Y);
}

/// Apply the live spin and scale settings to the tree root.
fn drive_tree_root(
    time: Res<Time>,
    settings: Res<TreeSettings>,
    mut query: Query<&mut Transform, With<TreeRoot>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    transform.rotate_y(settings.spin * time.delta_secs());
    transform.scale = Vec3::splat(settings.scale);
}

/// Green floor grid with gold section lines every few cells, drawn at the
/// base of the tree.
fn draw_floor_grid(mut gizmos: Gizmos) {
    let half = GRID_SIZE as f32 / 2.0;
    let cell = Color::srgba_u8(46, 125, 50, 140);
    let section = Color::srgba_u8(255, 215, 0, 200);
    for i in -GRID_SIZE / 2..=GRID_SIZE / 2 {
        let color = if i % GRID_SECTION == 0 { section } else { cell };
        let offset = i as f32;
        gizmos.line(
            Vec3::new(offset, TREE_MIN_Y, -half),
            Vec3::new(offset, TREE_MIN_Y, half),
            color,
        );
        gizmos.line(
            Vec3::new(-half, TREE_MIN_Y, offset),
            Vec3::new(half, TREE_MIN_Y, offset),
            color,
        );
    }
}
