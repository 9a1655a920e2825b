//! Topper Plugin
//!
//! The crown of the tree: a faceted gold core with a heartbeat pulse, two
//! tumbling gold rings, a sparkle swarm revolving around the vertical axis,
//! and a gold accent light. The whole assembly hangs off one root entity
//! whose position blends between a parked spot high above the scene and the
//! tree tip, so a mode flip moves the crown as a unit while the children
//! keep their own motion.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use tinsel_common::layout::{SPARKLE_COUNT, TOPPER_CHAOS, TOPPER_FORMED};
use tinsel_common::mode::TreeMode;
use tinsel_common::morph::{
    approach, topper_heartbeat, RING_ONE_RATES, RING_TWO_RATES, SPARKLE_ORBIT_RATE,
};

use super::scene::TreeRoot;
use super::TreeSet;
use crate::meshes;

/// Core circumsphere radius.
const CORE_RADIUS: f32 = 0.8;
/// Sparkle swarm extent, a cube centered on the core.
const SPARKLE_SPREAD: f32 = 4.0;
const SPARKLE_RADIUS: f32 = 0.05;

// ============================================================================
// Components
// ============================================================================

/// The assembly root whose position tracks the tree mode.
#[derive(Component)]
struct TopperRoot;

/// The pulsing core.
#[derive(Component)]
struct TopperCore;

/// A tumbling ring. Orientation is set absolutely every frame from elapsed
/// time, XYZ Euler order, so the tumble never drifts.
#[derive(Component)]
struct TopperRing {
    x_rate: f32,
    y_rate: f32,
    z_rate: f32,
}

/// Parent of the sparkle spheres; revolves about the core's vertical axis.
#[derive(Component)]
struct SparkleSwarm;

// ============================================================================
// Plugin
// ============================================================================

pub struct TopperPlugin;

impl Plugin for TopperPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_topper).add_systems(
            Update,
            (drive_topper, pulse_core, spin_rings, orbit_sparkles).in_set(TreeSet::Morph),
        );
    }
}

// ============================================================================
// Systems
// ============================================================================

fn spawn_topper(
    mut commands: Commands,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tree_root: Query<Entity, With<TreeRoot>>,
) {
    let Ok(tree_root) = tree_root.single() else {
        return;
    };

    let gold = Color::srgb_u8(255, 215, 0);
    let core_mat = materials.add(StandardMaterial {
        base_color: gold,
        emissive: gold.to_linear() * 0.5,
        ..default()
    });
    let ring_mat = materials.add(StandardMaterial {
        base_color: gold,
        metallic: 1.0,
        perceptual_roughness: 0.1,
        ..default()
    });
    let sparkle_mat = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.8),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let root = commands
        .spawn((
            TopperRoot,
            // The run opens formed, so the crown starts at the tip.
            Transform::from_translation(TOPPER_FORMED),
            Visibility::default(),
            ChildOf(tree_root),
        ))
        .id();

    commands.spawn((
        TopperCore,
        Mesh3d(mesh_assets.add(meshes::icosahedron(CORE_RADIUS))),
        MeshMaterial3d(core_mat),
        Transform::default(),
        ChildOf(root),
    ));

    commands.spawn((
        PointLight {
            color: gold,
            intensity: 300_000.0,
            range: 5.0,
            ..default()
        },
        Transform::default(),
        ChildOf(root),
    ));

    let ring_mesh = |major: f32| Torus {
        minor_radius: 0.05,
        major_radius: major,
    };
    commands.spawn((
        TopperRing {
            x_rate: RING_ONE_RATES.0,
            y_rate: RING_ONE_RATES.1,
            z_rate: 0.0,
        },
        Mesh3d(mesh_assets.add(ring_mesh(1.2))),
        MeshMaterial3d(ring_mat.clone()),
        Transform::default(),
        ChildOf(root),
    ));
    commands.spawn((
        TopperRing {
            x_rate: RING_TWO_RATES.0,
            y_rate: 0.0,
            z_rate: RING_TWO_RATES.1,
        },
        Mesh3d(mesh_assets.add(ring_mesh(1.0))),
        MeshMaterial3d(ring_mat),
        Transform::default(),
        ChildOf(root),
    ));

    let swarm = commands
        .spawn((
            SparkleSwarm,
            Transform::default(),
            Visibility::default(),
            ChildOf(root),
        ))
        .id();
    let sparkle_mesh = mesh_assets.add(Sphere::new(SPARKLE_RADIUS).mesh().uv(8, 8));
    let mut rng = StdRng::seed_from_u64(0x57A8);
    for _ in 0..SPARKLE_COUNT {
        let offset = Vec3::new(
            (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
            (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
            (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
        );
        commands.spawn((
            Mesh3d(sparkle_mesh.clone()),
            MeshMaterial3d(sparkle_mat.clone()),
            Transform::from_translation(offset),
            ChildOf(swarm),
        ));
    }

    info!("⭐ Spawned topper with {SPARKLE_COUNT} sparkles");
}

/// Blend the assembly root toward the spot for the current mode.
fn drive_topper(
    time: Res<Time>,
    mode: Res<TreeMode>,
    mut root: Query<&mut Transform, With<TopperRoot>>,
) {
    let Ok(mut transform) = root.single_mut() else {
        return;
    };
    let destination = match *mode {
        TreeMode::Formed => TOPPER_FORMED,
        TreeMode::Chaos => TOPPER_CHAOS,
    };
    transform.translation = approach(transform.translation, destination, time.delta_secs());
}

fn pulse_core(time: Res<Time>, mut core: Query<&mut Transform, With<TopperCore>>) {
    let Ok(mut transform) = core.single_mut() else {
        return;
    };
    transform.scale = Vec3::splat(topper_heartbeat(time.elapsed_secs()));
}

fn spin_rings(time: Res<Time>, mut rings: Query<(&TopperRing, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (ring, mut transform) in rings.iter_mut() {
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            t * ring.x_rate,
            t * ring.y_rate,
            t * ring.z_rate,
        );
    }
}

fn orbit_sparkles(time: Res<Time>, mut swarm: Query<&mut Transform, With<SparkleSwarm>>) {
    let Ok(mut transform) = swarm.single_mut() else {
        return;
    };
    transform.rotate_y(SPARKLE_ORBIT_RATE * time.delta_secs());
}
