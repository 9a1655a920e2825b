//! Ornament Plugin
//!
//! Seven decoration groups hanging off the tree root: gold and red balls,
//! gift boxes, fairy lights, a flowing light cascade, spinning gems, and
//! swinging bells. Each ornament owns its live position and takes one
//! smoothing step per frame toward whichever destination its behavior and
//! the tree mode dictate. Procedural motion (pulse, swing, spin, cascade
//! flow) never pauses, but the cascade flow only steers the destination
//! while the tree is formed; scattered cascade items drift like any other
//! ornament. Resting orientation stays identity except where a behavior
//! animates it.

use bevy::prelude::*;

use tinsel_common::layout::{GroupLayout, TreeLayout};
use tinsel_common::mode::TreeMode;
use tinsel_common::morph::{
    approach, bell_swing, cascade_target, light_pulse, MotionBehavior, GEM_SPIN_RATE,
};

use super::scene::TreeRoot;
use super::TreeSet;
use crate::meshes;

// ============================================================================
// Components
// ============================================================================

/// One ornament's layout constants plus its accumulated spin angle.
#[derive(Component)]
struct Ornament {
    behavior: MotionBehavior,
    chaos: Vec3,
    target: Vec3,
    speed: f32,
    phase: f32,
    spin: f32,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct OrnamentPlugin;

impl Plugin for OrnamentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ornaments)
            .add_systems(Update, animate_ornaments.in_set(TreeSet::Morph));
    }
}

// ============================================================================
// Systems
// ============================================================================

fn spawn_ornaments(
    mut commands: Commands,
    layout: Res<TreeLayout>,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    root: Query<Entity, With<TreeRoot>>,
) {
    let Ok(root) = root.single() else {
        return;
    };

    let ball = mesh_assets.add(Sphere::new(0.2).mesh().uv(16, 16));
    let small_ball = mesh_assets.add(Sphere::new(0.08).mesh().uv(8, 8));
    let gift_box = mesh_assets.add(Cuboid::new(0.6, 0.6, 0.6));
    let gem = mesh_assets.add(meshes::octahedron(0.2));
    let bell = mesh_assets.add(Cone {
        radius: 0.15,
        height: 0.3,
    });

    let gold = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 215, 0),
        metallic: 0.8,
        perceptual_roughness: 0.2,
        ..default()
    });
    let red = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(220, 20, 60),
        metallic: 0.6,
        perceptual_roughness: 0.3,
        ..default()
    });
    let gift_green = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(76, 175, 80),
        ..default()
    });
    // Pale warm glow, emissive well past 1.0 so the bloom pass picks the
    // lights out of the foliage. Shared by the static lights and the cascade.
    let glow = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        emissive: LinearRgba::rgb(4.0, 4.0, 3.5),
        ..default()
    });
    let cyan_glass = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0, 255, 255),
        specular_transmission: 0.9,
        thickness: 1.0,
        perceptual_roughness: 0.0,
        ..default()
    });
    let brass = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 165, 0),
        metallic: 0.9,
        ..default()
    });

    spawn_group(&mut commands, root, &layout.gold_balls, MotionBehavior::Ball, &ball, &gold);
    spawn_group(&mut commands, root, &layout.red_balls, MotionBehavior::Ball, &ball, &red);
    spawn_group(&mut commands, root, &layout.gifts, MotionBehavior::Gift, &gift_box, &gift_green);
    spawn_group(&mut commands, root, &layout.lights, MotionBehavior::Light, &small_ball, &glow);
    spawn_group(&mut commands, root, &layout.cascade, MotionBehavior::Cascade, &small_ball, &glow);
    spawn_group(&mut commands, root, &layout.gems, MotionBehavior::Gem, &gem, &cyan_glass);
    spawn_group(&mut commands, root, &layout.bells, MotionBehavior::Bell, &bell, &brass);

    let total = layout.gold_balls.len()
        + layout.red_balls.len()
        + layout.gifts.len()
        + layout.lights.len()
        + layout.cascade.len()
        + layout.gems.len()
        + layout.bells.len();
    info!("🎁 Spawned {total} ornaments across 7 groups");
}

fn spawn_group(
    commands: &mut Commands,
    root: Entity,
    group: &GroupLayout,
    behavior: MotionBehavior,
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
) {
    for i in 0..group.len() {
        commands.spawn((
            Ornament {
                behavior,
                chaos: group.chaos[i],
                target: group.target[i],
                speed: group.speed[i],
                phase: group.phase[i],
                spin: 0.0,
            },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            // The run opens formed, so ornaments rest on the tree from the
            // first frame.
            Transform::from_translation(group.target[i]),
            ChildOf(root),
        ));
    }
}

fn animate_ornaments(
    time: Res<Time>,
    mode: Res<TreeMode>,
    mut ornaments: Query<(&mut Ornament, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (mut ornament, mut transform) in ornaments.iter_mut() {
        match ornament.behavior {
            MotionBehavior::Light => {
                transform.scale = Vec3::splat(light_pulse(elapsed, ornament.phase));
            }
            MotionBehavior::Bell => {
                transform.rotation = Quat::from_rotation_z(bell_swing(elapsed, ornament.phase));
            }
            MotionBehavior::Gem => {
                ornament.spin += GEM_SPIN_RATE * dt;
                transform.rotation = Quat::from_rotation_y(ornament.spin);
            }
            _ => {}
        }

        let destination = match *mode {
            TreeMode::Chaos => ornament.chaos,
            TreeMode::Formed if ornament.behavior == MotionBehavior::Cascade => {
                cascade_target(ornament.target, ornament.speed, elapsed)
            }
            TreeMode::Formed => ornament.target,
        };
        transform.translation = approach(transform.translation, destination, dt);
    }
}
