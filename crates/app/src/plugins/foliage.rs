//! Foliage Plugin
//!
//! The needle cloud. Unlike the ornaments, foliage keeps two immutable
//! endpoints per needle and recomputes the blend every frame from the
//! group-wide smoothed morph factor, with the formed endpoint perturbed by
//! the wind field. No per-needle state ever mutates, so a mode flip
//! mid-morph costs nothing and the cloud can never drift out of sync with
//! itself.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use tinsel_common::layout::TreeLayout;
use tinsel_common::mode::TreeMode;
use tinsel_common::morph::{foliage_point, MorphFactor};
use tinsel_common::settings::TreeSettings;
use tinsel_common::wind::{amplitude_from_distortion, WindField};

use super::scene::TreeRoot;
use super::TreeSet;

/// Needle sphere radius before the per-needle size jitter.
const NEEDLE_RADIUS: f32 = 0.08;

// ============================================================================
// Components
// ============================================================================

/// One needle's immutable endpoints.
#[derive(Component)]
struct FoliagePoint {
    chaos: Vec3,
    formed: Vec3,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct FoliagePlugin;

impl Plugin for FoliagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MorphFactor>()
            .add_systems(Startup, spawn_foliage)
            .add_systems(
                Update,
                (advance_morph_factor, animate_foliage)
                    .chain()
                    .in_set(TreeSet::Morph),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Spawn one needle per layout entry, cycling the four-green palette.
fn spawn_foliage(
    mut commands: Commands,
    layout: Res<TreeLayout>,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    root: Query<Entity, With<TreeRoot>>,
) {
    let Ok(root) = root.single() else {
        return;
    };

    let mesh = mesh_assets.add(Sphere::new(NEEDLE_RADIUS).mesh().uv(8, 8));
    let palette = [
        materials.add(needle_material(Color::srgb_u8(46, 125, 50))),
        materials.add(needle_material(Color::srgb_u8(27, 94, 32))),
        materials.add(needle_material(Color::srgb_u8(67, 160, 71))),
        materials.add(needle_material(Color::srgb_u8(102, 187, 106))),
    ];

    // Size jitter is cosmetic only, so it takes its own rng stream and
    // leaves the layout seed alone
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let group = &layout.foliage;
    for (i, (&chaos, &formed)) in group.chaos.iter().zip(&group.target).enumerate() {
        let scale = 0.5 + rng.gen::<f32>();
        commands.spawn((
            FoliagePoint { chaos, formed },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(palette[i % palette.len()].clone()),
            Transform::from_translation(chaos).with_scale(Vec3::splat(scale)),
            ChildOf(root),
        ));
    }
    info!("🌿 Spawned {} needles", group.len());
}

fn needle_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.9,
        ..default()
    }
}

/// Advance the group-wide morph factor toward the mode's destination.
fn advance_morph_factor(time: Res<Time>, mode: Res<TreeMode>, mut factor: ResMut<MorphFactor>) {
    factor.advance(*mode, time.delta_secs());
}

/// Recompute every needle's blended position for this factor and wind phase.
fn animate_foliage(
    time: Res<Time>,
    factor: Res<MorphFactor>,
    wind: Res<WindField>,
    settings: Res<TreeSettings>,
    mut needles: Query<(&FoliagePoint, &mut Transform)>,
) {
    let elapsed = time.elapsed_secs();
    let amplitude = amplitude_from_distortion(settings.distortion);
    for (point, mut transform) in needles.iter_mut() {
        let sway = wind.offset(point.formed, elapsed, amplitude);
        transform.translation = foliage_point(point.chaos, point.formed, sway, factor.0);
    }
}
