//! # Layout Generation
//!
//! Seeded, pure generation of the immutable position tables every morph
//! group blends between: a dispersed chaos scatter and a formed tree shape.
//! Generation runs exactly once at startup; afterwards only the live
//! transforms move. Each item's chaos/target pair stays paired for the
//! process lifetime.
//!
//! The formed tree is a cone 16 units tall (y in [-8, 8]) with a 5.5-unit
//! base radius. Ornaments hang on the cone surface, foliage fills its
//! volume, gifts sit in a ring on the floor around the trunk.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

// ============================================================================
// Tree Shape Constants
// ============================================================================

/// Total height of the formed cone.
pub const TREE_HEIGHT: f32 = 16.0;
/// Bottom of the cone (the floor plane).
pub const TREE_MIN_Y: f32 = -8.0;
/// Top of the cone.
pub const TREE_MAX_Y: f32 = 8.0;
/// Cone radius at the floor.
pub const TREE_BASE_RADIUS: f32 = 5.5;
/// Extra radius for cascade items so the flowing trails ride just outside
/// the foliage instead of disappearing into it.
pub const CASCADE_RADIUS_PAD: f32 = 0.2;

/// Where the topper rests in each configuration.
pub const TOPPER_CHAOS: Vec3 = Vec3::new(0.0, 20.0, 0.0);
pub const TOPPER_FORMED: Vec3 = Vec3::new(0.0, 8.5, 0.0);

/// Cone radius at height `y`: full base radius at the floor, tapering to a
/// point at the tip.
pub fn cone_radius(y: f32) -> f32 {
    TREE_BASE_RADIUS * (1.0 - (y - TREE_MIN_Y) / TREE_HEIGHT)
}

/// Radius of the cascade flow band at height `y`. Also used by the cascade
/// resolver to keep flowing items on this shell every frame.
pub fn cascade_radius(y: f32) -> f32 {
    cone_radius(y) + CASCADE_RADIUS_PAD
}

// ============================================================================
// Group Counts
// ============================================================================

/// Foliage point count before the density multiplier.
pub const FOLIAGE_COUNT: usize = 2500;
pub const GOLD_BALL_COUNT: usize = 200;
pub const RED_BALL_COUNT: usize = 200;
pub const GIFT_COUNT: usize = 150;
pub const LIGHT_COUNT: usize = 600;
pub const CASCADE_COUNT: usize = 300;
pub const GEM_COUNT: usize = 200;
pub const BELL_COUNT: usize = 150;
/// Sparkle count in the topper's orbit belt.
pub const SPARKLE_COUNT: usize = 80;

// ============================================================================
// LayoutParams
// ============================================================================

/// Inputs to layout generation. Same params, same layout.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    /// RNG seed; fixed by default so successive runs look identical.
    pub seed: u64,
    /// Multiplier on the foliage count.
    pub density: f32,
    /// Radius of the chaos scatter sphere.
    pub field_radius: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            seed: 1225,
            density: 1.0,
            field_radius: 22.59,
        }
    }
}

// ============================================================================
// GroupLayout / TreeLayout
// ============================================================================

/// The immutable per-item tables for one entity group. All four vectors
/// share the same length.
#[derive(Clone, Debug, Default)]
pub struct GroupLayout {
    /// Resting position in the dispersed configuration.
    pub chaos: Vec<Vec3>,
    /// Resting position in the formed configuration.
    pub target: Vec<Vec3>,
    /// Per-item motion speed (cascade flow rate, oscillation rate).
    pub speed: Vec<f32>,
    /// Per-item oscillation phase offset.
    pub phase: Vec<f32>,
}

impl GroupLayout {
    pub fn len(&self) -> usize {
        self.chaos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chaos.is_empty()
    }
}

/// Every group's layout, generated in one pass from one seed.
#[derive(Resource, Clone, Debug)]
pub struct TreeLayout {
    pub foliage: GroupLayout,
    pub gold_balls: GroupLayout,
    pub red_balls: GroupLayout,
    pub gifts: GroupLayout,
    pub lights: GroupLayout,
    pub cascade: GroupLayout,
    pub gems: GroupLayout,
    pub bells: GroupLayout,
}

// ============================================================================
// Generation
// ============================================================================

/// Generate the full tree layout from one seed.
pub fn generate(params: &LayoutParams) -> TreeLayout {
    let mut rng = StdRng::seed_from_u64(params.seed);

    let foliage_count =
        ((FOLIAGE_COUNT as f32 * params.density.max(0.0)).round() as usize).max(1);
    let ornament_radius = params.field_radius;
    // Foliage scatters tighter so the ornaments read as the outermost shell
    // of the cloud.
    let foliage_radius = params.field_radius * 0.8;

    TreeLayout {
        foliage: build_group(&mut rng, foliage_count, foliage_radius, cone_volume_point),
        gold_balls: build_group(&mut rng, GOLD_BALL_COUNT, ornament_radius, cone_surface_point),
        red_balls: build_group(&mut rng, RED_BALL_COUNT, ornament_radius, cone_surface_point),
        gifts: build_group(&mut rng, GIFT_COUNT, ornament_radius, floor_ring_point),
        lights: build_group(&mut rng, LIGHT_COUNT, ornament_radius, cone_surface_point),
        cascade: build_group(&mut rng, CASCADE_COUNT, ornament_radius, cascade_band_point),
        gems: build_group(&mut rng, GEM_COUNT, ornament_radius, cone_surface_point),
        bells: build_group(&mut rng, BELL_COUNT, ornament_radius, cone_surface_point),
    }
}

fn build_group(
    rng: &mut StdRng,
    count: usize,
    chaos_radius: f32,
    formed: fn(&mut StdRng) -> Vec3,
) -> GroupLayout {
    let mut layout = GroupLayout {
        chaos: Vec::with_capacity(count),
        target: Vec::with_capacity(count),
        speed: Vec::with_capacity(count),
        phase: Vec::with_capacity(count),
    };
    for _ in 0..count {
        layout.chaos.push(sphere_scatter(rng, chaos_radius));
        layout.target.push(formed(rng));
        layout.speed.push(0.5 + rng.gen::<f32>() * 1.5);
        layout.phase.push(rng.gen::<f32>() * TAU);
    }
    layout
}

/// Uniform point inside a sphere of the given radius. The cube root keeps
/// the radial density uniform instead of clumping at the center.
fn sphere_scatter(rng: &mut StdRng, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
}

/// Random point on the cone surface, where ornaments hang.
fn cone_surface_point(rng: &mut StdRng) -> Vec3 {
    let y = TREE_MIN_Y + rng.gen::<f32>() * TREE_HEIGHT;
    let radius = cone_radius(y);
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Random point on the padded shell the cascade flows along.
fn cascade_band_point(rng: &mut StdRng) -> Vec3 {
    let y = TREE_MIN_Y + rng.gen::<f32>() * TREE_HEIGHT;
    let radius = cascade_radius(y);
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Random point inside the cone volume, where foliage lives. The square
/// root keeps the disk density uniform at each height.
fn cone_volume_point(rng: &mut StdRng) -> Vec3 {
    let y = TREE_MIN_Y + rng.gen::<f32>() * TREE_HEIGHT;
    let radius = cone_radius(y) * rng.gen::<f32>().sqrt();
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Random point in the gift ring on the floor around the trunk.
fn floor_ring_point(rng: &mut StdRng) -> Vec3 {
    let radius = 3.0 + rng.gen::<f32>() * 4.0;
    let angle = rng.gen::<f32>() * TAU;
    let y = TREE_MIN_Y + rng.gen::<f32>();
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let layout = generate(&LayoutParams::default());
        assert_eq!(layout.foliage.len(), FOLIAGE_COUNT);
        assert_eq!(layout.gold_balls.len(), GOLD_BALL_COUNT);
        assert_eq!(layout.red_balls.len(), RED_BALL_COUNT);
        assert_eq!(layout.gifts.len(), GIFT_COUNT);
        assert_eq!(layout.lights.len(), LIGHT_COUNT);
        assert_eq!(layout.cascade.len(), CASCADE_COUNT);
        assert_eq!(layout.gems.len(), GEM_COUNT);
        assert_eq!(layout.bells.len(), BELL_COUNT);
    }

    #[test]
    fn test_density_scales_foliage_only() {
        let params = LayoutParams {
            density: 0.5,
            ..LayoutParams::default()
        };
        let layout = generate(&params);
        assert_eq!(layout.foliage.len(), FOLIAGE_COUNT / 2);
        assert_eq!(layout.lights.len(), LIGHT_COUNT);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate(&LayoutParams::default());
        let b = generate(&LayoutParams::default());
        assert_eq!(a.foliage.chaos, b.foliage.chaos);
        assert_eq!(a.cascade.target, b.cascade.target);
        assert_eq!(a.bells.phase, b.bells.phase);
    }

    #[test]
    fn test_different_seed_different_layout() {
        let a = generate(&LayoutParams::default());
        let b = generate(&LayoutParams {
            seed: 42,
            ..LayoutParams::default()
        });
        assert_ne!(a.foliage.chaos[0], b.foliage.chaos[0]);
    }

    #[test]
    fn test_chaos_within_field_radius() {
        let params = LayoutParams::default();
        let layout = generate(&params);
        for p in layout.gold_balls.chaos.iter().chain(&layout.gifts.chaos) {
            assert!(p.length() <= params.field_radius + 1e-3);
        }
        for p in &layout.foliage.chaos {
            assert!(p.length() <= params.field_radius * 0.8 + 1e-3);
        }
    }

    #[test]
    fn test_foliage_inside_cone() {
        let layout = generate(&LayoutParams::default());
        for p in &layout.foliage.target {
            assert!(p.y >= TREE_MIN_Y && p.y <= TREE_MAX_Y);
            let radial = Vec2::new(p.x, p.z).length();
            assert!(radial <= cone_radius(p.y) + 1e-3);
        }
    }

    #[test]
    fn test_ornaments_on_cone_surface() {
        let layout = generate(&LayoutParams::default());
        for p in layout.lights.target.iter().chain(&layout.bells.target) {
            let radial = Vec2::new(p.x, p.z).length();
            assert!((radial - cone_radius(p.y)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cascade_band_is_padded() {
        let layout = generate(&LayoutParams::default());
        for p in &layout.cascade.target {
            let radial = Vec2::new(p.x, p.z).length();
            assert!((radial - cascade_radius(p.y)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_gifts_sit_on_floor_ring() {
        let layout = generate(&LayoutParams::default());
        for p in &layout.gifts.target {
            let radial = Vec2::new(p.x, p.z).length();
            assert!((3.0..=7.0).contains(&radial));
            assert!(p.y >= TREE_MIN_Y && p.y <= TREE_MIN_Y + 1.0);
        }
    }

    #[test]
    fn test_speed_and_phase_ranges() {
        let layout = generate(&LayoutParams::default());
        for &s in &layout.cascade.speed {
            assert!((0.5..=2.0).contains(&s));
        }
        for &p in &layout.bells.phase {
            assert!((0.0..=TAU).contains(&p));
        }
    }
}
