//! # Wind Field
//!
//! Smooth Perlin displacement applied to the foliage's formed endpoints so
//! the assembled tree breathes instead of freezing solid. The field is a
//! pure function of the point's formed position and elapsed time, so two
//! neighboring needles sway together and the motion loops nowhere.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

/// Scales the unitless distortion setting into world units. The default
/// distortion of 0.008 lands at about 0.2 units of sway.
pub const WIND_GAIN: f32 = 25.0;

/// Wind amplitude in world units for a distortion setting value.
pub fn amplitude_from_distortion(distortion: f32) -> f32 {
    distortion * WIND_GAIN
}

/// Seeded Perlin wind sampler.
#[derive(Resource, Clone)]
pub struct WindField {
    perlin: Perlin,
}

impl WindField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Displacement for a point at `formed` after `elapsed` seconds.
    ///
    /// One noise sample drives both horizontal axes; the vertical axis is
    /// left alone so the silhouette of the cone stays crisp.
    pub fn offset(&self, formed: Vec3, elapsed: f32, amplitude: f32) -> Vec3 {
        let n = self.perlin.get([
            f64::from(formed.x) * 0.5,
            f64::from(formed.y) * 0.5,
            f64::from(elapsed) * 0.5,
        ]) as f32;
        Vec3::new(n * amplitude, 0.0, n * amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distortion_amplitude() {
        assert!((amplitude_from_distortion(0.008) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_offset_is_horizontal_and_bounded() {
        let wind = WindField::new(7);
        let amplitude = 0.2;
        let mut t = 0.0_f32;
        while t < 20.0 {
            let o = wind.offset(Vec3::new(1.3, -4.2, 2.7), t, amplitude);
            assert_eq!(o.y, 0.0);
            assert!(o.x.abs() <= amplitude * 1.5);
            assert!(o.z.abs() <= amplitude * 1.5);
            t += 0.31;
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = WindField::new(11);
        let b = WindField::new(11);
        let p = Vec3::new(0.4, 1.9, -2.2);
        assert_eq!(a.offset(p, 3.1, 0.2), b.offset(p, 3.1, 0.2));
    }

    #[test]
    fn test_zero_amplitude_is_still() {
        let wind = WindField::new(3);
        assert_eq!(wind.offset(Vec3::splat(1.0), 5.0, 0.0), Vec3::ZERO);
    }
}
