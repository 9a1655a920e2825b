//! Scripted hand choreography for running without a camera.
//!
//! Loops through the full gesture vocabulary so every mode transition and
//! the position-driven sway can be exercised on any machine: an open palm
//! sweeping side to side, then a pinch, then a fist, then a gap with no
//! hand at all.

use std::time::Duration;

use bevy::math::{Vec2, Vec3};

use tinsel_common::hand::{HandLandmarks, LANDMARK_COUNT};

use crate::session::{LandmarkSource, TrackingError};

/// Phase boundaries of the choreography loop, in seconds.
const SWEEP_END: f64 = 5.0;
const PINCH_END: f64 = 8.0;
const FIST_END: f64 = 10.0;
const CYCLE: f64 = 12.0;

/// Looping scripted landmark generator. Stateless: the pose is a pure
/// function of elapsed time.
#[derive(Default)]
pub struct SyntheticHandSource;

impl LandmarkSource for SyntheticHandSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn start(&mut self) -> Result<(), TrackingError> {
        Ok(())
    }

    fn next_frame(&mut self, elapsed: f64) -> Option<HandLandmarks> {
        let t = elapsed % CYCLE;
        if t < SWEEP_END {
            // Open palm drifting across the frame, driving the sway.
            let center = Vec2::new(
                0.5 + 0.3 * (t * 0.9).sin() as f32,
                0.45 + 0.05 * (t * 0.5).sin() as f32,
            );
            Some(open_pose(center))
        } else if t < PINCH_END {
            Some(pinch_pose(Vec2::new(0.5, 0.45)))
        } else if t < FIST_END {
            Some(fist_pose(Vec2::new(0.5, 0.5)))
        } else {
            None
        }
    }

    fn cadence(&self) -> Duration {
        Duration::from_millis(33)
    }
}

// ============================================================================
// Pose construction
// ============================================================================

/// Build a full 21-point skeleton around a palm center in image space.
///
/// Image y grows downward, so extended fingers reach toward smaller y and
/// the wrist sits below the palm. Each non-thumb finger is either extended
/// upward or curled back in front of the palm.
fn hand_pose(center: Vec2, extended: [bool; 4], thumb_tip: Vec2) -> HandLandmarks {
    let at = |dx: f32, dy: f32| Vec3::new(center.x + dx, center.y + dy, 0.0);
    let mut points = [Vec3::ZERO; LANDMARK_COUNT];

    points[0] = at(0.0, 0.18); // wrist

    // Thumb chain fanning out to the side; the tip is caller-controlled.
    points[1] = at(-0.06, 0.14);
    points[2] = at(-0.10, 0.10);
    points[3] = at(-0.13, 0.06);
    points[4] = Vec3::new(thumb_tip.x, thumb_tip.y, 0.0);

    // (mcp landmark, mcp x offset, mcp y offset) per finger, index to pinky.
    let columns = [
        (5, -0.050, 0.000),
        (9, 0.000, 0.000),
        (13, 0.045, 0.005),
        (17, 0.085, 0.015),
    ];
    for (i, (mcp, dx, dy)) in columns.into_iter().enumerate() {
        points[mcp] = at(dx, dy);
        if extended[i] {
            points[mcp + 1] = at(dx, dy - 0.055);
            points[mcp + 2] = at(dx, dy - 0.095);
            points[mcp + 3] = at(dx, dy - 0.130);
        } else {
            // Folded down in front of the palm: tip ends up nearer the
            // wrist than the PIP joint.
            points[mcp + 1] = at(dx, dy - 0.050);
            points[mcp + 2] = at(dx + 0.005, dy - 0.010);
            points[mcp + 3] = at(dx + 0.005, dy + 0.030);
        }
    }

    HandLandmarks(points)
}

fn open_pose(center: Vec2) -> HandLandmarks {
    hand_pose(
        center,
        [true; 4],
        Vec2::new(center.x - 0.16, center.y + 0.02),
    )
}

fn pinch_pose(center: Vec2) -> HandLandmarks {
    let mut pose = hand_pose(center, [true; 4], Vec2::ZERO);
    let index_tip = pose.index_tip();
    pose.0[4] = index_tip + Vec3::new(0.015, 0.012, 0.0);
    pose
}

fn fist_pose(center: Vec2) -> HandLandmarks {
    hand_pose(center, [false; 4], Vec2::new(center.x, center.y + 0.10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinsel_common::gesture::{classify, hand_position, GestureKind};

    fn frame_at(t: f64) -> Option<HandLandmarks> {
        SyntheticHandSource.next_frame(t)
    }

    #[test]
    fn test_sweep_phase_reads_open() {
        let hand = frame_at(1.0).unwrap();
        assert_eq!(classify(&hand), GestureKind::Open);
    }

    #[test]
    fn test_pinch_phase_reads_pinch() {
        let hand = frame_at(6.0).unwrap();
        assert_eq!(classify(&hand), GestureKind::Pinch);
    }

    #[test]
    fn test_fist_phase_reads_fist() {
        let hand = frame_at(9.0).unwrap();
        assert_eq!(classify(&hand), GestureKind::Fist);
    }

    #[test]
    fn test_absent_phase_yields_nothing() {
        assert!(frame_at(11.0).is_none());
    }

    #[test]
    fn test_choreography_loops() {
        for t in [1.0, 6.0, 9.0, 11.0] {
            let a = frame_at(t).map(|h| classify(&h));
            let b = frame_at(t + CYCLE).map(|h| classify(&h));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_sweep_moves_the_hand() {
        let early = hand_position(&frame_at(0.5).unwrap());
        let late = hand_position(&frame_at(2.5).unwrap());
        assert!((early.x - late.x).abs() > 0.05);
    }
}
