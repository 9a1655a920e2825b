//! # Hand Landmark Topology
//!
//! Index constants and connection pairs for the standard 21-point hand pose
//! layout delivered by landmark detectors. Coordinates are image-normalized:
//! `x` and `y` in `[0, 1]` with the origin at the top-left of the camera
//! frame, `z` a small relative depth.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Landmark Indices
// ============================================================================

/// Number of landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
/// Middle-finger metacarpal base, the reference point for hand position.
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// The four non-thumb fingers as `(pip, tip)` index pairs, used by the
/// open/curled check.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_PIP, INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP, RING_TIP),
    (PINKY_PIP, PINKY_TIP),
];

/// Skeleton edges for the 2D overlay: thumb, four fingers, and the palm arc.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // Index
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky + palm edge
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

// ============================================================================
// HandLandmarks
// ============================================================================

/// One frame's landmark set for a single detected hand.
///
/// Fixed-size by construction, so every index lookup in the classifier is
/// total; there is no out-of-bounds path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks(pub [Vec3; LANDMARK_COUNT]);

impl HandLandmarks {
    /// All landmarks at the origin. Useful as a scratch value to build poses.
    pub fn zeroed() -> Self {
        Self([Vec3::ZERO; LANDMARK_COUNT])
    }

    pub fn wrist(&self) -> Vec3 {
        self.0[WRIST]
    }

    pub fn thumb_tip(&self) -> Vec3 {
        self.0[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Vec3 {
        self.0[INDEX_TIP]
    }

    /// The position reference landmark (middle-finger MCP, palm center).
    pub fn reference(&self) -> Vec3 {
        self.0[MIDDLE_MCP]
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_in_range() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < LANDMARK_COUNT);
            assert!(b < LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_finger_pairs_in_range() {
        for (pip, tip) in FINGERS {
            assert!(pip < tip, "tip index follows pip index");
            assert!(tip < LANDMARK_COUNT);
        }
    }
}
