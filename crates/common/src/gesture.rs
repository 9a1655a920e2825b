//! # Gesture Classification
//!
//! Turns one frame's hand landmarks into a discrete gesture symbol and a
//! normalized 2D hand position. Pure functions of the landmark set, no
//! state, no I/O, no failure paths.
//!
//! ## Classification
//!
//! A finger counts as *open* when its tip lies farther from the wrist than
//! its PIP joint does. That is a curl proxy, not a true joint-angle check,
//! but it is cheap and robust across hand sizes because both distances scale
//! together.
//!
//! Priority order: fist, then pinch, then open palm. An ambiguous pose (some
//! fingers curled, no pinch) resolves to [`GestureKind::None`] silently.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hand::{HandLandmarks, FINGERS, THUMB_TIP, INDEX_TIP, WRIST};

/// Thumb-tip to index-tip distance below which a pose reads as a pinch,
/// in normalized image units.
pub const PINCH_THRESHOLD: f32 = 0.05;

// ============================================================================
// GestureKind
// ============================================================================

/// Discrete gesture symbol produced by the classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    /// All four fingers extended; scatters the tree.
    Open,
    /// Thumb and index tip touching; forms the tree.
    Pinch,
    /// All four fingers curled; forms the tree.
    Fist,
    /// Ambiguous pose or no hand. Holds the current mode.
    #[default]
    None,
}

// ============================================================================
// Classification
// ============================================================================

/// True when the finger's tip is farther from the wrist than its PIP joint.
fn finger_open(landmarks: &HandLandmarks, pip: usize, tip: usize) -> bool {
    let wrist = landmarks.point(WRIST);
    wrist.distance(landmarks.point(tip)) > wrist.distance(landmarks.point(pip))
}

/// Classify one frame's landmarks into a gesture symbol.
///
/// Deterministic: the same landmark set always yields the same symbol.
pub fn classify(landmarks: &HandLandmarks) -> GestureKind {
    let open_count = FINGERS
        .iter()
        .filter(|(pip, tip)| finger_open(landmarks, *pip, *tip))
        .count();

    // Fist wins outright: every non-thumb finger curled.
    if open_count == 0 {
        return GestureKind::Fist;
    }

    // Pinch is checked before the open palm so a pinch with splayed fingers
    // still reads as a pinch. Depth is ignored on purpose: the detector's
    // z estimate is too noisy at pinch distances.
    let thumb = landmarks.point(THUMB_TIP).truncate();
    let index = landmarks.point(INDEX_TIP).truncate();
    if thumb.distance(index) < PINCH_THRESHOLD {
        return GestureKind::Pinch;
    }

    if open_count == FINGERS.len() {
        return GestureKind::Open;
    }

    GestureKind::None
}

/// Normalized hand position from the palm-center landmark, mapped to
/// `[-1, 1]²` with the X axis mirrored to undo the camera's mirroring and
/// the Y axis flipped from image space to world-up.
pub fn hand_position(landmarks: &HandLandmarks) -> Vec2 {
    let p = landmarks.reference();
    Vec2::new((1.0 - p.x) * 2.0 - 1.0, -(p.y * 2.0 - 1.0))
}

// ============================================================================
// GestureState
// ============================================================================

/// Latest classified gesture, shared with the mode controller and the HUD.
///
/// `hand_position` deliberately holds its last value while no hand is
/// visible; `kind` and `hand` reset so the mode holds and the skeleton
/// overlay clears.
#[derive(Resource, Clone, Debug)]
pub struct GestureState {
    /// Current gesture symbol; `None` when the hand is absent or ambiguous.
    pub kind: GestureKind,
    /// Last known hand position in `[-1, 1]²`.
    pub hand_position: Vec2,
    /// Raw landmarks for the overlay; cleared the frame the hand vanishes.
    pub hand: Option<HandLandmarks>,
    /// Producer timestamp of the most recent sample, seconds.
    pub last_timestamp: f64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            kind: GestureKind::None,
            hand_position: Vec2::ZERO,
            hand: None,
            last_timestamp: 0.0,
        }
    }
}

impl GestureState {
    /// Fold one landmark sample into the state.
    pub fn apply(&mut self, hand: Option<&HandLandmarks>, timestamp: f64) {
        self.last_timestamp = timestamp;
        match hand {
            Some(landmarks) => {
                self.kind = classify(landmarks);
                self.hand_position = hand_position(landmarks);
                self.hand = Some(landmarks.clone());
            }
            None => {
                self.kind = GestureKind::None;
                self.hand = None;
                // hand_position keeps its last value on purpose
            }
        }
    }

    pub fn hand_detected(&self) -> bool {
        self.hand.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{LANDMARK_COUNT, MIDDLE_MCP};

    /// Build a pose with the wrist low in the frame and each non-thumb
    /// finger either extended upward or curled back toward the wrist.
    fn pose(extended: [bool; 4], thumb_tip: Vec3) -> HandLandmarks {
        let wrist = Vec3::new(0.5, 0.8, 0.0);
        let mut points = [wrist; LANDMARK_COUNT];
        let tip_x = [0.42, 0.47, 0.53, 0.58];
        for (i, (pip, tip)) in FINGERS.iter().enumerate() {
            let dir = (Vec3::new(tip_x[i], 0.5, 0.0) - wrist).normalize();
            points[*pip] = wrist + dir * 0.16;
            points[*tip] = if extended[i] {
                wrist + dir * 0.32
            } else {
                wrist + dir * 0.08
            };
        }
        points[THUMB_TIP] = thumb_tip;
        points[MIDDLE_MCP] = Vec3::new(0.5, 0.65, 0.0);
        HandLandmarks(points)
    }

    fn open_hand() -> HandLandmarks {
        pose([true; 4], Vec3::new(0.30, 0.60, 0.0))
    }

    fn fist_hand() -> HandLandmarks {
        pose([false; 4], Vec3::new(0.45, 0.70, 0.0))
    }

    fn pinch_hand() -> HandLandmarks {
        // Fingers splayed, thumb tip 0.02 from the index tip.
        let mut p = pose([true; 4], Vec3::ZERO);
        let index = p.point(INDEX_TIP);
        p.0[THUMB_TIP] = index + Vec3::new(0.02, 0.0, 0.0);
        p
    }

    #[test]
    fn test_classify_open() {
        assert_eq!(classify(&open_hand()), GestureKind::Open);
    }

    #[test]
    fn test_classify_fist() {
        assert_eq!(classify(&fist_hand()), GestureKind::Fist);
    }

    #[test]
    fn test_pinch_beats_open() {
        // All four fingers extended, so the fist check fails and the pinch
        // check must win before the open-palm check is reached.
        assert_eq!(classify(&pinch_hand()), GestureKind::Pinch);
    }

    #[test]
    fn test_ambiguous_is_none() {
        let half = pose([true, true, false, false], Vec3::new(0.30, 0.60, 0.0));
        assert_eq!(classify(&half), GestureKind::None);
    }

    #[test]
    fn test_classify_deterministic() {
        let hand = pinch_hand();
        let first = classify(&hand);
        for _ in 0..10 {
            assert_eq!(classify(&hand), first);
        }
    }

    #[test]
    fn test_hand_position_mapping() {
        let mut hand = open_hand();
        hand.0[MIDDLE_MCP] = Vec3::new(0.5, 0.5, 0.0);
        assert!(hand_position(&hand).distance(Vec2::ZERO) < 1e-6);

        hand.0[MIDDLE_MCP] = Vec3::new(0.0, 0.0, 0.0);
        assert!(hand_position(&hand).distance(Vec2::new(1.0, 1.0)) < 1e-6);

        hand.0[MIDDLE_MCP] = Vec3::new(1.0, 1.0, 0.0);
        assert!(hand_position(&hand).distance(Vec2::new(-1.0, -1.0)) < 1e-6);
    }

    #[test]
    fn test_absent_hand_holds_position() {
        let mut state = GestureState::default();
        state.apply(Some(&open_hand()), 0.1);
        let held = state.hand_position;
        assert_eq!(state.kind, GestureKind::Open);
        assert!(state.hand_detected());

        state.apply(None, 0.2);
        assert_eq!(state.kind, GestureKind::None);
        assert!(!state.hand_detected());
        assert_eq!(state.hand_position, held);
    }

    #[test]
    fn test_fifty_absent_frames_clear_overlay() {
        let mut state = GestureState::default();
        state.apply(Some(&fist_hand()), 0.0);
        for i in 0..50 {
            state.apply(None, 0.1 * f64::from(i + 1));
        }
        assert_eq!(state.kind, GestureKind::None);
        assert!(state.hand.is_none(), "overlay source must be empty");
    }
}
