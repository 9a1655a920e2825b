//! # Tree Mode
//!
//! The two-state machine at the heart of the composition: the tree is either
//! scattered (`Chaos`) or assembled (`Formed`). Transitions are
//! level-triggered on the current gesture symbol, and the HUD can toggle the
//! mode unconditionally at any time.
//!
//! There is deliberately no debouncing here. A flickering gesture produces a
//! flickering mode, and the morph factor's exponential smoothing is what
//! keeps the *visual* output stable (see `crate::morph`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureKind;

// ============================================================================
// TreeMode
// ============================================================================

/// Global tree mode. Exactly one value ever lives; it starts `Formed` so the
/// first thing on screen is the assembled tree.
#[derive(
    Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
#[reflect(Resource)]
pub enum TreeMode {
    /// Dispersed cloud: every item drifts to its chaos position.
    Chaos,
    /// Assembled tree: every item seeks its formed position.
    #[default]
    Formed,
}

impl TreeMode {
    /// Mode after seeing a gesture symbol. `None` holds the current mode.
    pub fn after_gesture(self, gesture: GestureKind) -> TreeMode {
        match gesture {
            GestureKind::Open => TreeMode::Chaos,
            GestureKind::Pinch | GestureKind::Fist => TreeMode::Formed,
            GestureKind::None => self,
        }
    }

    /// The opposite mode, for the manual toggle.
    pub fn toggled(self) -> TreeMode {
        match self {
            TreeMode::Chaos => TreeMode::Formed,
            TreeMode::Formed => TreeMode::Chaos,
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Manual mode toggle, emitted by the HUD button or the Space key. Flips the
/// mode unconditionally; gesture activity never locks it out.
#[derive(Message, Clone, Debug, Default)]
pub struct ToggleMode;

/// Fired whenever the mode value actually changes.
#[derive(Message, Clone, Debug)]
pub struct ModeChanged {
    pub old_mode: TreeMode,
    pub new_mode: TreeMode,
}

// ============================================================================
// Registration
// ============================================================================

/// Type registration for the mode machinery (call from the app's plugin).
pub struct ModeTypes;

impl ModeTypes {
    pub fn register(app: &mut App) {
        app.init_resource::<TreeMode>()
            .register_type::<TreeMode>()
            .add_message::<ToggleMode>()
            .add_message::<ModeChanged>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_formed() {
        assert_eq!(TreeMode::default(), TreeMode::Formed);
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(TreeMode::Formed.after_gesture(GestureKind::Open), TreeMode::Chaos);
        assert_eq!(TreeMode::Chaos.after_gesture(GestureKind::Open), TreeMode::Chaos);
        assert_eq!(TreeMode::Chaos.after_gesture(GestureKind::Pinch), TreeMode::Formed);
        assert_eq!(TreeMode::Chaos.after_gesture(GestureKind::Fist), TreeMode::Formed);
        // None holds whatever is current.
        assert_eq!(TreeMode::Chaos.after_gesture(GestureKind::None), TreeMode::Chaos);
        assert_eq!(TreeMode::Formed.after_gesture(GestureKind::None), TreeMode::Formed);
    }

    #[test]
    fn test_fist_forms_from_chaos() {
        let mode = TreeMode::Chaos;
        assert_eq!(mode.after_gesture(GestureKind::Fist), TreeMode::Formed);
    }

    #[test]
    fn test_mode_holds_over_absent_frames() {
        let mut mode = TreeMode::Chaos;
        for _ in 0..50 {
            mode = mode.after_gesture(GestureKind::None);
        }
        assert_eq!(mode, TreeMode::Chaos);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(TreeMode::Formed.toggled(), TreeMode::Chaos);
        assert_eq!(TreeMode::Formed.toggled().toggled(), TreeMode::Formed);
    }
}
