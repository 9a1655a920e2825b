//! Mode Control Plugin
//!
//! Folds the current gesture into the tree mode every tick and applies
//! manual toggles from the HUD button or the Space key. Gesture folding is
//! level-triggered: a held open palm keeps the tree scattered even if the
//! mode was toggled away in between, and an absent hand holds whatever mode
//! is current.

use bevy::prelude::*;

use tinsel_common::gesture::GestureState;
use tinsel_common::mode::{ModeChanged, ModeTypes, ToggleMode, TreeMode};

use super::TreeSet;

// ============================================================================
// Plugin
// ============================================================================

pub struct ModeControlPlugin;

impl Plugin for ModeControlPlugin {
    fn build(&self, app: &mut App) {
        ModeTypes::register(app);
        app.add_systems(
            Update,
            (keyboard_toggle, apply_gesture, apply_toggles, log_mode_changes)
                .chain()
                .in_set(TreeSet::Mode),
        );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Space flips the mode, same as the HUD button.
fn keyboard_toggle(keys: Res<ButtonInput<KeyCode>>, mut toggles: MessageWriter<ToggleMode>) {
    if keys.just_pressed(KeyCode::Space) {
        toggles.write(ToggleMode);
    }
}

/// Re-apply the current gesture symbol to the mode.
fn apply_gesture(
    gesture: Res<GestureState>,
    mut mode: ResMut<TreeMode>,
    mut changed: MessageWriter<ModeChanged>,
) {
    let next = mode.after_gesture(gesture.kind);
    if next != *mode {
        changed.write(ModeChanged {
            old_mode: *mode,
            new_mode: next,
        });
        *mode = next;
    }
}

/// Apply manual toggles. Each queued toggle flips once, so two toggles in
/// one tick land back where they started, with both flips on record.
fn apply_toggles(
    mut toggles: MessageReader<ToggleMode>,
    mut mode: ResMut<TreeMode>,
    mut changed: MessageWriter<ModeChanged>,
) {
    for _ in toggles.read() {
        let next = mode.toggled();
        changed.write(ModeChanged {
            old_mode: *mode,
            new_mode: next,
        });
        *mode = next;
    }
}

/// One log line per actual flip.
fn log_mode_changes(mut changes: MessageReader<ModeChanged>) {
    for change in changes.read() {
        info!("🌲 Mode: {:?} -> {:?}", change.old_mode, change.new_mode);
    }
}
