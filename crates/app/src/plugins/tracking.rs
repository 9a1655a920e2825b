//! Tracking Plugin
//!
//! Owns the landmark producer session and the per-tick drain that folds the
//! channel's newest frame into gesture state. The producer thread runs at
//! its own cadence; this side only ever takes the latest sample and never
//! blocks the frame. Stale or missing samples simply leave the previous
//! gesture state in place.

use bevy::prelude::*;

use tinsel_common::gesture::GestureState;
use tinsel_common::settings::TreeSettings;
use tinsel_tracking::{SyntheticHandSource, TrackingSession};

use super::TreeSet;

// ============================================================================
// Resources
// ============================================================================

/// Lifecycle of the landmark producer, mirrored into the HUD status row.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub enum TrackingState {
    /// Producer thread is live and delivering frames.
    Running,
    /// Tracking switched off in settings.
    #[default]
    Disabled,
    /// The source failed to start; the message is shown in the HUD.
    Failed { message: String },
}

/// Holds the live producer session. Dropping the session joins the producer
/// thread, so disabling tracking is a plain `None` assignment.
#[derive(Resource, Default)]
pub struct TrackingBridge {
    session: Option<TrackingSession>,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GestureState>()
            .init_resource::<TrackingBridge>()
            .init_resource::<TrackingState>()
            .add_systems(Startup, start_tracking)
            .add_systems(
                Update,
                (apply_tracking_toggle, drain_landmarks)
                    .chain()
                    .in_set(TreeSet::Tracking),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Start the producer at launch unless settings say otherwise.
fn start_tracking(
    settings: Res<TreeSettings>,
    mut bridge: ResMut<TrackingBridge>,
    mut state: ResMut<TrackingState>,
) {
    if settings.hand_tracking_enabled {
        start_session(&mut bridge, &mut state);
    } else {
        info!("Hand tracking disabled in settings");
    }
}

/// React to the HUD toggle: start a fresh session when tracking turns on,
/// drop the session when it turns off. A failed source stays failed until
/// toggled off and on again.
fn apply_tracking_toggle(
    settings: Res<TreeSettings>,
    mut bridge: ResMut<TrackingBridge>,
    mut state: ResMut<TrackingState>,
    mut gesture: ResMut<GestureState>,
) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    if settings.hand_tracking_enabled {
        if bridge.session.is_none() && *state == TrackingState::Disabled {
            start_session(&mut bridge, &mut state);
        }
    } else if bridge.session.is_some() || *state != TrackingState::Disabled {
        // Drop joins the producer thread
        bridge.session = None;
        *state = TrackingState::Disabled;
        let timestamp = gesture.last_timestamp;
        gesture.apply(None, timestamp);
        info!("Hand tracking stopped");
    }
}

/// Fold the newest landmark frame into gesture state. An empty channel is
/// not an observation; the state holds until the producer says otherwise.
fn drain_landmarks(bridge: Res<TrackingBridge>, mut gesture: ResMut<GestureState>) {
    let Some(session) = bridge.session.as_ref() else {
        return;
    };
    if let Some(frame) = session.latest() {
        gesture.apply(frame.hand.as_ref(), frame.timestamp);
    }
}

fn start_session(bridge: &mut TrackingBridge, state: &mut TrackingState) {
    match TrackingSession::start(SyntheticHandSource) {
        Ok(session) => {
            info!("👋 Landmark producer '{}' started", session.source_name());
            bridge.session = Some(session);
            *state = TrackingState::Running;
        }
        Err(err) => {
            warn!("Landmark producer failed to start: {err}");
            *state = TrackingState::Failed {
                message: err.to_string(),
            };
        }
    }
}
