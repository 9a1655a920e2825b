//! Tinsel - Gesture-Driven Particle Christmas Tree
//!
//! 4,380 animated items morph between a dispersed chaos cloud and an
//! assembled Christmas tree, steered by hand gestures from a landmark
//! producer: open palm scatters the tree, pinch or fist re-forms it.
//!
//! ## Plugins
//! - ScenePlugin: camera, lights, starfield, floor grid, idle orbit
//! - TrackingPlugin: landmark producer session + per-tick gesture drain
//! - ModeControlPlugin: gesture -> mode transitions, manual toggle
//! - FoliagePlugin / OrnamentPlugin / TopperPlugin: the morph groups
//! - HudPlugin / OverlayPlugin: egui control panel and skeleton overlay

mod meshes;
mod plugins;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use plugins::{
    FoliagePlugin, HudPlugin, ModeControlPlugin, OrnamentPlugin, OverlayPlugin, ScenePlugin,
    TopperPlugin, TrackingPlugin, TreeSet,
};
use tinsel_common::settings::TreeSettingsPlugin;

fn main() {
    App::new()
        // Core Bevy plugins
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Tinsel".to_string(),
                    resolution: WindowResolution::new(1600, 900),
                    present_mode: PresentMode::Fifo, // VSync
                    ..default()
                }),
                ..default()
            }),
        )
        // Persisted settings (~/.tinsel/settings.json)
        .add_plugins(TreeSettingsPlugin)
        // One tick: drain the landmark channel, re-evaluate the mode, then
        // advance every morph group
        .configure_sets(
            Update,
            (TreeSet::Tracking, TreeSet::Mode, TreeSet::Morph).chain(),
        )
        // Scene + input
        .add_plugins(ScenePlugin)
        .add_plugins(TrackingPlugin)
        .add_plugins(ModeControlPlugin)
        // Morph groups
        .add_plugins(FoliagePlugin)
        .add_plugins(OrnamentPlugin)
        .add_plugins(TopperPlugin)
        // UI
        .add_plugins(HudPlugin)
        .add_plugins(OverlayPlugin)
        .add_systems(Startup, log_controls)
        .run();
}

/// Print the control summary once at startup.
fn log_controls() {
    info!("🎄 Tinsel ready");
    info!("   open palm = scatter, pinch or fist = re-form, Space = toggle");
}
