//! # Tree Plugins
//!
//! One plugin per scene concern. The app adds all of them; each is
//! self-contained enough to drop out individually when debugging.
//!
//! ## Usage
//! ```rust,ignore
//! app.add_plugins(ScenePlugin)
//!    .add_plugins(TrackingPlugin)
//!    .add_plugins(ModeControlPlugin);
//! ```

// Scene + input
pub mod mode;
pub mod scene;
pub mod tracking;

// Morph groups
pub mod foliage;
pub mod ornaments;
pub mod topper;

// UI
pub mod hud;
pub mod overlay;

// Re-export plugins
pub use foliage::FoliagePlugin;
pub use hud::HudPlugin;
pub use mode::ModeControlPlugin;
pub use ornaments::OrnamentPlugin;
pub use overlay::OverlayPlugin;
pub use scene::ScenePlugin;
pub use topper::TopperPlugin;
pub use tracking::TrackingPlugin;

use bevy::prelude::*;

/// Phases of one tick, chained in `Update`: the landmark channel is drained
/// first, the mode re-evaluated second, and every morph group moves last, so
/// no group ever reads a half-updated mode.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeSet {
    /// Drain the landmark channel and classify the newest frame.
    Tracking,
    /// Fold the gesture into the tree mode.
    Mode,
    /// Advance transforms toward their destinations.
    Morph,
}
