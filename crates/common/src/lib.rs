//! # Tinsel Common
//!
//! Shared logic for the Tinsel gesture-driven morph tree: everything that
//! computes *where things are* lives here, with no rendering and no I/O
//! beyond the settings file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       tinsel-common                         │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────────────┐  │
//! │  │   hand   │ │ gesture  │ │   mode   │ │    layout     │  │
//! │  │ topology │ │ classify │ │  machine │ │ seeded tables │  │
//! │  └────┬─────┘ └────┬─────┘ └────┬─────┘ └───────┬───────┘  │
//! │       └────────────┴─────┬──────┴───────────────┘          │
//! │                    ┌─────┴─────┐ ┌──────┐ ┌──────────────┐ │
//! │                    │   morph   │ │ wind │ │ settings /   │ │
//! │                    │   blend   │ │ field│ │ stats        │ │
//! │                    └───────────┘ └──────┘ └──────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌───────────────┐              ┌────────────────┐
//!      │ tinsel-track  │              │   tinsel-app   │
//!      │ (producer)    │              │ (Bevy plugins) │
//!      └───────────────┘              └────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `hand` | 21-point hand landmark topology: indices, connections |
//! | `gesture` | Pure landmark → gesture classification |
//! | `mode` | Chaos/Formed state machine and mode messages |
//! | `layout` | Seeded generation of chaos/target position tables |
//! | `morph` | Exponential blending and per-behavior motion math |
//! | `wind` | Perlin wind displacement for the foliage |
//! | `settings` | Persisted tree settings (`~/.tinsel/settings.json`) |
//! | `stats` | Rolling frame-time window for the HUD |

pub mod gesture;
pub mod hand;
pub mod layout;
pub mod mode;
pub mod morph;
pub mod settings;
pub mod stats;
pub mod wind;

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use crate::gesture::{classify, hand_position, GestureKind, GestureState};
    pub use crate::hand::{HandLandmarks, HAND_CONNECTIONS, LANDMARK_COUNT};
    pub use crate::layout::{GroupLayout, LayoutParams, TreeLayout};
    pub use crate::mode::{ModeChanged, ToggleMode, TreeMode};
    pub use crate::morph::{MorphFactor, MotionBehavior};
    pub use crate::settings::{TreeSettings, TreeSettingsPlugin};
    pub use crate::stats::FrameStats;
    pub use crate::wind::WindField;
}
