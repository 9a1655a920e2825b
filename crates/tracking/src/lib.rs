//! # Tinsel Tracking
//!
//! Hand landmark acquisition, decoupled from the render loop.
//!
//! ## Architecture
//!
//! ```text
//!  producer thread                      Bevy world
//!  ┌──────────────────┐   bounded    ┌──────────────────┐
//!  │ LandmarkSource   │── channel ──▶│ TrackingSession  │
//!  │ (camera / synth) │   (16)       │ .latest()        │
//!  └──────────────────┘              └──────────────────┘
//! ```
//!
//! The producer runs at its own cadence and never blocks the frame loop:
//! when the channel is full the producer drops the frame, and the consumer
//! drains everything pending and keeps only the newest entry. Stale frames
//! are worthless here, the tree only ever wants the most recent hand.
//!
//! ## Modules
//!
//! - `frame`: timestamped landmark frame crossing the channel
//! - `session`: `LandmarkSource` trait, producer thread, shutdown handling
//! - `synthetic`: scripted hand choreography for running without a camera

pub mod frame;
pub mod session;
pub mod synthetic;

pub use frame::LandmarkFrame;
pub use session::{LandmarkSource, TrackingError, TrackingSession};
pub use synthetic::SyntheticHandSource;
