//! The unit of data crossing the producer/consumer channel.

use serde::{Deserialize, Serialize};
use tinsel_common::hand::HandLandmarks;

/// One tracking sample: a hand (or nothing) at a point in time.
///
/// `hand: None` is a real observation, the producer looked and saw no hand.
/// It is distinct from the channel being empty, which just means no new
/// sample has arrived since the last drain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Landmarks in normalized image space, if a hand was detected.
    pub hand: Option<HandLandmarks>,

    /// Seconds since the producer started.
    pub timestamp: f64,
}

impl LandmarkFrame {
    /// A frame carrying a detected hand.
    pub fn detected(hand: HandLandmarks, timestamp: f64) -> Self {
        Self {
            hand: Some(hand),
            timestamp,
        }
    }

    /// A frame recording that no hand was visible.
    pub fn absent(timestamp: f64) -> Self {
        Self {
            hand: None,
            timestamp,
        }
    }
}
