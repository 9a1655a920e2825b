//! Frame statistics for the HUD.
//!
//! Keeps a rolling window of recent frame times and derives FPS from the
//! average, which reads steadier than an instantaneous value.

use bevy::prelude::*;

/// Rolling window size in frames (~1 second at 60 FPS).
const WINDOW: usize = 60;

/// Rolling frame-time tracker.
#[derive(Resource, Default)]
pub struct FrameStats {
    /// Recent frame times in milliseconds, newest last.
    frame_times: Vec<f32>,

    /// Total frames recorded since startup.
    pub frame_count: u64,
}

impl FrameStats {
    /// Record one frame's delta time (seconds).
    pub fn push(&mut self, delta_secs: f32) {
        self.frame_times.push(delta_secs * 1000.0);
        if self.frame_times.len() > WINDOW {
            self.frame_times.remove(0);
        }
        self.frame_count += 1;
    }

    /// Average frame time over the window, in milliseconds.
    pub fn avg_frame_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    /// Frames per second derived from the windowed average.
    pub fn fps(&self) -> f32 {
        let avg = self.avg_frame_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_frame_times() {
        let mut stats = FrameStats::default();
        for _ in 0..10 {
            stats.push(0.016);
        }
        assert!((stats.fps() - 62.5).abs() < 0.1);
        assert!((stats.avg_frame_ms() - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_window_is_capped() {
        let mut stats = FrameStats::default();
        for _ in 0..200 {
            stats.push(0.016);
        }
        assert_eq!(stats.frame_count, 200);
        assert!(stats.frame_times.len() <= WINDOW);
    }

    #[test]
    fn test_empty_reads_zero() {
        let stats = FrameStats::default();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.avg_frame_ms(), 0.0);
    }
}
