//! Producer thread lifecycle and the channel bridge into Bevy.
//!
//! A `TrackingSession` owns one producer thread running a `LandmarkSource`.
//! Frames flow through a bounded crossbeam channel; the consumer side is
//! polled once per Bevy frame via [`TrackingSession::latest`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::info;

use tinsel_common::hand::HandLandmarks;

use crate::frame::LandmarkFrame;

/// Pending-frame buffer depth. Small on purpose: anything the consumer has
/// not drained by the next sample is already stale.
const CHANNEL_CAPACITY: usize = 16;

/// Errors from starting a tracking session.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("landmark source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to spawn tracking thread: {0}")]
    Spawn(#[from] std::io::Error),
}

// ============================================================================
// LandmarkSource trait
// ============================================================================

/// A device or generator that produces hand landmark observations.
///
/// Implementations run entirely on the producer thread after
/// [`TrackingSession::start`] hands them off, so they may block in
/// `next_frame` without stalling rendering.
pub trait LandmarkSource: Send + 'static {
    /// Human-readable name for logs and the HUD.
    fn name(&self) -> &str;

    /// Open the underlying device. Called on the caller's thread before the
    /// producer spawns, so a dead camera fails the session synchronously.
    fn start(&mut self) -> Result<(), TrackingError>;

    /// Produce one observation. `Some` is a detected hand, `None` means the
    /// source looked and saw nothing. `elapsed` is seconds since the
    /// producer thread started.
    fn next_frame(&mut self, elapsed: f64) -> Option<HandLandmarks>;

    /// Delay between observations.
    fn cadence(&self) -> Duration;
}

// ============================================================================
// TrackingSession
// ============================================================================

/// Owns the producer thread and the consumer end of the frame channel.
///
/// Dropping the session signals the producer to stop and joins it, so the
/// thread never outlives the session.
pub struct TrackingSession {
    /// Source name, captured for the HUD.
    source_name: String,

    /// Consumer end, drained once per Bevy frame.
    receiver: Receiver<LandmarkFrame>,

    /// Stop flag shared with the producer loop.
    shutdown: Arc<AtomicBool>,

    /// Producer thread handle, taken on drop.
    handle: Option<JoinHandle<()>>,
}

impl TrackingSession {
    /// Open the source and spawn the producer thread.
    ///
    /// The source is started on this thread first. If it fails there is
    /// nothing to clean up and the error propagates directly.
    pub fn start<S: LandmarkSource>(mut source: S) -> Result<Self, TrackingError> {
        source.start()?;

        let source_name = source.name().to_string();
        let (sender, receiver) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread_shutdown = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("tinsel-tracking".to_string())
            .spawn(move || produce_frames(source, sender, thread_shutdown))?;

        info!("Tracking session started: {}", source_name);

        Ok(Self {
            source_name,
            receiver,
            shutdown,
            handle: Some(handle),
        })
    }

    /// Name of the running source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Drain every pending frame and return the newest, or `None` when the
    /// producer has published nothing since the last call.
    pub fn latest(&self) -> Option<LandmarkFrame> {
        drain_latest(&self.receiver)
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        info!("Tracking session stopped: {}", self.source_name);
    }
}

/// Producer loop: sample, publish, sleep, until told to stop.
fn produce_frames<S: LandmarkSource>(
    mut source: S,
    sender: Sender<LandmarkFrame>,
    shutdown: Arc<AtomicBool>,
) {
    let started = Instant::now();

    while !shutdown.load(Ordering::Relaxed) {
        let elapsed = started.elapsed().as_secs_f64();
        let frame = match source.next_frame(elapsed) {
            Some(hand) => LandmarkFrame::detected(hand, elapsed),
            None => LandmarkFrame::absent(elapsed),
        };

        // A full channel means the consumer is behind; dropping the frame is
        // correct because only the newest one matters.
        match sender.try_send(frame) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }

        thread::sleep(source.cadence());
    }
}

/// Non-blocking drain keeping only the newest entry.
fn drain_latest(receiver: &Receiver<LandmarkFrame>) -> Option<LandmarkFrame> {
    receiver.try_iter().last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_drain_latest_keeps_newest() {
        let (sender, receiver) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        for i in 0..3 {
            sender.send(LandmarkFrame::absent(i as f64)).unwrap();
        }

        let latest = drain_latest(&receiver).unwrap();
        assert_eq!(latest.timestamp, 2.0);
        assert!(receiver.is_empty());
        assert!(drain_latest(&receiver).is_none());
    }

    /// Source that counts how many frames it has produced.
    struct CountingSource {
        produced: Arc<AtomicUsize>,
    }

    impl LandmarkSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn start(&mut self) -> Result<(), TrackingError> {
            Ok(())
        }

        fn next_frame(&mut self, _elapsed: f64) -> Option<HandLandmarks> {
            self.produced.fetch_add(1, Ordering::SeqCst);
            Some(HandLandmarks::zeroed())
        }

        fn cadence(&self) -> Duration {
            Duration::from_millis(1)
        }
    }

    #[test]
    fn test_drop_stops_producer() {
        let produced = Arc::new(AtomicUsize::new(0));
        let session = TrackingSession::start(CountingSource {
            produced: Arc::clone(&produced),
        })
        .unwrap();

        while produced.load(Ordering::SeqCst) == 0 {
            thread::sleep(Duration::from_millis(1));
        }
        drop(session);

        // Drop joins the thread, so the count is final afterwards.
        let after_drop = produced.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(produced.load(Ordering::SeqCst), after_drop);
    }

    struct FailingSource;

    impl LandmarkSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn start(&mut self) -> Result<(), TrackingError> {
            Err(TrackingError::SourceUnavailable("no camera".to_string()))
        }

        fn next_frame(&mut self, _elapsed: f64) -> Option<HandLandmarks> {
            None
        }

        fn cadence(&self) -> Duration {
            Duration::from_millis(1)
        }
    }

    #[test]
    fn test_failed_start_propagates() {
        let result = TrackingSession::start(FailingSource);
        assert!(matches!(result, Err(TrackingError::SourceUnavailable(_))));
    }

    #[test]
    fn test_latest_sees_published_frames() {
        let produced = Arc::new(AtomicUsize::new(0));
        let session = TrackingSession::start(CountingSource {
            produced: Arc::clone(&produced),
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(1);
        let mut latest = None;
        while latest.is_none() && Instant::now() < deadline {
            latest = session.latest();
            thread::sleep(Duration::from_millis(1));
        }

        let frame = latest.expect("producer should publish within a second");
        assert!(frame.hand.is_some());
    }
}
