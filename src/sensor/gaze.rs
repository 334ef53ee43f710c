//! Gaze tracking source
//!
//! Same harness shape as `SensorSource`, for the dedicated gaze
//! camera: an independent capture thread overwrites a single
//! latest-value direction cell, and the render tick reads whatever is
//! currently stored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::Result;
use crate::sensor::feed::{GazeEstimator, VideoFeed};
use crate::sensor::snapshot::GazeDirection;

/// Wait between retries after a failed frame grab
const GRAB_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Gaze capture collaborators, moved into the thread on start
struct Collaborators {
    feed: Box<dyn VideoFeed>,
    estimator: Box<dyn GazeEstimator>,
}

/// Independent gaze direction source
pub struct GazeSource {
    camera_id: usize,
    direction: Arc<Mutex<GazeDirection>>,
    running: Arc<AtomicBool>,
    collaborators: Option<Collaborators>,
    capture_thread: Option<JoinHandle<()>>,
}

impl GazeSource {
    /// Create a gaze source from its collaborators
    pub fn new(camera_id: usize, feed: Box<dyn VideoFeed>, estimator: Box<dyn GazeEstimator>) -> Self {
        Self {
            camera_id,
            direction: Arc::new(Mutex::new(GazeDirection::Center)),
            running: Arc::new(AtomicBool::new(false)),
            collaborators: Some(Collaborators { feed, estimator }),
            capture_thread: None,
        }
    }

    /// Start the tracking loop
    ///
    /// Fails with `DeviceUnavailable` if the camera cannot be opened;
    /// `read` then keeps returning center.
    pub fn start(&mut self) -> Result<()> {
        if self.capture_thread.is_some() {
            debug!("GazeTracker {}: already started", self.camera_id);
            return Ok(());
        }

        let Collaborators {
            mut feed,
            mut estimator,
        } = match self.collaborators.take() {
            Some(collaborators) => collaborators,
            None => {
                debug!("GazeTracker {}: start after stop is a no-op", self.camera_id);
                return Ok(());
            }
        };

        let mut stream = feed.open()?;

        self.running.store(true, Ordering::Release);
        let running = Arc::clone(&self.running);
        let direction = Arc::clone(&self.direction);
        let camera_id = self.camera_id;

        self.capture_thread = Some(std::thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                let frame = match stream.grab() {
                    Ok(frame) => frame,
                    Err(e) => {
                        debug!("GazeTracker {}: frame grab failed: {}", camera_id, e);
                        std::thread::sleep(GRAB_RETRY_DELAY);
                        continue;
                    }
                };

                match estimator.estimate(&frame) {
                    Ok(gaze) => *direction.lock().unwrap() = gaze,
                    Err(e) => debug!("GazeTracker {}: {}", camera_id, e),
                }
            }
        }));

        info!("GazeTracker {} started", self.camera_id);
        Ok(())
    }

    /// Most recent gaze direction; never blocks on the tracking loop
    pub fn read(&self) -> GazeDirection {
        *self.direction.lock().unwrap()
    }

    /// Stop the tracking loop, join it, and release the camera
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.capture_thread.take() {
            if handle.join().is_err() {
                warn!("GazeTracker {}: tracking thread panicked", self.camera_id);
            }
        }
        info!("GazeTracker {} stopped", self.camera_id);
    }
}

impl Drop for GazeSource {
    fn drop(&mut self) {
        if self.capture_thread.is_some() {
            self.stop();
        }
    }
}
