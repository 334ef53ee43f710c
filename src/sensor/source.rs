//! Sensor source harness
//!
//! One `SensorSource` wraps a camera capture thread and a microphone
//! callback stream for a single camera/microphone pair. The capture
//! loop runs independently of the render tick and overwrites
//! latest-value cells; `read` assembles a `Snapshot` from atomic copies
//! of those cells without ever blocking the loop.
//!
//! Writer discipline: the capture thread is the only writer of the
//! vision cell, the audio callback is the only writer of the volume
//! cell. Each cell is replaced whole under its lock, so a reader never
//! observes a half-updated record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::Result;
use crate::sensor::audio::{AudioDevice, VolumeProbe};
use crate::sensor::feed::{AffectClassifier, OrientationDetector, VideoFeed};
use crate::sensor::snapshot::{Emotion, FaceDirection, Snapshot};

/// Wait between retries after a failed frame grab
const GRAB_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Vision-derived part of a snapshot; owned by the capture thread
#[derive(Debug, Clone, Default)]
struct VisionReading {
    emotion: Emotion,
    face_direction: FaceDirection,
}

/// Capture and inference collaborators, moved into the capture thread
/// as a unit on start
struct Collaborators {
    feed: Box<dyn VideoFeed>,
    classifier: Box<dyn AffectClassifier>,
    orientation: Box<dyn OrientationDetector>,
}

/// One camera/microphone sensor
///
/// `start` launches the capture loop, `read` returns the most recent
/// completed value, `stop` terminates the loop and joins it before
/// returning, guaranteeing the devices are released.
pub struct SensorSource {
    camera_id: usize,
    mic: AudioDevice,

    vision: Arc<Mutex<VisionReading>>,
    running: Arc<AtomicBool>,

    collaborators: Option<Collaborators>,

    capture_thread: Option<JoinHandle<()>>,
    probe: Option<VolumeProbe>,
}

impl SensorSource {
    /// Create a source from its capture and inference collaborators
    pub fn new(
        camera_id: usize,
        mic: AudioDevice,
        feed: Box<dyn VideoFeed>,
        classifier: Box<dyn AffectClassifier>,
        orientation: Box<dyn OrientationDetector>,
    ) -> Self {
        Self {
            camera_id,
            mic,
            vision: Arc::new(Mutex::new(VisionReading::default())),
            running: Arc::new(AtomicBool::new(false)),
            collaborators: Some(Collaborators {
                feed,
                classifier,
                orientation,
            }),
            capture_thread: None,
            probe: None,
        }
    }

    /// Start the capture loop and the audio stream
    ///
    /// Fails with `DeviceUnavailable` if the camera cannot be opened;
    /// the source then keeps serving the neutral default from `read`.
    /// A microphone failure is logged once and the source runs
    /// vision-only with volume pinned at 0.0.
    pub fn start(&mut self) -> Result<()> {
        if self.capture_thread.is_some() {
            debug!("Sensor {}: already started", self.camera_id);
            return Ok(());
        }

        let Collaborators {
            mut feed,
            mut classifier,
            mut orientation,
        } = match self.collaborators.take() {
            Some(collaborators) => collaborators,
            None => {
                debug!("Sensor {}: start after stop is a no-op", self.camera_id);
                return Ok(());
            }
        };

        // Open on the caller's thread so open failure surfaces from start()
        let mut stream = feed.open()?;

        if self.mic != AudioDevice::Disabled {
            match VolumeProbe::open(self.mic) {
                Ok(probe) => self.probe = Some(probe),
                Err(e) => warn!("Sensor {}: {} - running without audio", self.camera_id, e),
            }
        }

        self.running.store(true, Ordering::Release);
        let running = Arc::clone(&self.running);
        let vision = Arc::clone(&self.vision);
        let camera_id = self.camera_id;

        self.capture_thread = Some(std::thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                let frame = match stream.grab() {
                    Ok(frame) => frame,
                    Err(e) => {
                        debug!("Sensor {}: frame grab failed: {}", camera_id, e);
                        std::thread::sleep(GRAB_RETRY_DELAY);
                        continue;
                    }
                };

                // Start from the previous reading so a failed stage
                // keeps its last value instead of snapping to neutral
                let mut reading = vision.lock().unwrap().clone();

                match classifier.classify(&frame) {
                    Ok(emotion) => reading.emotion = emotion,
                    Err(e) => debug!("Sensor {}: {}", camera_id, e),
                }
                match orientation.detect(&frame) {
                    Ok(direction) => reading.face_direction = direction,
                    Err(e) => debug!("Sensor {}: {}", camera_id, e),
                }

                *vision.lock().unwrap() = reading;
            }
        }));

        info!("Sensor {} started (mic: {:?})", self.camera_id, self.mic);
        Ok(())
    }

    /// Most recent completed snapshot; never blocks on the capture loop
    pub fn read(&self) -> Snapshot {
        let reading = self.vision.lock().unwrap().clone();
        let volume = self.probe.as_ref().map(VolumeProbe::value).unwrap_or(0.0);
        Snapshot {
            emotion: reading.emotion,
            face_direction: reading.face_direction,
            volume,
        }
    }

    /// Stop the capture loop, join it, and release the devices
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.capture_thread.take() {
            if handle.join().is_err() {
                warn!("Sensor {}: capture thread panicked", self.camera_id);
            }
        }
        // Dropping the probe closes the input stream
        self.probe = None;
        info!("Sensor {} stopped", self.camera_id);
    }

    /// Camera identifier, for log and report labeling
    pub fn camera_id(&self) -> usize {
        self.camera_id
    }
}

impl Drop for SensorSource {
    fn drop(&mut self) {
        if self.capture_thread.is_some() {
            self.stop();
        }
    }
}
