//! Capture and inference collaborator seams
//!
//! The pipeline treats frame acquisition and all vision inference as
//! opaque collaborators behind these traits, so a capture loop can run
//! against real camera/model backends or injected test doubles without
//! changing shape.

use crate::core::Result;
use crate::sensor::snapshot::{Emotion, FaceDirection, GazeDirection};

/// One raw video frame (RGB8)
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a frame from raw RGB8 pixel data
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// A camera that can be opened into a running frame stream
///
/// `open` is called once on `SensorSource::start`; failure there is
/// `DeviceUnavailable` and leaves the source serving neutral defaults.
pub trait VideoFeed: Send {
    fn open(&mut self) -> Result<Box<dyn FrameStream>>;
}

/// An opened camera delivering frames
///
/// `grab` blocks on device I/O. A grab error is transient: the capture
/// loop waits briefly and retries.
pub trait FrameStream: Send {
    fn grab(&mut self) -> Result<Frame>;
}

/// Opaque emotion classifier: frame in, discrete label out
pub trait AffectClassifier: Send {
    fn classify(&mut self, frame: &Frame) -> Result<Emotion>;
}

/// Opaque face orientation detector
pub trait OrientationDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<FaceDirection>;
}

/// Opaque gaze direction estimator
pub trait GazeEstimator: Send {
    fn estimate(&mut self, frame: &Frame) -> Result<GazeDirection>;
}
