//! Sensing layer
//!
//! Independent, continuously-running capture loops producing
//! latest-value snapshots:
//! - `SensorSource`: one camera/microphone pair (emotion, face
//!   direction, volume)
//! - `GazeSource`: the dedicated gaze camera
//! - Collaborator seams for frame acquisition and inference
//! - Synthetic collaborators for hardware-free runs and tests

pub mod audio;
pub mod feed;
pub mod gaze;
pub mod snapshot;
pub mod source;
pub mod synthetic;

pub use audio::{AudioDevice, VolumeProbe};
pub use feed::{
    AffectClassifier, Frame, FrameStream, GazeEstimator, OrientationDetector, VideoFeed,
};
pub use gaze::GazeSource;
pub use snapshot::{Emotion, FaceDirection, GazeDirection, Snapshot};
pub use source::SensorSource;
pub use synthetic::{ScriptedClassifier, ScriptedGaze, ScriptedOrientation, SyntheticFeed};
