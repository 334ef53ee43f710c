//! Structured error handling for sensestage
//!
//! Error taxonomy for the sensing pipeline. Per-iteration failures (a
//! dropped frame, a classifier miss on one region) are contained inside
//! the owning capture loop and never reach these types as propagated
//! errors; what surfaces here is what a caller can act on.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias with SenseError
pub type Result<T> = std::result::Result<T, SenseError>;

/// Main error type for sensestage
#[derive(Error, Debug)]
pub enum SenseError {
    /// A camera or microphone could not be opened. The owning source
    /// keeps serving its neutral default after this.
    #[error("Device unavailable ({device}): {message}")]
    DeviceUnavailable {
        device: DeviceKind,
        message: String,
    },

    /// A single frame or buffer read failed. The capture loop retries
    /// after a brief wait; collaborators report it through their trait
    /// signatures.
    #[error("Acquisition error: {message}")]
    Acquisition { message: String },

    /// An opaque inference collaborator failed on one frame. The
    /// capture loop skips that frame's contribution and continues.
    #[error("Inference error in {stage}: {message}")]
    Inference {
        stage: InferenceStage,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// I/O errors (log files, reports)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },
}

/// Device kinds for DeviceUnavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Camera,
    Microphone,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Camera => write!(f, "camera"),
            DeviceKind::Microphone => write!(f, "microphone"),
        }
    }
}

/// Inference collaborator stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceStage {
    EmotionClassification,
    FaceOrientation,
    GazeEstimation,
}

impl fmt::Display for InferenceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceStage::EmotionClassification => write!(f, "emotion classification"),
            InferenceStage::FaceOrientation => write!(f, "face orientation"),
            InferenceStage::GazeEstimation => write!(f, "gaze estimation"),
        }
    }
}

impl From<std::io::Error> for SenseError {
    fn from(err: std::io::Error) -> Self {
        SenseError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}
