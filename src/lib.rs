//! # sensestage - Affect-Sensing Fusion Core
//!
//! The sensing and fusion backbone of an interactive installation:
//! turns noisy, asynchronously-arriving signals (facial emotion, head
//! orientation, gaze, voice volume) from independent capture loops
//! into a stable, temporally-smoothed parameter stream for a renderer.
//!
//! ## Features
//!
//! - **Independent capture loops**: one thread per camera plus a
//!   callback-driven microphone stream per sensor, never stalling the
//!   render tick
//! - **Last-write-wins snapshots**: the tick samples whatever each
//!   source most recently completed; intermediate frames are
//!   intentionally discarded
//! - **Debouncing and blending**: streak-count direction
//!   stabilization and unified parameter interpolation (exponential or
//!   fixed-duration linear)
//! - **Degraded-sensor tolerance**: an unplugged camera or microphone
//!   degrades to steady neutral output; the show keeps running
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sensestage::config::InstallationConfig;
//! use sensestage::fusion::SensorAggregator;
//! use sensestage::record::CsvSink;
//! use sensestage::runtime::Installation;
//! use sensestage::sensor::{AudioDevice, SensorSource};
//!
//! let config = InstallationConfig::load("installation.yaml")?;
//! let source = SensorSource::new(0, AudioDevice::Default, feed, classifier, orientation);
//! let aggregator = SensorAggregator::new(source, None, None);
//! let drivers = sensestage::visuals::build_drivers(&config);
//! let sink = Box::new(CsvSink::new(config.log_path()));
//!
//! let mut installation = Installation::new(config, aggregator, drivers, sink);
//! installation.run()?;
//! ```

pub mod config;
pub mod core;
pub mod fusion;
pub mod record;
pub mod runtime;
pub mod sensor;
pub mod visuals;

// Re-exports for convenience
pub use config::{ActiveVisual, InstallationConfig};
pub use crate::core::{DeviceKind, InferenceStage, Result, SenseError};
pub use fusion::{
    Blend, BlendMode, DirectionStabilizer, ParameterInterpolator, Rgb, SensorAggregator,
    WorldState, STABLE_STREAK,
};
pub use record::{CsvSink, SessionSummary, TickRecord, TickSink};
pub use runtime::{Installation, RunStats};
pub use sensor::{
    AffectClassifier, AudioDevice, Emotion, FaceDirection, Frame, FrameStream, GazeDirection,
    GazeEstimator, GazeSource, OrientationDetector, SensorSource, Snapshot, VideoFeed,
};
pub use visuals::{build_drivers, VisualDriver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
