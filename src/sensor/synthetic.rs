//! Synthetic capture collaborators
//!
//! Stand-ins for the camera and the inference models: a paced frame
//! generator plus scripted classifiers that dwell on each label for a
//! fixed time. The `run` command uses these by default so the binary
//! exercises the whole pipeline without hardware; tests use them for
//! deterministic input.

use std::time::{Duration, Instant};

use crate::core::Result;
use crate::sensor::feed::{
    AffectClassifier, Frame, FrameStream, GazeEstimator, OrientationDetector, VideoFeed,
};
use crate::sensor::snapshot::{Emotion, FaceDirection, GazeDirection};

/// Frame generator pacing itself at a fixed rate
pub struct SyntheticFeed {
    fps: f32,
}

impl SyntheticFeed {
    pub fn new(fps: f32) -> Self {
        Self { fps }
    }
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl VideoFeed for SyntheticFeed {
    fn open(&mut self) -> Result<Box<dyn FrameStream>> {
        Ok(Box::new(SyntheticStream {
            interval: Duration::from_secs_f32(1.0 / self.fps.max(1.0)),
        }))
    }
}

struct SyntheticStream {
    interval: Duration,
}

impl FrameStream for SyntheticStream {
    fn grab(&mut self) -> Result<Frame> {
        // Pace like a blocking camera grab
        std::thread::sleep(self.interval);
        Ok(Frame::new(64, 48, vec![128; 64 * 48 * 3]))
    }
}

/// Cycles through a script of labels, dwelling on each for a fixed time
struct DwellCycle<T: Copy> {
    script: Vec<T>,
    dwell: Duration,
    started: Instant,
}

impl<T: Copy> DwellCycle<T> {
    fn new(script: Vec<T>, dwell: Duration) -> Self {
        Self {
            script,
            dwell,
            started: Instant::now(),
        }
    }

    fn current(&self) -> T {
        let step = (self.started.elapsed().as_secs_f64() / self.dwell.as_secs_f64()) as usize;
        self.script[step % self.script.len()]
    }
}

/// Scripted emotion classifier
pub struct ScriptedClassifier {
    cycle: DwellCycle<Emotion>,
}

impl ScriptedClassifier {
    /// Dwell on each emotion in the script for `dwell` before moving on
    pub fn new(script: Vec<Emotion>, dwell: Duration) -> Self {
        Self {
            cycle: DwellCycle::new(script, dwell),
        }
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new(
            vec![
                Emotion::Neutral,
                Emotion::Happy,
                Emotion::Surprise,
                Emotion::Happy,
                Emotion::Sad,
            ],
            Duration::from_secs(5),
        )
    }
}

impl AffectClassifier for ScriptedClassifier {
    fn classify(&mut self, _frame: &Frame) -> Result<Emotion> {
        Ok(self.cycle.current())
    }
}

/// Scripted face orientation detector
pub struct ScriptedOrientation {
    cycle: DwellCycle<FaceDirection>,
}

impl ScriptedOrientation {
    pub fn new(script: Vec<FaceDirection>, dwell: Duration) -> Self {
        Self {
            cycle: DwellCycle::new(script, dwell),
        }
    }
}

impl Default for ScriptedOrientation {
    fn default() -> Self {
        Self::new(
            vec![
                FaceDirection::Center,
                FaceDirection::Left,
                FaceDirection::Center,
                FaceDirection::Right,
            ],
            Duration::from_secs(4),
        )
    }
}

impl OrientationDetector for ScriptedOrientation {
    fn detect(&mut self, _frame: &Frame) -> Result<FaceDirection> {
        Ok(self.cycle.current())
    }
}

/// Scripted gaze estimator
pub struct ScriptedGaze {
    cycle: DwellCycle<GazeDirection>,
}

impl ScriptedGaze {
    pub fn new(script: Vec<GazeDirection>, dwell: Duration) -> Self {
        Self {
            cycle: DwellCycle::new(script, dwell),
        }
    }
}

impl Default for ScriptedGaze {
    fn default() -> Self {
        Self::new(
            vec![
                GazeDirection::Center,
                GazeDirection::Left,
                GazeDirection::UpRight,
                GazeDirection::Blink,
                GazeDirection::Down,
            ],
            Duration::from_secs(3),
        )
    }
}

impl GazeEstimator for ScriptedGaze {
    fn estimate(&mut self, _frame: &Frame) -> Result<GazeDirection> {
        Ok(self.cycle.current())
    }
}
