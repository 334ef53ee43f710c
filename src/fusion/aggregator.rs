//! Per-tick sensor aggregation
//!
//! Once per render tick the aggregator samples every active source
//! exactly once and assembles the `WorldState` all downstream
//! consumers of that tick share. No smoothing happens here; that
//! belongs to the stabilizer/interpolator instances each consumer
//! owns.

use tracing::warn;

use crate::sensor::gaze::GazeSource;
use crate::sensor::snapshot::{GazeDirection, Snapshot};
use crate::sensor::source::SensorSource;

/// Aggregated view of all sensors for one tick
///
/// Ephemeral: rebuilt from the live source cells every tick. With one
/// physical sensor the secondary slot mirrors the primary snapshot.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub primary: Snapshot,
    pub secondary: Snapshot,
    pub gaze: GazeDirection,
    pub frame_index: u64,
}

/// Owns the active sources and samples them once per tick
pub struct SensorAggregator {
    primary: SensorSource,
    secondary: Option<SensorSource>,
    gaze: Option<GazeSource>,
    frame_index: u64,
}

impl SensorAggregator {
    pub fn new(
        primary: SensorSource,
        secondary: Option<SensorSource>,
        gaze: Option<GazeSource>,
    ) -> Self {
        Self {
            primary,
            secondary,
            gaze,
            frame_index: 0,
        }
    }

    /// Start every source
    ///
    /// A source whose device is unavailable is logged once and left
    /// serving its neutral default; the installation keeps running on
    /// whatever sensors are healthy.
    pub fn start(&mut self) {
        if let Err(e) = self.primary.start() {
            warn!("Sensor {}: {}", self.primary.camera_id(), e);
        }
        if let Some(ref mut secondary) = self.secondary {
            if let Err(e) = secondary.start() {
                warn!("Sensor {}: {}", secondary.camera_id(), e);
            }
        }
        if let Some(ref mut gaze) = self.gaze {
            if let Err(e) = gaze.start() {
                warn!("Gaze tracker: {}", e);
            }
        }
    }

    /// Sample each source exactly once and assemble this tick's state
    ///
    /// Reading once per tick means every consumer within the tick sees
    /// the same snapshot set. Disabled gaze reads as center.
    pub fn tick(&mut self) -> WorldState {
        let primary = self.primary.read();
        let secondary = match self.secondary {
            Some(ref source) => source.read(),
            // Explicit duplication policy for a single-sensor setup
            None => primary.clone(),
        };
        let gaze = self
            .gaze
            .as_ref()
            .map(GazeSource::read)
            .unwrap_or(GazeDirection::Center);

        let state = WorldState {
            primary,
            secondary,
            gaze,
            frame_index: self.frame_index,
        };
        self.frame_index += 1;
        state
    }

    /// Stop every source, joining each capture loop before returning
    pub fn stop(&mut self) {
        self.primary.stop();
        if let Some(ref mut secondary) = self.secondary {
            secondary.stop();
        }
        if let Some(ref mut gaze) = self.gaze {
            gaze.stop();
        }
    }

    /// Ticks taken so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
