//! Gaze-following emitter
//!
//! Debounces the raw gaze stream and glides a particle emitter toward
//! the screen position mapped from the stable direction. A momentary
//! look back to center keeps the prior target (the stabilizer's
//! last-valid fallback); blink has no position, so the emitter holds
//! still.

use crate::fusion::aggregator::WorldState;
use crate::fusion::interpolator::{Blend, BlendMode, ParameterInterpolator};
use crate::fusion::stabilizer::DirectionStabilizer;
use crate::sensor::snapshot::GazeDirection;
use crate::visuals::VisualDriver;

/// Fraction of the remaining distance the emitter covers per tick
pub const EMITTER_SMOOTHING: f32 = 0.1;

/// Emitter position as an offset from screen center
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmitterOffset {
    pub x: f32,
    pub y: f32,
}

impl Blend for EmitterOffset {
    fn blend(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            x: f32::blend(&from.x, &to.x, t),
            y: f32::blend(&from.y, &to.y, t),
        }
    }
}

/// Target offset for a stable gaze direction; center and blink have
/// none
fn emitter_offset(direction: GazeDirection) -> Option<EmitterOffset> {
    let (x, y) = match direction {
        GazeDirection::Up => (0.0, -180.0),
        GazeDirection::Down => (0.0, 190.0),
        GazeDirection::Left => (-400.0, 180.0),
        GazeDirection::Right => (400.0, 180.0),
        GazeDirection::UpRight => (400.0, -200.0),
        GazeDirection::UpLeft => (-400.0, -200.0),
        GazeDirection::DownRight => (400.0, 200.0),
        GazeDirection::DownLeft => (-400.0, 200.0),
        GazeDirection::Center | GazeDirection::Blink => return None,
    };
    Some(EmitterOffset { x, y })
}

/// Drives the gaze particle emitter position
pub struct GazeDriver {
    stabilizer: DirectionStabilizer<GazeDirection>,
    interp: ParameterInterpolator<GazeDirection, EmitterOffset>,
    center: (f32, f32),
}

impl GazeDriver {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            stabilizer: DirectionStabilizer::new(GazeDirection::Center),
            interp: ParameterInterpolator::new(
                emitter_offset,
                GazeDirection::Center,
                BlendMode::Exponential {
                    rate: EMITTER_SMOOTHING,
                },
            ),
            center: (screen_width as f32 / 2.0, screen_height as f32 / 2.0),
        }
    }

    /// Smoothed emitter position in screen coordinates
    pub fn emitter(&self) -> (f32, f32) {
        let offset = self.interp.value();
        (self.center.0 + offset.x, self.center.1 + offset.y)
    }
}

impl VisualDriver for GazeDriver {
    fn name(&self) -> &'static str {
        "gaze"
    }

    fn update(&mut self, world: &WorldState, dt: f32) {
        // The emitter only moves on ticks where a concrete position
        // resolves; unstable input and blinks freeze it in place
        if let Some(direction) = self.stabilizer.resolve(world.gaze) {
            if emitter_offset(direction).is_some() {
                self.interp.select(direction);
                self.interp.tick(dt);
            }
        }
    }
}
