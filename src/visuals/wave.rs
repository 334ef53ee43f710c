//! Emotional wave parameters
//!
//! Per-emotion waveform bundles blended with a fixed-duration linear
//! transition: a change of emotion ramps the wave's look over two
//! seconds and then rests exactly on the new bundle.

use crate::fusion::aggregator::WorldState;
use crate::fusion::interpolator::{Blend, BlendMode, ParameterInterpolator, Rgb};
use crate::sensor::snapshot::Emotion;
use crate::visuals::VisualDriver;

/// Length of one emotion-to-emotion transition
pub const WAVE_TRANSITION_SECS: f32 = 2.0;

/// Waveform coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct WaveParams {
    pub period: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub noise_scale: f32,
    pub wave_speed: f32,
    pub color: Rgb,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            period: 1.2,
            amplitude: 0.8,
            speed: 1.0,
            noise_scale: 1.0,
            wave_speed: 0.1,
            color: Rgb::new(173.0, 216.0, 230.0),
        }
    }
}

impl Blend for WaveParams {
    fn blend(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            period: f32::blend(&from.period, &to.period, t),
            amplitude: f32::blend(&from.amplitude, &to.amplitude, t),
            speed: f32::blend(&from.speed, &to.speed, t),
            noise_scale: f32::blend(&from.noise_scale, &to.noise_scale, t),
            wave_speed: f32::blend(&from.wave_speed, &to.wave_speed, t),
            color: Rgb::blend(&from.color, &to.color, t),
        }
    }
}

/// Wave bundle for an emotion
fn wave_bundle(emotion: Emotion) -> Option<WaveParams> {
    let params = match emotion {
        Emotion::Angry => WaveParams {
            period: 1.5,
            amplitude: 1.3,
            speed: 1.5,
            noise_scale: 1.4,
            wave_speed: 0.3,
            color: Rgb::new(255.0, 0.0, 0.0),
        },
        Emotion::Disgust => WaveParams {
            period: 1.4,
            amplitude: 1.3,
            speed: 0.7,
            noise_scale: 2.6,
            wave_speed: 0.2,
            color: Rgb::new(107.0, 142.0, 35.0),
        },
        Emotion::Fear => WaveParams {
            period: 1.4,
            amplitude: 1.0,
            speed: 1.3,
            noise_scale: 1.3,
            wave_speed: 0.3,
            color: Rgb::new(75.0, 0.0, 130.0),
        },
        Emotion::Happy => WaveParams {
            period: 1.0,
            amplitude: 1.0,
            speed: 1.3,
            noise_scale: 0.8,
            wave_speed: 0.2,
            color: Rgb::new(255.0, 255.0, 0.0),
        },
        Emotion::Sad => WaveParams {
            period: 0.5,
            amplitude: 0.5,
            speed: 0.5,
            noise_scale: 0.5,
            wave_speed: 0.1,
            color: Rgb::new(0.0, 0.0, 139.0),
        },
        Emotion::Surprise => WaveParams {
            period: 1.8,
            amplitude: 1.8,
            speed: 2.5,
            noise_scale: 1.1,
            wave_speed: 0.3,
            color: Rgb::new(255.0, 255.0, 255.0),
        },
        Emotion::Neutral => WaveParams::default(),
    };
    Some(params)
}

/// Drives the wave's bundle from the primary emotion
pub struct WaveDriver {
    interp: ParameterInterpolator<Emotion, WaveParams>,
}

impl WaveDriver {
    pub fn new() -> Self {
        Self {
            interp: ParameterInterpolator::new(
                wave_bundle,
                Emotion::Neutral,
                BlendMode::Linear {
                    duration: WAVE_TRANSITION_SECS,
                },
            ),
        }
    }

    /// Live blended bundle for the renderer
    pub fn params(&self) -> &WaveParams {
        self.interp.value()
    }
}

impl Default for WaveDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualDriver for WaveDriver {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn update(&mut self, world: &WorldState, dt: f32) {
        self.interp.select(world.primary.emotion);
        self.interp.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::snapshot::Snapshot;

    fn world(emotion: Emotion) -> WorldState {
        let snapshot = Snapshot {
            emotion,
            ..Default::default()
        };
        WorldState {
            primary: snapshot.clone(),
            secondary: snapshot,
            gaze: Default::default(),
            frame_index: 0,
        }
    }

    #[test]
    fn test_transition_completes_after_duration() {
        let mut driver = WaveDriver::new();
        let ticks = (WAVE_TRANSITION_SECS * 30.0) as usize;
        for _ in 0..=ticks {
            driver.update(&world(Emotion::Sad), 1.0 / 30.0);
        }
        assert_eq!(driver.params().period, 0.5);
        assert_eq!(driver.params().color, Rgb::new(0.0, 0.0, 139.0));
    }

    #[test]
    fn test_midway_is_between_bundles() {
        let mut driver = WaveDriver::new();
        // One second of a two-second transition
        for _ in 0..30 {
            driver.update(&world(Emotion::Surprise), 1.0 / 30.0);
        }
        let period = driver.params().period;
        assert!(period > 1.2 && period < 1.8);
    }
}
