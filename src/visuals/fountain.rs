//! Particle fountain parameters
//!
//! Two fountains, one per screen edge, each fed by its own sensor:
//! the emotion picks the ball bundle and the microphone volume sets
//! how many balls to emit this tick. Bundles switch instantly; the
//! motion itself is what reads as smooth, so no blend is applied here.

use rand::Rng;

use crate::fusion::aggregator::WorldState;
use crate::fusion::interpolator::Rgb;
use crate::sensor::snapshot::{Emotion, Snapshot};
use crate::visuals::VisualDriver;

/// Volume units per emitted ball
const VOLUME_PER_BALL: f32 = 5.0;

/// Which screen edge the fountain fires from, and which sensor it
/// listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FountainSide {
    Left,
    Right,
}

/// Ball coefficients for one emotion
#[derive(Debug, Clone, PartialEq)]
pub struct FountainParams {
    pub color: Rgb,
    pub size: f32,
    pub speed: f32,
    pub gravity: f32,
}

/// Ball bundle for an emotion, scaled by this fountain's base size
fn fountain_bundle(emotion: Emotion, base_size: f32) -> FountainParams {
    match emotion {
        Emotion::Neutral => FountainParams {
            color: Rgb::new(173.0, 216.0, 230.0),
            size: base_size,
            speed: 7.0,
            gravity: 0.0,
        },
        Emotion::Angry => FountainParams {
            color: Rgb::new(255.0, 10.0, 10.0),
            size: base_size * 1.2,
            speed: 10.0,
            gravity: 0.0,
        },
        Emotion::Fear => FountainParams {
            color: Rgb::new(144.0, 58.0, 178.0),
            size: base_size * 0.7,
            speed: 6.0,
            gravity: 0.01,
        },
        Emotion::Disgust => FountainParams {
            color: Rgb::new(101.0, 139.0, 34.0),
            size: base_size * 0.8,
            speed: 10.0,
            gravity: 0.01,
        },
        Emotion::Happy => FountainParams {
            color: Rgb::new(255.0, 255.0, 108.0),
            size: base_size * 1.2,
            speed: 8.0,
            gravity: 0.0,
        },
        Emotion::Sad => FountainParams {
            color: Rgb::new(100.0, 100.0, 255.0),
            size: base_size * 0.6,
            speed: 5.0,
            gravity: 0.05,
        },
        Emotion::Surprise => FountainParams {
            color: Rgb::new(255.0, 255.0, 255.0),
            size: base_size * 1.7,
            speed: 13.0,
            gravity: 0.0,
        },
    }
}

/// Drives one fountain's bundle and emission count
pub struct FountainDriver {
    side: FountainSide,
    base_size: f32,
    params: FountainParams,
    emit_count: u32,
}

impl FountainDriver {
    pub fn new(side: FountainSide) -> Self {
        // Each fountain gets its own ball size for visual variety
        let base_size = rand::thread_rng().gen_range(7..=12) as f32;
        Self {
            side,
            base_size,
            params: fountain_bundle(Emotion::Neutral, base_size),
            emit_count: 0,
        }
    }

    fn snapshot<'a>(&self, world: &'a WorldState) -> &'a Snapshot {
        match self.side {
            FountainSide::Left => &world.primary,
            FountainSide::Right => &world.secondary,
        }
    }

    /// Current ball bundle
    pub fn params(&self) -> &FountainParams {
        &self.params
    }

    /// Balls to emit this tick, from this sensor's volume
    pub fn emit_count(&self) -> u32 {
        self.emit_count
    }

    pub fn side(&self) -> FountainSide {
        self.side
    }
}

impl VisualDriver for FountainDriver {
    fn name(&self) -> &'static str {
        match self.side {
            FountainSide::Left => "fountain-left",
            FountainSide::Right => "fountain-right",
        }
    }

    fn update(&mut self, world: &WorldState, _dt: f32) {
        let snapshot = self.snapshot(world);
        self.params = fountain_bundle(snapshot.emotion, self.base_size);
        self.emit_count = (snapshot.volume / VOLUME_PER_BALL) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::snapshot::FaceDirection;

    fn world(primary: Snapshot, secondary: Snapshot) -> WorldState {
        WorldState {
            primary,
            secondary,
            gaze: Default::default(),
            frame_index: 0,
        }
    }

    #[test]
    fn test_emission_scales_with_volume() {
        let mut driver = FountainDriver::new(FountainSide::Left);
        let loud = Snapshot {
            emotion: Emotion::Happy,
            face_direction: FaceDirection::Center,
            volume: 23.0,
        };
        driver.update(&world(loud.clone(), loud), 1.0 / 30.0);
        assert_eq!(driver.emit_count(), 4);
    }

    #[test]
    fn test_silence_emits_nothing() {
        let mut driver = FountainDriver::new(FountainSide::Right);
        driver.update(&world(Snapshot::default(), Snapshot::default()), 1.0 / 30.0);
        assert_eq!(driver.emit_count(), 0);
    }

    #[test]
    fn test_sides_follow_their_sensor() {
        let happy = Snapshot {
            emotion: Emotion::Happy,
            ..Default::default()
        };
        let sad = Snapshot {
            emotion: Emotion::Sad,
            ..Default::default()
        };
        let state = world(happy, sad);

        let mut left = FountainDriver::new(FountainSide::Left);
        let mut right = FountainDriver::new(FountainSide::Right);
        left.update(&state, 0.0);
        right.update(&state, 0.0);

        assert_eq!(left.params().color, Rgb::new(255.0, 255.0, 108.0));
        assert_eq!(right.params().color, Rgb::new(100.0, 100.0, 255.0));
    }

    #[test]
    fn test_surprise_is_biggest_and_fastest() {
        let params = fountain_bundle(Emotion::Surprise, 10.0);
        assert_eq!(params.size, 17.0);
        assert_eq!(params.speed, 13.0);
    }
}
