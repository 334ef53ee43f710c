//! Flocking swarm parameters
//!
//! Per-emotion flock behavior bundles and the driver that blends them.
//! The swarm reacts to the primary sensor's emotion with an
//! exponential per-tick blend, so parameter changes ease in over a few
//! dozen ticks regardless of how often the emotion flickers.

use crate::fusion::aggregator::WorldState;
use crate::fusion::interpolator::{Blend, BlendMode, ParameterInterpolator, Rgb};
use crate::sensor::snapshot::Emotion;
use crate::visuals::VisualDriver;

/// Per-tick exponential blend rate
pub const FLOCK_BLEND_RATE: f32 = 0.05;

/// Behavior coefficients for the swarm
#[derive(Debug, Clone, PartialEq)]
pub struct FlockParams {
    pub color: Rgb,
    pub attraction_radius: f32,
    pub repulsion_radius: f32,
    pub attraction_force: f32,
    pub repulsion_force: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            color: Rgb::new(173.0, 216.0, 230.0),
            attraction_radius: 100.0,
            repulsion_radius: 25.0,
            attraction_force: 0.02,
            repulsion_force: 0.15,
        }
    }
}

impl Blend for FlockParams {
    fn blend(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            color: Rgb::blend(&from.color, &to.color, t),
            attraction_radius: f32::blend(&from.attraction_radius, &to.attraction_radius, t),
            repulsion_radius: f32::blend(&from.repulsion_radius, &to.repulsion_radius, t),
            attraction_force: f32::blend(&from.attraction_force, &to.attraction_force, t),
            repulsion_force: f32::blend(&from.repulsion_force, &to.repulsion_force, t),
        }
    }
}

/// Flock bundle for an emotion; Disgust behaves like Fear
fn flock_bundle(emotion: Emotion) -> Option<FlockParams> {
    let params = match emotion {
        Emotion::Neutral => FlockParams::default(),
        Emotion::Angry => FlockParams {
            color: Rgb::new(240.0, 0.0, 0.0),
            attraction_radius: 80.0,
            repulsion_radius: 40.0,
            attraction_force: 0.1,
            repulsion_force: 0.3,
        },
        Emotion::Fear | Emotion::Disgust => FlockParams {
            color: Rgb::new(144.0, 58.0, 178.0),
            attraction_radius: 60.0,
            repulsion_radius: 15.0,
            attraction_force: 0.04,
            repulsion_force: 0.25,
        },
        Emotion::Happy => FlockParams {
            color: Rgb::new(255.0, 255.0, 108.0),
            attraction_radius: 130.0,
            repulsion_radius: 20.0,
            attraction_force: 0.05,
            repulsion_force: 0.1,
        },
        Emotion::Sad => FlockParams {
            color: Rgb::new(0.0, 108.0, 153.0),
            attraction_radius: 90.0,
            repulsion_radius: 30.0,
            attraction_force: 0.01,
            repulsion_force: 0.05,
        },
        Emotion::Surprise => FlockParams {
            color: Rgb::new(255.0, 255.0, 255.0),
            attraction_radius: 150.0,
            repulsion_radius: 50.0,
            attraction_force: 0.15,
            repulsion_force: 0.2,
        },
    };
    Some(params)
}

/// Drives the swarm's behavior bundle from the primary emotion
pub struct FlockDriver {
    interp: ParameterInterpolator<Emotion, FlockParams>,
}

impl FlockDriver {
    pub fn new() -> Self {
        Self {
            interp: ParameterInterpolator::new(
                flock_bundle,
                Emotion::Neutral,
                BlendMode::Exponential {
                    rate: FLOCK_BLEND_RATE,
                },
            ),
        }
    }

    /// Live blended bundle for the renderer
    pub fn params(&self) -> &FlockParams {
        self.interp.value()
    }
}

impl Default for FlockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualDriver for FlockDriver {
    fn name(&self) -> &'static str {
        "boids"
    }

    fn update(&mut self, world: &WorldState, dt: f32) {
        self.interp.select(world.primary.emotion);
        self.interp.tick(dt);
    }
}
