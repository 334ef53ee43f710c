//! Visual effect drivers
//!
//! The parameter side of each effect: every driver consumes the
//! per-tick `WorldState` through one uniform trait and produces the
//! smoothed coefficients its renderer reads. The drawing itself lives
//! outside this crate; the aggregation loop never needs to know which
//! concrete effect it is updating.

pub mod confetti;
pub mod flock;
pub mod fountain;
pub mod gaze_particles;
pub mod wave;

use crate::config::{ActiveVisual, InstallationConfig};
use crate::fusion::aggregator::WorldState;

pub use confetti::ConfettiDriver;
pub use flock::{FlockDriver, FlockParams};
pub use fountain::{FountainDriver, FountainParams, FountainSide};
pub use gaze_particles::{EmitterOffset, GazeDriver};
pub use wave::{WaveDriver, WaveParams};

/// Uniform capability every effect driver implements
pub trait VisualDriver {
    /// Short effect name for logs
    fn name(&self) -> &'static str;

    /// Consume this tick's world state and advance smoothing by `dt`
    /// seconds
    fn update(&mut self, world: &WorldState, dt: f32);
}

/// Assemble the drivers selected in the configuration
pub fn build_drivers(config: &InstallationConfig) -> Vec<Box<dyn VisualDriver>> {
    let mut drivers: Vec<Box<dyn VisualDriver>> = Vec::new();
    for visual in &config.active_visuals {
        match visual {
            ActiveVisual::Confetti => drivers.push(Box::new(ConfettiDriver::new())),
            ActiveVisual::Fountain => {
                drivers.push(Box::new(FountainDriver::new(FountainSide::Left)));
                drivers.push(Box::new(FountainDriver::new(FountainSide::Right)));
            }
            ActiveVisual::Boids => drivers.push(Box::new(FlockDriver::new())),
            ActiveVisual::Wave => drivers.push(Box::new(WaveDriver::new())),
            ActiveVisual::Gaze => {
                if config.use_gaze_tracking {
                    drivers.push(Box::new(GazeDriver::new(
                        config.screen_width,
                        config.screen_height,
                    )));
                }
            }
        }
    }
    drivers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fountain_builds_both_sides() {
        let config = InstallationConfig::default();
        let drivers = build_drivers(&config);
        let names: Vec<&str> = drivers.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["fountain-left", "fountain-right"]);
    }

    #[test]
    fn test_gaze_driver_needs_tracking_enabled() {
        let config = InstallationConfig {
            active_visuals: vec![ActiveVisual::Gaze],
            use_gaze_tracking: false,
            ..Default::default()
        };
        assert!(build_drivers(&config).is_empty());

        let config = InstallationConfig {
            active_visuals: vec![ActiveVisual::Gaze],
            use_gaze_tracking: true,
            ..Default::default()
        };
        assert_eq!(build_drivers(&config).len(), 1);
    }

    #[test]
    fn test_full_selection() {
        let config = InstallationConfig {
            active_visuals: vec![
                ActiveVisual::Confetti,
                ActiveVisual::Fountain,
                ActiveVisual::Boids,
                ActiveVisual::Wave,
            ],
            ..Default::default()
        };
        assert_eq!(build_drivers(&config).len(), 5);
    }
}
