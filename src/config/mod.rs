//! Installation configuration
//!
//! Read once at startup and treated as fixed for the lifetime of the
//! run: sensor count, device identifiers, gaze tracking flag, active
//! visual selection, timing, and log paths. Loaded from YAML; every
//! field has a default so a partial file works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::SenseError;

/// Root installation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationConfig {
    /// Projection surface width in pixels
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Projection surface height in pixels
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    /// Render tick rate (Hz)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Total run duration in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: f32,

    /// Wait after sensor start before ticking, letting cameras and
    /// microphones settle
    #[serde(default = "default_warmup")]
    pub warmup_secs: f32,

    /// Number of physical camera/microphone pairs (1 or 2)
    #[serde(default = "default_num_sensors")]
    pub num_sensors: usize,

    /// Enable the dedicated gaze camera
    #[serde(default)]
    pub use_gaze_tracking: bool,

    /// Which visual effects are driven this run
    #[serde(default = "default_visuals")]
    pub active_visuals: Vec<ActiveVisual>,

    /// Camera device index for sensor 1
    #[serde(default)]
    pub camera1_id: usize,

    /// Camera device index for sensor 2 (used only when num_sensors = 2)
    #[serde(default)]
    pub camera2_id: usize,

    /// Camera device index for the gaze tracker
    #[serde(default)]
    pub gaze_camera_id: usize,

    /// Microphone device index for sensor 1 (None = system default)
    #[serde(default = "default_mic1")]
    pub mic1_id: Option<usize>,

    /// Microphone device index for sensor 2 (used only when num_sensors = 2)
    #[serde(default = "default_mic2")]
    pub mic2_id: Option<usize>,

    /// Directory for per-tick logs and the session summary
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Per-tick log file name inside data_dir
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_screen_width() -> u32 {
    1280
}

fn default_screen_height() -> u32 {
    920
}

fn default_fps() -> u32 {
    30
}

fn default_duration() -> f32 {
    180.0
}

fn default_warmup() -> f32 {
    10.0
}

fn default_num_sensors() -> usize {
    1
}

fn default_visuals() -> Vec<ActiveVisual> {
    vec![ActiveVisual::Fountain]
}

fn default_mic1() -> Option<usize> {
    Some(1)
}

fn default_mic2() -> Option<usize> {
    Some(5)
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_file() -> String {
    "mapping_log.csv".to_string()
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            fps: default_fps(),
            duration_secs: default_duration(),
            warmup_secs: default_warmup(),
            num_sensors: default_num_sensors(),
            use_gaze_tracking: false,
            active_visuals: default_visuals(),
            camera1_id: 0,
            camera2_id: 0,
            gaze_camera_id: 0,
            mic1_id: default_mic1(),
            mic2_id: default_mic2(),
            data_dir: default_data_dir(),
            log_file: default_log_file(),
        }
    }
}

impl InstallationConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Self =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse config YAML")?;
        config.validate().with_context(|| "Invalid configuration")?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> std::result::Result<(), SenseError> {
        if !(1..=2).contains(&self.num_sensors) {
            return Err(SenseError::Config {
                message: format!("num_sensors must be 1 or 2, got {}", self.num_sensors),
                path: None,
            });
        }
        if self.fps == 0 {
            return Err(SenseError::Config {
                message: "fps must be positive".to_string(),
                path: None,
            });
        }
        if self.active_visuals.contains(&ActiveVisual::Gaze) && !self.use_gaze_tracking {
            return Err(SenseError::Config {
                message: "the gaze visual requires use_gaze_tracking".to_string(),
                path: None,
            });
        }
        Ok(())
    }

    /// Full path of the per-tick log file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    /// Seconds of one render tick
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

/// Selectable visual effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveVisual {
    Confetti,
    Fountain,
    Boids,
    Wave,
    Gaze,
}
