//! sensestage CLI - drive the affect-sensing installation core
//!
//! Subcommands:
//! - `run`: start the tick loop against synthetic capture
//!   collaborators (optionally with live microphones)
//! - `devices`: enumerate audio input devices for configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cpal::traits::{DeviceTrait, HostTrait};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sensestage::config::InstallationConfig;
use sensestage::fusion::SensorAggregator;
use sensestage::record::CsvSink;
use sensestage::runtime::Installation;
use sensestage::sensor::{
    AudioDevice, GazeSource, ScriptedClassifier, ScriptedGaze, ScriptedOrientation, SensorSource,
    SyntheticFeed,
};
use sensestage::visuals::build_drivers;
use sensestage::VERSION;

/// sensestage - affect-sensing fusion core for interactive installations
#[derive(Parser, Debug)]
#[command(name = "sensestage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the installation loop
    Run {
        /// Path to the installation config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the run duration in seconds
        #[arg(short, long)]
        duration: Option<f32>,

        /// Override the warmup wait in seconds
        #[arg(long)]
        warmup: Option<f32>,

        /// Capture live microphone volume on the configured devices
        /// (vision stays synthetic)
        #[arg(long)]
        with_audio: bool,
    },

    /// List audio input devices
    Devices,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match cli.command {
        Commands::Run {
            config,
            duration,
            warmup,
            with_audio,
        } => run(config, duration, warmup, with_audio),
        Commands::Devices => list_devices(),
    }
}

fn run(
    config_path: Option<PathBuf>,
    duration: Option<f32>,
    warmup: Option<f32>,
    with_audio: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => InstallationConfig::load(&path)?,
        None => InstallationConfig::default(),
    };
    if let Some(duration) = duration {
        config.duration_secs = duration;
    }
    if let Some(warmup) = warmup {
        config.warmup_secs = warmup;
    }
    config.validate()?;

    info!("sensestage v{}", VERSION);
    info!(
        "Sensors: {}, gaze: {}, visuals: {:?}",
        config.num_sensors, config.use_gaze_tracking, config.active_visuals
    );

    let mic = |id: Option<usize>| {
        if !with_audio {
            AudioDevice::Disabled
        } else {
            match id {
                Some(index) => AudioDevice::Index(index),
                None => AudioDevice::Default,
            }
        }
    };

    let primary = synthetic_sensor(config.camera1_id, mic(config.mic1_id), &config);
    let secondary = if config.num_sensors == 2 {
        Some(synthetic_sensor(config.camera2_id, mic(config.mic2_id), &config))
    } else {
        None
    };
    let gaze = if config.use_gaze_tracking {
        Some(GazeSource::new(
            config.gaze_camera_id,
            Box::new(SyntheticFeed::new(config.fps as f32)),
            Box::new(ScriptedGaze::default()),
        ))
    } else {
        None
    };

    let aggregator = SensorAggregator::new(primary, secondary, gaze);
    let drivers = build_drivers(&config);
    let sink = Box::new(CsvSink::new(config.log_path()));

    let planned = (config.duration_secs * config.fps as f32) as u64;
    let bar = ProgressBar::new(planned);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} frames ({eta})")
            .context("Invalid progress template")?,
    );

    let mut installation = Installation::new(config, aggregator, drivers, sink);
    let stats = installation.run_with(|done, _planned| bar.set_position(done))?;
    bar.finish();

    info!(
        "Done: {} frames in {:.1}s",
        stats.frames,
        stats.elapsed.as_secs_f32()
    );
    Ok(())
}

fn synthetic_sensor(
    camera_id: usize,
    mic: AudioDevice,
    config: &InstallationConfig,
) -> SensorSource {
    SensorSource::new(
        camera_id,
        mic,
        Box::new(SyntheticFeed::new(config.fps as f32)),
        Box::new(ScriptedClassifier::default()),
        Box::new(ScriptedOrientation::default()),
    )
}

fn list_devices() -> Result<()> {
    let host = cpal::default_host();

    let default_name = host
        .default_input_device()
        .and_then(|d| d.name().ok())
        .unwrap_or_else(|| "<none>".to_string());
    println!("Default input device: {}", default_name);

    let devices = host
        .input_devices()
        .context("Failed to enumerate input devices")?;
    println!("Input devices:");
    for (index, device) in devices.enumerate() {
        let name = device.name().unwrap_or_else(|_| "<unknown>".to_string());
        println!("  [{}] {}", index, name);
    }
    Ok(())
}
