//! Integration tests for the fusion pipeline
//!
//! End-to-end scenarios: capture loops feeding the aggregator, the
//! stabilizer/interpolator stack, and the tick-loop runtime with a CSV
//! sink.

use std::time::Duration;

use sensestage::config::InstallationConfig;
use sensestage::fusion::SensorAggregator;
use sensestage::record::{CsvSink, TickSink};
use sensestage::runtime::Installation;
use sensestage::sensor::{
    AffectClassifier, AudioDevice, Emotion, FaceDirection, Frame, FrameStream, GazeDirection,
    OrientationDetector, SensorSource, Snapshot, VideoFeed,
};
use sensestage::visuals::{build_drivers, FlockDriver, VisualDriver};
use sensestage::{Result, WorldState};

struct StubFeed;

impl VideoFeed for StubFeed {
    fn open(&mut self) -> Result<Box<dyn FrameStream>> {
        Ok(Box::new(StubStream))
    }
}

struct StubStream;

impl FrameStream for StubStream {
    fn grab(&mut self) -> Result<Frame> {
        std::thread::sleep(Duration::from_millis(1));
        Ok(Frame::new(4, 4, vec![0; 48]))
    }
}

struct FixedClassifier(Emotion);

impl AffectClassifier for FixedClassifier {
    fn classify(&mut self, _frame: &Frame) -> Result<Emotion> {
        Ok(self.0)
    }
}

struct FixedOrientation(FaceDirection);

impl OrientationDetector for FixedOrientation {
    fn detect(&mut self, _frame: &Frame) -> Result<FaceDirection> {
        Ok(self.0)
    }
}

fn fixed_source(emotion: Emotion) -> SensorSource {
    SensorSource::new(
        0,
        AudioDevice::Disabled,
        Box::new(StubFeed),
        Box::new(FixedClassifier(emotion)),
        Box::new(FixedOrientation(FaceDirection::Center)),
    )
}

fn fixed_world(snapshot: Snapshot) -> WorldState {
    WorldState {
        primary: snapshot.clone(),
        secondary: snapshot,
        gaze: GazeDirection::Center,
        frame_index: 0,
    }
}

/// A steady Happy reading pulls the flock bundle onto the Happy color
/// within sixty ticks
#[test]
fn test_happy_convergence_scenario() {
    let world = fixed_world(Snapshot {
        emotion: Emotion::Happy,
        face_direction: FaceDirection::Center,
        volume: 12.0,
    });

    let mut driver = FlockDriver::new();
    for _ in 0..60 {
        driver.update(&world, 1.0 / 30.0);
    }

    // Happy flock color is (255, 255, 108)
    let (r, g, b) = driver.params().color.channels();
    assert!((255i32 - r as i32).abs() <= 6);
    assert!((255i32 - g as i32).abs() <= 6);
    assert!((108i32 - b as i32).abs() <= 6);
}

/// Single-sensor runs mirror the primary snapshot into both logical
/// slots on every tick
#[test]
fn test_single_sensor_mirroring() {
    let mut aggregator = SensorAggregator::new(fixed_source(Emotion::Surprise), None, None);
    aggregator.start();
    std::thread::sleep(Duration::from_millis(50));

    for _ in 0..30 {
        let world = aggregator.tick();
        assert_eq!(world.primary, world.secondary);
    }
    aggregator.stop();
}

/// The full loop: capture threads, aggregation, drivers, and the CSV
/// sink, through a short timed run
#[test]
fn test_timed_run_produces_log() {
    let log_path = std::env::temp_dir().join(format!(
        "sensestage_pipeline_{}.csv",
        std::process::id()
    ));

    let config = InstallationConfig {
        fps: 60,
        duration_secs: 0.25,
        warmup_secs: 0.0,
        ..Default::default()
    };
    let aggregator = SensorAggregator::new(fixed_source(Emotion::Happy), None, None);
    let drivers = build_drivers(&config);
    let sink = Box::new(CsvSink::new(&log_path));

    let mut installation = Installation::new(config, aggregator, drivers, sink);
    let stats = installation.run().unwrap();
    assert!(stats.frames > 0);

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // Header plus one row per tick
    assert_eq!(lines.len() as u64, stats.frames + 1);
    assert!(lines[0].starts_with("Timestamp,Frame Count"));

    std::fs::remove_file(&log_path).ok();
}

/// A camera that never opens leaves the source serving neutral
/// defaults, and a run over it still completes
#[test]
fn test_degraded_sensor_keeps_show_running() {
    struct DeadFeed;

    impl VideoFeed for DeadFeed {
        fn open(&mut self) -> Result<Box<dyn FrameStream>> {
            Err(sensestage::SenseError::DeviceUnavailable {
                device: sensestage::DeviceKind::Camera,
                message: "unplugged".to_string(),
            })
        }
    }

    let source = SensorSource::new(
        0,
        AudioDevice::Disabled,
        Box::new(DeadFeed),
        Box::new(FixedClassifier(Emotion::Happy)),
        Box::new(FixedOrientation(FaceDirection::Left)),
    );

    let mut aggregator = SensorAggregator::new(source, None, None);
    aggregator.start();

    for _ in 0..100 {
        let world = aggregator.tick();
        assert_eq!(world.primary, Snapshot::default());
    }
    aggregator.stop();
}

/// Scripted per-driver smoke pass: every configured driver accepts
/// every emotion without panicking
#[test]
fn test_all_drivers_accept_all_emotions() {
    let config = InstallationConfig {
        active_visuals: vec![
            sensestage::ActiveVisual::Confetti,
            sensestage::ActiveVisual::Fountain,
            sensestage::ActiveVisual::Boids,
            sensestage::ActiveVisual::Wave,
            sensestage::ActiveVisual::Gaze,
        ],
        use_gaze_tracking: true,
        ..Default::default()
    };
    let mut drivers = build_drivers(&config);
    assert_eq!(drivers.len(), 6);

    for emotion in Emotion::ALL {
        let world = fixed_world(Snapshot {
            emotion,
            face_direction: FaceDirection::UpRight,
            volume: 40.0,
        });
        for driver in &mut drivers {
            driver.update(&world, 1.0 / 30.0);
        }
    }
}

/// The sink trait is usable standalone: begin, a burst of records,
/// finish
#[test]
fn test_sink_contract() {
    let log_path = std::env::temp_dir().join(format!(
        "sensestage_sink_{}.csv",
        std::process::id()
    ));

    let mut sink = CsvSink::new(&log_path);
    sink.begin().unwrap();
    let world = fixed_world(Snapshot {
        emotion: Emotion::Fear,
        face_direction: FaceDirection::Down,
        volume: 3.5,
    });
    for _ in 0..5 {
        sink.record(&sensestage::TickRecord::from_world(&world)).unwrap();
    }
    sink.finish().unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 6);
    assert!(content.contains("Fear,down,3.5"));

    std::fs::remove_file(&log_path).ok();
}
