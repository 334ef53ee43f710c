//! Installation runtime
//!
//! The single-threaded cooperative tick loop that owns all fusion and
//! smoothing state. Capture threads block on their devices; this loop
//! never blocks on them — each tick it samples the aggregator, appends
//! the log record, and advances every visual driver, then sleeps out
//! the rest of the frame budget.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::InstallationConfig;
use crate::core::Result;
use crate::fusion::aggregator::{SensorAggregator, WorldState};
use crate::record::{TickRecord, TickSink};
use crate::visuals::VisualDriver;

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub frames: u64,
    pub elapsed: Duration,
}

/// Owns the aggregator, the visual drivers, and the record sink for
/// one run
pub struct Installation {
    config: InstallationConfig,
    aggregator: SensorAggregator,
    drivers: Vec<Box<dyn VisualDriver>>,
    sink: Box<dyn TickSink>,
    sink_warned: bool,
}

impl Installation {
    pub fn new(
        config: InstallationConfig,
        aggregator: SensorAggregator,
        drivers: Vec<Box<dyn VisualDriver>>,
        sink: Box<dyn TickSink>,
    ) -> Self {
        Self {
            config,
            aggregator,
            drivers,
            sink,
            sink_warned: false,
        }
    }

    /// One tick: sample, record, advance every driver
    ///
    /// A failing sink never stops the show; it is warned about once
    /// and the tick continues.
    pub fn step(&mut self, dt: f32) -> WorldState {
        let world = self.aggregator.tick();

        if let Err(e) = self.sink.record(&TickRecord::from_world(&world)) {
            if !self.sink_warned {
                warn!("Tick record failed, continuing without logging: {}", e);
                self.sink_warned = true;
            }
        }

        for driver in &mut self.drivers {
            driver.update(&world, dt);
        }
        world
    }

    /// Run for the configured duration
    pub fn run(&mut self) -> Result<RunStats> {
        self.run_with(|_, _| {})
    }

    /// Run for the configured duration, reporting (frames done, frames
    /// planned) after every tick
    pub fn run_with<F: FnMut(u64, u64)>(&mut self, mut progress: F) -> Result<RunStats> {
        self.aggregator.start();

        if self.config.warmup_secs > 0.0 {
            info!(
                "Waiting {:.0}s for cameras and microphones to settle",
                self.config.warmup_secs
            );
            std::thread::sleep(Duration::from_secs_f32(self.config.warmup_secs));
        }

        self.sink.begin()?;
        info!(
            "Run started: {:.0}s at {} fps, {} visual driver(s)",
            self.config.duration_secs,
            self.config.fps,
            self.drivers.len()
        );

        let tick = Duration::from_secs_f32(self.config.tick_secs());
        let planned = (self.config.duration_secs * self.config.fps as f32) as u64;
        let started = Instant::now();
        let mut last = started;
        let mut frames = 0u64;

        while started.elapsed().as_secs_f32() < self.config.duration_secs {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            self.step(dt);
            frames += 1;
            progress(frames, planned);

            // Sleep out the rest of this frame's budget; a late tick
            // just starts the next one immediately
            let deadline = started + tick * frames as u32;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }

        self.aggregator.stop();
        self.sink.finish()?;

        let stats = RunStats {
            frames,
            elapsed: started.elapsed(),
        };
        info!(
            "Run finished: {} frames in {:.1}s",
            stats.frames,
            stats.elapsed.as_secs_f32()
        );
        Ok(stats)
    }
}
