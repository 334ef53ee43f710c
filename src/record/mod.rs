//! Per-tick data recording
//!
//! The logging collaborator surface: one fixed-schema record per
//! render tick, appended to a CSV log, plus an in-memory session
//! summary written out when the run finishes. The schema is written at
//! initialization and never changes mid-run.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::core::{Result, SenseError};
use crate::fusion::aggregator::WorldState;
use crate::sensor::snapshot::{Emotion, FaceDirection, GazeDirection, Snapshot};

/// One tick's log record
#[derive(Debug, Clone)]
pub struct TickRecord {
    pub timestamp: DateTime<Local>,
    pub frame_index: u64,
    pub primary: Snapshot,
    pub secondary: Snapshot,
    pub gaze: GazeDirection,
}

impl TickRecord {
    /// Stamp a world state with the current wall-clock time
    pub fn from_world(world: &WorldState) -> Self {
        Self {
            timestamp: Local::now(),
            frame_index: world.frame_index,
            primary: world.primary.clone(),
            secondary: world.secondary.clone(),
            gaze: world.gaze,
        }
    }
}

/// Append-only consumer of tick records
pub trait TickSink {
    /// Write the fixed schema; called once before the first record
    fn begin(&mut self) -> Result<()>;

    /// Append one record
    fn record(&mut self, record: &TickRecord) -> Result<()>;

    /// Flush and emit any end-of-run artifacts
    fn finish(&mut self) -> Result<()>;
}

const CSV_HEADER: &str = "Timestamp,Frame Count,\
Cam1_Emotion,Cam1_FaceDirection,Cam1_Volume,\
Cam2_Emotion,Cam2_FaceDirection,Cam2_Volume,\
Gaze_Direction";

/// CSV log plus end-of-run summary text
pub struct CsvSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    summary: SessionSummary,
}

impl CsvSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
            summary: SessionSummary::default(),
        }
    }

    fn io_err(&self, err: std::io::Error) -> SenseError {
        SenseError::Io {
            message: err.to_string(),
            path: Some(self.path.clone()),
        }
    }
}

impl TickSink for CsvSink {
    fn begin(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let file = File::create(&self.path).map_err(|e| self.io_err(e))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER).map_err(|e| self.io_err(e))?;
        self.writer = Some(writer);
        Ok(())
    }

    fn record(&mut self, record: &TickRecord) -> Result<()> {
        let writer = match self.writer {
            Some(ref mut writer) => writer,
            None => {
                return Err(SenseError::Io {
                    message: "record before begin".to_string(),
                    path: Some(self.path.clone()),
                })
            }
        };

        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.frame_index,
            record.primary.emotion,
            record.primary.face_direction,
            record.primary.volume,
            record.secondary.emotion,
            record.secondary.face_direction,
            record.secondary.volume,
            record.gaze,
        )
        .map_err(|e| self.io_err(e))?;

        self.summary.observe(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| self.io_err(e))?;
        }

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let summary_path = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join(format!("{}_summary.txt", stamp));
        std::fs::write(&summary_path, self.summary.report()).map_err(|e| SenseError::Io {
            message: e.to_string(),
            path: Some(summary_path.clone()),
        })?;

        info!("Session log: {:?}, summary: {:?}", self.path, summary_path);
        Ok(())
    }
}

/// Frame counts per label, per camera
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    frames: u64,
    emotions: [HashMap<Emotion, u64>; 2],
    faces: [HashMap<FaceDirection, u64>; 2],
}

impl SessionSummary {
    /// Fold one record into the counts
    pub fn observe(&mut self, record: &TickRecord) {
        self.frames += 1;
        for (slot, snapshot) in [&record.primary, &record.secondary].into_iter().enumerate() {
            *self.emotions[slot].entry(snapshot.emotion).or_insert(0) += 1;
            *self.faces[slot].entry(snapshot.face_direction).or_insert(0) += 1;
        }
    }

    /// Frames folded in so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Count for one emotion on one camera slot (0 or 1)
    pub fn emotion_count(&self, slot: usize, emotion: Emotion) -> u64 {
        self.emotions[slot].get(&emotion).copied().unwrap_or(0)
    }

    /// Plain-text distribution report
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Frames recorded: {}\n\n", self.frames));

        out.push_str("Emotion distribution (Cam1 / Cam2 / Average)\n");
        for emotion in Emotion::ALL {
            let c1 = self.emotion_count(0, emotion);
            let c2 = self.emotion_count(1, emotion);
            out.push_str(&format!(
                "  {:<10} {:>6} {:>6} {:>8.1}\n",
                emotion.name(),
                c1,
                c2,
                (c1 + c2) as f64 / 2.0
            ));
        }

        out.push_str("\nFace direction distribution (Cam1 / Cam2 / Average)\n");
        for direction in FaceDirection::ALL {
            let c1 = self.faces[0].get(&direction).copied().unwrap_or(0);
            let c2 = self.faces[1].get(&direction).copied().unwrap_or(0);
            out.push_str(&format!(
                "  {:<10} {:>6} {:>6} {:>8.1}\n",
                direction.name(),
                c1,
                c2,
                (c1 + c2) as f64 / 2.0
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(primary: Emotion, secondary: Emotion, frame_index: u64) -> TickRecord {
        TickRecord {
            timestamp: Local::now(),
            frame_index,
            primary: Snapshot {
                emotion: primary,
                face_direction: FaceDirection::Left,
                volume: 12.0,
            },
            secondary: Snapshot {
                emotion: secondary,
                ..Default::default()
            },
            gaze: GazeDirection::Center,
        }
    }

    #[test]
    fn test_csv_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "sensestage_log_{}_{:?}.csv",
            std::process::id(),
            std::thread::current().id()
        ));

        let mut sink = CsvSink::new(&path);
        sink.begin().unwrap();
        sink.record(&record(Emotion::Happy, Emotion::Sad, 0)).unwrap();
        sink.record(&record(Emotion::Happy, Emotion::Happy, 1)).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Timestamp,Frame Count,Cam1_Emotion"));
        // Each sensor slot logs its own data
        assert!(lines[1].contains("Happy,left,12"));
        assert!(lines[1].contains("Sad,center,0"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_record_before_begin_errors() {
        let mut sink = CsvSink::new(std::env::temp_dir().join("never_created.csv"));
        assert!(sink.record(&record(Emotion::Neutral, Emotion::Neutral, 0)).is_err());
    }

    #[test]
    fn test_summary_counts_both_slots() {
        let mut summary = SessionSummary::default();
        summary.observe(&record(Emotion::Happy, Emotion::Sad, 0));
        summary.observe(&record(Emotion::Happy, Emotion::Happy, 1));

        assert_eq!(summary.frames(), 2);
        assert_eq!(summary.emotion_count(0, Emotion::Happy), 2);
        assert_eq!(summary.emotion_count(1, Emotion::Happy), 1);
        assert_eq!(summary.emotion_count(1, Emotion::Sad), 1);

        let report = summary.report();
        assert!(report.contains("Emotion distribution"));
        assert!(report.contains("Happy"));
    }
}
