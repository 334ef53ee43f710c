//! Per-sensor readings
//!
//! The discrete labels produced by the inference collaborators and the
//! latest-value `Snapshot` assembled from them. A snapshot is
//! last-write-wins: each capture iteration overwrites the previous
//! value in place, and readers take an atomic copy on their own tick
//! cadence.

use std::fmt;

/// Discrete emotion labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    /// All labels, in the order reports list them
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Get label name
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        }
    }

    /// Parse from a label string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Angry" => Some(Emotion::Angry),
            "Disgust" => Some(Emotion::Disgust),
            "Fear" => Some(Emotion::Fear),
            "Happy" => Some(Emotion::Happy),
            "Sad" => Some(Emotion::Sad),
            "Surprise" => Some(Emotion::Surprise),
            "Neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Neutral
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Face orientation labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    Center,
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl FaceDirection {
    /// All labels, in the order reports list them
    pub const ALL: [FaceDirection; 9] = [
        FaceDirection::Center,
        FaceDirection::Left,
        FaceDirection::Right,
        FaceDirection::Up,
        FaceDirection::Down,
        FaceDirection::UpLeft,
        FaceDirection::UpRight,
        FaceDirection::DownLeft,
        FaceDirection::DownRight,
    ];

    /// Get label name
    pub fn name(&self) -> &'static str {
        match self {
            FaceDirection::Center => "center",
            FaceDirection::Left => "left",
            FaceDirection::Right => "right",
            FaceDirection::Up => "up",
            FaceDirection::Down => "down",
            FaceDirection::UpLeft => "up-left",
            FaceDirection::UpRight => "up-right",
            FaceDirection::DownLeft => "down-left",
            FaceDirection::DownRight => "down-right",
        }
    }
}

impl Default for FaceDirection {
    fn default() -> Self {
        FaceDirection::Center
    }
}

impl fmt::Display for FaceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Gaze direction labels (face directions plus blink)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GazeDirection {
    Center,
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Blink,
}

impl GazeDirection {
    /// Get label name
    pub fn name(&self) -> &'static str {
        match self {
            GazeDirection::Center => "center",
            GazeDirection::Left => "left",
            GazeDirection::Right => "right",
            GazeDirection::Up => "up",
            GazeDirection::Down => "down",
            GazeDirection::UpLeft => "up-left",
            GazeDirection::UpRight => "up-right",
            GazeDirection::DownLeft => "down-left",
            GazeDirection::DownRight => "down-right",
            GazeDirection::Blink => "blink",
        }
    }
}

impl Default for GazeDirection {
    fn default() -> Self {
        GazeDirection::Center
    }
}

impl fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Latest reading of one camera/microphone pair
///
/// `Default` is the designated neutral value a degraded source keeps
/// serving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub emotion: Emotion,
    pub face_direction: FaceDirection,
    pub volume: f32,
}
