//! Direction debouncing
//!
//! Raw per-frame direction labels flicker. `DirectionStabilizer` turns
//! them into a stable stream by requiring a streak of identical
//! readings, and remembers the last non-neutral direction so a
//! momentary return to center reads as noise rather than a real move.

/// Consecutive identical readings required before a direction counts
/// as stable
pub const STABLE_STREAK: u32 = 3;

/// Streak-count debouncer for one discrete direction stream
///
/// One instance per tracked stream (gaze, face orientation); state is
/// never shared across streams.
#[derive(Debug, Clone)]
pub struct DirectionStabilizer<D> {
    neutral: D,
    previous: D,
    streak: u32,
    last_valid: D,
}

impl<D: Copy + PartialEq> DirectionStabilizer<D> {
    /// Create a stabilizer with the given neutral/center value
    pub fn new(neutral: D) -> Self {
        Self {
            neutral,
            previous: neutral,
            streak: 0,
            last_valid: neutral,
        }
    }

    /// Feed one reading; returns whether the stream is currently stable
    ///
    /// The streak resets to 1 on any change and increments on
    /// repetition. Any non-neutral reading refreshes the last-valid
    /// direction, stable or not.
    pub fn update(&mut self, direction: D) -> bool {
        if direction == self.previous {
            self.streak += 1;
        } else {
            self.previous = direction;
            self.streak = 1;
        }

        if direction != self.neutral {
            self.last_valid = direction;
        }

        self.streak >= STABLE_STREAK
    }

    /// Feed one reading and apply the stability policy
    ///
    /// Stable non-neutral: the reading itself. Stable neutral: the
    /// last valid direction (a brief look back to center keeps the
    /// prior target). Not stable: `None`, callers leave their
    /// effective value unchanged this tick.
    pub fn resolve(&mut self, direction: D) -> Option<D> {
        if !self.update(direction) {
            return None;
        }
        if direction != self.neutral {
            Some(direction)
        } else {
            Some(self.last_valid)
        }
    }

    /// Last non-neutral direction seen, or neutral if none yet
    pub fn last_valid(&self) -> D {
        self.last_valid
    }

    /// Current streak length
    pub fn streak(&self) -> u32 {
        self.streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::snapshot::GazeDirection;

    #[test]
    fn test_stable_after_three_identical() {
        let mut stabilizer = DirectionStabilizer::new(GazeDirection::Center);
        let inputs = [
            GazeDirection::Left,
            GazeDirection::Left,
            GazeDirection::Right,
            GazeDirection::Right,
            GazeDirection::Right,
        ];
        let flags: Vec<bool> = inputs.iter().map(|d| stabilizer.update(*d)).collect();
        assert_eq!(flags, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_streak_resets_on_change() {
        let mut stabilizer = DirectionStabilizer::new(GazeDirection::Center);
        stabilizer.update(GazeDirection::Up);
        stabilizer.update(GazeDirection::Up);
        assert_eq!(stabilizer.streak(), 2);
        stabilizer.update(GazeDirection::Down);
        assert_eq!(stabilizer.streak(), 1);
    }

    #[test]
    fn test_last_valid_survives_center() {
        let mut stabilizer = DirectionStabilizer::new(GazeDirection::Center);
        for _ in 0..3 {
            stabilizer.update(GazeDirection::Left);
        }
        // Center readings never overwrite the remembered direction
        stabilizer.update(GazeDirection::Center);
        assert_eq!(stabilizer.last_valid(), GazeDirection::Left);
    }

    #[test]
    fn test_stable_center_resolves_to_last_valid() {
        let mut stabilizer = DirectionStabilizer::new(GazeDirection::Center);
        for _ in 0..3 {
            assert!(stabilizer.resolve(GazeDirection::Left).is_some() || stabilizer.streak() < 3);
        }
        // Three centers in a row are stable, but the policy output is
        // still the prior gaze target
        stabilizer.resolve(GazeDirection::Center);
        stabilizer.resolve(GazeDirection::Center);
        assert_eq!(
            stabilizer.resolve(GazeDirection::Center),
            Some(GazeDirection::Left)
        );
    }

    #[test]
    fn test_unstable_resolves_to_none() {
        let mut stabilizer = DirectionStabilizer::new(GazeDirection::Center);
        assert_eq!(stabilizer.resolve(GazeDirection::Up), None);
        assert_eq!(stabilizer.resolve(GazeDirection::Down), None);
    }

    #[test]
    fn test_startup_state() {
        let stabilizer: DirectionStabilizer<GazeDirection> =
            DirectionStabilizer::new(GazeDirection::Center);
        assert_eq!(stabilizer.streak(), 0);
        assert_eq!(stabilizer.last_valid(), GazeDirection::Center);
    }
}
