//! Confetti trigger
//!
//! Shows a confetti burst when every sensed person reads Happy at the
//! same time: the shared joy has to hold for a full second before the
//! burst starts, then the display runs for three seconds. With one
//! sensor the mirrored secondary slot makes this a single-person
//! trigger automatically.

use crate::fusion::aggregator::WorldState;
use crate::sensor::snapshot::Emotion;
use crate::visuals::VisualDriver;

/// How long shared happiness must hold before the burst
pub const HAPPY_HOLD_SECS: f32 = 1.0;

/// How long one burst stays on screen
pub const DISPLAY_SECS: f32 = 3.0;

/// Timer state machine behind the confetti effect
pub struct ConfettiDriver {
    happy_timer: f32,
    display_timer: f32,
    displaying: bool,
}

impl ConfettiDriver {
    pub fn new() -> Self {
        Self {
            happy_timer: 0.0,
            display_timer: 0.0,
            displaying: false,
        }
    }

    /// Whether the burst is currently on screen
    pub fn is_displaying(&self) -> bool {
        self.displaying
    }
}

impl Default for ConfettiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualDriver for ConfettiDriver {
    fn name(&self) -> &'static str {
        "confetti"
    }

    fn update(&mut self, world: &WorldState, dt: f32) {
        let is_happy =
            world.primary.emotion == Emotion::Happy && world.secondary.emotion == Emotion::Happy;

        if is_happy {
            self.happy_timer += dt;
            if self.happy_timer >= HAPPY_HOLD_SECS && !self.displaying {
                self.displaying = true;
                self.display_timer = DISPLAY_SECS;
            }
        } else {
            self.happy_timer = 0.0;
        }

        if self.displaying {
            self.display_timer -= dt;
            if self.display_timer <= 0.0 {
                self.displaying = false;
            }
        }
    }
}
