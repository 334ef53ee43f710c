//! Parameter blending
//!
//! Maps a discrete category (usually an emotion) to a bundle of visual
//! coefficients and blends the live bundle toward the selected target
//! over time. Two modes:
//! - Exponential: a fixed fraction of the remaining gap per tick,
//!   always converging toward the current target even if it changes
//!   mid-blend
//! - Linear: a fixed-duration transition from the value at selection
//!   time, landing on the target exactly
//!
//! Every visual consumer owns one interpolator; this replaces per-field
//! lerp code scattered across the effects.

/// Field-wise linear blending between two values of the same shape
///
/// `blend(from, to, 0.0) == from`, `blend(from, to, 1.0) == to`, and
/// every intermediate value stays within the per-field hull of the two
/// endpoints.
pub trait Blend: Clone {
    fn blend(from: &Self, to: &Self, t: f32) -> Self;
}

impl Blend for f32 {
    fn blend(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

/// RGB color blended per channel
///
/// Channels are kept in float space so repeated small blend steps
/// accumulate; `channels` truncates to 8-bit at the consumer boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// 8-bit channels, truncated
    pub fn channels(&self) -> (u8, u8, u8) {
        (
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        )
    }
}

impl Blend for Rgb {
    fn blend(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            r: f32::blend(&from.r, &to.r, t),
            g: f32::blend(&from.g, &to.g, t),
            b: f32::blend(&from.b, &to.b, t),
        }
    }
}

/// How the live bundle approaches the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendMode {
    /// Per-tick exponential decay of the remaining gap
    Exponential { rate: f32 },
    /// Fixed-duration linear transition, in seconds
    Linear { duration: f32 },
}

/// Blends a parameter bundle toward the bundle mapped from the most
/// recently selected category
///
/// `lookup` is the static category-to-bundle mapping; a category with
/// no mapping falls back to the designated fallback category. The
/// bundle schema is fixed per consumer, so `current` and `target`
/// always carry the same field set.
#[derive(Debug, Clone)]
pub struct ParameterInterpolator<C, B> {
    lookup: fn(C) -> Option<B>,
    fallback: C,
    category: C,
    mode: BlendMode,
    current: B,
    start: B,
    target: B,
    elapsed: f32,
}

impl<C: Copy + PartialEq, B: Blend + Default> ParameterInterpolator<C, B> {
    /// Create an interpolator resting on the fallback category's bundle
    pub fn new(lookup: fn(C) -> Option<B>, fallback: C, mode: BlendMode) -> Self {
        let initial = lookup(fallback).unwrap_or_default();
        Self {
            lookup,
            fallback,
            category: fallback,
            mode,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            elapsed: 0.0,
        }
    }

    /// Select the driving category
    ///
    /// On a change of category the target is replaced and the
    /// duration-mode clock restarts from the current blended value.
    /// Re-selecting the active category is a no-op, so a steady input
    /// stream never interrupts a transition in flight.
    pub fn select(&mut self, category: C) {
        if category == self.category {
            return;
        }
        self.category = category;

        let next = (self.lookup)(category).or_else(|| (self.lookup)(self.fallback));
        let Some(next) = next else {
            // Nothing mapped anywhere: keep blending toward the old target
            return;
        };

        self.target = next;
        self.start = self.current.clone();
        self.elapsed = 0.0;
    }

    /// Advance the blend by one tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        match self.mode {
            BlendMode::Exponential { rate } => {
                self.current = B::blend(&self.current, &self.target, rate);
            }
            BlendMode::Linear { duration } => {
                self.elapsed += dt;
                let t = (self.elapsed / duration).clamp(0.0, 1.0);
                if t >= 1.0 {
                    // Land exactly, no residual drift
                    self.current = self.target.clone();
                } else {
                    self.current = B::blend(&self.start, &self.target, t);
                }
            }
        }
    }

    /// The live blended bundle
    pub fn value(&self) -> &B {
        &self.current
    }

    /// The currently selected category
    pub fn category(&self) -> C {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::snapshot::Emotion;

    #[derive(Debug, Clone, PartialEq)]
    struct TestParams {
        radius: f32,
        color: Rgb,
    }

    impl Default for TestParams {
        fn default() -> Self {
            Self {
                radius: 0.0,
                color: Rgb::new(0.0, 0.0, 0.0),
            }
        }
    }

    impl Blend for TestParams {
        fn blend(from: &Self, to: &Self, t: f32) -> Self {
            Self {
                radius: f32::blend(&from.radius, &to.radius, t),
                color: Rgb::blend(&from.color, &to.color, t),
            }
        }
    }

    fn lookup(emotion: Emotion) -> Option<TestParams> {
        match emotion {
            Emotion::Neutral => Some(TestParams {
                radius: 100.0,
                color: Rgb::new(173.0, 216.0, 230.0),
            }),
            Emotion::Happy => Some(TestParams {
                radius: 130.0,
                color: Rgb::new(255.0, 255.0, 108.0),
            }),
            _ => None,
        }
    }

    #[test]
    fn test_exponential_contraction() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Exponential { rate: 0.05 },
        );
        interp.select(Emotion::Happy);

        let mut gap = (130.0f32 - 100.0).abs();
        for _ in 0..40 {
            interp.tick(1.0 / 30.0);
            let next_gap = (130.0 - interp.value().radius).abs();
            assert!((next_gap - gap * 0.95).abs() < 1e-3);
            assert!(next_gap <= gap); // monotone, no overshoot
            gap = next_gap;
        }
    }

    #[test]
    fn test_exponential_converges_by_sixty_ticks() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Exponential { rate: 0.05 },
        );
        interp.select(Emotion::Happy);
        for _ in 0..60 {
            interp.tick(1.0 / 30.0);
        }
        // 0.95^60 of the largest channel gap is under six counts
        let (r, g, b) = interp.value().color.channels();
        assert!((255i32 - r as i32).abs() <= 6);
        assert!((255i32 - g as i32).abs() <= 6);
        assert!((108i32 - b as i32).abs() <= 6);
    }

    #[test]
    fn test_linear_endpoints_exact() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Linear { duration: 2.0 },
        );
        interp.select(Emotion::Happy);
        assert!((interp.value().radius - 100.0).abs() < f32::EPSILON);

        interp.tick(1.0);
        assert!((interp.value().radius - 115.0).abs() < 1e-4);

        interp.tick(1.0);
        assert_eq!(interp.value().radius, 130.0);
        assert_eq!(interp.value().color, Rgb::new(255.0, 255.0, 108.0));

        // Past the end it stays pinned
        interp.tick(1.0);
        assert_eq!(interp.value().radius, 130.0);
    }

    #[test]
    fn test_linear_retarget_restarts_from_current() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Linear { duration: 2.0 },
        );
        interp.select(Emotion::Happy);
        interp.tick(1.0);
        let midway = interp.value().radius;

        interp.select(Emotion::Neutral);
        // New transition starts at the mid-blend value, clock at zero
        assert!((interp.value().radius - midway).abs() < f32::EPSILON);
        interp.tick(2.0);
        assert_eq!(interp.value().radius, 100.0);
    }

    #[test]
    fn test_reselecting_same_category_keeps_clock() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Linear { duration: 2.0 },
        );
        interp.select(Emotion::Happy);
        interp.tick(1.0);
        let midway = interp.value().radius;

        interp.select(Emotion::Happy);
        interp.tick(1.0);
        assert_eq!(interp.value().radius, 130.0);
        assert!(midway < 130.0);
    }

    #[test]
    fn test_unmapped_category_falls_back() {
        let mut interp = ParameterInterpolator::new(
            lookup,
            Emotion::Neutral,
            BlendMode::Exponential { rate: 1.0 },
        );
        interp.select(Emotion::Happy);
        interp.tick(0.0);
        // Disgust has no bundle in this table; target becomes Neutral's
        interp.select(Emotion::Disgust);
        interp.tick(0.0);
        assert!((interp.value().radius - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_blend_stays_in_hull() {
        let a = Rgb::new(10.0, 200.0, 50.0);
        let b = Rgb::new(90.0, 100.0, 50.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let mid = Rgb::blend(&a, &b, t);
            assert!(mid.r >= 10.0 && mid.r <= 90.0);
            assert!(mid.g >= 100.0 && mid.g <= 200.0);
            assert!((mid.b - 50.0).abs() < f32::EPSILON);
        }
    }
}
