use serde::{Deserialize, Serialize};

use crate::core::primitives::lerp;
use crate::error::{ChartError, ChartResult};

/// Easing curve sampled once per animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Duration and easing of a time-driven transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub duration_seconds: f64,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration_seconds: 0.5,
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationSpec {
    pub fn new(duration_seconds: f64, easing: Easing) -> ChartResult<Self> {
        Self {
            duration_seconds,
            easing,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(ChartError::InvalidData(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Deterministic clock-free progress tracker; callers feed elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    spec: AnimationSpec,
    elapsed_seconds: f64,
}

impl Timeline {
    #[must_use]
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            elapsed_seconds: 0.0,
        }
    }

    /// Advances by `delta_seconds` and returns the eased fraction.
    pub fn advance(&mut self, delta_seconds: f64) -> f64 {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_seconds += delta_seconds;
        }
        self.fraction()
    }

    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.spec.duration_seconds <= 0.0 {
            return 1.0;
        }
        self.spec
            .easing
            .apply(self.elapsed_seconds / self.spec.duration_seconds)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed_seconds >= self.spec.duration_seconds
    }
}

/// An in-flight animated scroll from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollAnimation {
    from: f64,
    to: f64,
    timeline: Timeline,
}

impl ScrollAnimation {
    pub(crate) fn new(from: f64, to: f64, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            timeline: Timeline::new(spec),
        }
    }

    pub(crate) fn target(&self) -> f64 {
        self.to
    }

    /// Retargets to `max` without restarting the clock; `current` stays
    /// the value at the elapsed time.
    pub(crate) fn clamp_target(&mut self, current: f64, max: f64) {
        let fraction = self.timeline.fraction();
        self.to = max;
        if fraction < 1.0 {
            self.from = (current - max * fraction) / (1.0 - fraction);
        }
    }

    /// Returns the value for the new time and whether the animation ended.
    pub(crate) fn advance(&mut self, delta_seconds: f64) -> (f64, bool) {
        let fraction = self.timeline.advance(delta_seconds);
        if self.timeline.is_finished() {
            (self.to, true)
        } else {
            (lerp(self.from, self.to, fraction), false)
        }
    }
}

/// Tuning for fling deceleration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlingConfig {
    /// Multiplicative velocity decay per second, in `(0, 1)`.
    pub decay_per_second: f64,
    /// Fling stops when `abs(velocity)` drops below this many px/s.
    pub stop_velocity_abs: f64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            decay_per_second: 0.05,
            stop_velocity_abs: 10.0,
        }
    }
}

impl FlingConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.decay_per_second.is_finite()
            || self.decay_per_second <= 0.0
            || self.decay_per_second >= 1.0
        {
            return Err(ChartError::InvalidFraction {
                name: "fling decay_per_second",
                value: self.decay_per_second,
            });
        }
        if !self.stop_velocity_abs.is_finite() || self.stop_velocity_abs <= 0.0 {
            return Err(ChartError::InvalidData(
                "fling stop velocity must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Fling {
    velocity_px_per_sec: f64,
}

impl Fling {
    pub(crate) fn new(velocity_px_per_sec: f64) -> Self {
        Self {
            velocity_px_per_sec,
        }
    }

    pub(crate) fn velocity(&self) -> f64 {
        self.velocity_px_per_sec
    }

    /// Returns the distance to travel over `delta_seconds` and decays velocity.
    pub(crate) fn advance(&mut self, delta_seconds: f64, config: FlingConfig) -> f64 {
        let distance = self.velocity_px_per_sec * delta_seconds;
        self.velocity_px_per_sec *= config.decay_per_second.powf(delta_seconds);
        distance
    }

    pub(crate) fn is_stopped(&self, config: FlingConfig) -> bool {
        self.velocity_px_per_sec.abs() < config.stop_velocity_abs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(easing.apply(0.0).abs() <= 1e-12);
            assert!((easing.apply(1.0) - 1.0).abs() <= 1e-12);
            assert!((easing.apply(2.0) - 1.0).abs() <= 1e-12);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() <= 1e-12);
    }

    #[test]
    fn zero_duration_timeline_finishes_immediately() {
        let mut timeline = Timeline::new(AnimationSpec {
            duration_seconds: 0.0,
            easing: Easing::Linear,
        });
        assert!(timeline.is_finished());
        assert!((timeline.advance(0.0) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn scroll_animation_reaches_target_exactly() {
        let spec = AnimationSpec::new(1.0, Easing::Linear).expect("spec");
        let mut animation = ScrollAnimation::new(10.0, 30.0, spec);
        let (value, done) = animation.advance(0.5);
        assert!((value - 20.0).abs() <= 1e-9);
        assert!(!done);
        let (value, done) = animation.advance(0.6);
        assert_eq!(value, 30.0);
        assert!(done);
    }

    #[test]
    fn clamped_target_keeps_elapsed_time() {
        let spec = AnimationSpec::new(1.0, Easing::Linear).expect("spec");
        let mut animation = ScrollAnimation::new(0.0, 100.0, spec);
        let (value, _) = animation.advance(0.5);
        assert!((value - 50.0).abs() <= 1e-9);

        animation.clamp_target(value, 60.0);
        assert_eq!(animation.target(), 60.0);
        let (value, done) = animation.advance(0.0);
        assert!((value - 50.0).abs() <= 1e-9);
        assert!(!done);
        let (value, done) = animation.advance(0.25);
        assert!((value - 55.0).abs() <= 1e-9);
        assert!(!done);
        let (value, done) = animation.advance(0.25);
        assert_eq!(value, 60.0);
        assert!(done);
    }

    #[test]
    fn fling_decays_velocity() {
        let config = FlingConfig {
            decay_per_second: 0.5,
            stop_velocity_abs: 1.0,
        };
        let mut fling = Fling::new(100.0);
        let distance = fling.advance(1.0, config);
        assert!((distance - 100.0).abs() <= 1e-9);
        assert!((fling.velocity() - 50.0).abs() <= 1e-9);
        assert!(!fling.is_stopped(config));
    }
}
