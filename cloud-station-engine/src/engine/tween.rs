use bevy::math::curve::Curve;
use bevy::math::curve::easing::{EaseFunction, EasingCurve};
use std::time::Duration;

/// Fixed-length progress clock with an easing curve, advanced by frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
    ease: EaseFunction,
}

impl Tween {
    pub fn new(duration_secs: f32, ease: EaseFunction) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration_secs.max(0.0),
            ease,
        }
    }

    pub fn linear(duration_secs: f32) -> Self {
        Self::new(duration_secs, EaseFunction::Linear)
    }

    pub fn tick(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta.as_secs_f32()).min(self.duration);
    }

    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Progress mapped through the easing curve.
    pub fn eased(&self) -> f32 {
        EasingCurve::new(0.0, 1.0, self.ease).sample_clamped(self.progress())
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining_secs(&self) -> f32 {
        self.duration - self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamps_at_duration() {
        let mut tween = Tween::linear(1.0);
        tween.tick(Duration::from_millis(400));
        assert_abs_diff_eq!(tween.progress(), 0.4, epsilon = 1e-6);
        assert!(!tween.finished());

        tween.tick(Duration::from_secs(5));
        assert!(tween.finished());
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.remaining_secs(), 0.0);
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let mut tween = Tween::new(2.0, EaseFunction::CubicInOut);
        tween.tick(Duration::from_millis(500));
        let early = tween.eased();
        tween.tick(Duration::from_millis(1000));
        let late = tween.eased();
        assert!(early < 0.25);
        assert_abs_diff_eq!(early + late, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_duration_is_already_done() {
        let tween = Tween::linear(0.0);
        assert!(tween.finished());
        assert_eq!(tween.eased(), 1.0);
    }
}
