use crate::engine::tween::Tween;
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

/// What happens to an audio entity once its fade completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEnd {
    Keep,
    Despawn,
}

/// Linear volume ramp on an audio entity, optionally after a delay.
#[derive(Component, Debug, Clone)]
pub struct VolumeFade {
    pub from: f32,
    pub to: f32,
    pub delay: Option<Timer>,
    pub tween: Tween,
    pub end: FadeEnd,
}

impl VolumeFade {
    pub fn new(from: f32, to: f32, secs: f32) -> Self {
        Self {
            from,
            to,
            delay: None,
            tween: Tween::linear(secs),
            end: FadeEnd::Keep,
        }
    }

    pub fn after(mut self, secs: f32) -> Self {
        self.delay = Some(Timer::from_seconds(secs, TimerMode::Once));
        self
    }

    pub fn then(mut self, end: FadeEnd) -> Self {
        self.end = end;
        self
    }

    pub fn volume(&self) -> f32 {
        self.from + (self.to - self.from) * self.tween.progress()
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        let Some(delay) = self.delay.as_mut() else {
            self.tween.tick(delta);
            return;
        };
        let remaining = delay.remaining();
        if delay.tick(delta).finished() {
            self.tween.tick(delta.saturating_sub(remaining));
            self.delay = None;
        }
    }
}

/// Fades run against the sink once playback has started; entities whose sink
/// has not been created yet keep their fade until it appears.
pub fn apply_volume_fades(
    mut commands: Commands,
    time: Res<Time>,
    mut fades: Query<(Entity, &mut VolumeFade, &mut AudioSink)>,
) {
    for (entity, mut fade, mut sink) in &mut fades {
        fade.tick(time.delta());
        sink.set_volume(Volume::Linear(fade.volume()));

        if fade.tween.finished() {
            match fade.end {
                FadeEnd::Keep => {
                    commands.entity(entity).remove::<VolumeFade>();
                }
                FadeEnd::Despawn => {
                    sink.stop();
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::time::Duration;

    #[test]
    fn fade_waits_for_delay_then_ramps() {
        let mut fade = VolumeFade::new(0.0, 0.5, 5.0).after(0.1);

        fade.tick(Duration::from_millis(100));
        assert_abs_diff_eq!(fade.volume(), 0.0);

        fade.tick(Duration::from_millis(2500));
        assert_abs_diff_eq!(fade.volume(), 0.25, epsilon = 1e-5);

        fade.tick(Duration::from_secs(10));
        assert_abs_diff_eq!(fade.volume(), 0.5);
        assert!(fade.tween.finished());
    }

    #[test]
    fn fade_out_reaches_silence() {
        let mut fade = VolumeFade::new(0.5, 0.0, 2.0).then(FadeEnd::Despawn);
        fade.tick(Duration::from_secs(1));
        assert_abs_diff_eq!(fade.volume(), 0.25, epsilon = 1e-5);
        fade.tick(Duration::from_secs(1));
        assert_abs_diff_eq!(fade.volume(), 0.0);
        assert_eq!(fade.end, FadeEnd::Despawn);
    }
}
