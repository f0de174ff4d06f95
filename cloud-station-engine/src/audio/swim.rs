use crate::audio::AudioAssets;
use crate::audio::preference::SoundPreference;
use crate::interaction::fish::{FishExit, FishTravel};
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use constants::audio::{SWIM_FADE_OUT_SECS, SWIM_VOLUME};

/// Looping swim effect attached to a moving fish.
#[derive(Component, Debug)]
pub struct SwimSound;

/// Full volume until the last half second of the move, then linear to zero.
pub fn swim_volume(remaining_secs: f32) -> f32 {
    SWIM_VOLUME * (remaining_secs / SWIM_FADE_OUT_SECS).clamp(0.0, 1.0)
}

/// Every travel or exit gets a fresh swim sound on the fish.
pub fn start_swim_sounds(
    mut commands: Commands,
    preference: Res<SoundPreference>,
    assets: Option<Res<AudioAssets>>,
    started: Query<Entity, Or<(Added<FishTravel>, Added<FishExit>)>>,
    children: Query<&Children>,
    sounds: Query<(), With<SwimSound>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for fish in &started {
        for child in children.iter_descendants(fish) {
            if sounds.contains(child) {
                commands.entity(child).despawn();
            }
        }
        if !preference.enabled {
            continue;
        }
        commands.entity(fish).with_child((
            SwimSound,
            AudioPlayer(assets.swim.clone()),
            PlaybackSettings::LOOP.with_volume(Volume::Linear(SWIM_VOLUME)),
        ));
    }
}

/// Fade each swim sound with its fish's move; drop it once the fish stops.
pub fn update_swim_sounds(
    mut commands: Commands,
    preference: Res<SoundPreference>,
    parents: Query<&ChildOf, With<SwimSound>>,
    moves: Query<(Option<&FishTravel>, Option<&FishExit>)>,
    mut sinks: Query<(Entity, Option<&mut AudioSink>), With<SwimSound>>,
) {
    for (sound, sink) in &mut sinks {
        let remaining = parents
            .get(sound)
            .ok()
            .and_then(|child_of| moves.get(child_of.parent()).ok())
            .and_then(|(travel, exit)| {
                exit.map(|exit| exit.tween.remaining_secs())
                    .or_else(|| travel.map(|travel| travel.tween.remaining_secs()))
            });

        match (remaining, sink) {
            (Some(remaining), Some(mut sink)) => {
                let volume = if preference.enabled { swim_volume(remaining) } else { 0.0 };
                sink.set_volume(Volume::Linear(volume));
            }
            (Some(_), None) => {}
            (None, sink) => {
                if let Some(sink) = sink {
                    sink.stop();
                }
                commands.entity(sound).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn swim_fades_over_the_last_half_second() {
        assert_abs_diff_eq!(swim_volume(2.0), SWIM_VOLUME);
        assert_abs_diff_eq!(swim_volume(0.5), SWIM_VOLUME);
        assert_abs_diff_eq!(swim_volume(0.25), SWIM_VOLUME * 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(swim_volume(0.0), 0.0);
    }
}
