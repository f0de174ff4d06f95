//! Background music and fish swim effects.
//!
//! Music follows the host page route and only starts after the first user
//! interaction. All playback is best effort: a missing or blocked sound is
//! never an error for the rest of the app.

/// Volume ramps applied to audio sinks.
pub mod fade;

/// Route-aware background music.
pub mod music;

/// Persisted sound on/off preference.
pub mod preference;

/// Swim effect following each fish move.
pub mod swim;

use crate::engine::core::app_state::AppState;
use bevy::prelude::*;
use constants::path::{CLOUD_STATION_MUSIC, FISH_SWIM_EFFECT, HOME_MUSIC};
use fade::apply_volume_fades;
use music::{
    CurrentRoute, MusicState, apply_music_preference, detect_first_interaction, sync_music_route,
};
use preference::{SoundPreference, SoundToggleRequested, handle_sound_toggle};
use swim::{start_swim_sounds, update_swim_sounds};

#[derive(Resource, Debug, Clone)]
pub struct AudioAssets {
    pub home_music: Handle<AudioSource>,
    pub station_music: Handle<AudioSource>,
    pub swim: Handle<AudioSource>,
}

impl AudioAssets {
    pub fn music(&self, path: &str) -> Handle<AudioSource> {
        if path == HOME_MUSIC {
            self.home_music.clone()
        } else {
            self.station_music.clone()
        }
    }
}

fn load_audio_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(AudioAssets {
        home_music: asset_server.load(HOME_MUSIC),
        station_music: asset_server.load(CLOUD_STATION_MUSIC),
        swim: asset_server.load(FISH_SWIM_EFFECT),
    });
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SoundPreference::load())
            .insert_resource(CurrentRoute::from_location())
            .init_resource::<MusicState>()
            .add_event::<SoundToggleRequested>()
            .add_systems(Startup, load_audio_assets)
            .add_systems(
                Update,
                (
                    handle_sound_toggle,
                    detect_first_interaction.run_if(in_state(AppState::Running)),
                    sync_music_route,
                    apply_music_preference,
                    start_swim_sounds,
                    update_swim_sounds,
                    apply_volume_fades,
                )
                    .chain(),
            );
    }
}
