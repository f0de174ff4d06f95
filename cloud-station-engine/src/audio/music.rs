use crate::audio::AudioAssets;
use crate::audio::fade::{FadeEnd, VolumeFade};
use crate::audio::preference::SoundPreference;
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use constants::audio::{
    MUSIC_FADE_IN_DELAY_SECS, MUSIC_FADE_IN_SECS, MUSIC_FADE_OUT_SECS, MUSIC_MAX_VOLUME,
};
use constants::path::{CLOUD_STATION_MUSIC, CLOUD_STATION_ROUTE, HOME_MUSIC, HOME_ROUTE};

/// Page route the host site is showing. Selects the background track.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentRoute(pub &'static str);

impl Default for CurrentRoute {
    fn default() -> Self {
        Self(CLOUD_STATION_ROUTE)
    }
}

impl CurrentRoute {
    pub fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/') == CLOUD_STATION_ROUTE {
            Self(CLOUD_STATION_ROUTE)
        } else {
            Self(HOME_ROUTE)
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .map(|path| Self::from_path(&path))
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_location() -> Self {
        Self::default()
    }

    pub fn track(&self) -> &'static str {
        if self.0 == CLOUD_STATION_ROUTE {
            CLOUD_STATION_MUSIC
        } else {
            HOME_MUSIC
        }
    }
}

/// Browsers block audio until the user interacts with the page, so music
/// waits for the first click, tap or key press.
#[derive(Resource, Debug, Default)]
pub struct MusicState {
    pub started: bool,
}

#[derive(Component, Debug)]
pub struct MusicTrack {
    pub path: &'static str,
}

pub fn detect_first_interaction(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    mut music: ResMut<MusicState>,
) {
    if music.started {
        return;
    }
    if mouse_button.get_just_pressed().next().is_some()
        || keyboard.get_just_pressed().next().is_some()
        || touches.any_just_pressed()
    {
        info!("First interaction, music may start");
        music.started = true;
    }
}

/// Keep exactly one track playing for the current route. A track for another
/// route fades out first; the new one starts once it is gone.
pub fn sync_music_route(
    mut commands: Commands,
    music: Res<MusicState>,
    route: Res<CurrentRoute>,
    preference: Res<SoundPreference>,
    assets: Option<Res<AudioAssets>>,
    tracks: Query<(Entity, &MusicTrack, Option<&VolumeFade>)>,
) {
    if !music.started || !preference.enabled {
        return;
    }
    let Some(assets) = assets else {
        return;
    };
    let wanted = route.track();

    let mut playing = false;
    for (entity, track, fade) in &tracks {
        playing = true;
        if track.path == wanted || fade.is_some_and(|fade| fade.end == FadeEnd::Despawn) {
            continue;
        }
        let volume = fade.map_or(MUSIC_MAX_VOLUME, VolumeFade::volume);
        info!("Fading out {}", track.path);
        commands.entity(entity).insert(
            VolumeFade::new(volume, 0.0, MUSIC_FADE_OUT_SECS).then(FadeEnd::Despawn),
        );
    }

    if !playing {
        info!("Playing {}", wanted);
        commands.spawn((
            Name::new("Music"),
            MusicTrack { path: wanted },
            AudioPlayer(assets.music(wanted)),
            PlaybackSettings::LOOP.with_volume(Volume::Linear(0.0)),
            VolumeFade::new(0.0, MUSIC_MAX_VOLUME, MUSIC_FADE_IN_SECS).after(MUSIC_FADE_IN_DELAY_SECS),
        ));
    }
}

/// Disabling sound pauses the music; enabling it resumes where it stopped.
pub fn apply_music_preference(
    preference: Res<SoundPreference>,
    sinks: Query<&AudioSink, With<MusicTrack>>,
) {
    if !preference.is_changed() {
        return;
    }
    for sink in &sinks {
        if preference.enabled {
            sink.play();
        } else {
            sink.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_pick_their_track() {
        assert_eq!(CurrentRoute::from_path("/").track(), HOME_MUSIC);
        assert_eq!(CurrentRoute::from_path("/cloud-station").track(), CLOUD_STATION_MUSIC);
        assert_eq!(CurrentRoute::from_path("/cloud-station/").track(), CLOUD_STATION_MUSIC);
        assert_eq!(CurrentRoute::from_path("/about").0, HOME_ROUTE);
    }

    fn music_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<MusicState>()
            .init_resource::<CurrentRoute>()
            .init_resource::<SoundPreference>()
            .insert_resource(AudioAssets {
                home_music: Handle::default(),
                station_music: Handle::default(),
                swim: Handle::default(),
            })
            .add_systems(Update, sync_music_route);
        app
    }

    fn tracks(app: &mut App) -> Vec<(&'static str, Option<FadeEnd>)> {
        let mut query = app
            .world_mut()
            .query::<(&MusicTrack, Option<&VolumeFade>)>();
        query
            .iter(app.world())
            .map(|(track, fade)| (track.path, fade.map(|f| f.end)))
            .collect()
    }

    #[test]
    fn music_waits_for_first_interaction() {
        let mut app = music_app();
        app.update();
        assert!(tracks(&mut app).is_empty());

        app.world_mut().resource_mut::<MusicState>().started = true;
        app.update();
        assert_eq!(tracks(&mut app), vec![(CLOUD_STATION_MUSIC, Some(FadeEnd::Keep))]);
    }

    #[test]
    fn route_change_fades_out_before_switching() {
        let mut app = music_app();
        app.world_mut().resource_mut::<MusicState>().started = true;
        app.update();

        app.insert_resource(CurrentRoute(HOME_ROUTE));
        app.update();
        assert_eq!(tracks(&mut app), vec![(CLOUD_STATION_MUSIC, Some(FadeEnd::Despawn))]);

        // Once the old track is gone the home track starts.
        let mut query = app.world_mut().query_filtered::<Entity, With<MusicTrack>>();
        let old = query.single(app.world()).unwrap();
        app.world_mut().despawn(old);
        app.update();
        assert_eq!(tracks(&mut app), vec![(HOME_MUSIC, Some(FadeEnd::Keep))]);
    }

    #[test]
    fn disabled_sound_starts_nothing() {
        let mut app = music_app();
        app.world_mut().resource_mut::<MusicState>().started = true;
        app.world_mut().resource_mut::<SoundPreference>().enabled = false;
        app.update();
        assert!(tracks(&mut app).is_empty());
    }
}
