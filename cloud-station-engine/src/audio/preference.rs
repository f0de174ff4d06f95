use bevy::prelude::*;
use constants::audio::SOUND_PREFERENCE_KEY;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("local storage access failed: {0}")]
    Storage(String),
    #[error("stored preference `{raw}` is not a JSON boolean")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whether music and effects may play. Persisted in the browser's local
/// storage on wasm, in memory only on native builds.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundPreference {
    pub enabled: bool,
}

impl Default for SoundPreference {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Sound toggle from the overlay or the host page.
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundToggleRequested;

/// Parse a stored `true`/`false` value.
pub fn parse_stored(raw: &str) -> Result<bool, PreferenceError> {
    serde_json::from_str::<bool>(raw).map_err(|source| PreferenceError::Parse {
        raw: raw.to_string(),
        source,
    })
}

impl SoundPreference {
    /// Stored preference, or the default when nothing usable is stored.
    pub fn load() -> Self {
        match read_stored() {
            Ok(Some(enabled)) => Self { enabled },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("Using default sound preference: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if let Err(err) = write_stored(self.enabled) {
            warn!("Sound preference not saved: {}", err);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PreferenceError> {
    web_sys::window()
        .ok_or(PreferenceError::StorageUnavailable)?
        .local_storage()
        .map_err(|err| PreferenceError::Storage(format!("{:?}", err)))?
        .ok_or(PreferenceError::StorageUnavailable)
}

#[cfg(target_arch = "wasm32")]
fn read_stored() -> Result<Option<bool>, PreferenceError> {
    let raw = local_storage()?
        .get_item(SOUND_PREFERENCE_KEY)
        .map_err(|err| PreferenceError::Storage(format!("{:?}", err)))?;
    raw.as_deref().map(parse_stored).transpose()
}

#[cfg(target_arch = "wasm32")]
fn write_stored(enabled: bool) -> Result<(), PreferenceError> {
    local_storage()?
        .set_item(SOUND_PREFERENCE_KEY, &enabled.to_string())
        .map_err(|err| PreferenceError::Storage(format!("{:?}", err)))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_stored() -> Result<Option<bool>, PreferenceError> {
    Ok(None)
}

#[cfg(not(target_arch = "wasm32"))]
fn write_stored(_enabled: bool) -> Result<(), PreferenceError> {
    debug!("{} kept in memory on native builds", SOUND_PREFERENCE_KEY);
    Ok(())
}

pub fn handle_sound_toggle(
    mut toggles: EventReader<SoundToggleRequested>,
    mut preference: ResMut<SoundPreference>,
) {
    for _ in toggles.read() {
        preference.enabled = !preference.enabled;
        preference.save();
        info!("Sound {}", if preference.enabled { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_are_json_booleans() {
        assert!(parse_stored("true").unwrap());
        assert!(!parse_stored("false").unwrap());

        let err = parse_stored("yes").unwrap_err();
        assert!(err.to_string().contains("`yes`"));
    }

    #[test]
    fn toggle_flips_preference_once_per_request() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SoundPreference>()
            .add_event::<SoundToggleRequested>()
            .add_systems(Update, handle_sound_toggle);

        app.world_mut().send_event(SoundToggleRequested);
        app.update();
        assert!(!app.world().resource::<SoundPreference>().enabled);

        app.world_mut().send_event(SoundToggleRequested);
        app.world_mut().send_event(SoundToggleRequested);
        app.update();
        assert!(!app.world().resource::<SoundPreference>().enabled);
    }
}
