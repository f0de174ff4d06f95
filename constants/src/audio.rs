/// Local storage key holding the sound preference as JSON `true`/`false`.
pub const SOUND_PREFERENCE_KEY: &str = "soundEnabled";

/// Background music volume after the fade in.
pub const MUSIC_MAX_VOLUME: f32 = 0.5;
pub const MUSIC_FADE_IN_SECS: f32 = 5.0;
pub const MUSIC_FADE_OUT_SECS: f32 = 2.0;

/// Delay between the first interaction and the start of the fade in.
pub const MUSIC_FADE_IN_DELAY_SECS: f32 = 0.1;

pub const SWIM_VOLUME: f32 = 0.8;

/// The swim effect fades out over this long, finishing with the animation.
pub const SWIM_FADE_OUT_SECS: f32 = 0.5;
