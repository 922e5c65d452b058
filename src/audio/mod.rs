use std::collections::HashMap;
use std::path::Path;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{static_sound::{StaticSoundData, StaticSoundHandle}, PlaybackState},
    tween::Tween,
};

use crate::error::{AssetError, EngineError};

/// Named sound effects over a kira audio manager.
///
/// Sounds are either fire-and-forget ([`AudioContext::play`]) or tracked
/// ([`AudioContext::play_tracked`]); a tracked sound behaves like a
/// dedicated channel: starting it again cuts the previous playback, and
/// [`AudioContext::is_playing`] reports whether it is still audible.
pub struct AudioContext {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    tracked: HashMap<String, StaticSoundHandle>,
}

impl AudioContext {
    pub fn new() -> Result<Self, EngineError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| EngineError::Audio(e.to_string()))?;
        Ok(Self {
            manager,
            sounds: HashMap::new(),
            tracked: HashMap::new(),
        })
    }

    /// Load a sound file (WAV, OGG) into memory under `name`.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<(), AssetError> {
        let path = path.as_ref();
        let sound = StaticSoundData::from_file(path).map_err(|source| AssetError::Sound {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded sound '{name}' from {}", path.display());
        self.sounds.insert(name.to_string(), sound);
        Ok(())
    }

    /// Play a sound once.  Unknown names and playback failures are logged
    /// and otherwise ignored.
    pub fn play(&mut self, name: &str) {
        let Some(data) = self.sounds.get(name) else {
            log::warn!("[audio] no sound named '{name}'");
            return;
        };
        if let Err(e) = self.manager.play(data.clone()) {
            log::warn!("[audio] failed to play '{name}': {e}");
        }
    }

    /// Play a sound on its own channel, restarting it if it is already
    /// playing.
    pub fn play_tracked(&mut self, name: &str) {
        let Some(data) = self.sounds.get(name) else {
            log::warn!("[audio] no sound named '{name}'");
            return;
        };
        if let Some(mut previous) = self.tracked.remove(name) {
            let _ = previous.stop(Tween::default());
        }
        match self.manager.play(data.clone()) {
            Ok(handle) => {
                self.tracked.insert(name.to_string(), handle);
            }
            Err(e) => log::warn!("[audio] failed to play '{name}': {e}"),
        }
    }

    /// True while the last tracked playback of `name` has not finished.
    pub fn is_playing(&self, name: &str) -> bool {
        self.tracked
            .get(name)
            .is_some_and(|h| !matches!(h.state(), PlaybackState::Stopped))
    }
}
