//! Sound cues
//!
//! Decoding and mixing are the host's job; the game only decides which cue
//! plays and how loud.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Plane flaps upward
    Jump,
    /// Menu music, looped
    Music,
}

impl SoundEffect {
    /// Per-cue mix level (0.0 - 1.0)
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.12,
            SoundEffect::Music => 0.1,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// Output device supplied by the host
pub trait AudioBackend {
    /// Start a cue at `volume`; `looped` cues repeat until stopped
    fn play(&mut self, effect: SoundEffect, volume: f32, looped: bool);
    fn stop(&mut self, effect: SoundEffect);
}

/// Backend that only logs (headless runs)
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32, looped: bool) {
        log::trace!("play {:?} at {:.3} (looped: {})", effect, volume, looped);
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::trace!("stop {:?}", effect);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("master_volume", &self.master_volume)
            .field("muted", &self.muted)
            .field("music_playing", &self.music_playing)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    /// Apply the volume preferences from settings
    pub fn configure(&mut self, settings: &crate::Settings) {
        self.set_master_volume(settings.master_volume);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel * effect.base_volume()
    }

    /// Play a one-shot sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol, false);
    }

    /// Start the looping music unless it is already running
    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        let vol = self.effective_volume(SoundEffect::Music);
        self.backend.play(SoundEffect::Music, vol, true);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop(SoundEffect::Music);
            self.music_playing = false;
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

/// Backend that remembers what it was asked to play
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBackend {
    pub played: std::rc::Rc<std::cell::RefCell<Vec<(SoundEffect, f32, bool)>>>,
}

#[cfg(test)]
impl AudioBackend for RecordingBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32, looped: bool) {
        self.played.borrow_mut().push((effect, volume, looped));
    }

    fn stop(&mut self, _effect: SoundEffect) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_mix() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let mut audio = AudioManager::new(Box::new(backend));
        audio.set_master_volume(0.5);
        audio.play(SoundEffect::Jump);
        let (effect, vol, looped) = played.borrow()[0];
        assert_eq!(effect, SoundEffect::Jump);
        assert!((vol - 0.5 * 1.0 * 0.12).abs() < 1e-6);
        assert!(!looped);
    }

    #[test]
    fn test_muted_skips_effects() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let mut audio = AudioManager::new(Box::new(backend));
        audio.set_muted(true);
        audio.play(SoundEffect::Jump);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_music_starts_once() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let mut audio = AudioManager::new(Box::new(backend));
        audio.start_music();
        audio.start_music();
        assert_eq!(played.borrow().len(), 1);
        assert!(played.borrow()[0].2);
        audio.stop_music();
        assert!(!audio.music_playing());
    }
}
