//! Sound effect and music cues
//!
//! The game only says *which* cue to play. Playback belongs to an
//! [`AudioBackend`]; any failure there is logged and dropped so a missing
//! asset can never stall a tick.

use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// UI button (start/restart)
    Button,
    /// Body hit an obstacle
    Collision,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Asset name a file-based backend would load
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Flap => "crawler_jump",
            SoundEffect::Button => "button",
            SoundEffect::Collision => "hit",
            SoundEffect::GameOver => "flyerdie",
        }
    }
}

/// Background music asset
pub const MUSIC_ASSET: &str = "bgm";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound asset {0:?} not found")]
    MissingAsset(&'static str),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Something that can actually make noise
pub trait AudioBackend: Send {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    fn start_music(&mut self, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn start_music(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Headless backend that logs each cue
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {} (vol {:.2})", effect.asset(), volume);
        Ok(())
    }

    fn start_music(&mut self, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {} started (vol {:.2})", MUSIC_ASSET, volume);
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        log::debug!("music {} stopped", MUSIC_ASSET);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    sound_effects_enabled: bool,
    music_enabled: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
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
            sound_effects_enabled: true,
            music_enabled: true,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_sound_effects_enabled(&mut self, on: bool) {
        self.sound_effects_enabled = on;
    }

    /// Toggling music off mid-run stops it right away
    pub fn set_music_enabled(&mut self, on: bool) {
        self.music_enabled = on;
        if !on {
            self.stop_music();
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted || !self.sound_effects_enabled {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_gain(&self) -> f32 {
        if self.muted || !self.music_enabled {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect, vol) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    /// Start background music if it isn't already playing
    pub fn start_music(&mut self) {
        let vol = self.music_gain();
        if self.music_playing || vol <= 0.0 {
            return;
        }
        match self.backend.start_music(vol) {
            Ok(()) => self.music_playing = true,
            Err(e) => log::warn!("Failed to start music: {}", e),
        }
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        if let Err(e) = self.backend.stop_music() {
            log::warn!("Failed to stop music: {}", e);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{Cue, RecordingBackend};
    use super::*;

    #[test]
    fn test_disabled_effects_are_skipped() {
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::new(Box::new(backend.clone()));
        audio.play(SoundEffect::Flap);
        audio.set_sound_effects_enabled(false);
        audio.play(SoundEffect::Flap);
        audio.set_sound_effects_enabled(true);
        audio.set_muted(true);
        audio.play(SoundEffect::Flap);
        assert_eq!(backend.cues(), vec![Cue::Sfx(SoundEffect::Flap)]);
    }

    #[test]
    fn test_music_starts_once_and_stops() {
        let backend = RecordingBackend::default();
        let mut audio = AudioManager::new(Box::new(backend.clone()));
        audio.start_music();
        audio.start_music();
        assert!(audio.is_music_playing());
        audio.set_music_enabled(false);
        audio.stop_music();
        assert_eq!(backend.cues(), vec![Cue::MusicStart, Cue::MusicStop]);
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let backend = RecordingBackend {
            fail: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(backend));
        audio.play(SoundEffect::GameOver);
        audio.start_music();
        assert!(!audio.is_music_playing());
    }
}
