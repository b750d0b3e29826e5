//! Game settings and preferences
//!
//! Persisted separately from scores. Changes are broadcast to subscribers
//! over channels instead of a global notification center.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::persistence::SharedStorage;
use crate::theme::Theme;
use crate::tuning::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    pub sound_effects: bool,
    pub music: bool,

    // === Feedback ===
    pub haptics: bool,

    // === Gameplay ===
    pub difficulty: Difficulty,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_effects: true,
            music: true,
            haptics: true,
            difficulty: Difficulty::Easy,
            theme: Theme::Earth,
        }
    }
}

/// A single settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    SoundEffects(bool),
    Music(bool),
    Haptics(bool),
    Difficulty(Difficulty),
    Theme(Theme),
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "blinky_beak_settings";

    /// Load settings from storage, falling back to defaults
    pub fn load(storage: &SharedStorage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Stored settings are unreadable, using defaults: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, storage: &SharedStorage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }

    fn apply(&mut self, event: SettingsEvent) {
        match event {
            SettingsEvent::SoundEffects(on) => self.sound_effects = on,
            SettingsEvent::Music(on) => self.music = on,
            SettingsEvent::Haptics(on) => self.haptics = on,
            SettingsEvent::Difficulty(d) => self.difficulty = d,
            SettingsEvent::Theme(t) => self.theme = t,
        }
    }
}

/// Owns the live settings, persists every change and notifies subscribers
pub struct SettingsManager {
    settings: Settings,
    storage: SharedStorage,
    subscribers: Vec<Sender<SettingsEvent>>,
}

impl SettingsManager {
    pub fn load(storage: SharedStorage) -> Self {
        Self {
            settings: Settings::load(&storage),
            storage,
            subscribers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register for change events
    pub fn subscribe(&mut self) -> Receiver<SettingsEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_sound_effects(&mut self, on: bool) {
        self.update(SettingsEvent::SoundEffects(on));
    }

    pub fn set_music(&mut self, on: bool) {
        self.update(SettingsEvent::Music(on));
    }

    pub fn set_haptics(&mut self, on: bool) {
        self.update(SettingsEvent::Haptics(on));
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.update(SettingsEvent::Difficulty(difficulty));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.update(SettingsEvent::Theme(theme));
    }

    fn update(&mut self, event: SettingsEvent) {
        let before = self.settings.clone();
        self.settings.apply(event);
        if self.settings == before {
            return;
        }
        self.settings.save(&self.storage);
        // Drop subscribers whose receiver has gone away
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        log::debug!("Settings changed: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::{MemoryStorage, Storage};

    #[test]
    fn test_defaults_when_nothing_stored() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let memory = MemoryStorage::new();
        memory.set_item("blinky_beak_settings", "not json").unwrap();
        let storage: SharedStorage = Arc::new(memory);
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let memory = MemoryStorage::new();
        memory
            .set_item("blinky_beak_settings", r#"{"difficulty":"Hard"}"#)
            .unwrap();
        let storage: SharedStorage = Arc::new(memory);
        let settings = Settings::load(&storage);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(settings.music);
    }

    #[test]
    fn test_changes_persist_and_notify() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut manager = SettingsManager::load(storage.clone());
        let rx = manager.subscribe();

        manager.set_difficulty(Difficulty::Medium);
        manager.set_theme(Theme::OuterSpace);
        // No change, no event
        manager.set_theme(Theme::OuterSpace);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                SettingsEvent::Difficulty(Difficulty::Medium),
                SettingsEvent::Theme(Theme::OuterSpace),
            ]
        );

        let reloaded = Settings::load(&storage);
        assert_eq!(reloaded.difficulty, Difficulty::Medium);
        assert_eq!(reloaded.theme, Theme::OuterSpace);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut manager = SettingsManager::load(storage);
        drop(manager.subscribe());
        let live = manager.subscribe();

        manager.set_music(false);
        assert_eq!(manager.subscribers.len(), 1);
        assert_eq!(live.try_recv(), Ok(SettingsEvent::Music(false)));
    }
}
