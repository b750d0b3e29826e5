//! Host-facing game facade
//!
//! Wires the pure simulation to its collaborators. Audio, storage and the
//! settings feed are handed in at construction; nothing here reaches for
//! process-wide state.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use glam::Vec2;
use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::clock::FixedStepClock;
use crate::consts::{MAX_PENDING_EVENTS, POOL_SIZE};
use crate::highscores::HighScores;
use crate::persistence::SharedStorage;
use crate::settings::{Settings, SettingsEvent};
use crate::sim::{self, GameEvent, GamePhase, GameState, Obstacle};
use crate::theme::Theme;
use crate::tuning::{Bounds, Difficulty, SimParams};

/// Read-only view of the game for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub body: Vec2,
    pub velocity: f32,
    pub obstacles: [Obstacle; POOL_SIZE],
    pub ground_offset: f32,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
    pub is_started: bool,
    pub is_over: bool,
    /// Flips on every flap; edge-trigger haptics off this
    pub flap_toggle: bool,
    pub ticks: u64,
    pub difficulty: Difficulty,
    pub theme: Theme,
}

pub struct Game {
    state: GameState,
    /// Parameters of the current (or last) run
    params: SimParams,
    bounds: Bounds,
    /// Selected difficulty; takes effect on the next start
    difficulty: Difficulty,
    /// Difficulty the current run was started with
    run_difficulty: Difficulty,
    theme: Theme,
    haptics: bool,
    clock: FixedStepClock,
    audio: AudioManager,
    high_scores: HighScores,
    storage: SharedStorage,
    settings_events: Option<Receiver<SettingsEvent>>,
    /// Events waiting for the host, oldest dropped past `MAX_PENDING_EVENTS`
    outbox: VecDeque<GameEvent>,
}

impl Game {
    pub fn new(seed: u64, settings: &Settings, mut audio: AudioManager, storage: SharedStorage) -> Self {
        let bounds = Bounds::default();
        let high_scores = HighScores::load(&storage);
        let mut state = GameState::new(seed, &bounds);
        state.best_score = high_scores.best();

        audio.set_sound_effects_enabled(settings.sound_effects);
        audio.set_music_enabled(settings.music);

        log::info!(
            "Game created (seed {}, difficulty {}, best {})",
            seed,
            settings.difficulty.as_str(),
            state.best_score
        );

        Self {
            state,
            params: SimParams::for_difficulty(settings.difficulty, bounds),
            bounds,
            difficulty: settings.difficulty,
            run_difficulty: settings.difficulty,
            theme: settings.theme,
            haptics: settings.haptics,
            clock: FixedStepClock::default(),
            audio,
            high_scores,
            storage,
            settings_events: None,
            outbox: VecDeque::new(),
        }
    }

    /// Use different world bounds. Only meaningful before the first start.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self.params = SimParams::for_difficulty(self.difficulty, bounds);
        self.state.body = sim::Body::spawn(&bounds);
        self.state.obstacles.reset(&bounds);
        self
    }

    /// Listen for settings changes; drained at the top of every `advance`
    pub fn with_settings_events(mut self, events: Receiver<SettingsEvent>) -> Self {
        self.settings_events = Some(events);
        self
    }

    // === Commands ===

    /// Start (or restart after game over) a run.
    ///
    /// Returns false, doing nothing, while a run is already in progress.
    pub fn start_game(&mut self) -> bool {
        let params = SimParams::for_difficulty(self.difficulty, self.bounds);
        if !sim::start_run(&mut self.state, &params) {
            return false;
        }
        self.params = params;
        self.run_difficulty = self.difficulty;
        self.clock.start();
        self.audio.play(SoundEffect::Button);
        self.audio.start_music();
        log::info!("Run started on {}", self.run_difficulty.as_str());
        self.collect_events();
        true
    }

    /// Flap. Ignored unless playing.
    pub fn flap(&mut self) -> bool {
        if !sim::flap(&mut self.state, &self.params) {
            return false;
        }
        self.audio.play(SoundEffect::Flap);
        self.collect_events();
        true
    }

    /// Select a difficulty for the next run; a run in progress keeps its parameters
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty == difficulty {
            return;
        }
        self.difficulty = difficulty;
        if self.state.phase.is_active() {
            log::info!("Difficulty {} applies from the next run", difficulty.as_str());
        } else {
            log::info!("Difficulty set to {}", difficulty.as_str());
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Feed host time; runs every tick that came due. Returns ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.drain_settings();
        self.clock.accumulate(elapsed);

        let mut ran = 0;
        while self.clock.next_tick() {
            self.step();
            ran += 1;
        }
        ran
    }

    /// Run exactly one tick regardless of the clock (replays, tests)
    pub fn tick(&mut self) {
        if self.state.phase.is_active() {
            self.step();
        }
    }

    /// Tear down: stop ticking and silence music. Idempotent.
    ///
    /// A run still in progress ends as game over, so a later `start_game`
    /// begins a fresh one.
    pub fn stop(&mut self) {
        if sim::abandon_run(&mut self.state) {
            self.collect_events();
        }
        self.clock.stop();
        self.audio.stop_music();
    }

    // === Queries ===

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            body: state.body.pos,
            velocity: state.body.vel,
            obstacles: *state.obstacles.slots(),
            ground_offset: state.field.offset,
            score: state.score,
            best_score: state.best_score,
            phase: state.phase,
            is_started: state.phase.is_started(),
            is_over: state.phase.is_over(),
            flap_toggle: state.flap_toggle,
            ticks: state.time_ticks,
            difficulty: self.difficulty,
            theme: self.theme,
        }
    }

    /// Take everything that happened since the last call.
    ///
    /// Hosts should drain every frame; only the newest `MAX_PENDING_EVENTS`
    /// are kept otherwise.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn tick_interval(&self) -> f32 {
        self.clock.interval()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    // === Internals ===

    fn step(&mut self) {
        sim::tick(&mut self.state, &self.params);
        self.collect_events();
    }

    /// React to simulation events, then queue them for the host
    fn collect_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Collided { .. } => self.audio.play(SoundEffect::Collision),
                GameEvent::GameOver { score } => self.on_game_over(score),
                _ => {}
            }
            if self.outbox.len() == MAX_PENDING_EVENTS {
                self.outbox.pop_front();
            }
            self.outbox.push_back(event);
        }
    }

    fn on_game_over(&mut self, score: u32) {
        self.clock.stop();
        self.audio.play(SoundEffect::GameOver);
        self.audio.stop_music();

        if let Some(rank) = self
            .high_scores
            .add_score(score, self.run_difficulty, crate::now_millis())
        {
            log::info!("Score {} ranked #{}", score, rank);
            self.high_scores.save(&self.storage);
        }
        log::info!("Game over: score {}, best {}", score, self.state.best_score);
    }

    fn drain_settings(&mut self) {
        let Some(rx) = &self.settings_events else {
            return;
        };
        let events: Vec<SettingsEvent> = rx.try_iter().collect();
        for event in events {
            match event {
                SettingsEvent::SoundEffects(on) => self.audio.set_sound_effects_enabled(on),
                SettingsEvent::Music(on) => {
                    self.audio.set_music_enabled(on);
                    if on && self.state.phase.is_active() {
                        self.audio.start_music();
                    }
                }
                SettingsEvent::Haptics(on) => self.haptics = on,
                SettingsEvent::Difficulty(d) => self.set_difficulty(d),
                SettingsEvent::Theme(t) => self.set_theme(t),
            }
        }
    }
}
