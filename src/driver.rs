//! Threaded tick driver
//!
//! Moves a [`Game`] onto its own thread. Input arrives as [`Command`]s over a
//! channel, so commands and ticks are applied strictly one after another no
//! matter which thread sent them.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::MAX_PENDING_EVENTS;
use crate::game::{Game, Snapshot};
use crate::sim::GameEvent;
use crate::theme::Theme;
use crate::tuning::Difficulty;

/// Input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Flap,
    SetDifficulty(Difficulty),
    SetTheme(Theme),
}

enum Message {
    Command(Command),
    Shutdown,
}

/// Cheap, cloneable sender for input threads
#[derive(Clone)]
pub struct Remote {
    tx: Sender<Message>,
}

impl Remote {
    /// Queue a command. Returns false once the driver has shut down.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(Message::Command(command)).is_ok()
    }

    pub fn start_game(&self) -> bool {
        self.send(Command::Start)
    }

    pub fn flap(&self) -> bool {
        self.send(Command::Flap)
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> bool {
        self.send(Command::SetDifficulty(difficulty))
    }
}

pub struct Driver {
    remote: Remote,
    snapshot: Arc<Mutex<Snapshot>>,
    events: Receiver<GameEvent>,
    worker: Option<JoinHandle<Game>>,
}

impl Driver {
    /// Start ticking `game` on a new thread at its own tick interval
    pub fn spawn(game: Game) -> std::io::Result<Self> {
        let interval = Duration::from_secs_f32(game.tick_interval());
        let (tx, rx) = mpsc::channel();
        let (events_tx, events) = mpsc::sync_channel(MAX_PENDING_EVENTS);
        let snapshot = Arc::new(Mutex::new(game.snapshot()));
        let published = Arc::clone(&snapshot);

        let worker = thread::Builder::new()
            .name("blinky-beak-sim".into())
            .spawn(move || run(game, interval, rx, published, events_tx))?;

        log::info!("Driver started ({:?} per tick)", interval);

        Ok(Self {
            remote: Remote { tx },
            snapshot,
            events,
            worker: Some(worker),
        })
    }

    pub fn remote(&self) -> Remote {
        self.remote.clone()
    }

    pub fn send(&self, command: Command) -> bool {
        self.remote.send(command)
    }

    /// Latest published state
    pub fn snapshot(&self) -> Snapshot {
        match self.snapshot.lock() {
            Ok(snap) => snap.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events published since the last call.
    ///
    /// At most `MAX_PENDING_EVENTS` are buffered; newer ones are dropped
    /// until the host drains.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.try_iter().collect()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop the thread and hand the game back, with any unfinished run ended.
    /// Later calls return `None`.
    pub fn shutdown(&mut self) -> Option<Game> {
        let worker = self.worker.take()?;
        // Already-queued commands are applied before this is seen
        let _ = self.remote.tx.send(Message::Shutdown);
        match worker.join() {
            Ok(mut game) => {
                game.stop();
                log::info!("Driver stopped");
                Some(game)
            }
            Err(_) => {
                log::error!("Simulation thread panicked");
                None
            }
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    mut game: Game,
    interval: Duration,
    rx: Receiver<Message>,
    snapshot: Arc<Mutex<Snapshot>>,
    events: SyncSender<GameEvent>,
) -> Game {
    let mut last = Instant::now();
    loop {
        let wait = (last + interval).saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(Message::Command(command)) => apply(&mut game, command),
            Ok(Message::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let now = Instant::now();
        game.advance((now - last).as_secs_f32());
        last = now;

        for event in game.drain_events() {
            match events.try_send(event) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => {}
                Err(TrySendError::Full(event)) => {
                    log::trace!("Event buffer full, dropping {:?}", event);
                }
            }
        }
        if let Ok(mut slot) = snapshot.lock() {
            *slot = game.snapshot();
        }
    }
    game
}

fn apply(game: &mut Game, command: Command) {
    log::trace!("Applying {:?}", command);
    match command {
        Command::Start => {
            game.start_game();
        }
        Command::Flap => {
            game.flap();
        }
        Command::SetDifficulty(d) => game.set_difficulty(d),
        Command::SetTheme(t) => game.set_theme(t),
    }
}
