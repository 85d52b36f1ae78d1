//! Live session driver: owns the player snapshot, routes commands, drives
//! ticks at a fixed interval and hands snapshots to a background saver.

use super::offline::{process_offline_progression, OfflineReport};
use super::tick::{game_tick, TickResult};
use crate::catalog::Catalog;
use crate::character::save::{validate_name, PlayerStore, StoreError};
use crate::commands::{apply_command, Command, Rejected};
use crate::config::EngineConfig;
use crate::core::game_state::PlayerState;
use crate::events::{record_tick, EventLog, HitQueue, LogKind};
use crate::rewards::tasks::ensure_task_options;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct Engine {
    state: PlayerState,
    catalog: Catalog,
    log: EventLog,
    hits: HitQueue,
    rng: StdRng,
}

impl Engine {
    pub fn new(state: PlayerState, catalog: Catalog, rng: StdRng) -> Self {
        Self {
            state,
            catalog,
            log: EventLog::new(),
            hits: HitQueue::new(),
            rng,
        }
    }

    /// Loads `account` from the store, or registers a new character when
    /// there is no save. A loaded character gets its offline time
    /// reconciled before the engine is returned.
    pub fn load_or_register(
        store: &dyn PlayerStore,
        account: &str,
        new_name: Option<&str>,
        catalog: Catalog,
        now_ms: i64,
    ) -> Result<(Self, Option<OfflineReport>), StoreError> {
        let mut rng = StdRng::from_entropy();
        let (mut state, report) = match store.load(account) {
            Ok(mut state) => {
                let report = process_offline_progression(&mut state, &catalog, now_ms, &mut rng);
                (state, report)
            }
            Err(StoreError::NotFound(_)) => {
                let name = new_name.unwrap_or(account);
                validate_name(name)?;
                log::info!("registering new character '{}'", name);
                (PlayerState::register(name.to_string(), &catalog, now_ms), None)
            }
            Err(e) => return Err(e),
        };
        ensure_task_options(&mut state, &catalog, &mut rng);

        let mut engine = Self::new(state, catalog, rng);
        if let Some(report) = &report {
            let text = report.to_text(&engine.catalog);
            for line in text.lines() {
                engine.log.push(now_ms, LogKind::Info, line);
            }
        }
        Ok((engine, report))
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn hits(&self) -> &HitQueue {
        &self.hits
    }

    /// Advances one tick and records its events.
    pub fn tick(&mut self, now_ms: i64) -> TickResult {
        let (next, result) = game_tick(&self.state, &self.catalog, now_ms, &mut self.rng);
        self.state = next;
        record_tick(&mut self.log, &mut self.hits, &result, now_ms);
        if result.died {
            log::info!("{} died at level {}", self.state.name, self.state.level);
        }
        result
    }

    /// Applies a command atomically: on rejection the snapshot is untouched.
    /// Either outcome lands in the event log.
    pub fn execute(&mut self, command: Command, now_ms: i64) -> Result<(), Rejected> {
        let mut next = self.state.clone();
        match apply_command(&mut next, &self.catalog, command, now_ms, &mut self.rng) {
            Ok(message) => {
                self.state = next;
                self.log.push(now_ms, LogKind::Info, message);
                Ok(())
            }
            Err(reason) => {
                log::debug!("command rejected: {}", reason);
                self.log.push(now_ms, LogKind::Danger, reason.to_string());
                Err(reason)
            }
        }
    }

    /// Stamps `last_save_time` and returns the snapshot to persist.
    pub fn snapshot_for_save(&mut self, now_ms: i64) -> PlayerState {
        self.state.last_save_time = now_ms;
        self.state.clone()
    }
}

/// Background writer. Snapshots queue up on a channel and only the newest
/// pending one is written, so a slow disk never stalls the tick loop.
pub struct SaveWorker {
    sender: Option<Sender<PlayerState>>,
    handle: Option<JoinHandle<Result<(), StoreError>>>,
}

impl SaveWorker {
    pub fn spawn<S: PlayerStore + 'static>(store: S, account: String) -> Self {
        let (sender, receiver) = mpsc::channel::<PlayerState>();
        let handle = std::thread::spawn(move || {
            let mut last = Ok(());
            while let Ok(mut state) = receiver.recv() {
                while let Ok(newer) = receiver.try_recv() {
                    state = newer;
                }
                last = store.save(&account, &state);
                match &last {
                    Ok(()) => log::debug!("saved '{}'", account),
                    Err(e) => log::warn!("autosave failed for '{}': {}", account, e),
                }
            }
            last
        });
        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Queues a snapshot without waiting for the write.
    pub fn submit(&self, state: PlayerState) {
        if let Some(sender) = &self.sender {
            if sender.send(state).is_err() {
                log::warn!("save worker has stopped; snapshot dropped");
            }
        }
    }

    /// Writes `state` and blocks until every queued save has finished.
    pub fn finish(mut self, state: PlayerState) -> Result<(), StoreError> {
        self.submit(state);
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), StoreError> {
        drop(self.sender.take());
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "save worker panicked",
                )))
            }),
            None => Ok(()),
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("save worker: {}", e);
        }
    }
}

/// Runs ticks at `config.tick_interval_ms` until `stop` is raised or
/// `config.max_ticks` is reached. Ticks never overlap: a slow tick delays
/// the next one instead of queueing a burst. Returns the tick count.
pub fn run_session<F>(
    engine: &mut Engine,
    saver: &SaveWorker,
    config: &EngineConfig,
    stop: &AtomicBool,
    mut on_tick: F,
) -> u64
where
    F: FnMut(&Engine, &TickResult),
{
    let interval = Duration::from_millis(config.tick_interval_ms);
    let autosave = Duration::from_secs(config.autosave_interval_seconds);
    let mut last_autosave = Instant::now();
    let mut ticks = 0u64;

    while !stop.load(Ordering::Relaxed) {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        let started = Instant::now();
        let now = now_ms();
        let result = engine.tick(now);
        on_tick(engine, &result);
        ticks += 1;

        if last_autosave.elapsed() >= autosave {
            saver.submit(engine.snapshot_for_save(now));
            last_autosave = Instant::now();
        }

        let spent = started.elapsed();
        if spent < interval {
            std::thread::sleep(interval - spent);
        }
    }
    ticks
}

/// Raises `stop` on Ctrl+C so a running session ends and saves.
pub fn stop_on_interrupt(stop: Arc<AtomicBool>) -> JoinHandle<()> {
    stop_when(stop, tokio::signal::ctrl_c())
}

/// Waits for `signal` on its own thread and raises `stop` once it fires.
/// A failed signal leaves the flag untouched.
pub fn stop_when<S>(stop: Arc<AtomicBool>, signal: S) -> JoinHandle<()>
where
    S: Future<Output = std::io::Result<()>> + Send + 'static,
{
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::warn!("cannot watch for interrupts: {}", e);
                return;
            }
        };
        match runtime.block_on(signal) {
            Ok(()) => {
                log::info!("interrupt received, finishing session");
                stop.store(true, Ordering::Relaxed);
            }
            Err(e) => log::warn!("interrupt listener failed: {}", e),
        }
    })
}
