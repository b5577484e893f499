//! Game loop thread: owns the engine and ticks it at the live state's pace.
//!
//! Input producers stage signals in [`LoopShared`] and notify the condvar.
//! The loop applies staged signals, ticks, publishes a snapshot and then
//! waits: forever when the state blocks on input, otherwise for the state's
//! delay.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use salvo_core::commands::InputSignal;
use salvo_core::error::SalvoError;
use salvo_core::state::GameSnapshot;
use salvo_sim::{SimulationEngine, Step};

/// State shared between the loop thread and input producers.
#[derive(Debug, Default)]
pub struct LoopShared {
    /// Signals waiting for the next tick boundary.
    pub pending: VecDeque<InputSignal>,
    pub shutdown: bool,
    /// Most recent render view. Older snapshots are overwritten.
    pub latest_snapshot: Option<GameSnapshot>,
    /// Set when something visible changed since the last snapshot.
    pub needs_refresh: bool,
    pub match_over: bool,
    /// The error that stopped the loop, if any.
    pub failure: Option<SalvoError>,
}

type Shared = Arc<(Mutex<LoopShared>, Condvar)>;

fn lock(shared: &Mutex<LoopShared>) -> MutexGuard<'_, LoopShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle held by input producers.
pub struct GameLoopHandle {
    shared: Shared,
    thread: Option<JoinHandle<()>>,
}

impl GameLoopHandle {
    /// Stage a signal and wake the loop.
    pub fn send(&self, signal: InputSignal) {
        let (mutex, cvar) = &*self.shared;
        lock(mutex).pending.push_back(signal);
        cvar.notify_all();
    }

    pub fn latest_snapshot(&self) -> Option<GameSnapshot> {
        lock(&self.shared.0).latest_snapshot.clone()
    }

    /// Block until `done` holds or `timeout` passes. Returns whether it held.
    pub fn wait_for(&self, timeout: Duration, done: impl Fn(&LoopShared) -> bool) -> bool {
        let (mutex, cvar) = &*self.shared;
        let guard = lock(mutex);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |shared| !done(shared))
            .unwrap_or_else(PoisonError::into_inner);
        done(&guard)
    }

    /// Stop the loop and join its thread. Returns the error that stopped it
    /// early, if there was one.
    pub fn shutdown(mut self) -> Option<SalvoError> {
        self.stop()
    }

    fn stop(&mut self) -> Option<SalvoError> {
        {
            let (mutex, cvar) = &*self.shared;
            lock(mutex).shutdown = true;
            cvar.notify_all();
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("game loop thread panicked");
            }
        }
        lock(&self.shared.0).failure.take()
    }
}

impl Drop for GameLoopHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}

/// Spawn the loop on its own thread. The engine moves into the thread.
pub fn spawn_game_loop(engine: SimulationEngine) -> io::Result<GameLoopHandle> {
    let shared: Shared = Arc::new((Mutex::new(LoopShared::default()), Condvar::new()));
    let loop_shared = Arc::clone(&shared);
    let thread = std::thread::Builder::new()
        .name("salvo-game-loop".into())
        .spawn(move || run_game_loop(engine, &loop_shared))?;
    Ok(GameLoopHandle {
        shared,
        thread: Some(thread),
    })
}

fn run_game_loop(mut engine: SimulationEngine, shared: &(Mutex<LoopShared>, Condvar)) {
    let (mutex, cvar) = shared;
    let mut guard = lock(mutex);
    guard.latest_snapshot = Some(engine.snapshot());
    cvar.notify_all();
    tracing::info!("game loop started");

    loop {
        if guard.shutdown {
            break;
        }
        if let Err(e) = step(&mut engine, &mut guard) {
            tracing::error!(error = %e, "game loop stopped");
            guard.failure = Some(e);
            guard.shutdown = true;
            cvar.notify_all();
            break;
        }
        if guard.needs_refresh {
            guard.latest_snapshot = Some(engine.snapshot());
            guard.needs_refresh = false;
            cvar.notify_all();
        }

        let delay = engine.delay_millis();
        guard = if delay == 0 {
            if guard.pending.is_empty() {
                cvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
            } else {
                guard
            }
        } else {
            cvar.wait_timeout(guard, Duration::from_millis(delay))
                .unwrap_or_else(PoisonError::into_inner)
                .0
        };
    }
    tracing::info!("game loop exited");
}

/// Apply staged input and tick once.
fn step(engine: &mut SimulationEngine, shared: &mut LoopShared) -> Result<(), SalvoError> {
    while let Some(signal) = shared.pending.pop_front() {
        shared.needs_refresh |= engine.handle_input(signal)?;
    }
    match engine.tick()? {
        Step::Stay => {}
        Step::Goto(_) => shared.needs_refresh = true,
        Step::MatchOver => {
            if !shared.match_over {
                tracing::info!("match over");
                shared.match_over = true;
                shared.needs_refresh = true;
            }
        }
    }
    // Animating states redraw every tick.
    if engine.delay_millis() > 0 {
        shared.needs_refresh = true;
    }
    Ok(())
}
