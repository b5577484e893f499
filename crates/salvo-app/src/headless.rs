//! Fast-forwarded computer-only matches on a manual clock.

use salvo_core::commands::InputSignal;
use salvo_core::enums::GameStateId;
use salvo_core::error::SalvoResult;
use salvo_core::events::GameEvent;
use salvo_sim::leaderboard::Leaderboard;
use salvo_sim::{ManualClock, SimulationEngine, Step};

/// Simulated time that passes per tick, enough to play explosions at a
/// sensible pace in the logs.
pub const FRAME_MILLIS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub ticks: u64,
    /// False when the tick budget ran out first.
    pub finished: bool,
}

/// Whether every player can act without input.
pub fn is_unattended(engine: &SimulationEngine) -> bool {
    engine
        .config()
        .players
        .iter()
        .all(|setup| !setup.controller.is_human())
}

/// Drive the match until it ends or `max_ticks` run out. Leaderboards are
/// logged and confirmed automatically.
pub fn run_match(engine: &mut SimulationEngine, clock: &ManualClock, max_ticks: u64) -> SalvoResult<MatchOutcome> {
    let mut ticks = 0;
    while ticks < max_ticks {
        if engine.state_id() == GameStateId::Leaderboard && !engine.is_match_over() {
            engine.handle_input(InputSignal::ConfirmOk)?;
        }
        let step = engine.tick()?;
        ticks += 1;
        for event in engine.take_events() {
            log_event(engine, &event);
        }
        match step {
            Step::MatchOver => {
                log_standings(&engine.leaderboard()?);
                return Ok(MatchOutcome { ticks, finished: true });
            }
            Step::Goto(GameStateId::Leaderboard) => log_standings(&engine.leaderboard()?),
            _ => {}
        }
        clock.advance(engine.delay_millis().max(FRAME_MILLIS));
    }
    tracing::warn!(ticks, state = ?engine.state_id(), "tick budget exhausted");
    Ok(MatchOutcome { ticks, finished: false })
}

fn log_event(engine: &SimulationEngine, event: &GameEvent) {
    let name = |i: usize| engine.players().get(i).map_or("?", |p| p.name.as_str());
    match event {
        GameEvent::RoundStarted { round, total_rounds } => {
            tracing::info!(round, total_rounds, wind = engine.wind(), "round started");
        }
        GameEvent::TurnStarted { banner, .. } => tracing::info!("{banner}"),
        GameEvent::PlayerKilled { player, by } => {
            tracing::info!(victim = name(*player), killer = name(*by), "tank destroyed");
        }
        GameEvent::RoundOver { winner } => {
            tracing::info!(winner = winner.map(name), "round over");
        }
        other => tracing::debug!(event = ?other),
    }
}

fn log_standings(board: &Leaderboard) {
    for (rank, entry) in board.entries().iter().enumerate() {
        tracing::info!(rank = rank + 1, name = %entry.name, earnings = entry.earnings, "standings");
    }
}
