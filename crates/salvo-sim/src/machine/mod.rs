//! The turn state machine.
//!
//! Exactly one [`GameState`] is live. Each variant carries only its own
//! fields; `tick` returns the next state (if any) instead of mutating a
//! shared instance. Input handlers only stage requests on the live state;
//! the following tick acts on them.

pub mod ballistics;
pub mod buy;
pub mod charge;
pub mod computer;
pub mod human;
pub mod standings;
pub mod turn;

use salvo_core::commands::InputSignal;
use salvo_core::constants::{DELAY_ANIMATE, DELAY_BLOCK};
use salvo_core::enums::GameStateId;
use salvo_core::error::SalvoResult;

use crate::battlefield::Battlefield;

pub use ballistics::{Ballistics, BallisticsPhase};
pub use charge::charge_power;
pub use human::HumanMove;
pub use turn::{next_turn, NextTurn};

#[derive(Debug, Clone)]
pub enum GameState {
    /// Round standings; waits for a confirm to move on.
    Leaderboard { confirmed: bool },
    /// Purchases between rounds. `buyer` is the human currently shopping;
    /// `None` once everyone is done.
    BuyWeapons { buyer: Option<usize> },
    TurnStart,
    HumanMove(HumanMove),
    ComputerMove,
    Ballistics(Ballistics),
}

impl GameState {
    pub fn id(&self) -> GameStateId {
        match self {
            GameState::Leaderboard { .. } => GameStateId::Leaderboard,
            GameState::BuyWeapons { .. } => GameStateId::BuyWeapons,
            GameState::TurnStart => GameStateId::TurnStart,
            GameState::HumanMove(_) => GameStateId::HumanMove,
            GameState::ComputerMove => GameStateId::ComputerMove,
            GameState::Ballistics(_) => GameStateId::Ballistics,
        }
    }

    /// Minimum milliseconds before the next tick. `DELAY_BLOCK` means wait
    /// for input.
    pub fn delay(&self) -> u64 {
        match self {
            GameState::Leaderboard { confirmed: false } => DELAY_BLOCK,
            GameState::BuyWeapons { buyer: Some(_) } => DELAY_BLOCK,
            GameState::HumanMove(human) if !human.is_busy() => DELAY_BLOCK,
            _ => DELAY_ANIMATE,
        }
    }
}

/// Run one tick of the live state.
pub fn tick(state: &mut GameState, field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    match state {
        GameState::Leaderboard { confirmed } => standings::tick(*confirmed, field),
        GameState::BuyWeapons { buyer } => Ok(buy::tick(*buyer)),
        GameState::TurnStart => turn::tick(field),
        GameState::HumanMove(human) => human::tick(human, field),
        GameState::ComputerMove => computer::tick(field),
        GameState::Ballistics(ballistics) => ballistics::tick(ballistics, field),
    }
}

/// Stage an input signal on the live state. Returns true if the UI should
/// refresh.
pub fn handle_input(
    state: &mut GameState,
    field: &mut Battlefield,
    signal: InputSignal,
) -> SalvoResult<bool> {
    match state {
        GameState::Leaderboard { confirmed } => Ok(standings::handle_input(confirmed, field, signal)),
        GameState::BuyWeapons { buyer } => buy::handle_input(buyer, field, signal),
        GameState::HumanMove(human) => human::handle_input(human, field, signal),
        GameState::TurnStart | GameState::ComputerMove | GameState::Ballistics(_) => Ok(false),
    }
}
