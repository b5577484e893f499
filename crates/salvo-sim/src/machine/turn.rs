//! Turn order and the TurnStart state.

use salvo_core::constants::ROUND_WIN_REWARD;
use salvo_core::error::SalvoResult;
use salvo_core::events::GameEvent;
use salvo_core::player::Player;

use crate::battlefield::Battlefield;
use crate::machine::{GameState, HumanMove};

/// Who acts next, or how the round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextTurn {
    Player(usize),
    Draw,
    Won(usize),
}

/// Decide the next turn.
///
/// With two or more tanks alive, the next actor is the first living player
/// after `current` in cyclic order (starting at index 0 when nobody has
/// moved yet). One survivor wins; none is a draw. Pure: asking twice without
/// a change in between gives the same answer.
pub fn next_turn(players: &[Player], current: Option<usize>) -> NextTurn {
    let mut alive = (0..players.len()).filter(|&i| players[i].is_alive());
    let Some(first) = alive.next() else {
        return NextTurn::Draw;
    };
    if alive.next().is_none() {
        return NextTurn::Won(first);
    }

    let n = players.len();
    let start = current.map_or(0, |c| c + 1);
    (0..n)
        .map(|k| (start + k) % n)
        .find(|&i| players[i].is_alive())
        .map_or(NextTurn::Draw, NextTurn::Player)
}

pub(crate) fn tick(field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    match next_turn(&field.players, field.current) {
        NextTurn::Player(index) => {
            field.current = Some(index);
            let player = field.player(index)?;
            let banner = player.introduction();
            tracing::info!(player = index, name = %player.name, "turn started");
            field.events.push(GameEvent::TurnStarted {
                player: index,
                banner,
            });
            if field.is_human(index) {
                Ok(Some(GameState::HumanMove(HumanMove::default())))
            } else {
                Ok(Some(GameState::ComputerMove))
            }
        }
        NextTurn::Won(index) => {
            field.cosmos.info_mut(index)?.earn_money(ROUND_WIN_REWARD as i64);
            end_round(field, Some(index));
            Ok(Some(GameState::Leaderboard { confirmed: false }))
        }
        NextTurn::Draw => {
            end_round(field, None);
            Ok(Some(GameState::Leaderboard { confirmed: false }))
        }
    }
}

fn end_round(field: &mut Battlefield, winner: Option<usize>) {
    tracing::info!(round = field.cosmos.round(), ?winner, "round over");
    field.events.push(GameEvent::RoundOver { winner });
}
