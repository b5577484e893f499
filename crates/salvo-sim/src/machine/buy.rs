//! The BuyWeapons state.
//!
//! Computer players shop as soon as the state is entered. Humans then take
//! turns at the counter: each `Buy` signal buys one unit for the current
//! buyer, `ConfirmOk` passes the counter to the next human who can afford
//! something.

use salvo_core::commands::InputSignal;
use salvo_core::error::SalvoResult;
use salvo_core::events::GameEvent;

use crate::battlefield::Battlefield;
use crate::machine::GameState;

/// Enter BuyWeapons: run computer shopping and pick the first human buyer.
pub fn enter(field: &mut Battlefield) -> SalvoResult<GameState> {
    for index in 0..field.players.len() {
        if field.is_human(index) {
            continue;
        }
        let info = field.cosmos.info(index)?;
        let Some(brain) = field.brains.get_mut(index) else {
            continue;
        };
        let list = brain.shopping_list(info.cash(), info.armory());
        for weapon in list {
            match field.cosmos.info_mut(index)?.buy_weapon(weapon) {
                Ok(cash_left) => {
                    tracing::debug!(player = index, ?weapon, cash_left, "computer bought weapon");
                    field.events.push(GameEvent::WeaponBought {
                        player: index,
                        weapon,
                        cash_left,
                    });
                }
                Err(e) if !e.is_invariant_violation() => {
                    tracing::warn!(player = index, ?weapon, error = %e, "computer purchase refused");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(GameState::BuyWeapons {
        buyer: next_buyer(field, None),
    })
}

/// Re-enter BuyWeapons from a saved game. Computers already shopped.
pub fn resume(field: &Battlefield) -> GameState {
    GameState::BuyWeapons {
        buyer: next_buyer(field, None),
    }
}

/// The next human after `after` who can afford at least one weapon.
fn next_buyer(field: &Battlefield, after: Option<usize>) -> Option<usize> {
    let start = after.map_or(0, |i| i + 1);
    (start..field.players.len()).find(|&i| {
        field.is_human(i)
            && field
                .cosmos
                .info(i)
                .is_ok_and(|info| info.can_buy_something())
    })
}

pub(crate) fn tick(buyer: Option<usize>) -> Option<GameState> {
    match buyer {
        Some(_) => None,
        None => Some(GameState::TurnStart),
    }
}

pub(crate) fn handle_input(
    buyer: &mut Option<usize>,
    field: &mut Battlefield,
    signal: InputSignal,
) -> SalvoResult<bool> {
    let Some(index) = *buyer else {
        return Ok(false);
    };
    match signal {
        InputSignal::Buy { weapon } => match field.cosmos.info_mut(index)?.buy_weapon(weapon) {
            Ok(cash_left) => {
                tracing::info!(player = index, ?weapon, cash_left, "weapon bought");
                field.events.push(GameEvent::WeaponBought {
                    player: index,
                    weapon,
                    cash_left,
                });
                Ok(true)
            }
            Err(e) if !e.is_invariant_violation() => {
                tracing::warn!(player = index, ?weapon, error = %e, "purchase refused");
                Ok(false)
            }
            Err(e) => Err(e),
        },
        InputSignal::ConfirmOk => {
            *buyer = next_buyer(field, Some(index));
            Ok(true)
        }
        _ => Ok(false),
    }
}
