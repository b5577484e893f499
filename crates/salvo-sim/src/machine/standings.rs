//! The Leaderboard state: standings, then the next round or the end.

use salvo_core::commands::InputSignal;
use salvo_core::error::SalvoResult;
use salvo_core::events::GameEvent;

use crate::battlefield::Battlefield;
use crate::machine::{buy, GameState};

pub(crate) fn tick(confirmed: bool, field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    if !confirmed || field.match_over {
        return Ok(None);
    }
    if field.cosmos.has_more_rounds() {
        field.cosmos.advance_round();
        field.start_round()?;
        return buy::enter(field).map(Some);
    }
    tracing::info!(rounds = field.cosmos.total_rounds(), "match over");
    field.match_over = true;
    field.events.push(GameEvent::MatchOver);
    Ok(Some(GameState::Leaderboard { confirmed: false }))
}

pub(crate) fn handle_input(confirmed: &mut bool, field: &Battlefield, signal: InputSignal) -> bool {
    if signal != InputSignal::ConfirmOk || *confirmed || field.match_over {
        return false;
    }
    *confirmed = true;
    true
}
