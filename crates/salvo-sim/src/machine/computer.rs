//! The ComputerMove state: ask the brain, then fire.

use glam::Vec2;

use salvo_brain::{BrainContext, ShotPlan};
use salvo_core::enums::WeaponKind;
use salvo_core::error::{SalvoError, SalvoResult};

use crate::battlefield::Battlefield;
use crate::machine::ballistics::fire;
use crate::machine::GameState;
use crate::projectile::Projectile;

pub(crate) fn tick(field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    let index = field.current_player()?;
    let Some(plan) = plan_for(field, index)? else {
        return Ok(None);
    };

    match fire(field, plan) {
        Ok(ballistics) => Ok(Some(GameState::Ballistics(ballistics))),
        Err(SalvoError::OutOfAmmo(weapon)) => {
            // The brain asked for something it does not have.
            tracing::warn!(player = index, ?weapon, "computer picked an empty weapon");
            let fallback = ShotPlan {
                weapon: WeaponKind::BabyMissile,
                ..plan
            };
            match fire(field, fallback) {
                Ok(ballistics) => Ok(Some(GameState::Ballistics(ballistics))),
                Err(SalvoError::OutOfAmmo(_)) => {
                    tracing::warn!(player = index, "nothing left to fire, turn skipped");
                    Ok(Some(GameState::TurnStart))
                }
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Ask the player's brain for a shot, handing it an impact oracle built on
/// the real flight model.
fn plan_for(field: &mut Battlefield, index: usize) -> SalvoResult<Option<ShotPlan>> {
    let Battlefield {
        players,
        terrain,
        cosmos,
        brains,
        wind,
        ..
    } = field;
    let len = players.len();
    let shooter = players.get(index).ok_or(SalvoError::PlayerIndex { index, len })?;
    let brain = brains
        .get_mut(index)
        .ok_or(SalvoError::PlayerIndex { index, len })?;
    let wind = *wind;
    let terrain = &*terrain;

    let predict = |angle_deg: i32, power: u32| -> Vec2 {
        let origin = shooter.turret_tip_at(angle_deg);
        Projectile::launch(origin, (angle_deg as f32).to_radians(), power, wind).fly_to_impact(terrain)
    };
    let ctx = BrainContext {
        me: index,
        players: &players[..],
        terrain,
        wind,
        armory: cosmos.info(index)?.armory(),
        predict_impact: &predict,
    };
    Ok(brain.plan_shot(&ctx))
}
