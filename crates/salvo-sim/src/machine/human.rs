//! The HumanMove state: aiming, weapon cycling and hold-to-fire.

use salvo_brain::ShotPlan;
use salvo_core::commands::InputSignal;
use salvo_core::constants::MAX_POWER;
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_core::events::GameEvent;

use crate::battlefield::Battlefield;
use crate::machine::ballistics::fire;
use crate::machine::charge::charge_power;
use crate::machine::GameState;

/// Default slider power for a fresh turn.
pub const DEFAULT_SLIDER_POWER: u32 = MAX_POWER / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanMove {
    /// Power used when firing with the confirm control.
    pub slider_power: u32,
    /// Clock reading when the fire control went down.
    pub press_millis: Option<u64>,
    /// A finalized shot waiting for the next tick.
    pub fire: Option<u32>,
}

impl Default for HumanMove {
    fn default() -> Self {
        Self::with_slider(DEFAULT_SLIDER_POWER)
    }
}

impl HumanMove {
    pub fn with_slider(power: u32) -> Self {
        Self {
            slider_power: power.min(MAX_POWER),
            press_millis: None,
            fire: None,
        }
    }

    /// Charging or holding a shot that the next tick must act on.
    pub fn is_busy(&self) -> bool {
        self.press_millis.is_some() || self.fire.is_some()
    }

    /// Power accumulated so far while the fire control is held.
    pub fn charging_power(&self, now_millis: u64) -> Option<u32> {
        self.press_millis
            .map(|pressed| charge_power(now_millis.saturating_sub(pressed)))
    }
}

pub(crate) fn handle_input(
    human: &mut HumanMove,
    field: &mut Battlefield,
    signal: InputSignal,
) -> SalvoResult<bool> {
    let now = field.now();
    let index = field.current_player()?;
    let armory = field.cosmos.info(index)?.armory();
    let len = field.players.len();
    let player = field
        .players
        .get_mut(index)
        .ok_or(SalvoError::PlayerIndex { index, len })?;

    let refresh = match signal {
        InputSignal::PressFire => {
            if human.press_millis.is_some() || human.fire.is_some() {
                false
            } else {
                human.press_millis = Some(now);
                true
            }
        }
        InputSignal::ReleaseFire => match human.charging_power(now) {
            Some(power) => {
                human.press_millis = None;
                human.fire = Some(power);
                true
            }
            None => false,
        },
        InputSignal::ConfirmOk => {
            if human.is_busy() {
                false
            } else {
                human.fire = Some(human.slider_power);
                true
            }
        }
        InputSignal::AimTo { angle_deg } => {
            let before = player.angle_deg();
            player.set_angle_deg(angle_deg);
            before != player.angle_deg()
        }
        InputSignal::AimAt { x, y } => player.aim_at(glam::Vec2::new(x, y)),
        InputSignal::SetPower { power } => {
            let before = human.slider_power;
            human.slider_power = ShotPlan::new(0, power, player.selected_weapon()).power;
            before != human.slider_power
        }
        InputSignal::CycleWeaponLeft => {
            player.select_weapon(armory.prev_weapon(player.selected_weapon()));
            true
        }
        InputSignal::CycleWeaponRight => {
            player.select_weapon(armory.next_weapon(player.selected_weapon()));
            true
        }
        InputSignal::Buy { .. } => false,
    };
    Ok(refresh)
}

pub(crate) fn tick(human: &mut HumanMove, field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    if let Some(power) = human.charging_power(field.now()) {
        if power >= MAX_POWER {
            tracing::debug!("charge maxed, releasing fire");
            human.press_millis = None;
            human.fire = Some(MAX_POWER);
        }
    }
    let Some(power) = human.fire.take() else {
        return Ok(None);
    };

    let index = field.current_player()?;
    let player = field.player(index)?;
    let plan = ShotPlan::new(player.angle_deg(), power as i64, player.selected_weapon());
    match fire(field, plan) {
        Ok(ballistics) => Ok(Some(GameState::Ballistics(ballistics))),
        Err(SalvoError::OutOfAmmo(weapon)) => {
            tracing::warn!(player = index, ?weapon, "fire refused: weapon is empty");
            field.events.push(GameEvent::FireRefused {
                player: index,
                weapon,
            });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
