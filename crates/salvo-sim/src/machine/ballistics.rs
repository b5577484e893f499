//! The Ballistics state: one shell, then one explosion, then resolution.

use salvo_brain::ShotPlan;
use salvo_core::constants::KILL_REWARD;
use salvo_core::enums::WeaponKind;
use salvo_core::error::SalvoResult;
use salvo_core::events::GameEvent;

use crate::battlefield::Battlefield;
use crate::damage::resolve_explosion;
use crate::explosion::Explosion;
use crate::machine::GameState;
use crate::projectile::{Flight, Projectile, Trajectory};

#[derive(Debug, Clone)]
pub enum BallisticsPhase {
    /// Not launched yet. Also the state a resumed game restarts from.
    Pending,
    InFlight(Projectile),
    Exploding {
        explosion: Explosion,
        trajectory: Trajectory,
    },
}

#[derive(Debug, Clone)]
pub struct Ballistics {
    pub power: u32,
    pub weapon: WeaponKind,
    pub phase: BallisticsPhase,
}

impl Ballistics {
    pub fn new(power: u32, weapon: WeaponKind) -> Self {
        Self {
            power,
            weapon,
            phase: BallisticsPhase::Pending,
        }
    }

    /// Path flown so far, if a shell has been launched.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        match &self.phase {
            BallisticsPhase::Pending => None,
            BallisticsPhase::InFlight(projectile) => Some(projectile.trajectory()),
            BallisticsPhase::Exploding { trajectory, .. } => Some(trajectory),
        }
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        match &self.phase {
            BallisticsPhase::Exploding { explosion, .. } => Some(explosion),
            _ => None,
        }
    }
}

/// Commit a shot for the current player: consume ammo, set the turret and
/// hand over to Ballistics. An empty weapon is refused without mutation.
pub(crate) fn fire(field: &mut Battlefield, plan: ShotPlan) -> SalvoResult<Ballistics> {
    let plan = plan.clamped();
    let index = field.current_player()?;
    let selected = field.cosmos.info_mut(index)?.armory_mut().use_weapon(plan.weapon)?;

    let player = field.player_mut(index)?;
    player.set_angle_deg(plan.angle_deg);
    player.select_weapon(selected);
    tracing::info!(
        player = index,
        weapon = ?plan.weapon,
        power = plan.power,
        angle = plan.angle_deg,
        "shot fired"
    );
    field.events.push(GameEvent::ShotFired {
        player: index,
        weapon: plan.weapon,
        power: plan.power,
        angle_deg: plan.angle_deg,
    });
    Ok(Ballistics::new(plan.power, plan.weapon))
}

pub(crate) fn tick(ballistics: &mut Ballistics, field: &mut Battlefield) -> SalvoResult<Option<GameState>> {
    let next_phase = match &mut ballistics.phase {
        BallisticsPhase::Pending => {
            let index = field.current_player()?;
            let shooter = field.player(index)?;
            Some(BallisticsPhase::InFlight(Projectile::launch(
                shooter.turret_tip(),
                shooter.angle_rad(),
                ballistics.power,
                field.wind,
            )))
        }
        BallisticsPhase::InFlight(projectile) => match projectile.step(&field.terrain) {
            Flight::Flying => None,
            Flight::Collided { at, timed_out } => {
                tracing::debug!(
                    x = at.x,
                    y = at.y,
                    samples = projectile.samples(),
                    waypoints = projectile.trajectory().waypoints().len(),
                    timed_out,
                    "shell collided"
                );
                field.events.push(GameEvent::Detonation {
                    center: at,
                    weapon: ballistics.weapon,
                });
                Some(BallisticsPhase::Exploding {
                    explosion: Explosion::new(at, ballistics.weapon, field.now()),
                    trajectory: projectile.trajectory().clone(),
                })
            }
        },
        BallisticsPhase::Exploding { explosion, .. } => {
            if !explosion.is_finished(field.now()) {
                return Ok(None);
            }
            let explosion = *explosion;
            resolve(field, &explosion)?;
            return Ok(Some(GameState::TurnStart));
        }
    };
    if let Some(phase) = next_phase {
        ballistics.phase = phase;
    }
    Ok(None)
}

/// Apply the explosion and pay out kill rewards. Killing yourself costs
/// earnings instead.
fn resolve(field: &mut Battlefield, explosion: &Explosion) -> SalvoResult<()> {
    let shooter = field.current_player()?;
    let report = resolve_explosion(
        &mut field.terrain,
        &mut field.players,
        explosion.center,
        explosion.weapon,
    );

    for hit in &report.hits {
        field.events.push(GameEvent::PlayerDamaged {
            player: hit.player,
            amount: hit.amount,
            life: hit.life,
        });
    }
    for victim in report.kills() {
        let reward = if victim == shooter {
            -(KILL_REWARD as i64)
        } else {
            KILL_REWARD as i64
        };
        field.cosmos.info_mut(shooter)?.earn_money(reward);
        tracing::info!(victim, by = shooter, "player killed");
        field.events.push(GameEvent::PlayerKilled {
            player: victim,
            by: shooter,
        });
    }
    for fall in &report.falls {
        field.events.push(GameEvent::PlayerFell {
            player: fall.player,
            from: fall.from,
            to: fall.to,
        });
    }
    Ok(())
}
