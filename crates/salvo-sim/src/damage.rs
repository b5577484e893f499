//! Explosion resolution: blast damage, crater carving, then falling.
//!
//! Ordering matters. Damage is measured against tank positions before the
//! crater exists; falling is measured against the terrain after carving.

use glam::Vec2;

use salvo_core::enums::WeaponKind;
use salvo_core::player::Player;
use salvo_core::weapons::{weapon_spec, WeaponSpec};
use salvo_terrain::Terrain;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub player: usize,
    pub amount: u32,
    pub life: u32,
    pub killed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fall {
    pub player: usize,
    pub from: f32,
    pub to: f32,
}

/// Everything one explosion did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactReport {
    pub hits: Vec<Hit>,
    pub falls: Vec<Fall>,
    pub columns_lowered: usize,
}

impl ImpactReport {
    pub fn kills(&self) -> impl Iterator<Item = usize> + '_ {
        self.hits.iter().filter(|h| h.killed).map(|h| h.player)
    }
}

/// Damage at `distance` from the blast center: `max_damage` at the center
/// falling linearly to zero at the blast radius.
pub fn blast_damage(spec: &WeaponSpec, distance: f32) -> u32 {
    if spec.blast_radius <= 0.0 || distance.is_nan() || distance >= spec.blast_radius {
        return 0;
    }
    let falloff = 1.0 - distance.max(0.0) / spec.blast_radius;
    (spec.max_damage as f32 * falloff).round() as u32
}

/// Resolve an explosion of `weapon` at `center`.
pub fn resolve_explosion(
    terrain: &mut Terrain,
    players: &mut [Player],
    center: Vec2,
    weapon: WeaponKind,
) -> ImpactReport {
    let spec = weapon_spec(weapon);
    let mut report = ImpactReport::default();

    for player in players.iter_mut().filter(|p| p.is_alive()) {
        let amount = blast_damage(&spec, player.position().distance(center));
        if amount == 0 {
            continue;
        }
        let killed = player.take_damage(amount);
        report.hits.push(Hit {
            player: player.id,
            amount,
            life: player.life(),
            killed,
        });
    }

    report.columns_lowered = terrain.carve(center, spec.crater_radius);

    for player in players.iter_mut() {
        let Some(ground) = terrain.height(player.x()) else {
            continue;
        };
        let from = player.y();
        if player.fall_to(ground) {
            report.falls.push(Fall {
                player: player.id,
                from,
                to: ground,
            });
        }
    }

    tracing::debug!(
        ?weapon,
        x = center.x,
        y = center.y,
        hits = report.hits.len(),
        falls = report.falls.len(),
        columns = report.columns_lowered,
        "explosion resolved"
    );
    report
}
