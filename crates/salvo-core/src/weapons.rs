//! Static weapon table.

use crate::enums::WeaponKind;

/// Tuning for one weapon kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    /// Price of one unit in the buy phase.
    pub cost: u32,
    /// Players within this distance of the blast center take damage.
    pub blast_radius: f32,
    /// Radius of the crater carved into the terrain.
    pub crater_radius: f32,
    /// Damage dealt at the exact blast center.
    pub max_damage: u32,
    /// How long the explosion is displayed before it resolves.
    pub explosion_millis: u64,
}

/// Look up the tuning for a weapon kind.
pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::BabyMissile => WeaponSpec {
            name: "Baby Missile",
            // Always stocked without limit, never sold.
            cost: 0,
            blast_radius: 20.0,
            crater_radius: 10.0,
            max_damage: 40,
            explosion_millis: 300,
        },
        WeaponKind::Missile => WeaponSpec {
            name: "Missile",
            cost: 1000,
            blast_radius: 35.0,
            crater_radius: 18.0,
            max_damage: 80,
            explosion_millis: 400,
        },
        WeaponKind::BabyNuke => WeaponSpec {
            name: "Baby Nuke",
            cost: 2500,
            blast_radius: 60.0,
            crater_radius: 32.0,
            max_damage: 150,
            explosion_millis: 700,
        },
        WeaponKind::Nuke => WeaponSpec {
            name: "Nuke",
            cost: 6000,
            blast_radius: 100.0,
            crater_radius: 55.0,
            max_damage: 300,
            explosion_millis: 1000,
        },
        WeaponKind::Earthmover => WeaponSpec {
            name: "Earthmover",
            cost: 1500,
            blast_radius: 15.0,
            crater_radius: 60.0,
            max_damage: 10,
            explosion_millis: 500,
        },
    }
}

/// Whether the buy phase offers this kind at all.
pub fn is_for_sale(kind: WeaponKind) -> bool {
    weapon_spec(kind).cost > 0
}

/// Cheapest price on sale; a player with less cash cannot buy anything.
pub fn minimum_weapon_cost() -> u32 {
    WeaponKind::ALL
        .iter()
        .filter(|kind| is_for_sale(**kind))
        .map(|kind| weapon_spec(*kind).cost)
        .min()
        .unwrap_or(0)
}
