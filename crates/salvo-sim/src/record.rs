//! Suspend/resume records.
//!
//! A [`SavedGame`] holds the minimal state needed to resume: which state is
//! live plus that state's own fields, the round counters, the terrain, and
//! every player's round and ledger values. In-flight shells and explosions
//! are not kept; a resumed Ballistics state relaunches from the turret.

use serde::{Deserialize, Serialize};

use salvo_core::armory::Armory;
use salvo_core::colors::ColorId;
use salvo_core::enums::{Controller, GameStateId, WeaponKind};
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_terrain::Terrain;

use crate::battlefield::Battlefield;
use crate::machine::{buy, Ballistics, GameState, HumanMove};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: GameStateId,
    /// Ballistics: committed power. HumanMove: slider power.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    /// Ballistics: the weapon already paid for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponKind>,
}

impl StateRecord {
    pub fn capture(state: &GameState) -> Self {
        let (power, weapon) = match state {
            GameState::HumanMove(human) => (Some(human.slider_power), None),
            GameState::Ballistics(b) => (Some(b.power), Some(b.weapon)),
            _ => (None, None),
        };
        Self {
            id: state.id(),
            power,
            weapon,
        }
    }

    /// Rebuild the live state. Move states re-dispatch on the current
    /// player's brain so a record never strands a computer in HumanMove.
    pub(crate) fn restore(&self, field: &Battlefield) -> SalvoResult<GameState> {
        let missing = |name: &'static str| SalvoError::MissingStateField {
            state: self.id,
            field: name,
        };
        // Only a living tank may hold the turn in a move or flight state.
        let shooter = || -> SalvoResult<usize> {
            let index = field.current.ok_or_else(|| missing("current_player"))?;
            match field.players.get(index) {
                Some(player) if player.is_alive() => Ok(index),
                Some(_) => Err(SalvoError::DeadCurrentPlayer(index)),
                None => Err(SalvoError::PlayerIndex {
                    index,
                    len: field.players.len(),
                }),
            }
        };
        let state = match self.id {
            GameStateId::Leaderboard => GameState::Leaderboard { confirmed: false },
            GameStateId::BuyWeapons => buy::resume(field),
            GameStateId::TurnStart => GameState::TurnStart,
            GameStateId::HumanMove | GameStateId::ComputerMove => {
                if field.is_human(shooter()?) {
                    GameState::HumanMove(self.power.map(HumanMove::with_slider).unwrap_or_default())
                } else {
                    GameState::ComputerMove
                }
            }
            GameStateId::Ballistics => {
                shooter()?;
                let power = self.power.ok_or_else(|| missing("power"))?;
                let weapon = self.weapon.ok_or_else(|| missing("weapon"))?;
                GameState::Ballistics(Ballistics::new(power, weapon))
            }
        };
        Ok(state)
    }
}

fn default_life_percent() -> u32 {
    100
}

/// One player's round state and ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub color: ColorId,
    pub controller: Controller,
    #[serde(default = "default_life_percent")]
    pub starting_life_percent: u32,
    pub life: u32,
    pub x: usize,
    pub y: f32,
    pub angle_deg: i32,
    pub selected_weapon: WeaponKind,
    pub cash: u32,
    pub earnings: i64,
    pub armory: Armory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub state: StateRecord,
    pub round: u16,
    pub total_rounds: u16,
    #[serde(default)]
    pub current_player: Option<usize>,
    #[serde(default)]
    pub wind: f32,
    pub terrain: Terrain,
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub match_over: bool,
}
