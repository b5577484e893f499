//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::error::SalvoError;

/// Weapon kinds in their fixed cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    BabyMissile,
    Missile,
    BabyNuke,
    Nuke,
    Earthmover,
}

impl WeaponKind {
    /// All kinds in cycling order.
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::BabyMissile,
        WeaponKind::Missile,
        WeaponKind::BabyNuke,
        WeaponKind::Nuke,
        WeaponKind::Earthmover,
    ];

    /// Position of this kind in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The kind after this one, wrapping around.
    pub fn next(self) -> WeaponKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The kind before this one, wrapping around.
    pub fn prev(self) -> WeaponKind {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How strong a computer player is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Who makes the decisions for a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Computer(Difficulty),
}

impl Controller {
    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human)
    }
}

/// Shape of the generated battlefield floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Flat,
    #[default]
    Hilly,
    Rolling,
    Jagged,
}

/// Tag identifying a turn-machine state in saved games.
///
/// The numeric values are stable; they are what a save file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum GameStateId {
    Leaderboard = 0,
    BuyWeapons = 5,
    TurnStart = 10,
    HumanMove = 15,
    ComputerMove = 16,
    Ballistics = 20,
}

impl From<GameStateId> for u8 {
    fn from(id: GameStateId) -> u8 {
        id as u8
    }
}

impl TryFrom<u8> for GameStateId {
    type Error = SalvoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameStateId::Leaderboard),
            5 => Ok(GameStateId::BuyWeapons),
            10 => Ok(GameStateId::TurnStart),
            15 => Ok(GameStateId::HumanMove),
            16 => Ok(GameStateId::ComputerMove),
            20 => Ok(GameStateId::Ballistics),
            other => Err(SalvoError::UnknownStateId(other)),
        }
    }
}
