//! Error taxonomy shared by every crate in the workspace.

use thiserror::Error;

use crate::enums::{GameStateId, WeaponKind};

/// Errors raised by core operations.
///
/// Invariant violations mean the caller or a saved game is corrupt; the
/// operation is aborted and nothing was mutated. Resource errors are ordinary
/// refusals that leave state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SalvoError {
    // --- Invariant violations ---
    #[error("leaderboard has no entries")]
    NoPlayers,
    #[error("unrecognized game state id {0}")]
    UnknownStateId(u8),
    #[error("saved {state:?} state is missing `{field}`")]
    MissingStateField {
        state: GameStateId,
        field: &'static str,
    },
    #[error("player index {index} out of range (have {len})")]
    PlayerIndex { index: usize, len: usize },
    #[error("expected {expected} players, found {found}")]
    PlayerCountMismatch { expected: usize, found: usize },
    #[error("terrain must have at least one column")]
    EmptyTerrain,
    #[error("round {round} is past the last round ({total_rounds})")]
    RoundOutOfRange { round: u16, total_rounds: u16 },
    #[error("player {0} is dead and cannot take the turn")]
    DeadCurrentPlayer(usize),

    // --- Resource insufficiency ---
    #[error("cannot spend ${need}: only ${have} available")]
    InsufficientFunds { have: u32, need: u32 },
    #[error("no {0:?} left in the armory")]
    OutOfAmmo(WeaponKind),
    #[error("{0:?} is not for sale")]
    NotForSale(WeaponKind),
}

impl SalvoError {
    /// True for errors that indicate corrupted state or a logic bug.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(
            self,
            SalvoError::InsufficientFunds { .. }
                | SalvoError::OutOfAmmo(_)
                | SalvoError::NotForSale(_)
        )
    }
}

pub type SalvoResult<T> = Result<T, SalvoError>;
