//! Match standings by total earnings.

use serde::{Deserialize, Serialize};

use salvo_core::colors::ColorId;
use salvo_core::constants::WHITE;
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_core::player::Player;

use crate::cosmos::Cosmos;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: usize,
    pub name: String,
    pub color: ColorId,
    pub earnings: i64,
}

/// Entries sorted by earnings (highest first). Ties on earnings list names
/// in reverse alphabetical order, then colors from the end of the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Rank the players. The ledger and the roster must line up.
    pub fn build(cosmos: &Cosmos, players: &[Player]) -> SalvoResult<Self> {
        if cosmos.len() != players.len() {
            return Err(SalvoError::PlayerCountMismatch {
                expected: players.len(),
                found: cosmos.len(),
            });
        }
        let mut entries: Vec<LeaderboardEntry> = players
            .iter()
            .zip(cosmos.players())
            .map(|(player, info)| LeaderboardEntry {
                player: player.id,
                name: player.name.clone(),
                color: player.color,
                earnings: info.earnings(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.earnings
                .cmp(&a.earnings)
                .then_with(|| b.name.cmp(&a.name))
                .then_with(|| b.color.cmp(&a.color))
        });
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// True when at least two players share the top earnings.
    pub fn tie_for_winner(&self) -> bool {
        match self.entries.as_slice() {
            [first, second, ..] => first.earnings == second.earnings,
            _ => false,
        }
    }

    /// "Alice", or "Carol, Bob and Alice" when several share first place.
    pub fn winner_text(&self) -> SalvoResult<String> {
        let first = self.entries.first().ok_or(SalvoError::NoPlayers)?;
        let winners: Vec<&str> = self
            .entries
            .iter()
            .take_while(|e| e.earnings == first.earnings)
            .map(|e| e.name.as_str())
            .collect();
        Ok(match winners.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
            _ => first.name.clone(),
        })
    }

    /// Packed color for the winner banner; white on a tie or empty board.
    pub fn winner_color(&self) -> u32 {
        match self.entries.first() {
            Some(first) if !self.tie_for_winner() => first.color.rgb(),
            _ => WHITE,
        }
    }
}
