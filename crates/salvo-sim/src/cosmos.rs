//! State carried across rounds: cash, earnings, armories and the round count.

use serde::{Deserialize, Serialize};

use salvo_core::armory::Armory;
use salvo_core::enums::WeaponKind;
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_core::weapons::{is_for_sale, minimum_weapon_cost, weapon_spec};

/// Per-player ledger that outlives a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    cash: u32,
    earnings: i64,
    armory: Armory,
}

impl PlayerInfo {
    pub fn new(starting_cash: u32) -> Self {
        Self {
            cash: starting_cash,
            earnings: 0,
            armory: Armory::default(),
        }
    }

    pub fn from_parts(cash: u32, earnings: i64, armory: Armory) -> Self {
        Self {
            cash,
            earnings,
            armory,
        }
    }

    pub fn cash(&self) -> u32 {
        self.cash
    }

    pub fn earnings(&self) -> i64 {
        self.earnings
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    pub fn armory_mut(&mut self) -> &mut Armory {
        &mut self.armory
    }

    /// True if at least one weapon on sale is affordable.
    pub fn can_buy_something(&self) -> bool {
        self.cash >= minimum_weapon_cost()
    }

    /// Spend cash. Refused whole if there is not enough.
    pub fn spend_money(&mut self, amount: u32) -> SalvoResult<()> {
        if amount > self.cash {
            return Err(SalvoError::InsufficientFunds {
                have: self.cash,
                need: amount,
            });
        }
        self.cash -= amount;
        Ok(())
    }

    /// Credit earnings. Positive amounts are also paid out as cash;
    /// negative amounts only count against earnings.
    pub fn earn_money(&mut self, amount: i64) {
        self.earnings += amount;
        if amount > 0 {
            self.cash = self.cash.saturating_add(amount.min(u32::MAX as i64) as u32);
        }
    }

    /// Buy one unit of `kind`. Returns the cash left.
    pub fn buy_weapon(&mut self, kind: WeaponKind) -> SalvoResult<u32> {
        if !is_for_sale(kind) {
            return Err(SalvoError::NotForSale(kind));
        }
        self.spend_money(weapon_spec(kind).cost)?;
        self.armory.add(kind, 1);
        Ok(self.cash)
    }
}

/// The round carry ledger for a whole match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cosmos {
    /// Current round, counting from 1.
    round: u16,
    total_rounds: u16,
    players: Vec<PlayerInfo>,
}

impl Cosmos {
    pub fn new(num_players: usize, starting_cash: u32, total_rounds: u16) -> Self {
        Self {
            round: 1,
            total_rounds: total_rounds.max(1),
            players: (0..num_players).map(|_| PlayerInfo::new(starting_cash)).collect(),
        }
    }

    pub fn from_parts(round: u16, total_rounds: u16, players: Vec<PlayerInfo>) -> Self {
        Self {
            round: round.max(1),
            total_rounds: total_rounds.max(1),
            players,
        }
    }

    pub fn round(&self) -> u16 {
        self.round
    }

    pub fn total_rounds(&self) -> u16 {
        self.total_rounds
    }

    pub fn has_more_rounds(&self) -> bool {
        self.round < self.total_rounds
    }

    pub fn advance_round(&mut self) {
        self.round = self.round.saturating_add(1);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerInfo] {
        &self.players
    }

    pub fn info(&self, index: usize) -> SalvoResult<&PlayerInfo> {
        let len = self.players.len();
        self.players
            .get(index)
            .ok_or(SalvoError::PlayerIndex { index, len })
    }

    pub fn info_mut(&mut self, index: usize) -> SalvoResult<&mut PlayerInfo> {
        let len = self.players.len();
        self.players
            .get_mut(index)
            .ok_or(SalvoError::PlayerIndex { index, len })
    }
}
