//! The owned context every state ticks against.
//!
//! One round's terrain and tanks, the cross-round ledger, the brains, the
//! RNG, the clock and the pending event buffer. States never reach for
//! anything outside of this.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use salvo_brain::{brain_for, Brain};
use salvo_core::constants::{DEFAULT_TURRET_ANGLE, MAX_PLAYERS};
use salvo_core::enums::WeaponKind;
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_core::events::GameEvent;
use salvo_core::player::{Player, PlayerSetup};
use salvo_terrain::{generate, placement_columns, Terrain};

use crate::clock::Clock;
use crate::cosmos::Cosmos;
use crate::engine::SimConfig;

pub struct Battlefield {
    pub config: SimConfig,
    pub setups: Vec<PlayerSetup>,
    pub terrain: Terrain,
    pub players: Vec<Player>,
    pub wind: f32,
    /// Player whose turn it is (or was, once the round is decided).
    pub current: Option<usize>,
    pub cosmos: Cosmos,
    pub brains: Vec<Box<dyn Brain>>,
    pub rng: ChaCha8Rng,
    pub clock: Arc<dyn Clock>,
    pub events: Vec<GameEvent>,
    pub match_over: bool,
}

/// Reject rosters the turn order cannot handle.
pub(crate) fn check_roster(count: usize) -> SalvoResult<()> {
    if count == 0 {
        return Err(SalvoError::NoPlayers);
    }
    if count > MAX_PLAYERS {
        return Err(SalvoError::PlayerCountMismatch {
            expected: MAX_PLAYERS,
            found: count,
        });
    }
    Ok(())
}

impl Battlefield {
    /// A fresh match with round 1 already laid out.
    pub fn new(config: SimConfig, clock: Arc<dyn Clock>) -> SalvoResult<Self> {
        check_roster(config.players.len())?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let setups = config.players.clone();
        let players = setups
            .iter()
            .enumerate()
            .map(|(i, setup)| Player::new(i, setup))
            .collect();
        let brains = setups
            .iter()
            .map(|setup| brain_for(setup.controller, rng.gen()))
            .collect();
        let cosmos = Cosmos::new(setups.len(), config.starting_cash, config.rounds);
        let terrain = Terrain::flat(config.width.max(1), 0.0)?;

        let mut field = Self {
            config,
            setups,
            terrain,
            players,
            wind: 0.0,
            current: None,
            cosmos,
            brains,
            rng,
            clock,
            events: Vec::new(),
            match_over: false,
        };
        field.start_round()?;
        Ok(field)
    }

    pub fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Lay out a new round: fresh terrain, tanks placed and healed, new wind.
    /// Cash, earnings and armories carry over untouched.
    pub fn start_round(&mut self) -> SalvoResult<()> {
        self.terrain = generate(self.config.terrain_type, self.config.width, &mut self.rng)?;
        let columns = placement_columns(
            self.terrain.width(),
            self.players.len(),
            self.config.random_placement,
            &mut self.rng,
        );
        for ((player, setup), column) in self.players.iter_mut().zip(&self.setups).zip(columns) {
            let ground = self.terrain.height(column).unwrap_or(0.0);
            player.place(column, ground);
            player.set_life(setup.starting_life());
            player.set_angle_deg(DEFAULT_TURRET_ANGLE);
            player.select_weapon(WeaponKind::default());
        }
        self.wind = if self.config.wind_enabled && self.config.max_wind > 0.0 {
            let max = self.config.max_wind;
            self.rng.gen_range(-max..=max)
        } else {
            0.0
        };
        self.current = None;

        let round = self.cosmos.round();
        let total_rounds = self.cosmos.total_rounds();
        tracing::info!(round, total_rounds, wind = self.wind, "round started");
        self.events.push(GameEvent::RoundStarted { round, total_rounds });
        Ok(())
    }

    /// Index of the acting player. Missing or stale means corrupted state.
    pub fn current_player(&self) -> SalvoResult<usize> {
        let len = self.players.len();
        match self.current {
            Some(index) if index < len => Ok(index),
            Some(index) => Err(SalvoError::PlayerIndex { index, len }),
            None => Err(SalvoError::PlayerIndex { index: len, len }),
        }
    }

    pub fn player(&self, index: usize) -> SalvoResult<&Player> {
        let len = self.players.len();
        self.players.get(index).ok_or(SalvoError::PlayerIndex { index, len })
    }

    pub fn player_mut(&mut self, index: usize) -> SalvoResult<&mut Player> {
        let len = self.players.len();
        self.players
            .get_mut(index)
            .ok_or(SalvoError::PlayerIndex { index, len })
    }

    pub fn is_human(&self, index: usize) -> bool {
        self.brains.get(index).is_some_and(|b| b.is_human())
    }
}
