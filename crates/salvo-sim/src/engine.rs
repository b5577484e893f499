//! Simulation engine: the turn state machine plus everything it ticks on.
//!
//! `SimulationEngine` owns the live state and the battlefield, stages input
//! signals, advances one tick at a time and produces `GameSnapshot`s.
//! Completely headless, enabling deterministic testing with a manual clock.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use salvo_brain::{brain_for, Brain};
use salvo_core::colors::ColorId;
use salvo_core::commands::InputSignal;
use salvo_core::constants::*;
use salvo_core::enums::{Controller, Difficulty, GameStateId, TerrainType};
use salvo_core::error::{SalvoError, SalvoResult};
use salvo_core::events::GameEvent;
use salvo_core::player::{Player, PlayerSetup};
use salvo_core::state::{ExplosionView, GameSnapshot, PlayerView};
use salvo_terrain::Terrain;

use crate::battlefield::{check_roster, Battlefield};
use crate::clock::{Clock, SystemClock};
use crate::cosmos::{Cosmos, PlayerInfo};
use crate::leaderboard::Leaderboard;
use crate::machine::{self, buy, next_turn, GameState, NextTurn};
use crate::record::{PlayerRecord, SavedGame, StateRecord};

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    /// Field width in columns.
    pub width: usize,
    pub rounds: u16,
    pub starting_cash: u32,
    pub terrain_type: TerrainType,
    /// Shuffle the evenly spaced starting slots.
    pub random_placement: bool,
    pub wind_enabled: bool,
    pub max_wind: f32,
    pub players: Vec<PlayerSetup>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: DEFAULT_FIELD_WIDTH,
            rounds: DEFAULT_NUM_ROUNDS,
            starting_cash: DEFAULT_STARTING_CASH,
            terrain_type: TerrainType::default(),
            random_placement: false,
            wind_enabled: true,
            max_wind: DEFAULT_MAX_WIND,
            players: vec![
                PlayerSetup::new("Player", ColorId::Red, Controller::Human),
                PlayerSetup::new("Computer", ColorId::Yellow, Controller::Computer(Difficulty::Easy)),
            ],
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stay,
    Goto(GameStateId),
    MatchOver,
}

/// The simulation engine. Owns the live state and all match state.
pub struct SimulationEngine {
    state: GameState,
    field: Battlefield,
}

impl SimulationEngine {
    /// Start a new match on the wall clock.
    pub fn new(config: SimConfig) -> SalvoResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock::default()))
    }

    /// Start a new match. Round 1 opens in BuyWeapons.
    pub fn with_clock(config: SimConfig, clock: Arc<dyn Clock>) -> SalvoResult<Self> {
        let mut field = Battlefield::new(config, clock)?;
        let state = buy::enter(&mut field)?;
        Ok(Self { state, field })
    }

    /// Resume a suspended match. `config` supplies the seed and the rules
    /// for rounds still to come; the roster comes from the record.
    pub fn restore(saved: SavedGame, mut config: SimConfig, clock: Arc<dyn Clock>) -> SalvoResult<Self> {
        check_roster(saved.players.len())?;
        let len = saved.players.len();
        if let Some(index) = saved.current_player.filter(|i| *i >= len) {
            return Err(SalvoError::PlayerIndex { index, len });
        }
        if saved.round > saved.total_rounds.max(1) {
            return Err(SalvoError::RoundOutOfRange {
                round: saved.round,
                total_rounds: saved.total_rounds,
            });
        }

        let setups: Vec<PlayerSetup> = saved
            .players
            .iter()
            .map(|r| PlayerSetup {
                name: r.name.clone(),
                color: r.color,
                controller: r.controller,
                starting_life_percent: r.starting_life_percent,
            })
            .collect();
        let last_column = saved.terrain.width() - 1;
        let players = saved
            .players
            .iter()
            .zip(&setups)
            .enumerate()
            .map(|(i, (record, setup))| {
                let mut player = Player::new(i, setup);
                player.place(record.x.min(last_column), record.y);
                player.set_life(record.life);
                player.set_angle_deg(record.angle_deg);
                player.select_weapon(record.selected_weapon);
                player
            })
            .collect();
        let infos = saved
            .players
            .iter()
            .map(|r| PlayerInfo::from_parts(r.cash, r.earnings, r.armory.clone()))
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let brains: Vec<Box<dyn Brain>> = setups
            .iter()
            .map(|setup| brain_for(setup.controller, rng.gen()))
            .collect();
        config.players = setups.clone();
        config.rounds = saved.total_rounds;
        config.width = saved.terrain.width();

        let field = Battlefield {
            config,
            setups,
            terrain: saved.terrain,
            players,
            wind: saved.wind,
            current: saved.current_player,
            cosmos: Cosmos::from_parts(saved.round, saved.total_rounds, infos),
            brains,
            rng,
            clock,
            events: Vec::new(),
            match_over: saved.match_over,
        };
        let state = saved.state.restore(&field)?;
        tracing::info!(state = ?state.id(), round = field.cosmos.round(), "game restored");
        Ok(Self { state, field })
    }

    /// Capture the minimal record needed to resume.
    pub fn save(&self) -> SavedGame {
        let players = self
            .field
            .players
            .iter()
            .zip(&self.field.setups)
            .zip(self.field.cosmos.players())
            .map(|((player, setup), info)| PlayerRecord {
                name: player.name.clone(),
                color: player.color,
                controller: player.controller,
                starting_life_percent: setup.starting_life_percent,
                life: player.life(),
                x: player.x(),
                y: player.y(),
                angle_deg: player.angle_deg(),
                selected_weapon: player.selected_weapon(),
                cash: info.cash(),
                earnings: info.earnings(),
                armory: info.armory().clone(),
            })
            .collect();
        SavedGame {
            state: StateRecord::capture(&self.state),
            round: self.field.cosmos.round(),
            total_rounds: self.field.cosmos.total_rounds(),
            current_player: self.field.current,
            wind: self.field.wind,
            terrain: self.field.terrain.clone(),
            players,
            match_over: self.field.match_over,
        }
    }

    /// Stage an input signal on the live state. Returns true if the UI
    /// should refresh. Signals the live state does not accept are ignored.
    pub fn handle_input(&mut self, signal: InputSignal) -> SalvoResult<bool> {
        if self.field.match_over {
            return Ok(false);
        }
        tracing::trace!(?signal, state = ?self.state.id(), "input");
        machine::handle_input(&mut self.state, &mut self.field, signal)
    }

    /// Advance the live state by one tick.
    pub fn tick(&mut self) -> SalvoResult<Step> {
        if self.field.match_over {
            return Ok(Step::MatchOver);
        }
        let next = machine::tick(&mut self.state, &mut self.field)?;
        let Some(next) = next else {
            return Ok(Step::Stay);
        };
        tracing::debug!(from = ?self.state.id(), to = ?next.id(), "state transition");
        self.state = next;
        if self.field.match_over {
            Ok(Step::MatchOver)
        } else {
            Ok(Step::Goto(self.state.id()))
        }
    }

    /// Milliseconds the loop should wait before the next tick; zero means
    /// block until input arrives.
    pub fn delay_millis(&self) -> u64 {
        if self.field.match_over {
            DELAY_BLOCK
        } else {
            self.state.delay()
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_id(&self) -> GameStateId {
        self.state.id()
    }

    pub fn is_match_over(&self) -> bool {
        self.field.match_over
    }

    /// Who acts after the current player. Does not change anything.
    pub fn next_turn(&self) -> NextTurn {
        next_turn(&self.field.players, self.field.current)
    }

    pub fn leaderboard(&self) -> SalvoResult<Leaderboard> {
        Leaderboard::build(&self.field.cosmos, &self.field.players)
    }

    pub fn players(&self) -> &[Player] {
        &self.field.players
    }

    pub fn terrain(&self) -> &Terrain {
        &self.field.terrain
    }

    pub fn wind(&self) -> f32 {
        self.field.wind
    }

    pub fn cosmos(&self) -> &Cosmos {
        &self.field.cosmos
    }

    pub fn current_player(&self) -> Option<usize> {
        self.field.current
    }

    pub fn config(&self) -> &SimConfig {
        &self.field.config
    }

    /// Replace a player's brain, e.g. with a scripted one.
    pub fn set_brain(&mut self, index: usize, brain: Box<dyn Brain>) -> SalvoResult<()> {
        let len = self.field.brains.len();
        let slot = self
            .field
            .brains
            .get_mut(index)
            .ok_or(SalvoError::PlayerIndex { index, len })?;
        *slot = brain;
        Ok(())
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.field.events)
    }

    /// Build the render view. Pending events move into the snapshot.
    pub fn snapshot(&mut self) -> GameSnapshot {
        let now = self.field.now();
        let players = self
            .field
            .players
            .iter()
            .zip(self.field.cosmos.players())
            .map(|(player, info)| PlayerView {
                id: player.id,
                name: player.name.clone(),
                color: player.color,
                rgb: player.color.rgb(),
                x: player.x(),
                y: player.y(),
                angle_deg: player.angle_deg(),
                life: player.life(),
                alive: player.is_alive(),
                weapon: player.selected_weapon(),
                ammo: info.armory().count(player.selected_weapon()),
                cash: info.cash(),
                earnings: info.earnings(),
            })
            .collect();

        let (trajectory, explosion, charging_power) = match &self.state {
            GameState::Ballistics(b) => (
                b.trajectory().map(|t| t.points()).unwrap_or_default(),
                b.explosion().map(|e| ExplosionView {
                    center: e.center,
                    radius: e.radius_at(now),
                    weapon: e.weapon,
                }),
                None,
            ),
            GameState::HumanMove(human) => (Vec::new(), None, human.charging_power(now)),
            _ => (Vec::new(), None, None),
        };

        GameSnapshot {
            state: self.state.id(),
            round: self.field.cosmos.round(),
            total_rounds: self.field.cosmos.total_rounds(),
            current_player: self.field.current,
            wind: self.field.wind,
            terrain: self.field.terrain.heights().to_vec(),
            players,
            trajectory,
            explosion,
            charging_power,
            match_over: self.field.match_over,
            events: self.take_events(),
        }
    }
}
