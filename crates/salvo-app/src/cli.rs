//! Command-line arguments and the match configuration built from them.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use salvo_core::colors::COLOR_TABLE;
use salvo_core::constants::{MAX_NAME_LENGTH, MAX_PLAYERS};
use salvo_core::enums::{Controller, Difficulty, TerrainType, WeaponKind};
use salvo_core::player::PlayerSetup;
use salvo_core::weapons::weapon_spec;
use salvo_sim::SimConfig;

#[derive(Debug, Parser)]
#[command(name = "salvo", version, about = "Turn-based artillery on a destructible battlefield")]
pub struct Args {
    /// JSON match configuration; other flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub rounds: Option<u16>,

    /// Field width in columns.
    #[arg(long)]
    pub width: Option<usize>,

    /// flat, hilly, rolling or jagged.
    #[arg(long, value_parser = parse_terrain)]
    pub terrain: Option<TerrainType>,

    /// Comma separated roster, each `name:kind` or just `kind`, where kind
    /// is human, easy, medium or hard.
    #[arg(long, value_delimiter = ',', value_parser = parse_player)]
    pub players: Vec<PlayerArg>,

    #[arg(long)]
    pub cash: Option<u32>,

    #[arg(long)]
    pub random_placement: bool,

    #[arg(long)]
    pub no_wind: bool,

    #[arg(long, default_value = "saves")]
    pub save_dir: PathBuf,

    /// Slot to write when the run ends.
    #[arg(long)]
    pub save: Option<String>,

    /// Slot to resume instead of starting a new match.
    #[arg(long)]
    pub load: Option<String>,

    #[arg(long)]
    pub list_saves: bool,

    /// Play on the console in real time instead of fast-forwarding a
    /// computer-only match.
    #[arg(long)]
    pub interactive: bool,

    /// Give up a fast-forwarded match after this many ticks.
    #[arg(long, default_value_t = 500_000)]
    pub max_ticks: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerArg {
    pub name: String,
    pub controller: Controller,
}

pub fn parse_terrain(s: &str) -> Result<TerrainType, String> {
    match s.to_ascii_lowercase().as_str() {
        "flat" => Ok(TerrainType::Flat),
        "hilly" => Ok(TerrainType::Hilly),
        "rolling" => Ok(TerrainType::Rolling),
        "jagged" => Ok(TerrainType::Jagged),
        other => Err(format!("unknown terrain `{other}`")),
    }
}

pub fn parse_controller(s: &str) -> Result<Controller, String> {
    match s.to_ascii_lowercase().as_str() {
        "human" => Ok(Controller::Human),
        "easy" => Ok(Controller::Computer(Difficulty::Easy)),
        "medium" => Ok(Controller::Computer(Difficulty::Medium)),
        "hard" => Ok(Controller::Computer(Difficulty::Hard)),
        other => Err(format!("unknown controller `{other}`")),
    }
}

pub fn parse_player(s: &str) -> Result<PlayerArg, String> {
    let (name, kind) = match s.split_once(':') {
        Some((name, kind)) => (name.trim(), kind.trim()),
        None => (s.trim(), s.trim()),
    };
    if name.is_empty() {
        return Err(format!("player `{s}` has no name"));
    }
    Ok(PlayerArg {
        name: name.chars().take(MAX_NAME_LENGTH).collect(),
        controller: parse_controller(kind)?,
    })
}

/// Accepts a weapon's display name in any case, with or without spaces,
/// e.g. `baby nuke`, `BabyNuke` or `baby-nuke`.
pub fn parse_weapon(s: &str) -> Result<WeaponKind, String> {
    let wanted = normalize(s);
    WeaponKind::ALL
        .into_iter()
        .find(|kind| normalize(weapon_spec(*kind).name) == wanted)
        .ok_or_else(|| format!("unknown weapon `{s}`"))
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Roster for a fast-forwarded match when none is given.
pub fn default_computer_roster() -> Vec<PlayerSetup> {
    vec![
        PlayerSetup::new("Rookie", COLOR_TABLE[0].id, Controller::Computer(Difficulty::Easy)),
        PlayerSetup::new("Veteran", COLOR_TABLE[3].id, Controller::Computer(Difficulty::Hard)),
    ]
}

impl Args {
    /// Build the match configuration: file (or defaults), then flags.
    pub fn sim_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(terrain) = self.terrain {
            config.terrain_type = terrain;
        }
        if let Some(cash) = self.cash {
            config.starting_cash = cash;
        }
        config.random_placement |= self.random_placement;
        if self.no_wind {
            config.wind_enabled = false;
        }

        if !self.players.is_empty() {
            anyhow::ensure!(
                self.players.len() <= MAX_PLAYERS,
                "at most {MAX_PLAYERS} players, got {}",
                self.players.len()
            );
            config.players = self
                .players
                .iter()
                .enumerate()
                .map(|(i, p)| PlayerSetup::new(&p.name, COLOR_TABLE[i % COLOR_TABLE.len()].id, p.controller))
                .collect();
        } else if self.config.is_none() && !self.interactive {
            config.players = default_computer_roster();
        }
        Ok(config)
    }
}
