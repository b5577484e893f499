#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use clap::Parser;

    use salvo_core::colors::COLOR_TABLE;
    use salvo_core::commands::InputSignal;
    use salvo_core::enums::{Controller, Difficulty, GameStateId, TerrainType, WeaponKind};
    use salvo_sim::record::StateRecord;
    use salvo_sim::{ManualClock, SavedGame, SimConfig, SimulationEngine};

    use crate::cli::{parse_player, parse_terrain, parse_weapon, Args};
    use crate::console::{parse_command, Command};
    use crate::headless::{is_unattended, run_match};
    use crate::persistence::{delete_save, list_saves, load_from_file, save_to_file, SaveFile};

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("salvo").chain(extra.iter().copied())).unwrap()
    }

    fn computer_game() -> SavedGame {
        let config = SimConfig {
            players: crate::cli::default_computer_roster(),
            ..SimConfig::default()
        };
        SimulationEngine::with_clock(config, Arc::new(ManualClock::new()))
            .unwrap()
            .save()
    }

    // ---- Arguments ----

    #[test]
    fn test_parse_player_forms() {
        let named = parse_player("Ace:Hard").unwrap();
        assert_eq!(named.name, "Ace");
        assert_eq!(named.controller, Controller::Computer(Difficulty::Hard));

        let bare = parse_player("human").unwrap();
        assert_eq!(bare.name, "human");
        assert_eq!(bare.controller, Controller::Human);

        assert!(parse_player("Ace:genius").is_err());
        assert!(parse_player(":easy").is_err());
    }

    #[test]
    fn test_parse_weapon_is_forgiving() {
        assert_eq!(parse_weapon("baby nuke"), Ok(WeaponKind::BabyNuke));
        assert_eq!(parse_weapon("BabyNuke"), Ok(WeaponKind::BabyNuke));
        assert_eq!(parse_weapon("EARTH-MOVER"), Ok(WeaponKind::Earthmover));
        assert!(parse_weapon("laser").is_err());
        assert_eq!(parse_terrain("Jagged"), Ok(TerrainType::Jagged));
        assert!(parse_terrain("lunar").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = args(&["--players", "Ace:hard,easy", "--rounds", "5", "--no-wind", "--terrain", "flat"])
            .sim_config()
            .unwrap();
        assert_eq!(config.rounds, 5);
        assert!(!config.wind_enabled);
        assert_eq!(config.terrain_type, TerrainType::Flat);
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.players[0].name, "Ace");
        assert_eq!(config.players[0].color, COLOR_TABLE[0].id);
        assert_eq!(config.players[1].color, COLOR_TABLE[1].id);
        assert_eq!(config.players[1].controller, Controller::Computer(Difficulty::Easy));
    }

    #[test]
    fn test_roster_defaults_depend_on_mode() {
        let headless = args(&[]).sim_config().unwrap();
        assert!(headless.players.iter().all(|p| !p.controller.is_human()));

        let interactive = args(&["--interactive"]).sim_config().unwrap();
        assert_eq!(interactive.players, SimConfig::default().players);
    }

    #[test]
    fn test_roster_size_checked() {
        let roster = vec!["easy"; 9].join(",");
        assert!(args(&["--players", roster.as_str()]).sim_config().is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = std::env::temp_dir().join("salvo_test_config_file");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("match.json");
        fs::write(&path, r#"{"seed": 11, "rounds": 7, "starting_cash": 900}"#).unwrap();

        let config = args(&["--config", path.to_str().unwrap(), "--rounds", "2"]).sim_config().unwrap();
        assert_eq!(config.seed, 11);
        assert_eq!(config.rounds, 2);
        assert_eq!(config.starting_cash, 900);
        // A config file keeps its own (default) roster.
        assert_eq!(config.players, SimConfig::default().players);

        fs::write(&path, "{ not json").unwrap();
        assert!(args(&["--config", path.to_str().unwrap()]).sim_config().is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    // ---- Console ----

    #[test]
    fn test_parse_console_commands() {
        assert_eq!(
            parse_command("aim 45"),
            Ok(Command::Signal(InputSignal::AimTo { angle_deg: 45 }))
        );
        assert_eq!(
            parse_command("  power 1200 "),
            Ok(Command::Signal(InputSignal::SetPower { power: 1200 }))
        );
        assert_eq!(
            parse_command("buy baby nuke"),
            Ok(Command::Signal(InputSignal::Buy { weapon: WeaponKind::BabyNuke }))
        );
        assert_eq!(parse_command("FIRE"), Ok(Command::Signal(InputSignal::ConfirmOk)));
        assert_eq!(parse_command(""), Ok(Command::Status));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("aim high").is_err());
        assert!(parse_command("dance").is_err());
    }

    // ---- Persistence ----

    #[test]
    fn test_save_load_list_delete() {
        let dir = std::env::temp_dir().join("salvo_test_save_slots");
        let _ = fs::remove_dir_all(&dir);
        assert!(list_saves(&dir).is_empty());

        let game = computer_game();
        let mut early = SaveFile::new("early", 42, game.clone());
        early.timestamp = 1000;
        let mut late = SaveFile::new("late", 42, game);
        late.timestamp = 2000;
        save_to_file(&dir, "early", &early).unwrap();
        save_to_file(&dir, "late", &late).unwrap();
        fs::write(dir.join("junk.json"), "[]").unwrap();

        assert_eq!(load_from_file(&dir, "early").unwrap(), early);
        let listed: Vec<String> = list_saves(&dir).into_iter().map(|m| m.slot_name).collect();
        assert_eq!(listed, vec!["late", "early"]);

        delete_save(&dir, "early").unwrap();
        delete_save(&dir, "early").unwrap();
        assert!(load_from_file(&dir, "early").is_err());
        assert_eq!(list_saves(&dir).len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_loaded_slot_resumes() {
        let dir = std::env::temp_dir().join("salvo_test_resume_slot");
        let _ = fs::remove_dir_all(&dir);
        let game = computer_game();
        save_to_file(&dir, "slot", &SaveFile::new("slot", 42, game.clone())).unwrap();

        let file = load_from_file(&dir, "slot").unwrap();
        let engine =
            SimulationEngine::restore(file.game, SimConfig::default(), Arc::new(ManualClock::new())).unwrap();
        assert_eq!(engine.save(), game);
        let _ = fs::remove_dir_all(&dir);
    }

    // ---- Headless ----

    #[test]
    fn test_headless_confirms_final_leaderboard() {
        let mut game = computer_game();
        game.state = StateRecord {
            id: GameStateId::Leaderboard,
            power: None,
            weapon: None,
        };
        game.total_rounds = 1;
        let clock = ManualClock::new();
        let mut engine = SimulationEngine::restore(game, SimConfig::default(), Arc::new(clock.clone())).unwrap();
        assert!(is_unattended(&engine));

        let outcome = run_match(&mut engine, &clock, 10).unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.ticks, 1);
        assert!(engine.is_match_over());
    }

    #[test]
    fn test_headless_respects_budget() {
        let clock = ManualClock::new();
        let config = SimConfig {
            players: crate::cli::default_computer_roster(),
            ..SimConfig::default()
        };
        let mut engine = SimulationEngine::with_clock(config, Arc::new(clock.clone())).unwrap();
        let outcome = run_match(&mut engine, &clock, 3).unwrap();
        assert!(outcome.ticks <= 3);
        assert!(!outcome.finished);
    }
}
