#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use salvo_core::armory::Armory;
    use salvo_core::colors::{ColorId, COLOR_TABLE};
    use salvo_core::constants::*;
    use salvo_core::enums::{Controller, GameStateId, WeaponKind};
    use salvo_core::error::SalvoError;
    use salvo_core::player::{Player, PlayerSetup};
    use salvo_core::weapons::weapon_spec;
    use salvo_terrain::Terrain;

    use crate::clock::{Clock, ManualClock};
    use crate::cosmos::{Cosmos, PlayerInfo};
    use crate::damage::{blast_damage, resolve_explosion};
    use crate::explosion::Explosion;
    use crate::leaderboard::Leaderboard;
    use crate::machine::{charge_power, next_turn, Ballistics, GameState, HumanMove, NextTurn};
    use crate::projectile::{launch_velocity, Flight, Projectile, Trajectory};
    use crate::record::StateRecord;

    fn make_player(id: usize, name: &str, x: usize, y: f32) -> Player {
        let setup = PlayerSetup::new(name, COLOR_TABLE[id % COLOR_TABLE.len()].id, Controller::Human);
        let mut player = Player::new(id, &setup);
        player.place(x, y);
        player
    }

    // ---- Charging ----

    #[test]
    fn test_charge_power_endpoints() {
        assert_eq!(charge_power(0), 0);
        assert_eq!(charge_power(MAX_CHARGE_MILLIS / 2), MAX_POWER / 2);
        assert_eq!(charge_power(MAX_CHARGE_MILLIS), MAX_POWER);
        assert_eq!(charge_power(u64::MAX), MAX_POWER);
    }

    // ---- Clock ----

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(250);
        assert_eq!(other.now_millis(), 250);
        other.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    // ---- Flight ----

    #[test]
    fn test_launch_velocity_includes_wind() {
        let v = launch_velocity(0.0, 120, 0.5);
        assert!((v.x - 1.5).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
        let v = launch_velocity(std::f32::consts::FRAC_PI_2, 240, 0.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_shell_hits_rise() {
        let mut heights = vec![100.0; 300];
        heights[150] = 110.0;
        let terrain = Terrain::new(heights).unwrap();
        let mut shell = Projectile::launch(Vec2::new(70.0, 105.0), 0.0, 600, 0.0);
        let at = shell.fly_to_impact(&terrain);
        assert_eq!(at, Vec2::new(150.0, 105.0));
        assert_eq!(shell.samples(), 16);
    }

    #[test]
    fn test_leaving_field_collides_in_bounds() {
        let terrain = Terrain::flat(100, 10.0).unwrap();
        let mut shell = Projectile::launch(Vec2::new(90.0, 50.0), 0.0, 600, 0.0);
        assert_eq!(shell.step(&terrain), Flight::Flying);
        assert_eq!(shell.step(&terrain), Flight::Collided { at: Vec2::new(95.0, 50.0), timed_out: false });
    }

    #[test]
    fn test_sky_ceiling_collides() {
        let terrain = Terrain::flat(100, 10.0).unwrap();
        let mut shell = Projectile::launch(Vec2::new(50.0, 30.0), std::f32::consts::FRAC_PI_2, MAX_POWER, 0.0);
        let at = shell.fly_to_impact(&terrain);
        assert!(at.y <= SKY_CEILING);
        assert!(at.y > SKY_CEILING - 10.0);
    }

    #[test]
    fn test_still_shell_collides_immediately() {
        let terrain = Terrain::flat(100, 10.0).unwrap();
        let origin = Vec2::new(50.0, 40.0);
        let mut shell = Projectile::launch(origin, 1.0, 0, 0.0);
        assert_eq!(shell.step(&terrain), Flight::Collided { at: origin, timed_out: false });
    }

    #[test]
    fn test_sample_cap_forces_timeout() {
        let terrain = Terrain::flat(100, 10.0).unwrap();
        // Crawls upwards too slowly to reach the ceiling before the cap.
        let mut shell = Projectile::launch(Vec2::new(50.0, 30.0), std::f32::consts::FRAC_PI_2, 1, 0.0);
        let mut last = Flight::Flying;
        while last == Flight::Flying {
            last = shell.step(&terrain);
        }
        assert_eq!(shell.samples(), MAX_NUM_SAMPLES);
        assert!(matches!(last, Flight::Collided { timed_out: true, .. }));
    }

    #[test]
    fn test_trajectory_compaction() {
        let mut path = Trajectory::starting_at(Vec2::ZERO);
        path.record(Vec2::new(1.0, 0.0));
        path.record(Vec2::new(1.5, 0.0));
        assert_eq!(path.waypoints(), &[Vec2::ZERO]);
        assert_eq!(path.points(), vec![Vec2::ZERO, Vec2::new(1.5, 0.0)]);
        path.record(Vec2::new(2.0, 0.0));
        assert_eq!(path.waypoints(), &[Vec2::ZERO, Vec2::new(2.0, 0.0)]);
        assert_eq!(path.points().len(), 2, "no trailing duplicate of a committed point");
    }

    // ---- Explosion & damage ----

    #[test]
    fn test_explosion_timer() {
        let spec = weapon_spec(WeaponKind::Missile);
        let explosion = Explosion::new(Vec2::ZERO, WeaponKind::Missile, 100);
        assert!(!explosion.is_finished(100 + spec.explosion_millis - 1));
        assert!(explosion.is_finished(100 + spec.explosion_millis));
        assert_eq!(explosion.radius_at(100), 0.0);
        assert_eq!(explosion.radius_at(u64::MAX), spec.blast_radius);
    }

    #[test]
    fn test_blast_damage_falloff() {
        let spec = weapon_spec(WeaponKind::Nuke);
        assert_eq!(blast_damage(&spec, 0.0), spec.max_damage);
        assert_eq!(blast_damage(&spec, spec.blast_radius / 2.0), spec.max_damage / 2);
        assert_eq!(blast_damage(&spec, spec.blast_radius), 0);
        assert_eq!(blast_damage(&spec, spec.blast_radius * 3.0), 0);
        assert_eq!(blast_damage(&spec, f32::NAN), 0);
    }

    #[test]
    fn test_damage_before_crater_then_fall() {
        let mut terrain = Terrain::flat(100, 50.0).unwrap();
        let mut players = vec![make_player(0, "A", 50, 50.0), make_player(1, "B", 90, 50.0)];
        let report = resolve_explosion(&mut terrain, &mut players, Vec2::new(50.0, 50.0), WeaponKind::BabyMissile);

        // Full damage: measured at the pre-crater position.
        assert_eq!(players[0].life(), DEFAULT_STARTING_LIFE - weapon_spec(WeaponKind::BabyMissile).max_damage);
        assert_eq!(report.hits.len(), 1);
        // Then the tank drops into the fresh crater.
        assert_eq!(players[0].y(), 40.0);
        assert_eq!(players[0].y(), terrain.height(50).unwrap());
        assert_eq!(report.falls.len(), 1);
        assert_eq!(report.falls[0].from, 50.0);
        // Out of range: untouched.
        assert_eq!(players[1].life(), DEFAULT_STARTING_LIFE);
        assert_eq!(players[1].y(), 50.0);
    }

    #[test]
    fn test_dead_players_take_no_further_hits() {
        let mut terrain = Terrain::flat(100, 50.0).unwrap();
        let mut players = vec![make_player(0, "A", 50, 50.0)];
        let first = resolve_explosion(&mut terrain, &mut players, Vec2::new(50.0, 50.0), WeaponKind::Nuke);
        assert_eq!(first.kills().collect::<Vec<_>>(), vec![0]);
        let second = resolve_explosion(&mut terrain, &mut players, Vec2::new(50.0, 0.0), WeaponKind::Nuke);
        assert!(second.hits.is_empty());
    }

    // ---- Ledger ----

    #[test]
    fn test_spend_is_atomic() {
        let mut info = PlayerInfo::new(500);
        assert_eq!(
            info.spend_money(501),
            Err(SalvoError::InsufficientFunds { have: 500, need: 501 })
        );
        assert_eq!(info.cash(), 500);
        info.spend_money(500).unwrap();
        assert_eq!(info.cash(), 0);
    }

    #[test]
    fn test_earn_money() {
        let mut info = PlayerInfo::new(0);
        info.earn_money(700);
        assert_eq!((info.cash(), info.earnings()), (700, 700));
        info.earn_money(-1000);
        assert_eq!((info.cash(), info.earnings()), (700, -300));
    }

    #[test]
    fn test_buy_weapon() {
        let mut info = PlayerInfo::new(2500);
        assert!(info.can_buy_something());
        assert_eq!(info.buy_weapon(WeaponKind::Missile), Ok(1500));
        assert_eq!(info.armory().count(WeaponKind::Missile), salvo_core::armory::Ammo::Finite(1));
        assert_eq!(
            info.buy_weapon(WeaponKind::BabyNuke),
            Err(SalvoError::InsufficientFunds { have: 1500, need: 2500 })
        );
        assert_eq!(info.buy_weapon(WeaponKind::BabyMissile), Err(SalvoError::NotForSale(WeaponKind::BabyMissile)));
        assert_eq!(info.cash(), 1500);
        info.spend_money(600).unwrap();
        assert!(!info.can_buy_something());
    }

    #[test]
    fn test_cosmos_rounds_and_indexing() {
        let mut cosmos = Cosmos::new(2, 100, 2);
        assert_eq!(cosmos.round(), 1);
        assert!(cosmos.has_more_rounds());
        cosmos.advance_round();
        assert!(!cosmos.has_more_rounds());
        assert_eq!(cosmos.info(2), Err(SalvoError::PlayerIndex { index: 2, len: 2 }));
    }

    // ---- Leaderboard ----

    fn board(entries: &[(&str, i64)]) -> Leaderboard {
        let players: Vec<Player> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| make_player(i, name, 0, 0.0))
            .collect();
        let infos = entries
            .iter()
            .map(|(_, earnings)| PlayerInfo::from_parts(0, *earnings, Armory::default()))
            .collect();
        Leaderboard::build(&Cosmos::from_parts(1, 1, infos), &players).unwrap()
    }

    #[test]
    fn test_leaderboard_order_and_single_winner() {
        let lb = board(&[("Zed", 100), ("Amy", 300), ("Bob", 100)]);
        let names: Vec<&str> = lb.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed", "Bob"]);
        assert!(!lb.tie_for_winner());
        assert_eq!(lb.winner_text().unwrap(), "Amy");
        assert_eq!(lb.winner_color(), COLOR_TABLE[1].rgb);
    }

    #[test]
    fn test_leaderboard_ties() {
        let lb = board(&[("Cat", 50), ("Ann", 50), ("Bea", 50), ("Dan", 10)]);
        assert!(lb.tie_for_winner());
        assert_eq!(lb.winner_text().unwrap(), "Cat, Bea and Ann");
        assert_eq!(lb.winner_color(), WHITE);
        let two = board(&[("Alice", 5), ("Bob", 5)]);
        assert_eq!(two.winner_text().unwrap(), "Bob and Alice");
    }

    #[test]
    fn test_leaderboard_same_name_ranks_later_color_first() {
        let lb = board(&[("Tank", 70), ("Tank", 70), ("Tank", 70)]);
        let colors: Vec<ColorId> = lb.entries().iter().map(|e| e.color).collect();
        assert_eq!(colors, vec![COLOR_TABLE[2].id, COLOR_TABLE[1].id, COLOR_TABLE[0].id]);
        let players: Vec<usize> = lb.entries().iter().map(|e| e.player).collect();
        assert_eq!(players, vec![2, 1, 0]);
    }

    #[test]
    fn test_empty_leaderboard_is_invariant_error() {
        let lb = Leaderboard::default();
        assert_eq!(lb.winner_text(), Err(SalvoError::NoPlayers));
        assert_eq!(lb.winner_color(), WHITE);
        let mismatch = Leaderboard::build(&Cosmos::new(1, 0, 1), &[]);
        assert_eq!(mismatch, Err(SalvoError::PlayerCountMismatch { expected: 0, found: 1 }));
    }

    // ---- Turn order ----

    #[test]
    fn test_next_turn_cycles_and_skips_dead() {
        let mut players = vec![
            make_player(0, "A", 10, 0.0),
            make_player(1, "B", 20, 0.0),
            make_player(2, "C", 30, 0.0),
        ];
        assert_eq!(next_turn(&players, None), NextTurn::Player(0));
        assert_eq!(next_turn(&players, Some(0)), NextTurn::Player(1));
        assert_eq!(next_turn(&players, Some(2)), NextTurn::Player(0));
        players[1].take_damage(1000);
        assert_eq!(next_turn(&players, Some(0)), NextTurn::Player(2));
        // Idempotent.
        assert_eq!(next_turn(&players, Some(0)), next_turn(&players, Some(0)));
    }

    #[test]
    fn test_next_turn_decides_round() {
        let mut players = vec![make_player(0, "A", 10, 0.0), make_player(1, "B", 20, 0.0)];
        players[0].take_damage(1000);
        assert_eq!(next_turn(&players, Some(0)), NextTurn::Won(1));
        assert_eq!(next_turn(&players, Some(0)), NextTurn::Won(1));
        players[1].take_damage(1000);
        assert_eq!(next_turn(&players, Some(1)), NextTurn::Draw);
    }

    // ---- States ----

    #[test]
    fn test_state_delays() {
        assert_eq!(GameState::Leaderboard { confirmed: false }.delay(), DELAY_BLOCK);
        assert_eq!(GameState::Leaderboard { confirmed: true }.delay(), DELAY_ANIMATE);
        assert_eq!(GameState::BuyWeapons { buyer: Some(0) }.delay(), DELAY_BLOCK);
        assert_eq!(GameState::TurnStart.delay(), DELAY_ANIMATE);
        assert_eq!(GameState::HumanMove(HumanMove::default()).delay(), DELAY_BLOCK);
        let charging = HumanMove {
            press_millis: Some(0),
            ..HumanMove::default()
        };
        assert_eq!(GameState::HumanMove(charging).delay(), DELAY_ANIMATE);
        assert_eq!(
            GameState::Ballistics(Ballistics::new(10, WeaponKind::Nuke)).delay(),
            DELAY_ANIMATE
        );
    }

    #[test]
    fn test_state_record_capture() {
        let record = StateRecord::capture(&GameState::Ballistics(Ballistics::new(640, WeaponKind::BabyNuke)));
        assert_eq!(record.id, GameStateId::Ballistics);
        assert_eq!(record.power, Some(640));
        assert_eq!(record.weapon, Some(WeaponKind::BabyNuke));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":20,"power":640,"weapon":"BabyNuke"}"#);
        let record = StateRecord::capture(&GameState::TurnStart);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"id":10}"#);
    }

    proptest! {
        #[test]
        fn prop_charge_power_monotone(a in 0u64..10_000, b in 0u64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(charge_power(lo) <= charge_power(hi));
            prop_assert!(charge_power(hi) <= MAX_POWER);
            if hi >= MAX_CHARGE_MILLIS {
                prop_assert_eq!(charge_power(hi), MAX_POWER);
            }
        }

        #[test]
        fn prop_trajectory_waypoints_spaced(
            angle in 0.0f32..std::f32::consts::PI,
            power in 1u32..=MAX_POWER,
            wind in -1.0f32..1.0,
        ) {
            let terrain = Terrain::new((0..400).map(|x| 40.0 + (x as f32 / 20.0).sin() * 30.0).collect()).unwrap();
            let mut shell = Projectile::launch(Vec2::new(200.0, 90.0), angle, power, wind);
            shell.fly_to_impact(&terrain);
            let waypoints = shell.trajectory().waypoints();
            prop_assert!(waypoints.len() as u32 <= shell.samples() + 1);
            for pair in waypoints.windows(2) {
                let d = pair[1] - pair[0];
                let dist_sq = d.x * d.x + (d.y * TRAJECTORY_Y_SCALE).powi(2);
                prop_assert!(dist_sq >= MIN_WAYPOINT_DIST_SQUARED);
            }
        }

        #[test]
        fn prop_closer_takes_no_less_damage(
            near in 0.0f32..150.0,
            extra in 0.001f32..150.0,
            kind in prop::sample::select(WeaponKind::ALL.to_vec()),
        ) {
            let spec = weapon_spec(kind);
            let far = near + extra;
            prop_assert!(blast_damage(&spec, near) >= blast_damage(&spec, far));
            if far >= spec.blast_radius {
                prop_assert_eq!(blast_damage(&spec, far), 0);
            }
        }
    }
}
