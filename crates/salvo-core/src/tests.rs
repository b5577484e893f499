#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use crate::armory::{Ammo, Armory};
    use crate::colors::{with_alpha, ColorId, COLOR_TABLE};
    use crate::commands::InputSignal;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::SalvoError;
    use crate::player::{Player, PlayerSetup};
    use crate::weapons::{minimum_weapon_cost, weapon_spec};

    fn make_player() -> Player {
        let mut player = Player::new(0, &PlayerSetup::new("Red", ColorId::Red, Controller::Human));
        player.place(100, 50.0);
        player
    }

    // ---- Enums ----

    #[test]
    fn test_weapon_cycle_wraps() {
        assert_eq!(WeaponKind::Earthmover.next(), WeaponKind::BabyMissile);
        assert_eq!(WeaponKind::BabyMissile.prev(), WeaponKind::Earthmover);
        let mut kind = WeaponKind::Missile;
        for _ in 0..WeaponKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, WeaponKind::Missile);
    }

    #[test]
    fn test_game_state_id_serde() {
        let ids = vec![
            GameStateId::Leaderboard,
            GameStateId::BuyWeapons,
            GameStateId::TurnStart,
            GameStateId::HumanMove,
            GameStateId::ComputerMove,
            GameStateId::Ballistics,
        ];
        for id in ids {
            let json = serde_json::to_string(&id).unwrap();
            let back: GameStateId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, back);
        }
        assert_eq!(serde_json::to_string(&GameStateId::Ballistics).unwrap(), "20");
    }

    #[test]
    fn test_unknown_state_id_rejected() {
        assert_eq!(GameStateId::try_from(7), Err(SalvoError::UnknownStateId(7)));
        assert!(serde_json::from_str::<GameStateId>("99").is_err());
        assert!(SalvoError::UnknownStateId(7).is_invariant_violation());
    }

    #[test]
    fn test_input_signal_serde() {
        let signals = vec![
            InputSignal::PressFire,
            InputSignal::ReleaseFire,
            InputSignal::AimTo { angle_deg: 45 },
            InputSignal::SetPower { power: 700 },
            InputSignal::Buy {
                weapon: WeaponKind::Nuke,
            },
        ];
        for signal in &signals {
            let json = serde_json::to_string(signal).unwrap();
            let back: InputSignal = serde_json::from_str(&json).unwrap();
            assert_eq!(*signal, back);
        }
    }

    // ---- Armory ----

    #[test]
    fn test_default_armory() {
        let armory = Armory::default();
        assert!(armory.is_unlimited(WeaponKind::BabyMissile));
        for kind in &WeaponKind::ALL[1..] {
            assert_eq!(armory.count(*kind), Ammo::Finite(0));
        }
    }

    #[test]
    fn test_cycling_ignores_counts() {
        let armory = Armory::default();
        assert_eq!(armory.next_weapon(WeaponKind::BabyMissile), WeaponKind::Missile);
        assert_eq!(armory.prev_weapon(WeaponKind::BabyMissile), WeaponKind::Earthmover);
    }

    #[test]
    fn test_unlimited_never_decrements() {
        let mut armory = Armory::default();
        for _ in 0..100 {
            assert_eq!(armory.use_weapon(WeaponKind::BabyMissile), Ok(WeaponKind::BabyMissile));
        }
        assert!(armory.is_unlimited(WeaponKind::BabyMissile));
    }

    #[test]
    fn test_last_copy_then_rejected() {
        let mut armory = Armory::from_counts([(WeaponKind::Nuke, Ammo::Finite(1))]);
        armory.use_weapon(WeaponKind::Nuke).unwrap();
        assert_eq!(armory.count(WeaponKind::Nuke), Ammo::Finite(0));

        let before = armory.clone();
        assert_eq!(armory.use_weapon(WeaponKind::Nuke), Err(SalvoError::OutOfAmmo(WeaponKind::Nuke)));
        assert_eq!(armory, before, "refused fire must not mutate");
    }

    #[test]
    fn test_exhausted_weapon_advances_forward() {
        let mut armory = Armory::default();
        armory.add(WeaponKind::Missile, 1);
        armory.add(WeaponKind::Earthmover, 2);
        // Missile -> BabyNuke (empty) -> Nuke (empty) -> Earthmover.
        assert_eq!(armory.use_weapon(WeaponKind::Missile), Ok(WeaponKind::Earthmover));
    }

    #[test]
    fn test_exhausted_weapon_wraps_to_unlimited() {
        let mut armory = Armory::default();
        armory.add(WeaponKind::Earthmover, 1);
        assert_eq!(armory.use_weapon(WeaponKind::Earthmover), Ok(WeaponKind::BabyMissile));
    }

    #[test]
    fn test_exhausted_weapon_stays_when_nothing_left() {
        let mut armory = Armory::from_counts([(WeaponKind::Missile, Ammo::Finite(1))]);
        assert_eq!(armory.use_weapon(WeaponKind::Missile), Ok(WeaponKind::Missile));
    }

    #[test]
    fn test_non_final_use_keeps_selection() {
        let mut armory = Armory::default();
        armory.add(WeaponKind::BabyNuke, 3);
        assert_eq!(armory.use_weapon(WeaponKind::BabyNuke), Ok(WeaponKind::BabyNuke));
        assert_eq!(armory.count(WeaponKind::BabyNuke), Ammo::Finite(2));
    }

    #[test]
    fn test_armory_serde() {
        let mut armory = Armory::default();
        armory.add(WeaponKind::Nuke, 2);
        let json = serde_json::to_string(&armory).unwrap();
        let back: Armory = serde_json::from_str(&json).unwrap();
        assert_eq!(armory, back);
    }

    // ---- Player ----

    #[test]
    fn test_angle_clamped() {
        let mut player = make_player();
        player.set_angle_deg(-30);
        assert_eq!(player.angle_deg(), MIN_TURRET_ANGLE);
        player.set_angle_deg(500);
        assert_eq!(player.angle_deg(), MAX_TURRET_ANGLE);
        assert!((player.angle_rad() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut player = make_player();
        assert!(!player.take_damage(30));
        assert_eq!(player.life(), 70);
        assert!(player.take_damage(500));
        assert_eq!(player.life(), 0);
        assert!(!player.is_alive());
        // Already dead: no second kill.
        assert!(!player.take_damage(10));
    }

    #[test]
    fn test_aim_at() {
        let mut player = make_player();
        let center = player.turret_center();
        assert!(player.aim_at(center + Vec2::new(10.0, 10.0)));
        assert_eq!(player.angle_deg(), 45);
        player.aim_at(center + Vec2::new(-10.0, -3.0));
        assert_eq!(player.angle_deg(), MAX_TURRET_ANGLE);
        player.aim_at(center + Vec2::new(10.0, -3.0));
        assert_eq!(player.angle_deg(), MIN_TURRET_ANGLE);
        assert!(!player.aim_at(center + Vec2::new(10.0, -1.0)));
    }

    #[test]
    fn test_turret_tip_straight_up() {
        let player = make_player();
        let tip = player.turret_tip();
        assert!((tip.x - 100.0).abs() < 1e-4);
        assert!((tip.y - (50.0 + TURRET_CENTER_OFFSET + TURRET_LENGTH)).abs() < 1e-4);
    }

    #[test]
    fn test_fall_only_downwards() {
        let mut player = make_player();
        assert!(!player.fall_to(60.0));
        assert_eq!(player.y(), 50.0);
        assert!(player.fall_to(20.0));
        assert_eq!(player.y(), 20.0);
    }

    #[test]
    fn test_setup_life_and_name() {
        let mut setup = PlayerSetup::new("A very long player name", ColorId::Blue, Controller::Human);
        setup.starting_life_percent = 10;
        assert_eq!(setup.starting_life(), MIN_STARTING_LIFE);
        setup.starting_life_percent = 75;
        assert_eq!(setup.starting_life(), 75);
        setup.starting_life_percent = 1000;
        assert_eq!(setup.starting_life(), MAX_LIFE);
        setup.starting_life_percent = 50_000_000;
        assert_eq!(setup.starting_life(), MAX_LIFE);
        setup.starting_life_percent = u32::MAX;
        assert_eq!(setup.starting_life(), MAX_LIFE);

        let player = Player::new(3, &setup);
        assert_eq!(player.name.chars().count(), MAX_NAME_LENGTH);
        assert_eq!(player.introduction(), "A very long pl's turn");
    }

    // ---- Tables ----

    #[test]
    fn test_color_table_order() {
        for (i, entry) in COLOR_TABLE.iter().enumerate() {
            assert_eq!(entry.id as usize, i);
        }
        assert_eq!(ColorId::Cyan.display_name(), "cyan");
        assert_eq!(with_alpha(ColorId::Red.rgb(), 0x80), 0x80ef_2929);
    }

    #[test]
    fn test_minimum_weapon_cost_skips_free() {
        assert_eq!(weapon_spec(WeaponKind::BabyMissile).cost, 0);
        assert_eq!(minimum_weapon_cost(), weapon_spec(WeaponKind::Missile).cost);
    }

    proptest! {
        #[test]
        fn prop_angle_cache_matches_degrees(angle in -1000i32..1000) {
            let mut player = make_player();
            player.set_angle_deg(angle);
            let deg = player.angle_deg();
            prop_assert!((MIN_TURRET_ANGLE..=MAX_TURRET_ANGLE).contains(&deg));
            prop_assert!((player.angle_rad() - (deg as f32).to_radians()).abs() < 1e-6);
        }
    }
}
