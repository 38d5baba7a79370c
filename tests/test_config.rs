use approx::assert_relative_eq;

use shooting_stars::compute::init_boss;
use shooting_stars::config::*;
use shooting_stars::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_relative_eq!(config.frame_time(), 1.0 / 24.0);
    assert_eq!(config.arena_box().right(), 1280.0);
    assert_eq!(config.arena_box().bottom(), 720.0);
}

#[test]
fn default_phase_table() {
    let phases = GameConfig::default().boss.phases;
    let waves: Vec<_> = phases.iter().map(|p| p.projectiles_per_wave).collect();
    let drops: Vec<_> = phases.iter().map(|p| p.powerup_drop_chance).collect();
    assert_eq!(waves, vec![5, 6, 7]);
    assert_eq!(drops, vec![10, 30, 50]);
    assert_eq!(phases[0].shoot_cooldown, 2.0);
    assert_eq!(phases[2].shoot_cooldown, 1.0);
}

#[test]
fn json_overrides_only_listed_fields() {
    let config = GameConfig::from_json_str(
        r#"{ "fight_duration": 30.0, "boss": { "hitpoints": 50 } }"#,
    )
    .unwrap();
    assert_eq!(config.fight_duration, 30.0);
    assert_eq!(config.boss.hitpoints, 50);
    assert_eq!(config.boss.origin_count, 8);
    assert_eq!(config.player, PlayerConfig::default());
}

#[test]
fn json_can_replace_the_phase_table() {
    let config = GameConfig::from_json_str(
        r#"{ "boss": { "phases": [
            { "projectiles_per_wave": 4, "shoot_cooldown": 2.0, "powerup_drop_chance": 10 },
            { "projectiles_per_wave": 5, "shoot_cooldown": 2.0, "powerup_drop_chance": 30 },
            { "projectiles_per_wave": 6, "shoot_cooldown": 1.0, "powerup_drop_chance": 50 }
        ] } }"#,
    )
    .unwrap();
    assert_eq!(config.boss.phases[0].projectiles_per_wave, 4);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn zero_boss_hitpoints_rejected() {
    let mut config = GameConfig::default();
    config.boss.hitpoints = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroHitpoints { who: "boss" })
    ));
    assert!(init_boss(&config).is_err());
}

#[test]
fn empty_origin_set_rejected() {
    let mut config = GameConfig::default();
    config.boss.origin_count = 0;
    assert!(matches!(config.validate(), Err(ConfigError::NoOrigins)));
}

#[test]
fn wave_larger_than_origins_rejected() {
    let mut config = GameConfig::default();
    config.boss.phases[2].projectiles_per_wave = 9;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::WaveSize { phase: 3, wave: 9, origins: 8 })
    ));
}

#[test]
fn drop_chance_above_hundred_rejected() {
    let mut config = GameConfig::default();
    config.boss.phases[1].powerup_drop_chance = 101;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::DropChance { phase: 2, chance: 101 })
    ));
}

#[test]
fn non_positive_cooldown_rejected() {
    let mut config = GameConfig::default();
    config.player.shoot_cooldown = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { field: "player.shoot_cooldown", .. })
    ));
}

#[test]
fn inverted_thresholds_rejected() {
    let mut config = GameConfig::default();
    config.boss.phase_thresholds = [0.33, 0.66];
    assert!(matches!(config.validate(), Err(ConfigError::Thresholds { .. })));
}

#[test]
fn player_outside_corridor_rejected() {
    let mut config = GameConfig::default();
    config.player.y_range = [400.0, 720.0];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutsideCorridor { who: "player" })
    ));
}

#[test]
fn corridor_narrower_than_hitbox_rejected() {
    let mut config = GameConfig::default();
    config.player.y_range = [355.0, 365.0];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyCorridor { who: "player", .. })
    ));
}

#[test]
fn zero_damage_rejected() {
    let mut config = GameConfig::default();
    config.boss.projectile.damage = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroDamage { who: "boss" })
    ));
}

#[test]
fn errors_render_readably() {
    let err = ConfigError::WaveSize { phase: 1, wave: 9, origins: 8 };
    assert_eq!(
        err.to_string(),
        "phase 1: wave of 9 needs between 1 and 8 distinct origins"
    );
}

#[test]
fn zero_projectile_speed_rejected() {
    let mut config = GameConfig::default();
    config.boss.projectile.speed = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { field: "projectile.speed", .. })
    ));
}

#[test]
fn zero_powerup_speed_rejected() {
    let mut config = GameConfig::default();
    config.powerups.speed = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { field: "powerups.speed", .. })
    ));
}
