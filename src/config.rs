/// Tunable game constants.
///
/// Every value has a default matching the stock game, so a JSON file only
/// needs to list the fields it overrides.  Call [`GameConfig::validate`]
/// (done by every constructor) before building a fight.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{Aabb, Vector2};

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub damage: u32,
    /// `[width, height]`
    pub hitbox: [f32; 2],
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 750.0,
            damage: 1,
            hitbox: [8.0, 8.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Hitbox centre at spawn.
    pub position: Vector2,
    pub hitbox: [f32; 2],
    pub hitpoints: u32,
    pub speed: f32,
    pub shoot_cooldown: f32,
    /// `[min_y, max_y]`
    pub y_range: [f32; 2],
    pub projectile: ProjectileConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: Vector2::new(100.0, 360.0),
            hitbox: [20.0, 20.0],
            hitpoints: 5,
            speed: 200.0,
            shoot_cooldown: 0.5,
            y_range: [0.0, 720.0],
            projectile: ProjectileConfig::default(),
        }
    }
}

/// One row of the boss attack-phase table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub projectiles_per_wave: usize,
    pub shoot_cooldown: f32,
    /// Percent, 0–100.
    pub powerup_drop_chance: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub top_left: Vector2,
    pub hitbox: [f32; 2],
    pub hitpoints: u32,
    pub y_range: [f32; 2],
    /// Number of evenly spaced spawn points along the boss's left edge.
    pub origin_count: usize,
    pub projectile: ProjectileConfig,
    /// Phases 1, 2 and 3 in order.
    pub phases: [PhaseConfig; 3],
    /// Health ratios below which phase 2 and phase 3 begin.
    pub phase_thresholds: [f32; 2],
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            top_left: Vector2::new(980.0, 120.0),
            hitbox: [300.0, 600.0],
            hitpoints: 100,
            y_range: [0.0, 720.0],
            origin_count: 8,
            projectile: ProjectileConfig {
                speed: 400.0,
                ..ProjectileConfig::default()
            },
            phases: [
                PhaseConfig {
                    projectiles_per_wave: 5,
                    shoot_cooldown: 2.0,
                    powerup_drop_chance: 10,
                },
                PhaseConfig {
                    projectiles_per_wave: 6,
                    shoot_cooldown: 1.5,
                    powerup_drop_chance: 30,
                },
                PhaseConfig {
                    projectiles_per_wave: 7,
                    shoot_cooldown: 1.0,
                    powerup_drop_chance: 50,
                },
            ],
            phase_thresholds: [0.66, 0.33],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub speed: f32,
    pub hitbox: [f32; 2],
    pub heal_duration: f32,
    pub speed_boost_duration: f32,
    pub fire_rate_duration: f32,
    pub heal_amount: u32,
    pub speed_multiplier: f32,
    pub cooldown_multiplier: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            speed: 150.0,
            hitbox: [16.0, 16.0],
            heal_duration: 1.0,
            speed_boost_duration: 5.0,
            fire_rate_duration: 5.0,
            heal_amount: 1,
            speed_multiplier: 1.5,
            cooldown_multiplier: 0.5,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub frames_per_second: u32,
    /// Seconds on the countdown timer at the start of each fight.
    pub fight_duration: f32,
    /// Seconds an impact marker stays visible.
    pub impact_lifetime: f32,
    pub player: PlayerConfig,
    pub boss: BossConfig,
    pub powerups: PowerUpConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            frames_per_second: 24,
            fight_duration: 90.0,
            impact_lifetime: 0.25,
            player: PlayerConfig::default(),
            boss: BossConfig::default(),
            powerups: PowerUpConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn corridor(who: &'static str, y_range: [f32; 2], hitbox: &Aabb) -> Result<(), ConfigError> {
    let [min, max] = y_range;
    if max - min < hitbox.height {
        return Err(ConfigError::EmptyCorridor { who, min, max });
    }
    if !hitbox.within_vertical(min, max) {
        return Err(ConfigError::OutsideCorridor { who });
    }
    Ok(())
}

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Seconds per frame at the configured frame rate.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.frames_per_second.max(1) as f32
    }

    pub fn arena_box(&self) -> Aabb {
        Aabb::from_top_left(Vector2::default(), self.arena.width, self.arena.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("frames_per_second", self.frames_per_second as f32)?;
        positive("fight_duration", self.fight_duration)?;
        non_negative("impact_lifetime", self.impact_lifetime)?;

        let p = &self.player;
        if p.hitpoints == 0 {
            return Err(ConfigError::ZeroHitpoints { who: "player" });
        }
        positive("player.hitbox.width", p.hitbox[0])?;
        positive("player.hitbox.height", p.hitbox[1])?;
        non_negative("player.speed", p.speed)?;
        positive("player.shoot_cooldown", p.shoot_cooldown)?;
        let player_box = Aabb::new(p.position, p.hitbox[0], p.hitbox[1]);
        corridor("player", p.y_range, &player_box)?;
        validate_projectile("player", &p.projectile)?;

        let b = &self.boss;
        if b.hitpoints == 0 {
            return Err(ConfigError::ZeroHitpoints { who: "boss" });
        }
        positive("boss.hitbox.width", b.hitbox[0])?;
        positive("boss.hitbox.height", b.hitbox[1])?;
        let boss_box = Aabb::from_top_left(b.top_left, b.hitbox[0], b.hitbox[1]);
        corridor("boss", b.y_range, &boss_box)?;
        validate_projectile("boss", &b.projectile)?;
        if b.origin_count == 0 {
            return Err(ConfigError::NoOrigins);
        }
        for (i, phase) in b.phases.iter().enumerate() {
            let number = i as u8 + 1;
            if phase.projectiles_per_wave == 0 || phase.projectiles_per_wave > b.origin_count {
                return Err(ConfigError::WaveSize {
                    phase: number,
                    wave: phase.projectiles_per_wave,
                    origins: b.origin_count,
                });
            }
            positive("boss.phases.shoot_cooldown", phase.shoot_cooldown)?;
            if phase.powerup_drop_chance > 100 {
                return Err(ConfigError::DropChance {
                    phase: number,
                    chance: phase.powerup_drop_chance,
                });
            }
        }
        let [high, low] = b.phase_thresholds;
        if !(high < 1.0 && high > low && low > 0.0) {
            return Err(ConfigError::Thresholds { high, low });
        }

        let u = &self.powerups;
        positive("powerups.speed", u.speed)?;
        positive("powerups.hitbox.width", u.hitbox[0])?;
        positive("powerups.hitbox.height", u.hitbox[1])?;
        positive("powerups.heal_duration", u.heal_duration)?;
        positive("powerups.speed_boost_duration", u.speed_boost_duration)?;
        positive("powerups.fire_rate_duration", u.fire_rate_duration)?;
        positive("powerups.speed_multiplier", u.speed_multiplier)?;
        positive("powerups.cooldown_multiplier", u.cooldown_multiplier)?;
        Ok(())
    }
}

fn validate_projectile(who: &'static str, projectile: &ProjectileConfig) -> Result<(), ConfigError> {
    if projectile.damage == 0 {
        return Err(ConfigError::ZeroDamage { who });
    }
    positive("projectile.speed", projectile.speed)?;
    positive("projectile.hitbox.width", projectile.hitbox[0])?;
    positive("projectile.hitbox.height", projectile.hitbox[1])?;
    Ok(())
}
