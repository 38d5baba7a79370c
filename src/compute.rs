/// Pure per-entity logic.
///
/// Every public function takes an immutable reference to an entity and
/// returns a brand-new value.  The player and the boss share one
/// [`Character`] record and the same movement / cooldown step; they differ
/// only in the coefficients passed to it.

use log::{debug, info};

use crate::config::{GameConfig, PowerUpConfig, ProjectileConfig};
use crate::entities::{
    AttackPhase, Boss, Character, Direction, MovingEntity, Player, PowerUp, PowerUpEffects,
    PowerUpKind, Projectile,
};
use crate::error::ConfigError;
use crate::geometry::{Aabb, Vector2};

// ── Moving entities ──────────────────────────────────────────────────────────

/// Partial overlap with the arena counts as on-screen.
pub fn is_onscreen(body: &MovingEntity, arena: &Aabb) -> bool {
    arena.intersects(&body.hitbox)
}

/// Refresh `onscreen`, then translate horizontally if still visible.
/// An off-screen body stays where it is; callers cull it.
pub fn advance(body: &MovingEntity, dt: f32, arena: &Aabb) -> MovingEntity {
    let onscreen = is_onscreen(body, arena);
    if !onscreen {
        return MovingEntity {
            onscreen,
            ..body.clone()
        };
    }
    let position = Vector2::new(
        body.position.x + body.speed * body.direction * dt,
        body.position.y,
    );
    MovingEntity {
        position,
        hitbox: body.hitbox.centered_at(position),
        onscreen,
        ..body.clone()
    }
}

pub fn check_hit(body: &MovingEntity, target: &Aabb) -> bool {
    body.hitbox.intersects(target)
}

fn spawn_body(origin: Vector2, size: [f32; 2], speed: f32, direction: f32) -> MovingEntity {
    MovingEntity {
        position: origin,
        hitbox: Aabb::new(origin, size[0], size[1]),
        speed,
        direction,
        onscreen: true,
    }
}

pub fn spawn_projectile(origin: Vector2, direction: f32, shot: &ProjectileConfig) -> Projectile {
    Projectile {
        body: spawn_body(origin, shot.hitbox, shot.speed, direction),
        damage: shot.damage,
    }
}

/// Power-ups always drift toward the player (leftward).
pub fn spawn_powerup(origin: Vector2, kind: PowerUpKind, drop: &PowerUpConfig) -> PowerUp {
    let duration = match kind {
        PowerUpKind::Heal => drop.heal_duration,
        PowerUpKind::SpeedBoost => drop.speed_boost_duration,
        PowerUpKind::FireRateBoost => drop.fire_rate_duration,
    };
    PowerUp {
        body: spawn_body(origin, drop.hitbox, drop.speed, -1.0),
        kind,
        duration,
    }
}

// ── Characters ───────────────────────────────────────────────────────────────

pub fn can_shoot(character: &Character, cooldown: f32) -> bool {
    character.time_since_last_shoot >= cooldown
}

pub fn apply_damage(character: &Character, damage: u32) -> Character {
    Character {
        hitpoints: character.hitpoints.saturating_sub(damage),
        ..character.clone()
    }
}

pub fn reset_shoot_timer(character: &Character) -> Character {
    Character {
        time_since_last_shoot: 0.0,
        ..character.clone()
    }
}

/// Shared character step: clamp hit points, charge the shoot timer up to
/// `cooldown`, and move vertically.  A move whose hitbox would leave
/// `y_range` is rejected outright; the position is left untouched.
pub fn advance_character(
    character: &Character,
    dt: f32,
    direction: Direction,
    speed: f32,
    cooldown: f32,
) -> Character {
    let hitpoints = character.hitpoints.min(character.max_hitpoints);

    // Also pulls the timer down when the effective cooldown just shrank.
    let time_since_last_shoot = (character.time_since_last_shoot + dt).min(cooldown);

    let candidate = Vector2::new(
        character.position.x,
        character.position.y + direction.sign() * speed * dt,
    );
    let candidate_box = character.hitbox.centered_at(candidate);
    let (min_y, max_y) = character.y_range;
    let (position, hitbox) = if candidate_box.within_vertical(min_y, max_y) {
        (candidate, candidate_box)
    } else {
        (character.position, character.hitbox)
    };

    Character {
        position,
        hitbox,
        hitpoints,
        time_since_last_shoot,
        ..character.clone()
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn init_player(config: &GameConfig) -> Result<Player, ConfigError> {
    config.validate()?;
    let p = &config.player;
    Ok(Player {
        character: Character {
            position: p.position,
            hitbox: Aabb::new(p.position, p.hitbox[0], p.hitbox[1]),
            hitpoints: p.hitpoints,
            max_hitpoints: p.hitpoints,
            speed: p.speed,
            time_since_last_shoot: 0.0,
            shoot_cooldown_time: p.shoot_cooldown,
            y_range: (p.y_range[0], p.y_range[1]),
        },
        active_powerup: None,
        powerup_remaining: 0.0,
        effects: PowerUpEffects {
            heal_amount: config.powerups.heal_amount,
            speed_multiplier: config.powerups.speed_multiplier,
            cooldown_multiplier: config.powerups.cooldown_multiplier,
        },
    })
}

fn boosted(player: &Player, kind: PowerUpKind) -> bool {
    player.active_powerup == Some(kind) && player.powerup_remaining > 0.0
}

pub fn effective_speed(player: &Player) -> f32 {
    if boosted(player, PowerUpKind::SpeedBoost) {
        player.character.speed * player.effects.speed_multiplier
    } else {
        player.character.speed
    }
}

pub fn effective_cooldown(player: &Player) -> f32 {
    if boosted(player, PowerUpKind::FireRateBoost) {
        player.character.shoot_cooldown_time * player.effects.cooldown_multiplier
    } else {
        player.character.shoot_cooldown_time
    }
}

pub fn player_can_shoot(player: &Player) -> bool {
    can_shoot(&player.character, effective_cooldown(player))
}

/// Start a power-up.  A player already holding one is returned unchanged.
pub fn grant_powerup(player: &Player, kind: PowerUpKind, duration: f32) -> Player {
    if player.active_powerup.is_some() {
        return player.clone();
    }
    debug!("player collected {:?} for {:.2}s", kind, duration);
    Player {
        active_powerup: Some(kind),
        powerup_remaining: duration,
        ..player.clone()
    }
}

/// Resolve the active power-up, then run the shared character step with the
/// resulting effective speed and cooldown.
pub fn update_player(player: &Player, dt: f32, direction: Direction) -> Player {
    let speed = effective_speed(player);
    let cooldown = effective_cooldown(player);
    let mut character = player.character.clone();
    let mut active = player.active_powerup;
    let mut remaining = player.powerup_remaining;

    if let Some(kind) = active {
        if remaining > 0.0 {
            if kind == PowerUpKind::Heal {
                // Clamped back to max by the character step below.
                character.hitpoints = character
                    .hitpoints
                    .saturating_add(player.effects.heal_amount);
                debug!("heal applied, hitpoints now {}", character.hitpoints);
                remaining = 0.0;
            } else {
                remaining -= dt;
            }
        }
        if remaining <= 0.0 {
            if kind != PowerUpKind::Heal {
                debug!("{:?} expired", kind);
            }
            active = None;
            remaining = 0.0;
        }
    }

    Player {
        character: advance_character(&character, dt, direction, speed, cooldown),
        active_powerup: active,
        powerup_remaining: remaining,
        ..player.clone()
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

/// Spawn points evenly spaced down the boss's left edge, inside its corridor.
pub fn origin_positions(hitbox: &Aabb, y_range: (f32, f32), count: usize) -> Vec<Vector2> {
    let (min_y, max_y) = y_range;
    let step = (max_y - min_y) / count as f32;
    (0..count)
        .map(|i| Vector2::new(hitbox.left(), min_y + (i as f32 + 0.5) * step))
        .collect()
}

pub fn init_boss(config: &GameConfig) -> Result<Boss, ConfigError> {
    config.validate()?;
    let b = &config.boss;
    let hitbox = Aabb::from_top_left(b.top_left, b.hitbox[0], b.hitbox[1]);
    let y_range = (b.y_range[0], b.y_range[1]);
    let opening = b.phases[AttackPhase::One.index()];
    Ok(Boss {
        character: Character {
            position: hitbox.center,
            hitbox,
            hitpoints: b.hitpoints,
            max_hitpoints: b.hitpoints,
            speed: 0.0,
            time_since_last_shoot: 0.0,
            shoot_cooldown_time: opening.shoot_cooldown,
            y_range,
        },
        attack_phase: AttackPhase::One,
        projectiles_per_wave: opening.projectiles_per_wave,
        powerup_drop_chance: opening.powerup_drop_chance,
        projectile_origin_positions: origin_positions(&hitbox, y_range, b.origin_count),
        phase_table: b.phases,
        phase_thresholds: b.phase_thresholds,
    })
}

/// Phase implied by a health ratio alone.
pub fn phase_for_ratio(ratio: f32, thresholds: [f32; 2]) -> AttackPhase {
    let [high, low] = thresholds;
    if ratio < low {
        AttackPhase::Three
    } else if ratio < high {
        AttackPhase::Two
    } else {
        AttackPhase::One
    }
}

/// Raise the attack phase if health calls for it and load that phase's
/// table row.  The phase never goes back down.
pub fn refresh_attack_phase(boss: &Boss) -> Boss {
    let c = &boss.character;
    let ratio = c.hitpoints as f32 / c.max_hitpoints as f32;
    let attack_phase = boss
        .attack_phase
        .max(phase_for_ratio(ratio, boss.phase_thresholds));
    if attack_phase != boss.attack_phase {
        info!(
            "boss enters attack phase {} at {}/{} hitpoints",
            attack_phase.number(),
            c.hitpoints,
            c.max_hitpoints
        );
    }
    let row = boss.phase_table[attack_phase.index()];
    Boss {
        character: Character {
            shoot_cooldown_time: row.shoot_cooldown,
            time_since_last_shoot: c.time_since_last_shoot.min(row.shoot_cooldown),
            ..c.clone()
        },
        attack_phase,
        projectiles_per_wave: row.projectiles_per_wave,
        powerup_drop_chance: row.powerup_drop_chance,
        ..boss.clone()
    }
}

/// The boss never moves; it only charges its weapon and re-evaluates its phase.
pub fn update_boss(boss: &Boss, dt: f32) -> Boss {
    let c = &boss.character;
    let character = advance_character(c, dt, Direction::Still, c.speed, c.shoot_cooldown_time);
    refresh_attack_phase(&Boss {
        character,
        ..boss.clone()
    })
}

pub fn boss_can_shoot(boss: &Boss) -> bool {
    can_shoot(&boss.character, boss.character.shoot_cooldown_time)
}
