/// Combat resolver.
///
/// One call to [`tick`] advances a running fight by one frame.  Like the
/// rest of the core it never mutates its input: every collection is rebuilt
/// from the previous frame's survivors, so removal never happens while a
/// list is being walked.  Randomness comes only through the injected RNG.

use log::{debug, trace};
use rand::seq::index;
use rand::Rng;

use crate::compute::{
    advance, apply_damage, boss_can_shoot, check_hit, grant_powerup, init_boss, init_player,
    player_can_shoot, refresh_attack_phase, reset_shoot_timer, spawn_powerup, spawn_projectile,
    update_boss, update_player,
};
use crate::config::GameConfig;
use crate::entities::{
    Boss, CombatState, EndScenario, FrameInput, Impact, Player, PowerUp, PowerUpKind, Projectile,
};
use crate::error::ConfigError;
use crate::geometry::{Aabb, Vector2};

// ── Constructor ──────────────────────────────────────────────────────────────

/// Fresh fight: full health on both sides, empty collections, full timer.
pub fn init_combat(config: &GameConfig) -> Result<CombatState, ConfigError> {
    Ok(CombatState {
        player: init_player(config)?,
        boss: init_boss(config)?,
        player_projectiles: Vec::new(),
        boss_projectiles: Vec::new(),
        powerups: Vec::new(),
        impacts: Vec::new(),
        remaining_time: config.fight_duration,
        time_limit: config.fight_duration,
        arena: config.arena_box(),
        player_shot: config.player.projectile,
        boss_shot: config.boss.projectile,
        powerup_drop: config.powerups,
        impact_lifetime: config.impact_lifetime,
        frame: 0,
    })
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Origins chosen for one boss wave.  Together they hold exactly
/// `projectiles_per_wave` distinct positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    pub projectiles: Vec<Vector2>,
    /// The one origin that drops a power-up instead of a projectile.
    pub powerup: Option<(Vector2, PowerUpKind)>,
}

/// Draw distinct origins with a partial shuffle, then roll `[1, 100]` once:
/// a roll below the drop chance turns one chosen origin into a power-up.
pub fn choose_wave(boss: &Boss, rng: &mut impl Rng) -> Wave {
    let origins = &boss.projectile_origin_positions;
    let amount = boss.projectiles_per_wave.min(origins.len());
    let mut projectiles: Vec<Vector2> = index::sample(rng, origins.len(), amount)
        .into_iter()
        .map(|i| origins[i])
        .collect();

    let roll: u32 = rng.gen_range(1..=100);
    let powerup = if roll < boss.powerup_drop_chance && !projectiles.is_empty() {
        let slot = rng.gen_range(0..projectiles.len());
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        Some((projectiles.remove(slot), kind))
    } else {
        None
    };

    Wave {
        projectiles,
        powerup,
    }
}

/// Spawn a player shot from the hitbox centre if `fire` is held and the
/// weapon is charged.
pub fn player_fire(state: &CombatState, fire: bool) -> CombatState {
    if !fire || !player_can_shoot(&state.player) {
        return state.clone();
    }
    let origin = state.player.character.hitbox.center;
    let mut player_projectiles = state.player_projectiles.clone();
    player_projectiles.push(spawn_projectile(origin, 1.0, &state.player_shot));
    CombatState {
        player: Player {
            character: reset_shoot_timer(&state.player.character),
            ..state.player.clone()
        },
        player_projectiles,
        ..state.clone()
    }
}

/// Fire a full wave if the boss is charged.  The shoot timer resets whether
/// or not a power-up dropped.
pub fn boss_fire(state: &CombatState, rng: &mut impl Rng) -> CombatState {
    if !boss_can_shoot(&state.boss) {
        return state.clone();
    }
    let wave = choose_wave(&state.boss, rng);
    trace!(
        "boss wave: {} projectiles, drop {:?}",
        wave.projectiles.len(),
        wave.powerup.map(|(_, kind)| kind)
    );

    let mut boss_projectiles = state.boss_projectiles.clone();
    boss_projectiles.extend(
        wave.projectiles
            .iter()
            .map(|origin| spawn_projectile(*origin, -1.0, &state.boss_shot)),
    );
    let mut powerups = state.powerups.clone();
    if let Some((origin, kind)) = wave.powerup {
        debug!("boss dropped {:?}", kind);
        powerups.push(spawn_powerup(origin, kind, &state.powerup_drop));
    }

    CombatState {
        boss: Boss {
            character: reset_shoot_timer(&state.boss.character),
            ..state.boss.clone()
        },
        boss_projectiles,
        powerups,
        ..state.clone()
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Outcome of sweeping one projectile collection against its target.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub survivors: Vec<Projectile>,
    /// Total damage to apply to the target.
    pub damage: u32,
    pub impacts: Vec<Impact>,
}

/// Advance every live projectile, then test it against `target`.  A hit
/// deals damage and removes the projectile; a miss keeps it while it is
/// still on screen.
pub fn resolve_projectiles(
    projectiles: &[Projectile],
    target: &Aabb,
    arena: &Aabb,
    dt: f32,
    impact_lifetime: f32,
) -> Resolution {
    projectiles.iter().fold(
        Resolution {
            survivors: Vec::with_capacity(projectiles.len()),
            damage: 0,
            impacts: Vec::new(),
        },
        |mut acc, projectile| {
            if !projectile.body.onscreen {
                return acc;
            }
            let body = advance(&projectile.body, dt, arena);
            if !body.onscreen {
                return acc;
            }
            if check_hit(&body, target) {
                acc.damage = acc.damage.saturating_add(projectile.damage);
                acc.impacts.push(Impact {
                    position: body.position,
                    remaining: impact_lifetime,
                });
            } else {
                acc.survivors.push(Projectile {
                    body,
                    ..projectile.clone()
                });
            }
            acc
        },
    )
}

/// Advance power-ups and let the player collect them.  A power-up touching
/// a player who already holds one stays in play.
pub fn resolve_powerups(
    powerups: &[PowerUp],
    player: &Player,
    arena: &Aabb,
    dt: f32,
) -> (Vec<PowerUp>, Player) {
    powerups.iter().fold(
        (Vec::with_capacity(powerups.len()), player.clone()),
        |(mut survivors, player), powerup| {
            if !powerup.body.onscreen {
                return (survivors, player);
            }
            let body = advance(&powerup.body, dt, arena);
            if !body.onscreen {
                return (survivors, player);
            }
            let moved = PowerUp {
                body,
                ..powerup.clone()
            };
            if player.active_powerup.is_none() && check_hit(&moved.body, &player.character.hitbox)
            {
                let player = grant_powerup(&player, moved.kind, moved.duration);
                return (survivors, player);
            }
            survivors.push(moved);
            (survivors, player)
        },
    )
}

fn age_impacts(impacts: &[Impact], dt: f32) -> Vec<Impact> {
    impacts
        .iter()
        .filter_map(|impact| {
            let remaining = impact.remaining - dt;
            (remaining > 0.0).then(|| Impact {
                remaining,
                ..impact.clone()
            })
        })
        .collect()
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the fight by one frame of `dt` seconds.
pub fn tick(
    state: &CombatState,
    input: &FrameInput,
    dt: f32,
    rng: &mut impl Rng,
) -> CombatState {
    // ── 1. Characters ────────────────────────────────────────────────────────
    let state = CombatState {
        player: update_player(&state.player, dt, input.direction),
        boss: update_boss(&state.boss, dt),
        ..state.clone()
    };

    // ── 2. Firing ────────────────────────────────────────────────────────────
    let state = player_fire(&state, input.fire);
    let state = boss_fire(&state, rng);

    // ── 3. Player shots ↔ boss ───────────────────────────────────────────────
    let on_boss = resolve_projectiles(
        &state.player_projectiles,
        &state.boss.character.hitbox,
        &state.arena,
        dt,
        state.impact_lifetime,
    );
    let boss = refresh_attack_phase(&Boss {
        character: apply_damage(&state.boss.character, on_boss.damage),
        ..state.boss.clone()
    });

    // ── 4. Boss shots ↔ player ───────────────────────────────────────────────
    let on_player = resolve_projectiles(
        &state.boss_projectiles,
        &state.player.character.hitbox,
        &state.arena,
        dt,
        state.impact_lifetime,
    );
    let player = Player {
        character: apply_damage(&state.player.character, on_player.damage),
        ..state.player.clone()
    };

    // ── 5. Power-ups ↔ player ────────────────────────────────────────────────
    let (powerups, player) = resolve_powerups(&state.powerups, &player, &state.arena, dt);

    // ── 6. Impacts & countdown ───────────────────────────────────────────────
    let mut impacts = age_impacts(&state.impacts, dt);
    impacts.extend(on_boss.impacts);
    impacts.extend(on_player.impacts);

    CombatState {
        player,
        boss,
        player_projectiles: on_boss.survivors,
        boss_projectiles: on_player.survivors,
        powerups,
        impacts,
        remaining_time: state.remaining_time - dt,
        frame: state.frame + 1,
        ..state
    }
}

/// How the fight ended, if it has.  Boss defeat outranks player defeat,
/// which outranks the timer.
pub fn end_scenario(state: &CombatState) -> Option<EndScenario> {
    if state.boss.character.hitpoints == 0 {
        Some(EndScenario::BossDefeated)
    } else if state.player.character.hitpoints == 0 {
        Some(EndScenario::PlayerDefeated)
    } else if state.remaining_time <= 0.0 {
        Some(EndScenario::TimeExpired)
    } else {
        None
    }
}
