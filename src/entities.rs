/// All simulation types — pure data, no logic.

use crate::config::{GameConfig, PhaseConfig, PowerUpConfig, ProjectileConfig};
use crate::geometry::{Aabb, Vector2};

// ── Input ─────────────────────────────────────────────────────────────────────

/// Vertical intent for the current frame.  Conflicting keys are resolved by
/// the caller before they reach the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Up,
    #[default]
    Still,
    Down,
}

impl Direction {
    /// `-1.0`, `0.0` or `1.0` (up is negative y).
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Still => 0.0,
            Direction::Down => 1.0,
        }
    }
}

/// Debounced input signals for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub direction: Direction,
    pub fire: bool,
    pub confirm: bool,
    pub restart: bool,
    pub quit: bool,
}

// ── Enumerations ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Instantly restores hit points, then clears.
    Heal,
    /// Multiplies movement speed while active.
    SpeedBoost,
    /// Shortens the shoot cooldown while active.
    FireRateBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Heal,
        PowerUpKind::SpeedBoost,
        PowerUpKind::FireRateBoost,
    ];
}

/// Boss behaviour tier.  Ordered so the phase can only be raised with `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttackPhase {
    One,
    Two,
    Three,
}

impl AttackPhase {
    pub fn number(self) -> u8 {
        match self {
            AttackPhase::One => 1,
            AttackPhase::Two => 2,
            AttackPhase::Three => 3,
        }
    }

    /// Row of the phase table that applies to this phase.
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Title,
    Setup,
    Combat,
    Resolution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndScenario {
    BossDefeated,
    PlayerDefeated,
    TimeExpired,
}

// ── Moving entities ──────────────────────────────────────────────────────────

/// Constant-speed body travelling along the horizontal axis.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingEntity {
    pub position: Vector2,
    /// Centre always equals `position` after an update.
    pub hitbox: Aabb,
    pub speed: f32,
    /// `-1.0` (leftward) or `1.0` (rightward).
    pub direction: f32,
    /// Refreshed against the arena at the start of every update.
    pub onscreen: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: MovingEntity,
    pub damage: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub body: MovingEntity,
    pub kind: PowerUpKind,
    /// Seconds the effect lasts once collected.
    pub duration: f32,
}

/// Short-lived hit marker.  Purely visual.
#[derive(Clone, Debug, PartialEq)]
pub struct Impact {
    pub position: Vector2,
    /// Seconds left on screen.
    pub remaining: f32,
}

// ── Characters ───────────────────────────────────────────────────────────────

/// State shared by the player and the boss.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub position: Vector2,
    pub hitbox: Aabb,
    pub hitpoints: u32,
    pub max_hitpoints: u32,
    pub speed: f32,
    /// Saturates at the effective cooldown; reset to 0 on fire.
    pub time_since_last_shoot: f32,
    pub shoot_cooldown_time: f32,
    /// Vertical corridor `(min_y, max_y)` the hitbox must stay inside.
    pub y_range: (f32, f32),
}

/// How each power-up kind modifies the player's base stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpEffects {
    pub heal_amount: u32,
    pub speed_multiplier: f32,
    pub cooldown_multiplier: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Base stats; never modified by power-ups.
    pub character: Character,
    pub active_powerup: Option<PowerUpKind>,
    pub powerup_remaining: f32,
    pub effects: PowerUpEffects,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub character: Character,
    pub attack_phase: AttackPhase,
    pub projectiles_per_wave: usize,
    /// Percent, 0–100.
    pub powerup_drop_chance: u32,
    /// Evenly spaced along the boss's left edge; fixed at construction.
    pub projectile_origin_positions: Vec<Vector2>,
    pub phase_table: [PhaseConfig; 3],
    /// Health ratios below which phases 2 and 3 begin.
    pub phase_thresholds: [f32; 2],
}

// ── Combat & session state ───────────────────────────────────────────────────

/// Everything owned by the combat resolver while a fight is running.
/// Cloneable so the per-frame update can build a fresh copy.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatState {
    pub player: Player,
    pub boss: Boss,
    /// Travelling toward the boss.
    pub player_projectiles: Vec<Projectile>,
    /// Travelling toward the player.
    pub boss_projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub impacts: Vec<Impact>,
    pub remaining_time: f32,
    pub time_limit: f32,
    pub arena: Aabb,
    pub player_shot: ProjectileConfig,
    pub boss_shot: ProjectileConfig,
    pub powerup_drop: PowerUpConfig,
    pub impact_lifetime: f32,
    pub frame: u64,
}

/// Top-level simulation context owned by the driver.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub phase: GamePhase,
    /// Set only when leaving combat.
    pub end_scenario: Option<EndScenario>,
    /// `None` until the first setup; frozen during resolution.
    pub combat: Option<CombatState>,
    pub config: GameConfig,
}

/// Numeric view of the session for health bars, the timer bar and screen
/// selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub end_scenario: Option<EndScenario>,
    pub player_hitpoints: u32,
    pub player_max_hitpoints: u32,
    pub boss_hitpoints: u32,
    pub boss_max_hitpoints: u32,
    pub attack_phase: AttackPhase,
    pub active_powerup: Option<PowerUpKind>,
    pub remaining_time: f32,
    pub time_limit: f32,
}
