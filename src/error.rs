use thiserror::Error;

/// Invalid or unreadable configuration.  Raised at construction time so a
/// bad setup never reaches the frame loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{who} needs at least one hit point")]
    ZeroHitpoints { who: &'static str },

    #[error("{who} projectiles must deal damage")]
    ZeroDamage { who: &'static str },

    #[error("boss has no projectile origins")]
    NoOrigins,

    #[error("phase {phase}: wave of {wave} needs between 1 and {origins} distinct origins")]
    WaveSize {
        phase: u8,
        wave: usize,
        origins: usize,
    },

    #[error("phase {phase}: drop chance {chance} is above 100")]
    DropChance { phase: u8, chance: u32 },

    #[error("{who} corridor [{min}, {max}] is empty")]
    EmptyCorridor { who: &'static str, min: f32, max: f32 },

    #[error("{who} does not start inside its vertical corridor")]
    OutsideCorridor { who: &'static str },

    #[error("phase thresholds must satisfy 1 > {high} > {low} > 0")]
    Thresholds { high: f32, low: f32 },
}
