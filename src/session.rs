/// Game-phase controller.
///
/// Title → Setup → Combat → Resolution → Setup …  The session is a plain
/// value owned by the driver; [`step`] returns the next one.  Quit is checked
/// before anything else and ends the loop from any phase.

use log::{info, trace};
use rand::Rng;

use crate::combat::{end_scenario, init_combat, tick};
use crate::config::GameConfig;
use crate::entities::{AttackPhase, FrameInput, GamePhase, HudSnapshot, Session};
use crate::error::ConfigError;

/// What the driver should do after a step.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Continue(Session),
    Quit,
}

pub fn init_session(config: GameConfig) -> Result<Session, ConfigError> {
    config.validate()?;
    Ok(Session {
        phase: GamePhase::Title,
        end_scenario: None,
        combat: None,
        config,
    })
}

fn enter(session: &Session, phase: GamePhase) -> Session {
    info!("game phase {:?} -> {:?}", session.phase, phase);
    Session {
        phase,
        ..session.clone()
    }
}

/// Advance the session by one frame.
pub fn step(
    session: &Session,
    input: &FrameInput,
    dt: f32,
    rng: &mut impl Rng,
) -> Result<Flow, ConfigError> {
    if input.quit {
        info!("quit requested during {:?}", session.phase);
        return Ok(Flow::Quit);
    }

    let next = match session.phase {
        GamePhase::Title if input.confirm => enter(session, GamePhase::Setup),
        GamePhase::Title => session.clone(),

        GamePhase::Setup => Session {
            end_scenario: None,
            combat: Some(init_combat(&session.config)?),
            ..enter(session, GamePhase::Combat)
        },

        GamePhase::Combat => {
            let Some(current) = &session.combat else {
                return Ok(Flow::Continue(enter(session, GamePhase::Setup)));
            };
            let combat = tick(current, input, dt, rng);
            match end_scenario(&combat) {
                Some(end) => {
                    info!(
                        "fight over: {:?} after {} frames ({:.1}s left)",
                        end,
                        combat.frame,
                        combat.remaining_time.max(0.0)
                    );
                    Session {
                        end_scenario: Some(end),
                        combat: Some(combat),
                        ..enter(session, GamePhase::Resolution)
                    }
                }
                None => Session {
                    combat: Some(combat),
                    ..session.clone()
                },
            }
        }

        GamePhase::Resolution if input.restart => enter(session, GamePhase::Setup),
        GamePhase::Resolution => {
            trace!("holding on {:?}", session.end_scenario);
            session.clone()
        }
    };

    Ok(Flow::Continue(next))
}

/// Numbers the UI layer needs.  Before the first fight the configured
/// starting values are reported.
pub fn hud(session: &Session) -> HudSnapshot {
    let config = &session.config;
    match &session.combat {
        Some(combat) => HudSnapshot {
            phase: session.phase,
            end_scenario: session.end_scenario,
            player_hitpoints: combat.player.character.hitpoints,
            player_max_hitpoints: combat.player.character.max_hitpoints,
            boss_hitpoints: combat.boss.character.hitpoints,
            boss_max_hitpoints: combat.boss.character.max_hitpoints,
            attack_phase: combat.boss.attack_phase,
            active_powerup: combat.player.active_powerup,
            remaining_time: combat.remaining_time.max(0.0),
            time_limit: combat.time_limit,
        },
        None => HudSnapshot {
            phase: session.phase,
            end_scenario: session.end_scenario,
            player_hitpoints: config.player.hitpoints,
            player_max_hitpoints: config.player.hitpoints,
            boss_hitpoints: config.boss.hitpoints,
            boss_max_hitpoints: config.boss.hitpoints,
            attack_phase: AttackPhase::One,
            active_powerup: None,
            remaining_time: config.fight_duration,
            time_limit: config.fight_duration,
        },
    }
}
