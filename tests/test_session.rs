use rand::rngs::StdRng;
use rand::SeedableRng;

use shooting_stars::config::GameConfig;
use shooting_stars::entities::*;
use shooting_stars::error::ConfigError;
use shooting_stars::session::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn advance(session: &Session, input: FrameInput) -> Session {
    match step(session, &input, 0.04, &mut seeded_rng()).unwrap() {
        Flow::Continue(next) => next,
        Flow::Quit => panic!("unexpected quit"),
    }
}

fn in_combat() -> Session {
    let s = init_session(GameConfig::default()).unwrap();
    let s = advance(&s, FrameInput { confirm: true, ..idle() });
    advance(&s, idle())
}

fn edit_combat(session: &Session, edit: impl FnOnce(&mut CombatState)) -> Session {
    let mut next = session.clone();
    if let Some(combat) = next.combat.as_mut() {
        edit(combat);
    }
    next
}

// ── Title / Setup ────────────────────────────────────────────────────────────

#[test]
fn starts_on_title() {
    let s = init_session(GameConfig::default()).unwrap();
    assert_eq!(s.phase, GamePhase::Title);
    assert_eq!(s.end_scenario, None);
    assert!(s.combat.is_none());
}

#[test]
fn title_waits_for_confirm() {
    let s = init_session(GameConfig::default()).unwrap();
    let s2 = advance(&s, FrameInput { fire: true, ..idle() });
    assert_eq!(s2.phase, GamePhase::Title);
    let s3 = advance(&s2, FrameInput { confirm: true, ..idle() });
    assert_eq!(s3.phase, GamePhase::Setup);
}

#[test]
fn setup_enters_combat_in_one_frame() {
    let s = in_combat();
    assert_eq!(s.phase, GamePhase::Combat);
    let combat = s.combat.as_ref().unwrap();
    assert_eq!(combat.remaining_time, 90.0);
    assert_eq!(combat.boss.character.hitpoints, 100);
    assert!(combat.boss_projectiles.is_empty());
}

#[test]
fn quit_works_from_every_phase() {
    let quit = FrameInput { quit: true, ..idle() };
    let title = init_session(GameConfig::default()).unwrap();
    let setup = advance(&title, FrameInput { confirm: true, ..idle() });
    let combat = in_combat();
    let resolution = advance(
        &edit_combat(&combat, |c| c.player.character.hitpoints = 0),
        idle(),
    );
    assert_eq!(setup.phase, GamePhase::Setup);
    assert_eq!(resolution.phase, GamePhase::Resolution);
    for s in [title, setup, combat, resolution] {
        let flow = step(&s, &quit, 0.04, &mut seeded_rng()).unwrap();
        assert_eq!(flow, Flow::Quit);
    }
}

// ── Combat → Resolution ──────────────────────────────────────────────────────

#[test]
fn combat_continues_while_nobody_has_lost() {
    let s = advance(&in_combat(), idle());
    assert_eq!(s.phase, GamePhase::Combat);
    assert_eq!(s.combat.as_ref().unwrap().frame, 1);
}

#[test]
fn boss_defeat_ends_fight() {
    let s = edit_combat(&in_combat(), |c| c.boss.character.hitpoints = 0);
    let s2 = advance(&s, idle());
    assert_eq!(s2.phase, GamePhase::Resolution);
    assert_eq!(s2.end_scenario, Some(EndScenario::BossDefeated));
}

#[test]
fn simultaneous_defeat_counts_as_boss_defeated() {
    let s = edit_combat(&in_combat(), |c| {
        c.boss.character.hitpoints = 0;
        c.player.character.hitpoints = 0;
    });
    let s2 = advance(&s, idle());
    assert_eq!(s2.end_scenario, Some(EndScenario::BossDefeated));
}

#[test]
fn player_defeat_ends_fight() {
    let s = edit_combat(&in_combat(), |c| c.player.character.hitpoints = 0);
    let s2 = advance(&s, idle());
    assert_eq!(s2.end_scenario, Some(EndScenario::PlayerDefeated));
}

#[test]
fn timer_expiry_ends_fight() {
    let s = edit_combat(&in_combat(), |c| c.remaining_time = 0.01);
    let s2 = advance(&s, idle());
    assert_eq!(s2.phase, GamePhase::Resolution);
    assert_eq!(s2.end_scenario, Some(EndScenario::TimeExpired));
}

// ── Resolution ───────────────────────────────────────────────────────────────

#[test]
fn resolution_holds_until_restart() {
    let s = edit_combat(&in_combat(), |c| c.player.character.hitpoints = 0);
    let ended = advance(&s, idle());
    let held = advance(&ended, FrameInput { fire: true, confirm: true, ..idle() });
    assert_eq!(held, ended);
}

#[test]
fn restart_rebuilds_the_fight() {
    let s = edit_combat(&in_combat(), |c| c.player.character.hitpoints = 0);
    let ended = advance(&s, idle());
    let setup = advance(&ended, FrameInput { restart: true, ..idle() });
    assert_eq!(setup.phase, GamePhase::Setup);

    let fresh = advance(&setup, idle());
    assert_eq!(fresh.phase, GamePhase::Combat);
    assert_eq!(fresh.end_scenario, None);
    let combat = fresh.combat.as_ref().unwrap();
    assert_eq!(combat.player.character.hitpoints, 5);
    assert_eq!(combat.frame, 0);
}

// ── HUD ──────────────────────────────────────────────────────────────────────

#[test]
fn hud_before_first_fight_reports_config() {
    let s = init_session(GameConfig::default()).unwrap();
    let h = hud(&s);
    assert_eq!(h.phase, GamePhase::Title);
    assert_eq!(h.player_hitpoints, 5);
    assert_eq!(h.boss_max_hitpoints, 100);
    assert_eq!(h.remaining_time, 90.0);
    assert_eq!(h.attack_phase, AttackPhase::One);
}

#[test]
fn hud_tracks_the_fight() {
    let s = edit_combat(&in_combat(), |c| {
        c.boss.character.hitpoints = 40;
        c.player.character.hitpoints = 2;
    });
    let h = hud(&s);
    assert_eq!(h.boss_hitpoints, 40);
    assert_eq!(h.player_hitpoints, 2);
    assert_eq!(h.player_max_hitpoints, 5);
}

#[test]
fn hud_never_reports_negative_time() {
    let s = edit_combat(&in_combat(), |c| c.remaining_time = 0.01);
    let ended = advance(&s, idle());
    assert_eq!(hud(&ended).remaining_time, 0.0);
    assert_eq!(hud(&ended).end_scenario, Some(EndScenario::TimeExpired));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = GameConfig::default();
    config.player.hitpoints = 0;
    assert!(matches!(
        init_session(config),
        Err(ConfigError::ZeroHitpoints { who: "player" })
    ));
}
