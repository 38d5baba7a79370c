use shooting_stars::entities::*;

#[test]
fn enums_compare_and_copy() {
    assert_eq!(GamePhase::Title, GamePhase::Title);
    assert_ne!(GamePhase::Combat, GamePhase::Resolution);
    assert_ne!(EndScenario::BossDefeated, EndScenario::PlayerDefeated);
    assert_eq!(PowerUpKind::ALL.len(), 3);

    let kind = PowerUpKind::Heal;
    let copy = kind;
    assert_eq!(kind, copy);
}

#[test]
fn direction_signs() {
    assert_eq!(Direction::Up.sign(), -1.0);
    assert_eq!(Direction::Still.sign(), 0.0);
    assert_eq!(Direction::Down.sign(), 1.0);
    assert_eq!(Direction::default(), Direction::Still);
}

#[test]
fn attack_phases_are_ordered() {
    assert!(AttackPhase::One < AttackPhase::Two);
    assert!(AttackPhase::Two < AttackPhase::Three);
    assert_eq!(AttackPhase::One.max(AttackPhase::Three), AttackPhase::Three);
    assert_eq!(AttackPhase::Three.number(), 3);
    assert_eq!(AttackPhase::Two.index(), 1);
}

#[test]
fn default_input_is_idle() {
    let input = FrameInput::default();
    assert_eq!(input.direction, Direction::Still);
    assert!(!input.fire && !input.confirm && !input.restart && !input.quit);
}
