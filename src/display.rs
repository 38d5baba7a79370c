/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates
/// numeric state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shooting_stars::entities::{
    AttackPhase, CombatState, EndScenario, GamePhase, HudSnapshot, PowerUpKind, Session,
};
use shooting_stars::geometry::{Aabb, Vector2};
use shooting_stars::session::hud;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::White;
const C_BAR_PLAYER: Color = Color::Green;
const C_BAR_TIMER: Color = Color::Cyan;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_BOSS: Color = Color::Magenta;
const C_IMPACT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP_ACTIVE: Color = Color::Yellow;

const BAR_WIDTH: usize = 12;

// ── Arena → terminal mapping ─────────────────────────────────────────────────

/// Playfield is rows `2 .. height-2` and columns `1 .. width-1`.
struct Viewport {
    width: u16,
    height: u16,
    arena_w: f32,
    arena_h: f32,
}

impl Viewport {
    fn inner_cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.height.saturating_sub(4) as f32
    }

    fn col(&self, x: f32) -> i32 {
        1 + (x / self.arena_w * self.inner_cols()).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y / self.arena_h * self.inner_rows()).floor() as i32
    }

    /// `None` when the point falls outside the playfield.
    fn cell(&self, p: Vector2) -> Option<(u16, u16)> {
        let (c, r) = (self.col(p.x), self.row(p.y));
        let inside = c >= 1
            && c < self.width as i32 - 1
            && r >= 2
            && r < self.height as i32 - 2;
        inside.then(|| (c as u16, r as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport {
        width,
        height,
        arena_w: session.config.arena.width,
        arena_h: session.config.arena.height,
    };
    let snapshot = hud(session);

    match session.phase {
        GamePhase::Title | GamePhase::Setup => draw_title(out, &view)?,
        GamePhase::Combat | GamePhase::Resolution => {
            draw_border(out, &view)?;
            draw_hud(out, &view, &snapshot)?;
            if let Some(combat) = &session.combat {
                draw_fight(out, &view, combat)?;
            }
            draw_controls_hint(out, &view)?;
            if let Some(end) = snapshot.end_scenario {
                draw_outcome(out, &view, end)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn bar(value: f32, max: f32) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn phase_color(phase: AttackPhase) -> Color {
    match phase {
        AttackPhase::One => Color::Green,
        AttackPhase::Two => Color::Yellow,
        AttackPhase::Three => Color::Red,
    }
}

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, snap: &HudSnapshot) -> std::io::Result<()> {
    // Player health — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_BAR_PLAYER))?;
    out.queue(Print(format!(
        "SHIP {} {}/{}",
        bar(snap.player_hitpoints as f32, snap.player_max_hitpoints as f32),
        snap.player_hitpoints,
        snap.player_max_hitpoints
    )))?;

    // Power-up tag + timer — centre
    let power_tag = match snap.active_powerup {
        Some(PowerUpKind::SpeedBoost) => "[» SPEED] ",
        Some(PowerUpKind::FireRateBoost) => "[! RAPID] ",
        Some(PowerUpKind::Heal) => "[+ HEAL] ",
        None => "",
    };
    let timer = format!(
        "TIME {} {:>3}s",
        bar(snap.remaining_time, snap.time_limit),
        snap.remaining_time.ceil() as u32
    );
    let centre_len = (power_tag.chars().count() + timer.chars().count()) as u16;
    out.queue(cursor::MoveTo((view.width / 2).saturating_sub(centre_len / 2), 0))?;
    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(power_tag))?;
    }
    out.queue(style::SetForegroundColor(C_BAR_TIMER))?;
    out.queue(Print(&timer))?;

    // Boss health — right
    let boss = format!(
        "BOSS P{} {} {}/{}",
        snap.attack_phase.number(),
        bar(snap.boss_hitpoints as f32, snap.boss_max_hitpoints as f32),
        snap.boss_hitpoints,
        snap.boss_max_hitpoints
    );
    let rx = view.width.saturating_sub(boss.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(phase_color(snap.attack_phase)))?;
    out.queue(Print(&boss))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_at<W: Write>(
    out: &mut W,
    view: &Viewport,
    at: Vector2,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(at) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_boss<W: Write>(
    out: &mut W,
    view: &Viewport,
    hitbox: &Aabb,
    phase: AttackPhase,
) -> std::io::Result<()> {
    let left = view.col(hitbox.left()).max(1);
    let right = view.col(hitbox.right()).min(view.width as i32 - 2);
    let top = view.row(hitbox.top()).max(2);
    let bottom = view.row(hitbox.bottom()).min(view.height as i32 - 3);
    if right < left {
        return Ok(());
    }
    let span = "▓".repeat((right - left + 1) as usize);

    out.queue(style::SetForegroundColor(phase_color(phase)))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print(&span))?;
    }
    Ok(())
}

fn powerup_glyph(kind: PowerUpKind) -> (&'static str, Color) {
    match kind {
        PowerUpKind::Heal => ("♥", Color::Magenta),
        PowerUpKind::SpeedBoost => ("»", Color::Green),
        PowerUpKind::FireRateBoost => ("!", Color::Cyan),
    }
}

fn draw_fight<W: Write>(out: &mut W, view: &Viewport, combat: &CombatState) -> std::io::Result<()> {
    draw_boss(out, view, &combat.boss.character.hitbox, combat.boss.attack_phase)?;

    for shot in &combat.player_projectiles {
        draw_at(out, view, shot.body.position, C_SHOT_PLAYER, "─")?;
    }
    for shot in &combat.boss_projectiles {
        draw_at(out, view, shot.body.position, C_SHOT_BOSS, "•")?;
    }
    for powerup in &combat.powerups {
        let (glyph, color) = powerup_glyph(powerup.kind);
        draw_at(out, view, powerup.body.position, color, glyph)?;
    }
    for impact in &combat.impacts {
        draw_at(out, view, impact.position, C_IMPACT, "✶")?;
    }

    draw_at(out, view, combat.player.character.position, C_PLAYER, "►")
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    start_row: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.width / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("★  SHOOTING  STARS  ★", Color::Cyan),
        ("", Color::White),
        ("Defeat the Giant Killer Space Robot before time runs out.", Color::White),
        ("", Color::White),
        ("♥ Heal    » Speed Boost    ! Rapid Fire", Color::DarkGrey),
        ("", Color::White),
        ("ENTER : Start   Q : Quit", Color::Yellow),
    ];
    let start = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, lines)
}

fn draw_outcome<W: Write>(out: &mut W, view: &Viewport, end: EndScenario) -> std::io::Result<()> {
    let (banner, color) = match end {
        EndScenario::BossDefeated => ("║   BOSS  DESTROYED  ║", Color::Green),
        EndScenario::PlayerDefeated => ("║   SHIP  DESTROYED  ║", Color::Red),
        EndScenario::TimeExpired => ("║     TIME'S  UP     ║", Color::Yellow),
    };
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", color),
        (banner, color),
        ("╚════════════════════╝", color),
        ("R - Fight Again  Q - Quit", Color::White),
    ];
    let start = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, lines)
}
