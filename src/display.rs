/// Rendering layer — all terminal output lives here.
///
/// The simulation works in a fixed 1400×900 logical arena; this module
/// squeezes that onto whatever terminal grid is available.  Row 0 and the
/// last row are reserved for the HUD.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flying_fortress::assets::{Art, Assets};
use flying_fortress::compute::{hud, BarColor, Hud};
use flying_fortress::consts::{EXPLOSION_FRAMES, X_MAX, Y_MAX};
use flying_fortress::entities::{DecorationKind, GameState, Phase, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: 35, g: 138, b: 205 };
const C_ISLAND: Color = Color::DarkGreen;
const C_CLOUD: Color = Color::White;
const C_PLAYER: Color = Color::Black;
const C_ENEMY: Color = Color::DarkRed;
const C_BOSS: Color = Color::Magenta;
const C_BULLET: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HUD: Color = Color::Yellow;
const C_PROMPT: Color = Color::White;
const C_BAR_FRAME: Color = Color::Yellow;

const BAR_CELLS: u32 = 20;

/// Logical arena → terminal cell mapping.
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        let arena_rows = self.rows.saturating_sub(2) as i32;
        let col = x * self.cols as i32 / X_MAX;
        let row = 1 + y * arena_rows / Y_MAX;
        (col, row)
    }

    fn in_arena(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= 1 && row < self.rows as i32 - 1
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    size: (u16, u16),
) -> std::io::Result<()> {
    let view = Viewport {
        cols: size.0,
        rows: size.1,
    };
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let info = hud(state);

    if info.phase == Phase::Intro {
        let prompt = info.banner.map(|(_, prompt)| prompt).unwrap_or_default();
        draw_intro(out, view, assets, prompt)?;
    } else {
        for sprite in state.sprites() {
            draw_sprite(out, view, assets, sprite)?;
        }
        draw_hud(out, view, &info)?;
        if let Some((title, prompt)) = info.banner {
            draw_banner(out, view, title, prompt)?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: Viewport,
    assets: &Assets,
    sprite: Sprite<'_>,
) -> std::io::Result<()> {
    match sprite {
        Sprite::Decoration(d) => {
            let color = match d.kind {
                DecorationKind::Island(_) => C_ISLAND,
                DecorationKind::Cloud => C_CLOUD,
            };
            draw_art(out, view, assets.decoration(d.kind), d.x, d.y, color)
        }
        Sprite::Enemy(e) => draw_art(out, view, &assets.enemy, e.x, e.y, C_ENEMY),
        Sprite::Boss(b) => draw_art(out, view, &assets.boss, b.x, b.y, C_BOSS),
        Sprite::Player(p) => draw_art(out, view, &assets.player, p.x, p.y, C_PLAYER),
        Sprite::Explosion(e) => {
            let art = assets.explosion_frame(e.frame, EXPLOSION_FRAMES);
            draw_art(out, view, art, e.x, e.y, C_EXPLOSION)
        }
        Sprite::Bullet(b) => {
            let (col, row) = view.to_cell(b.x, b.y);
            if view.in_arena(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(style::SetForegroundColor(C_BULLET))?;
                out.queue(Print('•'))?;
            }
            Ok(())
        }
    }
}

/// Blit text art centred on a logical position.  Spaces are transparent and
/// anything outside the arena is clipped.
fn draw_art<W: Write>(
    out: &mut W,
    view: Viewport,
    art: &Art,
    x: i32,
    y: i32,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = view.to_cell(x, y);
    let left = col - art.width() as i32 / 2;
    let top = row - art.height() as i32 / 2;

    out.queue(style::SetForegroundColor(color))?;
    for (dy, line) in art.lines.iter().enumerate() {
        let r = top + dy as i32;
        for (dx, ch) in line.chars().enumerate() {
            let c = left + dx as i32;
            if ch == ' ' || !view.in_arena(c, r) {
                continue;
            }
            out.queue(cursor::MoveTo(c as u16, r as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── HUD (first and last rows) ─────────────────────────────────────────────────

fn bar_color(color: BarColor) -> Color {
    match color {
        BarColor::Red => Color::Red,
        BarColor::Green => Color::Green,
    }
}

fn draw_bar<W: Write>(
    out: &mut W,
    col: u16,
    label: &str,
    value: u32,
    color: BarColor,
) -> std::io::Result<u16> {
    let filled = (value.min(100) * BAR_CELLS / 100) as usize;
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(label))?;
    out.queue(style::SetForegroundColor(C_BAR_FRAME))?;
    out.queue(Print('['))?;
    out.queue(style::SetForegroundColor(bar_color(color)))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(Print(" ".repeat(BAR_CELLS as usize - filled)))?;
    out.queue(style::SetForegroundColor(C_BAR_FRAME))?;
    out.queue(Print(']'))?;
    Ok(col + label.chars().count() as u16 + BAR_CELLS as u16 + 2)
}

fn draw_hud<W: Write>(out: &mut W, view: Viewport, info: &Hud) -> std::io::Result<()> {
    // Top row: timer, health, boss
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("TIME: {:>2}", info.time_left)))?;

    let next = draw_bar(out, 12, "HP ", info.health, info.health_color)?;
    if let Some((health, color)) = info.boss {
        draw_bar(out, next + 3, "BOSS ", health, color)?;
    }

    let fire_hint = "SPACE: FIRE";
    out.queue(cursor::MoveTo(
        view.cols.saturating_sub(fire_hint.len() as u16 + 1),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(fire_hint))?;

    // Bottom row: level, score, nuke hint
    let bottom = view.rows.saturating_sub(1);
    out.queue(cursor::MoveTo(1, bottom))?;
    out.queue(Print(format!("LEVEL: {} SCORE: {}", info.level, info.score)))?;
    if info.nuke_ready {
        let nuke_hint = "N: NUKE";
        out.queue(cursor::MoveTo(
            view.cols.saturating_sub(nuke_hint.len() as u16 + 1),
            bottom,
        ))?;
        out.queue(Print(nuke_hint))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    view: Viewport,
    title: &str,
    prompt: &str,
) -> std::io::Result<()> {
    let cy = view.rows / 2;
    let frame = format!("╔{}╗", "═".repeat(title.chars().count() + 6));
    let body = format!("║   {}   ║", title);
    let base = format!("╚{}╝", "═".repeat(title.chars().count() + 6));

    print_centered(out, view, cy.saturating_sub(3), &frame, C_HUD)?;
    print_centered(out, view, cy.saturating_sub(2), &body, C_HUD)?;
    print_centered(out, view, cy.saturating_sub(1), &base, C_HUD)?;
    print_centered(out, view, cy + 1, prompt, C_PROMPT)?;
    Ok(())
}

fn draw_intro<W: Write>(
    out: &mut W,
    view: Viewport,
    assets: &Assets,
    prompt: &str,
) -> std::io::Result<()> {
    let art = &assets.intro;
    let top = (view.rows / 2).saturating_sub(art.height() as u16 / 2 + 2);
    let left = (view.cols / 2).saturating_sub(art.width() as u16 / 2);
    out.queue(style::SetForegroundColor(C_HUD))?;
    for (i, line) in art.lines.iter().enumerate() {
        out.queue(cursor::MoveTo(left, top + i as u16))?;
        out.queue(Print(line))?;
    }
    let prompt_row = top + art.height() as u16 + 2;
    print_centered(out, view, prompt_row, prompt, C_PROMPT)?;
    print_centered(out, view, prompt_row + 1, "ESC / Q : QUIT", Color::DarkGrey)?;
    Ok(())
}
