/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// logical 800×600 positions into terminal cells and queues the commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use elsu_vs_enemy::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use elsu_vs_enemy::entities::{BulletState, Enemy, PlayState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate scaling ────────────────────────────────────────────────────────

/// Map a logical 800×600 position onto the current terminal grid.
fn to_cell(cols: u16, rows: u16, x: i32, y: i32) -> (u16, u16) {
    let col = (x.clamp(0, SCREEN_WIDTH - 1) as u32 * cols as u32 / SCREEN_WIDTH as u32) as u16;
    let row = (y.clamp(0, SCREEN_HEIGHT - 1) as u32 * rows as u32 / SCREEN_HEIGHT as u32) as u16;
    (col.min(cols.saturating_sub(1)), row.min(rows.saturating_sub(1)))
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete gameplay frame.
pub fn render<W: Write>(out: &mut W, state: &PlayState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, cols, rows)?;
    }
    if state.bullet.state == BulletState::Flying {
        draw_bullet(out, state, cols, rows)?;
    }
    draw_player(out, state, cols, rows)?;
    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render the scene with the end banner over it.
pub fn render_game_over<W: Write>(
    out: &mut W,
    state: &PlayState,
    prev_top_score: u32,
) -> std::io::Result<()> {
    render(out, state)?;
    draw_game_over(out, state, prev_top_score)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &PlayState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Points: {}", state.score)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &PlayState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    // 2-row sprite anchored at the top-center of the bounding box:
    //   ▲
    //  /█\
    let rect = &state.player.rect;
    let (col, row) = to_cell(cols, rows, rect.centerx(), rect.top());

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < rows {
        out.queue(cursor::MoveTo(col.saturating_sub(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, cols: u16, rows: u16) -> std::io::Result<()> {
    //   «▼»    ← swept-back wings
    //   ╚═╝    ← engine block
    let (col, row) = to_cell(cols, rows, enemy.rect.centerx(), enemy.rect.top());
    let lcol = col.saturating_sub(1);

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(lcol, row))?;
    out.queue(Print("«▼»"))?;
    if row + 1 < rows {
        out.queue(cursor::MoveTo(lcol, row + 1))?;
        out.queue(Print("╚═╝"))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    state: &PlayState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let rect = &state.bullet.rect;
    let (col, row) = to_cell(cols, rows, rect.centerx(), rect.top());
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BULLET))?;
    out.queue(Print("║"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Menu   ESC : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &PlayState,
    prev_top_score: u32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;

    let score_line = format!("Final Score: {:>6}", state.score);
    let new_top = state.score > prev_top_score && state.score > 0;
    let top = prev_top_score.max(state.score);
    let top_line = if new_top {
        format!("★ NEW TOP SCORE: {:>6} ★", top)
    } else {
        format!("Top Score:   {:>6}", top)
    };

    let banner: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = cols / 2;
    let total_rows = banner.len() as u16 + 2;
    let start_row = (rows / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in banner.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + banner.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(top_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(if new_top {
        Color::Yellow
    } else {
        Color::DarkGrey
    }))?;
    out.queue(Print(&top_line))?;

    Ok(())
}
