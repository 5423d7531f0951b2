/// Rendering layer — all terminal I/O lives here.
///
/// `compose` turns an immutable view of the game state into an ordered
/// draw list; `render` maps world coordinates onto terminal cells and
/// presents the frame with a single flush.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use nalgebra::Vector2;

use crate::assets::{SpriteSet, Surface};
use crate::entities::{EntireGameStateInfo, GameStatus, Guard, Player, Pose};
use crate::geometry::Playfield;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Blue;
const C_GAUGE_OK: Color = Color::Blue;
const C_GAUGE_LOW: Color = Color::Red;
const C_GAUGE_FRAME: Color = Color::White;
const C_FADED: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Gauge turns red below this many life points.
const LOW_LIFE: u32 = 3;
const GAUGE_CELLS: u32 = 20;

// ── Draw list ─────────────────────────────────────────────────────────────────

/// Draw order within a frame, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Player,
    Shuriken,
    Enemy,
    Bomb,
    Explosion,
}

/// One sprite placed at a world-space center.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRequest {
    pub layer: Layer,
    pub surface: Surface,
    pub at: Vector2<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gauge {
    pub value: u32,
    pub max: u32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub sprites: Vec<DrawRequest>,
    pub score_text: String,
    pub gauge: Gauge,
    pub defeated: bool,
    pub final_score: u32,
}

/// Build the draw list for one frame.  `scroll` is the background speed
/// in world units per frame.
pub fn compose(state: &EntireGameStateInfo, sprites: &SpriteSet, scroll: u64) -> Frame {
    let mut list = background_tiles(state, sprites, scroll);

    list.push(DrawRequest {
        layer: Layer::Player,
        surface: player_surface(&state.player, sprites),
        at: state.player.rect.center,
    });
    list.extend(state.shurikens.values().map(|s| DrawRequest {
        layer: Layer::Shuriken,
        surface: sprites.shuriken(s.facing),
        at: s.rect.center,
    }));
    list.extend(state.enemies.values().map(|e| DrawRequest {
        layer: Layer::Enemy,
        surface: sprites.alien(e.kind).clone(),
        at: e.rect.center,
    }));
    list.extend(state.bombs.values().map(|b| DrawRequest {
        layer: Layer::Bomb,
        surface: sprites.bomb(b.color),
        at: b.rect.center,
    }));
    list.extend(state.explosions.values().map(|x| DrawRequest {
        layer: Layer::Explosion,
        surface: sprites.explosion[x.frame()].clone(),
        at: x.rect.center,
    }));

    let color = if state.life.value < LOW_LIFE { C_GAUGE_LOW } else { C_GAUGE_OK };
    Frame {
        sprites: list,
        score_text: format!("Score: {}", state.score),
        gauge: Gauge {
            value: state.life.value,
            max: state.life.max,
            color,
        },
        defeated: state.status == GameStatus::Defeated,
        final_score: state.score,
    }
}

/// Two mirrored layers tiled across twice the playfield width, scrolling
/// left and wrapping every two widths.
fn background_tiles(state: &EntireGameStateInfo, sprites: &SpriteSet, scroll: u64) -> Vec<DrawRequest> {
    let w = state.field.width;
    let period = (2.0 * w) as u64;
    let offset = if period == 0 { 0.0 } else { (state.frame * scroll % period) as f32 };
    let mirrored = sprites.background.mirror();

    (0..4)
        .map(|i| DrawRequest {
            layer: Layer::Background,
            surface: if i % 2 == 0 {
                sprites.background.clone()
            } else {
                mirrored.clone()
            },
            at: Vector2::new(-offset + i as f32 * w + w / 2.0, state.field.height / 2.0),
        })
        .collect()
}

/// Sprite for the player this frame; flickers every 4 ticks while
/// invulnerable.
pub fn player_surface(player: &Player, sprites: &SpriteSet) -> Surface {
    match player.pose {
        Pose::Joy => sprites.player.joy.clone(),
        Pose::Defeated => sprites.player.defeated.clone(),
        Pose::Normal => sprites.player.facing(player.facing, is_faded(player)).clone(),
    }
}

pub fn is_faded(player: &Player) -> bool {
    match player.guard {
        Guard::Invulnerable { remaining } => (remaining / 4).rem_euclid(2) == 1,
        Guard::Normal => false,
    }
}

// ── Terminal mapping ──────────────────────────────────────────────────────────

/// Maps world coordinates onto terminal cells.  The bottom row is kept
/// for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field: Playfield,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: Playfield) -> Self {
        Self { cols, rows, field }
    }

    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    /// Cell for a world point, or `None` when it falls off the play area.
    pub fn cell(&self, at: Vector2<f32>) -> Option<(u16, u16)> {
        let col = (at.x / self.field.width * self.cols as f32).floor();
        let row = (at.y / self.field.height * self.play_rows() as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.play_rows() as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Alternate screen, hidden cursor, and key-release reporting where the
/// terminal supports it.  Returns whether keyboard enhancement is active.
pub fn enter_screen<W: Write>(out: &mut W) -> std::io::Result<bool> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

pub fn restore_screen<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for request in &frame.sprites {
        match request.layer {
            Layer::Background => draw_background_tile(out, request, view)?,
            _ => draw_sprite(out, request, view)?,
        }
    }

    draw_hud(out, frame, view)?;

    if frame.defeated {
        draw_game_over(out, frame, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, request: &DrawRequest, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(request.at) else {
        return Ok(());
    };
    let text = request.surface.text();
    let width = text.chars().count() as u16;
    let col = col.saturating_sub(width / 2).min(view.cols.saturating_sub(width));
    let color = if request.surface.translucent { C_FADED } else { request.surface.color };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// A sparse star field; the mirrored layer reflects the pattern so the
/// seam between tiles lines up.
fn draw_background_tile<W: Write>(
    out: &mut W,
    request: &DrawRequest,
    view: &Viewport,
) -> std::io::Result<()> {
    let w = view.field.width;
    let origin = request.at.x - w / 2.0;
    out.queue(style::SetForegroundColor(request.surface.color))?;

    for row in 0..view.play_rows() {
        for k in 0..3u32 {
            let mut frac = ((row as u32 * 37 + k * 53 + 11) % 97) as f32 / 97.0;
            if request.surface.mirrored {
                frac = 1.0 - frac;
            }
            let world_x = origin + frac * w;
            let col = (world_x / w * view.cols as f32).floor();
            if col < 0.0 || col >= view.cols as f32 {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row))?;
            out.queue(Print(&request.surface.glyph))?;
        }
    }
    Ok(())
}

// ── HUD (last row) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, view: &Viewport) -> std::io::Result<()> {
    let row = view.rows.saturating_sub(1);

    // Score — left
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&frame.score_text))?;

    // Controls — centre
    let hint = "Arrows/WASD: Move  X/Shift: Boost  Space: Shuriken  Q: Quit";
    let hx = (view.cols / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    // Life gauge — right
    let filled = gauge_cells(&frame.gauge);
    let bar_x = view.cols.saturating_sub(GAUGE_CELLS as u16 + 8);
    out.queue(cursor::MoveTo(bar_x, row))?;
    out.queue(style::SetForegroundColor(C_GAUGE_FRAME))?;
    out.queue(Print("Life ["))?;
    out.queue(style::SetForegroundColor(frame.gauge.color))?;
    out.queue(Print("█".repeat(filled as usize)))?;
    out.queue(Print(" ".repeat((GAUGE_CELLS - filled) as usize)))?;
    out.queue(style::SetForegroundColor(C_GAUGE_FRAME))?;
    out.queue(Print("]"))?;

    Ok(())
}

/// Filled cells of the life bar, proportional to remaining life.
pub fn gauge_cells(gauge: &Gauge) -> u32 {
    if gauge.max == 0 {
        return 0;
    }
    (gauge.value.min(gauge.max) * GAUGE_CELLS).div_ceil(gauge.max)
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, frame: &Frame, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", frame.final_score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
