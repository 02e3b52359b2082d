//! BoardView: maps a board snapshot (plus animation state) into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::anim::BoardAnimator;
use crate::core::{BoardLayout, BoardSnapshot, Vec2};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellIndex, ColorId, Palette};

const BG: Rgb = Rgb::new(24, 24, 32);
const DOT: char = '●';
const DOT_SELECTED: char = '◉';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Side panel values that do not live in the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudView<'a> {
    pub last_clear: u32,
    pub last_looped: bool,
    pub message: Option<&'a str>,
}

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub snap: &'a BoardSnapshot,
    pub palette: &'a Palette,
    pub layout: &'a BoardLayout,
    pub anim: Option<&'a BoardAnimator>,
    /// Pointer position while dragging; the line's loose end follows it.
    pub cursor: Option<(u16, u16)>,
    pub hud: HudView<'a>,
}

/// Where the board sits on screen for a given size and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    rows: u16,
    cols: u16,
    cell_w: u16,
    cell_h: u16,
}

const PAD_X: u16 = 2;
const PAD_Y: u16 = 1;

impl BoardGeometry {
    /// Screen position of the dot glyph for `index`.
    pub fn dot_xy(&self, index: CellIndex) -> (u16, u16) {
        let cols = self.cols.max(1) as usize;
        let row = (index / cols) as u16;
        let col = (index % cols) as u16;
        let x = self.dots_x0() + col * self.cell_w;
        let y = self.dots_y0() + (self.rows - 1 - row.min(self.rows - 1)) * self.cell_h;
        (x, y)
    }

    /// The dot under terminal position (x, y); the glyph and one column either side count.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellIndex> {
        let (x0, y0) = (self.dots_x0(), self.dots_y0());
        if y < y0 || (y - y0) % self.cell_h != 0 {
            return None;
        }
        let top_row = (y - y0) / self.cell_h;
        if top_row >= self.rows {
            return None;
        }
        let rx = x.saturating_add(1).checked_sub(x0)?;
        let col = rx / self.cell_w;
        let within = rx % self.cell_w;
        if col >= self.cols || within > 2 {
            return None;
        }
        let row = self.rows - 1 - top_row;
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Screen position for a world position, `None` when it falls outside the frame.
    fn world_to_screen(&self, layout: &BoardLayout, pos: Vec2) -> Option<(u16, u16)> {
        let interval = if layout.interval > 0.0 { layout.interval } else { 1.0 };
        let col_f = pos.x / interval + (self.cols as f32 - 1.0) / 2.0;
        let row_f = pos.y / interval + (self.rows as f32 - 1.0) / 2.0;
        let sx = self.dots_x0() as f32 + col_f * self.cell_w as f32;
        let sy = self.dots_y0() as f32 + (self.rows as f32 - 1.0 - row_f) * self.cell_h as f32;
        let (sx, sy) = (sx.round(), sy.round());
        let inner_top = (self.start_y + 1) as f32;
        let inner_bottom = (self.start_y + self.frame_h - 1) as f32;
        if sx < 0.0 || sy < inner_top || sy >= inner_bottom {
            return None;
        }
        Some((sx as u16, sy as u16))
    }

    fn dots_x0(&self) -> u16 {
        self.start_x + 1 + PAD_X
    }

    fn dots_y0(&self) -> u16 {
        self.start_y + 1 + PAD_Y
    }
}

/// A lightweight terminal renderer for the dots board.
pub struct BoardView {
    /// Terminal columns from one dot to the next.
    cell_w: u16,
    /// Terminal rows from one dot to the next.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 leaves room for connectors and roughly matches glyph aspect ratio.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
        }
    }

    pub fn geometry(&self, rows: u16, cols: u16, viewport: Viewport) -> BoardGeometry {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let frame_w = (cols - 1) * self.cell_w + 1 + 2 * PAD_X + 2;
        let frame_h = (rows - 1) * self.cell_h + 1 + 2 * PAD_Y + 2;
        BoardGeometry {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            rows,
            cols,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render a scene into an existing framebuffer (resized to the viewport).
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let snap = scene.snap;
        let geo = self.geometry(snap.rows, snap.cols, viewport);
        let bg = CellStyle::fg(Rgb::new(80, 80, 90), BG);

        fb.fill_rect(
            geo.start_x + 1,
            geo.start_y + 1,
            geo.frame_w - 2,
            geo.frame_h - 2,
            ' ',
            bg,
        );
        draw_border(fb, &geo, CellStyle::fg(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        let tint = snap
            .path_color
            .and_then(|c| scene.palette.get(c))
            .unwrap_or(Rgb::new(255, 255, 255));
        self.draw_path(fb, &geo, snap, tint);

        for index in 0..snap.cells.len() {
            self.draw_dot(fb, &geo, scene, index);
        }

        if let (Some((cx, cy)), Some(&last)) = (scene.cursor, snap.path.last()) {
            if geo.cell_at(cx, cy) != Some(last) {
                let style = CellStyle {
                    bold: true,
                    ..CellStyle::fg(tint, BG)
                };
                fb.put_char(cx, cy, '+', style);
            }
        }

        self.draw_side_panel(fb, scene, &geo, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_path(&self, fb: &mut FrameBuffer, geo: &BoardGeometry, snap: &BoardSnapshot, tint: Rgb) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::fg(tint, BG)
        };
        for pair in snap.path.windows(2) {
            let (ax, ay) = geo.dot_xy(pair[0]);
            let (bx, by) = geo.dot_xy(pair[1]);
            if ay == by {
                for x in ax.min(bx) + 1..ax.max(bx) {
                    fb.put_char(x, ay, '─', style);
                }
            } else if ax == bx {
                for y in ay.min(by) + 1..ay.max(by) {
                    fb.put_char(ax, y, '│', style);
                }
            }
        }
    }

    fn draw_dot(&self, fb: &mut FrameBuffer, geo: &BoardGeometry, scene: &Scene<'_>, index: CellIndex) {
        let snap = scene.snap;
        let color: ColorId = snap.cells[index];
        let fg = scene.palette.get(color).unwrap_or(Rgb::new(200, 200, 200));

        let moving = scene.anim.and_then(|a| a.position(index));
        let (x, y) = match moving {
            Some(pos) => match geo.world_to_screen(scene.layout, pos) {
                Some(xy) => xy,
                None => return,
            },
            None => geo.dot_xy(index),
        };

        let selected = snap.path.contains(&index);
        let pulsing = scene.anim.map(|a| a.scale(index) > 1.1).unwrap_or(false);
        let ch = if selected || pulsing { DOT_SELECTED } else { DOT };
        let style = CellStyle {
            bold: selected || pulsing,
            ..CellStyle::fg(fg, BG)
        };
        fb.put_char(x, y, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene<'_>,
        geo: &BoardGeometry,
        viewport: Viewport,
    ) {
        let panel_x = geo.start_x.saturating_add(geo.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = CellStyle { dim: true, ..value };
        let snap = scene.snap;

        let mut y = geo.start_y;
        fb.put_str(panel_x, y, "SIZE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.rows as u32, value);
        let rows_w = digits(snap.rows as u32);
        fb.put_char(panel_x + rows_w, y, 'x', value);
        fb.put_u32(panel_x + rows_w + 1, y, snap.cols as u32, value);
        y += 2;

        fb.put_str(panel_x, y, "COLORS", label);
        y += 1;
        for c in 0..snap.num_colors {
            let fg = scene.palette.get(c).unwrap_or_default();
            fb.put_char(panel_x + 2 * c as u16, y, DOT, CellStyle::fg(fg, Rgb::new(0, 0, 0)));
        }
        y += 2;

        fb.put_str(panel_x, y, "CLEARED", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.cleared_total, value);
        y += 2;

        fb.put_str(panel_x, y, "LAST", label);
        y += 1;
        fb.put_u32(panel_x, y, scene.hud.last_clear, value);
        if scene.hud.last_looped {
            fb.put_str(panel_x + digits(scene.hud.last_clear) + 1, y, "LOOP!", label);
        }
        y += 2;

        for line in ["drag: connect", "r: reset", "+/-: rows", "</>: cols", "q: quit"] {
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }

        if let Some(msg) = scene.hud.message {
            y += 1;
            fb.put_str(panel_x, y, msg, label);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, geo: &BoardGeometry, style: CellStyle) {
    let (x, y, w, h) = (geo.start_x, geo.start_y, geo.frame_w, geo.frame_h);
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
