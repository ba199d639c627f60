//! CellView: maps one grid cell to a two-column glyph and a color token.
//!
//! This module is pure (no I/O). Writing glyphs to the terminal happens in
//! [`crate::grid_view`].

use crate::core::{Cell, CellKind};
use crate::style::{CellStyle, Rgb};

const BLOCK: &str = "██";
const SHADE: &str = "▒▒";
const BLANK: &str = "  ";
const EXIT: &str = "XX";

const TOP_LEFT: &str = "╔═";
const TOP_RIGHT: &str = "═╗";
const BOTTOM_LEFT: &str = "╚═";
const BOTTOM_RIGHT: &str = "═╝";
const HORIZONTAL: &str = "══";
const LEFT_EDGE: &str = "║ ";
const RIGHT_EDGE: &str = " ║";

/// Facts about the whole grid that a single cell needs to pick its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub width: i32,
    pub height: i32,
    /// Draw the outer wall ring with box-drawing characters.
    pub pretty_walls: bool,
}

impl RenderContext {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pretty_walls: false,
        }
    }

    pub fn with_pretty_walls(mut self, pretty_walls: bool) -> Self {
        self.pretty_walls = pretty_walls;
        self
    }
}

/// Color token of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Wall,
    Floor,
    SelfPlayer,
    OtherPlayer,
    Enemy,
    Treasure,
    CollectedTreasure,
    Default,
}

impl Tone {
    pub fn style(self) -> CellStyle {
        match self {
            Tone::Wall => CellStyle::fg(Rgb::new(139, 139, 131)),
            Tone::Floor => CellStyle::bg(Rgb::new(85, 107, 47)),
            Tone::SelfPlayer => CellStyle::fg(Rgb::new(0, 238, 238)),
            Tone::OtherPlayer => CellStyle::fg(Rgb::new(139, 90, 0)),
            Tone::Enemy => CellStyle::fg(Rgb::new(205, 0, 0)),
            Tone::Treasure => CellStyle::fg(Rgb::new(255, 215, 0)),
            Tone::CollectedTreasure => CellStyle::fg(Rgb::new(190, 190, 190)),
            Tone::Default => CellStyle::default(),
        }
    }
}

/// Two terminal columns of text plus the tone to draw them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub tone: Tone,
}

impl Glyph {
    const fn new(text: &'static str, tone: Tone) -> Self {
        Self { text, tone }
    }
}

pub fn render_cell(cell: &Cell, ctx: &RenderContext) -> Glyph {
    match &cell.kind {
        CellKind::Wall => Glyph::new(wall_text(cell, ctx), Tone::Wall),
        CellKind::Empty => Glyph::new(BLANK, Tone::Floor),
        CellKind::Player { is_self: true, .. } => Glyph::new(BLOCK, Tone::SelfPlayer),
        CellKind::Player { is_self: false, .. } => Glyph::new(BLOCK, Tone::OtherPlayer),
        CellKind::Enemy { .. } => Glyph::new(BLOCK, Tone::Enemy),
        CellKind::Treasure { collected: false } => Glyph::new(BLOCK, Tone::Treasure),
        CellKind::Treasure { collected: true } => Glyph::new(BLOCK, Tone::CollectedTreasure),
        CellKind::Exit => Glyph::new(EXIT, Tone::Default),
    }
}

fn wall_text(cell: &Cell, ctx: &RenderContext) -> &'static str {
    let (x, y) = (cell.pos.x, cell.pos.y);
    let last_x = ctx.width - 1;
    let last_y = ctx.height - 1;

    let left = x == 0;
    let right = x == last_x;
    let top = y == 0;
    let bottom = y == last_y;

    if !(left || right || top || bottom) {
        return SHADE;
    }
    if !ctx.pretty_walls {
        return BLOCK;
    }

    match (left, right, top, bottom) {
        (true, _, true, _) => TOP_LEFT,
        (_, true, true, _) => TOP_RIGHT,
        (true, _, _, true) => BOTTOM_LEFT,
        (_, true, _, true) => BOTTOM_RIGHT,
        (true, _, _, _) => LEFT_EDGE,
        (_, true, _, _) => RIGHT_EDGE,
        _ => HORIZONTAL,
    }
}
