//! GridView: encodes grid cells into terminal commands.
//!
//! Grid `(x, y)` is drawn at terminal column `x * 2`, row `y`. Both encoders
//! build a byte sequence without touching stdout, so they can be unit-tested.

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::cell_view::{render_cell, RenderContext};
use crate::core::{Cell, DirtySet, Grid};
use crate::style::{apply_style_into, CellStyle};
use crate::types::Position;

/// Encode a full-grid redraw into `out`.
pub fn encode_full_into(grid: &Grid, ctx: &RenderContext, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..grid.height() {
        if let Some(row) = grid.row(y) {
            encode_run(row, ctx, out, &mut current_style)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the cells in `dirty` into `out`.
///
/// Horizontally adjacent dirty cells share one cursor move.
pub fn encode_dirty_into(
    grid: &Grid,
    dirty: &DirtySet,
    ctx: &RenderContext,
    out: &mut Vec<u8>,
) -> Result<()> {
    if dirty.is_empty() {
        return Ok(());
    }

    let mut current_style: Option<CellStyle> = None;
    for_each_dirty_run(grid, dirty, |cells| {
        encode_run(cells, ctx, out, &mut current_style)
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_run(
    cells: &[Cell],
    ctx: &RenderContext,
    out: &mut Vec<u8>,
    current_style: &mut Option<CellStyle>,
) -> Result<()> {
    let Some((col, row)) = cells.first().and_then(|c| c.pos.terminal_origin()) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;

    for cell in cells {
        let glyph = render_cell(cell, ctx);
        let style = glyph.tone.style();
        if *current_style != Some(style) {
            apply_style_into(out, style)?;
            *current_style = Some(style);
        }
        out.queue(Print(glyph.text))?;
    }
    Ok(())
}

/// Visit dirty cells as row runs, top to bottom and left to right.
fn for_each_dirty_run(
    grid: &Grid,
    dirty: &DirtySet,
    mut f: impl FnMut(&[Cell]) -> Result<()>,
) -> Result<()> {
    let mut sorted: Vec<Position> = dirty.iter().copied().filter(|p| grid.contains(*p)).collect();
    sorted.sort_unstable_by_key(|p| (p.y, p.x));

    let mut i = 0;
    while i < sorted.len() {
        let start = sorted[i];
        let mut end = i + 1;
        while end < sorted.len()
            && sorted[end].y == start.y
            && sorted[end].x == sorted[end - 1].x + 1
        {
            end += 1;
        }

        if let Some(row) = grid.row(start.y) {
            let x0 = start.x as usize;
            f(&row[x0..x0 + (end - i)])?;
        }
        i = end;
    }

    Ok(())
}
