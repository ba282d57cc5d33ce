//! Keep cloned header/footer cells as wide as the originals.
//!
//! A clone pulled out of the table flow no longer shares the table's column
//! layout, so each cell gets the original cell's outer width.

use crate::surface::{RenderSurface, TablePart};

/// Copy outer widths from `original` cells onto the matching `sticky` cells.
///
/// Cells are paired by index; cells without a partner are left alone.
pub fn sync_widths<S: RenderSurface>(
    surface: &mut S,
    part: TablePart,
    original: &S::Element,
    sticky: &S::Element,
) {
    let tag = part.cell_tag();
    let widths: Vec<f64> = surface
        .cells(original, tag)
        .iter()
        .map(|cell| surface.outer_width(cell))
        .collect();
    let targets = surface.cells(sticky, tag);
    for (cell, width) in targets.iter().zip(widths) {
        surface.set_outer_width(cell, width);
    }
}
