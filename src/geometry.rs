//! Cached measurements used as decision inputs.
//!
//! A snapshot is only as fresh as its last [`GeometrySnapshot::refresh`]. The
//! rolling-off header position in particular drifts when the page is resized
//! without a refresh.

use serde::{Deserialize, Serialize};

use crate::config::StickyConfig;
use crate::surface::{RenderSurface, TablePart};

/// Measurements of an original header/footer section and its sticky clone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    pub outer_height: f64,
    pub width: f64,
    pub offset_top: f64,
    pub sticky_outer_height: f64,
    pub sticky_offset_top: f64,
}

/// Position and height of the last body row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RowGeometry {
    pub offset_top: f64,
    pub height: f64,
}

impl RowGeometry {
    pub fn offset_bottom(&self) -> f64 {
        self.offset_top + self.height
    }
}

/// An original header/footer section and the sticky copy made from it.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyPair<E> {
    pub original: E,
    pub sticky: E,
}

/// Elements a snapshot is measured from.
#[derive(Debug, Clone, PartialEq)]
pub struct TableParts<E> {
    pub table: E,
    pub header: Option<StickyPair<E>>,
    pub footer: Option<StickyPair<E>>,
    pub body: Option<E>,
}

/// Everything the header and footer decisions read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Present when the header is stuck and the table has a `<thead>`.
    pub header: Option<SectionGeometry>,
    /// Present when the footer is stuck and the table has a `<tfoot>`.
    pub footer: Option<SectionGeometry>,
    /// `None` for a table without body rows.
    pub last_row: Option<RowGeometry>,
    pub table_offset_top: f64,
    pub body_outer_height: f64,
}

impl GeometrySnapshot {
    /// Measure `parts` on `surface`. Read-only.
    pub fn refresh<S: RenderSurface>(
        surface: &S,
        parts: &TableParts<S::Element>,
        config: &StickyConfig,
    ) -> Self {
        let measure = |pair: &StickyPair<S::Element>| SectionGeometry {
            outer_height: surface.outer_height(&pair.original),
            width: surface.width(&pair.original),
            offset_top: surface.offset_top(&pair.original),
            sticky_outer_height: surface.outer_height(&pair.sticky),
            sticky_offset_top: surface.offset_top(&pair.sticky),
        };

        let header = if config.stick_header {
            parts.header.as_ref().map(measure)
        } else {
            None
        };
        let footer = if config.stick_footer {
            parts.footer.as_ref().map(measure)
        } else {
            None
        };

        let last_row = surface
            .find_part(&parts.table, TablePart::LastBodyRow)
            .map(|row| RowGeometry {
                offset_top: surface.offset_top(&row),
                height: surface.outer_height(&row),
            });

        Self {
            header,
            footer,
            last_row,
            table_offset_top: surface.offset_top(&parts.table),
            body_outer_height: parts
                .body
                .as_ref()
                .map_or(0.0, |body| surface.outer_height(body)),
        }
    }

    /// Height the footer decision compares against the viewport.
    ///
    /// The header is only counted when it is being stuck, matching the
    /// sections this snapshot measured.
    pub fn table_height(&self) -> f64 {
        let footer = self.footer.map_or(0.0, |f| f.outer_height);
        let header = self.header.map_or(0.0, |h| h.outer_height);
        self.body_outer_height + footer + header
    }
}
