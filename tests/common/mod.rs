//! Common test utilities for building tables on a `HeadlessSurface`.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_lossless
)]

use stickytable::{HeadlessSurface, NodeId, RenderSurface, TablePart};

// ============================================================================
// Table Builder
// ============================================================================

/// Lays out a table top to bottom: optional header, `rows` body rows, optional
/// footer. Every section spans `width` pixels.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    top: f64,
    width: f64,
    header_height: Option<f64>,
    footer_height: Option<f64>,
    rows: u32,
    row_height: f64,
    columns: Vec<f64>,
}

/// Node ids of a built table.
#[derive(Debug, Clone)]
pub struct BuiltTable {
    pub table: NodeId,
    pub thead: Option<NodeId>,
    pub tbody: NodeId,
    pub tfoot: Option<NodeId>,
    pub last_row: Option<NodeId>,
}

impl TableBuilder {
    pub fn new(top: f64) -> Self {
        Self {
            top,
            width: 600.0,
            header_height: Some(40.0),
            footer_height: None,
            rows: 0,
            row_height: 20.0,
            columns: vec![200.0, 150.0, 250.0],
        }
    }

    pub fn header(mut self, height: Option<f64>) -> Self {
        self.header_height = height;
        self
    }

    pub fn footer(mut self, height: Option<f64>) -> Self {
        self.footer_height = height;
        self
    }

    pub fn rows(mut self, rows: u32, row_height: f64) -> Self {
        self.rows = rows;
        self.row_height = row_height;
        self
    }

    pub fn columns(mut self, widths: &[f64]) -> Self {
        self.columns = widths.to_vec();
        self
    }

    pub fn build(&self, surface: &mut HeadlessSurface) -> BuiltTable {
        let table = surface.create("table");
        let mut y = self.top;

        let thead = self.header_height.map(|h| {
            let thead = surface.create_child(&table, "thead");
            surface.set_box(&thead, y, h, self.width);
            let tr = surface.create_child(&thead, "tr");
            surface.set_box(&tr, y, h, self.width);
            for w in &self.columns {
                let th = surface.create_child(&tr, "th");
                surface.set_box(&th, y, h, *w);
            }
            y += h;
            thead
        });

        let tbody = surface.create_child(&table, "tbody");
        let body_top = y;
        let mut last_row = None;
        for _ in 0..self.rows {
            let tr = surface.create_child(&tbody, "tr");
            surface.set_box(&tr, y, self.row_height, self.width);
            y += self.row_height;
            last_row = Some(tr);
        }
        surface.set_box(&tbody, body_top, y - body_top, self.width);

        let tfoot = self.footer_height.map(|h| {
            let tfoot = surface.create_child(&table, "tfoot");
            surface.set_box(&tfoot, y, h, self.width);
            let tr = surface.create_child(&tfoot, "tr");
            for w in &self.columns {
                let td = surface.create_child(&tr, "td");
                surface.set_box(&td, y, h, *w);
            }
            y += h;
            tfoot
        });

        surface.set_box(&table, self.top, y - self.top, self.width);

        BuiltTable {
            table,
            thead,
            tbody,
            tfoot,
            last_row,
        }
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// The sticky copy that follows `original` in its parent.
pub fn sticky_of(surface: &HeadlessSurface, table: &NodeId, part: TablePart) -> NodeId {
    let original = surface.find_part(table, part).expect("section exists");
    let siblings = surface.children(table);
    let at = siblings.iter().position(|n| *n == original).unwrap();
    siblings[at + 1]
}

pub fn assert_shown(surface: &HeadlessSurface, sticky: &NodeId) {
    assert_eq!(surface.style(sticky, "display"), None, "sticky should be shown");
}

pub fn assert_hidden(surface: &HeadlessSurface, sticky: &NodeId) {
    assert_eq!(
        surface.style(sticky, "display"),
        Some("none"),
        "sticky should be hidden"
    );
}

pub fn assert_pinned(surface: &HeadlessSurface, sticky: &NodeId, position: &str, top: &str) {
    assert_eq!(surface.style(sticky, "position"), Some(position));
    assert_eq!(surface.style(sticky, "top"), Some(top));
}
