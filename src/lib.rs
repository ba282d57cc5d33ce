//! stickytable - sticky table headers and footers
//!
//! Keeps a table's header and/or footer visible while the page scrolls:
//! - The `<thead>`/`<tfoot>` is cloned next to the original
//! - The clone is pinned to the viewport while the table scrolls past
//! - Near the last row the header rolls off with the table
//! - Outside that window the original is shown in normal flow
//!
//! Positioning decisions are pure functions over a [`GeometrySnapshot`]; all
//! geometry queries and style writes go through a [`RenderSurface`], so the
//! same logic drives the browser DOM (`web::DomSurface`, wasm32 only) and the
//! in-memory [`HeadlessSurface`].
//!
//! # Usage (Rust)
//!
//! ```
//! use stickytable::{HeadlessSurface, ScrollDispatcher, StickyConfig, Placement};
//!
//! let mut surface = HeadlessSurface::new(800.0);
//! let table = surface.create("table");
//! let thead = surface.create_child(&table, "thead");
//! surface.set_box(&thead, 100.0, 40.0, 600.0);
//! let tbody = surface.create_child(&table, "tbody");
//! let row = surface.create_child(&tbody, "tr");
//! surface.set_box(&row, 2000.0, 20.0, 600.0);
//!
//! let mut dispatcher = ScrollDispatcher::new(surface);
//! let handle = dispatcher.apply(&table, StickyConfig::default())?;
//! dispatcher.scroll_to(150.0);
//! let placement = dispatcher.instance(handle).and_then(|t| t.header_placement());
//! assert_eq!(placement, Some(Placement::Fixed { top: 0.0 }));
//! # Ok::<(), stickytable::StickyError>(())
//! ```

pub mod columns;
pub mod config;
pub mod decision;
pub mod dispatcher;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod scenario;
pub mod style;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::{ResizeStrategy, StickyConfig};
pub use decision::{decide, decide_footer, decide_header, Placement};
pub use dispatcher::{ScrollDispatcher, TableHandle, TableInstance, TableState};
pub use error::StickyError;
pub use geometry::{GeometrySnapshot, RowGeometry, SectionGeometry, StickyPair, TableParts};
pub use headless::{HeadlessSurface, NodeId};
pub use scenario::{Frame, Scenario, ScrollRange};
pub use surface::{Position, RenderSurface, TablePart};

#[cfg(target_arch = "wasm32")]
pub use web::{init_console_logger, set_log_level, DomSurface, StickyTables};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
