//! Rendering surface trait for pluggable hosts.
//!
//! This module defines the `RenderSurface` trait that abstracts every geometry
//! query and style mutation the sticky logic needs, so the browser DOM
//! (`web::DomSurface`) and the in-memory `HeadlessSurface` can be used
//! interchangeably.

/// Structural parts of a table looked up through the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePart {
    /// The `<thead>` section.
    Header,
    /// The `<tfoot>` section.
    Footer,
    /// The `<tbody>` section.
    Body,
    /// The last `<tr>` that is a direct child of the `<tbody>`.
    LastBodyRow,
}

impl TablePart {
    /// Tag name of the cells whose widths are synced for this section.
    pub fn cell_tag(self) -> &'static str {
        match self {
            Self::Header => "th",
            _ => "td",
        }
    }
}

/// CSS `position` values the sticky elements switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Fixed,
    Absolute,
}

impl Position {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Absolute => "absolute",
        }
    }
}

/// Geometry queries and mutations on a page-rendering surface.
///
/// All lengths are CSS pixels; offsets are relative to the document, not the
/// viewport. Queries on elements the surface no longer knows return `0.0`.
pub trait RenderSurface {
    /// Handle to an element on the surface.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Find a structural part of `table`, if present.
    fn find_part(&self, table: &Self::Element, part: TablePart) -> Option<Self::Element>;

    /// Cells with the given tag inside `section`, in document order.
    fn cells(&self, section: &Self::Element, tag: &str) -> Vec<Self::Element>;

    /// Border-box height.
    fn outer_height(&self, element: &Self::Element) -> f64;

    /// Border-box width.
    fn outer_width(&self, element: &Self::Element) -> f64;

    /// Content width.
    fn width(&self, element: &Self::Element) -> f64;

    /// Top edge relative to the document.
    fn offset_top(&self, element: &Self::Element) -> f64;

    /// Force the border-box width of `element`.
    fn set_outer_width(&mut self, element: &Self::Element, width: f64);

    /// Deep-clone `element` and insert the clone as its next sibling.
    fn clone_after(&mut self, element: &Self::Element) -> Option<Self::Element>;

    /// Remove `element` from the surface.
    fn remove(&mut self, element: &Self::Element);

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    /// Set an inline style property.
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    /// Drop an inline style property so the stylesheet value applies again.
    fn remove_style(&mut self, element: &Self::Element, property: &str);

    /// Current vertical scroll offset of the document.
    fn scroll_top(&self) -> f64;

    /// Height of the visual viewport.
    fn viewport_height(&self) -> f64;
}
