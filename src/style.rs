//! Inline style writes for original and sticky elements.
//!
//! No decisions are made here; callers pass the outcome in.

use crate::surface::{Position, RenderSurface};

/// Stacking order of the sticky header. Above the footer so the header wins
/// when both are pinned at the same edge.
pub const HEADER_Z_INDEX: u32 = 100;
/// Stacking order of the sticky footer.
pub const FOOTER_Z_INDEX: u32 = 90;

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Setup styling for a freshly cloned (or re-measured) sticky element.
pub fn prepare<S: RenderSurface>(
    surface: &mut S,
    sticky: &S::Element,
    z_index: u32,
    width: f64,
    top: f64,
) {
    surface.set_style(sticky, "position", Position::Fixed.as_css());
    surface.set_style(sticky, "top", &px(top));
    surface.set_style(sticky, "overflow", "hidden");
    surface.set_style(sticky, "width", &px(width));
    surface.set_style(sticky, "display", "none");
    surface.set_style(sticky, "z-index", &z_index.to_string());
}

/// Position `sticky` at `top` pixels.
pub fn pin<S: RenderSurface>(surface: &mut S, sticky: &S::Element, position: Position, top: f64) {
    surface.set_style(sticky, "position", position.as_css());
    surface.set_style(sticky, "top", &px(top));
}

/// Original back in view, sticky copy hidden.
pub fn reveal<S: RenderSurface>(surface: &mut S, original: &S::Element, sticky: &S::Element) {
    surface.set_style(original, "visibility", "visible");
    surface.set_style(sticky, "display", "none");
}

/// Original hidden (keeping its space in the flow), sticky copy shown.
pub fn conceal<S: RenderSurface>(surface: &mut S, original: &S::Element, sticky: &S::Element) {
    surface.set_style(original, "visibility", "hidden");
    surface.remove_style(sticky, "display");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;

    #[test]
    fn test_prepare_hides_and_stacks() {
        let mut surface = HeadlessSurface::new(800.0);
        let node = surface.create("thead");
        prepare(&mut surface, &node, HEADER_Z_INDEX, 612.5, 100.0);
        assert_eq!(surface.style(&node, "display"), Some("none"));
        assert_eq!(surface.style(&node, "z-index"), Some("100"));
        assert_eq!(surface.style(&node, "width"), Some("612.5px"));
        assert_eq!(surface.style(&node, "top"), Some("100px"));
        assert_eq!(surface.style(&node, "overflow"), Some("hidden"));
    }

    #[test]
    fn test_conceal_then_reveal() {
        let mut surface = HeadlessSurface::new(800.0);
        let original = surface.create("thead");
        let sticky = surface.create("thead");
        surface.set_style(&sticky, "display", "none");

        conceal(&mut surface, &original, &sticky);
        assert_eq!(surface.style(&original, "visibility"), Some("hidden"));
        assert_eq!(surface.style(&sticky, "display"), None);

        reveal(&mut surface, &original, &sticky);
        assert_eq!(surface.style(&original, "visibility"), Some("visible"));
        assert_eq!(surface.style(&sticky, "display"), Some("none"));
    }

    #[test]
    fn test_pin_writes_position_and_top() {
        let mut surface = HeadlessSurface::new(800.0);
        let sticky = surface.create("tfoot");
        pin(&mut surface, &sticky, Position::Absolute, 1920.0);
        assert_eq!(surface.style(&sticky, "position"), Some("absolute"));
        assert_eq!(surface.style(&sticky, "top"), Some("1920px"));
    }
}
