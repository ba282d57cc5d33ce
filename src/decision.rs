//! Positioning decisions for the sticky header and footer.
//!
//! Both decisions are pure: the same scroll offset, geometry and offset height
//! always produce the same [`Placement`].

use serde::{Deserialize, Serialize};

use crate::config::StickyConfig;
use crate::geometry::{GeometrySnapshot, RowGeometry, SectionGeometry};
use crate::surface::Position;

/// Outcome of a positioning decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Placement {
    /// Sticky element hidden, original visible in normal flow.
    Unstuck,
    /// Sticky element fixed to the viewport at `top`.
    Fixed { top: f64 },
    /// Sticky header anchored to the page above the last row while the table
    /// scrolls away.
    RollingOff { top: f64 },
}

impl Placement {
    pub fn position(self) -> Position {
        match self {
            Self::Unstuck | Self::Fixed { .. } => Position::Fixed,
            Self::RollingOff { .. } => Position::Absolute,
        }
    }

    /// Resting `top` for [`Placement::Unstuck`] is `0`; the element is hidden.
    pub fn top(self) -> f64 {
        match self {
            Self::Unstuck => 0.0,
            Self::Fixed { top } | Self::RollingOff { top } => top,
        }
    }
}

/// Header placement for scroll offset `scroll_top`.
pub fn decide_header(
    scroll_top: f64,
    offset_height: f64,
    header: &SectionGeometry,
    last_row: &RowGeometry,
) -> Placement {
    let pinned_top = scroll_top + offset_height;
    let roll_off_at = last_row.offset_top - header.sticky_outer_height;

    if pinned_top > header.offset_top && pinned_top + header.outer_height < roll_off_at {
        Placement::Fixed { top: offset_height }
    } else if pinned_top + header.outer_height >= roll_off_at {
        Placement::RollingOff {
            top: last_row.offset_top - header.outer_height - header.sticky_outer_height,
        }
    } else {
        Placement::Unstuck
    }
}

/// Footer placement for scroll offset `scroll_top` in a viewport of
/// `viewport_height`.
pub fn decide_footer(
    scroll_top: f64,
    viewport_height: f64,
    snapshot: &GeometrySnapshot,
    footer: &SectionGeometry,
    last_row: &RowGeometry,
) -> Placement {
    let table_height = snapshot.table_height();
    let scrolled_into_table = scroll_top - snapshot.table_offset_top;

    if table_height <= viewport_height || scrolled_into_table <= 0.0 {
        return Placement::Unstuck;
    }

    let bottom_not_reached = table_height - scrolled_into_table > viewport_height;
    let last_row_below_footer =
        last_row.offset_bottom() - scroll_top > viewport_height - footer.sticky_outer_height;

    if bottom_not_reached && last_row_below_footer {
        Placement::Fixed {
            top: viewport_height - footer.sticky_outer_height,
        }
    } else {
        Placement::Unstuck
    }
}

/// Header and footer placements for one scroll offset.
///
/// A side is `None` when it is not stuck (flag off or section missing). A
/// table without body rows resolves both stuck sides to
/// [`Placement::Unstuck`].
pub fn decide(
    scroll_top: f64,
    viewport_height: f64,
    snapshot: &GeometrySnapshot,
    config: &StickyConfig,
) -> (Option<Placement>, Option<Placement>) {
    let header = snapshot.header.filter(|_| config.stick_header).map(|header| {
        snapshot.last_row.map_or(Placement::Unstuck, |row| {
            decide_header(scroll_top, config.offset_height, &header, &row)
        })
    });
    let footer = snapshot.footer.filter(|_| config.stick_footer).map(|footer| {
        snapshot.last_row.map_or(Placement::Unstuck, |row| {
            decide_footer(scroll_top, viewport_height, snapshot, &footer, &row)
        })
    });
    (header, footer)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn header() -> SectionGeometry {
        SectionGeometry {
            outer_height: 40.0,
            width: 600.0,
            offset_top: 100.0,
            sticky_outer_height: 40.0,
            sticky_offset_top: 140.0,
        }
    }

    fn last_row() -> RowGeometry {
        RowGeometry {
            offset_top: 2000.0,
            height: 20.0,
        }
    }

    #[test]
    fn test_header_above_table_is_unstuck() {
        assert_eq!(
            decide_header(50.0, 0.0, &header(), &last_row()),
            Placement::Unstuck
        );
    }

    #[test]
    fn test_header_pins_inside_table() {
        assert_eq!(
            decide_header(150.0, 0.0, &header(), &last_row()),
            Placement::Fixed { top: 0.0 }
        );
    }

    #[test]
    fn test_header_offset_height_moves_pin() {
        // 70 + 30 == 100 is not past the header yet
        assert_eq!(
            decide_header(70.0, 30.0, &header(), &last_row()),
            Placement::Unstuck
        );
        assert_eq!(
            decide_header(71.0, 30.0, &header(), &last_row()),
            Placement::Fixed { top: 30.0 }
        );
    }

    #[test]
    fn test_placement_position_and_top() {
        assert_eq!(Placement::Unstuck.position(), Position::Fixed);
        assert_eq!(Placement::Unstuck.top(), 0.0);
        let rolling = Placement::RollingOff { top: 1920.0 };
        assert_eq!(rolling.position(), Position::Absolute);
        assert_eq!(rolling.top(), 1920.0);
    }

    #[test]
    fn test_decide_skips_disabled_sides() {
        let snapshot = GeometrySnapshot {
            header: Some(header()),
            footer: Some(SectionGeometry::default()),
            last_row: Some(last_row()),
            ..GeometrySnapshot::default()
        };
        let config = StickyConfig::default();
        let (h, f) = decide(150.0, 800.0, &snapshot, &config);
        assert_eq!(h, Some(Placement::Fixed { top: 0.0 }));
        assert_eq!(f, None);
    }

    #[test]
    fn test_decide_without_rows_is_unstuck() {
        let snapshot = GeometrySnapshot {
            header: Some(header()),
            last_row: None,
            ..GeometrySnapshot::default()
        };
        let (h, _) = decide(5000.0, 800.0, &snapshot, &StickyConfig::default());
        assert_eq!(h, Some(Placement::Unstuck));
    }

    #[test]
    fn test_footer_short_table_never_pins() {
        let snapshot = GeometrySnapshot {
            body_outer_height: 300.0,
            table_offset_top: 0.0,
            ..GeometrySnapshot::default()
        };
        let footer = SectionGeometry {
            outer_height: 30.0,
            sticky_outer_height: 30.0,
            ..SectionGeometry::default()
        };
        assert_eq!(
            decide_footer(10.0, 800.0, &snapshot, &footer, &last_row()),
            Placement::Unstuck
        );
    }
}
