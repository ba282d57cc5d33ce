//! Header positioning decision tests
//!
//! Covers the three header outcomes, the strict/inclusive boundaries between
//! them, and purity of the decision function.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use stickytable::{decide_header, Placement, RowGeometry, SectionGeometry};
use test_case::test_case;

/// Header at y=100, 40px tall with a 40px clone, last row at y=2000.
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

// =============================================================================
// SCENARIO
// =============================================================================

#[test_case(0.0 => Placement::Unstuck ; "page top")]
#[test_case(50.0 => Placement::Unstuck ; "above header")]
#[test_case(100.0 => Placement::Unstuck ; "exactly at header is not pinned")]
#[test_case(100.5 => Placement::Fixed { top: 0.0 } ; "just past header")]
#[test_case(150.0 => Placement::Fixed { top: 0.0 } ; "inside table")]
#[test_case(1919.0 => Placement::Fixed { top: 0.0 } ; "last pixel before roll off")]
#[test_case(1920.0 => Placement::RollingOff { top: 1920.0 } ; "roll off boundary")]
#[test_case(1959.0 => Placement::RollingOff { top: 1920.0 } ; "rolling off")]
#[test_case(5000.0 => Placement::RollingOff { top: 1920.0 } ; "far below table")]
fn test_header_scenario(scroll_top: f64) -> Placement {
    decide_header(scroll_top, 0.0, &header(), &last_row())
}

#[test_case(20.0, 79.0 => Placement::Unstuck ; "offset keeps unstuck above")]
#[test_case(20.0, 80.0 => Placement::Unstuck ; "offset strict boundary")]
#[test_case(20.0, 81.0 => Placement::Fixed { top: 20.0 } ; "offset pinned below nav")]
#[test_case(20.0, 1899.0 => Placement::Fixed { top: 20.0 } ; "offset before roll off")]
#[test_case(20.0, 1900.0 => Placement::RollingOff { top: 1920.0 } ; "offset roll off boundary")]
fn test_header_with_offset_height(offset_height: f64, scroll_top: f64) -> Placement {
    decide_header(scroll_top, offset_height, &header(), &last_row())
}

// =============================================================================
// WINDOW PROPERTY
// =============================================================================

#[test]
fn test_unstuck_exactly_outside_window() {
    let header = header();
    let row = last_row();
    for offset_height in [0.0, 15.0, 64.0] {
        let window_start = header.offset_top - offset_height;
        let window_end =
            row.offset_top - header.sticky_outer_height - header.outer_height - offset_height;

        let mut s = -200.0;
        while s < 2500.0 {
            let placement = decide_header(s, offset_height, &header, &row);
            if s <= window_start {
                assert_eq!(placement, Placement::Unstuck, "s={s} offset={offset_height}");
            } else if s < window_end {
                assert_eq!(
                    placement,
                    Placement::Fixed { top: offset_height },
                    "s={s} offset={offset_height}"
                );
            } else {
                assert!(
                    matches!(placement, Placement::RollingOff { .. }),
                    "s={s} offset={offset_height}"
                );
            }
            s += 7.5;
        }
    }
}

#[test]
fn test_handoff_has_no_gap() {
    // Fixed sticky bottom edge at the last fixed offset and the absolute top
    // at the first rolling offset meet at the same page coordinate.
    let header = header();
    let row = last_row();
    let boundary = row.offset_top - header.sticky_outer_height - header.outer_height;

    let Placement::RollingOff { top } = decide_header(boundary, 0.0, &header, &row) else {
        panic!("expected rolling off at boundary");
    };
    // Fixed at top 0 means page y == scroll offset
    assert_eq!(top, boundary);
    assert!(matches!(
        decide_header(boundary - 1.0, 0.0, &header, &row),
        Placement::Fixed { .. }
    ));
}

#[test]
fn test_decision_is_pure() {
    let header = header();
    let row = last_row();
    for s in [0.0, 99.0, 101.0, 1919.0, 1920.0, 3000.0] {
        assert_eq!(
            decide_header(s, 0.0, &header, &row),
            decide_header(s, 0.0, &header, &row)
        );
    }
}

#[test]
fn test_short_table_rolls_off_immediately() {
    // Last row sits right under the header: no room to pin at all
    let header = header();
    let row = RowGeometry {
        offset_top: 150.0,
        height: 20.0,
    };
    assert_eq!(decide_header(0.0, 0.0, &header, &row), Placement::Unstuck);
    assert_eq!(
        decide_header(80.0, 0.0, &header, &row),
        Placement::RollingOff { top: 70.0 }
    );
    assert_eq!(
        decide_header(101.0, 0.0, &header, &row),
        Placement::RollingOff { top: 70.0 }
    );
}
