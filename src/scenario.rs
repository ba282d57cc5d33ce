//! Offline replay of scroll offsets against a fixed geometry.
//!
//! A scenario is a JSON document holding options, a [`GeometrySnapshot`], a
//! viewport height and the scroll offsets to evaluate. It lets layout
//! measurements captured from a real page be replayed without a browser.

use serde::{Deserialize, Serialize};

use crate::config::StickyConfig;
use crate::decision::{decide, Placement};
use crate::error::{Result, StickyError};
use crate::geometry::GeometrySnapshot;

/// Upper bound on the offsets one range may expand to.
pub const MAX_RANGE_FRAMES: usize = 1_000_000;

/// Evenly spaced scroll offsets, `from` to `to` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

impl ScrollRange {
    /// Number of offsets in the range.
    ///
    /// # Errors
    /// Returns [`StickyError::Config`] for non-finite bounds, a step that is
    /// not positive, or more than [`MAX_RANGE_FRAMES`] offsets.
    pub fn frame_count(&self) -> Result<usize> {
        if !(self.from.is_finite() && self.to.is_finite()) {
            return Err(StickyError::Config(format!(
                "scroll_range bounds must be finite, got {}..{}",
                self.from, self.to
            )));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(StickyError::Config(format!(
                "scroll_range.step must be positive, got {}",
                self.step
            )));
        }
        if self.from + self.step <= self.from || self.to + self.step <= self.to {
            return Err(StickyError::Config(format!(
                "scroll_range.step {} is lost to rounding at {}",
                self.step, self.to
            )));
        }
        if self.to < self.from {
            return Ok(0);
        }
        let steps = ((self.to - self.from) / self.step).floor();
        if steps >= MAX_RANGE_FRAMES as f64 {
            return Err(StickyError::Config(format!(
                "scroll_range expands to more than {MAX_RANGE_FRAMES} offsets"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps as usize;
        Ok(steps + 1)
    }

    /// The offsets, computed from an integer counter so large `from` values
    /// cannot stall on rounding.
    ///
    /// # Errors
    /// Same as [`Self::frame_count`].
    pub fn offsets(&self) -> Result<Vec<f64>> {
        let count = self.frame_count()?;
        #[allow(clippy::cast_precision_loss)]
        let offsets = (0..count)
            .map(|i| self.from + i as f64 * self.step)
            .collect();
        Ok(offsets)
    }
}

/// Input document for [`Scenario::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: StickyConfig,
    pub geometry: GeometrySnapshot,
    pub viewport_height: f64,
    #[serde(default)]
    pub scroll: Vec<f64>,
    #[serde(default)]
    pub scroll_range: Option<ScrollRange>,
}

/// Placements at one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub scroll_top: f64,
    pub header: Option<Placement>,
    pub footer: Option<Placement>,
}

impl Scenario {
    /// Parse and validate a scenario document.
    ///
    /// # Errors
    /// Returns an error for malformed JSON, invalid options, or a scroll range
    /// that [`ScrollRange::frame_count`] rejects.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        if let Some(range) = scenario.scroll_range {
            range.frame_count()?;
        }
        Ok(scenario)
    }

    /// Explicit offsets first, then the range. A range that fails validation
    /// contributes nothing.
    pub fn offsets(&self) -> Vec<f64> {
        let mut offsets = self.scroll.clone();
        if let Some(range) = self.scroll_range {
            match range.offsets() {
                Ok(more) => offsets.extend(more),
                Err(e) => log::warn!("[sticky] skipping scroll range: {e}"),
            }
        }
        offsets
    }

    /// Evaluate every offset.
    pub fn run(&self) -> Vec<Frame> {
        // Only the stuck sections count toward the table height
        let mut geometry = self.geometry;
        if !self.config.stick_header {
            geometry.header = None;
        }
        if !self.config.stick_footer {
            geometry.footer = None;
        }

        self.offsets()
            .into_iter()
            .map(|scroll_top| {
                let (header, footer) =
                    decide(scroll_top, self.viewport_height, &geometry, &self.config);
                Frame {
                    scroll_top,
                    header,
                    footer,
                }
            })
            .collect()
    }
}
