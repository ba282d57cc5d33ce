//! Per-table options and the caller-chosen resize strategy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StickyError};

/// Options for a single sticky table. Immutable once the table is applied.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyConfig {
    /// Clone the `<thead>` and pin it to the top of the viewport.
    pub stick_header: bool,
    /// Clone the `<tfoot>` and pin it to the bottom of the viewport.
    pub stick_footer: bool,
    /// Distance in pixels from the top of the viewport at which the header pins
    /// (e.g. the height of a fixed navigation bar).
    pub offset_height: f64,
    pub original_header_class_name: String,
    pub original_footer_class_name: String,
    pub cloned_header_class_name: String,
    pub cloned_footer_class_name: String,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            stick_header: true,
            stick_footer: false,
            offset_height: 0.0,
            original_header_class_name: "original-header".to_string(),
            original_footer_class_name: "original-footer".to_string(),
            cloned_header_class_name: "sticky-header".to_string(),
            cloned_footer_class_name: "sticky-footer".to_string(),
        }
    }
}

impl StickyConfig {
    /// Parse options from a JSON object, filling in defaults.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or values rejected by [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values a rendering surface could not use.
    ///
    /// # Errors
    /// Returns [`StickyError::Config`] for a non-finite offset or a class name
    /// that is empty or contains whitespace.
    pub fn validate(&self) -> Result<()> {
        if !self.offset_height.is_finite() {
            return Err(StickyError::Config(format!(
                "offset_height must be finite, got {}",
                self.offset_height
            )));
        }
        for (field, value) in [
            ("original_header_class_name", &self.original_header_class_name),
            ("original_footer_class_name", &self.original_footer_class_name),
            ("cloned_header_class_name", &self.cloned_header_class_name),
            ("cloned_footer_class_name", &self.cloned_footer_class_name),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(StickyError::Config(format!(
                    "{field} must be a single non-empty class name, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// How the host's resize signal is turned into geometry refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResizeStrategy {
    /// Refresh on every raw resize event.
    #[default]
    Raw,
    /// Refresh once the resize signal has been quiet for `delay_ms`.
    Coalesced { delay_ms: u32 },
}

impl ResizeStrategy {
    /// Debounce delay, or `None` for raw handling.
    pub fn delay_ms(self) -> Option<u32> {
        match self {
            Self::Raw => None,
            Self::Coalesced { delay_ms } => Some(delay_ms),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StickyConfig::default();
        assert!(config.stick_header);
        assert!(!config.stick_footer);
        assert_eq!(config.offset_height, 0.0);
        assert_eq!(config.cloned_header_class_name, "sticky-header");
        assert_eq!(config.original_footer_class_name, "original-footer");
    }

    #[test]
    fn test_partial_json_merges_defaults() {
        let config =
            StickyConfig::from_json(r#"{"stick_footer": true, "offset_height": 20}"#).unwrap();
        assert!(config.stick_header);
        assert!(config.stick_footer);
        assert_eq!(config.offset_height, 20.0);
        assert_eq!(config.cloned_footer_class_name, "sticky-footer");
    }

    #[test]
    fn test_rejects_bad_class_name() {
        let err = StickyConfig::from_json(r#"{"cloned_header_class_name": "a b"}"#).unwrap_err();
        assert!(matches!(err, StickyError::Config(_)));
        let err = StickyConfig::from_json(r#"{"original_header_class_name": ""}"#).unwrap_err();
        assert!(matches!(err, StickyError::Config(_)));
    }

    #[test]
    fn test_rejects_non_finite_offset() {
        let config = StickyConfig {
            offset_height: f64::NAN,
            ..StickyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resize_strategy_json() {
        let raw: ResizeStrategy = serde_json::from_str(r#"{"kind": "raw"}"#).unwrap();
        assert_eq!(raw.delay_ms(), None);
        let coalesced: ResizeStrategy =
            serde_json::from_str(r#"{"kind": "coalesced", "delay_ms": 150}"#).unwrap();
        assert_eq!(coalesced.delay_ms(), Some(150));
    }
}
