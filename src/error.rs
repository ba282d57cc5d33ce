//! Structured error types for stickytable.
//!
//! Missing headers, footers or body rows are not errors: the affected feature
//! is switched off for that table. Only invalid input surfaces here.

use crate::dispatcher::TableHandle;

/// All errors that can occur while applying or driving sticky tables.
#[derive(Debug, thiserror::Error)]
pub enum StickyError {
    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Handle does not refer to a live table (never issued, or detached).
    #[error("Unknown table handle: {0:?}")]
    UnknownTable(TableHandle),

    /// The rendering surface refused an operation.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Scenario or options (de)serialization failure.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StickyError>;

#[cfg(target_arch = "wasm32")]
impl From<StickyError> for wasm_bindgen::JsValue {
    fn from(e: StickyError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
