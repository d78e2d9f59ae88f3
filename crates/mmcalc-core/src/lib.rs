//! # mmcalc-core - Core Domain Types
//!
//! Foundation crate for the MMCalc form layer. Provides identity and field
//! types, the formula syntax rules, field value rules, tooltip geometry, mode
//! URLs, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, url, tracing).
//!
//! ## Public API
//!
//! ### Formula Rules (`formula`)
//! - [`is_valid_formula()`] - Character set and bracket balance check
//! - [`normalize_formula_input()`] - Whitespace stripping and word-start capitalisation
//!
//! ### Field Rules (`validation`)
//! - [`check_field_value()`] - Ordered required / formula / positive-number rules
//! - [`FieldError`] - Rejection reason carrying the user-facing message
//!
//! ### Domain Types (`types`)
//! - [`FormId`], [`FieldId`], [`ElementId`], [`TimerId`] - Typed identities
//! - [`FieldKind`], [`InputType`], [`ValidationState`], [`ElementContent`]
//!
//! ### Geometry (`geometry`) and Navigation (`navigation`)
//! - [`tooltip_position()`] - Tooltip placement above an element
//! - [`mode_url()`] - `/calculate?mode=N` URLs
//!
//! ### Error Handling (`error`)
//! - [`Error`], [`Result`], [`ResultExt`]

pub mod error;
pub mod formula;
pub mod geometry;
pub mod logging;
pub mod navigation;
pub mod types;
pub mod validation;

/// Prelude for common imports used throughout all MMCalc crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use formula::{is_valid_formula, normalize_formula_input};
pub use geometry::{tooltip_position, Point, Rect, Size};
pub use navigation::mode_url;
pub use types::{
    ElementContent, ElementId, FieldId, FieldKind, FormId, InputType, TimerId, ValidationState,
    COPY_BUTTON_CLASS, ERROR_FEEDBACK_CLASS, INVALID_CLASS, TOOLTIP_CLASS, VALID_CLASS,
};
pub use validation::{check_field_value, FieldError};
