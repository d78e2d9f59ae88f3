//! Configuration for the form layer
//!
//! Supports an optional `mmcalc.toml`; the browser host always runs with the
//! defaults.

pub mod settings;
pub mod types;

pub use settings::{load_settings, load_settings_file};
pub use types::*;
