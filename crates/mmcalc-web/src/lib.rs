//! mmcalc-web - Browser host for the MMCalc form layer
//!
//! Scans the page, turns DOM events into controller messages and implements
//! the `Document` and `Scheduler` ports with `web-sys`.
//!
//! The crate is a stub by default so the workspace builds on native targets
//! without a wasm toolchain. Enable the real host with `--features web` on a
//! wasm32 target.

/// Placeholder for non-web (or non-wasm) builds.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {
    // No-op.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
