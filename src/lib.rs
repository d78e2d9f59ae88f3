//! MMCalc Forms Library
//!
//! Native companion to the MMCalc form layer: formula checks from the
//! command line and headless replay of scripted page interactions.

// Module declarations
pub mod headless;

// Re-export main entry points
pub use headless::runner::{parse_script, replay_steps, run_replay, ReplaySummary, ScriptStep};
pub use headless::HeadlessEvent;
