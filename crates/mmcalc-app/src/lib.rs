//! mmcalc-app - Form layer state and orchestration for MMCalc
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the form
//! interaction layer: messages in, state transitions in [`handler::update`],
//! actions out. The [`Controller`] runs that loop against a host that
//! implements the [`Document`] and [`Scheduler`] ports.

pub mod config;
pub mod controller;
pub mod handler;
pub mod input_key;
pub mod memory;
pub mod message;
pub mod ports;
pub mod process;
pub mod scheduler;
pub mod state;

// Re-export primary types
pub use config::Settings;
pub use controller::Controller;
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::{InputKey, KeyPress, KeyTarget, Modifiers};
pub use memory::{ClipboardBehavior, MemoryDocument};
pub use message::{
    ButtonSnapshot, ClipboardMethod, FieldSnapshot, FieldValue, FormSnapshot, HeadingSnapshot,
    Message, PageSnapshot,
};
pub use ports::{Document, Scheduler};
pub use scheduler::ManualScheduler;
pub use state::AppState;
