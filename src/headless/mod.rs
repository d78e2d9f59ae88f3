//! Headless replay - NDJSON event output for scripted runs
//!
//! Drives the form controller against an in-memory document with a virtual
//! clock. Every applied action is written to stdout as one JSON line, so test
//! scripts can assert on exactly what a browser page would have seen.
//!
//! # Script Format
//!
//! One JSON object per line; blank lines and lines starting with `#` are skipped:
//!
//! ```json
//! {"message":{"type":"field_focus","field":1}}
//! {"advance_ms":2000}
//! {"clipboard":"modern_fails"}
//! ```
//!
//! # Example Output
//!
//! ```json
//! {"event":"action","at_ms":0,"action":{"action":"set_placeholder","field":1,"placeholder":"H2SO4 (Sulfuric Acid)"}}
//! {"event":"snapshot","at_ms":2000,"document":{...}}
//! ```

pub mod runner;

use std::io::Write;

use mmcalc_app::memory::DocumentSnapshot;
use mmcalc_app::UpdateAction;
use mmcalc_core::prelude::*;
use serde::Serialize;

/// Events emitted by the replay driver
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// An action the controller applied to the document or scheduler
    Action { at_ms: u64, action: UpdateAction },

    /// Final state of the in-memory document
    Snapshot {
        at_ms: u64,
        document: DocumentSnapshot,
    },
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{}", json)?;
        Ok(())
    }

    pub fn action(at_ms: u64, action: UpdateAction) -> Self {
        Self::Action { at_ms, action }
    }

    pub fn snapshot(at_ms: u64, document: DocumentSnapshot) -> Self {
        Self::Snapshot { at_ms, document }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmcalc_core::FieldId;

    #[test]
    fn test_action_event_shape() {
        let event = HeadlessEvent::action(
            2000,
            UpdateAction::HideFieldError { field: FieldId(4) },
        );
        let mut out = Vec::new();
        event.write_to(&mut out).unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["event"], "action");
        assert_eq!(value["at_ms"], 2000);
        assert_eq!(value["action"]["action"], "hide_field_error");
        assert_eq!(value["action"]["field"], 4);
    }
}
