//! Headless replay runner - feeds a script through the controller

use std::io::Write;

use mmcalc_app::{ClipboardBehavior, Controller, ManualScheduler, MemoryDocument, Message, Settings};
use mmcalc_core::prelude::*;
use serde::Deserialize;

use super::HeadlessEvent;

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Dispatch a message at the current virtual time
    Message(Message),
    /// Move the virtual clock forward, firing due timers
    Advance(u64),
    /// Change how the simulated clipboard responds from here on
    Clipboard(ClipboardBehavior),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptLine {
    Message { message: Message },
    Advance { advance_ms: u64 },
    Clipboard { clipboard: ClipboardBehavior },
}

impl From<ScriptLine> for ScriptStep {
    fn from(line: ScriptLine) -> Self {
        match line {
            ScriptLine::Message { message } => Self::Message(message),
            ScriptLine::Advance { advance_ms } => Self::Advance(advance_ms),
            ScriptLine::Clipboard { clipboard } => Self::Clipboard(clipboard),
        }
    }
}

/// Totals reported once a replay finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub actions: usize,
    pub elapsed_ms: u64,
}

/// Parse an NDJSON script. Line numbers in errors are 1-based.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parsed: ScriptLine = serde_json::from_str(line).map_err(|e| {
            Error::script(
                index + 1,
                format!("expected message, advance_ms or clipboard ({e})"),
            )
        })?;
        steps.push(parsed.into());
    }

    Ok(steps)
}

/// Parse and replay `script`, writing NDJSON events to `out`
pub fn run_replay<W: Write>(script: &str, settings: Settings, out: &mut W) -> Result<ReplaySummary> {
    let steps = parse_script(script)?;
    replay_steps(&steps, settings, out)
}

/// Replay already-parsed steps
///
/// A `page_loaded` message rebuilds the in-memory document from its page
/// description, keeping the clipboard behaviour chosen so far.
pub fn replay_steps<W: Write>(
    steps: &[ScriptStep],
    settings: Settings,
    out: &mut W,
) -> Result<ReplaySummary> {
    info!("Replaying {} step(s)", steps.len());

    let mut controller = Controller::new(settings, MemoryDocument::new(), ManualScheduler::new());
    let mut summary = ReplaySummary {
        steps: steps.len(),
        ..Default::default()
    };

    for step in steps {
        match step {
            ScriptStep::Message(message) => {
                if let Message::PageLoaded { page } = message {
                    let behavior = controller.document().clipboard_behavior();
                    *controller.document_mut() =
                        MemoryDocument::from_snapshot(page).with_clipboard(behavior);
                }

                let at_ms = controller.scheduler().now_ms();
                for action in controller.dispatch(message.clone()) {
                    HeadlessEvent::action(at_ms, action).write_to(out)?;
                    summary.actions += 1;
                }
            }
            ScriptStep::Advance(ms) => {
                for (at_ms, action) in controller.advance_timed(*ms) {
                    HeadlessEvent::action(at_ms, action).write_to(out)?;
                    summary.actions += 1;
                }
            }
            ScriptStep::Clipboard(behavior) => {
                debug!("Clipboard behaviour set to {:?}", behavior);
                controller.document_mut().set_clipboard_behavior(*behavior);
            }
        }
    }

    summary.elapsed_ms = controller.scheduler().now_ms();
    HeadlessEvent::snapshot(summary.elapsed_ms, controller.document().snapshot().clone())
        .write_to(out)?;
    out.flush()?;

    info!(
        "Replay finished: {} action(s) over {} ms",
        summary.actions, summary.elapsed_ms
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmcalc_core::FieldId;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let script = "# focus the formula box\n\n{\"advance_ms\": 250}\n  {\"clipboard\":\"all_fail\"}\n";
        let steps = parse_script(script).unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Advance(250),
                ScriptStep::Clipboard(ClipboardBehavior::AllFail),
            ]
        );
    }

    #[test]
    fn test_parse_message_step() {
        let steps = parse_script(r#"{"message":{"type":"field_focus","field":3}}"#).unwrap();
        assert_eq!(
            steps,
            vec![ScriptStep::Message(Message::FieldFocus { field: FieldId(3) })]
        );
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let err = parse_script("{\"advance_ms\": 1}\n\n{\"bogus\": true}").unwrap_err();
        assert!(matches!(err, Error::Script { line: 3, .. }));
    }

    #[test]
    fn test_empty_script_emits_only_snapshot() {
        let mut out = Vec::new();
        let summary = run_replay("", Settings::default(), &mut out).unwrap();

        assert_eq!(summary, ReplaySummary::default());
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["event"], "snapshot");
        assert_eq!(value["at_ms"], 0);
    }

    #[test]
    fn test_advance_accumulates_virtual_time() {
        let mut out = Vec::new();
        let summary = run_replay(
            "{\"advance_ms\":1000}\n{\"advance_ms\":500}",
            Settings::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(summary.elapsed_ms, 1500);
        assert_eq!(summary.steps, 2);
    }
}
