//! Headless replay integration tests
//!
//! Scripts are run through the library entry point and the NDJSON output is
//! checked event by event.

use mmcalc_app::config::load_settings_file;
use mmcalc_app::Settings;
use mmcalc_forms::{parse_script, run_replay, ScriptStep};
use serde_json::Value;
use tempfile::tempdir;

/// Formula field 1, mass field 2, submit button 3, one result heading 4.
/// The copy control for the heading gets id 10.
const PAGE: &str = r#"{"message":{"type":"page_loaded","page":{"next_free_id":10,"forms":[{"id":0,"submit_button":{"id":3,"label":"Calculate"},"fields":[{"id":1,"name":"formula","required":true,"placeholder":"e.g. H2O"},{"id":2,"name":"mass","input_type":"number","required":true}]}],"headings":[{"id":4,"has_copy_control":false}]}}}"#;

fn replay(body: &str, settings: Settings) -> Vec<Value> {
    let script = format!("{PAGE}\n{body}");
    let mut out = Vec::new();
    run_replay(&script, settings, &mut out).unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn actions<'a>(events: &'a [Value], kind: &str) -> Vec<&'a Value> {
    events
        .iter()
        .filter(|e| e["event"] == "action" && e["action"]["action"] == kind)
        .collect()
}

fn snapshot(events: &[Value]) -> &Value {
    let last = events.last().unwrap();
    assert_eq!(last["event"], "snapshot");
    &last["document"]
}

#[test]
fn test_page_load_attaches_copy_control() {
    let events = replay("", Settings::default());

    let attached = actions(&events, "attach_copy_button");
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0]["action"]["heading"], 4);
    assert_eq!(attached[0]["action"]["control"], 10);

    let doc = snapshot(&events);
    assert_eq!(doc["elements"]["4"]["children"], serde_json::json!([10]));
}

#[test]
fn test_empty_submit_is_cancelled_with_required_errors() {
    let events = replay(
        r#"{"message":{"type":"form_submit","form":0,"values":[{"field":1,"value":""},{"field":2,"value":""}]}}"#,
        Settings::default(),
    );

    assert_eq!(actions(&events, "cancel_submit").len(), 1);
    assert!(actions(&events, "set_disabled").is_empty());

    let doc = snapshot(&events);
    assert_eq!(doc["cancelled_submits"], serde_json::json!([0]));
    assert_eq!(
        doc["fields"]["1"]["error_nodes"],
        serde_json::json!(["This field is required."])
    );
    assert_eq!(
        doc["fields"]["2"]["error_nodes"],
        serde_json::json!(["This field is required."])
    );
}

#[test]
fn test_valid_submit_restores_button_after_delay() {
    let events = replay(
        "{\"message\":{\"type\":\"form_submit\",\"form\":0,\"values\":[{\"field\":1,\"value\":\"H2O\"},{\"field\":2,\"value\":\"18\"}]}}\n\
         {\"advance_ms\":5000}",
        Settings::default(),
    );

    let disabled = actions(&events, "set_disabled");
    assert_eq!(disabled.len(), 2);
    assert_eq!(disabled[0]["at_ms"], 0);
    assert_eq!(disabled[0]["action"]["disabled"], true);
    assert_eq!(disabled[1]["at_ms"], 5000);
    assert_eq!(disabled[1]["action"]["disabled"], false);

    let doc = snapshot(&events);
    assert_eq!(doc["elements"]["3"]["disabled"], false);
    assert_eq!(doc["elements"]["3"]["content"]["value"], "Calculate");
}

#[test]
fn test_hint_rotation_is_timestamped() {
    let events = replay(
        "{\"message\":{\"type\":\"field_focus\",\"field\":1}}\n{\"advance_ms\":4000}",
        Settings::default(),
    );

    let hints: Vec<_> = actions(&events, "set_placeholder")
        .into_iter()
        .map(|e| (e["at_ms"].as_u64().unwrap(), e["action"]["placeholder"].clone()))
        .collect();
    assert_eq!(
        hints,
        vec![
            (0, Value::from("H2SO4 (Sulfuric Acid)")),
            (2000, Value::from("Ca(OH)2 (Calcium Hydroxide)")),
            (4000, Value::from("CH3(CH2)3OH (Butanol)")),
        ]
    );
}

#[test]
fn test_copy_falls_back_when_modern_clipboard_fails() {
    let events = replay(
        "# the modern API rejects, the textarea fallback works\n\
         {\"clipboard\":\"modern_fails\"}\n\
         {\"message\":{\"type\":\"copy_control_clicked\",\"control\":10,\"heading_text\":\"  H2O  \"}}\n\
         {\"advance_ms\":1000}",
        Settings::default(),
    );

    assert_eq!(actions(&events, "write_clipboard").len(), 1);
    let fallback = actions(&events, "fallback_copy");
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0]["action"]["text"], "H2O");

    let doc = snapshot(&events);
    assert_eq!(doc["clipboard"], "H2O");
    assert_eq!(doc["elements"]["10"]["content"]["value"], "Copied!");
}

#[test]
fn test_copy_feedback_reverts() {
    let events = replay(
        "{\"message\":{\"type\":\"copy_control_clicked\",\"control\":10,\"heading_text\":\"NaCl\"}}\n\
         {\"advance_ms\":1500}",
        Settings::default(),
    );

    let doc = snapshot(&events);
    assert_eq!(doc["clipboard"], "NaCl");
    assert_eq!(doc["elements"]["10"]["content"]["kind"], "markup");
    assert_eq!(
        doc["elements"]["10"]["content"]["value"],
        "<i class=\"fas fa-copy\"></i>"
    );
}

#[test]
fn test_settings_file_changes_timing() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("mmcalc.toml");
    std::fs::write(&path, "[hints]\ninterval_ms = 500\n").unwrap();
    let settings = load_settings_file(&path).unwrap();

    let events = replay(
        "{\"message\":{\"type\":\"field_focus\",\"field\":1}}\n{\"advance_ms\":500}",
        settings,
    );

    let hints = actions(&events, "set_placeholder");
    assert_eq!(hints.last().unwrap()["at_ms"], 500);
    assert_eq!(
        hints.last().unwrap()["action"]["placeholder"],
        "Ca(OH)2 (Calcium Hydroxide)"
    );
}

#[test]
fn test_bad_line_fails_before_anything_runs() {
    let err = parse_script("{\"advance_ms\":10}\n{\"advance\":10}").unwrap_err();
    assert!(err.to_string().contains("line 2"));

    let steps = parse_script("{\"advance_ms\":10}").unwrap();
    assert_eq!(steps, vec![ScriptStep::Advance(10)]);
}

#[test]
fn test_reloaded_page_gets_fresh_controls_and_busy_state() {
    let submit = r#"{"message":{"type":"form_submit","form":0,"values":[{"field":1,"value":"H2O"},{"field":2,"value":"18"}]}}"#;
    let body = format!(
        "{submit}\n{{\"advance_ms\":3000}}\n{PAGE}\n{submit}\n{{\"advance_ms\":2000}}"
    );
    let events = replay(&body, Settings::default());

    assert_eq!(actions(&events, "attach_copy_button").len(), 2);
    assert_eq!(actions(&events, "cancel_timer").len(), 1);

    // The first page's restore would have fired at 5000
    let disabled: Vec<_> = actions(&events, "set_disabled")
        .into_iter()
        .map(|e| (e["at_ms"].as_u64().unwrap(), e["action"]["disabled"].clone()))
        .collect();
    assert_eq!(
        disabled,
        vec![(0, Value::from(true)), (3000, Value::from(true))]
    );

    let doc = snapshot(&events);
    assert_eq!(doc["elements"]["4"]["children"], serde_json::json!([10]));
    assert_eq!(doc["elements"]["3"]["disabled"], true);
}
