//! Controller - owns the state and drives the host ports
//!
//! The single owner of every piece of form layer state. Hosts turn events into
//! [`Message`]s and hand them to [`Controller::dispatch`]; the controller runs
//! the update function until no follow-up message remains, applying each
//! action through the [`Document`] and [`Scheduler`] ports.

use std::collections::VecDeque;

use tracing::trace;

use crate::config::Settings;
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::ports::{Document, Scheduler};
use crate::process::apply_action;
use crate::scheduler::ManualScheduler;
use crate::state::AppState;

pub struct Controller<D, S> {
    state: AppState,
    document: D,
    scheduler: S,
}

impl<D: Document, S: Scheduler> Controller<D, S> {
    pub fn new(settings: Settings, document: D, scheduler: S) -> Self {
        Self {
            state: AppState::with_settings(settings),
            document,
            scheduler,
        }
    }

    /// Process a message and everything it leads to
    ///
    /// Returns the actions that were applied, in order.
    pub fn dispatch(&mut self, message: Message) -> Vec<UpdateAction> {
        let mut applied = Vec::new();
        let mut queue = VecDeque::from([message]);

        while let Some(msg) = queue.pop_front() {
            trace!("dispatch {:?}", msg);
            let result = handler::update(&mut self.state, msg);

            for action in result.actions {
                if let Some(follow_up) =
                    apply_action(&action, &mut self.document, &mut self.scheduler)
                {
                    queue.push_back(follow_up);
                }
                applied.push(action);
            }

            if let Some(follow_up) = result.message {
                queue.push_back(follow_up);
            }
            queue.extend(self.document.take_messages());
        }

        applied
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<D: Document> Controller<D, ManualScheduler> {
    /// Move the virtual clock forward, firing every timer that comes due
    ///
    /// Timers fire one at a time in due order, so a timer cancelled by an
    /// earlier one in the same window never fires.
    pub fn advance(&mut self, ms: u64) -> Vec<UpdateAction> {
        self.advance_timed(ms)
            .into_iter()
            .map(|(_, action)| action)
            .collect()
    }

    /// Like [`Controller::advance`], pairing each action with the virtual time it happened at
    pub fn advance_timed(&mut self, ms: u64) -> Vec<(u64, UpdateAction)> {
        let target = self.scheduler.now_ms().saturating_add(ms);
        let mut applied = Vec::new();

        while let Some(timer) = self.scheduler.pop_due(target) {
            let at_ms = self.scheduler.now_ms();
            applied.extend(
                self.dispatch(Message::TimerFired { timer })
                    .into_iter()
                    .map(|action| (at_ms, action)),
            );
        }

        self.scheduler.set_now(target);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::{InputKey, KeyPress, KeyTarget, Modifiers};
    use crate::memory::{ClipboardBehavior, MemoryDocument};
    use crate::message::{
        ButtonSnapshot, FieldSnapshot, FieldValue, FormSnapshot, HeadingSnapshot, PageSnapshot,
    };
    use mmcalc_core::{ElementContent, ElementId, FieldId, FormId, InputType, Rect};

    const FORMULA: FieldId = FieldId(1);
    const MASS: FieldId = FieldId(2);
    const SUBMIT: ElementId = ElementId(3);
    const HEADING: ElementId = ElementId(4);
    const CONTROL: ElementId = ElementId(10);

    fn page() -> PageSnapshot {
        PageSnapshot {
            origin: None,
            forms: vec![FormSnapshot {
                id: FormId(0),
                submit_button: Some(ButtonSnapshot {
                    id: SUBMIT,
                    label: "<i class=\"fas fa-calculator\"></i>Calculate".to_string(),
                }),
                fields: vec![
                    FieldSnapshot {
                        id: FORMULA,
                        name: "formula".to_string(),
                        input_type: InputType::Text,
                        required: true,
                        placeholder: Some("e.g. H2O".to_string()),
                        value: String::new(),
                    },
                    FieldSnapshot {
                        id: MASS,
                        name: "mass".to_string(),
                        input_type: InputType::Number,
                        required: true,
                        placeholder: None,
                        value: String::new(),
                    },
                ],
            }],
            headings: vec![HeadingSnapshot {
                id: HEADING,
                has_copy_control: false,
            }],
            next_free_id: 10,
        }
    }

    fn controller(clipboard: ClipboardBehavior) -> Controller<MemoryDocument, ManualScheduler> {
        let page = page();
        let document = MemoryDocument::from_snapshot(&page).with_clipboard(clipboard);
        let mut controller =
            Controller::new(Settings::default(), document, ManualScheduler::new());
        controller.dispatch(Message::PageLoaded { page });
        controller
    }

    fn placeholder(c: &Controller<MemoryDocument, ManualScheduler>) -> Option<String> {
        c.document().field(FORMULA).unwrap().placeholder.clone()
    }

    fn content(c: &Controller<MemoryDocument, ManualScheduler>, id: ElementId) -> ElementContent {
        c.document().element(id).unwrap().content.clone().unwrap()
    }

    #[test]
    fn test_required_error_appears_once_and_clears() {
        let mut c = controller(ClipboardBehavior::Succeed);
        let empty = Message::FormSubmit {
            form: FormId(0),
            values: vec![FieldValue::new(FORMULA, ""), FieldValue::new(MASS, "")],
        };
        c.dispatch(empty.clone());
        c.dispatch(empty);

        let field = c.document().field(FORMULA).unwrap();
        assert_eq!(field.error_nodes, vec!["This field is required."]);
        assert!(field.classes.contains("is-invalid"));
        assert_eq!(c.document().cancelled_submits(), &[FormId(0), FormId(0)]);

        c.dispatch(Message::FieldBlur {
            field: FORMULA,
            value: "H2O".to_string(),
        });
        let field = c.document().field(FORMULA).unwrap();
        assert!(field.error_nodes.is_empty());
        assert!(field.classes.contains("is-valid"));
        assert!(!field.classes.contains("is-invalid"));
    }

    #[test]
    fn test_hints_rotate_for_twelve_seconds_then_stop_on_blur() {
        let mut c = controller(ClipboardBehavior::Succeed);
        c.dispatch(Message::FieldFocus { field: FORMULA });

        let mut seen = vec![placeholder(&c).unwrap()];
        for _ in 0..6 {
            c.advance(2000);
            seen.push(placeholder(&c).unwrap());
        }
        assert_eq!(
            seen,
            vec![
                "H2SO4 (Sulfuric Acid)",
                "Ca(OH)2 (Calcium Hydroxide)",
                "CH3(CH2)3OH (Butanol)",
                "Mg3(PO4)2 (Magnesium Phosphate)",
                "C6H12O6 (Glucose)",
                "NaCl (Sodium Chloride)",
                "H2SO4 (Sulfuric Acid)",
            ]
        );

        c.dispatch(Message::FieldBlur {
            field: FORMULA,
            value: String::new(),
        });
        assert_eq!(placeholder(&c).as_deref(), Some("e.g. H2O"));

        c.advance(10_000);
        assert_eq!(placeholder(&c).as_deref(), Some("e.g. H2O"));
        assert_eq!(c.scheduler().active_count(), 0);
    }

    #[test]
    fn test_submit_button_busy_for_five_seconds() {
        let mut c = controller(ClipboardBehavior::Succeed);
        c.dispatch(Message::FormSubmit {
            form: FormId(0),
            values: vec![FieldValue::new(FORMULA, "H2O"), FieldValue::new(MASS, "18")],
        });

        assert!(c.document().element(SUBMIT).unwrap().disabled);
        assert!(content(&c, SUBMIT).as_str().contains("Calculating..."));
        assert!(c.document().cancelled_submits().is_empty());

        c.advance(4999);
        assert!(c.document().element(SUBMIT).unwrap().disabled);

        c.advance(1);
        assert!(!c.document().element(SUBMIT).unwrap().disabled);
        assert_eq!(
            content(&c, SUBMIT),
            ElementContent::markup("<i class=\"fas fa-calculator\"></i>Calculate")
        );
    }

    #[test]
    fn test_ctrl_enter_submits_valid_form() {
        let mut c = controller(ClipboardBehavior::Succeed);
        c.dispatch(Message::FieldInput {
            field: FORMULA,
            value: "h2o".to_string(),
        });
        c.dispatch(Message::FieldInput {
            field: MASS,
            value: "18".to_string(),
        });
        assert_eq!(c.document().field(FORMULA).unwrap().value, "H2o");

        c.dispatch(Message::Key {
            press: KeyPress::new(InputKey::Enter, Modifiers::CTRL, KeyTarget::Editable),
        });

        assert_eq!(c.document().submitted(), &[FormId(0)]);
        assert!(c.document().cancelled_submits().is_empty());
    }

    #[test]
    fn test_escape_clears_and_focuses_first_field() {
        let mut c = controller(ClipboardBehavior::Succeed);
        c.dispatch(Message::FieldInput {
            field: MASS,
            value: "12".to_string(),
        });
        c.document_mut().set_field_value(MASS, "12").unwrap();

        c.dispatch(Message::Key {
            press: KeyPress::page(InputKey::Esc),
        });

        assert_eq!(c.document().field(MASS).unwrap().value, "");
        assert_eq!(c.document().focused(), Some(FORMULA));
        assert!(c.document().navigations().is_empty());
    }

    #[test]
    fn test_mode_key_navigates_with_relative_url() {
        let mut c = controller(ClipboardBehavior::Succeed);
        c.dispatch(Message::Key {
            press: KeyPress::page(InputKey::Char('2')),
        });
        assert_eq!(c.document().navigations(), &["/calculate?mode=2".to_string()]);
    }

    #[test]
    fn test_copy_control_attached_and_copies() {
        let mut c = controller(ClipboardBehavior::Succeed);
        assert_eq!(c.document().element(HEADING).unwrap().children, vec![CONTROL]);

        c.dispatch(Message::CopyControlClicked {
            control: CONTROL,
            heading_text: " Molar mass: 18.015 g/mol ".to_string(),
        });

        assert_eq!(c.document().clipboard(), Some("Molar mass: 18.015 g/mol"));
        assert_eq!(content(&c, CONTROL), ElementContent::text("Copied!"));
        assert!(c.document().element(CONTROL).unwrap().classes.contains("text-success"));

        c.advance(1500);
        assert_eq!(content(&c, CONTROL), ElementContent::markup("<i class=\"fas fa-copy\"></i>"));
        assert!(c.document().element(CONTROL).unwrap().classes.is_empty());
    }

    #[test]
    fn test_copy_uses_fallback_when_modern_api_fails() {
        for behavior in [ClipboardBehavior::ModernFails, ClipboardBehavior::Unavailable] {
            let mut c = controller(behavior);
            c.dispatch(Message::CopyControlClicked {
                control: CONTROL,
                heading_text: "NaCl".to_string(),
            });
            assert_eq!(c.document().clipboard(), Some("NaCl"), "{behavior:?}");
            assert_eq!(content(&c, CONTROL), ElementContent::text("Copied!"));
        }
    }

    #[test]
    fn test_copy_failure_shows_message_then_reverts() {
        let mut c = controller(ClipboardBehavior::AllFail);
        c.dispatch(Message::CopyControlClicked {
            control: CONTROL,
            heading_text: "NaCl".to_string(),
        });

        assert_eq!(c.document().clipboard(), None);
        assert_eq!(content(&c, CONTROL), ElementContent::text("Copy failed"));
        assert!(c.document().element(CONTROL).unwrap().classes.contains("text-danger"));

        c.advance(1500);
        assert_eq!(content(&c, CONTROL), ElementContent::markup("<i class=\"fas fa-copy\"></i>"));
    }

    #[test]
    fn test_repeated_copy_restarts_feedback_window() {
        let mut c = controller(ClipboardBehavior::Succeed);
        let click = Message::CopyControlClicked {
            control: CONTROL,
            heading_text: "NaCl".to_string(),
        };
        c.dispatch(click.clone());
        c.advance(1000);
        c.dispatch(click);

        c.advance(1000);
        assert_eq!(content(&c, CONTROL), ElementContent::text("Copied!"));

        c.advance(500);
        assert_eq!(content(&c, CONTROL), ElementContent::markup("<i class=\"fas fa-copy\"></i>"));
    }

    #[test]
    fn test_at_most_one_tooltip() {
        let mut c = controller(ClipboardBehavior::Succeed);
        for id in [20, 21] {
            c.document_mut().add_element(ElementId(id));
        }
        let anchor = Rect::new(0.0, 100.0, 50.0, 20.0);

        c.dispatch(Message::PointerEnter {
            element: ElementId(20),
            title: "Atomic mass".to_string(),
            anchor,
        });
        c.dispatch(Message::PointerEnter {
            element: ElementId(21),
            title: "Percent composition".to_string(),
            anchor,
        });

        assert_eq!(c.document().tooltips().len(), 1);
        assert_eq!(c.document().tooltips()[0].owner, ElementId(21));

        c.dispatch(Message::PointerLeave {
            element: ElementId(21),
        });
        assert!(c.document().tooltips().is_empty());
    }
}
