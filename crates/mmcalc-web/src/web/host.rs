//! Shared controller handle for event callbacks

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use mmcalc_app::{Controller, Message, Settings};
use tracing::trace;

use super::document::WebDocument;
use super::scheduler::WebScheduler;

pub(crate) struct Host {
    controller: RefCell<Controller<WebDocument, WebScheduler>>,
    /// Messages posted while the controller was already dispatching
    queue: RefCell<VecDeque<Message>>,
}

impl Host {
    pub(crate) fn new(settings: Settings, dom: web_sys::Document) -> Rc<Self> {
        Rc::new_cyclic(|host: &Weak<Host>| {
            let gap_px = settings.tooltip.gap_px;
            let document = WebDocument::new(dom, host.clone(), gap_px);
            let scheduler = WebScheduler::new(host.clone());
            Self {
                controller: RefCell::new(Controller::new(settings, document, scheduler)),
                queue: RefCell::default(),
            }
        })
    }

    /// Hand a message to the controller
    ///
    /// DOM calls made while applying actions (focus, value writes) can fire
    /// events synchronously. Those land here while the controller is borrowed
    /// and are queued for the outer call to drain.
    pub(crate) fn post(&self, message: Message) {
        self.queue.borrow_mut().push_back(message);

        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            trace!("controller busy, message queued");
            return;
        };

        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(message) = next else {
                break;
            };
            controller.dispatch(message);
        }
    }

    /// Run `f` against the document, unless a dispatch is in progress
    pub(crate) fn with_document<R>(&self, f: impl FnOnce(&mut WebDocument) -> R) -> Option<R> {
        let mut controller = self.controller.try_borrow_mut().ok()?;
        Some(f(controller.document_mut()))
    }
}

/// Post through a weak handle; a no-op once the host is gone
pub(crate) fn post_weak(host: &Weak<Host>, message: Message) {
    if let Some(host) = host.upgrade() {
        host.post(message);
    }
}
