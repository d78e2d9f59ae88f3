//! `Scheduler` port over `setInterval` / `setTimeout`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use mmcalc_app::{Message, Scheduler};
use mmcalc_core::prelude::*;
use mmcalc_core::TimerId;
use wasm_bindgen::prelude::*;

use super::host::{post_weak, Host};
use super::{js_error, window};

enum Armed {
    Timeout(i32),
    Interval(i32, Closure<dyn FnMut()>),
}

pub(crate) struct WebScheduler {
    host: Weak<Host>,
    /// Shared with timeout callbacks so they can drop their own entry
    armed: Rc<RefCell<HashMap<TimerId, Armed>>>,
}

impl WebScheduler {
    pub(crate) fn new(host: Weak<Host>) -> Self {
        Self {
            host,
            armed: Rc::default(),
        }
    }
}

fn millis(ms: u64) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

impl Scheduler for WebScheduler {
    fn start_interval(&mut self, timer: TimerId, period_ms: u64) -> Result<()> {
        let host = self.host.clone();
        let callback = Closure::wrap(Box::new(move || {
            post_weak(&host, Message::TimerFired { timer });
        }) as Box<dyn FnMut()>);

        let handle = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis(period_ms),
            )
            .map_err(|e| js_error("setInterval", e))?;

        self.armed
            .borrow_mut()
            .insert(timer, Armed::Interval(handle, callback));
        Ok(())
    }

    fn start_timeout(&mut self, timer: TimerId, delay_ms: u64) -> Result<()> {
        let host = self.host.clone();
        let armed = Rc::downgrade(&self.armed);
        let callback = Closure::once_into_js(move || {
            if let Some(armed) = armed.upgrade() {
                armed.borrow_mut().remove(&timer);
            }
            post_weak(&host, Message::TimerFired { timer });
        });

        let handle = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay_ms),
            )
            .map_err(|e| js_error("setTimeout", e))?;

        self.armed
            .borrow_mut()
            .insert(timer, Armed::Timeout(handle));
        Ok(())
    }

    fn cancel(&mut self, timer: TimerId) {
        let Some(armed) = self.armed.borrow_mut().remove(&timer) else {
            return;
        };
        let Ok(window) = window() else {
            return;
        };

        match armed {
            Armed::Timeout(handle) => window.clear_timeout_with_handle(handle),
            Armed::Interval(handle, callback) => {
                window.clear_interval_with_handle(handle);
                // The interval may be the callback currently on the stack;
                // release it once that returns
                wasm_bindgen_futures::spawn_local(async move {
                    drop(callback);
                });
            }
        }
        trace!("cancelled {}", timer);
    }
}
