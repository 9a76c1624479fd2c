//! Browser timeouts on the `wasm-bindgen-futures` executor.

use crate::dom::{Scheduler, TimerHandle};
use futures::future::{AbortHandle, abortable};
use gloo::timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;

/// Each timeout is a spawned `TimeoutFuture` wrapped in `abortable`, so
/// clearing one aborts its task instead of tearing down a JS closure that
/// may be mid-call.
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<u64, AbortHandle>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let (timeout, abort) = abortable(TimeoutFuture::new(millis));
        self.pending.borrow_mut().insert(id, abort);

        let pending = self.pending.clone();
        spawn_local(async move {
            if timeout.await.is_ok() {
                pending.borrow_mut().remove(&id);
                task();
            }
        });
        TimerHandle(id)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        if let Some(abort) = self.pending.borrow_mut().remove(&handle.0) {
            abort.abort();
        }
    }
}
