//! Timeouts on the page's event loop.
//!
//! Every delayed effect (banner scroll, auto-hide, bar refill, typing) goes
//! through [`Scheduler`], so tests drive time by hand instead of sleeping.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

/// Identifies a pending timeout so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle;

    /// Cancel a pending timeout. Unknown or already-fired handles are ignored.
    fn clear_timeout(&self, handle: TimerHandle);
}

#[derive(Default)]
struct SleepState {
    elapsed: bool,
    waker: Option<Waker>,
}

/// Future that resolves once its timeout fires. Dropping it early clears the
/// timeout.
pub struct Sleep {
    state: Rc<RefCell<SleepState>>,
    scheduler: Rc<dyn Scheduler>,
    handle: TimerHandle,
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.elapsed {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        if !self.state.borrow().elapsed {
            self.scheduler.clear_timeout(self.handle);
        }
    }
}

/// A future completing after `delay` on `scheduler`.
pub fn sleep(scheduler: &Rc<dyn Scheduler>, delay: Duration) -> Sleep {
    let state = Rc::new(RefCell::new(SleepState::default()));
    let fired = state.clone();
    let handle = scheduler.set_timeout(
        delay,
        Box::new(move || {
            let waker = {
                let mut state = fired.borrow_mut();
                state.elapsed = true;
                state.waker.take()
            };
            if let Some(waker) = waker {
                waker.wake();
            }
        }),
    );
    Sleep {
        state,
        scheduler: scheduler.clone(),
        handle,
    }
}
