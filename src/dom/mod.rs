//! The slice of the browser the page components consume.
//!
//! Components never reach for `window` or `document` themselves. They are
//! constructed with explicit handles to the elements they drive, typed against
//! the traits in this module, so the same logic runs against `web-sys` in the
//! browser and against a recording in-memory DOM in tests.
//!
//! The module is split into:
//! - **Element**: [`Element`], [`Document`], [`Form`] and [`Viewport`] traits
//! - **Scheduler**: [`Scheduler`] trait for timeouts, plus the [`sleep`] future
//! - **Geometry**: pure threshold and offset functions (unit testable)

mod element;
pub mod geometry;
pub mod scheduler;

pub use element::{Document, Element, ElementRef, Form, FormRef, ScrollBehavior, Viewport};
pub use scheduler::{Scheduler, Sleep, TimerHandle, sleep};

#[cfg(test)]
pub use element::tests as mock;
#[cfg(test)]
pub use scheduler::tests::ManualScheduler;
