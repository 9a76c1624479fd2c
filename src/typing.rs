//! Typewriter reveal for the hero tagline.
//!
//! The tagline is typed out once, a short while after load, and only if the
//! visitor has not started scrolling and the viewport is wide enough. Until
//! typing starts the tagline keeps its full text, so an early scroll leaves
//! it intact.

use crate::config::TypingConfig;
use crate::dom::{ElementRef, Scheduler, Viewport};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    /// Waiting for the start delay.
    Waiting,
    Typing,
    Done,
    /// Scrolled before the delay or viewport too narrow.
    Skipped,
}

pub struct TaglineTyper {
    element: ElementRef,
    viewport: Rc<dyn Viewport>,
    scheduler: Rc<dyn Scheduler>,
    chars: Vec<char>,
    scrolled: Cell<bool>,
    state: Cell<TypingState>,
    config: TypingConfig,
}

impl TaglineTyper {
    /// Capture the tagline's current text.
    pub fn new(
        element: ElementRef,
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        config: &TypingConfig,
    ) -> Rc<Self> {
        let chars = element.text().chars().collect();
        Rc::new(Self {
            element,
            viewport,
            scheduler,
            chars,
            scrolled: Cell::new(false),
            state: Cell::new(TypingState::Waiting),
            config: config.clone(),
        })
    }

    pub fn state(&self) -> TypingState {
        self.state.get()
    }

    pub fn on_scroll(&self) {
        self.scrolled.set(true);
    }

    /// Arm the start delay.
    pub fn start(self: &Rc<Self>) {
        let typer = self.clone();
        self.scheduler.set_timeout(
            Duration::from_millis(self.config.start_delay_ms),
            Box::new(move || typer.begin()),
        );
    }

    fn begin(self: Rc<Self>) {
        if self.scrolled.get() || self.viewport.inner_width() <= self.config.min_viewport_width {
            tracing::debug!(
                scrolled = self.scrolled.get(),
                width = self.viewport.inner_width(),
                "tagline typing skipped"
            );
            self.state.set(TypingState::Skipped);
            return;
        }
        self.state.set(TypingState::Typing);
        self.element.set_text("");
        self.type_from(0);
    }

    /// Append the character at `index`, then schedule the next one.
    fn type_from(self: Rc<Self>, index: usize) {
        let Some(c) = self.chars.get(index) else {
            self.state.set(TypingState::Done);
            return;
        };
        let mut text = self.element.text();
        text.push(*c);
        self.element.set_text(&text);

        let interval = Duration::from_millis(self.config.char_interval_ms);
        let typer = self.clone();
        self.scheduler
            .set_timeout(interval, Box::new(move || typer.type_from(index + 1)));
    }
}
