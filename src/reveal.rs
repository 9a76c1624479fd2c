//! Scroll-triggered reveal.
//!
//! Every element matching the section selector is tagged reveal-eligible at
//! construction. The scheduler then tracks everything carrying the tag class,
//! which also picks up elements the markup tagged itself.
//! [`RevealScheduler::check`] runs once at startup and on every scroll; an
//! element whose top edge has risen past the threshold gets the visible class
//! and keeps it for the rest of the session.

use crate::config::RevealConfig;
use crate::dom::geometry::within_reveal_offset;
use crate::dom::{Document, ElementRef, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

pub struct RevealScheduler {
    viewport: Rc<dyn Viewport>,
    targets: Vec<ElementRef>,
    revealed: RefCell<Vec<bool>>,
    visible_class: String,
    offset: f64,
}

impl RevealScheduler {
    /// Tag every section with the reveal class, then collect all tagged
    /// elements.
    pub fn new(
        document: &dyn Document,
        viewport: Rc<dyn Viewport>,
        config: &RevealConfig,
    ) -> Self {
        for section in document.query_all(&config.selector) {
            section.add_class(&config.tag_class);
        }
        let targets = document.query_all(&format!(".{}", config.tag_class));
        let revealed = RefCell::new(vec![false; targets.len()]);
        Self {
            viewport,
            targets,
            revealed,
            visible_class: config.visible_class.clone(),
            offset: config.offset_px,
        }
    }

    /// Reveal every tracked element within the threshold. Returns how many
    /// were newly revealed by this call.
    pub fn check(&self) -> usize {
        let height = self.viewport.inner_height();
        let mut revealed = self.revealed.borrow_mut();
        let mut newly = 0;
        for (target, done) in self.targets.iter().zip(revealed.iter_mut()) {
            if *done {
                continue;
            }
            if within_reveal_offset(target.bounding_top(), height, self.offset) {
                target.add_class(&self.visible_class);
                *done = true;
                newly += 1;
            }
        }
        if newly > 0 {
            tracing::debug!(newly, "elements revealed");
        }
        newly
    }

    pub fn tracked_count(&self) -> usize {
        self.targets.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.borrow().iter().filter(|r| **r).count()
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.borrow().iter().all(|r| *r)
    }
}
