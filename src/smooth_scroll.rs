//! In-page anchor routing with a fixed-header offset.
//!
//! Clicks on `#fragment` anchors are turned into a smooth `scrollTo` that
//! lands the target just below the fixed navbar. Links that open a new
//! browsing context or leave the host keep their native behaviour.

use crate::dom::geometry::scroll_target;
use crate::dom::{Document, Element, ScrollBehavior, Viewport};
use std::rc::Rc;

/// What the caller must do with the click's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Leave the browser's default navigation alone.
    PassThrough,
    /// Call `preventDefault()`; the router handled the click.
    PreventDefault,
}

pub struct SmoothScrollRouter {
    document: Rc<dyn Document>,
    viewport: Rc<dyn Viewport>,
    header_selector: String,
}

impl SmoothScrollRouter {
    pub fn new(
        document: Rc<dyn Document>,
        viewport: Rc<dyn Viewport>,
        header_selector: impl Into<String>,
    ) -> Self {
        Self {
            document,
            viewport,
            header_selector: header_selector.into(),
        }
    }

    /// Handle a click on `anchor`.
    pub fn on_click(&self, anchor: &dyn Element) -> ClickAction {
        if anchor.attribute("target").as_deref() == Some("_blank") {
            return ClickAction::PassThrough;
        }
        let page_host = self.viewport.hostname();
        if anchor
            .hostname()
            .is_some_and(|host| !host.eq_ignore_ascii_case(&page_host))
        {
            return ClickAction::PassThrough;
        }

        let href = anchor.attribute("href").unwrap_or_default();
        let Some(id) = fragment_id(&href) else {
            return ClickAction::PreventDefault;
        };

        match self.document.by_id(id) {
            Some(target) => {
                let header_height = self
                    .document
                    .query(&self.header_selector)
                    .map(|h| h.offset_height())
                    .unwrap_or(0.0);
                let top = scroll_target(target.offset_top(), header_height);
                self.viewport.scroll_to(top, ScrollBehavior::Smooth);
            }
            None => tracing::debug!(id, "anchor target not found"),
        }
        ClickAction::PreventDefault
    }
}

/// The element id an in-page href points at. `#` and `#!` are placeholder
/// links and point nowhere.
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() || id == "!" {
        None
    } else {
        Some(id)
    }
}
