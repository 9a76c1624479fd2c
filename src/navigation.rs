//! Mobile navigation menu.
//!
//! The menu's open state lives in a CSS class on the menu element; the toggle
//! button's `<i>` icon swaps between a "bars" and a "times" glyph to match.

use crate::config::NavigationConfig;
use crate::dom::ElementRef;

pub struct NavigationController {
    menu: ElementRef,
    icon: Option<ElementRef>,
    open_class: String,
    icon_open: String,
    icon_closed: String,
}

impl NavigationController {
    /// `icon` is the glyph element inside the toggle button, if it has one.
    pub fn new(menu: ElementRef, icon: Option<ElementRef>, config: &NavigationConfig) -> Self {
        Self {
            menu,
            icon,
            open_class: config.open_class.clone(),
            icon_open: config.icon_open.clone(),
            icon_closed: config.icon_closed.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.menu.has_class(&self.open_class)
    }

    /// Toggle button clicked.
    pub fn toggle(&self) {
        let open = self.menu.toggle_class(&self.open_class);
        self.sync_icon(open);
        tracing::debug!(open, "menu toggled");
    }

    /// Force the closed state and glyph.
    pub fn close(&self) {
        self.menu.remove_class(&self.open_class);
        self.sync_icon(false);
    }

    /// A link inside the menu was clicked.
    pub fn on_link_click(&self) {
        self.close();
    }

    /// Escape closes an open menu; other keys are ignored.
    pub fn on_key(&self, key: &str) {
        if key == "Escape" && self.is_open() {
            self.close();
        }
    }

    fn sync_icon(&self, open: bool) {
        let Some(icon) = &self.icon else { return };
        let (show, hide) = if open {
            (&self.icon_open, &self.icon_closed)
        } else {
            (&self.icon_closed, &self.icon_open)
        };
        icon.remove_class(hide);
        icon.add_class(show);
    }
}
