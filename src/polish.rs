//! Small page effects with no state machine of their own.

use crate::config::{ColorConfig, PolishConfig};
use crate::dom::geometry::scroll_progress_percent;
use crate::dom::{Document, Element, ElementRef, Scheduler, Viewport};
use std::rc::Rc;
use std::time::Duration;

pub const KEYBOARD_NAV_CLASS: &str = "keyboard-nav";
pub const FOCUSED_CLASS: &str = "focused";
pub const LOADED_CLASS: &str = "loaded";
pub const PROGRESS_BAR_ID: &str = "scroll-progress";

const LOADING_FADE_DELAY: Duration = Duration::from_millis(500);
const LOADING_HIDE_DELAY: Duration = Duration::from_millis(300);

// ============================================================================
// Cards
// ============================================================================

pub fn lift_card(card: &dyn Element, lift: &str) {
    card.set_style("transform", &format!("translateY({lift})"));
}

pub fn settle_card(card: &dyn Element) {
    card.set_style("transform", "translateY(0)");
}

// ============================================================================
// Keyboard navigation styling
// ============================================================================

/// Toggles focus outlines on `body`: on after Tab, off after any mouse press.
pub struct KeyboardNav {
    body: ElementRef,
}

impl KeyboardNav {
    pub fn new(body: ElementRef) -> Self {
        Self { body }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Tab" {
            self.body.add_class(KEYBOARD_NAV_CLASS);
        }
    }

    pub fn on_mousedown(&self) {
        self.body.remove_class(KEYBOARD_NAV_CLASS);
    }
}

// ============================================================================
// Link tracking
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedLink {
    External,
    Resume,
}

/// Every tracking category a clicked link falls into, in logging order. A
/// résumé link opened in a new tab counts as both.
pub fn classify_link(link: &dyn Element, resume_href: &str) -> Vec<TrackedLink> {
    let mut kinds = Vec::new();
    if link.attribute("target").as_deref() == Some("_blank") {
        kinds.push(TrackedLink::External);
    }
    let href = link.attribute("href").unwrap_or_default();
    if !resume_href.is_empty() && href.contains(resume_href) {
        kinds.push(TrackedLink::Resume);
    }
    kinds
}

pub fn track_link_click(link: &dyn Element, resume_href: &str) -> Vec<TrackedLink> {
    let kinds = classify_link(link, resume_href);
    for kind in &kinds {
        match kind {
            TrackedLink::External => {
                let href = link.resolved_href().unwrap_or_default();
                tracing::info!(%href, "external link clicked");
            }
            TrackedLink::Resume => tracing::info!("resume downloaded"),
        }
    }
    kinds
}

// ============================================================================
// Contact field focus
// ============================================================================

pub fn field_focused(field: &dyn Element) {
    if let Some(group) = field.parent() {
        group.add_class(FOCUSED_CLASS);
    }
}

/// Drop the group highlight and flag a required field left blank.
pub fn field_blurred(field: &dyn Element, colors: &ColorConfig) {
    if let Some(group) = field.parent() {
        group.remove_class(FOCUSED_CLASS);
    }
    let blank_required =
        field.attribute("required").is_some() && field.value().trim().is_empty();
    let border = if blank_required { colors.danger.as_str() } else { "" };
    field.set_style("border-color", border);
}

pub fn field_edited(field: &dyn Element) {
    field.set_style("border-color", "");
}

// ============================================================================
// Page load
// ============================================================================

pub fn stamp_year(document: &dyn Document, config: &PolishConfig, year: i32) {
    match document.by_id(&config.year_id) {
        Some(element) => element.set_text(&year.to_string()),
        None => tracing::debug!(id = %config.year_id, "no footer year element"),
    }
}

/// Window `load`: mark the body loaded and fade out the loading screen.
pub fn on_window_load(document: &dyn Document, scheduler: &Rc<dyn Scheduler>, config: &PolishConfig) {
    if let Some(body) = document.body() {
        body.add_class(LOADED_CLASS);
    }
    let Some(screen) = document.by_id(&config.loading_screen_id) else {
        return;
    };
    let hide_scheduler = scheduler.clone();
    scheduler.set_timeout(
        LOADING_FADE_DELAY,
        Box::new(move || {
            screen.set_style("opacity", "0");
            hide_scheduler.set_timeout(
                LOADING_HIDE_DELAY,
                Box::new(move || screen.set_style("display", "none")),
            );
        }),
    );
}

// ============================================================================
// Scroll progress
// ============================================================================

/// Fixed bar along the top edge whose width tracks how far the page is
/// scrolled.
pub struct ProgressBar {
    bar: ElementRef,
    viewport: Rc<dyn Viewport>,
}

impl ProgressBar {
    /// Create the bar and append it to `body`. `None` without a body.
    pub fn install(document: &dyn Document, viewport: Rc<dyn Viewport>) -> Option<Self> {
        let body = document.body()?;
        let bar = document.create_element("div")?;
        bar.set_attribute("id", PROGRESS_BAR_ID);
        for (property, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("height", "3px"),
            ("background", "var(--gradient-primary)"),
            ("width", "0%"),
            ("z-index", "1001"),
            ("transition", "width 0.1s ease"),
        ] {
            bar.set_style(property, value);
        }
        body.append_child(&bar);
        Some(Self { bar, viewport })
    }

    pub fn update(&self) {
        let percent = scroll_progress_percent(
            self.viewport.scroll_top(),
            self.viewport.scroll_height(),
            self.viewport.client_height(),
        );
        self.bar.set_style("width", &format!("{percent}%"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ManualScheduler;
    use crate::dom::mock::{MockDocument, MockElement, MockViewport};

    #[test]
    fn card_lifts_and_settles() {
        let card = MockElement::new("div");
        lift_card(card.as_ref(), "-8px");
        assert_eq!(card.style("transform"), "translateY(-8px)");
        settle_card(card.as_ref());
        assert_eq!(card.style("transform"), "translateY(0)");
    }

    #[test]
    fn tab_enables_and_mouse_disables_keyboard_nav() {
        let body = MockElement::new("body");
        let nav = KeyboardNav::new(body.clone());
        nav.on_key("Enter");
        assert!(!body.has_class(KEYBOARD_NAV_CLASS));
        nav.on_key("Tab");
        assert!(body.has_class(KEYBOARD_NAV_CLASS));
        nav.on_mousedown();
        assert!(!body.has_class(KEYBOARD_NAV_CLASS));
    }

    #[test]
    fn link_classification() {
        let resume = MockElement::new("a");
        resume.set_href("assets/resume.pdf", "https://portfolio.example/assets/resume.pdf");
        resume.set_attribute("target", "_blank");
        let github = MockElement::new("a");
        github.set_href("https://github.com/someone", "https://github.com/someone");
        github.set_attribute("target", "_blank");
        let local = MockElement::new("a");
        local.set_href("#about", "https://portfolio.example/#about");

        assert_eq!(
            track_link_click(resume.as_ref(), "resume.pdf"),
            vec![TrackedLink::External, TrackedLink::Resume]
        );
        assert_eq!(
            track_link_click(github.as_ref(), "resume.pdf"),
            vec![TrackedLink::External]
        );
        assert!(track_link_click(local.as_ref(), "resume.pdf").is_empty());
    }

    #[test]
    fn same_tab_resume_link_is_only_a_download() {
        let resume = MockElement::new("a");
        resume.set_href("resume.pdf", "https://portfolio.example/resume.pdf");
        assert_eq!(classify_link(resume.as_ref(), "resume.pdf"), vec![TrackedLink::Resume]);
        assert!(classify_link(resume.as_ref(), "").is_empty());
    }

    fn field_in_group(required: bool) -> (Rc<MockElement>, Rc<MockElement>) {
        let group = MockElement::new("div");
        let input = MockElement::new("input");
        group.adopt(&input);
        if required {
            input.set_attribute("required", "");
        }
        (group, input)
    }

    #[test]
    fn focus_highlights_group_until_blur() {
        let (group, input) = field_in_group(false);
        field_focused(input.as_ref());
        assert!(group.has_class(FOCUSED_CLASS));
        field_blurred(input.as_ref(), &ColorConfig::default());
        assert!(!group.has_class(FOCUSED_CLASS));
        assert_eq!(input.style("border-color"), "");
    }

    #[test]
    fn blank_required_field_flagged_on_blur_and_cleared_on_input() {
        let (_, input) = field_in_group(true);
        input.set_value("   ");
        field_blurred(input.as_ref(), &ColorConfig::default());
        assert_eq!(input.style("border-color"), "var(--accent-danger)");

        input.set_value("Ada");
        field_edited(input.as_ref());
        assert_eq!(input.style("border-color"), "");
    }

    #[test]
    fn filled_required_field_not_flagged() {
        let (_, input) = field_in_group(true);
        input.set_value("ada@example.com");
        field_blurred(input.as_ref(), &ColorConfig::default());
        assert_eq!(input.style("border-color"), "");
    }

    #[test]
    fn year_stamped_into_footer() {
        let document = MockDocument::new();
        let year = MockElement::new("span");
        document.add_id("currentYear", year.clone());
        stamp_year(document.as_ref(), &PolishConfig::default(), 2026);
        assert_eq!(year.text(), "2026");
    }

    #[test]
    fn loading_screen_fades_then_hides() {
        let document = MockDocument::new();
        let screen = MockElement::new("div");
        document.add_id("loading-screen", screen.clone());
        let manual = ManualScheduler::new();
        let scheduler: Rc<dyn Scheduler> = manual.clone();

        on_window_load(document.as_ref(), &scheduler, &PolishConfig::default());
        assert!(document.mock_body().has_class(LOADED_CLASS));

        manual.advance(500);
        assert_eq!(screen.style("opacity"), "0");
        assert_eq!(screen.style("display"), "");
        manual.advance(300);
        assert_eq!(screen.style("display"), "none");
    }

    #[test]
    fn load_without_loading_screen_only_marks_body() {
        let document = MockDocument::new();
        let manual = ManualScheduler::new();
        let scheduler: Rc<dyn Scheduler> = manual.clone();
        on_window_load(document.as_ref(), &scheduler, &PolishConfig::default());
        assert!(document.mock_body().has_class(LOADED_CLASS));
        assert_eq!(manual.pending_count(), 0);
    }

    #[test]
    fn progress_bar_tracks_scroll() {
        let document = MockDocument::new();
        let viewport = MockViewport::new(1280.0, 800.0);
        viewport.document_height.set(2800.0);
        let bar = ProgressBar::install(document.as_ref(), viewport.clone()).unwrap();

        let created = document.created.borrow()[0].clone();
        assert_eq!(created.attribute("id").as_deref(), Some(PROGRESS_BAR_ID));
        assert_eq!(document.mock_body().children().len(), 1);

        viewport.scrolled.set(1000.0);
        bar.update();
        assert_eq!(created.style("width"), "50%");
    }
}
