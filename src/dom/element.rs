//! Element, document and viewport traits.

use std::any::Any;
use std::rc::Rc;

/// Shared handle to a page element. The page is single-threaded, so handles
/// are reference counted rather than atomically shared.
pub type ElementRef = Rc<dyn Element>;

/// Shared handle to a form element.
pub type FormRef = Rc<dyn Form>;

/// How a programmatic scroll moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// An element: class list, geometry, inline style, content and attributes.
pub trait Element {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Replace the whole class attribute.
    fn set_class_name(&self, classes: &str);

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Top edge relative to the viewport (`getBoundingClientRect().top`).
    fn bounding_top(&self) -> f64;

    /// Top edge relative to the document (`offsetTop`).
    fn offset_top(&self) -> f64;

    /// Rendered height including borders (`offsetHeight`).
    fn offset_height(&self) -> f64;

    /// Inline style value, empty when unset.
    fn style(&self, property: &str) -> String;

    fn set_style(&self, property: &str, value: &str);

    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    fn inner_html(&self) -> String;

    fn set_inner_html(&self, html: &str);

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    fn is_disabled(&self) -> bool {
        self.attribute("disabled").is_some()
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            self.set_attribute("disabled", "");
        } else {
            self.remove_attribute("disabled");
        }
    }

    /// Current value of a form control, empty for other elements.
    fn value(&self) -> String;

    /// The `href` after resolution against the document base URL.
    fn resolved_href(&self) -> Option<String>;

    /// Host of an `http(s)` link as the browser parsed it. `None` for other
    /// elements and schemes.
    fn hostname(&self) -> Option<String>;

    fn parent(&self) -> Option<ElementRef>;

    fn append_child(&self, child: &ElementRef);

    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementRef>;

    /// All descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    fn scroll_into_view(&self, behavior: ScrollBehavior);

    /// Concrete handle, for backends that unwrap their own element type
    /// (e.g. when appending a child).
    fn as_any(&self) -> &dyn Any;
}

/// A `<form>`: its element, submission target and field set.
pub trait Form {
    fn element(&self) -> ElementRef;

    /// The resolved `action` URL.
    fn action(&self) -> String;

    /// Name/value pairs of every successful control, in document order.
    fn fields(&self) -> Vec<(String, String)>;

    /// Restore every control to its default value.
    fn reset(&self);
}

/// Element lookup and creation.
pub trait Document {
    fn by_id(&self, id: &str) -> Option<ElementRef>;

    fn form_by_id(&self, id: &str) -> Option<FormRef>;

    fn query(&self, selector: &str) -> Option<ElementRef>;

    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    fn body(&self) -> Option<ElementRef>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<ElementRef>;

    /// Append a `<style>` element with `css` to the document head.
    fn inject_style(&self, css: &str);
}

/// Window-level geometry and scrolling.
pub trait Viewport {
    fn inner_height(&self) -> f64;

    fn inner_width(&self) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Hostname of the current page location.
    fn hostname(&self) -> String;

    /// Distance the document is scrolled from the top.
    fn scroll_top(&self) -> f64;

    /// Full scrollable height of the document.
    fn scroll_height(&self) -> f64;

    /// Visible height of the document element.
    fn client_height(&self) -> f64;
}

#[cfg(test)]
pub mod tests {
    //! Recording in-memory DOM shared by every component's tests.

    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;
    use std::rc::Weak;

    #[derive(Default)]
    pub struct MockElement {
        pub tag: String,
        classes: RefCell<Vec<String>>,
        styles: RefCell<BTreeMap<String, String>>,
        attributes: RefCell<BTreeMap<String, String>>,
        text: RefCell<String>,
        html: RefCell<String>,
        value: RefCell<String>,
        href: RefCell<Option<String>>,
        host: RefCell<Option<String>>,
        top: Cell<f64>,
        offset_top: Cell<f64>,
        offset_height: Cell<f64>,
        parent: RefCell<Option<Weak<dyn Element>>>,
        children: RefCell<Vec<ElementRef>>,
        selectors: RefCell<BTreeMap<String, Vec<ElementRef>>>,
        scrolled_into_view: Cell<usize>,
    }

    impl MockElement {
        pub fn new(tag: &str) -> Rc<Self> {
            Rc::new(Self {
                tag: tag.to_string(),
                ..Default::default()
            })
        }

        pub fn with_text(tag: &str, text: &str) -> Rc<Self> {
            let element = Self::new(tag);
            element.set_text(text);
            element
        }

        pub fn set_top(&self, top: f64) {
            self.top.set(top);
        }

        pub fn set_offset(&self, top: f64, height: f64) {
            self.offset_top.set(top);
            self.offset_height.set(height);
        }

        pub fn set_value(&self, value: &str) {
            *self.value.borrow_mut() = value.to_string();
        }

        pub fn set_href(&self, raw: &str, resolved: &str) {
            self.set_attribute("href", raw);
            *self.href.borrow_mut() = Some(resolved.to_string());
        }

        pub fn set_host(&self, host: &str) {
            *self.host.borrow_mut() = Some(host.to_string());
        }

        /// Register `children` as the answer to `selector` queries.
        pub fn register(&self, selector: &str, children: Vec<ElementRef>) {
            self.selectors
                .borrow_mut()
                .insert(selector.to_string(), children);
        }

        pub fn adopt(self: &Rc<Self>, child: &Rc<MockElement>) {
            let parent: Rc<dyn Element> = self.clone();
            *child.parent.borrow_mut() = Some(Rc::downgrade(&parent));
        }

        pub fn classes(&self) -> Vec<String> {
            self.classes.borrow().clone()
        }

        pub fn children(&self) -> Vec<ElementRef> {
            self.children.borrow().clone()
        }

        pub fn scroll_into_view_count(&self) -> usize {
            self.scrolled_into_view.get()
        }
    }

    fn strip_tags(html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }

    impl Element for MockElement {
        fn add_class(&self, class: &str) {
            let mut classes = self.classes.borrow_mut();
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }

        fn remove_class(&self, class: &str) {
            self.classes.borrow_mut().retain(|c| c != class);
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().iter().any(|c| c == class)
        }

        fn set_class_name(&self, classes: &str) {
            *self.classes.borrow_mut() = classes.split_whitespace().map(String::from).collect();
        }

        fn bounding_top(&self) -> f64 {
            self.top.get()
        }

        fn offset_top(&self) -> f64 {
            self.offset_top.get()
        }

        fn offset_height(&self) -> f64 {
            self.offset_height.get()
        }

        fn style(&self, property: &str) -> String {
            self.styles
                .borrow()
                .get(property)
                .cloned()
                .unwrap_or_default()
        }

        fn set_style(&self, property: &str, value: &str) {
            let mut styles = self.styles.borrow_mut();
            if value.is_empty() {
                styles.remove(property);
            } else {
                styles.insert(property.to_string(), value.to_string());
            }
        }

        fn text(&self) -> String {
            self.text.borrow().clone()
        }

        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
            *self.html.borrow_mut() = text.to_string();
        }

        fn inner_html(&self) -> String {
            self.html.borrow().clone()
        }

        fn set_inner_html(&self, html: &str) {
            *self.html.borrow_mut() = html.to_string();
            *self.text.borrow_mut() = strip_tags(html);
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.borrow().get(name).cloned()
        }

        fn set_attribute(&self, name: &str, value: &str) {
            self.attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }

        fn remove_attribute(&self, name: &str) {
            self.attributes.borrow_mut().remove(name);
        }

        fn value(&self) -> String {
            self.value.borrow().clone()
        }

        fn resolved_href(&self) -> Option<String> {
            self.href.borrow().clone()
        }

        fn hostname(&self) -> Option<String> {
            self.host.borrow().clone()
        }

        fn parent(&self) -> Option<ElementRef> {
            self.parent.borrow().as_ref().and_then(Weak::upgrade)
        }

        fn append_child(&self, child: &ElementRef) {
            self.children.borrow_mut().push(child.clone());
        }

        fn query(&self, selector: &str) -> Option<ElementRef> {
            self.query_all(selector).into_iter().next()
        }

        fn query_all(&self, selector: &str) -> Vec<ElementRef> {
            self.selectors
                .borrow()
                .get(selector)
                .cloned()
                .unwrap_or_default()
        }

        fn scroll_into_view(&self, _behavior: ScrollBehavior) {
            self.scrolled_into_view.set(self.scrolled_into_view.get() + 1);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    pub struct MockForm {
        pub element: Rc<MockElement>,
        pub action: String,
        pub inputs: Vec<(String, Rc<MockElement>)>,
    }

    impl MockForm {
        pub fn new(action: &str, inputs: &[(&str, &str)]) -> Rc<Self> {
            let element = MockElement::new("form");
            let inputs = inputs
                .iter()
                .map(|(name, value)| {
                    let input = MockElement::new("input");
                    input.set_value(value);
                    element.adopt(&input);
                    (name.to_string(), input)
                })
                .collect();
            Rc::new(Self {
                element,
                action: action.to_string(),
                inputs,
            })
        }

        pub fn input(&self, name: &str) -> Rc<MockElement> {
            self.inputs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, input)| input.clone())
                .unwrap_or_else(|| panic!("no input named '{name}'"))
        }
    }

    impl Form for MockForm {
        fn element(&self) -> ElementRef {
            self.element.clone()
        }

        fn action(&self) -> String {
            self.action.clone()
        }

        fn fields(&self) -> Vec<(String, String)> {
            self.inputs
                .iter()
                .map(|(name, input)| (name.clone(), input.value()))
                .collect()
        }

        fn reset(&self) {
            for (_, input) in &self.inputs {
                input.set_value("");
            }
        }
    }

    fn is_class_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
    }

    #[derive(Default)]
    pub struct MockDocument {
        ids: RefCell<BTreeMap<String, ElementRef>>,
        forms: RefCell<BTreeMap<String, FormRef>>,
        selectors: RefCell<BTreeMap<String, Vec<ElementRef>>>,
        body: RefCell<Option<Rc<MockElement>>>,
        pub created: RefCell<Vec<Rc<MockElement>>>,
        pub styles: RefCell<Vec<String>>,
    }

    impl MockDocument {
        pub fn new() -> Rc<Self> {
            let doc = Rc::new(Self::default());
            *doc.body.borrow_mut() = Some(MockElement::new("body"));
            doc
        }

        pub fn add_id(&self, id: &str, element: ElementRef) {
            element.set_attribute("id", id);
            self.ids.borrow_mut().insert(id.to_string(), element);
        }

        pub fn add_form(&self, id: &str, form: FormRef) {
            self.add_id(id, form.element());
            self.forms.borrow_mut().insert(id.to_string(), form);
        }

        pub fn register(&self, selector: &str, elements: Vec<ElementRef>) {
            self.selectors
                .borrow_mut()
                .insert(selector.to_string(), elements);
        }

        pub fn mock_body(&self) -> Rc<MockElement> {
            self.body
                .borrow()
                .clone()
                .unwrap_or_else(|| MockElement::new("body"))
        }
    }

    impl Document for MockDocument {
        fn by_id(&self, id: &str) -> Option<ElementRef> {
            self.ids.borrow().get(id).cloned()
        }

        fn form_by_id(&self, id: &str) -> Option<FormRef> {
            self.forms.borrow().get(id).cloned()
        }

        fn query(&self, selector: &str) -> Option<ElementRef> {
            self.query_all(selector).into_iter().next()
        }

        /// Registered matches, plus any known element carrying the class when
        /// `selector` is a bare `.class`.
        fn query_all(&self, selector: &str) -> Vec<ElementRef> {
            let selectors = self.selectors.borrow();
            let mut found = selectors.get(selector).cloned().unwrap_or_default();
            let Some(class) = selector.strip_prefix('.').filter(|c| is_class_name(c)) else {
                return found;
            };
            let ids = self.ids.borrow();
            let known = selectors.values().flatten().chain(ids.values());
            for element in known {
                if element.has_class(class) && !found.iter().any(|f| Rc::ptr_eq(f, element)) {
                    found.push(element.clone());
                }
            }
            found
        }

        fn body(&self) -> Option<ElementRef> {
            self.body.borrow().clone().map(|b| b as ElementRef)
        }

        fn create_element(&self, tag: &str) -> Option<ElementRef> {
            let element = MockElement::new(tag);
            self.created.borrow_mut().push(element.clone());
            Some(element)
        }

        fn inject_style(&self, css: &str) {
            self.styles.borrow_mut().push(css.to_string());
        }
    }

    pub struct MockViewport {
        pub height: Cell<f64>,
        pub width: Cell<f64>,
        pub host: String,
        pub scrolled: Cell<f64>,
        pub document_height: Cell<f64>,
        pub scroll_calls: RefCell<Vec<(f64, ScrollBehavior)>>,
    }

    impl MockViewport {
        pub fn new(width: f64, height: f64) -> Rc<Self> {
            Self::with_host(width, height, "portfolio.example")
        }

        pub fn with_host(width: f64, height: f64, host: &str) -> Rc<Self> {
            Rc::new(Self {
                height: Cell::new(height),
                width: Cell::new(width),
                host: host.to_string(),
                scrolled: Cell::new(0.0),
                document_height: Cell::new(height),
                scroll_calls: RefCell::new(Vec::new()),
            })
        }
    }

    impl Viewport for MockViewport {
        fn inner_height(&self) -> f64 {
            self.height.get()
        }

        fn inner_width(&self) -> f64 {
            self.width.get()
        }

        fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
            self.scroll_calls.borrow_mut().push((top, behavior));
        }

        fn hostname(&self) -> String {
            self.host.clone()
        }

        fn scroll_top(&self) -> f64 {
            self.scrolled.get()
        }

        fn scroll_height(&self) -> f64 {
            self.document_height.get()
        }

        fn client_height(&self) -> f64 {
            self.height.get()
        }
    }

    #[test]
    fn toggle_class_reports_new_state() {
        let el = MockElement::new("nav");
        assert!(el.toggle_class("active"));
        assert!(el.has_class("active"));
        assert!(!el.toggle_class("active"));
        assert!(!el.has_class("active"));
    }

    #[test]
    fn set_disabled_round_trips_through_attribute() {
        let button = MockElement::new("button");
        button.set_disabled(true);
        assert!(button.is_disabled());
        assert_eq!(button.attribute("disabled").as_deref(), Some(""));
        button.set_disabled(false);
        assert!(!button.is_disabled());
    }

    #[test]
    fn inner_html_updates_text_without_tags() {
        let el = MockElement::new("div");
        el.set_inner_html("<strong>Sent</strong> ok");
        assert_eq!(el.text(), "Sent ok");
    }

    #[test]
    fn class_query_finds_elements_tagged_after_registration() {
        let doc = MockDocument::new();
        let section = MockElement::new("section");
        let card = MockElement::new("div");
        card.add_class("reveal");
        doc.register("section", vec![section.clone() as ElementRef]);
        doc.register(".project-card", vec![card.clone() as ElementRef]);
        assert_eq!(doc.query_all(".reveal").len(), 1);

        section.add_class("reveal");
        let tagged = doc.query_all(".reveal");
        assert_eq!(tagged.len(), 2);
        assert!(doc.query_all("section.reveal").is_empty());
    }

    #[test]
    fn parent_resolves_through_weak_link() {
        let group = MockElement::new("div");
        let input = MockElement::new("input");
        group.adopt(&input);
        let parent = input.parent().expect("parent set");
        parent.add_class("focused");
        assert!(group.has_class("focused"));
    }
}
