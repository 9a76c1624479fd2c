//! `web-sys` implementations of the DOM traits.

use crate::dom::{Document, Element, ElementRef, Form, FormRef, ScrollBehavior, Viewport};
use std::any::Any;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions,
};

/// Log a failed DOM call. These only fail on malformed selectors or
/// attribute names, which come from configuration.
fn report(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        tracing::warn!(error = ?err, "{what} failed");
    }
}

fn web_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<ElementRef> {
    let Ok(list) = list else { return Vec::new() };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(WebElement::wrap)
        .collect()
}

#[derive(Clone)]
pub struct WebElement {
    el: web_sys::Element,
}

impl WebElement {
    pub fn new(el: web_sys::Element) -> Self {
        Self { el }
    }

    pub fn wrap(el: web_sys::Element) -> ElementRef {
        Rc::new(Self::new(el))
    }

    pub fn raw(&self) -> &web_sys::Element {
        &self.el
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.el.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) {
        report(self.el.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, class: &str) {
        report(self.el.class_list().remove_1(class), "classList.remove");
    }

    fn has_class(&self, class: &str) -> bool {
        self.el.class_list().contains(class)
    }

    fn set_class_name(&self, classes: &str) {
        self.el.set_class_name(classes);
    }

    fn bounding_top(&self) -> f64 {
        self.el.get_bounding_client_rect().top()
    }

    fn offset_top(&self) -> f64 {
        self.html().map(|h| f64::from(h.offset_top())).unwrap_or(0.0)
    }

    fn offset_height(&self) -> f64 {
        self.html().map(|h| f64::from(h.offset_height())).unwrap_or(0.0)
    }

    fn style(&self, property: &str) -> String {
        self.html()
            .and_then(|h| h.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else { return };
        let style = html.style();
        if value.is_empty() {
            report(style.remove_property(property).map(|_| ()), "style.removeProperty");
        } else {
            report(style.set_property(property, value), "style.setProperty");
        }
    }

    fn text(&self) -> String {
        self.el.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.el.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.el.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.el.set_inner_html(html);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.el.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report(self.el.set_attribute(name, value), "setAttribute");
    }

    fn remove_attribute(&self, name: &str) {
        report(self.el.remove_attribute(name), "removeAttribute");
    }

    fn value(&self) -> String {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn resolved_href(&self) -> Option<String> {
        self.el.dyn_ref::<HtmlAnchorElement>().map(HtmlAnchorElement::href)
    }

    fn hostname(&self) -> Option<String> {
        let anchor = self.el.dyn_ref::<HtmlAnchorElement>()?;
        matches!(anchor.protocol().as_str(), "http:" | "https:").then(|| anchor.hostname())
    }

    fn parent(&self) -> Option<ElementRef> {
        self.el.parent_element().map(WebElement::wrap)
    }

    fn append_child(&self, child: &ElementRef) {
        let Some(child) = child.as_any().downcast_ref::<WebElement>() else {
            tracing::warn!("append_child: not a browser element");
            return;
        };
        report(self.el.append_child(&child.el).map(|_| ()), "appendChild");
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.el
            .query_selector(selector)
            .ok()
            .flatten()
            .map(WebElement::wrap)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        collect(self.el.query_selector_all(selector))
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(web_behavior(behavior));
        options.set_block(ScrollLogicalPosition::Nearest);
        self.el
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct WebForm {
    form: HtmlFormElement,
}

impl WebForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl Form for WebForm {
    fn element(&self) -> ElementRef {
        WebElement::wrap(self.form.clone().into())
    }

    fn action(&self) -> String {
        self.form.action()
    }

    /// Successful controls: named, enabled, not buttons, and checked when
    /// they are checkboxes or radios.
    fn fields(&self) -> Vec<(String, String)> {
        let Ok(controls) = self
            .form
            .query_selector_all("input[name], textarea[name], select[name]")
        else {
            return Vec::new();
        };
        let mut fields = Vec::new();
        for node in (0..controls.length()).filter_map(|i| controls.item(i)) {
            if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
                let kind = input.type_();
                let skipped = input.disabled()
                    || matches!(kind.as_str(), "submit" | "button" | "reset" | "image" | "file")
                    || (matches!(kind.as_str(), "checkbox" | "radio") && !input.checked());
                if !skipped {
                    fields.push((input.name(), input.value()));
                }
            } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
                if !area.disabled() {
                    fields.push((area.name(), area.value()));
                }
            } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
                if !select.disabled() {
                    fields.push((select.name(), select.value()));
                }
            }
        }
        fields
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.document.get_element_by_id(id).map(WebElement::wrap)
    }

    fn form_by_id(&self, id: &str) -> Option<FormRef> {
        let form = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(Rc::new(WebForm::new(form)))
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(WebElement::wrap)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        collect(self.document.query_selector_all(selector))
    }

    fn body(&self) -> Option<ElementRef> {
        self.document.body().map(|b| WebElement::wrap(b.into()))
    }

    fn create_element(&self, tag: &str) -> Option<ElementRef> {
        self.document.create_element(tag).ok().map(WebElement::wrap)
    }

    fn inject_style(&self, css: &str) {
        let Some(head) = self.document.head() else {
            tracing::warn!("document has no <head>; styles not injected");
            return;
        };
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(css));
        report(head.append_child(&style).map(|_| ()), "inject style");
    }
}

pub struct WebViewport {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebViewport {
    pub fn new(window: web_sys::Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }

    fn root_metric(&self, metric: impl Fn(&web_sys::Element) -> i32) -> f64 {
        self.document
            .document_element()
            .map(|root| f64::from(metric(&root)))
            .unwrap_or(0.0)
    }
}

impl Viewport for WebViewport {
    fn inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_behavior(behavior));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn scroll_top(&self) -> f64 {
        let body = self
            .document
            .body()
            .map(|b| f64::from(b.scroll_top()))
            .unwrap_or(0.0);
        body.max(self.root_metric(web_sys::Element::scroll_top))
    }

    fn scroll_height(&self) -> f64 {
        self.root_metric(web_sys::Element::scroll_height)
    }

    fn client_height(&self) -> f64 {
        self.root_metric(web_sys::Element::client_height)
    }
}
