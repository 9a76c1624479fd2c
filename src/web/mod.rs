//! Browser entry point.
//!
//! On startup the module waits for the DOM, reads the optional
//! `<script type="text/toml" id="folio-config">` block, mounts a [`Page`] on
//! `web-sys` handles and attaches `gloo` event listeners that forward into it.
//! Listeners live for the lifetime of the page and are leaked on purpose.

mod dom;
mod scheduler;

pub use dom::{WebDocument, WebElement, WebForm, WebViewport};
pub use scheduler::BrowserScheduler;

use crate::config::{FolioConfig, parse_config};
use crate::logging::{ConsoleLayer, ConsoleSink};
use crate::page::{Page, PageServices};
use crate::smooth_scroll::ClickAction;
use crate::transport::HttpTransport;
use gloo::events::{EventListener, EventListenerOptions};
use std::rc::Rc;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DocumentReadyState, Event, EventTarget, KeyboardEvent};

/// Id of the optional inline configuration block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn write(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        if level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if level == Level::INFO {
            web_sys::console::info_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
    }
}

fn init_logging() {
    let max_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    // A second init (e.g. hot reload) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(max_level)
        .with(ConsoleLayer::new(BrowserConsole))
        .try_init();
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    if document.ready_state() == DocumentReadyState::Loading {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| boot(window, document)).forget();
    } else {
        boot(window, document);
    }
}

fn read_config(document: &web_sys::Document) -> FolioConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return FolioConfig::default();
    };
    parse_config(&text).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid inline configuration, using defaults");
        FolioConfig::default()
    })
}

fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

fn boot(window: web_sys::Window, document: web_sys::Document) {
    let config = read_config(&document);
    let services = PageServices {
        document: Rc::new(WebDocument::new(document.clone())),
        viewport: Rc::new(WebViewport::new(window.clone(), document.clone())),
        scheduler: Rc::new(BrowserScheduler::new()),
        transport: Rc::new(HttpTransport::new()),
    };
    let page = Rc::new(Page::mount(services, config, current_year()));
    wire(&page, &window, &document);
}

fn select_all(document: &web_sys::Document, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn listen(target: &EventTarget, event: &'static str, mut handler: impl FnMut(&Event) + 'static) {
    EventListener::new(target, event, move |e| handler(e)).forget();
}

/// Listener on each element matching `selector`, handed the element itself.
fn listen_each(
    document: &web_sys::Document,
    selector: &str,
    event: &'static str,
    page: &Rc<Page>,
    handler: fn(&Page, &WebElement),
) {
    for el in select_all(document, selector) {
        let page = page.clone();
        let wrapped = WebElement::new(el.clone());
        listen(&el, event, move |_| handler(&page, &wrapped));
    }
}

fn wire(page: &Rc<Page>, window: &web_sys::Window, document: &web_sys::Document) {
    let config = page.config().clone();

    let p = page.clone();
    listen(window, "scroll", move |_| p.on_scroll());

    let p = page.clone();
    listen(window, "load", move |_| p.on_load());
    if document.ready_state() == DocumentReadyState::Complete {
        page.on_load();
    }

    let p = page.clone();
    listen(document, "keydown", move |e| {
        if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            p.on_keydown(&key);
        }
    });

    let p = page.clone();
    listen(document, "mousedown", move |_| p.on_mousedown());

    if let Some(toggle) = document.get_element_by_id(&config.navigation.toggle_id) {
        let p = page.clone();
        listen(&toggle, "click", move |_| p.on_menu_toggle());
    }
    listen_each(document, &config.navigation.link_selector, "click", page, |p, _| {
        p.on_menu_link_click()
    });

    for anchor in select_all(document, &config.scroll.anchor_selector) {
        let p = page.clone();
        let wrapped = WebElement::new(anchor.clone());
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                if p.on_anchor_click(&wrapped) == ClickAction::PreventDefault {
                    e.prevent_default();
                }
            },
        )
        .forget();
    }

    let tracked = format!(
        "a[target=\"_blank\"], a[href*=\"{}\"]",
        config.polish.resume_href
    );
    listen_each(document, &tracked, "click", page, |p, link| {
        p.on_tracked_link_click(link);
    });

    let cards = &config.polish.card_selector;
    listen_each(document, cards, "mouseenter", page, |p, card| p.on_card_enter(card));
    listen_each(document, cards, "mouseleave", page, |p, card| p.on_card_leave(card));

    if let Some(form) = document.get_element_by_id(&config.form.form_id) {
        let fields = format!(
            "#{id} input, #{id} textarea",
            id = config.form.form_id
        );
        listen_each(document, &fields, "focus", page, |p, f| p.on_field_focus(f));
        listen_each(document, &fields, "blur", page, |p, f| p.on_field_blur(f));
        listen_each(document, &fields, "input", page, |p, f| p.on_field_input(f));

        let p = page.clone();
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                e.prevent_default();
                if let Some(submission) = p.on_submit() {
                    // Outcome is rendered and logged by the flow itself.
                    spawn_local(async move {
                        let _ = submission.await;
                    });
                }
            },
        )
        .forget();
    }
}
