//! Contact form submission flow.
//!
//! # States
//!
//! ```text
//!            submit              2xx + ok
//!   Idle ──────────▶ Submitting ──────────▶ banner: Success
//!    ▲                   │
//!    │   guard dropped   │ transport error / timeout / service failure
//!    └───────────────────┴────────────────▶ banner: Error
//! ```
//!
//! The flow state tracks the in-flight request; the banner state tracks what
//! the user was last told. They are separate because the control must be
//! usable again while the outcome is still on screen.
//!
//! # Guaranteed release
//!
//! [`SubmitGuard`] owns the "submitting" state. Acquiring it disables the
//! submit control before anything else happens; dropping it restores the label
//! and re-enables the control. Every exit path of a submission, including the
//! future being dropped mid-request, goes through that drop exactly once.
//!
//! # Stale banner timers
//!
//! Each render bumps a generation counter. The success auto-hide only fires
//! if the generation it was scheduled for is still current, so an old timer
//! can never hide a newer banner.

use crate::config::FormConfig;
use crate::dom::{ElementRef, FormRef, Scheduler, ScrollBehavior, TimerHandle, sleep};
use crate::transport::{FormResponse, Transport, TransportError};
use futures::FutureExt;
use futures::future::{Either, LocalBoxFuture, select};
use maud::{Markup, html};
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("form service rejected the submission (HTTP {status}): {message}")]
    Service { status: u16, message: String },
}

/// In-flight state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Submitting,
}

/// What the banner currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Hidden,
    Success,
    Error,
}

// ============================================================================
// Endpoint reply classification
// ============================================================================

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Pull a human-readable message out of a failure body: `error`, else the
/// joined `errors[].message` list.
fn service_message(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    let messages: Vec<&str> = body
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

/// Decide whether an endpoint reply means the message was accepted.
///
/// Success requires a 2xx status AND a JSON body whose `ok` field is truthy.
/// Anything else, including a body that is not JSON, is a service failure.
pub fn classify(response: &FormResponse) -> Result<(), SubmitError> {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
    let accepted = response.is_success_status()
        && parsed
            .as_ref()
            .and_then(|body| body.get("ok"))
            .is_some_and(is_truthy);
    if accepted {
        return Ok(());
    }
    let message = parsed
        .as_ref()
        .and_then(service_message)
        .unwrap_or_else(|| "Form submission failed".to_string());
    Err(SubmitError::Service {
        status: response.status,
        message,
    })
}

/// Send `fields` to `endpoint` and classify the reply. No timeout: callers
/// race this against their own clock.
pub async fn submit(
    transport: &dyn Transport,
    endpoint: &str,
    fields: &[(String, String)],
) -> Result<(), SubmitError> {
    let response = transport.post_form(endpoint, fields).await?;
    classify(&response)
}

// ============================================================================
// Banner
// ============================================================================

pub fn success_markup() -> Markup {
    html! {
        div.form-message-body {
            i.fas.fa-check-circle {}
            div {
                strong { "Message Sent Successfully!" }
                br;
                small { "Thank you, I'll get back to you within 24 hours." }
            }
        }
    }
}

pub fn error_markup(fallback_email: &str) -> Markup {
    html! {
        div.form-message-body {
            i.fas.fa-exclamation-triangle {}
            div {
                strong { "Something went wrong!" }
                br;
                small { "Please try again or email me directly at " (fallback_email) }
            }
        }
    }
}

pub fn sending_markup(label: &str) -> Markup {
    html! {
        i.fas.fa-spinner.fa-spin {}
        " " (label)
    }
}

/// The single message element under the form.
#[derive(Clone)]
pub struct Banner {
    element: ElementRef,
    state: Rc<Cell<BannerState>>,
    generation: Rc<Cell<u64>>,
}

impl Banner {
    pub fn new(element: ElementRef) -> Self {
        Self {
            element,
            state: Rc::new(Cell::new(BannerState::Hidden)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    pub fn state(&self) -> BannerState {
        self.state.get()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Empty, unclassed and hidden.
    pub fn clear(&self) {
        self.bump();
        self.element.set_inner_html("");
        self.element.set_style("display", "none");
        self.element.set_class_name("");
        self.state.set(BannerState::Hidden);
    }

    pub fn show_success(&self) -> u64 {
        self.show(success_markup(), "success", BannerState::Success)
    }

    pub fn show_error(&self, fallback_email: &str) -> u64 {
        self.show(error_markup(fallback_email), "error", BannerState::Error)
    }

    /// Hide the success banner rendered at `generation`, if it is still the
    /// current render. Returns whether it was hidden.
    pub fn hide_success(&self, generation: u64) -> bool {
        if self.generation.get() != generation || self.state.get() != BannerState::Success {
            return false;
        }
        self.element.set_style("display", "none");
        self.state.set(BannerState::Hidden);
        true
    }

    fn show(&self, markup: Markup, kind: &str, state: BannerState) -> u64 {
        let generation = self.bump();
        self.element.set_inner_html(&markup.into_string());
        self.element.set_class_name(&format!("form-message {kind}"));
        self.element.set_style("display", "block");
        self.state.set(state);
        generation
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }
}

// ============================================================================
// Flow
// ============================================================================

/// Holds the submitting state; releases it on drop.
pub struct SubmitGuard {
    flow: Rc<SubmissionFlow>,
    original_label: Option<String>,
}

impl SubmitGuard {
    fn acquire(flow: &Rc<SubmissionFlow>) -> Self {
        let original_label = flow.button.as_ref().map(|button| {
            button.set_disabled(true);
            let label = button.inner_html();
            button.set_inner_html(&sending_markup(&flow.config.sending_label).into_string());
            label
        });
        flow.state.set(FlowState::Submitting);
        Self {
            flow: flow.clone(),
            original_label,
        }
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        if let (Some(button), Some(label)) = (&self.flow.button, &self.original_label) {
            button.set_inner_html(label);
            button.set_disabled(false);
        }
        self.flow.state.set(FlowState::Idle);
    }
}

/// The contact form's submit handler.
pub struct SubmissionFlow {
    form: FormRef,
    button: Option<ElementRef>,
    banner: Banner,
    transport: Rc<dyn Transport>,
    scheduler: Rc<dyn Scheduler>,
    config: FormConfig,
    state: Cell<FlowState>,
    hide_timer: Cell<Option<TimerHandle>>,
}

impl SubmissionFlow {
    pub fn new(
        form: FormRef,
        button: Option<ElementRef>,
        banner: Banner,
        transport: Rc<dyn Transport>,
        scheduler: Rc<dyn Scheduler>,
        config: FormConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            form,
            button,
            banner,
            transport,
            scheduler,
            config,
            state: Cell::new(FlowState::Idle),
            hide_timer: Cell::new(None),
        })
    }

    pub fn state(&self) -> FlowState {
        self.state.get()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Where the form posts: the configured override, else the form action.
    pub fn endpoint(&self) -> String {
        self.config
            .endpoint
            .clone()
            .unwrap_or_else(|| self.form.action())
    }

    /// Handle a submit event. The caller always suppresses native submission.
    ///
    /// Runs the synchronous part immediately (disable control, loading label,
    /// clear banner) and returns the request future for the caller to drive.
    /// Returns `None` when a submission is already in flight.
    pub fn on_submit(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, Result<(), SubmitError>>> {
        if self.state.get() == FlowState::Submitting {
            tracing::debug!("submit ignored: request already in flight");
            return None;
        }
        let guard = SubmitGuard::acquire(self);
        self.cancel_hide_timer();
        self.banner.clear();

        let flow = self.clone();
        let endpoint = self.endpoint();
        let fields = self.form.fields();
        Some(
            async move {
                let _guard = guard;
                let timeout = flow.config.timeout();
                let request = submit(flow.transport.as_ref(), &endpoint, &fields);
                let deadline = sleep(&flow.scheduler, timeout);
                let result = match select(Box::pin(request), deadline).await {
                    Either::Left((result, _)) => result,
                    Either::Right(((), _)) => Err(SubmitError::Timeout(timeout)),
                };
                match &result {
                    Ok(()) => flow.on_success(),
                    Err(error) => flow.on_failure(error),
                }
                result
            }
            .boxed_local(),
        )
    }

    fn on_success(&self) {
        tracing::info!("contact form submitted");
        let generation = self.banner.show_success();
        self.form.reset();
        self.scroll_banner_into_view();

        self.cancel_hide_timer();
        let banner = self.banner.clone();
        let handle = self.scheduler.set_timeout(
            self.config.success_hide(),
            Box::new(move || {
                banner.hide_success(generation);
            }),
        );
        self.hide_timer.set(Some(handle));
    }

    fn on_failure(&self, error: &SubmitError) {
        tracing::error!(%error, "form submission error");
        self.banner.show_error(&self.config.fallback_email);
        self.scroll_banner_into_view();
    }

    fn scroll_banner_into_view(&self) {
        let element = self.banner.element().clone();
        self.scheduler.set_timeout(
            self.config.scroll_delay(),
            Box::new(move || element.scroll_into_view(ScrollBehavior::Smooth)),
        );
    }

    fn cancel_hide_timer(&self) {
        if let Some(handle) = self.hide_timer.take() {
            self.scheduler.clear_timeout(handle);
        }
    }
}
