//! Page assembly: builds every component against one document and fans page
//! events out to them.
//!
//! Each feature is guarded by the presence of the elements it drives. A page
//! without a contact form still gets navigation and reveal; a missing hero
//! simply means no chart animation.

use crate::animate::{ChartAnimator, ListenerAction, SkillBarAnimator};
use crate::config::{FolioConfig, FormConfig};
use crate::dom::{Document, Element, ElementRef, FormRef, Scheduler, Viewport};
use crate::navigation::NavigationController;
use crate::polish::{self, KeyboardNav, ProgressBar, TrackedLink};
use crate::reveal::RevealScheduler;
use crate::smooth_scroll::{ClickAction, SmoothScrollRouter};
use crate::styles::generate_css;
use crate::submission::{Banner, SubmissionFlow, SubmitError};
use crate::transport::Transport;
use crate::typing::TaglineTyper;
use futures::future::LocalBoxFuture;
use std::cell::Cell;
use std::rc::Rc;

/// Browser services the page is built on.
#[derive(Clone)]
pub struct PageServices {
    pub document: Rc<dyn Document>,
    pub viewport: Rc<dyn Viewport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub transport: Rc<dyn Transport>,
}

pub struct Page {
    services: PageServices,
    config: FolioConfig,
    navigation: Option<NavigationController>,
    reveal: RevealScheduler,
    router: SmoothScrollRouter,
    submission: Option<Rc<SubmissionFlow>>,
    skills: SkillBarAnimator,
    chart: Option<ChartAnimator>,
    chart_attached: Cell<bool>,
    typer: Option<Rc<TaglineTyper>>,
    keyboard: Option<KeyboardNav>,
    progress: Option<ProgressBar>,
}

impl Page {
    /// Wire every component and run the startup checks (initial reveal,
    /// skill bars, hero chart, typing delay).
    pub fn mount(services: PageServices, config: FolioConfig, year: i32) -> Self {
        let document = services.document.as_ref();
        polish::stamp_year(document, &config.polish, year);
        document.inject_style(&generate_css(&config.colors));

        let navigation = mount_navigation(document, &config);

        let reveal = RevealScheduler::new(document, services.viewport.clone(), &config.reveal);
        reveal.check();

        let router = SmoothScrollRouter::new(
            services.document.clone(),
            services.viewport.clone(),
            config.scroll.header_selector.clone(),
        );

        let submission = mount_submission(&services, &config.form);

        let skills = SkillBarAnimator::new(
            services.viewport.clone(),
            services.scheduler.clone(),
            document.query_all(&config.skills.selector),
            &config.skills,
        );
        skills.check();

        let chart = document.query(&config.chart.trigger_selector).map(|hero| {
            ChartAnimator::new(
                services.viewport.clone(),
                services.scheduler.clone(),
                hero,
                document.query_all(&config.chart.selector),
                &config.chart,
            )
        });
        let chart_attached = Cell::new(chart.is_some());

        let typer = document.query(&config.typing.selector).map(|tagline| {
            let typer = TaglineTyper::new(
                tagline,
                services.viewport.clone(),
                services.scheduler.clone(),
                &config.typing,
            );
            typer.start();
            typer
        });

        let keyboard = document.body().map(KeyboardNav::new);
        let progress = if config.polish.progress_bar {
            ProgressBar::install(document, services.viewport.clone())
        } else {
            None
        };

        let page = Self {
            services,
            config,
            navigation,
            reveal,
            router,
            submission,
            skills,
            chart,
            chart_attached,
            typer,
            keyboard,
            progress,
        };
        page.check_chart();
        tracing::info!(
            navigation = page.navigation.is_some(),
            contact_form = page.submission.is_some(),
            chart = page.chart.is_some(),
            "page interactivity ready"
        );
        page
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn submission(&self) -> Option<&Rc<SubmissionFlow>> {
        self.submission.as_ref()
    }

    /// Whether the chart still listens for scrolls.
    pub fn chart_listening(&self) -> bool {
        self.chart_attached.get()
    }

    pub fn on_scroll(&self) {
        self.reveal.check();
        self.skills.check();
        self.check_chart();
        if let Some(typer) = &self.typer {
            typer.on_scroll();
        }
        if let Some(progress) = &self.progress {
            progress.update();
        }
    }

    pub fn on_keydown(&self, key: &str) {
        if let Some(navigation) = &self.navigation {
            navigation.on_key(key);
        }
        if let Some(keyboard) = &self.keyboard {
            keyboard.on_key(key);
        }
    }

    pub fn on_mousedown(&self) {
        if let Some(keyboard) = &self.keyboard {
            keyboard.on_mousedown();
        }
    }

    pub fn on_menu_toggle(&self) {
        if let Some(navigation) = &self.navigation {
            navigation.toggle();
        }
    }

    pub fn on_menu_link_click(&self) {
        if let Some(navigation) = &self.navigation {
            navigation.on_link_click();
        }
    }

    pub fn on_anchor_click(&self, anchor: &dyn Element) -> ClickAction {
        self.router.on_click(anchor)
    }

    pub fn on_tracked_link_click(&self, link: &dyn Element) -> Vec<TrackedLink> {
        polish::track_link_click(link, &self.config.polish.resume_href)
    }

    /// Contact form submitted. The caller suppresses the native submission
    /// and drives the returned future.
    pub fn on_submit(&self) -> Option<LocalBoxFuture<'static, Result<(), SubmitError>>> {
        self.submission.as_ref()?.on_submit()
    }

    pub fn on_card_enter(&self, card: &dyn Element) {
        polish::lift_card(card, &self.config.polish.card_lift);
    }

    pub fn on_card_leave(&self, card: &dyn Element) {
        polish::settle_card(card);
    }

    pub fn on_field_focus(&self, field: &dyn Element) {
        polish::field_focused(field);
    }

    pub fn on_field_blur(&self, field: &dyn Element) {
        polish::field_blurred(field, &self.config.colors);
    }

    pub fn on_field_input(&self, field: &dyn Element) {
        polish::field_edited(field);
    }

    /// Window `load`.
    pub fn on_load(&self) {
        polish::on_window_load(
            self.services.document.as_ref(),
            &self.services.scheduler,
            &self.config.polish,
        );
    }

    fn check_chart(&self) {
        let Some(chart) = &self.chart else { return };
        if self.chart_attached.get() && chart.on_scroll() == ListenerAction::Detach {
            self.chart_attached.set(false);
        }
    }
}

fn mount_navigation(document: &dyn Document, config: &FolioConfig) -> Option<NavigationController> {
    let nav = &config.navigation;
    let Some(menu) = document.by_id(&nav.menu_id) else {
        tracing::debug!(id = %nav.menu_id, "no navigation menu");
        return None;
    };
    let icon = document.by_id(&nav.toggle_id).and_then(|toggle| toggle.query("i"));
    Some(NavigationController::new(menu, icon, nav))
}

fn mount_submission(services: &PageServices, config: &FormConfig) -> Option<Rc<SubmissionFlow>> {
    let Some(form) = services.document.form_by_id(&config.form_id) else {
        tracing::debug!(id = %config.form_id, "no contact form");
        return None;
    };
    let message = services
        .document
        .by_id(&config.message_id)
        .or_else(|| create_message_container(services.document.as_ref(), &form, &config.message_id))?;
    let button = form.element().query(&config.submit_selector);
    if button.is_none() {
        tracing::debug!(selector = %config.submit_selector, "contact form has no submit control");
    }
    Some(SubmissionFlow::new(
        form,
        button,
        Banner::new(message),
        services.transport.clone(),
        services.scheduler.clone(),
        config.clone(),
    ))
}

/// A hidden banner element appended to the form.
fn create_message_container(document: &dyn Document, form: &FormRef, id: &str) -> Option<ElementRef> {
    let container = document.create_element("div")?;
    container.set_attribute("id", id);
    for (property, value) in [
        ("display", "none"),
        ("margin-top", "1rem"),
        ("padding", "0.75rem"),
        ("border-radius", "4px"),
    ] {
        container.set_style(property, value);
    }
    form.element().append_child(&container);
    Some(container)
}
