//! Skill bar and hero chart fill animations.
//!
//! Both animators zero a bar's inline size and, after a short pause, put the
//! original size back with a CSS transition so the browser animates the
//! refill. The original sizes are read once, when the animator is built;
//! reading them again mid-animation would pick up the zeroed value.

use crate::config::{BarConfig, ChartConfig};
use crate::dom::geometry::above_viewport_fraction;
use crate::dom::{ElementRef, Scheduler, TimerHandle, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Whether a scroll listener should stay attached after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerAction {
    Keep,
    Detach,
}

/// A bar and the inline size it animates back to.
struct Bar {
    element: ElementRef,
    target: String,
}

fn capture(elements: Vec<ElementRef>, property: &str) -> Vec<Bar> {
    elements
        .into_iter()
        .map(|element| {
            let target = element.style(property);
            Bar { element, target }
        })
        .collect()
}

/// Zero `property` now and restore the captured size after `delay`.
fn refill(
    scheduler: &dyn Scheduler,
    bar: &Bar,
    property: &'static str,
    zero: &str,
    transition: &str,
    delay: Duration,
) -> TimerHandle {
    bar.element.set_style(property, zero);
    let element = bar.element.clone();
    let target = bar.target.clone();
    let transition = transition.to_string();
    scheduler.set_timeout(
        delay,
        Box::new(move || {
            element.set_style("transition", &transition);
            element.set_style(property, &target);
        }),
    )
}

// ============================================================================
// Skill bars
// ============================================================================

pub struct SkillBarAnimator {
    viewport: Rc<dyn Viewport>,
    scheduler: Rc<dyn Scheduler>,
    bars: Vec<Bar>,
    /// Pending refill per bar, replaced when the bar is re-triggered.
    pending: RefCell<Vec<Option<TimerHandle>>>,
    played: RefCell<Vec<bool>>,
    config: BarConfig,
}

impl SkillBarAnimator {
    pub fn new(
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        bars: Vec<ElementRef>,
        config: &BarConfig,
    ) -> Self {
        let bars = capture(bars, "width");
        let count = bars.len();
        Self {
            viewport,
            scheduler,
            bars,
            pending: RefCell::new(vec![None; count]),
            played: RefCell::new(vec![false; count]),
            config: config.clone(),
        }
    }

    /// Restart the fill for every bar above the trigger line. Runs at
    /// startup and on every scroll; returns how many bars were triggered.
    pub fn check(&self) -> usize {
        let height = self.viewport.inner_height();
        let delay = Duration::from_millis(self.config.delay_ms);
        let mut pending = self.pending.borrow_mut();
        let mut played = self.played.borrow_mut();
        let mut triggered = 0;

        for (idx, bar) in self.bars.iter().enumerate() {
            if played[idx] && !self.config.replay_on_scroll {
                continue;
            }
            if !above_viewport_fraction(bar.element.bounding_top(), height, self.config.viewport_ratio)
            {
                continue;
            }
            if let Some(previous) = pending[idx].take() {
                self.scheduler.clear_timeout(previous);
            }
            pending[idx] = Some(refill(
                self.scheduler.as_ref(),
                bar,
                "width",
                "0",
                &self.config.transition,
                delay,
            ));
            played[idx] = true;
            triggered += 1;
        }
        triggered
    }
}

// ============================================================================
// Hero chart
// ============================================================================

pub struct ChartAnimator {
    viewport: Rc<dyn Viewport>,
    scheduler: Rc<dyn Scheduler>,
    trigger: ElementRef,
    bars: Vec<Bar>,
    fired: Cell<bool>,
    config: ChartConfig,
}

impl ChartAnimator {
    pub fn new(
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn Scheduler>,
        trigger: ElementRef,
        bars: Vec<ElementRef>,
        config: &ChartConfig,
    ) -> Self {
        Self {
            viewport,
            scheduler,
            trigger,
            bars: capture(bars, "height"),
            fired: Cell::new(false),
            config: config.clone(),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Animate every chart bar the first time the trigger section is in view.
    pub fn on_scroll(&self) -> ListenerAction {
        if self.fired.get() {
            return ListenerAction::Detach;
        }
        let top = self.trigger.bounding_top();
        if !above_viewport_fraction(top, self.viewport.inner_height(), self.config.viewport_ratio) {
            return ListenerAction::Keep;
        }
        let delay = Duration::from_millis(self.config.delay_ms);
        for bar in &self.bars {
            refill(
                self.scheduler.as_ref(),
                bar,
                "height",
                "0%",
                &self.config.transition,
                delay,
            );
        }
        self.fired.set(true);
        tracing::debug!(bars = self.bars.len(), "chart animation started");
        ListenerAction::Detach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::mock::{MockElement, MockViewport};
    use crate::dom::{Element, ManualScheduler};

    fn bar(top: f64, width: &str) -> Rc<MockElement> {
        let bar = MockElement::new("div");
        bar.set_top(top);
        bar.set_style("width", width);
        bar
    }

    fn skills(
        bars: &[Rc<MockElement>],
        config: &BarConfig,
    ) -> (SkillBarAnimator, Rc<MockViewport>, Rc<ManualScheduler>) {
        let viewport = MockViewport::new(1280.0, 780.0);
        let scheduler = ManualScheduler::new();
        let animator = SkillBarAnimator::new(
            viewport.clone(),
            scheduler.clone(),
            bars.iter().map(|b| b.clone() as ElementRef).collect(),
            config,
        );
        (animator, viewport, scheduler)
    }

    #[test]
    fn bar_in_view_zeroes_then_refills() {
        // 780 / 1.3 = 600
        let bars = [bar(500.0, "90%"), bar(700.0, "75%")];
        let (animator, _, scheduler) = skills(&bars, &BarConfig::default());

        assert_eq!(animator.check(), 1);
        assert_eq!(bars[0].style("width"), "0");
        assert_eq!(bars[1].style("width"), "75%");

        scheduler.advance(199);
        assert_eq!(bars[0].style("width"), "0");
        scheduler.advance(1);
        assert_eq!(bars[0].style("width"), "90%");
        assert_eq!(bars[0].style("transition"), "width 1.5s ease-in-out");
    }

    #[test]
    fn retrigger_keeps_original_target() {
        let bars = [bar(100.0, "85%")];
        let (animator, _, scheduler) = skills(&bars, &BarConfig::default());

        animator.check();
        scheduler.advance(50);
        // Scrolling again mid-animation, while the inline width is still 0.
        animator.check();
        scheduler.advance(500);
        assert_eq!(bars[0].style("width"), "85%");
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn replay_disabled_plays_each_bar_once() {
        let bars = [bar(100.0, "60%")];
        let config = BarConfig {
            replay_on_scroll: false,
            ..BarConfig::default()
        };
        let (animator, _, scheduler) = skills(&bars, &config);
        assert_eq!(animator.check(), 1);
        scheduler.advance(200);
        assert_eq!(animator.check(), 0);
        assert_eq!(bars[0].style("width"), "60%");
    }

    #[test]
    fn bar_below_trigger_line_untouched() {
        let bars = [bar(600.0, "40%")];
        let (animator, viewport, _) = skills(&bars, &BarConfig::default());
        assert_eq!(animator.check(), 0);
        viewport.height.set(1300.0);
        assert_eq!(animator.check(), 1);
    }

    fn chart(hero_top: f64) -> (ChartAnimator, Rc<MockElement>, Vec<Rc<MockElement>>, Rc<ManualScheduler>) {
        let viewport = MockViewport::new(1280.0, 900.0);
        let scheduler = ManualScheduler::new();
        let hero = MockElement::new("section");
        hero.set_top(hero_top);
        let bars: Vec<_> = ["60%", "80%", "45%"]
            .iter()
            .map(|h| {
                let bar = MockElement::new("div");
                bar.set_style("height", h);
                bar
            })
            .collect();
        let animator = ChartAnimator::new(
            viewport,
            scheduler.clone(),
            hero.clone(),
            bars.iter().map(|b| b.clone() as ElementRef).collect(),
            &ChartConfig::default(),
        );
        (animator, hero, bars, scheduler)
    }

    #[test]
    fn chart_fires_once_and_detaches() {
        // 900 / 1.5 = 600
        let (animator, _, bars, scheduler) = chart(0.0);
        assert_eq!(animator.on_scroll(), ListenerAction::Detach);
        assert!(animator.has_fired());
        assert!(bars.iter().all(|b| b.style("height") == "0%"));

        scheduler.advance(300);
        assert_eq!(bars[1].style("height"), "80%");
        assert_eq!(bars[1].style("transition"), "height 1s ease-in-out");

        // A stray later event does nothing.
        assert_eq!(animator.on_scroll(), ListenerAction::Detach);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(bars[0].style("height"), "60%");
    }

    #[test]
    fn chart_waits_for_hero() {
        let (animator, hero, bars, _) = chart(650.0);
        assert_eq!(animator.on_scroll(), ListenerAction::Keep);
        assert!(!animator.has_fired());
        assert_eq!(bars[0].style("height"), "60%");

        hero.set_top(599.0);
        assert_eq!(animator.on_scroll(), ListenerAction::Detach);
    }
}
