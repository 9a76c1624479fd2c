//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Config
//!     Source: site/folio.toml
//! Navigation
//!     #menuToggle toggles #navMenu (links: .nav-menu a)
//! Reveal
//!     section → reveal/active, 100px before the fold
//! Contact form
//!     #contactForm → form action
//!     Timeout: 15s, success hides after 10s
//!     Fallback: suhaskale@outlook.in
//! Animations
//!     Skill bars: .skill-level-bar at 1/1.3 of the viewport, replays on scroll
//!     Chart: .chart-bar when .hero is at 1/1.5 of the viewport
//!     Tagline: .hero-tagline after 1000ms, 50ms per character, wider than 768px
//! Polish
//!     Cards: .project-card lift -8px
//!     Progress bar: off
//! ```
//!
//! ## Probe
//!
//! ```text
//! POST https://formspree.io/f/xyz (3 fields)
//!     Accepted
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::FolioConfig;
use crate::submission::SubmitError;
use std::path::Path;

fn indent(line: impl AsRef<str>) -> String {
    format!("    {}", line.as_ref())
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn format_ms(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a loaded configuration. `source` is the file it came from, or
/// `None` when only stock defaults apply.
pub fn format_check_output(config: &FolioConfig, source: Option<&Path>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Config".to_string());
    lines.push(indent(match source {
        Some(path) => format!("Source: {}", path.display()),
        None => "Source: stock defaults".to_string(),
    }));

    let nav = &config.navigation;
    lines.push("Navigation".to_string());
    lines.push(indent(format!(
        "#{} toggles #{} (links: {})",
        nav.toggle_id, nav.menu_id, nav.link_selector
    )));

    let reveal = &config.reveal;
    lines.push("Reveal".to_string());
    lines.push(indent(format!(
        "{} → {}/{}, {}px before the fold",
        reveal.selector, reveal.tag_class, reveal.visible_class, reveal.offset_px
    )));

    let form = &config.form;
    lines.push("Contact form".to_string());
    lines.push(indent(format!(
        "#{} → {}",
        form.form_id,
        form.endpoint.as_deref().unwrap_or("form action")
    )));
    lines.push(indent(format!(
        "Timeout: {}, success hides after {}",
        format_ms(form.timeout_ms),
        format_ms(form.success_hide_ms)
    )));
    lines.push(indent(format!("Fallback: {}", form.fallback_email)));

    let skills = &config.skills;
    let chart = &config.chart;
    let typing = &config.typing;
    lines.push("Animations".to_string());
    lines.push(indent(format!(
        "Skill bars: {} at 1/{} of the viewport, {}",
        skills.selector,
        skills.viewport_ratio,
        if skills.replay_on_scroll {
            "replays on scroll"
        } else {
            "plays once"
        }
    )));
    lines.push(indent(format!(
        "Chart: {} when {} is at 1/{} of the viewport",
        chart.selector, chart.trigger_selector, chart.viewport_ratio
    )));
    lines.push(indent(format!(
        "Tagline: {} after {}ms, {}ms per character, wider than {}px",
        typing.selector, typing.start_delay_ms, typing.char_interval_ms, typing.min_viewport_width
    )));

    let polish = &config.polish;
    lines.push("Polish".to_string());
    lines.push(indent(format!(
        "Cards: {} lift {}",
        polish.card_selector, polish.card_lift
    )));
    lines.push(indent(format!(
        "Progress bar: {}",
        on_off(polish.progress_bar)
    )));

    lines
}

pub fn print_check_output(config: &FolioConfig, source: Option<&Path>) {
    for line in format_check_output(config, source) {
        println!("{line}");
    }
}

// ============================================================================
// Probe
// ============================================================================

pub fn format_probe_output(
    endpoint: &str,
    field_count: usize,
    outcome: &Result<(), SubmitError>,
) -> Vec<String> {
    let plural = if field_count == 1 { "" } else { "s" };
    let mut lines = vec![format!("POST {endpoint} ({field_count} field{plural})")];
    match outcome {
        Ok(()) => lines.push(indent("Accepted")),
        Err(SubmitError::Service { status, message }) => {
            lines.push(indent(format!("Rejected by service (HTTP {status})")));
            lines.push(indent(format!("Message: {message}")));
        }
        Err(SubmitError::Timeout(after)) => {
            lines.push(indent(format!("No response within {}", format_ms(after.as_millis() as u64))));
        }
        Err(SubmitError::Transport(err)) => {
            lines.push(indent(format!("Transport failure: {err}")));
        }
    }
    lines
}

pub fn print_probe_output(endpoint: &str, field_count: usize, outcome: &Result<(), SubmitError>) {
    for line in format_probe_output(endpoint, field_count, outcome) {
        println!("{line}");
    }
}
