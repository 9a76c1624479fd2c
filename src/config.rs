//! Page behaviour configuration.
//!
//! Handles loading, validating, and merging `folio.toml`. Every selector,
//! class name, delay and threshold the components use lives here, so a page
//! with different markup only needs a config file, not a rebuild.
//!
//! ## Where configuration comes from
//!
//! - **Browser**: the TOML text of an optional
//!   `<script type="text/toml" id="folio-config">` element. Absent → defaults.
//! - **CLI**: `folio.toml` in the directory given by `--config`.
//!
//! Both go through [`resolve_config`]: stock defaults are the base layer and
//! user values are merged on top.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [navigation]
//! toggle_id = "menuToggle"
//! menu_id = "navMenu"
//! open_class = "active"
//! icon_open = "fa-times"
//! icon_closed = "fa-bars"
//!
//! [reveal]
//! offset_px = 100.0
//!
//! [form]
//! form_id = "contactForm"
//! fallback_email = "suhaskale@outlook.in"
//! timeout_ms = 15000
//! success_hide_ms = 10000
//!
//! [skills]
//! replay_on_scroll = true
//!
//! [typing]
//! start_delay_ms = 1000
//! char_interval_ms = 50
//! min_viewport_width = 768.0
//! ```
//!
//! See [`stock_config_toml`] for every key. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Page behaviour configuration loaded from `folio.toml`.
///
/// All fields have defaults matching the portfolio markup. User config files
/// need only specify the values they want to override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Mobile menu toggle and icon glyphs.
    pub navigation: NavigationConfig,
    /// Section reveal threshold and classes.
    pub reveal: RevealConfig,
    /// In-page anchor scrolling.
    pub scroll: ScrollConfig,
    /// Contact form submission.
    pub form: FormConfig,
    /// Skill bar fill animation.
    pub skills: BarConfig,
    /// Hero chart bar animation.
    pub chart: ChartConfig,
    /// Tagline typewriter effect.
    pub typing: TypingConfig,
    /// Small effects: hover, keyboard focus, loading screen, progress bar.
    pub polish: PolishConfig,
    /// Banner and field colours used by the injected stylesheet.
    pub colors: ColorConfig,
}

impl FolioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal.offset_px < 0.0 {
            return Err(ConfigError::Validation(
                "reveal.offset_px must not be negative".into(),
            ));
        }
        if self.skills.viewport_ratio <= 0.0 || self.chart.viewport_ratio <= 0.0 {
            return Err(ConfigError::Validation(
                "viewport_ratio values must be positive".into(),
            ));
        }
        if self.form.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "form.timeout_ms must be non-zero".into(),
            ));
        }
        if self.form.fallback_email.trim().is_empty() {
            return Err(ConfigError::Validation(
                "form.fallback_email must not be empty".into(),
            ));
        }
        if self.typing.char_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "typing.char_interval_ms must be non-zero".into(),
            ));
        }
        if self.form.endpoint.as_deref().is_some_and(|e| !is_http_url(e)) {
            return Err(ConfigError::Validation(
                "form.endpoint must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Mobile navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Id of the hamburger button.
    pub toggle_id: String,
    /// Id of the collapsible menu.
    pub menu_id: String,
    /// Selector for links inside the menu.
    pub link_selector: String,
    /// Class marking the menu as open.
    pub open_class: String,
    /// Icon class shown while the menu is open.
    pub icon_open: String,
    /// Icon class shown while the menu is closed.
    pub icon_closed: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            toggle_id: "menuToggle".to_string(),
            menu_id: "navMenu".to_string(),
            link_selector: ".nav-menu a".to_string(),
            open_class: "active".to_string(),
            icon_open: "fa-times".to_string(),
            icon_closed: "fa-bars".to_string(),
        }
    }
}

/// Section reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Elements tagged for reveal at startup.
    pub selector: String,
    /// Class marking an element as reveal-eligible.
    pub tag_class: String,
    /// Class added once the element is revealed.
    pub visible_class: String,
    /// How far above the viewport bottom the top edge must be, in pixels.
    pub offset_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: "section".to_string(),
            tag_class: "reveal".to_string(),
            visible_class: "active".to_string(),
            offset_px: 100.0,
        }
    }
}

/// In-page anchor scrolling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Anchors intercepted for smooth scrolling.
    pub anchor_selector: String,
    /// Fixed header whose height is subtracted from the target offset.
    pub header_selector: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_selector: ".navbar".to_string(),
        }
    }
}

/// Contact form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Id of the contact form.
    pub form_id: String,
    /// Id of the banner element; created inside the form when missing.
    pub message_id: String,
    /// Submit control inside the form.
    pub submit_selector: String,
    /// Overrides the form's `action` attribute when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Address shown in the error banner.
    pub fallback_email: String,
    /// Abort the request after this many milliseconds.
    pub timeout_ms: u64,
    /// Hide the success banner after this many milliseconds.
    pub success_hide_ms: u64,
    /// Delay before scrolling the banner into view.
    pub scroll_delay_ms: u64,
    /// Label shown on the submit control while the request is in flight.
    pub sending_label: String,
}

impl FormConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn success_hide(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            message_id: "formMessage".to_string(),
            submit_selector: "button[type=\"submit\"]".to_string(),
            endpoint: None,
            fallback_email: "suhaskale@outlook.in".to_string(),
            timeout_ms: 15_000,
            success_hide_ms: 10_000,
            scroll_delay_ms: 300,
            sending_label: "Sending...".to_string(),
        }
    }
}

/// Skill bar fill animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarConfig {
    pub selector: String,
    /// Trigger when the bar's top is above `innerHeight / viewport_ratio`.
    pub viewport_ratio: f64,
    /// Pause between zeroing and refilling.
    pub delay_ms: u64,
    /// CSS transition applied for the refill.
    pub transition: String,
    /// Restart the fill on every qualifying scroll instead of once per bar.
    pub replay_on_scroll: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            selector: ".skill-level-bar".to_string(),
            viewport_ratio: 1.3,
            delay_ms: 200,
            transition: "width 1.5s ease-in-out".to_string(),
            replay_on_scroll: true,
        }
    }
}

/// Hero chart animation, fired once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub selector: String,
    /// Section whose visibility triggers the animation.
    pub trigger_selector: String,
    pub viewport_ratio: f64,
    pub delay_ms: u64,
    pub transition: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            selector: ".chart-bar".to_string(),
            trigger_selector: ".hero".to_string(),
            viewport_ratio: 1.5,
            delay_ms: 300,
            transition: "height 1s ease-in-out".to_string(),
        }
    }
}

/// Tagline typewriter effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypingConfig {
    pub selector: String,
    pub start_delay_ms: u64,
    pub char_interval_ms: u64,
    /// The effect only runs on viewports wider than this.
    pub min_viewport_width: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-tagline".to_string(),
            start_delay_ms: 1000,
            char_interval_ms: 50,
            min_viewport_width: 768.0,
        }
    }
}

/// Small page effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolishConfig {
    /// Cards lifted on hover.
    pub card_selector: String,
    /// Hover lift as a CSS length.
    pub card_lift: String,
    /// Element receiving the current year.
    pub year_id: String,
    /// Optional overlay faded out after `load`.
    pub loading_screen_id: String,
    /// Show a thin bar tracking scroll progress.
    pub progress_bar: bool,
    /// Substring identifying the résumé download link.
    pub resume_href: String,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            card_selector: ".project-card".to_string(),
            card_lift: "-8px".to_string(),
            year_id: "currentYear".to_string(),
            loading_screen_id: "loading-screen".to_string(),
            progress_bar: false,
            resume_href: "resume.pdf".to_string(),
        }
    }
}

/// Colours for the generated stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Success banner text/border base colour.
    pub success: String,
    /// Error banner text/border base colour.
    pub error: String,
    /// Outline for keyboard focus and focused labels.
    pub focus: String,
    /// Border for required fields left blank.
    pub danger: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            success: "#10b981".to_string(),
            error: "#ef4444".to_string(),
            focus: "var(--accent-primary)".to_string(),
            danger: "var(--accent-danger)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FolioConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the defaults, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FolioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FolioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Parse config text (e.g. an embedded `<script type="text/toml">` block).
///
/// Blank text yields the defaults.
pub fn parse_config(text: &str) -> Result<FolioConfig, ConfigError> {
    let overlay = if text.trim().is_empty() {
        None
    } else {
        Some(toml::from_str::<toml::Value>(text)?)
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Load `folio.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `folio.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<FolioConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Interact Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Embed in the page as:
#   <script type="text/toml" id="folio-config"> ... </script>
# or keep next to the site as folio.toml for `folio check`.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Mobile navigation
# ---------------------------------------------------------------------------
[navigation]
toggle_id = "menuToggle"
menu_id = "navMenu"
link_selector = ".nav-menu a"
open_class = "active"
# Icon classes on the toggle's <i> element.
icon_open = "fa-times"
icon_closed = "fa-bars"

# ---------------------------------------------------------------------------
# Section reveal
# ---------------------------------------------------------------------------
[reveal]
selector = "section"
tag_class = "reveal"
visible_class = "active"
# Reveal once the top edge is this many pixels above the viewport bottom.
offset_px = 100.0

# ---------------------------------------------------------------------------
# In-page anchors
# ---------------------------------------------------------------------------
[scroll]
anchor_selector = 'a[href^="#"]'
# Fixed header; its height is subtracted from the scroll target.
header_selector = ".navbar"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
form_id = "contactForm"
message_id = "formMessage"
submit_selector = 'button[type="submit"]'
# Post here instead of the form's action attribute.
# endpoint = "https://formspree.io/f/your-id"
fallback_email = "suhaskale@outlook.in"
# Give up on the request after this long.
timeout_ms = 15000
# Hide the success banner after this long.
success_hide_ms = 10000
scroll_delay_ms = 300
sending_label = "Sending..."

# ---------------------------------------------------------------------------
# Skill bars
# ---------------------------------------------------------------------------
[skills]
selector = ".skill-level-bar"
# Fill when the bar is above innerHeight / viewport_ratio.
viewport_ratio = 1.3
delay_ms = 200
transition = "width 1.5s ease-in-out"
# Restart the fill on every qualifying scroll. Set false to fill each bar once.
replay_on_scroll = true

# ---------------------------------------------------------------------------
# Hero chart (fires once)
# ---------------------------------------------------------------------------
[chart]
selector = ".chart-bar"
trigger_selector = ".hero"
viewport_ratio = 1.5
delay_ms = 300
transition = "height 1s ease-in-out"

# ---------------------------------------------------------------------------
# Tagline typewriter
# ---------------------------------------------------------------------------
[typing]
selector = ".hero-tagline"
start_delay_ms = 1000
char_interval_ms = 50
# Skip the effect on narrow (mobile) viewports.
min_viewport_width = 768.0

# ---------------------------------------------------------------------------
# Small effects
# ---------------------------------------------------------------------------
[polish]
card_selector = ".project-card"
card_lift = "-8px"
year_id = "currentYear"
loading_screen_id = "loading-screen"
progress_bar = false
resume_href = "resume.pdf"

# ---------------------------------------------------------------------------
# Colours for the injected stylesheet
# ---------------------------------------------------------------------------
[colors]
success = "#10b981"
error = "#ef4444"
focus = "var(--accent-primary)"
danger = "var(--accent-danger)"
"##
}
