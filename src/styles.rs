//! Stylesheet injected once at startup.
//!
//! Covers the rules the page's own CSS does not ship: banner variants and
//! their body layout, the spinner, keyboard focus outlines and the focused
//! label colour. Banner tints are derived from the configured base colours
//! with `color-mix`, so any CSS colour (hex, named, custom property) works.

use crate::config::ColorConfig;

/// Generate the banner and spinner rules.
pub fn generate_banner_css(colors: &ColorConfig) -> String {
    format!(
        r#".form-message {{
    margin-top: 1rem;
    padding: 0.75rem;
    border-radius: 8px;
    display: none;
    animation: fadeIn 0.3s ease;
}}

.form-message-body {{
    display: flex;
    align-items: center;
    gap: 10px;
}}

.form-message-body > i {{
    font-size: 1.2rem;
}}

.form-message.success {{
    background-color: color-mix(in srgb, {success} 10%, transparent);
    border: 1px solid color-mix(in srgb, {success} 30%, transparent);
    color: {success};
}}

.form-message.error {{
    background-color: color-mix(in srgb, {error} 10%, transparent);
    border: 1px solid color-mix(in srgb, {error} 30%, transparent);
    color: {error};
}}

@keyframes fadeIn {{
    from {{ opacity: 0; transform: translateY(-10px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}

.fa-spinner {{
    animation: spin 1s linear infinite;
}}

@keyframes spin {{
    0% {{ transform: rotate(0deg); }}
    100% {{ transform: rotate(360deg); }}
}}"#,
        success = colors.success,
        error = colors.error,
    )
}

/// Generate the keyboard-navigation and focused-field rules.
pub fn generate_focus_css(colors: &ColorConfig) -> String {
    format!(
        r#".keyboard-nav a:focus,
.keyboard-nav button:focus,
.keyboard-nav input:focus,
.keyboard-nav textarea:focus {{
    outline: 2px solid {focus};
    outline-offset: 2px;
}}

.form-group.focused label {{
    color: {focus};
}}"#,
        focus = colors.focus,
    )
}

/// The full injected stylesheet.
pub fn generate_css(colors: &ColorConfig) -> String {
    format!(
        "{}\n\n{}\n",
        generate_banner_css(colors),
        generate_focus_css(colors)
    )
}
