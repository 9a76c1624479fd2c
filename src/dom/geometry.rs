//! Pure viewport arithmetic.
//!
//! These functions contain no DOM access, which makes them easy to test in
//! isolation. Components read the raw numbers and ask these questions.

/// Whether an element whose top sits at `element_top` (viewport coordinates)
/// has come within `offset` pixels of the viewport bottom.
///
/// ```
/// use folio_interact::dom::geometry::within_reveal_offset;
///
/// assert!(within_reveal_offset(599.0, 700.0, 100.0));
/// assert!(!within_reveal_offset(600.0, 700.0, 100.0));
/// ```
pub fn within_reveal_offset(element_top: f64, viewport_height: f64, offset: f64) -> bool {
    element_top < viewport_height - offset
}

/// Whether `element_top` is above the line at `viewport_height / ratio`.
///
/// Used by the bar animators: a ratio of 1.3 triggers when the element is
/// in the upper ~77% of the viewport.
pub fn above_viewport_fraction(element_top: f64, viewport_height: f64, ratio: f64) -> bool {
    element_top < viewport_height / ratio
}

/// Document offset to scroll to so `target_offset` lands just below a fixed
/// header of `header_height`.
pub fn scroll_target(target_offset: f64, header_height: f64) -> f64 {
    target_offset - header_height
}

/// Percentage of the scrollable distance already scrolled, clamped to
/// `0..=100`. A document that does not scroll reports 0.
pub fn scroll_progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_offset_is_strict() {
        assert!(within_reveal_offset(0.0, 800.0, 100.0));
        assert!(within_reveal_offset(699.9, 800.0, 100.0));
        assert!(!within_reveal_offset(700.0, 800.0, 100.0));
    }

    #[test]
    fn reveal_offset_accepts_elements_above_viewport() {
        assert!(within_reveal_offset(-2000.0, 800.0, 100.0));
    }

    #[test]
    fn viewport_fraction_for_skill_ratio() {
        // 1000 / 1.3 ≈ 769.2
        assert!(above_viewport_fraction(769.0, 1000.0, 1.3));
        assert!(!above_viewport_fraction(770.0, 1000.0, 1.3));
    }

    #[test]
    fn scroll_target_subtracts_header() {
        assert_eq!(scroll_target(1200.0, 80.0), 1120.0);
        assert_eq!(scroll_target(40.0, 80.0), -40.0);
    }

    #[test]
    fn progress_halfway() {
        assert_eq!(scroll_progress_percent(500.0, 2000.0, 1000.0), 50.0);
    }

    #[test]
    fn progress_non_scrolling_document() {
        assert_eq!(scroll_progress_percent(0.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn progress_clamps_overscroll() {
        assert_eq!(scroll_progress_percent(1200.0, 2000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress_percent(-30.0, 2000.0, 1000.0), 0.0);
    }
}
