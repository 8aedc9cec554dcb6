//! Scroll-position to active-section tracking.
//!
//! The tracker owns one piece of state: which section currently holds
//! the reader's place. Geometry drives it through [`observe`], and
//! navigation pins it through [`force`] so a long animated scroll
//! cannot flicker the answer through every section it passes.
//!
//! [`observe`]: SectionTracker::observe
//! [`force`]: SectionTracker::force

use crate::layout::PageLayout;
use crate::ui::theme::layout::ACTIVATION_LINE_Y;

#[derive(Debug, Default)]
pub struct SectionTracker {
    active: Option<usize>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Feed the current scroll offset. The section whose span contains
    /// `scroll_y + ACTIVATION_LINE_Y` becomes active; when no span
    /// contains it the previous answer is retained. Returns the new
    /// index only on a transition.
    pub fn observe(&mut self, scroll_y: i32, layout: &PageLayout) -> Option<usize> {
        match layout.section_at(scroll_y + ACTIVATION_LINE_Y) {
            Some(index) if Some(index) != self.active => {
                self.active = Some(index);
                Some(index)
            }
            _ => None,
        }
    }

    /// Pin the active section, bypassing geometry.
    pub fn force(&mut self, index: usize) {
        self.active = Some(index);
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sections() -> PageLayout {
        PageLayout::from_heights(&[800, 1000, 900])
    }

    #[test]
    fn starts_without_an_active_section() {
        let tracker = SectionTracker::new();
        assert_eq!(tracker.active_index(), None);
    }

    #[test]
    fn reports_transitions_only() {
        let layout = three_sections();
        let mut tracker = SectionTracker::new();

        assert_eq!(tracker.observe(0, &layout), Some(0));
        assert_eq!(tracker.observe(10, &layout), None);
        assert_eq!(tracker.active_index(), Some(0));
    }

    #[test]
    fn activates_exactly_when_span_reaches_the_line() {
        let layout = three_sections();
        let mut tracker = SectionTracker::new();

        // Section 1 starts at page y 800; the activation line sits at
        // scroll_y + 200, so 600 is the first offset inside it.
        assert_eq!(tracker.observe(599, &layout), Some(0));
        assert_eq!(tracker.observe(600, &layout), Some(1));
        assert_eq!(tracker.observe(599, &layout), Some(0));
    }

    #[test]
    fn retains_previous_answer_past_the_last_span() {
        let layout = PageLayout::from_heights(&[300, 100]);
        let mut tracker = SectionTracker::new();

        assert_eq!(tracker.observe(0, &layout), Some(0));
        // The activation line lands past every span; the answer stands.
        assert_eq!(tracker.observe(900, &layout), None);
        assert_eq!(tracker.active_index(), Some(0));
    }

    #[test]
    fn stays_unset_until_a_span_is_hit() {
        let layout = PageLayout::from_heights(&[100]);
        let mut tracker = SectionTracker::new();

        // The activation line is already past the only span.
        assert_eq!(tracker.observe(0, &layout), None);
        assert_eq!(tracker.active_index(), None);
    }

    #[test]
    fn force_pins_and_geometry_resumes_after() {
        let layout = three_sections();
        let mut tracker = SectionTracker::new();

        tracker.force(2);
        assert_eq!(tracker.active_index(), Some(2));

        // Geometry agreeing with the pin is not a transition.
        assert_eq!(tracker.observe(2000, &layout), None);
        // Geometry disagreeing is.
        assert_eq!(tracker.observe(0, &layout), Some(0));
    }

    #[test]
    fn active_matches_span_lookup_wherever_a_span_is_hit() {
        let layout = three_sections();
        let mut tracker = SectionTracker::new();
        for scroll_y in (0..layout.max_scroll(800)).step_by(37) {
            tracker.observe(scroll_y, &layout);
            if let Some(expected) = layout.section_at(scroll_y + ACTIVATION_LINE_Y) {
                assert_eq!(tracker.active_index(), Some(expected));
            }
        }
    }

    #[test]
    fn downward_sweep_never_moves_active_backward() {
        let layout = PageLayout::compute();
        let mut tracker = SectionTracker::new();
        let mut last = 0;
        for scroll_y in (0..=layout.max_scroll(800)).step_by(23) {
            tracker.observe(scroll_y, &layout);
            if let Some(active) = tracker.active_index() {
                assert!(active >= last, "active went backward at scroll {}", scroll_y);
                last = active;
            }
        }
        assert_eq!(last, layout.section_count() - 1);
    }
}
