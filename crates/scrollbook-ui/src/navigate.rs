//! Navigation controller: animated scrolls and the suppression window.
//!
//! Anchor navigation scrolls the page over several hundred
//! milliseconds, and every intermediate frame looks like reader
//! scrolling. The controller brackets each animation with a
//! suppression window so scroll observation stays quiet until the
//! animation lands, while a real key press cancels both the animation
//! and the window at once.

use log::{debug, info};

use crate::content;
use crate::layout::PageLayout;
use crate::DISPLAY_HEIGHT;

/// In-flight scroll between two page offsets, eased so the end of the
/// travel decelerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnimation {
    from: i32,
    to: i32,
    start_ms: u64,
    duration_ms: u32,
}

impl ScrollAnimation {
    pub fn new(from: i32, to: i32, start_ms: u64, duration_ms: u32) -> Self {
        Self { from, to, start_ms, duration_ms }
    }

    pub fn target(&self) -> i32 {
        self.to
    }

    /// Position at `now_ms` and whether the travel has finished.
    /// Easing is quadratic ease-out in integer permille.
    pub fn sample(&self, now_ms: u64) -> (i32, bool) {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if self.duration_ms == 0 || elapsed >= u64::from(self.duration_ms) {
            return (self.to, true);
        }
        let p = (elapsed * 1000 / u64::from(self.duration_ms)) as i32;
        let eased = 1000 - (1000 - p) * (1000 - p) / 1000;
        (self.from + (self.to - self.from) * eased / 1000, false)
    }
}

/// A navigation that just started: where it goes and which fragment
/// the host should record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavStart {
    pub index: usize,
    pub target_y: i32,
    pub fragment: &'static str,
}

/// One animation frame: the new scroll offset and whether the
/// animation finished on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickUpdate {
    pub scroll_y: i32,
    pub done: bool,
}

#[derive(Debug)]
pub struct NavController {
    animation: Option<ScrollAnimation>,
    suppress_until_ms: u64,
    anim_ms: u32,
    settle_ms: u32,
    suppress_max_ms: u32,
}

impl NavController {
    pub fn new(anim_ms: u32, settle_ms: u32, suppress_max_ms: u32) -> Self {
        Self {
            animation: None,
            suppress_until_ms: 0,
            anim_ms,
            settle_ms,
            suppress_max_ms,
        }
    }

    /// Begin an animated scroll from `scroll_y` to the section for
    /// `slug`. Replaces any animation already in flight and opens the
    /// suppression window at its maximum. Unknown slugs change
    /// nothing.
    pub fn navigate_to(
        &mut self,
        slug: &str,
        scroll_y: i32,
        layout: &PageLayout,
        now_ms: u64,
    ) -> Option<NavStart> {
        let index = content::chapter_index(slug)?;
        let chapter = content::chapters().get(index)?;
        let target_y = self.section_target(index, layout)?;
        self.animation = Some(ScrollAnimation::new(scroll_y, target_y, now_ms, self.anim_ms));
        self.suppress_until_ms = now_ms + u64::from(self.suppress_max_ms);
        info!("[NAV] scroll {} -> {} (#{})", scroll_y, target_y, chapter.slug);
        Some(NavStart { index, target_y, fragment: chapter.slug })
    }

    /// Resolve `slug` to an instant landing position, with no
    /// animation and no suppression window. Used at load time.
    pub fn jump_to(&self, slug: &str, layout: &PageLayout) -> Option<(usize, i32)> {
        let index = content::chapter_index(slug)?;
        Some((index, self.section_target(index, layout)?))
    }

    /// Advance the in-flight animation. On the finishing tick the
    /// suppression window collapses to the short settle tail.
    pub fn tick(&mut self, now_ms: u64) -> Option<TickUpdate> {
        let animation = self.animation?;
        let (scroll_y, done) = animation.sample(now_ms);
        if done {
            self.animation = None;
            self.suppress_until_ms =
                self.suppress_until_ms.min(now_ms + u64::from(self.settle_ms));
            debug!("[NAV] settled at {}", scroll_y);
        }
        Some(TickUpdate { scroll_y, done })
    }

    /// Drop the animation and the suppression window. Called when the
    /// reader scrolls by hand; their intent wins immediately.
    pub fn cancel(&mut self) {
        if self.animation.is_some() || self.suppress_until_ms > 0 {
            debug!("[NAV] cancelled");
        }
        self.animation = None;
        self.suppress_until_ms = 0;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether scroll observation is currently being held back.
    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        now_ms < self.suppress_until_ms
    }

    fn section_target(&self, index: usize, layout: &PageLayout) -> Option<i32> {
        let span = layout.section_span(index)?;
        Some(span.top.min(layout.max_scroll(DISPLAY_HEIGHT as i32)))
    }
}
