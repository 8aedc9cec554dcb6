//! Application facade: one state holder, two writer paths.
//!
//! Geometry observation and anchor navigation both end up writing the
//! same active-chapter state, so both paths run through [`App`] and
//! nothing else writes it. Hosts feed button presses, fragment events,
//! and a millisecond clock in; they drain fragment writes back out and
//! ask for renders when something changed.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use log::{info, warn};

use crate::content;
use crate::input::{Button, InputEvent};
use crate::layout::PageLayout;
use crate::navigate::NavController;
use crate::rail::RailModel;
use crate::section::render_section;
use crate::toc::TocOverlay;
use crate::tracker::SectionTracker;
use crate::ui::theme::layout::{PAGE_OVERLAP, SCROLL_STEP};
use crate::DISPLAY_HEIGHT;

/// Tunable behavior knobs, one instance per app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Pixels per Up/Down press.
    pub scroll_step: i32,
    /// Overlap preserved on viewport-height jumps.
    pub page_overlap: i32,
    /// Animated scroll duration.
    pub anim_ms: u32,
    /// Suppression tail kept after an animation lands, covering late
    /// geometry readings.
    pub settle_ms: u32,
    /// Hard cap on the suppression window, in case an animation never
    /// reports completion.
    pub suppress_max_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scroll_step: SCROLL_STEP,
            page_overlap: PAGE_OVERLAP,
            anim_ms: 400,
            settle_ms: 120,
            suppress_max_ms: 1200,
        }
    }
}

pub struct App {
    config: ViewerConfig,
    layout: PageLayout,
    scroll_y: i32,
    tracker: SectionTracker,
    nav: NavController,
    toc: TocOverlay,
    rail_focus: Option<usize>,
    pending_fragment: Option<&'static str>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            config,
            layout: PageLayout::compute(),
            scroll_y: 0,
            tracker: SectionTracker::new(),
            nav: NavController::new(config.anim_ms, config.settle_ms, config.suppress_max_ms),
            toc: TocOverlay::new(),
            rail_focus: None,
            pending_fragment: None,
        }
    }

    // ── State access ────────────────────────────────────────────────

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tracker.active_index()
    }

    pub fn active_slug(&self) -> Option<&'static str> {
        let index = self.tracker.active_index()?;
        content::chapters().get(index).map(|ch| ch.slug)
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn toc_open(&self) -> bool {
        self.toc.is_open()
    }

    pub fn rail_focus(&self) -> Option<usize> {
        self.rail_focus
    }

    pub fn is_animating(&self) -> bool {
        self.nav.is_animating()
    }

    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        self.nav.is_suppressed(now_ms)
    }

    /// Fragment the host should write to the URL, drained on read.
    /// Set by in-app navigation only; fragment-change handling never
    /// echoes the fragment back.
    pub fn take_fragment_write(&mut self) -> Option<&'static str> {
        self.pending_fragment.take()
    }

    // ── Fragment handling ───────────────────────────────────────────

    /// Resolve the fragment present at load time: place the viewport
    /// at the chapter instantly, no animation, no fragment write.
    /// Unknown fragments leave the book at the top. Returns true if
    /// the viewport moved.
    pub fn resolve_initial_fragment(&mut self, fragment: &str) -> bool {
        let slug = fragment.trim_start_matches('#');
        if slug.is_empty() {
            return false;
        }
        let Some((index, target_y)) = self.nav.jump_to(slug, &self.layout) else {
            warn!("[URL] unknown initial fragment '#{}'", slug);
            return false;
        };
        self.scroll_y = target_y;
        self.tracker.force(index);
        info!("[URL] opened at #{}", slug);
        true
    }

    /// React to the fragment changing under us (back/forward, a hand
    /// edit). Known slugs navigate exactly like an in-app jump, minus
    /// the fragment write. An empty fragment leaves the view as it is.
    pub fn handle_fragment_change(&mut self, fragment: &str, now_ms: u64) -> bool {
        let slug = fragment.trim_start_matches('#');
        if slug.is_empty() {
            return false;
        }
        if self.start_navigation(slug, now_ms) {
            true
        } else {
            warn!("[URL] ignoring unknown fragment '#{}'", slug);
            false
        }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Animated jump to a chapter, recording a fragment write for the
    /// host. In-app navigation goes through here.
    pub fn navigate_to_chapter(&mut self, slug: &str, now_ms: u64) -> bool {
        if !self.start_navigation(slug, now_ms) {
            return false;
        }
        // Only reader-initiated jumps update the URL.
        self.pending_fragment = self.active_slug();
        true
    }

    /// Jump to the chapter `delta` steps from the active one. Runs off
    /// the end of the book do nothing.
    pub fn navigate_by_offset(&mut self, delta: i32, now_ms: u64) -> bool {
        let Some(active) = self.active_slug() else {
            return false;
        };
        let Some(target) = content::adjacent_chapter(active, delta) else {
            return false;
        };
        self.navigate_to_chapter(target.slug, now_ms)
    }

    fn start_navigation(&mut self, slug: &str, now_ms: u64) -> bool {
        let Some(start) = self.nav.navigate_to(slug, self.scroll_y, &self.layout, now_ms) else {
            return false;
        };
        // The destination becomes active immediately; geometry catches
        // up when the animation lands.
        self.tracker.force(start.index);
        self.toc.close();
        self.rail_focus = None;
        true
    }

    // ── Clock ───────────────────────────────────────────────────────

    /// Advance animations and, outside the suppression window, let
    /// geometry drive the active chapter. Returns true if a render is
    /// needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        if let Some(update) = self.nav.tick(now_ms) {
            self.scroll_y = update.scroll_y;
            changed = true;
        }
        if !self.nav.is_suppressed(now_ms) && self.observe() {
            changed = true;
        }
        changed
    }

    fn observe(&mut self) -> bool {
        if let Some(index) = self.tracker.observe(self.scroll_y, &self.layout) {
            if let Some(chapter) = content::chapters().get(index) {
                info!("[TRACK] active -> {}", chapter.slug);
            }
            return true;
        }
        false
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Handle a button press. Returns true if a render is needed.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> bool {
        let InputEvent::Press(button) = event;
        if self.toc.is_open() {
            return self.handle_toc_input(button, now_ms);
        }
        if let Some(row) = self.rail_focus {
            return self.handle_rail_input(button, row, now_ms);
        }
        self.handle_page_input(button, now_ms)
    }

    fn handle_page_input(&mut self, button: Button, now_ms: u64) -> bool {
        match button {
            Button::Up => self.scroll_by(-self.config.scroll_step),
            Button::Down => self.scroll_by(self.config.scroll_step),
            Button::VolumeUp => self.scroll_by(-self.page_jump()),
            Button::VolumeDown => self.scroll_by(self.page_jump()),
            Button::Left => self.navigate_by_offset(-1, now_ms),
            Button::Right => self.navigate_by_offset(1, now_ms),
            Button::Confirm => {
                self.toc.open_at(self.tracker.active_index());
                true
            }
            Button::Back => {
                if RailModel::derive(self.active_slug()).upcoming.is_empty() {
                    false
                } else {
                    self.rail_focus = Some(0);
                    true
                }
            }
        }
    }

    fn handle_toc_input(&mut self, button: Button, now_ms: u64) -> bool {
        match button {
            Button::Up => {
                self.toc.move_cursor(-1);
                true
            }
            Button::Down => {
                self.toc.move_cursor(1);
                true
            }
            Button::VolumeUp => {
                self.toc.move_cursor(-5);
                true
            }
            Button::VolumeDown => {
                self.toc.move_cursor(5);
                true
            }
            Button::Confirm => match self.toc.selected_slug() {
                Some(slug) => self.navigate_to_chapter(slug, now_ms),
                None => false,
            },
            Button::Back => {
                self.toc.close();
                true
            }
            Button::Left | Button::Right => false,
        }
    }

    fn handle_rail_input(&mut self, button: Button, row: usize, now_ms: u64) -> bool {
        let upcoming = RailModel::derive(self.active_slug()).upcoming;
        match button {
            Button::Up => {
                self.rail_focus = Some(row.saturating_sub(1));
                true
            }
            Button::Down => {
                self.rail_focus = Some((row + 1).min(upcoming.len().saturating_sub(1)));
                true
            }
            Button::Confirm => match upcoming.get(row) {
                Some(chapter) => self.navigate_to_chapter(chapter.slug, now_ms),
                None => false,
            },
            Button::Back => {
                self.rail_focus = None;
                true
            }
            // Any page action drops the rail focus and runs as usual.
            other => {
                self.rail_focus = None;
                self.handle_page_input(other, now_ms);
                true
            }
        }
    }

    /// Manual scroll. Cancels any animation and its suppression
    /// window, then observes immediately.
    fn scroll_by(&mut self, delta: i32) -> bool {
        self.nav.cancel();
        let max = self.layout.max_scroll(DISPLAY_HEIGHT as i32);
        let next = (self.scroll_y + delta).clamp(0, max);
        if next == self.scroll_y {
            return false;
        }
        self.scroll_y = next;
        self.observe();
        true
    }

    fn page_jump(&self) -> i32 {
        DISPLAY_HEIGHT as i32 - self.config.page_overlap
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.clear(BinaryColor::Off)?;
        for (index, chapter) in content::chapters().iter().enumerate() {
            if let Some(span) = self.layout.section_span(index) {
                let top = span.top - self.scroll_y;
                if top >= DISPLAY_HEIGHT as i32 || top + span.height <= 0 {
                    continue;
                }
                render_section(display, chapter, span, self.scroll_y)?;
            }
        }
        RailModel::derive(self.active_slug()).render(display, self.rail_focus)?;
        self.toc.render(display, self.tracker.active_index())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
