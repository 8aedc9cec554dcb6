//! Theme: semantic fonts plus the layout constant table.
//!
//! ## Semantic Font API
//!
//! All UI code should use exactly three font functions:
//! - `ui_font_title()` — chapter titles, the rail chapter label (largest)
//! - `ui_font_body()`  — verse and narrative text (medium)
//! - `ui_font_small()` — metadata, gutter numbers, hints (smallest)

use embedded_graphics::mono_font::{ascii, MonoFont};

/// Title font, used for chapter titles and the overlay header.
pub fn ui_font_title() -> &'static MonoFont<'static> {
    &ascii::FONT_10X20
}

/// Body font, used for verse and narrative paragraphs.
pub fn ui_font_body() -> &'static MonoFont<'static> {
    &ascii::FONT_7X13
}

/// Small font, used for part lines, gutter numbers, and footer text.
pub fn ui_font_small() -> &'static MonoFont<'static> {
    &ascii::FONT_6X10
}

/// Character width for the title font.
pub fn ui_font_title_char_width() -> i32 {
    ui_font_title().character_size.width as i32
}

/// Character width for the body font.
pub fn ui_font_body_char_width() -> i32 {
    ui_font_body().character_size.width as i32
}

/// Character width for the small font.
pub fn ui_font_small_char_width() -> i32 {
    ui_font_small().character_size.width as i32
}

// ── Layout constants ────────────────────────────────────────────────
//
// Single source of truth for every pixel offset in the UI.
// Change a value here → it changes on every screen.

/// Layout constants for the 480×800 portrait page.
///
/// All screens must use these instead of hardcoded magic numbers.
pub mod layout {
    /// Side margin (right padding from screen edge, and text-to-rail gap).
    pub const MARGIN: i32 = 20;

    // ── Rail (left edge, always visible) ────────────────────────────

    /// Rail width. Content starts to the right of this column.
    pub const RAIL_W: i32 = 80;

    /// Left edge for horizontal rail text (locus, quick links).
    pub const RAIL_TEXT_X: i32 = 4;

    /// X of each stacked book-title character inside the rail.
    pub const RAIL_CHAR_X: i32 = 37;

    /// Y of the first stacked book-title character.
    pub const RAIL_TITLE_TOP: i32 = 16;

    /// Vertical step between stacked book-title characters.
    pub const RAIL_TITLE_STEP: i32 = 14;

    /// Y of the first locus line (part label or endmatter name).
    pub const RAIL_LOCUS_TOP: i32 = 580;

    /// Y of the large chapter label under the locus lines.
    pub const RAIL_LABEL_Y: i32 = 612;

    /// Y of the first upcoming quick-link row.
    pub const RAIL_LINKS_TOP: i32 = 660;

    /// Height of one quick-link row.
    pub const RAIL_LINK_ROW_H: i32 = 26;

    /// Quick-link rows shown in the rail.
    pub const RAIL_LINK_COUNT: usize = 5;

    /// Characters that fit on one horizontal rail line.
    pub const RAIL_COLS: usize = 12;

    // ── Text column ─────────────────────────────────────────────────

    /// Width of the line-number gutter between rail and text.
    pub const GUTTER_W: i32 = 36;

    /// Left edge of body text.
    pub const TEXT_X: i32 = RAIL_W + GUTTER_W + MARGIN;

    /// Right edge of gutter numbers (right-aligned against this X).
    pub const GUTTER_NUM_RIGHT: i32 = TEXT_X - 12;

    /// Body text wrap width in characters.
    pub const BODY_COLS: usize = 46;

    /// Title wrap width in characters.
    pub const TITLE_COLS: usize = 32;

    /// Body line height in pixels.
    pub const LINE_H: i32 = 16;

    /// Title line height in pixels.
    pub const TITLE_LINE_H: i32 = 24;

    /// Small-font line height in pixels.
    pub const SMALL_LINE_H: i32 = 14;

    // ── Section vertical flow ───────────────────────────────────────

    /// Minimum section height. Every section spans at least one full
    /// viewport so at most two sections straddle the activation line.
    pub const SECTION_MIN_H: i32 = 800;

    /// Padding from section top to the part line.
    pub const SECTION_PAD_TOP: i32 = 48;

    /// Padding below the footer to the section bottom edge.
    pub const SECTION_PAD_BOTTOM: i32 = 32;

    /// Side length of the square artifact panel.
    pub const ARTIFACT_SIZE: i32 = 240;

    /// Footer height (rule, book title, prev/next hints).
    pub const FOOTER_H: i32 = 40;

    // ── Spacing ─────────────────────────────────────────────────────

    /// Small gap (verse to verse).
    pub const GAP_SM: i32 = 8;

    /// Medium gap (header block to text, text to artifact).
    pub const GAP_MD: i32 = 18;

    /// Large gap (artifact to footer).
    pub const GAP_LG: i32 = 30;

    // ── Scroll tracking ─────────────────────────────────────────────

    /// Viewport-relative Y of the activation line. The section whose
    /// span contains `scroll_y + ACTIVATION_LINE_Y` is the active one;
    /// between spans the previous answer is retained.
    pub const ACTIVATION_LINE_Y: i32 = 200;

    /// Pixels moved per Up/Down press.
    pub const SCROLL_STEP: i32 = 80;

    /// Overlap kept between consecutive viewport-height jumps.
    pub const PAGE_OVERLAP: i32 = 40;

    // ── Overlay panel (table of contents) ───────────────────────────

    /// Outer margin around overlay panel (from screen edge).
    pub const OVERLAY_PANEL_MARGIN: i32 = 16;

    /// Row height inside the overlay list.
    pub const OVERLAY_ROW_H: i32 = 22;

    /// Y offset from panel top to title baseline.
    pub const OVERLAY_TITLE_Y: i32 = 22;

    /// Y offset from panel top to the first list row, below the
    /// title and subtitle block.
    pub const OVERLAY_CONTENT_Y: i32 = 88;

    /// Bottom margin for hint text inside the overlay (from panel bottom).
    pub const OVERLAY_HINT_BOTTOM: i32 = 14;

    /// Inset from panel edge for the cursor outline.
    pub const OVERLAY_SELECT_INSET: i32 = 6;

    // ── Derived helpers ─────────────────────────────────────────────

    /// Width available to body text between TEXT_X and the right margin.
    pub const fn text_w(display_width: i32) -> i32 {
        display_width - TEXT_X - MARGIN
    }

    /// Scroll distance of one viewport-height jump.
    pub const fn page_jump(display_height: i32) -> i32 {
        display_height - PAGE_OVERLAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    #[test]
    fn font_tiers_are_distinct() {
        assert!(ui_font_title_char_width() > ui_font_body_char_width());
        assert!(ui_font_body_char_width() > ui_font_small_char_width());
    }

    #[test]
    fn wrap_widths_fit_text_column() {
        let text_w = layout::text_w(DISPLAY_WIDTH as i32);
        assert!(layout::BODY_COLS as i32 * ui_font_body_char_width() <= text_w);
        assert!(layout::TITLE_COLS as i32 * ui_font_title_char_width() <= text_w);
    }

    #[test]
    fn activation_line_is_inside_viewport() {
        assert!(layout::ACTIVATION_LINE_Y > 0);
        assert!(layout::ACTIVATION_LINE_Y < DISPLAY_HEIGHT as i32);
    }

    #[test]
    fn section_min_height_covers_viewport() {
        assert!(layout::SECTION_MIN_H >= DISPLAY_HEIGHT as i32);
    }

    #[test]
    fn rail_regions_fit_display() {
        let links_end =
            layout::RAIL_LINKS_TOP + layout::RAIL_LINK_COUNT as i32 * layout::RAIL_LINK_ROW_H;
        assert!(links_end <= DISPLAY_HEIGHT as i32);
        assert!(layout::RAIL_LOCUS_TOP > layout::RAIL_TITLE_TOP);
        assert!(layout::RAIL_CHAR_X < layout::RAIL_W);
        let line_w = layout::RAIL_TEXT_X + layout::RAIL_COLS as i32 * ui_font_small_char_width();
        assert!(line_w <= layout::RAIL_W);
    }
}
