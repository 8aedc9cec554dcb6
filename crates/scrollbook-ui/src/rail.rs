//! Persistent navigation rail along the left edge.
//!
//! The rail stacks the book title vertically, names the reader's
//! current locus, and lists quick links to the next few chapters.
//! It derives everything from the active slug, so it re-renders
//! correctly from any scroll position.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::content::{self, Chapter};
use crate::ui::helpers::{draw_text, draw_text_color, fill_rect};
use crate::ui::theme::layout::*;
use crate::ui::theme::{ui_font_small, ui_font_title};
use crate::{BOOK_TITLE, DISPLAY_HEIGHT};

/// What the rail shows for a given active chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailModel {
    /// Part label for parted chapters, chapter label for endmatter,
    /// empty before the first section activates.
    pub locus: &'static str,
    /// Large chapter label, absent for endmatter.
    pub label: Option<&'static str>,
    /// Quick links to what comes next, endmatter excluded.
    pub upcoming: Vec<&'static Chapter>,
}

impl RailModel {
    pub fn derive(active_slug: Option<&str>) -> Self {
        let Some(chapter) = active_slug.and_then(content::chapter_by_slug) else {
            // Nothing active yet: point at the start of the book.
            let upcoming = content::chapters()
                .first()
                .map(|ch| content::upcoming_chapters(ch.slug, RAIL_LINK_COUNT))
                .unwrap_or_default();
            return RailModel { locus: "", label: None, upcoming };
        };
        let locus = match chapter.part_id.and_then(content::part_by_id) {
            Some(part) => part.label,
            None => chapter.label,
        };
        let label = chapter.part_id.map(|_| chapter.label);
        RailModel {
            locus,
            label,
            upcoming: content::upcoming_chapters(chapter.slug, RAIL_LINK_COUNT),
        }
    }

    /// Quick-link caption: chapter label plus the first title word.
    pub fn link_text(chapter: &Chapter) -> String {
        let word = chapter
            .title
            .split_whitespace()
            .next()
            .unwrap_or(chapter.title)
            .trim_end_matches(':');
        let mut text = String::from(chapter.label);
        text.push(' ');
        text.push_str(word);
        text.truncate(RAIL_COLS);
        text
    }

    /// Draw the rail. `focused` highlights one quick-link row when the
    /// reader is cursoring through them.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        focused: Option<usize>,
    ) -> Result<(), D::Error> {
        Line::new(
            Point::new(RAIL_W - 1, 0),
            Point::new(RAIL_W - 1, DISPLAY_HEIGHT as i32 - 1),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)?;

        let mut buf = [0u8; 4];
        for (row, c) in BOOK_TITLE.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            let y = RAIL_TITLE_TOP + row as i32 * RAIL_TITLE_STEP;
            draw_text(display, c.encode_utf8(&mut buf), RAIL_CHAR_X, y, ui_font_small())?;
        }

        if !self.locus.is_empty() {
            draw_text(display, self.locus, RAIL_TEXT_X, RAIL_LOCUS_TOP, ui_font_small())?;
        }
        if let Some(label) = self.label {
            let x = (RAIL_W - label.len() as i32 * 10) / 2;
            draw_text(display, label, x, RAIL_LABEL_Y, ui_font_title())?;
        }

        for (row, chapter) in self.upcoming.iter().enumerate() {
            let y = RAIL_LINKS_TOP + row as i32 * RAIL_LINK_ROW_H;
            let text = Self::link_text(chapter);
            if focused == Some(row) {
                fill_rect(
                    display,
                    Rectangle::new(
                        Point::new(0, y - 3),
                        Size::new(RAIL_W as u32 - 2, RAIL_LINK_ROW_H as u32 - 4),
                    ),
                    BinaryColor::On,
                )?;
                draw_text_color(display, &text, RAIL_TEXT_X, y, ui_font_small(), BinaryColor::Off)?;
            } else {
                draw_text(display, &text, RAIL_TEXT_X, y, ui_font_small())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_display::TestDisplay;

    #[test]
    fn parted_chapter_shows_part_and_label() {
        let rail = RailModel::derive(Some("kaizen"));
        assert_eq!(rail.locus, "Part II");
        assert_eq!(rail.label, Some("03"));
        let slugs: Vec<&str> = rail.upcoming.iter().map(|ch| ch.slug).collect();
        assert_eq!(slugs, ["shokunin", "ma", "ganbaru", "fudoshin", "shibumi"]);
    }

    #[test]
    fn endmatter_shows_its_own_label_as_locus() {
        let rail = RailModel::derive(Some("introduction"));
        assert_eq!(rail.locus, "Introduction");
        assert_eq!(rail.label, None);
        assert_eq!(rail.upcoming.len(), RAIL_LINK_COUNT);

        let rail = RailModel::derive(Some("conclusion"));
        assert_eq!(rail.locus, "Conclusion");
        assert!(rail.upcoming.is_empty());
    }

    #[test]
    fn no_active_chapter_points_at_the_start() {
        let rail = RailModel::derive(None);
        assert_eq!(rail.locus, "");
        assert_eq!(rail.label, None);
        assert_eq!(rail.upcoming.first().map(|ch| ch.slug), Some("do"));
    }

    #[test]
    fn unknown_slug_behaves_like_no_active() {
        assert_eq!(RailModel::derive(Some("nope")), RailModel::derive(None));
    }

    #[test]
    fn link_text_fits_a_rail_line() {
        for chapter in content::chapters() {
            let text = RailModel::link_text(chapter);
            assert!(text.len() <= RAIL_COLS, "too wide: {}", text);
        }
        let shokunin = content::chapter_by_slug("shokunin").unwrap();
        assert_eq!(RailModel::link_text(shokunin), "04 Shokunin");
    }

    #[test]
    fn render_stays_inside_the_rail() {
        let mut display = TestDisplay::new();
        let rail = RailModel::derive(Some("ma"));
        rail.render(&mut display, None).unwrap();

        let rail_area = Rectangle::new(Point::zero(), Size::new(RAIL_W as u32, DISPLAY_HEIGHT));
        assert!(display.lit_in_rect(rail_area) > 0);
        assert_eq!(display.lit_outside_rect(rail_area), 0);
    }

    #[test]
    fn focused_row_renders_inverted() {
        let rail = RailModel::derive(Some("introduction"));

        let mut plain = TestDisplay::new();
        rail.render(&mut plain, None).unwrap();
        let mut focused = TestDisplay::new();
        rail.render(&mut focused, Some(0)).unwrap();

        let row = Rectangle::new(
            Point::new(0, RAIL_LINKS_TOP - 3),
            Size::new(RAIL_W as u32 - 2, RAIL_LINK_ROW_H as u32 - 4),
        );
        assert!(focused.lit_in_rect(row) > plain.lit_in_rect(row));
    }
}
