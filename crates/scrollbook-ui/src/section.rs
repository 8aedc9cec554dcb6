//! Chapter section rendering.
//!
//! Draws one chapter's section into its page span, translated by the
//! current scroll offset. The vertical walk here consumes the same
//! [`SectionText`] the layout engine measured, element for element, so
//! a span is always exactly tall enough for what gets drawn in it.
//!
//! [`SectionText`]: crate::layout::SectionText

use alloc::format;
use alloc::string::String;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

use crate::artifact::render_artifact;
use crate::content::{self, Chapter};
use crate::layout::{SectionSpan, SectionText};
use crate::ui::helpers::{draw_hline, draw_text, draw_text_right};
use crate::ui::theme::layout::*;
use crate::ui::theme::{ui_font_body, ui_font_small, ui_font_title};
use crate::{BOOK_TITLE, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Whether a horizontal band at screen y with height h overlaps the
/// viewport.
fn on_screen(y: i32, h: i32) -> bool {
    y + h > 0 && y < DISPLAY_HEIGHT as i32
}

/// Draw `chapter` into its span. `scroll_y` is the page offset at the
/// top of the viewport; elements outside the viewport are skipped.
pub fn render_section<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    chapter: &Chapter,
    span: &SectionSpan,
    scroll_y: i32,
) -> Result<(), D::Error> {
    let text = SectionText::compose(chapter);
    let mut y = span.top - scroll_y + SECTION_PAD_TOP;
    let mut line_no = 1;

    if on_screen(y, SMALL_LINE_H) {
        draw_text(display, &text.locus, TEXT_X, y, ui_font_small())?;
    }
    y += SMALL_LINE_H;
    if let Some(meta) = &text.meta {
        if on_screen(y, SMALL_LINE_H) {
            draw_text(display, meta, TEXT_X, y, ui_font_small())?;
        }
        y += SMALL_LINE_H;
    }
    y += GAP_SM;

    for line in &text.title_lines {
        if on_screen(y, TITLE_LINE_H) {
            draw_text(display, line, TEXT_X, y, ui_font_title())?;
        }
        y += TITLE_LINE_H;
    }
    y += GAP_MD;

    if !text.narrative_lines.is_empty() {
        for line in &text.narrative_lines {
            draw_body_line(display, line, y, &mut line_no)?;
            y += LINE_H;
        }
        y += GAP_MD;
    }

    for (index, verse) in text.verses.iter().enumerate() {
        if index > 0 {
            y += GAP_SM;
        }
        for line in verse {
            draw_body_line(display, line, y, &mut line_no)?;
            y += LINE_H;
        }
    }
    y += GAP_MD;

    let panel = Rectangle::new(
        Point::new(TEXT_X, y),
        Size::new(ARTIFACT_SIZE as u32, ARTIFACT_SIZE as u32),
    );
    if on_screen(y, ARTIFACT_SIZE) {
        let mut clipped = display.clipped(&panel);
        render_artifact(&mut clipped, chapter.artifact_id, chapter.id, panel)?;
    }
    y += ARTIFACT_SIZE;

    if !text.caption_lines.is_empty() {
        y += GAP_SM;
        for line in &text.caption_lines {
            if on_screen(y, SMALL_LINE_H) {
                draw_text(display, line, TEXT_X, y, ui_font_small())?;
            }
            y += SMALL_LINE_H;
        }
    }

    render_footer(display, chapter, span, scroll_y)
}

/// One numbered body line: gutter number right-aligned, text at TEXT_X.
fn draw_body_line<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    line: &str,
    y: i32,
    line_no: &mut u32,
) -> Result<(), D::Error> {
    if on_screen(y, LINE_H) {
        let number = format!("{:>2}", line_no);
        draw_text_right(display, &number, GUTTER_NUM_RIGHT, y + 2, ui_font_small())?;
        draw_text(display, line, TEXT_X, y, ui_font_body())?;
    }
    *line_no += 1;
    Ok(())
}

fn render_footer<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    chapter: &Chapter,
    span: &SectionSpan,
    scroll_y: i32,
) -> Result<(), D::Error> {
    let top = span.bottom() - scroll_y - SECTION_PAD_BOTTOM - FOOTER_H;
    if !on_screen(top, FOOTER_H) {
        return Ok(());
    }
    let right = DISPLAY_WIDTH as i32 - MARGIN;
    draw_hline(display, TEXT_X, right, top)?;
    draw_text(display, BOOK_TITLE, TEXT_X, top + 14, ui_font_small())?;

    let mut hints = String::new();
    if let Some(prev) = content::adjacent_chapter(chapter.slug, -1) {
        hints.push_str("< ");
        hints.push_str(prev.label);
    }
    if let Some(next) = content::adjacent_chapter(chapter.slug, 1) {
        if !hints.is_empty() {
            hints.push_str("   ");
        }
        hints.push_str(next.label);
        hints.push_str(" >");
    }
    if !hints.is_empty() {
        draw_text_right(display, &hints, right, top + 14, ui_font_small())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;
    use crate::test_display::TestDisplay;

    fn section(slug: &str) -> (&'static Chapter, SectionSpan) {
        let layout = PageLayout::compute();
        let index = content::chapter_index(slug).unwrap();
        let chapter = &content::chapters()[index];
        (chapter, *layout.section_span(index).unwrap())
    }

    #[test]
    fn draws_text_column_and_gutter() {
        let (chapter, span) = section("introduction");
        let mut display = TestDisplay::new();
        render_section(&mut display, chapter, &span, 0).unwrap();

        let text_column = Rectangle::new(
            Point::new(TEXT_X, 0),
            Size::new((DISPLAY_WIDTH as i32 - TEXT_X) as u32, DISPLAY_HEIGHT),
        );
        assert!(display.lit_in_rect(text_column) > 0);

        let gutter = Rectangle::new(
            Point::new(GUTTER_NUM_RIGHT - 14, 0),
            Size::new(14, DISPLAY_HEIGHT),
        );
        assert!(display.lit_in_rect(gutter) > 0, "no line numbers drawn");

        // Nothing bleeds into the rail.
        let rail = Rectangle::new(Point::zero(), Size::new(RAIL_W as u32, DISPLAY_HEIGHT));
        assert_eq!(display.lit_in_rect(rail), 0);
    }

    #[test]
    fn offscreen_section_draws_nothing() {
        let (chapter, span) = section("introduction");
        let mut display = TestDisplay::new();

        // Scrolled fully past the section.
        render_section(&mut display, chapter, &span, span.bottom()).unwrap();
        assert_eq!(display.lit_in_rect(display.bounding_box()), 0);

        // Section fully below the viewport.
        let mut display = TestDisplay::new();
        render_section(&mut display, chapter, &span, span.top - DISPLAY_HEIGHT as i32)
            .unwrap();
        assert_eq!(display.lit_in_rect(display.bounding_box()), 0);
    }

    #[test]
    fn footer_sits_at_the_span_bottom() {
        let (chapter, span) = section("do");
        // Scroll so the span bottom is at the viewport bottom.
        let scroll_y = span.bottom() - DISPLAY_HEIGHT as i32;
        let mut display = TestDisplay::new();
        render_section(&mut display, chapter, &span, scroll_y).unwrap();

        let rule_y = DISPLAY_HEIGHT as i32 - SECTION_PAD_BOTTOM - FOOTER_H;
        assert!(display.row_has_ink(rule_y));
    }

    #[test]
    fn artifact_panel_gets_ink() {
        let (chapter, span) = section("ma");
        let text = SectionText::compose(chapter);
        // Scroll the artifact panel to the top of the viewport.
        let panel_offset = text.content_height()
            - SECTION_PAD_BOTTOM
            - FOOTER_H
            - GAP_LG
            - text.caption_lines.len() as i32 * SMALL_LINE_H
            - GAP_SM
            - ARTIFACT_SIZE;
        let mut display = TestDisplay::new();
        render_section(&mut display, chapter, &span, span.top + panel_offset).unwrap();

        let panel = Rectangle::new(
            Point::new(TEXT_X, 0),
            Size::new(ARTIFACT_SIZE as u32, ARTIFACT_SIZE as u32),
        );
        assert!(display.lit_in_rect(panel) > 0);
    }

    #[test]
    fn unregistered_artifact_falls_back_to_placeholder() {
        let base = content::chapter_by_slug("do").unwrap();
        let chapter = Chapter { artifact_id: "missing-visual", ..*base };
        let span = SectionSpan {
            top: 0,
            height: SectionText::compose(&chapter).content_height().max(SECTION_MIN_H),
        };
        let mut display = TestDisplay::new();
        render_section(&mut display, &chapter, &span, 0).unwrap();
        // The placeholder draws a border and label where the motif
        // would have been; the render itself never fails.
        assert!(display.lit_in_rect(display.bounding_box()) > 0);
    }

    #[test]
    fn every_section_renders_from_its_own_top() {
        let layout = PageLayout::compute();
        for (index, chapter) in content::chapters().iter().enumerate() {
            let span = layout.section_span(index).unwrap();
            let mut display = TestDisplay::new();
            render_section(&mut display, chapter, span, span.top).unwrap();
            assert!(
                display.lit_in_rect(display.bounding_box()) > 0,
                "{} rendered empty",
                chapter.slug
            );
        }
    }
}
