//! Table-of-contents overlay.
//!
//! A modal panel listing the whole book: endmatter at top level, parts
//! as headings with their chapters indented beneath. The cursor moves
//! over chapters in canonical order regardless of the visual grouping,
//! so Up/Down always walk the reading order.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};

use crate::content::{self, Chapter, Part};
use crate::ui::helpers::{char_style, draw_text, draw_text_color, fill_rect, outline_rect};
use crate::ui::theme::layout::*;
use crate::ui::theme::{ui_font_body, ui_font_small, ui_font_title};
use crate::{BOOK_SUBTITLE, BOOK_TITLE, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// One visual row of the overlay list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocRow {
    Heading(&'static Part),
    Entry(&'static Chapter),
}

/// The full list: introduction, each part heading followed by its
/// chapters, conclusion.
pub fn toc_rows() -> Vec<TocRow> {
    let mut rows = Vec::new();
    if let Some(first) = content::chapters().first() {
        if content::is_endmatter(first) {
            rows.push(TocRow::Entry(first));
        }
    }
    for (part, group) in content::chapters_grouped_by_part() {
        rows.push(TocRow::Heading(part));
        for chapter in group {
            rows.push(TocRow::Entry(chapter));
        }
    }
    if let Some(last) = content::chapters().last() {
        if content::is_endmatter(last) {
            rows.push(TocRow::Entry(last));
        }
    }
    rows
}

#[derive(Debug, Default)]
pub struct TocOverlay {
    open: bool,
    cursor: usize,
}

impl TocOverlay {
    pub fn new() -> Self {
        Self { open: false, cursor: 0 }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open with the cursor on the active chapter, or the first one.
    pub fn open_at(&mut self, active: Option<usize>) {
        self.open = true;
        self.cursor = active.unwrap_or(0).min(content::chapters().len().saturating_sub(1));
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the cursor through canonical order, clamped at both ends.
    pub fn move_cursor(&mut self, delta: i32) {
        let last = content::chapters().len().saturating_sub(1) as i32;
        self.cursor = (self.cursor as i32 + delta).clamp(0, last) as usize;
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    pub fn selected_slug(&self) -> Option<&'static str> {
        content::chapters().get(self.cursor).map(|ch| ch.slug)
    }

    /// Draw the overlay panel. `active` marks the reader's current
    /// chapter with an inverted row; the cursor row gets an outline.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        active: Option<usize>,
    ) -> Result<(), D::Error> {
        if !self.open {
            return Ok(());
        }
        let panel = Rectangle::new(
            Point::new(OVERLAY_PANEL_MARGIN, OVERLAY_PANEL_MARGIN),
            Size::new(
                DISPLAY_WIDTH - 2 * OVERLAY_PANEL_MARGIN as u32,
                DISPLAY_HEIGHT - 2 * OVERLAY_PANEL_MARGIN as u32,
            ),
        );
        fill_rect(display, panel, BinaryColor::Off)?;
        outline_rect(display, panel)?;

        let inner_x = panel.top_left.x + 10;
        draw_text(
            display,
            BOOK_TITLE,
            inner_x,
            panel.top_left.y + OVERLAY_TITLE_Y,
            ui_font_title(),
        )?;
        let subtitle_bounds = Rectangle::new(
            Point::new(inner_x, panel.top_left.y + OVERLAY_TITLE_Y + 26),
            Size::new(panel.size.width - 20, 30),
        );
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Left)
            .build();
        TextBox::with_textbox_style(
            BOOK_SUBTITLE,
            subtitle_bounds,
            char_style(ui_font_small(), BinaryColor::On),
            textbox_style,
        )
        .draw(display)?;

        let mut y = panel.top_left.y + OVERLAY_CONTENT_Y;
        for row in toc_rows() {
            match row {
                TocRow::Heading(part) => {
                    let text = format!("{}  {}", part.label, part.title);
                    draw_text(display, &text, inner_x, y + 4, ui_font_small())?;
                }
                TocRow::Entry(chapter) => {
                    let indent = if chapter.part_id.is_some() { 14 } else { 0 };
                    let index = content::chapter_index(chapter.slug);
                    let text = entry_text(chapter);
                    let row_rect = Rectangle::new(
                        Point::new(panel.top_left.x + OVERLAY_SELECT_INSET, y - 2),
                        Size::new(
                            panel.size.width - 2 * OVERLAY_SELECT_INSET as u32,
                            OVERLAY_ROW_H as u32 - 2,
                        ),
                    );
                    if index == active && index.is_some() {
                        fill_rect(display, row_rect, BinaryColor::On)?;
                        draw_text_color(
                            display,
                            &text,
                            inner_x + indent,
                            y,
                            ui_font_body(),
                            BinaryColor::Off,
                        )?;
                    } else {
                        draw_text(display, &text, inner_x + indent, y, ui_font_body())?;
                    }
                    if index == Some(self.cursor) {
                        outline_rect(display, row_rect)?;
                    }
                }
            }
            y += OVERLAY_ROW_H;
        }

        draw_text(
            display,
            "Up/Down select   Confirm jump   Back close",
            inner_x,
            panel.top_left.y + panel.size.height as i32 - OVERLAY_HINT_BOTTOM - 10,
            ui_font_small(),
        )?;
        Ok(())
    }
}

fn entry_text(chapter: &Chapter) -> String {
    if chapter.part_id.is_some() {
        format!("{}  {}", chapter.label, chapter.title)
    } else {
        String::from(chapter.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_display::TestDisplay;

    #[test]
    fn rows_follow_grouped_order() {
        let rows = toc_rows();
        assert!(matches!(rows[0], TocRow::Entry(ch) if ch.slug == "introduction"));
        assert!(matches!(rows[rows.len() - 1], TocRow::Entry(ch) if ch.slug == "conclusion"));

        let headings = rows.iter().filter(|r| matches!(r, TocRow::Heading(_))).count();
        let entries = rows.iter().filter(|r| matches!(r, TocRow::Entry(_))).count();
        assert_eq!(headings, content::parts().len());
        assert_eq!(entries, content::chapters().len());

        // Every parted entry sits after its own part heading.
        let mut current_part = None;
        for row in &rows {
            match row {
                TocRow::Heading(part) => current_part = Some(part.id),
                TocRow::Entry(chapter) => {
                    if let Some(part_id) = chapter.part_id {
                        assert_eq!(Some(part_id), current_part, "misplaced {}", chapter.slug);
                    }
                }
            }
        }
    }

    #[test]
    fn entries_visit_every_chapter_in_canonical_order() {
        let entry_slugs: Vec<&str> = toc_rows()
            .iter()
            .filter_map(|row| match row {
                TocRow::Entry(ch) => Some(ch.slug),
                TocRow::Heading(_) => None,
            })
            .collect();
        let canonical: Vec<&str> = content::chapters().iter().map(|ch| ch.slug).collect();
        assert_eq!(entry_slugs, canonical);
    }

    #[test]
    fn cursor_opens_on_active_and_clamps() {
        let mut toc = TocOverlay::new();
        assert!(!toc.is_open());

        toc.open_at(Some(4));
        assert!(toc.is_open());
        assert_eq!(toc.selected_slug(), Some("shokunin"));

        toc.move_cursor(-100);
        assert_eq!(toc.selected_slug(), Some("introduction"));
        toc.move_cursor(100);
        assert_eq!(toc.selected_slug(), Some("conclusion"));
        toc.move_cursor(-1);
        assert_eq!(toc.selected_slug(), Some("mushin"));

        toc.close();
        assert!(!toc.is_open());
    }

    #[test]
    fn open_without_active_starts_at_the_top() {
        let mut toc = TocOverlay::new();
        toc.open_at(None);
        assert_eq!(toc.selected_slug(), Some("introduction"));
    }

    #[test]
    fn closed_overlay_draws_nothing() {
        let toc = TocOverlay::new();
        let mut display = TestDisplay::new();
        toc.render(&mut display, None).unwrap();
        assert_eq!(display.lit_in_rect(display.bounding_box()), 0);
    }

    #[test]
    fn render_stays_inside_the_panel() {
        let mut toc = TocOverlay::new();
        toc.open_at(Some(2));
        let mut display = TestDisplay::new();
        toc.render(&mut display, Some(2)).unwrap();

        let panel = Rectangle::new(
            Point::new(OVERLAY_PANEL_MARGIN, OVERLAY_PANEL_MARGIN),
            Size::new(
                DISPLAY_WIDTH - 2 * OVERLAY_PANEL_MARGIN as u32,
                DISPLAY_HEIGHT - 2 * OVERLAY_PANEL_MARGIN as u32,
            ),
        );
        assert!(display.lit_in_rect(panel) > 0);
        assert_eq!(display.lit_outside_rect(panel), 0);
    }

    #[test]
    fn active_row_renders_inverted() {
        let mut toc = TocOverlay::new();
        toc.open_at(Some(0));

        let mut without = TestDisplay::new();
        toc.render(&mut without, None).unwrap();
        let mut with = TestDisplay::new();
        toc.render(&mut with, Some(3)).unwrap();

        let all = Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
        assert!(with.lit_in_rect(all) > without.lit_in_rect(all));
    }
}
