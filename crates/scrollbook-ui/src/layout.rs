//! Vertical page layout: one span of y-space per chapter section.
//!
//! The whole book is a single tall page. `PageLayout` assigns every
//! chapter a contiguous `SectionSpan` in page coordinates; spans are
//! gapless and ordered, so any page y maps to at most one section.
//! Section heights come from the same composed text that rendering
//! draws, so geometry and pixels cannot disagree.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::artifact::artifact_by_id;
use crate::content::{self, Chapter};
use crate::ui::theme::layout::*;

/// Greedy word wrap at `cols` characters. Words longer than a full
/// line are hard-split.
pub fn wrap_text(text: &str, cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if cols == 0 {
        return lines;
    }
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.len() > cols {
            if !current.is_empty() {
                lines.push(core::mem::take(&mut current));
            }
            let (head, tail) = word.split_at(cols);
            lines.push(String::from(head));
            word = tail;
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= cols {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(core::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A section's slot on the page, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub top: i32,
    pub height: i32,
}

impl SectionSpan {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Top edge inclusive, bottom edge exclusive.
    pub fn contains(&self, y: i32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Wrapped text of one section, composed once and consumed both by
/// height calculation and by rendering.
pub(crate) struct SectionText {
    pub locus: String,
    pub meta: Option<String>,
    pub title_lines: Vec<String>,
    pub narrative_lines: Vec<String>,
    pub verses: Vec<Vec<String>>,
    pub caption_lines: Vec<String>,
}

impl SectionText {
    pub(crate) fn compose(chapter: &Chapter) -> Self {
        let locus = match chapter.part_id.and_then(content::part_by_id) {
            Some(part) => format!("{}: {}", part.label, part.title),
            None => String::from(chapter.label),
        };
        let meta = chapter.part_id.map(|_| format!("Chapter {}", chapter.label));
        let narrative_lines = chapter
            .narrative
            .map(|text| wrap_text(text, BODY_COLS))
            .unwrap_or_default();
        let verses = chapter
            .verses
            .iter()
            .map(|verse| wrap_text(verse, BODY_COLS))
            .collect();
        let caption_lines = artifact_by_id(chapter.artifact_id)
            .map(|spec| wrap_text(spec.themes, BODY_COLS))
            .unwrap_or_default();
        SectionText {
            locus,
            meta,
            title_lines: wrap_text(chapter.title, TITLE_COLS),
            narrative_lines,
            verses,
            caption_lines,
        }
    }

    /// Body text lines that receive gutter numbers.
    pub(crate) fn body_line_count(&self) -> usize {
        self.narrative_lines.len() + self.verses.iter().map(Vec::len).sum::<usize>()
    }

    /// Height of the composed content, top pad through bottom pad.
    pub(crate) fn content_height(&self) -> i32 {
        let mut h = SECTION_PAD_TOP;
        h += SMALL_LINE_H;
        if self.meta.is_some() {
            h += SMALL_LINE_H;
        }
        h += GAP_SM;
        h += self.title_lines.len() as i32 * TITLE_LINE_H;
        h += GAP_MD;
        if !self.narrative_lines.is_empty() {
            h += self.narrative_lines.len() as i32 * LINE_H + GAP_MD;
        }
        for (index, verse) in self.verses.iter().enumerate() {
            if index > 0 {
                h += GAP_SM;
            }
            h += verse.len() as i32 * LINE_H;
        }
        h += GAP_MD + ARTIFACT_SIZE;
        if !self.caption_lines.is_empty() {
            h += GAP_SM + self.caption_lines.len() as i32 * SMALL_LINE_H;
        }
        h + GAP_LG + FOOTER_H + SECTION_PAD_BOTTOM
    }
}

/// Span table for the whole book, one entry per chapter in canonical
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    spans: Vec<SectionSpan>,
}

impl PageLayout {
    /// Lay out every chapter. Spans are gapless, in canonical order,
    /// and each at least `SECTION_MIN_H` tall.
    pub fn compute() -> Self {
        let chapters = content::chapters();
        let mut spans = Vec::with_capacity(chapters.len());
        let mut top = 0;
        for chapter in chapters {
            let height = SectionText::compose(chapter).content_height().max(SECTION_MIN_H);
            spans.push(SectionSpan { top, height });
            top += height;
        }
        PageLayout { spans }
    }

    /// Build a layout from raw section heights. Negative or zero
    /// heights are clamped to one pixel so spans stay ordered.
    pub(crate) fn from_heights(heights: &[i32]) -> Self {
        let mut spans = Vec::with_capacity(heights.len());
        let mut top = 0;
        for &height in heights {
            let height = height.max(1);
            spans.push(SectionSpan { top, height });
            top += height;
        }
        PageLayout { spans }
    }

    pub fn section_count(&self) -> usize {
        self.spans.len()
    }

    pub fn section_span(&self, index: usize) -> Option<&SectionSpan> {
        self.spans.get(index)
    }

    /// Index of the section whose span contains page y, if any.
    pub fn section_at(&self, y: i32) -> Option<usize> {
        self.spans.iter().position(|span| span.contains(y))
    }

    pub fn total_height(&self) -> i32 {
        self.spans.last().map(SectionSpan::bottom).unwrap_or(0)
    }

    /// Largest scroll offset that still fills a viewport of
    /// `viewport_h`.
    pub fn max_scroll(&self, viewport_h: i32) -> i32 {
        (self.total_height() - viewport_h).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DISPLAY_HEIGHT;

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(lines, ["the quick brown", "fox jumps over", "the lazy dog"]);
        for line in &lines {
            assert!(line.len() <= 15);
        }
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let lines = wrap_text("ab supercalifragilistic cd", 8);
        assert_eq!(lines, ["ab", "supercal", "ifragili", "stic cd"]);
    }

    #[test]
    fn wrap_edge_inputs() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
        assert_eq!(wrap_text("exact fit", 9), ["exact fit"]);
        assert!(wrap_text("anything", 0).is_empty());
    }

    #[test]
    fn spans_are_gapless_and_ordered() {
        let layout = PageLayout::compute();
        assert_eq!(layout.section_count(), crate::content::chapters().len());
        let mut expected_top = 0;
        for index in 0..layout.section_count() {
            let span = layout.section_span(index).unwrap();
            assert_eq!(span.top, expected_top);
            assert!(span.height >= SECTION_MIN_H);
            expected_top = span.bottom();
        }
        assert_eq!(layout.total_height(), expected_top);
    }

    #[test]
    fn section_at_boundaries() {
        let layout = PageLayout::from_heights(&[100, 200, 50]);
        assert_eq!(layout.section_at(0), Some(0));
        assert_eq!(layout.section_at(99), Some(0));
        assert_eq!(layout.section_at(100), Some(1));
        assert_eq!(layout.section_at(299), Some(1));
        assert_eq!(layout.section_at(300), Some(2));
        assert_eq!(layout.section_at(349), Some(2));
        assert_eq!(layout.section_at(350), None);
        assert_eq!(layout.section_at(-1), None);
    }

    #[test]
    fn max_scroll_never_negative() {
        let layout = PageLayout::from_heights(&[100]);
        assert_eq!(layout.max_scroll(DISPLAY_HEIGHT as i32), 0);

        let tall = PageLayout::compute();
        let max = tall.max_scroll(DISPLAY_HEIGHT as i32);
        assert_eq!(max, tall.total_height() - DISPLAY_HEIGHT as i32);
        assert!(max > 0);
    }

    #[test]
    fn composed_text_matches_chapter_shape() {
        let intro = crate::content::chapter_by_slug("introduction").unwrap();
        let text = SectionText::compose(intro);
        assert_eq!(text.locus, "Introduction");
        assert!(text.meta.is_none());
        assert!(!text.narrative_lines.is_empty());
        assert_eq!(text.verses.len(), intro.verses.len());
        assert!(!text.caption_lines.is_empty());

        let kaizen = crate::content::chapter_by_slug("kaizen").unwrap();
        let text = SectionText::compose(kaizen);
        assert_eq!(text.locus, "Part II: Early Survival");
        assert_eq!(text.meta.as_deref(), Some("Chapter 03"));
        assert!(text.narrative_lines.is_empty());
        assert!(text.body_line_count() > 0);
    }

    #[test]
    fn every_wrapped_line_fits_its_column() {
        for chapter in crate::content::chapters() {
            let text = SectionText::compose(chapter);
            for line in &text.title_lines {
                assert!(line.len() <= TITLE_COLS, "title line too wide in {}", chapter.slug);
            }
            for verse in &text.verses {
                for line in verse {
                    assert!(line.len() <= BODY_COLS, "verse line too wide in {}", chapter.slug);
                }
            }
        }
    }
}
