//! Shared UI library for the Scrollbook reader.
//! Works on WASM and desktop simulator hosts.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod app;
pub mod artifact;
pub mod content;
pub mod input;
pub mod layout;
pub mod navigate;
pub mod rail;
pub mod section;
pub mod test_display;
pub mod toc;
pub mod tracker;
pub mod ui;

pub use app::{App, ViewerConfig};
pub use artifact::{artifact_by_id, ArtifactSpec};
pub use content::{
    adjacent_chapter, chapter_by_slug, chapter_index, chapters, chapters_grouped_by_part,
    is_endmatter, part_by_id, parts, upcoming_chapters, Chapter, ContentError, Part,
};
pub use input::{Button, InputEvent};
pub use layout::PageLayout;
pub use navigate::{NavController, ScrollAnimation};
pub use rail::RailModel;
pub use test_display::TestDisplay;
pub use toc::{toc_rows, TocOverlay, TocRow};
pub use tracker::SectionTracker;
pub use ui::theme;

/// UI display dimensions (portrait mode).
pub const DISPLAY_WIDTH: u32 = 480;
pub const DISPLAY_HEIGHT: u32 = 800;

/// Book title shown in the rail, the TOC overlay, and section footers.
pub const BOOK_TITLE: &str = "THE CRAFTSMAN'S WAY";

/// Subtitle shown under the title in the TOC overlay.
pub const BOOK_SUBTITLE: &str =
    "Survival Principles for Mastery When the System Is Rigged for Quitters";
