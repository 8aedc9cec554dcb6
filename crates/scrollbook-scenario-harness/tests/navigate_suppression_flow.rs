//! The suppression window around animated scrolls, and everything
//! that is allowed to cut it short.

use std::collections::BTreeSet;

use scrollbook_scenario_harness::ScenarioHarness;
use scrollbook_ui::{chapter_index, Button, ViewerConfig};

#[test]
fn animated_jump_never_flickers_through_crossed_chapters() {
    let mut harness = ScenarioHarness::new();
    assert_eq!(harness.app().active_slug(), Some("introduction"));

    // Jump far enough that the viewport crosses several chapters.
    let now = harness.now_ms();
    assert!(harness.app_mut().navigate_to_chapter("kaizen", now));

    let mut observed = BTreeSet::new();
    while harness.app().is_animating() || harness.app().is_suppressed(harness.now_ms()) {
        harness.advance(16);
        if let Some(slug) = harness.app().active_slug() {
            observed.insert(slug);
        }
    }

    // Only the destination was ever reported active.
    assert_eq!(observed.into_iter().collect::<Vec<_>>(), ["kaizen"]);

    // Once the window closes, geometry agrees and nothing changes.
    harness.advance(160);
    assert_eq!(harness.app().active_slug(), Some("kaizen"));
}

#[test]
fn suppression_window_outlives_the_animation_briefly() {
    let mut harness = ScenarioHarness::new();
    let config = ViewerConfig::default();

    let start = harness.now_ms();
    harness.app_mut().navigate_to_chapter("fudoshin", start);
    while harness.app().is_animating() {
        harness.advance(16);
    }
    let landed = harness.now_ms();

    // The settle tail is still open right after landing.
    assert!(harness.app().is_suppressed(landed));
    // And closed once the tail has passed, well before the hard cap.
    assert!(!harness.app().is_suppressed(landed + u64::from(config.settle_ms)));
    assert!(landed - start < u64::from(config.suppress_max_ms));
}

#[test]
fn new_navigation_mid_flight_replaces_the_old_target() {
    let mut harness = ScenarioHarness::new();

    let now = harness.now_ms();
    harness.app_mut().navigate_to_chapter("conclusion", now);
    harness.advance(100);
    assert!(harness.app().is_animating());

    let now = harness.now_ms();
    harness.app_mut().navigate_to_chapter("wabi-sabi", now);
    assert_eq!(harness.app().active_slug(), Some("wabi-sabi"));
    harness.settle();

    let index = chapter_index("wabi-sabi").unwrap();
    let expected = harness.app().layout().section_span(index).unwrap().top;
    assert_eq!(harness.app().scroll_y(), expected);
    assert_eq!(harness.app().active_slug(), Some("wabi-sabi"));
}

#[test]
fn manual_scroll_mid_flight_cancels_everything() {
    let mut harness = ScenarioHarness::new();

    let now = harness.now_ms();
    harness.app_mut().navigate_to_chapter("mushin", now);
    harness.advance(100);
    let mid_flight = harness.app().scroll_y();
    assert!(harness.app().is_animating());

    assert!(harness.press(Button::Down));
    assert!(!harness.app().is_animating());
    assert!(!harness.app().is_suppressed(harness.now_ms()));
    assert_eq!(harness.app().scroll_y(), mid_flight + 80);

    // The viewport stays where the reader put it.
    harness.advance(1000);
    assert_eq!(harness.app().scroll_y(), mid_flight + 80);
}

#[test]
fn unknown_fragments_never_move_the_viewport() {
    let mut harness = ScenarioHarness::with_fragment("#not-a-chapter");
    assert_eq!(harness.app().scroll_y(), 0);
    assert_eq!(harness.app().active_slug(), Some("introduction"));

    let mut harness = ScenarioHarness::with_fragment("#shokunin");
    let resting = harness.app().scroll_y();
    let now = harness.now_ms();
    assert!(!harness.app_mut().handle_fragment_change("#not-a-chapter", now));
    assert!(!harness.app_mut().handle_fragment_change("#", now));
    assert!(!harness.app_mut().handle_fragment_change("", now));
    harness.advance(100);
    assert_eq!(harness.app().scroll_y(), resting);
    assert_eq!(harness.app().active_slug(), Some("shokunin"));
}

#[test]
fn navigating_to_the_current_chapter_still_snaps_home() {
    let mut harness = ScenarioHarness::with_fragment("#ma");
    // Drift within the chapter, then re-request it.
    harness.press(Button::Down);
    harness.press(Button::Down);
    assert_eq!(harness.app().active_slug(), Some("ma"));

    let now = harness.now_ms();
    assert!(harness.app_mut().navigate_to_chapter("ma", now));
    harness.settle();

    let index = chapter_index("ma").unwrap();
    let expected = harness.app().layout().section_span(index).unwrap().top;
    assert_eq!(harness.app().scroll_y(), expected);
}
