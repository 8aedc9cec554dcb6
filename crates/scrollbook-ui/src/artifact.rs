//! Visual artifact registry.
//!
//! Each chapter names an artifact id; the registry maps ids to a
//! drawing routine plus display metadata. Lookups go through
//! [`artifact_by_id`] so a missing registration degrades to a labeled
//! placeholder panel instead of failing the render.
//!
//! All motifs are drawn with integer math from a seeded LCG, so a
//! given chapter renders identically on every host and every frame.

use alloc::format;
use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle, Rectangle, RoundedRectangle},
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use crate::ui::helpers::{char_style, outline_rect};
use crate::ui::theme::ui_font_small;

/// Drawing routine selector for a registered artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    EmergingGrid,
    WanderingPath,
    CrackedVessel,
    AscendingSteps,
    RefiningWork,
    ConcentricPause,
    UnbrokenLines,
    StillCenter,
    SimplifyingForm,
    FluidRing,
    IntegratedLattice,
}

/// One registry entry: id, metadata, and the motif that renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub id: &'static str,
    pub themes: &'static str,
    pub visualization: &'static str,
    pub kind: ArtifactKind,
}

const ARTIFACTS: [ArtifactSpec; 11] = [
    ArtifactSpec {
        id: "introduction",
        themes: "beginnings, signal through noise, emergence",
        visualization: "A soft, slowly emerging grid or waveform representing the signal cutting through 21st century noise.",
        kind: ArtifactKind::EmergingGrid,
    },
    ArtifactSpec {
        id: "do",
        themes: "commitment, path, certainty, passion",
        visualization: "A path emerging from uncertainty, commitment taking form before clarity arrives.",
        kind: ArtifactKind::WanderingPath,
    },
    ArtifactSpec {
        id: "wabi-sabi",
        themes: "imperfection, transience, acceptance of flaws",
        visualization: "Imperfect form that cracks or erodes over time and is subtly re-emphasized, turning flaws into features.",
        kind: ArtifactKind::CrackedVessel,
    },
    ArtifactSpec {
        id: "kaizen",
        themes: "continuous improvement, method, competence, meaning",
        visualization: "Incremental progress visualized as small, consistent steps building upward.",
        kind: ArtifactKind::AscendingSteps,
    },
    ArtifactSpec {
        id: "shokunin",
        themes: "craftsmanship, dedication, continuous improvement",
        visualization: "Rows of simple workpieces that grow more refined with each iteration.",
        kind: ArtifactKind::RefiningWork,
    },
    ArtifactSpec {
        id: "ma",
        themes: "rest, emptiness, burnout prevention, strategic pause",
        visualization: "Negative space and pauses visualized as essential structural elements.",
        kind: ArtifactKind::ConcentricPause,
    },
    ArtifactSpec {
        id: "ganbaru",
        themes: "persistence, continuation, showing up, minimum viable presence",
        visualization: "Steady, unbroken continuity despite obstacles and resistance.",
        kind: ArtifactKind::UnbrokenLines,
    },
    ArtifactSpec {
        id: "fudoshin",
        themes: "clarity, focus, noise, centeredness",
        visualization: "A calm center point surrounded by chaotic noise that doesn't affect the core.",
        kind: ArtifactKind::StillCenter,
    },
    ArtifactSpec {
        id: "shibumi",
        themes: "simplicity, refinement, subtraction, essence",
        visualization: "Complexity gradually refined away to reveal essential form.",
        kind: ArtifactKind::SimplifyingForm,
    },
    ArtifactSpec {
        id: "mushin",
        themes: "adaptation, non-attachment, evolution, principles",
        visualization: "Fluid transformation maintaining core structure while adapting to new forms.",
        kind: ArtifactKind::FluidRing,
    },
    ArtifactSpec {
        id: "conclusion",
        themes: "integration, reflection, continuation",
        visualization: "Integrative pattern that hints at all previous motifs, quietly unified.",
        kind: ArtifactKind::IntegratedLattice,
    },
];

/// Look up an artifact registration by id.
pub fn artifact_by_id(id: &str) -> Option<&'static ArtifactSpec> {
    ARTIFACTS.iter().find(|spec| spec.id == id)
}

/// Draw the artifact registered under `id` into `bounds`, or the
/// labeled placeholder when no registration exists. `seed` keeps the
/// jitter stable per chapter.
pub fn render_artifact<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    id: &str,
    seed: u32,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let Some(spec) = artifact_by_id(id) else {
        return draw_placeholder(display, id, bounds);
    };
    let mut rng = Lcg::new(seed);
    match spec.kind {
        ArtifactKind::EmergingGrid => draw_emerging_grid(display, bounds, &mut rng),
        ArtifactKind::WanderingPath => draw_wandering_path(display, bounds, &mut rng),
        ArtifactKind::CrackedVessel => draw_cracked_vessel(display, bounds, &mut rng),
        ArtifactKind::AscendingSteps => draw_ascending_steps(display, bounds),
        ArtifactKind::RefiningWork => draw_refining_work(display, bounds),
        ArtifactKind::ConcentricPause => draw_concentric_pause(display, bounds),
        ArtifactKind::UnbrokenLines => draw_unbroken_lines(display, bounds, &mut rng),
        ArtifactKind::StillCenter => draw_still_center(display, bounds, &mut rng),
        ArtifactKind::SimplifyingForm => draw_simplifying_form(display, bounds),
        ArtifactKind::FluidRing => draw_fluid_ring(display, bounds, &mut rng),
        ArtifactKind::IntegratedLattice => draw_integrated_lattice(display, bounds),
    }
}

fn draw_placeholder<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    id: &str,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    outline_rect(display, bounds)?;
    let message = format!("Artifact not found: {}", id);
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Middle)
        .build();
    TextBox::with_textbox_style(
        &message,
        bounds.offset(-10),
        char_style(ui_font_small(), BinaryColor::On),
        textbox_style,
    )
    .draw(display)?;
    Ok(())
}

// ── Integer geometry ────────────────────────────────────────────────

/// (cos, sin) × 1000 at 15 degree steps, y axis pointing down.
const DIR24: [(i32, i32); 24] = [
    (1000, 0),
    (966, 259),
    (866, 500),
    (707, 707),
    (500, 866),
    (259, 966),
    (0, 1000),
    (-259, 966),
    (-500, 866),
    (-707, 707),
    (-866, 500),
    (-966, 259),
    (-1000, 0),
    (-966, -259),
    (-866, -500),
    (-707, -707),
    (-500, -866),
    (-259, -966),
    (0, -1000),
    (259, -966),
    (500, -866),
    (707, -707),
    (866, -500),
    (966, -259),
];

fn point_on(center: Point, radius: i32, dir: usize) -> Point {
    let (cos, sin) = DIR24[dir % 24];
    Point::new(center.x + radius * cos / 1000, center.y + radius * sin / 1000)
}

/// Points of a regular polygon inscribed at `radius`. `sides` must
/// divide 24; the first point is repeated to close the outline.
fn polygon_points(center: Point, radius: i32, sides: usize) -> Vec<Point> {
    let step = 24 / sides;
    let mut points: Vec<Point> =
        (0..sides).map(|i| point_on(center, radius, i * step)).collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

fn center_of(bounds: Rectangle) -> Point {
    bounds.top_left
        + Point::new(bounds.size.width as i32 / 2, bounds.size.height as i32 / 2)
}

struct Lcg(u32);

impl Lcg {
    fn new(seed: u32) -> Self {
        Lcg(seed.wrapping_mul(2654435761).wrapping_add(1))
    }

    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        self.0
    }

    /// Value in `lo..hi`.
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        let width = (hi - lo).max(1) as u32;
        lo + (self.next() >> 8).rem_euclid(width) as i32
    }
}

// ── Motifs ──────────────────────────────────────────────────────────

fn draw_emerging_grid<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let inner = bounds.offset(-16);
    let rows = 9;
    let cols = 9;
    let cell_w = inner.size.width as i32 / cols;
    let cell_h = inner.size.height as i32 / rows;
    for row in 0..rows {
        for col in 0..cols {
            let cx = inner.top_left.x + col * cell_w + cell_w / 2;
            let cy = inner.top_left.y + row * cell_h + cell_h / 2;
            // Segments lengthen toward the bottom: the signal emerging.
            let half = 2 + row * (cell_w / 2 - 3) / rows + rng.range(0, 3);
            Line::new(Point::new(cx - half, cy), Point::new(cx + half, cy))
                .into_styled(stroke())
                .draw(display)?;
        }
    }
    Ok(())
}

fn draw_wandering_path<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let inner = bounds.offset(-20);
    let steps = 12;
    let w = inner.size.width as i32;
    let h = inner.size.height as i32;
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps as i32 {
        let x = inner.top_left.x + i * w / steps as i32;
        let base_y = inner.top_left.y + h - i * h / steps as i32;
        // Jitter shrinks along the path: clarity arrives after commitment.
        let amp = 4 + (steps as i32 - i) * 3;
        points.push(Point::new(x, base_y + rng.range(-amp, amp + 1)));
    }
    Polyline::new(&points).into_styled(stroke()).draw(display)
}

fn draw_cracked_vessel<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    let radius = 70;
    Circle::with_center(center, radius as u32 * 2)
        .into_styled(stroke())
        .draw(display)?;
    // Eight cracks straddling the rim, each with its own reach.
    for dir in (0..24).step_by(3) {
        let from = radius * 7 / 10 + rng.range(0, 10);
        let to = radius + 8 + rng.range(0, 22);
        Line::new(point_on(center, from, dir), point_on(center, to, dir))
            .into_styled(stroke())
            .draw(display)?;
    }
    Ok(())
}

fn draw_ascending_steps<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let inner = bounds.offset(-20);
    let steps = 12;
    let w = inner.size.width as i32;
    let h = inner.size.height as i32;
    let tread_w = w / steps as i32;
    for i in 0..steps as i32 {
        let x = inner.top_left.x + i * tread_w;
        let y = inner.top_left.y + h - 8 - i * (h - 8) / steps as i32;
        outline_rect(
            display,
            Rectangle::new(Point::new(x, y), Size::new(tread_w as u32 - 3, 8)),
        )?;
    }
    Ok(())
}

fn draw_refining_work<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let inner = bounds.offset(-20);
    let grid = 5;
    let cell = inner.size.width as i32 / grid;
    let piece = 24u32;
    for row in 0..grid {
        for col in 0..grid {
            let x = inner.top_left.x + col * cell + (cell - piece as i32) / 2;
            let y = inner.top_left.y + row * cell + (cell - piece as i32) / 2;
            // Corners round out with each pass across the row.
            let radius = (col * 3) as u32;
            RoundedRectangle::with_equal_corners(
                Rectangle::new(Point::new(x, y), Size::new(piece, piece)),
                Size::new(radius, radius),
            )
            .into_styled(stroke())
            .draw(display)?;
        }
    }
    Ok(())
}

fn draw_concentric_pause<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    for ring in 0..5 {
        let diameter = 32 + ring * 36;
        Circle::with_center(center, diameter).into_styled(stroke()).draw(display)?;
    }
    Ok(())
}

fn draw_unbroken_lines<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let inner = bounds.offset(-18);
    let rows = 8;
    let w = inner.size.width as i32;
    let row_gap = inner.size.height as i32 / rows as i32;
    for row in 0..rows as i32 {
        let y = inner.top_left.y + row * row_gap + row_gap / 2;
        let mut points = Vec::new();
        for i in 0..=10 {
            let x = inner.top_left.x + i * w / 10;
            points.push(Point::new(x, y + rng.range(-3, 4)));
        }
        Polyline::new(&points).into_styled(stroke()).draw(display)?;
    }
    Ok(())
}

fn draw_still_center<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    Circle::with_center(center, 18)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)?;
    // Noise lives in the annulus and never reaches the core.
    for _ in 0..30 {
        let dir = rng.range(0, 24) as usize;
        let from = 52 + rng.range(0, 44);
        Line::new(point_on(center, from, dir), point_on(center, from + 7, dir))
            .into_styled(stroke())
            .draw(display)?;
    }
    Ok(())
}

fn draw_simplifying_form<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    for (sides, radius) in [(12, 96), (8, 72), (6, 48), (3, 24)] {
        let points = polygon_points(center, radius, sides);
        Polyline::new(&points).into_styled(stroke()).draw(display)?;
    }
    Ok(())
}

fn draw_fluid_ring<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
    rng: &mut Lcg,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    let mut points = Vec::with_capacity(13);
    for i in 0..12 {
        let radius = 62 + rng.range(-14, 15);
        points.push(point_on(center, radius, i * 2));
    }
    if let Some(&first) = points.first() {
        points.push(first);
    }
    Polyline::new(&points).into_styled(stroke()).draw(display)?;
    // The core keeps its shape while the outline adapts.
    Circle::with_center(center, 40).into_styled(stroke()).draw(display)
}

fn draw_integrated_lattice<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    bounds: Rectangle,
) -> Result<(), D::Error> {
    let center = center_of(bounds);
    for diameter in [44, 118, 192] {
        Circle::with_center(center, diameter).into_styled(stroke()).draw(display)?;
    }
    let hex = polygon_points(center, 96, 6);
    Polyline::new(&hex).into_styled(stroke()).draw(display)?;
    for dir in 0..3 {
        Line::new(point_on(center, 96, dir * 4), point_on(center, 96, dir * 4 + 12))
            .into_styled(stroke())
            .draw(display)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::test_display::TestDisplay;

    fn panel() -> Rectangle {
        Rectangle::new(Point::new(120, 100), Size::new(240, 240))
    }

    #[test]
    fn every_chapter_artifact_is_registered() {
        for chapter in content::chapters() {
            let spec = artifact_by_id(chapter.artifact_id)
                .unwrap_or_else(|| panic!("no artifact for {}", chapter.slug));
            assert_eq!(spec.id, chapter.artifact_id);
            assert!(!spec.themes.is_empty());
            assert!(!spec.visualization.is_empty());
        }
    }

    #[test]
    fn unknown_id_is_not_registered() {
        assert!(artifact_by_id("meditation").is_none());
        assert!(artifact_by_id("").is_none());
    }

    #[test]
    fn each_artifact_has_its_own_motif() {
        use std::collections::BTreeSet;
        let kinds: BTreeSet<_> = ARTIFACTS.iter().map(|s| format!("{:?}", s.kind)).collect();
        assert_eq!(kinds.len(), ARTIFACTS.len());
    }

    #[test]
    fn registered_artifacts_draw_inside_their_panel() {
        for chapter in content::chapters() {
            let mut display = TestDisplay::new();
            render_artifact(&mut display, chapter.artifact_id, chapter.id, panel()).unwrap();
            assert!(
                display.lit_in_rect(panel().offset(30)) > 0,
                "artifact {} drew nothing",
                chapter.artifact_id
            );
        }
    }

    #[test]
    fn unregistered_id_renders_labeled_placeholder() {
        let mut display = TestDisplay::new();
        render_artifact(&mut display, "meditation", 1, panel()).unwrap();
        // Border plus centered message, all within the panel.
        assert!(display.lit_in_rect(panel()) > 0);
        assert_eq!(display.lit_outside_rect(panel()), 0);
    }

    #[test]
    fn same_seed_renders_identically() {
        let mut a = TestDisplay::new();
        let mut b = TestDisplay::new();
        render_artifact(&mut a, "do", 2, panel()).unwrap();
        render_artifact(&mut b, "do", 2, panel()).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }
}
