//! Static content tables for the book.
//!
//! Parts and chapters are process-wide, read-only data loaded once at
//! compile time. Chapter id order is canonical: it defines prev/next
//! adjacency and must match the order sections are laid out on the page.
//! The chapter slug is the sole join key between content, section anchors,
//! and the URL fragment.

use alloc::vec::Vec;
use core::fmt;

/// A named grouping of consecutive chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub id: u32,
    pub label: &'static str,
    pub title: &'static str,
}

/// One titled content unit with an anchor slug, optional part membership,
/// and an associated visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    pub id: u32,
    pub slug: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub part_id: Option<u32>,
    pub verses: &'static [&'static str],
    pub narrative: Option<&'static str>,
    pub artifact_id: &'static str,
}

const PARTS: [Part; 5] = [
    Part { id: 1, label: "Part I", title: "Foundation" },
    Part { id: 2, label: "Part II", title: "Early Survival" },
    Part { id: 3, label: "Part III", title: "The Long Stretch" },
    Part { id: 4, label: "Part IV", title: "Maturity" },
    Part { id: 5, label: "Part V", title: "Endurance" },
];

const CHAPTERS: [Chapter; 11] = [
    Chapter {
        id: 1,
        slug: "introduction",
        label: "Introduction",
        title: "The Signal in the Noise",
        part_id: None,
        verses: &[
            "Every feed is engineered to interrupt you. The century is loud by design, and the noise is not an accident; it is a business model.",
            "Underneath the noise there is still a signal: the old, quiet discipline of making one thing well and then making it better.",
            "The principles in this book are survival gear. They were tested by carpenters, smiths, and monks long before anyone measured attention in milliseconds.",
            "Read them slowly. Nothing here works at skimming speed.",
        ],
        narrative: Some(
            "This book is a field manual for people who make things and intend to keep making them. It is not about talent. It is about staying.",
        ),
        artifact_id: "introduction",
    },
    Chapter {
        id: 2,
        slug: "do",
        label: "01",
        title: "Do: The Way",
        part_id: Some(1),
        verses: &[
            "A path is not a plan. A plan predicts the terrain; a path is what your feet actually wear into the ground.",
            "Commitment comes before clarity. You choose the way first, and only then does the way begin to show itself.",
            "The ones who wait for certainty are still standing at the trailhead, comparing maps.",
        ],
        narrative: None,
        artifact_id: "do",
    },
    Chapter {
        id: 3,
        slug: "wabi-sabi",
        label: "02",
        title: "Wabi-Sabi: The Crack in the Bowl",
        part_id: Some(1),
        verses: &[
            "Perfection is a rendering error. Nothing real survives contact with use, and what we love about old tools is precisely the wear.",
            "Repair the crack with gold. The break is now part of the object's record, not a deletion from it.",
            "Ship the imperfect piece. A flaw you can point to teaches more than a polish no one notices.",
        ],
        narrative: Some(
            "A tea master once paid a fortune for a bowl the potter had thrown away. The flaw was the signature.",
        ),
        artifact_id: "wabi-sabi",
    },
    Chapter {
        id: 4,
        slug: "kaizen",
        label: "03",
        title: "Kaizen: One Step, Then Another",
        part_id: Some(2),
        verses: &[
            "Improvement is not an event. It is a unit of work small enough to finish today and boring enough to repeat tomorrow.",
            "One percent compounds. The staircase looks unremarkable from every individual step and astonishing from the landing.",
            "Do not raise the bar; raise the floor. Mastery is mostly the slow elimination of your worst days.",
        ],
        narrative: None,
        artifact_id: "kaizen",
    },
    Chapter {
        id: 5,
        slug: "shokunin",
        label: "04",
        title: "Shokunin: The Craftsman's Devotion",
        part_id: Some(2),
        verses: &[
            "The shokunin does not separate work from worth. The obligation is to the craft itself, and through the craft, to everyone downstream of it.",
            "Sweep the shop before you open it. Devotion is visible in the corners nobody inspects.",
            "Ten thousand repetitions are not practice for the real work. They are the real work.",
        ],
        narrative: None,
        artifact_id: "shokunin",
    },
    Chapter {
        id: 6,
        slug: "ma",
        label: "05",
        title: "Ma: The Space Between",
        part_id: Some(3),
        verses: &[
            "Rest is not the absence of work. It is the beam that carries the load between the pillars.",
            "A pause is a decision. Burnout is what happens when every silence gets sold to the highest bidder.",
            "Leave space in the schedule, space in the composition, space in the sentence. What you leave out is load-bearing.",
        ],
        narrative: Some(
            "In Japanese rooms the emptiness is structural. Remove it and the room does not get bigger; it disappears.",
        ),
        artifact_id: "ma",
    },
    Chapter {
        id: 7,
        slug: "ganbaru",
        label: "06",
        title: "Ganbaru: Stubborn Continuance",
        part_id: Some(3),
        verses: &[
            "Ganbaru is not heroics. It is the unbroken line: showing up at minimum viable presence on the days when presence is all you have.",
            "The streak outlasts the sprint. Intensity is a guest; continuity pays the rent.",
            "When you cannot do the work, touch the work. Open the file. Sharpen one tool. Keep the thread unbroken.",
        ],
        narrative: None,
        artifact_id: "ganbaru",
    },
    Chapter {
        id: 8,
        slug: "fudoshin",
        label: "07",
        title: "Fudoshin: The Immovable Mind",
        part_id: Some(4),
        verses: &[
            "The immovable mind is not rigid. It is a center of gravity so low that the noise cannot find leverage.",
            "Outrage is a rented emotion. Every alarm you answer that is not yours leaves the forge a little colder.",
            "Guard the single point of attention. It is the only asset the century is genuinely trying to steal.",
        ],
        narrative: None,
        artifact_id: "fudoshin",
    },
    Chapter {
        id: 9,
        slug: "shibumi",
        label: "08",
        title: "Shibumi: Effortless Refinement",
        part_id: Some(4),
        verses: &[
            "Shibumi is the complexity you no longer have to show. The master's stroke looks simple because everything unnecessary has already been removed.",
            "Subtraction is a skill with its own apprenticeship. Anyone can add a feature; it takes taste to delete one.",
            "Aim for the quiet surface over the deep structure. Elegance is what remains when effort has been fully absorbed.",
        ],
        narrative: None,
        artifact_id: "shibumi",
    },
    Chapter {
        id: 10,
        slug: "mushin",
        label: "09",
        title: "Mushin: The Mind Without Grasping",
        part_id: Some(5),
        verses: &[
            "Mushin is not empty-headedness. It is principles so thoroughly absorbed that they fire without being consulted.",
            "Hold the method loosely. The forms that trained you are scaffolding, and scaffolding is meant to come down.",
            "Adapt without abandoning. The water changes shape with every vessel and remains entirely water.",
        ],
        narrative: Some(
            "Ask the swordsman what he was thinking at the moment of the cut and he will tell you: nothing at all.",
        ),
        artifact_id: "mushin",
    },
    Chapter {
        id: 11,
        slug: "conclusion",
        label: "Conclusion",
        title: "The Way Continues",
        part_id: None,
        verses: &[
            "None of these principles work alone. The way is the weave: imperfection accepted, steps compounded, space defended, the line unbroken.",
            "The system is still rigged for quitters. That is precisely why the patient are so hard to compete with.",
            "Close the book. Open the shop. The signal is waiting under the noise, where it has always been.",
        ],
        narrative: Some(
            "There is no final chapter in a craft. There is only the next piece, begun with slightly better hands.",
        ),
        artifact_id: "conclusion",
    },
];

/// Ordered part table.
pub fn parts() -> &'static [Part] {
    &PARTS
}

/// Ordered chapter table. Index order equals canonical id order.
pub fn chapters() -> &'static [Chapter] {
    &CHAPTERS
}

/// Look up a chapter by its anchor slug.
pub fn chapter_by_slug(slug: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|ch| ch.slug == slug)
}

/// Look up a part by id.
pub fn part_by_id(id: u32) -> Option<&'static Part> {
    PARTS.iter().find(|p| p.id == id)
}

/// Position of a chapter in canonical order.
pub fn chapter_index(slug: &str) -> Option<usize> {
    CHAPTERS.iter().position(|ch| ch.slug == slug)
}

/// Chapter adjacent to `slug` in canonical order, or None past either end.
pub fn adjacent_chapter(slug: &str, delta: i32) -> Option<&'static Chapter> {
    let index = chapter_index(slug)? as i32 + delta;
    if index < 0 {
        return None;
    }
    CHAPTERS.get(index as usize)
}

/// Introduction and conclusion carry no part.
pub fn is_endmatter(chapter: &Chapter) -> bool {
    chapter.part_id.is_none()
}

/// The next `n` chapters after `slug`, with endmatter filtered out.
///
/// This filter applies to the rail quick-link list only; endmatter stays a
/// valid navigation target everywhere else.
pub fn upcoming_chapters(slug: &str, n: usize) -> Vec<&'static Chapter> {
    let Some(index) = chapter_index(slug) else {
        return Vec::new();
    };
    CHAPTERS
        .iter()
        .skip(index + 1)
        .take(n)
        .filter(|ch| !is_endmatter(ch))
        .collect()
}

/// Chapters grouped under their parts: only parts with at least one
/// chapter, in part order, chapters in canonical order within each group.
/// Partless chapters appear in no group.
pub fn chapters_grouped_by_part() -> Vec<(&'static Part, Vec<&'static Chapter>)> {
    group_by_part(&PARTS, &CHAPTERS)
}

fn group_by_part<'a>(
    parts: &'a [Part],
    chapters: &'a [Chapter],
) -> Vec<(&'a Part, Vec<&'a Chapter>)> {
    parts
        .iter()
        .filter_map(|part| {
            let group: Vec<&Chapter> = chapters
                .iter()
                .filter(|ch| ch.part_id == Some(part.id))
                .collect();
            if group.is_empty() {
                None
            } else {
                Some((part, group))
            }
        })
        .collect()
}

/// Violation of a content table invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentError {
    UnorderedChapterIds { slug: &'static str },
    DuplicateSlug { slug: &'static str },
    SlugNotFragmentSafe { slug: &'static str },
    UnknownPart { slug: &'static str, part_id: u32 },
    PartlessMidBook { slug: &'static str },
    UnorderedPartIds { part_id: u32 },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::UnorderedChapterIds { slug } => {
                write!(f, "chapter ids not strictly increasing at '{}'", slug)
            }
            ContentError::DuplicateSlug { slug } => write!(f, "duplicate chapter slug '{}'", slug),
            ContentError::SlugNotFragmentSafe { slug } => {
                write!(f, "chapter slug '{}' is not fragment-safe", slug)
            }
            ContentError::UnknownPart { slug, part_id } => {
                write!(f, "chapter '{}' references unknown part {}", slug, part_id)
            }
            ContentError::PartlessMidBook { slug } => {
                write!(f, "chapter '{}' has no part but is not first or last", slug)
            }
            ContentError::UnorderedPartIds { part_id } => {
                write!(f, "part ids not strictly increasing at {}", part_id)
            }
        }
    }
}

/// Check every table invariant. Run by tests; the tables are static so a
/// passing build of the test suite certifies the dataset.
pub fn validate() -> Result<(), ContentError> {
    validate_tables(&PARTS, &CHAPTERS)
}

pub(crate) fn validate_tables(parts: &[Part], chapters: &[Chapter]) -> Result<(), ContentError> {
    for window in parts.windows(2) {
        if window[1].id <= window[0].id {
            return Err(ContentError::UnorderedPartIds { part_id: window[1].id });
        }
    }

    for (index, chapter) in chapters.iter().enumerate() {
        if index > 0 && chapter.id <= chapters[index - 1].id {
            return Err(ContentError::UnorderedChapterIds { slug: chapter.slug });
        }
        if chapters[..index].iter().any(|prev| prev.slug == chapter.slug) {
            return Err(ContentError::DuplicateSlug { slug: chapter.slug });
        }
        let fragment_safe = !chapter.slug.is_empty()
            && chapter
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !fragment_safe {
            return Err(ContentError::SlugNotFragmentSafe { slug: chapter.slug });
        }
        match chapter.part_id {
            Some(part_id) => {
                if !parts.iter().any(|p| p.id == part_id) {
                    return Err(ContentError::UnknownPart { slug: chapter.slug, part_id });
                }
            }
            None => {
                if index != 0 && index != chapters.len() - 1 {
                    return Err(ContentError::PartlessMidBook { slug: chapter.slug });
                }
            }
        }
    }

    Ok(())
}
