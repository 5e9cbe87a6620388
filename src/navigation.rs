//! Traversal-order adjacency over a single [Textbook].
//!
//! Traversal order is a depth-first, pre-order walk of Chapter → ProblemSet → Problem using each
//! container's stored sequence. Ids are only ever used to find a node, never to order nodes.
//!
//! These functions work on a bare tree and locate the current problem by decoding its `number`.
//! [crate::contentbase::ContentBase] answers the same questions from a precomputed index and is
//! the preferred entry point once a dataset has been loaded.
//!
//! Every node handed in must be borrowed from the textbook it is navigated in. Anything else is a
//! [ContentError::Precondition] violation, even when it compares equal to a node there.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    ptr,
};

use crate::{
    contentbase::lookup::{chapter_position, problem_position, problem_set_position},
    error::ContentError,
    properties::{Chapter, Problem, ProblemNumber, ProblemSet, Textbook},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Next => Direction::Previous,
            Direction::Previous => Direction::Next,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

/// Neighboring problem sets of a problem set, in traversal order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetNeighbors<'a> {
    pub previous: Option<&'a ProblemSet>,
    pub next: Option<&'a ProblemSet>,
}

impl<'a> SetNeighbors<'a> {
    pub fn previous_title(&self) -> Option<&'a str> {
        self.previous.map(|ps| ps.title.as_str())
    }

    pub fn next_title(&self) -> Option<&'a str> {
        self.next.map(|ps| ps.title.as_str())
    }

    pub fn get(&self, direction: Direction) -> Option<&'a ProblemSet> {
        match direction {
            Direction::Next => self.next,
            Direction::Previous => self.previous,
        }
    }
}

/// "Continue into the next section" data for a problem at the edge of its set.
///
/// `previous_section_last_problem` is only set when the problem is the first of its set, and
/// `next_section_first_problem` only when it is the last.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossSection<'a> {
    pub previous_section_last_problem: Option<&'a Problem>,
    pub next_section_first_problem: Option<&'a Problem>,
    pub previous_section_title: Option<&'a str>,
    pub next_section_title: Option<&'a str>,
}

/// Sequence positions of a problem set: (chapter index, set index).
pub(crate) type SetSlot = (usize, usize);

/// Every problem set of `textbook` in traversal order, with its sequence position.
pub(crate) fn sets_in_order(
    textbook: &Textbook,
) -> impl DoubleEndedIterator<Item = (SetSlot, &ProblemSet)> + '_ {
    textbook
        .chapters
        .iter()
        .enumerate()
        .flat_map(|(ci, chapter)| {
            chapter
                .problem_sets
                .iter()
                .enumerate()
                .map(move |(si, ps)| ((ci, si), ps))
        })
}

/// The problem set adjacent to `at` in traversal order. With `skip_empty`, sets without problems
/// are stepped over.
pub(crate) fn step_set(
    textbook: &Textbook,
    at: SetSlot,
    direction: Direction,
    skip_empty: bool,
) -> Option<&ProblemSet> {
    let usable = |ps: &&ProblemSet| !skip_empty || !ps.problems.is_empty();
    match direction {
        Direction::Next => sets_in_order(textbook)
            .skip_while(|(pos, _)| *pos <= at)
            .map(|(_, ps)| ps)
            .find(usable),
        Direction::Previous => sets_in_order(textbook)
            .rev()
            .skip_while(|(pos, _)| *pos >= at)
            .map(|(_, ps)| ps)
            .find(usable),
    }
}

/// Nodes belong to a textbook by address. An equal node in another textbook (a second edition
/// sharing exercises, a clone) is still a different node.
fn same_node<T>(a: &T, b: &T) -> bool {
    ptr::eq(a, b)
}

/// Find the sequence position of `problem_set` within `chapter` within `textbook`, checking that
/// the supplied nodes really are the ones stored there.
fn locate_set(
    textbook: &Textbook,
    chapter: &Chapter,
    problem_set: &ProblemSet,
) -> Result<SetSlot, ContentError> {
    let ci = chapter_position(textbook, chapter.id)
        .filter(|ci| same_node(&textbook.chapters[*ci], chapter))
        .ok_or_else(|| {
            ContentError::Precondition(format!(
                "chapter {} ('{}') does not belong to textbook {}",
                chapter.id, chapter.title, textbook.id
            ))
        })?;
    let si = problem_set_position(chapter, problem_set.id)
        .filter(|si| same_node(&chapter.problem_sets[*si], problem_set))
        .ok_or_else(|| {
            ContentError::Precondition(format!(
                "problem set {} ('{}') does not belong to chapter {} of textbook {}",
                problem_set.id, problem_set.title, chapter.id, textbook.id
            ))
        })?;
    Ok((ci, si))
}

/// Where `current` actually sits in `textbook`, found by scanning rather than by `number`.
fn actual_number(textbook: &Textbook, current: &Problem) -> Option<ProblemNumber> {
    textbook.chapters.iter().find_map(|chapter| {
        chapter.problem_sets.iter().find_map(|ps| {
            ps.problems
                .iter()
                .any(|p| same_node(p, current))
                .then(|| ProblemNumber::new(chapter.id, ps.id, current.id))
        })
    })
}

/// Decode `current.number` and find the sequence position of `current` within `textbook`.
fn locate_problem(
    textbook: &Textbook,
    current: &Problem,
) -> Result<(SetSlot, usize), ContentError> {
    let number = current.parsed_number()?;
    let found = chapter_position(textbook, number.chapter).and_then(|ci| {
        let chapter = &textbook.chapters[ci];
        let si = problem_set_position(chapter, number.set)?;
        let problem_set = &chapter.problem_sets[si];
        let pi = problem_position(problem_set, number.problem)
            .filter(|pi| same_node(&problem_set.problems[*pi], current))?;
        Some(((ci, si), pi))
    });
    if let Some(found) = found {
        return Ok(found);
    }
    // The number led nowhere. Either the number is stale or the problem is foreign.
    match actual_number(textbook, current) {
        Some(actual) => Err(ContentError::NumberMismatch {
            number: current.number.clone(),
            expected: actual.to_string(),
        }),
        None => Err(ContentError::Precondition(format!(
            "problem {} does not belong to textbook {}",
            current.number, textbook.id
        ))),
    }
}

/// The problem adjacent to `current` in traversal order, crossing set and chapter boundaries.
///
/// Returns `Ok(None)` past either end of the textbook. Fails with
/// [ContentError::MalformedNumber] or [ContentError::NumberMismatch] when `current.number` cannot
/// be trusted, and with [ContentError::Precondition] when `current` is not part of `textbook`.
pub fn adjacent_problem<'a>(
    textbook: &'a Textbook,
    current: &Problem,
    direction: Direction,
) -> Result<Option<&'a Problem>, ContentError> {
    let ((ci, si), pi) = locate_problem(textbook, current)?;
    let problems = &textbook.chapters[ci].problem_sets[si].problems;
    let within = match direction {
        Direction::Next => problems.get(pi + 1),
        Direction::Previous => pi.checked_sub(1).and_then(|i| problems.get(i)),
    };
    if within.is_some() {
        return Ok(within);
    }
    let spilled = step_set(textbook, (ci, si), direction, true).and_then(|ps| match direction {
        Direction::Next => ps.first_problem(),
        Direction::Previous => ps.last_problem(),
    });
    tracing::trace!(
        "[adjacent_problem] {} of {} crosses a set boundary: {:?}",
        direction,
        current.number,
        spilled.map(|p| &p.number)
    );
    Ok(spilled)
}

/// Both neighbors of `current`; see [adjacent_problem].
pub fn problem_neighbors<'a>(
    textbook: &'a Textbook,
    current: &Problem,
) -> Result<(Option<&'a Problem>, Option<&'a Problem>), ContentError> {
    Ok((
        adjacent_problem(textbook, current, Direction::Previous)?,
        adjacent_problem(textbook, current, Direction::Next)?,
    ))
}

/// The problem set adjacent to `problem_set` in traversal order, spilling into the neighboring
/// chapter at either end of `chapter`. Chapters without problem sets are stepped over.
pub fn adjacent_problem_set<'a>(
    textbook: &'a Textbook,
    chapter: &Chapter,
    problem_set: &ProblemSet,
    direction: Direction,
) -> Result<Option<&'a ProblemSet>, ContentError> {
    let at = locate_set(textbook, chapter, problem_set)?;
    Ok(step_set(textbook, at, direction, false))
}

/// Both neighbors of `problem_set`, with their titles available for breadcrumbs.
pub fn problem_set_neighbors<'a>(
    textbook: &'a Textbook,
    chapter: &Chapter,
    problem_set: &ProblemSet,
) -> Result<SetNeighbors<'a>, ContentError> {
    let at = locate_set(textbook, chapter, problem_set)?;
    Ok(SetNeighbors {
        previous: step_set(textbook, at, Direction::Previous, false),
        next: step_set(textbook, at, Direction::Next, false),
    })
}

/// Cross-section spill for a resolved `(textbook, chapter, problem_set, problem)`.
pub fn cross_section<'a>(
    textbook: &'a Textbook,
    chapter: &Chapter,
    problem_set: &ProblemSet,
    problem: &Problem,
) -> Result<CrossSection<'a>, ContentError> {
    let at = locate_set(textbook, chapter, problem_set)?;
    let stored = &textbook.chapters[at.0].problem_sets[at.1];
    let pi = problem_position(stored, problem.id)
        .filter(|pi| same_node(&stored.problems[*pi], problem))
        .ok_or_else(|| {
            ContentError::Precondition(format!(
                "problem {} does not belong to problem set {} of chapter {}",
                problem.number, problem_set.id, chapter.id
            ))
        })?;

    let mut spill = CrossSection::default();
    if pi == 0 {
        if let Some(prev) = step_set(textbook, at, Direction::Previous, true) {
            spill.previous_section_last_problem = prev.last_problem();
            spill.previous_section_title = Some(prev.title.as_str());
        }
    }
    if pi + 1 == stored.problems.len() {
        if let Some(next) = step_set(textbook, at, Direction::Next, true) {
            spill.next_section_first_problem = next.first_problem();
            spill.next_section_title = Some(next.title.as_str());
        }
    }
    Ok(spill)
}
