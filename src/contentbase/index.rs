//! Flattened traversal index for one textbook.
//!
//! Built once when a [super::ContentBase] is constructed. Every problem gets a flat offset in
//! traversal order, and every problem set gets one in set order, so stepping to a neighbor is
//! offset ± 1. Empty problem sets own no problem offsets, which is why problem traversal never
//! stalls on them.

use std::{collections::BTreeMap, ops::Range};

use crate::{navigation::Direction, properties::Textbook};

/// Sequence positions (not ids) of a problem within its textbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProblemPosition {
    pub chapter: usize,
    pub set: usize,
    pub problem: usize,
    /// Flat offset of the owning set in [TraversalIndex] set order.
    pub set_offset: usize,
}

/// Sequence positions of a problem set within its textbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetPosition {
    pub chapter: usize,
    pub set: usize,
    /// Flat offsets of the set's problems.
    pub problems: (usize, usize),
}

impl SetPosition {
    pub fn problem_range(&self) -> Range<usize> {
        self.problems.0..self.problems.1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalIndex {
    problems: Vec<ProblemPosition>,
    sets: Vec<SetPosition>,
    problem_ids: BTreeMap<(u32, u32, u32), usize>,
    set_ids: BTreeMap<(u32, u32), usize>,
}

impl TraversalIndex {
    pub fn build(textbook: &Textbook) -> TraversalIndex {
        let mut index = TraversalIndex::default();
        for (ci, chapter) in textbook.chapters.iter().enumerate() {
            for (si, problem_set) in chapter.problem_sets.iter().enumerate() {
                let set_offset = index.sets.len();
                let start = index.problems.len();
                // Linear lookup returns the first match, so the first occurrence of a duplicate
                // id wins here too.
                index
                    .set_ids
                    .entry((chapter.id, problem_set.id))
                    .or_insert(set_offset);
                for (pi, problem) in problem_set.problems.iter().enumerate() {
                    index
                        .problem_ids
                        .entry((chapter.id, problem_set.id, problem.id))
                        .or_insert(index.problems.len());
                    index.problems.push(ProblemPosition {
                        chapter: ci,
                        set: si,
                        problem: pi,
                        set_offset,
                    });
                }
                index.sets.push(SetPosition {
                    chapter: ci,
                    set: si,
                    problems: (start, index.problems.len()),
                });
            }
        }
        tracing::debug!(
            "[TraversalIndex::build] textbook {}: {} problems in {} sets",
            textbook.id,
            index.problems.len(),
            index.sets.len()
        );
        index
    }

    /// Number of problems in traversal order.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn problem_offset(&self, chapter_id: u32, set_id: u32, problem_id: u32) -> Option<usize> {
        self.problem_ids
            .get(&(chapter_id, set_id, problem_id))
            .copied()
    }

    pub fn set_offset(&self, chapter_id: u32, set_id: u32) -> Option<usize> {
        self.set_ids.get(&(chapter_id, set_id)).copied()
    }

    pub fn problem_at(&self, offset: usize) -> Option<ProblemPosition> {
        self.problems.get(offset).copied()
    }

    pub fn set_at(&self, offset: usize) -> Option<SetPosition> {
        self.sets.get(offset).copied()
    }

    /// Offset of the problem adjacent to `offset`.
    pub fn step(&self, offset: usize, direction: Direction) -> Option<usize> {
        step_offset(offset, direction, self.problems.len())
    }

    /// Offset of the problem set adjacent to `offset`.
    pub fn step_set(&self, offset: usize, direction: Direction) -> Option<usize> {
        step_offset(offset, direction, self.sets.len())
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = &ProblemPosition> + '_ {
        self.problems.iter()
    }
}

fn step_offset(offset: usize, direction: Direction, len: usize) -> Option<usize> {
    match direction {
        Direction::Next => offset.checked_add(1).filter(|o| *o < len),
        Direction::Previous => offset.checked_sub(1).filter(|o| *o < len),
    }
}
