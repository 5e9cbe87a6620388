use once_cell::sync::OnceCell;
use std::{collections::BTreeSet, ptr};

use crate::{
    codec::{ContentCodec, TomlCodec},
    error::ContentError,
    navigation::{CrossSection, Direction, SetNeighbors},
    nodekey::{NodeKey, RouteParams},
    properties::{Chapter, Problem, ProblemNumber, ProblemSet, Textbook},
};

use super::{
    index::TraversalIndex,
    lookup::{find_textbook, resolve_key, resolve_params},
    ResolvedChain,
};

/// Content compiled into the crate.
pub const BUNDLED_TEXTBOOKS: &str = include_str!("../data/textbooks.toml");

static BUNDLED: OnceCell<ContentBase> = OnceCell::new();

/// A problem together with its owners and its flat traversal offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemRef<'a> {
    pub textbook: &'a Textbook,
    pub chapter: &'a Chapter,
    pub problem_set: &'a ProblemSet,
    pub problem: &'a Problem,
    pub offset: usize,
}

impl<'a> ProblemRef<'a> {
    pub fn key(&self) -> NodeKey {
        NodeKey::Problem {
            book: self.textbook.id,
            chapter: self.chapter.id,
            set: self.problem_set.id,
            problem: self.problem.id,
        }
    }

    /// The number this problem should carry given where it sits in the tree.
    pub fn expected_number(&self) -> ProblemNumber {
        ProblemNumber::new(self.chapter.id, self.problem_set.id, self.problem.id)
    }
}

/// A problem set together with its owners and its flat set offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetRef<'a> {
    pub textbook: &'a Textbook,
    pub chapter: &'a Chapter,
    pub problem_set: &'a ProblemSet,
    pub offset: usize,
}

impl<'a> SetRef<'a> {
    pub fn key(&self) -> NodeKey {
        NodeKey::ProblemSet {
            book: self.textbook.id,
            chapter: self.chapter.id,
            set: self.problem_set.id,
        }
    }
}

/// An immutable textbook forest plus one [TraversalIndex] per textbook.
///
/// Neighbor queries read offsets out of the index and never look at [Problem::number]. A
/// `ContentBase` is never mutated after construction and may be shared freely between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBase {
    textbooks: Vec<Textbook>,
    indices: Vec<TraversalIndex>,
}

impl ContentBase {
    /// Validate `textbooks` with [ContentBase::built_in_test] and index them.
    pub fn new(textbooks: Vec<Textbook>) -> Result<ContentBase, ContentError> {
        let base = ContentBase::new_unchecked(textbooks);
        let errors = base.built_in_test();
        if !errors.is_empty() {
            for error in errors.iter() {
                tracing::warn!("{error}");
            }
            return Err(ContentError::InvalidDataset(errors.join("; ")));
        }
        tracing::info!(
            "Loaded {} textbook(s) with {} problem(s)",
            base.textbooks.len(),
            base.indices.iter().map(TraversalIndex::len).sum::<usize>()
        );
        Ok(base)
    }

    /// Index `textbooks` without validating them.
    pub fn new_unchecked(textbooks: Vec<Textbook>) -> ContentBase {
        let indices = textbooks.iter().map(TraversalIndex::build).collect();
        ContentBase { textbooks, indices }
    }

    /// The dataset compiled into the crate, decoded and validated on first use.
    pub fn bundled() -> Result<&'static ContentBase, ContentError> {
        BUNDLED.get_or_try_init(|| {
            tracing::debug!("Decoding bundled textbook data");
            ContentBase::new(TomlCodec.decode(BUNDLED_TEXTBOOKS)?)
        })
    }

    pub fn textbooks(&self) -> &[Textbook] {
        &self.textbooks
    }

    pub fn textbook(&self, id: u32) -> Option<&Textbook> {
        find_textbook(&self.textbooks, id)
    }

    pub fn index(&self, book: u32) -> Option<&TraversalIndex> {
        self.slot(book).map(|(_, index)| index)
    }

    fn slot(&self, book: u32) -> Option<(&Textbook, &TraversalIndex)> {
        let pos = self.textbooks.iter().position(|t| t.id == book)?;
        Some((&self.textbooks[pos], &self.indices[pos]))
    }

    pub fn resolve(&self, params: &RouteParams) -> ResolvedChain<'_> {
        resolve_params(&self.textbooks, params)
    }

    pub fn resolve_key(&self, key: &NodeKey) -> ResolvedChain<'_> {
        resolve_key(&self.textbooks, key)
    }

    fn problem_ref<'a>(
        textbook: &'a Textbook,
        index: &TraversalIndex,
        offset: usize,
    ) -> Option<ProblemRef<'a>> {
        let pos = index.problem_at(offset)?;
        let chapter = &textbook.chapters[pos.chapter];
        let problem_set = &chapter.problem_sets[pos.set];
        Some(ProblemRef {
            textbook,
            chapter,
            problem_set,
            problem: &problem_set.problems[pos.problem],
            offset,
        })
    }

    fn set_ref<'a>(
        textbook: &'a Textbook,
        index: &TraversalIndex,
        offset: usize,
    ) -> Option<SetRef<'a>> {
        let pos = index.set_at(offset)?;
        let chapter = &textbook.chapters[pos.chapter];
        Some(SetRef {
            textbook,
            chapter,
            problem_set: &chapter.problem_sets[pos.set],
            offset,
        })
    }

    /// The problem named by a [NodeKey::Problem]. Other keys name no problem.
    pub fn problem(&self, key: &NodeKey) -> Option<ProblemRef<'_>> {
        let NodeKey::Problem {
            book,
            chapter,
            set,
            problem,
        } = *key
        else {
            return None;
        };
        let (textbook, index) = self.slot(book)?;
        let offset = index.problem_offset(chapter, set, problem)?;
        Self::problem_ref(textbook, index, offset)
    }

    /// The problem set named by a [NodeKey::ProblemSet] or the set owning a [NodeKey::Problem].
    pub fn problem_set(&self, key: &NodeKey) -> Option<SetRef<'_>> {
        let (book, chapter, set) = match *key {
            NodeKey::ProblemSet { book, chapter, set } | NodeKey::Problem { book, chapter, set, .. } => {
                (book, chapter, set)
            }
            _ => return None,
        };
        let (textbook, index) = self.slot(book)?;
        let offset = index.set_offset(chapter, set)?;
        Self::set_ref(textbook, index, offset)
    }

    /// The problem at flat `offset` of textbook `book`.
    pub fn problem_at(&self, book: u32, offset: usize) -> Option<ProblemRef<'_>> {
        let (textbook, index) = self.slot(book)?;
        Self::problem_ref(textbook, index, offset)
    }

    pub fn first_problem(&self, book: u32) -> Option<ProblemRef<'_>> {
        self.problem_at(book, 0)
    }

    pub fn last_problem(&self, book: u32) -> Option<ProblemRef<'_>> {
        let len = self.index(book)?.len();
        self.problem_at(book, len.checked_sub(1)?)
    }

    /// Re-derive `at` from this base. `None` unless `at` was handed out by this base and its
    /// offset still points at its problem.
    fn verify(&self, at: &ProblemRef<'_>) -> Option<(&Textbook, &TraversalIndex)> {
        let (textbook, index) = self.slot(at.textbook.id)?;
        let found = Self::problem_ref(textbook, index, at.offset)?;
        if ptr::eq(textbook, at.textbook) && ptr::eq(found.problem, at.problem) {
            Some((textbook, index))
        } else {
            tracing::debug!(
                "Rejecting ref to {} at offset {} of textbook {}",
                at.problem.number,
                at.offset,
                at.textbook.id
            );
            None
        }
    }

    /// The problem adjacent to `at` in traversal order. `None` at either end of the textbook and
    /// for a ref this base did not hand out.
    pub fn step(&self, at: &ProblemRef<'_>, direction: Direction) -> Option<ProblemRef<'_>> {
        let (textbook, index) = self.verify(at)?;
        let offset = index.step(at.offset, direction)?;
        Self::problem_ref(textbook, index, offset)
    }

    /// The problem adjacent to the problem named by `key`. `None` when the key names no problem
    /// or the traversal ends there.
    pub fn adjacent_problem(&self, key: &NodeKey, direction: Direction) -> Option<ProblemRef<'_>> {
        let at = self.problem(key)?;
        self.step(&at, direction)
    }

    pub fn next_problem(&self, key: &NodeKey) -> Option<ProblemRef<'_>> {
        self.adjacent_problem(key, Direction::Next)
    }

    pub fn previous_problem(&self, key: &NodeKey) -> Option<ProblemRef<'_>> {
        self.adjacent_problem(key, Direction::Previous)
    }

    /// The problem set adjacent to the set named by `key`, spilling across chapters.
    pub fn adjacent_problem_set(&self, key: &NodeKey, direction: Direction) -> Option<SetRef<'_>> {
        let at = self.problem_set(key)?;
        let (textbook, index) = self.slot(at.textbook.id)?;
        let offset = index.step_set(at.offset, direction)?;
        Self::set_ref(textbook, index, offset)
    }

    pub fn problem_set_neighbors(&self, key: &NodeKey) -> SetNeighbors<'_> {
        SetNeighbors {
            previous: self
                .adjacent_problem_set(key, Direction::Previous)
                .map(|s| s.problem_set),
            next: self
                .adjacent_problem_set(key, Direction::Next)
                .map(|s| s.problem_set),
        }
    }

    /// Cross-section spill for the problem `at`. Because empty sets own no offsets, the problem
    /// one step away from the edge of a set is always in the nearest non-empty neighbor set. A ref
    /// this base did not hand out spills nowhere.
    pub fn cross_section(&self, at: &ProblemRef<'_>) -> CrossSection<'_> {
        let mut spill = CrossSection::default();
        let Some((textbook, index)) = self.verify(at) else {
            return spill;
        };
        let problems_in_set = at.problem_set.problems.len();
        let position = index.problem_at(at.offset);
        let is_first = position.is_some_and(|p| p.problem == 0);
        let is_last = position.is_some_and(|p| p.problem + 1 == problems_in_set);
        if is_first {
            if let Some(prev) = index
                .step(at.offset, Direction::Previous)
                .and_then(|o| Self::problem_ref(textbook, index, o))
            {
                spill.previous_section_last_problem = Some(prev.problem);
                spill.previous_section_title = Some(prev.problem_set.title.as_str());
            }
        }
        if is_last {
            if let Some(next) = index
                .step(at.offset, Direction::Next)
                .and_then(|o| Self::problem_ref(textbook, index, o))
            {
                spill.next_section_first_problem = Some(next.problem);
                spill.next_section_title = Some(next.problem_set.title.as_str());
            }
        }
        spill
    }

    /// Every problem of textbook `book` in traversal order. Empty for an unknown book.
    pub fn traversal(&self, book: u32) -> impl Iterator<Item = ProblemRef<'_>> + '_ {
        let slot = self.slot(book);
        let len = slot.map(|(_, index)| index.len()).unwrap_or(0);
        (0..len).filter_map(move |offset| {
            slot.and_then(|(textbook, index)| Self::problem_ref(textbook, index, offset))
        })
    }

    /// Run the dataset validation pass. Returns one message per violation; empty means valid.
    ///
    /// Checks that ids are unique at every level and that every [Problem::number] parses and
    /// agrees with the problem's actual position.
    pub fn built_in_test(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut book_ids = BTreeSet::new();
        for textbook in self.textbooks.iter() {
            if !book_ids.insert(textbook.id) {
                errors.push(format!(
                    "[ContentBase::built_in_test] duplicate textbook id {}",
                    textbook.id
                ));
            }
            let mut chapter_ids = BTreeSet::new();
            for chapter in textbook.chapters.iter() {
                if !chapter_ids.insert(chapter.id) {
                    errors.push(format!(
                        "[ContentBase::built_in_test] textbook {}: duplicate chapter id {}",
                        textbook.id, chapter.id
                    ));
                }
                let mut set_ids = BTreeSet::new();
                for problem_set in chapter.problem_sets.iter() {
                    if !set_ids.insert(problem_set.id) {
                        errors.push(format!(
                            "[ContentBase::built_in_test] textbook {} chapter {}: duplicate problem set id {}",
                            textbook.id, chapter.id, problem_set.id
                        ));
                    }
                    let mut problem_ids = BTreeSet::new();
                    for problem in problem_set.problems.iter() {
                        if !problem_ids.insert(problem.id) {
                            errors.push(format!(
                                "[ContentBase::built_in_test] textbook {} chapter {} set {}: duplicate problem id {}",
                                textbook.id, chapter.id, problem_set.id, problem.id
                            ));
                        }
                        let expected = ProblemNumber::new(chapter.id, problem_set.id, problem.id);
                        match problem.parsed_number() {
                            Ok(number) if number == expected => {}
                            Ok(_) => errors.push(format!(
                                "[ContentBase::built_in_test] textbook {}: {}",
                                textbook.id,
                                ContentError::NumberMismatch {
                                    number: problem.number.clone(),
                                    expected: expected.to_string(),
                                }
                            )),
                            Err(e) => errors.push(format!(
                                "[ContentBase::built_in_test] textbook {}: {e}",
                                textbook.id
                            )),
                        }
                    }
                }
            }
        }
        errors
    }
}
