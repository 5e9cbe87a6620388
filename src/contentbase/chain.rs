use crate::{
    nodekey::NodeKey,
    properties::{Chapter, Problem, ProblemSet, Textbook},
};

/// The nodes named by a set of identifiers. A level is only ever `Some` if every level above it
/// is `Some` too.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedChain<'a> {
    pub textbook: Option<&'a Textbook>,
    pub chapter: Option<&'a Chapter>,
    pub problem_set: Option<&'a ProblemSet>,
    pub problem: Option<&'a Problem>,
}

impl<'a> ResolvedChain<'a> {
    /// Number of resolved levels, 0 through 4.
    pub fn depth(&self) -> usize {
        [
            self.textbook.is_some(),
            self.chapter.is_some(),
            self.problem_set.is_some(),
            self.problem.is_some(),
        ]
        .iter()
        .take_while(|resolved| **resolved)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.textbook.is_none()
    }

    /// All four levels resolved.
    pub fn is_complete(&self) -> bool {
        self.depth() == 4
    }

    /// Position of the deepest resolved level, if any.
    pub fn node_key(&self) -> Option<NodeKey> {
        let book = self.textbook?.id;
        let Some(chapter) = self.chapter.map(|c| c.id) else {
            return Some(NodeKey::Textbook { book });
        };
        let Some(set) = self.problem_set.map(|ps| ps.id) else {
            return Some(NodeKey::Chapter { book, chapter });
        };
        let Some(problem) = self.problem.map(|p| p.id) else {
            return Some(NodeKey::ProblemSet { book, chapter, set });
        };
        Some(NodeKey::Problem {
            book,
            chapter,
            set,
            problem,
        })
    }

    /// The fully resolved chain as a tuple, when all four levels are present.
    pub fn as_problem(&self) -> Option<(&'a Textbook, &'a Chapter, &'a ProblemSet, &'a Problem)> {
        Some((self.textbook?, self.chapter?, self.problem_set?, self.problem?))
    }

    /// The chain down to a problem set, when at least three levels are present.
    pub fn as_problem_set(&self) -> Option<(&'a Textbook, &'a Chapter, &'a ProblemSet)> {
        Some((self.textbook?, self.chapter?, self.problem_set?))
    }
}
