//! Pure lookups over the content tree.
//!
//! Every lookup is a linear search by id over the container's stored sequence. Absence is an
//! ordinary outcome (stale links, half-typed URLs) and is always reported as `None`.

use crate::{
    nodekey::{parse_id, NodeKey, RouteParams},
    properties::{Chapter, Problem, ProblemSet, Textbook},
};

use super::ResolvedChain;

pub fn find_textbook(textbooks: &[Textbook], id: u32) -> Option<&Textbook> {
    textbooks.iter().find(|t| t.id == id)
}

pub fn find_chapter(textbook: &Textbook, id: u32) -> Option<&Chapter> {
    textbook.chapters.iter().find(|c| c.id == id)
}

pub fn find_problem_set(chapter: &Chapter, id: u32) -> Option<&ProblemSet> {
    chapter.problem_sets.iter().find(|ps| ps.id == id)
}

pub fn find_problem(problem_set: &ProblemSet, id: u32) -> Option<&Problem> {
    problem_set.problems.iter().find(|p| p.id == id)
}

/// Sequence position of the chapter with `id`.
pub fn chapter_position(textbook: &Textbook, id: u32) -> Option<usize> {
    textbook.chapters.iter().position(|c| c.id == id)
}

/// Sequence position of the problem set with `id`.
pub fn problem_set_position(chapter: &Chapter, id: u32) -> Option<usize> {
    chapter.problem_sets.iter().position(|ps| ps.id == id)
}

/// Sequence position of the problem with `id`.
pub fn problem_position(problem_set: &ProblemSet, id: u32) -> Option<usize> {
    problem_set.problems.iter().position(|p| p.id == id)
}

/// Resolve identifier strings to a chain of nodes.
///
/// A level is looked up only when its own identifier and every enclosing identifier are
/// present and every enclosing lookup succeeded. The first missing identifier or failed lookup
/// leaves that level and everything below it unresolved, even if a deeper identifier would
/// match something on its own.
pub fn resolve_chain<'a>(
    textbooks: &'a [Textbook],
    book: Option<&str>,
    chapter: Option<&str>,
    set: Option<&str>,
    problem: Option<&str>,
) -> ResolvedChain<'a> {
    let mut chain = ResolvedChain::default();
    let Some(textbook) = book
        .and_then(parse_id)
        .and_then(|id| find_textbook(textbooks, id))
    else {
        return chain;
    };
    chain.textbook = Some(textbook);

    let Some(found_chapter) = chapter
        .and_then(parse_id)
        .and_then(|id| find_chapter(textbook, id))
    else {
        return chain;
    };
    chain.chapter = Some(found_chapter);

    let Some(found_set) = set
        .and_then(parse_id)
        .and_then(|id| find_problem_set(found_chapter, id))
    else {
        return chain;
    };
    chain.problem_set = Some(found_set);

    chain.problem = problem
        .and_then(parse_id)
        .and_then(|id| find_problem(found_set, id));
    tracing::debug!(
        "[resolve_chain] resolved {} level(s) for book {:?}",
        chain.depth(),
        book
    );
    chain
}

/// [resolve_chain] over [RouteParams].
pub fn resolve_params<'a>(textbooks: &'a [Textbook], params: &RouteParams) -> ResolvedChain<'a> {
    resolve_chain(
        textbooks,
        params.book.as_deref(),
        params.chapter.as_deref(),
        params.set.as_deref(),
        params.problem.as_deref(),
    )
}

/// [resolve_chain] over a [NodeKey]. Levels deeper than the key are left unresolved.
pub fn resolve_key<'a>(textbooks: &'a [Textbook], key: &NodeKey) -> ResolvedChain<'a> {
    resolve_params(textbooks, &RouteParams::from(key))
}
