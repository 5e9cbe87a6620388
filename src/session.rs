//! Explicit navigation state.
//!
//! A [NavigationSession] turns [RouteParams] into everything a problem page needs to render: the
//! resolved chain, the adjacent problems and problem sets, and the "continue into the next
//! section" spill. Every call to [NavigationSession::navigate] recomputes from scratch, so
//! navigating twice to the same params yields the same [ActiveContent].

use crate::{
    breadcrumb::{breadcrumbs, BreadcrumbEntry},
    contentbase::{ContentBase, ProblemRef, ResolvedChain, SetRef},
    navigation::{CrossSection, Direction, SetNeighbors},
    nodekey::{NodeKey, RouteParams},
};

/// Everything derived from one set of route params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveContent<'a> {
    pub params: RouteParams,
    pub chain: ResolvedChain<'a>,
    /// The resolved problem with its traversal offset.
    pub problem: Option<ProblemRef<'a>>,
    /// Set only when a problem is resolved.
    pub previous_problem: Option<ProblemRef<'a>>,
    pub next_problem: Option<ProblemRef<'a>>,
    /// Set only when a problem set is resolved.
    pub previous_problem_set: Option<SetRef<'a>>,
    pub next_problem_set: Option<SetRef<'a>>,
    /// Empty unless a problem is resolved and sits at the edge of its set.
    pub cross_section: CrossSection<'a>,
}

impl<'a> ActiveContent<'a> {
    pub fn key(&self) -> Option<NodeKey> {
        self.chain.node_key()
    }

    pub fn adjacent_problem(&self, direction: Direction) -> Option<ProblemRef<'a>> {
        match direction {
            Direction::Next => self.next_problem,
            Direction::Previous => self.previous_problem,
        }
    }

    pub fn problem_set_neighbors(&self) -> SetNeighbors<'a> {
        SetNeighbors {
            previous: self.previous_problem_set.map(|s| s.problem_set),
            next: self.next_problem_set.map(|s| s.problem_set),
        }
    }

    pub fn previous_problem_set_title(&self) -> Option<&'a str> {
        self.previous_problem_set
            .map(|s| s.problem_set.title.as_str())
    }

    pub fn next_problem_set_title(&self) -> Option<&'a str> {
        self.next_problem_set.map(|s| s.problem_set.title.as_str())
    }

    pub fn breadcrumbs(&self) -> Vec<BreadcrumbEntry> {
        breadcrumbs(&self.chain)
    }
}

/// Navigation state over one [ContentBase].
#[derive(Debug, Clone)]
pub struct NavigationSession<'a> {
    content: &'a ContentBase,
    current: ActiveContent<'a>,
}

impl<'a> NavigationSession<'a> {
    pub fn new(content: &'a ContentBase) -> Self {
        NavigationSession {
            content,
            current: ActiveContent::default(),
        }
    }

    pub fn content(&self) -> &'a ContentBase {
        self.content
    }

    pub fn current(&self) -> &ActiveContent<'a> {
        &self.current
    }

    /// Resolve `params` and everything derived from them.
    pub fn resolve(&self, params: RouteParams) -> ActiveContent<'a> {
        let content = self.content;
        let chain = content.resolve(&params);
        let mut active = ActiveContent {
            params,
            chain,
            ..Default::default()
        };
        let Some(key) = chain.node_key() else {
            return active;
        };
        if chain.problem_set.is_some() {
            active.previous_problem_set = content.adjacent_problem_set(&key, Direction::Previous);
            active.next_problem_set = content.adjacent_problem_set(&key, Direction::Next);
        }
        if let Some(at) = content.problem(&key) {
            active.problem = Some(at);
            active.previous_problem = content.step(&at, Direction::Previous);
            active.next_problem = content.step(&at, Direction::Next);
            active.cross_section = content.cross_section(&at);
        }
        active
    }

    /// Move to `params`, replacing the current state.
    pub fn navigate(&mut self, params: RouteParams) -> &ActiveContent<'a> {
        let active = self.resolve(params);
        if active.key() != self.current.key() {
            tracing::debug!(
                "[NavigationSession] {} -> {}",
                self.current
                    .key()
                    .map(|k| k.href())
                    .unwrap_or_else(|| "/".to_string()),
                active.key().map(|k| k.href()).unwrap_or_else(|| "/".to_string())
            );
        }
        self.current = active;
        &self.current
    }

    /// Move to the problem adjacent to the current one. `None`, leaving the state untouched,
    /// when no problem is active or the traversal ends there.
    pub fn step(&mut self, direction: Direction) -> Option<&ActiveContent<'a>> {
        let target = self.current.adjacent_problem(direction)?;
        Some(self.navigate(RouteParams::from(&target.key())))
    }
}
