//! Breadcrumb trails for a resolved position.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::{contentbase::ResolvedChain, nodekey::NodeKey};

/// Label of the root entry of every trail.
pub const HOME_LABEL: &str = "Books";

/// Number of characters kept of a chapter title that does not name its chapter number.
const CHAPTER_LABEL_CHARS: usize = 20;

static CHAPTER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chapter \d+").expect("chapter pattern is valid"));
static SECTION_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.\d+)").expect("section pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreadcrumbKind {
    Home,
    Textbook,
    Chapter,
    ProblemSet,
    Problem,
}

impl Display for BreadcrumbKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            BreadcrumbKind::Home => "home",
            BreadcrumbKind::Textbook => "textbook",
            BreadcrumbKind::Chapter => "chapter",
            BreadcrumbKind::ProblemSet => "problem-set",
            BreadcrumbKind::Problem => "problem",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    /// Full label, suitable for a tooltip.
    pub label: String,
    /// Label shown in the trail.
    pub short_label: String,
    pub kind: BreadcrumbKind,
    /// Where the entry leads. `None` for the home entry.
    pub key: Option<NodeKey>,
}

impl BreadcrumbEntry {
    fn new(label: String, kind: BreadcrumbKind, key: Option<NodeKey>) -> Self {
        BreadcrumbEntry {
            short_label: shorten_label(&label, kind),
            label,
            kind,
            key,
        }
    }

    pub fn href(&self) -> String {
        self.key.map(|key| key.href()).unwrap_or_else(|| "/".to_string())
    }
}

/// Shorten a breadcrumb label the way the trail displays it.
///
/// - textbook: the text before the first `:`, trimmed
/// - chapter: the first `Chapter N` in the title, else its first 20 characters
/// - problem set: everything before the first space
/// - home and problem labels are kept as they are
pub fn shorten_label(label: &str, kind: BreadcrumbKind) -> String {
    match kind {
        BreadcrumbKind::Textbook => label.split(':').next().unwrap_or_default().trim().to_string(),
        BreadcrumbKind::Chapter => match CHAPTER_NUMBER.find(label) {
            Some(found) => found.as_str().to_string(),
            None => label.chars().take(CHAPTER_LABEL_CHARS).collect(),
        },
        BreadcrumbKind::ProblemSet => label.split(' ').next().unwrap_or_default().to_string(),
        BreadcrumbKind::Home | BreadcrumbKind::Problem => label.to_string(),
    }
}

/// The leading `N.M` section number of a problem set title, or the whole title.
pub fn section_label(title: &str) -> &str {
    SECTION_NUMBER
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(title)
}

/// The breadcrumb trail for `chain`: the home entry, then one entry per resolved level.
pub fn breadcrumbs(chain: &ResolvedChain<'_>) -> Vec<BreadcrumbEntry> {
    let mut trail = vec![BreadcrumbEntry::new(
        HOME_LABEL.to_string(),
        BreadcrumbKind::Home,
        None,
    )];
    let Some(textbook) = chain.textbook else {
        return trail;
    };
    let book = textbook.id;
    trail.push(BreadcrumbEntry::new(
        textbook.title.clone(),
        BreadcrumbKind::Textbook,
        Some(NodeKey::Textbook { book }),
    ));
    let Some(chapter) = chain.chapter else {
        return trail;
    };
    trail.push(BreadcrumbEntry::new(
        chapter.title.clone(),
        BreadcrumbKind::Chapter,
        Some(NodeKey::Chapter {
            book,
            chapter: chapter.id,
        }),
    ));
    let Some(problem_set) = chain.problem_set else {
        return trail;
    };
    trail.push(BreadcrumbEntry::new(
        problem_set.title.clone(),
        BreadcrumbKind::ProblemSet,
        Some(NodeKey::ProblemSet {
            book,
            chapter: chapter.id,
            set: problem_set.id,
        }),
    ));
    if let Some(problem) = chain.problem {
        trail.push(BreadcrumbEntry::new(
            problem.label(),
            BreadcrumbKind::Problem,
            Some(NodeKey::Problem {
                book,
                chapter: chapter.id,
                set: problem_set.id,
                problem: problem.id,
            }),
        ));
    }
    trail
}
