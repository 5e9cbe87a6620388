//! # textbook-core
//!
//! Hierarchical content navigation for a worked-solutions site: textbooks contain chapters,
//! chapters contain problem sets, problem sets contain problems.
//!
//! ## Overview
//!
//! Given a forest of textbooks and the identifiers the routing layer supplies, textbook-core
//! answers the questions a problem page asks:
//!
//! - which textbook, chapter, problem set and problem do these identifiers name?
//! - what are the previous and next problems in reading order, crossing section and chapter
//!   boundaries?
//! - what are the neighboring problem sets?
//! - when the reader is at the edge of a section, where does "continue" lead?
//!
//! Reading order is the depth-first order of the stored sequences. Identifiers are only ever
//! lookup keys: a chapter with id 14 stored before chapter 13 is read first.
//!
//! ## Architecture
//!
//! - **[`properties`]**: the content tree (`Textbook`, `Chapter`, `ProblemSet`, `Problem`) and
//!   the parsed `ProblemNumber`
//! - **[`contentbase`]**: id lookups, chain resolution, and [`contentbase::ContentBase`], a
//!   validated forest with a precomputed traversal index per textbook
//! - **[`navigation`]**: adjacency over a bare textbook, locating the current problem through
//!   its dotted number
//! - **[`nodekey`]**: `RouteParams` (query parameters `id`, `chapter`, `set`, `p`) and `NodeKey`
//! - **[`session`]**: `NavigationSession`, which turns route params into everything a page needs
//! - **[`breadcrumb`]**: breadcrumb trails and label shortening
//! - **[`codec`]**: JSON and TOML datasets, selected by file extension
//! - **[`config`]**: TOML site configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use textbook_core::{contentbase::ContentBase, nodekey::RouteParams, session::NavigationSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = ContentBase::bundled()?;
//!     let mut session = NavigationSession::new(content);
//!
//!     let active = session.navigate(RouteParams::from_query("/?id=1&chapter=13&set=25&p=6"));
//!     assert_eq!(active.previous_problem.map(|p| p.problem.number.as_str()), Some("13.25.5"));
//!     assert!(active.next_problem.is_none());
//!
//!     for entry in active.breadcrumbs() {
//!         println!("{} -> {}", entry.short_label, entry.href());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Working on a bare tree
//!
//! The [`navigation`] functions need no index. They decode the current problem's `number` to
//! find it, and report a stale or malformed number as an error rather than guessing:
//!
//! ```rust
//! use textbook_core::{contentbase::ContentBase, navigation::{adjacent_problem, Direction}};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let textbook = &ContentBase::bundled()?.textbooks()[0];
//! let first = &textbook.chapters[0].problem_sets[0].problems[0];
//! let next = adjacent_problem(textbook, first, Direction::Next)?;
//! assert_eq!(next.map(|p| p.id), Some(2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `textbook` command line tool (`check`, `show`, `walk`, `toc`)

pub mod breadcrumb;
pub mod codec;
pub mod config;
pub mod contentbase;
pub mod error;
pub mod navigation;
pub mod nodekey;
pub mod properties;
pub mod session;
#[cfg(test)]
mod tests;

pub use error::*;
