//! The content tree and the structures built over it.
//!
//! - [`lookup`]: pure id lookups and chain resolution over a bare `&[Textbook]`
//! - [`ResolvedChain`]: the nodes named by a set of route identifiers
//! - [`TraversalIndex`]: the flattened, precomputed traversal order of one textbook
//! - [`ContentBase`]: a validated textbook forest with one index per textbook

pub mod base;
pub mod chain;
pub mod index;
pub mod lookup;

pub use base::{ContentBase, ProblemRef, SetRef, BUNDLED_TEXTBOOKS};
pub use chain::ResolvedChain;
pub use index::{ProblemPosition, SetPosition, TraversalIndex};
pub use lookup::{
    find_chapter, find_problem, find_problem_set, find_textbook, resolve_chain, resolve_params,
};
