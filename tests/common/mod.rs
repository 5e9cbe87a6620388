//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use proptest::prelude::*;
use textbook_core::properties::{Chapter, Problem, ProblemSet, Textbook};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Problem counts per set, per chapter: `shape[c][s]` is the size of set `s` of chapter `c`.
#[allow(dead_code)]
pub type Shape = Vec<Vec<u32>>;

#[allow(dead_code)]
pub fn problem(chapter_id: u32, set_id: u32, id: u32) -> Problem {
    Problem {
        id,
        number: format!("{chapter_id}.{set_id}.{id}"),
        content: format!("Prove {chapter_id}.{set_id}.{id}."),
        hint: String::new(),
        solution: String::new(),
        date: "2024-12-03".to_string(),
        has_visualization: false,
        visualization: None,
    }
}

#[allow(dead_code)]
pub fn problem_set(chapter_id: u32, id: u32, problem_ids: &[u32]) -> ProblemSet {
    ProblemSet {
        id,
        title: format!("{chapter_id}.{id} Exercises"),
        description: String::new(),
        problems: problem_ids
            .iter()
            .map(|p| problem(chapter_id, id, *p))
            .collect(),
    }
}

#[allow(dead_code)]
pub fn chapter(id: u32, problem_sets: Vec<ProblemSet>) -> Chapter {
    Chapter {
        id,
        title: format!("Chapter {id}: Exercises"),
        description: String::new(),
        problem_sets,
    }
}

#[allow(dead_code)]
pub fn textbook(id: u32, chapters: Vec<Chapter>) -> Textbook {
    Textbook {
        id,
        title: format!("Book {id}: A Test Textbook"),
        author: "A. Author".to_string(),
        edition: "First Edition".to_string(),
        year: "2024".to_string(),
        chapters,
    }
}

/// Build a textbook of the given shape. Ids run backwards and skip values at every level, so
/// id order never agrees with stored order.
#[allow(dead_code)]
pub fn textbook_from_shape(id: u32, shape: &Shape) -> Textbook {
    let backwards = |len: usize, i: usize| ((len - i) as u32) * 5;
    let chapters = shape
        .iter()
        .enumerate()
        .map(|(ci, sets)| {
            let chapter_id = backwards(shape.len(), ci);
            chapter(
                chapter_id,
                sets.iter()
                    .enumerate()
                    .map(|(si, count)| {
                        let ids = (0..*count as usize)
                            .map(|pi| backwards(*count as usize, pi))
                            .collect::<Vec<u32>>();
                        problem_set(chapter_id, backwards(sets.len(), si), &ids)
                    })
                    .collect(),
            )
        })
        .collect();
    textbook(id, chapters)
}

/// Every problem of `textbook` in stored order.
#[allow(dead_code)]
pub fn flatten(textbook: &Textbook) -> Vec<&Problem> {
    textbook
        .chapters
        .iter()
        .flat_map(|c| c.problem_sets.iter())
        .flat_map(|ps| ps.problems.iter())
        .collect()
}

/// Textbook shapes including empty sets and empty chapters.
#[allow(dead_code)]
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(prop::collection::vec(0u32..4, 0..4), 0..5)
}
