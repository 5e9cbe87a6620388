//! Shared test utilities for content tree testing

use crate::properties::{Chapter, Problem, ProblemSet, Textbook};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A problem whose number agrees with its position.
pub fn problem(chapter_id: u32, set_id: u32, id: u32) -> Problem {
    Problem {
        id,
        number: format!("{chapter_id}.{set_id}.{id}"),
        content: format!("Content of {chapter_id}.{set_id}.{id}"),
        hint: String::new(),
        solution: String::new(),
        date: "2024-11-25".to_string(),
        has_visualization: false,
        visualization: None,
    }
}

/// A problem set holding problems `1..=count`.
pub fn problem_set(chapter_id: u32, id: u32, count: u32) -> ProblemSet {
    problem_set_with(
        chapter_id,
        id,
        (1..=count).map(|p| problem(chapter_id, id, p)).collect(),
    )
}

pub fn problem_set_with(chapter_id: u32, id: u32, problems: Vec<Problem>) -> ProblemSet {
    ProblemSet {
        id,
        title: format!("{chapter_id}.{id} Exercises"),
        description: String::new(),
        problems,
    }
}

pub fn chapter(id: u32, problem_sets: Vec<ProblemSet>) -> Chapter {
    Chapter {
        id,
        title: format!("Chapter {id}: Test Chapter"),
        description: String::new(),
        problem_sets,
    }
}

pub fn book(id: u32, chapters: Vec<Chapter>) -> Textbook {
    Textbook {
        id,
        title: format!("Test Book {id}: Exercises"),
        author: "Test Author".to_string(),
        edition: "First Edition".to_string(),
        year: "2024".to_string(),
        chapters,
    }
}

/// Two chapters stored out of id order, with an empty set and an empty chapter in between:
///
/// ```text
/// chapter 14: set 1 [1, 2]  set 2 []  set 3 [1]
/// chapter 5:  (no sets)
/// chapter 13: set 25 [1, 2, 3]
/// ```
pub fn create_test_textbook() -> Textbook {
    init_logging();
    book(
        1,
        vec![
            chapter(
                14,
                vec![
                    problem_set(14, 1, 2),
                    problem_set(14, 2, 0),
                    problem_set(14, 3, 1),
                ],
            ),
            chapter(5, vec![]),
            chapter(13, vec![problem_set(13, 25, 3)]),
        ],
    )
}
