//! Performance benchmarks for navigation
//!
//! Compares the two ways of answering "what comes next":
//! - indexed: `ContentBase`, offset arithmetic on a precomputed traversal index
//! - decoded: the free functions in `navigation`, which parse `Problem::number` and search by id
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use textbook_core::{
    contentbase::ContentBase,
    navigation::{adjacent_problem, Direction},
    properties::{Chapter, Problem, ProblemSet, Textbook},
};

// A textbook of `chapters` chapters, each holding `sets` sets of `problems` problems.
fn synthetic_textbook(chapters: u32, sets: u32, problems: u32) -> Textbook {
    Textbook {
        id: 1,
        title: "Synthetic: Benchmark Textbook".to_string(),
        author: "Bench".to_string(),
        edition: "First".to_string(),
        year: "2024".to_string(),
        chapters: (1..=chapters)
            .map(|c| Chapter {
                id: c,
                title: format!("Chapter {c}"),
                description: String::new(),
                problem_sets: (1..=sets)
                    .map(|s| ProblemSet {
                        id: s,
                        title: format!("{c}.{s} Exercises"),
                        description: String::new(),
                        problems: (1..=problems)
                            .map(|p| Problem {
                                id: p,
                                number: format!("{c}.{s}.{p}"),
                                content: String::new(),
                                hint: String::new(),
                                solution: String::new(),
                                date: String::new(),
                                has_visualization: false,
                                visualization: None,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

// Benchmark: a full forward walk of the textbook, one neighbor lookup per problem
fn bench_full_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_walk");
    for size in [4u32, 16] {
        let textbook = synthetic_textbook(size, size, size);
        let content = ContentBase::new(vec![textbook.clone()]).unwrap();

        group.bench_with_input(BenchmarkId::new("indexed", size), &content, |b, content| {
            b.iter(|| {
                let mut at = content.first_problem(1);
                let mut steps = 0usize;
                while let Some(current) = at {
                    at = content.step(&current, Direction::Next);
                    steps += 1;
                }
                black_box(steps)
            })
        });

        group.bench_with_input(BenchmarkId::new("decoded", size), &textbook, |b, textbook| {
            b.iter(|| {
                let mut at = textbook.chapters[0].problem_sets[0].first_problem();
                let mut steps = 0usize;
                while let Some(current) = at {
                    at = adjacent_problem(textbook, current, Direction::Next).unwrap();
                    steps += 1;
                }
                black_box(steps)
            })
        });
    }
    group.finish();
}

// Benchmark: building the traversal index
fn bench_build_index(c: &mut Criterion) {
    let textbook = synthetic_textbook(16, 16, 16);
    c.bench_function("build_content_base", |b| {
        b.iter(|| ContentBase::new(vec![black_box(textbook.clone())]).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_full_walk, bench_build_index
}

criterion_main!(benches);
